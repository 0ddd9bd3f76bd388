use std::path::{Path, PathBuf};
use std::fs;
use crate::core::error::Result;

/// Files the engine owns under its data directory
#[derive(Debug, Clone)]
pub struct StorageLayout {
    pub base_dir: PathBuf,      // Root directory, shared with the source feed
    pub history_path: PathBuf,  // Append-only query history
}

impl StorageLayout {
    pub fn new(base_dir: PathBuf, history_file: &str) -> Result<Self> {
        fs::create_dir_all(&base_dir)?;
        let history_path = base_dir.join(history_file);

        Ok(StorageLayout {
            base_dir,
            history_path,
        })
    }

    pub fn history_path(&self) -> &Path {
        &self.history_path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_creates_base_dir() {
        let dir = TempDir::new().unwrap();
        let base = dir.path().join("nested").join("data");

        let layout = StorageLayout::new(base.clone(), "searchHistory.txt").unwrap();
        assert!(base.is_dir());
        assert_eq!(layout.history_path(), base.join("searchHistory.txt"));
    }
}
