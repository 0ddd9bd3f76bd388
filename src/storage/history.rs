use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, ErrorKind as IoErrorKind, Write};
use std::path::{Path, PathBuf};
use crate::core::error::Result;

/// Appends between fsyncs in `SyncMode::Batch`
const BATCH_SYNC_INTERVAL: u64 = 64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncMode {
    Immediate,  // fsync after every append
    Batch,      // fsync every BATCH_SYNC_INTERVAL appends
    None,       // Let OS handle it
}

/// Append-only log of raw query strings, one per line.
/// Replaying it in file order rebuilds the query-frequency tree.
pub struct HistoryLog {
    pub file: File,
    pub path: PathBuf,
    pub sync_mode: SyncMode,
    pub appended: u64,
}

impl HistoryLog {
    pub fn open(path: &Path, sync_mode: SyncMode) -> Result<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)?;

        Ok(HistoryLog {
            file,
            path: path.to_path_buf(),
            sync_mode,
            appended: 0,
        })
    }

    /// Line breaks inside a query would split it into two entries on
    /// replay, so they are written as spaces.
    pub fn append(&mut self, query: &str) -> Result<()> {
        let line: String = query
            .chars()
            .map(|c| if c == '\n' || c == '\r' { ' ' } else { c })
            .collect();

        self.file.write_all(line.as_bytes())?;
        self.file.write_all(b"\n")?;
        self.appended += 1;

        match self.sync_mode {
            SyncMode::Immediate => self.file.sync_data()?,
            SyncMode::Batch if self.appended % BATCH_SYNC_INTERVAL == 0 => {
                self.file.sync_data()?
            },
            _ => {}
        }

        Ok(())
    }

    pub fn sync(&mut self) -> Result<()> {
        self.file.sync_all()?;
        Ok(())
    }

    /// Every entry in file order; a missing file is an empty history
    pub fn read_entries(path: &Path) -> Result<Vec<String>> {
        let file = match File::open(path) {
            Ok(file) => file,
            Err(e) if e.kind() == IoErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut entries = Vec::new();
        for line in BufReader::new(file).lines() {
            entries.push(line?);
        }
        Ok(entries)
    }
}
