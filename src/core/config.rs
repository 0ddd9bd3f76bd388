use std::path::PathBuf;
use crate::core::error::{Error, ErrorKind, Result};
use crate::storage::history::SyncMode;

#[derive(Debug, Clone)]
pub struct Config {
    pub data_dir: PathBuf,
    pub history_file: String,

    // Column names the range filters of a SearchRequest run against
    pub capacity_field: String,
    pub price_field: String,

    pub correction_cache_size: usize,           // 0 disables the cache

    pub index_workers: usize,
    pub parallel_threshold: usize,              // Documents; smaller feeds are prepared inline

    pub history_sync: SyncMode,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            data_dir: PathBuf::from("./data"),
            history_file: "searchHistory.txt".to_string(),

            capacity_field: "capacity".to_string(),
            price_field: "price per month".to_string(),

            correction_cache_size: 1024,

            index_workers: num_cpus::get(),
            parallel_threshold: 8,

            history_sync: SyncMode::None,
        }
    }
}

impl Config {
    pub fn with_data_dir(mut self, data_dir: impl Into<PathBuf>) -> Self {
        self.data_dir = data_dir.into();
        self
    }

    pub fn with_history_file(mut self, name: &str) -> Self {
        self.history_file = name.to_string();
        self
    }

    pub fn with_correction_cache_size(mut self, size: usize) -> Self {
        self.correction_cache_size = size;
        self
    }

    pub fn with_index_workers(mut self, workers: usize) -> Self {
        self.index_workers = workers;
        self
    }

    pub fn with_parallel_threshold(mut self, documents: usize) -> Self {
        self.parallel_threshold = documents;
        self
    }

    pub fn with_history_sync(mut self, sync: SyncMode) -> Self {
        self.history_sync = sync;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.index_workers == 0 {
            return Err(Error::new(
                ErrorKind::InvalidArgument,
                "index_workers must be at least 1".to_string(),
            ));
        }
        if self.history_file.trim().is_empty() {
            return Err(Error::new(
                ErrorKind::InvalidArgument,
                "history_file must not be empty".to_string(),
            ));
        }
        if self.capacity_field.is_empty() || self.price_field.is_empty() {
            return Err(Error::new(
                ErrorKind::InvalidArgument,
                "range filter field names must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}
