use std::path::Path;
use parking_lot::Mutex;
use crate::analytics::frequency_tree::FrequencyTree;
use crate::core::error::Result;
use crate::core::types::fold_case;
use crate::storage::history::{HistoryLog, SyncMode};

struct TrackerState {
    tree: FrequencyTree,
    log: Option<HistoryLog>,
}

/// Live query-frequency counts with an optional durable history.
///
/// One lock covers the tree and the log so readers never see a tree
/// mid-rotation and log order matches insert order.
pub struct QueryTracker {
    state: Mutex<TrackerState>,
}

impl QueryTracker {
    /// Counts kept in memory only
    pub fn in_memory() -> Self {
        QueryTracker {
            state: Mutex::new(TrackerState {
                tree: FrequencyTree::new(),
                log: None,
            }),
        }
    }

    /// Rebuild counts by replaying `path`, then keep appending to it
    pub fn open(path: &Path, sync_mode: SyncMode) -> Result<Self> {
        let entries = HistoryLog::read_entries(path)?;
        let log = HistoryLog::open(path, sync_mode)?;

        let tracker = QueryTracker {
            state: Mutex::new(TrackerState {
                tree: FrequencyTree::new(),
                log: Some(log),
            }),
        };
        let replayed = tracker.replay(entries.iter().map(String::as_str));

        tracing::info!(
            path = %path.display(),
            entries = replayed,
            distinct = tracker.distinct_queries(),
            "Replayed query history"
        );
        Ok(tracker)
    }

    /// Feed historical queries into the tree without logging them again.
    /// Blank entries are skipped, matching what `record` accepts.
    pub fn replay<'a, I>(&self, queries: I) -> usize
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut state = self.state.lock();
        let mut replayed = 0;
        for query in queries {
            let term = fold_case(query.trim());
            if term.is_empty() {
                continue;
            }
            state.tree.insert(&term);
            replayed += 1;
        }
        replayed
    }

    /// Count one executed query and append it to the history.
    ///
    /// The in-memory count always advances; a failed append is logged and
    /// that one occurrence is lost from the next replay.
    pub fn record(&self, query: &str) -> u64 {
        let raw = query.trim();
        let term = fold_case(raw);
        if term.is_empty() {
            return 0;
        }

        let mut state = self.state.lock();
        let count = state.tree.insert(&term);

        if let Some(log) = state.log.as_mut() {
            if let Err(e) = log.append(raw) {
                tracing::warn!(
                    path = %log.path.display(),
                    query = raw,
                    error = %e,
                    "Failed to append query to history"
                );
            }
        }

        count
    }

    pub fn frequency_of(&self, query: &str) -> u64 {
        let term = fold_case(query.trim());
        self.state.lock().tree.find(&term)
    }

    /// See `FrequencyTree::top_k`
    pub fn top_queries(&self, k: usize) -> Vec<(String, u64)> {
        self.state.lock().tree.top_k(k)
    }

    pub fn distinct_queries(&self) -> usize {
        self.state.lock().tree.len()
    }

    pub fn total_queries(&self) -> u64 {
        self.state.lock().tree.total()
    }

    pub fn is_persistent(&self) -> bool {
        self.state.lock().log.is_some()
    }

    pub fn sync(&self) -> Result<()> {
        match self.state.lock().log.as_mut() {
            Some(log) => log.sync(),
            None => Ok(()),
        }
    }
}
