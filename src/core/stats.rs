use chrono::{DateTime, Utc};
use serde::{Serialize, Deserialize};
use crate::search::cache::CacheStats;

/// Engine statistics for monitoring
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineStats {
    // Index
    pub documents: usize,
    pub rows: usize,
    pub plain_terms: usize,
    pub structured_terms: usize,
    pub trie_nodes: usize,
    pub dictionary_words: usize,
    pub built_at: DateTime<Utc>,
    pub generation: u64,

    // Query analytics
    pub distinct_queries: usize,
    pub total_queries: u64,
    pub history_persistent: bool,

    pub correction_cache: CacheStats,
}

/// Outcome of one index build
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuildReport {
    pub documents: usize,
    pub rows: usize,
    pub cells: usize,
    pub plain_terms: usize,
    pub structured_terms: usize,
    pub dictionary_words: usize,
    pub took_ms: u64,
}
