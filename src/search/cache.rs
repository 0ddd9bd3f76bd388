use lru::LruCache;
use std::num::NonZeroUsize;
use std::sync::atomic::{AtomicUsize, Ordering};
use parking_lot::Mutex;
use serde::{Serialize, Deserialize};
use crate::search::fuzzy::Correction;

/// Catalog generation plus folded query. An answer computed against one
/// catalog can never be served for another, even if it lands after a clear.
pub type CacheKey = (u64, String);

/// LRU of folded query -> corrector answer, so repeated misspellings skip
/// the full dictionary scan. A zero capacity disables caching.
pub struct CorrectionCache {
    pub cache: Option<Mutex<LruCache<CacheKey, Option<Correction>>>>,
    pub size_limit: usize,
    pub hit_count: AtomicUsize,
    pub miss_count: AtomicUsize,
}

impl CorrectionCache {
    pub fn new(size_limit: usize) -> Self {
        CorrectionCache {
            cache: NonZeroUsize::new(size_limit).map(|cap| Mutex::new(LruCache::new(cap))),
            size_limit,
            hit_count: AtomicUsize::new(0),
            miss_count: AtomicUsize::new(0),
        }
    }

    pub fn get(&self, generation: u64, key: &str) -> Option<Option<Correction>> {
        let cache = self.cache.as_ref()?;
        let mut cache = cache.lock();
        if let Some(correction) = cache.get(&(generation, key.to_string())) {
            self.hit_count.fetch_add(1, Ordering::Relaxed);
            Some(correction.clone())
        } else {
            self.miss_count.fetch_add(1, Ordering::Relaxed);
            None
        }
    }

    pub fn put(&self, generation: u64, key: String, correction: Option<Correction>) {
        if let Some(cache) = &self.cache {
            cache.lock().put((generation, key), correction);
        }
    }

    /// Answers from the cache, or computes and remembers
    pub fn get_or_insert_with<F>(&self, generation: u64, key: &str, compute: F) -> Option<Correction>
    where
        F: FnOnce() -> Option<Correction>,
    {
        if let Some(cached) = self.get(generation, key) {
            return cached;
        }
        let correction = compute();
        self.put(generation, key.to_string(), correction.clone());
        correction
    }

    pub fn clear(&self) {
        if let Some(cache) = &self.cache {
            cache.lock().clear();
        }
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hit_count: self.hit_count.load(Ordering::Relaxed),
            miss_count: self.miss_count.load(Ordering::Relaxed),
            size: self.cache.as_ref().map_or(0, |cache| cache.lock().len()),
            capacity: self.size_limit,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CacheStats {
    pub hit_count: usize,
    pub miss_count: usize,
    pub size: usize,
    pub capacity: usize,
}

impl CacheStats {
    pub fn hit_rate(&self) -> f64 {
        let total = self.hit_count + self.miss_count;
        if total == 0 {
            0.0
        } else {
            self.hit_count as f64 / total as f64
        }
    }
}
