use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;
use parking_lot::RwLock;
use crate::analytics::tracker::QueryTracker;
use crate::core::catalog::{Catalog, CatalogBuilder};
use crate::core::config::Config;
use crate::core::error::Result;
use crate::core::stats::{BuildReport, EngineStats};
use crate::core::types::{fold_case, SourceDocument};
use crate::index::posting::Postings;
use crate::parallel::indexer::ParallelIndexer;
use crate::search::cache::CorrectionCache;
use crate::search::fuzzy::Correction;
use crate::search::results::{Record, SearchResponse};
use crate::storage::layout::StorageLayout;

/// Optional numeric bounds on one column. A missing bound is open.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RangeFilter {
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl RangeFilter {
    pub fn new(min: Option<f64>, max: Option<f64>) -> Self {
        RangeFilter { min, max }
    }

    pub fn between(min: f64, max: f64) -> Self {
        RangeFilter::new(Some(min), Some(max))
    }

    pub fn is_active(&self) -> bool {
        self.min.is_some() || self.max.is_some()
    }

    /// Missing lower bound is 0, missing upper bound is f64::MAX
    pub fn bounds(&self) -> (f64, f64) {
        (self.min.unwrap_or(0.0), self.max.unwrap_or(f64::MAX))
    }
}

/// Text query plus optional price and capacity filters.
/// Every part that is present contributes its rows to one union.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchRequest {
    pub query: String,
    pub price: RangeFilter,
    pub capacity: RangeFilter,
}

impl SearchRequest {
    pub fn text(query: &str) -> Self {
        SearchRequest {
            query: query.to_string(),
            ..Default::default()
        }
    }

    pub fn with_price(mut self, filter: RangeFilter) -> Self {
        self.price = filter;
        self
    }

    pub fn with_capacity(mut self, filter: RangeFilter) -> Self {
        self.capacity = filter;
        self
    }
}

/// Process-wide search context: the current catalog, the query tracker
/// and the correction cache. Built once at startup and shared by reference;
/// every query method takes `&self`.
pub struct SearchEngine {
    config: Config,
    layout: Option<StorageLayout>,

    // Swapped wholesale on rebuild; readers hold their own Arc
    catalog: RwLock<Arc<Catalog>>,
    next_generation: AtomicU64,

    tracker: QueryTracker,
    corrections: CorrectionCache,
    indexer: ParallelIndexer,
}

impl SearchEngine {
    /// Engine whose query history lives under `config.data_dir` and is
    /// replayed before this returns
    pub fn open(config: Config) -> Result<Self> {
        config.validate()?;
        let layout = StorageLayout::new(config.data_dir.clone(), &config.history_file)?;
        let tracker = QueryTracker::open(layout.history_path(), config.history_sync)?;

        Self::assemble(config, Some(layout), tracker)
    }

    /// Engine that keeps query history in memory only
    pub fn in_memory(config: Config) -> Result<Self> {
        config.validate()?;
        Self::assemble(config, None, QueryTracker::in_memory())
    }

    fn assemble(config: Config, layout: Option<StorageLayout>, tracker: QueryTracker) -> Result<Self> {
        let indexer = ParallelIndexer::new(config.index_workers, config.parallel_threshold)?;
        let corrections = CorrectionCache::new(config.correction_cache_size);

        Ok(SearchEngine {
            config,
            layout,
            catalog: RwLock::new(Arc::new(Catalog::empty())),
            next_generation: AtomicU64::new(1),
            tracker,
            corrections,
            indexer,
        })
    }

    /// (Re)build every index from the feed and publish it. On error the
    /// previous catalog stays in place.
    pub fn build<I>(&self, feed: I) -> Result<BuildReport>
    where
        I: IntoIterator<Item = SourceDocument>,
    {
        let start = Instant::now();
        let documents: Vec<SourceDocument> = feed.into_iter().collect();
        tracing::info!(documents = documents.len(), "Building search index");

        let prepared = self.indexer.prepare(documents, &self.config.capacity_field)?;

        let mut builder = CatalogBuilder::new();
        for doc in prepared {
            builder.add(doc)?;
        }
        let cells = builder.cells();
        let mut catalog = builder.finish();
        catalog.generation = self.next_generation.fetch_add(1, Ordering::Relaxed);

        let report = BuildReport {
            documents: catalog.store.document_count(),
            rows: catalog.store.row_count(),
            cells,
            plain_terms: catalog.plain.len(),
            structured_terms: catalog.structured.len(),
            dictionary_words: catalog.dictionary.len(),
            took_ms: start.elapsed().as_millis() as u64,
        };

        *self.catalog.write() = Arc::new(catalog);
        // Entries of older generations can no longer match; this only frees them
        self.corrections.clear();

        tracing::info!(
            documents = report.documents,
            rows = report.rows,
            plain_terms = report.plain_terms,
            structured_terms = report.structured_terms,
            dictionary_words = report.dictionary_words,
            took_ms = report.took_ms,
            "Search index built"
        );
        Ok(report)
    }

    /// The catalog queries currently run against
    pub fn snapshot(&self) -> Arc<Catalog> {
        self.catalog.read().clone()
    }

    /// Exact-term lookup in the free-text index
    pub fn search(&self, term: &str) -> Postings {
        self.snapshot().search(term)
    }

    /// Autocomplete candidates for `prefix`
    pub fn prefix_search(&self, prefix: &str) -> Vec<String> {
        self.snapshot().prefix_search(prefix)
    }

    /// Rows whose numeric `field` value lies in `[min, max]`
    pub fn range_search(&self, field: &str, min: f64, max: f64) -> Postings {
        self.snapshot().range_search(field, min, max)
    }

    /// Nearest dictionary word; meant for queries whose `search` came back empty
    pub fn correct(&self, term: &str) -> Option<Correction> {
        let catalog = self.snapshot();
        let key = fold_case(term);

        let correction = self
            .corrections
            .get_or_insert_with(catalog.generation, &key, || catalog.dictionary.closest(&key));

        tracing::debug!(
            term = term,
            suggestion = correction.as_ref().map(|c| c.word.as_str()),
            distance = correction.as_ref().map(|c| c.distance),
            "Spelling correction"
        );
        correction
    }

    pub fn materialize(&self, postings: &Postings) -> Vec<Record> {
        self.snapshot().store.materialize(postings)
    }

    pub fn record_query(&self, term: &str) -> u64 {
        self.tracker.record(term)
    }

    pub fn top_queries(&self, k: usize) -> Vec<(String, u64)> {
        self.tracker.top_queries(k)
    }

    pub fn frequency_of(&self, term: &str) -> u64 {
        self.tracker.frequency_of(term)
    }

    /// Text lookup (recorded, corrected on a miss) unioned with the active
    /// range filters, then joined back to the stored rows
    pub fn execute(&self, request: &SearchRequest) -> SearchResponse {
        let catalog = self.snapshot();
        let mut postings = Postings::new();
        let mut spell_check = None;

        let query = request.query.trim();
        if !query.is_empty() {
            postings = catalog.search(query);
            self.record_query(query);
            if postings.is_empty() {
                spell_check = self.correct(query);
            }
        }

        if request.price.is_active() {
            let (min, max) = request.price.bounds();
            postings.merge(&catalog.range_search(&self.config.price_field, min, max));
        }

        if request.capacity.is_active() {
            let (min, max) = request.capacity.bounds();
            postings.merge(&catalog.range_search(&self.config.capacity_field, min, max));
        }

        SearchResponse {
            data: catalog.store.materialize(&postings),
            spell_check,
        }
    }

    pub fn storage_sizes(&self) -> Vec<String> {
        self.snapshot().storage_sizes()
    }

    pub fn word_frequencies(&self, k: usize) -> Vec<(String, u64)> {
        self.snapshot().word_frequencies(k)
    }

    pub fn stats(&self) -> EngineStats {
        let catalog = self.snapshot();

        EngineStats {
            documents: catalog.store.document_count(),
            rows: catalog.store.row_count(),
            plain_terms: catalog.plain.len(),
            structured_terms: catalog.structured.len(),
            trie_nodes: catalog.plain.node_count(),
            dictionary_words: catalog.dictionary.len(),
            built_at: catalog.built_at,
            generation: catalog.generation,
            distinct_queries: self.tracker.distinct_queries(),
            total_queries: self.tracker.total_queries(),
            history_persistent: self.tracker.is_persistent(),
            correction_cache: self.corrections.stats(),
        }
    }

    /// Flush the history log to disk
    pub fn sync(&self) -> Result<()> {
        self.tracker.sync()
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn layout(&self) -> Option<&StorageLayout> {
        self.layout.as_ref()
    }
}
