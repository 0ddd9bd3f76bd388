use std::cmp::Ordering;
use std::collections::{BTreeSet, HashMap};
use chrono::{DateTime, Utc};
use crate::analysis::normalize::parse_magnitude;
use crate::core::error::{Error, Result};
use crate::index::posting::Postings;
use crate::index::structured::StructuredIndex;
use crate::index::trie::TrieIndex;
use crate::parallel::indexer::PreparedDocument;
use crate::search::fuzzy::Dictionary;
use crate::search::results::DocumentStore;

/// Everything built from one pass over the ingestion feed.
/// Read-only once built; a rebuild produces a new catalog.
#[derive(Debug)]
pub struct Catalog {
    /// Free-text index: folded raw cell -> postings
    pub plain: TrieIndex,
    /// Key-tagged index: `field:value` -> postings
    pub structured: StructuredIndex,
    pub dictionary: Dictionary,
    pub store: DocumentStore,
    /// Distinct normalized capacity values
    pub storage_sizes: BTreeSet<String>,
    pub word_counts: HashMap<String, u64>,
    pub built_at: DateTime<Utc>,
    /// Distinguishes successive builds; the empty catalog is generation 0
    pub generation: u64,
}

impl Catalog {
    pub fn empty() -> Self {
        CatalogBuilder::new().finish()
    }

    pub fn search(&self, term: &str) -> Postings {
        self.plain.lookup(term)
    }

    pub fn prefix_search(&self, prefix: &str) -> Vec<String> {
        self.plain.prefix(prefix)
    }

    pub fn range_search(&self, field: &str, min: f64, max: f64) -> Postings {
        self.structured.range(field, min, max)
    }

    /// Numeric capacities ascending, then the rest lexicographically
    pub fn storage_sizes(&self) -> Vec<String> {
        let mut sizes: Vec<&String> = self.storage_sizes.iter().collect();
        sizes.sort_by(|a, b| match (parse_magnitude(a), parse_magnitude(b)) {
            (Some(x), Some(y)) => x.total_cmp(&y).then_with(|| a.cmp(b)),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => a.cmp(b),
        });
        sizes.into_iter().cloned().collect()
    }

    /// Corpus word counts, highest first, ties by word. `k == 0` returns all.
    pub fn word_frequencies(&self, k: usize) -> Vec<(String, u64)> {
        let mut counts: Vec<(String, u64)> = self
            .word_counts
            .iter()
            .map(|(word, count)| (word.clone(), *count))
            .collect();
        counts.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        if k > 0 {
            counts.truncate(k);
        }
        counts
    }
}

/// Sequential insertion of prepared documents
pub struct CatalogBuilder {
    catalog: Catalog,
    cells: usize,
}

impl Default for CatalogBuilder {
    fn default() -> Self {
        CatalogBuilder::new()
    }
}

impl CatalogBuilder {
    pub fn new() -> Self {
        CatalogBuilder {
            catalog: Catalog {
                plain: TrieIndex::new(),
                structured: StructuredIndex::new(),
                dictionary: Dictionary::new(),
                store: DocumentStore::new(),
                storage_sizes: BTreeSet::new(),
                word_counts: HashMap::new(),
                built_at: Utc::now(),
                generation: 0,
            },
            cells: 0,
        }
    }

    pub fn add(&mut self, prepared: PreparedDocument) -> Result<()> {
        let catalog = &mut self.catalog;
        let doc_id = &prepared.source.id;

        if catalog.store.contains(doc_id.as_str()) {
            return Err(Error::invalid_input(format!("duplicate document id {}", doc_id)));
        }

        for cell in &prepared.cells {
            catalog.structured.insert(&cell.field, &cell.value, doc_id, cell.row);
            catalog.plain.insert(&cell.plain, doc_id, cell.row);
        }
        self.cells += prepared.cells.len();

        for word in &prepared.words {
            catalog.dictionary.add(word);
            *catalog.word_counts.entry(word.clone()).or_insert(0) += 1;
        }

        for capacity in &prepared.capacities {
            if !capacity.as_str().is_empty() {
                catalog.storage_sizes.insert(capacity.as_str().to_string());
            }
        }

        tracing::debug!(
            document = %doc_id,
            rows = prepared.source.row_count(),
            cells = prepared.cells.len(),
            "Indexed document"
        );

        catalog.store.insert(prepared.source);
        Ok(())
    }

    pub fn cells(&self) -> usize {
        self.cells
    }

    pub fn finish(mut self) -> Catalog {
        self.catalog.built_at = Utc::now();
        self.catalog
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::tokenizer::WordTokenizer;
    use crate::core::types::SourceDocument;
    use crate::parallel::indexer::prepare_document;

    fn build(docs: Vec<SourceDocument>) -> Catalog {
        let mut builder = CatalogBuilder::new();
        for doc in docs {
            let prepared = prepare_document(doc, "capacity", &WordTokenizer::default()).unwrap();
            builder.add(prepared).unwrap();
        }
        builder.finish()
    }

    fn azure() -> SourceDocument {
        SourceDocument::new("azure.csv", &["Plan", "Capacity"])
            .with_row(&["Hot tier", "100 GB"])
            .with_row(&["Cool tier", "1 TB"])
            .with_row(&["Archive", "Unlimited"])
    }

    #[test]
    fn test_plain_and_structured_are_separate() {
        let catalog = build(vec![azure()]);

        assert!(catalog.search("capacity:100").is_empty());
        assert!(catalog.search("100 gb").contains("azure.csv", 1));
        assert!(catalog.structured.lookup("capacity", "100").contains("azure.csv", 1));
    }

    #[test]
    fn test_range_over_normalized_capacity() {
        let catalog = build(vec![azure()]);

        let hits = catalog.range_search("capacity", 500.0, 2000.0);
        assert_eq!(hits.row_count(), 1);
        assert!(hits.contains("azure.csv", 2));
    }

    #[test]
    fn test_storage_sizes_sorted_numeric_first() {
        let catalog = build(vec![azure()]);
        assert_eq!(catalog.storage_sizes(), vec!["100", "1024", "UNLIMITED"]);
    }

    #[test]
    fn test_storage_sizes_put_non_finite_values_with_text() {
        let doc = SourceDocument::new("odd.csv", &["Capacity"])
            .with_row(&["NaN GB"])
            .with_row(&["2 GB"])
            .with_row(&["inf GB"])
            .with_row(&["10 GB"]);
        let catalog = build(vec![doc]);
        assert_eq!(catalog.storage_sizes(), vec!["2", "10", "INF", "NAN"]);
    }

    #[test]
    fn test_word_frequencies() {
        let catalog = build(vec![azure()]);
        let top = catalog.word_frequencies(2);
        assert_eq!(top, vec![("tier".to_string(), 2), ("1".to_string(), 1)]);
    }

    #[test]
    fn test_duplicate_document_is_rejected() {
        let mut builder = CatalogBuilder::new();
        let tokenizer = WordTokenizer::default();
        builder.add(prepare_document(azure(), "capacity", &tokenizer).unwrap()).unwrap();

        let again = prepare_document(azure(), "capacity", &tokenizer).unwrap();
        assert!(builder.add(again).is_err());
    }

    #[test]
    fn test_empty_catalog_answers_everything_empty() {
        let catalog = Catalog::empty();
        assert!(catalog.search("").is_empty());
        assert!(catalog.prefix_search("a").is_empty());
        assert!(catalog.range_search("capacity", 0.0, f64::MAX).is_empty());
        assert!(catalog.dictionary.closest("x").is_none());
    }
}
