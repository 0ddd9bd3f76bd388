use rayon::prelude::*;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use crate::analysis::normalize::{normalize_capacity, Capacity};
use crate::analysis::tokenizer::{Tokenizer, WordTokenizer};
use crate::core::error::{Error, Result};
use crate::core::types::{fold_case, RowId, SourceDocument};

/// One non-empty cell, ready for insertion
#[derive(Debug, Clone, PartialEq)]
pub struct PreparedCell {
    pub row: RowId,
    /// Folded column name, the structured key
    pub field: String,
    /// Folded raw cell text for the plain index
    pub plain: String,
    /// Folded cell text after capacity normalization, for the structured index
    pub value: String,
}

/// A document with all per-cell work (folding, normalization, word
/// splitting) done, so insertion is a plain sequential replay.
#[derive(Debug, Clone)]
pub struct PreparedDocument {
    pub source: SourceDocument,
    pub cells: Vec<PreparedCell>,
    /// Words of the header and every cell, in reading order
    pub words: Vec<String>,
    /// Normalized capacity values in row order
    pub capacities: Vec<Capacity>,
}

/// Turns a source document into insertion-ready cells
pub fn prepare_document(
    source: SourceDocument,
    capacity_field: &str,
    tokenizer: &dyn Tokenizer,
) -> Result<PreparedDocument> {
    let fields: Vec<String> = source.header.iter().map(|name| fold_case(name)).collect();
    let capacity_field = fold_case(capacity_field);

    let mut cells = Vec::new();
    let mut capacities = Vec::new();
    let mut words = Vec::new();

    for name in &source.header {
        words.extend(tokenizer.tokenize(name));
    }

    for (index, row) in source.rows.iter().enumerate() {
        let row_id = (index + 1) as RowId;

        if row.len() > fields.len() {
            return Err(Error::invalid_input(format!(
                "{}: row {} has {} cells but the header has {} fields",
                source.id,
                row_id,
                row.len(),
                fields.len()
            )));
        }

        for (field, raw) in fields.iter().zip(row.iter()) {
            words.extend(tokenizer.tokenize(raw));

            if raw.is_empty() {
                continue;
            }

            let value = if *field == capacity_field {
                let capacity = normalize_capacity(raw);
                if !capacity.is_recognized() {
                    tracing::debug!(
                        document = %source.id,
                        row = row_id,
                        value = raw.as_str(),
                        "Capacity not in GB/TB form; excluded from range queries"
                    );
                }
                let value = capacity.as_str().to_string();
                capacities.push(capacity);
                value
            } else {
                raw.clone()
            };

            if value.is_empty() {
                continue;
            }

            cells.push(PreparedCell {
                row: row_id,
                field: field.clone(),
                plain: fold_case(raw),
                value: fold_case(&value),
            });
        }
    }

    Ok(PreparedDocument {
        source,
        cells,
        words,
        capacities,
    })
}

/// Prepares documents on a rayon pool. Output order equals input order,
/// so the sequential insertion that follows stays deterministic.
pub struct ParallelIndexer {
    pub workers: usize,
    pub parallel_threshold: usize,
    pub progress: Arc<AtomicUsize>,
    pool: rayon::ThreadPool,
    tokenizer: WordTokenizer,
}

impl ParallelIndexer {
    pub fn new(workers: usize, parallel_threshold: usize) -> Result<Self> {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(workers.max(1))
            .thread_name(|i| format!("planscope-index-{}", i))
            .build()?;

        Ok(ParallelIndexer {
            workers,
            parallel_threshold,
            progress: Arc::new(AtomicUsize::new(0)),
            pool,
            tokenizer: WordTokenizer::default(),
        })
    }

    /// Documents prepared by the current or last call
    pub fn get_progress(&self) -> usize {
        self.progress.load(Ordering::Relaxed)
    }

    pub fn prepare(
        &self,
        documents: Vec<SourceDocument>,
        capacity_field: &str,
    ) -> Result<Vec<PreparedDocument>> {
        self.progress.store(0, Ordering::Relaxed);
        let tokenizer = &self.tokenizer;
        let progress = &self.progress;

        let prepare_one = |doc: SourceDocument| {
            let prepared = prepare_document(doc, capacity_field, tokenizer);
            progress.fetch_add(1, Ordering::Relaxed);
            prepared
        };

        if documents.len() < self.parallel_threshold || self.workers <= 1 {
            return documents.into_iter().map(prepare_one).collect();
        }

        tracing::debug!(
            documents = documents.len(),
            workers = self.workers,
            tokenizer = self.tokenizer.name(),
            "Preparing documents in parallel"
        );
        self.pool.install(|| {
            documents
                .into_par_iter()
                .map(prepare_one)
                .collect()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::ErrorKind;

    fn plans() -> SourceDocument {
        SourceDocument::new("plans.csv", &["Provider", "Capacity", "Price Per Month"])
            .with_row(&["Google Drive", "2 TB", "9.99"])
            .with_row(&["Dropbox", "Unlimited", ""])
            .with_row(&["Box", "GB"])
    }

    #[test]
    fn test_prepare_normalizes_capacity_only_for_structured_value() {
        let prepared = prepare_document(plans(), "capacity", &WordTokenizer::default()).unwrap();

        let capacity = prepared.cells.iter().find(|c| c.row == 1 && c.field == "capacity").unwrap();
        assert_eq!(capacity.plain, "2 tb");
        assert_eq!(capacity.value, "2048");
        assert_eq!(prepared.capacities.len(), 3);
    }

    #[test]
    fn test_empty_cells_and_empty_normalized_values_are_skipped() {
        let prepared = prepare_document(plans(), "capacity", &WordTokenizer::default()).unwrap();

        assert!(!prepared.cells.iter().any(|c| c.row == 2 && c.field == "price per month"));
        // "GB" normalizes to an empty magnitude
        assert!(!prepared.cells.iter().any(|c| c.row == 3 && c.field == "capacity"));
        assert_eq!(prepared.cells.len(), 6);
    }

    #[test]
    fn test_words_include_header() {
        let prepared = prepare_document(plans(), "capacity", &WordTokenizer::default()).unwrap();
        assert_eq!(&prepared.words[..4], &["provider", "capacity", "price", "per"]);
        assert!(prepared.words.contains(&"unlimited".to_string()));
    }

    #[test]
    fn test_row_wider_than_header_is_rejected() {
        let doc = SourceDocument::new("bad.csv", &["a"]).with_row(&["1", "2"]);
        let err = prepare_document(doc, "capacity", &WordTokenizer::default()).unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidInput);
    }

    #[test]
    fn test_parallel_output_keeps_input_order() {
        let indexer = ParallelIndexer::new(4, 1).unwrap();
        let documents: Vec<SourceDocument> = (0..32)
            .map(|i| SourceDocument::new(format!("doc{}.csv", i), &["name"]).with_row(&[format!("v{}", i)]))
            .collect();

        let prepared = indexer.prepare(documents, "capacity").unwrap();
        let ids: Vec<String> = prepared.iter().map(|p| p.source.id.to_string()).collect();
        let expected: Vec<String> = (0..32).map(|i| format!("doc{}.csv", i)).collect();
        assert_eq!(ids, expected);
        assert_eq!(indexer.get_progress(), 32);
    }
}
