use std::collections::HashMap;
use serde::ser::{Serialize, SerializeMap, Serializer};
use crate::core::types::{DocId, RowId, SourceDocument};
use crate::index::posting::Postings;
use crate::search::fuzzy::Correction;

/// Header and rows of one ingested document, kept for result assembly
#[derive(Debug, Clone)]
pub struct StoredDocument {
    pub header: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl StoredDocument {
    /// Row by 1-based number
    pub fn row(&self, row: RowId) -> Option<&[String]> {
        let index = (row as usize).checked_sub(1)?;
        self.rows.get(index).map(Vec::as_slice)
    }
}

/// Original field values of every ingested document
#[derive(Debug, Default)]
pub struct DocumentStore {
    pub documents: HashMap<DocId, StoredDocument>,
}

impl DocumentStore {
    pub fn new() -> Self {
        DocumentStore {
            documents: HashMap::new(),
        }
    }

    pub fn insert(&mut self, doc: SourceDocument) {
        self.documents.insert(doc.id, StoredDocument {
            header: doc.header,
            rows: doc.rows,
        });
    }

    pub fn contains(&self, doc: &str) -> bool {
        self.documents.contains_key(doc)
    }

    pub fn get(&self, doc: &str) -> Option<&StoredDocument> {
        self.documents.get(doc)
    }

    pub fn document_count(&self) -> usize {
        self.documents.len()
    }

    pub fn row_count(&self) -> usize {
        self.documents.values().map(|doc| doc.rows.len()).sum()
    }

    /// One record per (document, row) posting. Postings naming an unknown
    /// document or a row past the end are skipped.
    pub fn materialize(&self, postings: &Postings) -> Vec<Record> {
        let mut records = Vec::with_capacity(postings.row_count() as usize);

        for (doc_id, row) in postings.positions() {
            let Some(document) = self.documents.get(doc_id.as_str()) else {
                continue;
            };
            let Some(values) = document.row(row) else {
                continue;
            };

            let fields = document
                .header
                .iter()
                .zip(values.iter())
                .map(|(name, value)| (name.clone(), value.clone()))
                .collect();

            records.push(Record {
                id: format!("{}_{}", row, doc_id),
                document: doc_id.clone(),
                row,
                fields,
            });
        }

        records
    }
}

/// One materialized row
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    /// `<row>_<document>`
    pub id: String,
    pub document: DocId,
    pub row: RowId,
    /// (header name, cell value), in header order
    pub fields: Vec<(String, String)>,
}

impl Record {
    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(name, _)| name == field)
            .map(|(_, value)| value.as_str())
    }
}

// Flattened into one JSON object: {"id", "document", <header>: <value>, ...}
impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len() + 2))?;
        map.serialize_entry("id", &self.id)?;
        map.serialize_entry("document", &self.document)?;
        for (name, value) in &self.fields {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

/// Answer to a combined search request
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize)]
pub struct SearchResponse {
    pub data: Vec<Record>,
    /// Set only when the text query matched nothing and the dictionary had a candidate
    pub spell_check: Option<Correction>,
}

impl SearchResponse {
    pub fn total_hits(&self) -> usize {
        self.data.len()
    }

    pub fn to_json(&self) -> crate::core::error::Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}
