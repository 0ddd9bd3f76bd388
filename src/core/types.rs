use serde::{Serialize, Deserialize};
use std::borrow::Borrow;
use std::fmt;

/// Identifier of a source document (the file a row set was read from)
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct DocId(pub String);

impl DocId {
    pub fn new(id: impl Into<String>) -> Self {
        DocId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for DocId {
    fn from(id: &str) -> Self {
        DocId(id.to_string())
    }
}

impl From<String> for DocId {
    fn from(id: String) -> Self {
        DocId(id)
    }
}

// Lets maps keyed by DocId be queried with a plain &str
impl Borrow<str> for DocId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DocId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// 1-based row number inside a document; row 1 is the first row after the header
pub type RowId = u32;

/// One document as delivered by the ingestion feed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceDocument {
    pub id: DocId,
    pub header: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl SourceDocument {
    pub fn new<S: AsRef<str>>(id: impl Into<DocId>, header: &[S]) -> Self {
        SourceDocument {
            id: id.into(),
            header: header.iter().map(|name| name.as_ref().to_string()).collect(),
            rows: Vec::new(),
        }
    }

    pub fn with_row<S: AsRef<str>>(mut self, row: &[S]) -> Self {
        self.rows.push(row.iter().map(|cell| cell.as_ref().to_string()).collect());
        self
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}

/// Case folding applied to everything that enters or queries an index
pub fn fold_case(text: &str) -> String {
    text.to_lowercase()
}
