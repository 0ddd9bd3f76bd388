use std::collections::BTreeMap;
use roaring::RoaringBitmap;
use crate::core::types::{DocId, RowId};

/// Where a term occurs: document -> set of rows.
/// Set semantics on both levels, so re-adding a (document, row) pair is a no-op.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Postings {
    pub docs: BTreeMap<DocId, RoaringBitmap>,
}

impl Postings {
    pub fn new() -> Self {
        Postings {
            docs: BTreeMap::new(),
        }
    }

    /// Returns false when the pair was already present
    pub fn add(&mut self, doc: &DocId, row: RowId) -> bool {
        match self.docs.get_mut(doc.as_str()) {
            Some(rows) => rows.insert(row),
            None => {
                let mut rows = RoaringBitmap::new();
                rows.insert(row);
                self.docs.insert(doc.clone(), rows);
                true
            }
        }
    }

    /// Union `other` into self; row sets of a shared document merge
    pub fn merge(&mut self, other: &Postings) {
        for (doc, rows) in &other.docs {
            match self.docs.get_mut(doc.as_str()) {
                Some(existing) => *existing |= rows,
                None => {
                    self.docs.insert(doc.clone(), rows.clone());
                }
            }
        }
    }

    pub fn rows(&self, doc: &str) -> Option<&RoaringBitmap> {
        self.docs.get(doc)
    }

    pub fn contains(&self, doc: &str, row: RowId) -> bool {
        self.docs.get(doc).is_some_and(|rows| rows.contains(row))
    }

    pub fn is_empty(&self) -> bool {
        self.docs.is_empty()
    }

    pub fn doc_count(&self) -> usize {
        self.docs.len()
    }

    pub fn row_count(&self) -> u64 {
        self.docs.values().map(|rows| rows.len()).sum()
    }

    /// Every (document, row) pair, documents ascending, rows ascending
    pub fn positions(&self) -> impl Iterator<Item = (&DocId, RowId)> + '_ {
        self.docs
            .iter()
            .flat_map(|(doc, rows)| rows.iter().map(move |row| (doc, row)))
    }
}

impl FromIterator<(DocId, RowId)> for Postings {
    fn from_iter<I: IntoIterator<Item = (DocId, RowId)>>(iter: I) -> Self {
        let mut postings = Postings::new();
        for (doc, row) in iter {
            postings.add(&doc, row);
        }
        postings
    }
}
