use crate::analysis::normalize::parse_magnitude;
use crate::core::types::{fold_case, DocId, RowId};
use crate::index::posting::Postings;
use crate::index::trie::TrieIndex;

const SEPARATOR: char = ':';

/// `field:value` encoding of a cell, the key form of the structured index.
/// The field is everything before the first separator; the value may
/// itself contain separators.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldTerm {
    pub field: String,
    pub value: String,
}

impl FieldTerm {
    pub fn new(field: &str, value: &str) -> Self {
        FieldTerm {
            field: fold_case(field),
            value: fold_case(value),
        }
    }

    pub fn encode(&self) -> String {
        format!("{}{}{}", self.field, SEPARATOR, self.value)
    }

    pub fn decode(term: &str) -> Option<Self> {
        let (field, value) = term.split_once(SEPARATOR)?;
        Some(FieldTerm {
            field: field.to_string(),
            value: value.to_string(),
        })
    }

    /// Prefix shared by every term of `field`
    pub fn field_prefix(field: &str) -> String {
        format!("{}{}", fold_case(field), SEPARATOR)
    }

    /// Numeric reading of the value; only terms with one take part in range queries
    pub fn numeric_value(&self) -> Option<f64> {
        parse_magnitude(&self.value)
    }
}

/// Key-tagged overlay: a second trie holding only `field:value` terms,
/// so plain tokens can never collide with structured ones.
#[derive(Debug, Default)]
pub struct StructuredIndex {
    trie: TrieIndex,
}

impl StructuredIndex {
    pub fn new() -> Self {
        StructuredIndex {
            trie: TrieIndex::new(),
        }
    }

    pub fn insert(&mut self, field: &str, value: &str, doc: &DocId, row: RowId) -> bool {
        if value.is_empty() {
            return false;
        }
        self.trie.insert(&FieldTerm::new(field, value).encode(), doc, row)
    }

    /// Exact match on one column
    pub fn lookup(&self, field: &str, value: &str) -> Postings {
        self.trie.lookup(&FieldTerm::new(field, value).encode())
    }

    /// Every encoded term stored under `field`
    pub fn terms(&self, field: &str) -> Vec<String> {
        self.trie.prefix(&FieldTerm::field_prefix(field))
    }

    /// Rows whose `field` value parses as a number within `[min, max]`.
    /// Values that do not parse are never eligible.
    pub fn range(&self, field: &str, min: f64, max: f64) -> Postings {
        let mut results = Postings::new();
        if min.is_nan() || max.is_nan() || min > max {
            return results;
        }

        for term in self.terms(field) {
            let in_range = FieldTerm::decode(&term)
                .and_then(|decoded| decoded.numeric_value())
                .is_some_and(|value| value >= min && value <= max);

            if in_range {
                if let Some(postings) = self.trie.get(&term) {
                    results.merge(postings);
                }
            }
        }

        results
    }

    pub fn len(&self) -> usize {
        self.trie.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trie.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn capacity_index() -> StructuredIndex {
        let doc = DocId::from("plans.csv");
        let mut index = StructuredIndex::new();
        index.insert("Capacity", "100", &doc, 1);
        index.insert("Capacity", "500", &doc, 2);
        index.insert("Capacity", "2048", &doc, 3);
        index.insert("Capacity", "UNLIMITED", &doc, 4);
        index.insert("Provider", "500", &doc, 5);
        index
    }

    #[test]
    fn test_encode_decode() {
        let term = FieldTerm::new("Price Per Month", "9.99");
        assert_eq!(term.encode(), "price per month:9.99");

        let decoded = FieldTerm::decode("url:https://example.com").unwrap();
        assert_eq!(decoded.field, "url");
        assert_eq!(decoded.value, "https://example.com");
        assert!(FieldTerm::decode("no separator").is_none());
    }

    #[test]
    fn test_numeric_value() {
        assert_eq!(FieldTerm::new("capacity", "2048").numeric_value(), Some(2048.0));
        assert_eq!(FieldTerm::new("price", " 1.5 ").numeric_value(), Some(1.5));
        assert_eq!(FieldTerm::new("capacity", "5 gb").numeric_value(), None);
        assert_eq!(FieldTerm::new("price", "Infinity").numeric_value(), None);
        assert_eq!(FieldTerm::new("capacity", "NaN").numeric_value(), None);
    }

    #[test]
    fn test_non_finite_values_never_match_a_range() {
        let doc = DocId::from("plans.csv");
        let mut index = StructuredIndex::new();
        index.insert("price", "nan", &doc, 1);
        index.insert("price", "inf", &doc, 2);
        index.insert("price", "-infinity", &doc, 3);
        index.insert("price", "4.99", &doc, 4);

        let hits = index.range("price", f64::MIN, f64::MAX);
        assert_eq!(hits.row_count(), 1);
        assert!(hits.contains("plans.csv", 4));
    }

    #[test]
    fn test_range_selects_only_values_inside_bounds() {
        let index = capacity_index();

        let hits = index.range("capacity", 200.0, 1000.0);
        assert_eq!(hits.row_count(), 1);
        assert!(hits.contains("plans.csv", 2));
    }

    #[test]
    fn test_range_is_inclusive_and_scoped_to_field() {
        let index = capacity_index();

        let hits = index.range("CAPACITY", 100.0, 500.0);
        let rows: Vec<u32> = hits.rows("plans.csv").unwrap().iter().collect();
        assert_eq!(rows, vec![1, 2]);
    }

    #[test]
    fn test_range_misses_are_empty() {
        let index = capacity_index();

        assert!(index.range("capacity", 1e9, 2e9).is_empty());
        assert!(index.range("missing", 0.0, f64::MAX).is_empty());
        assert!(index.range("capacity", 600.0, 200.0).is_empty());
        assert!(index.range("capacity", f64::NAN, 1.0).is_empty());
    }

    #[test]
    fn test_exact_lookup() {
        let index = capacity_index();
        assert!(index.lookup("capacity", "Unlimited").contains("plans.csv", 4));
        assert!(index.lookup("capacity", "unl").is_empty());
    }
}
