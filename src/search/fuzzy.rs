use std::collections::HashSet;
use serde::{Serialize, Deserialize};
use crate::core::types::fold_case;

/// Levenshtein distance over chars: insertion, deletion and substitution
/// each cost 1. Classic DP table, kept as two rolling rows.
pub fn edit_distance(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let len_a = a.len();
    let len_b = b.len();

    if len_a == 0 {
        return len_b;
    }
    if len_b == 0 {
        return len_a;
    }

    let mut prev_row: Vec<usize> = (0..=len_b).collect();
    let mut curr_row = vec![0; len_b + 1];

    for i in 1..=len_a {
        curr_row[0] = i;

        for j in 1..=len_b {
            let cost = if a[i - 1] == b[j - 1] { 0 } else { 1 };

            curr_row[j] = std::cmp::min(
                std::cmp::min(
                    prev_row[j] + 1,     // deletion
                    curr_row[j - 1] + 1, // insertion
                ),
                prev_row[j - 1] + cost,  // substitution
            );
        }

        std::mem::swap(&mut prev_row, &mut curr_row);
    }

    prev_row[len_b]
}

/// Suggested replacement for a query that found nothing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Correction {
    pub word: String,
    pub distance: usize,
}

/// Insertion-ordered vocabulary of every distinct word seen at ingestion
#[derive(Debug, Default, Clone)]
pub struct Dictionary {
    words: Vec<String>,
    seen: HashSet<String>,
}

impl Dictionary {
    pub fn new() -> Self {
        Dictionary {
            words: Vec::new(),
            seen: HashSet::new(),
        }
    }

    /// Adds the case-folded word unless it is empty or already known
    pub fn add(&mut self, word: &str) -> bool {
        let word = fold_case(word);
        if word.is_empty() || self.seen.contains(&word) {
            return false;
        }
        self.seen.insert(word.clone());
        self.words.push(word);
        true
    }

    pub fn extend<I, S>(&mut self, words: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for word in words {
            self.add(word.as_ref());
        }
    }

    pub fn contains(&self, word: &str) -> bool {
        self.seen.contains(&fold_case(word))
    }

    /// Nearest word by edit distance. Ties keep the word seen first;
    /// `None` only when the dictionary is empty.
    pub fn closest(&self, term: &str) -> Option<Correction> {
        let term = fold_case(term);
        let mut best: Option<Correction> = None;

        for word in &self.words {
            let distance = edit_distance(&term, word);
            let better = match &best {
                Some(current) => distance < current.distance,
                None => true,
            };
            if better {
                best = Some(Correction {
                    word: word.clone(),
                    distance,
                });
                if distance == 0 {
                    break;
                }
            }
        }

        best
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.words.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}
