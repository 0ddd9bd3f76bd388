use unicode_segmentation::UnicodeSegmentation;
use crate::core::types::fold_case;

pub trait Tokenizer: Send + Sync {
    fn tokenize(&self, text: &str) -> Vec<String>;

    fn name(&self) -> &str;
}

/// Splits cell text into case-folded Unicode words (UAX #29).
/// Feeds the spelling dictionary and the corpus word counts.
#[derive(Debug, Clone)]
pub struct WordTokenizer {
    pub max_token_length: usize,
}

impl Default for WordTokenizer {
    fn default() -> Self {
        WordTokenizer {
            max_token_length: 255,
        }
    }
}

impl Tokenizer for WordTokenizer {
    fn tokenize(&self, text: &str) -> Vec<String> {
        let folded = fold_case(text);

        folded
            .unicode_words()
            .filter(|word| word.len() <= self.max_token_length)
            .map(str::to_string)
            .collect()
    }

    fn name(&self) -> &str {
        "word"
    }
}
