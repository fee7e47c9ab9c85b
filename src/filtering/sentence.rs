//! sentence-level filtering
use super::Filter;

/// Source length filter, in words.
///
/// Detects bitext lines (`source<TAB>target`) whose source has between
/// [WordCount::min_words] and [WordCount::max_words] whitespace separated words (inclusive).
/// Lines without a target are never kept.
///
/// Bounds are 6 and 55 by default.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WordCount {
    min_words: usize,
    max_words: usize,
}

impl WordCount {
    pub fn new(min_words: usize, max_words: usize) -> Self {
        Self {
            min_words,
            max_words,
        }
    }

    /// Get a reference to the word count's min words.
    pub fn min_words(&self) -> &usize {
        &self.min_words
    }

    /// Get a reference to the word count's max words.
    pub fn max_words(&self) -> &usize {
        &self.max_words
    }
}

impl Default for WordCount {
    fn default() -> Self {
        WordCount {
            min_words: 6,
            max_words: 55,
        }
    }
}

impl Filter<&str> for WordCount {
    fn detect(&self, line: &str) -> bool {
        let mut fields = line.trim().split('\t');
        let source = fields.next().unwrap_or("");
        if fields.next().is_none() {
            return false;
        }

        let count = source.split_whitespace().count();
        self.min_words <= count && count <= self.max_words
    }
}
