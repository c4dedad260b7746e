//! Stop-word sets.
//!
//! A [`StopWordSet`] is immutable after construction and is consulted both at
//! ingestion and during query parsing, so a stop word typed into a query is
//! silently dropped rather than treated as a plus- or minus-term.

use ahash::AHashSet;

use crate::analysis::tokenizer::{is_valid_word, split_words};
use crate::error::{LanceaError, Result};

/// An immutable set of words excluded from indexing and query matching.
#[derive(Debug, Clone, Default)]
pub struct StopWordSet {
    words: AHashSet<String>,
}

impl StopWordSet {
    /// Build a stop-word set from any collection of words.
    ///
    /// Empty entries are dropped. Construction fails with
    /// [`LanceaError::InvalidWord`] if any word contains a control character.
    pub fn new<I, S>(words: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = AHashSet::new();
        for word in words {
            let word = word.as_ref();
            if word.is_empty() {
                continue;
            }
            if !is_valid_word(word) {
                return Err(LanceaError::invalid_word(word));
            }
            set.insert(word.to_string());
        }
        Ok(StopWordSet { words: set })
    }

    /// Build a stop-word set from a whitespace-separated string.
    ///
    /// ```
    /// use lancea::analysis::StopWordSet;
    ///
    /// let stop_words = StopWordSet::from_text("and with").unwrap();
    /// assert!(stop_words.contains("and"));
    /// assert!(!stop_words.contains("cat"));
    /// ```
    pub fn from_text(text: &str) -> Result<Self> {
        Self::new(split_words(text))
    }

    /// Whether `word` is a stop word.
    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    /// Number of stop words in the set.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Whether the set is empty.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}
