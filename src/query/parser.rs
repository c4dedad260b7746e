//! Raw query text to structured plus/minus word sets.
//!
//! A token prefixed with `-` becomes a minus-word: any document containing it
//! is excluded from results. Every other token becomes a plus-word. Stop
//! words are dropped from both sets. Membership is by word value, so
//! duplicate tokens collapse into a single set entry.

use std::collections::BTreeSet;

use crate::analysis::stop_words::StopWordSet;
use crate::analysis::tokenizer::{is_valid_word, split_words};
use crate::error::{LanceaError, Result};

/// A structured query: plus-words raise relevance, minus-words exclude.
///
/// Ordered sets keep sequential iteration deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedQuery {
    /// Words that contribute TF-IDF relevance when present in a document.
    pub plus_words: BTreeSet<String>,
    /// Words whose presence excludes a document entirely.
    pub minus_words: BTreeSet<String>,
}

/// Parses raw query strings against a stop-word set.
#[derive(Debug, Clone, Copy)]
pub struct QueryParser<'a> {
    stop_words: &'a StopWordSet,
}

impl<'a> QueryParser<'a> {
    /// Create a parser that drops words from `stop_words`.
    pub fn new(stop_words: &'a StopWordSet) -> Self {
        QueryParser { stop_words }
    }

    /// Parse `raw` into a [`ParsedQuery`].
    ///
    /// Errors:
    /// - [`LanceaError::EmptyQueryWord`] for an empty token (double or
    ///   trailing space);
    /// - [`LanceaError::InvalidQueryWord`] for a bare `-`, a `--` marker, or
    ///   a control character after the minus marker;
    /// - [`LanceaError::InvalidWord`] for a control character in a plain
    ///   token.
    pub fn parse(&self, raw: &str) -> Result<ParsedQuery> {
        let mut query = ParsedQuery::default();
        for token in split_words(raw) {
            if token.is_empty() {
                return Err(LanceaError::EmptyQueryWord);
            }
            if let Some(word) = token.strip_prefix('-') {
                if word.is_empty() || word.starts_with('-') || !is_valid_word(word) {
                    return Err(LanceaError::invalid_query_word(token));
                }
                if !self.stop_words.contains(word) {
                    query.minus_words.insert(word.to_string());
                }
            } else {
                if !is_valid_word(token) {
                    return Err(LanceaError::invalid_word(token));
                }
                if !self.stop_words.contains(token) {
                    query.plus_words.insert(token.to_string());
                }
            }
        }
        Ok(query)
    }
}
