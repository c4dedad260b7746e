//! The in-memory index: owned documents plus forward and inverted maps.
//!
//! Every distinct word is interned exactly once as an `Arc<str>`. The
//! inverted-index key, the forward-index entry, and the owning document's
//! word set all share that one allocation, so no word's bytes are ever
//! duplicated across the index. When the last posting for a word is removed,
//! its inverted-index key is purged and the allocation is freed.
//!
//! The store is not internally synchronized: callers must serialize `add`
//! and `remove` against each other and against any in-flight search. Only
//! read-only access may be concurrent.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use rayon::prelude::*;

use crate::analysis::stop_words::StopWordSet;
use crate::analysis::tokenizer::{is_valid_word, split_words};
use crate::document::{DocumentId, DocumentStatus};
use crate::error::{LanceaError, Result};
use crate::search::ExecutionMode;

/// Per-document metadata and the document's owned word storage.
#[derive(Debug, Clone)]
pub(crate) struct DocumentEntry {
    pub(crate) rating: i32,
    pub(crate) status: DocumentStatus,
    /// The distinct words of the document. Holds the interned `Arc`s that
    /// the forward and inverted entries share.
    pub(crate) words: BTreeSet<Arc<str>>,
}

/// Owns documents and maintains the forward index (document → word → TF) and
/// inverted index (word → document → TF) in lock-step.
#[derive(Debug, Default)]
pub struct IndexStore {
    stop_words: StopWordSet,
    /// word → (document id → term frequency)
    inverted: BTreeMap<Arc<str>, BTreeMap<DocumentId, f64>>,
    /// document id → (word → term frequency)
    forward: BTreeMap<DocumentId, BTreeMap<Arc<str>, f64>>,
    documents: BTreeMap<DocumentId, DocumentEntry>,
    ids: BTreeSet<DocumentId>,
}

impl IndexStore {
    /// Create an empty store filtering the given stop words.
    pub fn new(stop_words: StopWordSet) -> Self {
        IndexStore {
            stop_words,
            ..IndexStore::default()
        }
    }

    /// Index a document.
    ///
    /// Fails with [`LanceaError::InvalidArgument`] if `id` is negative or
    /// already present, and with [`LanceaError::InvalidWord`] if any token
    /// contains a control character. On error the store is unchanged. An
    /// empty document (no words left after filtering) is accepted.
    pub fn add(
        &mut self,
        id: DocumentId,
        text: &str,
        status: DocumentStatus,
        ratings: &[i32],
    ) -> Result<()> {
        if id < 0 || self.documents.contains_key(&id) {
            return Err(LanceaError::invalid_argument(format!(
                "document id {id} is negative or already present"
            )));
        }
        // Validation happens before any insertion, so a failed add leaves
        // the index untouched.
        let words = self.split_into_words_no_stop(text)?;

        let inverse_word_count = 1.0 / words.len() as f64;
        let mut doc_words: BTreeSet<Arc<str>> = BTreeSet::new();
        let mut word_freqs: BTreeMap<Arc<str>, f64> = BTreeMap::new();
        for word in words {
            let interned = self.intern(word, &doc_words);
            doc_words.insert(Arc::clone(&interned));
            *word_freqs.entry(interned).or_insert(0.0) += inverse_word_count;
        }

        for (word, tf) in &word_freqs {
            self.inverted
                .entry(Arc::clone(word))
                .or_default()
                .insert(id, *tf);
        }
        self.forward.insert(id, word_freqs);
        self.documents.insert(
            id,
            DocumentEntry {
                rating: average_rating(ratings),
                status,
                words: doc_words,
            },
        );
        self.ids.insert(id);
        Ok(())
    }

    /// Remove a document and all its index entries. No-op for unknown ids.
    ///
    /// The inverted-index sweep runs per word; in parallel mode each
    /// posting map is updated by its own rayon task, which is safe because
    /// the maps are disjoint values.
    pub fn remove(&mut self, id: DocumentId, mode: ExecutionMode) {
        let Some(entry) = self.documents.remove(&id) else {
            return;
        };
        self.ids.remove(&id);
        self.forward.remove(&id);

        match mode {
            ExecutionMode::Sequential => {
                for word in &entry.words {
                    let word: &str = word;
                    if let Some(postings) = self.inverted.get_mut(word) {
                        postings.remove(&id);
                        if postings.is_empty() {
                            self.inverted.remove(word);
                        }
                    }
                }
            }
            ExecutionMode::Parallel => {
                self.inverted.par_iter_mut().for_each(|(_, postings)| {
                    postings.remove(&id);
                });
                self.inverted.retain(|_, postings| !postings.is_empty());
            }
        }
    }

    /// Term frequencies of a document, empty for unknown ids.
    ///
    /// Returned by value; cloning is cheap because the keys are shared
    /// `Arc`s, not copied strings.
    pub fn word_frequencies(&self, id: DocumentId) -> BTreeMap<Arc<str>, f64> {
        self.forward.get(&id).cloned().unwrap_or_default()
    }

    /// The posting map of `word`, if any document contains it.
    pub fn postings(&self, word: &str) -> Option<&BTreeMap<DocumentId, f64>> {
        self.inverted.get(word)
    }

    /// Whether `id` is indexed.
    pub fn contains(&self, id: DocumentId) -> bool {
        self.documents.contains_key(&id)
    }

    /// Number of indexed documents.
    pub fn document_count(&self) -> usize {
        self.documents.len()
    }

    /// Number of distinct words across all documents.
    pub fn term_count(&self) -> usize {
        self.inverted.len()
    }

    /// Document ids in ascending order.
    pub fn ids(&self) -> impl Iterator<Item = DocumentId> + '_ {
        self.ids.iter().copied()
    }

    /// The stop-word set this store filters with.
    pub fn stop_words(&self) -> &StopWordSet {
        &self.stop_words
    }

    pub(crate) fn entry(&self, id: DocumentId) -> Option<&DocumentEntry> {
        self.documents.get(&id)
    }

    /// Reuse the interned copy of `word` if one exists, preferring the
    /// inverted-index key (shared across documents), then the words already
    /// interned for this document, before allocating.
    fn intern(&self, word: &str, doc_words: &BTreeSet<Arc<str>>) -> Arc<str> {
        if let Some((existing, _)) = self.inverted.get_key_value(word) {
            return Arc::clone(existing);
        }
        if let Some(existing) = doc_words.get(word) {
            return Arc::clone(existing);
        }
        Arc::from(word)
    }

    /// Tokenize `text`, rejecting malformed words and dropping empty tokens
    /// and stop words.
    fn split_into_words_no_stop<'t>(&self, text: &'t str) -> Result<Vec<&'t str>> {
        let mut words = Vec::new();
        for word in split_words(text) {
            if word.is_empty() {
                continue;
            }
            if !is_valid_word(word) {
                return Err(LanceaError::invalid_word(word));
            }
            if !self.stop_words.contains(word) {
                words.push(word);
            }
        }
        Ok(words)
    }
}

/// Truncating integer mean of the ratings, 0 for an empty list.
fn average_rating(ratings: &[i32]) -> i32 {
    if ratings.is_empty() {
        return 0;
    }
    let sum: i64 = ratings.iter().map(|&r| i64::from(r)).sum();
    (sum / ratings.len() as i64) as i32
}
