//! The search engine facade.
//!
//! [`SearchEngine`] ties the index store, query parser, and scorer together
//! behind the public API: `add_document`, `remove_document`, the `find`
//! family, `match_document`, and the enumeration surface.
//!
//! # Concurrency contract
//!
//! The engine is not internally synchronized against structural mutation.
//! Callers must serialize `add_document`/`remove_document` against each
//! other and against in-flight searches. Read-only calls (`find`,
//! `match_document`, `word_frequencies`, enumeration) may run concurrently
//! with each other against a quiescent engine, including internally parallel
//! ones. A parallel call blocks until all of its tasks have joined.
//!
//! # Examples
//!
//! ```
//! use lancea::analysis::StopWordSet;
//! use lancea::{DocumentStatus, ExecutionMode, SearchEngine};
//!
//! let mut engine = SearchEngine::new(StopWordSet::from_text("and with").unwrap());
//! engine
//!     .add_document(1, "curly cat curly tail", DocumentStatus::Actual, &[7, 2, 7])
//!     .unwrap();
//! let hits = engine.find("curly cat", ExecutionMode::Sequential).unwrap();
//! assert_eq!(hits[0].id, 1);
//! ```

use std::collections::BTreeMap;
use std::sync::Arc;

use rayon::prelude::*;

use crate::analysis::StopWordSet;
use crate::document::{DocumentId, DocumentMatch, DocumentStatus, ScoredDocument};
use crate::error::{LanceaError, Result};
use crate::index::IndexStore;
use crate::query::QueryParser;
use crate::search::scorer::{rank_documents, score_documents};
use crate::search::{ExecutionMode, SearchConfig};

/// An in-memory TF-IDF search engine over short text documents.
#[derive(Debug, Default)]
pub struct SearchEngine {
    store: IndexStore,
    config: SearchConfig,
}

impl SearchEngine {
    /// Create an engine with the default [`SearchConfig`].
    pub fn new(stop_words: StopWordSet) -> Self {
        Self::with_config(stop_words, SearchConfig::default())
    }

    /// Create an engine with an explicit configuration.
    pub fn with_config(stop_words: StopWordSet, config: SearchConfig) -> Self {
        SearchEngine {
            store: IndexStore::new(stop_words),
            config,
        }
    }

    /// Index a document. See [`IndexStore::add`] for the failure modes.
    pub fn add_document(
        &mut self,
        id: DocumentId,
        text: &str,
        status: DocumentStatus,
        ratings: &[i32],
    ) -> Result<()> {
        self.store.add(id, text, status, ratings)
    }

    /// Remove a document and all of its index entries. No-op for unknown
    /// ids. Must not run concurrently with any other engine call.
    pub fn remove_document(&mut self, id: DocumentId, mode: ExecutionMode) {
        self.store.remove(id, mode);
    }

    /// Ranked top-K search keeping only [`DocumentStatus::Actual`] documents.
    pub fn find(&self, raw_query: &str, mode: ExecutionMode) -> Result<Vec<ScoredDocument>> {
        self.find_with_status(raw_query, DocumentStatus::Actual, mode)
    }

    /// Ranked top-K search keeping only documents with the given status.
    pub fn find_with_status(
        &self,
        raw_query: &str,
        status: DocumentStatus,
        mode: ExecutionMode,
    ) -> Result<Vec<ScoredDocument>> {
        self.find_with(
            raw_query,
            move |_id, document_status, _rating| document_status == status,
            mode,
        )
    }

    /// Ranked top-K search under an arbitrary predicate over
    /// `(id, status, rating)`.
    pub fn find_with<P>(
        &self,
        raw_query: &str,
        predicate: P,
        mode: ExecutionMode,
    ) -> Result<Vec<ScoredDocument>>
    where
        P: Fn(DocumentId, DocumentStatus, i32) -> bool + Sync,
    {
        let query = QueryParser::new(self.store.stop_words()).parse(raw_query)?;
        let scored = score_documents(
            &self.store,
            &query,
            &predicate,
            mode,
            self.config.plus_word_partitions,
        );
        Ok(rank_documents(scored, self.config.max_results))
    }

    /// Match a query against one document.
    ///
    /// Fails with [`LanceaError::UnknownDocumentId`] for an absent id. If
    /// any minus-word maps to the document, the word list is empty and no
    /// plus-words are inspected. Otherwise the plus-words present in the
    /// document are returned deduplicated in ascending lexical order, which
    /// makes sequential and parallel runs byte-identical.
    pub fn match_document(
        &self,
        raw_query: &str,
        id: DocumentId,
        mode: ExecutionMode,
    ) -> Result<DocumentMatch> {
        let query = QueryParser::new(self.store.stop_words()).parse(raw_query)?;
        let status = self
            .store
            .entry(id)
            .ok_or(LanceaError::UnknownDocumentId(id))?
            .status;

        let document_has = |word: &String| {
            self.store
                .postings(word)
                .is_some_and(|postings| postings.contains_key(&id))
        };

        let excluded = match mode {
            ExecutionMode::Sequential => query.minus_words.iter().any(document_has),
            ExecutionMode::Parallel => query.minus_words.par_iter().any(document_has),
        };
        if excluded {
            return Ok(DocumentMatch {
                words: Vec::new(),
                status,
            });
        }

        // plus_words is an ordered set, so the result is already sorted
        // and deduplicated.
        let words: Vec<String> = query
            .plus_words
            .iter()
            .filter(|word| document_has(*word))
            .cloned()
            .collect();
        Ok(DocumentMatch { words, status })
    }

    /// Term frequencies of a document, empty for unknown ids.
    pub fn word_frequencies(&self, id: DocumentId) -> BTreeMap<Arc<str>, f64> {
        self.store.word_frequencies(id)
    }

    /// Number of indexed documents.
    pub fn document_count(&self) -> usize {
        self.store.document_count()
    }

    /// Document ids in ascending order.
    pub fn ids(&self) -> impl Iterator<Item = DocumentId> + '_ {
        self.store.ids()
    }

    /// The engine's configuration.
    pub fn config(&self) -> &SearchConfig {
        &self.config
    }
}
