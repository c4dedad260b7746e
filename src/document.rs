//! Document identity, status, and result types.

use serde::{Deserialize, Serialize};

/// Identifier of an indexed document.
///
/// Ids are caller-assigned, unique, and never negative once accepted.
/// The signed representation exists so that a negative id can be rejected
/// with an explicit error instead of being silently reinterpreted.
pub type DocumentId = i64;

/// Moderation status attached to a document at ingestion time.
///
/// The engine treats statuses as opaque tags: the only built-in behavior is
/// the default `find` filter, which keeps `Actual` documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DocumentStatus {
    /// Live document, matched by the default search filter.
    Actual,
    /// Document kept in the index but considered out of date.
    Irrelevant,
    /// Document hidden by moderation.
    Banned,
    /// Document scheduled for deletion.
    Removed,
}

/// A single ranked search hit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoredDocument {
    /// Id of the matched document.
    pub id: DocumentId,
    /// TF-IDF relevance accumulated over the query's plus-words.
    pub relevance: f64,
    /// Stored rating, used as the tie-break key when relevance is equal
    /// within the configured epsilon.
    pub rating: i32,
}

/// Outcome of matching a query against a single document.
///
/// `words` holds the plus-words present in the document, deduplicated and in
/// ascending lexical order; it is empty when a minus-word excluded the
/// document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentMatch {
    /// Matched plus-words, sorted ascending.
    pub words: Vec<String>,
    /// The document's stored status.
    pub status: DocumentStatus,
}
