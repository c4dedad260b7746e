//! Error types for the Lancea library.
//!
//! All failures are represented by the [`LanceaError`] enum. Every variant is
//! a synchronous, locally-detected validation failure: the engine never
//! retries, and a failing operation leaves the index unchanged.
//!
//! # Examples
//!
//! ```
//! use lancea::error::{LanceaError, Result};
//!
//! fn reject(id: i64) -> Result<()> {
//!     Err(LanceaError::invalid_argument(format!("document id {id} already present")))
//! }
//!
//! assert!(reject(7).is_err());
//! ```

use thiserror::Error;

use crate::document::DocumentId;

/// The main error type for Lancea operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LanceaError {
    /// A negative or duplicate document id was passed to `add_document`.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A tokenized word contained an ASCII control character.
    #[error("invalid word: {0}")]
    InvalidWord(String),

    /// A query contained an empty token (for example two spaces in a row).
    #[error("query word is empty")]
    EmptyQueryWord,

    /// A malformed query token: bare `-`, a double minus marker, or a
    /// control character after the marker.
    #[error("invalid query word: {0}")]
    InvalidQueryWord(String),

    /// An operation addressed a document id that is not in the index.
    #[error("unknown document id: {0}")]
    UnknownDocumentId(DocumentId),
}

/// Result type alias for operations that may fail with [`LanceaError`].
pub type Result<T> = std::result::Result<T, LanceaError>;

impl LanceaError {
    /// Create a new invalid-argument error.
    pub fn invalid_argument<S: Into<String>>(msg: S) -> Self {
        LanceaError::InvalidArgument(msg.into())
    }

    /// Create a new invalid-word error.
    pub fn invalid_word<S: Into<String>>(word: S) -> Self {
        LanceaError::InvalidWord(word.into())
    }

    /// Create a new invalid-query-word error.
    pub fn invalid_query_word<S: Into<String>>(word: S) -> Self {
        LanceaError::InvalidQueryWord(word.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_construction() {
        let error = LanceaError::invalid_argument("document id -1 is negative");
        assert_eq!(
            error.to_string(),
            "invalid argument: document id -1 is negative"
        );

        let error = LanceaError::invalid_word("bad\u{1}word");
        assert_eq!(error.to_string(), "invalid word: bad\u{1}word");

        let error = LanceaError::UnknownDocumentId(42);
        assert_eq!(error.to_string(), "unknown document id: 42");
    }

    #[test]
    fn test_error_equality() {
        assert_eq!(LanceaError::EmptyQueryWord, LanceaError::EmptyQueryWord);
        assert_ne!(
            LanceaError::invalid_query_word("-"),
            LanceaError::invalid_query_word("--cat")
        );
    }
}
