//! # Lancea
//!
//! An in-memory TF-IDF full-text search engine core for Rust.
//!
//! ## Features
//!
//! - Inverted and forward indexes over short text documents, with
//!   per-document word interning (no duplicated string storage)
//! - Plus/minus query terms with stop-word filtering
//! - TF-IDF scoring with deterministic top-K ranking
//! - Sequential and parallel execution modes for search, match, and removal
//! - Lock-striped accumulators so parallel scoring needs no global lock

pub mod analysis;
pub mod concurrent;
pub mod document;
pub mod engine;
pub mod error;
pub mod index;
pub mod query;
pub mod search;

pub use document::{DocumentId, DocumentMatch, DocumentStatus, ScoredDocument};
pub use engine::SearchEngine;
pub use error::{LanceaError, Result};
pub use search::{ExecutionMode, SearchConfig};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
