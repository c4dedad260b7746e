//! Scoring, ranking, and execution-mode selection.

pub mod scorer;

use serde::{Deserialize, Serialize};

/// Maximum number of ranked results returned by default.
pub const DEFAULT_MAX_RESULTS: usize = 5;

/// Relevance values closer than this are treated as tied and ordered by
/// rating instead. Also the tolerance within which sequential and parallel
/// runs of the same query must agree.
pub const RELEVANCE_EPSILON: f64 = 1e-6;

/// Default number of plus-word slices processed concurrently in parallel
/// scoring.
pub const DEFAULT_PLUS_WORD_PARTITIONS: usize = 10;

/// How an operation fans out its work.
///
/// Both modes run the same algorithm and block the caller until done;
/// parallel mode distributes independent units (minus-words, plus-word
/// slices, per-word posting maps) across rayon tasks and joins them all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExecutionMode {
    /// Single-threaded, deterministic iteration order.
    #[default]
    Sequential,
    /// Bounded fan-out over rayon's thread pool.
    Parallel,
}

/// Tunables for `find`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Ranked results are truncated to this many entries.
    pub max_results: usize,

    /// Number of slices the plus-word set is split into under
    /// [`ExecutionMode::Parallel`].
    pub plus_word_partitions: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        SearchConfig {
            max_results: DEFAULT_MAX_RESULTS,
            plus_word_partitions: DEFAULT_PLUS_WORD_PARTITIONS,
        }
    }
}
