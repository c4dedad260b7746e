//! Lock-striped accumulation structures for the scoring phase.
//!
//! Both structures split their keys across a fixed number of shards, each a
//! small ordered map or set behind its own mutex. An operation locks only the
//! shard owning its key, so writers touching different shards proceed
//! concurrently. No operation ever holds two shard locks at once.
//!
//! These are the only structures in the crate that tolerate concurrent
//! mutation; the index itself must be quiescent while they are in use.

pub mod map;
pub mod set;

pub use map::ShardedMap;
pub use set::ShardedSet;
