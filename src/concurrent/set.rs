//! Sharded membership set.

use std::collections::BTreeSet;
use std::hash::{BuildHasher, Hash};

use ahash::RandomState;
use parking_lot::Mutex;

/// A lock-striped set used to mark keys from many threads.
///
/// Shard routing and locking follow the same discipline as
/// [`ShardedMap`](crate::concurrent::ShardedMap): one fixed shard per key,
/// one lock held at a time. `insert` is idempotent and `contains` is a
/// point-in-time read under the owning shard's lock.
#[derive(Debug)]
pub struct ShardedSet<K> {
    shards: Vec<Mutex<BTreeSet<K>>>,
    hasher: RandomState,
}

impl<K> ShardedSet<K>
where
    K: Ord + Hash,
{
    /// Create a set with `shard_count` shards.
    ///
    /// # Panics
    ///
    /// Panics if `shard_count` is zero.
    pub fn with_shards(shard_count: usize) -> Self {
        assert!(shard_count > 0, "shard count must be positive");
        ShardedSet {
            shards: (0..shard_count).map(|_| Mutex::new(BTreeSet::new())).collect(),
            hasher: RandomState::new(),
        }
    }

    fn shard_for(&self, key: &K) -> &Mutex<BTreeSet<K>> {
        let index = self.hasher.hash_one(key) as usize % self.shards.len();
        &self.shards[index]
    }

    /// Mark `key` as a member. Idempotent.
    pub fn insert(&self, key: K) {
        self.shard_for(&key).lock().insert(key);
    }

    /// Whether `key` has been marked.
    pub fn contains(&self, key: &K) -> bool {
        self.shard_for(key).lock().contains(key)
    }

    /// Consume the set and merge every shard into one ordered set.
    pub fn into_ordered_set(self) -> BTreeSet<K> {
        let mut merged = BTreeSet::new();
        for shard in self.shards {
            let mut shard = shard.into_inner();
            merged.append(&mut shard);
        }
        merged
    }
}
