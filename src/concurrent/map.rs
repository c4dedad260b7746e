//! Sharded key-value accumulator.

use std::collections::BTreeMap;
use std::hash::{BuildHasher, Hash};

use ahash::RandomState;
use parking_lot::Mutex;

/// A lock-striped map used to accumulate per-key values from many threads.
///
/// The shard count is fixed at construction and never changes. Keys route to
/// shard `hash(key) % shard_count`; only that shard's lock is taken for an
/// update, so contention stays proportional to key collisions per shard
/// rather than to total thread count.
///
/// # Examples
///
/// ```
/// use lancea::concurrent::ShardedMap;
///
/// let map: ShardedMap<i64, f64> = ShardedMap::with_shards(8);
/// map.update(3, |v| *v += 0.5);
/// map.update(3, |v| *v += 0.25);
/// let merged = map.into_ordered_map();
/// assert_eq!(merged[&3], 0.75);
/// ```
#[derive(Debug)]
pub struct ShardedMap<K, V> {
    shards: Vec<Mutex<BTreeMap<K, V>>>,
    hasher: RandomState,
}

impl<K, V> ShardedMap<K, V>
where
    K: Ord + Hash,
    V: Default,
{
    /// Create a map with `shard_count` shards.
    ///
    /// # Panics
    ///
    /// Panics if `shard_count` is zero.
    pub fn with_shards(shard_count: usize) -> Self {
        assert!(shard_count > 0, "shard count must be positive");
        ShardedMap {
            shards: (0..shard_count).map(|_| Mutex::new(BTreeMap::new())).collect(),
            hasher: RandomState::new(),
        }
    }

    fn shard_for(&self, key: &K) -> &Mutex<BTreeMap<K, V>> {
        let index = self.hasher.hash_one(key) as usize % self.shards.len();
        &self.shards[index]
    }

    /// Apply `f` to the value stored under `key`, inserting `V::default()`
    /// first if the key is absent. The owning shard stays locked for the
    /// duration of `f`, so concurrent updates to the same key serialize and
    /// no increment is lost.
    pub fn update<F>(&self, key: K, f: F)
    where
        F: FnOnce(&mut V),
    {
        let mut shard = self.shard_for(&key).lock();
        f(shard.entry(key).or_default());
    }

    /// Remove `key` from its owning shard, if present.
    pub fn erase(&self, key: &K) {
        self.shard_for(key).lock().remove(key);
    }

    /// Merge every shard into one ordered map, visiting shards in a fixed
    /// order with one lock held at a time. Per-shard consistency only: this
    /// is not a cross-shard point-in-time snapshot, which is fine once all
    /// writers have joined.
    pub fn snapshot(&self) -> BTreeMap<K, V>
    where
        K: Clone,
        V: Clone,
    {
        let mut merged = BTreeMap::new();
        for shard in &self.shards {
            let shard = shard.lock();
            merged.extend(shard.iter().map(|(k, v)| (k.clone(), v.clone())));
        }
        merged
    }

    /// Consume the map and merge every shard into one ordered map.
    pub fn into_ordered_map(self) -> BTreeMap<K, V> {
        let mut merged = BTreeMap::new();
        for shard in self.shards {
            let mut shard = shard.into_inner();
            merged.append(&mut shard);
        }
        merged
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_update_accumulates() {
        let map: ShardedMap<i64, f64> = ShardedMap::with_shards(4);
        for _ in 0..10 {
            map.update(1, |v| *v += 0.1);
        }
        map.update(2, |v| *v += 1.0);
        let merged = map.into_ordered_map();
        assert_eq!(merged.len(), 2);
        assert!((merged[&1] - 1.0).abs() < 1e-12);
        assert_eq!(merged[&2], 1.0);
    }

    #[test]
    fn test_concurrent_updates_lose_nothing() {
        let map: ShardedMap<i64, u64> = ShardedMap::with_shards(16);
        thread::scope(|scope| {
            for _ in 0..8 {
                scope.spawn(|| {
                    for key in 0..100 {
                        for _ in 0..50 {
                            map.update(key, |v| *v += 1);
                        }
                    }
                });
            }
        });
        let merged = map.into_ordered_map();
        assert_eq!(merged.len(), 100);
        for key in 0..100 {
            assert_eq!(merged[&key], 8 * 50);
        }
    }

    #[test]
    fn test_erase_removes_only_that_key() {
        let map: ShardedMap<i64, i32> = ShardedMap::with_shards(2);
        map.update(1, |v| *v = 10);
        map.update(2, |v| *v = 20);
        map.erase(&1);
        let merged = map.into_ordered_map();
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[&2], 20);
    }

    #[test]
    fn test_snapshot_is_ordered() {
        let map: ShardedMap<i64, i32> = ShardedMap::with_shards(3);
        for key in [5, 1, 9, 3] {
            map.update(key, |v| *v = key as i32);
        }
        let snapshot = map.snapshot();
        let keys: Vec<i64> = snapshot.keys().copied().collect();
        assert_eq!(keys, vec![1, 3, 5, 9]);
        // The map is still usable after a snapshot.
        map.update(7, |v| *v = 7);
        assert_eq!(map.into_ordered_map().len(), 5);
    }

    #[test]
    #[should_panic(expected = "shard count must be positive")]
    fn test_zero_shards_rejected() {
        let _map: ShardedMap<i64, f64> = ShardedMap::with_shards(0);
    }
}
