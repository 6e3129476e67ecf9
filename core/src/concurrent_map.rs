use parking_lot::{MappedMutexGuard, Mutex, MutexGuard};
use std::collections::BTreeMap;

/// Keys that can pick their shard deterministically (`key mod shard_count`).
pub trait ShardKey: Ord + Copy {
    fn shard(&self, shard_count: usize) -> usize;
}

macro_rules! impl_shard_key {
    ($($t:ty),*) => {
        $(impl ShardKey for $t {
            #[inline]
            fn shard(&self, shard_count: usize) -> usize {
                (*self as i128).rem_euclid(shard_count as i128) as usize
            }
        })*
    };
}

impl_shard_key!(i32, i64, u32, u64, usize);

/// Exclusive handle to one slot; holds only that slot's shard lock.
pub type Access<'a, V> = MappedMutexGuard<'a, V>;

/// A map split into independently locked shards so that writers touching
/// different shards never contend.
pub struct ConcurrentMap<K, V> {
    shards: Vec<Mutex<BTreeMap<K, V>>>,
}

impl<K: ShardKey, V> ConcurrentMap<K, V> {
    /// A shard count of zero is bumped to one.
    pub fn new(shard_count: usize) -> Self {
        let shards = (0..shard_count.max(1)).map(|_| Mutex::new(BTreeMap::new())).collect();
        Self { shards }
    }

    pub fn shard_count(&self) -> usize { self.shards.len() }

    fn shard_for(&self, key: &K) -> &Mutex<BTreeMap<K, V>> {
        &self.shards[key.shard(self.shards.len())]
    }

    /// Lock the key's shard and return its slot, inserting `V::default()` if absent.
    pub fn access(&self, key: K) -> Access<'_, V>
    where
        V: Default,
    {
        let guard = self.shard_for(&key).lock();
        MutexGuard::map(guard, |map| map.entry(key).or_default())
    }

    pub fn erase(&self, key: K) -> Option<V> {
        self.shard_for(&key).lock().remove(&key)
    }

    pub fn len(&self) -> usize {
        self.shards.iter().map(|s| s.lock().len()).sum()
    }

    pub fn is_empty(&self) -> bool { self.len() == 0 }

    /// Drain every shard, locking them one at a time in shard order, into a
    /// single ordered map. The accumulator is left empty.
    pub fn merge_to_ordinary_map(&self) -> BTreeMap<K, V> {
        let mut merged = BTreeMap::new();
        for shard in &self.shards {
            let mut guard = shard.lock();
            merged.append(&mut guard);
        }
        merged
    }
}
