//! Sharded concurrent index map: compact position -> dense node id.
//!
//! Ids are handed out by a single atomic counter, so they are dense and in
//! first-discovery order; each shard serializes only its own insertions.
//! Lookups lock one shard. Iteration (for the dense key vector) is only valid
//! once all insertions are done, which the phase barrier guarantees.

use std::collections::hash_map::Entry;
use std::hash::Hasher;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;

use rustc_hash::{FxHashMap, FxHasher};

use crate::position::PackedPosition;

/// Dense node index into the table.
pub type PositionId = u32;

const SHARD_COUNT: usize = 64;

pub struct ShardedIndex {
    shards: Vec<Mutex<FxHashMap<PackedPosition, PositionId>>>,
    next_id: AtomicU32,
}

impl Default for ShardedIndex {
    fn default() -> Self {
        Self::new()
    }
}

impl ShardedIndex {
    pub fn new() -> Self {
        ShardedIndex {
            shards: (0..SHARD_COUNT)
                .map(|_| Mutex::new(FxHashMap::default()))
                .collect(),
            next_id: AtomicU32::new(0),
        }
    }

    fn shard_of(&self, key: &PackedPosition) -> usize {
        let mut hasher = FxHasher::default();
        hasher.write(&key.0);
        hasher.finish() as usize % SHARD_COUNT
    }

    /// Insert `key` with a freshly allocated dense id unless it is already
    /// present. Returns whether the key was new, and its id either way.
    pub fn insert_if_absent(&self, key: PackedPosition) -> (bool, PositionId) {
        let mut shard = self.shards[self.shard_of(&key)]
            .lock()
            .expect("index shard poisoned");
        match shard.entry(key) {
            Entry::Occupied(entry) => (false, *entry.get()),
            Entry::Vacant(entry) => {
                let id = self.next_id.fetch_add(1, Ordering::Relaxed);
                entry.insert(id);
                (true, id)
            }
        }
    }

    pub fn find(&self, key: &PackedPosition) -> Option<PositionId> {
        self.shards[self.shard_of(key)]
            .lock()
            .expect("index shard poisoned")
            .get(key)
            .copied()
    }

    /// Number of keys inserted so far.
    pub fn len(&self) -> usize {
        self.next_id.load(Ordering::Relaxed) as usize
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The inverse mapping id -> key, as a dense vector.
    ///
    /// Only meaningful between phases, when no insertions are in flight.
    pub fn dense_keys(&self) -> Vec<PackedPosition> {
        let mut keys = vec![PackedPosition::default(); self.len()];
        for shard in &self.shards {
            for (key, &id) in shard.lock().expect("index shard poisoned").iter() {
                keys[id as usize] = *key;
            }
        }
        keys
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(b: u8) -> PackedPosition {
        let mut bytes = [0u8; 24];
        bytes[0] = b;
        PackedPosition(bytes)
    }

    #[test]
    fn ids_are_dense_and_stable() {
        let index = ShardedIndex::new();
        let (fresh, a) = index.insert_if_absent(key(1));
        assert!(fresh);
        let (fresh, b) = index.insert_if_absent(key(2));
        assert!(fresh);
        let (fresh, a2) = index.insert_if_absent(key(1));
        assert!(!fresh);
        assert_eq!(a, a2);
        assert_eq!(index.len(), 2);
        assert_eq!(index.find(&key(2)), Some(b));
        assert_eq!(index.find(&key(3)), None);

        let keys = index.dense_keys();
        assert_eq!(keys[a as usize], key(1));
        assert_eq!(keys[b as usize], key(2));
    }

    #[test]
    fn concurrent_inserts_assign_unique_ids() {
        let index = ShardedIndex::new();
        std::thread::scope(|scope| {
            for _ in 0..4 {
                let index = &index;
                scope.spawn(move || {
                    for i in 0..64u8 {
                        index.insert_if_absent(key(i));
                    }
                });
            }
        });
        assert_eq!(index.len(), 64);
        let keys = index.dense_keys();
        for (id, k) in keys.iter().enumerate() {
            assert_eq!(index.find(k), Some(id as u32));
        }
    }
}
