//! Open-addressing hash map with linear probing.

use std::borrow::Borrow;
use std::collections::hash_map::RandomState;
use std::fmt;
use std::hash::{BuildHasher, Hash};
use std::mem;

use super::{HashMapError, INITIAL_CAPACITY, check_load_factor, exceeds_load};
use crate::tracing_helpers::debug_log;

/// Default maximum load factor, counting tombstones as used buckets.
pub const DEFAULT_LOAD_FACTOR: f64 = 0.5;

enum Slot<K, V> {
    Empty,
    /// A removed entry. Probing continues past it; inserts may reuse it.
    Tombstone,
    Occupied(K, V),
}

/// A hash map that stores entries directly in the bucket array.
///
/// Collisions are resolved by scanning to the next bucket. Removal leaves a
/// tombstone so probe chains through the removed bucket stay intact. The
/// table doubles once live entries plus tombstones exceed the load factor,
/// and rehashing drops every tombstone.
///
/// # Example
///
/// ```rust
/// use algolab::hash::OpenHashMap;
///
/// let mut map = OpenHashMap::new();
/// assert_eq!(map.insert("a", 1), None);
/// assert_eq!(map.insert("a", 2), Some(1));
/// assert_eq!(map.get("a"), Some(&2));
/// assert_eq!(map.remove("a"), Some(2));
/// assert!(map.is_empty());
/// ```
pub struct OpenHashMap<K, V, S = RandomState> {
    slots: Vec<Slot<K, V>>,
    len: usize,
    tombstones: usize,
    max_load: f64,
    hasher: S,
}

impl<K, V> OpenHashMap<K, V, RandomState> {
    /// Create an empty map with the default load factor (0.5).
    #[must_use]
    pub fn new() -> Self {
        Self::build(DEFAULT_LOAD_FACTOR, RandomState::new())
    }

    /// Create an empty map with a custom maximum load factor.
    ///
    /// # Errors
    ///
    /// Returns [`HashMapError::InvalidLoadFactor`] unless `0 < load_factor < 1`.
    pub fn with_load_factor(load_factor: f64) -> Result<Self, HashMapError> {
        Self::with_hasher(load_factor, RandomState::new())
    }
}

impl<K, V, S> OpenHashMap<K, V, S> {
    /// Create an empty map with a custom load factor and hasher.
    ///
    /// # Errors
    ///
    /// Returns [`HashMapError::InvalidLoadFactor`] unless `0 < load_factor < 1`.
    pub fn with_hasher(load_factor: f64, hasher: S) -> Result<Self, HashMapError> {
        Ok(Self::build(check_load_factor(load_factor)?, hasher))
    }

    fn build(max_load: f64, hasher: S) -> Self {
        Self {
            slots: empty_slots(INITIAL_CAPACITY),
            len: 0,
            tombstones: 0,
            max_load,
            hasher,
        }
    }

    /// Number of live entries.
    #[inline]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the map holds no entries.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of buckets. Always a power of two.
    #[inline]
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Maximum load factor this map grows at.
    #[inline]
    #[must_use]
    pub const fn load_factor(&self) -> f64 {
        self.max_load
    }

    /// Remove every entry, keeping the bucket array.
    pub fn clear(&mut self) {
        for slot in &mut self.slots {
            *slot = Slot::Empty;
        }
        self.len = 0;
        self.tombstones = 0;
    }

    /// Iterate over live entries in bucket order.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> {
        self.slots.iter().filter_map(|slot| match slot {
            Slot::Occupied(k, v) => Some((k, v)),
            _ => None,
        })
    }
}

impl<K, V, S> OpenHashMap<K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher,
{
    #[inline]
    fn home<Q: Hash + ?Sized>(&self, key: &Q) -> usize {
        #[expect(clippy::cast_possible_truncation)]
        let hash = self.hasher.hash_one(key) as usize;
        hash & (self.slots.len() - 1)
    }

    fn find<Q>(&self, key: &Q) -> Option<usize>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let mask = self.slots.len() - 1;
        let mut idx = self.home(key);

        // The load factor guarantees at least one empty bucket.
        for _ in 0..self.slots.len() {
            match &self.slots[idx] {
                Slot::Empty => return None,
                Slot::Occupied(k, _) if k.borrow() == key => return Some(idx),
                _ => idx = (idx + 1) & mask,
            }
        }
        None
    }

    /// Returns a reference to the value for `key`.
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        match &self.slots[self.find(key)?] {
            Slot::Occupied(_, v) => Some(v),
            _ => None,
        }
    }

    /// Returns a mutable reference to the value for `key`.
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let idx = self.find(key)?;
        match &mut self.slots[idx] {
            Slot::Occupied(_, v) => Some(v),
            _ => None,
        }
    }

    /// Returns `true` if the map contains `key`.
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.find(key).is_some()
    }

    /// Insert a key-value pair, returning the previous value for `key`.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        if exceeds_load(
            self.len + self.tombstones + 1,
            self.slots.len(),
            self.max_load,
        ) {
            self.grow();
        }

        let mask = self.slots.len() - 1;
        let mut idx = self.home(&key);
        let mut reusable = None;

        loop {
            match &mut self.slots[idx] {
                Slot::Empty => break,
                Slot::Tombstone if reusable.is_none() => reusable = Some(idx),
                Slot::Occupied(k, v) if *k == key => return Some(mem::replace(v, value)),
                Slot::Tombstone | Slot::Occupied(..) => {}
            }
            idx = (idx + 1) & mask;
        }

        if let Some(tomb) = reusable {
            idx = tomb;
            self.tombstones -= 1;
        }
        self.slots[idx] = Slot::Occupied(key, value);
        self.len += 1;
        None
    }

    /// Remove `key`, returning its value. Leaves a tombstone behind.
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let idx = self.find(key)?;
        match mem::replace(&mut self.slots[idx], Slot::Tombstone) {
            Slot::Occupied(_, v) => {
                self.len -= 1;
                self.tombstones += 1;
                Some(v)
            }
            other => {
                self.slots[idx] = other;
                None
            }
        }
    }

    fn grow(&mut self) {
        // Mostly tombstones: rehash in place instead of doubling.
        let new_capacity = if self.tombstones > self.len {
            self.slots.len()
        } else {
            self.slots.len() * 2
        };

        debug_log!(
            old_capacity = self.slots.len(),
            new_capacity,
            len = self.len,
            tombstones = self.tombstones,
            "open map rehash"
        );

        let old = mem::replace(&mut self.slots, empty_slots(new_capacity));
        self.tombstones = 0;
        let mask = new_capacity - 1;

        for slot in old {
            if let Slot::Occupied(k, v) = slot {
                let mut idx = self.home(&k);
                while matches!(self.slots[idx], Slot::Occupied(..)) {
                    idx = (idx + 1) & mask;
                }
                self.slots[idx] = Slot::Occupied(k, v);
            }
        }
    }
}

fn empty_slots<K, V>(capacity: usize) -> Vec<Slot<K, V>> {
    (0..capacity).map(|_| Slot::Empty).collect()
}

impl<K, V> Default for OpenHashMap<K, V, RandomState> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Hash + Eq, V, S: BuildHasher> Extend<(K, V)> for OpenHashMap<K, V, S> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (k, v) in iter {
            self.insert(k, v);
        }
    }
}

impl<K: Hash + Eq, V> FromIterator<(K, V)> for OpenHashMap<K, V, RandomState> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        map.extend(iter);
        map
    }
}

impl<K: fmt::Debug, V: fmt::Debug, S> fmt::Debug for OpenHashMap<K, V, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}
