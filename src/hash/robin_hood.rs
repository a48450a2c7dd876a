//! Robin Hood hash map.
//!
//! Every bucket remembers how far its entry sits from its home bucket
//! (the DIB, distance to initial bucket). An insert that meets a resident
//! closer to home than itself takes the bucket and carries the resident
//! onward, which keeps the probe-length variance low.
//!
//! Two consequences the lookup and removal paths rely on:
//! - A lookup can stop as soon as its own distance exceeds the resident's DIB.
//! - Removal can shift the following run back by one instead of leaving a
//!   tombstone.

use std::borrow::Borrow;
use std::collections::hash_map::RandomState;
use std::fmt;
use std::hash::{BuildHasher, Hash};
use std::mem;

use super::{HashMapError, INITIAL_CAPACITY, check_load_factor, exceeds_load};
use crate::tracing_helpers::{debug_log, trace_log};

/// Default maximum load factor.
pub const DEFAULT_LOAD_FACTOR: f64 = 0.9;

struct Bucket<K, V> {
    key: K,
    value: V,
    dib: usize,
}

/// An open-addressing hash map using Robin Hood displacement and
/// backward-shift deletion.
///
/// # Example
///
/// ```rust
/// use algolab::hash::RobinHoodHashMap;
///
/// let mut map: RobinHoodHashMap<u32, &str> = (0..100).map(|i| (i, "v")).collect();
/// assert_eq!(map.len(), 100);
/// assert_eq!(map.remove(&42), Some("v"));
/// assert!(!map.contains_key(&42));
/// ```
pub struct RobinHoodHashMap<K, V, S = RandomState> {
    slots: Vec<Option<Bucket<K, V>>>,
    len: usize,
    max_load: f64,
    hasher: S,
}

impl<K, V> RobinHoodHashMap<K, V, RandomState> {
    /// Create an empty map with the default load factor (0.9).
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

impl<K, V, S> RobinHoodHashMap<K, V, S> {
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

    /// Longest distance any entry currently sits from its home bucket.
    ///
    /// O(capacity); meant for diagnostics and tests.
    #[must_use]
    pub fn max_probe_distance(&self) -> usize {
        self.slots
            .iter()
            .flatten()
            .map(|b| b.dib)
            .max()
            .unwrap_or(0)
    }

    /// Remove every entry, keeping the bucket array.
    pub fn clear(&mut self) {
        for slot in &mut self.slots {
            *slot = None;
        }
        self.len = 0;
    }

    /// Iterate over live entries in bucket order.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> {
        self.slots.iter().flatten().map(|b| (&b.key, &b.value))
    }
}

impl<K, V, S> RobinHoodHashMap<K, V, S>
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

        for dist in 0..self.slots.len() {
            match &self.slots[idx] {
                None => return None,
                // Our entry would have displaced this one.
                Some(b) if b.dib < dist => return None,
                Some(b) if b.key.borrow() == key => return Some(idx),
                Some(_) => idx = (idx + 1) & mask,
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
        let idx = self.find(key)?;
        self.slots[idx].as_ref().map(|b| &b.value)
    }

    /// Returns a mutable reference to the value for `key`.
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let idx = self.find(key)?;
        self.slots[idx].as_mut().map(|b| &mut b.value)
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
        if let Some(idx) = self.find(&key) {
            return self.slots[idx]
                .as_mut()
                .map(|b| mem::replace(&mut b.value, value));
        }

        if exceeds_load(self.len + 1, self.slots.len(), self.max_load) {
            self.grow();
        }

        let idx = self.home(&key);
        self.place(
            idx,
            Bucket {
                key,
                value,
                dib: 0,
            },
        );
        self.len += 1;
        None
    }

    /// Place a bucket known to be absent, displacing richer residents.
    fn place(&mut self, mut idx: usize, mut carry: Bucket<K, V>) {
        let mask = self.slots.len() - 1;
        loop {
            let slot = &mut self.slots[idx];
            match slot {
                None => {
                    *slot = Some(carry);
                    return;
                }
                Some(resident) if resident.dib < carry.dib => {
                    trace_log!(idx, carry_dib = carry.dib, resident_dib = resident.dib, "robin hood swap");
                    mem::swap(resident, &mut carry);
                }
                Some(_) => {}
            }
            idx = (idx + 1) & mask;
            carry.dib += 1;
        }
    }

    /// Remove `key`, returning its value. Shifts the following run back.
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let idx = self.find(key)?;
        let removed = self.slots[idx].take()?;
        self.len -= 1;

        let mask = self.slots.len() - 1;
        let mut hole = idx;
        loop {
            let next = (hole + 1) & mask;
            match self.slots[next].take() {
                Some(mut b) if b.dib > 0 => {
                    b.dib -= 1;
                    self.slots[hole] = Some(b);
                    hole = next;
                }
                other => {
                    self.slots[next] = other;
                    break;
                }
            }
        }

        Some(removed.value)
    }

    fn grow(&mut self) {
        let new_capacity = self.slots.len() * 2;
        debug_log!(
            old_capacity = self.slots.len(),
            new_capacity,
            len = self.len,
            "robin hood map resize"
        );

        let old = mem::replace(&mut self.slots, empty_slots(new_capacity));
        for mut b in old.into_iter().flatten() {
            b.dib = 0;
            let idx = self.home(&b.key);
            self.place(idx, b);
        }
    }
}

fn empty_slots<K, V>(capacity: usize) -> Vec<Option<Bucket<K, V>>> {
    (0..capacity).map(|_| None).collect()
}

impl<K, V> Default for RobinHoodHashMap<K, V, RandomState> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Hash + Eq, V, S: BuildHasher> Extend<(K, V)> for RobinHoodHashMap<K, V, S> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (k, v) in iter {
            self.insert(k, v);
        }
    }
}

impl<K: Hash + Eq, V> FromIterator<(K, V)> for RobinHoodHashMap<K, V, RandomState> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        map.extend(iter);
        map
    }
}

impl<K: fmt::Debug, V: fmt::Debug, S> fmt::Debug for RobinHoodHashMap<K, V, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}
