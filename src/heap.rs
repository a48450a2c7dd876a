//! D-ary min-heap.
//!
//! [`DaryMinHeap`] is an implicit heap stored in a `Vec`, where every node
//! has up to `d` children. Wider heaps are shallower, so `push` does fewer
//! comparisons while `pop` does more per level. The `heap` bench measures
//! where the crossover sits for arities 2 through 9.
//!
//! # Layout
//!
//! For node `i`:
//! - parent: `(i - 1) / d`
//! - children: `d * i + 1 ..= d * i + d`

use std::fmt;

/// Smallest arity that still forms a tree.
pub const MIN_ARITY: usize = 2;

/// An array-backed min-heap with a configurable number of children per node.
///
/// # Example
///
/// ```rust
/// use algolab::heap::DaryMinHeap;
///
/// let mut heap = DaryMinHeap::new(4);
/// heap.extend([5, 1, 8, 3, 2]);
///
/// assert_eq!(heap.peek(), Some(&1));
/// assert_eq!(heap.into_sorted_vec(), vec![1, 2, 3, 5, 8]);
/// ```
#[derive(Clone)]
pub struct DaryMinHeap<T> {
    data: Vec<T>,
    arity: usize,
}

impl<T: Ord> DaryMinHeap<T> {
    /// Create an empty heap with `arity` children per node.
    ///
    /// # Panics
    ///
    /// Panics if `arity < 2`.
    #[must_use]
    pub fn new(arity: usize) -> Self {
        Self::with_capacity(arity, 0)
    }

    /// Create an empty heap that can hold `capacity` elements without
    /// reallocating.
    ///
    /// # Panics
    ///
    /// Panics if `arity < 2`.
    #[must_use]
    pub fn with_capacity(arity: usize, capacity: usize) -> Self {
        assert!(
            arity >= MIN_ARITY,
            "heap arity must be at least {MIN_ARITY}, got {arity}"
        );
        Self {
            data: Vec::with_capacity(capacity),
            arity,
        }
    }

    /// Build a heap from an unordered vector in O(n) using Floyd's
    /// bottom-up heapify.
    ///
    /// # Panics
    ///
    /// Panics if `arity < 2`.
    #[must_use]
    pub fn from_vec(arity: usize, data: Vec<T>) -> Self {
        let mut heap = Self::with_capacity(arity, 0);
        heap.data = data;
        heap.rebuild();
        heap
    }

    /// Number of children per node.
    #[inline]
    #[must_use]
    pub const fn arity(&self) -> usize {
        self.arity
    }

    /// Number of elements in the heap.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns `true` if the heap holds no elements.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Smallest element, if any.
    #[inline]
    #[must_use]
    pub fn peek(&self) -> Option<&T> {
        self.data.first()
    }

    /// Insert a value. O(log_d n).
    pub fn push(&mut self, value: T) {
        self.data.push(value);
        self.sift_up(self.data.len() - 1);
    }

    /// Remove and return the smallest element. O(d * log_d n).
    pub fn pop(&mut self) -> Option<T> {
        let last = self.data.pop()?;
        if self.data.is_empty() {
            return Some(last);
        }
        let min = std::mem::replace(&mut self.data[0], last);
        self.sift_down(0);
        Some(min)
    }

    /// Remove every element, keeping the allocation.
    pub fn clear(&mut self) {
        self.data.clear();
    }

    /// Drain the heap into an ascending vector.
    #[must_use]
    pub fn into_sorted_vec(mut self) -> Vec<T> {
        let mut out = Vec::with_capacity(self.data.len());
        while let Some(v) = self.pop() {
            out.push(v);
        }
        out
    }

    fn rebuild(&mut self) {
        let len = self.data.len();
        if len < 2 {
            return;
        }
        // Last internal node is the parent of the last element.
        let last_parent = (len - 2) / self.arity;
        for i in (0..=last_parent).rev() {
            self.sift_down(i);
        }
    }

    fn sift_up(&mut self, mut pos: usize) {
        while pos > 0 {
            let parent = (pos - 1) / self.arity;
            if self.data[pos] >= self.data[parent] {
                break;
            }
            self.data.swap(pos, parent);
            pos = parent;
        }
    }

    fn sift_down(&mut self, mut pos: usize) {
        let len = self.data.len();
        loop {
            let first_child = self.arity * pos + 1;
            if first_child >= len {
                break;
            }
            let last_child = (first_child + self.arity).min(len);

            let mut min = first_child;
            for child in first_child + 1..last_child {
                if self.data[child] < self.data[min] {
                    min = child;
                }
            }

            if self.data[min] >= self.data[pos] {
                break;
            }
            self.data.swap(pos, min);
            pos = min;
        }
    }
}

impl<T: Ord> Extend<T> for DaryMinHeap<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        let iter = iter.into_iter();
        self.data.reserve(iter.size_hint().0);
        for value in iter {
            self.push(value);
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for DaryMinHeap<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DaryMinHeap")
            .field("arity", &self.arity)
            .field("len", &self.data.len())
            .finish_non_exhaustive()
    }
}
