//! Quicksort with heap sort and insertion sort cutoffs.

use super::heap_sort::heap_sort;
use super::insertion::InsertionSort;
use crate::tracing_helpers::debug_log;

/// Ranges with at most this many elements go to the insertion strategy.
pub const INSERTION_SORT_THRESHOLD: usize = 32;

/// Intrasort parameterised by the insertion sort used for short ranges.
///
/// Ranges are kept on an explicit stack of inclusive `(from, to)` pairs,
/// each tagged with its partition depth. A range at depth
/// `floor(log2 n) + 1` or deeper is heap sorted instead of partitioned, so
/// inputs that defeat the last-element pivot stay `O(n log n)`.
///
/// ```rust
/// use algolab::Intrasort;
/// use algolab::sort::SimpleInsertion;
///
/// let mut v: Vec<i32> = (0..500).rev().collect();
/// Intrasort::new(SimpleInsertion).sort(&mut v);
/// assert!(v.is_sorted());
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct Intrasort<I> {
    insertion: I,
}

/// What one sort did, for tests and trace output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct SortStats {
    partitions: usize,
    insertion_ranges: usize,
    heap_ranges: usize,
}

impl<I: InsertionSort> Intrasort<I> {
    /// Intrasort delegating short ranges to `insertion`.
    #[must_use]
    pub const fn new(insertion: I) -> Self {
        Self { insertion }
    }

    /// The insertion strategy.
    #[must_use]
    pub const fn insertion(&self) -> &I {
        &self.insertion
    }

    /// Sort `slice` ascending. Not stable.
    #[cfg_attr(not(feature = "tracing"), allow(unused_variables))]
    pub fn sort<T: Ord + Copy>(&self, slice: &mut [T]) {
        if slice.len() < 2 {
            return;
        }
        let depth_limit = slice.len().ilog2() as usize + 1;
        let stats = self.sort_with_limit(slice, depth_limit);

        debug_log!(
            len = slice.len(),
            partitions = stats.partitions,
            insertion_ranges = stats.insertion_ranges,
            heap_ranges = stats.heap_ranges,
            "intrasort"
        );
    }

    fn sort_with_limit<T: Ord + Copy>(&self, slice: &mut [T], depth_limit: usize) -> SortStats {
        let mut stats = SortStats::default();
        let mut stack: Vec<(usize, usize, usize)> = Vec::with_capacity(depth_limit + 1);
        stack.push((0, slice.len() - 1, 0));

        while let Some((from, to, depth)) = stack.pop() {
            let range = &mut slice[from..=to];

            if range.len() <= INSERTION_SORT_THRESHOLD {
                self.insertion.sort(range);
                stats.insertion_ranges += 1;
                continue;
            }

            if depth >= depth_limit {
                heap_sort(range);
                stats.heap_ranges += 1;
                continue;
            }

            let pivot = from + partition(range);
            stats.partitions += 1;

            if pivot - from > 1 {
                stack.push((from, pivot - 1, depth + 1));
            }
            if to - pivot > 1 {
                stack.push((pivot + 1, to, depth + 1));
            }
        }

        stats
    }
}

/// Lomuto partition around the last element. Returns the pivot's final
/// index: everything before it is `<=`, everything after is `>`.
fn partition<T: Ord + Copy>(range: &mut [T]) -> usize {
    let last = range.len() - 1;
    let pivot = range[last];
    let mut boundary = 0;

    for i in 0..last {
        if range[i] <= pivot {
            range.swap(boundary, i);
            boundary += 1;
        }
    }

    range.swap(boundary, last);
    boundary
}
