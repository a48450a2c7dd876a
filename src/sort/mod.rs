//! Intrasort and the sorts it is assembled from.
//!
//! [`Intrasort`] is an explicit-stack quicksort that hands small ranges to
//! an [`InsertionSort`] strategy and falls back to [`heap_sort`] once too many
//! ranges are pending. The `sorting` bench compares the two insertion
//! strategies against `sort_unstable`.

mod heap_sort;
mod insertion;
mod intrasort;

pub use heap_sort::heap_sort;
pub use insertion::{
    HeapSentinelInsertion, InsertionSort, SimpleInsertion, insertion_sort,
    unguarded_insertion_sort,
};
pub use intrasort::{INSERTION_SORT_THRESHOLD, Intrasort};
