//! Insertion sorts for short ranges.

/// Sorts a short slice in place. Used by [`Intrasort`](super::Intrasort)
/// for ranges at or below the insertion threshold.
pub trait InsertionSort {
    /// Sort `slice` ascending.
    fn sort<T: Ord + Copy>(&self, slice: &mut [T]);
}

/// Plain guarded insertion sort.
#[derive(Debug, Clone, Copy, Default)]
pub struct SimpleInsertion;

impl InsertionSort for SimpleInsertion {
    #[inline]
    fn sort<T: Ord + Copy>(&self, slice: &mut [T]) {
        insertion_sort(slice);
    }
}

/// Insertion sort behind a min-heap sentinel, see
/// [`unguarded_insertion_sort`].
#[derive(Debug, Clone, Copy, Default)]
pub struct HeapSentinelInsertion;

impl InsertionSort for HeapSentinelInsertion {
    #[inline]
    fn sort<T: Ord + Copy>(&self, slice: &mut [T]) {
        unguarded_insertion_sort(slice);
    }
}

/// Classic insertion sort. Stable, O(n^2) worst case.
///
/// ```rust
/// let mut v = [5, 1, 4, 1];
/// algolab::sort::insertion_sort(&mut v);
/// assert_eq!(v, [1, 1, 4, 5]);
/// ```
pub fn insertion_sort<T: Ord + Copy>(slice: &mut [T]) {
    for i in 1..slice.len() {
        let value = slice[i];
        let mut j = i;
        while j > 0 && slice[j - 1] > value {
            slice[j] = slice[j - 1];
            j -= 1;
        }
        slice[j] = value;
    }
}

/// Insertion sort without the lower-bound check in the inner loop.
///
/// A bottom-up min-heapify first moves the minimum to index 0. No element
/// can then shift past it, so the scan stops on a comparison alone.
/// Not stable.
pub fn unguarded_insertion_sort<T: Ord + Copy>(slice: &mut [T]) {
    if slice.len() < 2 {
        return;
    }

    min_heapify(slice);

    for i in 2..slice.len() {
        let value = slice[i];
        let mut j = i;
        while slice[j - 1] > value {
            slice[j] = slice[j - 1];
            j -= 1;
        }
        slice[j] = value;
    }
}

fn min_heapify<T: Ord + Copy>(slice: &mut [T]) {
    let len = slice.len();
    for parent in (0..len / 2).rev() {
        let mut idx = parent;
        loop {
            let left = 2 * idx + 1;
            if left >= len {
                break;
            }
            let right = left + 1;
            let smaller = if right < len && slice[right] < slice[left] {
                right
            } else {
                left
            };
            if slice[idx] <= slice[smaller] {
                break;
            }
            slice.swap(idx, smaller);
            idx = smaller;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lcg_vec(len: usize, seed: u64) -> Vec<i32> {
        let mut state = seed;
        (0..len)
            .map(|_| {
                state = state
                    .wrapping_mul(6_364_136_223_846_793_005)
                    .wrapping_add(1);
                ((state >> 40) as i32) % 1000
            })
            .collect()
    }

    #[test]
    fn test_both_strategies_match_std() {
        for len in 0..70 {
            let input = lcg_vec(len, len as u64 + 1);
            let mut expected = input.clone();
            expected.sort_unstable();

            let mut a = input.clone();
            SimpleInsertion.sort(&mut a);
            assert_eq!(a, expected, "simple, len {len}");

            let mut b = input;
            HeapSentinelInsertion.sort(&mut b);
            assert_eq!(b, expected, "sentinel, len {len}");
        }
    }

    #[test]
    fn test_min_heapify_puts_minimum_first() {
        let mut v = lcg_vec(33, 9);
        let min = *v.iter().min().unwrap();
        min_heapify(&mut v);
        assert_eq!(v[0], min);
        for i in 1..v.len() {
            assert!(v[(i - 1) / 2] <= v[i]);
        }
    }

    #[test]
    fn test_duplicates_and_reversed() {
        let mut v = [3, 3, 3, 2, 2, 1, 1, 1];
        unguarded_insertion_sort(&mut v);
        assert_eq!(v, [1, 1, 1, 2, 2, 3, 3, 3]);

        let mut r: Vec<u8> = (0..=40).rev().collect();
        insertion_sort(&mut r);
        assert!(r.is_sorted());
    }
}
