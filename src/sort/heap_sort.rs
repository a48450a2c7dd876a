/// In-place heap sort: Floyd's bottom-up max-heapify, then repeatedly move
/// the root behind the shrinking heap.
///
/// O(n log n) time, O(1) extra space, not stable.
///
/// ```rust
/// let mut v = [9, -3, 7, 0, 7];
/// algolab::sort::heap_sort(&mut v);
/// assert_eq!(v, [-3, 0, 7, 7, 9]);
/// ```
pub fn heap_sort<T: Ord + Copy>(slice: &mut [T]) {
    let len = slice.len();
    if len < 2 {
        return;
    }

    for parent in (0..len / 2).rev() {
        sift_down(slice, parent, len);
    }

    for last in (1..len).rev() {
        slice.swap(0, last);
        sift_down(slice, 0, last);
    }
}

/// Restore the max-heap property for `slice[..end]` below `idx`.
fn sift_down<T: Ord + Copy>(slice: &mut [T], mut idx: usize, end: usize) {
    loop {
        let left = (idx << 1) | 1;
        if left >= end {
            return;
        }
        let right = left + 1;
        let larger = if right < end && slice[right] > slice[left] {
            right
        } else {
            left
        };
        if slice[idx] >= slice[larger] {
            return;
        }
        slice.swap(idx, larger);
        idx = larger;
    }
}
