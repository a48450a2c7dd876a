//! Binary search variants over sorted slices.
//!
//! The `Result` returning searches follow [`slice::binary_search`]: `Ok` holds
//! the index of a matching element, `Err` the index where `value` could be
//! inserted keeping the slice sorted. The `find_first` family returns the
//! lowest index holding `value`.

use std::cmp::Ordering;

/// Classic three-way binary search.
pub fn binary_search<T: Ord>(sorted: &[T], value: &T) -> Result<usize, usize> {
    let mut lo = 0;
    let mut hi = sorted.len();

    while lo < hi {
        let mid = lo + (hi - lo) / 2;
        match sorted[mid].cmp(value) {
            Ordering::Equal => return Ok(mid),
            Ordering::Less => lo = mid + 1,
            Ordering::Greater => hi = mid,
        }
    }

    Err(lo)
}

/// Binary search with a fixed number of halving steps and no early exit.
///
/// Each step advances `base` by the current offset when
/// `sorted[base + offset] <= value`, so the loop body is a compare and a
/// conditional add. On a match the index is the last occurrence.
///
/// # Panics
///
/// Panics unless `sorted.len()` is a power of two.
///
/// ```rust
/// use algolab::search::branchless_search;
///
/// let v = [1, 3, 5, 7];
/// assert_eq!(branchless_search(&v, &5), Ok(2));
/// assert_eq!(branchless_search(&v, &4), Err(2));
/// assert_eq!(branchless_search(&v, &0), Err(0));
/// ```
pub fn branchless_search<T: Ord>(sorted: &[T], value: &T) -> Result<usize, usize> {
    assert!(
        sorted.len().is_power_of_two(),
        "branchless search needs a power-of-two length, got {}",
        sorted.len()
    );

    let mut base = 0;
    let mut offset = sorted.len() / 2;
    while offset > 0 {
        base += usize::from(sorted[base + offset] <= *value) * offset;
        offset /= 2;
    }

    match sorted[base].cmp(value) {
        Ordering::Equal => Ok(base),
        Ordering::Less => Err(base + 1),
        Ordering::Greater => Err(base),
    }
}

/// Lowest index of `value`, iterative.
pub fn find_first<T: Ord>(sorted: &[T], value: &T) -> Option<usize> {
    let mut lo = 0;
    let mut hi = sorted.len();
    let mut found = None;

    while lo < hi {
        let mid = lo + (hi - lo) / 2;
        match sorted[mid].cmp(value) {
            Ordering::Equal => {
                found = Some(mid);
                hi = mid;
            }
            Ordering::Greater => hi = mid,
            Ordering::Less => lo = mid + 1,
        }
    }

    found
}

/// Lowest index of `value`, recursing into the left half after every hit.
pub fn find_first_recursive<T: Ord>(sorted: &[T], value: &T) -> Option<usize> {
    fn go<T: Ord>(sorted: &[T], value: &T, lo: usize, hi: usize) -> Option<usize> {
        if lo >= hi {
            return None;
        }
        let mid = lo + (hi - lo) / 2;
        match sorted[mid].cmp(value) {
            Ordering::Equal => go(sorted, value, lo, mid).or(Some(mid)),
            Ordering::Greater => go(sorted, value, lo, mid),
            Ordering::Less => go(sorted, value, mid + 1, hi),
        }
    }

    go(sorted, value, 0, sorted.len())
}

/// Lowest index of `value`, updating every bound with a select instead of a
/// branch so the compiler can emit conditional moves.
pub fn find_first_cmove<T: Ord>(sorted: &[T], value: &T) -> Option<usize> {
    const NONE: usize = usize::MAX;

    let mut lo = 0;
    let mut hi = sorted.len();
    let mut index = NONE;

    while lo < hi {
        let mid = lo + (hi - lo) / 2;
        let probe = &sorted[mid];
        index = if probe == value { mid } else { index };
        hi = if probe >= value { mid } else { hi };
        lo = if probe < value { mid + 1 } else { lo };
    }

    (index != NONE).then_some(index)
}
