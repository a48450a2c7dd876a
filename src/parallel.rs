//! Sequential against fork-join execution on `rayon`'s pool.
//!
//! Two workloads: summing an integer range, and checking the Collatz
//! property over a range of start values. The fork-join versions halve their
//! range with [`rayon::join`] until a part is small enough to run inline.

use std::collections::HashSet;

use rayon::prelude::*;

use crate::tracing_helpers::warn_log;

/// Leaf size used by [`collatz_holds_fork_join`].
pub const COLLATZ_FORK_JOIN_THRESHOLD: u64 = 256;

// ============================================================================
//  Range sum
// ============================================================================

/// Sum of `from..=to`, one addition at a time. Wraps on overflow.
#[must_use]
pub fn range_sum_sequential(from: u64, to: u64) -> u64 {
    (from..=to).fold(0u64, u64::wrapping_add)
}

/// Sum of `from..=to`, split in halves until a part holds at most
/// `threshold` values. `threshold == 0` is treated as 1. Wraps on overflow.
///
/// ```rust
/// use algolab::parallel::{range_sum_fork_join, range_sum_sequential};
///
/// assert_eq!(range_sum_fork_join(1, 10_000, 64), range_sum_sequential(1, 10_000));
/// ```
#[must_use]
pub fn range_sum_fork_join(from: u64, to: u64, threshold: u64) -> u64 {
    if from > to {
        return 0;
    }
    range_sum_split(from, to, threshold.max(1))
}

fn range_sum_split(from: u64, to: u64, threshold: u64) -> u64 {
    // to - from is the element count minus one and cannot overflow.
    if to - from < threshold {
        return range_sum_sequential(from, to);
    }
    let mid = from + (to - from) / 2;
    let (left, right) = rayon::join(
        || range_sum_split(from, mid, threshold),
        || range_sum_split(mid + 1, to, threshold),
    );
    left.wrapping_add(right)
}

// ============================================================================
//  Collatz
// ============================================================================

/// One Collatz step, `None` if `3x + 1` overflows.
#[inline]
const fn collatz_step(x: u64) -> Option<u64> {
    if x % 2 == 0 {
        Some(x / 2)
    } else {
        match x.checked_mul(3) {
            Some(t) => t.checked_add(1),
            None => None,
        }
    }
}

/// True if iterating from `start` reaches a value below `start`.
/// Overflow counts as failure.
fn reaches_below(start: u64) -> bool {
    let mut x = start;
    loop {
        match collatz_step(x) {
            Some(next) if next < start => return true,
            Some(next) => x = next,
            None => {
                warn_log!(start, "collatz iteration overflowed u64");
                return false;
            }
        }
    }
}

/// Check every start in `3..=last`. Even starts halve immediately, so only
/// odd ones are iterated.
#[must_use]
pub fn collatz_holds_sequential(last: u64) -> bool {
    (3..=last).step_by(2).all(reaches_below)
}

/// [`collatz_holds_sequential`] over a rayon parallel iterator.
#[must_use]
pub fn collatz_holds_parallel(last: u64) -> bool {
    (3..=last).into_par_iter().all(reaches_below)
}

/// [`collatz_holds_sequential`] by recursive halving with [`rayon::join`].
#[must_use]
pub fn collatz_holds_fork_join(last: u64) -> bool {
    fn split(from: u64, to: u64) -> bool {
        if to - from < COLLATZ_FORK_JOIN_THRESHOLD {
            return (from..=to).all(reaches_below);
        }
        let mid = from + (to - from) / 2;
        let (left, right) = rayon::join(|| split(from, mid), || split(mid + 1, to));
        left && right
    }

    last < 3 || split(3, last)
}

/// Count the values in `1..=n` proven to reach 1, memoising every proven
/// value `<= n` in a `HashSet`.
///
/// Each start is iterated until it hits a proven value. The in-range values
/// on its path are then added to the set.
#[must_use]
pub fn collatz_solvable_set(n: u64) -> usize {
    let mut solvable: HashSet<u64> = HashSet::new();
    solvable.extend([1, 2].into_iter().filter(|&v| v <= n));

    let mut path = Vec::new();
    for start in 3..=n {
        path.clear();
        let mut x = start;
        loop {
            if x <= n {
                if solvable.contains(&x) {
                    solvable.extend(path.drain(..));
                    break;
                }
                path.push(x);
            }
            match collatz_step(x) {
                Some(next) => x = next,
                None => break,
            }
        }
    }

    solvable.len()
}
