//! Small textbook algorithms, each in two or three competing versions.

use std::collections::{BTreeSet, HashSet};
use std::hash::Hash;

// ============================================================================
//  Longest increasing subsequence
// ============================================================================

/// Length of the longest strictly increasing subsequence, O(n^2) DP.
#[must_use]
pub fn lis_quadratic(values: &[i64]) -> usize {
    let mut best_ending_at = vec![1usize; values.len()];

    for i in 1..values.len() {
        for j in 0..i {
            if values[j] < values[i] {
                best_ending_at[i] = best_ending_at[i].max(best_ending_at[j] + 1);
            }
        }
    }

    best_ending_at.into_iter().max().unwrap_or(0)
}

/// Length of the longest strictly increasing subsequence, O(n log k).
///
/// `tails[len]` holds the smallest value that ends an increasing run of
/// `len + 1` elements seen so far.
#[must_use]
pub fn lis_patience(values: &[i64]) -> usize {
    let mut tails: Vec<i64> = Vec::new();

    for &v in values {
        let pile = tails.partition_point(|&t| t < v);
        if pile == tails.len() {
            tails.push(v);
        } else {
            tails[pile] = v;
        }
    }

    tails.len()
}

// ============================================================================
//  Max profit
// ============================================================================

/// Ranges at or below this length are solved by brute force.
pub const MAX_PROFIT_BRUTE_FORCE_CUTOFF: usize = 7;

/// Best `prices[j] - prices[i]` over `i < j`, by divide and conquer.
///
/// The answer is negative when prices only fall. Differences saturate at
/// the `i64` bounds. Returns `None` for fewer than two prices.
#[must_use]
pub fn max_profit_divide_and_conquer(prices: &[i64]) -> Option<i64> {
    (prices.len() >= 2).then(|| max_profit_rec(prices))
}

fn max_profit_rec(prices: &[i64]) -> i64 {
    if prices.len() <= MAX_PROFIT_BRUTE_FORCE_CUTOFF {
        return max_profit_brute_force(prices);
    }

    let (left, right) = prices.split_at(prices.len() / 2);
    let best_inside = max_profit_rec(left).max(max_profit_rec(right));

    // Both halves are non-empty, so min and max exist.
    let min_left = left.iter().copied().min().unwrap_or(i64::MAX);
    let max_right = right.iter().copied().max().unwrap_or(i64::MIN);

    best_inside.max(max_right.saturating_sub(min_left))
}

fn max_profit_brute_force(prices: &[i64]) -> i64 {
    let mut best = i64::MIN;
    for (i, &buy) in prices.iter().enumerate() {
        for &sell in &prices[i + 1..] {
            best = best.max(sell.saturating_sub(buy));
        }
    }
    best
}

/// Best `prices[j] - prices[i]` over `i < j`, single pass.
///
/// Same contract as [`max_profit_divide_and_conquer`].
#[must_use]
pub fn max_profit_linear(prices: &[i64]) -> Option<i64> {
    let (&first, rest) = prices.split_first()?;
    let mut min_so_far = first;
    let mut best: Option<i64> = None;

    for &price in rest {
        let profit = price.saturating_sub(min_so_far);
        best = Some(best.map_or(profit, |b| b.max(profit)));
        min_so_far = min_so_far.min(price);
    }

    best
}

// ============================================================================
//  Sum of two squares
// ============================================================================

/// Number of pairs `0 <= a <= b` with `a*a + b*b == n`, one square root per
/// candidate `a`.
#[must_use]
pub fn count_sum_of_two_squares_scan(n: u64) -> usize {
    if n < 2 {
        return 0;
    }

    (0..=(n / 2).isqrt())
        .filter(|&a| {
            let rest = n - a * a;
            let b = rest.isqrt();
            b * b == rest
        })
        .count()
}

/// Number of pairs `0 <= a <= b` with `a*a + b*b == n`, closing two
/// pointers from `0` and `sqrt(n)`.
#[must_use]
pub fn count_sum_of_two_squares_two_pointer(n: u64) -> usize {
    if n < 2 {
        return 0;
    }

    let mut lo = 0u64;
    let mut hi = n.isqrt();
    let mut count = 0;

    while lo <= hi {
        match squares_cmp(lo, hi, n) {
            std::cmp::Ordering::Equal => {
                count += 1;
                lo += 1;
                // lo <= hi and hi > 0 whenever sum == n >= 2.
                hi -= 1;
            }
            std::cmp::Ordering::Less => lo += 1,
            std::cmp::Ordering::Greater => hi -= 1,
        }
    }

    count
}

/// `lo*lo + hi*hi` against `n`. The sum reaches `2n`, so it is taken in `u128`.
fn squares_cmp(lo: u64, hi: u64, n: u64) -> std::cmp::Ordering {
    let sum = u128::from(lo * lo) + u128::from(hi * hi);
    sum.cmp(&u128::from(n))
}

// ============================================================================
//  Set intersection
// ============================================================================

/// Distinct values present in both inputs, through a `BTreeSet`.
#[must_use]
pub fn intersection_count_btree<T: Ord>(a: &[T], b: &[T]) -> usize {
    let left: BTreeSet<&T> = a.iter().collect();
    let right: BTreeSet<&T> = b.iter().collect();
    right.iter().filter(|v| left.contains(*v)).count()
}

/// Distinct values present in both inputs, through a `HashSet`.
#[must_use]
pub fn intersection_count_hash<T: Eq + Hash>(a: &[T], b: &[T]) -> usize {
    let left: HashSet<&T> = a.iter().collect();
    let right: HashSet<&T> = b.iter().collect();
    right.iter().filter(|v| left.contains(*v)).count()
}

/// Distinct values present in both inputs, by sorting both in place and
/// walking them together.
pub fn intersection_count_sorted<T: Ord>(a: &mut [T], b: &mut [T]) -> usize {
    a.sort_unstable();
    b.sort_unstable();

    let (mut i, mut j, mut count) = (0, 0, 0);
    while i < a.len() && j < b.len() {
        match a[i].cmp(&b[j]) {
            std::cmp::Ordering::Less => i += 1,
            std::cmp::Ordering::Greater => j += 1,
            std::cmp::Ordering::Equal => {
                count += 1;
                let value = &a[i];
                while i < a.len() && a[i] == *value {
                    i += 1;
                }
                while j < b.len() && b[j] == *value {
                    j += 1;
                }
            }
        }
    }

    count
}

// ============================================================================
//  Prime counting
// ============================================================================

/// Segment length of [`count_primes_segmented`], sized to stay in L1.
pub const PRIME_SEGMENT_SIZE: usize = 32 * 1024;

/// `is_prime[i]` for every `i <= n`.
fn sieve(n: usize) -> Vec<bool> {
    let mut is_prime = vec![true; n + 1];
    is_prime[0] = false;
    if n >= 1 {
        is_prime[1] = false;
    }

    let mut p = 2;
    while p * p <= n {
        if is_prime[p] {
            for multiple in (p * p..=n).step_by(p) {
                is_prime[multiple] = false;
            }
        }
        p += 1;
    }

    is_prime
}

/// Number of primes `<= n`, sieving the whole range at once.
#[must_use]
pub fn count_primes(n: usize) -> usize {
    if n < 2 {
        return 0;
    }
    sieve(n).into_iter().filter(|&p| p).count()
}

/// Number of primes `<= n`, sieving [`PRIME_SEGMENT_SIZE`] values at a time
/// with the base primes up to `sqrt(n)`.
#[must_use]
pub fn count_primes_segmented(n: usize) -> usize {
    if n < 2 {
        return 0;
    }

    let root = n.isqrt();
    let base = sieve(root);
    let primes: Vec<usize> = (2..=root).filter(|&p| base[p]).collect();
    let mut next_multiple: Vec<usize> = primes.iter().map(|&p| p * p).collect();

    let mut segment = vec![true; PRIME_SEGMENT_SIZE];
    let mut count = 0;
    let mut low = 2;

    while low <= n {
        let high = n.min(low + PRIME_SEGMENT_SIZE - 1);
        let window = &mut segment[..=high - low];
        window.fill(true);

        for (&p, multiple) in primes.iter().zip(next_multiple.iter_mut()) {
            while *multiple <= high {
                window[*multiple - low] = false;
                *multiple += p;
            }
        }

        count += window.iter().filter(|&&p| p).count();
        low = high + 1;
    }

    count
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lis() {
        let cases: [(&[i64], usize); 6] = [
            (&[], 0),
            (&[4], 1),
            (&[3, 3, 3], 1),
            (&[5, 4, 3, 2, 1], 1),
            (&[10, 9, 2, 5, 3, 7, 101, 18], 4),
            (&[0, 8, 4, 12, 2, 10, 6, 14, 1, 9, 5, 13, 3, 11, 7, 15], 6),
        ];
        for (input, expected) in cases {
            assert_eq!(lis_quadratic(input), expected, "{input:?}");
            assert_eq!(lis_patience(input), expected, "{input:?}");
        }
    }

    #[test]
    fn test_max_profit_small() {
        assert_eq!(max_profit_linear(&[]), None);
        assert_eq!(max_profit_linear(&[3]), None);
        assert_eq!(max_profit_divide_and_conquer(&[3]), None);
        assert_eq!(max_profit_linear(&[3, 8]), Some(5));
        assert_eq!(max_profit_linear(&[8, 3]), Some(-5));
        assert_eq!(max_profit_divide_and_conquer(&[8, 3]), Some(-5));
    }

    #[test]
    fn test_max_profit_crosses_midpoint() {
        let mut prices = vec![50i64; 40];
        prices[5] = 1;
        prices[33] = 99;
        assert_eq!(max_profit_divide_and_conquer(&prices), Some(98));
        assert_eq!(max_profit_linear(&prices), Some(98));
    }

    #[test]
    fn test_max_profit_strictly_falling() {
        let prices: Vec<i64> = (0..30).rev().map(|x| x * 3).collect();
        assert_eq!(max_profit_divide_and_conquer(&prices), Some(-3));
        assert_eq!(max_profit_linear(&prices), Some(-3));
    }

    #[test]
    fn test_max_profit_variants_agree() {
        let mut state = 5u64;
        for len in 2..60 {
            let prices: Vec<i64> = (0..len)
                .map(|_| {
                    state = state
                        .wrapping_mul(6_364_136_223_846_793_005)
                        .wrapping_add(1);
                    (state >> 40) as i64 % 500
                })
                .collect();
            assert_eq!(
                max_profit_divide_and_conquer(&prices),
                max_profit_linear(&prices),
                "{prices:?}"
            );
        }
    }

    #[test]
    fn test_two_squares() {
        // 0 = 0+0, 1 = 0+1 are below the cutoff; 2 = 1+1; 25 = 0+25 = 9+16;
        // 50 = 1+49 = 25+25; 325 = 1+324 = 36+289 = 100+225.
        for (n, expected) in [(0, 0), (1, 0), (2, 1), (3, 0), (25, 2), (50, 2), (325, 3)] {
            assert_eq!(count_sum_of_two_squares_scan(n), expected, "scan {n}");
            assert_eq!(count_sum_of_two_squares_two_pointer(n), expected, "two-pointer {n}");
        }
    }

    #[test]
    fn test_two_squares_variants_agree() {
        for n in 0..3000 {
            assert_eq!(
                count_sum_of_two_squares_scan(n),
                count_sum_of_two_squares_two_pointer(n),
                "{n}"
            );
        }
    }

    #[test]
    fn test_squares_cmp_does_not_overflow() {
        let top = u64::MAX.isqrt();
        assert_eq!(squares_cmp(top, top, u64::MAX - 1), std::cmp::Ordering::Greater);
        assert_eq!(squares_cmp(0, top, u64::MAX), std::cmp::Ordering::Less);
        assert_eq!(squares_cmp(top, top, u64::MAX), std::cmp::Ordering::Greater);
        assert_eq!(
            squares_cmp(1 << 31, 1 << 31, 1 << 63),
            std::cmp::Ordering::Equal
        );
    }

    /// Walks about `2^32` candidates - run with --ignored
    #[test]
    #[ignore]
    fn test_two_squares_near_u64_max() {
        // 2^64 - 2 = 2 * (2^63 - 1), and 127 divides 2^63 - 1 exactly once.
        assert_eq!(count_sum_of_two_squares_two_pointer(u64::MAX - 1), 0);
        assert_eq!(count_sum_of_two_squares_scan(u64::MAX - 1), 0);
        // 2^63 = (2^31)^2 + (2^31)^2 and nothing else.
        assert_eq!(count_sum_of_two_squares_two_pointer(1 << 63), 1);
        assert_eq!(count_sum_of_two_squares_scan(1 << 63), 1);
    }

    #[test]
    fn test_intersection_counts_distinct_values() {
        let a = [1, 2, 2, 3, 7, 7, 9];
        let b = [2, 2, 7, 8, 9, 9, 10];
        assert_eq!(intersection_count_btree(&a, &b), 3);
        assert_eq!(intersection_count_hash(&a, &b), 3);

        let (mut a2, mut b2) = (a.to_vec(), b.to_vec());
        assert_eq!(intersection_count_sorted(&mut a2, &mut b2), 3);

        let empty: [i32; 0] = [];
        assert_eq!(intersection_count_hash(&a, &empty), 0);
    }

    #[test]
    fn test_prime_counts() {
        for (n, expected) in [(0, 0), (1, 0), (2, 1), (3, 2), (10, 4), (100, 25), (1000, 168)] {
            assert_eq!(count_primes(n), expected, "simple {n}");
            assert_eq!(count_primes_segmented(n), expected, "segmented {n}");
        }
    }

    #[test]
    fn test_segmented_spans_several_segments() {
        // pi(10^6) = 78_498.
        assert_eq!(count_primes_segmented(1_000_000), 78_498);
        assert_eq!(count_primes(1_000_000), 78_498);

        let edge = PRIME_SEGMENT_SIZE * 3 + 1;
        assert_eq!(count_primes_segmented(edge), count_primes(edge));
    }
}
