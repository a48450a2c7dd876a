//! Cycle detection for iterated functions.
//!
//! Iterating any `f: T -> T` over a finite domain from `x0` eventually
//! repeats: the sequence is a tail of `mu` distinct values followed by a
//! cycle of `lambda` values. All three detectors report the first value on
//! the cycle together with `lambda`.
//!
//! | Detector | Extra memory | Evaluations of `f` |
//! |----------|--------------|--------------------|
//! | [`floyd`] | O(1) | ~ 3(mu + lambda) |
//! | [`brent`] | O(1) | ~ 2(mu + lambda) |
//! | [`hashing`] | O(mu + lambda) | mu + 2 lambda |

use std::collections::HashSet;
use std::hash::Hash;

use rand::Rng;

/// Where the cycle of an iterated function starts, and how long it is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FunctionCycle<T> {
    /// First value of `x0, f(x0), ...` lying on the cycle.
    pub start: T,
    /// Number of distinct values on the cycle, at least 1.
    pub length: usize,
}

/// Floyd's tortoise and hare.
pub fn floyd<T, F>(f: F, x0: T) -> FunctionCycle<T>
where
    T: Copy + Eq,
    F: Fn(T) -> T,
{
    let mut tortoise = f(x0);
    let mut hare = f(f(x0));
    while tortoise != hare {
        tortoise = f(tortoise);
        hare = f(f(hare));
    }

    // The meeting point is a multiple of lambda steps from x0.
    tortoise = x0;
    while tortoise != hare {
        tortoise = f(tortoise);
        hare = f(hare);
    }
    let start = tortoise;

    let mut length = 1;
    hare = f(start);
    while hare != start {
        hare = f(hare);
        length += 1;
    }

    FunctionCycle { start, length }
}

/// Brent's algorithm: the tortoise teleports to the hare at every power of
/// two, so `lambda` falls out of the first search directly.
pub fn brent<T, F>(f: F, x0: T) -> FunctionCycle<T>
where
    T: Copy + Eq,
    F: Fn(T) -> T,
{
    let mut power = 1usize;
    let mut length = 1usize;
    let mut tortoise = x0;
    let mut hare = f(x0);

    while tortoise != hare {
        if power == length {
            tortoise = hare;
            power *= 2;
            length = 0;
        }
        hare = f(hare);
        length += 1;
    }

    // Keep the hare exactly lambda steps ahead; they meet at the start.
    tortoise = x0;
    hare = x0;
    for _ in 0..length {
        hare = f(hare);
    }
    while tortoise != hare {
        tortoise = f(tortoise);
        hare = f(hare);
    }

    FunctionCycle {
        start: tortoise,
        length,
    }
}

/// Remember every visited value. The first repeat is the cycle start.
pub fn hashing<T, F>(f: F, x0: T) -> FunctionCycle<T>
where
    T: Copy + Eq + Hash,
    F: Fn(T) -> T,
{
    let mut seen = HashSet::new();
    let mut x = x0;
    while seen.insert(x) {
        x = f(x);
    }
    let start = x;

    let mut length = 1;
    x = f(start);
    while x != start {
        x = f(x);
        length += 1;
    }

    FunctionCycle { start, length }
}

// ============================================================================
//  ModularAffine
// ============================================================================

/// `x -> (a * x + b) mod m`, with every operand reduced mod `m` first.
///
/// The product is formed in `u128`, so any `u64` parameters are safe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModularAffine {
    a: u64,
    b: u64,
    m: u64,
}

impl ModularAffine {
    /// # Panics
    ///
    /// Panics if `m == 0`.
    #[must_use]
    pub fn new(a: u64, b: u64, m: u64) -> Self {
        assert!(m > 0, "modulus must be positive");
        Self {
            a: a % m,
            b: b % m,
            m,
        }
    }

    /// Draw `a` and `b` from `0..bound` and `m` from `1..bound`.
    ///
    /// # Panics
    ///
    /// Panics if `bound < 2`.
    #[must_use]
    pub fn random<R: Rng + ?Sized>(rng: &mut R, bound: u64) -> Self {
        assert!(bound >= 2, "bound must be at least 2, got {bound}");
        Self::new(
            rng.gen_range(0..bound),
            rng.gen_range(0..bound),
            rng.gen_range(1..bound),
        )
    }

    /// Modulus; every output lies in `0..m`.
    #[must_use]
    pub const fn modulus(&self) -> u64 {
        self.m
    }

    /// Evaluate the function at `x`.
    #[inline]
    #[must_use]
    #[expect(clippy::cast_possible_truncation, reason = "result is below m")]
    pub const fn apply(&self, x: u64) -> u64 {
        let m = self.m as u128;
        let ax = (self.a as u128 * (x % self.m) as u128) % m;
        ((ax + self.b as u128) % m) as u64
    }
}
