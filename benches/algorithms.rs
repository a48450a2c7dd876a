//! Competing versions of the small textbook algorithms.
//!
//! Run with: `cargo bench --bench algorithms`


use algolab::algorithms::{
    count_primes, count_primes_segmented, count_sum_of_two_squares_scan,
    count_sum_of_two_squares_two_pointer, intersection_count_btree, intersection_count_hash,
    intersection_count_sorted, lis_patience, lis_quadratic, max_profit_divide_and_conquer,
    max_profit_linear,
};
use bench_utils::{price_walk, random_i64s, random_u64s};
use divan::{Bencher, black_box};

fn main() {
    divan::main();
}

// =============================================================================
// Longest increasing subsequence
// =============================================================================

#[divan::bench_group]
mod lis {
    use super::{Bencher, black_box, lis_patience, lis_quadratic, random_i64s};

    #[divan::bench(args = [100, 1_000, 5_000])]
    fn quadratic(bencher: Bencher, n: usize) {
        let values = random_i64s(n, 1 << 20, 42);
        bencher.bench_local(|| lis_quadratic(black_box(&values)));
    }

    #[divan::bench(args = [100, 1_000, 5_000, 100_000])]
    fn patience(bencher: Bencher, n: usize) {
        let values = random_i64s(n, 1 << 20, 42);
        bencher.bench_local(|| lis_patience(black_box(&values)));
    }
}

// =============================================================================
// Maximum single-trade profit
// =============================================================================

#[divan::bench_group]
mod max_profit {
    use super::{
        Bencher, black_box, max_profit_divide_and_conquer, max_profit_linear, price_walk,
    };

    #[divan::bench(args = [1_000, 100_000])]
    fn divide_and_conquer(bencher: Bencher, n: usize) {
        let prices = price_walk(n, 42);
        bencher.bench_local(|| max_profit_divide_and_conquer(black_box(&prices)));
    }

    #[divan::bench(args = [1_000, 100_000])]
    fn linear(bencher: Bencher, n: usize) {
        let prices = price_walk(n, 42);
        bencher.bench_local(|| max_profit_linear(black_box(&prices)));
    }
}

// =============================================================================
// Sums of two squares
// =============================================================================

#[divan::bench_group]
mod two_squares {
    use super::{
        Bencher, black_box, count_sum_of_two_squares_scan, count_sum_of_two_squares_two_pointer,
    };

    const N: [u64; 3] = [1 << 20, 1 << 30, 1 << 40];

    #[divan::bench(args = N)]
    fn scan(bencher: Bencher, n: u64) {
        bencher.bench_local(|| count_sum_of_two_squares_scan(black_box(n)));
    }

    #[divan::bench(args = N)]
    fn two_pointer(bencher: Bencher, n: u64) {
        bencher.bench_local(|| count_sum_of_two_squares_two_pointer(black_box(n)));
    }
}

// =============================================================================
// Intersection size
// =============================================================================

#[divan::bench_group]
mod intersection {
    use super::{
        Bencher, black_box, intersection_count_btree, intersection_count_hash,
        intersection_count_sorted, random_u64s,
    };

    const N: usize = 100_000;

    fn inputs() -> (Vec<u64>, Vec<u64>) {
        let bound = (N * 4) as u64;
        (random_u64s(N, bound, 1), random_u64s(N, bound, 2))
    }

    #[divan::bench]
    fn btree(bencher: Bencher) {
        let (a, b) = inputs();
        bencher.bench_local(|| intersection_count_btree(black_box(&a), black_box(&b)));
    }

    #[divan::bench]
    fn hash(bencher: Bencher) {
        let (a, b) = inputs();
        bencher.bench_local(|| intersection_count_hash(black_box(&a), black_box(&b)));
    }

    #[divan::bench]
    fn sort_and_merge(bencher: Bencher) {
        let inputs = inputs();
        bencher
            .with_inputs(|| inputs.clone())
            .bench_local_refs(|(a, b)| intersection_count_sorted(black_box(a), black_box(b)));
    }
}

// =============================================================================
// Prime counting
// =============================================================================

#[divan::bench_group]
mod primes {
    use super::{Bencher, black_box, count_primes, count_primes_segmented};

    const N: [usize; 3] = [100_000, 10_000_000, 100_000_000];

    #[divan::bench(args = N)]
    fn full_sieve(bencher: Bencher, n: usize) {
        bencher.bench_local(|| count_primes(black_box(n)));
    }

    #[divan::bench(args = N)]
    fn segmented(bencher: Bencher, n: usize) {
        bencher.bench_local(|| count_primes_segmented(black_box(n)));
    }
}
