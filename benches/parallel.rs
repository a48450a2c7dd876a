//! Sequential against fork-join on rayon's global pool.
//!
//! Run with: `cargo bench --bench parallel`

use algolab::parallel::{
    collatz_holds_fork_join, collatz_holds_parallel, collatz_holds_sequential,
    collatz_solvable_set, range_sum_fork_join, range_sum_sequential,
};
use divan::{Bencher, black_box};

fn main() {
    divan::main();
}

// =============================================================================
// Range sum: leaf size sweep
// =============================================================================

#[divan::bench_group]
mod range_sum {
    use super::{Bencher, black_box, range_sum_fork_join, range_sum_sequential};

    const TO: u64 = 50_000_000;

    #[divan::bench]
    fn sequential(bencher: Bencher) {
        bencher.bench_local(|| range_sum_sequential(1, black_box(TO)));
    }

    #[divan::bench(args = [1_000, 100_000, 1_000_000, 10_000_000])]
    fn fork_join(bencher: Bencher, threshold: u64) {
        bencher.bench_local(|| range_sum_fork_join(1, black_box(TO), threshold));
    }
}

// =============================================================================
// Collatz property over 3..=N
// =============================================================================

#[divan::bench_group]
mod collatz {
    use super::{
        Bencher, black_box, collatz_holds_fork_join, collatz_holds_parallel,
        collatz_holds_sequential, collatz_solvable_set,
    };

    const LAST: u64 = 2_000_000;

    #[divan::bench]
    fn sequential(bencher: Bencher) {
        bencher.bench_local(|| collatz_holds_sequential(black_box(LAST)));
    }

    #[divan::bench]
    fn par_iter(bencher: Bencher) {
        bencher.bench_local(|| collatz_holds_parallel(black_box(LAST)));
    }

    #[divan::bench]
    fn fork_join(bencher: Bencher) {
        bencher.bench_local(|| collatz_holds_fork_join(black_box(LAST)));
    }

    #[divan::bench(args = [10_000, 100_000])]
    fn memoised_set(bencher: Bencher, n: u64) {
        bencher.bench_local(|| collatz_solvable_set(black_box(n)));
    }
}
