//! Shared helpers for integration tests.
//!
//! # Usage
//!
//! ```rust,ignore
//! mod common;
//!
//! #[test]
//! fn my_test() {
//!     common::init_tracing();
//!     // ... test code
//! }
//! ```
//!
//! Library events only reach the subscriber when the crate is built with
//! `--features tracing`. Output goes through the test writer, so it is
//! captured per test and shown for failures only.
//!
//! `RUST_LOG` filters as usual (default `algolab=info`).

#![allow(dead_code)]

use std::sync::Once;

use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::format::FmtSpan;

static INIT: Once = Once::new();

/// Install a per-test subscriber once for the whole test binary.
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("algolab=info"));

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .with_thread_ids(true)
            .with_span_events(FmtSpan::CLOSE)
            .compact()
            .try_init();
    });
}

/// Deterministic RNG for a test, seeded from `ALGOLAB_TEST_SEED` when set.
pub fn rng(default_seed: u64) -> StdRng {
    let seed = std::env::var("ALGOLAB_TEST_SEED")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(default_seed);
    tracing::info!(seed, "test rng");
    StdRng::seed_from_u64(seed)
}

/// Number of stress iterations, scaled by `ALGOLAB_STRESS_SCALE` (default 1).
pub fn stress_iterations(base: usize) -> usize {
    let scale = std::env::var("ALGOLAB_STRESS_SCALE")
        .ok()
        .and_then(|s| s.parse::<usize>().ok())
        .unwrap_or(1);
    base * scale.max(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tracing_init() {
        init_tracing();
        init_tracing();
        tracing::info!("Tracing initialized successfully");
    }
}
