//! Latch Contention Profiling Binary
//!
//! Measures wake-up latency of [`CountDownLatch`] (parking) against
//! [`SpinLatch`] (busy-wait) with a growing number of waiters. A watchdog
//! reports any waiter that stops making progress, which is how an
//! oversubscribed spin latch shows up.
//!
//! Run with:
//! ```bash
//! # Without tracing (fast, just stats)
//! cargo run --release --bin latch_contention
//!
//! # With tracing (writes to logs/latch_contention.json)
//! RUST_LOG=latch_contention=warn cargo run --release --features tracing --bin latch_contention
//!
//! # View slow wake-ups:
//! rg "SLOW_WAKE" logs/latch_contention.json
//! ```

#![allow(clippy::unwrap_used)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_precision_loss)]

use algolab::sync::{CountDownLatch, SpinLatch};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::thread;
use std::time::{Duration, Instant};

#[cfg(feature = "tracing")]
type TracingGuard = tracing_appender::non_blocking::WorkerGuard;

#[cfg(not(feature = "tracing"))]
type TracingGuard = ();

/// Wake-ups slower than this are logged individually.
const SLOW_WAKE_NS: u64 = 10_000_000;

/// A waiter silent for this long is reported by the watchdog.
const STALL_TIMEOUT_MS: u64 = 2_000;

// =============================================================================
// Custom Tracing Initialization (JSON to file)
// =============================================================================

#[cfg(feature = "tracing")]
fn init_json_tracing() -> TracingGuard {
    use tracing_subscriber::{EnvFilter, Layer, layer::SubscriberExt, util::SubscriberInitExt};

    let log_dir = "logs";
    let filter_str =
        std::env::var("RUST_LOG").unwrap_or_else(|_| "latch_contention=warn".to_string());

    let _ = std::fs::create_dir_all(log_dir);

    let file_appender = tracing_appender::rolling::never(log_dir, "latch_contention.json");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking)
        .with_thread_ids(true)
        .with_target(true)
        .with_ansi(false)
        .json()
        .with_filter(EnvFilter::try_new(&filter_str).unwrap_or_else(|_| EnvFilter::new("warn")));

    let _ = tracing_subscriber::registry().with(file_layer).try_init();

    println!("Tracing enabled: logs/latch_contention.json (filter: {filter_str})");

    guard
}

#[cfg(not(feature = "tracing"))]
fn init_json_tracing() -> TracingGuard {
    println!("Tracing disabled (compile with --features tracing)");
}

// =============================================================================
// Latch abstraction
// =============================================================================

trait Latch: Send + Sync + 'static {
    const NAME: &'static str;

    fn with_count(count: usize) -> Self;
    fn count_down(&self);
    fn wait(&self);
    fn wait_for(&self, timeout: Duration) -> bool;
}

impl Latch for CountDownLatch {
    const NAME: &'static str = "CountDownLatch";

    fn with_count(count: usize) -> Self {
        Self::new(count)
    }
    fn count_down(&self) {
        Self::count_down(self);
    }
    fn wait(&self) {
        Self::wait(self);
    }
    fn wait_for(&self, timeout: Duration) -> bool {
        Self::wait_for(self, timeout)
    }
}

impl Latch for SpinLatch {
    const NAME: &'static str = "SpinLatch";

    fn with_count(count: usize) -> Self {
        Self::new(count)
    }
    fn count_down(&self) {
        Self::count_down(self);
    }
    fn wait(&self) {
        Self::wait(self);
    }
    fn wait_for(&self, timeout: Duration) -> bool {
        Self::wait_for(self, timeout)
    }
}

// =============================================================================
// Thread progress tracking for stall detection
// =============================================================================

struct ThreadProgress {
    /// Round each waiter is currently in
    current_round: Vec<AtomicUsize>,
    /// Last time each waiter made progress
    last_progress_ms: Vec<AtomicU64>,
    /// Whether each waiter is done
    done: Vec<AtomicBool>,
    start: Instant,
}

impl ThreadProgress {
    fn new(num_threads: usize) -> Self {
        Self {
            current_round: (0..num_threads).map(|_| AtomicUsize::new(0)).collect(),
            last_progress_ms: (0..num_threads).map(|_| AtomicU64::new(0)).collect(),
            done: (0..num_threads).map(|_| AtomicBool::new(false)).collect(),
            start: Instant::now(),
        }
    }

    fn update(&self, thread_id: usize, round: usize) {
        self.current_round[thread_id].store(round, Ordering::Relaxed);
        self.last_progress_ms[thread_id]
            .store(self.start.elapsed().as_millis() as u64, Ordering::Relaxed);
    }

    fn mark_done(&self, thread_id: usize) {
        self.done[thread_id].store(true, Ordering::Relaxed);
    }

    /// `(thread, round, stalled_ms)` for every waiter silent past `timeout_ms`.
    fn report_stuck(&self, timeout_ms: u64) -> Vec<(usize, usize, u64)> {
        let now_ms = self.start.elapsed().as_millis() as u64;

        (0..self.done.len())
            .filter(|&i| !self.done[i].load(Ordering::Relaxed))
            .filter_map(|i| {
                let last = self.last_progress_ms[i].load(Ordering::Relaxed);
                let stalled = now_ms.saturating_sub(last);
                (stalled > timeout_ms).then(|| {
                    (i, self.current_round[i].load(Ordering::Relaxed), stalled)
                })
            })
            .collect()
    }

    fn all_done(&self) -> bool {
        self.done.iter().all(|d| d.load(Ordering::Relaxed))
    }
}

// =============================================================================
// Wake-up Stats (Thread-Local + Aggregation)
// =============================================================================

#[derive(Default, Clone, Copy)]
struct WakeStats {
    wakes: u64,
    total_ns: u64,
    max_ns: u64,
    slow_1ms: u64,
    slow_10ms: u64,
    slow_100ms: u64,
}

impl WakeStats {
    const fn record(&mut self, ns: u64) {
        self.wakes += 1;
        self.total_ns += ns;
        if ns > self.max_ns {
            self.max_ns = ns;
        }
        if ns > 1_000_000 {
            self.slow_1ms += 1;
        }
        if ns > 10_000_000 {
            self.slow_10ms += 1;
        }
        if ns > 100_000_000 {
            self.slow_100ms += 1;
        }
    }

    const fn merge(&mut self, other: &Self) {
        self.wakes += other.wakes;
        self.total_ns += other.total_ns;
        if other.max_ns > self.max_ns {
            self.max_ns = other.max_ns;
        }
        self.slow_1ms += other.slow_1ms;
        self.slow_10ms += other.slow_10ms;
        self.slow_100ms += other.slow_100ms;
    }

    fn mean_us(&self) -> f64 {
        if self.wakes == 0 {
            0.0
        } else {
            self.total_ns as f64 / self.wakes as f64 / 1_000.0
        }
    }
}

// =============================================================================
// Runner
// =============================================================================

struct RunConfig {
    waiters: usize,
    rounds: usize,
}

struct RunResult {
    elapsed: Duration,
    stats: WakeStats,
    timeouts: usize,
}

/// Every round the main thread opens a gate latch; each waiter measures how
/// long after the release it woke, then counts down the round's done latch.
fn run_latch<L: Latch>(config: &RunConfig) -> RunResult {
    let waiters = config.waiters;
    let rounds = config.rounds;

    let gates: Arc<Vec<L>> = Arc::new((0..rounds).map(|_| L::with_count(1)).collect());
    let dones: Arc<Vec<L>> = Arc::new((0..rounds).map(|_| L::with_count(waiters)).collect());
    let released_at: Arc<Vec<AtomicU64>> =
        Arc::new((0..rounds).map(|_| AtomicU64::new(0)).collect());

    let progress = Arc::new(ThreadProgress::new(waiters));
    let stop_watchdog = Arc::new(AtomicBool::new(false));
    let base = Instant::now();

    let watchdog = {
        let progress = Arc::clone(&progress);
        let stop = Arc::clone(&stop_watchdog);
        thread::spawn(move || {
            while !stop.load(Ordering::Relaxed) {
                thread::sleep(Duration::from_millis(500));
                for (tid, round, stall_ms) in progress.report_stuck(STALL_TIMEOUT_MS) {
                    eprintln!("!!! STUCK: {} waiter {tid} in round {round} for {stall_ms}ms", L::NAME);
                }
                if progress.all_done() {
                    break;
                }
            }
        })
    };

    let handles: Vec<_> = (0..waiters)
        .map(|t| {
            let gates = Arc::clone(&gates);
            let dones = Arc::clone(&dones);
            let released_at = Arc::clone(&released_at);
            let progress = Arc::clone(&progress);

            thread::spawn(move || {
                let mut stats = WakeStats::default();
                for round in 0..rounds {
                    progress.update(t, round);
                    gates[round].wait();

                    let woke = base.elapsed().as_nanos() as u64;
                    let wake_ns = woke.saturating_sub(released_at[round].load(Ordering::Relaxed));
                    stats.record(wake_ns);

                    if wake_ns > SLOW_WAKE_NS {
                        #[cfg(feature = "tracing")]
                        tracing::warn!(
                            latch = L::NAME,
                            thread = t,
                            round,
                            wake_ms = wake_ns as f64 / 1_000_000.0,
                            "SLOW_WAKE"
                        );

                        #[cfg(not(feature = "tracing"))]
                        eprintln!(
                            "[T{t:02}] SLOW_WAKE: {} round {round} took {:.2}ms",
                            L::NAME,
                            wake_ns as f64 / 1_000_000.0
                        );
                    }

                    dones[round].count_down();
                }
                progress.mark_done(t);
                stats
            })
        })
        .collect();

    let start = Instant::now();
    let mut timeouts = 0;
    for round in 0..rounds {
        released_at[round].store(base.elapsed().as_nanos() as u64, Ordering::Relaxed);
        gates[round].count_down();
        if !dones[round].wait_for(Duration::from_millis(STALL_TIMEOUT_MS)) {
            timeouts += 1;
            dones[round].wait();
        }
    }
    let elapsed = start.elapsed();

    let mut merged = WakeStats::default();
    for h in handles {
        merged.merge(&h.join().unwrap());
    }

    stop_watchdog.store(true, Ordering::Relaxed);
    let _ = watchdog.join();

    RunResult {
        elapsed,
        stats: merged,
        timeouts,
    }
}

fn print_result(name: &str, config: &RunConfig, result: &RunResult) {
    let stats = &result.stats;
    println!(
        "{name:<15} waiters={:<3} rounds={:<5} elapsed={:>10.2?} mean={:>9.2}us max={:>9.2}us >1ms={:<4} >10ms={:<4} >100ms={:<4} timeouts={}",
        config.waiters,
        config.rounds,
        result.elapsed,
        stats.mean_us(),
        stats.max_ns as f64 / 1_000.0,
        stats.slow_1ms,
        stats.slow_10ms,
        stats.slow_100ms,
        result.timeouts,
    );
}

// =============================================================================
// Main
// =============================================================================

fn main() {
    let _guard = init_json_tracing();

    println!("Latch Contention Profiling");
    println!("==========================\n");

    let cores = thread::available_parallelism().map_or(4, std::num::NonZeroUsize::get);
    let mut waiter_counts = vec![1, 2, cores / 2, cores, cores * 2];
    waiter_counts.retain(|&w| w > 0);
    waiter_counts.sort_unstable();
    waiter_counts.dedup();

    for waiters in waiter_counts {
        let config = RunConfig {
            waiters,
            rounds: 2_000,
        };

        let blocking = run_latch::<CountDownLatch>(&config);
        print_result(CountDownLatch::NAME, &config, &blocking);

        let spinning = run_latch::<SpinLatch>(&config);
        print_result(SpinLatch::NAME, &config, &spinning);

        println!(
            "  spin/park elapsed ratio: {:.2}x\n",
            spinning.elapsed.as_secs_f64() / blocking.elapsed.as_secs_f64()
        );
    }
}
