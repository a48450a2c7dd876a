//! Shortest-path cross-check driver.
//!
//! Generates random connected DAGs, verifies that the three shortest-path
//! strategies agree on every sampled pair, and prints per-strategy timings.
//! Exits non-zero on bad arguments, a disconnected graph or a disagreement.
//!
//! Run with:
//! ```bash
//! cargo run --release -- [vertices] [rounds] [seed]
//!
//! # With structured logs in logs/algolab.jsonl
//! RUST_LOG=algolab=debug cargo run --release --features tracing -- 200 2 7
//! ```

#![allow(clippy::cast_precision_loss)]

use std::fmt as StdFmt;
use std::process::ExitCode;
use std::time::{Duration, Instant};

use algolab::graph::{DagGenerator, vertex_labels};
use algolab::{Dag, GraphError, ShortestPathAlgorithm};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const USAGE: &str = "usage: algolab [vertices] [rounds] [seed]";

/// Random pairs checked per round, on top of first -> last label.
const SAMPLED_PAIRS: usize = 32;

// =============================================================================
// Configuration
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct DriverConfig {
    vertices: usize,
    rounds: usize,
    seed: u64,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            vertices: 300,
            rounds: 5,
            seed: 42,
        }
    }
}

impl DriverConfig {
    /// Positional `[vertices] [rounds] [seed]`, each optional.
    fn from_args<I: IntoIterator<Item = String>>(args: I) -> Result<Self, DriverError> {
        let mut config = Self::default();
        let mut args = args.into_iter();

        if let Some(v) = args.next() {
            config.vertices = parse_arg("vertices", &v)?;
        }
        if let Some(r) = args.next() {
            config.rounds = parse_arg("rounds", &r)?;
        }
        if let Some(s) = args.next() {
            config.seed = parse_arg("seed", &s)?;
        }
        if let Some(extra) = args.next() {
            return Err(DriverError::Usage(format!("unexpected argument '{extra}'")));
        }
        if config.vertices < 2 {
            return Err(DriverError::Usage("vertices must be at least 2".to_string()));
        }

        Ok(config)
    }
}

fn parse_arg<T: std::str::FromStr>(name: &str, raw: &str) -> Result<T, DriverError> {
    raw.parse()
        .map_err(|_| DriverError::Usage(format!("invalid {name} '{raw}'")))
}

// =============================================================================
// Errors
// =============================================================================

#[derive(Debug)]
enum DriverError {
    Usage(String),
    Graph(GraphError),
    Disconnected {
        round: usize,
    },
    Disagreement {
        round: usize,
        src: String,
        dest: String,
        results: Vec<(ShortestPathAlgorithm, Option<u64>)>,
    },
}

impl StdFmt::Display for DriverError {
    fn fmt(&self, f: &mut StdFmt::Formatter<'_>) -> StdFmt::Result {
        match self {
            Self::Usage(msg) => write!(f, "{msg}\n{USAGE}"),
            Self::Graph(e) => write!(f, "graph error: {e}"),
            Self::Disconnected { round } => {
                write!(f, "round {round}: generated graph is not connected")
            }
            Self::Disagreement {
                round,
                src,
                dest,
                results,
            } => {
                write!(f, "round {round}: strategies disagree on {src} -> {dest}:")?;
                for (algo, distance) in results {
                    write!(f, " {algo}={distance:?}")?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for DriverError {}

impl From<GraphError> for DriverError {
    fn from(e: GraphError) -> Self {
        Self::Graph(e)
    }
}

impl DriverError {
    const fn exit_code(&self) -> u8 {
        match self {
            Self::Usage(_) => 1,
            Self::Graph(_) | Self::Disconnected { .. } | Self::Disagreement { .. } => 2,
        }
    }
}

// =============================================================================
// Rounds
// =============================================================================

/// Accumulated wall time per strategy, in `ShortestPathAlgorithm::ALL` order.
#[derive(Debug, Default)]
struct Timings {
    total: [Duration; 3],
    queries: usize,
}

fn run_round(
    round: usize,
    config: &DriverConfig,
    rng: &mut StdRng,
    timings: &mut Timings,
) -> Result<(), DriverError> {
    let labels = vertex_labels(config.vertices, rng);
    let dag = DagGenerator::default().generate(&labels, rng)?;

    if !dag.is_connected()? {
        return Err(DriverError::Disconnected { round });
    }

    let mut pairs: Vec<(usize, usize)> = vec![(0, labels.len() - 1)];
    pairs.extend((0..SAMPLED_PAIRS).map(|_| {
        (
            rng.gen_range(0..labels.len()),
            rng.gen_range(0..labels.len()),
        )
    }));

    let mut reachable = 0;
    for (s, d) in pairs {
        let (src, dest) = (&labels[s], &labels[d]);
        let results = query_all(&dag, src, dest, timings)?;
        timings.queries += 1;

        let first = results[0].1;
        if results.iter().any(|&(_, r)| r != first) {
            return Err(DriverError::Disagreement {
                round,
                src: src.clone(),
                dest: dest.clone(),
                results,
            });
        }
        reachable += usize::from(first.is_some());
    }

    println!(
        "round {round}: {} vertices, {} edges, {}/{} sampled pairs reachable, {} -> {} = {:?}",
        dag.vertex_count(),
        dag.edge_count(),
        reachable,
        SAMPLED_PAIRS + 1,
        labels[0],
        labels[labels.len() - 1],
        dag.shortest_path(&labels[0], &labels[labels.len() - 1], ShortestPathAlgorithm::Dijkstra)?,
    );
    Ok(())
}

fn query_all(
    dag: &Dag,
    src: &str,
    dest: &str,
    timings: &mut Timings,
) -> Result<Vec<(ShortestPathAlgorithm, Option<u64>)>, GraphError> {
    ShortestPathAlgorithm::ALL
        .iter()
        .zip(timings.total.iter_mut())
        .map(|(&algo, total)| {
            let start = Instant::now();
            let distance = dag.shortest_path(src, dest, algo)?;
            *total += start.elapsed();
            Ok((algo, distance))
        })
        .collect()
}

fn print_timings(timings: &Timings) {
    println!("\n{}", "=".repeat(60));
    println!("{:<16} {:>14} {:>14}", "strategy", "total", "per query");
    println!("{}", "=".repeat(60));

    let queries = timings.queries.max(1) as f64;
    for (algo, total) in ShortestPathAlgorithm::ALL.iter().zip(timings.total) {
        let per_query = Duration::from_secs_f64(total.as_secs_f64() / queries);
        println!("{:<16} {:>14?} {:>14?}", algo.name(), total, per_query);
    }
}

fn run(config: &DriverConfig) -> Result<(), DriverError> {
    println!(
        "algolab: {} vertices, {} rounds, seed {}",
        config.vertices, config.rounds, config.seed
    );

    let mut rng = StdRng::seed_from_u64(config.seed);
    let mut timings = Timings::default();
    for round in 1..=config.rounds {
        run_round(round, config, &mut rng, &mut timings)?;
    }

    print_timings(&timings);
    println!("\nall strategies agree on {} queries", timings.queries);
    Ok(())
}

// =============================================================================
// Main
// =============================================================================

fn main() -> ExitCode {
    #[cfg(feature = "tracing")]
    algolab::init_tracing();

    let result = DriverConfig::from_args(std::env::args().skip(1)).and_then(|config| run(&config));

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::from(e.exit_code())
        }
    }
}
