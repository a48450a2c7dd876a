//! # `algolab`
//!
//! Classical algorithms and data structures, each shipped with two or three
//! interchangeable implementations and a micro-benchmark that compares them.
//!
//! Every module stands alone. Nothing is shared between them beyond the
//! logging macros and their own error types.
//!
//! | Module | Variants compared |
//! |--------|-------------------|
//! | [`heap`] | D-ary min-heap for any arity `d >= 2` |
//! | [`hash`] | Open addressing vs Robin Hood maps; FNV and universal hash functions |
//! | [`graph`] | Topological sort vs Dijkstra vs Floyd-Warshall on a weighted DAG |
//! | [`sort`] | Intrasort with guarded or sentinel insertion sort; heap sort |
//! | [`cycle`] | Floyd vs Brent vs hash-set cycle detection |
//! | [`search`] | Branchy vs branchless binary search; first occurrence |
//! | [`algorithms`] | LIS, max profit, two squares, set intersection, sieves |
//! | [`parallel`] | Sequential vs rayon fork-join range sum and Collatz checks |
//! | [`sync`] | Blocking vs spinning latch; optimistic read vs `RwLock` |
//!
//! ## Example
//!
//! ```rust
//! use algolab::graph::{Dag, ShortestPathAlgorithm};
//!
//! let mut dag = Dag::new();
//! for v in ["A", "B", "C", "D"] {
//!     dag.add_vertex(v).unwrap();
//! }
//! dag.add_edge("A", "B", 1).unwrap();
//! dag.add_edge("A", "C", 2).unwrap();
//! dag.add_edge("B", "D", 5).unwrap();
//! dag.add_edge("C", "D", 1).unwrap();
//!
//! for algo in ShortestPathAlgorithm::ALL {
//!     assert_eq!(dag.shortest_path("A", "D", algo), Ok(Some(3)));
//! }
//! ```
//!
//! ## Logging
//!
//! Build with `--features tracing` and call [`init_tracing`] to get console
//! and NDJSON file output. Without the feature the internal log macros
//! compile to nothing.

#![deny(missing_docs)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::inline_always)]
#![allow(clippy::module_name_repetitions)]

mod tracing_helpers;

pub mod algorithms;
pub mod cycle;
pub mod graph;
pub mod hash;
pub mod heap;
pub mod parallel;
pub mod search;
pub mod sort;
pub mod sync;

#[cfg(feature = "tracing")]
mod logging;

// Re-export main types for convenience
pub use cycle::FunctionCycle;
pub use graph::{Dag, GraphError, ShortestPathAlgorithm};
pub use hash::{HashMapError, OpenHashMap, RobinHoodHashMap};
pub use heap::DaryMinHeap;
pub use sort::Intrasort;

#[cfg(feature = "tracing")]
pub use logging::{TracingConfig, init_tracing};
