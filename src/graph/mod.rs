//! Weighted directed acyclic graph and three single-pair shortest-path
//! strategies.
//!
//! | Strategy | Time | Space |
//! |----------|------|-------|
//! | [`ShortestPathAlgorithm::TopologicalSort`] | O(V + E) | O(V) |
//! | [`ShortestPathAlgorithm::Dijkstra`] | O((V + E) log V) | O(V) |
//! | [`ShortestPathAlgorithm::FloydWarshall`] | O(V^3) | O(V^2) |
//!
//! Vertices are addressed by string label at the API boundary and by dense
//! `usize` index internally; every algorithm works on the index form.

use std::collections::HashMap;
use std::fmt as StdFmt;

use crate::tracing_helpers::debug_log;

mod dijkstra;
mod floyd_warshall;
pub mod generator;
mod topological;

pub use generator::{DagGenerator, vertex_labels};

// ============================================================================
//  GraphError
// ============================================================================

/// Errors from building or querying a [`Dag`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    /// The label does not name a vertex of the graph.
    UnknownVertex(String),

    /// A vertex with this label already exists.
    DuplicateVertex(String),

    /// No vertex has in-degree zero. Either the graph is empty or it
    /// contains a cycle.
    NoSourceVertex,
}

impl StdFmt::Display for GraphError {
    fn fmt(&self, f: &mut StdFmt::Formatter<'_>) -> StdFmt::Result {
        match self {
            Self::UnknownVertex(v) => write!(f, "unknown vertex '{v}'"),
            Self::DuplicateVertex(v) => write!(f, "vertex '{v}' already exists"),
            Self::NoSourceVertex => {
                write!(f, "no source vertex (in-degree 0) in graph")
            }
        }
    }
}

impl std::error::Error for GraphError {}

// ============================================================================
//  ShortestPathAlgorithm
// ============================================================================

/// Which algorithm [`Dag::shortest_path`] runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShortestPathAlgorithm {
    /// Kahn's topological order with left-to-right relaxation.
    TopologicalSort,
    /// Dijkstra with an indexed binary heap and decrease-key.
    Dijkstra,
    /// Floyd-Warshall all-pairs matrix.
    FloydWarshall,
}

impl ShortestPathAlgorithm {
    /// Every strategy, in the order benches report them.
    pub const ALL: [Self; 3] = [Self::TopologicalSort, Self::Dijkstra, Self::FloydWarshall];

    /// Short name for reports.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::TopologicalSort => "topological",
            Self::Dijkstra => "dijkstra",
            Self::FloydWarshall => "floyd_warshall",
        }
    }
}

impl StdFmt::Display for ShortestPathAlgorithm {
    fn fmt(&self, f: &mut StdFmt::Formatter<'_>) -> StdFmt::Result {
        f.write_str(self.name())
    }
}

// ============================================================================
//  Dag
// ============================================================================

/// Outgoing edge in index form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Edge {
    pub(crate) dest: usize,
    pub(crate) weight: u32,
}

/// A directed graph with non-negative integer edge weights, intended to be
/// acyclic.
///
/// Acyclicity is not checked on insertion. [`DagGenerator`] only adds edges
/// that point forward in label order, which guarantees it.
#[derive(Debug, Clone, Default)]
pub struct Dag {
    labels: Vec<String>,
    index: HashMap<String, usize>,
    adjacency: Vec<Vec<Edge>>,
    edge_count: usize,
}

impl Dag {
    /// Create an empty graph.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty graph with room for `vertices` vertices.
    #[must_use]
    pub fn with_capacity(vertices: usize) -> Self {
        Self {
            labels: Vec::with_capacity(vertices),
            index: HashMap::with_capacity(vertices),
            adjacency: Vec::with_capacity(vertices),
            edge_count: 0,
        }
    }

    /// Add a vertex.
    ///
    /// # Errors
    ///
    /// [`GraphError::DuplicateVertex`] if `label` is already present.
    pub fn add_vertex(&mut self, label: impl Into<String>) -> Result<(), GraphError> {
        let label = label.into();
        if self.index.contains_key(&label) {
            return Err(GraphError::DuplicateVertex(label));
        }
        self.index.insert(label.clone(), self.labels.len());
        self.labels.push(label);
        self.adjacency.push(Vec::new());
        Ok(())
    }

    /// Add a weighted edge `src -> dest`.
    ///
    /// # Errors
    ///
    /// [`GraphError::UnknownVertex`] if either endpoint is missing.
    pub fn add_edge(&mut self, src: &str, dest: &str, weight: u32) -> Result<(), GraphError> {
        let from = self.vertex_index(src)?;
        let to = self.vertex_index(dest)?;
        self.adjacency[from].push(Edge { dest: to, weight });
        self.edge_count += 1;
        Ok(())
    }

    /// Number of vertices.
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.labels.len()
    }

    /// Number of edges.
    #[must_use]
    pub const fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// Returns `true` if `label` is a vertex.
    #[must_use]
    pub fn contains_vertex(&self, label: &str) -> bool {
        self.index.contains_key(label)
    }

    /// Vertex labels in insertion order.
    pub fn vertices(&self) -> impl Iterator<Item = &str> {
        self.labels.iter().map(String::as_str)
    }

    /// Outgoing edges of `label` as `(dest, weight)` pairs.
    ///
    /// # Errors
    ///
    /// [`GraphError::UnknownVertex`] if `label` is missing.
    pub fn edges(&self, label: &str) -> Result<impl Iterator<Item = (&str, u32)>, GraphError> {
        let v = self.vertex_index(label)?;
        Ok(self.adjacency[v]
            .iter()
            .map(|e| (self.labels[e.dest].as_str(), e.weight)))
    }

    /// Vertices with in-degree zero, in insertion order.
    ///
    /// # Errors
    ///
    /// [`GraphError::NoSourceVertex`] if there are none.
    pub fn source_vertices(&self) -> Result<Vec<&str>, GraphError> {
        let sources: Vec<&str> = self
            .in_degrees()
            .iter()
            .enumerate()
            .filter(|&(_, &deg)| deg == 0)
            .map(|(v, _)| self.labels[v].as_str())
            .collect();

        if sources.is_empty() {
            return Err(GraphError::NoSourceVertex);
        }
        Ok(sources)
    }

    /// Returns `true` if a depth-first search from the first source vertex
    /// reaches every vertex.
    ///
    /// # Errors
    ///
    /// [`GraphError::NoSourceVertex`] if there is nothing to start from.
    pub fn is_connected(&self) -> Result<bool, GraphError> {
        let start = self
            .in_degrees()
            .iter()
            .position(|&deg| deg == 0)
            .ok_or(GraphError::NoSourceVertex)?;

        let mut marked = vec![false; self.labels.len()];
        let mut stack = vec![start];
        marked[start] = true;
        let mut seen = 1;

        while let Some(v) = stack.pop() {
            for e in &self.adjacency[v] {
                if !marked[e.dest] {
                    marked[e.dest] = true;
                    seen += 1;
                    stack.push(e.dest);
                }
            }
        }

        Ok(seen == self.labels.len())
    }

    /// Length of the shortest path from `src` to `dest`.
    ///
    /// Returns `Ok(Some(0))` when `src == dest` and `Ok(None)` when `dest` is
    /// unreachable.
    ///
    /// # Errors
    ///
    /// [`GraphError::UnknownVertex`] if either endpoint is missing.
    pub fn shortest_path(
        &self,
        src: &str,
        dest: &str,
        algorithm: ShortestPathAlgorithm,
    ) -> Result<Option<u64>, GraphError> {
        let from = self.vertex_index(src)?;
        let to = self.vertex_index(dest)?;
        if from == to {
            return Ok(Some(0));
        }

        let distance = match algorithm {
            ShortestPathAlgorithm::TopologicalSort => topological::shortest_path(self, from, to),
            ShortestPathAlgorithm::Dijkstra => dijkstra::shortest_path(self, from, to),
            ShortestPathAlgorithm::FloydWarshall => floyd_warshall::shortest_path(self, from, to),
        };

        debug_log!(%algorithm, src, dest, ?distance, "shortest path");
        Ok(distance)
    }

    pub(crate) fn vertex_index(&self, label: &str) -> Result<usize, GraphError> {
        self.index
            .get(label)
            .copied()
            .ok_or_else(|| GraphError::UnknownVertex(label.to_string()))
    }

    pub(crate) fn adjacency(&self) -> &[Vec<Edge>] {
        &self.adjacency
    }

    pub(crate) fn in_degrees(&self) -> Vec<usize> {
        let mut degrees = vec![0; self.labels.len()];
        for e in self.adjacency.iter().flatten() {
            degrees[e.dest] += 1;
        }
        degrees
    }
}
