//! Random connected DAGs for benches and differential tests.

use rand::Rng;
use rand::seq::SliceRandom;

use super::{Dag, GraphError};
use crate::tracing_helpers::{debug_log, trace_log};

/// Builds random DAGs over a fixed label order.
///
/// Edges only point from an earlier label to a later one, so the result is
/// acyclic. After the random edges are placed, every source vertex other than
/// the first label is chained from the previously chained vertex, which makes
/// every vertex reachable from `labels[0]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DagGenerator {
    edge_percent: u32,
}

impl Default for DagGenerator {
    fn default() -> Self {
        Self { edge_percent: 5 }
    }
}

impl DagGenerator {
    /// Generator placing each forward edge with `edge_percent`% probability.
    ///
    /// # Panics
    ///
    /// Panics if `edge_percent > 100`.
    #[must_use]
    pub fn new(edge_percent: u32) -> Self {
        assert!(edge_percent <= 100, "edge probability is a percentage, got {edge_percent}");
        Self { edge_percent }
    }

    /// Edge probability in percent.
    #[must_use]
    pub const fn edge_percent(&self) -> u32 {
        self.edge_percent
    }

    /// Generate a DAG whose vertices are `labels`, in order.
    ///
    /// # Errors
    ///
    /// [`GraphError::DuplicateVertex`] if `labels` repeats a label.
    pub fn generate<R: Rng + ?Sized>(
        &self,
        labels: &[String],
        rng: &mut R,
    ) -> Result<Dag, GraphError> {
        let mut dag = Dag::with_capacity(labels.len());
        for label in labels {
            dag.add_vertex(label.as_str())?;
        }

        for (i, src) in labels.iter().enumerate() {
            for dest in &labels[i + 1..] {
                if rng.gen_range(0..100) < self.edge_percent {
                    let weight = rng.gen_range(0..100) + rng.gen_range(0..100);
                    dag.add_edge(src, dest, weight)?;
                }
            }
        }

        let in_degree = dag.in_degrees();
        if let Some(first) = labels.first() {
            let mut prev = first;
            for (label, _) in labels
                .iter()
                .zip(&in_degree)
                .skip(1)
                .filter(|&(_, &deg)| deg == 0)
            {
                trace_log!(from = %prev, to = %label, "chaining source vertex");
                dag.add_edge(prev, label, 1 + rng.gen_range(0..15))?;
                prev = label;
            }
        }

        debug_log!(
            vertices = dag.vertex_count(),
            edges = dag.edge_count(),
            "generated dag"
        );
        Ok(dag)
    }
}

/// `count` labels of the form `"{letter}-{i}"`, letters cycling `A..=Z`,
/// in shuffled order.
#[expect(clippy::cast_possible_truncation, reason = "i % 26 fits in u8")]
pub fn vertex_labels<R: Rng + ?Sized>(count: usize, rng: &mut R) -> Vec<String> {
    let mut labels: Vec<String> = (0..count)
        .map(|i| {
            let letter = char::from(b'A' + (i % 26) as u8);
            format!("{letter}-{i}")
        })
        .collect();
    labels.shuffle(rng);
    labels
}
