//! DAG shortest path in topological order (Kahn's algorithm).
//!
//! Vertices are dequeued in topological order. Before `src` is dequeued no
//! vertex has a finite distance, so relaxation is a no-op until then. Every
//! predecessor of `dest` is dequeued before `dest`, so its distance is final
//! at that point.

use std::collections::VecDeque;

use super::Dag;

pub(super) fn shortest_path(dag: &Dag, src: usize, dest: usize) -> Option<u64> {
    let adjacency = dag.adjacency();
    let mut in_degree = dag.in_degrees();
    let mut dist: Vec<Option<u64>> = vec![None; adjacency.len()];
    dist[src] = Some(0);

    let mut queue: VecDeque<usize> = in_degree
        .iter()
        .enumerate()
        .filter(|&(_, &deg)| deg == 0)
        .map(|(v, _)| v)
        .collect();

    while let Some(v) = queue.pop_front() {
        if v == dest {
            return dist[dest];
        }

        let base = dist[v];
        for e in &adjacency[v] {
            if let Some(d) = base {
                let candidate = d + u64::from(e.weight);
                if dist[e.dest].is_none_or(|cur| candidate < cur) {
                    dist[e.dest] = Some(candidate);
                }
            }

            in_degree[e.dest] -= 1;
            if in_degree[e.dest] == 0 {
                queue.push_back(e.dest);
            }
        }
    }

    // dest sits on a cycle and was never dequeued.
    dist[dest]
}

#[cfg(test)]
mod tests {
    use super::super::Dag;
    use super::*;

    #[test]
    fn test_diamond() {
        let mut g = Dag::new();
        for v in ["s", "a", "b", "t"] {
            g.add_vertex(v).unwrap();
        }
        g.add_edge("s", "a", 4).unwrap();
        g.add_edge("s", "b", 1).unwrap();
        g.add_edge("b", "a", 1).unwrap();
        g.add_edge("a", "t", 1).unwrap();

        assert_eq!(shortest_path(&g, 0, 3), Some(3));
        assert_eq!(shortest_path(&g, 2, 3), Some(2));
        assert_eq!(shortest_path(&g, 3, 0), None);
    }

    #[test]
    fn test_vertices_before_src_are_ignored() {
        // x -> s -> t, and x -> t directly with a cheaper weight.
        let mut g = Dag::new();
        for v in ["x", "s", "t"] {
            g.add_vertex(v).unwrap();
        }
        g.add_edge("x", "s", 1).unwrap();
        g.add_edge("x", "t", 1).unwrap();
        g.add_edge("s", "t", 10).unwrap();

        assert_eq!(shortest_path(&g, 1, 2), Some(10));
    }
}
