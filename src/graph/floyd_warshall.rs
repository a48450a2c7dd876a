//! All-pairs shortest paths over a dense distance matrix.

use super::Dag;

const INFINITY: u64 = u64::MAX;

/// Row-major `n x n` distance matrix. `INFINITY` marks "no path".
fn all_pairs(dag: &Dag) -> (usize, Vec<u64>) {
    let adjacency = dag.adjacency();
    let n = adjacency.len();
    let mut dist = vec![INFINITY; n * n];

    for v in 0..n {
        dist[v * n + v] = 0;
    }
    for (v, edges) in adjacency.iter().enumerate() {
        for e in edges {
            let cell = &mut dist[v * n + e.dest];
            *cell = (*cell).min(u64::from(e.weight));
        }
    }

    for k in 0..n {
        for i in 0..n {
            let ik = dist[i * n + k];
            if ik == INFINITY {
                continue;
            }
            for j in 0..n {
                let kj = dist[k * n + j];
                if kj == INFINITY {
                    continue;
                }
                let through = ik + kj;
                if through < dist[i * n + j] {
                    dist[i * n + j] = through;
                }
            }
        }
    }

    (n, dist)
}

pub(super) fn shortest_path(dag: &Dag, src: usize, dest: usize) -> Option<u64> {
    let (n, dist) = all_pairs(dag);
    let d = dist[src * n + dest];
    (d != INFINITY).then_some(d)
}
