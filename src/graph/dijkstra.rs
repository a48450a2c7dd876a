//! Dijkstra over an indexed binary min-heap.
//!
//! The heap stores vertex indices ordered by tentative distance and keeps a
//! `position` map from vertex to heap slot, so a relaxed vertex is moved up
//! in place instead of being pushed a second time.

use super::Dag;

const NOT_QUEUED: usize = usize::MAX;

/// Binary min-heap of vertices keyed by `dist`, with decrease-key.
struct IndexedMinHeap {
    heap: Vec<usize>,
    position: Vec<usize>,
    dist: Vec<u64>,
}

impl IndexedMinHeap {
    fn new(vertices: usize) -> Self {
        Self {
            heap: Vec::new(),
            position: vec![NOT_QUEUED; vertices],
            dist: vec![u64::MAX; vertices],
        }
    }

    /// Insert `v` with `distance`, or lower its key if already queued.
    /// A distance that does not improve the current key is ignored.
    fn push_or_decrease(&mut self, v: usize, distance: u64) {
        if distance >= self.dist[v] {
            return;
        }
        self.dist[v] = distance;

        if self.position[v] == NOT_QUEUED {
            self.position[v] = self.heap.len();
            self.heap.push(v);
        }
        self.sift_up(self.position[v]);
    }

    fn pop(&mut self) -> Option<(usize, u64)> {
        let top = *self.heap.first()?;
        let last = self.heap.len() - 1;
        self.swap(0, last);
        self.heap.pop();
        self.position[top] = NOT_QUEUED;
        if !self.heap.is_empty() {
            self.sift_down(0);
        }
        Some((top, self.dist[top]))
    }

    fn key(&self, slot: usize) -> u64 {
        self.dist[self.heap[slot]]
    }

    fn swap(&mut self, a: usize, b: usize) {
        self.heap.swap(a, b);
        self.position[self.heap[a]] = a;
        self.position[self.heap[b]] = b;
    }

    fn sift_up(&mut self, mut slot: usize) {
        while slot > 0 {
            let parent = (slot - 1) / 2;
            if self.key(parent) <= self.key(slot) {
                break;
            }
            self.swap(parent, slot);
            slot = parent;
        }
    }

    fn sift_down(&mut self, mut slot: usize) {
        let len = self.heap.len();
        loop {
            let left = 2 * slot + 1;
            if left >= len {
                break;
            }
            let right = left + 1;
            let child = if right < len && self.key(right) < self.key(left) {
                right
            } else {
                left
            };
            if self.key(slot) <= self.key(child) {
                break;
            }
            self.swap(slot, child);
            slot = child;
        }
    }
}

pub(super) fn shortest_path(dag: &Dag, src: usize, dest: usize) -> Option<u64> {
    let adjacency = dag.adjacency();
    let mut settled = vec![false; adjacency.len()];
    let mut queue = IndexedMinHeap::new(adjacency.len());
    queue.push_or_decrease(src, 0);

    while let Some((v, d)) = queue.pop() {
        if v == dest {
            return Some(d);
        }
        settled[v] = true;

        for e in &adjacency[v] {
            if !settled[e.dest] {
                queue.push_or_decrease(e.dest, d + u64::from(e.weight));
            }
        }
    }

    None
}
