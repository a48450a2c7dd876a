//! Property-based tests for `DaryMinHeap`.
//!
//! Every arity must agree with `std::collections::BinaryHeap` on any
//! sequence of pushes and pops.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use algolab::DaryMinHeap;
use proptest::prelude::*;

// ============================================================================
//  Strategies
// ============================================================================

#[derive(Debug, Clone)]
enum HeapOp {
    Push(i32),
    Pop,
    Peek,
}

fn heap_op() -> impl Strategy<Value = HeapOp> {
    prop_oneof![
        3 => any::<i32>().prop_map(HeapOp::Push),
        2 => Just(HeapOp::Pop),
        1 => Just(HeapOp::Peek),
    ]
}

proptest! {
    /// Draining a heap yields its contents in ascending order.
    #[test]
    fn drain_is_sorted(arity in 2usize..=9, values in prop::collection::vec(any::<i32>(), 0..300)) {
        let mut heap = DaryMinHeap::new(arity);
        heap.extend(values.iter().copied());
        prop_assert_eq!(heap.len(), values.len());

        let mut drained = Vec::with_capacity(values.len());
        while let Some(v) = heap.pop() {
            drained.push(v);
        }

        let mut expected = values;
        expected.sort_unstable();
        prop_assert_eq!(drained, expected);
        prop_assert!(heap.is_empty());
    }

    /// `from_vec` builds the same heap order as repeated pushes.
    #[test]
    fn from_vec_matches_pushes(arity in 2usize..=9, values in prop::collection::vec(any::<i32>(), 0..300)) {
        let mut expected = values.clone();
        expected.sort_unstable();
        prop_assert_eq!(DaryMinHeap::from_vec(arity, values).into_sorted_vec(), expected);
    }

    /// Interleaved operations agree with the standard library heap.
    #[test]
    fn matches_binary_heap(arity in 2usize..=9, ops in prop::collection::vec(heap_op(), 0..400)) {
        let mut heap = DaryMinHeap::new(arity);
        let mut reference = BinaryHeap::new();

        for op in ops {
            match op {
                HeapOp::Push(v) => {
                    heap.push(v);
                    reference.push(Reverse(v));
                }
                HeapOp::Pop => {
                    prop_assert_eq!(heap.pop(), reference.pop().map(|Reverse(v)| v));
                }
                HeapOp::Peek => {
                    prop_assert_eq!(heap.peek(), reference.peek().map(|Reverse(v)| v));
                }
            }
            prop_assert_eq!(heap.len(), reference.len());
        }
    }
}
