//! Latches and read-mostly locks compared by the `sync` bench and the
//! `latch_contention` binary.
//!
//! - [`CountDownLatch`] blocks waiters on a `parking_lot` condition variable.
//! - [`SpinLatch`] busy-waits on an atomic counter.
//! - [`OptimisticPair`] is a seqlock: readers validate a version instead of
//!   taking a lock.
//! - [`RwLockPair`] is the same pair behind a `parking_lot::RwLock`.

mod latch;
mod optimistic;

pub use latch::{CountDownLatch, SpinLatch};
pub use optimistic::{
    MAX_OPTIMISTIC_ATTEMPTS, OptimisticPair, RwLockPair, SharedPair, WriteGuard,
};
