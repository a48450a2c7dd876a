//! A pair of `u64`s readable without locking.
//!
//! [`OptimisticPair`] follows the seqlock protocol:
//!
//! ```text
//! writer: CAS version even -> odd, store x and y, publish version + 2
//! reader: v = stable(); read x and y; retry if has_changed(v)
//! ```
//!
//! An odd version means a writer is active. A reader that sees the same even
//! version before and after its loads cannot have observed a torn pair.

use std::hint::spin_loop;
use std::marker::PhantomData;
use std::sync::atomic::{AtomicU64, Ordering, fence};

use parking_lot::RwLock;

use crate::tracing_helpers::trace_log;

/// Failed optimistic attempts before [`OptimisticPair::read`] takes the lock.
pub const MAX_OPTIMISTIC_ATTEMPTS: usize = 16;

const WRITING_BIT: u64 = 1;

/// Two values that are always read and written together.
pub trait SharedPair: Send + Sync {
    /// Consistent snapshot of both values.
    fn read(&self) -> (u64, u64);

    /// Replace both values.
    fn write(&self, x: u64, y: u64);
}

// ============================================================================
//  OptimisticPair
// ============================================================================

/// Seqlock-protected pair. Readers only block writers after falling back to
/// the lock.
#[derive(Debug, Default)]
pub struct OptimisticPair {
    version: AtomicU64,
    x: AtomicU64,
    y: AtomicU64,
}

/// Exclusive access to an [`OptimisticPair`].
///
/// Unlocks on drop. The version advances only if [`set`](Self::set) was
/// called; a guard used for reading restores the version it found.
#[derive(Debug)]
#[must_use = "dropping the guard releases the lock immediately"]
pub struct WriteGuard<'a> {
    pair: &'a OptimisticPair,
    locked_version: u64,
    dirty: bool,

    // !Send + !Sync
    _marker: PhantomData<*mut ()>,
}

impl Drop for WriteGuard<'_> {
    fn drop(&mut self) {
        let unlocked = if self.dirty {
            self.locked_version + 1
        } else {
            self.locked_version - 1
        };
        self.pair.version.store(unlocked, Ordering::Release);
    }
}

impl WriteGuard<'_> {
    /// Both values, read under the lock.
    #[must_use]
    pub fn get(&self) -> (u64, u64) {
        (
            self.pair.x.load(Ordering::Relaxed),
            self.pair.y.load(Ordering::Relaxed),
        )
    }

    /// Store both values. Published when the guard drops.
    pub fn set(&mut self, x: u64, y: u64) {
        self.pair.x.store(x, Ordering::Relaxed);
        self.pair.y.store(y, Ordering::Relaxed);
        self.dirty = true;
    }

    /// The odd version held while locked.
    #[must_use]
    pub const fn locked_version(&self) -> u64 {
        self.locked_version
    }
}

impl OptimisticPair {
    /// Pair holding `(x, y)` at version 0.
    #[must_use]
    pub const fn new(x: u64, y: u64) -> Self {
        Self {
            version: AtomicU64::new(0),
            x: AtomicU64::new(x),
            y: AtomicU64::new(y),
        }
    }

    /// Current version. Odd while a writer holds the lock.
    #[must_use]
    pub fn version(&self) -> u64 {
        self.version.load(Ordering::Relaxed)
    }

    /// Spin until no writer is active and return that even version.
    #[must_use]
    pub fn stable(&self) -> u64 {
        loop {
            let v = self.version.load(Ordering::Acquire);
            if v & WRITING_BIT == 0 {
                return v;
            }
            spin_loop();
        }
    }

    /// True if the version moved since `old`. Orders every earlier load
    /// before the version check.
    #[must_use]
    pub fn has_changed(&self, old: u64) -> bool {
        fence(Ordering::Acquire);
        self.version.load(Ordering::Relaxed) != old
    }

    /// One optimistic attempt. `None` if a writer was active or intervened.
    #[must_use]
    pub fn try_read(&self) -> Option<(u64, u64)> {
        let v = self.version.load(Ordering::Acquire);
        if v & WRITING_BIT != 0 {
            return None;
        }

        let x = self.x.load(Ordering::Relaxed);
        let y = self.y.load(Ordering::Relaxed);

        (!self.has_changed(v)).then_some((x, y))
    }

    /// Consistent snapshot: up to [`MAX_OPTIMISTIC_ATTEMPTS`] lock-free
    /// attempts, then a read under the write lock.
    #[must_use]
    pub fn read(&self) -> (u64, u64) {
        for _ in 0..MAX_OPTIMISTIC_ATTEMPTS {
            if let Some(pair) = self.try_read() {
                return pair;
            }
            spin_loop();
        }

        trace_log!("optimistic read exhausted, taking lock");
        self.lock().get()
    }

    /// Replace both values.
    pub fn write(&self, x: u64, y: u64) {
        self.lock().set(x, y);
    }

    /// Spin until the version is even, then claim it by making it odd.
    pub fn lock(&self) -> WriteGuard<'_> {
        loop {
            let v = self.version.load(Ordering::Relaxed);
            if v & WRITING_BIT == 0
                && self
                    .version
                    .compare_exchange_weak(v, v + 1, Ordering::Acquire, Ordering::Relaxed)
                    .is_ok()
            {
                // Data stores must not become visible before the odd version.
                fence(Ordering::Release);
                return WriteGuard {
                    pair: self,
                    locked_version: v + 1,
                    dirty: false,
                    _marker: PhantomData,
                };
            }
            spin_loop();
        }
    }
}

impl SharedPair for OptimisticPair {
    fn read(&self) -> (u64, u64) {
        Self::read(self)
    }

    fn write(&self, x: u64, y: u64) {
        Self::write(self, x, y);
    }
}

// ============================================================================
//  RwLockPair
// ============================================================================

/// The same pair behind a reader-writer lock.
#[derive(Debug, Default)]
pub struct RwLockPair {
    inner: RwLock<(u64, u64)>,
}

impl RwLockPair {
    /// Pair holding `(x, y)`.
    #[must_use]
    pub fn new(x: u64, y: u64) -> Self {
        Self {
            inner: RwLock::new((x, y)),
        }
    }

    /// Snapshot under a shared lock.
    #[must_use]
    pub fn read(&self) -> (u64, u64) {
        *self.inner.read()
    }

    /// Replace both values under the exclusive lock.
    pub fn write(&self, x: u64, y: u64) {
        *self.inner.write() = (x, y);
    }
}

impl SharedPair for RwLockPair {
    fn read(&self) -> (u64, u64) {
        Self::read(self)
    }

    fn write(&self, x: u64, y: u64) {
        Self::write(self, x, y);
    }
}
