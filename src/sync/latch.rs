//! One-shot count-down latches.

use std::hint::spin_loop;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{Duration, Instant};

use parking_lot::{Condvar, Mutex};

/// Blocking count-down latch.
///
/// Waiters park on a condition variable until the count reaches zero. The
/// count never goes below zero and cannot be reset.
#[derive(Debug)]
pub struct CountDownLatch {
    count: Mutex<usize>,
    zero: Condvar,
}

impl CountDownLatch {
    /// Latch that opens after `count` calls to [`count_down`](Self::count_down).
    #[must_use]
    pub fn new(count: usize) -> Self {
        Self {
            count: Mutex::new(count),
            zero: Condvar::new(),
        }
    }

    /// Decrement the count, waking every waiter when it reaches zero.
    /// Saturates at zero.
    pub fn count_down(&self) {
        let mut count = self.count.lock();
        if *count == 0 {
            return;
        }
        *count -= 1;
        if *count == 0 {
            self.zero.notify_all();
        }
    }

    /// Current count.
    #[must_use]
    pub fn count(&self) -> usize {
        *self.count.lock()
    }

    /// Block until the count is zero.
    pub fn wait(&self) {
        let mut count = self.count.lock();
        while *count > 0 {
            self.zero.wait(&mut count);
        }
    }

    /// Block until the count is zero or `timeout` elapses. Returns `true` if
    /// the latch opened.
    pub fn wait_for(&self, timeout: Duration) -> bool {
        let Some(deadline) = Instant::now().checked_add(timeout) else {
            self.wait();
            return true;
        };
        let mut count = self.count.lock();
        while *count > 0 {
            if self.zero.wait_until(&mut count, deadline).timed_out() {
                return *count == 0;
            }
        }
        true
    }
}

/// Count-down latch that spins instead of parking.
///
/// Cheaper than [`CountDownLatch`] when the wait is short and every waiter
/// has its own core. Burns CPU otherwise.
#[derive(Debug)]
pub struct SpinLatch {
    count: AtomicUsize,
}

impl SpinLatch {
    /// Latch that opens after `count` calls to [`count_down`](Self::count_down).
    #[must_use]
    pub const fn new(count: usize) -> Self {
        Self {
            count: AtomicUsize::new(count),
        }
    }

    /// Decrement the count. Saturates at zero.
    pub fn count_down(&self) {
        // Err only when already zero.
        let _ = self
            .count
            .fetch_update(Ordering::Release, Ordering::Relaxed, |c| c.checked_sub(1));
    }

    /// Current count.
    #[must_use]
    pub fn count(&self) -> usize {
        self.count.load(Ordering::Acquire)
    }

    /// Spin until the count is zero.
    pub fn wait(&self) {
        while self.count.load(Ordering::Acquire) > 0 {
            spin_loop();
        }
    }

    /// Spin until the count is zero or `timeout` elapses. Returns `true` if
    /// the latch opened.
    pub fn wait_for(&self, timeout: Duration) -> bool {
        let Some(deadline) = Instant::now().checked_add(timeout) else {
            self.wait();
            return true;
        };
        while self.count.load(Ordering::Acquire) > 0 {
            if Instant::now() >= deadline {
                return false;
            }
            spin_loop();
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_count_down_saturates() {
        let latch = CountDownLatch::new(2);
        latch.count_down();
        assert_eq!(latch.count(), 1);
        latch.count_down();
        latch.count_down();
        assert_eq!(latch.count(), 0);

        let spin = SpinLatch::new(1);
        spin.count_down();
        spin.count_down();
        assert_eq!(spin.count(), 0);
    }

    #[test]
    fn test_zero_latch_is_open() {
        CountDownLatch::new(0).wait();
        SpinLatch::new(0).wait();
        assert!(CountDownLatch::new(0).wait_for(Duration::ZERO));
        assert!(SpinLatch::new(0).wait_for(Duration::ZERO));
    }

    #[test]
    fn test_unbounded_timeout_waits_without_deadline() {
        assert!(CountDownLatch::new(0).wait_for(Duration::MAX));
        assert!(SpinLatch::new(0).wait_for(Duration::MAX));

        let blocking = Arc::new(CountDownLatch::new(1));
        let spinning = Arc::new(SpinLatch::new(1));
        let waiters = [
            {
                let latch = Arc::clone(&blocking);
                thread::spawn(move || latch.wait_for(Duration::MAX))
            },
            {
                let latch = Arc::clone(&spinning);
                thread::spawn(move || latch.wait_for(Duration::MAX))
            },
        ];
        blocking.count_down();
        spinning.count_down();
        for w in waiters {
            assert!(w.join().unwrap());
        }
    }

    #[test]
    fn test_wait_for_times_out() {
        assert!(!CountDownLatch::new(1).wait_for(Duration::from_millis(20)));
        assert!(!SpinLatch::new(1).wait_for(Duration::from_millis(20)));
    }

    #[test]
    fn test_blocking_latch_releases_waiters() {
        let latch = Arc::new(CountDownLatch::new(4));
        let waiters: Vec<_> = (0..3)
            .map(|_| {
                let latch = Arc::clone(&latch);
                thread::spawn(move || latch.wait_for(Duration::from_secs(10)))
            })
            .collect();

        for _ in 0..4 {
            let latch = Arc::clone(&latch);
            thread::spawn(move || latch.count_down()).join().unwrap();
        }

        for w in waiters {
            assert!(w.join().unwrap());
        }
    }

    #[test]
    fn test_spin_latch_releases_waiter() {
        let latch = Arc::new(SpinLatch::new(2));
        let waiter = {
            let latch = Arc::clone(&latch);
            thread::spawn(move || latch.wait_for(Duration::from_secs(10)))
        };
        latch.count_down();
        latch.count_down();
        assert!(waiter.join().unwrap());
    }
}
