//! Synchronization primitives for parking and waking searcher threads.

use std::sync::{Condvar, Mutex};

/// A condvar-guarded boolean that threads can block on until it reaches a
/// wanted value.
pub struct LockLatch {
    m: Mutex<bool>,
    v: Condvar,
}

impl LockLatch {
    #[inline]
    pub fn new() -> LockLatch {
        LockLatch::with_value(false)
    }

    #[inline]
    pub fn with_value(value: bool) -> LockLatch {
        LockLatch {
            m: Mutex::new(value),
            v: Condvar::new(),
        }
    }

    /// Blocks until the latch is set.
    #[inline]
    pub fn wait(&self) {
        let mut guard = self.m.lock().unwrap();
        while !*guard {
            guard = self.v.wait(guard).unwrap();
        }
    }

    /// Blocks until the latch holds the given value.
    #[inline]
    pub fn wait_for(&self, value: bool) {
        let mut guard = self.m.lock().unwrap();
        while *guard != value {
            guard = self.v.wait(guard).unwrap();
        }
    }

    /// Sets the latch to true and wakes every waiting thread.
    #[inline]
    pub fn set(&self) {
        self.set_value(true);
    }

    /// Resets the latch to false, making future waiters block.
    #[inline]
    pub fn lock(&self) {
        let mut guard = self.m.lock().unwrap();
        *guard = false;
    }

    /// Stores a value and wakes every waiting thread.
    #[inline]
    pub fn set_value(&self, value: bool) {
        let mut guard = self.m.lock().unwrap();
        *guard = value;
        self.v.notify_all();
    }
}

impl Default for LockLatch {
    fn default() -> Self {
        LockLatch::new()
    }
}

/// A boolean whose transitions can be awaited in either direction. Used to
/// park threads between searches and to let the pool await search start and
/// finish.
pub struct GuardedBool {
    latch: LockLatch,
}

impl GuardedBool {
    #[inline]
    pub fn new(value: bool) -> GuardedBool {
        GuardedBool {
            latch: LockLatch::with_value(value),
        }
    }

    /// Updates the value, waking anybody waiting for it.
    #[inline]
    pub fn set(&self, value: bool) {
        self.latch.set_value(value);
    }

    /// Blocks until the value matches.
    #[inline]
    pub fn wait(&self, value: bool) {
        self.latch.wait_for(value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn latch_releases_waiter() {
        let latch = Arc::new(LockLatch::new());
        let waiter = {
            let latch = Arc::clone(&latch);
            thread::spawn(move || latch.wait())
        };
        latch.set();
        waiter.join().unwrap();
    }

    #[test]
    fn guarded_bool_both_directions() {
        let b = Arc::new(GuardedBool::new(true));
        let other = {
            let b = Arc::clone(&b);
            thread::spawn(move || {
                b.wait(false);
                b.set(true);
            })
        };
        b.set(false);
        b.wait(true);
        other.join().unwrap();
    }
}
