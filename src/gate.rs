/*!
 * One-Shot Broadcast Gate
 *
 * Closable notification signal built on parking_lot primitives
 *
 * # Design
 *
 * A gate is either open or closed. Closing is permanent: the owning wait
 * group discards a closed gate and lazily creates a fresh one for the next
 * cycle, so a reference captured by a waiter always belongs to exactly one
 * cycle and is never reused or re-armed.
 */

use parking_lot::{Condvar, Mutex};
use std::sync::atomic::{AtomicUsize, Ordering};

/// One-shot broadcast signal for a single wait cycle
pub(crate) struct Gate {
    closed: Mutex<bool>,
    condvar: Condvar,
    waiters: AtomicUsize,
}

impl Gate {
    pub(crate) fn new() -> Self {
        Self {
            closed: Mutex::new(false),
            condvar: Condvar::new(),
            waiters: AtomicUsize::new(0),
        }
    }

    /// Block the calling thread until the gate is closed
    ///
    /// Returns immediately if the gate was already closed.
    pub(crate) fn wait(&self) {
        let mut closed = self.closed.lock();
        if *closed {
            return;
        }

        self.waiters.fetch_add(1, Ordering::Relaxed);
        while !*closed {
            self.condvar.wait(&mut closed);
        }
        self.waiters.fetch_sub(1, Ordering::Relaxed);
    }

    /// Close the gate, releasing every blocked waiter
    ///
    /// Returns the number of waiters woken.
    pub(crate) fn close(&self) -> usize {
        let mut closed = self.closed.lock();
        *closed = true;
        self.condvar.notify_all()
    }

    /// Approximate count of threads currently blocked on this gate
    pub(crate) fn waiter_count(&self) -> usize {
        self.waiters.load(Ordering::Relaxed)
    }
}
