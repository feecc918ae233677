/*!
 * Wait Group
 *
 * Counting primitive that lets a coordinator block until a set of
 * concurrently running tasks has finished.
 *
 * # Design
 *
 * The counter is a lock-free atomic; the only locked region is the swap of
 * the gate reference (create-on-demand in `wait`, close-and-clear on the
 * zero crossing in `add`). The atomic add's unique return value guarantees
 * exactly one thread observes each zero crossing, so a gate is closed
 * exactly once per cycle.
 *
 * Unlike the classic wait-group contract, `add` with a positive delta is
 * valid at any time - including after the counter already reached zero and
 * a previous `wait` returned. Each return to zero discards the current
 * gate; the next cycle gets a fresh one.
 *
 * # Performance
 *
 * - `add`/`done` with no pending waiters never touch the lock
 * - `wait` with a zero counter is a single atomic load
 */

use crate::errors::{WaitGroupError, WaitGroupResult};
use crate::gate::Gate;
use crate::guard::WorkGuard;
use parking_lot::Mutex;
use std::fmt;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;
use tracing::trace;

struct Inner {
    counter: AtomicI64,
    gate: Mutex<Option<Arc<Gate>>>,
}

/// Counting synchronization primitive for waiting on concurrent tasks
///
/// Producers call [`add`](WaitGroup::add) before spawning each unit of work,
/// each unit calls [`done`](WaitGroup::done) on completion, and any number
/// of observers call [`wait`](WaitGroup::wait) to block until the
/// outstanding count is zero. All waiters blocked on the same cycle are
/// released together.
///
/// Clones share the same counter and gate; the primitive is only ever
/// exposed behind this shared handle, so it cannot be duplicated into two
/// independent instances after first use.
///
/// # Examples
///
/// ```
/// use std::thread;
/// use waitgroup::WaitGroup;
///
/// let wg = WaitGroup::new();
///
/// for _ in 0..4 {
///     let wg = wg.clone();
///     wg.add(1);
///     thread::spawn(move || {
///         // ... perform the unit of work ...
///         wg.done();
///     });
/// }
///
/// wg.wait();
/// ```
#[derive(Clone)]
pub struct WaitGroup {
    inner: Arc<Inner>,
}

impl WaitGroup {
    /// Create a new wait group with the counter at zero
    ///
    /// A fresh instance is immediately usable: [`wait`](WaitGroup::wait)
    /// returns at once until the first positive [`add`](WaitGroup::add).
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Inner {
                counter: AtomicI64::new(0),
                gate: Mutex::new(None),
            }),
        }
    }

    /// Add `delta`, which may be negative, to the counter
    ///
    /// If the counter becomes zero, all threads blocked on
    /// [`wait`](WaitGroup::wait) are released. Positive deltas are valid at
    /// any time, including after the counter reached zero and a previous
    /// `wait` returned; this starts a new, independent wait cycle.
    ///
    /// # Panics
    ///
    /// Panics if the counter would go negative. A negative count means
    /// `done` was called more times than `add` accounted for, and the
    /// primitive's invariant cannot be restored afterwards.
    pub fn add(&self, delta: i64) {
        if let Err(err) = self.try_add(delta) {
            panic!("{}", err);
        }
    }

    /// Decrement the counter by one
    ///
    /// # Panics
    ///
    /// Panics if the counter would go negative, like [`add`](WaitGroup::add).
    pub fn done(&self) {
        self.add(-1);
    }

    /// Fallible variant of [`add`](WaitGroup::add)
    ///
    /// On underflow the counter is restored before the error is returned,
    /// so the instance remains usable by the caller that handles the error.
    pub fn try_add(&self, delta: i64) -> WaitGroupResult<()> {
        let value = self.inner.counter.fetch_add(delta, Ordering::SeqCst) + delta;

        if value < 0 {
            self.inner.counter.fetch_sub(delta, Ordering::SeqCst);
            return Err(WaitGroupError::CounterUnderflow {
                count: value - delta,
                delta,
            });
        }

        if value == 0 {
            self.close_gate();
        }

        Ok(())
    }

    /// Fallible variant of [`done`](WaitGroup::done)
    pub fn try_done(&self) -> WaitGroupResult<()> {
        self.try_add(-1)
    }

    /// Block the calling thread until the counter is zero
    ///
    /// Returns immediately if the counter is already zero. Multiple
    /// concurrent callers block on the same gate and are all released
    /// together by the zero crossing (broadcast, not single wakeup).
    ///
    /// There is no timeout or cancellation; callers that need a deadline
    /// must race this against an external mechanism.
    pub fn wait(&self) {
        // Fast path: nothing outstanding, never touch the gate
        if self.inner.counter.load(Ordering::SeqCst) == 0 {
            return;
        }

        let gate = {
            let mut slot = self.inner.gate.lock();
            Arc::clone(slot.get_or_insert_with(|| {
                trace!("gate opened for new wait cycle");
                Arc::new(Gate::new())
            }))
        };

        // The counter may have hit zero between the fast-path check and the
        // gate capture; without this re-check the waiter could block on a
        // gate nobody will ever close.
        if self.inner.counter.load(Ordering::SeqCst) == 0 {
            return;
        }

        gate.wait();
    }

    /// Async-compatible wait using `tokio::task::spawn_blocking`
    ///
    /// Bridges the blocking [`wait`](WaitGroup::wait) into async contexts
    /// without stalling the runtime's worker threads.
    #[cfg(feature = "tokio")]
    pub async fn wait_async(&self) {
        let group = self.clone();
        tokio::task::spawn_blocking(move || group.wait())
            .await
            .expect("blocking wait task panicked");
    }

    /// Reserve one unit of work, released when the guard drops
    ///
    /// Equivalent to `add(1)` paired with a guaranteed `done` on scope
    /// exit, so the count is released even on abnormal exit from the unit
    /// of work.
    pub fn work(&self) -> WorkGuard {
        self.add(1);
        WorkGuard::new(self.clone())
    }

    /// Current counter value (for diagnostics; racy by nature)
    pub fn count(&self) -> i64 {
        self.inner.counter.load(Ordering::SeqCst)
    }

    /// Approximate count of threads blocked in [`wait`](WaitGroup::wait)
    pub fn waiter_count(&self) -> usize {
        self.inner
            .gate
            .lock()
            .as_ref()
            .map(|gate| gate.waiter_count())
            .unwrap_or(0)
    }

    /// Close and discard the current gate, if one exists
    ///
    /// Called only by the thread whose add drove the counter to zero.
    fn close_gate(&self) {
        let mut slot = self.inner.gate.lock();
        if let Some(gate) = slot.take() {
            let woken = gate.close();
            trace!(woken, "wait cycle complete, gate closed");
        }
    }
}

impl Default for WaitGroup {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for WaitGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WaitGroup")
            .field("count", &self.count())
            .finish()
    }
}
