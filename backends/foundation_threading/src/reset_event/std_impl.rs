//! Condvar backed gate for targets with an OS scheduler.

use std::sync::{Condvar, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

/// Blocks waiters until signaled; stays open until reset.
///
/// The state is a single boolean, so a panic while the lock was held cannot
/// leave it half-updated and poisoning is ignored.
pub struct ManualResetSignal {
    /// Wakes every sleeping waiter on `set`.
    event: Condvar,

    /// `true` while the gate is signaled.
    state: Mutex<bool>,
}

impl ManualResetSignal {
    #[must_use]
    pub fn new() -> Self {
        Self::with_state(false)
    }

    #[must_use]
    pub fn with_state(initially_set: bool) -> Self {
        Self {
            event: Condvar::new(),
            state: Mutex::new(initially_set),
        }
    }

    fn lock(&self) -> MutexGuard<'_, bool> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Returns `true` while the gate is signaled.
    pub fn is_set(&self) -> bool {
        *self.lock()
    }

    /// Opens the gate and wakes every waiter.
    pub fn set(&self) {
        let mut signaled = self.lock();
        if !*signaled {
            *signaled = true;
            trace_debug!("ManualResetSignal set");
        }
        drop(signaled);
        self.event.notify_all();
    }

    /// Closes the gate; later waits block until the next `set`.
    pub fn reset(&self) {
        let mut signaled = self.lock();
        *signaled = false;
        drop(signaled);
    }

    /// Blocks until the gate is signaled.
    pub fn wait(&self) {
        let mut signaled = self.lock();
        while !*signaled {
            signaled = self
                .event
                .wait(signaled)
                .unwrap_or_else(PoisonError::into_inner);
        }
    }

    /// Blocks until the gate is signaled or `timeout` elapses.
    ///
    /// Returns whether the gate was observed signaled. The gate may have been
    /// set and reset again in between, so callers that need the current state
    /// should check [`is_set`](Self::is_set).
    pub fn wait_timeout(&self, timeout: Duration) -> bool {
        let deadline = Instant::now().checked_add(timeout);
        let mut signaled = self.lock();

        while !*signaled {
            let remaining = match deadline {
                Some(deadline) => deadline.saturating_duration_since(Instant::now()),
                // Timeouts past the representable horizon behave like `wait`.
                None => timeout,
            };
            if remaining.is_zero() {
                trace_debug!(?timeout, "ManualResetSignal wait timed out");
                return false;
            }

            let (guard, _) = self
                .event
                .wait_timeout(signaled, remaining)
                .unwrap_or_else(PoisonError::into_inner);
            signaled = guard;
        }
        true
    }

    /// Releases the gate.
    ///
    /// Taking `self` by value means no other borrow, and therefore no
    /// waiter, can be alive at this point.
    pub fn dispose(self) {
        trace_debug!(signaled = self.is_set(), "ManualResetSignal disposed");
        drop(self);
    }
}
