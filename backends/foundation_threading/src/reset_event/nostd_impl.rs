//! Spin backed gate for targets without an OS scheduler.

use core::sync::atomic::{AtomicBool, Ordering};
use core::time::Duration;

use crate::yielding::{spins_for, SpinYield};

/// Blocks waiters until signaled; stays open until reset.
pub struct ManualResetSignal {
    state: AtomicBool,
}

impl ManualResetSignal {
    #[must_use]
    pub const fn new() -> Self {
        Self::with_state(false)
    }

    #[must_use]
    pub const fn with_state(initially_set: bool) -> Self {
        Self {
            state: AtomicBool::new(initially_set),
        }
    }

    /// Returns `true` while the gate is signaled.
    #[inline]
    pub fn is_set(&self) -> bool {
        self.state.load(Ordering::Acquire)
    }

    /// Opens the gate; every polling waiter observes it on its next check.
    #[inline]
    pub fn set(&self) {
        if !self.state.swap(true, Ordering::AcqRel) {
            trace_debug!("ManualResetSignal set");
        }
    }

    /// Closes the gate; later waits block until the next `set`.
    #[inline]
    pub fn reset(&self) {
        self.state.store(false, Ordering::Release);
    }

    /// Spins, yielding periodically, until the gate is signaled.
    pub fn wait(&self) {
        let mut spins = SpinYield::new();
        while !self.is_set() {
            core::hint::spin_loop();
            spins.tick();
        }
    }

    /// Spins until the gate is signaled or the spin budget for `timeout`
    /// runs out.
    ///
    /// There is no clock here: the budget is [`spins_for`]`(timeout)` and the
    /// real time spent is only an estimate of `timeout`, possibly shorter.
    /// Returns whether the gate was observed signaled.
    pub fn wait_timeout(&self, timeout: Duration) -> bool {
        let budget = spins_for(timeout);
        let mut spins = SpinYield::new();

        let mut spent: u128 = 0;
        while spent < budget {
            if self.is_set() {
                return true;
            }
            core::hint::spin_loop();
            spins.tick();
            spent += 1;
        }

        let observed = self.is_set();
        if !observed {
            trace_debug!(?timeout, "ManualResetSignal wait timed out");
        }
        observed
    }

    /// Releases the gate.
    pub fn dispose(self) {
        drop(self);
    }
}
