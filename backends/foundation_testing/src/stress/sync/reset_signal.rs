//! `ManualResetSignal` stress tests.

use crate::stress::{StressConfig, StressHarness, StressResult};
use foundation_threading::{volatile_read, volatile_write, yield_to_ready_thread, ManualResetSignal};
use std::sync::atomic::AtomicU32;
use std::sync::Arc;
use std::time::Duration;

/// Runs set/reset cycles against a crowd of timed waiters.
///
/// Worker 0 repeatedly publishes a new generation, sets the gate, yields and
/// resets it. Every other worker waits with a short timeout; a wait that
/// reports the gate signaled must also observe a published generation.
///
/// # Examples
///
/// ```
/// use foundation_testing::stress::{StressConfig, sync::run_reset_signal_stress};
///
/// let config = StressConfig::new().workers(4).rounds(50);
/// let result = run_reset_signal_stress(config);
///
/// assert!(result.is_clean());
/// ```
#[must_use]
pub fn run_reset_signal_stress(config: StressConfig) -> StressResult {
    let gate = Arc::new(ManualResetSignal::new());
    let generation = Arc::new(AtomicU32::new(0));

    StressHarness::new(config).run(move |round| {
        if round.worker == 0 {
            let next = round.sequence().saturating_add(1);
            volatile_write(&*generation, next);
            gate.set();
            yield_to_ready_thread();
            gate.reset();
            return true;
        }

        if gate.wait_timeout(Duration::from_millis(2)) {
            // The generation is written before every `set`.
            volatile_read(&*generation) > 0
        } else {
            true
        }
    })
}

/// Runs timed waits against a gate that is never set.
///
/// Every wait must report a timeout and must not return before its
/// deadline.
#[must_use]
pub fn run_reset_signal_timeout_stress(config: StressConfig) -> StressResult {
    let gate = Arc::new(ManualResetSignal::new());
    let timeout = Duration::from_micros(500);

    StressHarness::new(config).run(move |_| {
        let started = std::time::Instant::now();
        let signaled = gate.wait_timeout(timeout);
        !signaled && started.elapsed() >= timeout
    })
}
