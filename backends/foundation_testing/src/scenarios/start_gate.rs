//! Releasing a group of workers at the same instant.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use foundation_threading::{spin_until, ManualResetSignal, DEFAULT_YIELD_FREQUENCY};

/// Parks workers on a shared gate until [`StartGate::release`] opens it.
///
/// # Examples
///
/// ```
/// use foundation_testing::scenarios::StartGate;
///
/// let gate = StartGate::new();
/// let workers: Vec<_> = (0..3).map(|id| gate.spawn(move || id * 2)).collect();
///
/// gate.release(3);
///
/// let mut results: Vec<_> = workers.into_iter().map(|w| w.join().unwrap()).collect();
/// results.sort_unstable();
/// assert_eq!(results, vec![0, 2, 4]);
/// ```
#[derive(Clone, Default)]
pub struct StartGate {
    inner: Arc<Inner>,
}

#[derive(Default)]
struct Inner {
    signal: ManualResetSignal,
    parked: AtomicUsize,
}

impl StartGate {
    /// Creates a closed gate with no parked workers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Spawns a worker that blocks on the gate before running `work`.
    pub fn spawn<F, R>(&self, work: F) -> JoinHandle<R>
    where
        F: FnOnce() -> R + Send + 'static,
        R: Send + 'static,
    {
        let inner = Arc::clone(&self.inner);
        thread::spawn(move || {
            inner.parked.fetch_add(1, Ordering::AcqRel);
            inner.signal.wait();
            work()
        })
    }

    /// Number of workers that have reached the gate.
    #[must_use]
    pub fn parked(&self) -> usize {
        self.inner.parked.load(Ordering::Acquire)
    }

    /// Waits until `expected` workers are parked, then opens the gate.
    pub fn release(&self, expected: usize) {
        spin_until(|| self.parked() >= expected, DEFAULT_YIELD_FREQUENCY);
        tracing::debug!(expected, "StartGate releasing workers");
        self.inner.signal.set();
    }

    /// `true` once [`release`](Self::release) has opened the gate.
    #[must_use]
    pub fn is_released(&self) -> bool {
        self.inner.signal.is_set()
    }

    /// Closes the gate again so a new group can be parked.
    pub fn rearm(&self) {
        self.inner.signal.reset();
        self.inner.parked.store(0, Ordering::Release);
    }
}
