//! Contention harness for the threading primitives.
//!
//! A run parks a fixed crew of workers behind a [`StartGate`] so they all
//! hit the primitive under test at once, then has each worker play a fixed
//! number of [`Round`]s. Scenarios branch on [`Round::worker`] to give
//! workers different roles (a dispatcher and churners, producer and consumer
//! pairs) and report each round as passed or failed.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Instant;

use crate::scenarios::StartGate;

pub mod config;
pub mod sync;

pub use config::StressConfig;

/// One step of one worker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Round {
    /// Index of the worker playing this round, `0..workers`.
    pub worker: usize,
    /// Round number within that worker, `0..rounds`.
    pub index: usize,
}

impl Round {
    /// `index` as a `u32` sequence number, saturating.
    #[must_use]
    pub fn sequence(&self) -> u32 {
        u32::try_from(self.index).unwrap_or(u32::MAX)
    }
}

/// Tally of a finished run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
#[display("{passed} passed, {failed} failed, {panicked}/{workers} workers panicked")]
pub struct StressResult {
    /// Rounds that reported success.
    pub passed: usize,
    /// Rounds that reported failure.
    pub failed: usize,
    /// Workers that panicked; their remaining rounds never ran.
    pub panicked: usize,
    /// Workers the run started.
    pub workers: usize,
}

impl StressResult {
    /// Rounds that ran to completion, passed or failed.
    #[must_use]
    pub const fn rounds(&self) -> usize {
        self.passed + self.failed
    }

    /// `true` when every round passed and no worker panicked.
    #[must_use]
    pub const fn is_clean(&self) -> bool {
        self.failed == 0 && self.panicked == 0
    }
}

/// Runs a round function on every worker of a [`StressConfig`].
pub struct StressHarness {
    config: StressConfig,
}

impl StressHarness {
    /// Creates a harness for `config`.
    #[must_use]
    pub const fn new(config: StressConfig) -> Self {
        Self { config }
    }

    /// Releases the workers together and plays every round.
    ///
    /// `play` returns whether the round passed. A worker that panics stops
    /// early and is counted in [`StressResult::panicked`].
    ///
    /// # Examples
    ///
    /// ```
    /// use foundation_testing::stress::{StressConfig, StressHarness};
    ///
    /// let harness = StressHarness::new(StressConfig::new().workers(4).rounds(100));
    /// let result = harness.run(|round| round.index % 10 != 9);
    ///
    /// assert_eq!(result.passed, 360);
    /// assert_eq!(result.failed, 40);
    /// ```
    pub fn run<F>(&self, play: F) -> StressResult
    where
        F: Fn(Round) -> bool + Send + Sync + 'static,
    {
        let workers = self.config.get_workers();
        let rounds = self.config.get_rounds();
        let play = Arc::new(play);
        let passed = Arc::new(AtomicUsize::new(0));
        let failed = Arc::new(AtomicUsize::new(0));

        let gate = StartGate::new();
        let handles: Vec<_> = (0..workers)
            .map(|worker| {
                let play = Arc::clone(&play);
                let passed = Arc::clone(&passed);
                let failed = Arc::clone(&failed);
                gate.spawn(move || {
                    for index in 0..rounds {
                        let tally = if play(Round { worker, index }) {
                            &passed
                        } else {
                            &failed
                        };
                        tally.fetch_add(1, Ordering::Relaxed);
                    }
                })
            })
            .collect();

        gate.release(workers);
        let started = Instant::now();

        let mut panicked = 0;
        for (worker, handle) in handles.into_iter().enumerate() {
            if handle.join().is_err() {
                tracing::warn!(worker, "stress worker panicked");
                panicked += 1;
            }
        }

        let result = StressResult {
            passed: passed.load(Ordering::Relaxed),
            failed: failed.load(Ordering::Relaxed),
            panicked,
            workers,
        };
        tracing::info!(%result, elapsed = ?started.elapsed(), "stress run finished");
        result
    }
}
