//! Shape of a stress run: how many workers, how many rounds each.

use foundation_threading::DEFAULT_YIELD_FREQUENCY;

/// Worker count, rounds per worker and the spin cadence busy-waiting
/// scenarios should use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StressConfig {
    workers: usize,
    rounds: usize,
    yield_frequency: u32,
}

impl StressConfig {
    /// Four workers, a thousand rounds each, yielding every
    /// [`DEFAULT_YIELD_FREQUENCY`] spins.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            workers: 4,
            rounds: 1000,
            yield_frequency: DEFAULT_YIELD_FREQUENCY,
        }
    }

    /// Number of worker threads.
    #[must_use]
    pub const fn workers(mut self, count: usize) -> Self {
        self.workers = count;
        self
    }

    /// Rounds each worker runs.
    #[must_use]
    pub const fn rounds(mut self, count: usize) -> Self {
        self.rounds = count;
        self
    }

    /// Spins between yields for scenarios that busy-wait on a partner.
    /// Must be a power of two.
    #[must_use]
    pub const fn yield_frequency(mut self, frequency: u32) -> Self {
        self.yield_frequency = frequency;
        self
    }

    /// Number of worker threads.
    #[must_use]
    pub const fn get_workers(&self) -> usize {
        self.workers
    }

    /// Rounds each worker runs.
    #[must_use]
    pub const fn get_rounds(&self) -> usize {
        self.rounds
    }

    /// Spins between yields.
    #[must_use]
    pub const fn get_yield_frequency(&self) -> u32 {
        self.yield_frequency
    }

    /// Rounds the whole run performs when no worker panics.
    #[must_use]
    pub const fn planned_rounds(&self) -> usize {
        self.workers.saturating_mul(self.rounds)
    }
}

impl Default for StressConfig {
    fn default() -> Self {
        Self::new()
    }
}
