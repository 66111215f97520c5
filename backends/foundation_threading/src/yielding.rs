//! Cooperative waiting helpers for spin loops.
//!
//! [`yield_to_ready_thread`] gives up the rest of the current time slice,
//! [`relaxed_sleep`] backs off for a short fixed duration, and
//! [`periodic_yield`] lets a busy loop yield every `frequency` iterations
//! instead of on every iteration or never.
//!
//! # Examples
//!
//! ```
//! use core::sync::atomic::AtomicBool;
//! use foundation_threading::volatile::volatile_read;
//! use foundation_threading::yielding::{periodic_yield, DEFAULT_YIELD_FREQUENCY};
//!
//! let done = AtomicBool::new(true);
//! let mut spins = 0u32;
//! while !volatile_read(&done) {
//!     periodic_yield(&mut spins, DEFAULT_YIELD_FREQUENCY);
//! }
//! ```

use core::time::Duration;

/// Default number of iterations between yields in [`periodic_yield`].
pub const DEFAULT_YIELD_FREQUENCY: u32 = 256;

/// Back-off used by [`relaxed_sleep`].
pub const RELAXED_SLEEP: Duration = Duration::from_millis(1);

/// Estimated cost of one `core::hint::spin_loop` on x86_64 (Skylake and
/// later), used to turn durations into spin counts when there is no clock.
///
/// This is an estimate, not a bound in either direction. Older x86 parts
/// and most ARM cores execute the hint far faster, so clockless waits built
/// on it end early there.
pub const SPIN_HINT_COST: Duration = Duration::from_nanos(35);

/// Number of spin-loop hints estimated to take `duration`, at least one.
#[must_use]
pub const fn spins_for(duration: Duration) -> u128 {
    let spins = duration.as_nanos() / SPIN_HINT_COST.as_nanos();
    if spins == 0 {
        1
    } else {
        spins
    }
}

/// Relinquishes the remainder of the current time slice to another ready
/// thread, if the scheduler has one.
///
/// Without `std` there is no scheduler to hand the slice to, so this issues a
/// CPU spin-loop hint instead.
#[inline]
pub fn yield_to_ready_thread() {
    #[cfg(feature = "std")]
    {
        std::thread::yield_now();
    }

    #[cfg(not(feature = "std"))]
    {
        core::hint::spin_loop();
    }
}

/// Sleeps for [`RELAXED_SLEEP`], a longer back-off than a yield.
///
/// With `std` the thread sleeps for at least that long. Without `std` it
/// spins for [`spins_for`]`(RELAXED_SLEEP)` hints, which only approximates
/// the duration; see [`SPIN_HINT_COST`].
#[inline]
pub fn relaxed_sleep() {
    #[cfg(feature = "std")]
    {
        std::thread::sleep(RELAXED_SLEEP);
    }

    #[cfg(not(feature = "std"))]
    {
        for _ in 0..spins_for(RELAXED_SLEEP) {
            core::hint::spin_loop();
        }
    }
}

/// Increments `counter` and yields when its previous value is a multiple of
/// `frequency`. Returns `true` when it yielded.
///
/// `frequency` must be a power of two: the check is
/// `counter & (frequency - 1) == 0`, which only matches modulo for powers of
/// two. Other values give a different (but harmless) yield cadence and are
/// not rejected.
#[inline]
pub fn periodic_yield(counter: &mut u32, frequency: u32) -> bool {
    let current = *counter;
    *counter = current.wrapping_add(1);

    if current & frequency.wrapping_sub(1) == 0 {
        yield_to_ready_thread();
        return true;
    }
    false
}

/// Spins until `condition` returns `true`, yielding every `frequency`
/// iterations. Returns the number of iterations spent.
pub fn spin_until<F>(mut condition: F, frequency: u32) -> u32
where
    F: FnMut() -> bool,
{
    let mut spins = SpinYield::with_frequency(frequency);
    while !condition() {
        core::hint::spin_loop();
        spins.tick();
    }
    spins.counter()
}

/// A spin counter that owns its cursor and yield frequency.
///
/// This is [`periodic_yield`] packaged for loops that would otherwise have
/// to carry the counter around themselves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpinYield {
    counter: u32,
    frequency: u32,
}

impl SpinYield {
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self::with_frequency(DEFAULT_YIELD_FREQUENCY)
    }

    /// `frequency` must be a power of two, see [`periodic_yield`].
    #[inline]
    #[must_use]
    pub const fn with_frequency(frequency: u32) -> Self {
        Self {
            counter: 0,
            frequency,
        }
    }

    /// Advances the counter by one, yielding on the configured cadence.
    #[inline]
    pub fn tick(&mut self) -> bool {
        periodic_yield(&mut self.counter, self.frequency)
    }

    #[inline]
    #[must_use]
    pub const fn counter(&self) -> u32 {
        self.counter
    }

    #[inline]
    #[must_use]
    pub const fn frequency(&self) -> u32 {
        self.frequency
    }

    #[inline]
    pub fn reset(&mut self) {
        self.counter = 0;
    }
}

impl Default for SpinYield {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}
