//! Low-level threading primitives shared by higher level game and UI code.
//!
//! The crate is split into four independent leaves:
//!
//! - [`volatile`]: acquire/release reads and writes over caller-owned atomic
//!   cells plus a full memory barrier, with the ordering strategy picked at
//!   build time.
//! - [`yielding`]: yield/sleep helpers and a periodic-yield spin helper.
//! - [`reset_event`]: [`ManualResetSignal`], a resettable gate that blocks
//!   waiters until it is set.
//! - [`multicast`]: [`Multicast`], an observer list whose dispatch runs over
//!   a snapshot of its subscribers.
//!
//! # Features
//!
//! - `std` (default): blocking waits use `std::sync::{Mutex, Condvar}` and
//!   yields go through the OS scheduler.
//! - `fenced_fallback`: use fence-bracketed relaxed accesses instead of
//!   acquire/release loads and stores.
//! - `standard` / `debug_trace`: tracing levels emitted by the crate.

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

#[macro_use]
mod trace;

pub mod errors;
pub mod multicast;
pub mod reset_event;
pub mod volatile;
pub mod yielding;

pub use errors::DispatchError;
pub use multicast::{
    safe_raise, safe_raise_with, FallibleMulticast, Multicast, SubscriptionId,
};
pub use reset_event::ManualResetSignal;
pub use volatile::{
    memory_barrier, volatile_read, volatile_write, AcquireRelease, AtomicF32, FencedRelaxed,
    OrderingStrategy, PlatformOrdering, VolatileLocation,
};
pub use yielding::{
    periodic_yield, relaxed_sleep, spin_until, spins_for, yield_to_ready_thread, SpinYield,
    DEFAULT_YIELD_FREQUENCY, RELAXED_SLEEP, SPIN_HINT_COST,
};
