//! Manual-reset gate usable across threads.
//!
//! A [`ManualResetSignal`] starts unsignaled. [`set`](ManualResetSignal::set)
//! opens it and releases every current and future waiter until
//! [`reset`](ManualResetSignal::reset) closes it again. Disposing consumes the
//! gate, so it cannot be used afterwards.
//!
//! # Platform-Specific Behavior
//!
//! - **With std**: a `Mutex<bool>` paired with a `Condvar`; waiters sleep in
//!   the OS.
//! - **`no_std`**: an `AtomicBool` polled with periodic yields; timeouts are
//!   approximated by a spin budget.
//!
//! # Examples
//!
//! ```
//! use std::sync::Arc;
//! use std::thread;
//! use foundation_threading::ManualResetSignal;
//!
//! let gate = Arc::new(ManualResetSignal::new());
//!
//! let waiter_gate = Arc::clone(&gate);
//! let waiter = thread::spawn(move || waiter_gate.wait());
//!
//! gate.set();
//! waiter.join().unwrap();
//! ```

#[cfg(feature = "std")]
mod std_impl;
#[cfg(feature = "std")]
pub use std_impl::ManualResetSignal;

#[cfg(not(feature = "std"))]
mod nostd_impl;
#[cfg(not(feature = "std"))]
pub use nostd_impl::ManualResetSignal;

impl Default for ManualResetSignal {
    /// Creates an unsignaled gate.
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Debug for ManualResetSignal {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ManualResetSignal")
            .field("signaled", &self.is_set())
            .finish()
    }
}
