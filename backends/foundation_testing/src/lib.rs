//! Reusable stress testing infrastructure for the `foundation_threading`
//! primitives.
//!
//! This crate provides:
//! - **Stress harness**: workers released together, each playing a fixed
//!   number of rounds
//! - **Stress scenarios**: gate set/reset churn, publish/observe visibility
//!   checks and multicast subscription churn
//! - **Common scenarios**: a start gate for releasing workers together and
//!   a single-slot mailbox built on volatile reads and writes
//!
//! # Examples
//!
//! ```rust
//! use foundation_testing::stress::{StressConfig, StressHarness};
//! use std::sync::atomic::{AtomicUsize, Ordering};
//! use std::sync::Arc;
//!
//! let counter = Arc::new(AtomicUsize::new(0));
//! let harness = StressHarness::new(StressConfig::new().workers(10).rounds(1000));
//!
//! let sink = Arc::clone(&counter);
//! let result = harness.run(move |_round| {
//!     sink.fetch_add(1, Ordering::Relaxed);
//!     true
//! });
//!
//! assert_eq!(result.passed, 10_000);
//! assert!(result.is_clean());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)] // Common for testing crates

pub mod scenarios;
pub mod stress;

// Re-export commonly used items
pub use scenarios::{Mailbox, StartGate};
pub use stress::{Round, StressConfig, StressHarness, StressResult};
