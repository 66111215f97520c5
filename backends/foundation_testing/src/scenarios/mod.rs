//! Common synchronization patterns built on the threading primitives.
//!
//! - [`StartGate`]: park a group of workers on a [`ManualResetSignal`] and
//!   release them together
//! - [`Mailbox`]: a single-producer single-consumer slot published with
//!   volatile writes
//!
//! [`ManualResetSignal`]: foundation_threading::ManualResetSignal

pub mod mailbox;
pub mod start_gate;

pub use mailbox::Mailbox;
pub use start_gate::StartGate;
