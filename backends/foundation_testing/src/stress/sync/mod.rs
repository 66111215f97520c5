//! Stress tests for the threading primitives.

pub mod multicast;
pub mod reset_signal;
pub mod visibility;

pub use multicast::run_multicast_churn_stress;
pub use reset_signal::{run_reset_signal_stress, run_reset_signal_timeout_stress};
pub use visibility::run_mailbox_stress;
