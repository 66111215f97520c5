//! Feature gated wrappers over the `tracing` macros.
//!
//! Each level only expands to a `tracing` call when its `log_*` feature is
//! enabled, so hot paths compile to nothing when logging is turned off.

macro_rules! trace_debug {
    ($($arg:tt)+) => {
        #[cfg(feature = "log_debug")]
        {
            tracing::debug!($($arg)+);
        }
    };
}

macro_rules! trace_info {
    ($($arg:tt)+) => {
        #[cfg(feature = "log_info")]
        {
            tracing::info!($($arg)+);
        }
    };
}

macro_rules! trace_warn {
    ($($arg:tt)+) => {
        #[cfg(feature = "log_warnings")]
        {
            tracing::warn!($($arg)+);
        }
    };
}
