//! `Multicast` subscription churn stress tests.

use crate::stress::{StressConfig, StressHarness, StressResult};
use foundation_threading::Multicast;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Worker 0 dispatches while every other worker subscribes and
/// unsubscribes its own handler.
///
/// A dispatch can never deliver to more subscribers than there are churn
/// threads, and every unsubscribe of a fresh registration must succeed.
///
/// # Examples
///
/// ```
/// use foundation_testing::stress::{StressConfig, sync::run_multicast_churn_stress};
///
/// let config = StressConfig::new().workers(4).rounds(200);
/// let result = run_multicast_churn_stress(config);
///
/// assert!(result.is_clean());
/// ```
#[must_use]
pub fn run_multicast_churn_stress(config: StressConfig) -> StressResult {
    let churners = config.get_workers().saturating_sub(1);
    let multicast = Arc::new(Multicast::<usize>::new());
    let deliveries = Arc::new(AtomicUsize::new(0));

    StressHarness::new(config).run(move |round| {
        if round.worker == 0 {
            return multicast.dispatch(&round.index) <= churners;
        }

        let sink = Arc::clone(&deliveries);
        let id = multicast.subscribe(move |_: &usize| {
            sink.fetch_add(1, Ordering::Relaxed);
        });
        multicast.unsubscribe(id)
    })
}
