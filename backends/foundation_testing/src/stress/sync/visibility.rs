//! Publish/observe visibility stress tests.

use crate::scenarios::Mailbox;
use crate::stress::{StressConfig, StressHarness, StressResult};
use foundation_threading::SpinYield;
use std::sync::Arc;

// Upper bound on spins while waiting for the paired worker, so a partner
// that stopped early turns into a failure instead of a hang.
const MAX_PAIR_SPINS: u32 = 50_000_000;

/// Pairs workers as producer (even id) and consumer (odd id) over a
/// [`Mailbox`] each, and checks every received payload word.
///
/// An unpaired last worker has nothing to do and reports success.
///
/// # Examples
///
/// ```
/// use foundation_testing::stress::{StressConfig, sync::run_mailbox_stress};
///
/// let config = StressConfig::new().workers(4).rounds(200);
/// let result = run_mailbox_stress(config);
///
/// assert!(result.is_clean());
/// ```
#[must_use]
pub fn run_mailbox_stress(config: StressConfig) -> StressResult {
    let pairs = config.get_workers() / 2;
    let frequency = config.get_yield_frequency();
    let mailboxes: Arc<Vec<Mailbox>> = Arc::new((0..pairs).map(|_| Mailbox::new()).collect());

    StressHarness::new(config).run(move |round| {
        let Some(mailbox) = mailboxes.get(round.worker / 2) else {
            return true;
        };
        let seq = round.sequence();

        let mut spins = SpinYield::with_frequency(frequency);
        if round.worker % 2 == 0 {
            while !mailbox.try_post(seq) {
                if spins.tick() && spins.counter() >= MAX_PAIR_SPINS {
                    return false;
                }
            }
            return true;
        }

        loop {
            if let Some(words) = mailbox.try_take() {
                return words == Mailbox::expand(seq);
            }
            if spins.tick() && spins.counter() >= MAX_PAIR_SPINS {
                return false;
            }
        }
    })
}
