use foundation_testing::stress::sync::{
    run_mailbox_stress, run_multicast_churn_stress, run_reset_signal_stress,
    run_reset_signal_timeout_stress,
};
use foundation_testing::stress::StressConfig;

use ntest::timeout;
use serial_test::serial;

#[test]
#[serial]
#[timeout(60000)]
fn mailbox_payloads_are_never_torn() {
    let config = StressConfig::new().workers(6).rounds(20_000).yield_frequency(64);
    let result = run_mailbox_stress(config);

    assert!(result.is_clean(), "{result}");
    assert_eq!(result.rounds(), config.planned_rounds());
}

#[test]
#[serial]
#[timeout(60000)]
fn reset_signal_survives_set_reset_churn() {
    let config = StressConfig::new().workers(6).rounds(500);
    let result = run_reset_signal_stress(config);

    assert!(result.is_clean(), "{result}");
}

#[test]
#[serial]
#[timeout(60000)]
fn reset_signal_timeouts_respect_deadline() {
    let config = StressConfig::new().workers(4).rounds(100);
    let result = run_reset_signal_timeout_stress(config);

    assert!(result.is_clean(), "{result}");
    assert_eq!(result.passed, config.planned_rounds());
}

#[test]
#[serial]
#[timeout(60000)]
fn multicast_churn_keeps_snapshots_bounded() {
    let config = StressConfig::new().workers(8).rounds(2_000);
    let result = run_multicast_churn_stress(config);

    assert!(result.is_clean(), "{result}");
}
