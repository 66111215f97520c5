use foundation_threading::{
    periodic_yield, relaxed_sleep, spin_until, volatile_read, volatile_write,
    yield_to_ready_thread, SpinYield, DEFAULT_YIELD_FREQUENCY, RELAXED_SLEEP,
};
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use std::thread;
use std::time::Instant;

use ntest::timeout;
use serial_test::serial;

#[test]
fn periodic_yield_fires_on_multiples_of_frequency() {
    let mut counter = 0u32;
    let fired: Vec<usize> = (1..=9)
        .filter(|_| periodic_yield(&mut counter, 4))
        .collect();

    // 1st, 5th and 9th calls see counter values 0, 4 and 8.
    assert_eq!(fired, vec![1, 5, 9]);
    assert_eq!(counter, 9);
}

#[test]
fn default_frequency_yields_once_per_256() {
    let mut spin = SpinYield::new();
    let yields = (0..1024).filter(|_| spin.tick()).count();
    assert_eq!(yields, 1024 / DEFAULT_YIELD_FREQUENCY as usize);
}

#[test]
#[serial]
fn relaxed_sleep_backs_off_for_at_least_its_duration() {
    let started = Instant::now();
    relaxed_sleep();
    assert!(started.elapsed() >= RELAXED_SLEEP);

    // A yield never sleeps for long.
    yield_to_ready_thread();
}

#[test]
#[timeout(10000)]
fn spin_until_observes_flag_from_other_thread() {
    let flag = Arc::new(AtomicBool::new(false));

    let setter = {
        let flag = Arc::clone(&flag);
        thread::spawn(move || {
            relaxed_sleep();
            volatile_write(&*flag, true);
        })
    };

    spin_until(|| volatile_read(&*flag), 64);
    assert!(volatile_read(&*flag));
    setter.join().expect("setter should finish");
}
