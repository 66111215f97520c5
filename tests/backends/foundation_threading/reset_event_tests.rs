use foundation_threading::ManualResetSignal;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::mpsc;
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use ntest::timeout;
use serial_test::serial;

#[test]
#[serial]
#[timeout(10000)]
fn wait_blocks_until_set_and_blocks_again_after_reset() {
    let gate = Arc::new(ManualResetSignal::new());
    let released = Arc::new(AtomicBool::new(false));
    let (started_tx, started_rx) = mpsc::channel::<()>();

    let waiter = {
        let gate = Arc::clone(&gate);
        let released = Arc::clone(&released);
        thread::spawn(move || {
            started_tx.send(()).expect("should send");
            gate.wait();
            released.store(true, Ordering::Release);
        })
    };

    started_rx.recv().expect("waiter should start");
    thread::sleep(Duration::from_millis(100));
    assert!(!released.load(Ordering::Acquire), "waiter must block before set");

    gate.set();
    waiter.join().expect("waiter should finish");
    assert!(released.load(Ordering::Acquire));

    gate.reset();
    let (done_tx, done_rx) = mpsc::channel::<()>();
    let second = {
        let gate = Arc::clone(&gate);
        thread::spawn(move || {
            gate.wait();
            done_tx.send(()).expect("should send");
        })
    };

    assert!(
        done_rx.recv_timeout(Duration::from_millis(100)).is_err(),
        "wait after reset must block again"
    );
    gate.set();
    done_rx
        .recv_timeout(Duration::from_secs(5))
        .expect("set should release the second waiter");
    second.join().expect("second waiter should finish");
}

#[test]
#[serial]
#[timeout(10000)]
fn set_releases_every_blocked_waiter() {
    const WAITERS: usize = 8;

    let gate = Arc::new(ManualResetSignal::new());
    let parked = Arc::new(AtomicUsize::new(0));
    let released = Arc::new(AtomicUsize::new(0));

    let handles: Vec<_> = (0..WAITERS)
        .map(|_| {
            let gate = Arc::clone(&gate);
            let parked = Arc::clone(&parked);
            let released = Arc::clone(&released);
            thread::spawn(move || {
                parked.fetch_add(1, Ordering::AcqRel);
                gate.wait();
                released.fetch_add(1, Ordering::AcqRel);
            })
        })
        .collect();

    while parked.load(Ordering::Acquire) < WAITERS {
        thread::yield_now();
    }
    thread::sleep(Duration::from_millis(50));
    assert_eq!(released.load(Ordering::Acquire), 0);

    gate.set();
    for handle in handles {
        handle.join().expect("waiter should finish");
    }
    assert_eq!(released.load(Ordering::Acquire), WAITERS);
}

#[test]
#[serial]
fn wait_timeout_on_unsignaled_gate_times_out() {
    let gate = ManualResetSignal::new();

    let started = Instant::now();
    assert!(!gate.wait_timeout(Duration::from_millis(50)));
    assert!(started.elapsed() >= Duration::from_millis(50));

    assert!(!gate.wait_timeout(Duration::ZERO));
}

#[test]
#[serial]
#[timeout(10000)]
fn wait_timeout_returns_true_when_set_in_time() {
    let gate = Arc::new(ManualResetSignal::new());

    let setter = {
        let gate = Arc::clone(&gate);
        thread::spawn(move || {
            thread::sleep(Duration::from_millis(20));
            gate.set();
        })
    };

    assert!(gate.wait_timeout(Duration::from_secs(5)));
    setter.join().expect("setter should finish");
}

#[test]
fn dispose_after_last_waiter_is_gone() {
    let gate = Arc::new(ManualResetSignal::with_state(true));
    let waiter = {
        let gate = Arc::clone(&gate);
        thread::spawn(move || gate.wait())
    };
    waiter.join().expect("waiter should finish");

    let gate = Arc::try_unwrap(gate).expect("no other owners remain");
    gate.dispose();
}
