use foundation_threading::{
    memory_barrier, volatile_read, volatile_write, AtomicF32, FencedRelaxed, OrderingStrategy,
};
use std::sync::atomic::{AtomicBool, AtomicI32, AtomicI64, AtomicU32, AtomicU8};
use std::sync::Arc;
use std::thread;

use ntest::timeout;

#[test]
fn round_trip_every_supported_scalar() {
    let flag = AtomicBool::new(false);
    let signed = AtomicI32::new(0);
    let unsigned = AtomicU32::new(0);
    let wide = AtomicI64::new(0);
    let byte = AtomicU8::new(0);
    let float = AtomicF32::default();

    volatile_write(&flag, true);
    volatile_write(&signed, i32::MIN);
    volatile_write(&unsigned, 0xDEAD_BEEF);
    volatile_write(&wide, -9_000_000_000);
    volatile_write(&byte, 255);
    volatile_write(&float, -1.5);

    assert!(volatile_read(&flag));
    assert_eq!(volatile_read(&signed), i32::MIN);
    assert_eq!(volatile_read(&unsigned), 0xDEAD_BEEF);
    assert_eq!(volatile_read(&wide), -9_000_000_000);
    assert_eq!(volatile_read(&byte), 255);
    assert_eq!(volatile_read(&float).to_bits(), (-1.5f32).to_bits());
}

/// A writer fills N distinct cells and then raises a flag; a reader that
/// observes the flag must observe every cell.
#[test]
#[timeout(20000)]
fn flag_publication_orders_prior_writes() {
    const CELLS: usize = 16;

    for round in 1..=200i64 {
        let cells: Arc<Vec<AtomicI64>> = Arc::new((0..CELLS).map(|_| AtomicI64::new(0)).collect());
        let floats: Arc<Vec<AtomicF32>> =
            Arc::new((0..CELLS).map(|_| AtomicF32::new(0.0)).collect());
        let ready = Arc::new(AtomicBool::new(false));

        let reader = {
            let cells = Arc::clone(&cells);
            let floats = Arc::clone(&floats);
            let ready = Arc::clone(&ready);
            thread::spawn(move || {
                while !volatile_read(&*ready) {
                    std::hint::spin_loop();
                }
                memory_barrier();
                let ints: Vec<i64> = cells.iter().map(|cell| volatile_read(cell)).collect();
                let reals: Vec<f32> = floats.iter().map(|cell| volatile_read(cell)).collect();
                (ints, reals)
            })
        };

        for (index, (cell, float)) in cells.iter().zip(floats.iter()).enumerate() {
            let index = i64::try_from(index).expect("small index");
            volatile_write(cell, round * 100 + index);
            #[allow(clippy::cast_precision_loss)]
            volatile_write(float, (round * 100 + index) as f32);
        }
        volatile_write(&*ready, true);

        let (ints, reals) = reader.join().expect("reader should finish");
        for (index, (int, real)) in ints.iter().zip(reals.iter()).enumerate() {
            let index = i64::try_from(index).expect("small index");
            assert_eq!(*int, round * 100 + index);
            #[allow(clippy::cast_precision_loss)]
            let expected = (round * 100 + index) as f32;
            assert_eq!(real.to_bits(), expected.to_bits());
        }
    }
}

#[test]
#[timeout(20000)]
fn fenced_strategy_publishes_across_threads() {
    let payload = Arc::new(AtomicU32::new(0));
    let ready = Arc::new(AtomicBool::new(false));

    let writer = {
        let payload = Arc::clone(&payload);
        let ready = Arc::clone(&ready);
        thread::spawn(move || {
            FencedRelaxed::write(&*payload, 4242);
            FencedRelaxed::write(&*ready, true);
        })
    };

    while !FencedRelaxed::read(&*ready) {
        std::hint::spin_loop();
    }
    assert_eq!(FencedRelaxed::read(&*payload), 4242);
    writer.join().expect("writer should finish");
}
