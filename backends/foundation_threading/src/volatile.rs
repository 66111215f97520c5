//! Volatile reads, volatile writes and full memory barriers.
//!
//! A "location" is always a caller-owned atomic cell; these functions never
//! allocate or own the memory they touch. A [`volatile_write`] on one thread
//! followed by a [`volatile_read`] on another thread that observes the
//! written value establishes a happens-before edge for that location. No
//! ordering across unrelated locations is promised except through
//! [`memory_barrier`].
//!
//! `i64` cells (`AtomicI64`) are only supported on targets with native
//! 64-bit atomics (`target_has_atomic = "64"`); elsewhere they are absent.
//!
//! Which primitive backs the operations is decided at build time through
//! [`PlatformOrdering`]:
//!
//! - [`AcquireRelease`]: dedicated `Acquire` loads and `Release` stores.
//! - [`FencedRelaxed`]: relaxed accesses bracketed by `SeqCst` fences. This is
//!   stronger than acquire/release and is selected with the
//!   `fenced_fallback` feature.
//!
//! # Examples
//!
//! ```
//! use core::sync::atomic::{AtomicBool, AtomicI32};
//! use foundation_threading::volatile::{volatile_read, volatile_write};
//!
//! let payload = AtomicI32::new(0);
//! let ready = AtomicBool::new(false);
//!
//! volatile_write(&payload, 42);
//! volatile_write(&ready, true);
//!
//! if volatile_read(&ready) {
//!     assert_eq!(volatile_read(&payload), 42);
//! }
//! ```

use core::fmt;
use core::sync::atomic::{fence, AtomicBool, AtomicI32, AtomicU32, AtomicU8, Ordering};

#[cfg(target_has_atomic = "64")]
use core::sync::atomic::AtomicI64;

/// A shared scalar cell that can be read and written with an explicit
/// memory ordering.
pub trait VolatileLocation {
    /// The scalar stored in the cell.
    type Value: Copy;

    /// Loads the current value using `order`.
    fn load_with(&self, order: Ordering) -> Self::Value;

    /// Stores `value` using `order`.
    fn store_with(&self, value: Self::Value, order: Ordering);
}

macro_rules! impl_volatile_location {
    ($($atomic:ty => $value:ty),+ $(,)?) => {
        $(
            impl VolatileLocation for $atomic {
                type Value = $value;

                #[inline]
                fn load_with(&self, order: Ordering) -> $value {
                    self.load(order)
                }

                #[inline]
                fn store_with(&self, value: $value, order: Ordering) {
                    self.store(value, order);
                }
            }
        )+
    };
}

impl_volatile_location! {
    AtomicBool => bool,
    AtomicI32 => i32,
    AtomicU32 => u32,
    AtomicU8 => u8,
}

#[cfg(target_has_atomic = "64")]
impl_volatile_location! {
    AtomicI64 => i64,
}

/// A 32-bit float stored as its bit pattern inside an [`AtomicU32`].
///
/// Values round-trip bit-exactly, so `-0.0` and NaN payloads survive.
#[derive(Default)]
pub struct AtomicF32 {
    bits: AtomicU32,
}

impl AtomicF32 {
    #[inline]
    #[must_use]
    pub const fn new(value: f32) -> Self {
        Self {
            bits: AtomicU32::new(value.to_bits()),
        }
    }

    #[inline]
    pub fn load(&self, order: Ordering) -> f32 {
        f32::from_bits(self.bits.load(order))
    }

    #[inline]
    pub fn store(&self, value: f32, order: Ordering) {
        self.bits.store(value.to_bits(), order);
    }

    /// Consumes the cell and returns the contained value.
    #[inline]
    #[must_use]
    pub fn into_inner(self) -> f32 {
        f32::from_bits(self.bits.into_inner())
    }
}

impl From<f32> for AtomicF32 {
    #[inline]
    fn from(value: f32) -> Self {
        Self::new(value)
    }
}

impl fmt::Debug for AtomicF32 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("AtomicF32")
            .field(&self.load(Ordering::Relaxed))
            .finish()
    }
}

impl_volatile_location! {
    AtomicF32 => f32,
}

/// How volatile reads, writes and barriers are realised on this build.
pub trait OrderingStrategy {
    /// Reads `location` with at least acquire visibility.
    fn read<L: VolatileLocation + ?Sized>(location: &L) -> L::Value;

    /// Writes `value` into `location` with at least release visibility.
    fn write<L: VolatileLocation + ?Sized>(location: &L, value: L::Value);

    /// Full bidirectional fence.
    #[inline]
    fn barrier() {
        fence(Ordering::SeqCst);
    }
}

/// Uses the dedicated `Acquire` load and `Release` store of each cell.
#[derive(Debug, Clone, Copy, Default)]
pub struct AcquireRelease;

impl OrderingStrategy for AcquireRelease {
    #[inline]
    fn read<L: VolatileLocation + ?Sized>(location: &L) -> L::Value {
        location.load_with(Ordering::Acquire)
    }

    #[inline]
    fn write<L: VolatileLocation + ?Sized>(location: &L, value: L::Value) {
        location.store_with(value, Ordering::Release);
    }
}

/// Relaxed accesses with a `SeqCst` fence on both sides.
///
/// The trailing fence of a read gives it acquire semantics and the leading
/// fence of a write gives it release semantics; the other fence keeps the
/// access from drifting in the opposite direction.
#[derive(Debug, Clone, Copy, Default)]
pub struct FencedRelaxed;

impl OrderingStrategy for FencedRelaxed {
    #[inline]
    fn read<L: VolatileLocation + ?Sized>(location: &L) -> L::Value {
        fence(Ordering::SeqCst);
        let value = location.load_with(Ordering::Relaxed);
        fence(Ordering::SeqCst);
        value
    }

    #[inline]
    fn write<L: VolatileLocation + ?Sized>(location: &L, value: L::Value) {
        fence(Ordering::SeqCst);
        location.store_with(value, Ordering::Relaxed);
        fence(Ordering::SeqCst);
    }
}

/// The ordering strategy compiled into this build.
#[cfg(not(feature = "fenced_fallback"))]
pub type PlatformOrdering = AcquireRelease;

/// The ordering strategy compiled into this build.
#[cfg(feature = "fenced_fallback")]
pub type PlatformOrdering = FencedRelaxed;

/// Reads the most recently published value of `location`.
#[inline]
pub fn volatile_read<L: VolatileLocation + ?Sized>(location: &L) -> L::Value {
    PlatformOrdering::read(location)
}

/// Publishes `value` into `location`; every write this thread made before
/// the call is visible to a thread whose [`volatile_read`] observes `value`.
#[inline]
pub fn volatile_write<L: VolatileLocation + ?Sized>(location: &L, value: L::Value) {
    PlatformOrdering::write(location, value);
}

/// Emits a full memory fence: no load or store moves across it.
#[inline]
pub fn memory_barrier() {
    PlatformOrdering::barrier();
}
