//! Observer lists with snapshot-isolated dispatch.
//!
//! [`Multicast`] holds an ordered list of subscribers. Each dispatch copies
//! the list once under the lock, releases the lock and then invokes the copy,
//! so subscribers may subscribe or unsubscribe (themselves or others) while
//! being invoked without affecting who receives the dispatch in progress.
//!
//! Subscribers registered with [`Multicast::subscribe_weak`] are held by a
//! [`Weak`] pointer; once their target is dropped they resolve to nothing and
//! are skipped.
//!
//! A panicking subscriber is not caught: it unwinds out of `dispatch` and
//! later subscribers in that snapshot are not invoked. [`FallibleMulticast`]
//! offers the same contract for subscribers that return `Result`.
//!
//! # Examples
//!
//! ```
//! use std::sync::atomic::{AtomicUsize, Ordering};
//! use std::sync::Arc;
//! use foundation_threading::multicast::{safe_raise_with, Multicast};
//!
//! let total = Arc::new(AtomicUsize::new(0));
//! let on_score: Multicast<usize> = Multicast::new();
//!
//! let sink = Arc::clone(&total);
//! on_score.subscribe(move |points: &usize| {
//!     sink.fetch_add(*points, Ordering::Relaxed);
//! });
//!
//! assert_eq!(safe_raise_with(Some(&on_score), &5), 1);
//! assert_eq!(safe_raise_with(None::<&Multicast<usize>>, &5), 0);
//! assert_eq!(total.load(Ordering::Relaxed), 5);
//! ```

use alloc::sync::{Arc, Weak};
use alloc::vec::Vec;
use core::fmt;

use spin::Mutex;

use crate::errors::DispatchError;

/// Shared handle to an infallible subscriber.
pub type Handler<A> = Arc<dyn Fn(&A) + Send + Sync>;

/// Shared handle to a subscriber that can fail.
pub type FallibleHandler<A, E> = Arc<dyn Fn(&A) -> Result<(), E> + Send + Sync>;

/// Identifies one registration within a single list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(usize);

impl SubscriptionId {
    #[must_use]
    pub const fn get(&self) -> usize {
        self.0
    }
}

enum Slot<H: ?Sized> {
    Strong(Arc<H>),
    Weak(Weak<H>),
}

impl<H: ?Sized> Clone for Slot<H> {
    fn clone(&self) -> Self {
        match self {
            Self::Strong(handler) => Self::Strong(Arc::clone(handler)),
            Self::Weak(handler) => Self::Weak(Weak::clone(handler)),
        }
    }
}

impl<H: ?Sized> Slot<H> {
    /// The live handler, or `None` when a weak target has been dropped.
    fn resolve(&self) -> Option<Arc<H>> {
        match self {
            Self::Strong(handler) => Some(Arc::clone(handler)),
            Self::Weak(handler) => handler.upgrade(),
        }
    }

    fn is_dead(&self) -> bool {
        matches!(self, Self::Weak(handler) if handler.strong_count() == 0)
    }
}

struct Entries<H: ?Sized> {
    next_id: usize,
    slots: Vec<(SubscriptionId, Slot<H>)>,
}

impl<H: ?Sized> Entries<H> {
    /// Forgets weak registrations whose target is gone.
    ///
    /// Dropping a dead `Weak` never runs handler code, so this is safe
    /// under the lock.
    fn prune_dead(&mut self) {
        self.slots.retain(|(_, slot)| !slot.is_dead());
    }
}

/// The lock-protected registration list shared by both multicast flavours.
///
/// Removed handlers are always dropped after the lock is released: a
/// handler may own state whose `Drop` re-enters the list.
struct SubscriberList<H: ?Sized> {
    entries: Mutex<Entries<H>>,
}

impl<H: ?Sized> SubscriberList<H> {
    const fn new() -> Self {
        Self {
            entries: Mutex::new(Entries {
                next_id: 0,
                slots: Vec::new(),
            }),
        }
    }

    fn insert(&self, slot: Slot<H>) -> SubscriptionId {
        let mut entries = self.entries.lock();
        entries.prune_dead();
        let id = SubscriptionId(entries.next_id);
        entries.next_id = entries.next_id.wrapping_add(1);
        entries.slots.push((id, slot));
        id
    }

    fn remove(&self, id: SubscriptionId) -> bool {
        let mut entries = self.entries.lock();
        entries.prune_dead();
        let found = entries.slots.iter().position(|(slot_id, _)| *slot_id == id);
        let removed = found.map(|position| entries.slots.remove(position));
        drop(entries);

        removed.is_some()
    }

    fn clear(&self) -> usize {
        let mut entries = self.entries.lock();
        let removed = core::mem::take(&mut entries.slots);
        drop(entries);

        removed.iter().filter(|(_, slot)| !slot.is_dead()).count()
    }

    /// Registrations whose handler is still alive.
    fn len(&self) -> usize {
        let entries = self.entries.lock();
        entries.slots.iter().filter(|(_, slot)| !slot.is_dead()).count()
    }

    /// Copies the current live registrations, in subscription order.
    ///
    /// The lock is released before the copy is returned, so invoking the
    /// snapshot can re-enter the list.
    fn snapshot(&self) -> Vec<Slot<H>> {
        let mut entries = self.entries.lock();
        entries.prune_dead();
        entries.slots.iter().map(|(_, slot)| slot.clone()).collect()
    }
}

/// An ordered list of `Fn(&A)` subscribers.
pub struct Multicast<A> {
    subscribers: SubscriberList<dyn Fn(&A) + Send + Sync>,
}

impl<A> Multicast<A> {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            subscribers: SubscriberList::new(),
        }
    }

    /// Appends `handler` to the list and returns its registration id.
    pub fn subscribe<F>(&self, handler: F) -> SubscriptionId
    where
        F: Fn(&A) + Send + Sync + 'static,
    {
        self.subscribe_handler(Arc::new(handler))
    }

    /// Appends an already shared handler.
    pub fn subscribe_handler(&self, handler: Handler<A>) -> SubscriptionId {
        self.subscribers.insert(Slot::Strong(handler))
    }

    /// Appends `handler` without keeping it alive. Once every strong
    /// reference is dropped the registration is skipped on dispatch and
    /// forgotten the next time the list is touched.
    pub fn subscribe_weak(&self, handler: &Handler<A>) -> SubscriptionId {
        self.subscribers.insert(Slot::Weak(Arc::downgrade(handler)))
    }

    /// Removes a registration. Returns `false` if `id` was not registered.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.subscribers.remove(id)
    }

    /// Removes every registration.
    pub fn clear(&self) {
        let removed = self.subscribers.clear();
        trace_info!(removed, "Multicast cleared");
    }

    /// Number of live registrations; weak ones whose target is gone are
    /// not counted.
    pub fn len(&self) -> usize {
        self.subscribers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Invokes every subscriber captured at the start of the call, in
    /// subscription order, and returns how many were invoked.
    ///
    /// Changes made to the list while dispatching only affect later
    /// dispatches.
    pub fn dispatch(&self, arg: &A) -> usize {
        let snapshot = self.subscribers.snapshot();

        let mut delivered = 0;
        for slot in &snapshot {
            let Some(handler) = slot.resolve() else {
                continue;
            };
            handler(arg);
            delivered += 1;
        }

        trace_debug!(
            captured = snapshot.len(),
            delivered,
            "Multicast dispatched"
        );
        delivered
    }
}

impl Multicast<()> {
    /// Dispatches to zero-argument style subscribers.
    pub fn raise(&self) -> usize {
        self.dispatch(&())
    }
}

impl<A> Default for Multicast<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A> fmt::Debug for Multicast<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Multicast")
            .field("subscribers", &self.len())
            .finish()
    }
}

/// An ordered list of subscribers returning `Result<(), E>`.
pub struct FallibleMulticast<A, E> {
    subscribers: SubscriberList<dyn Fn(&A) -> Result<(), E> + Send + Sync>,
}

impl<A, E> FallibleMulticast<A, E> {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            subscribers: SubscriberList::new(),
        }
    }

    pub fn subscribe<F>(&self, handler: F) -> SubscriptionId
    where
        F: Fn(&A) -> Result<(), E> + Send + Sync + 'static,
    {
        self.subscribe_handler(Arc::new(handler))
    }

    pub fn subscribe_handler(&self, handler: FallibleHandler<A, E>) -> SubscriptionId {
        self.subscribers.insert(Slot::Strong(handler))
    }

    pub fn subscribe_weak(&self, handler: &FallibleHandler<A, E>) -> SubscriptionId {
        self.subscribers.insert(Slot::Weak(Arc::downgrade(handler)))
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.subscribers.remove(id)
    }

    pub fn clear(&self) {
        self.subscribers.clear();
    }

    pub fn len(&self) -> usize {
        self.subscribers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Invokes the snapshot in order until a subscriber fails.
    ///
    /// Returns how many subscribers were invoked, or the first failure
    /// together with its position in the snapshot. Subscribers after the
    /// failing one are not invoked.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError`] wrapping the first subscriber error.
    pub fn try_dispatch(&self, arg: &A) -> Result<usize, DispatchError<E>> {
        let snapshot = self.subscribers.snapshot();

        let mut delivered = 0;
        for (index, slot) in snapshot.iter().enumerate() {
            let Some(handler) = slot.resolve() else {
                continue;
            };
            if let Err(source) = handler(arg) {
                trace_warn!(index, delivered, "FallibleMulticast subscriber failed");
                return Err(DispatchError::new(index, source));
            }
            delivered += 1;
        }
        Ok(delivered)
    }
}

impl<A, E> Default for FallibleMulticast<A, E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A, E> fmt::Debug for FallibleMulticast<A, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FallibleMulticast")
            .field("subscribers", &self.len())
            .finish()
    }
}

/// Raises a possibly absent zero-argument multicast.
///
/// `None` means nobody ever subscribed and is not an error.
pub fn safe_raise(multicast: Option<&Multicast<()>>) -> usize {
    multicast.map_or(0, Multicast::raise)
}

/// Raises a possibly absent multicast with `arg`.
pub fn safe_raise_with<A>(multicast: Option<&Multicast<A>>, arg: &A) -> usize {
    multicast.map_or(0, |multicast| multicast.dispatch(arg))
}
