// ============================================================================
// spark-structures - StateSlot
// A single slot of externally managed state with copy-on-write updates
// ============================================================================
//
// The slot owns an `Rc<S>` snapshot. Readers clone the Rc and keep an
// immutable view for as long as they like. Writers go through `dispatch`,
// which uses `Rc::make_mut`: the state is mutated in place when nobody else
// holds the snapshot, and copied first when someone does. Either way the
// slot ends up pointing at the new authoritative snapshot.
// ============================================================================

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};

use tracing::trace;

use crate::core::context::with_context;
use crate::core::types::{AnySlot, Listener, ListenerId};
use crate::state::batching::flush_pending_slots;

// =============================================================================
// SLOT INNER
// =============================================================================

/// The data behind a `StateSlot<S>`.
pub struct SlotInner<S> {
    value: RefCell<Rc<S>>,
    version: Cell<u32>,
    dirty: Cell<bool>,
    listeners: RefCell<Vec<(ListenerId, Listener)>>,
    next_listener_id: Cell<ListenerId>,
}

impl<S> SlotInner<S> {
    fn new(value: S) -> Self {
        Self {
            value: RefCell::new(Rc::new(value)),
            version: Cell::new(0),
            dirty: Cell::new(false),
            listeners: RefCell::new(Vec::new()),
            next_listener_id: Cell::new(0),
        }
    }
}

impl<S: 'static> AnySlot for SlotInner<S> {
    fn version(&self) -> u32 {
        self.version.get()
    }

    fn is_dirty(&self) -> bool {
        self.dirty.get()
    }

    fn mark_dirty(&self) {
        self.dirty.set(true);
    }

    fn notify_listeners(&self) {
        self.dirty.set(false);

        // Collect first so listeners may subscribe, unsubscribe or dispatch.
        let listeners: Vec<Listener> = self
            .listeners
            .borrow()
            .iter()
            .map(|(_, listener)| listener.clone())
            .collect();

        let version = self.version.get();
        trace!(version, listeners = listeners.len(), "slot notify");
        for listener in listeners {
            listener(version);
        }
    }

    fn listener_count(&self) -> usize {
        self.listeners.borrow().len()
    }

    fn remove_listener(&self, id: ListenerId) {
        self.listeners.borrow_mut().retain(|(lid, _)| *lid != id);
    }
}

// =============================================================================
// STATE SLOT
// =============================================================================

/// A shared handle to one slot of state.
///
/// # Example
///
/// ```
/// use spark_structures::StateSlot;
/// use std::cell::Cell;
/// use std::rc::Rc;
///
/// let slot = StateSlot::new(vec![1, 2]);
/// let seen = Rc::new(Cell::new(0));
///
/// let seen_clone = seen.clone();
/// let _sub = slot.subscribe(move |_| seen_clone.set(seen_clone.get() + 1));
///
/// let before = slot.get();
/// slot.dispatch(|v| {
///     v.push(3);
///     true
/// });
///
/// assert_eq!(*before, vec![1, 2]); // old snapshot untouched
/// assert_eq!(*slot.get(), vec![1, 2, 3]);
/// assert_eq!(seen.get(), 1);
/// ```
pub struct StateSlot<S> {
    inner: Rc<SlotInner<S>>,
}

impl<S> Clone for StateSlot<S> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<S: 'static> StateSlot<S> {
    pub fn new(value: S) -> Self {
        Self {
            inner: Rc::new(SlotInner::new(value)),
        }
    }

    /// The current snapshot.
    pub fn get(&self) -> Rc<S> {
        self.inner.value.borrow().clone()
    }

    /// Borrow the current snapshot.
    pub fn with<R>(&self, f: impl FnOnce(&S) -> R) -> R {
        let snapshot = self.get();
        f(&snapshot)
    }

    /// Version of the current snapshot. Starts at 0.
    pub fn version(&self) -> u32 {
        self.inner.version.get()
    }

    /// Apply an update and publish the result.
    ///
    /// `f` reports whether it changed the state. Listeners are only told
    /// about real changes.
    pub fn dispatch(&self, f: impl FnOnce(&mut S) -> bool) -> bool
    where
        S: Clone,
    {
        let changed = {
            let mut value = self.inner.value.borrow_mut();
            f(Rc::make_mut(&mut value))
        };
        if changed {
            self.publish();
        }
        changed
    }

    /// Swap in a new snapshot and publish it.
    pub fn replace(&self, value: S) -> Rc<S> {
        let old = self.inner.value.replace(Rc::new(value));
        self.publish();
        old
    }

    /// Run `listener` after every published change.
    ///
    /// The listener stays attached until the returned [`Subscription`] is
    /// dropped or unsubscribed.
    pub fn subscribe(&self, listener: impl Fn(u32) + 'static) -> Subscription {
        let id = self.inner.next_listener_id.get();
        self.inner.next_listener_id.set(id + 1);
        self.inner
            .listeners
            .borrow_mut()
            .push((id, Rc::new(listener)));

        let slot: Rc<dyn AnySlot> = self.inner.clone();
        Subscription {
            slot: Rc::downgrade(&slot),
            id,
        }
    }

    pub fn listener_count(&self) -> usize {
        self.inner.listener_count()
    }

    /// Get the slot as a type-erased AnySlot.
    pub fn as_any_slot(&self) -> Rc<dyn AnySlot> {
        self.inner.clone()
    }

    fn publish(&self) {
        let version = with_context(|ctx| ctx.increment_write_version());
        self.inner.version.set(version);

        let batching = with_context(|ctx| ctx.is_batching());
        if batching {
            if !self.inner.is_dirty() {
                self.inner.mark_dirty();
                let slot: Rc<dyn AnySlot> = self.inner.clone();
                with_context(|ctx| ctx.add_pending_slot(Rc::downgrade(&slot)));
            }
            trace!(version, "slot change deferred to batch end");
            return;
        }

        self.inner.notify_listeners();
        flush_pending_slots();
    }
}

impl<S: fmt::Debug> fmt::Debug for StateSlot<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StateSlot")
            .field("value", &self.inner.value.borrow())
            .field("version", &self.inner.version.get())
            .finish()
    }
}

// =============================================================================
// SUBSCRIPTION
// =============================================================================

/// Keeps a listener attached to its slot. Dropping it detaches the listener.
#[must_use = "dropping a Subscription immediately detaches the listener"]
pub struct Subscription {
    slot: Weak<dyn AnySlot>,
    id: ListenerId,
}

impl Subscription {
    /// Detach the listener now.
    pub fn unsubscribe(self) {}

    /// True while the slot is alive.
    pub fn is_active(&self) -> bool {
        self.slot.strong_count() > 0
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(slot) = self.slot.upgrade() {
            slot.remove_listener(self.id);
        }
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("id", &self.id)
            .field("active", &self.is_active())
            .finish()
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    fn counter() -> (Rc<Cell<u32>>, impl Fn(u32) + 'static) {
        let count = Rc::new(Cell::new(0));
        let count_clone = count.clone();
        (count, move |_| count_clone.set(count_clone.get() + 1))
    }

    #[test]
    fn dispatch_publishes_new_snapshot() {
        let slot = StateSlot::new(0);
        let old = slot.get();
        assert!(slot.dispatch(|n| {
            *n += 1;
            true
        }));
        assert_eq!(*old, 0);
        assert_eq!(*slot.get(), 1);
        assert!(slot.version() > 0);
    }

    #[test]
    fn unchanged_dispatch_is_silent() {
        let slot = StateSlot::new(5);
        let (count, listener) = counter();
        let _sub = slot.subscribe(listener);

        assert!(!slot.dispatch(|_| false));
        assert_eq!(count.get(), 0);
        assert_eq!(slot.version(), 0);
    }

    #[test]
    fn mutates_in_place_when_unshared() {
        let slot = StateSlot::new(vec![1]);
        let before = Rc::as_ptr(&slot.get());
        slot.dispatch(|v| {
            v.push(2);
            true
        });
        assert_eq!(Rc::as_ptr(&slot.get()), before);
    }

    #[test]
    fn copies_when_snapshot_is_held() {
        let slot = StateSlot::new(vec![1]);
        let held = slot.get();
        slot.dispatch(|v| {
            v.push(2);
            true
        });
        assert!(!Rc::ptr_eq(&held, &slot.get()));
        assert_eq!(*held, vec![1]);
    }

    #[test]
    fn listeners_receive_versions() {
        let slot = StateSlot::new(String::new());
        let seen = Rc::new(RefCell::new(Vec::new()));
        let seen_clone = seen.clone();
        let _sub = slot.subscribe(move |v| seen_clone.borrow_mut().push(v));

        slot.replace("a".to_string());
        slot.replace("b".to_string());

        let seen = seen.borrow();
        assert_eq!(seen.len(), 2);
        assert!(seen[0] < seen[1]);
        assert_eq!(seen[1], slot.version());
    }

    #[test]
    fn dropping_subscription_detaches() {
        let slot = StateSlot::new(0);
        let (count, listener) = counter();
        let sub = slot.subscribe(listener);
        assert_eq!(slot.listener_count(), 1);

        slot.replace(1);
        sub.unsubscribe();
        slot.replace(2);

        assert_eq!(count.get(), 1);
        assert_eq!(slot.listener_count(), 0);
    }

    #[test]
    fn subscription_outliving_slot_is_inert() {
        let sub = {
            let slot = StateSlot::new(0);
            slot.subscribe(|_| {})
        };
        assert!(!sub.is_active());
        drop(sub);
    }

    #[test]
    fn listener_may_dispatch_to_another_slot() {
        let source = StateSlot::new(1);
        let mirror = StateSlot::new(0);

        let source_clone = source.clone();
        let mirror_clone = mirror.clone();
        let _sub = source.subscribe(move |_| {
            let value = *source_clone.get();
            mirror_clone.replace(value * 10);
        });

        source.replace(4);
        assert_eq!(*mirror.get(), 40);
    }

    #[test]
    fn with_borrows_snapshot() {
        let slot = StateSlot::new(vec![1, 2, 3]);
        assert_eq!(slot.with(|v| v.iter().sum::<i32>()), 6);
    }
}
