// ============================================================================
// spark-structures - Type Definitions
// Type-erased slot interface and listener types
// ============================================================================
//
// Batching needs to queue slots of different state types in one list, and a
// Subscription needs to detach itself without knowing the slot's type. Both
// go through `AnySlot`; only reading and writing the state needs `S`.
// ============================================================================

use std::any::Any;
use std::rc::Rc;

/// Callback run after a slot publishes a new snapshot. Receives the version.
pub type Listener = Rc<dyn Fn(u32)>;

/// Identifier handed out by a slot for each registered listener.
pub type ListenerId = u64;

/// Type-erased view of a state slot.
pub trait AnySlot: Any {
    /// Version of the current snapshot (bumped on every published change).
    fn version(&self) -> u32;

    /// True if a change is waiting to be announced (inside a batch).
    fn is_dirty(&self) -> bool;

    /// Mark that a change is waiting to be announced.
    fn mark_dirty(&self);

    /// Clear the dirty mark and run every listener with the current version.
    fn notify_listeners(&self);

    /// Number of live listeners.
    fn listener_count(&self) -> usize;

    /// Detach a listener. Unknown ids are ignored.
    fn remove_listener(&self, id: ListenerId);
}
