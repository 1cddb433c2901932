// ============================================================================
// spark-structures - State Context
// Thread-local bookkeeping for slot versions and batched notification
// ============================================================================

use std::cell::{Cell, RefCell};
use std::rc::Weak;

use super::types::AnySlot;

// =============================================================================
// STATE CONTEXT
// =============================================================================

/// Thread-local state shared by every slot on this thread.
pub struct StateContext {
    /// Global write version - incremented on every published change
    pub write_version: Cell<u32>,

    /// Current batch depth (for nested batches)
    pub batch_depth: Cell<u32>,

    /// Slots changed during the current batch, announced when it ends
    pub pending_slots: RefCell<Vec<Weak<dyn AnySlot>>>,

    /// Whether pending slots are currently being flushed
    pub is_flushing: Cell<bool>,
}

impl StateContext {
    pub fn new() -> Self {
        Self {
            write_version: Cell::new(1),
            batch_depth: Cell::new(0),
            pending_slots: RefCell::new(Vec::new()),
            is_flushing: Cell::new(false),
        }
    }

    // =========================================================================
    // VERSION COUNTER
    // =========================================================================

    /// Increment and return the write version
    pub fn increment_write_version(&self) -> u32 {
        let v = self.write_version.get().wrapping_add(1);
        self.write_version.set(v);
        v
    }

    pub fn get_write_version(&self) -> u32 {
        self.write_version.get()
    }

    // =========================================================================
    // BATCHING
    // =========================================================================

    /// Increment batch depth, returns new depth
    pub fn enter_batch(&self) -> u32 {
        let depth = self.batch_depth.get() + 1;
        self.batch_depth.set(depth);
        depth
    }

    /// Decrement batch depth, returns new depth
    pub fn exit_batch(&self) -> u32 {
        let depth = self.batch_depth.get().saturating_sub(1);
        self.batch_depth.set(depth);
        depth
    }

    pub fn get_batch_depth(&self) -> u32 {
        self.batch_depth.get()
    }

    pub fn is_batching(&self) -> bool {
        self.batch_depth.get() > 0
    }

    /// Queue a slot to be announced after the batch
    pub fn add_pending_slot(&self, slot: Weak<dyn AnySlot>) {
        self.pending_slots.borrow_mut().push(slot);
    }

    /// Take all pending slots
    pub fn take_pending_slots(&self) -> Vec<Weak<dyn AnySlot>> {
        self.pending_slots.replace(Vec::new())
    }

    /// Set flushing mode, returning previous
    pub fn set_flushing(&self, value: bool) -> bool {
        self.is_flushing.replace(value)
    }

    pub fn is_flushing(&self) -> bool {
        self.is_flushing.get()
    }
}

impl Default for StateContext {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// THREAD-LOCAL ACCESS
// =============================================================================

thread_local! {
    static CONTEXT: StateContext = StateContext::new();
}

/// Access the thread-local state context.
pub fn with_context<R>(f: impl FnOnce(&StateContext) -> R) -> R {
    CONTEXT.with(f)
}

/// Check if currently in a batch
pub fn is_batching() -> bool {
    with_context(|ctx| ctx.is_batching())
}

/// Get the current write version
pub fn write_version() -> u32 {
    with_context(|ctx| ctx.get_write_version())
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn write_version_increments() {
        let ctx = StateContext::new();
        assert_eq!(ctx.get_write_version(), 1);
        assert_eq!(ctx.increment_write_version(), 2);
        assert_eq!(ctx.increment_write_version(), 3);
    }

    #[test]
    fn batch_depth_nests_and_saturates() {
        let ctx = StateContext::new();
        assert!(!ctx.is_batching());
        assert_eq!(ctx.enter_batch(), 1);
        assert_eq!(ctx.enter_batch(), 2);
        assert_eq!(ctx.exit_batch(), 1);
        assert_eq!(ctx.exit_batch(), 0);
        assert_eq!(ctx.exit_batch(), 0);
        assert_eq!(ctx.get_batch_depth(), 0);
    }

    #[test]
    fn flushing_flag_round_trips() {
        let ctx = StateContext::new();
        assert!(!ctx.set_flushing(true));
        assert!(ctx.is_flushing());
        assert!(ctx.set_flushing(false));
    }

    #[test]
    fn thread_local_access() {
        let before = write_version();
        with_context(|ctx| ctx.increment_write_version());
        assert_eq!(write_version(), before + 1);
        assert!(!is_batching());
    }

    #[test]
    fn pending_slots_are_taken_once() {
        let ctx = StateContext::new();
        assert!(ctx.take_pending_slots().is_empty());
    }
}
