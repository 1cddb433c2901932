// ============================================================================
// spark-structures - Batching
// Group several slot updates into a single round of notifications
// ============================================================================

use tracing::{debug, warn};

use crate::core::context::with_context;

/// Upper bound on flush rounds; listeners that keep re-dirtying slots would
/// otherwise loop forever.
const MAX_FLUSH_ROUNDS: u32 = 1000;

/// Batch several slot updates so each changed slot notifies once.
///
/// Batches nest; listeners run when the outermost batch exits, including on
/// panic.
///
/// # Example
///
/// ```
/// use spark_structures::{batch, StateSlot};
/// use std::cell::Cell;
/// use std::rc::Rc;
///
/// let slot = StateSlot::new(0);
/// let runs = Rc::new(Cell::new(0));
/// let runs_clone = runs.clone();
/// let _sub = slot.subscribe(move |_| runs_clone.set(runs_clone.get() + 1));
///
/// batch(|| {
///     slot.replace(1);
///     slot.replace(2);
///     assert_eq!(runs.get(), 0);
/// });
///
/// assert_eq!(runs.get(), 1);
/// assert_eq!(*slot.get(), 2);
/// ```
pub fn batch<T>(f: impl FnOnce() -> T) -> T {
    with_context(|ctx| ctx.enter_batch());

    struct BatchGuard;

    impl Drop for BatchGuard {
        fn drop(&mut self) {
            let depth = with_context(|ctx| ctx.exit_batch());
            if depth == 0 {
                flush_pending_slots();
            }
        }
    }

    let _guard = BatchGuard;
    f()
}

/// Announce every slot changed during a batch.
///
/// Does nothing while a batch is open or a flush is already running.
pub fn flush_pending_slots() {
    let skip = with_context(|ctx| ctx.is_batching() || ctx.is_flushing());
    if skip {
        return;
    }

    let was_flushing = with_context(|ctx| ctx.set_flushing(true));
    let mut rounds = 0;

    loop {
        let pending = with_context(|ctx| ctx.take_pending_slots());
        if pending.is_empty() {
            break;
        }

        rounds += 1;
        if rounds > MAX_FLUSH_ROUNDS {
            warn!(
                rounds,
                "slot listeners keep re-dirtying state; dropping pending notifications"
            );
            break;
        }

        debug!(slots = pending.len(), round = rounds, "flushing batched slots");
        for slot in pending.iter().filter_map(|weak| weak.upgrade()) {
            if slot.is_dirty() {
                slot.notify_listeners();
            }
        }
    }

    with_context(|ctx| ctx.set_flushing(was_flushing));
}
