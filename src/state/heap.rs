// ============================================================================
// spark-structures - Heap Handle
// Reactive adapter storing a MinHeap in a StateSlot
// ============================================================================

use std::rc::Rc;

use serde_json::Value;

use crate::core::error::Result;
use crate::state::slot::{StateSlot, Subscription};
use crate::structures::heap::MinHeap;
use crate::structures::ordering::{Comparator, JsonOrder, NaturalOrder};

/// A min-heap living in a [`StateSlot`].
///
/// Every mutation publishes a new snapshot and notifies subscribers; reads
/// always see the most recent snapshot. Clones share the same slot.
///
/// # Example
///
/// ```
/// use spark_structures::use_min_heap;
///
/// let heap = use_min_heap([1, 3, 5, 6, 8, 9]);
/// assert_eq!(heap.dump(), vec![1, 3, 5, 6, 8, 9]);
///
/// heap.add(0);
/// assert_eq!(heap.peek(), Some(0));
/// assert_eq!(heap.extract_min(), Some(0));
/// ```
pub struct HeapHandle<T, C = NaturalOrder> {
    slot: StateSlot<MinHeap<T, C>>,
}

impl<T, C> Clone for HeapHandle<T, C> {
    fn clone(&self) -> Self {
        Self {
            slot: self.slot.clone(),
        }
    }
}

impl<T, C> HeapHandle<T, C>
where
    T: Clone + 'static,
    C: Comparator<T> + Clone + 'static,
{
    /// Wrap an existing heap.
    pub fn from_heap(heap: MinHeap<T, C>) -> Self {
        Self {
            slot: StateSlot::new(heap),
        }
    }

    /// Insert a value.
    pub fn add(&self, value: T) {
        self.slot.dispatch(|heap| {
            heap.add(value);
            true
        });
    }

    /// Remove and return the minimum. An empty heap returns `None` and
    /// publishes nothing.
    pub fn extract_min(&self) -> Option<T> {
        if self.is_empty() {
            return None;
        }

        let mut min = None;
        self.slot.dispatch(|heap| {
            min = heap.extract_min();
            min.is_some()
        });
        min
    }

    /// The minimum of the current snapshot.
    pub fn peek(&self) -> Option<T> {
        self.slot.with(|heap| heap.peek().cloned())
    }

    /// Remove every element.
    pub fn clear(&self) {
        if self.is_empty() {
            return;
        }
        self.slot.dispatch(|heap| {
            heap.clear();
            true
        });
    }

    /// Replace the contents and restore heap order bottom-up.
    pub fn heapify(&self, values: impl IntoIterator<Item = T>) {
        self.slot.dispatch(|heap| {
            heap.heapify(values);
            true
        });
    }

    /// The current sequence in heap order.
    pub fn dump(&self) -> Vec<T> {
        self.slot.with(|heap| heap.dump().to_vec())
    }

    pub fn len(&self) -> usize {
        self.slot.with(MinHeap::len)
    }

    pub fn is_empty(&self) -> bool {
        self.slot.with(MinHeap::is_empty)
    }

    /// The current authoritative heap.
    pub fn snapshot(&self) -> Rc<MinHeap<T, C>> {
        self.slot.get()
    }

    /// Run `listener` after every change.
    pub fn subscribe(&self, listener: impl Fn(u32) + 'static) -> Subscription {
        self.slot.subscribe(listener)
    }

    /// The underlying slot.
    pub fn slot(&self) -> &StateSlot<MinHeap<T, C>> {
        &self.slot
    }
}

/// A reactive heap in natural order, built by inserting `initial` in turn.
pub fn use_min_heap<T>(initial: impl IntoIterator<Item = T>) -> HeapHandle<T>
where
    T: Ord + Clone + 'static,
{
    HeapHandle::from_heap(MinHeap::from_values(initial))
}

/// A reactive heap ordered by `comparator`.
pub fn use_min_heap_with<T, C>(initial: impl IntoIterator<Item = T>, comparator: C) -> HeapHandle<T, C>
where
    T: Clone + 'static,
    C: Comparator<T> + Clone + 'static,
{
    HeapHandle::from_heap(MinHeap::from_values_with(initial, comparator))
}

/// A reactive heap of JSON values with an inferred ordering.
///
/// Fails at construction when the values are neither all numbers nor all
/// strings.
pub fn use_json_min_heap(initial: Vec<Value>) -> Result<HeapHandle<Value, JsonOrder>> {
    Ok(HeapHandle::from_heap(MinHeap::from_json(initial)?))
}
