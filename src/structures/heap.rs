// ============================================================================
// spark-structures - MinHeap
// Binary min-heap with sift-up insertion and sift-down extraction
// ============================================================================
//
// Layout: a flat Vec in heap order. For index i, children live at 2i+1 and
// 2i+2, the parent at (i-1)/2. Every element compares <= its children under
// the heap's comparator.
// ============================================================================

use std::fmt;

use serde_json::Value;
use tracing::{debug, trace};

use crate::core::error::{Result, StructureError};
use crate::structures::ordering::{Comparator, JsonOrder, NaturalOrder};

#[inline]
fn parent_index(child: usize) -> usize {
    (child - 1) / 2
}

#[inline]
fn left_child_index(parent: usize) -> usize {
    parent * 2 + 1
}

#[inline]
fn right_child_index(parent: usize) -> usize {
    parent * 2 + 2
}

// =============================================================================
// MIN HEAP
// =============================================================================

/// A binary min-heap ordered by a [`Comparator`].
///
/// The heap is a plain value: cloning it produces an independent copy, which
/// is what the reactive adapter relies on for copy-on-write snapshots.
///
/// # Example
///
/// ```
/// use spark_structures::MinHeap;
///
/// let mut heap = MinHeap::from_values([10, 2, 1, 99, 3, 5, 7]);
/// assert_eq!(heap.peek(), Some(&1));
///
/// let mut drained = Vec::new();
/// while let Some(min) = heap.extract_min() {
///     drained.push(min);
/// }
/// assert_eq!(drained, vec![1, 2, 3, 5, 7, 10, 99]);
/// assert_eq!(heap.extract_min(), None);
/// ```
#[derive(Clone)]
pub struct MinHeap<T, C = NaturalOrder> {
    values: Vec<T>,
    comparator: C,
}

impl<T: Ord> MinHeap<T> {
    /// Create an empty heap in natural ascending order.
    pub fn new() -> Self {
        Self::with_comparator(NaturalOrder)
    }

    /// Build a heap in natural order by inserting each value in turn.
    pub fn from_values(values: impl IntoIterator<Item = T>) -> Self {
        Self::from_values_with(values, NaturalOrder)
    }
}

impl<T: Ord> Default for MinHeap<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl MinHeap<Value, JsonOrder> {
    /// Build a heap over JSON values, inferring the ordering from them.
    ///
    /// Fails with [`StructureError::NoDefaultOrdering`] unless the values are
    /// all numbers or all strings.
    pub fn from_json(values: Vec<Value>) -> Result<Self> {
        let comparator = JsonOrder::infer(&values)?;
        Ok(Self::from_values_with(values, comparator))
    }
}

impl<T, C: Comparator<T>> MinHeap<T, C> {
    /// Create an empty heap ordered by `comparator`.
    pub fn with_comparator(comparator: C) -> Self {
        Self {
            values: Vec::new(),
            comparator,
        }
    }

    /// Build a heap ordered by `comparator` by inserting each value in turn.
    pub fn from_values_with(values: impl IntoIterator<Item = T>, comparator: C) -> Self {
        let mut heap = Self::with_comparator(comparator);
        heap.extend(values);
        debug!(len = heap.len(), "min-heap built");
        heap
    }

    /// Build a heap for element types without a default ordering.
    ///
    /// A `None` comparator is a configuration error, reported here rather
    /// than on first use.
    pub fn try_with_comparator(
        values: impl IntoIterator<Item = T>,
        comparator: Option<C>,
    ) -> Result<Self> {
        let comparator = comparator.ok_or(StructureError::MissingComparator)?;
        Ok(Self::from_values_with(values, comparator))
    }

    // =========================================================================
    // CORE OPERATIONS
    // =========================================================================

    /// Append `value` and sift it up to its place.
    pub fn add(&mut self, value: T) {
        self.values.push(value);
        let last = self.values.len() - 1;
        self.sift_up(last);
        trace!(len = self.values.len(), "min-heap add");
    }

    /// Remove and return the minimum, or `None` when empty.
    ///
    /// The last element takes the root's place and sifts down.
    pub fn extract_min(&mut self) -> Option<T> {
        if self.values.is_empty() {
            return None;
        }

        let min = self.values.swap_remove(0);
        if !self.values.is_empty() {
            self.sift_down(0);
        }
        trace!(len = self.values.len(), "min-heap extract");
        Some(min)
    }

    /// The minimum element without removing it.
    pub fn peek(&self) -> Option<&T> {
        self.values.first()
    }

    /// Remove every element.
    pub fn clear(&mut self) {
        self.values.clear();
    }

    /// The backing sequence in heap order (not sorted order).
    pub fn dump(&self) -> &[T] {
        &self.values
    }

    /// Replace the contents with `values` and restore heap order bottom-up.
    ///
    /// Runs in O(n), unlike building through repeated [`add`](Self::add).
    pub fn heapify(&mut self, values: impl IntoIterator<Item = T>) {
        self.values = values.into_iter().collect();
        for index in (0..self.values.len() / 2).rev() {
            self.sift_down(index);
        }
        debug!(len = self.values.len(), "min-heap re-heapified");
    }

    // =========================================================================
    // INSPECTION
    // =========================================================================

    /// Number of elements.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// True if the heap holds no elements.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterate in heap order.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.values.iter()
    }

    /// The active comparator.
    pub fn comparator(&self) -> &C {
        &self.comparator
    }

    /// Consume the heap, returning the backing sequence in heap order.
    pub fn into_vec(self) -> Vec<T> {
        self.values
    }

    /// Consume the heap, returning its elements in ascending order.
    pub fn into_sorted_vec(mut self) -> Vec<T> {
        let mut sorted = Vec::with_capacity(self.values.len());
        while let Some(min) = self.extract_min() {
            sorted.push(min);
        }
        sorted
    }

    // =========================================================================
    // SIFTING
    // =========================================================================

    /// Swap upward while the parent compares greater.
    fn sift_up(&mut self, mut index: usize) {
        while index > 0 {
            let parent = parent_index(index);
            if !self
                .comparator
                .greater(&self.values[parent], &self.values[index])
            {
                break;
            }
            self.values.swap(parent, index);
            index = parent;
        }
    }

    /// Descend into the smaller child while it is smaller than the node.
    ///
    /// The right child is chosen only when strictly smaller than the left.
    fn sift_down(&mut self, mut index: usize) {
        let size = self.values.len();

        loop {
            let left = left_child_index(index);
            if left >= size {
                break;
            }

            let mut smaller = left;
            let right = right_child_index(index);
            if right < size && self.comparator.less(&self.values[right], &self.values[left]) {
                smaller = right;
            }

            if !self
                .comparator
                .less(&self.values[smaller], &self.values[index])
            {
                break;
            }

            self.values.swap(index, smaller);
            index = smaller;
        }
    }
}

impl<T, C: Comparator<T>> Extend<T> for MinHeap<T, C> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.add(value);
        }
    }
}

impl<T: Ord> FromIterator<T> for MinHeap<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::from_values(iter)
    }
}

impl<'a, T, C> IntoIterator for &'a MinHeap<T, C> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.iter()
    }
}

impl<T: fmt::Debug, C> fmt::Debug for MinHeap<T, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MinHeap")
            .field("values", &self.values)
            .finish()
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::cmp::Ordering;

    fn assert_heap_order<T, C: Comparator<T>>(heap: &MinHeap<T, C>) {
        let values = heap.dump();
        for i in 1..values.len() {
            assert_ne!(
                heap.comparator().compare(&values[parent_index(i)], &values[i]),
                Ordering::Greater,
                "parent of index {i} is greater than its child"
            );
        }
    }

    #[test]
    fn index_arithmetic() {
        assert_eq!(parent_index(1), 0);
        assert_eq!(parent_index(2), 0);
        assert_eq!(parent_index(5), 2);
        assert_eq!(left_child_index(2), 5);
        assert_eq!(right_child_index(2), 6);
    }

    #[test]
    fn empty_heap_reads_absent() {
        let mut heap: MinHeap<i32> = MinHeap::new();
        assert_eq!(heap.peek(), None);
        assert_eq!(heap.extract_min(), None);
        assert!(heap.is_empty());
    }

    #[test]
    fn sorted_input_keeps_insertion_layout() {
        let mut heap = MinHeap::new();
        let mut expected = Vec::new();
        for value in [1, 3, 5, 6, 8, 9] {
            heap.add(value);
            expected.push(value);
            assert_eq!(heap.dump(), expected.as_slice());
        }
    }

    #[test]
    fn descending_input_sifts_up() {
        let mut heap = MinHeap::new();
        for value in [9, 8, 6, 5, 3, 1] {
            heap.add(value);
        }
        assert_eq!(heap.dump(), &[1, 5, 3, 9, 6, 8]);
    }

    #[test]
    fn extraction_is_ascending() {
        let mut heap = MinHeap::from_values([10, 2, 1, 99, 3, 5, 7]);
        let mut out = Vec::new();
        while let Some(v) = heap.extract_min() {
            assert_heap_order(&heap);
            out.push(v);
        }
        assert_eq!(out, vec![1, 2, 3, 5, 7, 10, 99]);
        assert_eq!(heap.extract_min(), None);
    }

    #[test]
    fn equal_children_prefer_left() {
        // Root 1 with two equal children; after extraction the last element
        // (9) moves to the root and must swap with the left 2.
        let mut heap = MinHeap::from_values([1, 2, 2, 9]);
        assert_eq!(heap.dump(), &[1, 2, 2, 9]);
        heap.extract_min();
        assert_eq!(heap.dump(), &[2, 9, 2]);
    }

    #[test]
    fn duplicates_survive() {
        let heap = MinHeap::from_values([3, 1, 3, 1, 2]);
        assert_eq!(heap.into_sorted_vec(), vec![1, 1, 2, 3, 3]);
    }

    #[test]
    fn peek_does_not_mutate() {
        let heap = MinHeap::from_values([10, 2, 1, 99, 3]);
        for _ in 0..5 {
            assert_eq!(heap.peek(), Some(&1));
        }
        assert_eq!(heap.len(), 5);
    }

    #[test]
    fn clear_empties() {
        let mut heap = MinHeap::from_values([1, 2, 3]);
        heap.clear();
        assert!(heap.dump().is_empty());
        assert_eq!(heap.peek(), None);
        assert_eq!(heap.extract_min(), None);
    }

    #[test]
    fn heapify_restores_order() {
        let mut heap = MinHeap::new();
        heap.heapify([9, 4, 7, 1, 8, 2, 6, 3, 5]);
        assert_heap_order(&heap);
        assert_eq!(heap.peek(), Some(&1));
        assert_eq!(heap.into_sorted_vec(), (1..=9).collect::<Vec<_>>());
    }

    #[test]
    fn strings_use_lexicographic_order() {
        let heap = MinHeap::from_values(["pear", "apple", "fig"]);
        assert_eq!(heap.peek(), Some(&"apple"));
    }

    #[test]
    fn custom_comparator_on_structs() {
        #[derive(Debug, Clone, PartialEq)]
        struct Task {
            priority: u8,
            name: &'static str,
        }

        let by_priority = |a: &Task, b: &Task| a.priority.cmp(&b.priority);
        let mut heap = MinHeap::from_values_with(
            [
                Task { priority: 3, name: "write" },
                Task { priority: 1, name: "plan" },
                Task { priority: 2, name: "build" },
            ],
            by_priority,
        );

        assert_eq!(heap.extract_min().map(|t| t.name), Some("plan"));
        assert_eq!(heap.extract_min().map(|t| t.name), Some("build"));
    }

    #[test]
    fn missing_comparator_is_a_configuration_error() {
        type ByLen = fn(&Vec<u8>, &Vec<u8>) -> Ordering;
        let result = MinHeap::<Vec<u8>, ByLen>::try_with_comparator(vec![vec![1u8]], None);
        assert_eq!(result.unwrap_err(), StructureError::MissingComparator);

        let by_len: ByLen = |a, b| a.len().cmp(&b.len());
        let heap = MinHeap::try_with_comparator(vec![vec![1u8, 2], vec![1u8]], Some(by_len)).unwrap();
        assert_eq!(heap.peek(), Some(&vec![1u8]));
    }

    #[test]
    fn json_values_infer_ordering() {
        let heap = MinHeap::from_json(vec![json!(10), json!(2), json!(33)]).unwrap();
        assert_eq!(heap.peek(), Some(&json!(2)));

        let heap = MinHeap::from_json(vec![json!("b"), json!("a")]).unwrap();
        assert_eq!(heap.peek(), Some(&json!("a")));

        let err = MinHeap::from_json(vec![json!({"id": 1})]).unwrap_err();
        assert!(matches!(err, StructureError::NoDefaultOrdering { .. }));
    }

    #[test]
    fn collect_and_extend() {
        let mut heap: MinHeap<i32> = [5, 4].into_iter().collect();
        heap.extend([3, 9]);
        assert_eq!(heap.peek(), Some(&3));
        assert_eq!(heap.iter().count(), 4);
    }
}
