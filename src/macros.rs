// ============================================================================
// spark-structures - Constructor Macros
// ============================================================================

/// Build a [`MinHeap`](crate::MinHeap) in natural order from a list of values.
///
/// # Usage
///
/// ```rust
/// use spark_structures::min_heap;
///
/// let heap = min_heap![9, 8, 6, 5, 3, 1];
/// assert_eq!(heap.dump(), &[1, 5, 3, 9, 6, 8]);
///
/// let by_len = min_heap![by |a: &&str, b: &&str| a.len().cmp(&b.len()); "ccc", "a", "bb"];
/// assert_eq!(by_len.peek(), Some(&"a"));
/// ```
#[macro_export]
macro_rules! min_heap {
    // Case 1: Custom comparator
    (by $cmp:expr; $($value:expr),* $(,)?) => {
        $crate::MinHeap::from_values_with([$($value),*], $cmp)
    };
    // Case 2: Natural order
    ($($value:expr),* $(,)?) => {
        $crate::MinHeap::from_values([$($value),*])
    };
}

/// Build a [`Trie`](crate::Trie) from a list of words.
///
/// Case-insensitive by default; prefix the list with `sensitive;` to keep
/// case.
///
/// # Usage
///
/// ```rust
/// use spark_structures::trie;
///
/// let folded = trie!["Hello", "World"];
/// assert!(folded.contains("hello"));
///
/// let exact = trie![sensitive; "Hello"];
/// assert!(!exact.contains("hello"));
/// ```
#[macro_export]
macro_rules! trie {
    // Case 1: Case-sensitive
    (sensitive; $($word:expr),* $(,)?) => {
        $crate::Trie::from_words([$($word),*], $crate::TrieOptions::case_sensitive())
    };
    // Case 2: Default options
    ($($word:expr),* $(,)?) => {
        $crate::Trie::from_words([$($word),*], $crate::TrieOptions::default())
    };
}
