// ============================================================================
// spark-structures - Structures Module
// The plain data structures: MinHeap and Trie, plus their ordering and
// key-projection helpers
// ============================================================================

pub mod heap;
pub mod ordering;
pub mod selector;
pub mod trie;

pub use heap::MinHeap;
pub use ordering::{Comparator, JsonKind, JsonOrder, NaturalOrder, Reversed};
pub use selector::{Identity, JsonField, TextSelector};
pub use trie::{Trie, TrieNode, TrieOptions};
