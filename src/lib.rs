// ============================================================================
// spark-structures - Reactive Heap and Trie
// ============================================================================
//
// Two plain data structures, a binary MinHeap and a prefix Trie, plus a thin
// reactive layer (StateSlot) that stores either one as an immutable snapshot
// and notifies subscribers whenever a mutation publishes a new one.
// ============================================================================

#[macro_use]
mod macros;

pub mod core;
pub mod state;
pub mod structures;

// Re-export core items at crate root
pub use crate::core::context::{is_batching, with_context, write_version, StateContext};
pub use crate::core::error::{Result, StructureError};
pub use crate::core::types::{AnySlot, Listener, ListenerId};

// Re-export the data structures
pub use structures::heap::MinHeap;
pub use structures::ordering::{Comparator, JsonKind, JsonOrder, NaturalOrder, Reversed};
pub use structures::selector::{Identity, JsonField, TextSelector};
pub use structures::trie::{Trie, TrieNode, TrieOptions};

// Re-export the reactive adapters
pub use state::batching::batch;
pub use state::heap::{use_json_min_heap, use_min_heap, use_min_heap_with, HeapHandle};
pub use state::slot::{StateSlot, Subscription};
pub use state::trie::{use_trie, use_trie_with, TrieHandle};

// =============================================================================
// TESTS
// =============================================================================
