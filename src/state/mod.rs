// ============================================================================
// spark-structures - State Module
// Reactive adapters: a copy-on-write state slot and the heap/trie handles
// built on it
// ============================================================================

pub mod batching;
pub mod heap;
pub mod slot;
pub mod trie;

pub use batching::{batch, flush_pending_slots};
pub use heap::{use_json_min_heap, use_min_heap, use_min_heap_with, HeapHandle};
pub use slot::{SlotInner, StateSlot, Subscription};
pub use trie::{use_trie, use_trie_with, TrieHandle};
