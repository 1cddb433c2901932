// ============================================================================
// spark-structures - Trie Handle
// Reactive adapter storing a Trie in a StateSlot
// ============================================================================

use std::rc::Rc;

use crate::state::slot::{StateSlot, Subscription};
use crate::structures::selector::{Identity, TextSelector};
use crate::structures::trie::{Trie, TrieOptions};

/// A trie living in a [`StateSlot`].
///
/// `add` and `remove` publish a new snapshot when they change the trie;
/// lookups read the current snapshot. Clones share the same slot.
///
/// # Example
///
/// ```
/// use spark_structures::{use_trie, TrieOptions};
///
/// let trie = use_trie(["hello", "help"], TrieOptions::default());
/// assert!(trie.has("HEL", false));
///
/// trie.remove("help");
/// assert_eq!(trie.search("hel"), vec!["hello"]);
/// ```
pub struct TrieHandle<W, S = Identity> {
    slot: StateSlot<Trie<W, S>>,
}

impl<W, S> Clone for TrieHandle<W, S> {
    fn clone(&self) -> Self {
        Self {
            slot: self.slot.clone(),
        }
    }
}

impl<W, S> TrieHandle<W, S>
where
    W: Clone + 'static,
    S: TextSelector<W> + Clone + 'static,
{
    /// Wrap an existing trie.
    pub fn from_trie(trie: Trie<W, S>) -> Self {
        Self {
            slot: StateSlot::new(trie),
        }
    }

    /// Store `word`. Returns `false` (and publishes nothing) when its key is
    /// empty or already stored.
    pub fn add(&self, word: W) -> bool {
        self.slot.dispatch(|trie| trie.add(word))
    }

    /// Remove the word stored under `term`, returning it.
    pub fn remove(&self, term: &str) -> Option<W> {
        if !self.has(term, true) {
            return None;
        }

        let mut removed = None;
        self.slot.dispatch(|trie| {
            removed = trie.remove(term);
            removed.is_some()
        });
        removed
    }

    pub fn has(&self, term: &str, exact: bool) -> bool {
        self.slot.with(|trie| trie.has(term, exact))
    }

    /// Every stored word whose key starts with `prefix`.
    pub fn search(&self, prefix: &str) -> Vec<W> {
        self.slot
            .with(|trie| trie.search(prefix).into_iter().cloned().collect())
    }

    pub fn is_empty(&self) -> bool {
        self.slot.with(Trie::is_empty)
    }

    pub fn len(&self) -> usize {
        self.slot.with(Trie::len)
    }

    /// The current authoritative trie.
    pub fn snapshot(&self) -> Rc<Trie<W, S>> {
        self.slot.get()
    }

    /// Run `listener` after every change.
    pub fn subscribe(&self, listener: impl Fn(u32) + 'static) -> Subscription {
        self.slot.subscribe(listener)
    }

    /// The underlying slot.
    pub fn slot(&self) -> &StateSlot<Trie<W, S>> {
        &self.slot
    }
}

/// A reactive trie indexing words by their own text.
pub fn use_trie<W>(initial: impl IntoIterator<Item = W>, options: TrieOptions) -> TrieHandle<W>
where
    W: AsRef<str> + Clone + 'static,
{
    TrieHandle::from_trie(Trie::from_words(initial, options))
}

/// A reactive trie projecting words through `selector`.
pub fn use_trie_with<W, S>(
    initial: impl IntoIterator<Item = W>,
    selector: S,
    options: TrieOptions,
) -> TrieHandle<W, S>
where
    W: Clone + 'static,
    S: TextSelector<W> + Clone + 'static,
{
    TrieHandle::from_trie(Trie::from_words_with(initial, selector, options))
}
