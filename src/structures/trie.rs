// ============================================================================
// spark-structures - Trie
// Character-indexed prefix tree over projected, optionally case-folded keys
// ============================================================================
//
// Each stored word is projected to a key by a TextSelector, folded to lower
// case when the trie is case-insensitive, then spelled out one char per node
// from the root. The node where the key ends carries the original word as
// its payload.
//
// Invariants:
// - a key's terminal node carries a payload iff the key is stored
// - every non-root node lies on the path to some payload (removal prunes)
// - the root is never removed and never carries a payload
// ============================================================================

use std::borrow::Cow;
use std::fmt;
use std::str::Chars;

use indexmap::IndexMap;
use tracing::{debug, trace};

use crate::structures::selector::{Identity, TextSelector};

// =============================================================================
// OPTIONS
// =============================================================================

/// Construction-time trie configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrieOptions {
    /// Fold keys to lower case before indexing. Applies to every operation.
    pub case_insensitive: bool,
}

impl TrieOptions {
    /// Keys are folded to lower case (the default).
    pub fn case_insensitive() -> Self {
        Self {
            case_insensitive: true,
        }
    }

    /// Keys are indexed exactly as projected.
    pub fn case_sensitive() -> Self {
        Self {
            case_insensitive: false,
        }
    }
}

impl Default for TrieOptions {
    fn default() -> Self {
        Self::case_insensitive()
    }
}

// =============================================================================
// TRIE NODE
// =============================================================================

/// A node in the trie. Children are kept in insertion order.
#[derive(Clone)]
pub struct TrieNode<W> {
    character: Option<char>,
    children: IndexMap<char, TrieNode<W>>,
    payload: Option<W>,
}

impl<W> TrieNode<W> {
    fn root() -> Self {
        Self {
            character: None,
            children: IndexMap::new(),
            payload: None,
        }
    }

    fn new(character: char) -> Self {
        Self {
            character: Some(character),
            children: IndexMap::new(),
            payload: None,
        }
    }

    /// The label of this node. `None` only for the root.
    pub fn character(&self) -> Option<char> {
        self.character
    }

    /// The stored word ending at this node, if any.
    pub fn payload(&self) -> Option<&W> {
        self.payload.as_ref()
    }

    /// True if a stored word ends here.
    pub fn is_terminal(&self) -> bool {
        self.payload.is_some()
    }

    /// Child nodes in insertion order.
    pub fn children(&self) -> impl Iterator<Item = &TrieNode<W>> {
        self.children.values()
    }

    /// The child reached by `character`.
    pub fn child(&self, character: char) -> Option<&TrieNode<W>> {
        self.children.get(&character)
    }

    fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    fn walk(&self, key: &str) -> Option<&TrieNode<W>> {
        let mut node = self;
        for c in key.chars() {
            node = node.children.get(&c)?;
        }
        Some(node)
    }

    /// Clear the payload at the end of `chars`, pruning childless
    /// non-terminal nodes on the way back up.
    fn remove_path(&mut self, chars: &mut Chars<'_>) -> Option<W> {
        let Some(c) = chars.next() else {
            return self.payload.take();
        };

        let child = self.children.get_mut(&c)?;
        let removed = child.remove_path(chars)?;
        if child.is_leaf() && !child.is_terminal() {
            self.children.shift_remove(&c);
        }
        Some(removed)
    }

    /// Pre-order collection of every payload at or below this node.
    fn collect_payloads<'a>(&'a self, out: &mut Vec<&'a W>) {
        if let Some(payload) = &self.payload {
            out.push(payload);
        }
        for child in self.children.values() {
            child.collect_payloads(out);
        }
    }
}

impl<W: fmt::Debug> fmt::Debug for TrieNode<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TrieNode")
            .field("character", &self.character)
            .field("payload", &self.payload)
            .field("children", &self.children)
            .finish()
    }
}

// =============================================================================
// TRIE
// =============================================================================

/// A prefix tree storing words of type `W`, indexed by a [`TextSelector`].
///
/// # Example
///
/// ```
/// use spark_structures::{Trie, TrieOptions};
///
/// let mut trie = Trie::from_words(["AbC", "aBd"], TrieOptions::default());
/// assert!(trie.has("abc", true));
/// assert!(trie.has("ABD", true));
/// assert!(trie.has("ab", false));
/// assert!(!trie.has("ab", true));
///
/// trie.remove("abc");
/// assert!(!trie.contains("abc"));
/// assert_eq!(trie.search("a"), vec![&"aBd"]);
/// ```
#[derive(Clone)]
pub struct Trie<W, S = Identity> {
    root: TrieNode<W>,
    options: TrieOptions,
    selector: S,
    len: usize,
}

impl<W: AsRef<str>> Trie<W> {
    /// An empty case-insensitive trie indexing words by their own text.
    pub fn new() -> Self {
        Self::with_options(TrieOptions::default())
    }

    /// An empty trie indexing words by their own text.
    pub fn with_options(options: TrieOptions) -> Self {
        Self::with_selector(Identity, options)
    }

    /// Build a trie from `words` by inserting each in turn.
    pub fn from_words(words: impl IntoIterator<Item = W>, options: TrieOptions) -> Self {
        Self::from_words_with(words, Identity, options)
    }
}

impl<W: AsRef<str>> Default for Trie<W> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W, S: TextSelector<W>> Trie<W, S> {
    /// An empty trie projecting words through `selector`.
    pub fn with_selector(selector: S, options: TrieOptions) -> Self {
        Self {
            root: TrieNode::root(),
            options,
            selector,
            len: 0,
        }
    }

    /// Build a trie from `words`, projected through `selector`.
    pub fn from_words_with(
        words: impl IntoIterator<Item = W>,
        selector: S,
        options: TrieOptions,
    ) -> Self {
        let mut trie = Self::with_selector(selector, options);
        for word in words {
            trie.add(word);
        }
        debug!(
            len = trie.len,
            case_insensitive = options.case_insensitive,
            "trie built"
        );
        trie
    }

    fn normalize<'a>(&self, text: Cow<'a, str>) -> Cow<'a, str> {
        if self.options.case_insensitive {
            Cow::Owned(text.to_lowercase())
        } else {
            text
        }
    }

    // =========================================================================
    // INSERTION
    // =========================================================================

    /// Store `word` under its projected key.
    ///
    /// Returns `false` without touching the trie when the key is empty or
    /// already stored. An existing payload is kept, even if `word` differs.
    pub fn add(&mut self, word: W) -> bool {
        let key = self.normalize(self.selector.select(&word)).into_owned();
        self.insert_key(&key, word)
    }

    /// Store `word` under the key produced by `selector` instead of the
    /// trie's own selector.
    pub fn add_with<T: TextSelector<W>>(&mut self, word: W, selector: &T) -> bool {
        let key = self.normalize(selector.select(&word)).into_owned();
        self.insert_key(&key, word)
    }

    fn insert_key(&mut self, key: &str, word: W) -> bool {
        if key.is_empty() {
            return false;
        }
        if self.root.walk(key).is_some_and(TrieNode::is_terminal) {
            trace!(key, "trie add ignored, key already stored");
            return false;
        }

        let mut node = &mut self.root;
        for c in key.chars() {
            node = node.children.entry(c).or_insert_with(|| TrieNode::new(c));
        }
        node.payload = Some(word);
        self.len += 1;
        trace!(key, len = self.len, "trie add");
        true
    }

    // =========================================================================
    // LOOKUP
    // =========================================================================

    /// Test membership of `term`.
    ///
    /// With `exact` the whole term must be a stored key. Without it, any
    /// stored key starting with `term` is enough. The empty term is never
    /// present.
    pub fn has(&self, term: &str, exact: bool) -> bool {
        let key = self.normalize(Cow::Borrowed(term));
        if key.is_empty() {
            return false;
        }
        match self.root.walk(&key) {
            Some(node) => !exact || node.is_terminal(),
            None => false,
        }
    }

    /// Exact membership.
    pub fn contains(&self, term: &str) -> bool {
        self.has(term, true)
    }

    /// True if some stored key starts with `prefix`.
    pub fn contains_prefix(&self, prefix: &str) -> bool {
        self.has(prefix, false)
    }

    /// Every stored word whose key starts with `prefix`, including an exact
    /// match. Results follow child insertion order, not sorted order.
    pub fn search(&self, prefix: &str) -> Vec<&W> {
        let key = self.normalize(Cow::Borrowed(prefix));
        let mut found = Vec::new();
        if key.is_empty() {
            return found;
        }
        if let Some(node) = self.root.walk(&key) {
            node.collect_payloads(&mut found);
        }
        found
    }

    /// Every stored word in traversal order.
    pub fn words(&self) -> Vec<&W> {
        let mut found = Vec::with_capacity(self.len);
        self.root.collect_payloads(&mut found);
        found
    }

    // =========================================================================
    // REMOVAL
    // =========================================================================

    /// Remove the word stored under `term`, returning it.
    ///
    /// Absent terms and empty tries are a no-op returning `None`.
    pub fn remove(&mut self, term: &str) -> Option<W> {
        if self.is_empty() {
            return None;
        }
        let key = self.normalize(Cow::Borrowed(term)).into_owned();
        if key.is_empty() {
            return None;
        }

        let removed = self.root.remove_path(&mut key.chars())?;
        self.len -= 1;
        trace!(key = key.as_str(), len = self.len, "trie remove");
        Some(removed)
    }

    /// Remove every word.
    pub fn clear(&mut self) {
        self.root = TrieNode::root();
        self.len = 0;
    }

    // =========================================================================
    // INSPECTION
    // =========================================================================

    /// True iff the root has no children.
    pub fn is_empty(&self) -> bool {
        self.root.is_leaf()
    }

    /// Number of stored words.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_case_insensitive(&self) -> bool {
        self.options.case_insensitive
    }

    pub fn options(&self) -> TrieOptions {
        self.options
    }

    pub fn selector(&self) -> &S {
        &self.selector
    }

    /// The root node, for inspection.
    pub fn root(&self) -> &TrieNode<W> {
        &self.root
    }
}

impl<W, S: TextSelector<W>> Extend<W> for Trie<W, S> {
    fn extend<I: IntoIterator<Item = W>>(&mut self, iter: I) {
        for word in iter {
            self.add(word);
        }
    }
}

impl<W: AsRef<str>> FromIterator<W> for Trie<W> {
    fn from_iter<I: IntoIterator<Item = W>>(iter: I) -> Self {
        Self::from_words(iter, TrieOptions::default())
    }
}

impl<W: fmt::Debug, S> fmt::Debug for Trie<W, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Trie")
            .field("len", &self.len)
            .field("options", &self.options)
            .field("root", &self.root)
            .finish()
    }
}

// =============================================================================
// TESTS
// =============================================================================
