// ============================================================================
// spark-structures - Errors
// Configuration failures surfaced at construction time
// ============================================================================

use thiserror::Error;

/// Errors raised while configuring a structure.
///
/// Every runtime edge case (empty heap, absent word, empty key) is reported
/// through `Option` or an empty result instead. Only construction can fail.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StructureError {
    /// No ordering could be inferred from the initial values.
    #[error("unable to determine a default ordering for values of kind(s): {kinds}")]
    NoDefaultOrdering { kinds: String },

    /// A comparator was required but none was supplied.
    #[error("a comparator is required for this element type")]
    MissingComparator,
}

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, StructureError>;
