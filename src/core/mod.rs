// ============================================================================
// spark-structures - Core Module
// Errors, slot traits, and the thread-local state context
// ============================================================================

pub mod context;
pub mod error;
pub mod types;

pub use context::{is_batching, with_context, write_version, StateContext};
pub use error::{Result, StructureError};
pub use types::{AnySlot, Listener, ListenerId};
