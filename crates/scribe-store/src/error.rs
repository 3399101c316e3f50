//! Error types for store operations.

use scribe_types::{CellId, NotebookId};
use thiserror::Error;

/// Errors a document store call can surface.
///
/// All of these are recoverable at the session boundary: a failed call maps
/// to a user-visible error state, never a crash, and the store is never
/// retried automatically.
#[derive(Error, Debug)]
pub enum StoreError {
    /// The notebook does not exist. Terminal for the current view.
    #[error("notebook not found: {0}")]
    NotebookNotFound(NotebookId),

    /// The cell does not exist under this notebook.
    #[error("cell not found: {0}")]
    CellNotFound(CellId),

    /// Transport-level failure: network error or non-2xx response.
    #[error("store transport failure: {message}")]
    Transport { message: String },

    /// A record failed to round-trip through the store's serialization.
    #[error("store serialization failure: {0}")]
    Serialization(String),
}

impl StoreError {
    /// Convenience constructor for transport failures.
    pub fn transport(message: impl Into<String>) -> Self {
        StoreError::Transport {
            message: message.into(),
        }
    }
}
