//! Error types for session operations.

use scribe_store::StoreError;
use scribe_types::{CellId, NotebookId};
use thiserror::Error;

/// Errors surfaced by editing-session operations.
///
/// Store failures from direct (non-debounced) operations arrive here;
/// failures inside debounced commits surface on the session event channel
/// instead, since there is no call stack to return through.
#[derive(Error, Debug)]
pub enum SessionError {
    /// The notebook this session was asked to open does not exist.
    /// Terminal for the view: render not-found, no retry.
    #[error("notebook not found: {0}")]
    NotebookNotFound(NotebookId),

    /// `add_cell` was asked for a type tag the registry doesn't know.
    #[error("unknown cell type: {0}")]
    UnknownCellType(String),

    /// The named cell is not part of this session.
    #[error("cell not in session: {0}")]
    CellNotFound(CellId),

    /// A document store call failed; the optimistic mutation was rolled back.
    #[error(transparent)]
    Store(#[from] StoreError),
}
