//! The document editing session.
//!
//! An [`EditingSession`] owns the in-memory ordered cell list for exactly one
//! open notebook: which cell has focus, the notebook title's live edit
//! buffer, and the discipline for getting mutations to the document store.
//!
//! # Persistence discipline
//!
//! - **State edits** (cell content, title) update the in-memory list
//!   synchronously and arm a per-key debounce timer; when it fires, one store
//!   call carries only the latest state. Timers for different keys are
//!   independent.
//! - **Structural edits** (add, delete, move) apply optimistically and issue
//!   an immediate store call; on failure the list reverts to its pre-mutation
//!   shape and the error is returned.
//! - **Teardown** flushes pending debounced writes before cancelling timers,
//!   so the last edit burst is never silently lost.
//!
//! # Concurrency model
//!
//! Single logical editing thread: all session mutations happen from the one
//! UI context that opened it. Suspension occurs only at store-call
//! boundaries. Debounce commits run on detached tasks; their failures
//! surface on the session's event channel rather than a call stack.

pub mod config;
pub mod debounce;
pub mod error;
pub mod session;

pub use config::SessionConfig;
pub use debounce::WriteKey;
pub use error::SessionError;
pub use session::{EditingSession, SessionEvent};

/// Result type for session operations.
pub type Result<T> = std::result::Result<T, SessionError>;
