//! The document store collaborator.
//!
//! Persistence for notebooks and cell records lives behind the
//! [`DocumentStore`] trait: a small async CRUD surface the editing session
//! calls into. How records actually land (SQL, REST, files) is the
//! implementation's business; the session only sees records and
//! [`StoreError`]s, and every error is recoverable from its point of view.
//!
//! [`MemoryStore`] is the reference implementation, used directly in tests
//! and demos.

pub mod error;
pub mod memory;
pub mod store;

pub use error::StoreError;
pub use memory::MemoryStore;
pub use store::{DocumentStore, NewCell};

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
