//! Shared identifier and record types for Scribe.
//!
//! This crate is the relational foundation: typed IDs, persisted cell
//! records, and notebook metadata. It has **no internal scribe
//! dependencies**: a pure leaf crate that other crates build on.
//!
//! # Entity-Relationship Overview
//!
//! ```text
//! Notebook (NotebookId)
//!     └── owns an ordered sequence of CellRecord (CellId)
//!
//! CellRecord
//!     └── `cell_type` tag selects a CellType descriptor (scribe-cells)
//!     └── `content` is opaque here; its shape belongs to the cell type
//!     └── `order` positions the cell within its notebook
//! ```

pub mod cell;
pub mod ids;
pub mod notebook;

pub use cell::CellRecord;
pub use ids::{CellId, NotebookId};
pub use notebook::Notebook;
