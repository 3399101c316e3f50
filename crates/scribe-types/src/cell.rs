//! Persisted cell records.
//!
//! A [`CellRecord`] is the flat, store-side form of one content block. Its
//! `content` field is opaque at this layer: the shape is defined entirely by
//! the `cell_type` tag, and only the matching descriptor (scribe-cells) knows
//! how to interpret it. The store round-trips it as plain JSON.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::ids::CellId;

/// The persisted form of one cell.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CellRecord {
    /// Store-assigned identifier.
    pub id: CellId,
    /// Type tag resolved against the cell type registry.
    ///
    /// Immutable for the lifetime of a cell: a cell never changes its type.
    #[serde(rename = "type")]
    pub cell_type: String,
    /// Display position among cells of the same notebook. Ties are broken by
    /// array position, so the sequence the store returns is authoritative.
    pub order: i64,
    /// Opaque state; shape belongs to `cell_type`.
    pub content: Value,
}

impl CellRecord {
    /// Build a record with a fresh content value.
    pub fn new(id: CellId, cell_type: impl Into<String>, order: i64, content: Value) -> Self {
        Self {
            id,
            cell_type: cell_type.into(),
            order,
            content,
        }
    }

    /// Copy of this record with different content, identity untouched.
    pub fn with_content(&self, content: Value) -> Self {
        Self {
            content,
            ..self.clone()
        }
    }
}
