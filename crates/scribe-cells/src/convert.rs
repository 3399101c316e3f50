//! Record ⇄ UI cell conversion.
//!
//! This is the single place where a persisted [`CellRecord`] and a registered
//! [`CellType`] meet. A record whose tag the registry doesn't know is dropped
//! here: logged, never fatal, never replaced with a placeholder, so
//! one unrecognized cell can't abort loading the rest of a notebook.

use scribe_types::{CellId, CellRecord};
use serde_json::Value;
use tracing::warn;

use crate::descriptor::{CellType, RenderCtx, RenderFn};
use crate::fragment::Fragment;
use crate::registry::CellRegistry;

/// A cell in its live, editable form: the record's content as mutable state,
/// with the matching descriptor's render behaviors copied in at conversion
/// time.
#[derive(Debug, Clone)]
pub struct UiCell {
    /// Matches the originating record's id, except on a freshly added cell
    /// that is still waiting for the store to assign one.
    pub id: CellId,
    pub state: Value,
    pub render_editor: RenderFn,
    pub render_viewer: RenderFn,
    pub render_toolbar: RenderFn,
}

impl UiCell {
    /// Bind a persisted record to its descriptor.
    pub fn from_record(record: &CellRecord, cell_type: &CellType) -> Self {
        Self {
            id: record.id,
            state: record.content.clone(),
            render_editor: cell_type.render_editor,
            render_viewer: cell_type.render_viewer,
            render_toolbar: cell_type.render_toolbar,
        }
    }

    /// A brand-new cell: temporary id, the descriptor's default state.
    pub fn fresh(cell_type: &CellType) -> Self {
        Self {
            id: CellId::new(),
            state: cell_type.default_state(),
            render_editor: cell_type.render_editor,
            render_viewer: cell_type.render_viewer,
            render_toolbar: cell_type.render_toolbar,
        }
    }

    pub fn editor(&self, focused: bool) -> Fragment {
        (self.render_editor)(&RenderCtx {
            state: &self.state,
            focused,
        })
    }

    pub fn viewer(&self) -> Fragment {
        (self.render_viewer)(&RenderCtx {
            state: &self.state,
            focused: false,
        })
    }

    pub fn toolbar(&self) -> Fragment {
        (self.render_toolbar)(&RenderCtx {
            state: &self.state,
            focused: true,
        })
    }
}

/// Convert persisted records to UI cells, dropping records with unregistered
/// tags. Output order follows input order; callers are expected to have
/// received records already sorted by `order`; sorting is the store's job,
/// not the converter's.
pub fn to_ui_cells(records: &[CellRecord], registry: &CellRegistry) -> Vec<UiCell> {
    records
        .iter()
        .filter_map(|record| match registry.lookup(&record.cell_type) {
            Some(cell_type) => Some(UiCell::from_record(record, cell_type)),
            None => {
                warn!(cell_id = %record.id, cell_type = %record.cell_type, "unknown cell type, dropping cell");
                None
            }
        })
        .collect()
}

/// Rebuild the persisted form of a UI cell.
///
/// `cell_type` comes from the cell's last-known record (a cell never changes
/// its type) and `index` is its current position in the session's ordered
/// list, which becomes the persisted `order`.
pub fn to_record(cell: &UiCell, cell_type: &str, index: usize) -> CellRecord {
    CellRecord::new(cell.id, cell_type, index as i64, cell.state.clone())
}
