//! Whole-document render projections.
//!
//! Thin helpers over per-cell render functions: the read-only viewer page and
//! the editor column with at most one focused cell.

use scribe_types::CellId;

use crate::convert::UiCell;
use crate::fragment::Fragment;

/// Read-only projection of a document: every cell through its viewer, focus
/// never set.
pub fn viewer_fragments(cells: &[UiCell]) -> Vec<(CellId, Fragment)> {
    cells.iter().map(|cell| (cell.id, cell.viewer())).collect()
}

/// Editor projection: each cell rendered with its own focus flag.
pub fn editor_fragments(cells: &[UiCell], focus: Option<CellId>) -> Vec<(CellId, Fragment)> {
    cells
        .iter()
        .map(|cell| (cell.id, cell.editor(focus == Some(cell.id))))
        .collect()
}

/// The focused cell's toolbar extension, if any cell is focused.
pub fn toolbar_fragment(cells: &[UiCell], focus: Option<CellId>) -> Option<Fragment> {
    let focus = focus?;
    cells
        .iter()
        .find(|cell| cell.id == focus)
        .map(UiCell::toolbar)
}
