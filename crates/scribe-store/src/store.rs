//! The `DocumentStore` trait.

use async_trait::async_trait;
use scribe_types::{CellId, CellRecord, Notebook, NotebookId};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::Result;

/// A cell about to be created; the store assigns the id.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct NewCell {
    #[serde(rename = "type")]
    pub cell_type: String,
    pub order: i64,
    pub content: Value,
}

/// Async CRUD surface for notebook and cell persistence.
///
/// `get_cells` returns records already sorted by `order` (ties by insertion);
/// sorting is a store responsibility, consumers never re-sort.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// All cell records of a notebook, sorted by `order`.
    async fn get_cells(&self, notebook_id: NotebookId) -> Result<Vec<CellRecord>>;

    /// Persist a new cell; the returned record carries the assigned id.
    async fn create_cell(&self, notebook_id: NotebookId, cell: NewCell) -> Result<CellRecord>;

    /// Replace a cell record wholesale.
    async fn update_cell(&self, notebook_id: NotebookId, cell: CellRecord) -> Result<CellRecord>;

    /// Remove a cell.
    async fn delete_cell(&self, notebook_id: NotebookId, cell_id: CellId) -> Result<()>;

    /// Notebook metadata; `StoreError::NotebookNotFound` when missing.
    async fn get_notebook(&self, notebook_id: NotebookId) -> Result<Notebook>;

    /// Replace notebook metadata wholesale.
    async fn update_notebook(&self, notebook: &Notebook) -> Result<()>;
}
