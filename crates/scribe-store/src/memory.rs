//! In-memory document store.
//!
//! Reference implementation of [`DocumentStore`]: per-notebook record tables
//! behind a parking_lot mutex. Used as the test double throughout the
//! workspace and as the backing store for demos. The lock is never held
//! across an await.

use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::Mutex;
use scribe_types::{CellId, CellRecord, Notebook, NotebookId};
use tracing::debug;

use crate::Result;
use crate::error::StoreError;
use crate::store::{DocumentStore, NewCell};

#[derive(Default)]
struct Inner {
    notebooks: HashMap<NotebookId, Notebook>,
    cells: HashMap<NotebookId, Vec<CellRecord>>,
}

/// A document store held entirely in memory.
#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert notebook metadata directly, bypassing the CRUD surface.
    pub fn seed_notebook(&self, notebook: Notebook) {
        let mut inner = self.inner.lock();
        inner.cells.entry(notebook.id).or_default();
        inner.notebooks.insert(notebook.id, notebook);
    }

    /// Insert cell records directly, bypassing the CRUD surface.
    pub fn seed_cells(&self, notebook_id: NotebookId, records: Vec<CellRecord>) {
        self.inner
            .lock()
            .cells
            .entry(notebook_id)
            .or_default()
            .extend(records);
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn get_cells(&self, notebook_id: NotebookId) -> Result<Vec<CellRecord>> {
        let inner = self.inner.lock();
        let mut records = inner.cells.get(&notebook_id).cloned().unwrap_or_default();
        // Stable sort: equal orders keep insertion order.
        records.sort_by_key(|r| r.order);
        Ok(records)
    }

    async fn create_cell(&self, notebook_id: NotebookId, cell: NewCell) -> Result<CellRecord> {
        let record = CellRecord::new(CellId::new(), cell.cell_type, cell.order, cell.content);
        debug!(notebook_id = %notebook_id, cell_id = %record.id, "created cell");
        self.inner
            .lock()
            .cells
            .entry(notebook_id)
            .or_default()
            .push(record.clone());
        Ok(record)
    }

    async fn update_cell(&self, notebook_id: NotebookId, cell: CellRecord) -> Result<CellRecord> {
        let mut inner = self.inner.lock();
        let records = inner
            .cells
            .get_mut(&notebook_id)
            .ok_or(StoreError::NotebookNotFound(notebook_id))?;
        let slot = records
            .iter_mut()
            .find(|r| r.id == cell.id)
            .ok_or(StoreError::CellNotFound(cell.id))?;
        *slot = cell.clone();
        Ok(cell)
    }

    async fn delete_cell(&self, notebook_id: NotebookId, cell_id: CellId) -> Result<()> {
        let mut inner = self.inner.lock();
        let records = inner
            .cells
            .get_mut(&notebook_id)
            .ok_or(StoreError::NotebookNotFound(notebook_id))?;
        let before = records.len();
        records.retain(|r| r.id != cell_id);
        if records.len() == before {
            return Err(StoreError::CellNotFound(cell_id));
        }
        Ok(())
    }

    async fn get_notebook(&self, notebook_id: NotebookId) -> Result<Notebook> {
        self.inner
            .lock()
            .notebooks
            .get(&notebook_id)
            .cloned()
            .ok_or(StoreError::NotebookNotFound(notebook_id))
    }

    async fn update_notebook(&self, notebook: &Notebook) -> Result<()> {
        let mut inner = self.inner.lock();
        let slot = inner
            .notebooks
            .get_mut(&notebook.id)
            .ok_or(StoreError::NotebookNotFound(notebook.id))?;
        *slot = notebook.clone();
        Ok(())
    }
}
