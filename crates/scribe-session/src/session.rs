//! The editing session itself.

use std::collections::HashMap;
use std::sync::Arc;

use scribe_cells::{CellRegistry, Fragment, UiCell, to_record, to_ui_cells};
use scribe_store::{DocumentStore, NewCell, StoreError};
use scribe_types::{CellId, CellRecord, Notebook, NotebookId};
use serde_json::Value;
use tokio::sync::broadcast;
use tracing::{debug, info, warn};

use crate::Result;
use crate::config::SessionConfig;
use crate::debounce::{CommitFn, Debouncer, WriteKey, WritePayload};
use crate::error::SessionError;

/// Notifications from persistence work that happens off the call stack.
///
/// The session never retries or rolls back a failed debounced write; it
/// reports the failure here and lets the UI decide how to show it.
#[derive(Debug, Clone)]
pub enum SessionEvent {
    /// A debounced cell write landed.
    CellSaved { cell_id: CellId },
    /// A debounced title write landed.
    TitleSaved,
    /// A debounced write failed; the in-memory state keeps the user's edit.
    SaveFailed { target: WriteKey, message: String },
}

/// In-memory editing state for one open notebook.
///
/// Owned exclusively by the UI context that opened it; all mutation happens
/// on that single logical thread.
pub struct EditingSession {
    notebook: Notebook,
    cells: Vec<UiCell>,
    /// Last-known persisted form per live cell. Keeps the immutable type tag
    /// and the persisted order so records can be rebuilt from UI state.
    records: HashMap<CellId, CellRecord>,
    focus: Option<CellId>,
    registry: Arc<CellRegistry>,
    store: Arc<dyn DocumentStore>,
    debounce: Debouncer,
    events: broadcast::Sender<SessionEvent>,
}

impl EditingSession {
    /// Open a notebook: load metadata and cells, convert to UI form.
    ///
    /// Records with unregistered type tags are dropped from the UI here (and
    /// from the session's record mirror, so nothing this session does will
    /// ever touch them in the store).
    pub async fn open(
        store: Arc<dyn DocumentStore>,
        registry: Arc<CellRegistry>,
        notebook_id: NotebookId,
        config: SessionConfig,
    ) -> Result<Self> {
        let notebook = store.get_notebook(notebook_id).await.map_err(|err| match err {
            StoreError::NotebookNotFound(_) => SessionError::NotebookNotFound(notebook_id),
            other => SessionError::Store(other),
        })?;
        let loaded = store.get_cells(notebook_id).await?;

        let cells = to_ui_cells(&loaded, &registry);
        let live: HashMap<CellId, CellRecord> = loaded
            .into_iter()
            .filter(|r| cells.iter().any(|c| c.id == r.id))
            .map(|r| (r.id, r))
            .collect();

        info!(
            notebook_id = %notebook_id,
            cells = cells.len(),
            "opened editing session"
        );

        let (events, _) = broadcast::channel(config.event_capacity);
        let commit = commit_fn(Arc::clone(&store), notebook_id, events.clone());

        Ok(Self {
            notebook,
            cells,
            records: live,
            focus: None,
            registry,
            store,
            debounce: Debouncer::new(config.debounce_window, commit),
            events,
        })
    }

    // =========================================================================
    // Read accessors
    // =========================================================================

    pub fn notebook(&self) -> &Notebook {
        &self.notebook
    }

    /// The title as currently edited (may be ahead of the store).
    pub fn title(&self) -> &str {
        &self.notebook.title
    }

    /// Cells in display order.
    pub fn cells(&self) -> &[UiCell] {
        &self.cells
    }

    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// The focused cell, if any.
    pub fn focused(&self) -> Option<CellId> {
        self.focus
    }

    /// Subscribe to persistence notifications.
    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.events.subscribe()
    }

    /// The persisted projection of the current session state: every live
    /// cell rebuilt as a record, orders recomputed from list position.
    pub fn records(&self) -> Vec<CellRecord> {
        self.cells
            .iter()
            .enumerate()
            .filter_map(|(index, cell)| {
                self.records
                    .get(&cell.id)
                    .map(|known| to_record(cell, &known.cell_type, index))
            })
            .collect()
    }

    // =========================================================================
    // Focus
    // =========================================================================

    /// Focus a cell; any previously focused cell is implicitly unfocused.
    /// Its debounce timer keeps running; switching focus never flushes.
    pub fn focus(&mut self, cell_id: CellId) -> bool {
        if self.cells.iter().any(|c| c.id == cell_id) {
            self.focus = Some(cell_id);
            true
        } else {
            false
        }
    }

    pub fn unfocus(&mut self) {
        self.focus = None;
    }

    // =========================================================================
    // State edits (debounced)
    // =========================================================================

    /// Replace a cell's state in memory and arm its debounce timer.
    ///
    /// Ids that are not part of the session (including just-deleted cells)
    /// are inert: no list change, no store call.
    pub fn update_cell_state(&mut self, cell_id: CellId, new_state: Value) {
        let Some(cell) = self.cells.iter_mut().find(|c| c.id == cell_id) else {
            debug!(cell_id = %cell_id, "state update for unknown cell ignored");
            return;
        };
        cell.state = new_state.clone();

        let Some(known) = self.records.get_mut(&cell_id) else {
            return;
        };
        known.content = new_state;
        self.debounce
            .arm(WriteKey::Cell(cell_id), WritePayload::Cell(known.clone()));
    }

    /// Edit the notebook title with the same debounce discipline.
    pub fn set_title(&mut self, new_title: impl Into<String>) {
        self.notebook.title = new_title.into();
        self.debounce.arm(
            WriteKey::Title,
            WritePayload::Notebook(self.notebook.clone()),
        );
    }

    // =========================================================================
    // Structural edits (immediate, optimistic with rollback)
    // =========================================================================

    /// Insert a new cell of the given type at `index` (clamped to the list).
    ///
    /// The cell appears in the list immediately under a temporary id; the
    /// store-assigned id is swapped in when the create call succeeds. On
    /// failure the insertion is rolled back and the error returned.
    pub async fn add_cell(&mut self, type_tag: &str, index: usize) -> Result<CellId> {
        let cell_type = self
            .registry
            .lookup(type_tag)
            .ok_or_else(|| SessionError::UnknownCellType(type_tag.to_string()))?;

        let cell = UiCell::fresh(cell_type);
        let temp_id = cell.id;
        let content = cell.state.clone();
        let index = index.min(self.cells.len());
        self.cells.insert(index, cell);

        let new_cell = NewCell {
            cell_type: type_tag.to_string(),
            order: index as i64,
            content,
        };
        match self.store.create_cell(self.notebook.id, new_cell).await {
            Ok(record) => {
                let assigned = record.id;
                if let Some(cell) = self.cells.iter_mut().find(|c| c.id == temp_id) {
                    cell.id = assigned;
                }
                self.records.insert(assigned, record);
                info!(cell_id = %assigned, cell_type = type_tag, index, "added cell");
                Ok(assigned)
            }
            Err(err) => {
                self.cells.retain(|c| c.id != temp_id);
                warn!(cell_type = type_tag, %err, "create failed, insertion rolled back");
                Err(err.into())
            }
        }
    }

    /// Remove a cell optimistically and delete it from the store.
    ///
    /// Clears focus if the deleted cell held it and drops any pending
    /// debounced write for it. Unknown ids are a no-op. On store failure the
    /// cell is reinserted at its old position, the cancelled pending write
    /// re-armed, and the error returned.
    pub async fn delete_cell(&mut self, cell_id: CellId) -> Result<()> {
        let Some(position) = self.cells.iter().position(|c| c.id == cell_id) else {
            debug!(cell_id = %cell_id, "delete of unknown cell ignored");
            return Ok(());
        };
        let removed = self.cells.remove(position);
        if self.focus == Some(cell_id) {
            self.focus = None;
        }
        let pending = self.debounce.cancel(&WriteKey::Cell(cell_id));

        match self.store.delete_cell(self.notebook.id, cell_id).await {
            Ok(()) => {
                self.records.remove(&cell_id);
                info!(cell_id = %cell_id, "deleted cell");
                Ok(())
            }
            Err(err) => {
                let position = position.min(self.cells.len());
                self.cells.insert(position, removed);
                if let Some(payload) = pending {
                    self.debounce.arm(WriteKey::Cell(cell_id), payload);
                }
                warn!(cell_id = %cell_id, %err, "delete failed, removal rolled back");
                Err(err.into())
            }
        }
    }

    /// Move a cell to a new position and persist every displaced cell's
    /// recomputed order. Rolls the list back wholesale on the first failure.
    pub async fn move_cell(&mut self, cell_id: CellId, new_index: usize) -> Result<()> {
        let Some(position) = self.cells.iter().position(|c| c.id == cell_id) else {
            return Err(SessionError::CellNotFound(cell_id));
        };
        let new_index = new_index.min(self.cells.len().saturating_sub(1));
        if position == new_index {
            return Ok(());
        }

        let cells_snapshot = self.cells.clone();
        let records_snapshot = self.records.clone();
        let cell = self.cells.remove(position);
        self.cells.insert(new_index, cell);

        // Records whose persisted order no longer matches their position.
        let displaced: Vec<CellRecord> = self
            .cells
            .iter()
            .enumerate()
            .filter_map(|(index, cell)| {
                let known = self.records.get(&cell.id)?;
                (known.order != index as i64).then(|| CellRecord {
                    order: index as i64,
                    content: cell.state.clone(),
                    ..known.clone()
                })
            })
            .collect();

        for updated in displaced {
            match self.store.update_cell(self.notebook.id, updated).await {
                Ok(saved) => {
                    if let Some(known) = self.records.get_mut(&saved.id) {
                        *known = saved;
                    }
                }
                Err(err) => {
                    self.cells = cells_snapshot;
                    self.records = records_snapshot;
                    warn!(cell_id = %cell_id, %err, "reorder failed, list rolled back");
                    return Err(err.into());
                }
            }
        }
        info!(cell_id = %cell_id, from = position, to = new_index, "moved cell");
        Ok(())
    }

    // =========================================================================
    // Teardown
    // =========================================================================

    /// Fire all pending debounced writes now.
    pub async fn flush(&self) {
        self.debounce.flush().await;
    }

    /// Flush pending writes, then tear the session down. Remaining timers
    /// are cancelled when the debouncer drops, so nothing fires afterwards.
    pub async fn close(self) {
        self.debounce.flush().await;
        info!(notebook_id = %self.notebook.id, "closed editing session");
    }

    // =========================================================================
    // Render projections
    // =========================================================================

    /// Every cell through its editor renderer, honoring current focus.
    pub fn editor_fragments(&self) -> Vec<(CellId, Fragment)> {
        scribe_cells::editor_fragments(&self.cells, self.focus)
    }

    /// The focused cell's toolbar extension, if a cell is focused.
    pub fn toolbar_fragment(&self) -> Option<Fragment> {
        scribe_cells::toolbar_fragment(&self.cells, self.focus)
    }

    /// Read-only projection of the whole document.
    pub fn viewer_fragments(&self) -> Vec<(CellId, Fragment)> {
        scribe_cells::viewer_fragments(&self.cells)
    }
}

/// Build the debounce commit: route each payload to the matching store call
/// and report the outcome on the event channel.
fn commit_fn(
    store: Arc<dyn DocumentStore>,
    notebook_id: NotebookId,
    events: broadcast::Sender<SessionEvent>,
) -> CommitFn {
    Arc::new(move |key, payload| {
        let store = Arc::clone(&store);
        let events = events.clone();
        Box::pin(async move {
            let result = match payload {
                WritePayload::Cell(record) => {
                    store.update_cell(notebook_id, record).await.map(|_| ())
                }
                WritePayload::Notebook(notebook) => store.update_notebook(&notebook).await,
            };
            let event = match result {
                Ok(()) => match key {
                    WriteKey::Cell(cell_id) => SessionEvent::CellSaved { cell_id },
                    WriteKey::Title => SessionEvent::TitleSaved,
                },
                Err(err) => {
                    warn!(?key, %err, "debounced write failed");
                    SessionEvent::SaveFailed {
                        target: key,
                        message: err.to_string(),
                    }
                }
            };
            // Nobody listening is fine.
            let _ = events.send(event);
        })
    })
}
