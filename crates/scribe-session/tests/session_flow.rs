//! End-to-end editing session behavior against a recording store.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::Mutex;
use serde_json::{Value, json};

use scribe_cells::CellRegistry;
use scribe_session::{EditingSession, SessionConfig, SessionError, SessionEvent};
use scribe_store::{DocumentStore, MemoryStore, NewCell, StoreError};
use scribe_types::{CellId, CellRecord, Notebook, NotebookId};

/// Which store operation a session triggered.
#[derive(Debug, Clone, PartialEq)]
enum Call {
    GetCells,
    GetNotebook,
    Create(String),
    Update(CellId, Value),
    Delete(CellId),
    UpdateNotebook(String),
}

/// Delegates to a MemoryStore while recording calls; individual operations
/// can be armed to fail once.
struct RecordingStore {
    inner: MemoryStore,
    calls: Mutex<Vec<Call>>,
    fail_next_create: Mutex<bool>,
    fail_next_update: Mutex<bool>,
    fail_next_delete: Mutex<bool>,
}

impl RecordingStore {
    fn new(inner: MemoryStore) -> Self {
        Self {
            inner,
            calls: Mutex::new(Vec::new()),
            fail_next_create: Mutex::new(false),
            fail_next_update: Mutex::new(false),
            fail_next_delete: Mutex::new(false),
        }
    }

    fn calls(&self) -> Vec<Call> {
        self.calls.lock().clone()
    }

    fn take_failure(flag: &Mutex<bool>) -> bool {
        std::mem::take(&mut *flag.lock())
    }
}

#[async_trait]
impl DocumentStore for RecordingStore {
    async fn get_cells(&self, notebook_id: NotebookId) -> scribe_store::Result<Vec<CellRecord>> {
        self.calls.lock().push(Call::GetCells);
        self.inner.get_cells(notebook_id).await
    }

    async fn create_cell(
        &self,
        notebook_id: NotebookId,
        cell: NewCell,
    ) -> scribe_store::Result<CellRecord> {
        self.calls.lock().push(Call::Create(cell.cell_type.clone()));
        if Self::take_failure(&self.fail_next_create) {
            return Err(StoreError::transport("create rejected"));
        }
        self.inner.create_cell(notebook_id, cell).await
    }

    async fn update_cell(
        &self,
        notebook_id: NotebookId,
        cell: CellRecord,
    ) -> scribe_store::Result<CellRecord> {
        self.calls
            .lock()
            .push(Call::Update(cell.id, cell.content.clone()));
        if Self::take_failure(&self.fail_next_update) {
            return Err(StoreError::transport("update rejected"));
        }
        self.inner.update_cell(notebook_id, cell).await
    }

    async fn delete_cell(
        &self,
        notebook_id: NotebookId,
        cell_id: CellId,
    ) -> scribe_store::Result<()> {
        self.calls.lock().push(Call::Delete(cell_id));
        if Self::take_failure(&self.fail_next_delete) {
            return Err(StoreError::transport("delete rejected"));
        }
        self.inner.delete_cell(notebook_id, cell_id).await
    }

    async fn get_notebook(&self, notebook_id: NotebookId) -> scribe_store::Result<Notebook> {
        self.calls.lock().push(Call::GetNotebook);
        self.inner.get_notebook(notebook_id).await
    }

    async fn update_notebook(&self, notebook: &Notebook) -> scribe_store::Result<()> {
        self.calls
            .lock()
            .push(Call::UpdateNotebook(notebook.title.clone()));
        self.inner.update_notebook(notebook).await
    }
}

fn notebook(id: NotebookId) -> Notebook {
    Notebook {
        id,
        title: "Field notes".into(),
        author: "ada".into(),
        description: String::new(),
        views: 0,
        created_at: Utc::now(),
        last_active_at: Utc::now(),
    }
}

/// A session over a seeded store, plus the store handle for assertions.
async fn open_session(records: Vec<CellRecord>) -> (EditingSession, Arc<RecordingStore>) {
    let notebook_id = NotebookId::new();
    let memory = MemoryStore::new();
    memory.seed_notebook(notebook(notebook_id));
    memory.seed_cells(notebook_id, records);

    let store = Arc::new(RecordingStore::new(memory));
    let session = EditingSession::open(
        Arc::clone(&store) as Arc<dyn DocumentStore>,
        Arc::new(CellRegistry::builtin()),
        notebook_id,
        SessionConfig::default(),
    )
    .await
    .expect("open session");
    (session, store)
}

fn store_writes(store: &RecordingStore) -> Vec<Call> {
    store
        .calls()
        .into_iter()
        .filter(|c| !matches!(c, Call::GetCells | Call::GetNotebook))
        .collect()
}

// =============================================================================
// Loading
// =============================================================================

#[tokio::test]
async fn test_unknown_cell_type_is_dropped_on_load() {
    let known = CellRecord::new(CellId::new(), "plain-text", 0, json!("hello"));
    let unknown = CellRecord::new(CellId::new(), "unknown-type", 1, json!({}));
    let (session, _store) = open_session(vec![known.clone(), unknown]).await;

    assert_eq!(session.cell_count(), 1);
    assert_eq!(session.cells()[0].id, known.id);
    assert_eq!(session.cells()[0].state, json!("hello"));
}

#[tokio::test]
async fn test_open_missing_notebook_is_terminal() {
    let store: Arc<dyn DocumentStore> = Arc::new(MemoryStore::new());
    let result = EditingSession::open(
        store,
        Arc::new(CellRegistry::builtin()),
        NotebookId::new(),
        SessionConfig::default(),
    )
    .await;
    assert!(matches!(result, Err(SessionError::NotebookNotFound(_))));
}

#[tokio::test]
async fn test_round_trip_preserves_registered_records() {
    let records = vec![
        CellRecord::new(CellId::new(), "markdown", 0, json!("# one")),
        CellRecord::new(CellId::new(), "mystery", 1, json!(null)),
        CellRecord::new(CellId::new(), "plain-text", 2, json!("two")),
    ];
    let (session, _store) = open_session(records.clone()).await;

    let rebuilt = session.records();
    assert_eq!(rebuilt.len(), 2);
    assert_eq!(rebuilt[0].id, records[0].id);
    assert_eq!(rebuilt[0].cell_type, "markdown");
    assert_eq!(rebuilt[0].content, json!("# one"));
    assert_eq!(rebuilt[1].id, records[2].id);
    // Orders are recomputed from list position.
    assert_eq!(rebuilt[0].order, 0);
    assert_eq!(rebuilt[1].order, 1);
}

// =============================================================================
// Structural edits
// =============================================================================

#[tokio::test]
async fn test_add_cell_on_empty_session() {
    let (mut session, store) = open_session(vec![]).await;

    let id = session.add_cell("markdown", 0).await.expect("add");
    assert_eq!(session.cell_count(), 1);
    assert_eq!(session.cells()[0].id, id);
    assert_eq!(session.cells()[0].state, json!("**Markdown** content"));
    assert_eq!(store_writes(&store), vec![Call::Create("markdown".into())]);
}

#[tokio::test]
async fn test_add_cell_swaps_in_store_assigned_id() {
    let (mut session, store) = open_session(vec![]).await;
    let id = session.add_cell("plain-text", 0).await.expect("add");

    let persisted = store.inner.get_cells(session.notebook().id).await.expect("get");
    assert_eq!(persisted.len(), 1);
    assert_eq!(persisted[0].id, id);
}

#[tokio::test]
async fn test_add_unknown_type_is_rejected_before_any_store_call() {
    let (mut session, store) = open_session(vec![]).await;
    let err = session.add_cell("no-such-type", 0).await.unwrap_err();
    assert!(matches!(err, SessionError::UnknownCellType(_)));
    assert_eq!(session.cell_count(), 0);
    assert!(store_writes(&store).is_empty());
}

#[tokio::test]
async fn test_add_and_delete_keep_list_consistent() {
    let (mut session, _store) = open_session(vec![]).await;

    let a = session.add_cell("plain-text", 0).await.expect("add a");
    let b = session.add_cell("markdown", 1).await.expect("add b");
    let c = session.add_cell("plain-text", 1).await.expect("add c");
    assert_eq!(session.cell_count(), 3);

    session.delete_cell(b).await.expect("delete b");
    assert_eq!(session.cell_count(), 2);

    let ids: Vec<CellId> = session.cells().iter().map(|c| c.id).collect();
    assert_eq!(ids, vec![a, c]);
    let mut unique = ids.clone();
    unique.dedup();
    assert_eq!(unique, ids);
}

#[tokio::test]
async fn test_failed_create_rolls_back_insertion() {
    let (mut session, store) = open_session(vec![]).await;
    *store.fail_next_create.lock() = true;

    let err = session.add_cell("markdown", 0).await.unwrap_err();
    assert!(matches!(err, SessionError::Store(_)));
    assert_eq!(session.cell_count(), 0);
    assert!(session.records().is_empty());
}

#[tokio::test]
async fn test_failed_delete_restores_cell_at_position() {
    let records = vec![
        CellRecord::new(CellId::new(), "plain-text", 0, json!("a")),
        CellRecord::new(CellId::new(), "plain-text", 1, json!("b")),
        CellRecord::new(CellId::new(), "plain-text", 2, json!("c")),
    ];
    let (mut session, store) = open_session(records.clone()).await;
    *store.fail_next_delete.lock() = true;

    let err = session.delete_cell(records[1].id).await.unwrap_err();
    assert!(matches!(err, SessionError::Store(_)));
    let ids: Vec<CellId> = session.cells().iter().map(|c| c.id).collect();
    assert_eq!(ids, vec![records[0].id, records[1].id, records[2].id]);
}

#[tokio::test(start_paused = true)]
async fn test_failed_delete_keeps_pending_edit_flushable() {
    let record = CellRecord::new(CellId::new(), "plain-text", 0, json!("x"));
    let (mut session, store) = open_session(vec![record.clone()]).await;

    session.update_cell_state(record.id, json!("edited"));
    *store.fail_next_delete.lock() = true;
    let err = session.delete_cell(record.id).await.unwrap_err();
    assert!(matches!(err, SessionError::Store(_)));

    // The cell is back, still carrying the edit, and the edit must still
    // reach the store.
    assert_eq!(session.cells()[0].state, json!("edited"));
    session.flush().await;
    let writes = store_writes(&store);
    assert!(writes.contains(&Call::Update(record.id, json!("edited"))));
}

#[tokio::test]
async fn test_delete_clears_focus() {
    let records = vec![CellRecord::new(CellId::new(), "plain-text", 0, json!("a"))];
    let (mut session, _store) = open_session(records.clone()).await;

    assert!(session.focus(records[0].id));
    session.delete_cell(records[0].id).await.expect("delete");
    assert_eq!(session.focused(), None);
}

#[tokio::test]
async fn test_move_cell_rewrites_displaced_orders() {
    let records = vec![
        CellRecord::new(CellId::new(), "plain-text", 0, json!("a")),
        CellRecord::new(CellId::new(), "plain-text", 1, json!("b")),
        CellRecord::new(CellId::new(), "plain-text", 2, json!("c")),
    ];
    let (mut session, store) = open_session(records.clone()).await;

    session.move_cell(records[2].id, 0).await.expect("move");
    let ids: Vec<CellId> = session.cells().iter().map(|c| c.id).collect();
    assert_eq!(ids, vec![records[2].id, records[0].id, records[1].id]);

    // Every cell changed position, so every one got its order persisted.
    let updates = store
        .calls()
        .iter()
        .filter(|c| matches!(c, Call::Update(..)))
        .count();
    assert_eq!(updates, 3);

    let rebuilt = session.records();
    let orders: Vec<i64> = rebuilt.iter().map(|r| r.order).collect();
    assert_eq!(orders, vec![0, 1, 2]);
}

#[tokio::test]
async fn test_failed_move_rolls_back_order() {
    let records = vec![
        CellRecord::new(CellId::new(), "plain-text", 0, json!("a")),
        CellRecord::new(CellId::new(), "plain-text", 1, json!("b")),
    ];
    let (mut session, store) = open_session(records.clone()).await;
    *store.fail_next_update.lock() = true;

    let err = session.move_cell(records[1].id, 0).await.unwrap_err();
    assert!(matches!(err, SessionError::Store(_)));
    let ids: Vec<CellId> = session.cells().iter().map(|c| c.id).collect();
    assert_eq!(ids, vec![records[0].id, records[1].id]);
}

// =============================================================================
// Debounced edits
// =============================================================================

#[tokio::test(start_paused = true)]
async fn test_rapid_edits_coalesce_into_one_update() {
    let record = CellRecord::new(CellId::new(), "plain-text", 0, json!(""));
    let (mut session, store) = open_session(vec![record.clone()]).await;

    for content in ["h", "he", "hel", "hell", "hello"] {
        session.update_cell_state(record.id, json!(content));
        tokio::time::advance(Duration::from_millis(50)).await;
    }
    // UI state reflects the edit immediately.
    assert_eq!(session.cells()[0].state, json!("hello"));
    assert!(store_writes(&store).is_empty());

    tokio::time::advance(Duration::from_millis(600)).await;
    tokio::task::yield_now().await;

    assert_eq!(
        store_writes(&store),
        vec![Call::Update(record.id, json!("hello"))]
    );
}

#[tokio::test(start_paused = true)]
async fn test_cells_debounce_independently() {
    let a = CellRecord::new(CellId::new(), "plain-text", 0, json!(""));
    let b = CellRecord::new(CellId::new(), "plain-text", 1, json!(""));
    let (mut session, store) = open_session(vec![a.clone(), b.clone()]).await;

    session.update_cell_state(a.id, json!("A"));
    tokio::time::advance(Duration::from_millis(300)).await;
    session.update_cell_state(b.id, json!("B"));

    // A's window elapses first; B's must be unaffected.
    tokio::time::advance(Duration::from_millis(250)).await;
    tokio::task::yield_now().await;
    assert_eq!(store_writes(&store), vec![Call::Update(a.id, json!("A"))]);

    tokio::time::advance(Duration::from_millis(300)).await;
    tokio::task::yield_now().await;
    assert_eq!(
        store_writes(&store),
        vec![
            Call::Update(a.id, json!("A")),
            Call::Update(b.id, json!("B"))
        ]
    );
}

#[tokio::test(start_paused = true)]
async fn test_flush_fires_pending_title_edit_exactly_once() {
    let (mut session, store) = open_session(vec![]).await;

    session.set_title("renamed");
    tokio::time::advance(Duration::from_millis(10)).await;
    session.flush().await;

    assert_eq!(
        store_writes(&store),
        vec![Call::UpdateNotebook("renamed".into())]
    );

    // The original timer is gone; nothing fires later.
    tokio::time::advance(Duration::from_secs(2)).await;
    tokio::task::yield_now().await;
    assert_eq!(store_writes(&store).len(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_close_flushes_then_goes_quiet() {
    let record = CellRecord::new(CellId::new(), "plain-text", 0, json!(""));
    let (mut session, store) = open_session(vec![record.clone()]).await;

    session.update_cell_state(record.id, json!("last words"));
    session.close().await;

    assert_eq!(
        store_writes(&store),
        vec![Call::Update(record.id, json!("last words"))]
    );
    tokio::time::advance(Duration::from_secs(2)).await;
    tokio::task::yield_now().await;
    assert_eq!(store_writes(&store).len(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_deleted_cell_is_inert() {
    let record = CellRecord::new(CellId::new(), "plain-text", 0, json!("x"));
    let (mut session, store) = open_session(vec![record.clone()]).await;

    // Arm a pending write, then delete before it fires.
    session.update_cell_state(record.id, json!("dying words"));
    session.delete_cell(record.id).await.expect("delete");
    session.update_cell_state(record.id, json!("from beyond"));

    assert_eq!(session.cell_count(), 0);
    tokio::time::advance(Duration::from_secs(2)).await;
    tokio::task::yield_now().await;

    // The only write touching the cell is the delete itself.
    assert_eq!(store_writes(&store), vec![Call::Delete(record.id)]);
}

#[tokio::test(start_paused = true)]
async fn test_failed_debounced_write_surfaces_as_event() {
    let record = CellRecord::new(CellId::new(), "plain-text", 0, json!(""));
    let (mut session, store) = open_session(vec![record.clone()]).await;
    let mut events = session.subscribe();

    *store.fail_next_update.lock() = true;
    session.update_cell_state(record.id, json!("doomed"));
    session.flush().await;

    let event = events.try_recv().expect("failure event");
    assert!(matches!(event, SessionEvent::SaveFailed { .. }));
    // The in-memory edit is kept; no rollback, no retry.
    assert_eq!(session.cells()[0].state, json!("doomed"));
}

// =============================================================================
// Focus
// =============================================================================

#[tokio::test]
async fn test_focus_is_exclusive() {
    let records = vec![
        CellRecord::new(CellId::new(), "plain-text", 0, json!("a")),
        CellRecord::new(CellId::new(), "plain-text", 1, json!("b")),
    ];
    let (mut session, _store) = open_session(records.clone()).await;

    assert!(session.focus(records[0].id));
    assert!(session.focus(records[1].id));
    assert_eq!(session.focused(), Some(records[1].id));

    session.unfocus();
    assert_eq!(session.focused(), None);

    assert!(!session.focus(CellId::new()));
    assert_eq!(session.focused(), None);
}
