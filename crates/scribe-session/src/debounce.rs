//! Per-key write debouncing.
//!
//! An explicit timer map: each key holds the latest pending payload and a
//! cancellable sleep task. Re-arming a key replaces its payload and restarts
//! the timer, so a burst of edits collapses into one commit carrying the
//! final state. Keys debounce independently.
//!
//! The map is shared between the session and its timer tasks behind a
//! parking_lot mutex; entry removal is the claim operation, so a payload is
//! committed exactly once whether the timer fires or `flush` gets there
//! first. Every entry carries the generation of the `arm` that created it,
//! and a timer task claims only its own generation: `abort` cannot stop a
//! task that is already past its sleep, and such a task must not walk off
//! with a later payload it could then lose at the commit await. Dropping the
//! debouncer aborts remaining timers without firing them, which keeps a
//! stale task from writing after the session is gone.

use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use parking_lot::Mutex;
use scribe_types::{CellId, CellRecord, Notebook};
use tokio::task::JoinHandle;

/// What a pending write is keyed by: one cell, or the notebook title.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WriteKey {
    Cell(CellId),
    Title,
}

/// The latest state waiting to be written.
#[derive(Debug, Clone)]
pub enum WritePayload {
    Cell(CellRecord),
    Notebook(Notebook),
}

pub(crate) type CommitFuture = Pin<Box<dyn Future<Output = ()> + Send>>;
pub(crate) type CommitFn = Arc<dyn Fn(WriteKey, WritePayload) -> CommitFuture + Send + Sync>;

struct Pending {
    payload: WritePayload,
    /// Generation of the `arm` that created this entry; the matching timer
    /// task refuses to claim anything newer.
    generation: u64,
    timer: Option<JoinHandle<()>>,
}

pub(crate) struct Debouncer {
    window: Duration,
    commit: CommitFn,
    pending: Arc<Mutex<HashMap<WriteKey, Pending>>>,
    generation: AtomicU64,
}

impl Debouncer {
    pub(crate) fn new(window: Duration, commit: CommitFn) -> Self {
        Self {
            window,
            commit,
            pending: Arc::new(Mutex::new(HashMap::new())),
            generation: AtomicU64::new(0),
        }
    }

    /// Arm (or re-arm) a key with the latest payload. Any previously pending
    /// payload for the key is discarded and its timer restarted.
    pub(crate) fn arm(&self, key: WriteKey, payload: WritePayload) {
        let generation = self.generation.fetch_add(1, Ordering::Relaxed);
        {
            let mut pending = self.pending.lock();
            if let Some(previous) = pending.remove(&key) {
                if let Some(timer) = previous.timer {
                    timer.abort();
                }
            }
            pending.insert(
                key,
                Pending {
                    payload,
                    generation,
                    timer: None,
                },
            );
        }

        let window = self.window;
        let commit = Arc::clone(&self.commit);
        let map = Arc::clone(&self.pending);
        let handle = tokio::spawn(async move {
            tokio::time::sleep(window).await;
            // Removing the entry claims the payload; a concurrent flush that
            // got here first leaves nothing to do. The generation check keeps
            // a task that a re-arm failed to abort mid-poll from claiming
            // the replacement payload, which it could still lose at the
            // commit await.
            let claimed = {
                let mut pending = map.lock();
                match pending.get(&key) {
                    Some(entry) if entry.generation == generation => pending.remove(&key),
                    _ => None,
                }
            };
            if let Some(entry) = claimed {
                commit(key, entry.payload).await;
            }
        });

        let mut pending = self.pending.lock();
        match pending.get_mut(&key) {
            Some(entry) if entry.generation == generation => entry.timer = Some(handle),
            // Superseded, cancelled, or already claimed. The task no-ops on
            // its generation check, so the handle can just be dropped;
            // aborting here could kill an in-flight commit.
            _ => {}
        }
    }

    /// Drop a pending write without firing it, handing back the payload it
    /// would have carried.
    pub(crate) fn cancel(&self, key: &WriteKey) -> Option<WritePayload> {
        let entry = self.pending.lock().remove(key)?;
        if let Some(timer) = entry.timer {
            timer.abort();
        }
        Some(entry.payload)
    }

    /// Whether a write is pending for the key.
    pub(crate) fn is_armed(&self, key: &WriteKey) -> bool {
        self.pending.lock().contains_key(key)
    }

    /// Commit every pending write immediately, regardless of remaining
    /// window time.
    pub(crate) async fn flush(&self) {
        let drained: Vec<(WriteKey, Pending)> = self.pending.lock().drain().collect();
        for (key, entry) in drained {
            if let Some(timer) = entry.timer {
                timer.abort();
            }
            (self.commit)(key, entry.payload).await;
        }
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        for (_, entry) in self.pending.lock().drain() {
            if let Some(timer) = entry.timer {
                timer.abort();
            }
        }
    }
}
