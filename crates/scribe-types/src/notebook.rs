//! Notebook metadata.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::NotebookId;

/// Notebook metadata as the store returns it.
///
/// The editing session owns live edits to `title` only; every other field is
/// read-only context carried along so `update_notebook` can send the whole
/// record back.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notebook {
    pub id: NotebookId,
    pub title: String,
    pub author: String,
    pub description: String,
    pub views: u64,
    pub created_at: DateTime<Utc>,
    pub last_active_at: DateTime<Utc>,
}

impl Notebook {
    /// Copy of this notebook with a different title, everything else untouched.
    pub fn with_title(&self, title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..self.clone()
        }
    }
}
