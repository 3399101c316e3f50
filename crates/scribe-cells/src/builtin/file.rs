//! File attachment cells: zero or one uploaded file.

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::descriptor::{CellType, RenderCtx, no_toolbar};
use crate::fragment::Fragment;

pub const TAG: &str = "file-cell";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FileState {
    url: Option<String>,
    name: String,
    is_loading: bool,
}

pub fn cell_type() -> CellType {
    CellType::new(TAG, default_state, editor, viewer, no_toolbar)
}

fn default_state() -> Value {
    json!({ "url": null, "name": "", "isLoading": false })
}

fn editor(ctx: &RenderCtx<'_>) -> Fragment {
    let Some(state) = ctx.state_as::<FileState>() else {
        return Fragment::Empty;
    };
    if state.is_loading {
        return Fragment::Spinner;
    }
    match state.url {
        Some(url) => Fragment::Attachment {
            name: state.name,
            url,
        },
        None => Fragment::UploadPrompt {
            accept: "*/*".into(),
        },
    }
}

fn viewer(ctx: &RenderCtx<'_>) -> Fragment {
    let Some(state) = ctx.state_as::<FileState>() else {
        return Fragment::Empty;
    };
    match state.url {
        Some(url) => Fragment::Attachment {
            name: state.name,
            url,
        },
        None => Fragment::text("No file uploaded"),
    }
}
