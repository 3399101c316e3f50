//! Highlighted callout cells: a text body with a success/warning/error level.
//!
//! The only built-in with a real toolbar: a level picker shown while the
//! cell is focused.

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::descriptor::{CellType, RenderCtx};
use crate::fragment::Fragment;

pub const TAG: &str = "highlighted-text";

/// Callout severity.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum HighlightLevel {
    Success,
    #[default]
    Warning,
    Error,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct HighlightedState {
    text: String,
    /// Persisted under `type`, the field name earlier clients wrote.
    #[serde(rename = "type")]
    level: HighlightLevel,
}

pub fn cell_type() -> CellType {
    CellType::new(TAG, default_state, editor, viewer, toolbar)
}

fn default_state() -> Value {
    json!({ "text": "", "type": "warning" })
}

fn editor(ctx: &RenderCtx<'_>) -> Fragment {
    if !ctx.focused {
        return viewer(ctx);
    }
    let Some(state) = ctx.state_as::<HighlightedState>() else {
        return Fragment::Empty;
    };
    Fragment::TextInput {
        value: state.text,
        multiline: true,
        min_rows: None,
    }
}

fn viewer(ctx: &RenderCtx<'_>) -> Fragment {
    let Some(state) = ctx.state_as::<HighlightedState>() else {
        return Fragment::Empty;
    };
    Fragment::Callout {
        level: state.level,
        text: state.text,
    }
}

fn toolbar(ctx: &RenderCtx<'_>) -> Fragment {
    let Some(state) = ctx.state_as::<HighlightedState>() else {
        return Fragment::Empty;
    };
    Fragment::LevelPicker {
        selected: state.level,
    }
}
