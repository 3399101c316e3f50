//! Plain text cells. State is a bare string.

use serde_json::{Value, json};

use crate::descriptor::{CellType, RenderCtx, no_toolbar};
use crate::fragment::Fragment;

pub const TAG: &str = "plain-text";

pub fn cell_type() -> CellType {
    CellType::new(TAG, default_state, editor, viewer, no_toolbar)
}

fn default_state() -> Value {
    json!("PlainText")
}

fn editor(ctx: &RenderCtx<'_>) -> Fragment {
    if !ctx.focused {
        return viewer(ctx);
    }
    Fragment::TextInput {
        value: ctx.state_str().to_string(),
        multiline: true,
        min_rows: None,
    }
}

fn viewer(ctx: &RenderCtx<'_>) -> Fragment {
    Fragment::text(ctx.state_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_editor_shows_input_only_when_focused() {
        let state = json!("hello");
        let focused = editor(&RenderCtx {
            state: &state,
            focused: true,
        });
        assert!(matches!(focused, Fragment::TextInput { ref value, multiline: true, .. } if value == "hello"));

        let blurred = editor(&RenderCtx {
            state: &state,
            focused: false,
        });
        assert_eq!(blurred, Fragment::text("hello"));
    }

    #[test]
    fn test_null_state_renders_empty_text() {
        let state = Value::Null;
        let frag = viewer(&RenderCtx {
            state: &state,
            focused: false,
        });
        assert_eq!(frag, Fragment::text(""));
    }

    #[test]
    fn test_toolbar_is_empty() {
        let state = default_state();
        let frag = (cell_type().render_toolbar)(&RenderCtx {
            state: &state,
            focused: true,
        });
        assert!(frag.is_empty());
    }
}
