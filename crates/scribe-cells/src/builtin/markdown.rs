//! Markdown cells. State is the markdown source string; the viewer renders
//! it to HTML with pulldown-cmark.

use pulldown_cmark::{Parser, html};
use serde_json::{Value, json};

use crate::descriptor::{CellType, RenderCtx, no_toolbar};
use crate::fragment::Fragment;

pub const TAG: &str = "markdown";

pub fn cell_type() -> CellType {
    CellType::new(TAG, default_state, editor, viewer, no_toolbar)
}

fn default_state() -> Value {
    json!("**Markdown** content")
}

fn editor(ctx: &RenderCtx<'_>) -> Fragment {
    if !ctx.focused {
        return viewer(ctx);
    }
    Fragment::TextInput {
        value: ctx.state_str().to_string(),
        multiline: true,
        min_rows: Some(5),
    }
}

fn viewer(ctx: &RenderCtx<'_>) -> Fragment {
    Fragment::Html {
        html: render_html(ctx.state_str()),
    }
}

fn render_html(source: &str) -> String {
    let mut out = String::new();
    html::push_html(&mut out, Parser::new(source));
    out
}
