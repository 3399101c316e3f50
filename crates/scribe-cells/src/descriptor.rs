//! Cell type descriptors.
//!
//! A [`CellType`] is the fixed definition of one block kind: a default state
//! value and three pure rendering functions. Descriptors are plain data
//! (a `&'static str` id plus fn pointers), so they are `Copy`, immutable, and
//! safe to share across every open session without locking.

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::warn;

use crate::fragment::Fragment;

/// Input to a render function: the cell's current opaque state plus whether
/// the cell holds input focus.
pub struct RenderCtx<'a> {
    pub state: &'a Value,
    pub focused: bool,
}

/// A pure rendering function. Capability-table dispatch: the registry maps a
/// type tag to three of these, and callers never inspect state shapes
/// themselves.
pub type RenderFn = fn(&RenderCtx<'_>) -> Fragment;

/// The fixed definition of one cell kind.
#[derive(Debug, Clone, Copy)]
pub struct CellType {
    /// Type tag; unique within one registry.
    pub id: &'static str,
    default_state: fn() -> Value,
    pub render_editor: RenderFn,
    pub render_viewer: RenderFn,
    pub render_toolbar: RenderFn,
}

impl CellType {
    pub fn new(
        id: &'static str,
        default_state: fn() -> Value,
        render_editor: RenderFn,
        render_viewer: RenderFn,
        render_toolbar: RenderFn,
    ) -> Self {
        Self {
            id,
            default_state,
            render_editor,
            render_viewer,
            render_toolbar,
        }
    }

    /// A fresh copy of this type's default state.
    pub fn default_state(&self) -> Value {
        (self.default_state)()
    }
}

impl RenderCtx<'_> {
    /// Deserialize the opaque state into the cell type's own shape.
    ///
    /// Returns `None` on mismatch so renderers fail closed (render
    /// [`Fragment::Empty`]) instead of propagating malformed state.
    pub fn state_as<T: DeserializeOwned>(&self) -> Option<T> {
        match serde_json::from_value(self.state.clone()) {
            Ok(state) => Some(state),
            Err(err) => {
                warn!(%err, "cell state did not match its type's shape");
                None
            }
        }
    }

    /// The state as a plain string, empty when it is null or not a string.
    ///
    /// String-state cell types tolerate null content the way the original
    /// records do.
    pub fn state_str(&self) -> &str {
        self.state.as_str().unwrap_or_default()
    }
}

/// Shared empty toolbar for cell types with nothing to put there.
pub(crate) fn no_toolbar(_ctx: &RenderCtx<'_>) -> Fragment {
    Fragment::Empty
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_default_state_returns_fresh_value() {
        let cell_type = CellType::new(
            "stub",
            || json!({ "n": 0 }),
            no_toolbar,
            no_toolbar,
            no_toolbar,
        );
        assert_eq!(cell_type.default_state(), json!({ "n": 0 }));
    }

    #[test]
    fn test_state_as_rejects_mismatched_shape() {
        let state = json!(["not", "a", "map"]);
        let ctx = RenderCtx {
            state: &state,
            focused: false,
        };
        #[derive(serde::Deserialize)]
        struct Shape {
            #[allow(dead_code)]
            n: i32,
        }
        assert!(ctx.state_as::<Shape>().is_none());
    }

    #[test]
    fn test_state_str_tolerates_null() {
        let state = Value::Null;
        let ctx = RenderCtx {
            state: &state,
            focused: true,
        };
        assert_eq!(ctx.state_str(), "");
    }
}
