//! Image gallery cells: an uploaded image collection.

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::descriptor::{CellType, RenderCtx, no_toolbar};
use crate::fragment::Fragment;

pub const TAG: &str = "image-gallery";

/// One image in the gallery.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GalleryImage {
    pub url: String,
    pub name: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GalleryState {
    images: Vec<GalleryImage>,
    is_loading: bool,
}

pub fn cell_type() -> CellType {
    CellType::new(TAG, default_state, editor, viewer, no_toolbar)
}

fn default_state() -> Value {
    json!({ "images": [], "isLoading": false })
}

fn editor(ctx: &RenderCtx<'_>) -> Fragment {
    let Some(state) = ctx.state_as::<GalleryState>() else {
        return Fragment::Empty;
    };
    if state.is_loading {
        return Fragment::Spinner;
    }
    Fragment::Column {
        children: vec![
            Fragment::Gallery {
                images: state.images,
            },
            Fragment::UploadPrompt {
                accept: "image/*".into(),
            },
        ],
    }
}

fn viewer(ctx: &RenderCtx<'_>) -> Fragment {
    let Some(state) = ctx.state_as::<GalleryState>() else {
        return Fragment::Empty;
    };
    Fragment::Gallery {
        images: state.images,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_editor_offers_upload_when_idle() {
        let state = default_state();
        let frag = editor(&RenderCtx {
            state: &state,
            focused: true,
        });
        let Fragment::Column { children } = frag else {
            panic!("expected column");
        };
        assert!(matches!(children[0], Fragment::Gallery { ref images } if images.is_empty()));
        assert!(matches!(children[1], Fragment::UploadPrompt { ref accept } if accept == "image/*"));
    }

    #[test]
    fn test_viewer_lists_images() {
        let state = json!({
            "images": [{ "url": "https://x/a.png", "name": "a.png" }],
            "isLoading": false
        });
        let frag = viewer(&RenderCtx {
            state: &state,
            focused: false,
        });
        assert!(matches!(frag, Fragment::Gallery { ref images } if images.len() == 1));
    }
}
