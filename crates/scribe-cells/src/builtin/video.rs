//! Video playlist cells.

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::descriptor::{CellType, RenderCtx, no_toolbar};
use crate::fragment::Fragment;

pub const TAG: &str = "video-cell";

/// One uploaded video.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoItem {
    pub url: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct VideoState {
    videos: Vec<VideoItem>,
    is_loading: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    current_video_index: Option<usize>,
    is_playing: bool,
    progress: f64,
    is_fullscreen: bool,
}

pub fn cell_type() -> CellType {
    CellType::new(TAG, default_state, editor, viewer, no_toolbar)
}

fn default_state() -> Value {
    json!({
        "videos": [],
        "isLoading": false,
        "isPlaying": false,
        "progress": 0.0,
        "isFullscreen": false
    })
}

fn editor(ctx: &RenderCtx<'_>) -> Fragment {
    let Some(state) = ctx.state_as::<VideoState>() else {
        return Fragment::Empty;
    };
    if state.is_loading {
        return Fragment::Spinner;
    }
    Fragment::Column {
        children: vec![
            Fragment::VideoPlayer {
                videos: state.videos,
                current: state.current_video_index,
            },
            Fragment::UploadPrompt {
                accept: "video/*".into(),
            },
        ],
    }
}

fn viewer(ctx: &RenderCtx<'_>) -> Fragment {
    let Some(state) = ctx.state_as::<VideoState>() else {
        return Fragment::Empty;
    };
    Fragment::VideoPlayer {
        videos: state.videos,
        current: state.current_video_index,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_state_parses() {
        let parsed: VideoState = serde_json::from_value(default_state()).expect("default parses");
        assert!(parsed.videos.is_empty());
        assert!(!parsed.is_fullscreen);
    }

    #[test]
    fn test_loading_state_shows_spinner() {
        let state = json!({
            "videos": [],
            "isLoading": true,
            "isPlaying": false,
            "progress": 0.0,
            "isFullscreen": false
        });
        assert_eq!(
            editor(&RenderCtx {
                state: &state,
                focused: true,
            }),
            Fragment::Spinner
        );
    }
}
