//! Audio playlist cells.

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::descriptor::{CellType, RenderCtx, no_toolbar};
use crate::fragment::Fragment;

pub const TAG: &str = "audio-cell";

/// One uploaded track.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AudioTrack {
    pub url: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<f64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AudioState {
    tracks: Vec<AudioTrack>,
    is_loading: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    current_track_index: Option<usize>,
    is_playing: bool,
    progress: f64,
}

pub fn cell_type() -> CellType {
    CellType::new(TAG, default_state, editor, viewer, no_toolbar)
}

fn default_state() -> Value {
    json!({ "tracks": [], "isLoading": false, "isPlaying": false, "progress": 0.0 })
}

fn editor(ctx: &RenderCtx<'_>) -> Fragment {
    let Some(state) = ctx.state_as::<AudioState>() else {
        return Fragment::Empty;
    };
    if state.is_loading {
        return Fragment::Spinner;
    }
    Fragment::Column {
        children: vec![
            Fragment::AudioPlayer {
                tracks: state.tracks,
                current: state.current_track_index,
            },
            Fragment::UploadPrompt {
                accept: "audio/*".into(),
            },
        ],
    }
}

fn viewer(ctx: &RenderCtx<'_>) -> Fragment {
    let Some(state) = ctx.state_as::<AudioState>() else {
        return Fragment::Empty;
    };
    Fragment::AudioPlayer {
        tracks: state.tracks,
        current: state.current_track_index,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_state_matches_persisted_shape() {
        let state = default_state();
        let parsed: AudioState = serde_json::from_value(state).expect("default parses");
        assert!(parsed.tracks.is_empty());
        assert!(parsed.current_track_index.is_none());
    }

    #[test]
    fn test_viewer_carries_current_track() {
        let state = json!({
            "tracks": [{ "url": "https://x/a.mp3", "name": "a.mp3", "duration": 12.5 }],
            "isLoading": false,
            "currentTrackIndex": 0,
            "isPlaying": true,
            "progress": 3.0
        });
        let frag = viewer(&RenderCtx {
            state: &state,
            focused: false,
        });
        assert!(matches!(
            frag,
            Fragment::AudioPlayer {
                current: Some(0),
                ..
            }
        ));
    }
}
