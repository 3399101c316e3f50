//! Headless render output.
//!
//! Render functions return a [`Fragment`] tree instead of markup, so the core
//! stays independent of any UI toolkit. The enum is serde-tagged for clients
//! that consume render output over a wire.

use serde::{Deserialize, Serialize};

use crate::builtin::audio::AudioTrack;
use crate::builtin::gallery::GalleryImage;
use crate::builtin::highlighted::HighlightLevel;
use crate::builtin::video::VideoItem;

/// One node of headless render output.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Fragment {
    /// Nothing to show. Also the fail-closed fallback for malformed state.
    #[default]
    Empty,

    /// Static text.
    Text { text: String },

    /// Editable text field.
    TextInput {
        value: String,
        multiline: bool,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        min_rows: Option<u8>,
    },

    /// Pre-rendered HTML (markdown viewer output).
    Html { html: String },

    /// Highlighted callout box.
    Callout { level: HighlightLevel, text: String },

    /// Toolbar control for choosing a callout level.
    LevelPicker { selected: HighlightLevel },

    /// An uploaded file card.
    Attachment { name: String, url: String },

    /// Prompt to upload content of the given MIME pattern.
    UploadPrompt { accept: String },

    /// In-flight upload indicator.
    Spinner,

    /// Image grid.
    Gallery { images: Vec<GalleryImage> },

    /// Audio playlist with an optional active track.
    AudioPlayer {
        tracks: Vec<AudioTrack>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        current: Option<usize>,
    },

    /// Video playlist with an optional active video.
    VideoPlayer {
        videos: Vec<VideoItem>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        current: Option<usize>,
    },

    /// Vertical composition of child fragments.
    Column { children: Vec<Fragment> },
}

impl Fragment {
    /// Static text node from anything stringy.
    pub fn text(text: impl Into<String>) -> Self {
        Fragment::Text { text: text.into() }
    }

    /// Whether this fragment renders nothing.
    pub fn is_empty(&self) -> bool {
        matches!(self, Fragment::Empty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serde_tag_is_snake_case() {
        let frag = Fragment::TextInput {
            value: "hi".into(),
            multiline: true,
            min_rows: None,
        };
        let value = serde_json::to_value(&frag).expect("serialize");
        assert_eq!(value["type"], "text_input");
        assert!(value.get("min_rows").is_none());
    }

    #[test]
    fn test_default_is_empty() {
        assert!(Fragment::default().is_empty());
        assert!(!Fragment::text("x").is_empty());
    }
}
