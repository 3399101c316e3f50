//! Polymorphic cell types for Scribe notebooks.
//!
//! A notebook is an ordered sequence of typed content blocks ("cells"). Each
//! kind of block is described once by a [`CellType`]: a default state value
//! plus three pure rendering functions (editor, viewer, toolbar). Dispatch is
//! a single table lookup in a [`CellRegistry`], never runtime inspection of
//! the state value itself.
//!
//! # Design Philosophy
//!
//! Rendering here is headless: render functions produce an abstract
//! [`Fragment`] tree, not markup. What a `TextInput` or a `Callout` looks
//! like is the presentation layer's problem.
//!
//! The registry is an explicit value, constructed once at startup and passed
//! by reference to whatever opens an editing session. There is no process
//! global, so tests build isolated registries freely.
//!
//! # Built-in Cell Types
//!
//! |--------------------|--------------------------------------------|
//! | Tag                | Content                                    |
//! |--------------------|--------------------------------------------|
//! | `plain-text`       | Unformatted text                           |
//! | `markdown`         | Markdown source, rendered in the viewer    |
//! | `highlighted-text` | Callout with a success/warning/error level |
//! | `file-cell`        | Single uploaded file attachment            |
//! | `image-gallery`    | Uploaded image collection                  |
//! | `audio-cell`       | Audio track playlist                       |
//! | `video-cell`       | Video playlist                             |
//! |--------------------|--------------------------------------------|

pub mod builtin;
pub mod convert;
pub mod descriptor;
pub mod fragment;
pub mod registry;
pub mod view;

pub use builtin::highlighted::HighlightLevel;
pub use convert::{UiCell, to_record, to_ui_cells};
pub use descriptor::{CellType, RenderCtx, RenderFn};
pub use fragment::Fragment;
pub use registry::CellRegistry;
pub use view::{editor_fragments, toolbar_fragment, viewer_fragments};
