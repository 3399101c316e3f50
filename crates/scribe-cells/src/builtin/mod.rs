//! Built-in cell types.
//!
//! Each module owns one type tag: its typed state shape, the three render
//! functions, and a `cell_type()` constructor. State structs serialize in
//! camelCase so persisted records keep the shape earlier clients wrote.

pub mod audio;
pub mod file;
pub mod gallery;
pub mod highlighted;
pub mod markdown;
pub mod plain_text;
pub mod video;
