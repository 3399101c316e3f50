//! The cell type registry.
//!
//! Maps a type tag to its [`CellType`] descriptor. Insertion-ordered: the
//! "insert new cell" toolbar presents types in registration order, while
//! document order always comes from cell `order` values, never from here.
//!
//! Registered once at startup and read-mostly afterwards; entries are `Copy`
//! data, so sharing a registry across sessions needs no locking.

use indexmap::IndexMap;

use crate::builtin;
use crate::descriptor::CellType;

/// Registry of available cell kinds.
#[derive(Debug, Default, Clone)]
pub struct CellRegistry {
    table: IndexMap<&'static str, CellType>,
}

impl CellRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// All seven built-in cell types, in the order the original editor
    /// offered them.
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        registry.register(builtin::plain_text::cell_type());
        registry.register(builtin::markdown::cell_type());
        registry.register(builtin::highlighted::cell_type());
        registry.register(builtin::file::cell_type());
        registry.register(builtin::gallery::cell_type());
        registry.register(builtin::audio::cell_type());
        registry.register(builtin::video::cell_type());
        registry
    }

    /// Add a cell type, replacing any existing entry under the same tag.
    pub fn register(&mut self, cell_type: CellType) {
        self.table.insert(cell_type.id, cell_type);
    }

    /// Look up a descriptor by type tag.
    ///
    /// A miss is a recoverable condition, not an error: callers (the
    /// converter) drop the offending cell and keep going.
    pub fn lookup(&self, tag: &str) -> Option<&CellType> {
        self.table.get(tag)
    }

    /// Descriptors in registration order.
    pub fn list(&self) -> impl Iterator<Item = &CellType> {
        self.table.values()
    }

    /// Remove a cell type. Unused in practice (types are fixed for a
    /// process lifetime) but nothing depends on them being permanent.
    pub fn remove(&mut self, tag: &str) -> Option<CellType> {
        self.table.shift_remove(tag)
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}
