//! Shared, swappable table handle
//!
//! Readers take an `Arc` snapshot and keep using it for the whole call, so a
//! reload never changes a table under an in-flight decode. Reload is a full
//! replacement of the `Arc`, never an in-place edit.

use std::sync::Arc;

use parking_lot::RwLock;

use super::FieldTable;

/// A field table that can be replaced atomically
///
/// ## Concurrency:
/// - `snapshot()`: short read lock, clones the `Arc`
/// - `replace()`: short write lock, swaps the `Arc`
pub struct SharedTable {
    current: RwLock<Arc<FieldTable>>,
}

impl SharedTable {
    pub fn new(table: FieldTable) -> Self {
        Self::from_arc(Arc::new(table))
    }

    pub fn from_arc(table: Arc<FieldTable>) -> Self {
        Self {
            current: RwLock::new(table),
        }
    }

    /// Current table
    pub fn snapshot(&self) -> Arc<FieldTable> {
        Arc::clone(&self.current.read())
    }

    /// Install a new table, returning the one it replaced
    pub fn replace(&self, table: FieldTable) -> Arc<FieldTable> {
        let next = Arc::new(table);
        let commands = next.len();
        let previous = std::mem::replace(&mut *self.current.write(), next);
        tracing::info!(
            previous = previous.len(),
            current = commands,
            "field table replaced"
        );
        previous
    }
}

impl Default for SharedTable {
    fn default() -> Self {
        Self::new(FieldTable::default())
    }
}
