//! Record storage for logged entries.
//!
//! The store is an append-only sequence of [`Entry`] values. Handlers get
//! the store passed in by reference; nothing here is global.
//!
//! Consistency model: the whole table is loaded once and rewritten in full
//! on every change. Two processes sharing one file get last-writer-wins
//! with no conflict detection.

pub mod csv_store;
pub mod reset;

pub use csv_store::CsvStore;
pub use reset::{reset_week, ResetOutcome};

use crate::error::StoreError;
use crate::models::Entry;

/// Backing storage for the entry log.
pub trait RecordStore {
    /// All entries in append order.
    fn load_all(&self) -> &[Entry];

    /// Add an entry to the end of the log and persist it.
    ///
    /// On failure the entry is kept in memory and the store stays dirty
    /// until a later save succeeds.
    fn append(&mut self, entry: Entry) -> Result<(), StoreError>;

    /// Replace the whole log and persist it.
    fn overwrite(&mut self, entries: Vec<Entry>) -> Result<(), StoreError>;

    /// True when in-memory state is ahead of what is persisted.
    fn is_dirty(&self) -> bool {
        false
    }

    /// Retry persisting pending in-memory state.
    fn flush(&mut self) -> Result<(), StoreError> {
        Ok(())
    }
}

/// In-process store with no backing file.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Vec<Entry>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_entries(entries: Vec<Entry>) -> Self {
        Self {
            entries: entries.into_iter().map(Entry::normalized).collect(),
        }
    }
}

impl RecordStore for MemoryStore {
    fn load_all(&self) -> &[Entry] {
        &self.entries
    }

    fn append(&mut self, entry: Entry) -> Result<(), StoreError> {
        self.entries.push(entry.normalized());
        Ok(())
    }

    fn overwrite(&mut self, entries: Vec<Entry>) -> Result<(), StoreError> {
        self.entries = entries.into_iter().map(Entry::normalized).collect();
        Ok(())
    }
}
