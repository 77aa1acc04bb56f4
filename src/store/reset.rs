//! Weekly restart: clears tracked metrics from the stored log.

use super::RecordStore;
use crate::error::StoreError;
use crate::models::Entry;
use serde::Serialize;
use tracing::{debug, info};

/// Result of a reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ResetOutcome {
    /// `rows` entries carried values and were zeroed.
    Cleared { rows: usize },
    /// Nothing to clear; no write happened.
    AlreadyClear,
}

/// Zero every tracked metric on every stored row.
///
/// Dates and the row count are kept. Running it on an already clear log
/// does not rewrite the table.
pub fn reset_week<S: RecordStore + ?Sized>(store: &mut S) -> Result<ResetOutcome, StoreError> {
    let total = store.load_all().len();
    let rows = store.load_all().iter().filter(|e| !e.is_clear()).count();

    if rows == 0 {
        // A previous reset may have cleared memory without reaching disk.
        if store.is_dirty() {
            store.flush()?;
        }
        debug!("Reset skipped: {} rows already clear", total);
        return Ok(ResetOutcome::AlreadyClear);
    }

    let cleared: Vec<Entry> = store.load_all().iter().map(Entry::cleared).collect();
    store.overwrite(cleared)?;

    info!("Reset tracked metrics on {} rows", rows);
    Ok(ResetOutcome::Cleared { rows })
}
