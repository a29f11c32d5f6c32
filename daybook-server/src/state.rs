use std::path::Path;

use anyhow::Result;
use daybook_core::store::EventTable;

/// Shared application state: the server-side events table.
///
/// The table is reloaded from disk on every operation, so concurrent
/// handlers always see the latest committed state.
#[derive(Clone)]
pub struct AppState {
    pub events: EventTable,
}

impl AppState {
    pub fn new(data_dir: &Path) -> Result<Self> {
        Ok(AppState {
            events: EventTable::open(data_dir)?,
        })
    }
}
