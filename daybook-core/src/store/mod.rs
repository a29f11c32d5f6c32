//! Local table storage.
//!
//! Three independent tables (events, profile, chat), each a single JSON
//! document under the data directory. Tables are reloaded on every operation
//! so external writers are picked up, and written atomically via temp file +
//! rename. The store is the sole authority for durable state; callers keep
//! their own in-memory projections.

mod chat;
mod events;
mod profile;

pub use chat::{ChatLog, ChatMessage};
pub use events::{EventFilter, EventTable};
pub use profile::{ProfilePatch, ProfileTable, UserProfile};

use serde::Serialize;
use serde::de::DeserializeOwned;
use std::path::Path;

use crate::error::{DaybookError, DaybookResult};

fn read_table<T: DeserializeOwned + Default>(path: &Path) -> DaybookResult<T> {
    if !path.exists() {
        return Ok(T::default());
    }
    let contents = std::fs::read_to_string(path)?;
    serde_json::from_str(&contents).map_err(|e| {
        DaybookError::Storage(format!("Failed to parse {}: {}", path.display(), e))
    })
}

/// Atomic write: temp file first, then rename (atomic on POSIX when both
/// paths are on the same filesystem).
fn write_table<T: Serialize>(path: &Path, table: &T) -> DaybookResult<()> {
    let contents = serde_json::to_string_pretty(table)
        .map_err(|e| DaybookError::Serialization(e.to_string()))?;

    let temp = path.with_extension("tmp");
    std::fs::write(&temp, contents)?;
    std::fs::rename(&temp, path)?;
    Ok(())
}

/// Full data wipe: removes every table file. The only way profile data is
/// ever deleted.
pub fn wipe(data_dir: &Path) -> DaybookResult<()> {
    for file in [events::EVENTS_FILE, profile::PROFILE_FILE, chat::CHAT_FILE] {
        let path = data_dir.join(file);
        if path.exists() {
            std::fs::remove_file(path)?;
        }
    }
    Ok(())
}
