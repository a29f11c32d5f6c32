//! The events table.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use uuid::Uuid;

use crate::error::{DaybookError, DaybookResult};
use crate::event::{Event, EventCategory, EventDraft, EventPatch, EventPriority, EventStatus};

pub(super) const EVENTS_FILE: &str = "events.json";

/// Key-indexed table of events.
#[derive(Debug, Clone)]
pub struct EventTable {
    path: PathBuf,
}

impl EventTable {
    pub fn open(data_dir: &Path) -> DaybookResult<Self> {
        std::fs::create_dir_all(data_dir)?;
        Ok(EventTable {
            path: data_dir.join(EVENTS_FILE),
        })
    }

    fn load(&self) -> DaybookResult<HashMap<Uuid, Event>> {
        super::read_table(&self.path)
    }

    fn save(&self, table: &HashMap<Uuid, Event>) -> DaybookResult<()> {
        super::write_table(&self.path, table)
    }

    /// Assign a fresh id, set `created_at == updated_at`, persist, and return
    /// the stored record.
    pub fn create(&self, draft: &EventDraft) -> DaybookResult<Event> {
        draft.validate()?;
        let event = Event::from_draft(draft);
        self.insert(&event)?;
        Ok(event)
    }

    /// Store an already-materialized record verbatim, replacing any existing
    /// record with the same id.
    pub fn insert(&self, event: &Event) -> DaybookResult<()> {
        let mut table = self.load()?;
        table.insert(event.id, event.clone());
        self.save(&table)
    }

    /// Merge partial fields into the stored record, re-check the interval
    /// invariant on the merged result, refresh `updated_at`, persist.
    pub fn update(&self, id: Uuid, patch: &EventPatch) -> DaybookResult<Event> {
        let mut table = self.load()?;
        let event = table
            .get_mut(&id)
            .ok_or_else(|| DaybookError::NotFound(id.to_string()))?;

        patch.apply(event);

        if event.title.trim().is_empty() {
            return Err(DaybookError::Validation(
                "title must not be empty".to_string(),
            ));
        }
        if event.end <= event.start {
            return Err(DaybookError::Validation(
                "end must be strictly after start".to_string(),
            ));
        }

        event.updated_at = Utc::now();
        let updated = event.clone();
        self.save(&table)?;
        Ok(updated)
    }

    /// Remove a record. Deleting an id that was never stored is an error so
    /// callers can tell a bad id from a successful delete.
    pub fn delete(&self, id: Uuid) -> DaybookResult<()> {
        let mut table = self.load()?;
        if table.remove(&id).is_none() {
            return Err(DaybookError::NotFound(id.to_string()));
        }
        self.save(&table)
    }

    /// All events, sorted by start time.
    pub fn get_all(&self) -> DaybookResult<Vec<Event>> {
        let mut events: Vec<Event> = self.load()?.into_values().collect();
        events.sort_by_key(|e| e.start);
        Ok(events)
    }

    pub fn get_by_id(&self, id: Uuid) -> DaybookResult<Option<Event>> {
        Ok(self.load()?.remove(&id))
    }

    /// Events intersecting `[start, end]`, inclusive on both ends.
    pub fn get_by_date_range(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> DaybookResult<Vec<Event>> {
        let mut events: Vec<Event> = self
            .load()?
            .into_values()
            .filter(|e| e.start <= end && e.end >= start)
            .collect();
        events.sort_by_key(|e| e.start);
        Ok(events)
    }

    /// Date-range pre-filter (when present) composed with in-memory
    /// predicate filtering.
    pub fn query(&self, filter: &EventFilter) -> DaybookResult<Vec<Event>> {
        let mut events = match filter.range {
            Some((start, end)) => self.get_by_date_range(start, end)?,
            None => self.get_all()?,
        };
        events.retain(|e| filter.matches(e));
        Ok(events)
    }
}

/// Composable event filter. Tag matching is OR semantics: any shared tag
/// qualifies.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventFilter {
    #[serde(default)]
    pub range: Option<(DateTime<Utc>, DateTime<Utc>)>,
    #[serde(default)]
    pub category: Option<EventCategory>,
    #[serde(default)]
    pub priority: Option<EventPriority>,
    #[serde(default)]
    pub status: Option<EventStatus>,
    #[serde(default)]
    pub recurring: Option<bool>,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl EventFilter {
    fn matches(&self, event: &Event) -> bool {
        if self.category.is_some_and(|c| event.category != c) {
            return false;
        }
        if self.priority.is_some_and(|p| event.priority != p) {
            return false;
        }
        if self.status.is_some_and(|s| event.status != s) {
            return false;
        }
        if self.recurring.is_some_and(|r| event.recurring != r) {
            return false;
        }
        if !self.tags.is_empty() && !self.tags.iter().any(|t| event.tags.contains(t)) {
            return false;
        }
        true
    }
}
