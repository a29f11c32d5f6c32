//! Event types for the daybook calendar.
//!
//! `Event` is the stored record. `EventDraft` is the creation input and
//! `EventPatch` a partial update; both validate the interval invariant
//! (`end` strictly after `start`). Wire format is camelCase to match the
//! remote event API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{DaybookError, DaybookResult};

/// Reminder offsets (minutes before start) offered by the UI.
pub const REMINDER_OFFSETS: [i64; 7] = [0, 5, 10, 15, 30, 60, 1440];

/// A calendar event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    /// Generated at creation, never reused, stable across local/remote sync.
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub location: Option<String>,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    /// All-day events keep their timestamps; the conflict detector does not
    /// special-case them.
    pub all_day: bool,
    pub category: EventCategory,
    pub status: EventStatus,
    pub priority: EventPriority,
    pub tags: Vec<String>,
    /// Flag only; recurrence expansion is not implemented.
    pub recurring: bool,
    /// Minutes before `start` to remind (see [`REMINDER_OFFSETS`]).
    pub reminder_minutes: Option<i64>,
    pub notification_sent: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Event {
    /// Materialize a stored record from a validated draft.
    /// `created_at == updated_at` at birth.
    pub fn from_draft(draft: &EventDraft) -> Self {
        let now = Utc::now();
        Event {
            id: Uuid::new_v4(),
            title: draft.title.clone(),
            description: draft.description.clone(),
            location: draft.location.clone(),
            start: draft.start,
            end: draft.end,
            all_day: draft.all_day,
            category: draft.category,
            status: draft.status,
            priority: draft.priority,
            tags: draft.tags.clone(),
            recurring: draft.recurring,
            reminder_minutes: draft.reminder_minutes,
            notification_sent: false,
            created_at: now,
            updated_at: now,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventCategory {
    Work,
    #[default]
    Personal,
    Health,
    Social,
    Finance,
    Education,
    Custom,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventStatus {
    #[default]
    Confirmed,
    Tentative,
    Cancelled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventPriority {
    Low,
    #[default]
    Medium,
    High,
}

/// Input for creating an event. Everything beyond title/start/end defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventDraft {
    pub title: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub all_day: bool,
    #[serde(default)]
    pub category: EventCategory,
    #[serde(default)]
    pub status: EventStatus,
    #[serde(default)]
    pub priority: EventPriority,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub recurring: bool,
    #[serde(default)]
    pub reminder_minutes: Option<i64>,
}

impl EventDraft {
    pub fn new(title: impl Into<String>, start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        EventDraft {
            title: title.into(),
            start,
            end,
            description: None,
            location: None,
            all_day: false,
            category: EventCategory::default(),
            status: EventStatus::default(),
            priority: EventPriority::default(),
            tags: Vec::new(),
            recurring: false,
            reminder_minutes: None,
        }
    }

    /// Reject drafts before any storage write happens.
    pub fn validate(&self) -> DaybookResult<()> {
        if self.title.trim().is_empty() {
            return Err(DaybookError::Validation(
                "title must not be empty".to_string(),
            ));
        }
        if self.end <= self.start {
            return Err(DaybookError::Validation(
                "end must be strictly after start".to_string(),
            ));
        }
        Ok(())
    }
}

/// Partial update: only set fields are merged into the stored record.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub all_day: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<EventCategory>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<EventStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<EventPriority>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recurring: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reminder_minutes: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notification_sent: Option<bool>,
}

impl EventPatch {
    /// Merge set fields into `event`. Does not touch `updated_at`; the store
    /// refreshes it after validating the merged record.
    pub fn apply(&self, event: &mut Event) {
        if let Some(title) = &self.title {
            event.title = title.clone();
        }
        if let Some(description) = &self.description {
            event.description = Some(description.clone());
        }
        if let Some(location) = &self.location {
            event.location = Some(location.clone());
        }
        if let Some(start) = self.start {
            event.start = start;
        }
        if let Some(end) = self.end {
            event.end = end;
        }
        if let Some(all_day) = self.all_day {
            event.all_day = all_day;
        }
        if let Some(category) = self.category {
            event.category = category;
        }
        if let Some(status) = self.status {
            event.status = status;
        }
        if let Some(priority) = self.priority {
            event.priority = priority;
        }
        if let Some(tags) = &self.tags {
            event.tags = tags.clone();
        }
        if let Some(recurring) = self.recurring {
            event.recurring = recurring;
        }
        if let Some(minutes) = self.reminder_minutes {
            event.reminder_minutes = Some(minutes);
        }
        if let Some(sent) = self.notification_sent {
            event.notification_sent = sent;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn hour(h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 2, 24, h, 0, 0).unwrap()
    }

    #[test]
    fn draft_validates_ok() {
        assert!(EventDraft::new("Standup", hour(9), hour(10)).validate().is_ok());
    }

    #[test]
    fn draft_rejects_empty_title() {
        let draft = EventDraft::new("   ", hour(9), hour(10));
        assert!(matches!(
            draft.validate(),
            Err(DaybookError::Validation(_))
        ));
    }

    #[test]
    fn draft_rejects_end_not_after_start() {
        let draft = EventDraft::new("Standup", hour(10), hour(9));
        assert!(draft.validate().is_err());

        let zero_length = EventDraft::new("Standup", hour(9), hour(9));
        assert!(zero_length.validate().is_err());
    }

    #[test]
    fn from_draft_sets_equal_timestamps() {
        let event = Event::from_draft(&EventDraft::new("Standup", hour(9), hour(10)));
        assert_eq!(event.created_at, event.updated_at);
        assert!(!event.id.is_nil());
        assert!(event.end > event.start);
    }

    #[test]
    fn patch_merges_only_set_fields() {
        let mut event = Event::from_draft(&EventDraft::new("Standup", hour(9), hour(10)));
        let patch = EventPatch {
            title: Some("Retro".to_string()),
            priority: Some(EventPriority::High),
            ..EventPatch::default()
        };

        patch.apply(&mut event);

        assert_eq!(event.title, "Retro");
        assert_eq!(event.priority, EventPriority::High);
        // Untouched fields keep their values
        assert_eq!(event.start, hour(9));
        assert_eq!(event.category, EventCategory::Personal);
    }

    #[test]
    fn event_round_trips_camel_case_json() {
        let event = Event::from_draft(&EventDraft::new("Standup", hour(9), hour(10)));
        let json = serde_json::to_string(&event).unwrap();

        assert!(json.contains("\"allDay\""));
        assert!(json.contains("\"createdAt\""));

        let back: Event = serde_json::from_str(&json).unwrap();
        assert_eq!(back, event);
    }
}
