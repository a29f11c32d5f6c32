//! Overlapping-interval conflict detection.
//!
//! Pure functions over whatever event slice the caller supplies. The detector
//! never queries storage itself, so staleness is bounded by how recently the
//! caller refreshed its projection.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::event::{Event, EventStatus};

/// Whether the half-open intervals `[a_start, a_end)` and `[b_start, b_end)`
/// intersect. Symmetric; back-to-back adjacency (one ending exactly when the
/// other starts) is not an overlap.
pub fn overlaps(
    a_start: DateTime<Utc>,
    a_end: DateTime<Utc>,
    b_start: DateTime<Utc>,
    b_end: DateTime<Utc>,
) -> bool {
    a_start < b_end && a_end > b_start
}

/// Every non-cancelled event whose interval overlaps the candidate range.
///
/// `exclude` is the event currently being edited, so it never conflicts with
/// itself. Cancelled events are never considered.
pub fn detect_conflicts<'a>(
    events: &'a [Event],
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    exclude: Option<Uuid>,
) -> Vec<&'a Event> {
    events
        .iter()
        .filter(|e| e.status != EventStatus::Cancelled)
        .filter(|e| Some(e.id) != exclude)
        .filter(|e| overlaps(e.start, e.end, start, end))
        .collect()
}

/// Convenience over [`detect_conflicts`].
pub fn has_conflict(
    events: &[Event],
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    exclude: Option<Uuid>,
) -> bool {
    !detect_conflicts(events, start, end, exclude).is_empty()
}
