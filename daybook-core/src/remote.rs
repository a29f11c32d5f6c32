//! Remote event API client.
//!
//! Stateless HTTP client mirroring local mutations to the remote store.
//! There is no retry queue: a failed call is reported to the caller, and the
//! coordinator logs and absorbs it. The remote holds no independent copy of
//! anything, only an eventually-consistent mirror of local state.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::time::Duration;
use uuid::Uuid;

use crate::error::{DaybookError, DaybookResult};
use crate::event::{Event, EventPatch};

/// Remote calls are bounded so a dead network never delays the reconnect
/// probe or holds a detached push task forever.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

/// The remote event store consumed by the coordinator.
#[async_trait]
pub trait RemoteStore: Send + Sync {
    async fn list_events(
        &self,
        range: Option<(DateTime<Utc>, DateTime<Utc>)>,
    ) -> DaybookResult<Vec<Event>>;
    async fn create_event(&self, event: &Event) -> DaybookResult<Event>;
    async fn update_event(&self, id: Uuid, patch: &EventPatch) -> DaybookResult<Event>;
    async fn delete_event(&self, id: Uuid) -> DaybookResult<()>;
    /// Reconnect probe.
    async fn health(&self) -> DaybookResult<()>;
}

// Response envelopes matching the server API

#[derive(Deserialize)]
struct EventEnvelope {
    success: bool,
    event: Option<Event>,
    error: Option<String>,
}

#[derive(Deserialize)]
struct EventListEnvelope {
    success: bool,
    #[serde(default)]
    events: Vec<Event>,
    error: Option<String>,
}

#[derive(Deserialize)]
struct MessageEnvelope {
    success: bool,
    error: Option<String>,
}

fn envelope_error(error: Option<String>) -> DaybookError {
    DaybookError::Remote(error.unwrap_or_else(|| "unknown remote error".to_string()))
}

fn transport_error(e: reqwest::Error) -> DaybookError {
    DaybookError::Remote(e.to_string())
}

/// HTTP implementation of [`RemoteStore`].
pub struct HttpRemote {
    http: reqwest::Client,
    base_url: String,
}

impl HttpRemote {
    pub fn new(base_url: impl Into<String>) -> DaybookResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(transport_error)?;
        let base_url: String = base_url.into();
        Ok(HttpRemote {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl RemoteStore for HttpRemote {
    /// GET /events?startDate&endDate
    async fn list_events(
        &self,
        range: Option<(DateTime<Utc>, DateTime<Utc>)>,
    ) -> DaybookResult<Vec<Event>> {
        let mut req = self.http.get(format!("{}/events", self.base_url));
        if let Some((start, end)) = range {
            req = req.query(&[
                ("startDate", start.to_rfc3339()),
                ("endDate", end.to_rfc3339()),
            ]);
        }

        let envelope: EventListEnvelope = req
            .send()
            .await
            .map_err(transport_error)?
            .json()
            .await
            .map_err(transport_error)?;

        if !envelope.success {
            return Err(envelope_error(envelope.error));
        }
        Ok(envelope.events)
    }

    /// POST /events. The full local record is sent so the id stays stable
    /// across local and remote copies.
    async fn create_event(&self, event: &Event) -> DaybookResult<Event> {
        let envelope: EventEnvelope = self
            .http
            .post(format!("{}/events", self.base_url))
            .json(event)
            .send()
            .await
            .map_err(transport_error)?
            .json()
            .await
            .map_err(transport_error)?;

        if !envelope.success {
            return Err(envelope_error(envelope.error));
        }
        envelope
            .event
            .ok_or_else(|| DaybookError::Remote("response missing event".to_string()))
    }

    /// PUT /events/{id}
    async fn update_event(&self, id: Uuid, patch: &EventPatch) -> DaybookResult<Event> {
        let envelope: EventEnvelope = self
            .http
            .put(format!("{}/events/{}", self.base_url, id))
            .json(patch)
            .send()
            .await
            .map_err(transport_error)?
            .json()
            .await
            .map_err(transport_error)?;

        if !envelope.success {
            return Err(envelope_error(envelope.error));
        }
        envelope
            .event
            .ok_or_else(|| DaybookError::Remote("response missing event".to_string()))
    }

    /// DELETE /events/{id}
    async fn delete_event(&self, id: Uuid) -> DaybookResult<()> {
        let envelope: MessageEnvelope = self
            .http
            .delete(format!("{}/events/{}", self.base_url, id))
            .send()
            .await
            .map_err(transport_error)?
            .json()
            .await
            .map_err(transport_error)?;

        if !envelope.success {
            return Err(envelope_error(envelope.error));
        }
        Ok(())
    }

    /// GET /health
    async fn health(&self) -> DaybookResult<()> {
        let envelope: MessageEnvelope = self
            .http
            .get(format!("{}/health", self.base_url))
            .send()
            .await
            .map_err(transport_error)?
            .json()
            .await
            .map_err(transport_error)?;

        if !envelope.success {
            return Err(envelope_error(envelope.error));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_envelope_parses() {
        let json = r#"{
            "success": true,
            "event": {
                "id": "7c0e8ae4-9b3f-4a83-bd0e-6a1e0c2f5cf0",
                "title": "Standup",
                "description": null,
                "location": null,
                "start": "2026-02-24T09:00:00Z",
                "end": "2026-02-24T09:30:00Z",
                "allDay": false,
                "category": "work",
                "status": "confirmed",
                "priority": "medium",
                "tags": [],
                "recurring": false,
                "reminderMinutes": null,
                "notificationSent": false,
                "createdAt": "2026-02-24T08:00:00Z",
                "updatedAt": "2026-02-24T08:00:00Z"
            }
        }"#;

        let envelope: EventEnvelope = serde_json::from_str(json).unwrap();
        assert!(envelope.success);
        assert_eq!(envelope.event.unwrap().title, "Standup");
    }

    #[test]
    fn failure_envelope_parses() {
        let json = r#"{ "success": false, "error": "Not found: abc" }"#;
        let envelope: EventEnvelope = serde_json::from_str(json).unwrap();
        assert!(!envelope.success);
        assert_eq!(envelope.error.as_deref(), Some("Not found: abc"));
    }

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let remote = HttpRemote::new("http://127.0.0.1:4280/").unwrap();
        assert_eq!(remote.base_url, "http://127.0.0.1:4280");
    }
}
