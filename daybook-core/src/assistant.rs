//! Natural-language assistant client.
//!
//! The assistant endpoint is an external collaborator that parses free-form
//! text into a structured calendar action. The coordinator applies only the
//! mutating variants through its ordinary local-first path; `QUERY_EVENTS`
//! and `NO_ACTION` mutate nothing.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use uuid::Uuid;

use crate::error::{DaybookError, DaybookResult};
use crate::event::{EventDraft, EventPatch};
use crate::store::EventFilter;

/// The assistant can take a while to respond; this only bounds a hung call.
const ASSISTANT_TIMEOUT: Duration = Duration::from_secs(30);

/// Structured action returned by the assistant.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AssistantAction {
    CreateEvent {
        payload: EventDraft,
    },
    UpdateEvent {
        id: Uuid,
        payload: EventPatch,
    },
    DeleteEvent {
        id: Uuid,
    },
    QueryEvents {
        #[serde(default)]
        filter: EventFilter,
    },
    NoAction,
}

impl AssistantAction {
    pub fn kind(&self) -> ActionKind {
        match self {
            AssistantAction::CreateEvent { .. } => ActionKind::CreateEvent,
            AssistantAction::UpdateEvent { .. } => ActionKind::UpdateEvent,
            AssistantAction::DeleteEvent { .. } => ActionKind::DeleteEvent,
            AssistantAction::QueryEvents { .. } => ActionKind::QueryEvents,
            AssistantAction::NoAction => ActionKind::NoAction,
        }
    }
}

/// Action tag recorded on chat messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActionKind {
    CreateEvent,
    UpdateEvent,
    DeleteEvent,
    QueryEvents,
    NoAction,
}

/// Full assistant response: the action plus an optional human-readable
/// message to show in the chat.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssistantReply {
    #[serde(flatten)]
    pub action: AssistantAction,
    #[serde(default)]
    pub message: Option<String>,
}

#[async_trait]
pub trait Assistant: Send + Sync {
    async fn interpret(&self, message: &str) -> DaybookResult<AssistantReply>;
}

#[derive(Serialize)]
struct AssistantRequest<'a> {
    message: &'a str,
}

/// HTTP assistant client: `POST {endpoint}` with `{ "message": ... }`.
pub struct HttpAssistant {
    http: reqwest::Client,
    endpoint: String,
}

impl HttpAssistant {
    pub fn new(endpoint: impl Into<String>) -> DaybookResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(ASSISTANT_TIMEOUT)
            .build()
            .map_err(|e| DaybookError::Assistant(e.to_string()))?;
        Ok(HttpAssistant {
            http,
            endpoint: endpoint.into(),
        })
    }
}

#[async_trait]
impl Assistant for HttpAssistant {
    async fn interpret(&self, message: &str) -> DaybookResult<AssistantReply> {
        let resp = self
            .http
            .post(&self.endpoint)
            .json(&AssistantRequest { message })
            .send()
            .await
            .map_err(|e| DaybookError::Assistant(e.to_string()))?;

        if !resp.status().is_success() {
            return Err(DaybookError::Assistant(format!(
                "assistant returned {}",
                resp.status()
            )));
        }

        resp.json()
            .await
            .map_err(|e| DaybookError::Assistant(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_event_action_deserializes() {
        let json = r#"{
            "action": "CREATE_EVENT",
            "payload": {
                "title": "Lunch with Sam",
                "start": "2026-02-24T12:00:00Z",
                "end": "2026-02-24T13:00:00Z"
            },
            "message": "Added lunch with Sam."
        }"#;

        let reply: AssistantReply = serde_json::from_str(json).unwrap();
        assert_eq!(reply.action.kind(), ActionKind::CreateEvent);
        assert_eq!(reply.message.as_deref(), Some("Added lunch with Sam."));

        let AssistantAction::CreateEvent { payload } = reply.action else {
            panic!("expected CREATE_EVENT");
        };
        assert_eq!(payload.title, "Lunch with Sam");
    }

    #[test]
    fn delete_event_action_deserializes() {
        let json = r#"{
            "action": "DELETE_EVENT",
            "id": "7c0e8ae4-9b3f-4a83-bd0e-6a1e0c2f5cf0"
        }"#;

        let reply: AssistantReply = serde_json::from_str(json).unwrap();
        assert_eq!(reply.action.kind(), ActionKind::DeleteEvent);
        assert!(reply.message.is_none());
    }

    #[test]
    fn query_action_defaults_missing_filter() {
        let json = r#"{ "action": "QUERY_EVENTS", "message": "Here you go." }"#;
        let reply: AssistantReply = serde_json::from_str(json).unwrap();
        assert_eq!(reply.action.kind(), ActionKind::QueryEvents);
    }

    #[test]
    fn no_action_deserializes() {
        let json = r#"{ "action": "NO_ACTION", "message": "Hi! How can I help?" }"#;
        let reply: AssistantReply = serde_json::from_str(json).unwrap();
        assert_eq!(reply.action.kind(), ActionKind::NoAction);
    }
}
