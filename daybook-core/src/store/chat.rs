//! The chat history table (append-only).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use uuid::Uuid;

use crate::assistant::ActionKind;
use crate::error::DaybookResult;

pub(super) const CHAT_FILE: &str = "chat.json";

/// One chat exchange: the user's text plus the assistant's reply, if any.
/// Records are never mutated after creation; the log is only cleared in bulk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    pub id: Uuid,
    pub user_text: String,
    pub reply: Option<String>,
    pub timestamp: DateTime<Utc>,
    /// Which calendar action, if any, the exchange resulted in.
    pub action: Option<ActionKind>,
}

pub struct ChatLog {
    path: PathBuf,
}

impl ChatLog {
    pub fn open(data_dir: &Path) -> DaybookResult<Self> {
        std::fs::create_dir_all(data_dir)?;
        Ok(ChatLog {
            path: data_dir.join(CHAT_FILE),
        })
    }

    pub fn append(
        &self,
        user_text: &str,
        reply: Option<String>,
        action: Option<ActionKind>,
    ) -> DaybookResult<ChatMessage> {
        let mut log: Vec<ChatMessage> = super::read_table(&self.path)?;
        let message = ChatMessage {
            id: Uuid::new_v4(),
            user_text: user_text.to_string(),
            reply,
            timestamp: Utc::now(),
            action,
        };
        log.push(message.clone());
        super::write_table(&self.path, &log)?;
        Ok(message)
    }

    /// Full history, oldest first.
    pub fn all(&self) -> DaybookResult<Vec<ChatMessage>> {
        super::read_table(&self.path)
    }

    pub fn clear(&self) -> DaybookResult<()> {
        super::write_table(&self.path, &Vec::<ChatMessage>::new())
    }
}
