//! Conversation messages.

use chrono::Local;
use serde::{Deserialize, Serialize};

/// Who wrote a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// The player.
    User,
    /// The narrator model.
    Model,
    /// Application notices (connection failures, configuration hints).
    System,
}

/// One entry in the append-only conversation log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Author.
    pub role: Role,
    /// Text as displayed (status blocks already stripped).
    pub content: String,
    /// Local wall-clock display time (`HH:MM`).
    pub timestamp: String,
}

impl Message {
    /// Create a message stamped with the current local time.
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self::with_timestamp(role, content, Local::now().format("%H:%M").to_string())
    }

    /// Create a message with an explicit display timestamp.
    pub fn with_timestamp(
        role: Role,
        content: impl Into<String>,
        timestamp: impl Into<String>,
    ) -> Self {
        Self {
            role,
            content: content.into(),
            timestamp: timestamp.into(),
        }
    }

    /// A player message.
    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }

    /// A narrator message.
    pub fn model(content: impl Into<String>) -> Self {
        Self::new(Role::Model, content)
    }

    /// An application notice.
    pub fn system(content: impl Into<String>) -> Self {
        Self::new(Role::System, content)
    }
}
