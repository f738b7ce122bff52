//! The seam to the narrator backend.
//!
//! The session builds a [`ChatRequest`] and hands it to a [`ChatTransport`]
//! together with explicit credentials. Wire formats, retries and provider
//! clients live behind the trait.

use std::collections::VecDeque;

use babel_core::Role;
use serde::Serialize;
use thiserror::Error;

use crate::settings::ApiCredentials;

/// Shown when no API key is configured.
pub const MISSING_KEY_NOTICE: &str =
    "（尚未配置 API Key。请点击顶部导航栏的【设置】按钮，输入您的 Google Gemini API Key 后再试。）";

/// Shown for any other transport failure.
pub const CONNECTION_NOTICE: &str = "系统错误：以太连接中断。";

/// Used as the narrative when the narrator replies with nothing.
pub const EMPTY_REPLY_NOTICE: &str = "（命运的迷雾遮蔽了回应……请重试。）";

/// Speaker of a history entry as the provider sees it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    /// The player (system notices are sent as player turns too).
    User,
    /// The narrator.
    Model,
}

impl From<Role> for ChatRole {
    fn from(role: Role) -> Self {
        match role {
            Role::Model => Self::Model,
            Role::User | Role::System => Self::User,
        }
    }
}

/// One history entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatTurn {
    /// Who spoke.
    pub role: ChatRole,
    /// What was said.
    pub content: String,
}

/// Everything the narrator backend needs for one turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatRequest {
    /// Windowed prior conversation, oldest first.
    pub history: Vec<ChatTurn>,
    /// The new player message.
    pub message: String,
    /// Dynamic context appended to the system instruction.
    pub context: String,
}

impl ChatRequest {
    /// The system instruction with the dynamic context appended.
    pub fn system_instruction(&self, base: &str) -> String {
        if self.context.is_empty() {
            base.to_string()
        } else {
            format!("{base}\n\n=== WORLD INFO / 世界书 ===\n{}", self.context)
        }
    }
}

/// Why the narrator could not be reached.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// No API key configured.
    #[error("no API key configured")]
    MissingKey,

    /// The provider rejected the key.
    #[error("API key rejected")]
    InvalidKey,

    /// The provider quota is used up.
    #[error("quota exhausted")]
    QuotaExceeded,

    /// The configured model is not available.
    #[error("model unavailable: {0}")]
    ModelUnavailable(String),

    /// Network or provider failure.
    #[error("connection failed: {0}")]
    Connection(String),
}

impl TransportError {
    /// The system message shown to the player for this failure.
    pub fn notice(&self) -> &'static str {
        match self {
            Self::MissingKey => MISSING_KEY_NOTICE,
            Self::InvalidKey => "（API Key 无效或已过期。请在设置中检查您的 API Key。）",
            Self::QuotaExceeded => "（API 配额已用尽。请稍后再试或更换 API Key。）",
            Self::ModelUnavailable(_) => "（模型不可用。请在设置中选择其他模型。）",
            Self::Connection(_) => CONNECTION_NOTICE,
        }
    }
}

/// Sends one turn and returns the raw reply text.
pub trait ChatTransport {
    /// Send a request. The reply is returned whole; there is no streaming.
    fn send(
        &mut self,
        credentials: &ApiCredentials,
        request: &ChatRequest,
    ) -> Result<String, TransportError>;
}

/// Replays canned replies in order. Used by the CLI `play` command and tests.
#[derive(Debug, Clone, Default)]
pub struct ScriptedTransport {
    replies: VecDeque<String>,
    requests: Vec<ChatRequest>,
}

impl ScriptedTransport {
    /// A transport that answers with `replies`, one per turn.
    pub fn new<I, S>(replies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            replies: replies.into_iter().map(Into::into).collect(),
            requests: Vec::new(),
        }
    }

    /// Replies not yet used.
    pub fn remaining(&self) -> usize {
        self.replies.len()
    }

    /// Every request received so far.
    pub fn requests(&self) -> &[ChatRequest] {
        &self.requests
    }
}

impl ChatTransport for ScriptedTransport {
    fn send(
        &mut self,
        _credentials: &ApiCredentials,
        request: &ChatRequest,
    ) -> Result<String, TransportError> {
        self.requests.push(request.clone());
        self.replies
            .pop_front()
            .ok_or_else(|| TransportError::Connection("script exhausted".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> ChatRequest {
        ChatRequest {
            history: Vec::new(),
            message: "hi".into(),
            context: String::new(),
        }
    }

    #[test]
    fn scripted_replays_then_fails() {
        let creds = ApiCredentials::new("k", "m");
        let mut t = ScriptedTransport::new(["one", "two"]);
        assert_eq!(t.send(&creds, &request()).unwrap(), "one");
        assert_eq!(t.send(&creds, &request()).unwrap(), "two");
        assert!(matches!(t.send(&creds, &request()), Err(TransportError::Connection(_))));
        assert_eq!(t.requests().len(), 3);
        assert_eq!(t.remaining(), 0);
    }

    #[test]
    fn roles_collapse_to_user_or_model() {
        assert_eq!(ChatRole::from(Role::Model), ChatRole::Model);
        assert_eq!(ChatRole::from(Role::User), ChatRole::User);
        assert_eq!(ChatRole::from(Role::System), ChatRole::User);
    }

    #[test]
    fn system_instruction_appends_context() {
        let mut req = request();
        assert_eq!(req.system_instruction("BASE"), "BASE");
        req.context = "ctx".into();
        assert_eq!(req.system_instruction("BASE"), "BASE\n\n=== WORLD INFO / 世界书 ===\nctx");
    }

    #[test]
    fn notices() {
        assert_eq!(TransportError::MissingKey.notice(), MISSING_KEY_NOTICE);
        assert_eq!(TransportError::Connection("x".into()).notice(), CONNECTION_NOTICE);
    }
}
