//! Configuration for a play session.

/// Default number of past messages sent with each turn.
pub const DEFAULT_MAX_HISTORY_MESSAGES: usize = 20;

/// Default character budget for the history sent with each turn.
pub const DEFAULT_MAX_HISTORY_CHARS: usize = 100_000;

/// Configuration for a play session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    /// Most recent messages considered for the history window (at least 1).
    pub max_history_messages: usize,
    /// Character budget for the history window.
    pub max_history_chars: usize,
    /// Write character dynamics and events into save files.
    pub include_dynamics_in_save: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            max_history_messages: DEFAULT_MAX_HISTORY_MESSAGES,
            max_history_chars: DEFAULT_MAX_HISTORY_CHARS,
            include_dynamics_in_save: true,
        }
    }
}

impl SessionConfig {
    /// Set the message limit (clamped to at least 1).
    pub fn with_max_history_messages(mut self, n: usize) -> Self {
        self.max_history_messages = n.max(1);
        self
    }

    /// Set the character budget.
    pub fn with_max_history_chars(mut self, n: usize) -> Self {
        self.max_history_chars = n;
        self
    }

    /// Choose whether saves carry character dynamics and events.
    pub fn with_dynamics_in_save(mut self, include: bool) -> Self {
        self.include_dynamics_in_save = include;
        self
    }
}
