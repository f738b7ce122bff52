/// Alias for `Result<T, CoreError>`.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors raised when converting text into core model values.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CoreError {
    /// An event category outside headline/social/secret/system.
    #[error("unknown event type: \"{0}\"")]
    UnknownEventKind(String),

    /// A modal name that does not match any panel.
    #[error("unknown modal: \"{0}\"")]
    UnknownModal(String),
}
