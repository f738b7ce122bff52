//! Lore context selected for a turn.
//!
//! Which lore entries apply to an input is decided elsewhere; the session
//! only asks for the combined text and prepends it to the state context.

/// Supplies lore text relevant to a player input.
pub trait WorldInfo {
    /// Combined lore context for `input`. Empty when nothing applies.
    fn context_for(&self, input: &str) -> String;
}

/// No lore at all.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoWorldInfo;

impl WorldInfo for NoWorldInfo {
    fn context_for(&self, _input: &str) -> String {
        String::new()
    }
}

/// The same lore text for every input.
#[derive(Debug, Clone, Default)]
pub struct StaticWorldInfo(pub String);

impl WorldInfo for StaticWorldInfo {
    fn context_for(&self, _input: &str) -> String {
        self.0.clone()
    }
}
