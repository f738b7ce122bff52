//! Core types for Babel Academy: the canonical game state and the records
//! the status protocol updates.
//!
//! This crate is independent of the parser. A [`GameState`] can be built
//! with [`GameState::new_game`], deserialized from a save file, or
//! assembled by hand in tests.

/// Map locations and free-text location matching.
pub mod atlas;
/// Per-character dynamic snapshots.
pub mod character;
/// Error types used throughout the crate.
pub mod error;
/// Published in-world events (news items).
pub mod event;
/// Conversation messages.
pub mod message;
/// Integers clamped to 0-100.
pub mod percent;
/// Player profile, stats, and inventory.
pub mod profile;
/// The eight principal characters and their aliases.
pub mod roster;
/// The root game-state aggregate.
pub mod state;

/// Re-export character types.
pub use character::{CharacterDynamicData, CharacterDynamics};
/// Re-export error types.
pub use error::{CoreError, CoreResult};
/// Re-export event types.
pub use event::{EventId, EventKind, GameEvent};
/// Re-export message types.
pub use message::{Message, Role};
/// Re-export the clamped percentage type.
pub use percent::Percent;
/// Re-export profile types.
pub use profile::{Gender, InventoryItem, PlayerIdentity, PlayerProfile, PlayerStats};
/// Re-export state types.
pub use state::{GameState, ModalType};
