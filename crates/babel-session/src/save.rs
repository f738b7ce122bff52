//! Save files.
//!
//! A save is a pretty-printed JSON document:
//!
//! ```json
//! { "version": "1.1", "timestamp": "2026-…Z", "gameState": { … } }
//! ```
//!
//! Version `1.0` carries messages, stats, profile, inventory and suggested
//! actions. Version `1.1` adds `characterDynamics` and `events`. Loading
//! accepts both and is permissive per field: anything missing or
//! unreadable keeps the in-memory value.

use std::fs;
use std::path::Path;

use babel_core::{
    CharacterDynamics, GameEvent, GameState, InventoryItem, Message, PlayerProfile, PlayerStats,
};
use chrono::{DateTime, NaiveDateTime, SecondsFormat, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{SessionError, SessionResult};

/// Version tag of saves without character dynamics and events.
pub const VERSION_BASIC: &str = "1.0";
/// Version tag of saves that include them.
pub const VERSION_FULL: &str = "1.1";

/// On-disk save document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveFile {
    /// Format version.
    pub version: String,
    /// When the save was written (RFC 3339, UTC).
    pub timestamp: String,
    /// The saved slice of game state.
    pub game_state: SavedState,
}

/// The persisted part of [`GameState`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedState {
    /// Conversation log.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub messages: Option<Vec<Message>>,
    /// Stats.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stats: Option<PlayerStats>,
    /// Profile.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile: Option<PlayerProfile>,
    /// Inventory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inventory: Option<Vec<InventoryItem>>,
    /// Suggested actions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggested_actions: Option<[String; 3]>,
    /// Character snapshots (1.1 and later).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub character_dynamics: Option<CharacterDynamics>,
    /// Event log (1.1 and later).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub events: Option<Vec<GameEvent>>,
}

impl SaveFile {
    /// Capture a state at `now`.
    pub fn capture(state: &GameState, include_dynamics: bool, now: DateTime<Utc>) -> Self {
        let mut saved = SavedState {
            messages: Some(state.messages.clone()),
            stats: Some(state.stats),
            profile: Some(state.profile.clone()),
            inventory: Some(state.inventory.clone()),
            suggested_actions: Some(state.suggested_actions.clone()),
            ..SavedState::default()
        };
        let version = if include_dynamics {
            saved.character_dynamics = Some(state.character_dynamics.clone());
            saved.events = Some(state.events.clone());
            VERSION_FULL
        } else {
            VERSION_BASIC
        };
        Self {
            version: version.to_string(),
            timestamp: now.to_rfc3339_opts(SecondsFormat::Millis, true),
            game_state: saved,
        }
    }

    /// Serialize as pretty-printed JSON.
    pub fn to_json(&self) -> SessionResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Write to `path`.
    pub fn write(&self, path: &Path) -> SessionResult<()> {
        fs::write(path, self.to_json()?)?;
        tracing::info!(path = %path.display(), version = %self.version, "game saved");
        Ok(())
    }
}

/// Which fields a load actually took from the file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    /// Version tag found in the file, if any.
    pub version: Option<String>,
    /// Fields restored from the file.
    pub restored: Vec<&'static str>,
    /// Fields present but unreadable, kept from memory.
    pub rejected: Vec<&'static str>,
}

/// Apply a save document to `current`, returning the loaded state.
///
/// Fails without producing a state when the text is not JSON or has no
/// `gameState` object.
pub fn load_save(text: &str, current: &GameState) -> SessionResult<(GameState, LoadReport)> {
    let doc: Value = serde_json::from_str(text)?;
    let Some(saved) = doc.get("gameState").and_then(Value::as_object) else {
        return Err(SessionError::InvalidSave("missing gameState object".to_string()));
    };

    let mut report = LoadReport {
        version: doc.get("version").and_then(Value::as_str).map(str::to_string),
        ..LoadReport::default()
    };
    let mut next = current.clone();

    restore(saved, "messages", &mut next.messages, &mut report);
    restore(saved, "stats", &mut next.stats, &mut report);
    restore(saved, "profile", &mut next.profile, &mut report);
    restore(saved, "inventory", &mut next.inventory, &mut report);
    restore(saved, "suggestedActions", &mut next.suggested_actions, &mut report);
    restore(saved, "characterDynamics", &mut next.character_dynamics, &mut report);
    restore(saved, "events", &mut next.events, &mut report);

    Ok((next, report))
}

/// Read and apply a save file.
pub fn load_save_file(path: &Path, current: &GameState) -> SessionResult<(GameState, LoadReport)> {
    let text = fs::read_to_string(path)?;
    let loaded = load_save(&text, current)?;
    tracing::info!(path = %path.display(), restored = loaded.1.restored.len(), "game loaded");
    Ok(loaded)
}

fn restore<T: DeserializeOwned>(
    saved: &Map<String, Value>,
    key: &'static str,
    slot: &mut T,
    report: &mut LoadReport,
) {
    let Some(value) = saved.get(key).filter(|v| !v.is_null()) else {
        return;
    };
    match T::deserialize(value) {
        Ok(v) => {
            *slot = v;
            report.restored.push(key);
        }
        Err(e) => {
            tracing::warn!(field = key, error = %e, "unreadable save field kept from memory");
            report.rejected.push(key);
        }
    }
}

/// Suggested file name: `BabelAcademy_Save_YYYY-MM-DD_HHMM.json`.
pub fn save_file_name(now: NaiveDateTime) -> String {
    format!("BabelAcademy_Save_{}.json", now.format("%Y-%m-%d_%H%M"))
}
