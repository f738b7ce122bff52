//! Persistent player settings and API credentials.
//!
//! Settings are plain string keys. The session never reads them on its
//! own: callers build [`ApiCredentials`] from a store and pass them into
//! each turn explicitly.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::SessionResult;

/// Key holding the provider API key.
pub const API_KEY: &str = "api_key";
/// Key holding the model name.
pub const LLM_MODEL: &str = "llm_model";
/// Key set once the player has started a game.
pub const HAS_VISITED: &str = "has_visited";
/// Model used when none is configured.
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

/// A key/value settings backend.
pub trait SettingsStore {
    /// Read a value.
    fn get(&self, key: &str) -> Option<String>;

    /// Write a value.
    fn set(&mut self, key: &str, value: &str) -> SessionResult<()>;

    /// Remove a value. Removing a missing key is not an error.
    fn clear(&mut self, key: &str) -> SessionResult<()>;
}

/// In-memory settings, for tests and one-off runs.
#[derive(Debug, Clone, Default)]
pub struct MemorySettings {
    values: BTreeMap<String, String>,
}

impl MemorySettings {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl SettingsStore for MemorySettings {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> SessionResult<()> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn clear(&mut self, key: &str) -> SessionResult<()> {
        self.values.remove(key);
        Ok(())
    }
}

/// Settings stored as a flat JSON object in one file.
///
/// The file is read once on open and rewritten on every change. A missing
/// file is an empty store.
#[derive(Debug, Clone)]
pub struct FileSettings {
    path: PathBuf,
    values: BTreeMap<String, String>,
}

impl FileSettings {
    /// Open (or start) the settings file at `path`.
    pub fn open(path: impl Into<PathBuf>) -> SessionResult<Self> {
        let path = path.into();
        let values = match fs::read_to_string(&path) {
            Ok(text) => serde_json::from_str(&text)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => return Err(e.into()),
        };
        Ok(Self { path, values })
    }

    /// The backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self) -> SessionResult<()> {
        let json = serde_json::to_string_pretty(&self.values)?;
        fs::write(&self.path, json)?;
        Ok(())
    }
}

impl SettingsStore for FileSettings {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> SessionResult<()> {
        self.values.insert(key.to_string(), value.to_string());
        self.flush()
    }

    fn clear(&mut self, key: &str) -> SessionResult<()> {
        if self.values.remove(key).is_some() {
            self.flush()?;
        }
        Ok(())
    }
}

/// What the transport needs to reach the provider.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiCredentials {
    /// Provider API key. Empty when unconfigured.
    pub api_key: String,
    /// Model name.
    pub model: String,
}

impl ApiCredentials {
    /// Build credentials from explicit values.
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: model.into(),
        }
    }

    /// Read credentials from a settings store, defaulting the model.
    pub fn from_store(store: &dyn SettingsStore) -> Self {
        let model = store
            .get(LLM_MODEL)
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_MODEL.to_string());
        Self {
            api_key: store.get(API_KEY).unwrap_or_default(),
            model,
        }
    }

    /// Whether an API key is present.
    pub fn is_configured(&self) -> bool {
        !self.api_key.trim().is_empty()
    }
}

impl std::fmt::Debug for ApiCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiCredentials")
            .field("api_key", &if self.is_configured() { "<set>" } else { "<empty>" })
            .field("model", &self.model)
            .finish()
    }
}
