//! Babel Academy session layer: the turn pipeline that sends player input
//! to the narrator, merges the parsed status into the game state, and
//! everything around it (context building, settings, save files, alerts).

pub mod alerts;
pub mod config;
pub mod context;
pub mod error;
pub mod presets;
pub mod reconcile;
pub mod save;
pub mod session;
pub mod settings;
pub mod transport;
pub mod world_info;

pub use alerts::{SuspicionAlert, SuspicionLevel, UpdateBadges};
pub use config::SessionConfig;
pub use error::{SessionError, SessionResult};
pub use reconcile::{ReconcileReport, format_time_display, reconcile};
pub use save::{LoadReport, SaveFile, load_save, load_save_file, save_file_name};
pub use session::{GameSession, PendingTurn, TurnOutcome, TurnReport};
pub use settings::{ApiCredentials, FileSettings, MemorySettings, SettingsStore};
pub use transport::{ChatRequest, ChatTransport, ChatTurn, ScriptedTransport, TransportError};
pub use world_info::{NoWorldInfo, StaticWorldInfo, WorldInfo};
