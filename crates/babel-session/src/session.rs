//! The single owner of a game state and the turn pipeline around it.
//!
//! A turn is two calls: [`GameSession::begin_turn`] records the player's
//! message and returns a [`PendingTurn`] carrying the request for the
//! narrator; then exactly one of [`complete_turn`](GameSession::complete_turn),
//! [`fail_turn`](GameSession::fail_turn) or
//! [`cancel_turn`](GameSession::cancel_turn) settles it. Only one turn can be
//! pending, so reconciliations never race on the same previous state.
//! [`GameSession::submit`] runs both halves against a transport.

use babel_core::{GameState, Message, ModalType, PlayerIdentity};
use babel_status::{Diagnostic, ParsedStatus, parse_response};
use chrono::Utc;

use crate::alerts::{SuspicionAlert, SuspicionLevel, UpdateBadges};
use crate::config::SessionConfig;
use crate::context::{dynamic_context, history_window};
use crate::error::{SessionError, SessionResult};
use crate::reconcile::{ReconcileReport, reconcile};
use crate::save::{LoadReport, SaveFile, load_save};
use crate::settings::{ApiCredentials, HAS_VISITED, SettingsStore};
use crate::transport::{ChatRequest, ChatTransport, EMPTY_REPLY_NOTICE, TransportError};
use crate::world_info::WorldInfo;

/// A turn waiting on the narrator.
#[must_use = "a pending turn must be completed, failed or cancelled"]
#[derive(Debug)]
pub struct PendingTurn {
    id: u64,
    request: ChatRequest,
}

impl PendingTurn {
    /// Turn number within the session.
    pub fn id(&self) -> u64 {
        self.id
    }

    /// What to send to the narrator.
    pub fn request(&self) -> &ChatRequest {
        &self.request
    }
}

/// What a completed turn did.
#[derive(Debug, Clone)]
pub struct TurnReport {
    /// Narrative appended to the conversation.
    pub content: String,
    /// The parsed status block, if the reply had one.
    pub status: Option<ParsedStatus>,
    /// Fields, characters and events the reply changed.
    pub changes: ReconcileReport,
    /// Lines of the status block that were skipped, spans into the reply.
    pub diagnostics: Vec<Diagnostic>,
    /// Set when suspicion crossed into a different alert level.
    pub suspicion_alert: Option<SuspicionAlert>,
}

/// How a submitted turn ended.
#[derive(Debug, Clone)]
pub enum TurnOutcome {
    /// The narrator replied and the reply was merged.
    Completed(TurnReport),
    /// The narrator could not be reached; a notice was appended instead.
    Failed(TransportError),
}

/// An interactive game session.
#[derive(Debug, Clone)]
pub struct GameSession {
    state: GameState,
    config: SessionConfig,
    badges: UpdateBadges,
    suspicion: SuspicionLevel,
    pending: Option<u64>,
    turns: u64,
}

impl GameSession {
    /// Start a session at the opening scene.
    pub fn new(config: SessionConfig) -> Self {
        Self::with_state(GameState::new_game(), config)
    }

    /// Resume a session from an existing state.
    pub fn with_state(mut state: GameState, config: SessionConfig) -> Self {
        // A state captured mid-turn has no turn to settle.
        state.is_loading = false;
        let suspicion = SuspicionLevel::of(state.stats.suspicion);
        Self {
            state,
            config,
            badges: UpdateBadges::default(),
            suspicion,
            pending: None,
            turns: 0,
        }
    }

    /// The current state.
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// The session configuration.
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Panel badges.
    pub fn badges(&self) -> UpdateBadges {
        self.badges
    }

    /// Current suspicion level.
    pub fn suspicion_level(&self) -> SuspicionLevel {
        self.suspicion
    }

    /// Whether a turn is waiting on the narrator.
    pub fn is_loading(&self) -> bool {
        self.state.is_loading
    }

    /// Apply the character-creation form and remember that the player has
    /// been here before.
    pub fn start_game(
        &mut self,
        identity: &PlayerIdentity,
        settings: &mut dyn SettingsStore,
    ) -> SessionResult<()> {
        self.state.profile.apply_identity(identity);
        settings.set(HAS_VISITED, "true")?;
        tracing::info!(name = %self.state.profile.name, "game started");
        Ok(())
    }

    /// Record the player's message and build the narrator request.
    pub fn begin_turn(
        &mut self,
        input: &str,
        world_info: &dyn WorldInfo,
    ) -> SessionResult<PendingTurn> {
        if self.state.is_loading {
            return Err(SessionError::TurnInFlight);
        }
        let input = input.trim();
        if input.is_empty() {
            return Err(SessionError::EmptyInput);
        }

        let history = history_window(&self.state.messages, &self.config);
        let context = dynamic_context(&world_info.context_for(input), &self.state);
        tracing::debug!(
            history = history.len(),
            context_chars = context.chars().count(),
            "turn request built"
        );

        self.state.messages.push(Message::user(input));
        self.state.is_loading = true;
        self.turns += 1;
        self.pending = Some(self.turns);

        Ok(PendingTurn {
            id: self.turns,
            request: ChatRequest {
                history,
                message: input.to_string(),
                context,
            },
        })
    }

    /// Merge the narrator's reply.
    pub fn complete_turn(&mut self, turn: PendingTurn, raw: &str) -> SessionResult<TurnReport> {
        self.settle(&turn)?;

        let parse = parse_response(raw);
        for d in &parse.diagnostics {
            tracing::warn!(turn = turn.id, "{d}");
        }

        let content = if parse.content.is_empty() && parse.status.is_none() {
            EMPTY_REPLY_NOTICE.to_string()
        } else {
            parse.content
        };

        let (mut next, changes) = match &parse.status {
            Some(status) => (reconcile(&self.state, status), ReconcileReport::of(status)),
            None => (self.state.clone(), ReconcileReport::default()),
        };
        next.messages.push(Message::model(content.clone()));
        next.is_loading = false;
        self.state = next;
        self.badges.raise_all();

        let level = SuspicionLevel::of(self.state.stats.suspicion);
        let suspicion_alert = SuspicionAlert::between(self.suspicion, level);
        self.suspicion = level;

        tracing::info!(
            turn = turn.id,
            fields = changes.fields.len(),
            characters = changes.characters.len(),
            events = changes.new_events,
            "turn completed"
        );

        Ok(TurnReport {
            content,
            status: parse.status,
            changes,
            diagnostics: parse.diagnostics,
            suspicion_alert,
        })
    }

    /// Record a transport failure. Nothing is merged.
    pub fn fail_turn(&mut self, turn: PendingTurn, error: &TransportError) -> SessionResult<()> {
        self.settle(&turn)?;
        self.state.messages.push(Message::system(error.notice()));
        self.state.is_loading = false;
        tracing::info!(turn = turn.id, %error, "turn failed");
        Ok(())
    }

    /// Abandon a turn. The player's message stays; nothing is merged.
    pub fn cancel_turn(&mut self, turn: PendingTurn) -> SessionResult<()> {
        self.settle(&turn)?;
        self.state.is_loading = false;
        tracing::info!(turn = turn.id, "turn cancelled");
        Ok(())
    }

    /// Run a whole turn against a transport.
    ///
    /// Transport failures are not errors here: they end the turn with a
    /// notice and are returned as [`TurnOutcome::Failed`].
    pub fn submit(
        &mut self,
        input: &str,
        transport: &mut dyn ChatTransport,
        world_info: &dyn WorldInfo,
        credentials: &ApiCredentials,
    ) -> SessionResult<TurnOutcome> {
        let turn = self.begin_turn(input, world_info)?;

        let reply = if credentials.is_configured() {
            transport.send(credentials, turn.request())
        } else {
            Err(TransportError::MissingKey)
        };

        match reply {
            Ok(raw) => self.complete_turn(turn, &raw).map(TurnOutcome::Completed),
            Err(e) => {
                self.fail_turn(turn, &e)?;
                Ok(TurnOutcome::Failed(e))
            }
        }
    }

    /// Open a panel, clearing its badge.
    pub fn open_modal(&mut self, modal: ModalType) {
        self.badges.clear(modal);
        self.state.active_modal = Some(modal);
    }

    /// Close the open panel.
    pub fn close_modal(&mut self) {
        self.state.active_modal = None;
    }

    /// Capture the state for saving.
    pub fn save(&self) -> SaveFile {
        SaveFile::capture(&self.state, self.config.include_dynamics_in_save, Utc::now())
    }

    /// Replace the state from a save document. On error the state is
    /// untouched.
    pub fn load(&mut self, text: &str) -> SessionResult<LoadReport> {
        if self.state.is_loading {
            return Err(SessionError::TurnInFlight);
        }
        let (next, report) = load_save(text, &self.state)?;
        self.state = next;
        self.suspicion = SuspicionLevel::of(self.state.stats.suspicion);
        Ok(report)
    }

    fn settle(&mut self, turn: &PendingTurn) -> SessionResult<()> {
        if self.pending != Some(turn.id) {
            return Err(SessionError::StaleTurn(turn.id));
        }
        self.pending = None;
        Ok(())
    }
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new(SessionConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presets::{quest_action, schedule_action};
    use crate::settings::MemorySettings;
    use crate::transport::{CONNECTION_NOTICE, MISSING_KEY_NOTICE, ScriptedTransport};
    use crate::world_info::{NoWorldInfo, StaticWorldInfo};
    use babel_core::{Gender, Role};

    fn creds() -> ApiCredentials {
        ApiCredentials::new("key", "gemini-2.5-flash")
    }

    const REPLY: &str = "你推开图书馆的门。\n```status\n时间: 14:00\n时段: 下午\n地点: 巴别塔-图书馆\n怀疑度: 72\n行动1: 查书\n行动2: 搭话\n行动3: 离开\n事件更新:\n- headline|第1天|新闻|内容\n```";

    #[test]
    fn begin_turn_builds_request() {
        let mut session = GameSession::default();
        let before = session.state().messages.len();
        let turn = session.begin_turn("  观察四周  ", &StaticWorldInfo("LORE".into())).unwrap();

        assert!(session.is_loading());
        assert_eq!(session.state().messages.len(), before + 1);
        assert_eq!(session.state().messages.last().unwrap().content, "观察四周");
        let req = turn.request();
        assert_eq!(req.message, "观察四周");
        assert_eq!(req.history.len(), before);
        assert!(req.context.starts_with("LORE\n\n=== 当前游戏状态"));
        session.cancel_turn(turn).unwrap();
    }

    #[test]
    fn rejects_empty_and_concurrent_input() {
        let mut session = GameSession::default();
        assert!(matches!(session.begin_turn("   ", &NoWorldInfo), Err(SessionError::EmptyInput)));
        let turn = session.begin_turn("a", &NoWorldInfo).unwrap();
        assert!(matches!(session.begin_turn("b", &NoWorldInfo), Err(SessionError::TurnInFlight)));
        session.cancel_turn(turn).unwrap();
        assert!(!session.is_loading());
    }

    #[test]
    fn complete_turn_merges_reply() {
        let mut session = GameSession::default();
        let turn = session.begin_turn("去图书馆", &NoWorldInfo).unwrap();
        let report = session.complete_turn(turn, REPLY).unwrap();

        let state = session.state();
        assert!(!state.is_loading);
        assert_eq!(report.content, "你推开图书馆的门。");
        assert_eq!(state.messages.last().unwrap().role, Role::Model);
        assert_eq!(state.messages.last().unwrap().content, "你推开图书馆的门。");
        assert_eq!(state.profile.time, "14:00 · 下午");
        assert_eq!(state.stats.suspicion.value(), 72);
        assert_eq!(state.suggested_actions, ["查书", "搭话", "离开"].map(String::from));
        assert_eq!(state.events[0].title(), "新闻");
        assert_eq!(state.new_events().count(), 1);
        assert!(session.badges().map && session.badges().logs && session.badges().social);
        assert_eq!(report.changes.new_events, 1);

        let alert = report.suspicion_alert.unwrap();
        assert_eq!(alert.to, SuspicionLevel::Warning);
        assert!(alert.is_escalation());
    }

    #[test]
    fn narrative_only_reply_changes_nothing_else() {
        let mut session = GameSession::default();
        let prev = session.state().clone();
        let turn = session.begin_turn("等待", &NoWorldInfo).unwrap();
        let report = session.complete_turn(turn, "时间静静流逝。").unwrap();
        assert!(report.status.is_none());
        assert!(report.changes.is_empty());
        assert!(report.suspicion_alert.is_none());
        assert_eq!(session.state().profile, prev.profile);
        assert_eq!(session.state().events, prev.events);
        assert_eq!(session.state().messages.len(), prev.messages.len() + 2);
    }

    #[test]
    fn empty_reply_gets_notice() {
        let mut session = GameSession::default();
        let turn = session.begin_turn("…", &NoWorldInfo).unwrap();
        let report = session.complete_turn(turn, "   ").unwrap();
        assert_eq!(report.content, EMPTY_REPLY_NOTICE);
    }

    #[test]
    fn failed_turn_leaves_state_but_adds_notice() {
        let mut session = GameSession::default();
        let prev = session.state().clone();
        let turn = session.begin_turn("hi", &NoWorldInfo).unwrap();
        session.fail_turn(turn, &TransportError::Connection("timeout".into())).unwrap();

        let state = session.state();
        assert!(!state.is_loading);
        assert_eq!(state.stats, prev.stats);
        assert_eq!(state.profile, prev.profile);
        let last = state.messages.last().unwrap();
        assert_eq!(last.role, Role::System);
        assert_eq!(last.content, CONNECTION_NOTICE);
        assert!(!session.badges().any());
    }

    #[test]
    fn stale_turn_rejected() {
        let mut session = GameSession::default();
        let first = session.begin_turn("a", &NoWorldInfo).unwrap();
        let first_id = first.id();
        session.cancel_turn(first).unwrap();
        let second = session.begin_turn("b", &NoWorldInfo).unwrap();

        let forged = PendingTurn {
            id: first_id,
            request: second.request().clone(),
        };
        assert!(matches!(
            session.complete_turn(forged, REPLY),
            Err(SessionError::StaleTurn(id)) if id == first_id
        ));
        assert!(session.is_loading());
        session.complete_turn(second, REPLY).unwrap();
    }

    #[test]
    fn submit_runs_whole_turn() {
        let mut session = GameSession::default();
        let mut transport = ScriptedTransport::new([REPLY]);
        let outcome = session.submit("去图书馆", &mut transport, &NoWorldInfo, &creds()).unwrap();
        assert!(matches!(outcome, TurnOutcome::Completed(_)));
        assert_eq!(transport.requests()[0].message, "去图书馆");

        let outcome = session.submit("再来", &mut transport, &NoWorldInfo, &creds()).unwrap();
        assert!(matches!(outcome, TurnOutcome::Failed(TransportError::Connection(_))));
        assert!(!session.is_loading());
    }

    #[test]
    fn submit_without_key_fails_with_configuration_notice() {
        let mut session = GameSession::default();
        let mut transport = ScriptedTransport::new([REPLY]);
        let no_key = ApiCredentials::new("", "m");
        let outcome = session.submit("hi", &mut transport, &NoWorldInfo, &no_key).unwrap();
        assert!(matches!(outcome, TurnOutcome::Failed(TransportError::MissingKey)));
        assert_eq!(transport.requests().len(), 0);
        assert_eq!(session.state().messages.last().unwrap().content, MISSING_KEY_NOTICE);
    }

    #[test]
    fn history_excludes_current_message() {
        let mut session = GameSession::default();
        let mut transport = ScriptedTransport::new(["one", "two"]);
        session.submit("first", &mut transport, &NoWorldInfo, &creds()).unwrap();
        session.submit("second", &mut transport, &NoWorldInfo, &creds()).unwrap();
        let history = &transport.requests()[1].history;
        assert_eq!(history.len(), 3);
        assert_eq!(history[1].content, "first");
        assert_eq!(history[2].content, "one");
    }

    #[test]
    fn modal_clears_matching_badge() {
        let mut session = GameSession::default();
        let mut transport = ScriptedTransport::new(["reply"]);
        session.submit("x", &mut transport, &NoWorldInfo, &creds()).unwrap();

        session.open_modal(ModalType::Logs);
        assert_eq!(session.state().active_modal, Some(ModalType::Logs));
        assert!(!session.badges().logs);
        assert!(session.badges().map);
        session.close_modal();
        assert_eq!(session.state().active_modal, None);
    }

    #[test]
    fn start_game_applies_identity() {
        let mut session = GameSession::default();
        let mut settings = MemorySettings::new();
        let identity = PlayerIdentity {
            name: "罗宾".into(),
            age: "17".into(),
            gender: Some(Gender::Male),
            personality: String::new(),
            appearance: "  ".into(),
        };
        session.start_game(&identity, &mut settings).unwrap();
        let profile = &session.state().profile;
        assert_eq!(profile.name, "罗宾");
        assert_eq!(profile.age.as_deref(), Some("17"));
        assert_eq!(profile.appearance, None);
        assert_eq!(settings.get(HAS_VISITED).as_deref(), Some("true"));
    }

    #[test]
    fn preset_actions_submit_like_typed_input() {
        let mut session = GameSession::default();
        let mut transport = ScriptedTransport::new(["a", "b"]);
        let schedule = schedule_action("上午", "上课", Some("语音学"));
        session.submit(&schedule, &mut transport, &NoWorldInfo, &creds()).unwrap();
        session
            .submit(&quest_action("翻译部", "T-01"), &mut transport, &NoWorldInfo, &creds())
            .unwrap();
        assert_eq!(transport.requests()[0].message, "【日程安排】上午：上课 - 语音学");
        assert!(transport.requests()[1].message.starts_with("【接受任务】"));
    }

    #[test]
    fn save_and_load_round_trip() {
        let mut session = GameSession::default();
        let mut transport = ScriptedTransport::new([REPLY]);
        session.submit("x", &mut transport, &NoWorldInfo, &creds()).unwrap();
        let json = session.save().to_json().unwrap();

        let mut fresh = GameSession::default();
        let report = fresh.load(&json).unwrap();
        assert_eq!(report.version.as_deref(), Some("1.1"));
        assert_eq!(fresh.state(), session.state());
        assert_eq!(fresh.suspicion_level(), SuspicionLevel::Warning);
    }

    #[test]
    fn failed_load_leaves_state() {
        let mut session = GameSession::default();
        let prev = session.state().clone();
        assert!(session.load("{").is_err());
        assert!(session.load(r#"{"version":"1.0"}"#).is_err());
        assert_eq!(session.state(), &prev);
    }
}
