//! Merging one turn's parsed status into the game state.
//!
//! Two merge strategies coexist on purpose. Scalar fields are additive by
//! presence: a field the narrator left out keeps its previous value.
//! Character records are replaced whole: a character named this turn gets
//! exactly the record the parser built, placeholders included, while
//! characters not named keep theirs untouched.

use babel_core::{GameEvent, GameState};
use babel_status::ParsedStatus;

/// Shown when neither clock nor period is known.
pub const TIME_PLACEHOLDER: &str = "--:--";

/// Combine clock and period for display: `"14:00 · 下午"`, either part
/// alone, or the placeholder.
pub fn format_time_display(time: Option<&str>, period: Option<&str>) -> String {
    match (time, period) {
        (Some(t), Some(p)) => format!("{t} · {p}"),
        (Some(one), None) | (None, Some(one)) => one.to_string(),
        (None, None) => TIME_PLACEHOLDER.to_string(),
    }
}

/// Derive the next state from the previous one and a parsed status.
///
/// Only profile, stats, suggested actions, character dynamics and events
/// can change. An empty status returns a state equal to `prev`.
pub fn reconcile(prev: &GameState, parsed: &ParsedStatus) -> GameState {
    let mut next = prev.clone();

    let profile = &mut next.profile;
    // Period alone never touches the display; it only decorates a clock.
    if let Some(time) = parsed.time.as_deref() {
        profile.time = format_time_display(Some(time), parsed.period.as_deref());
    }
    if let Some(location) = &parsed.location {
        profile.location.clone_from(location);
    }
    if let Some(weather) = &parsed.weather {
        profile.weather.clone_from(weather);
    }
    if let Some(clothing) = &parsed.clothing {
        profile.clothing.clone_from(clothing);
    }
    if let Some(coins) = parsed.coins {
        profile.coins = coins;
    }

    let stats = &mut next.stats;
    if let Some(v) = parsed.empire_contribution {
        stats.empire_contribution = v;
    }
    if let Some(v) = parsed.club_contribution {
        stats.club_contribution = v;
    }
    if let Some(v) = parsed.suspicion {
        stats.suspicion = v;
    }

    if let Some(actions) = parsed.actions.complete() {
        next.suggested_actions = actions;
    }

    if let Some(updates) = &parsed.character_dynamics {
        for (name, record) in updates {
            next.character_dynamics.insert(name.clone(), record.clone());
        }
    }

    if !parsed.event_updates.is_empty() {
        let older = std::mem::take(&mut next.events).into_iter().map(GameEvent::seen);
        next.events = parsed.event_updates.iter().cloned().chain(older).collect();
    }

    next
}

/// What a reconciliation changed, for logs and the CLI.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReconcileReport {
    /// Profile and stat fields that were overwritten, by label.
    pub fields: Vec<&'static str>,
    /// Suggested actions were replaced.
    pub actions_replaced: bool,
    /// Characters whose records were replaced or inserted.
    pub characters: Vec<String>,
    /// Number of events prepended.
    pub new_events: usize,
}

impl ReconcileReport {
    /// Describe what [`reconcile`] will do with `parsed`.
    pub fn of(parsed: &ParsedStatus) -> Self {
        let present = [
            ("time", parsed.time.is_some()),
            ("location", parsed.location.is_some()),
            ("weather", parsed.weather.is_some()),
            ("clothing", parsed.clothing.is_some()),
            ("coins", parsed.coins.is_some()),
            ("empireContribution", parsed.empire_contribution.is_some()),
            ("clubContribution", parsed.club_contribution.is_some()),
            ("suspicion", parsed.suspicion.is_some()),
        ];
        Self {
            fields: present.iter().filter(|(_, p)| *p).map(|(name, _)| *name).collect(),
            actions_replaced: parsed.actions.complete().is_some(),
            characters: parsed
                .character_dynamics
                .as_ref()
                .map(|m| m.keys().cloned().collect())
                .unwrap_or_default(),
            new_events: parsed.event_updates.len(),
        }
    }

    /// Whether nothing changed.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
            && !self.actions_replaced
            && self.characters.is_empty()
            && self.new_events == 0
    }
}
