//! The per-turn parse result.

use babel_core::{CharacterDynamics, GameEvent, Percent};
use serde::Serialize;

/// Up to three suggested-action slots, each filled independently.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ActionSlots([Option<String>; 3]);

impl ActionSlots {
    /// Slots from a full triple.
    pub fn from_triple(actions: [&str; 3]) -> Self {
        Self(actions.map(|a| Some(a.to_string())))
    }

    /// Fill one slot. Indices past the third slot are ignored.
    pub fn set(&mut self, index: usize, action: impl Into<String>) {
        if let Some(slot) = self.0.get_mut(index) {
            *slot = Some(action.into());
        }
    }

    /// The slot contents.
    pub fn slots(&self) -> &[Option<String>; 3] {
        &self.0
    }

    /// Number of filled slots.
    pub fn filled(&self) -> usize {
        self.0.iter().filter(|s| s.is_some()).count()
    }

    /// Whether no slot is filled.
    pub fn is_empty(&self) -> bool {
        self.filled() == 0
    }

    /// All three actions, if every slot holds a non-empty string.
    pub fn complete(&self) -> Option<[String; 3]> {
        match &self.0 {
            [Some(a), Some(b), Some(c)]
                if !a.trim().is_empty() && !b.trim().is_empty() && !c.trim().is_empty() =>
            {
                Some([a.clone(), b.clone(), c.clone()])
            }
            _ => None,
        }
    }
}

/// Only the fields the narrator chose to report this turn.
///
/// `None` means "no change", never "reset". The reconciler relies on this.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedStatus {
    /// In-world clock.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    /// Part of day.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub period: Option<String>,
    /// Player location.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    /// Weather.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weather: Option<String>,
    /// Player clothing.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub clothing: Option<String>,
    /// Silver coins.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coins: Option<i64>,
    /// Empire contribution, already clamped.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub empire_contribution: Option<Percent>,
    /// Society standing, already clamped.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub club_contribution: Option<Percent>,
    /// Suspicion, already clamped.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suspicion: Option<Percent>,
    /// Suggested-action slots.
    #[serde(skip_serializing_if = "ActionSlots::is_empty")]
    pub actions: ActionSlots,
    /// Replacement snapshots for the characters named this turn.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub character_dynamics: Option<CharacterDynamics>,
    /// Events published this turn, in source order.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub event_updates: Vec<GameEvent>,
}

impl ParsedStatus {
    /// Whether the turn reported nothing at all.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}
