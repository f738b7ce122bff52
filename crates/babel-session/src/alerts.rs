//! Notification state derived from turns: suspicion levels and the
//! "updated" badges on the map, log and dossier buttons.

use std::fmt;

use babel_core::{ModalType, Percent};

/// How closely the inquisition is watching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum SuspicionLevel {
    /// Below 50.
    None,
    /// 50 and above.
    Caution,
    /// 70 and above.
    Warning,
    /// 90 and above.
    Wanted,
}

impl SuspicionLevel {
    /// Level for a suspicion value.
    pub fn of(suspicion: Percent) -> Self {
        match suspicion.value() {
            90.. => Self::Wanted,
            70.. => Self::Warning,
            50.. => Self::Caution,
            _ => Self::None,
        }
    }

    /// Banner title, if the level shows one.
    pub fn title(self) -> Option<&'static str> {
        match self {
            Self::None => None,
            Self::Caution => Some("注意"),
            Self::Warning => Some("警告"),
            Self::Wanted => Some("通缉"),
        }
    }
}

impl fmt::Display for SuspicionLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::None => "none",
            Self::Caution => "CAUTION",
            Self::Warning => "WARNING",
            Self::Wanted => "WANTED",
        })
    }
}

/// Raised when a turn moves suspicion into a different non-none level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SuspicionAlert {
    /// Level before the turn.
    pub from: SuspicionLevel,
    /// Level after the turn.
    pub to: SuspicionLevel,
}

impl SuspicionAlert {
    /// The alert for a transition, if any.
    pub fn between(from: SuspicionLevel, to: SuspicionLevel) -> Option<Self> {
        (to != SuspicionLevel::None && to != from).then_some(Self { from, to })
    }

    /// Whether suspicion went up.
    pub fn is_escalation(&self) -> bool {
        self.to > self.from
    }
}

/// "Something changed" markers on the panels narrator replies refresh.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UpdateBadges {
    /// Map panel.
    pub map: bool,
    /// Event log panel.
    pub logs: bool,
    /// Character dossier panel.
    pub social: bool,
}

impl UpdateBadges {
    /// Raise every badge.
    pub fn raise_all(&mut self) {
        *self = Self {
            map: true,
            logs: true,
            social: true,
        };
    }

    /// Clear the badge belonging to a panel. Panels without a badge are ignored.
    pub fn clear(&mut self, modal: ModalType) {
        match modal {
            ModalType::Map => self.map = false,
            ModalType::Logs => self.logs = false,
            ModalType::Social => self.social = false,
            _ => {}
        }
    }

    /// Whether any badge is raised.
    pub fn any(&self) -> bool {
        self.map || self.logs || self.social
    }
}
