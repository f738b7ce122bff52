//! Label vocabulary of the status protocol.
//!
//! The narrator is prompted to write labels in the game's display language.
//! Every label the parsers recognise lives here; changing the prompt's
//! locale means changing this module and nothing else.

/// Fence tag that opens a status block (```` ```status ````).
pub const STATUS_TAG: &str = "status";

/// Header line introducing the character-dynamics list.
pub const CHARACTER_SECTION: &str = "角色动态";

/// Header line introducing the event-updates list.
pub const EVENT_SECTION: &str = "事件更新";

/// Single-line `key: value` fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalarKey {
    /// In-world clock.
    Time,
    /// Part of day, combined with the clock for display.
    Period,
    /// Player location.
    Location,
    /// Weather.
    Weather,
    /// Player clothing.
    Clothing,
    /// Silver coins (unclamped).
    Coins,
    /// Empire contribution (0-100).
    EmpireContribution,
    /// Society standing (0-100).
    ClubContribution,
    /// Suspicion (0-100).
    Suspicion,
    /// Suggested action slot 0, 1 or 2.
    Action(usize),
}

impl ScalarKey {
    /// Every key, in the order the prompt lists them.
    pub const ALL: [Self; 12] = [
        Self::Time,
        Self::Period,
        Self::Location,
        Self::Weather,
        Self::Clothing,
        Self::Coins,
        Self::EmpireContribution,
        Self::ClubContribution,
        Self::Suspicion,
        Self::Action(0),
        Self::Action(1),
        Self::Action(2),
    ];

    /// Look up a label. Unknown labels return `None` and are ignored upstream.
    pub fn from_label(label: &str) -> Option<Self> {
        Some(match label {
            "时间" => Self::Time,
            "时段" => Self::Period,
            "地点" => Self::Location,
            "天气" => Self::Weather,
            "服装" => Self::Clothing,
            "银币" => Self::Coins,
            "帝国贡献" => Self::EmpireContribution,
            "社团声望" => Self::ClubContribution,
            "怀疑度" => Self::Suspicion,
            "行动1" => Self::Action(0),
            "行动2" => Self::Action(1),
            "行动3" => Self::Action(2),
            _ => return None,
        })
    }

    /// The label as written in a status block.
    pub fn label(self) -> &'static str {
        match self {
            Self::Time => "时间",
            Self::Period => "时段",
            Self::Location => "地点",
            Self::Weather => "天气",
            Self::Clothing => "服装",
            Self::Coins => "银币",
            Self::EmpireContribution => "帝国贡献",
            Self::ClubContribution => "社团声望",
            Self::Suspicion => "怀疑度",
            Self::Action(0) => "行动1",
            Self::Action(1) => "行动2",
            Self::Action(_) => "行动3",
        }
    }
}

/// `key=value` attributes on a character line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharacterAttr {
    /// Where the character is.
    Location,
    /// What the character wears.
    Clothing,
    /// What the character is doing.
    Activity,
    /// What the character is thinking.
    Thought,
    /// Affection toward the player (0-100).
    Affection,
}

impl CharacterAttr {
    /// Look up an attribute label.
    pub fn from_label(label: &str) -> Option<Self> {
        Some(match label {
            "位置" => Self::Location,
            "穿着" => Self::Clothing,
            "行动" => Self::Activity,
            "想法" => Self::Thought,
            "好感度" => Self::Affection,
            _ => return None,
        })
    }

    /// The label as written in a status block.
    pub fn label(self) -> &'static str {
        match self {
            Self::Location => "位置",
            Self::Clothing => "穿着",
            Self::Activity => "行动",
            Self::Thought => "想法",
            Self::Affection => "好感度",
        }
    }
}
