//! The root game-state aggregate.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::character::{CharacterDynamics, default_character_dynamics};
use crate::error::CoreError;
use crate::event::{GameEvent, initial_events};
use crate::message::Message;
use crate::profile::{InventoryItem, PlayerProfile, PlayerStats, initial_inventory};

const OPENING_NARRATION: &str = "晨光透过巨大的哥特式窗户洒入教室，尘埃在光柱中翻滚起舞。你坐在巨大的木质课桌前，桌面上散落着几本厚重的语法词典和一条铅银合金银条。\n\n威廉·诺曼教授正在讲台上讲解刷银术的基本原理——如何在两种语言的语义差异中捕捉魔法的力量。\n\n\"当你用中文写下'安'，再用英文写下'Peace'，这两个词看似对等，但它们承载的文化意象却有微妙差异……\"教授的声音在教室中回荡。\n\n你接下来打算做什么？";

const OPENING_ACTIONS: [&str; 3] = ["观察周围的环境", "检查背包里的物品", "询问关于禁书区的传闻"];

/// A panel the player can open over the main view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModalType {
    /// Stats and satchel.
    Status,
    /// Tower map with character markers.
    Map,
    /// Daily schedule planner.
    Schedule,
    /// Silver-working workshop.
    Magic,
    /// Character dossiers.
    Social,
    /// Quest board.
    Quests,
    /// Event log.
    Logs,
    /// Settings.
    Settings,
    /// Inventory.
    Inventory,
}

impl ModalType {
    /// Panel title.
    pub fn title(self) -> &'static str {
        match self {
            Self::Status => "当前状态与行囊",
            Self::Map => "巴别塔地图",
            Self::Schedule => "日程规划",
            Self::Magic => "刻银术工坊",
            Self::Social => "人物档案",
            Self::Quests => "任务委托",
            Self::Logs => "事件日志",
            Self::Settings => "系统设置",
            Self::Inventory => "银条背包",
        }
    }
}

impl fmt::Display for ModalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

impl FromStr for ModalType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "status" => Ok(Self::Status),
            "map" => Ok(Self::Map),
            "schedule" => Ok(Self::Schedule),
            "magic" => Ok(Self::Magic),
            "social" => Ok(Self::Social),
            "quests" => Ok(Self::Quests),
            "logs" => Ok(Self::Logs),
            "settings" => Ok(Self::Settings),
            "inventory" => Ok(Self::Inventory),
            _ => Err(CoreError::UnknownModal(s.trim().to_string())),
        }
    }
}

/// Everything the front-end renders.
///
/// Owned by a single controller. The status pipeline only ever derives a
/// new value from an old one; it never holds a reference across turns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameState {
    /// Append-only conversation log.
    pub messages: Vec<Message>,
    /// Standing meters.
    pub stats: PlayerStats,
    /// Sidebar profile.
    pub profile: PlayerProfile,
    /// Satchel contents.
    pub inventory: Vec<InventoryItem>,
    /// A turn is waiting on the narrator. New input is refused meanwhile.
    pub is_loading: bool,
    /// The panel currently open, if any.
    pub active_modal: Option<ModalType>,
    /// Preset next moves; always exactly three.
    pub suggested_actions: [String; 3],
    /// Latest snapshot per character.
    pub character_dynamics: CharacterDynamics,
    /// Event log, newest first.
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// The state at the opening scene.
    pub fn new_game() -> Self {
        Self {
            messages: vec![Message::model(OPENING_NARRATION)],
            stats: PlayerStats::default(),
            profile: PlayerProfile::default(),
            inventory: initial_inventory(),
            is_loading: false,
            active_modal: None,
            suggested_actions: OPENING_ACTIONS.map(str::to_string),
            character_dynamics: default_character_dynamics(),
            events: initial_events(),
        }
    }

    /// Events flagged as part of the newest batch.
    pub fn new_events(&self) -> impl Iterator<Item = &GameEvent> {
        self.events.iter().filter(|e| e.is_new())
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new_game()
    }
}
