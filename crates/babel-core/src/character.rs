//! Per-character dynamic snapshots.
//!
//! A snapshot is always replaced as a whole. The status protocol never
//! patches a single field of an existing record: a character line that only
//! names a location produces a fresh record whose other fields are
//! placeholders. Seed data for the eight principal characters lives in
//! [`default_character_dynamics`].

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::percent::Percent;

/// Placeholder for string fields the status line did not supply.
pub const UNKNOWN: &str = "未知";

/// Affection used when a status line omits it or supplies garbage.
pub const DEFAULT_AFFECTION: i64 = 50;

/// Character name → current snapshot.
pub type CharacterDynamics = BTreeMap<String, CharacterDynamicData>;

/// What a character is doing right now, as reported by the narrator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterDynamicData {
    /// Current location.
    pub location: String,
    /// Current clothing.
    pub clothing: String,
    /// Current activity.
    pub activity: String,
    /// Current inner thought.
    pub thought: String,
    /// Affection toward the player.
    pub affection: Percent,
}

impl CharacterDynamicData {
    /// A record with every field at its placeholder.
    pub fn placeholder() -> Self {
        Self {
            location: UNKNOWN.to_string(),
            clothing: UNKNOWN.to_string(),
            activity: UNKNOWN.to_string(),
            thought: UNKNOWN.to_string(),
            affection: Percent::clamped(DEFAULT_AFFECTION),
        }
    }

    fn seed(location: &str, clothing: &str, activity: &str, thought: &str, affection: i64) -> Self {
        Self {
            location: location.to_string(),
            clothing: clothing.to_string(),
            activity: activity.to_string(),
            thought: thought.to_string(),
            affection: Percent::clamped(affection),
        }
    }
}

impl Default for CharacterDynamicData {
    fn default() -> Self {
        Self::placeholder()
    }
}

/// Opening-scene snapshots for the eight principal characters.
pub fn default_character_dynamics() -> CharacterDynamics {
    type D = CharacterDynamicData;
    [
        (
            "埃莉诺",
            D::seed(
                "巴别塔-教室前排",
                "学院制服(优等生)",
                "正在记笔记",
                "必须表现得完美无缺",
                45,
            ),
        ),
        (
            "关祁",
            D::seed(
                "巴别塔-教室后排",
                "学院制服(内衬丝绸)",
                "转笔神游",
                "好困...昨晚不该熬夜",
                60,
            ),
        ),
        (
            "海因里希",
            D::seed(
                "巴别塔-教室角落",
                "学院制服(笔挺)",
                "盯着黑板",
                "这也太简单了",
                30,
            ),
        ),
        (
            "索菲亚",
            D::seed(
                "巴别塔-教室窗边",
                "学院制服(挽起袖口)",
                "把玩银条",
                "这就是帝国的洗脑教育",
                55,
            ),
        ),
        (
            "源结月",
            D::seed(
                "巴别塔-教室中排",
                "学院制服(系着香囊)",
                "练习发音",
                "再完美一点...",
                35,
            ),
        ),
        (
            "佩德罗",
            D::seed(
                "巴别塔-教室后排",
                "学院制服(歪领带)",
                "传纸条",
                "下课去哪喝酒？",
                70,
            ),
        ),
        (
            "科莱特",
            D::seed(
                "巴别塔-教室后门",
                "深紫助教袍",
                "旁听观察",
                "年轻的欲望真有趣",
                40,
            ),
        ),
        (
            "威廉",
            D::seed(
                "巴别塔-教室讲台",
                "深红教授袍",
                "敲击讲台",
                "这届新生有些意思",
                50,
            ),
        ),
    ]
    .into_iter()
    .map(|(name, data)| (name.to_string(), data))
    .collect()
}
