//! The eight principal characters and the names the narrator uses for them.
//!
//! The status protocol keys character dynamics by the name exactly as the
//! narrator wrote it. Dossiers and map markers use the canonical keys below,
//! so display code resolves names through [`find_character`].

/// A principal character.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CharacterEntry {
    /// Canonical key (also the key in the seed dynamics table).
    pub key: &'static str,
    /// Names and nicknames that refer to this character.
    pub aliases: &'static [&'static str],
}

/// All principal characters.
pub const PRINCIPALS: &[CharacterEntry] = &[
    CharacterEntry {
        key: "埃莉诺",
        aliases: &["埃莉诺", "诺曼小姐", "Eleanor", "莉诺"],
    },
    CharacterEntry {
        key: "关祁",
        aliases: &["关祁", "Guan Qi", "关同学"],
    },
    CharacterEntry {
        key: "海因里希",
        aliases: &["海因里希", "Heinrich", "冯·克莱斯特", "克莱斯特"],
    },
    CharacterEntry {
        key: "科莱特",
        aliases: &["科莱特", "Colette", "瓦卢瓦", "科莱特教授"],
    },
    CharacterEntry {
        key: "佩德罗",
        aliases: &["佩德罗", "Pedro", "德·索萨"],
    },
    CharacterEntry {
        key: "索菲亚",
        aliases: &["索菲亚", "Sophia", "奥博连斯基"],
    },
    CharacterEntry {
        key: "源结月",
        aliases: &["源结月", "结月", "Yuzuki"],
    },
    CharacterEntry {
        key: "威廉",
        aliases: &["威廉", "William", "诺曼教授", "威廉教授"],
    },
];

/// Resolve a name or alias to a canonical character key.
pub fn find_character(name: &str) -> Option<&'static str> {
    if name.is_empty() {
        return None;
    }
    PRINCIPALS
        .iter()
        .find(|c| name.contains(c.key) || c.aliases.iter().any(|a| name.contains(a)))
        .map(|c| c.key)
}
