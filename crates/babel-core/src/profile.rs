//! Player profile, stats, and inventory.

use serde::{Deserialize, Serialize};

use crate::percent::Percent;

/// The player-facing profile shown in the sidebar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerProfile {
    /// Player name.
    pub name: String,
    /// Academic year.
    pub grade: String,
    /// Silver coins. Currency, so unbounded and possibly negative.
    pub coins: i64,
    /// Current clothing.
    pub clothing: String,
    /// Current location.
    pub location: String,
    /// Composite display time (`time · period`).
    pub time: String,
    /// Current weather.
    pub weather: String,
    /// Age from the character-creation form.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<String>,
    /// Gender from the character-creation form.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<Gender>,
    /// Personality from the character-creation form.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub personality: Option<String>,
    /// Appearance from the character-creation form.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub appearance: Option<String>,
}

impl PlayerProfile {
    /// Overlay the non-empty fields of a character-creation form.
    pub fn apply_identity(&mut self, identity: &PlayerIdentity) {
        if let Some(name) = non_empty(&identity.name) {
            self.name = name;
        }
        if let Some(age) = non_empty(&identity.age) {
            self.age = Some(age);
        }
        if let Some(gender) = identity.gender {
            self.gender = Some(gender);
        }
        if let Some(personality) = non_empty(&identity.personality) {
            self.personality = Some(personality);
        }
        if let Some(appearance) = non_empty(&identity.appearance) {
            self.appearance = Some(appearance);
        }
    }
}

impl Default for PlayerProfile {
    fn default() -> Self {
        Self {
            name: "新生".to_string(),
            grade: "一年级".to_string(),
            coins: 50,
            clothing: "学院制服".to_string(),
            location: "巴别塔-教室".to_string(),
            time: "09:00 · 上午".to_string(),
            weather: "阴".to_string(),
            age: None,
            gender: None,
            personality: None,
            appearance: None,
        }
    }
}

fn non_empty(s: &str) -> Option<String> {
    let t = s.trim();
    (!t.is_empty()).then(|| t.to_string())
}

/// Gender choice on the character-creation form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    /// Female.
    Female,
    /// Male.
    Male,
    /// Other / unspecified.
    Other,
}

/// Character-creation form data. Empty strings mean "keep the default".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerIdentity {
    /// Player name.
    pub name: String,
    /// Age.
    pub age: String,
    /// Gender, if chosen.
    pub gender: Option<Gender>,
    /// Personality.
    pub personality: String,
    /// Appearance.
    pub appearance: String,
}

/// The three standing meters, each clamped to 0-100.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerStats {
    /// Loyalty credited by the Empire.
    pub empire_contribution: Percent,
    /// Standing with the Hermes Society.
    pub club_contribution: Percent,
    /// How closely the inquisition is watching.
    pub suspicion: Percent,
}

impl Default for PlayerStats {
    fn default() -> Self {
        Self {
            empire_contribution: Percent::clamped(50),
            club_contribution: Percent::clamped(10),
            suspicion: Percent::clamped(15),
        }
    }
}

/// An item in the player's satchel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryItem {
    /// Stable item ID.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Flavour text.
    pub description: String,
    /// Icon key for the UI.
    pub icon: String,
}

impl InventoryItem {
    /// Create an item.
    pub fn new(id: &str, name: &str, description: &str, icon: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            description: description.to_string(),
            icon: icon.to_string(),
        }
    }
}

/// The satchel at the start of a new game.
pub fn initial_inventory() -> Vec<InventoryItem> {
    vec![
        InventoryItem::new(
            "silver-bar",
            "铅银合金银条",
            "尚未刻写的练习用银条，入学时统一发放。",
            "silver",
        ),
        InventoryItem::new(
            "grammar-dictionary",
            "语法词典",
            "厚重的多语对照词典，页边写满前任主人的批注。",
            "book",
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_overlays_only_non_empty_fields() {
        let mut profile = PlayerProfile::default();
        let identity = PlayerIdentity {
            name: "  林  ".into(),
            age: String::new(),
            gender: Some(Gender::Female),
            personality: "谨慎".into(),
            appearance: " ".into(),
        };
        profile.apply_identity(&identity);
        assert_eq!(profile.name, "林");
        assert_eq!(profile.age, None);
        assert_eq!(profile.gender, Some(Gender::Female));
        assert_eq!(profile.personality.as_deref(), Some("谨慎"));
        assert_eq!(profile.appearance, None);
    }

    #[test]
    fn stats_use_camel_case_keys() {
        let json = serde_json::to_value(PlayerStats::default()).unwrap();
        assert_eq!(json["empireContribution"], 50);
        assert_eq!(json["clubContribution"], 10);
        assert_eq!(json["suspicion"], 15);
    }

    #[test]
    fn profile_without_identity_fields_round_trips() {
        let profile = PlayerProfile::default();
        let json = serde_json::to_string(&profile).unwrap();
        assert!(!json.contains("age"));
        let back: PlayerProfile = serde_json::from_str(&json).unwrap();
        assert_eq!(back, profile);
    }
}
