//! Published in-world events (news items) shown in the event log.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::CoreError;

/// Unique identifier for a published event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EventId(pub Uuid);

impl EventId {
    /// Generate a new random event ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for EventId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", &self.0.to_string()[..8])
    }
}

/// The category of a published event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    /// Front-page news.
    Headline,
    /// Society pages.
    Social,
    /// Intelligence passed to the player in secret.
    Secret,
    /// Game-system notices (stat changes, warnings).
    System,
}

impl EventKind {
    /// Every kind, in log display order.
    pub const ALL: [Self; 4] = [Self::Headline, Self::Social, Self::Secret, Self::System];

    /// Protocol name (`headline`, `social`, ...).
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Headline => "headline",
            Self::Social => "social",
            Self::Secret => "secret",
            Self::System => "system",
        }
    }

    /// Display label used by the event log.
    pub fn label(self) -> &'static str {
        match self {
            Self::Headline => "头条新闻",
            Self::Social => "社会版",
            Self::Secret => "密报",
            Self::System => "系统提示",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EventKind {
    type Err = CoreError;

    /// Case-insensitive; surrounding whitespace is ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "headline" => Ok(Self::Headline),
            "social" => Ok(Self::Social),
            "secret" => Ok(Self::Secret),
            "system" => Ok(Self::System),
            _ => Err(CoreError::UnknownEventKind(s.trim().to_string())),
        }
    }
}

/// One published narrative item.
///
/// Immutable after publication except for the `is_new` flag, which marks
/// membership in the most recent batch rather than unread status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameEvent {
    id: EventId,
    #[serde(rename = "type")]
    kind: EventKind,
    timestamp: String,
    title: String,
    content: String,
    #[serde(default)]
    is_new: bool,
    #[serde(default)]
    is_locked: bool,
}

impl GameEvent {
    /// Publish a new, unlocked event with a fresh ID.
    pub fn publish(
        kind: EventKind,
        timestamp: impl Into<String>,
        title: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            id: EventId::new(),
            kind,
            timestamp: timestamp.into(),
            title: title.into(),
            content: content.into(),
            is_new: true,
            is_locked: false,
        }
    }

    /// Hide the content until unlocked. Used for authored seed events only.
    pub fn locked(mut self) -> Self {
        self.is_locked = true;
        self
    }

    /// Drop the "newest batch" flag.
    pub fn seen(mut self) -> Self {
        self.is_new = false;
        self
    }

    /// The event ID.
    pub fn id(&self) -> EventId {
        self.id
    }

    /// The event category.
    pub fn kind(&self) -> EventKind {
        self.kind
    }

    /// Display timestamp (free text, not a parseable date).
    pub fn timestamp(&self) -> &str {
        &self.timestamp
    }

    /// Headline.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Body text.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Whether the event belongs to the most recent batch.
    pub fn is_new(&self) -> bool {
        self.is_new
    }

    /// Whether the UI should hide the content.
    pub fn is_locked(&self) -> bool {
        self.is_locked
    }
}

/// The event log at the start of a new game, newest first.
pub fn initial_events() -> Vec<GameEvent> {
    use EventKind::*;
    vec![
        GameEvent::publish(
            Headline,
            "1830年11月15日 · 早报",
            "皇家翻译学院迎来新学期开学典礼",
            "威廉·诺曼教授在巴别塔大厅发表开学演讲，强调\"语言是帝国的基石，翻译是文明的桥梁\"。全体一年级新生参加了刻银术入门仪式。",
        ),
        GameEvent::publish(
            Social,
            "1830年11月14日 · 晚报",
            "诺曼庄园举办秋季舞会",
            "威廉·诺曼教授在其家族庄园举办了一场盛大的秋季舞会。据悉，多位外国使节的子女出席了活动。埃莉诺·诺曼小姐的舞姿成为当晚焦点。",
        )
        .seen(),
        GameEvent::publish(
            System,
            "系统通知",
            "帝国贡献度提升",
            "由于按时完成法务部实习任务，你的帝国贡献度提升了5点。当前：45% → 50%",
        ),
        GameEvent::publish(
            Secret,
            "匿名情报",
            "【加密】赫耳墨斯社会议通知",
            "今晚子时，图书馆地下室。暗号：「鹦鹉学舌」。——Ψ",
        )
        .seen(),
        GameEvent::publish(
            Secret,
            "匿名情报",
            "【未解锁】需要更高的社团贡献度",
            "???????????????????????????",
        )
        .seen()
        .locked(),
        GameEvent::publish(
            Headline,
            "1830年11月13日 · 号外",
            "南安普顿港发生爆炸事故",
            "帝国皇家海军\"凯旋号\"战列舰在港口发生不明原因爆炸。官方声称是银条储存不当导致的意外，但有目击者称看到了可疑人物逃离现场。巴别塔加强了安保措施。",
        )
        .seen(),
        GameEvent::publish(
            Social,
            "1830年11月12日 · 晚报",
            "海因里希·冯·克莱斯特在刻银术考试中获得满分",
            "来自普鲁士的留学生海因里希在实用类魔法考试中展现惊人天赋。威廉教授亲自表示赞赏，称其\"将成为不列颠尼亚与普鲁士友谊的桥梁\"。",
        )
        .seen(),
        GameEvent::publish(
            System,
            "系统通知",
            "怀疑度上升警告",
            "由于深夜出现在禁区附近，你的怀疑度上升了3点。当前：12% → 15%。请谨慎行事。",
        )
        .seen(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_parse_is_case_insensitive() {
        assert_eq!("HEADLINE".parse::<EventKind>().unwrap(), EventKind::Headline);
        assert_eq!(" System ".parse::<EventKind>().unwrap(), EventKind::System);
    }

    #[test]
    fn kind_parse_rejects_unknown() {
        let err = "foo".parse::<EventKind>().unwrap_err();
        assert_eq!(err, CoreError::UnknownEventKind("foo".into()));
    }

    #[test]
    fn published_events_are_new_and_unlocked() {
        let e = GameEvent::publish(EventKind::Social, "t", "title", "content");
        assert!(e.is_new());
        assert!(!e.is_locked());
        assert_eq!(e.kind(), EventKind::Social);
    }

    #[test]
    fn ids_are_unique() {
        let a = GameEvent::publish(EventKind::System, "t", "a", "a");
        let b = GameEvent::publish(EventKind::System, "t", "a", "a");
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn serde_uses_protocol_names() {
        let e = GameEvent::publish(EventKind::Secret, "t", "x", "y");
        let json = serde_json::to_value(&e).unwrap();
        assert_eq!(json["type"], "secret");
        assert_eq!(json["isNew"], true);
        assert_eq!(json["isLocked"], false);
    }

    #[test]
    fn initial_log_has_one_locked_entry() {
        let events = initial_events();
        assert_eq!(events.len(), 8);
        assert_eq!(events.iter().filter(|e| e.is_locked()).count(), 1);
        assert!(events[0].is_new());
    }
}
