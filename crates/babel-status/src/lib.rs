//! The status protocol: narrator replies carry a fenced ```` ```status ````
//! block of labelled lines. This crate finds that block, parses it into a
//! [`ParsedStatus`] and reports what it had to skip.
//!
//! Parsing never fails on content. Whatever cannot be read is dropped
//! line by line and described by a [`Diagnostic`].

/// Diagnostics and ariadne rendering.
pub mod diagnostics;
/// Character-dynamics section parser.
pub mod dynamics;
/// Event-updates section parser.
pub mod events;
/// Fenced block extraction.
pub mod extract;
/// Line lexer and classifier.
pub mod lexer;
/// Scalar field parser.
pub mod scalar;
/// The parse result type.
pub mod status;
/// Label vocabulary.
pub mod vocab;

pub use diagnostics::{Diagnostic, Origin, Severity, Tally, render_diagnostics};
pub use dynamics::parse_character_dynamics;
pub use events::parse_event_updates;
pub use extract::{Block, Extracted, extract_block};
pub use scalar::{leading_int, parse_scalars};
pub use status::{ActionSlots, ParsedStatus};

/// A whole narrator reply, split and parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusParse {
    /// Narrative with the block removed, trimmed.
    pub content: String,
    /// Parsed block, or `None` when the reply had no complete block.
    pub status: Option<ParsedStatus>,
    /// Problems found, with spans into the whole reply.
    pub diagnostics: Vec<Diagnostic>,
}

impl StatusParse {
    /// Whether any diagnostic is an error.
    pub fn has_errors(&self) -> bool {
        Tally::of(&self.diagnostics).errors > 0
    }
}

/// Parse a block body into every field it reports.
///
/// The body is lexed once and each section parser runs over the same
/// lines. Diagnostic spans are relative to `body`.
pub fn parse_status(body: &str) -> (ParsedStatus, Vec<Diagnostic>) {
    let lines = lexer::lines(body);
    let mut diagnostics = Vec::new();
    let mut status = ParsedStatus::default();

    scalar::apply_scalars(&lines, &mut status, &mut diagnostics);
    status.character_dynamics = dynamics::dynamics_from_lines(&lines, &mut diagnostics);
    status.event_updates = events::events_from_lines(&lines, &mut diagnostics);

    (status, diagnostics)
}

/// Extract and parse the status block of a full narrator reply.
pub fn parse_response(raw: &str) -> StatusParse {
    let extracted = extract_block(raw);
    let mut diagnostics = Vec::new();

    if let Some(span) = extracted.unterminated {
        diagnostics.push(Diagnostic::unclosed_block(span));
    }

    let status = extracted.block.map(|block| {
        let (status, diags) = parse_status(block.body);
        diagnostics.extend(diags.into_iter().map(|d| d.shifted(block.offset)));
        status
    });

    tracing::debug!(
        has_block = status.is_some(),
        diagnostics = diagnostics.len(),
        content_len = extracted.content.len(),
        "parsed narrator reply"
    );

    StatusParse {
        content: extracted.content,
        status,
        diagnostics,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use babel_core::{EventKind, Percent};

    const REPLY: &str = "\
钟声响起，你走进图书馆。

```status
时间: 14:00
时段: 下午
地点: 巴别塔-图书馆
银币: 48
怀疑度: 150
行动1: 查阅古籍
行动2: 与埃莉诺交谈
行动3: 离开
角色动态:
- 埃莉诺|位置=巴别塔-图书馆|行动=看书|好感度=47
事件更新:
- system|14:00|怀疑上升|巡视员注意到了你
```
";

    #[test]
    fn full_reply() {
        let parse = parse_response(REPLY);
        assert_eq!(parse.content, "钟声响起，你走进图书馆。");
        assert!(parse.diagnostics.is_empty());

        let status = parse.status.unwrap();
        assert_eq!(status.time.as_deref(), Some("14:00"));
        assert_eq!(status.coins, Some(48));
        assert_eq!(status.suspicion, Some(Percent::MAX));
        assert!(status.actions.complete().is_some());
        let chars = status.character_dynamics.unwrap();
        assert_eq!(chars["埃莉诺"].activity, "看书");
        assert_eq!(status.event_updates.len(), 1);
        assert_eq!(status.event_updates[0].kind(), EventKind::System);
    }

    #[test]
    fn narrative_only_reply() {
        let parse = parse_response("  只是叙述。 ");
        assert_eq!(parse.content, "只是叙述。");
        assert!(parse.status.is_none());
        assert!(parse.diagnostics.is_empty());
    }

    #[test]
    fn truncated_reply_reports_error() {
        let parse = parse_response("叙述\n```status\n怀疑度: 90");
        assert!(parse.status.is_none());
        assert!(parse.has_errors());
        assert_eq!(parse.diagnostics[0].origin, Origin::Fence);
    }

    #[test]
    fn diagnostic_spans_point_into_reply() {
        let raw = "x\n```status\n事件更新:\n- rumor|t|a|b\n```";
        let parse = parse_response(raw);
        assert_eq!(parse.diagnostics.len(), 1);
        assert_eq!(&raw[parse.diagnostics[0].span.clone()], "rumor");
        assert_eq!(parse.diagnostics[0].origin, Origin::Events);
    }

    #[test]
    fn diagnostics_tagged_by_section() {
        let raw = "x\n```status\n银币: 很多\n角色动态:\n- 埃莉诺\n事件更新:\n- social|t\n```";
        let parse = parse_response(raw);
        let origins: Vec<_> = parse.diagnostics.iter().map(|d| d.origin).collect();
        assert_eq!(origins, [Origin::Field, Origin::Characters, Origin::Events]);
        assert_eq!(Tally::of(&parse.diagnostics), Tally { errors: 0, warnings: 3 });
    }

    #[test]
    fn parse_status_combines_sections() {
        let (status, _) = parse_status("天气: 雾\n角色动态:\n- 源结月|位置=庭院\n事件更新:\n- social|t|a|b");
        assert_eq!(status.weather.as_deref(), Some("雾"));
        assert!(status.character_dynamics.is_some());
        assert_eq!(status.event_updates.len(), 1);
    }
}
