//! The `事件更新` section: newly published events, in source order.

use babel_core::{EventKind, GameEvent};

use crate::diagnostics::{Diagnostic, Origin};
use crate::lexer::{self, Line, LineKind};
use crate::vocab::EVENT_SECTION;

const FIELDS: usize = 4;

/// Parse the event-updates section of a block body.
///
/// Each line is `type|timestamp|title|content`. Lines with fewer than four
/// fields or an unknown type are skipped; a fifth field and beyond are
/// kept as part of the content, minus trailing empty fields. Parsed events
/// are always new and unlocked.
pub fn parse_event_updates(body: &str) -> (Vec<GameEvent>, Vec<Diagnostic>) {
    let mut diagnostics = Vec::new();
    let events = events_from_lines(&lexer::lines(body), &mut diagnostics);
    (events, diagnostics)
}

pub(crate) fn events_from_lines(
    lines: &[Line<'_>],
    diagnostics: &mut Vec<Diagnostic>,
) -> Vec<GameEvent> {
    let Some(section) = lexer::section(lines, EVENT_SECTION) else {
        return Vec::new();
    };

    let mut events = Vec::new();
    for line in section {
        let LineKind::Item { fields } = &line.kind else {
            continue;
        };
        if fields.len() < FIELDS {
            tracing::warn!(
                line = line.text,
                fields = fields.len(),
                "event line too short; skipped"
            );
            let message = format!("event needs {FIELDS} fields, found {}", fields.len());
            diagnostics.push(
                Diagnostic::dropped(Origin::Events, line.span.clone(), message)
                    .with_label("expected `type|timestamp|title|content`"),
            );
            continue;
        }

        let kind = match fields[0].text.parse::<EventKind>() {
            Ok(kind) => kind,
            Err(e) => {
                tracing::warn!(kind = fields[0].text, "unknown event type; skipped");
                diagnostics.push(
                    Diagnostic::dropped(Origin::Events, fields[0].span.clone(), e.to_string())
                        .with_label("expected headline, social, secret or system"),
                );
                continue;
            }
        };

        // Content runs to the end of the last non-empty field, pipes included.
        let tail = &fields[FIELDS - 1..];
        let first = &tail[0];
        let last = tail.iter().rfind(|f| !f.text.is_empty()).unwrap_or(first);
        let content = &line.text[first.span.start - line.span.start
            ..last.span.end - line.span.start];

        events.push(GameEvent::publish(kind, fields[1].text, fields[2].text, content));
    }
    events
}
