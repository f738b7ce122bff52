//! Single-line `key: value` fields.

use babel_core::Percent;

use crate::diagnostics::{Diagnostic, Origin};
use crate::lexer::{self, Line, LineKind};
use crate::status::ParsedStatus;
use crate::vocab::ScalarKey;

/// Parse the leading integer of a value: optional sign, then decimal
/// digits. Anything after the digits is ignored (`"45%"` is 45). Returns
/// `None` when there are no leading digits. Magnitudes beyond `i64`
/// saturate.
pub fn leading_int(value: &str) -> Option<i64> {
    let s = value.trim_start();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let len = digits.bytes().take_while(u8::is_ascii_digit).count();
    if len == 0 {
        return None;
    }
    let magnitude = digits[..len].bytes().fold(0i64, |acc, d| {
        acc.saturating_mul(10).saturating_add(i64::from(d - b'0'))
    });
    Some(if negative { -magnitude } else { magnitude })
}

/// Parse the scalar fields of a block body.
///
/// Unknown labels and lines without a colon are ignored. A non-numeric
/// value for a numeric field leaves that field absent and yields a warning.
pub fn parse_scalars(body: &str) -> (ParsedStatus, Vec<Diagnostic>) {
    let mut status = ParsedStatus::default();
    let mut diagnostics = Vec::new();
    apply_scalars(&lexer::lines(body), &mut status, &mut diagnostics);
    (status, diagnostics)
}

pub(crate) fn apply_scalars(
    lines: &[Line<'_>],
    status: &mut ParsedStatus,
    diagnostics: &mut Vec<Diagnostic>,
) {
    for line in lines {
        let LineKind::Pair { key, value } = line.kind else {
            continue;
        };
        let Some(field) = ScalarKey::from_label(key) else {
            continue;
        };
        if value.is_empty() {
            tracing::debug!(key, "empty status value ignored");
            continue;
        }

        let text = || Some(value.to_string());
        match field {
            ScalarKey::Time => status.time = text(),
            ScalarKey::Period => status.period = text(),
            ScalarKey::Location => status.location = text(),
            ScalarKey::Weather => status.weather = text(),
            ScalarKey::Clothing => status.clothing = text(),
            ScalarKey::Action(slot) => status.actions.set(slot, value),
            ScalarKey::Coins => {
                if let Some(n) = number(line, key, value, diagnostics) {
                    status.coins = Some(n);
                }
            }
            ScalarKey::EmpireContribution => {
                if let Some(n) = number(line, key, value, diagnostics) {
                    status.empire_contribution = Some(Percent::clamped(n));
                }
            }
            ScalarKey::ClubContribution => {
                if let Some(n) = number(line, key, value, diagnostics) {
                    status.club_contribution = Some(Percent::clamped(n));
                }
            }
            ScalarKey::Suspicion => {
                if let Some(n) = number(line, key, value, diagnostics) {
                    status.suspicion = Some(Percent::clamped(n));
                }
            }
        }
    }
}

fn number(
    line: &Line<'_>,
    key: &str,
    value: &str,
    diagnostics: &mut Vec<Diagnostic>,
) -> Option<i64> {
    let parsed = leading_int(value);
    if parsed.is_none() {
        tracing::warn!(key, value, "non-numeric status value dropped");
        diagnostics.push(
            Diagnostic::dropped(
                Origin::Field,
                line.span.clone(),
                format!("`{key}` expects a number"),
            )
                .with_label(format!("`{value}` is not a number; field left unchanged")),
        );
    }
    parsed
}
