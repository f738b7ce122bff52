//! Notes about status lines the parsers dropped, and their terminal rendering.
//!
//! The parser never fails on narrator output. Whatever it cannot use is
//! skipped and reported here, tagged with the part of the block it came
//! from so the renderer can say what still applied.

use ariadne::{Color, Config, IndexType, Label, Report, ReportKind, Source};
use std::fmt;
use std::ops::Range;

use crate::vocab::{CHARACTER_SECTION, EVENT_SECTION, STATUS_TAG};

/// Severity level for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// The block could not be used at all.
    Error,
    /// A line or field was dropped; the rest of the block still applies.
    Warning,
}

/// The part of a status block a diagnostic points into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    /// The ```` ```status ```` fence itself.
    Fence,
    /// A single-line `key: value` field.
    Field,
    /// A line of the character-dynamics list.
    Characters,
    /// A line of the event-updates list.
    Events,
}

impl Origin {
    /// Short name used in one-line output.
    pub fn name(self) -> &'static str {
        match self {
            Self::Fence => STATUS_TAG,
            Self::Field => "fields",
            Self::Characters => CHARACTER_SECTION,
            Self::Events => EVENT_SECTION,
        }
    }

    /// What the player still gets despite the problem.
    fn consequence(self) -> String {
        match self {
            Self::Fence => "the reply is shown as narrative only; no status is applied".to_string(),
            Self::Field => "the other status fields still apply".to_string(),
            Self::Characters | Self::Events => {
                format!("the rest of the {} list still applies", self.name())
            }
        }
    }
}

/// A note about something the parser skipped, with its source location.
///
/// Spans are byte ranges into the text that was parsed: the block body for
/// the per-section parsers, the whole response for [`crate::parse_response`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// How serious the problem is.
    pub severity: Severity,
    /// Where in the block the problem sits.
    pub origin: Origin,
    /// Byte range of the offending text.
    pub span: Range<usize>,
    /// What went wrong.
    pub message: String,
    /// Optional label text shown under the span.
    pub label: Option<String>,
}

impl Diagnostic {
    /// An opening fence with no closing fence. Nothing in the block applies.
    pub fn unclosed_block(span: Range<usize>) -> Self {
        Self {
            severity: Severity::Error,
            origin: Origin::Fence,
            span,
            message: "status block is never closed".to_string(),
            label: Some("reply looks truncated".to_string()),
        }
    }

    /// A line or field that was dropped.
    pub fn dropped(origin: Origin, span: Range<usize>, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            origin,
            span,
            message: message.into(),
            label: None,
        }
    }

    /// Attach a label.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Move the span forward by `offset` bytes.
    pub fn shifted(mut self, offset: usize) -> Self {
        self.span = self.span.start + offset..self.span.end + offset;
        self
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let prefix = match self.severity {
            Severity::Error => "error",
            Severity::Warning => "warning",
        };
        write!(f, "{prefix} [{}]: {}", self.origin.name(), self.message)
    }
}

/// Error and warning counts of one parse.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Tally {
    /// Blocks that could not be used.
    pub errors: usize,
    /// Lines or fields dropped.
    pub warnings: usize,
}

impl Tally {
    /// Count diagnostics by severity.
    pub fn of(diagnostics: &[Diagnostic]) -> Self {
        diagnostics.iter().fold(Self::default(), |mut t, d| {
            match d.severity {
                Severity::Error => t.errors += 1,
                Severity::Warning => t.warnings += 1,
            }
            t
        })
    }
}

impl fmt::Display for Tally {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let plural = |n: usize| if n == 1 { "" } else { "s" };
        if self.errors > 0 {
            write!(f, "{} error{}, ", self.errors, plural(self.errors))?;
        }
        write!(f, "{} warning{}", self.warnings, plural(self.warnings))
    }
}

/// Render diagnostics against the full reply using ariadne.
///
/// Spans are byte offsets, so the reply's CJK text lines up.
pub fn render_diagnostics(source: &str, filename: &str, diagnostics: &[Diagnostic]) -> String {
    let mut output = Vec::new();

    for diag in diagnostics {
        let (kind, color) = match diag.severity {
            Severity::Error => (ReportKind::Error, Color::Red),
            Severity::Warning => (ReportKind::Warning, Color::Yellow),
        };

        let label_text = diag.label.as_deref().unwrap_or(&diag.message);
        Report::build(kind, (filename, diag.span.clone()))
            .with_config(Config::default().with_index_type(IndexType::Byte))
            .with_message(format!("{} (in {})", diag.message, diag.origin.name()))
            .with_label(
                Label::new((filename, diag.span.clone()))
                    .with_message(label_text)
                    .with_color(color),
            )
            .with_note(diag.origin.consequence())
            .finish()
            .write((filename, Source::from(source)), &mut output)
            .ok();
    }

    String::from_utf8(output).unwrap_or_default()
}
