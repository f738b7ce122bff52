use logos::Logos;
use std::ops::Range;

/// Token type for a status-block body.
///
/// The body is a line-oriented mini-format. The lexer only separates the
/// punctuation the grammar cares about; labels and values are all `Text`
/// and get their meaning from the line classifier below.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token {
    /// Line break.
    #[token("\n")]
    Newline,

    /// Key/value separator. Narrators writing Chinese often use the
    /// full-width form.
    #[token(":")]
    #[token("：")]
    Colon,

    /// Field separator on list lines.
    #[token("|")]
    Pipe,

    /// Attribute separator inside a list field.
    #[token("=")]
    Equals,

    /// Any run of other characters, whitespace included.
    #[regex(r"[^:：|=\n]+")]
    Text,
}

/// A list-line field: trimmed text and its byte range in the body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field<'a> {
    /// Trimmed field text.
    pub text: &'a str,
    /// Byte range of `text` in the body.
    pub span: Range<usize>,
}

/// What a single body line is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineKind<'a> {
    /// Only whitespace.
    Blank,
    /// `key: value`, split on the first colon. Both sides trimmed.
    Pair {
        /// Label before the first colon.
        key: &'a str,
        /// Everything after the first colon.
        value: &'a str,
    },
    /// `- a|b|c`: a list item split on pipes.
    Item {
        /// Pipe-separated fields after the list marker.
        fields: Vec<Field<'a>>,
    },
    /// Anything else (prose, stray punctuation).
    Other,
}

/// A classified body line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line<'a> {
    /// Raw line text without the line break.
    pub text: &'a str,
    /// Byte range of `text` in the body.
    pub span: Range<usize>,
    /// Classification.
    pub kind: LineKind<'a>,
}

/// Lex a body into `(Token, Span)` pairs.
///
/// Every character belongs to some token, so lexing cannot fail; an error
/// from logos would only mean the token table is broken and is dropped.
pub fn lex(source: &str) -> Vec<(Token, Range<usize>)> {
    Token::lexer(source)
        .spanned()
        .filter_map(|(tok, span)| tok.ok().map(|t| (t, span)))
        .collect()
}

/// Lex and classify every line of a body.
pub fn lines(source: &str) -> Vec<Line<'_>> {
    let tokens = lex(source);
    let mut out = Vec::new();
    let mut start = 0;
    let mut line_tokens: Vec<(Token, Range<usize>)> = Vec::new();

    for (tok, span) in tokens {
        if tok == Token::Newline {
            out.push(classify(source, start..span.start, &line_tokens));
            line_tokens.clear();
            start = span.end;
        } else {
            line_tokens.push((tok, span));
        }
    }
    if start < source.len() || !line_tokens.is_empty() {
        out.push(classify(source, start..source.len(), &line_tokens));
    }
    out
}

fn classify<'a>(source: &'a str, span: Range<usize>, tokens: &[(Token, Range<usize>)]) -> Line<'a> {
    let text = &source[span.clone()];
    let kind = if text.trim().is_empty() {
        LineKind::Blank
    } else if let Some(marker_end) = list_marker_end(source, tokens) {
        LineKind::Item {
            fields: split_fields(source, marker_end, span.end, tokens),
        }
    } else if let Some((_, colon)) = tokens.iter().find(|(t, _)| *t == Token::Colon) {
        LineKind::Pair {
            key: source[span.start..colon.start].trim(),
            value: source[colon.end..span.end].trim(),
        }
    } else {
        LineKind::Other
    };
    Line { text, span, kind }
}

/// If the line opens with `-`, the byte offset just past the marker.
fn list_marker_end(source: &str, tokens: &[(Token, Range<usize>)]) -> Option<usize> {
    let (tok, span) = tokens.first()?;
    if *tok != Token::Text {
        return None;
    }
    let text = &source[span.clone()];
    let indent = text.len() - text.trim_start().len();
    text.trim_start()
        .starts_with('-')
        .then_some(span.start + indent + 1)
}

/// Split `[from, to)` on pipe tokens into trimmed fields.
fn split_fields<'a>(
    source: &'a str,
    from: usize,
    to: usize,
    tokens: &[(Token, Range<usize>)],
) -> Vec<Field<'a>> {
    let mut bounds: Vec<Range<usize>> = Vec::new();
    let mut cursor = from;
    for (_, span) in tokens.iter().filter(|(t, s)| *t == Token::Pipe && s.start >= from) {
        bounds.push(cursor..span.start);
        cursor = span.end;
    }
    bounds.push(cursor..to);

    bounds
        .into_iter()
        .map(|range| {
            let raw = &source[range.clone()];
            let lead = raw.len() - raw.trim_start().len();
            let text = raw.trim();
            let start = range.start + lead;
            Field {
                text,
                span: start..start + text.len(),
            }
        })
        .collect()
}

/// The lines of the section introduced by a `header:` line.
///
/// The section runs over list items and blank lines and stops at the first
/// line of any other kind. Returns `None` if the header never appears.
pub fn section<'s, 'a>(lines: &'s [Line<'a>], header: &str) -> Option<&'s [Line<'a>]> {
    let pos = lines
        .iter()
        .position(|l| matches!(l.kind, LineKind::Pair { key, .. } if key == header))?;
    let rest = &lines[pos + 1..];
    let len = rest
        .iter()
        .position(|l| !matches!(l.kind, LineKind::Item { .. } | LineKind::Blank))
        .unwrap_or(rest.len());
    Some(&rest[..len])
}
