//! Locating the fenced status block inside a narrator response.
//!
//! A block opens with ```` ```status ```` followed by optional whitespace
//! and a line break, and closes at the next ```` ``` ````. The first such
//! block wins. An opening fence with no closing fence (a truncated reply)
//! is treated as no block at all: the partial fence stays in the narrative
//! and nothing is parsed from it.

use std::ops::Range;

use crate::vocab::STATUS_TAG;

const FENCE: &str = "```";

/// The located block body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Block<'a> {
    /// Body text between the fences, trimmed.
    pub body: &'a str,
    /// Byte offset of `body` in the response.
    pub offset: usize,
}

/// Result of splitting a response into narrative and status block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extracted<'a> {
    /// Narrative with the block removed, trimmed.
    pub content: String,
    /// The block body, if a complete block was found.
    pub block: Option<Block<'a>>,
    /// Span of an opening fence that was never closed.
    pub unterminated: Option<Range<usize>>,
}

/// Split a response into narrative text and the status block body.
///
/// Pure and total: any input terminates and produces a result.
pub fn extract_block(response: &str) -> Extracted<'_> {
    let open = format!("{FENCE}{STATUS_TAG}");
    let mut search = 0;

    while let Some(rel) = response[search..].find(&open) {
        let start = search + rel;
        let after_tag = start + open.len();
        let rest = &response[after_tag..];
        let ws = &rest[..rest.len() - rest.trim_start().len()];

        // The tag must be followed by whitespace that includes a line break.
        let Some(nl) = ws.rfind('\n') else {
            search = after_tag;
            continue;
        };

        let body_start = after_tag + nl + 1;
        let Some(close_rel) = response[body_start..].find(FENCE) else {
            tracing::debug!(at = start, "status fence never closed; ignoring block");
            return Extracted {
                content: response.trim().to_string(),
                block: None,
                unterminated: Some(start..after_tag),
            };
        };
        let body_end = body_start + close_rel;
        let end = body_end + FENCE.len();

        let raw_body = &response[body_start..body_end];
        let lead = raw_body.len() - raw_body.trim_start().len();
        let mut content = String::with_capacity(response.len() - (end - start));
        content.push_str(&response[..start]);
        content.push_str(&response[end..]);

        return Extracted {
            content: content.trim().to_string(),
            block: Some(Block {
                body: raw_body.trim(),
                offset: body_start + lead,
            }),
            unterminated: None,
        };
    }

    Extracted {
        content: response.trim().to_string(),
        block: None,
        unterminated: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn strips_block_between_prefix_and_suffix() {
        let ex = extract_block("prefix\n```status\nKEY: V\n```\nsuffix");
        assert_eq!(ex.content, "prefix\n\nsuffix");
        assert_eq!(ex.block.unwrap().body, "KEY: V");
    }

    #[test]
    fn offset_points_at_body() {
        let response = "text\n```status  \n\n  时间: 早上\n```";
        let ex = extract_block(response);
        let block = ex.block.unwrap();
        assert_eq!(&response[block.offset..block.offset + block.body.len()], block.body);
        assert_eq!(block.body, "时间: 早上");
        assert_eq!(ex.content, "text");
    }

    #[test]
    fn no_block() {
        let ex = extract_block("  just prose  ");
        assert_eq!(ex.content, "just prose");
        assert!(ex.block.is_none());
        assert!(ex.unterminated.is_none());
    }

    #[test]
    fn unterminated_block_is_absent() {
        let response = "prose\n```status\n时间: 早上\n怀疑度: 40";
        let ex = extract_block(response);
        assert!(ex.block.is_none());
        assert_eq!(ex.content, response);
        assert_eq!(ex.unterminated, Some(6..15));
    }

    #[test]
    fn tag_must_end_its_line() {
        // "```statusbar" is not a status fence; the later one is.
        let ex = extract_block("```statusbar\n```\n```status\n银币: 3\n```");
        assert_eq!(ex.block.unwrap().body, "银币: 3");
        assert_eq!(ex.content, "```statusbar\n```");
    }

    #[test]
    fn first_block_wins() {
        let ex = extract_block("```status\n银币: 1\n```\n```status\n银币: 2\n```");
        assert_eq!(ex.block.unwrap().body, "银币: 1");
        assert_eq!(ex.content, "```status\n银币: 2\n```");
    }

    #[test]
    fn empty_body() {
        let ex = extract_block("a\n```status\n```");
        assert_eq!(ex.block.unwrap().body, "");
        assert_eq!(ex.content, "a");
    }

    #[test]
    fn crlf_fence() {
        let ex = extract_block("a\r\n```status\r\n天气: 雨\r\n```\r\nb");
        assert_eq!(ex.block.unwrap().body, "天气: 雨");
        assert_eq!(ex.content, "a\r\n\r\nb");
    }

    proptest! {
        #[test]
        fn always_terminates(s in ".*") {
            let ex = extract_block(&s);
            if ex.block.is_none() {
                prop_assert_eq!(ex.content, s.trim());
            }
        }

        #[test]
        fn finds_embedded_block(prefix in "[a-z ]{0,20}", body in "[a-z]{1,10}: [0-9]{1,3}") {
            let response = format!("{prefix}\n```status\n{body}\n```\ntail");
            let ex = extract_block(&response);
            prop_assert_eq!(ex.block.map(|b| b.body), Some(body.as_str()));
        }
    }
}
