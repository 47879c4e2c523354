//! Splitting assistant output into reply and `<think>` segments.

use regex_lite::Regex;
use std::sync::LazyLock;

/// Non-greedy, `.` matches newlines. Unterminated tags never match.
pub static THINK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<think>(.*?)</think>").unwrap());

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentKind {
    /// Regular reply text
    Reply,
    /// Contents of a `<think>` block, tags stripped
    Think,
}

/// A slice of an assistant message, in document order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment<'a> {
    pub kind: SegmentKind,
    pub text: &'a str,
}

impl<'a> Segment<'a> {
    pub fn reply(text: &'a str) -> Self {
        Self {
            kind: SegmentKind::Reply,
            text,
        }
    }

    pub fn think(text: &'a str) -> Self {
        Self {
            kind: SegmentKind::Think,
            text,
        }
    }
}

/// Split `text` into reply and think segments.
///
/// Empty reply spans (between adjacent think blocks, or at either end) are
/// dropped. Think spans are kept even when blank; the renderer decides what
/// to do with those.
pub fn split_segments(text: &str) -> Vec<Segment<'_>> {
    let mut segments = Vec::new();
    let mut last = 0;

    for caps in THINK_RE.captures_iter(text) {
        let (Some(whole), Some(inner)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        if whole.start() > last {
            segments.push(Segment::reply(&text[last..whole.start()]));
        }
        segments.push(Segment::think(inner.as_str()));
        last = whole.end();
    }

    if last < text.len() {
        segments.push(Segment::reply(&text[last..]));
    }

    segments
}

/// Whether `text` contains at least one complete think block.
pub fn has_think(text: &str) -> bool {
    THINK_RE.is_match(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_think_is_single_reply() {
        assert_eq!(split_segments("hello"), vec![Segment::reply("hello")]);
    }

    #[test]
    fn empty_input_has_no_segments() {
        assert!(split_segments("").is_empty());
    }

    #[test]
    fn reply_think_reply() {
        assert_eq!(
            split_segments("A<think>B</think>C"),
            vec![Segment::reply("A"), Segment::think("B"), Segment::reply("C")]
        );
    }

    #[test]
    fn multiple_think_blocks_keep_order() {
        let segments = split_segments("<think>one</think>mid<think>two</think>end");
        assert_eq!(
            segments,
            vec![
                Segment::think("one"),
                Segment::reply("mid"),
                Segment::think("two"),
                Segment::reply("end"),
            ]
        );
    }

    #[test]
    fn adjacent_think_blocks() {
        let segments = split_segments("<think>a</think><think>b</think>");
        assert_eq!(segments, vec![Segment::think("a"), Segment::think("b")]);
    }

    #[test]
    fn think_spans_newlines() {
        let segments = split_segments("<think>\nline one\n\nline two\n</think>\nanswer");
        assert_eq!(segments.len(), 2);
        assert_eq!(segments[0], Segment::think("\nline one\n\nline two\n"));
        assert_eq!(segments[1], Segment::reply("\nanswer"));
    }

    #[test]
    fn non_greedy_match() {
        // Greedy matching would swallow "x" into a single think block.
        let segments = split_segments("<think>a</think>x<think>b</think>");
        assert_eq!(segments[1], Segment::reply("x"));
    }

    #[test]
    fn unterminated_tag_is_plain_text() {
        let text = "before<think>still thinking";
        assert!(!has_think(text));
        assert_eq!(split_segments(text), vec![Segment::reply(text)]);
    }

    #[test]
    fn stray_close_tag_is_plain_text() {
        let text = "answer</think> more";
        assert_eq!(split_segments(text), vec![Segment::reply(text)]);
    }
}
