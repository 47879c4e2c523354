//! Segment classifiers for code spans and code blocks.
//!
//! The Markdown pipeline hands every inline code span and every code block to
//! its classifiers in order. The first one that claims the segment supplies
//! replacement HTML; unclaimed segments are written out as ordinary code.

use regex_lite::Regex;
use std::sync::LazyLock;

use crate::math::{MathMode, render_math};

static DISPLAY_MATH_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\$\$((?:[^$]|\$[^$])+)\$\$$").unwrap());

static INLINE_MATH_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\$([^$]+)\$$").unwrap());

/// Fence languages whose whole body is display math.
const MATH_FENCE_LANGS: &[&str] = &["math", "latex", "tex"];

/// Code content as it came out of the parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodeSegment<'a> {
    /// `` `...` `` inside running text
    Inline(&'a str),
    /// Fenced or indented block. `lang` is the first word of the fence info.
    Block {
        lang: Option<&'a str>,
        content: &'a str,
    },
}

impl<'a> CodeSegment<'a> {
    pub fn content(&self) -> &'a str {
        match self {
            CodeSegment::Inline(text) => *text,
            CodeSegment::Block { content, .. } => *content,
        }
    }

    pub fn is_inline(&self) -> bool {
        matches!(self, CodeSegment::Inline(_))
    }
}

/// Decides whether a code segment should be rendered as something else.
pub trait SegmentClassifier {
    /// Short name for logs.
    fn name(&self) -> &'static str;

    /// Replacement HTML, or `None` to leave the segment to the next
    /// classifier.
    fn classify(&self, segment: &CodeSegment<'_>) -> Option<String>;
}

/// Pull the LaTeX out of `$$...$$`.
pub fn match_display_math(text: &str) -> Option<&str> {
    DISPLAY_MATH_RE
        .captures(text.trim())
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim())
        .filter(|latex| !latex.is_empty())
}

/// Pull the LaTeX out of `$...$`.
pub fn match_inline_math(text: &str) -> Option<&str> {
    INLINE_MATH_RE
        .captures(text.trim())
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim())
        .filter(|latex| !latex.is_empty())
}

/// `$$...$$` spans and blocks, plus ```` ```math ```` fences.
#[derive(Debug, Default, Clone, Copy)]
pub struct DisplayMathClassifier;

impl SegmentClassifier for DisplayMathClassifier {
    fn name(&self) -> &'static str {
        "display-math"
    }

    fn classify(&self, segment: &CodeSegment<'_>) -> Option<String> {
        let latex = match segment {
            CodeSegment::Block {
                lang: Some(lang),
                content,
            } if MATH_FENCE_LANGS.contains(lang) => {
                Some(content.trim()).filter(|latex| !latex.is_empty())
            }
            _ => match_display_math(segment.content()),
        }?;

        let html = render_math(latex, MathMode::Display).into_html();
        if segment.is_inline() {
            Some(html)
        } else {
            Some(format!("{html}\n"))
        }
    }
}

/// `$...$` code spans.
#[derive(Debug, Default, Clone, Copy)]
pub struct InlineMathClassifier;

impl SegmentClassifier for InlineMathClassifier {
    fn name(&self) -> &'static str {
        "inline-math"
    }

    fn classify(&self, segment: &CodeSegment<'_>) -> Option<String> {
        match segment {
            CodeSegment::Inline(text) => {
                let latex = match_inline_math(text)?;
                Some(render_math(latex, MathMode::Inline).into_html())
            }
            CodeSegment::Block { .. } => None,
        }
    }
}

/// The classifier list used when math is enabled, display before inline.
pub fn math_classifiers() -> Vec<Box<dyn SegmentClassifier>> {
    vec![Box::new(DisplayMathClassifier), Box::new(InlineMathClassifier)]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_math_delimiters() {
        assert_eq!(match_display_math("$$x^2$$"), Some("x^2"));
        assert_eq!(match_display_math("$$\n\\sum_i x_i\n$$\n"), Some(r"\sum_i x_i"));
        assert_eq!(match_display_math("$x$"), None);
        assert_eq!(match_display_math("$$$$"), None);
        assert_eq!(match_display_math("let a = $$b$$ + 1"), None);
        assert_eq!(match_display_math("$$a$$ and $$b$$"), None);
        assert_eq!(match_display_math("$$a$ b$$"), Some("a$ b"));
    }

    #[test]
    fn inline_math_delimiters() {
        assert_eq!(match_inline_math("$x^2$"), Some("x^2"));
        assert_eq!(match_inline_math("$a$ and $b$"), None);
        assert_eq!(match_inline_math("price: $5"), None);
        assert_eq!(match_inline_math("$ $"), None);
    }

    #[test]
    fn inline_classifier_ignores_blocks() {
        let segment = CodeSegment::Block {
            lang: None,
            content: "$x$",
        };
        assert!(InlineMathClassifier.classify(&segment).is_none());
    }

    #[test]
    fn display_classifier_claims_math_fence() {
        let segment = CodeSegment::Block {
            lang: Some("math"),
            content: "x^2\n",
        };
        let html = DisplayMathClassifier.classify(&segment).unwrap();
        assert!(html.contains("<math"));
        assert!(html.ends_with('\n'));
    }

    #[test]
    fn display_classifier_leaves_regular_code() {
        let segment = CodeSegment::Block {
            lang: Some("rust"),
            content: "fn main() {}\n",
        };
        assert!(DisplayMathClassifier.classify(&segment).is_none());
        assert!(DisplayMathClassifier
            .classify(&CodeSegment::Inline("let x = 1;"))
            .is_none());
    }

    #[test]
    fn two_display_formulas_in_one_span_stay_code() {
        let segment = CodeSegment::Inline("$$a$$ and $$b$$");
        assert!(DisplayMathClassifier.classify(&segment).is_none());
        assert!(InlineMathClassifier.classify(&segment).is_none());
    }
}
