//! Message rendering for the aichat web interface.
//!
//! Chat messages arrive in the page with their text base64 encoded. This
//! crate decodes that text and turns it into HTML:
//!
//! - user messages are written back verbatim
//! - assistant and system messages are rendered as Markdown, with
//!   `<think>` blocks split out into their own container and `$...$` /
//!   `$$...$$` code spans typeset as MathML
//!
//! Nothing in here touches the DOM. The browser crate implements
//! [`MessageElement`] over real elements.

pub mod classify;
pub mod config;
pub mod error;
pub mod markdown;
pub mod math;
pub mod message;
pub mod payload;
pub mod think;

pub use classify::{CodeSegment, SegmentClassifier};
pub use config::{MarkdownConfig, RendererConfig, ThinkConfig};
pub use error::RenderError;
pub use markdown::MarkdownPipeline;
pub use math::{MathMode, MathResult, render_math};
pub use message::{MessageElement, MessageRenderer, RenderOutcome};
pub use payload::{RawPayload, Role, decode_raw, encode_raw};
pub use think::{Segment, SegmentKind, split_segments};

/// Render Markdown with the default pipeline.
pub fn render_markdown(markdown: &str) -> String {
    MarkdownPipeline::default().render(markdown)
}
