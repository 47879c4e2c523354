//! Render-once message rendering.
//!
//! A chat message carries its original text base64 encoded in a raw slot and
//! an initially empty formatted slot. Rendering fills the formatted slot the
//! first time and leaves it alone after that.

use crate::config::RendererConfig;
use crate::markdown::MarkdownPipeline;
use crate::payload::{Role, decode_raw};
use crate::think::{SegmentKind, split_segments};
use crate::RenderError;

/// Access to one chat message element.
///
/// Implemented over the DOM in the browser crate and over plain structs in
/// tests.
pub trait MessageElement {
    fn role(&self) -> Role;

    /// Contents of the raw slot, `None` if the slot is missing.
    fn raw_payload(&self) -> Option<String>;

    /// Current HTML of the formatted slot, `None` if the slot is missing.
    fn formatted_html(&self) -> Option<String>;

    fn set_formatted_html(&mut self, html: &str);
}

/// What `MessageRenderer::render` did with a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderOutcome {
    Rendered,
    /// The formatted slot already had content
    AlreadyRendered,
}

/// Turns decoded message text into HTML according to its role.
#[derive(Debug)]
pub struct MessageRenderer {
    config: RendererConfig,
    markdown: MarkdownPipeline,
}

impl MessageRenderer {
    pub fn new(config: RendererConfig) -> Self {
        let markdown = MarkdownPipeline::from_config(&config);
        Self { config, markdown }
    }

    /// Use a custom Markdown pipeline, e.g. one with extra classifiers.
    pub fn with_pipeline(config: RendererConfig, markdown: MarkdownPipeline) -> Self {
        Self { config, markdown }
    }

    pub fn config(&self) -> &RendererConfig {
        &self.config
    }

    pub fn markdown(&self) -> &MarkdownPipeline {
        &self.markdown
    }

    /// Render a message in place unless it has already been rendered.
    ///
    /// On error the formatted slot is left untouched.
    pub fn render<M: MessageElement + ?Sized>(
        &self,
        message: &mut M,
    ) -> Result<RenderOutcome, RenderError> {
        let formatted = message
            .formatted_html()
            .ok_or(RenderError::MissingFormattedSlot)?;
        if !formatted.is_empty() {
            return Ok(RenderOutcome::AlreadyRendered);
        }

        let raw = message.raw_payload().ok_or(RenderError::MissingRawSlot)?;
        let text = decode_raw(&raw)?;
        let role = message.role();
        let html = self.render_text(role, &text);
        tracing::debug!(%role, bytes = html.len(), "rendered message");
        message.set_formatted_html(&html);
        Ok(RenderOutcome::Rendered)
    }

    /// Render already decoded text for `role`.
    ///
    /// User text is trusted and written verbatim; it is sanitized upstream.
    pub fn render_text(&self, role: Role, text: &str) -> String {
        if role.is_markdown() {
            self.render_assistant(text)
        } else {
            text.to_owned()
        }
    }

    /// Markdown with `<think>` blocks wrapped in their own container.
    pub fn render_assistant(&self, text: &str) -> String {
        if !self.config.think.enabled {
            return self.markdown.render(text);
        }

        let mut html = String::new();
        for segment in split_segments(text) {
            match segment.kind {
                SegmentKind::Reply => self.markdown.render_into(&mut html, segment.text),
                SegmentKind::Think => {
                    if segment.text.trim().is_empty() {
                        continue;
                    }
                    html.push_str(&self.think_open());
                    self.markdown.render_into(&mut html, segment.text);
                    html.push_str("</div>\n");
                }
            }
        }
        html
    }

    fn think_open(&self) -> String {
        let mut class = String::new();
        let _ = markdown_weaver_escape::escape_html(&mut class, &self.config.think.class);
        format!("<div class=\"{class}\">\n")
    }
}

impl Default for MessageRenderer {
    fn default() -> Self {
        Self::new(RendererConfig::default())
    }
}
