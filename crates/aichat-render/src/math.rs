//! LaTeX math rendering via pulldown-latex → MathML

use markdown_weaver_escape::escape_html;
use pulldown_latex::{
    Parser, Storage, config::DisplayMode, config::RenderConfig, mathml::push_mathml,
};

/// How a math expression sits in the surrounding text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MathMode {
    /// `$...$`, flows with the text
    Inline,
    /// `$$...$$`, set on its own line
    Display,
}

impl MathMode {
    fn class(&self) -> &'static str {
        match self {
            MathMode::Inline => "math-inline",
            MathMode::Display => "math-display",
        }
    }
}

/// Result of attempting to render LaTeX math
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MathResult {
    /// Successfully rendered MathML
    Success(String),
    /// Rendering failed - contains fallback HTML with source and error message
    Error { html: String, message: String },
}

impl MathResult {
    /// HTML to splice into the message, whether or not rendering succeeded.
    pub fn into_html(self) -> String {
        match self {
            MathResult::Success(html) => html,
            MathResult::Error { html, .. } => html,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, MathResult::Success(_))
    }
}

/// Render LaTeX math to MathML
///
/// `latex` is the source without its `$` / `$$` delimiters.
pub fn render_math(latex: &str, mode: MathMode) -> MathResult {
    let storage = Storage::new();
    let parser = Parser::new(latex, &storage);
    let config = RenderConfig {
        display_mode: match mode {
            MathMode::Display => DisplayMode::Block,
            MathMode::Inline => DisplayMode::Inline,
        },
        ..Default::default()
    };

    let events: Vec<_> = parser.collect();
    let errors: Vec<String> = events
        .iter()
        .filter_map(|e| e.as_ref().err().map(|err| err.to_string()))
        .collect();

    if !errors.is_empty() {
        let message = errors.join("; ");
        tracing::debug!(%message, latex, "math parse failed, falling back to source");
        return MathResult::Error {
            html: format_error_html(latex, &message, mode),
            message,
        };
    }

    let mut mathml = String::new();
    if let Err(e) = push_mathml(&mut mathml, events.into_iter(), config) {
        let message = e.to_string();
        tracing::debug!(%message, latex, "mathml output failed, falling back to source");
        return MathResult::Error {
            html: format_error_html(latex, &message, mode),
            message,
        };
    }
    MathResult::Success(mathml)
}

fn format_error_html(latex: &str, error: &str, mode: MathMode) -> String {
    let mode_class = mode.class();
    let mut escaped_latex = String::new();
    let mut escaped_error = String::new();
    // These won't fail writing to String
    let _ = escape_html(&mut escaped_latex, latex);
    let _ = escape_html(&mut escaped_error, error);
    format!(
        r#"<span class="math math-error {mode_class}" title="{escaped_error}"><code>{escaped_latex}</code></span>"#
    )
}
