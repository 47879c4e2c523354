//! Errors raised while turning a raw message payload into HTML.

use miette::Diagnostic;

/// A single message failed to render.
///
/// Failures are scoped to the message they came from. Callers log them and
/// move on to the next message, leaving the formatted slot empty.
#[derive(thiserror::Error, Debug, Diagnostic)]
pub enum RenderError {
    /// The raw slot did not hold valid base64
    #[error("raw payload is not valid base64: {0}")]
    #[diagnostic(
        code(aichat::render::base64),
        help("the server encodes message text with the standard base64 alphabet")
    )]
    InvalidBase64(#[from] base64::DecodeError),

    /// The decoded bytes were not UTF-8 text
    #[error("raw payload decoded to invalid UTF-8")]
    #[diagnostic(code(aichat::render::utf8))]
    InvalidUtf8(#[from] std::string::FromUtf8Error),

    /// The message element has no raw child
    #[error("message has no raw payload slot")]
    #[diagnostic(code(aichat::render::missing_raw))]
    MissingRawSlot,

    /// The message element has no formatted child to write into
    #[error("message has no formatted output slot")]
    #[diagnostic(code(aichat::render::missing_formatted))]
    MissingFormattedSlot,
}
