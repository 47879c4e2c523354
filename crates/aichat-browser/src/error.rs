use miette::Diagnostic;

/// Failure to attach the chat view to the page.
#[derive(thiserror::Error, Debug, Diagnostic)]
pub enum MountError {
    #[error("no global window")]
    #[diagnostic(code(aichat::mount::window))]
    NoWindow,

    #[error("window has no document")]
    #[diagnostic(code(aichat::mount::document))]
    NoDocument,

    #[error("document has no body to listen on")]
    #[diagnostic(
        code(aichat::mount::body),
        help("call mount after DOMContentLoaded")
    )]
    NoBody,

    #[error("invalid chat view config: {0}")]
    #[diagnostic(code(aichat::mount::config))]
    Config(String),
}
