//! WASM bindings for the aichat browser layer.
//!
//! The page calls `mount()` once after load; htmx and the server-triggered
//! events drive everything after that. The standalone render functions are
//! for pages that want to render message text themselves.

use aichat_browser::{ChatViewConfig, MountError};
use aichat_render::{MathMode, MathResult, MessageRenderer, RenderError, Role, decode_raw};
use wasm_bindgen::prelude::*;

mod types;

pub use types::*;

/// Initialize panic hook and console logging.
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
    init_tracing();
}

#[cfg(all(target_arch = "wasm32", target_os = "unknown"))]
fn init_tracing() {
    use tracing::Level;
    use tracing::subscriber::set_global_default;
    use tracing_subscriber::Registry;
    use tracing_subscriber::layer::SubscriberExt;

    let console_level = if cfg!(debug_assertions) {
        Level::DEBUG
    } else {
        Level::INFO
    };

    let wasm_layer = tracing_wasm::WASMLayer::new(
        tracing_wasm::WASMLayerConfigBuilder::new()
            .set_max_level(console_level)
            .build(),
    );

    let _ = set_global_default(Registry::default().with(wasm_layer));
}

#[cfg(not(all(target_arch = "wasm32", target_os = "unknown")))]
fn init_tracing() {}

/// Read a config object from JS. `undefined` and `null` mean defaults.
pub fn parse_config(value: JsValue) -> Result<ChatViewConfig, MountError> {
    if value.is_undefined() || value.is_null() {
        return Ok(ChatViewConfig::default());
    }
    serde_wasm_bindgen::from_value(value).map_err(|e| MountError::Config(e.to_string()))
}

/// Attach the chat view to the current page.
///
/// # Arguments
/// * `config` - Optional config object; missing fields use defaults
#[cfg(all(target_arch = "wasm32", target_os = "unknown"))]
#[wasm_bindgen]
pub fn mount(config: JsValue) -> Result<JsChatView, JsError> {
    let config = parse_config(config).map_err(|e| JsError::new(&e.to_string()))?;
    let view = aichat_browser::mount(config).map_err(|e| JsError::new(&e.to_string()))?;
    Ok(JsChatView::new(view))
}

/// Render Markdown to HTML, with math and think blocks.
#[wasm_bindgen]
pub fn render_markdown(markdown: &str) -> String {
    MessageRenderer::default().render_assistant(markdown)
}

/// Decode a base64 message payload and render it for its role.
///
/// # Arguments
/// * `role` - `user`, `assistant` or `system` (a class list works too)
/// * `raw` - The base64 payload
#[wasm_bindgen]
pub fn render_message(role: &str, raw: &str) -> Result<String, JsError> {
    message_html(role, raw).map_err(|e| JsError::new(&e.to_string()))
}

fn message_html(role: &str, raw: &str) -> Result<String, RenderError> {
    let text = decode_raw(raw)?;
    Ok(MessageRenderer::default().render_text(Role::from_class_list(role), &text))
}

/// Render LaTeX math to MathML.
///
/// # Arguments
/// * `latex` - The LaTeX math expression
/// * `display_mode` - true for display math (block), false for inline math
#[wasm_bindgen]
pub fn render_math(latex: &str, display_mode: bool) -> JsMathResult {
    let mode = if display_mode {
        MathMode::Display
    } else {
        MathMode::Inline
    };
    match aichat_render::render_math(latex, mode) {
        MathResult::Success(html) => JsMathResult {
            success: true,
            html,
            error: None,
        },
        MathResult::Error { html, message } => JsMathResult {
            success: false,
            html,
            error: Some(message),
        },
    }
}
