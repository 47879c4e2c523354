//! Types exposed to JavaScript via wasm-bindgen.

use wasm_bindgen::prelude::*;

/// Result from rendering LaTeX math.
#[wasm_bindgen]
pub struct JsMathResult {
    pub success: bool,
    #[wasm_bindgen(getter_with_clone)]
    pub html: String,
    #[wasm_bindgen(getter_with_clone)]
    pub error: Option<String>,
}

/// Handle to a mounted chat view.
///
/// Keep it alive for as long as the page should react to swaps. Calling
/// `unmount()` (or letting it be garbage collected after `free()`) removes
/// the listeners.
#[cfg(all(target_arch = "wasm32", target_os = "unknown"))]
#[wasm_bindgen]
pub struct JsChatView {
    inner: aichat_browser::ChatView,
}

#[cfg(all(target_arch = "wasm32", target_os = "unknown"))]
#[wasm_bindgen]
impl JsChatView {
    /// Render every message on the page and scroll to the bottom.
    ///
    /// Returns false if another event was being handled at the time.
    #[wasm_bindgen(js_name = renderAll)]
    pub fn render_all(&self) -> bool {
        self.inner.render_all().is_some()
    }

    /// Empty the message input.
    #[wasm_bindgen(js_name = clearInput)]
    pub fn clear_input(&self) -> bool {
        self.inner
            .dispatch(aichat_browser::UiEvent::ClearInput)
            .is_some()
    }

    /// Detach all listeners.
    pub fn unmount(self) {
        tracing::debug!("chat view unmounted");
    }
}

#[cfg(all(target_arch = "wasm32", target_os = "unknown"))]
impl JsChatView {
    pub fn new(inner: aichat_browser::ChatView) -> Self {
        Self { inner }
    }

    pub fn into_inner(self) -> aichat_browser::ChatView {
        self.inner
    }
}
