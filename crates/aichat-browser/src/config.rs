use aichat_render::RendererConfig;
use serde::{Deserialize, Serialize};

use crate::events::EventNames;
use crate::scroll::DEFAULT_BOTTOM_TOLERANCE;

/// Everything `mount` needs to find its way around the page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ChatViewConfig {
    pub selectors: Selectors,
    pub events: EventNames,
    /// How far from the bottom, in pixels, still counts as "at the bottom"
    pub bottom_tolerance: f64,
    pub renderer: RendererConfig,
}

impl Default for ChatViewConfig {
    fn default() -> Self {
        Self {
            selectors: Selectors::default(),
            events: EventNames::default(),
            bottom_tolerance: DEFAULT_BOTTOM_TOLERANCE,
            renderer: RendererConfig::default(),
        }
    }
}

/// CSS selectors for the chat page structure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Selectors {
    /// The scrolling element wrapped around the chat
    pub viewport: String,
    /// Container holding the messages, the usual swap target
    pub container: String,
    /// A message, relative to the container
    pub message: String,
    /// Every message on the page, from the document root
    pub all_messages: String,
    pub last_assistant: String,
    /// Raw slot, relative to a message
    pub raw: String,
    /// Formatted slot, relative to a message
    pub formatted: String,
    pub user_input: String,
}

impl Default for Selectors {
    fn default() -> Self {
        Self {
            viewport: ".main-content".to_owned(),
            container: "#main .chat-messages".to_owned(),
            message: ".chat-message".to_owned(),
            all_messages: "#main .chat-message".to_owned(),
            last_assistant: "#main .chat-message.assistant:last-child".to_owned(),
            raw: ".raw".to_owned(),
            formatted: ".formatted".to_owned(),
            user_input: ".main-footer .user-input".to_owned(),
        }
    }
}
