//! Typed UI events.
//!
//! DOM events are translated into these once, at the listener boundary. The
//! controller never looks at event names or JS payloads.

use serde::{Deserialize, Serialize};

/// What a swap replaced, relative to the chat.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwapTarget {
    /// The container holding every chat message
    ChatMessages,
    /// The last assistant message, replaced while a reply streams in
    LastAssistantMessage,
    /// Anything else on the page
    Other,
}

impl SwapTarget {
    /// Whether swaps of this target take part in scroll anchoring.
    pub fn is_chat(&self) -> bool {
        !matches!(self, SwapTarget::Other)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiEvent {
    /// A region is about to be replaced
    BeforeSwap(SwapTarget),
    /// A region was replaced
    AfterSwap(SwapTarget),
    /// Render every message on the page and jump to the bottom
    RenderAll,
    /// Empty the message input
    ClearInput,
}

/// Event kinds without payloads, used to map DOM event names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UiEventKind {
    BeforeSwap,
    AfterSwap,
    RenderAll,
    ClearInput,
}

impl UiEventKind {
    pub const ALL: [UiEventKind; 4] = [
        UiEventKind::BeforeSwap,
        UiEventKind::AfterSwap,
        UiEventKind::RenderAll,
        UiEventKind::ClearInput,
    ];

    /// Whether the DOM event carries a swap target in `detail.target`.
    pub fn has_target(&self) -> bool {
        matches!(self, UiEventKind::BeforeSwap | UiEventKind::AfterSwap)
    }

    /// Attach a swap target. Targetless kinds ignore it.
    pub fn with_target(self, target: SwapTarget) -> UiEvent {
        match self {
            UiEventKind::BeforeSwap => UiEvent::BeforeSwap(target),
            UiEventKind::AfterSwap => UiEvent::AfterSwap(target),
            UiEventKind::RenderAll => UiEvent::RenderAll,
            UiEventKind::ClearInput => UiEvent::ClearInput,
        }
    }
}

/// DOM event names for each kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EventNames {
    pub before_swap: String,
    pub after_swap: String,
    pub render_all: String,
    pub clear_input: String,
}

impl Default for EventNames {
    fn default() -> Self {
        Self {
            before_swap: "htmx:oobBeforeSwap".to_owned(),
            after_swap: "htmx:oobAfterSwap".to_owned(),
            render_all: "parseAllRawMessages".to_owned(),
            clear_input: "clearUserInput".to_owned(),
        }
    }
}

impl EventNames {
    pub fn name(&self, kind: UiEventKind) -> &str {
        match kind {
            UiEventKind::BeforeSwap => &self.before_swap,
            UiEventKind::AfterSwap => &self.after_swap,
            UiEventKind::RenderAll => &self.render_all,
            UiEventKind::ClearInput => &self.clear_input,
        }
    }

    pub fn kind_of(&self, name: &str) -> Option<UiEventKind> {
        UiEventKind::ALL
            .into_iter()
            .find(|kind| self.name(*kind) == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (UiEventKind, &str)> {
        UiEventKind::ALL
            .into_iter()
            .map(move |kind| (kind, self.name(kind)))
    }
}
