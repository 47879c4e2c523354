//! Reacting to UI events: render messages, keep the scroll anchored.

use aichat_render::{MessageElement, MessageRenderer, RenderOutcome};

use crate::config::ChatViewConfig;
use crate::events::{SwapTarget, UiEvent};
use crate::scroll::{ScrollAnchor, ScrollViewport};

/// The parts of the page the controller reads and writes.
pub trait ChatSurface {
    type Message: MessageElement;
    type Viewport: ScrollViewport;

    /// The scrolling element around the chat, if present.
    fn viewport(&self) -> Option<Self::Viewport>;

    /// Messages inside the chat container.
    fn container_messages(&self) -> Vec<Self::Message>;

    fn last_assistant_message(&self) -> Option<Self::Message>;

    /// Every message on the page.
    fn all_messages(&self) -> Vec<Self::Message>;

    fn clear_user_input(&self);
}

/// What a single dispatch did. Mostly useful for logs and tests.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DispatchReport {
    pub rendered: usize,
    /// Messages whose formatted slot was already filled
    pub skipped: usize,
    pub failed: usize,
    /// The anchor was armed when the event finished
    pub armed: bool,
    /// The viewport was moved to the bottom
    pub scrolled: bool,
}

/// Owns the scroll anchor and the renderer for one chat view.
#[derive(Debug)]
pub struct ChatController {
    anchor: ScrollAnchor,
    renderer: MessageRenderer,
}

impl ChatController {
    pub fn new(anchor: ScrollAnchor, renderer: MessageRenderer) -> Self {
        Self { anchor, renderer }
    }

    pub fn from_config(config: &ChatViewConfig) -> Self {
        Self::new(
            ScrollAnchor::new(config.bottom_tolerance),
            MessageRenderer::new(config.renderer.clone()),
        )
    }

    pub fn anchor(&self) -> &ScrollAnchor {
        &self.anchor
    }

    pub fn renderer(&self) -> &MessageRenderer {
        &self.renderer
    }

    pub fn dispatch<S: ChatSurface>(&mut self, surface: &S, event: UiEvent) -> DispatchReport {
        let mut report = DispatchReport::default();

        match event {
            UiEvent::BeforeSwap(target) if target.is_chat() => {
                if let Some(viewport) = surface.viewport() {
                    self.anchor.before_swap(&viewport);
                }
            }
            UiEvent::AfterSwap(SwapTarget::ChatMessages) => {
                self.render_all(surface.container_messages(), &mut report);
                report.scrolled = self.scroll_to_bottom(surface);
            }
            UiEvent::AfterSwap(SwapTarget::LastAssistantMessage) => {
                self.render_all(surface.last_assistant_message(), &mut report);
                report.scrolled = self.scroll_to_bottom(surface);
            }
            UiEvent::RenderAll => {
                self.render_all(surface.all_messages(), &mut report);
                self.anchor.arm();
                report.scrolled = self.scroll_to_bottom(surface);
            }
            UiEvent::ClearInput => surface.clear_user_input(),
            UiEvent::BeforeSwap(_) | UiEvent::AfterSwap(_) => {}
        }

        report.armed = self.anchor.is_armed();
        tracing::trace!(?event, ?report, "dispatched ui event");
        report
    }

    fn render_all<M: MessageElement>(
        &self,
        messages: impl IntoIterator<Item = M>,
        report: &mut DispatchReport,
    ) {
        for mut message in messages {
            match self.renderer.render(&mut message) {
                Ok(RenderOutcome::Rendered) => report.rendered += 1,
                Ok(RenderOutcome::AlreadyRendered) => report.skipped += 1,
                Err(e) => {
                    report.failed += 1;
                    tracing::warn!(role = %message.role(), "skipping message: {}", e);
                }
            }
        }
    }

    /// Consumes the anchor even when there is no viewport to move.
    fn scroll_to_bottom<S: ChatSurface>(&mut self, surface: &S) -> bool {
        match surface.viewport() {
            Some(viewport) => self.anchor.after_swap(&viewport),
            None => {
                self.anchor.disarm();
                false
            }
        }
    }
}

impl Default for ChatController {
    fn default() -> Self {
        Self::from_config(&ChatViewConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scroll::tests::FakeViewport;
    use aichat_render::{Role, encode_raw};
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    #[derive(Debug, Clone)]
    struct FakeMessage {
        role: Role,
        raw: String,
        formatted: Rc<RefCell<String>>,
    }

    impl FakeMessage {
        fn new(role: Role, text: &str) -> Self {
            Self {
                role,
                raw: encode_raw(text),
                formatted: Rc::default(),
            }
        }

        fn broken() -> Self {
            Self {
                role: Role::Assistant,
                raw: "***".to_owned(),
                formatted: Rc::default(),
            }
        }

        fn html(&self) -> String {
            self.formatted.borrow().clone()
        }
    }

    impl MessageElement for FakeMessage {
        fn role(&self) -> Role {
            self.role
        }
        fn raw_payload(&self) -> Option<String> {
            Some(self.raw.clone())
        }
        fn formatted_html(&self) -> Option<String> {
            Some(self.html())
        }
        fn set_formatted_html(&mut self, html: &str) {
            *self.formatted.borrow_mut() = html.to_owned();
        }
    }

    #[derive(Default)]
    struct FakeSurface {
        viewport: Option<FakeViewport>,
        container: Vec<FakeMessage>,
        outside: Vec<FakeMessage>,
        input_cleared: Cell<bool>,
    }

    impl ChatSurface for FakeSurface {
        type Message = FakeMessage;
        type Viewport = FakeViewport;

        fn viewport(&self) -> Option<FakeViewport> {
            self.viewport.clone()
        }
        fn container_messages(&self) -> Vec<FakeMessage> {
            self.container.clone()
        }
        fn last_assistant_message(&self) -> Option<FakeMessage> {
            self.container
                .iter()
                .rev()
                .find(|m| m.role == Role::Assistant)
                .cloned()
        }
        fn all_messages(&self) -> Vec<FakeMessage> {
            self.container.iter().chain(&self.outside).cloned().collect()
        }
        fn clear_user_input(&self) {
            self.input_cleared.set(true);
        }
    }

    fn surface_at(scroll_top: f64) -> FakeSurface {
        FakeSurface {
            viewport: Some(FakeViewport::new(1000.0, 400.0, scroll_top)),
            container: vec![
                FakeMessage::new(Role::User, "hi"),
                FakeMessage::new(Role::Assistant, "*hello*"),
            ],
            ..Default::default()
        }
    }

    /// Simulate the swap making the content taller.
    fn grow(surface: &FakeSurface, by: f64) {
        let viewport = surface.viewport.as_ref().unwrap();
        viewport.scroll_height.set(viewport.scroll_height.get() + by);
    }

    #[test]
    fn bottom_anchored_swap_follows_new_bottom() {
        let surface = surface_at(600.0);
        let mut controller = ChatController::default();

        let before = controller.dispatch(&surface, UiEvent::BeforeSwap(SwapTarget::ChatMessages));
        assert!(before.armed);

        grow(&surface, 250.0);
        let after = controller.dispatch(&surface, UiEvent::AfterSwap(SwapTarget::ChatMessages));
        assert!(after.scrolled);
        assert!(!after.armed);
        assert_eq!(after.rendered, 2);
        assert_eq!(surface.viewport.as_ref().unwrap().scroll_top(), 1250.0);
    }

    #[test]
    fn scrolled_up_reader_is_not_moved() {
        let surface = surface_at(550.0);
        let mut controller = ChatController::default();

        controller.dispatch(&surface, UiEvent::BeforeSwap(SwapTarget::ChatMessages));
        grow(&surface, 250.0);
        let after = controller.dispatch(&surface, UiEvent::AfterSwap(SwapTarget::ChatMessages));
        assert!(!after.scrolled);
        assert_eq!(surface.viewport.as_ref().unwrap().scroll_top(), 550.0);
        // rendering still happens
        assert_eq!(after.rendered, 2);
    }

    #[test]
    fn streaming_reply_renders_last_assistant_only() {
        let surface = surface_at(600.0);
        let mut controller = ChatController::default();

        controller.dispatch(
            &surface,
            UiEvent::BeforeSwap(SwapTarget::LastAssistantMessage),
        );
        let after = controller.dispatch(
            &surface,
            UiEvent::AfterSwap(SwapTarget::LastAssistantMessage),
        );
        assert_eq!(after.rendered, 1);
        assert!(after.scrolled);
        assert!(surface.container[0].html().is_empty());
        assert!(surface.container[1].html().contains("<em>hello</em>"));
    }

    #[test]
    fn unrelated_swaps_are_ignored() {
        let surface = surface_at(600.0);
        let mut controller = ChatController::default();

        let before = controller.dispatch(&surface, UiEvent::BeforeSwap(SwapTarget::Other));
        assert!(!before.armed);
        let after = controller.dispatch(&surface, UiEvent::AfterSwap(SwapTarget::Other));
        assert_eq!(after, DispatchReport::default());
        assert!(surface.container.iter().all(|m| m.html().is_empty()));
    }

    #[test]
    fn unrelated_swap_does_not_consume_anchor() {
        let surface = surface_at(600.0);
        let mut controller = ChatController::default();

        controller.dispatch(&surface, UiEvent::BeforeSwap(SwapTarget::ChatMessages));
        controller.dispatch(&surface, UiEvent::AfterSwap(SwapTarget::Other));
        assert!(controller.anchor().is_armed());
    }

    #[test]
    fn render_all_renders_everything_and_scrolls() {
        let mut surface = surface_at(0.0);
        surface.outside.push(FakeMessage::new(Role::System, "# rules"));
        let mut controller = ChatController::default();

        let report = controller.dispatch(&surface, UiEvent::RenderAll);
        assert_eq!(report.rendered, 3);
        assert!(report.scrolled);
        assert_eq!(surface.viewport.as_ref().unwrap().scroll_top(), 1000.0);
        assert!(surface.outside[0].html().contains("<h1>"));
        assert_eq!(surface.container[0].html(), "hi");
    }

    #[test]
    fn rendered_messages_are_skipped_next_time() {
        let surface = surface_at(0.0);
        let mut controller = ChatController::default();

        controller.dispatch(&surface, UiEvent::RenderAll);
        let first = surface.container[1].html();
        let report = controller.dispatch(&surface, UiEvent::AfterSwap(SwapTarget::ChatMessages));
        assert_eq!(report.rendered, 0);
        assert_eq!(report.skipped, 2);
        assert_eq!(surface.container[1].html(), first);
    }

    #[test]
    fn broken_message_does_not_stop_the_rest() {
        let mut surface = surface_at(600.0);
        surface.container.insert(1, FakeMessage::broken());
        let mut controller = ChatController::default();

        let report = controller.dispatch(&surface, UiEvent::AfterSwap(SwapTarget::ChatMessages));
        assert_eq!(report.failed, 1);
        assert_eq!(report.rendered, 2);
        assert!(surface.container[1].html().is_empty());
        assert!(surface.container[2].html().contains("<em>hello</em>"));
    }

    #[test]
    fn container_swap_wraps_reasoning() {
        let surface = FakeSurface {
            container: vec![FakeMessage::new(Role::Assistant, "A<think>B</think>C")],
            ..Default::default()
        };
        let mut controller = ChatController::default();

        controller.dispatch(&surface, UiEvent::AfterSwap(SwapTarget::ChatMessages));
        insta::assert_snapshot!(surface.container[0].html(), @r#"
        <p>A</p>
        <div class="think">
        <p>B</p>
        </div>
        <p>C</p>
        "#);
    }

    #[test]
    fn missing_viewport_still_renders_and_disarms() {
        let mut surface = surface_at(0.0);
        surface.viewport = None;
        let mut controller = ChatController::default();

        let report = controller.dispatch(&surface, UiEvent::RenderAll);
        assert_eq!(report.rendered, 2);
        assert!(!report.scrolled);
        assert!(!report.armed);
    }

    #[test]
    fn clear_input() {
        let surface = surface_at(0.0);
        let mut controller = ChatController::default();
        let report = controller.dispatch(&surface, UiEvent::ClearInput);
        assert!(surface.input_cleared.get());
        assert_eq!(report, DispatchReport::default());
    }
}
