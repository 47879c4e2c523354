//! Attaching the controller to the page.

use std::cell::RefCell;
use std::rc::Rc;

use gloo_events::EventListener;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CustomEvent, Element, Event};

use crate::config::ChatViewConfig;
use crate::controller::{ChatController, DispatchReport};
use crate::dom::DomSurface;
use crate::error::MountError;
use crate::events::{SwapTarget, UiEvent, UiEventKind};

/// A mounted chat view. Dropping it removes its listeners.
pub struct ChatView {
    controller: Rc<RefCell<ChatController>>,
    surface: Rc<DomSurface>,
    _listeners: Vec<EventListener>,
}

impl ChatView {
    /// Run an event through the controller as if the page had fired it.
    pub fn dispatch(&self, event: UiEvent) -> Option<DispatchReport> {
        dispatch(&self.controller, &self.surface, event)
    }

    pub fn render_all(&self) -> Option<DispatchReport> {
        self.dispatch(UiEvent::RenderAll)
    }

    pub fn surface(&self) -> &DomSurface {
        &self.surface
    }
}

impl std::fmt::Debug for ChatView {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChatView")
            .field("surface", &self.surface)
            .field("listeners", &self._listeners.len())
            .finish()
    }
}

/// Listen on `document.body` for the configured events.
pub fn mount(config: ChatViewConfig) -> Result<ChatView, MountError> {
    let window = web_sys::window().ok_or(MountError::NoWindow)?;
    let document = window.document().ok_or(MountError::NoDocument)?;
    let body = document.body().ok_or(MountError::NoBody)?;

    let controller = Rc::new(RefCell::new(ChatController::from_config(&config)));
    let surface = Rc::new(DomSurface::new(document, config.selectors.clone()));

    let listeners: Vec<EventListener> = config
        .events
        .iter()
        .map(|(kind, name)| {
            let controller = controller.clone();
            let surface = surface.clone();
            EventListener::new(&body, name.to_owned(), move |event| {
                let ui_event = translate(&surface, kind, event);
                dispatch(&controller, &surface, ui_event);
            })
        })
        .collect();

    tracing::debug!(events = ?config.events, "chat view mounted");

    Ok(ChatView {
        controller,
        surface,
        _listeners: listeners,
    })
}

fn dispatch(
    controller: &RefCell<ChatController>,
    surface: &DomSurface,
    event: UiEvent,
) -> Option<DispatchReport> {
    let Ok(mut controller) = controller.try_borrow_mut() else {
        tracing::warn!(?event, "ui event fired while another was being handled, dropping it");
        return None;
    };
    Some(controller.dispatch(surface, event))
}

fn translate(surface: &DomSurface, kind: UiEventKind, event: &Event) -> UiEvent {
    if !kind.has_target() {
        return kind.with_target(SwapTarget::Other);
    }
    let target = swap_target(event);
    kind.with_target(surface.classify_target(target.as_ref()))
}

/// htmx puts the element being swapped in `event.detail.target`.
pub fn swap_target(event: &Event) -> Option<Element> {
    let detail = event.dyn_ref::<CustomEvent>()?.detail();
    if detail.is_undefined() || detail.is_null() {
        return None;
    }
    js_sys::Reflect::get(&detail, &JsValue::from_str("target"))
        .ok()?
        .dyn_into::<Element>()
        .ok()
}
