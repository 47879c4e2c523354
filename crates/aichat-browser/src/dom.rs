//! web-sys implementations of the surface traits.

use aichat_render::{MessageElement, Role};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, HtmlInputElement, HtmlTextAreaElement};

use crate::config::Selectors;
use crate::controller::ChatSurface;
use crate::events::SwapTarget;
use crate::scroll::ScrollViewport;

impl ScrollViewport for Element {
    fn scroll_height(&self) -> f64 {
        Element::scroll_height(self).into()
    }

    fn client_height(&self) -> f64 {
        Element::client_height(self).into()
    }

    fn scroll_top(&self) -> f64 {
        Element::scroll_top(self).into()
    }

    /// Set through the property so fractional values reach the browser.
    fn set_scroll_top(&self, value: f64) {
        if let Err(e) = js_sys::Reflect::set(
            self,
            &JsValue::from_str("scrollTop"),
            &JsValue::from_f64(value),
        ) {
            tracing::warn!(value, "failed to set scrollTop: {:?}", e);
        }
    }
}

/// A `.chat-message` element and its two slots.
#[derive(Debug, Clone)]
pub struct DomMessage {
    element: Element,
    raw: Option<Element>,
    formatted: Option<Element>,
}

impl DomMessage {
    pub fn new(element: Element, selectors: &Selectors) -> Self {
        let raw = element.query_selector(&selectors.raw).ok().flatten();
        let formatted = element.query_selector(&selectors.formatted).ok().flatten();
        Self {
            element,
            raw,
            formatted,
        }
    }

    pub fn element(&self) -> &Element {
        &self.element
    }
}

impl MessageElement for DomMessage {
    fn role(&self) -> Role {
        Role::from_class_list(&self.element.class_name())
    }

    fn raw_payload(&self) -> Option<String> {
        self.raw.as_ref().map(|raw| raw.inner_html())
    }

    fn formatted_html(&self) -> Option<String> {
        self.formatted.as_ref().map(|formatted| formatted.inner_html())
    }

    fn set_formatted_html(&mut self, html: &str) {
        if let Some(formatted) = &self.formatted {
            formatted.set_inner_html(html);
        }
    }
}

/// The chat page, found through CSS selectors on each call.
///
/// Nothing is cached: swaps replace the elements out from under us.
#[derive(Debug, Clone)]
pub struct DomSurface {
    document: Document,
    selectors: Selectors,
}

impl DomSurface {
    pub fn new(document: Document, selectors: Selectors) -> Self {
        Self {
            document,
            selectors,
        }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    fn query(&self, selector: &str) -> Option<Element> {
        match self.document.query_selector(selector) {
            Ok(element) => element,
            Err(e) => {
                tracing::warn!(selector, "invalid selector: {:?}", e);
                None
            }
        }
    }

    fn messages_under(&self, root: QueryRoot<'_>, selector: &str) -> Vec<DomMessage> {
        let nodes = match root {
            QueryRoot::Document(document) => document.query_selector_all(selector),
            QueryRoot::Element(element) => element.query_selector_all(selector),
        };
        let Ok(nodes) = nodes else {
            tracing::warn!(selector, "invalid selector");
            return Vec::new();
        };

        (0..nodes.length())
            .filter_map(|i| nodes.item(i))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .map(|element| DomMessage::new(element, &self.selectors))
            .collect()
    }

    /// Work out what a swap event's `detail.target` refers to.
    pub fn classify_target(&self, target: Option<&Element>) -> SwapTarget {
        let Some(target) = target else {
            return SwapTarget::Other;
        };
        if let Some(container) = self.query(&self.selectors.container) {
            if target.is_same_node(Some(&*container)) {
                return SwapTarget::ChatMessages;
            }
        }
        if let Some(last) = self.query(&self.selectors.last_assistant) {
            if target.is_same_node(Some(&*last)) {
                return SwapTarget::LastAssistantMessage;
            }
        }
        SwapTarget::Other
    }
}

enum QueryRoot<'a> {
    Document(&'a Document),
    Element(&'a Element),
}

impl ChatSurface for DomSurface {
    type Message = DomMessage;
    type Viewport = Element;

    fn viewport(&self) -> Option<Element> {
        self.query(&self.selectors.viewport)
    }

    fn container_messages(&self) -> Vec<DomMessage> {
        let Some(container) = self.query(&self.selectors.container) else {
            return Vec::new();
        };
        self.messages_under(QueryRoot::Element(&container), &self.selectors.message)
    }

    fn last_assistant_message(&self) -> Option<DomMessage> {
        self.query(&self.selectors.last_assistant)
            .map(|element| DomMessage::new(element, &self.selectors))
    }

    fn all_messages(&self) -> Vec<DomMessage> {
        self.messages_under(
            QueryRoot::Document(&self.document),
            &self.selectors.all_messages,
        )
    }

    fn clear_user_input(&self) {
        let Some(input) = self.query(&self.selectors.user_input) else {
            tracing::debug!("no user input element to clear");
            return;
        };
        if let Some(textarea) = input.dyn_ref::<HtmlTextAreaElement>() {
            textarea.set_value("");
        } else if let Some(field) = input.dyn_ref::<HtmlInputElement>() {
            field.set_value("");
        }
    }
}
