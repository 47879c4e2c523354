//! Browser layer for the aichat web interface.
//!
//! Listens for htmx out-of-band swap events and a couple of application
//! events on `document.body`, renders chat messages once they land in the
//! page, and keeps the chat scrolled to the bottom when the reader was
//! already there.
//!
//! # Architecture
//!
//! - `events`: typed [`UiEvent`]s the DOM events are translated into
//! - `controller`: [`ChatController`] reacting to those events through the
//!   [`ChatSurface`] trait
//! - `scroll`: the bottom anchor
//! - `dom`: web-sys implementations of the surface traits
//! - `mount`: listener setup
//!
//! `dom` and `mount` assume a `wasm32-unknown-unknown` target. The rest is
//! plain Rust and is tested natively.

pub use aichat_render;

pub mod config;
pub mod controller;
pub mod error;
pub mod events;
pub mod scroll;

#[cfg(all(target_arch = "wasm32", target_os = "unknown"))]
pub mod dom;
#[cfg(all(target_arch = "wasm32", target_os = "unknown"))]
pub mod mount;

pub use config::{ChatViewConfig, Selectors};
pub use controller::{ChatController, ChatSurface, DispatchReport};
pub use error::MountError;
pub use events::{EventNames, SwapTarget, UiEvent, UiEventKind};
pub use scroll::{ScrollAnchor, ScrollViewport};

#[cfg(all(target_arch = "wasm32", target_os = "unknown"))]
pub use dom::{DomMessage, DomSurface};
#[cfg(all(target_arch = "wasm32", target_os = "unknown"))]
pub use mount::{ChatView, mount};
