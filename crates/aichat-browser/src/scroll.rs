//! Keeping the chat pinned to its newest message across swaps.
//!
//! Before a swap we look at whether the reader is already at the bottom of
//! the scroll container. If they are, the anchor is armed and the next
//! post-swap pass moves the container to its new bottom. Readers who
//! scrolled up to look at history are left where they are.

/// A scrollable element.
pub trait ScrollViewport {
    fn scroll_height(&self) -> f64;
    fn client_height(&self) -> f64;
    fn scroll_top(&self) -> f64;
    fn set_scroll_top(&self, value: f64);

    /// Pixels between the bottom of the visible area and the end of the
    /// content.
    fn distance_from_bottom(&self) -> f64 {
        self.scroll_height() - self.client_height() - self.scroll_top()
    }
}

/// Default tolerance for sub-pixel scroll positions.
pub const DEFAULT_BOTTOM_TOLERANCE: f64 = 1.0;

/// One-shot "re-anchor after the next swap" flag.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollAnchor {
    armed: bool,
    tolerance: f64,
}

impl ScrollAnchor {
    pub fn new(tolerance: f64) -> Self {
        Self {
            armed: false,
            tolerance: tolerance.abs(),
        }
    }

    pub fn is_armed(&self) -> bool {
        self.armed
    }

    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    /// Force a re-anchor on the next `after_swap`.
    pub fn arm(&mut self) {
        self.armed = true;
    }

    pub fn disarm(&mut self) {
        self.armed = false;
    }

    pub fn is_at_bottom(&self, viewport: &impl ScrollViewport) -> bool {
        viewport.distance_from_bottom().abs() <= self.tolerance
    }

    /// Arm the anchor if the viewport is at the bottom. Never disarms.
    ///
    /// Returns whether the anchor is armed afterwards.
    pub fn before_swap(&mut self, viewport: &impl ScrollViewport) -> bool {
        if self.is_at_bottom(viewport) {
            self.armed = true;
        }
        self.armed
    }

    /// Scroll to the new bottom if armed, then disarm.
    ///
    /// Returns whether the viewport was moved.
    pub fn after_swap(&mut self, viewport: &impl ScrollViewport) -> bool {
        if !self.armed {
            return false;
        }
        self.armed = false;
        viewport.set_scroll_top(viewport.scroll_height());
        true
    }
}

impl Default for ScrollAnchor {
    fn default() -> Self {
        Self::new(DEFAULT_BOTTOM_TOLERANCE)
    }
}
