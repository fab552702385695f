#![forbid(unsafe_code)]

//! Header background on scroll.

use tracing::trace;

use crate::effect::{Effect, SCROLLED_CLASS, Target};

/// Tracks whether the header carries its scroll class.
#[derive(Debug, Clone)]
pub struct HeaderScroll {
    threshold: f64,
    scrolled: bool,
}

impl HeaderScroll {
    /// Create the tracker and sync it with the initial scroll offset.
    pub fn mount(threshold: f64, scroll_y: f64) -> (Self, Effect) {
        let scrolled = scroll_y > threshold;
        let header = Self {
            threshold,
            scrolled,
        };
        (header, Effect::class(Target::Header, SCROLLED_CLASS, scrolled))
    }

    #[must_use]
    pub const fn is_scrolled(&self) -> bool {
        self.scrolled
    }

    /// Recompute for a scroll event. Emits only when the class flips.
    pub fn on_scroll(&mut self, scroll_y: f64) -> Option<Effect> {
        let scrolled = scroll_y > self.threshold;
        if scrolled == self.scrolled {
            return None;
        }
        self.scrolled = scrolled;
        trace!(scroll_y, scrolled, "header scroll class changed");
        Some(Effect::class(Target::Header, SCROLLED_CLASS, scrolled))
    }
}
