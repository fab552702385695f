#![forbid(unsafe_code)]

//! Collapsible mobile navigation.

use tracing::debug;

use crate::effect::{ARIA_EXPANDED, Effect, OPEN_CLASS, Target};

/// A document click, described by where it landed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OutsideClick {
    pub viewport_width: f64,
    /// Click target is the nav panel or inside it.
    pub in_nav: bool,
    /// Click target is the toggle or inside it.
    pub in_toggle: bool,
}

/// Open/closed state of the nav panel.
#[derive(Debug, Clone)]
pub struct NavMenu {
    open: bool,
    breakpoint_px: f64,
}

impl NavMenu {
    #[must_use]
    pub const fn new(breakpoint_px: f64) -> Self {
        Self {
            open: false,
            breakpoint_px,
        }
    }

    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.open
    }

    /// Flip the panel and mirror the state into `aria-expanded`.
    pub fn toggle(&mut self) -> Vec<Effect> {
        self.open = !self.open;
        debug!(open = self.open, "nav toggled");
        self.effects()
    }

    /// Close the panel for a click outside nav and toggle on narrow viewports.
    pub fn outside_click(&mut self, click: OutsideClick) -> Vec<Effect> {
        if !self.open
            || click.in_nav
            || click.in_toggle
            || click.viewport_width > self.breakpoint_px
        {
            return Vec::new();
        }
        self.open = false;
        debug!(width = click.viewport_width, "nav closed by outside click");
        self.effects()
    }

    fn effects(&self) -> Vec<Effect> {
        vec![
            Effect::class(Target::Nav, OPEN_CLASS, self.open),
            Effect::set_attribute(
                Target::NavToggle,
                ARIA_EXPANDED,
                if self.open { "true" } else { "false" },
            ),
        ]
    }
}
