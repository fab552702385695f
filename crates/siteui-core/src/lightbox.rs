#![forbid(unsafe_code)]

//! Accessible image lightbox over a fixed gallery.
//!
//! # State Machine
//!
//! ```text
//!            open(i)                  navigate(±1)
//!  Closed ───────────▶ Open(i) ───────────────────▶ Open(i ± 1 mod len)
//!    ▲                    │
//!    └────── close() ─────┘
//! ```
//!
//! # Invariants
//!
//! 1. While open, the index is always in `[0, len)`; out-of-range requests
//!    wrap instead of clamping.
//! 2. `close()` returns focus to the item that was showing and leaves no index.
//! 3. Close and navigation requests while closed produce no effects.
//! 4. An empty gallery never opens.

use tracing::{debug, trace};

use crate::effect::{ARIA_LABEL, Effect, OPEN_CLASS, Target};
use crate::input::{Key, SwipeDirection, SwipeTracker};

/// One gallery entry, read once from the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GalleryItem {
    /// Full-size image URL (`data-src`).
    pub src: String,
    /// Alt text shown on the enlarged image (`data-alt`). May be empty.
    pub alt: String,
    /// Accessible name for the item itself.
    pub label: String,
}

impl GalleryItem {
    /// Build the item at `position`.
    ///
    /// The label is the alt text of the item's thumbnail image, or
    /// `Open image N` (1-based) when the thumbnail has none.
    #[must_use]
    pub fn new(
        position: usize,
        src: impl Into<String>,
        alt: Option<&str>,
        thumbnail_alt: Option<&str>,
    ) -> Self {
        let label = match thumbnail_alt {
            Some(alt) if !alt.is_empty() => alt.to_owned(),
            _ => format!("Open image {}", position + 1),
        };
        Self {
            src: src.into(),
            alt: alt.unwrap_or_default().to_owned(),
            label,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LightboxState {
    Closed,
    Open { index: usize },
}

/// Lightbox controller.
#[derive(Debug, Clone)]
pub struct Lightbox {
    items: Vec<GalleryItem>,
    state: LightboxState,
    swipe: SwipeTracker,
    swipe_threshold: f64,
}

fn wrap(index: isize, len: usize) -> usize {
    debug_assert!(len > 0);
    index.rem_euclid(len as isize) as usize
}

impl Lightbox {
    #[must_use]
    pub fn new(items: Vec<GalleryItem>, swipe_threshold: f64) -> Self {
        Self {
            items,
            state: LightboxState::Closed,
            swipe: SwipeTracker::new(),
            swipe_threshold,
        }
    }

    #[must_use]
    pub const fn state(&self) -> LightboxState {
        self.state
    }

    #[must_use]
    pub const fn current_index(&self) -> Option<usize> {
        match self.state {
            LightboxState::Open { index } => Some(index),
            LightboxState::Closed => None,
        }
    }

    #[must_use]
    pub const fn is_open(&self) -> bool {
        matches!(self.state, LightboxState::Open { .. })
    }

    #[must_use]
    pub fn items(&self) -> &[GalleryItem] {
        &self.items
    }

    /// `aria-label` effects for every gallery item, applied once at mount.
    #[must_use]
    pub fn label_effects(&self) -> Vec<Effect> {
        self.items
            .iter()
            .enumerate()
            .map(|(index, item)| {
                Effect::set_attribute(Target::GalleryItem(index), ARIA_LABEL, item.label.clone())
            })
            .collect()
    }

    /// Show the item at `index`, wrapping out-of-range values.
    pub fn open(&mut self, index: usize) -> Vec<Effect> {
        if self.items.is_empty() {
            return Vec::new();
        }
        self.show(wrap(index as isize, self.items.len()))
    }

    /// Hide the overlay and give focus back to the item that was showing.
    pub fn close(&mut self) -> Vec<Effect> {
        let LightboxState::Open { index } = self.state else {
            return Vec::new();
        };
        self.state = LightboxState::Closed;
        self.swipe.reset();
        debug!(index, "lightbox closed");
        vec![
            Effect::remove_class(Target::Lightbox, OPEN_CLASS),
            Effect::set_style(Target::Body, "overflow", ""),
            Effect::set_attribute(Target::LightboxImage, "src", ""),
            Effect::set_attribute(Target::LightboxImage, "alt", ""),
            Effect::Focus(Target::GalleryItem(index)),
        ]
    }

    /// Move `delta` items from the current one, wrapping at both ends.
    pub fn navigate(&mut self, delta: isize) -> Vec<Effect> {
        let Some(current) = self.current_index() else {
            return Vec::new();
        };
        let next = wrap(current as isize + delta, self.items.len());
        self.show(next)
    }

    pub fn handle_key(&mut self, key: Key) -> Vec<Effect> {
        if !self.is_open() {
            return Vec::new();
        }
        match key {
            Key::Escape => self.close(),
            Key::ArrowLeft => self.navigate(-1),
            Key::ArrowRight => self.navigate(1),
            Key::Other => Vec::new(),
        }
    }

    /// A click on the overlay. Only clicks on the backdrop itself close it;
    /// clicks that land on the image or controls bubble up with
    /// `on_backdrop == false`.
    pub fn overlay_click(&mut self, on_backdrop: bool) -> Vec<Effect> {
        if on_backdrop { self.close() } else { Vec::new() }
    }

    pub fn touch_start(&mut self, x: f64) {
        self.swipe.start(x);
    }

    pub fn touch_end(&mut self, x: f64) -> Vec<Effect> {
        match self.swipe.end(x, self.swipe_threshold) {
            Some(SwipeDirection::Previous) => self.navigate(-1),
            Some(SwipeDirection::Next) => self.navigate(1),
            None => Vec::new(),
        }
    }

    fn show(&mut self, index: usize) -> Vec<Effect> {
        let item = &self.items[index];
        self.state = LightboxState::Open { index };
        trace!(index, src = %item.src, "lightbox showing");
        vec![
            Effect::set_attribute(Target::LightboxImage, "src", item.src.clone()),
            Effect::set_attribute(Target::LightboxImage, "alt", item.alt.clone()),
            Effect::add_class(Target::Lightbox, OPEN_CLASS),
            Effect::set_style(Target::Body, "overflow", "hidden"),
            Effect::Focus(Target::LightboxClose),
        ]
    }
}
