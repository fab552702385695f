#![forbid(unsafe_code)]

//! Input normalization for the lightbox.
//!
//! - DOM `KeyboardEvent.key` strings are reduced to the handful of keys the
//!   lightbox reacts to ([`Key`]).
//! - Touch start/end x coordinates are turned into a horizontal swipe
//!   ([`SwipeTracker`]).

/// Keys the page reacts to. Everything else is [`Key::Other`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Escape,
    ArrowLeft,
    ArrowRight,
    Other,
}

impl Key {
    /// Normalize a DOM `key` value.
    ///
    /// Accepts the legacy IE/Edge spellings (`Esc`, `Left`, `Right`) too.
    #[must_use]
    pub fn from_dom_key(key: &str) -> Self {
        match key {
            "Escape" | "Esc" => Self::Escape,
            "ArrowLeft" | "Left" => Self::ArrowLeft,
            "ArrowRight" | "Right" => Self::ArrowRight,
            _ => Self::Other,
        }
    }
}

/// Direction a completed swipe navigates in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SwipeDirection {
    /// Finger moved right: show the previous image.
    Previous,
    /// Finger moved left: show the next image.
    Next,
}

/// Tracks one touch from start to end and classifies it as a swipe.
#[derive(Debug, Clone, Default)]
pub struct SwipeTracker {
    start_x: Option<f64>,
}

impl SwipeTracker {
    #[must_use]
    pub const fn new() -> Self {
        Self { start_x: None }
    }

    /// Record where the touch began. A new start replaces any previous one.
    pub fn start(&mut self, x: f64) {
        self.start_x = Some(x);
    }

    /// Finish the touch at `x`.
    ///
    /// Returns a direction only when the horizontal travel strictly exceeds
    /// `threshold`. An end without a matching start is ignored.
    pub fn end(&mut self, x: f64, threshold: f64) -> Option<SwipeDirection> {
        let start = self.start_x.take()?;
        let dx = x - start;
        if dx > threshold {
            Some(SwipeDirection::Previous)
        } else if dx < -threshold {
            Some(SwipeDirection::Next)
        } else {
            None
        }
    }

    /// Forget any touch in progress.
    pub fn reset(&mut self) {
        self.start_x = None;
    }

    #[must_use]
    pub const fn in_progress(&self) -> bool {
        self.start_x.is_some()
    }
}
