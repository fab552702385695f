#![forbid(unsafe_code)]

//! Typed DOM commands produced by the components.
//!
//! The core never holds element handles. It names elements by [`Target`]
//! and describes what should happen to them with an [`Effect`]. The host
//! keeps a registry from targets to live elements and applies effects in
//! the order they were returned.

use core::time::Duration;

use crate::form::Field;

/// Attribute on the document root carrying the active theme.
pub const THEME_ATTRIBUTE: &str = "data-theme";
/// Class toggled on the nav panel and the lightbox overlay.
pub const OPEN_CLASS: &str = "open";
/// Class added to revealable elements once they scroll into view.
pub const VISIBLE_CLASS: &str = "visible";
/// Class present on the header while the page is scrolled past the threshold.
pub const SCROLLED_CLASS: &str = "scrolled";
/// ARIA attribute mirrored from the nav panel state.
pub const ARIA_EXPANDED: &str = "aria-expanded";
/// ARIA label attribute for gallery items.
pub const ARIA_LABEL: &str = "aria-label";

/// An element (or group of elements) of the page DOM contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Target {
    /// `document.documentElement`.
    Root,
    /// `document.body`.
    Body,
    Header,
    Nav,
    NavToggle,
    /// Lightbox overlay container.
    Lightbox,
    LightboxImage,
    LightboxClose,
    /// Gallery item at the given position in document order.
    GalleryItem(usize),
    /// Revealable element at the given position in document order.
    Revealable(usize),
    /// Element receiving the current year.
    YearSlot(usize),
    Form,
    FieldError(Field),
    /// Every error container inside the form.
    ErrorSlots,
    FormStatus,
}

/// One DOM command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    SetAttribute {
        target: Target,
        name: &'static str,
        value: String,
    },
    AddClass {
        target: Target,
        class: &'static str,
    },
    RemoveClass {
        target: Target,
        class: &'static str,
    },
    SetText {
        target: Target,
        text: String,
    },
    /// Set an inline style property. An empty value removes the property.
    SetStyle {
        target: Target,
        property: &'static str,
        value: String,
    },
    Focus(Target),
    /// Stop observing the element for intersection changes.
    Unobserve(Target),
    /// Deliver [`SiteEvent::SendElapsed`](crate::SiteEvent::SendElapsed) after `delay`.
    ScheduleSend {
        delay: Duration,
    },
    /// Reset every control of the contact form to its initial value.
    ResetForm,
}

impl Effect {
    #[must_use]
    pub fn set_attribute(target: Target, name: &'static str, value: impl Into<String>) -> Self {
        Self::SetAttribute {
            target,
            name,
            value: value.into(),
        }
    }

    #[must_use]
    pub const fn add_class(target: Target, class: &'static str) -> Self {
        Self::AddClass { target, class }
    }

    #[must_use]
    pub const fn remove_class(target: Target, class: &'static str) -> Self {
        Self::RemoveClass { target, class }
    }

    /// Add or remove `class` depending on `present`.
    #[must_use]
    pub const fn class(target: Target, class: &'static str, present: bool) -> Self {
        if present {
            Self::AddClass { target, class }
        } else {
            Self::RemoveClass { target, class }
        }
    }

    #[must_use]
    pub fn set_text(target: Target, text: impl Into<String>) -> Self {
        Self::SetText {
            target,
            text: text.into(),
        }
    }

    #[must_use]
    pub fn set_style(target: Target, property: &'static str, value: impl Into<String>) -> Self {
        Self::SetStyle {
            target,
            property,
            value: value.into(),
        }
    }

    /// The element this effect acts on, if it acts on one.
    #[must_use]
    pub const fn target(&self) -> Option<Target> {
        match self {
            Self::SetAttribute { target, .. }
            | Self::AddClass { target, .. }
            | Self::RemoveClass { target, .. }
            | Self::SetText { target, .. }
            | Self::SetStyle { target, .. } => Some(*target),
            Self::Focus(target) | Self::Unobserve(target) => Some(*target),
            Self::ScheduleSend { .. } => None,
            Self::ResetForm => Some(Target::Form),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn class_helper_picks_add_or_remove() {
        assert_eq!(
            Effect::class(Target::Header, SCROLLED_CLASS, true),
            Effect::add_class(Target::Header, SCROLLED_CLASS)
        );
        assert_eq!(
            Effect::class(Target::Header, SCROLLED_CLASS, false),
            Effect::remove_class(Target::Header, SCROLLED_CLASS)
        );
    }

    #[test]
    fn schedule_send_has_no_target() {
        let effect = Effect::ScheduleSend {
            delay: Duration::from_millis(800),
        };
        assert_eq!(effect.target(), None);
        assert_eq!(Effect::ResetForm.target(), Some(Target::Form));
        assert_eq!(
            Effect::Focus(Target::GalleryItem(3)).target(),
            Some(Target::GalleryItem(3))
        );
    }
}
