#![forbid(unsafe_code)]

//! Site configuration: DOM selectors, thresholds and timings.
//!
//! Every field has a default matching the shipped page markup, so a host
//! can mount with [`SiteConfig::default`] and only override what differs.
//! JSON input may be partial; missing fields keep their defaults.

use core::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SiteError};

// ---------------------------------------------------------------------------
// Selectors
// ---------------------------------------------------------------------------

/// CSS selectors binding each behavior to the page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Selectors {
    pub theme_toggle: String,
    pub nav_toggle: String,
    pub nav: String,
    /// Elements that fade in when scrolled into view.
    pub revealables: String,
    pub gallery: String,
    /// Items inside the gallery container.
    pub gallery_item: String,
    pub lightbox: String,
    pub lightbox_image: String,
    pub lightbox_close: String,
    pub lightbox_prev: String,
    pub lightbox_next: String,
    pub form: String,
    pub name_field: String,
    pub email_field: String,
    pub message_field: String,
    pub name_error: String,
    pub email_error: String,
    pub message_error: String,
    /// All error containers inside the form.
    pub error_slots: String,
    pub form_status: String,
    pub year: String,
    pub header: String,
}

impl Default for Selectors {
    fn default() -> Self {
        Self {
            theme_toggle: "#theme-toggle".into(),
            nav_toggle: "#nav-toggle".into(),
            nav: "#primary-nav".into(),
            revealables: ".reveal, .card, .gallery-item, .hero-card".into(),
            gallery: "#gallery".into(),
            gallery_item: ".gallery-item".into(),
            lightbox: "#lightbox".into(),
            lightbox_image: "#lightbox-img".into(),
            lightbox_close: "#lb-close".into(),
            lightbox_prev: "#lb-prev".into(),
            lightbox_next: "#lb-next".into(),
            form: "#contact-form".into(),
            name_field: "#name".into(),
            email_field: "#email".into(),
            message_field: "#message".into(),
            name_error: "#name-error".into(),
            email_error: "#email-error".into(),
            message_error: "#message-error".into(),
            error_slots: ".error".into(),
            form_status: "#form-status".into(),
            year: ".year".into(),
            header: ".site-header".into(),
        }
    }
}

// ---------------------------------------------------------------------------
// Per-behavior tuning
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeConfig {
    /// Local storage key holding `"light"` or `"dark"`.
    pub storage_key: String,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            storage_key: "acme-theme".into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NavConfig {
    /// Outside clicks close the panel only at or below this viewport width.
    pub breakpoint_px: f64,
}

impl Default for NavConfig {
    fn default() -> Self {
        Self {
            breakpoint_px: 900.0,
        }
    }
}

/// Options handed to the host's intersection observer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RevealConfig {
    pub root_margin: String,
    /// Minimum visible fraction of the element, in `[0, 1]`.
    pub threshold: f64,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            root_margin: "0px 0px -10% 0px".into(),
            threshold: 0.08,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LightboxConfig {
    /// Horizontal travel a swipe must exceed to navigate.
    pub swipe_threshold_px: f64,
}

impl Default for LightboxConfig {
    fn default() -> Self {
        Self {
            swipe_threshold_px: 50.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormConfig {
    /// Delay before the simulated send reports success.
    pub send_delay_ms: u64,
}

impl Default for FormConfig {
    fn default() -> Self {
        Self { send_delay_ms: 800 }
    }
}

impl FormConfig {
    #[must_use]
    pub const fn send_delay(&self) -> Duration {
        Duration::from_millis(self.send_delay_ms)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeaderConfig {
    /// Vertical scroll offset past which the header gets its scroll class.
    pub scroll_threshold_px: f64,
}

impl Default for HeaderConfig {
    fn default() -> Self {
        Self {
            scroll_threshold_px: 80.0,
        }
    }
}

// ---------------------------------------------------------------------------
// SiteConfig
// ---------------------------------------------------------------------------

/// Full configuration for one mounted page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    pub selectors: Selectors,
    pub theme: ThemeConfig,
    pub nav: NavConfig,
    pub reveal: RevealConfig,
    pub lightbox: LightboxConfig,
    pub form: FormConfig,
    pub header: HeaderConfig,
    /// `tracing` filter directives for the host's log output.
    pub log_filter: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            selectors: Selectors::default(),
            theme: ThemeConfig::default(),
            nav: NavConfig::default(),
            reveal: RevealConfig::default(),
            lightbox: LightboxConfig::default(),
            form: FormConfig::default(),
            header: HeaderConfig::default(),
            log_filter: "info".into(),
        }
    }
}

impl SiteConfig {
    /// Parse a (possibly partial) JSON config and validate it.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values no page could work with.
    pub fn validate(&self) -> Result<()> {
        if self.theme.storage_key.trim().is_empty() {
            return Err(SiteError::config("theme.storage_key", "must not be empty"));
        }
        if !(self.nav.breakpoint_px.is_finite() && self.nav.breakpoint_px > 0.0) {
            return Err(SiteError::config(
                "nav.breakpoint_px",
                format!("must be positive, got {}", self.nav.breakpoint_px),
            ));
        }
        if !(0.0..=1.0).contains(&self.reveal.threshold) {
            return Err(SiteError::config(
                "reveal.threshold",
                format!("must be within [0, 1], got {}", self.reveal.threshold),
            ));
        }
        if !(self.lightbox.swipe_threshold_px.is_finite()
            && self.lightbox.swipe_threshold_px >= 0.0)
        {
            return Err(SiteError::config(
                "lightbox.swipe_threshold_px",
                format!(
                    "must be a non-negative distance, got {}",
                    self.lightbox.swipe_threshold_px
                ),
            ));
        }
        if !self.header.scroll_threshold_px.is_finite() {
            return Err(SiteError::config(
                "header.scroll_threshold_px",
                "must be finite",
            ));
        }
        Ok(())
    }
}
