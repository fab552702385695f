#![forbid(unsafe_code)]

//! `siteui-core` holds the behavior behind the Acme marketing site.
//!
//! Design goals:
//! - **Host-driven**: the embedding environment (the browser binding in
//!   `siteui-web`) pushes DOM events in as [`SiteEvent`] values.
//! - **Effects out**: every transition returns a list of typed [`Effect`]s
//!   (set a class, move focus, schedule the simulated send). The host applies
//!   them; nothing here touches the DOM.
//! - **Independent components**: theme, nav, reveal, lightbox, form, header
//!   and year stamp never call into each other.
//!
//! ```
//! use siteui_core::{Effect, MemoryStore, Site, SiteConfig, SiteEnvironment, SiteEvent, SiteManifest, Target};
//!
//! let manifest = SiteManifest {
//!     has_theme_toggle: true,
//!     ..SiteManifest::default()
//! };
//! let env = SiteEnvironment { prefers_light: true, ..SiteEnvironment::default() };
//! let (mut site, _mount) = Site::mount(&SiteConfig::default(), manifest, env, MemoryStore::new());
//!
//! let effects = site.dispatch(SiteEvent::ThemeToggleClicked);
//! assert!(effects.contains(&Effect::set_attribute(Target::Root, "data-theme", "dark")));
//! ```

pub mod config;
pub mod effect;
pub mod error;
pub mod form;
pub mod header;
pub mod input;
pub mod lightbox;
pub mod nav;
pub mod reveal;
pub mod site;
pub mod theme;
pub mod year;

pub use config::SiteConfig;
pub use effect::{Effect, Target};
pub use error::{Result, SiteError};
pub use form::{ContactForm, Field, FormInput, ValidationReport};
pub use header::HeaderScroll;
pub use input::{Key, SwipeDirection, SwipeTracker};
pub use lightbox::{GalleryItem, Lightbox, LightboxState};
pub use nav::{NavMenu, OutsideClick};
pub use reveal::{IntersectionSample, RevealSet, RevealState};
pub use site::{Site, SiteEnvironment, SiteEvent, SiteManifest};
pub use theme::{MemoryStore, PreferenceStore, Theme, ThemeController};
pub use year::YearStamp;
