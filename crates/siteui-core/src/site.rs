#![forbid(unsafe_code)]

//! The page aggregate.
//!
//! [`Site`] owns one controller per behavior and routes host events to
//! them. Behaviors whose elements are missing from the page are simply not
//! constructed; events aimed at them produce no effects.

use tracing::{debug, debug_span, trace};

use crate::config::SiteConfig;
use crate::effect::{Effect, Target};
use crate::form::{ContactForm, FormInput};
use crate::header::HeaderScroll;
use crate::input::Key;
use crate::lightbox::{GalleryItem, Lightbox};
use crate::nav::{NavMenu, OutsideClick};
use crate::reveal::{IntersectionSample, RevealSet};
use crate::theme::{PreferenceStore, Theme, ThemeController};
use crate::year::YearStamp;

/// What the host found on the page at mount time.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SiteManifest {
    pub has_theme_toggle: bool,
    /// Both the nav panel and its toggle are present.
    pub has_nav: bool,
    /// Number of revealable elements.
    pub revealables: usize,
    /// The host can observe intersections.
    pub intersection_observer: bool,
    /// Gallery items, when the gallery and the lightbox overlay both exist.
    pub gallery: Option<Vec<GalleryItem>>,
    pub has_form: bool,
    pub year_slots: usize,
    pub has_header: bool,
}

/// Host facts read once at mount.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SiteEnvironment {
    /// `prefers-color-scheme: light` matches.
    pub prefers_light: bool,
    pub scroll_y: f64,
    pub year: i32,
}

/// One DOM event, already reduced by the host.
#[derive(Debug, Clone, PartialEq)]
pub enum SiteEvent {
    ThemeToggleClicked,
    NavToggleClicked,
    /// Any click on the document, used for closing the nav.
    DocumentClicked(OutsideClick),
    Intersections(Vec<IntersectionSample>),
    GalleryItemClicked(usize),
    LightboxCloseClicked,
    LightboxPrevClicked,
    LightboxNextClicked,
    /// Click that reached the overlay element.
    LightboxClicked {
        on_backdrop: bool,
    },
    KeyDown(Key),
    TouchStart {
        x: f64,
    },
    TouchEnd {
        x: f64,
    },
    FormSubmitted(FormInput),
    /// The timer requested by [`Effect::ScheduleSend`] fired.
    SendElapsed,
    Scrolled {
        y: f64,
    },
}

impl SiteEvent {
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::ThemeToggleClicked => "theme_toggle_clicked",
            Self::NavToggleClicked => "nav_toggle_clicked",
            Self::DocumentClicked(_) => "document_clicked",
            Self::Intersections(_) => "intersections",
            Self::GalleryItemClicked(_) => "gallery_item_clicked",
            Self::LightboxCloseClicked => "lightbox_close_clicked",
            Self::LightboxPrevClicked => "lightbox_prev_clicked",
            Self::LightboxNextClicked => "lightbox_next_clicked",
            Self::LightboxClicked { .. } => "lightbox_clicked",
            Self::KeyDown(_) => "key_down",
            Self::TouchStart { .. } => "touch_start",
            Self::TouchEnd { .. } => "touch_end",
            Self::FormSubmitted(_) => "form_submitted",
            Self::SendElapsed => "send_elapsed",
            Self::Scrolled { .. } => "scrolled",
        }
    }
}

/// Every behavior of one mounted page.
#[derive(Debug)]
pub struct Site<S> {
    theme: ThemeController<S>,
    theme_toggle: bool,
    nav: Option<NavMenu>,
    reveal: RevealSet,
    lightbox: Option<Lightbox>,
    form: Option<ContactForm>,
    header: Option<HeaderScroll>,
}

impl<S: PreferenceStore> Site<S> {
    /// Build all behaviors and return the effects that initialise the page.
    pub fn mount(
        config: &SiteConfig,
        manifest: SiteManifest,
        env: SiteEnvironment,
        store: S,
    ) -> (Self, Vec<Effect>) {
        let _span = debug_span!("site_mount").entered();
        let mut effects = Vec::new();

        let (theme, theme_effect) =
            ThemeController::load(store, &config.theme.storage_key, env.prefers_light);
        effects.push(theme_effect);
        effects.push(Effect::set_style(Target::Root, "scroll-behavior", "smooth"));

        let mut reveal = RevealSet::new(manifest.revealables);
        if !manifest.intersection_observer {
            effects.extend(reveal.reveal_all());
        }

        let lightbox = manifest.gallery.map(|items| {
            let lightbox = Lightbox::new(items, config.lightbox.swipe_threshold_px);
            effects.extend(lightbox.label_effects());
            lightbox
        });

        effects.extend(YearStamp::new(manifest.year_slots).effects(env.year));

        let header = manifest.has_header.then(|| {
            let (header, effect) =
                HeaderScroll::mount(config.header.scroll_threshold_px, env.scroll_y);
            effects.push(effect);
            header
        });

        let site = Self {
            theme,
            theme_toggle: manifest.has_theme_toggle,
            nav: manifest
                .has_nav
                .then(|| NavMenu::new(config.nav.breakpoint_px)),
            reveal,
            lightbox,
            form: manifest
                .has_form
                .then(|| ContactForm::new(config.form.send_delay())),
            header,
        };
        debug!(
            revealables = site.reveal.len(),
            gallery = site.lightbox.as_ref().map_or(0, |lb| lb.items().len()),
            nav = site.nav.is_some(),
            form = site.form.is_some(),
            effects = effects.len(),
            "site mounted"
        );
        (site, effects)
    }

    /// Route one host event and return the effects to apply.
    pub fn dispatch(&mut self, event: SiteEvent) -> Vec<Effect> {
        let _span = debug_span!("site_dispatch", event = event.name()).entered();
        let effects = match event {
            SiteEvent::ThemeToggleClicked if self.theme_toggle => vec![self.theme.toggle()],
            SiteEvent::ThemeToggleClicked => Vec::new(),
            SiteEvent::NavToggleClicked => {
                self.nav.as_mut().map(NavMenu::toggle).unwrap_or_default()
            }
            SiteEvent::DocumentClicked(click) => self
                .nav
                .as_mut()
                .map(|nav| nav.outside_click(click))
                .unwrap_or_default(),
            SiteEvent::Intersections(samples) => self.reveal.on_intersections(&samples),
            SiteEvent::GalleryItemClicked(index) => self.with_lightbox(|lb| lb.open(index)),
            SiteEvent::LightboxCloseClicked => self.with_lightbox(Lightbox::close),
            SiteEvent::LightboxPrevClicked => self.with_lightbox(|lb| lb.navigate(-1)),
            SiteEvent::LightboxNextClicked => self.with_lightbox(|lb| lb.navigate(1)),
            SiteEvent::LightboxClicked { on_backdrop } => {
                self.with_lightbox(|lb| lb.overlay_click(on_backdrop))
            }
            SiteEvent::KeyDown(key) => self.with_lightbox(|lb| lb.handle_key(key)),
            SiteEvent::TouchStart { x } => self.with_lightbox(|lb| {
                lb.touch_start(x);
                Vec::new()
            }),
            SiteEvent::TouchEnd { x } => self.with_lightbox(|lb| lb.touch_end(x)),
            SiteEvent::FormSubmitted(input) => self
                .form
                .as_mut()
                .map(|form| form.submit(&input))
                .unwrap_or_default(),
            SiteEvent::SendElapsed => self
                .form
                .as_mut()
                .map(ContactForm::send_elapsed)
                .unwrap_or_default(),
            SiteEvent::Scrolled { y } => self
                .header
                .as_mut()
                .and_then(|header| header.on_scroll(y))
                .into_iter()
                .collect(),
        };
        trace!(effects = effects.len(), "dispatched");
        effects
    }

    fn with_lightbox(&mut self, f: impl FnOnce(&mut Lightbox) -> Vec<Effect>) -> Vec<Effect> {
        self.lightbox.as_mut().map(f).unwrap_or_default()
    }

    #[must_use]
    pub const fn theme(&self) -> Theme {
        self.theme.current()
    }

    #[must_use]
    pub const fn store(&self) -> &S {
        self.theme.store()
    }

    #[must_use]
    pub const fn nav(&self) -> Option<&NavMenu> {
        self.nav.as_ref()
    }

    #[must_use]
    pub const fn reveal(&self) -> &RevealSet {
        &self.reveal
    }

    #[must_use]
    pub const fn lightbox(&self) -> Option<&Lightbox> {
        self.lightbox.as_ref()
    }

    #[must_use]
    pub const fn form(&self) -> Option<&ContactForm> {
        self.form.as_ref()
    }

    #[must_use]
    pub const fn header(&self) -> Option<&HeaderScroll> {
        self.header.as_ref()
    }
}
