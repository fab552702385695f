#![forbid(unsafe_code)]

//! End-to-end flows through the `Site` aggregate, one per page behavior.
//!
//! Run:
//!   cargo test -p siteui-core --test site_flow

use core::time::Duration;

use pretty_assertions::assert_eq;
use siteui_core::effect::{
    ARIA_EXPANDED, ARIA_LABEL, OPEN_CLASS, SCROLLED_CLASS, THEME_ATTRIBUTE, VISIBLE_CLASS,
};
use siteui_core::form::{EMAIL_ERROR, MESSAGE_ERROR, NAME_ERROR, STATUS_SENT};
use siteui_core::{
    Effect, Field, FormInput, GalleryItem, IntersectionSample, Key, LightboxState, MemoryStore,
    OutsideClick, RevealState, Site, SiteConfig, SiteEnvironment, SiteEvent, SiteManifest, Target,
    Theme,
};

fn full_page() -> SiteManifest {
    SiteManifest {
        has_theme_toggle: true,
        has_nav: true,
        revealables: 4,
        intersection_observer: true,
        gallery: Some(
            (0..3)
                .map(|i| {
                    let alt = format!("Large {i}");
                    let thumbnail_alt = format!("Thumb {i}");
                    GalleryItem::new(
                        i,
                        format!("/img/large-{i}.jpg"),
                        Some(alt.as_str()),
                        Some(thumbnail_alt.as_str()),
                    )
                })
                .collect(),
        ),
        has_form: true,
        year_slots: 2,
        has_header: true,
    }
}

fn env() -> SiteEnvironment {
    SiteEnvironment {
        prefers_light: true,
        scroll_y: 0.0,
        year: 2026,
    }
}

fn mount(store: MemoryStore) -> (Site<MemoryStore>, Vec<Effect>) {
    Site::mount(&SiteConfig::default(), full_page(), env(), store)
}

#[test]
fn mount_initialises_every_behavior() {
    let (_site, effects) = mount(MemoryStore::new());
    assert_eq!(
        effects,
        vec![
            Effect::set_attribute(Target::Root, THEME_ATTRIBUTE, "light"),
            Effect::set_style(Target::Root, "scroll-behavior", "smooth"),
            Effect::set_attribute(Target::GalleryItem(0), ARIA_LABEL, "Thumb 0"),
            Effect::set_attribute(Target::GalleryItem(1), ARIA_LABEL, "Thumb 1"),
            Effect::set_attribute(Target::GalleryItem(2), ARIA_LABEL, "Thumb 2"),
            Effect::set_text(Target::YearSlot(0), "2026"),
            Effect::set_text(Target::YearSlot(1), "2026"),
            Effect::remove_class(Target::Header, SCROLLED_CLASS),
        ]
    );
}

#[test]
fn theme_double_toggle_is_identity() {
    let (mut site, _) = mount(MemoryStore::with_entry("acme-theme", "dark"));
    assert_eq!(site.theme(), Theme::Dark);
    site.dispatch(SiteEvent::ThemeToggleClicked);
    assert_eq!(site.store().get("acme-theme"), Some("light"));
    let effects = site.dispatch(SiteEvent::ThemeToggleClicked);
    assert_eq!(
        effects,
        vec![Effect::set_attribute(Target::Root, THEME_ATTRIBUTE, "dark")]
    );
    assert_eq!(site.theme(), Theme::Dark);
    assert_eq!(site.store().get("acme-theme"), Some("dark"));
}

#[test]
fn custom_storage_key_is_honoured() {
    let config = SiteConfig::from_json(r#"{"theme":{"storage_key":"site-theme"}}"#)
        .expect("config parses");
    let (mut site, _) = Site::mount(
        &config,
        full_page(),
        env(),
        MemoryStore::with_entry("site-theme", "dark"),
    );
    assert_eq!(site.theme(), Theme::Dark);
    site.dispatch(SiteEvent::ThemeToggleClicked);
    assert_eq!(site.store().get("site-theme"), Some("light"));
    assert_eq!(site.store().get("acme-theme"), None);
}

#[test]
fn nav_toggle_and_outside_click() {
    let (mut site, _) = mount(MemoryStore::new());
    let effects = site.dispatch(SiteEvent::NavToggleClicked);
    assert_eq!(
        effects,
        vec![
            Effect::add_class(Target::Nav, OPEN_CLASS),
            Effect::set_attribute(Target::NavToggle, ARIA_EXPANDED, "true"),
        ]
    );

    // The toggle click itself bubbles to the document.
    let toggle_bubble = SiteEvent::DocumentClicked(OutsideClick {
        viewport_width: 375.0,
        in_nav: false,
        in_toggle: true,
    });
    assert!(site.dispatch(toggle_bubble).is_empty());

    let desktop = SiteEvent::DocumentClicked(OutsideClick {
        viewport_width: 1440.0,
        in_nav: false,
        in_toggle: false,
    });
    assert!(site.dispatch(desktop).is_empty());

    let mobile = SiteEvent::DocumentClicked(OutsideClick {
        viewport_width: 375.0,
        in_nav: false,
        in_toggle: false,
    });
    assert_eq!(
        site.dispatch(mobile),
        vec![
            Effect::remove_class(Target::Nav, OPEN_CLASS),
            Effect::set_attribute(Target::NavToggle, ARIA_EXPANDED, "false"),
        ]
    );
    assert_eq!(site.nav().map(|nav| nav.is_open()), Some(false));
}

#[test]
fn reveal_is_monotonic_across_batches() {
    let (mut site, _) = mount(MemoryStore::new());
    let first = site.dispatch(SiteEvent::Intersections(vec![
        IntersectionSample {
            index: 0,
            is_intersecting: true,
        },
        IntersectionSample {
            index: 1,
            is_intersecting: false,
        },
    ]));
    assert_eq!(
        first,
        vec![
            Effect::add_class(Target::Revealable(0), VISIBLE_CLASS),
            Effect::Unobserve(Target::Revealable(0)),
        ]
    );

    let second = site.dispatch(SiteEvent::Intersections(vec![
        IntersectionSample {
            index: 0,
            is_intersecting: false,
        },
        IntersectionSample {
            index: 1,
            is_intersecting: true,
        },
    ]));
    assert_eq!(
        second,
        vec![
            Effect::add_class(Target::Revealable(1), VISIBLE_CLASS),
            Effect::Unobserve(Target::Revealable(1)),
        ]
    );
    assert_eq!(site.reveal().state(0), Some(RevealState::Visible));
    assert_eq!(site.reveal().state(2), Some(RevealState::Observed));
}

#[test]
fn lightbox_wraps_and_restores_focus() {
    let (mut site, _) = mount(MemoryStore::new());
    let current = |site: &Site<MemoryStore>| site.lightbox().and_then(|lb| lb.current_index());

    site.dispatch(SiteEvent::GalleryItemClicked(0));
    site.dispatch(SiteEvent::KeyDown(Key::ArrowLeft));
    assert_eq!(current(&site), Some(2));
    site.dispatch(SiteEvent::LightboxNextClicked);
    assert_eq!(current(&site), Some(0));
    site.dispatch(SiteEvent::TouchStart { x: 300.0 });
    site.dispatch(SiteEvent::TouchEnd { x: 200.0 });
    assert_eq!(current(&site), Some(1));

    let effects = site.dispatch(SiteEvent::KeyDown(Key::Escape));
    assert_eq!(
        effects,
        vec![
            Effect::remove_class(Target::Lightbox, OPEN_CLASS),
            Effect::set_style(Target::Body, "overflow", ""),
            Effect::set_attribute(Target::LightboxImage, "src", ""),
            Effect::set_attribute(Target::LightboxImage, "alt", ""),
            Effect::Focus(Target::GalleryItem(1)),
        ]
    );
    assert_eq!(
        site.lightbox().map(|lb| lb.state()),
        Some(LightboxState::Closed)
    );

    assert!(site.dispatch(SiteEvent::LightboxPrevClicked).is_empty());
    assert!(site.dispatch(SiteEvent::LightboxCloseClicked).is_empty());
    assert_eq!(current(&site), None);
}

#[test]
fn form_rejects_bad_input_without_sending() {
    let (mut site, _) = mount(MemoryStore::new());
    let effects = site.dispatch(SiteEvent::FormSubmitted(FormInput::new(
        "A", "bad", "short",
    )));
    for (field, message) in [
        (Field::Name, NAME_ERROR),
        (Field::Email, EMAIL_ERROR),
        (Field::Message, MESSAGE_ERROR),
    ] {
        assert!(effects.contains(&Effect::set_text(Target::FieldError(field), message)));
    }
    assert!(
        !effects
            .iter()
            .any(|effect| matches!(effect, Effect::ScheduleSend { .. }))
    );
    assert!(site.dispatch(SiteEvent::SendElapsed).is_empty());
}

#[test]
fn form_accepts_valid_input_and_clears_after_delay() {
    let (mut site, _) = mount(MemoryStore::new());
    let effects = site.dispatch(SiteEvent::FormSubmitted(FormInput::new(
        "Jo",
        "a@b.co",
        "1234567890",
    )));
    assert_eq!(
        effects.last(),
        Some(&Effect::ScheduleSend {
            delay: Duration::from_millis(800)
        })
    );
    assert_eq!(site.form().map(|form| form.pending_sends()), Some(1));

    let done = site.dispatch(SiteEvent::SendElapsed);
    assert!(done.contains(&Effect::set_text(Target::FormStatus, STATUS_SENT)));
    assert_eq!(done.last(), Some(&Effect::ResetForm));
    assert_eq!(site.form().map(|form| form.pending_sends()), Some(0));
}

#[test]
fn header_follows_scroll_offset() {
    let (mut site, _) = mount(MemoryStore::new());
    assert_eq!(
        site.dispatch(SiteEvent::Scrolled { y: 81.0 }),
        vec![Effect::add_class(Target::Header, SCROLLED_CLASS)]
    );
    assert!(site.dispatch(SiteEvent::Scrolled { y: 400.0 }).is_empty());
    assert_eq!(
        site.dispatch(SiteEvent::Scrolled { y: 80.0 }),
        vec![Effect::remove_class(Target::Header, SCROLLED_CLASS)]
    );
}
