#![forbid(unsafe_code)]

//! Event wiring and effect application.
//!
//! [`App`] is shared by every listener closure through an `Rc`. Each
//! listener reduces its DOM event to a [`SiteEvent`], the core turns it
//! into effects, and [`App::apply`] performs them. The `RefCell` borrow on
//! the core is released before any effect runs, so effects that re-enter
//! (the send timer) never observe a held borrow.

use std::cell::RefCell;
use std::rc::Rc;

use js_sys::{Array, Function, Object};
use siteui_core::config::RevealConfig;
use siteui_core::{Effect, IntersectionSample, Key, OutsideClick, Site, SiteEvent};
use tracing::{debug, warn};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{
    Element, Event, EventTarget, HtmlElement, IntersectionObserver, IntersectionObserverEntry,
    IntersectionObserverInit, KeyboardEvent, Node, TouchEvent, Window,
};

use crate::dom::DomRegistry;
use crate::storage::LocalStorage;

pub(crate) struct App {
    pub site: RefCell<Site<LocalStorage>>,
    pub dom: DomRegistry,
    pub window: Window,
    observer: RefCell<Option<IntersectionObserver>>,
}

/// Register `handler` for `kind` events on `target` for the page lifetime.
fn listen<E, F>(target: &EventTarget, kind: &str, mut handler: F) -> Result<(), JsValue>
where
    E: JsCast + 'static,
    F: FnMut(E) + 'static,
{
    let closure = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
        if let Ok(event) = event.dyn_into::<E>() {
            handler(event);
        }
    });
    target.add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

fn contains(container: &Element, target: Option<&Node>) -> bool {
    container.contains(target)
}

impl App {
    pub(crate) fn new(site: Site<LocalStorage>, dom: DomRegistry, window: Window) -> Rc<Self> {
        Rc::new(Self {
            site: RefCell::new(site),
            dom,
            window,
            observer: RefCell::new(None),
        })
    }

    /// Feed one event to the core and apply the result.
    pub(crate) fn dispatch(self: &Rc<Self>, event: SiteEvent) {
        let effects = self.site.borrow_mut().dispatch(event);
        self.apply(effects);
    }

    pub(crate) fn apply(self: &Rc<Self>, effects: Vec<Effect>) {
        for effect in effects {
            if let Err(err) = self.apply_one(&effect) {
                warn!(?effect, error = ?err, "effect failed");
            }
        }
    }

    fn apply_one(self: &Rc<Self>, effect: &Effect) -> Result<(), JsValue> {
        match effect {
            Effect::SetAttribute {
                target,
                name,
                value,
            } => {
                for el in self.dom.resolve(*target) {
                    el.set_attribute(name, value)?;
                }
            }
            Effect::AddClass { target, class } => {
                for el in self.dom.resolve(*target) {
                    el.class_list().add_1(class)?;
                }
            }
            Effect::RemoveClass { target, class } => {
                for el in self.dom.resolve(*target) {
                    el.class_list().remove_1(class)?;
                }
            }
            Effect::SetText { target, text } => {
                for el in self.dom.resolve(*target) {
                    el.set_text_content(Some(text.as_str()));
                }
            }
            Effect::SetStyle {
                target,
                property,
                value,
            } => {
                for el in self.dom.resolve(*target) {
                    let Some(el) = el.dyn_ref::<HtmlElement>() else {
                        continue;
                    };
                    let style = el.style();
                    if value.is_empty() {
                        style.remove_property(property)?;
                    } else {
                        style.set_property(property, value)?;
                    }
                }
            }
            Effect::Focus(target) => {
                for el in self.dom.resolve(*target) {
                    if let Some(el) = el.dyn_ref::<HtmlElement>() {
                        el.focus()?;
                    }
                }
            }
            Effect::Unobserve(target) => {
                if let Some(observer) = self.observer.borrow().as_ref() {
                    for el in self.dom.resolve(*target) {
                        observer.unobserve(&el);
                    }
                }
            }
            Effect::ScheduleSend { delay } => {
                let app = Rc::clone(self);
                let callback =
                    Closure::once_into_js(move || app.dispatch(SiteEvent::SendElapsed));
                let millis = i32::try_from(delay.as_millis()).unwrap_or(i32::MAX);
                self.window
                    .set_timeout_with_callback_and_timeout_and_arguments_0(
                        callback.unchecked_ref::<Function>(),
                        millis,
                    )?;
            }
            Effect::ResetForm => {
                if let Some(form) = &self.dom.form {
                    form.form.reset();
                }
            }
        }
        Ok(())
    }

    /// Attach every listener whose elements exist.
    pub(crate) fn install(self: &Rc<Self>, reveal: &RevealConfig) -> Result<(), JsValue> {
        let document: EventTarget = self
            .window
            .document()
            .ok_or_else(|| JsValue::from_str("document unavailable"))?
            .into();

        if let Some(toggle) = &self.dom.theme_toggle {
            let app = Rc::clone(self);
            listen(toggle, "click", move |_: Event| {
                app.dispatch(SiteEvent::ThemeToggleClicked);
            })?;
        }

        if let Some((_, toggle)) = &self.dom.nav {
            let app = Rc::clone(self);
            listen(toggle, "click", move |_: Event| {
                app.dispatch(SiteEvent::NavToggleClicked);
            })?;

            let app = Rc::clone(self);
            listen(&document, "click", move |event: Event| {
                let Some((nav, toggle)) = &app.dom.nav else {
                    return;
                };
                let target = event.target().and_then(|t| t.dyn_into::<Node>().ok());
                let click = OutsideClick {
                    viewport_width: app
                        .window
                        .inner_width()
                        .ok()
                        .and_then(|w| w.as_f64())
                        .unwrap_or(f64::INFINITY),
                    in_nav: contains(nav, target.as_ref()),
                    in_toggle: contains(toggle, target.as_ref()),
                };
                app.dispatch(SiteEvent::DocumentClicked(click));
            })?;
        }

        self.install_reveal(reveal)?;
        self.install_lightbox(&document)?;

        if let Some(form) = &self.dom.form {
            let app = Rc::clone(self);
            listen(&form.form, "submit", move |event: Event| {
                event.prevent_default();
                let Some(form) = &app.dom.form else {
                    return;
                };
                app.dispatch(SiteEvent::FormSubmitted(form.input()));
            })?;
        }

        if self.dom.header.is_some() {
            let app = Rc::clone(self);
            listen(&self.window, "scroll", move |_: Event| {
                let y = app.window.scroll_y().unwrap_or(0.0);
                app.dispatch(SiteEvent::Scrolled { y });
            })?;
        }

        debug!("listeners installed");
        Ok(())
    }

    /// Observe revealables, when the browser can.
    fn install_reveal(self: &Rc<Self>, config: &RevealConfig) -> Result<(), JsValue> {
        if self.dom.revealables.is_empty() || !has_intersection_observer(&self.window) {
            return Ok(());
        }

        let app = Rc::clone(self);
        let callback = Closure::<dyn FnMut(Array, IntersectionObserver)>::new(
            move |entries: Array, _observer: IntersectionObserver| {
                let samples = entries
                    .iter()
                    .filter_map(|entry| entry.dyn_into::<IntersectionObserverEntry>().ok())
                    .filter_map(|entry| {
                        let index = app.dom.revealable_index(&entry.target())?;
                        Some(IntersectionSample {
                            index,
                            is_intersecting: entry.is_intersecting(),
                        })
                    })
                    .collect();
                app.dispatch(SiteEvent::Intersections(samples));
            },
        );

        let options = IntersectionObserverInit::new();
        options.set_root_margin(&config.root_margin);
        options.set_threshold(&JsValue::from_f64(config.threshold));
        let observer =
            IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &options)?;
        callback.forget();

        for el in &self.dom.revealables {
            observer.observe(el);
        }
        *self.observer.borrow_mut() = Some(observer);
        Ok(())
    }

    fn install_lightbox(self: &Rc<Self>, document: &EventTarget) -> Result<(), JsValue> {
        let Some(gallery) = &self.dom.gallery else {
            return Ok(());
        };

        for (index, item) in gallery.items.iter().enumerate() {
            let app = Rc::clone(self);
            listen(item, "click", move |_: Event| {
                app.dispatch(SiteEvent::GalleryItemClicked(index));
            })?;
        }

        let controls = [
            (gallery.close.as_ref(), SiteEvent::LightboxCloseClicked),
            (gallery.prev.as_ref(), SiteEvent::LightboxPrevClicked),
            (gallery.next.as_ref(), SiteEvent::LightboxNextClicked),
        ];
        for (control, event) in controls {
            let Some(control) = control else {
                continue;
            };
            let app = Rc::clone(self);
            listen(control, "click", move |_: Event| {
                app.dispatch(event.clone());
            })?;
        }

        let app = Rc::clone(self);
        listen(&gallery.overlay, "click", move |event: Event| {
            let Some(gallery) = &app.dom.gallery else {
                return;
            };
            let on_backdrop = event
                .target()
                .is_some_and(|target| Object::is(&target, &gallery.overlay));
            app.dispatch(SiteEvent::LightboxClicked { on_backdrop });
        })?;

        let app = Rc::clone(self);
        listen(document, "keydown", move |event: KeyboardEvent| {
            app.dispatch(SiteEvent::KeyDown(Key::from_dom_key(&event.key())));
        })?;

        if let Some(image) = &gallery.image {
            let app = Rc::clone(self);
            listen(image, "touchstart", move |event: TouchEvent| {
                if let Some(touch) = event.touches().get(0) {
                    let x = f64::from(touch.client_x());
                    app.dispatch(SiteEvent::TouchStart { x });
                }
            })?;

            let app = Rc::clone(self);
            listen(image, "touchend", move |event: TouchEvent| {
                if let Some(touch) = event.changed_touches().get(0) {
                    let x = f64::from(touch.client_x());
                    app.dispatch(SiteEvent::TouchEnd { x });
                }
            })?;
        }
        Ok(())
    }
}

pub(crate) fn has_intersection_observer(window: &Window) -> bool {
    js_sys::Reflect::has(window, &JsValue::from_str("IntersectionObserver")).unwrap_or(false)
}
