#![forbid(unsafe_code)]

//! DOM contract lookup.
//!
//! [`DomRegistry`] queries every element the behaviors bind to, once, at
//! mount. Missing elements are recorded as absent; the matching behavior is
//! then left out of the [`SiteManifest`]. [`DomRegistry::resolve`] maps a
//! core [`Target`] back to live elements when effects are applied.

use siteui_core::config::Selectors;
use siteui_core::{Field, FormInput, GalleryItem, SiteManifest, Target};
use tracing::{debug, warn};
use wasm_bindgen::JsCast;
use web_sys::{
    Document, Element, HtmlElement, HtmlFormElement, HtmlImageElement, HtmlInputElement,
    HtmlTextAreaElement, NodeList,
};

fn log_bad_selector(selector: &str, err: &wasm_bindgen::JsValue) {
    warn!(selector, error = ?err, "selector rejected by the browser");
}

fn query(document: &Document, selector: &str) -> Option<Element> {
    document
        .query_selector(selector)
        .inspect_err(|err| log_bad_selector(selector, err))
        .ok()
        .flatten()
}

fn query_in(scope: &Element, selector: &str) -> Option<Element> {
    scope
        .query_selector(selector)
        .inspect_err(|err| log_bad_selector(selector, err))
        .ok()
        .flatten()
}

fn elements(list: NodeList) -> Vec<Element> {
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

fn query_all(document: &Document, selector: &str) -> Vec<Element> {
    document
        .query_selector_all(selector)
        .inspect_err(|err| log_bad_selector(selector, err))
        .map(elements)
        .unwrap_or_default()
}

fn query_all_in(scope: &Element, selector: &str) -> Vec<Element> {
    scope
        .query_selector_all(selector)
        .inspect_err(|err| log_bad_selector(selector, err))
        .map(elements)
        .unwrap_or_default()
}

const fn field_slot(field: Field) -> usize {
    match field {
        Field::Name => 0,
        Field::Email => 1,
        Field::Message => 2,
    }
}

/// The gallery and everything the lightbox needs to display it.
pub(crate) struct GalleryDom {
    pub items: Vec<Element>,
    pub overlay: Element,
    pub image: Option<Element>,
    pub close: Option<Element>,
    pub prev: Option<Element>,
    pub next: Option<Element>,
}

/// The contact form and its companions.
pub(crate) struct FormDom {
    pub form: HtmlFormElement,
    fields: [Option<Element>; 3],
    field_errors: [Option<Element>; 3],
    error_slots: Vec<Element>,
    status: Option<Element>,
}

impl FormDom {
    fn field_value(&self, field: Field) -> String {
        let Some(element) = &self.fields[field_slot(field)] else {
            return String::new();
        };
        if let Some(input) = element.dyn_ref::<HtmlInputElement>() {
            input.value()
        } else if let Some(area) = element.dyn_ref::<HtmlTextAreaElement>() {
            area.value()
        } else {
            element.text_content().unwrap_or_default()
        }
    }

    /// Current field values.
    pub(crate) fn input(&self) -> FormInput {
        FormInput::new(
            self.field_value(Field::Name),
            self.field_value(Field::Email),
            self.field_value(Field::Message),
        )
    }
}

/// Every element of the page contract, looked up once.
pub(crate) struct DomRegistry {
    pub root: Element,
    pub body: Option<HtmlElement>,
    pub header: Option<Element>,
    pub theme_toggle: Option<Element>,
    /// Nav panel and its toggle; only kept when both exist.
    pub nav: Option<(Element, Element)>,
    pub revealables: Vec<Element>,
    pub gallery: Option<GalleryDom>,
    pub form: Option<FormDom>,
    pub year_slots: Vec<Element>,
}

impl DomRegistry {
    pub(crate) fn scan(document: &Document, selectors: &Selectors) -> Option<Self> {
        let root = document.document_element()?;

        let nav = match (
            query(document, &selectors.nav),
            query(document, &selectors.nav_toggle),
        ) {
            (Some(nav), Some(toggle)) => Some((nav, toggle)),
            _ => None,
        };

        let gallery = match (
            query(document, &selectors.gallery),
            query(document, &selectors.lightbox),
        ) {
            (Some(gallery), Some(overlay)) => Some(GalleryDom {
                items: query_all_in(&gallery, &selectors.gallery_item),
                overlay,
                image: query(document, &selectors.lightbox_image),
                close: query(document, &selectors.lightbox_close),
                prev: query(document, &selectors.lightbox_prev),
                next: query(document, &selectors.lightbox_next),
            }),
            _ => None,
        };

        let form = query(document, &selectors.form)
            .and_then(|el| el.dyn_into::<HtmlFormElement>().ok())
            .map(|form| FormDom {
                fields: [
                    query_in(&form, &selectors.name_field),
                    query_in(&form, &selectors.email_field),
                    query_in(&form, &selectors.message_field),
                ],
                field_errors: [
                    query_in(&form, &selectors.name_error),
                    query_in(&form, &selectors.email_error),
                    query_in(&form, &selectors.message_error),
                ],
                error_slots: query_all_in(&form, &selectors.error_slots),
                status: query(document, &selectors.form_status),
                form,
            });

        let registry = Self {
            root,
            body: document.body(),
            header: query(document, &selectors.header),
            theme_toggle: query(document, &selectors.theme_toggle),
            nav,
            revealables: query_all(document, &selectors.revealables),
            gallery,
            form,
            year_slots: query_all(document, &selectors.year),
        };
        debug!(
            revealables = registry.revealables.len(),
            gallery_items = registry.gallery.as_ref().map_or(0, |g| g.items.len()),
            form = registry.form.is_some(),
            "dom scanned"
        );
        Some(registry)
    }

    /// Describe what was found for [`siteui_core::Site::mount`].
    pub(crate) fn manifest(&self, intersection_observer: bool) -> SiteManifest {
        SiteManifest {
            has_theme_toggle: self.theme_toggle.is_some(),
            has_nav: self.nav.is_some(),
            revealables: self.revealables.len(),
            intersection_observer,
            gallery: self.gallery.as_ref().map(|gallery| {
                gallery
                    .items
                    .iter()
                    .enumerate()
                    .map(|(position, item)| gallery_item(position, item))
                    .collect()
            }),
            has_form: self.form.is_some(),
            year_slots: self.year_slots.len(),
            has_header: self.header.is_some(),
        }
    }

    /// Live elements behind `target`. Absent elements resolve to nothing.
    pub(crate) fn resolve(&self, target: Target) -> Vec<Element> {
        let one = |el: Option<&Element>| -> Vec<Element> { el.cloned().into_iter().collect() };
        match target {
            Target::Root => vec![self.root.clone()],
            Target::Body => self
                .body
                .as_ref()
                .map(|body| body.clone().unchecked_into::<Element>())
                .into_iter()
                .collect(),
            Target::Header => one(self.header.as_ref()),
            Target::Nav => one(self.nav.as_ref().map(|(nav, _)| nav)),
            Target::NavToggle => one(self.nav.as_ref().map(|(_, toggle)| toggle)),
            Target::Lightbox => one(self.gallery.as_ref().map(|g| &g.overlay)),
            Target::LightboxImage => one(self.gallery.as_ref().and_then(|g| g.image.as_ref())),
            Target::LightboxClose => one(self.gallery.as_ref().and_then(|g| g.close.as_ref())),
            Target::GalleryItem(index) => {
                one(self.gallery.as_ref().and_then(|g| g.items.get(index)))
            }
            Target::Revealable(index) => one(self.revealables.get(index)),
            Target::YearSlot(index) => one(self.year_slots.get(index)),
            Target::Form => one(self.form.as_ref().map(|f| f.form.unchecked_ref::<Element>())),
            Target::FieldError(field) => one(
                self.form
                    .as_ref()
                    .and_then(|f| f.field_errors[field_slot(field)].as_ref()),
            ),
            Target::ErrorSlots => self
                .form
                .as_ref()
                .map(|f| f.error_slots.clone())
                .unwrap_or_default(),
            Target::FormStatus => one(self.form.as_ref().and_then(|f| f.status.as_ref())),
        }
    }

    /// Position of `element` in the revealable set.
    pub(crate) fn revealable_index(&self, element: &Element) -> Option<usize> {
        self.revealables.iter().position(|el| el == element)
    }
}

fn gallery_item(position: usize, item: &Element) -> GalleryItem {
    let thumbnail_alt = query_in(item, "img")
        .and_then(|img| img.dyn_into::<HtmlImageElement>().ok())
        .map(|img| img.alt());
    GalleryItem::new(
        position,
        item.get_attribute("data-src").unwrap_or_default(),
        item.get_attribute("data-alt").as_deref(),
        thumbnail_alt.as_deref(),
    )
}
