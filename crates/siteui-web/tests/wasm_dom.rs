#![cfg(target_arch = "wasm32")]
#![forbid(unsafe_code)]

//! Browser tests: mount against a fixture page and drive it through real
//! DOM events.
//!
//! Run:
//!   wasm-pack test --headless --firefox crates/siteui-web

use siteui_web::{SiteApp, mount_with_config};
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use wasm_bindgen_test::{wasm_bindgen_test, wasm_bindgen_test_configure};
use web_sys::{
    Document, Element, HtmlElement, HtmlFormElement, HtmlInputElement, HtmlTextAreaElement,
    KeyboardEvent, KeyboardEventInit,
};

wasm_bindgen_test_configure!(run_in_browser);

const FIXTURE: &str = r##"
<header class="site-header"></header>
<button id="theme-toggle">Theme</button>
<button id="nav-toggle" aria-expanded="false">Menu</button>
<nav id="primary-nav"><a href="#about">About</a></nav>
<section class="reveal">Hero</section>
<div id="gallery">
  <button class="gallery-item" data-src="/a.jpg" data-alt="A"><img alt="Thumb A"></button>
  <button class="gallery-item" data-src="/b.jpg" data-alt="B"><img alt=""></button>
  <button class="gallery-item" data-src="/c.jpg" data-alt="C"></button>
</div>
<div id="lightbox">
  <button id="lb-prev">Prev</button>
  <img id="lightbox-img" src="" alt="">
  <button id="lb-next">Next</button>
  <button id="lb-close">Close</button>
</div>
<form id="contact-form">
  <input id="name">
  <span class="error" id="name-error"></span>
  <input id="email">
  <span class="error" id="email-error"></span>
  <textarea id="message"></textarea>
  <span class="error" id="message-error"></span>
</form>
<p id="form-status"></p>
<span class="year"></span>
"##;

fn document() -> Document {
    web_sys::window()
        .and_then(|w| w.document())
        .expect("test runs in a browser")
}

fn element(selector: &str) -> Element {
    document()
        .query_selector(selector)
        .ok()
        .flatten()
        .unwrap_or_else(|| panic!("fixture missing {selector}"))
}

fn click(selector: &str) {
    element(selector)
        .dyn_into::<HtmlElement>()
        .expect("clickable element")
        .click();
}

fn text(selector: &str) -> String {
    element(selector).text_content().unwrap_or_default()
}

fn press(key: &str) {
    let init = KeyboardEventInit::new();
    init.set_key(key);
    init.set_bubbles(true);
    let event = KeyboardEvent::new_with_keyboard_event_init_dict("keydown", &init)
        .expect("keyboard event");
    document()
        .dispatch_event(&event)
        .expect("keydown dispatched");
}

fn setup(config: &str) -> SiteApp {
    let window = web_sys::window().expect("window");
    if let Ok(Some(storage)) = window.local_storage() {
        let _ = storage.clear();
    }
    document()
        .body()
        .expect("body")
        .set_inner_html(FIXTURE);
    mount_with_config(config).expect("mount succeeds")
}

async fn sleep(ms: i32) {
    let promise = js_sys::Promise::new(&mut |resolve, _reject| {
        web_sys::window()
            .expect("window")
            .set_timeout_with_callback_and_timeout_and_arguments_0(&resolve, ms)
            .expect("timer scheduled");
    });
    JsFuture::from(promise).await.expect("timer resolves");
}

#[wasm_bindgen_test]
fn theme_toggle_round_trips_through_local_storage() {
    let site = setup("{}");
    let root = document().document_element().expect("root");
    let initial = site.theme();
    assert_eq!(root.get_attribute("data-theme"), Some(initial.clone()));

    click("#theme-toggle");
    let flipped = site.theme();
    assert_ne!(flipped, initial);
    assert_eq!(root.get_attribute("data-theme"), Some(flipped.clone()));
    let stored = web_sys::window()
        .and_then(|w| w.local_storage().ok().flatten())
        .and_then(|s| s.get_item("acme-theme").ok().flatten());
    assert_eq!(stored, Some(flipped));

    click("#theme-toggle");
    assert_eq!(site.theme(), initial);
}

#[wasm_bindgen_test]
fn nav_toggle_mirrors_aria_expanded() {
    let site = setup("{}");
    click("#nav-toggle");
    assert!(site.nav_open());
    assert!(element("#primary-nav").class_list().contains("open"));
    assert_eq!(
        element("#nav-toggle").get_attribute("aria-expanded").as_deref(),
        Some("true")
    );
    click("#nav-toggle");
    assert!(!site.nav_open());
}

#[wasm_bindgen_test]
fn gallery_items_get_accessible_labels() {
    let _site = setup("{}");
    let items = document()
        .query_selector_all(".gallery-item")
        .expect("items");
    let label = |i: u32| {
        items
            .item(i)
            .and_then(|n| n.dyn_into::<Element>().ok())
            .and_then(|el| el.get_attribute("aria-label"))
    };
    assert_eq!(label(0).as_deref(), Some("Thumb A"));
    assert_eq!(label(1).as_deref(), Some("Open image 2"));
    assert_eq!(label(2).as_deref(), Some("Open image 3"));
}

#[wasm_bindgen_test]
fn lightbox_opens_wraps_and_closes() {
    let site = setup("{}");
    click(".gallery-item");
    assert_eq!(site.lightbox_index(), Some(0));
    assert!(element("#lightbox").class_list().contains("open"));
    assert_eq!(
        element("#lightbox-img").get_attribute("src").as_deref(),
        Some("/a.jpg")
    );

    press("ArrowLeft");
    assert_eq!(site.lightbox_index(), Some(2));
    click("#lb-next");
    assert_eq!(site.lightbox_index(), Some(0));

    press("Escape");
    assert_eq!(site.lightbox_index(), None);
    assert!(!element("#lightbox").class_list().contains("open"));
    assert_eq!(
        element("#lightbox-img").get_attribute("src").as_deref(),
        Some("")
    );
    let body = document().body().expect("body");
    assert_eq!(
        body.style().get_property_value("overflow").ok().as_deref(),
        Some("")
    );

    click("#lb-prev");
    assert_eq!(site.lightbox_index(), None);
}

#[wasm_bindgen_test]
fn lightbox_backdrop_click_closes_but_image_click_does_not() {
    let site = setup("{}");
    click(".gallery-item");
    click("#lightbox-img");
    assert_eq!(site.lightbox_index(), Some(0));
    click("#lightbox");
    assert_eq!(site.lightbox_index(), None);
}

fn fill(name: &str, email: &str, message: &str) {
    element("#name")
        .dyn_into::<HtmlInputElement>()
        .expect("input")
        .set_value(name);
    element("#email")
        .dyn_into::<HtmlInputElement>()
        .expect("input")
        .set_value(email);
    element("#message")
        .dyn_into::<HtmlTextAreaElement>()
        .expect("textarea")
        .set_value(message);
}

fn submit() {
    element("#contact-form")
        .dyn_into::<HtmlFormElement>()
        .expect("form")
        .request_submit()
        .expect("submit dispatched");
}

#[wasm_bindgen_test]
fn invalid_form_shows_every_error() {
    let _site = setup("{}");
    fill("A", "bad", "short");
    submit();
    assert_eq!(text("#name-error"), "Please enter your name (min 2 chars).");
    assert_eq!(text("#email-error"), "Please enter a valid email.");
    assert_eq!(text("#message-error"), "Message must be at least 10 characters.");
    assert_eq!(text("#form-status"), "Please fix the errors above.");
}

#[wasm_bindgen_test]
async fn valid_form_sends_after_delay_and_resets() {
    let _site = setup(r#"{"form":{"send_delay_ms":20}}"#);
    fill("Jo", "a@b.co", "1234567890");
    submit();
    assert_eq!(text("#form-status"), "Sending…");
    assert_eq!(text("#name-error"), "");

    sleep(80).await;
    assert_eq!(text("#form-status"), "Thanks — message sent (simulated).");
    let name = element("#name")
        .dyn_into::<HtmlInputElement>()
        .expect("input")
        .value();
    assert_eq!(name, "");
}

#[wasm_bindgen_test]
fn year_slots_are_stamped() {
    let _site = setup("{}");
    let year = js_sys::Date::new_0().get_full_year().to_string();
    assert_eq!(text(".year"), year);
}
