#![forbid(unsafe_code)]

//! `wasm-bindgen` exports.
//!
//! Only compiled on `wasm32` targets.

use std::rc::Rc;

use siteui_core::{Site, SiteConfig, SiteEnvironment, SiteError};
use tracing::{info, warn};
use wasm_bindgen::prelude::*;
use web_sys::Window;

use crate::app::{App, has_intersection_observer};
use crate::console::init_logging;
use crate::dom::DomRegistry;
use crate::storage::LocalStorage;

fn install_panic_hook() {
    use std::sync::Once;

    static ONCE: Once = Once::new();
    ONCE.call_once(|| {
        std::panic::set_hook(Box::new(|info| {
            let msg = if let Some(loc) = info.location() {
                format!(
                    "panic at {}:{}:{}: {info}",
                    loc.file(),
                    loc.line(),
                    loc.column()
                )
            } else {
                format!("panic: {info}")
            };
            web_sys::console::error_1(&JsValue::from_str(&msg));
        }));
    });
}

fn to_js(err: SiteError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

fn environment(window: &Window) -> SiteEnvironment {
    let prefers_light = window
        .match_media("(prefers-color-scheme: light)")
        .ok()
        .flatten()
        .is_some_and(|query| query.matches());
    SiteEnvironment {
        prefers_light,
        scroll_y: window.scroll_y().unwrap_or(0.0),
        year: js_sys::Date::new_0().get_full_year() as i32,
    }
}

/// Handle to a mounted page. Keep it alive for as long as the page is.
#[wasm_bindgen]
pub struct SiteApp {
    app: Rc<App>,
}

#[wasm_bindgen]
impl SiteApp {
    /// Active theme, `"light"` or `"dark"`.
    #[must_use]
    pub fn theme(&self) -> String {
        self.app.site.borrow().theme().as_str().to_owned()
    }

    /// Index of the image in the lightbox, or `undefined` when closed.
    #[wasm_bindgen(js_name = lightboxIndex)]
    #[must_use]
    pub fn lightbox_index(&self) -> Option<u32> {
        self.app
            .site
            .borrow()
            .lightbox()
            .and_then(|lb| lb.current_index())
            .and_then(|index| u32::try_from(index).ok())
    }

    #[wasm_bindgen(js_name = navOpen)]
    #[must_use]
    pub fn nav_open(&self) -> bool {
        self.app
            .site
            .borrow()
            .nav()
            .is_some_and(|nav| nav.is_open())
    }
}

/// Mount with the default selectors and timings.
#[wasm_bindgen]
pub fn mount() -> Result<SiteApp, JsValue> {
    mount_config(SiteConfig::default())
}

/// Mount with a (possibly partial) JSON config.
#[wasm_bindgen(js_name = mountWithConfig)]
pub fn mount_with_config(config_json: &str) -> Result<SiteApp, JsValue> {
    let config = SiteConfig::from_json(config_json).map_err(to_js)?;
    mount_config(config)
}

fn mount_config(config: SiteConfig) -> Result<SiteApp, JsValue> {
    install_panic_hook();
    init_logging(&config.log_filter);

    let window = web_sys::window().ok_or_else(|| to_js(SiteError::Host("no window".into())))?;
    let document = window
        .document()
        .ok_or_else(|| to_js(SiteError::Host("no document".into())))?;
    let dom = DomRegistry::scan(&document, &config.selectors)
        .ok_or_else(|| to_js(SiteError::MissingElement("documentElement".into())))?;

    let observer = has_intersection_observer(&window);
    if !observer {
        warn!("IntersectionObserver unavailable, revealing everything");
    }
    let manifest = dom.manifest(observer);
    let store = LocalStorage::open(&window);
    let (site, effects) = Site::mount(&config, manifest, environment(&window), store);

    let app = App::new(site, dom, window);
    app.apply(effects);
    app.install(&config.reveal)?;
    info!(theme = %app.site.borrow().theme(), "site mounted");
    Ok(SiteApp { app })
}
