#![forbid(unsafe_code)]

//! Browser bindings for the Acme site interactions.
//!
//! This crate queries the page's DOM contract, registers event listeners,
//! forwards every event into a [`siteui_core::Site`] and applies the effects
//! it returns through `web-sys`. All behavior lives in `siteui-core`; the
//! code here only translates between the DOM and that core.
//!
//! From JavaScript, after `DOMContentLoaded`:
//!
//! ```js
//! import init, { mount } from "./pkg/siteui_web.js";
//! await init();
//! const site = mount();
//! ```

// Line splitting is shared between the wasm console writer and native tests.
#[cfg(any(target_arch = "wasm32", test))]
mod console;

#[cfg(target_arch = "wasm32")]
mod app;
#[cfg(target_arch = "wasm32")]
mod dom;
#[cfg(target_arch = "wasm32")]
mod storage;
#[cfg(target_arch = "wasm32")]
mod wasm;

#[cfg(target_arch = "wasm32")]
pub use wasm::{SiteApp, mount, mount_with_config};
