#![forbid(unsafe_code)]

//! `localStorage`-backed theme preference.

use siteui_core::{PreferenceStore, Result, SiteError};
use web_sys::{Storage, Window};

/// `window.localStorage`, or nothing when the browser denies access
/// (private mode, sandboxed iframes).
#[derive(Debug)]
pub(crate) struct LocalStorage {
    storage: Option<Storage>,
}

impl LocalStorage {
    pub(crate) fn open(window: &Window) -> Self {
        Self {
            storage: window.local_storage().ok().flatten(),
        }
    }
}

impl PreferenceStore for LocalStorage {
    fn load(&self, key: &str) -> Option<String> {
        self.storage.as_ref()?.get_item(key).ok().flatten()
    }

    fn store(&mut self, key: &str, value: &str) -> Result<()> {
        let Some(storage) = &self.storage else {
            return Err(SiteError::Storage("localStorage unavailable".into()));
        };
        storage
            .set_item(key, value)
            .map_err(|err| SiteError::Storage(format!("setItem({key}) failed: {err:?}")))
    }
}
