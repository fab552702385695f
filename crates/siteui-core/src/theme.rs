#![forbid(unsafe_code)]

//! Light/dark theme preference.
//!
//! The active theme lives on the document root as `data-theme`. A stored
//! preference wins over the system color scheme; the system scheme is only
//! consulted when nothing valid is stored. Every toggle is persisted.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use tracing::{debug, warn};

use crate::effect::{Effect, THEME_ATTRIBUTE, Target};
use crate::error::{Result, SiteError};

/// Site color theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Theme {
    Light,
    Dark,
}

impl Theme {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    /// Theme implied by the system color scheme.
    #[must_use]
    pub const fn from_system(prefers_light: bool) -> Self {
        if prefers_light { Self::Light } else { Self::Dark }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = SiteError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "light" => Ok(Self::Light),
            "dark" => Ok(Self::Dark),
            other => Err(SiteError::Storage(format!("unknown theme value {other:?}"))),
        }
    }
}

// ---------------------------------------------------------------------------
// Storage seam
// ---------------------------------------------------------------------------

/// Key/value storage for the persisted preference.
///
/// The browser binding implements this over `localStorage`.
pub trait PreferenceStore {
    /// Read `key`. Unreadable storage reads as absent.
    fn load(&self, key: &str) -> Option<String>;

    /// Write `value` under `key`.
    fn store(&mut self, key: &str, value: &str) -> Result<()>;
}

/// In-memory store for native hosts and tests.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
    read_only: bool,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with one entry.
    #[must_use]
    pub fn with_entry(key: &str, value: &str) -> Self {
        let mut entries = HashMap::new();
        entries.insert(key.to_owned(), value.to_owned());
        Self {
            entries,
            read_only: false,
        }
    }

    /// Store that rejects every write, like a browser with storage disabled.
    #[must_use]
    pub fn read_only() -> Self {
        Self {
            entries: HashMap::new(),
            read_only: true,
        }
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }
}

impl PreferenceStore for MemoryStore {
    fn load(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn store(&mut self, key: &str, value: &str) -> Result<()> {
        if self.read_only {
            return Err(SiteError::Storage(format!("store is read-only ({key})")));
        }
        self.entries.insert(key.to_owned(), value.to_owned());
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Controller
// ---------------------------------------------------------------------------

/// Owns the current theme and its persistence.
#[derive(Debug)]
pub struct ThemeController<S> {
    current: Theme,
    storage_key: String,
    store: S,
}

impl<S: PreferenceStore> ThemeController<S> {
    /// Resolve the initial theme and return the effect applying it.
    pub fn load(store: S, storage_key: &str, prefers_light: bool) -> (Self, Effect) {
        let stored = store.load(storage_key);
        let current = match stored.as_deref().map(Theme::from_str) {
            Some(Ok(theme)) => theme,
            Some(Err(err)) => {
                warn!(key = storage_key, %err, "ignoring stored theme");
                Theme::from_system(prefers_light)
            }
            None => Theme::from_system(prefers_light),
        };
        debug!(theme = %current, stored = stored.is_some(), "theme loaded");
        let controller = Self {
            current,
            storage_key: storage_key.to_owned(),
            store,
        };
        let effect = controller.apply();
        (controller, effect)
    }

    /// Flip the theme, persist it and return the effect applying it.
    ///
    /// A failed write is logged; the page still switches.
    pub fn toggle(&mut self) -> Effect {
        self.current = self.current.toggled();
        if let Err(err) = self.store.store(&self.storage_key, self.current.as_str()) {
            warn!(key = %self.storage_key, %err, "theme preference not persisted");
        }
        debug!(theme = %self.current, "theme toggled");
        self.apply()
    }

    #[must_use]
    pub const fn current(&self) -> Theme {
        self.current
    }

    #[must_use]
    pub const fn store(&self) -> &S {
        &self.store
    }

    fn apply(&self) -> Effect {
        Effect::set_attribute(Target::Root, THEME_ATTRIBUTE, self.current.as_str())
    }
}
