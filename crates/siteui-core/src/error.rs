#![forbid(unsafe_code)]

//! Error model.
//!
//! None of these errors reach the visitor. Form validation problems are
//! reported as text effects, not errors. What remains is plumbing: a bad
//! config blob, a storage write the browser refused, an element the host
//! expected but could not find. The host logs them and keeps the page alive.

use thiserror::Error;

/// Errors raised while configuring or hosting the site behaviors.
#[derive(Debug, Error)]
pub enum SiteError {
    /// Config JSON did not parse.
    #[error("config parse error: {0}")]
    ConfigParse(#[from] serde_json::Error),
    /// Config parsed but holds an unusable value.
    #[error("invalid config: {field}: {reason}")]
    Config { field: &'static str, reason: String },
    /// The preference store refused a read or write.
    #[error("preference storage failed: {0}")]
    Storage(String),
    /// A required element of the DOM contract is missing.
    #[error("missing element: {0}")]
    MissingElement(String),
    /// The host environment (window, document) is unavailable.
    #[error("host unavailable: {0}")]
    Host(String),
}

impl SiteError {
    pub(crate) fn config(field: &'static str, reason: impl Into<String>) -> Self {
        Self::Config {
            field,
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, SiteError>;
