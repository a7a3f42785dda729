//! Failure reporting for the loaders.
//!
//! Loaders never return errors to their caller, so this is the only place a
//! failed fetch becomes visible. The default sink writes to the `log` facade;
//! hosts and tests can plug in their own.

use crate::github::FetchError;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Loader {
    Profile,
    Readme,
}

impl Loader {
    pub fn as_str(self) -> &'static str {
        match self {
            Loader::Profile => "profile",
            Loader::Readme => "readme",
        }
    }
}

impl fmt::Display for Loader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub trait Diagnostics: Send + Sync {
    /// The primary fetch failed and the loader fell back to its empty record.
    fn fetch_failed(&self, loader: Loader, failure: &FetchError);

    /// A secondary fetch failed; only `field` was left empty.
    fn fetch_degraded(&self, loader: Loader, field: &'static str, failure: &FetchError);
}

/// Forwards failures to `log`.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogDiagnostics;

impl Diagnostics for LogDiagnostics {
    fn fetch_failed(&self, loader: Loader, failure: &FetchError) {
        log::error!("{loader} loader failed, using empty record: {failure}");
    }

    fn fetch_degraded(&self, loader: Loader, field: &'static str, failure: &FetchError) {
        log::warn!("{loader} loader left `{field}` empty: {failure}");
    }
}
