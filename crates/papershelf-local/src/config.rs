//! Environment-driven configuration for the local catalog sources.
//!
//! Knobs (all optional):
//! - `PAPERSHELF_ENDPOINT`: refresh endpoint (default `http://127.0.0.1:8000/papers`)
//! - `PAPERSHELF_REFRESH_TIMEOUT_MS`: bound on one refresh (default 3000)
//! - `PAPERSHELF_OFFLINE`: `1|true|yes|on` skips the refresh entirely
//! - `PAPERSHELF_DATASET`: JSON file used instead of the bundled dataset
//! - `PAPERSHELF_MAX_BYTES`: cap on the refresh response body

use papershelf_core::{Error, Result, DEFAULT_REFRESH_TIMEOUT_MS};
use serde::Serialize;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:8000/papers";
pub const DEFAULT_MAX_BYTES: u64 = 8 * 1024 * 1024;

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct LocalConfig {
    pub endpoint: String,
    pub timeout_ms: u64,
    pub offline: bool,
    pub dataset: Option<PathBuf>,
    pub max_bytes: u64,
}

impl Default for LocalConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout_ms: DEFAULT_REFRESH_TIMEOUT_MS,
            offline: false,
            dataset: None,
            max_bytes: DEFAULT_MAX_BYTES,
        }
    }
}

fn is_truthy(v: &str) -> bool {
    matches!(
        v.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

impl LocalConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|k| std::env::var(k).ok())
    }

    /// Build from an arbitrary key lookup. Blank values count as unset; unparsable
    /// numbers fall back to the default.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |k: &str| lookup(k).filter(|v| !v.trim().is_empty());
        let mut cfg = Self::default();
        if let Some(v) = get("PAPERSHELF_ENDPOINT") {
            cfg.endpoint = v.trim().to_string();
        }
        if let Some(v) = get("PAPERSHELF_REFRESH_TIMEOUT_MS") {
            match v.trim().parse::<u64>() {
                Ok(n) => cfg.timeout_ms = n,
                Err(_) => tracing::warn!(value = %v, "ignoring invalid PAPERSHELF_REFRESH_TIMEOUT_MS"),
            }
        }
        if let Some(v) = get("PAPERSHELF_OFFLINE") {
            cfg.offline = is_truthy(&v);
        }
        if let Some(v) = get("PAPERSHELF_DATASET") {
            cfg.dataset = Some(PathBuf::from(v.trim()));
        }
        if let Some(v) = get("PAPERSHELF_MAX_BYTES") {
            match v.trim().parse::<u64>() {
                Ok(n) if n > 0 => cfg.max_bytes = n,
                _ => tracing::warn!(value = %v, "ignoring invalid PAPERSHELF_MAX_BYTES"),
            }
        }
        cfg
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    pub fn endpoint_url(&self) -> Result<url::Url> {
        let url =
            url::Url::parse(self.endpoint.trim()).map_err(|e| Error::InvalidUrl(e.to_string()))?;
        match url.scheme() {
            "http" | "https" => Ok(url),
            other => Err(Error::InvalidUrl(format!("unsupported scheme: {other}"))),
        }
    }
}
