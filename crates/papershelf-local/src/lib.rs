//! Local catalog sources: the bundled dataset, an HTTP refresh source, and the
//! time-bounded refresh that ties them together.

pub mod bundled;
pub mod config;
pub mod http;
pub mod refresh;

pub use bundled::{BundledDataset, DatasetOrigin};
pub use config::LocalConfig;
pub use http::HttpCatalogSource;
pub use refresh::{refresh, CatalogLoader, PendingRefresh};

use papershelf_core::{CatalogSource, Error};
use std::time::Instant;

/// Outcome of a one-off endpoint probe (used by diagnostics; never retried).
#[derive(Debug, Clone, serde::Serialize)]
pub struct ProbeReport {
    pub endpoint: String,
    pub ok: bool,
    pub papers: Option<usize>,
    pub error_code: Option<&'static str>,
    pub error: Option<String>,
    pub elapsed_ms: u128,
}

/// Try the configured endpoint once, bounded by the configured timeout.
pub async fn probe_endpoint(cfg: &LocalConfig) -> ProbeReport {
    let t0 = Instant::now();
    let result = match HttpCatalogSource::from_config(cfg) {
        Ok(src) => match tokio::time::timeout(cfg.timeout(), src.fetch()).await {
            Ok(r) => r,
            Err(_) => Err(Error::Timeout(cfg.timeout().as_millis() as u64)),
        },
        Err(e) => Err(e),
    };
    let elapsed_ms = t0.elapsed().as_millis();
    match result {
        Ok(papers) => ProbeReport {
            endpoint: cfg.endpoint.clone(),
            ok: true,
            papers: Some(papers.len()),
            error_code: None,
            error: None,
            elapsed_ms,
        },
        Err(e) => ProbeReport {
            endpoint: cfg.endpoint.clone(),
            ok: false,
            papers: None,
            error_code: Some(e.code()),
            error: Some(e.to_string()),
            elapsed_ms,
        },
    }
}
