//! One-shot, time-bounded catalog refresh.
//!
//! A view starts from the bundled snapshot and may issue a single refresh. The refresh
//! races the source against a timer; when the timer wins, the fetch future is dropped,
//! which aborts the in-flight request. Every failure collapses to
//! [`RefreshOutcome::Kept`], so callers never see a refresh error.

use crate::bundled::BundledDataset;
use crate::config::LocalConfig;
use crate::http::HttpCatalogSource;
use papershelf_core::{Catalog, CatalogSource, Error, RefreshOutcome, Result};
use std::sync::Arc;
use std::time::{Duration, Instant};

pub async fn refresh(source: &dyn CatalogSource, timeout: Duration) -> RefreshOutcome {
    let t0 = Instant::now();
    let result = match tokio::time::timeout(timeout, source.fetch()).await {
        Ok(r) => r,
        Err(_) => Err(Error::Timeout(timeout.as_millis() as u64)),
    };
    RefreshOutcome::from_fetch(source.name(), result, t0.elapsed().as_millis())
}

/// A refresh running on the runtime while the view renders the bundled snapshot.
#[derive(Debug)]
pub struct PendingRefresh {
    source: &'static str,
    handle: tokio::task::JoinHandle<RefreshOutcome>,
}

impl PendingRefresh {
    pub fn spawn(
        runtime: &tokio::runtime::Handle,
        source: Arc<dyn CatalogSource>,
        timeout: Duration,
    ) -> Self {
        let name = source.name();
        let handle = runtime.spawn(async move { refresh(source.as_ref(), timeout).await });
        Self {
            source: name,
            handle,
        }
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Wait for the refresh to finish. A panicked or cancelled task is just another
    /// "no update".
    pub async fn settle(self) -> RefreshOutcome {
        match self.handle.await {
            Ok(outcome) => outcome,
            Err(e) => RefreshOutcome::Kept {
                source: self.source,
                reason: Error::Fetch(format!("refresh task failed: {e}")),
                elapsed_ms: 0,
            },
        }
    }
}

/// Builds per-view catalogs: bundled snapshot first, then at most one refresh.
#[derive(Clone)]
pub struct CatalogLoader {
    dataset: BundledDataset,
    source: Option<Arc<dyn CatalogSource>>,
    timeout: Duration,
}

impl std::fmt::Debug for CatalogLoader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CatalogLoader")
            .field("dataset", self.dataset.origin())
            .field("source", &self.source.as_ref().map(|s| s.name()))
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl CatalogLoader {
    pub fn new(dataset: BundledDataset) -> Self {
        Self {
            dataset,
            source: None,
            timeout: papershelf_core::default_refresh_timeout(),
        }
    }

    pub fn with_source(mut self, source: Arc<dyn CatalogSource>) -> Self {
        self.source = Some(source);
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Dataset loading errors are fatal; a bad endpoint only disables the refresh.
    pub fn from_config(cfg: &LocalConfig) -> Result<Self> {
        let dataset = BundledDataset::load(cfg.dataset.as_deref())?;
        let mut loader = Self::new(dataset).with_timeout(cfg.timeout());
        if cfg.offline {
            tracing::debug!("offline mode; catalog refresh disabled");
            return Ok(loader);
        }
        match HttpCatalogSource::from_config(cfg) {
            Ok(src) => loader = loader.with_source(Arc::new(src)),
            Err(e) => {
                tracing::warn!(endpoint = %cfg.endpoint, error = %e, "catalog refresh disabled")
            }
        }
        Ok(loader)
    }

    pub fn dataset(&self) -> &BundledDataset {
        &self.dataset
    }

    pub fn has_source(&self) -> bool {
        self.source.is_some()
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Returns the bundled snapshot immediately, plus the pending refresh if a source is set.
    ///
    /// The refresh runs on the current tokio runtime. Outside a runtime there is nothing to
    /// run it on, so no refresh is issued and the view settles as skipped.
    pub fn load(&self) -> (Catalog, Option<PendingRefresh>) {
        let catalog = Catalog::new(self.dataset.papers().to_vec());
        let Some(src) = self.source.clone() else {
            return (catalog, None);
        };
        let pending = match tokio::runtime::Handle::try_current() {
            Ok(rt) => Some(PendingRefresh::spawn(&rt, src, self.timeout)),
            Err(e) => {
                tracing::warn!(
                    source = src.name(),
                    error = %e,
                    "no tokio runtime; catalog refresh skipped"
                );
                None
            }
        };
        (catalog, pending)
    }

    /// `load` followed by waiting for (and applying) the refresh.
    pub async fn load_settled(&self) -> (Catalog, RefreshOutcome) {
        let (mut catalog, pending) = self.load();
        let outcome = match pending {
            Some(p) => p.settle().await,
            None => RefreshOutcome::Skipped,
        };
        catalog.apply(outcome.clone());
        (catalog, outcome)
    }
}
