//! Refresh source backed by a plain `GET` to the catalog endpoint.
//!
//! Expected response: `{"papers": [...]}` with HTTP 2xx. Everything else is an error
//! the caller treats as "no usable update".

use crate::config::LocalConfig;
use futures_util::StreamExt;
use papershelf_core::paper::parse_payload;
use papershelf_core::{CatalogSource, Error, Paper, Result};
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct HttpCatalogSource {
    client: reqwest::Client,
    endpoint: url::Url,
    max_bytes: u64,
}

impl HttpCatalogSource {
    pub fn new(endpoint: url::Url, max_bytes: u64) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("papershelf-local/", env!("CARGO_PKG_VERSION")))
            .redirect(reqwest::redirect::Policy::limited(5))
            // Backstops only; the refresh timer is the real bound.
            .connect_timeout(Duration::from_secs(10))
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| Error::Fetch(e.to_string()))?;
        Ok(Self {
            client,
            endpoint,
            max_bytes,
        })
    }

    pub fn from_config(cfg: &LocalConfig) -> Result<Self> {
        Self::new(cfg.endpoint_url()?, cfg.max_bytes)
    }

    async fn read_capped(&self, resp: reqwest::Response) -> Result<Vec<u8>> {
        let max_bytes = self.max_bytes as usize;
        let mut bytes = Vec::new();
        let mut stream = resp.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(|e| Error::Fetch(e.to_string()))?;
            if bytes.len().saturating_add(chunk.len()) > max_bytes {
                return Err(Error::Payload(format!(
                    "response exceeds {max_bytes} bytes"
                )));
            }
            bytes.extend_from_slice(&chunk);
        }
        Ok(bytes)
    }
}

#[async_trait::async_trait]
impl CatalogSource for HttpCatalogSource {
    fn name(&self) -> &'static str {
        "http"
    }

    async fn fetch(&self) -> Result<Vec<Paper>> {
        let resp = self
            .client
            .get(self.endpoint.clone())
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| Error::Fetch(e.to_string()))?;
        let status = resp.status();
        if !status.is_success() {
            return Err(Error::Status(status.as_u16()));
        }
        let body = self.read_capped(resp).await?;
        let papers = parse_payload(&body)?;
        tracing::debug!(
            endpoint = %self.endpoint,
            papers = papers.len(),
            bytes = body.len(),
            "fetched catalog"
        );
        Ok(papers)
    }
}
