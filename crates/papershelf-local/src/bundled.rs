//! The static dataset compiled into the binary, optionally replaced by a file on disk.

use papershelf_core::paper::parse_dataset;
use papershelf_core::{CatalogSource, Error, Paper, Result};
use serde::Serialize;
use std::path::{Path, PathBuf};

const EMBEDDED: &str = include_str!("../data/papers.json");

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "path", rename_all = "snake_case")]
pub enum DatasetOrigin {
    Embedded,
    File(PathBuf),
}

#[derive(Debug, Clone)]
pub struct BundledDataset {
    origin: DatasetOrigin,
    papers: Vec<Paper>,
}

impl BundledDataset {
    pub fn embedded() -> Result<Self> {
        Ok(Self {
            origin: DatasetOrigin::Embedded,
            papers: parse_dataset(EMBEDDED)?,
        })
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| Error::Dataset(format!("{}: {e}", path.display())))?;
        let papers = parse_dataset(&text)?;
        Ok(Self {
            origin: DatasetOrigin::File(path.to_path_buf()),
            papers,
        })
    }

    /// Embedded dataset unless an override path is given.
    pub fn load(override_path: Option<&Path>) -> Result<Self> {
        match override_path {
            Some(p) => Self::from_path(p),
            None => Self::embedded(),
        }
    }

    pub fn origin(&self) -> &DatasetOrigin {
        &self.origin
    }

    pub fn papers(&self) -> &[Paper] {
        &self.papers
    }
}

#[async_trait::async_trait]
impl CatalogSource for BundledDataset {
    fn name(&self) -> &'static str {
        "bundled"
    }

    async fn fetch(&self) -> Result<Vec<Paper>> {
        Ok(self.papers.clone())
    }
}
