//! Paper records and the two JSON shapes they arrive in.
//!
//! - The bundled dataset is a bare array of records.
//! - The refresh endpoint wraps the array: `{ "papers": [...] }`.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Paper {
    pub id: String,
    pub title: String,
    pub authors: Vec<String>,
    #[serde(rename = "abstract")]
    pub abstract_text: String,
    pub categories: Vec<String>,
    /// `YYYY-MM-DD`; compared lexicographically.
    pub submitted_at: String,
    pub pdf_url: String,
}

impl Paper {
    pub fn has_category(&self, category: &str) -> bool {
        self.categories.iter().any(|c| c == category)
    }

    /// Leading component of `submitted_at` (everything before the first `-`).
    pub fn year(&self) -> &str {
        self.submitted_at
            .split('-')
            .next()
            .unwrap_or(&self.submitted_at)
    }

    pub fn primary_category(&self) -> Option<&str> {
        self.categories.first().map(String::as_str)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogPayload {
    pub papers: Vec<Paper>,
}

/// Decode the bundled asset (a top-level, non-empty array).
pub fn parse_dataset(text: &str) -> Result<Vec<Paper>> {
    let papers: Vec<Paper> =
        serde_json::from_str(text).map_err(|e| Error::Dataset(e.to_string()))?;
    if papers.is_empty() {
        return Err(Error::Dataset("dataset contains no papers".to_string()));
    }
    validate_snapshot(&papers).map_err(|e| Error::Dataset(e.to_string()))?;
    Ok(papers)
}

/// Decode a refresh response body. Anything other than a non-empty, well-formed
/// `papers` list is an error the caller treats as "no usable update".
pub fn parse_payload(bytes: &[u8]) -> Result<Vec<Paper>> {
    let payload: CatalogPayload =
        serde_json::from_slice(bytes).map_err(|e| Error::Payload(e.to_string()))?;
    if payload.papers.is_empty() {
        return Err(Error::EmptyCatalog);
    }
    validate_snapshot(&payload.papers)?;
    Ok(payload.papers)
}

/// Shape checks serde cannot express: ids are non-empty and unique, dates are present.
pub fn validate_snapshot(papers: &[Paper]) -> Result<()> {
    let mut seen: HashSet<&str> = HashSet::with_capacity(papers.len());
    for (i, p) in papers.iter().enumerate() {
        let id = p.id.trim();
        if id.is_empty() {
            return Err(Error::Payload(format!("paper #{i} has an empty id")));
        }
        if !seen.insert(id) {
            return Err(Error::Payload(format!("duplicate paper id {id}")));
        }
        if p.submitted_at.trim().is_empty() {
            return Err(Error::Payload(format!("paper {id} has no submittedAt")));
        }
    }
    Ok(())
}

pub fn find_paper<'a>(papers: &'a [Paper], id: &str) -> Result<&'a Paper> {
    papers
        .iter()
        .find(|p| p.id == id)
        .ok_or_else(|| Error::PaperNotFound(id.to_string()))
}

#[cfg(test)]
pub(crate) fn sample(id: &str, categories: &[&str], submitted_at: &str) -> Paper {
    Paper {
        id: id.to_string(),
        title: format!("Paper {id}"),
        authors: vec!["A. One".to_string(), "B. Two".to_string()],
        abstract_text: "Abstract.".to_string(),
        categories: categories.iter().map(|c| c.to_string()).collect(),
        submitted_at: submitted_at.to_string(),
        pdf_url: format!("https://arxiv.org/pdf/{id}.pdf"),
    }
}
