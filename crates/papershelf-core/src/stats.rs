//! Freshness summary of a snapshot: does it have papers for a given day?

use crate::Paper;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CatalogStats {
    pub total: usize,
    pub latest: Option<String>,
    pub earliest: Option<String>,
    pub day: String,
    pub papers_for_day: Vec<String>,
}

impl CatalogStats {
    pub fn compute(papers: &[Paper], day: &str) -> Self {
        let latest = papers.iter().map(|p| p.submitted_at.as_str()).max();
        let earliest = papers.iter().map(|p| p.submitted_at.as_str()).min();
        Self {
            total: papers.len(),
            latest: latest.map(str::to_string),
            earliest: earliest.map(str::to_string),
            day: day.to_string(),
            papers_for_day: papers
                .iter()
                .filter(|p| p.submitted_at == day)
                .map(|p| p.id.clone())
                .collect(),
        }
    }

    pub fn has_papers_for_day(&self) -> bool {
        !self.papers_for_day.is_empty()
    }
}
