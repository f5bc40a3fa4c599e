//! Citation text derived from a single paper record.

use crate::{Error, Paper, Result};
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CitationFormat {
    Bibtex,
    Inline,
}

impl CitationFormat {
    pub fn render(self, paper: &Paper) -> Result<String> {
        match self {
            CitationFormat::Bibtex => to_bibtex(paper),
            CitationFormat::Inline => to_inline_citation(paper),
        }
    }
}

fn first_author(paper: &Paper) -> Result<&str> {
    paper
        .authors
        .first()
        .map(String::as_str)
        .ok_or_else(|| Error::MissingAuthor(paper.id.clone()))
}

/// `@article` record keyed by the paper id.
///
/// `primaryClass` is omitted when the record has no categories.
pub fn to_bibtex(paper: &Paper) -> Result<String> {
    first_author(paper)?;
    let mut out = String::new();
    // Writing into a String cannot fail.
    let _ = writeln!(out, "@article{{{},", paper.id);
    let _ = writeln!(out, "  title={{{}}},", paper.title);
    let _ = writeln!(out, "  author={{{}}},", paper.authors.join(" and "));
    let _ = writeln!(out, "  year={{{}}},", paper.year());
    out.push_str("  archivePrefix={arXiv},\n");
    if let Some(primary) = paper.primary_category() {
        let _ = writeln!(out, "  primaryClass={{{primary}}},");
    }
    out.push('}');
    Ok(out)
}

pub fn to_inline_citation(paper: &Paper) -> Result<String> {
    let author = first_author(paper)?;
    Ok(format!(
        "{author} et al. {}. arXiv:{} ({}).",
        paper.title, paper.id, paper.submitted_at
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scenario_paper() -> Paper {
        Paper {
            id: "1234.5678".to_string(),
            title: "T".to_string(),
            authors: vec!["A. One".to_string(), "B. Two".to_string()],
            abstract_text: String::new(),
            categories: vec!["cs.CV".to_string()],
            submitted_at: "2023-05-01".to_string(),
            pdf_url: "https://arxiv.org/pdf/1234.5678.pdf".to_string(),
        }
    }

    #[test]
    fn inline_citation_uses_first_author() {
        assert_eq!(
            to_inline_citation(&scenario_paper()).unwrap(),
            "A. One et al. T. arXiv:1234.5678 (2023-05-01)."
        );
    }

    #[test]
    fn bibtex_record_layout() {
        let expected = "@article{1234.5678,\n  title={T},\n  author={A. One and B. Two},\n  year={2023},\n  archivePrefix={arXiv},\n  primaryClass={cs.CV},\n}";
        assert_eq!(to_bibtex(&scenario_paper()).unwrap(), expected);
    }

    #[test]
    fn bibtex_primary_class_is_first_category() {
        let mut p = scenario_paper();
        p.categories = vec!["cs.LG".to_string(), "cs.AI".to_string()];
        let b = to_bibtex(&p).unwrap();
        assert!(b.contains("primaryClass={cs.LG},"));
        assert!(!b.contains("cs.AI"));
    }

    #[test]
    fn bibtex_without_categories_drops_primary_class() {
        let mut p = scenario_paper();
        p.categories.clear();
        let b = to_bibtex(&p).unwrap();
        assert!(!b.contains("primaryClass"));
        assert!(b.ends_with("archivePrefix={arXiv},\n}"));
    }

    #[test]
    fn missing_author_is_an_error_for_both_formats() {
        let mut p = scenario_paper();
        p.authors.clear();
        for fmt in [CitationFormat::Bibtex, CitationFormat::Inline] {
            assert_eq!(
                fmt.render(&p).unwrap_err(),
                Error::MissingAuthor("1234.5678".to_string())
            );
        }
    }

    #[test]
    fn formatting_is_deterministic() {
        let a = scenario_paper();
        let b = a.clone();
        for fmt in [CitationFormat::Bibtex, CitationFormat::Inline] {
            assert_eq!(fmt.render(&a).unwrap(), fmt.render(&b).unwrap());
        }
    }
}
