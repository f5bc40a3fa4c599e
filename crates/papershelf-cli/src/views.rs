//! Presentation surfaces: home feed, category listing, paper detail, not-found.
//!
//! Views are plain data built from a catalog snapshot and an explicit selection. They
//! render either as a JSON envelope (`schema_version`, `kind`, `ok`) or as text.

use papershelf_core::{
    categories, citation, Catalog, Paper, RefreshOutcome, Route, Selection, SnapshotOrigin,
    ALL_CATEGORY_ID,
};
use serde::Serialize;
use std::fmt::Write as _;

pub const SCHEMA_VERSION: u64 = 1;

const HOME_HEADING: &str = "Latest Computer Science Papers";
const EMPTY_CATEGORY: &str = "No papers found in this category.";

#[derive(Debug, Clone, Serialize)]
pub struct RefreshReport {
    pub origin: SnapshotOrigin,
    pub outcome: &'static str,
}

impl RefreshReport {
    pub fn new(catalog: &Catalog, outcome: &RefreshOutcome) -> Self {
        Self {
            origin: catalog.origin(),
            outcome: outcome.label(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PaperCard {
    pub id: String,
    pub title: String,
    pub authors: String,
    pub submitted_at: String,
    #[serde(rename = "abstract")]
    pub abstract_text: String,
    pub categories: Vec<String>,
    pub pdf_url: String,
    pub route: String,
}

impl PaperCard {
    fn from_paper(p: &Paper) -> Self {
        Self {
            id: p.id.clone(),
            title: p.title.clone(),
            authors: p.authors.join(", "),
            submitted_at: p.submitted_at.clone(),
            abstract_text: p.abstract_text.clone(),
            categories: p.categories.clone(),
            pdf_url: p.pdf_url.clone(),
            route: Route::Paper { id: p.id.clone() }.path(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CategoryCard {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub active: bool,
    pub route: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct HomeView {
    pub heading: String,
    pub filter_label: String,
    pub selection: Selection,
    pub categories: Vec<CategoryCard>,
    pub dates: Vec<String>,
    pub papers: Vec<PaperCard>,
    pub refresh: RefreshReport,
}

#[derive(Debug, Clone, Serialize)]
pub struct CategoryView {
    pub category: &'static str,
    pub title: String,
    pub subtitle: &'static str,
    pub date: Option<String>,
    pub dates: Vec<String>,
    pub papers: Vec<PaperCard>,
    pub empty_message: Option<&'static str>,
    pub refresh: RefreshReport,
}

#[derive(Debug, Clone, Serialize)]
pub struct DetailView {
    pub paper: PaperCard,
    pub meta: String,
    pub bibtex: Option<String>,
    pub citation: Option<String>,
    pub citation_error: Option<String>,
    pub refresh: RefreshReport,
}

#[derive(Debug, Clone, Serialize)]
pub struct NotFoundView {
    pub what: &'static str,
    pub id: String,
    pub heading: &'static str,
    pub message: &'static str,
    pub back: &'static str,
}

#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum View {
    Home(HomeView),
    Category(CategoryView),
    Detail(DetailView),
    NotFound(NotFoundView),
}

#[derive(Serialize)]
struct Envelope<'a> {
    schema_version: u64,
    kind: &'static str,
    ok: bool,
    #[serde(flatten)]
    view: &'a View,
}

fn category_cards(active: &str) -> Vec<CategoryCard> {
    categories::all()
        .iter()
        .map(|c| CategoryCard {
            id: c.id,
            title: c.title,
            description: c.description,
            active: c.id == active,
            route: Route::Category {
                id: c.id.to_string(),
            }
            .path(),
        })
        .collect()
}

fn cards(papers: &[&Paper]) -> Vec<PaperCard> {
    papers.iter().map(|p| PaperCard::from_paper(p)).collect()
}

fn owned_dates(catalog: &Catalog) -> Vec<String> {
    catalog
        .distinct_dates()
        .into_iter()
        .map(str::to_string)
        .collect()
}

pub fn home(catalog: &Catalog, selection: &Selection, refresh: RefreshReport) -> View {
    let active = selection.category.id();
    let heading = if active == ALL_CATEGORY_ID {
        HOME_HEADING.to_string()
    } else {
        let title = categories::lookup(active).map_or(active, |c| c.title);
        format!("{title} Papers")
    };
    let mut filter_label = format!("Filtering by: {active}");
    if let Some(d) = selection.date.as_deref() {
        let _ = write!(filter_label, " · {d}");
    }
    View::Home(HomeView {
        heading,
        filter_label,
        selection: selection.clone(),
        categories: category_cards(active),
        dates: owned_dates(catalog),
        papers: cards(&catalog.filter(selection)),
        refresh,
    })
}

pub fn category(catalog: &Catalog, id: &str, date: Option<&str>, refresh: RefreshReport) -> View {
    let Ok(cat) = categories::resolve(id) else {
        return not_found_category(id);
    };
    let selection = Selection::new(Some(cat.id), date);
    let (title, subtitle) = if cat.is_all() {
        ("All Papers".to_string(), "Showing all papers from arXiv")
    } else {
        (
            format!("{} Papers", cat.title),
            "Showing the latest papers from arXiv in the category",
        )
    };
    let papers = cards(&catalog.filter(&selection));
    let empty_message = papers.is_empty().then_some(EMPTY_CATEGORY);
    View::Category(CategoryView {
        category: cat.id,
        title,
        subtitle,
        date: selection.date,
        dates: owned_dates(catalog),
        papers,
        empty_message,
        refresh,
    })
}

pub fn detail(catalog: &Catalog, id: &str, refresh: RefreshReport) -> View {
    let Ok(paper) = catalog.find(id) else {
        return not_found_paper(id);
    };
    let (bibtex, inline, citation_error) = match (
        citation::to_bibtex(paper),
        citation::to_inline_citation(paper),
    ) {
        (Ok(b), Ok(c)) => (Some(b), Some(c), None),
        (Err(e), _) | (_, Err(e)) => (None, None, Some(e.to_string())),
    };
    View::Detail(DetailView {
        paper: PaperCard::from_paper(paper),
        meta: format!(
            "Submitted {} · {}",
            paper.submitted_at,
            paper.categories.join(", ")
        ),
        bibtex,
        citation: inline,
        citation_error,
        refresh,
    })
}

/// Dispatch a parsed route. `date` only applies to listing views.
pub fn route(catalog: &Catalog, route: &Route, date: Option<&str>, refresh: RefreshReport) -> View {
    match route {
        Route::Home => home(catalog, &Selection::new(None, date), refresh),
        Route::Category { id } => category(catalog, id, date, refresh),
        Route::Paper { id } => detail(catalog, id, refresh),
    }
}

fn not_found_category(id: &str) -> View {
    View::NotFound(NotFoundView {
        what: "category",
        id: id.to_string(),
        heading: "Category Not Found",
        message: "The category you're looking for doesn't exist.",
        back: "/",
    })
}

fn not_found_paper(id: &str) -> View {
    View::NotFound(NotFoundView {
        what: "paper",
        id: id.to_string(),
        heading: "Paper Not Found",
        message: "The paper you're looking for doesn't exist.",
        back: "/",
    })
}

fn push_cards(out: &mut String, papers: &[PaperCard]) {
    for p in papers {
        let _ = writeln!(out);
        let _ = writeln!(out, "[{}] {}", p.submitted_at, p.title);
        let _ = writeln!(out, "  {}", p.authors);
        let _ = writeln!(out, "  {}", p.abstract_text);
        let _ = writeln!(out, "  {}", p.categories.join(" "));
        let _ = writeln!(out, "  id: {}  pdf: {}", p.id, p.pdf_url);
    }
}

fn push_refresh(out: &mut String, r: &RefreshReport) {
    let origin = match r.origin {
        SnapshotOrigin::Bundled => "bundled",
        SnapshotOrigin::Remote => "remote",
    };
    let _ = writeln!(out);
    let _ = writeln!(out, "source: {origin} (refresh: {})", r.outcome);
}

impl View {
    pub fn kind(&self) -> &'static str {
        match self {
            View::Home(_) => "home",
            View::Category(_) => "category",
            View::Detail(_) => "paper",
            View::NotFound(_) => "not_found",
        }
    }

    pub fn is_found(&self) -> bool {
        !matches!(self, View::NotFound(_))
    }

    pub fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(Envelope {
            schema_version: SCHEMA_VERSION,
            kind: self.kind(),
            ok: self.is_found(),
            view: self,
        })
        .unwrap_or_else(|e| serde_json::json!({ "ok": false, "error": e.to_string() }))
    }

    pub fn render_text(&self) -> String {
        let mut out = String::new();
        match self {
            View::Home(v) => {
                let _ = writeln!(out, "{}", v.heading);
                let _ = writeln!(out, "{}", v.filter_label);
                let _ = writeln!(out, "{} papers", v.papers.len());
                push_cards(&mut out, &v.papers);
                push_refresh(&mut out, &v.refresh);
            }
            View::Category(v) => {
                let _ = writeln!(out, "{}", v.title);
                let _ = writeln!(out, "{}", v.subtitle);
                if let Some(d) = &v.date {
                    let _ = writeln!(out, "Publication Date: {d}");
                }
                if let Some(msg) = v.empty_message {
                    let _ = writeln!(out);
                    let _ = writeln!(out, "{msg}");
                }
                push_cards(&mut out, &v.papers);
                push_refresh(&mut out, &v.refresh);
            }
            View::Detail(v) => {
                let p = &v.paper;
                let _ = writeln!(out, "{}", p.title);
                let _ = writeln!(out, "{}", v.meta);
                let _ = writeln!(out, "{}", p.authors);
                let _ = writeln!(out);
                let _ = writeln!(out, "{}", p.abstract_text);
                let _ = writeln!(out);
                let _ = writeln!(out, "PDF: {}", p.pdf_url);
                if let Some(b) = &v.bibtex {
                    let _ = writeln!(out);
                    let _ = writeln!(out, "{b}");
                }
                if let Some(c) = &v.citation {
                    let _ = writeln!(out);
                    let _ = writeln!(out, "{c}");
                }
                if let Some(e) = &v.citation_error {
                    let _ = writeln!(out);
                    let _ = writeln!(out, "citation unavailable: {e}");
                }
                push_refresh(&mut out, &v.refresh);
            }
            View::NotFound(v) => {
                let _ = writeln!(out, "{}", v.heading);
                let _ = writeln!(out, "{}", v.message);
                let _ = writeln!(out, "← Back to Home ({})", v.back);
            }
        }
        out
    }
}
