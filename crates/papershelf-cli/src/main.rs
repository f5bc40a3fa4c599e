use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use papershelf_core::{categories, CatalogStats, CitationFormat, Route, Selection};
use papershelf_local::{probe_endpoint, CatalogLoader, LocalConfig};
use std::path::PathBuf;
use std::process::ExitCode;

mod logging;
mod views;

use views::{RefreshReport, View};

/// Exit status for not-found views (unknown category or paper id).
const EXIT_NOT_FOUND: u8 = 2;

#[derive(Parser, Debug)]
#[command(name = "papershelf")]
#[command(about = "Browse a research-paper catalog from the terminal", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Home feed: every paper, optionally narrowed by category and date.
    Home(HomeCmd),
    /// Listing for one registered category (or ALL).
    Category(CategoryCmd),
    /// Detail view for one paper, including citations.
    Paper(PaperCmd),
    /// Resolve a path (`/`, `/category/<id>`, `/paper/<id>`) to its view.
    Open(OpenCmd),
    /// Distinct submission dates in the catalog, newest first.
    Dates(DatesCmd),
    /// The category registry.
    Categories(OutputArgs),
    /// Catalog freshness: date range and papers submitted on a given day.
    Stats(StatsCmd),
    /// Diagnose dataset and endpoint configuration (json).
    Doctor(DoctorCmd),
    /// Print version info.
    Version(OutputArgs),
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
enum OutputFormat {
    Json,
    Text,
}

#[derive(clap::Args, Debug, Clone)]
struct OutputArgs {
    /// Output format.
    #[arg(long = "output", alias = "format", value_enum, default_value = "json")]
    output: OutputFormat,
}

/// Catalog knobs. Unset flags fall back to `PAPERSHELF_*` environment variables.
#[derive(clap::Args, Debug, Clone, Default)]
struct CatalogArgs {
    /// Refresh endpoint returning `{"papers": [...]}`.
    #[arg(long)]
    endpoint: Option<String>,
    /// Upper bound on the refresh (ms).
    #[arg(long)]
    timeout_ms: Option<u64>,
    /// Skip the refresh and use the bundled dataset only.
    #[arg(long)]
    offline: bool,
    /// JSON array of papers used instead of the bundled dataset.
    #[arg(long)]
    dataset: Option<PathBuf>,
}

impl CatalogArgs {
    fn config(&self) -> LocalConfig {
        let mut cfg = LocalConfig::from_env();
        if let Some(e) = &self.endpoint {
            cfg.endpoint = e.trim().to_string();
        }
        if let Some(t) = self.timeout_ms {
            cfg.timeout_ms = t;
        }
        if self.offline {
            cfg.offline = true;
        }
        if let Some(p) = &self.dataset {
            cfg.dataset = Some(p.clone());
        }
        cfg
    }
}

#[derive(clap::Args, Debug)]
struct HomeCmd {
    /// Category id (`ALL` for every paper).
    #[arg(long)]
    category: Option<String>,
    /// Exact submission date (YYYY-MM-DD).
    #[arg(long)]
    date: Option<String>,
    #[command(flatten)]
    out: OutputArgs,
    #[command(flatten)]
    catalog: CatalogArgs,
}

#[derive(clap::Args, Debug)]
struct CategoryCmd {
    /// Registered category id, e.g. cs.AI, or ALL.
    id: String,
    /// Exact submission date (YYYY-MM-DD).
    #[arg(long)]
    date: Option<String>,
    #[command(flatten)]
    out: OutputArgs,
    #[command(flatten)]
    catalog: CatalogArgs,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
enum CiteArg {
    Bibtex,
    Inline,
}

impl From<CiteArg> for CitationFormat {
    fn from(c: CiteArg) -> Self {
        match c {
            CiteArg::Bibtex => CitationFormat::Bibtex,
            CiteArg::Inline => CitationFormat::Inline,
        }
    }
}

#[derive(clap::Args, Debug)]
struct PaperCmd {
    /// Paper id, e.g. 2506.10000.
    id: String,
    /// Print only this citation as plain text (for piping into a clipboard tool).
    #[arg(long, value_enum)]
    cite: Option<CiteArg>,
    #[command(flatten)]
    out: OutputArgs,
    #[command(flatten)]
    catalog: CatalogArgs,
}

#[derive(clap::Args, Debug)]
struct OpenCmd {
    /// Path such as `/category/cs.AI`.
    path: String,
    /// Exact submission date for listing views.
    #[arg(long)]
    date: Option<String>,
    #[command(flatten)]
    out: OutputArgs,
    #[command(flatten)]
    catalog: CatalogArgs,
}

#[derive(clap::Args, Debug)]
struct DatesCmd {
    #[command(flatten)]
    out: OutputArgs,
    #[command(flatten)]
    catalog: CatalogArgs,
}

#[derive(clap::Args, Debug)]
struct StatsCmd {
    /// Day to check (YYYY-MM-DD). Defaults to today's local date.
    #[arg(long)]
    day: Option<String>,
    #[command(flatten)]
    out: OutputArgs,
    #[command(flatten)]
    catalog: CatalogArgs,
}

#[derive(clap::Args, Debug)]
struct DoctorCmd {
    /// Attempt one request against the refresh endpoint.
    #[arg(long, action = clap::ArgAction::Set, default_value_t = true)]
    probe: bool,
    #[command(flatten)]
    catalog: CatalogArgs,
}

/// Opt-in `KEY=VALUE` file (`PAPERSHELF_ENV_FILE`). Never overrides the process env.
fn load_env_file() {
    let Ok(p) = std::env::var("PAPERSHELF_ENV_FILE") else {
        return;
    };
    let p = p.trim();
    if p.is_empty() {
        return;
    }
    let Ok(txt) = std::fs::read_to_string(p) else {
        return;
    };
    for raw in txt.lines() {
        let s = raw.trim();
        if s.is_empty() || s.starts_with('#') {
            continue;
        }
        let Some((k, v)) = s.split_once('=') else {
            continue;
        };
        let k = k.trim();
        if k.is_empty() {
            continue;
        }
        if std::env::var_os(k).is_none() {
            std::env::set_var(k, v.trim());
        }
    }
}

async fn load_catalog(
    args: &CatalogArgs,
) -> Result<(papershelf_core::Catalog, RefreshReport)> {
    let cfg = args.config();
    let loader = CatalogLoader::from_config(&cfg)?;
    let (catalog, outcome) = loader.load_settled().await;
    let report = RefreshReport::new(&catalog, &outcome);
    tracing::debug!(
        papers = catalog.len(),
        refresh = outcome.label(),
        "catalog ready"
    );
    Ok((catalog, report))
}

fn emit_view(view: &View, out: OutputFormat) -> ExitCode {
    match out {
        OutputFormat::Json => println!("{}", view.to_json()),
        OutputFormat::Text => print!("{}", view.render_text()),
    }
    if view.is_found() {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(EXIT_NOT_FOUND)
    }
}

fn today() -> String {
    chrono::Local::now().format("%Y-%m-%d").to_string()
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    load_env_file();
    logging::init();

    let cli = Cli::parse();

    let code = match cli.command {
        Commands::Home(args) => {
            let (catalog, report) = load_catalog(&args.catalog).await?;
            let selection = Selection::new(args.category.as_deref(), args.date.as_deref());
            emit_view(&views::home(&catalog, &selection, report), args.out.output)
        }
        Commands::Category(args) => {
            let (catalog, report) = load_catalog(&args.catalog).await?;
            let view = views::category(&catalog, &args.id, args.date.as_deref(), report);
            emit_view(&view, args.out.output)
        }
        Commands::Paper(args) => {
            let (catalog, report) = load_catalog(&args.catalog).await?;
            match (args.cite, catalog.find(&args.id)) {
                (Some(fmt), Ok(paper)) => {
                    println!("{}", CitationFormat::from(fmt).render(paper)?);
                    ExitCode::SUCCESS
                }
                _ => emit_view(&views::detail(&catalog, &args.id, report), args.out.output),
            }
        }
        Commands::Open(args) => {
            let route = Route::parse(&args.path)?;
            let (catalog, report) = load_catalog(&args.catalog).await?;
            let view = views::route(&catalog, &route, args.date.as_deref(), report);
            emit_view(&view, args.out.output)
        }
        Commands::Dates(args) => {
            let (catalog, report) = load_catalog(&args.catalog).await?;
            let dates = catalog.distinct_dates();
            match args.out.output {
                OutputFormat::Text => {
                    for d in &dates {
                        println!("{d}");
                    }
                }
                OutputFormat::Json => println!(
                    "{}",
                    serde_json::json!({
                        "schema_version": views::SCHEMA_VERSION,
                        "kind": "dates",
                        "ok": true,
                        "dates": dates,
                        "refresh": report,
                    })
                ),
            }
            ExitCode::SUCCESS
        }
        Commands::Categories(args) => {
            let all = categories::all();
            match args.output {
                OutputFormat::Text => {
                    for c in all {
                        println!("{:<6} {:<26} {}", c.id, c.title, c.description);
                    }
                }
                OutputFormat::Json => println!(
                    "{}",
                    serde_json::json!({
                        "schema_version": views::SCHEMA_VERSION,
                        "kind": "categories",
                        "ok": true,
                        "categories": all,
                    })
                ),
            }
            ExitCode::SUCCESS
        }
        Commands::Stats(args) => {
            let (catalog, report) = load_catalog(&args.catalog).await?;
            let day = args.day.unwrap_or_else(today);
            let stats = CatalogStats::compute(catalog.papers(), day.trim());
            match args.out.output {
                OutputFormat::Text => {
                    println!("Day: {}", stats.day);
                    println!("Total papers: {}", stats.total);
                    println!(
                        "Latest date in papers: {}",
                        stats.latest.as_deref().unwrap_or("-")
                    );
                    println!(
                        "Earliest date in papers: {}",
                        stats.earliest.as_deref().unwrap_or("-")
                    );
                    println!("Papers for day: {}", stats.papers_for_day.len());
                    for id in &stats.papers_for_day {
                        println!("  - {id}");
                    }
                }
                OutputFormat::Json => println!(
                    "{}",
                    serde_json::json!({
                        "schema_version": views::SCHEMA_VERSION,
                        "kind": "stats",
                        "ok": true,
                        "has_papers_for_day": stats.has_papers_for_day(),
                        "stats": stats,
                        "refresh": report,
                    })
                ),
            }
            ExitCode::SUCCESS
        }
        Commands::Doctor(args) => {
            let t0 = std::time::Instant::now();
            let cfg = args.catalog.config();
            let mut checks: Vec<serde_json::Value> = Vec::new();

            let dataset = papershelf_local::BundledDataset::load(cfg.dataset.as_deref());
            checks.push(match &dataset {
                Ok(ds) => serde_json::json!({
                    "name": "dataset_decodes",
                    "ok": true,
                    "origin": ds.origin(),
                    "papers": ds.papers().len(),
                }),
                Err(e) => serde_json::json!({
                    "name": "dataset_decodes",
                    "ok": false,
                    "error": e.to_string(),
                    "hint": "Fix or unset PAPERSHELF_DATASET.",
                }),
            });

            let endpoint_ok = cfg.endpoint_url().is_ok();
            checks.push(serde_json::json!({
                "name": "endpoint_url_valid",
                "ok": endpoint_ok,
                "endpoint": cfg.endpoint,
            }));

            // Probe failures are informational: the bundled dataset still serves.
            let probe = if args.probe && !cfg.offline && endpoint_ok {
                Some(probe_endpoint(&cfg).await)
            } else {
                None
            };

            let ok = dataset.is_ok() && endpoint_ok;
            let v = serde_json::json!({
                "schema_version": views::SCHEMA_VERSION,
                "kind": "doctor",
                "ok": ok,
                "name": "papershelf",
                "version": env!("CARGO_PKG_VERSION"),
                "configured": cfg,
                "checks": checks,
                "probe": probe,
                "elapsed_ms": t0.elapsed().as_millis() as u64,
            });
            println!("{v}");
            if ok {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            }
        }
        Commands::Version(args) => {
            match args.output {
                OutputFormat::Text => println!("papershelf {}", env!("CARGO_PKG_VERSION")),
                OutputFormat::Json => println!(
                    "{}",
                    serde_json::json!({
                        "schema_version": views::SCHEMA_VERSION,
                        "kind": "version",
                        "ok": true,
                        "name": "papershelf",
                        "version": env!("CARGO_PKG_VERSION"),
                    })
                ),
            }
            ExitCode::SUCCESS
        }
    };
    Ok(code)
}
