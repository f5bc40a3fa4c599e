//! In-memory catalog snapshot owned by a single view activation.

use crate::{filter, paper, Error, Paper, Result, Selection};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SnapshotOrigin {
    Bundled,
    Remote,
}

/// Result of one refresh attempt, as handed back to the snapshot owner.
#[derive(Debug, Clone, PartialEq)]
pub enum RefreshOutcome {
    /// A validated, non-empty list that should replace the snapshot.
    Updated {
        source: &'static str,
        papers: Vec<Paper>,
        elapsed_ms: u128,
    },
    /// The attempt failed; the current snapshot stays authoritative.
    Kept {
        source: &'static str,
        reason: Error,
        elapsed_ms: u128,
    },
    /// No attempt was made (offline, or no source configured).
    Skipped,
}

impl RefreshOutcome {
    pub fn from_fetch(source: &'static str, result: Result<Vec<Paper>>, elapsed_ms: u128) -> Self {
        match result {
            Ok(papers) if papers.is_empty() => RefreshOutcome::Kept {
                source,
                reason: Error::EmptyCatalog,
                elapsed_ms,
            },
            Ok(papers) => match paper::validate_snapshot(&papers) {
                Ok(()) => RefreshOutcome::Updated {
                    source,
                    papers,
                    elapsed_ms,
                },
                Err(reason) => RefreshOutcome::Kept {
                    source,
                    reason,
                    elapsed_ms,
                },
            },
            Err(reason) => RefreshOutcome::Kept {
                source,
                reason,
                elapsed_ms,
            },
        }
    }

    pub fn is_updated(&self) -> bool {
        matches!(self, RefreshOutcome::Updated { .. })
    }

    /// Short machine-readable label for reports.
    pub fn label(&self) -> &'static str {
        match self {
            RefreshOutcome::Updated { .. } => "updated",
            RefreshOutcome::Kept { reason, .. } => reason.code(),
            RefreshOutcome::Skipped => "skipped",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Catalog {
    papers: Vec<Paper>,
    origin: SnapshotOrigin,
    settled: bool,
}

impl Catalog {
    /// Start from the bundled snapshot.
    pub fn new(papers: Vec<Paper>) -> Self {
        Self {
            papers,
            origin: SnapshotOrigin::Bundled,
            settled: false,
        }
    }

    pub fn papers(&self) -> &[Paper] {
        &self.papers
    }

    pub fn origin(&self) -> SnapshotOrigin {
        self.origin
    }

    pub fn len(&self) -> usize {
        self.papers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.papers.is_empty()
    }

    /// Whether a refresh outcome has already been applied this activation.
    pub fn is_settled(&self) -> bool {
        self.settled
    }

    /// Apply a refresh outcome. Returns `true` if the snapshot was replaced.
    ///
    /// Only the first outcome counts; later ones are ignored so a snapshot is
    /// replaced at most once.
    pub fn apply(&mut self, outcome: RefreshOutcome) -> bool {
        if self.settled {
            tracing::debug!("catalog refresh already settled; ignoring outcome");
            return false;
        }
        self.settled = true;
        match outcome {
            RefreshOutcome::Updated {
                source,
                papers,
                elapsed_ms,
            } => {
                tracing::info!(
                    source,
                    elapsed_ms = elapsed_ms as u64,
                    before = self.papers.len(),
                    after = papers.len(),
                    "catalog replaced from refresh"
                );
                self.papers = papers;
                self.origin = SnapshotOrigin::Remote;
                true
            }
            RefreshOutcome::Kept {
                source,
                reason,
                elapsed_ms,
            } => {
                tracing::debug!(
                    source,
                    elapsed_ms = elapsed_ms as u64,
                    reason = %reason,
                    "catalog refresh unavailable; keeping current snapshot"
                );
                false
            }
            RefreshOutcome::Skipped => false,
        }
    }

    pub fn filter(&self, selection: &Selection) -> Vec<&Paper> {
        filter::filter(&self.papers, selection)
    }

    pub fn distinct_dates(&self) -> Vec<&str> {
        filter::distinct_dates(&self.papers)
    }

    pub fn find(&self, id: &str) -> Result<&Paper> {
        paper::find_paper(&self.papers, id)
    }
}
