use crate::{CategorySelector, Paper};
use serde::Serialize;
use std::collections::BTreeSet;

/// Per-view filter state. Owned by whoever renders the listing and passed in explicitly.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Selection {
    pub category: CategorySelector,
    /// Exact `submittedAt` match; `None` (or an empty string) means every date.
    pub date: Option<String>,
}

impl Selection {
    pub fn new(category: Option<&str>, date: Option<&str>) -> Self {
        Self {
            category: CategorySelector::from_param(category),
            date: date.filter(|d| !d.is_empty()).map(str::to_string),
        }
    }

    pub fn matches(&self, paper: &Paper) -> bool {
        if !self.category.matches(paper) {
            return false;
        }
        match self.date.as_deref() {
            Some(d) if !d.is_empty() => paper.submitted_at == d,
            _ => true,
        }
    }
}

/// Keep the records matching `selection`, in source order.
///
/// The source is assumed latest-first already; nothing is re-sorted here.
pub fn filter<'a>(papers: &'a [Paper], selection: &Selection) -> Vec<&'a Paper> {
    let out: Vec<&Paper> = papers.iter().filter(|p| selection.matches(p)).collect();
    tracing::trace!(
        total = papers.len(),
        kept = out.len(),
        category = selection.category.id(),
        date = selection.date.as_deref().unwrap_or(""),
        "filtered catalog"
    );
    out
}

/// Unique `submittedAt` values, newest first.
pub fn distinct_dates(papers: &[Paper]) -> Vec<&str> {
    let set: BTreeSet<&str> = papers.iter().map(|p| p.submitted_at.as_str()).collect();
    set.into_iter().rev().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::paper::sample;
    use proptest::prelude::*;

    fn two_record_catalog() -> Vec<Paper> {
        vec![
            sample("2401.00002", &["cs.AI"], "2024-01-02"),
            sample("2401.00001", &["cs.LG"], "2024-01-01"),
        ]
    }

    #[test]
    fn category_filter_keeps_only_tagged_records() {
        let catalog = two_record_catalog();
        let got = filter(&catalog, &Selection::new(Some("cs.AI"), None));
        assert_eq!(got, vec![&catalog[0]]);
    }

    #[test]
    fn distinct_dates_are_newest_first() {
        let catalog = two_record_catalog();
        assert_eq!(distinct_dates(&catalog), vec!["2024-01-02", "2024-01-01"]);
    }

    #[test]
    fn date_filter_is_exact_not_prefix() {
        let catalog = two_record_catalog();
        assert!(filter(&catalog, &Selection::new(None, Some("2024-01"))).is_empty());
        assert!(filter(&catalog, &Selection::new(None, Some(" 2024-01-01"))).is_empty());
        let got = filter(&catalog, &Selection::new(None, Some("2024-01-01")));
        assert_eq!(got.len(), 1);
        assert_eq!(got[0].id, "2401.00001");
    }

    #[test]
    fn empty_date_selector_means_all_dates() {
        let catalog = two_record_catalog();
        let sel = Selection {
            category: CategorySelector::All,
            date: Some(String::new()),
        };
        assert_eq!(filter(&catalog, &sel).len(), 2);
    }

    #[test]
    fn empty_catalog_and_no_matches_are_empty_not_errors() {
        assert!(filter(&[], &Selection::default()).is_empty());
        assert!(distinct_dates(&[]).is_empty());
        let catalog = two_record_catalog();
        assert!(filter(&catalog, &Selection::new(Some("cs.SE"), None)).is_empty());
    }

    #[test]
    fn category_match_is_case_sensitive() {
        let catalog = two_record_catalog();
        assert!(filter(&catalog, &Selection::new(Some("cs.ai"), None)).is_empty());
    }

    const TAGS: &[&str] = &["cs.AI", "cs.LG", "cs.CV", "cs.CL", "cs.SE"];

    fn arb_catalog() -> impl Strategy<Value = Vec<Paper>> {
        prop::collection::vec(
            (
                prop::collection::vec(0..TAGS.len(), 1..3),
                1u32..6,
                1u32..28,
            ),
            0..24,
        )
        .prop_map(|rows| {
            rows.into_iter()
                .enumerate()
                .map(|(i, (tags, month, day))| {
                    let cats: Vec<&str> = tags.into_iter().map(|t| TAGS[t]).collect();
                    sample(
                        &format!("2401.{i:05}"),
                        &cats,
                        &format!("2024-{month:02}-{day:02}"),
                    )
                })
                .collect()
        })
    }

    proptest! {
        #[test]
        fn all_without_date_is_identity(catalog in arb_catalog()) {
            let got: Vec<Paper> = filter(&catalog, &Selection::default())
                .into_iter()
                .cloned()
                .collect();
            prop_assert_eq!(got, catalog);
        }

        #[test]
        fn category_filter_is_sound_and_complete(
            catalog in arb_catalog(),
            tag in 0..TAGS.len(),
        ) {
            let tag = TAGS[tag];
            let got = filter(&catalog, &Selection::new(Some(tag), None));
            prop_assert!(got.iter().all(|p| p.has_category(tag)));
            let expected = catalog.iter().filter(|p| p.has_category(tag)).count();
            prop_assert_eq!(got.len(), expected);
        }

        #[test]
        fn filter_is_idempotent(
            catalog in arb_catalog(),
            tag in 0..TAGS.len(),
            pick_date in any::<bool>(),
        ) {
            let date = if pick_date {
                catalog.first().map(|p| p.submitted_at.clone())
            } else {
                None
            };
            let sel = Selection::new(Some(TAGS[tag]), date.as_deref());
            let once: Vec<Paper> = filter(&catalog, &sel).into_iter().cloned().collect();
            let twice: Vec<Paper> = filter(&once, &sel).into_iter().cloned().collect();
            prop_assert_eq!(once, twice);
        }

        #[test]
        fn distinct_dates_unique_and_descending(catalog in arb_catalog()) {
            let dates = distinct_dates(&catalog);
            prop_assert!(dates.windows(2).all(|w| w[0] > w[1]));
            for p in &catalog {
                prop_assert_eq!(
                    dates.iter().filter(|d| **d == p.submitted_at).count(),
                    1
                );
            }
        }
    }
}
