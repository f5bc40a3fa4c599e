//! Fixed category registry.
//!
//! Records may carry category ids that are not listed here (e.g. `cs.CL`); the registry
//! only governs navigation and display metadata.

use crate::{Error, Result};
use serde::Serialize;
use std::collections::HashMap;
use std::sync::OnceLock;

pub const ALL_CATEGORY_ID: &str = "ALL";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Category {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
}

impl Category {
    pub fn is_all(&self) -> bool {
        self.id == ALL_CATEGORY_ID
    }
}

const CATEGORIES: &[Category] = &[
    Category {
        id: ALL_CATEGORY_ID,
        title: "All Papers",
        description: "Browse every tracked submission.",
    },
    Category {
        id: "cs.AI",
        title: "Artificial Intelligence",
        description: "Learning, reasoning, robotics, multi-agent systems.",
    },
    Category {
        id: "cs.AR",
        title: "Hardware Architecture",
        description: "Systems design, accelerators, compute hardware.",
    },
    Category {
        id: "cs.CC",
        title: "Computational Complexity",
        description: "Algorithms, proofs, and theoretical CS.",
    },
    Category {
        id: "cs.CV",
        title: "Computer Vision",
        description: "Vision transformers, 3D perception, multimodality.",
    },
    Category {
        id: "cs.LG",
        title: "Machine Learning",
        description: "Foundation models, optimization, generalization.",
    },
    Category {
        id: "cs.SE",
        title: "Software Engineering",
        description: "Dev tools, testing, programming languages.",
    },
];

fn index() -> &'static HashMap<&'static str, &'static Category> {
    static INDEX: OnceLock<HashMap<&'static str, &'static Category>> = OnceLock::new();
    INDEX.get_or_init(|| CATEGORIES.iter().map(|c| (c.id, c)).collect())
}

/// Registry entries in display order, `ALL` first.
pub fn all() -> &'static [Category] {
    CATEGORIES
}

pub fn lookup(id: &str) -> Option<&'static Category> {
    index().get(id).copied()
}

/// Navigation-time lookup: unknown ids are a not-found condition.
pub fn resolve(id: &str) -> Result<&'static Category> {
    lookup(id).ok_or_else(|| Error::CategoryNotFound(id.to_string()))
}

/// Category half of a [`crate::Selection`].
///
/// `Only` is not checked against the registry: filtering by an unregistered tag is legal
/// and simply matches whatever records carry it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CategorySelector {
    #[default]
    All,
    Only(String),
}

impl CategorySelector {
    /// `None`, empty, and `ALL` all mean "no category filter".
    pub fn from_param(id: Option<&str>) -> Self {
        match id.map(str::trim) {
            None | Some("") | Some(ALL_CATEGORY_ID) => CategorySelector::All,
            Some(id) => CategorySelector::Only(id.to_string()),
        }
    }

    pub fn id(&self) -> &str {
        match self {
            CategorySelector::All => ALL_CATEGORY_ID,
            CategorySelector::Only(id) => id,
        }
    }

    pub fn matches(&self, paper: &crate::Paper) -> bool {
        match self {
            CategorySelector::All => true,
            CategorySelector::Only(id) => paper.has_category(id),
        }
    }
}

/// Serializes as the bare id (`"ALL"` for no filter).
impl Serialize for CategorySelector {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.id())
    }
}
