//! Addressable views: `/`, `/category/<id>`, `/paper/<id>`.

use crate::{Error, Result};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "view", rename_all = "snake_case")]
pub enum Route {
    Home,
    Category { id: String },
    Paper { id: String },
}

impl Route {
    pub fn parse(path: &str) -> Result<Route> {
        let p = path.trim();
        // Fragments (`/#papers`) address a section of the home view.
        let p = p.split('#').next().unwrap_or("");
        let p = p.trim_end_matches('/');
        if p.is_empty() {
            return Ok(Route::Home);
        }
        let Some(rest) = p.strip_prefix('/') else {
            return Err(Error::InvalidRoute(path.to_string()));
        };
        let mut parts = rest.splitn(2, '/');
        let head = parts.next().unwrap_or("");
        let id = parts.next().unwrap_or("").trim();
        if id.is_empty() || id.contains('/') {
            return Err(Error::InvalidRoute(path.to_string()));
        }
        match head {
            "category" => Ok(Route::Category { id: id.to_string() }),
            "paper" => Ok(Route::Paper { id: id.to_string() }),
            _ => Err(Error::InvalidRoute(path.to_string())),
        }
    }

    pub fn path(&self) -> String {
        match self {
            Route::Home => "/".to_string(),
            Route::Category { id } => format!("/category/{id}"),
            Route::Paper { id } => format!("/paper/{id}"),
        }
    }
}
