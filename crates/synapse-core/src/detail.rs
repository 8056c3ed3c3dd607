//! Detail panel content.
//!
//! Pages embed their catalogs as JSON in `<script type="application/json">`
//! blocks; the panel renders one entry by key.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("detail catalog JSON is invalid: {0}")]
    Parse(#[from] serde_json::Error),
}

/// One entry shown in a detail panel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetailEntry {
    pub title: String,
    /// CSS modifier class for the tag badge.
    #[serde(default)]
    pub tag: String,
    #[serde(default, alias = "tagText")]
    pub tag_text: String,
    #[serde(default)]
    pub desc: String,
    #[serde(default)]
    pub details: Vec<String>,
    #[serde(default)]
    pub prereqs: String,
}

/// Entries keyed by the name used in `showDetail(key)`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DetailCatalog {
    entries: HashMap<String, DetailEntry>,
}

impl DetailCatalog {
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn get(&self, key: &str) -> Option<&DetailEntry> {
        self.entries.get(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
