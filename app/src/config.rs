//! FILENAME: app/src/config.rs
//! PURPOSE: JSON configuration for the demo binary.
//! CONTEXT: Carries the backend base URL, the tree query parameters and the
//! display options. Everything display-related has a default so a minimal
//! config only names the backend and the query.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use client::TreeQuery;
use model::{ColumnWindow, FormatMode};

fn default_measure_id() -> u32 {
    1
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Backend base URL, e.g. "http://localhost:8080".
    pub base_url: String,

    #[serde(default = "default_measure_id")]
    pub measure_id: u32,

    pub index_id: u64,
    pub period_id: u64,
    pub terms: String,
    pub term_id: u64,
    pub dic_ids: String,

    #[serde(default)]
    pub idx: i64,

    /// Visible column window preset.
    #[serde(default)]
    pub columns: ColumnWindow,

    /// Number format for printed and exported cells.
    #[serde(default)]
    pub format: FormatMode,

    /// How many levels below the roots to drill into (0 = roots only).
    #[serde(default)]
    pub drill_depth: usize,

    /// When set, the flattened view is exported here as xlsx.
    #[serde(default)]
    pub export_path: Option<PathBuf>,
}

impl AppConfig {
    pub fn load(path: &Path) -> Result<Self, std::io::Error> {
        let text = std::fs::read_to_string(path)?;
        serde_json::from_str(&text).map_err(std::io::Error::other)
    }

    pub fn tree_query(&self) -> TreeQuery {
        TreeQuery {
            measure_id: self.measure_id,
            index_id: self.index_id,
            period_id: self.period_id,
            terms: self.terms.clone(),
            term_id: self.term_id,
            dic_ids: self.dic_ids.clone(),
            idx: self.idx,
        }
    }
}
