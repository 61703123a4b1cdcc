//! FILENAME: model/src/row.rs
//! PURPOSE: Defines the wire-level result row fetched from the backend.
//! CONTEXT: One fetched row of the drill-down table. The backend sends
//! loosely-typed JSON: `leaf` arrives as the strings "true"/"false" (or a
//! bool), `id` may be a number or a numeric string, and period cells may be
//! numbers, numeric strings, "-" or null. Deserialization normalizes all of
//! that so the rest of the workspace sees clean types.

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

/// Unique identifier of a row within the fetched tree.
/// Uniqueness across the whole tree is assumed, not verified.
pub type RowId = u64;

/// A single data cell of a fetched row.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CellValue {
    Number(f64),
    Text(String),
    Missing,
}

impl CellValue {
    /// Returns the numeric value, parsing numeric text if necessary.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Number(n) => Some(*n),
            CellValue::Text(s) => s.trim().replace(',', ".").parse::<f64>().ok(),
            CellValue::Missing => None,
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, CellValue::Missing)
    }
}

impl<'de> Deserialize<'de> for CellValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Number(f64),
            Text(String),
            Bool(bool),
            Null,
        }

        Ok(match Repr::deserialize(deserializer)? {
            Repr::Number(n) => CellValue::Number(n),
            Repr::Text(s) => {
                let trimmed = s.trim();
                if trimmed.is_empty() || trimmed == "-" || trimmed == "--" {
                    CellValue::Missing
                } else if let Ok(n) = trimmed.replace(',', ".").parse::<f64>() {
                    CellValue::Number(n)
                } else {
                    CellValue::Text(s)
                }
            }
            Repr::Bool(b) => CellValue::Text(b.to_string()),
            Repr::Null => CellValue::Missing,
        })
    }
}

/// One row of the drill-down result tree as fetched from the backend.
///
/// Every key that is not `id`, `text` or `leaf` lands in `values`; the
/// column projector decides which of those keys are reporting periods.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TreeRow {
    #[serde(deserialize_with = "de_row_id")]
    pub id: RowId,

    /// Display name of the row (region, district, ...).
    #[serde(default)]
    pub text: String,

    /// Whether the row is a leaf. Non-leaf rows have not-yet-fetched
    /// children; expanding one triggers a child fetch.
    #[serde(default = "default_leaf", deserialize_with = "de_leaf")]
    pub leaf: bool,

    /// All remaining keys of the wire object, period columns included.
    #[serde(flatten)]
    pub values: BTreeMap<String, CellValue>,
}

fn default_leaf() -> bool {
    true
}

impl TreeRow {
    pub fn new(id: RowId, text: impl Into<String>, leaf: bool) -> Self {
        TreeRow {
            id,
            text: text.into(),
            leaf,
            values: BTreeMap::new(),
        }
    }

    /// Sets a numeric cell under the given column key.
    pub fn set_value(&mut self, key: impl Into<String>, value: f64) {
        self.values.insert(key.into(), CellValue::Number(value));
    }

    /// Returns the numeric value of the given column, if present and numeric.
    pub fn value(&self, key: &str) -> Option<f64> {
        self.values.get(key).and_then(CellValue::as_number)
    }
}

fn de_row_id<'de, D>(deserializer: D) -> Result<RowId, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Repr {
        Number(u64),
        Text(String),
    }

    match Repr::deserialize(deserializer)? {
        Repr::Number(n) => Ok(n),
        Repr::Text(s) => s
            .trim()
            .parse::<u64>()
            .map_err(|_| serde::de::Error::custom(format!("invalid row id: {:?}", s))),
    }
}

fn de_leaf<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Repr {
        Bool(bool),
        Text(String),
    }

    Ok(match Repr::deserialize(deserializer)? {
        Repr::Bool(b) => b,
        Repr::Text(s) => s.trim().eq_ignore_ascii_case("true"),
    })
}
