//! FILENAME: model/src/columns.rs
//! PURPOSE: Reporting-period column projection over fetched rows.
//! CONTEXT: The backend widens each row with one key per reporting period
//! ("2010 г.", "Январь 2024", ...). This module recognizes those keys,
//! derives the ordered column set across all fetched rows, and applies the
//! user-selected visible window (most recent N, or all).

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::row::TreeRow;

static YEAR_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b(\d{4})\b").expect("valid regex"));

/// Month names as they appear in backend column keys, January first.
pub const MONTH_NAMES: [&str; 12] = [
    "Январь",
    "Февраль",
    "Март",
    "Апрель",
    "Май",
    "Июнь",
    "Июль",
    "Август",
    "Сентябрь",
    "Октябрь",
    "Ноябрь",
    "Декабрь",
];

/// A recognized reporting-period column: the raw key together with the
/// chronological ordering parsed out of it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodColumn {
    /// The raw wire key, used both for value lookup and as display header.
    pub key: String,

    /// The embedded 4-digit year, or 0 when only a month name was found.
    pub year: u16,

    /// 1-based month number when the key names a month.
    pub month: Option<u8>,
}

impl PeriodColumn {
    /// Parses a column key. Returns `None` for keys that are not reporting
    /// periods (e.g. `text`, `id`, arbitrary attribute columns).
    pub fn parse(key: &str) -> Option<PeriodColumn> {
        let year = YEAR_RE
            .captures(key)
            .and_then(|c| c.get(1))
            .and_then(|m| m.as_str().parse::<u16>().ok());

        let month = MONTH_NAMES
            .iter()
            .position(|name| key.contains(name))
            .map(|idx| (idx + 1) as u8);

        if year.is_none() && month.is_none() {
            return None;
        }

        Some(PeriodColumn {
            key: key.to_string(),
            year: year.unwrap_or(0),
            month,
        })
    }

    /// Chronological sort key: yearly columns precede the months of the
    /// same year.
    fn sort_key(&self) -> (u16, u8) {
        (self.year, self.month.unwrap_or(0))
    }
}

/// Derives the ordered set of reporting-period columns present anywhere in
/// the given rows. Every row is scanned, duplicates are dropped, and the
/// result is always sorted chronologically regardless of wire key order.
pub fn derive_columns(rows: &[TreeRow]) -> Vec<PeriodColumn> {
    let mut seen: HashSet<&str> = HashSet::new();
    let mut columns = Vec::new();

    for row in rows {
        for key in row.values.keys() {
            if seen.insert(key.as_str()) {
                if let Some(column) = PeriodColumn::parse(key) {
                    columns.push(column);
                }
            }
        }
    }

    columns.sort_by(|a, b| a.sort_key().cmp(&b.sort_key()).then(a.key.cmp(&b.key)));
    columns
}

/// The user-selected window over the ordered column sequence. Every preset
/// takes the most recent N columns; `All` returns the sequence unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnWindow {
    Last3,
    Last5,
    Last7,
    Last10,
    All,
}

impl Default for ColumnWindow {
    fn default() -> Self {
        ColumnWindow::Last7
    }
}

impl ColumnWindow {
    /// Number of columns the window keeps, `None` for `All`.
    pub fn limit(&self) -> Option<usize> {
        match self {
            ColumnWindow::Last3 => Some(3),
            ColumnWindow::Last5 => Some(5),
            ColumnWindow::Last7 => Some(7),
            ColumnWindow::Last10 => Some(10),
            ColumnWindow::All => None,
        }
    }

    /// Applies the window: the chronological suffix of up to N columns.
    pub fn apply<'a>(&self, columns: &'a [PeriodColumn]) -> &'a [PeriodColumn] {
        match self.limit() {
            Some(n) if n < columns.len() => &columns[columns.len() - n..],
            _ => columns,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row_with_keys(keys: &[&str]) -> TreeRow {
        let mut row = TreeRow::new(1, "A", true);
        for key in keys {
            row.set_value(*key, 1.0);
        }
        row
    }

    #[test]
    fn recognizes_year_columns_and_skips_structural_keys() {
        let rows = vec![row_with_keys(&["2010 г.", "2012 г.", "примечание"])];
        let columns = derive_columns(&rows);
        let keys: Vec<&str> = columns.iter().map(|c| c.key.as_str()).collect();
        assert_eq!(keys, vec!["2010 г.", "2012 г."]);
    }

    #[test]
    fn recognizes_month_columns() {
        let column = PeriodColumn::parse("Январь 2024").unwrap();
        assert_eq!(column.year, 2024);
        assert_eq!(column.month, Some(1));

        let column = PeriodColumn::parse("Декабрь").unwrap();
        assert_eq!(column.year, 0);
        assert_eq!(column.month, Some(12));
    }

    #[test]
    fn scans_all_rows_not_just_the_first() {
        let rows = vec![
            row_with_keys(&["2011 г."]),
            row_with_keys(&["2009 г.", "2011 г."]),
        ];
        let keys: Vec<String> = derive_columns(&rows).into_iter().map(|c| c.key).collect();
        assert_eq!(keys, vec!["2009 г.", "2011 г."]);
    }

    #[test]
    fn orders_chronologically_not_lexically() {
        let rows = vec![row_with_keys(&[
            "Январь 2021",
            "2020 г.",
            "Февраль 2021",
            "2019 г.",
        ])];
        let keys: Vec<String> = derive_columns(&rows).into_iter().map(|c| c.key).collect();
        assert_eq!(
            keys,
            vec!["2019 г.", "2020 г.", "Январь 2021", "Февраль 2021"]
        );
    }

    #[test]
    fn window_takes_most_recent_suffix() {
        let rows = vec![row_with_keys(&[
            "2016 г.", "2017 г.", "2018 г.", "2019 г.", "2020 г.",
        ])];
        let columns = derive_columns(&rows);

        let window = ColumnWindow::Last3.apply(&columns);
        let keys: Vec<&str> = window.iter().map(|c| c.key.as_str()).collect();
        assert_eq!(keys, vec!["2018 г.", "2019 г.", "2020 г."]);

        assert_eq!(ColumnWindow::All.apply(&columns).len(), 5);
        // Window larger than the sequence returns everything.
        assert_eq!(ColumnWindow::Last10.apply(&columns).len(), 5);
    }
}
