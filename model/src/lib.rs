//! FILENAME: model/src/lib.rs
//! PURPOSE: Shared data model for the indicator drill-down tree.
//! CONTEXT: Re-exports the wire row types, reporting-period column
//! projection and number formatting for use by the other crates.

pub mod columns;
pub mod format;
pub mod row;

// Re-export commonly used types at the crate root
pub use columns::{derive_columns, ColumnWindow, PeriodColumn};
pub use format::{format_value, FormatMode, Locale, MISSING_PLACEHOLDER};
pub use row::{CellValue, RowId, TreeRow};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_builds_rows() {
        let mut row = TreeRow::new(1, "Region A", false);
        row.set_value("2020 г.", 100.0);
        assert_eq!(row.value("2020 г."), Some(100.0));
        assert!(!row.leaf);
    }

    #[test]
    fn it_projects_and_formats() {
        let mut row = TreeRow::new(1, "Region A", true);
        row.set_value("2020 г.", 1_234_567.0);

        let columns = derive_columns(std::slice::from_ref(&row));
        assert_eq!(columns.len(), 1);

        let locale = Locale::ru();
        let text = format_value(row.value(&columns[0].key), FormatMode::Thousands, &locale);
        assert_eq!(text, "1 235 тыс.");
    }
}
