//! FILENAME: export/src/lib.rs
//! PURPOSE: Spreadsheet export of the drill-down tree.
//! CONTEXT: Flattens the entire fetched tree (independent of what is
//! expanded on screen) into `[Level, Name, ...visible columns]` rows and
//! writes them as an xlsx workbook.

pub mod error;
pub mod xlsx;

pub use error::ExportError;
pub use xlsx::{export_rows, save_xlsx, LEVEL_HEADER, NAME_HEADER, SHEET_NAME};
