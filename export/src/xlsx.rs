//! FILENAME: export/src/xlsx.rs
//! PURPOSE: Writes the flattened tree view as an xlsx workbook.
//! CONTEXT: Header row `[Уровень, Наименование, ...column keys]`, one data
//! row per fetched node in depth-first pre-order. Cell values are
//! pre-formatted through the number formatter; absent cells carry the fixed
//! placeholder. Export always covers the whole fetched tree, which is an
//! intentional divergence from the on-screen (expansion-gated) view.

use std::path::Path;

use rust_xlsxwriter::{Format, Workbook as XlsxWorkbook};

use model::{format_value, FormatMode, Locale, PeriodColumn};
use tree_engine::{flatten, TreeStore};

use crate::error::ExportError;

pub const LEVEL_HEADER: &str = "Уровень";
pub const NAME_HEADER: &str = "Наименование";
pub const SHEET_NAME: &str = "Данные";

/// Builds the exact cell text of the export: a header row followed by one
/// row per fetched node. Kept separate from the xlsx side effect so the
/// content is testable without parsing the workbook.
pub fn export_rows(
    store: &TreeStore,
    columns: &[PeriodColumn],
    mode: FormatMode,
    locale: &Locale,
) -> Vec<Vec<String>> {
    let mut rows = Vec::with_capacity(store.len() + 1);

    let mut header = Vec::with_capacity(columns.len() + 2);
    header.push(LEVEL_HEADER.to_string());
    header.push(NAME_HEADER.to_string());
    header.extend(columns.iter().map(|c| c.key.clone()));
    rows.push(header);

    for flat in flatten(store, columns) {
        let mut row = Vec::with_capacity(columns.len() + 2);
        row.push(flat.level.to_string());
        row.push(flat.name);
        row.extend(
            flat.values
                .into_iter()
                .map(|value| format_value(value, mode, locale)),
        );
        rows.push(row);
    }

    rows
}

/// Flattens the tree and saves it as an xlsx workbook at `path`.
pub fn save_xlsx(
    store: &TreeStore,
    columns: &[PeriodColumn],
    mode: FormatMode,
    locale: &Locale,
    path: &Path,
) -> Result<(), ExportError> {
    let mut xlsx = XlsxWorkbook::new();
    let worksheet = xlsx.add_worksheet();
    worksheet.set_name(SHEET_NAME)?;

    let bold = Format::new().set_bold();
    let rows = export_rows(store, columns, mode, locale);

    for (row_idx, row) in rows.iter().enumerate() {
        for (col_idx, cell) in row.iter().enumerate() {
            let (row_idx, col_idx) = (row_idx as u32, col_idx as u16);
            if row_idx == 0 {
                worksheet.write_string_with_format(row_idx, col_idx, cell, &bold)?;
            } else if col_idx == 0 {
                // Level column stays numeric for sorting in the spreadsheet.
                worksheet.write_number(row_idx, col_idx, cell.parse::<f64>().unwrap_or(0.0))?;
            } else {
                worksheet.write_string(row_idx, col_idx, cell)?;
            }
        }
    }

    xlsx.save(path)?;
    Ok(())
}
