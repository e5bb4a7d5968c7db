// Excel import/export (xlsx, xls, xlsb, ods in; xlsx out)

use std::path::Path;

use calamine::{open_workbook_auto, Data, Reader, Sheets};
use keymatch_matcher::Table;
use rust_xlsxwriter::Workbook;

use crate::error::IoError;

/// Hard worksheet limits of the xlsx format.
const MAX_ROWS: usize = 1_048_576;
const MAX_COLS: usize = 16_384;

/// Read one worksheet as a table; first row of the used range is the header.
pub fn import(path: &Path, sheet: Option<&str>, trim: bool) -> Result<Table, IoError> {
    let excel_err = |message: String| IoError::Excel { path: path.to_path_buf(), message };

    let mut workbook: Sheets<_> = open_workbook_auto(path)
        .map_err(|e| excel_err(format!("failed to open Excel file: {e}")))?;

    let sheet_names = workbook.sheet_names().to_vec();
    let sheet_name = match sheet {
        Some(name) => {
            if !sheet_names.iter().any(|s| s == name) {
                return Err(excel_err(format!(
                    "sheet '{name}' not found; available sheets: [{}]",
                    sheet_names.join(", ")
                )));
            }
            name.to_string()
        }
        None => sheet_names
            .first()
            .cloned()
            .ok_or_else(|| excel_err("Excel file contains no sheets".to_string()))?,
    };

    let range = workbook
        .worksheet_range(&sheet_name)
        .map_err(|e| excel_err(format!("failed to read sheet '{sheet_name}': {e}")))?;

    let mut rows = range.rows().map(|row| {
        row.iter()
            .map(|cell| {
                let text = cell_text(cell);
                if trim {
                    text.trim_matches(|c: char| c == ' ' || c == '\t').to_string()
                } else {
                    text
                }
            })
            .collect::<Vec<String>>()
    });

    let Some(columns) = rows.next() else {
        return Ok(Table::default());
    };
    // calamine pads every row to the range width; drop rows that are blank throughout
    let body: Vec<Vec<String>> = rows.filter(|r| r.iter().any(|c| !c.is_empty())).collect();

    log::info!(
        "{} [{sheet_name}]: {} row(s), {} column(s)",
        path.display(),
        body.len(),
        columns.len()
    );

    Ok(Table::new(columns, body))
}

/// Cell value as it would display without formatting.
fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        // Format nicely: integers without decimals
        Data::Float(n) => {
            if n.fract() == 0.0 && n.abs() < 1e15 {
                format!("{}", *n as i64)
            } else {
                format!("{n}")
            }
        }
        Data::Int(n) => n.to_string(),
        Data::Bool(b) => String::from(if *b { "TRUE" } else { "FALSE" }),
        Data::Error(e) => format!("#{e:?}"),
        // Serial number; no number format is carried into the table
        Data::DateTime(dt) => format!("{}", dt.as_f64()),
        Data::DateTimeIso(s) => s.clone(),
        Data::DurationIso(s) => s.clone(),
    }
}

/// Write the table to a single-sheet xlsx workbook, every cell as a string.
pub fn export(path: &Path, table: &Table) -> Result<(), IoError> {
    let excel_err = |message: String| IoError::Excel { path: path.to_path_buf(), message };

    let width = table.rows().iter().map(Vec::len).max().unwrap_or(0).max(table.column_count());
    if table.row_count() + 1 > MAX_ROWS || width > MAX_COLS {
        return Err(excel_err(format!(
            "{} row(s) x {width} column(s) exceeds the xlsx limit of {MAX_ROWS} x {MAX_COLS}",
            table.row_count() + 1
        )));
    }

    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();

    let lines = std::iter::once(table.columns()).chain(table.rows().iter().map(Vec::as_slice));
    for (r, line) in lines.enumerate() {
        for (c, value) in line.iter().enumerate() {
            if value.is_empty() {
                continue;
            }
            // Bounds checked above
            worksheet
                .write_string(r as u32, c as u16, value)
                .map_err(|e| excel_err(format!("cannot write cell ({r}, {c}): {e}")))?;
        }
    }

    workbook
        .save(path)
        .map_err(|e| excel_err(format!("cannot save workbook: {e}")))
}
