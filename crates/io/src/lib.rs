//! `keymatch-io` — load and save tables as delimited text or Excel workbooks.
//!
//! The format is picked from the file extension; anything that is not a
//! spreadsheet extension is treated as delimited text.

pub mod delimited;
pub mod error;
pub mod excel;

use std::io;
use std::path::{Path, PathBuf};

use keymatch_matcher::Table;

pub use delimited::{DelimitedOptions, Quoting};
pub use error::IoError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    Delimited,
    Excel,
}

impl FileFormat {
    pub fn from_path(path: &Path) -> Self {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());
        match ext.as_deref() {
            Some("xlsx" | "xlsm" | "xls" | "xlsb" | "ods") => Self::Excel,
            _ => Self::Delimited,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ReadOptions {
    pub delimited: DelimitedOptions,
    /// Worksheet to read from Excel sources; first sheet when unset.
    pub sheet: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct WriteOptions {
    pub delimited: DelimitedOptions,
}

pub fn read_table(path: &Path, options: &ReadOptions) -> Result<Table, IoError> {
    if !path.exists() {
        return Err(IoError::NotFound(path.to_path_buf()));
    }

    let table = match FileFormat::from_path(path) {
        FileFormat::Delimited => delimited::import(path, &options.delimited)?,
        FileFormat::Excel => excel::import(path, options.sheet.as_deref(), options.delimited.trim)?,
    };

    log::debug!(
        "read {}: {} row(s), {} column(s)",
        path.display(),
        table.row_count(),
        table.column_count()
    );
    Ok(table)
}

/// Check that `path` can take a table and create its parent directory.
///
/// Callers writing several files run this for all of them before the first
/// write, so a bad destination fails the run with nothing on disk.
pub fn prepare_destination(path: &Path) -> Result<(), IoError> {
    if FileFormat::from_path(path) == FileFormat::Excel && !is_xlsx(path) {
        return Err(IoError::Unsupported(format!(
            "cannot write {}: only .xlsx is supported for Excel output",
            path.display()
        )));
    }

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .map_err(|source| IoError::CreateDir { path: parent.to_path_buf(), source })?;
    }

    if path.is_dir() {
        return Err(IoError::Write {
            path: path.to_path_buf(),
            source: io::Error::other("is a directory"),
        });
    }
    Ok(())
}

/// Absolute form of a path that may not exist yet.
///
/// The deepest existing ancestor is canonicalized and the remaining
/// components are appended, so `./out.csv` and `out.csv` resolve alike.
pub fn resolve_destination(path: &Path) -> io::Result<PathBuf> {
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()?.join(path)
    };

    let mut existing = absolute.as_path();
    let mut rest = Vec::new();
    loop {
        if let Ok(mut base) = existing.canonicalize() {
            base.extend(rest.iter().rev());
            return Ok(base);
        }
        match (existing.parent(), existing.file_name()) {
            (Some(parent), Some(name)) => {
                rest.push(name);
                existing = parent;
            }
            _ => return Ok(absolute),
        }
    }
}

/// Whether two destination paths name the same file.
pub fn same_destination(a: &Path, b: &Path) -> bool {
    match (resolve_destination(a), resolve_destination(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => a == b,
    }
}

/// Write `table` to `path`, creating the parent directory first.
pub fn write_table(path: &Path, table: &Table, options: &WriteOptions) -> Result<(), IoError> {
    prepare_destination(path)?;

    match FileFormat::from_path(path) {
        FileFormat::Delimited => delimited::export(path, table, &options.delimited)?,
        FileFormat::Excel => excel::export(path, table)?,
    }

    log::debug!("wrote {} row(s) to {}", table.row_count(), path.display());
    Ok(())
}

fn is_xlsx(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("xlsx"))
}
