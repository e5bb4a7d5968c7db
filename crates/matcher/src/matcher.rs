use std::collections::HashSet;

use serde::Serialize;

use crate::error::MatchError;
use crate::model::{Key, Table};

// ---------------------------------------------------------------------------
// Key resolution
// ---------------------------------------------------------------------------

/// Key column names resolved to positions in one particular table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyColumns {
    positions: Vec<usize>,
}

impl KeyColumns {
    /// Resolve every name against `table`. All missing names are reported at once.
    pub fn resolve(table: &Table, label: &str, names: &[String]) -> Result<Self, MatchError> {
        if names.is_empty() {
            return Err(MatchError::NoKeys);
        }

        let mut positions = Vec::with_capacity(names.len());
        let mut missing = Vec::new();
        for name in names {
            match table.column_index(name) {
                Some(i) => positions.push(i),
                None => missing.push(name.clone()),
            }
        }

        if !missing.is_empty() {
            return Err(MatchError::MissingColumns {
                table: label.to_string(),
                missing,
                available: table.columns().to_vec(),
            });
        }

        log::debug!("{label}: key columns {names:?} at positions {positions:?}");

        Ok(Self { positions })
    }

    pub fn key_of(&self, row: &[String]) -> Key {
        Key::extract(row, &self.positions)
    }
}

// ---------------------------------------------------------------------------
// Reference key set
// ---------------------------------------------------------------------------

/// Distinct key tuples of a table. Immutable once built.
#[derive(Debug, Clone, Default)]
pub struct KeySet {
    keys: HashSet<Key>,
}

impl KeySet {
    pub fn build(table: &Table, columns: &KeyColumns) -> Self {
        let keys = table.rows().iter().map(|row| columns.key_of(row)).collect();
        Self { keys }
    }

    pub fn contains(&self, key: &Key) -> bool {
        self.keys.contains(key)
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Matching
// ---------------------------------------------------------------------------

/// Row counts for one match run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MatchStats {
    pub primary_rows: usize,
    pub reference_rows: usize,
    /// Distinct key tuples in the reference table.
    pub reference_keys: usize,
    pub matched: usize,
    pub removed: usize,
}

#[derive(Debug, Clone)]
pub struct MatchOutput {
    /// Primary rows whose key is in the reference set, in primary order.
    pub matched: Table,
    /// The complement: primary rows that were dropped, in primary order.
    pub unmatched: Table,
    pub stats: MatchStats,
}

/// Split `primary` into rows whose key tuple appears in `reference` and rows
/// whose key tuple does not.
///
/// Key columns are resolved by name in each table independently, primary
/// first. Any missing column fails the whole call before rows are touched.
pub fn match_rows(
    primary: &Table,
    reference: &Table,
    keys: &[String],
) -> Result<MatchOutput, MatchError> {
    match_rows_labeled(primary, "primary table", reference, "reference table", keys)
}

/// Like [`match_rows`], with caller-supplied table labels for error messages.
pub fn match_rows_labeled(
    primary: &Table,
    primary_label: &str,
    reference: &Table,
    reference_label: &str,
    keys: &[String],
) -> Result<MatchOutput, MatchError> {
    let primary_cols = KeyColumns::resolve(primary, primary_label, keys)?;
    let reference_cols = KeyColumns::resolve(reference, reference_label, keys)?;

    let reference_keys = KeySet::build(reference, &reference_cols);
    log::info!(
        "{} reference row(s) -> {} distinct key(s)",
        reference.row_count(),
        reference_keys.len()
    );

    let (kept, dropped): (Vec<_>, Vec<_>) = primary
        .rows()
        .iter()
        .cloned()
        .partition(|row| reference_keys.contains(&primary_cols.key_of(row)));

    let stats = MatchStats {
        primary_rows: primary.row_count(),
        reference_rows: reference.row_count(),
        reference_keys: reference_keys.len(),
        matched: kept.len(),
        removed: dropped.len(),
    };

    Ok(MatchOutput {
        matched: primary.with_rows(kept),
        unmatched: primary.with_rows(dropped),
        stats,
    })
}

/// Only the matched rows of `primary`.
pub fn filter_matching(
    primary: &Table,
    reference: &Table,
    keys: &[String],
) -> Result<Table, MatchError> {
    match_rows(primary, reference, keys).map(|out| out.matched)
}
