use std::collections::HashMap;

// ---------------------------------------------------------------------------
// Table
// ---------------------------------------------------------------------------

/// Named columns plus string rows aligned positionally with them.
///
/// Short rows are padded with empty cells on construction, so every row has
/// at least `column_count()` cells. Rows wider than the header keep their
/// extra cells untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Vec<String>>,
    index: HashMap<String, usize>,
}

impl Table {
    pub fn new(columns: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        let width = columns.len();
        let mut index = HashMap::with_capacity(width);
        for (i, name) in columns.iter().enumerate() {
            // First occurrence wins for duplicate header names
            index.entry(name.clone()).or_insert(i);
        }

        let mut overflow = 0usize;
        let rows = rows
            .into_iter()
            .map(|mut row| {
                if row.len() < width {
                    row.resize(width, String::new());
                } else if row.len() > width {
                    overflow += 1;
                }
                row
            })
            .collect();

        if overflow > 0 {
            log::warn!("{overflow} row(s) have more cells than the {width} header column(s)");
        }

        Self { columns, rows, index }
    }

    /// Build a table from string slices. Mostly useful in tests.
    pub fn from_strs(columns: &[&str], rows: &[&[&str]]) -> Self {
        Self::new(
            columns.iter().map(|c| c.to_string()).collect(),
            rows.iter()
                .map(|r| r.iter().map(|c| c.to_string()).collect())
                .collect(),
        )
    }

    /// Same columns, different rows. Rows are taken as already normalized.
    pub(crate) fn with_rows(&self, rows: Vec<Vec<String>>) -> Self {
        Self {
            columns: self.columns.clone(),
            rows,
            index: self.index.clone(),
        }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Cell text, or "" when the row has no cell at `col`.
    pub fn cell(&self, row: usize, col: usize) -> &str {
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .map(String::as_str)
            .unwrap_or("")
    }
}

// ---------------------------------------------------------------------------
// Key
// ---------------------------------------------------------------------------

/// Ordered tuple of cell values used as match identity.
///
/// Compared component-wise, so `("1", "23")` and `("12", "3")` never collide.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Key(pub Vec<String>);

impl Key {
    /// Extract the cells at `positions`; absent cells become "".
    pub fn extract(row: &[String], positions: &[usize]) -> Self {
        Key(positions
            .iter()
            .map(|&i| row.get(i).cloned().unwrap_or_default())
            .collect())
    }}
