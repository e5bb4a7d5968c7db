use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchError {
    /// The key column list was empty.
    NoKeys,
    /// One or more key columns are absent from a table.
    MissingColumns {
        /// Label of the offending table (e.g. "primary (orders.csv)").
        table: String,
        missing: Vec<String>,
        available: Vec<String>,
    },
}

impl fmt::Display for MatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoKeys => write!(f, "at least one key column is required"),
            Self::MissingColumns { table, missing, available } => {
                write!(
                    f,
                    "columns [{}] not found in {table}; available columns: [{}]",
                    missing.join(", "),
                    available.join(", "),
                )
            }
        }
    }
}

impl std::error::Error for MatchError {}
