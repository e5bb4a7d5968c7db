//! `keymatch-matcher` — keyed row matching between two tables.
//!
//! Pure engine crate: receives pre-loaded tables, returns the filtered table.
//! No CLI or IO dependencies.

pub mod error;
pub mod matcher;
pub mod model;

pub use error::MatchError;
pub use matcher::{filter_matching, match_rows, KeyColumns, KeySet, MatchOutput, MatchStats};
pub use model::{Key, Table};
