//! Human report and `--json` summary for a match run.

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use keymatch_matcher::{MatchStats, Table};
use serde::Serialize;

pub fn inputs(
    out: &mut impl Write,
    primary: &Path,
    reference: &Path,
    keys: &[String],
) -> io::Result<()> {
    writeln!(out, "Reading input files...")?;
    writeln!(out, "  Primary:     {}", primary.display())?;
    writeln!(out, "  Reference:   {}", reference.display())?;
    writeln!(out, "  Key columns: [{}]", keys.join(", "))?;
    Ok(())
}

pub fn statistics(
    out: &mut impl Write,
    primary: (&Path, &Table),
    reference: (&Path, &Table),
) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "Input file statistics:")?;
    for (path, table) in [primary, reference] {
        writeln!(
            out,
            "  {}: {} rows, {} columns",
            path.display(),
            table.row_count(),
            table.column_count()
        )?;
    }
    writeln!(out)?;
    writeln!(out, "Matching rows on key columns...")?;
    Ok(())
}

pub fn results(
    out: &mut impl Write,
    primary: &Path,
    output: &Path,
    unmatched: Option<&Path>,
    stats: &MatchStats,
) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "Results:")?;
    writeln!(out, "  Original rows in {}: {}", primary.display(), stats.primary_rows)?;
    writeln!(out, "  Matching rows found: {}", stats.matched)?;
    writeln!(out, "  Rows removed: {}", stats.removed)?;
    writeln!(out, "  Output saved to: {}", output.display())?;
    if let Some(path) = unmatched {
        writeln!(out, "  Removed rows saved to: {}", path.display())?;
    }
    Ok(())
}

/// Shape of `--json` stdout. Field order is part of the contract.
#[derive(Debug, Serialize)]
pub struct JsonSummary {
    pub primary: PathBuf,
    pub reference: PathBuf,
    pub output: PathBuf,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unmatched: Option<PathBuf>,
    pub keys: Vec<String>,
    pub primary_columns: usize,
    pub reference_columns: usize,
    #[serde(flatten)]
    pub stats: MatchStats,
}
