// keymatch - keep the rows of one table whose key columns match another table

mod exit_codes;
mod report;
mod run;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{ArgAction, Parser};

use exit_codes::{EXIT_CONFIG, EXIT_IO, EXIT_SUCCESS, EXIT_USAGE};

pub(crate) const USAGE: &str = "keymatch <PRIMARY> <REFERENCE> <OUTPUT> --keys <COLS>";

#[derive(Parser)]
#[command(name = "keymatch")]
#[command(about = "Remove rows from a table whose key columns have no match in a reference table")]
#[command(version)]
#[command(after_help = "\
Examples:
  keymatch orders.csv customers.csv out/orders.csv --keys customer_id
  keymatch contacts.xlsx optins.csv kept.csv -k name,email --unmatched dropped.csv
  keymatch a.tsv b.tsv out.tsv -k id --delimiter '\\t'
  keymatch export.csv list.csv out.csv -k id --quoted --json")]
pub(crate) struct Cli {
    /// Table to filter (CSV/delimited text or Excel)
    pub primary: PathBuf,

    /// Table supplying the accepted key tuples
    pub reference: PathBuf,

    /// Where to write the matched rows (.xlsx writes a workbook)
    pub output: PathBuf,

    /// Comma-separated key column names, e.g. `id` or `name,email`
    #[arg(long, short = 'k', value_name = "COLS")]
    pub keys: Option<String>,

    /// Also write the removed rows to this file
    #[arg(long, value_name = "PATH")]
    pub unmatched: Option<PathBuf>,

    /// Field delimiter for delimited files [default: ,]
    #[arg(long, short = 'd', value_parser = parse_delimiter)]
    pub delimiter: Option<char>,

    /// Parse and write RFC 4180 quoted fields instead of a plain split
    #[arg(long)]
    pub quoted: bool,

    /// Keep leading/trailing spaces and tabs in fields
    #[arg(long)]
    pub no_trim: bool,

    /// Worksheet to read from Excel inputs (default: first sheet)
    #[arg(long)]
    pub sheet: Option<String>,

    /// Settings file (default: <config dir>/keymatch/config.toml if present)
    #[arg(long, env = "KEYMATCH_CONFIG", value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Print a single JSON summary on stdout instead of the report
    #[arg(long)]
    pub json: bool,

    /// Suppress the report
    #[arg(long, short = 'q')]
    pub quiet: bool,

    /// More log output on stderr (-v info, -vv debug). RUST_LOG overrides.
    #[arg(long, short = 'v', action = ArgAction::Count)]
    pub verbose: u8,
}

/// Accepts a single character, or the escapes `\t` and `tab`.
fn parse_delimiter(s: &str) -> Result<char, String> {
    let c = match s {
        "\\t" | "tab" => '\t',
        _ => {
            let mut chars = s.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => c,
                _ => return Err(format!("delimiter must be a single character, got '{s}'")),
            }
        }
    };
    if matches!(c, '\n' | '\r') {
        return Err("delimiter cannot be a line break".to_string());
    }
    Ok(c)
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run::cmd_match(cli) {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(CliError { code, message, hint }) => {
            if !message.is_empty() {
                eprintln!("error: {}", message);
            }
            if let Some(hint) = hint {
                eprintln!("hint:  {}", hint);
            }
            ExitCode::from(code)
        }
    }
}

#[derive(Debug)]
pub struct CliError {
    pub code: u8,
    pub message: String,
    pub hint: Option<String>,
}

impl CliError {
    pub fn args(msg: impl Into<String>) -> Self {
        Self { code: EXIT_USAGE, message: msg.into(), hint: None }
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self { code: EXIT_CONFIG, message: msg.into(), hint: None }
    }

    pub fn io(msg: impl Into<String>) -> Self {
        Self { code: EXIT_IO, message: msg.into(), hint: None }
    }

    /// Add a hint to an existing error.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

impl From<keymatch_io::IoError> for CliError {
    fn from(err: keymatch_io::IoError) -> Self {
        use keymatch_io::IoError;
        match err {
            // Quoted-mode option problems are the caller's to fix
            IoError::Unsupported(msg) => CliError::args(msg),
            other => CliError::io(other.to_string()),
        }
    }
}

impl From<keymatch_config::ConfigError> for CliError {
    fn from(err: keymatch_config::ConfigError) -> Self {
        CliError::config(err.to_string())
    }
}

impl From<keymatch_matcher::MatchError> for CliError {
    fn from(err: keymatch_matcher::MatchError) -> Self {
        use keymatch_matcher::MatchError;
        match err {
            MatchError::NoKeys => CliError::args("at least one key column is required")
                .with_hint(format!("usage: {USAGE}")),
            MatchError::MissingColumns { table, missing, available } => CliError::config(format!(
                "columns [{}] not found in {table}",
                missing.join(", ")
            ))
            .with_hint(format!("available columns: [{}]", available.join(", "))),
        }
    }
}
