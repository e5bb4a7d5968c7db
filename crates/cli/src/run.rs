//! The match command: read both tables, match, write, report.

use std::io::{self, Write};

use keymatch_config::{QuotingSetting, Settings};
use keymatch_io::{
    prepare_destination, read_table, same_destination, write_table, DelimitedOptions, Quoting,
    ReadOptions, WriteOptions,
};
use keymatch_matcher::matcher::match_rows_labeled;

use crate::exit_codes::EXIT_ERROR;
use crate::report::{self, JsonSummary};
use crate::{Cli, CliError, USAGE};

/// Split a `--keys` value on commas; items are trimmed, empty items dropped.
pub(crate) fn parse_key_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|k| !k.is_empty())
        .map(str::to_string)
        .collect()
}

/// Merge CLI flags over settings-file values.
fn delimited_options(cli: &Cli, settings: &Settings) -> DelimitedOptions {
    let quoting = if cli.quoted {
        Quoting::Rfc4180
    } else {
        match settings.quoting {
            QuotingSetting::None => Quoting::None,
            QuotingSetting::Rfc4180 => Quoting::Rfc4180,
        }
    };
    DelimitedOptions {
        delimiter: cli.delimiter.unwrap_or(settings.delimiter),
        quoting,
        trim: settings.trim && !cli.no_trim,
    }
}

fn resolve_keys(cli: &Cli, settings: &Settings) -> Result<Vec<String>, CliError> {
    let keys = match &cli.keys {
        Some(raw) => parse_key_list(raw),
        None => settings.keys.clone(),
    };
    if keys.is_empty() {
        let msg = if cli.keys.is_some() {
            "--keys must name at least one column"
        } else {
            "--keys is required"
        };
        return Err(CliError::args(msg).with_hint(format!("usage: {USAGE}")));
    }
    Ok(keys)
}

fn stdout_err(e: io::Error) -> CliError {
    CliError::io(format!("cannot write to stdout: {e}"))
}

pub fn cmd_match(cli: Cli) -> Result<(), CliError> {
    let settings = Settings::discover(cli.config.as_deref())?;
    let keys = resolve_keys(&cli, &settings)?;

    if let Some(unmatched) = &cli.unmatched {
        if same_destination(unmatched, &cli.output) {
            return Err(CliError::args(format!(
                "--unmatched {} is the same file as the output {}",
                unmatched.display(),
                cli.output.display()
            )));
        }
    }

    let delimited = delimited_options(&cli, &settings);
    let read_opts = ReadOptions {
        delimited: delimited.clone(),
        sheet: cli.sheet.clone().or_else(|| settings.sheet.clone()),
    };
    let write_opts = WriteOptions { delimited };

    let human = !cli.json && !cli.quiet;
    let stdout = io::stdout();
    let mut out = stdout.lock();

    if human {
        report::inputs(&mut out, &cli.primary, &cli.reference, &keys).map_err(stdout_err)?;
    }

    let primary = read_table(&cli.primary, &read_opts)?;
    let reference = read_table(&cli.reference, &read_opts)?;

    if human {
        report::statistics(
            &mut out,
            (cli.primary.as_path(), &primary),
            (cli.reference.as_path(), &reference),
        )
        .map_err(stdout_err)?;
    }

    // Column validation happens here, before anything is written
    let result = match_rows_labeled(
        &primary,
        &format!("primary table ({})", cli.primary.display()),
        &reference,
        &format!("reference table ({})", cli.reference.display()),
        &keys,
    )?;

    // Every destination is checked before the first file is created
    prepare_destination(&cli.output)?;
    if let Some(path) = &cli.unmatched {
        prepare_destination(path)?;
    }

    write_table(&cli.output, &result.matched, &write_opts)?;
    if let Some(path) = &cli.unmatched {
        if let Err(e) = write_table(path, &result.unmatched, &write_opts) {
            if let Err(rm) = std::fs::remove_file(&cli.output) {
                log::warn!("cannot remove {}: {rm}", cli.output.display());
            }
            return Err(e.into());
        }
    }

    log::info!(
        "{} of {} primary row(s) matched",
        result.stats.matched,
        result.stats.primary_rows
    );

    if cli.json {
        let summary = JsonSummary {
            primary: cli.primary.clone(),
            reference: cli.reference.clone(),
            output: cli.output.clone(),
            unmatched: cli.unmatched.clone(),
            keys,
            primary_columns: primary.column_count(),
            reference_columns: reference.column_count(),
            stats: result.stats,
        };
        let json = serde_json::to_string_pretty(&summary).map_err(|e| CliError {
            code: EXIT_ERROR,
            message: format!("JSON serialization error: {e}"),
            hint: None,
        })?;
        writeln!(out, "{json}").map_err(stdout_err)?;
    } else if human {
        report::results(
            &mut out,
            &cli.primary,
            &cli.output,
            cli.unmatched.as_deref(),
            &result.stats,
        )
        .map_err(stdout_err)?;
    }

    Ok(())
}
