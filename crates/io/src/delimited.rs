// Delimited text import/export

use std::io::Read;
use std::path::Path;

use keymatch_matcher::Table;

use crate::error::IoError;

/// How field boundaries are found.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Quoting {
    /// Plain split on the delimiter. A field containing the delimiter misparses.
    #[default]
    None,
    /// RFC 4180 quoting: `"a,b"` is one field, `""` escapes a quote.
    Rfc4180,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DelimitedOptions {
    pub delimiter: char,
    pub quoting: Quoting,
    /// Strip leading/trailing spaces and tabs from every field on read.
    pub trim: bool,
}

impl Default for DelimitedOptions {
    fn default() -> Self {
        Self { delimiter: ',', quoting: Quoting::None, trim: true }
    }
}

impl DelimitedOptions {
    /// The csv crate only takes single-byte delimiters.
    fn delimiter_byte(&self) -> Result<u8, IoError> {
        u8::try_from(self.delimiter)
            .ok()
            .filter(u8::is_ascii)
            .ok_or_else(|| {
                IoError::Unsupported(format!(
                    "delimiter '{}' is not ASCII; quoted mode needs a single-byte delimiter",
                    self.delimiter
                ))
            })
    }
}

pub fn import(path: &Path, options: &DelimitedOptions) -> Result<Table, IoError> {
    let content = read_file_as_utf8(path)?;
    parse(&content, options).map_err(|e| e.at(path))
}

pub fn export(path: &Path, table: &Table, options: &DelimitedOptions) -> Result<(), IoError> {
    let text = render(table, options)?;
    std::fs::write(path, text).map_err(|source| IoError::Write { path: path.to_path_buf(), source })
}

/// Read file and convert to UTF-8 if needed (handles Windows-1252, Latin-1, etc.)
pub fn read_file_as_utf8(path: &Path) -> Result<String, IoError> {
    let read_err = |source| IoError::Read { path: path.to_path_buf(), source };
    let mut file = std::fs::File::open(path).map_err(read_err)?;
    let mut bytes = Vec::new();
    file.read_to_end(&mut bytes).map_err(read_err)?;

    // Try UTF-8 first; on failure, recover the buffer from the error
    let text = match String::from_utf8(bytes) {
        Ok(s) => s,
        Err(e) => {
            let bytes = e.into_bytes();
            log::info!("{} is not UTF-8, decoding as Windows-1252", path.display());
            let (decoded, _, _) = encoding_rs::WINDOWS_1252.decode(&bytes);
            decoded.into_owned()
        }
    };

    // Excel-exported CSVs often start with a BOM, which would glue onto the first header
    Ok(match text.strip_prefix('\u{feff}') {
        Some(rest) => rest.to_string(),
        None => text,
    })
}

// ---------------------------------------------------------------------------
// Parse
// ---------------------------------------------------------------------------

/// Parse delimited text. First non-empty line is the header.
pub fn parse(content: &str, options: &DelimitedOptions) -> Result<Table, IoError> {
    let mut records = match options.quoting {
        Quoting::None => split_records(content, options),
        Quoting::Rfc4180 => quoted_records(content, options)?,
    };

    if records.is_empty() {
        return Ok(Table::default());
    }

    let columns = records.remove(0);
    Ok(Table::new(columns, records))
}

fn split_records(content: &str, options: &DelimitedOptions) -> Vec<Vec<String>> {
    content
        .split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .filter(|line| !line.is_empty())
        .map(|line| {
            line.split(options.delimiter)
                .map(|field| {
                    if options.trim {
                        field.trim_matches(|c: char| c == ' ' || c == '\t').to_string()
                    } else {
                        field.to_string()
                    }
                })
                .collect()
        })
        .collect()
}

fn quoted_records(content: &str, options: &DelimitedOptions) -> Result<Vec<Vec<String>>, IoError> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(options.delimiter_byte()?)
        .has_headers(false)
        .flexible(true)
        .trim(if options.trim { csv::Trim::All } else { csv::Trim::None })
        .from_reader(content.as_bytes());

    let mut records = Vec::new();
    for result in reader.records() {
        let record = result.map_err(|e| IoError::Parse { path: None, message: e.to_string() })?;
        records.push(record.iter().map(str::to_string).collect());
    }
    Ok(records)
}

// ---------------------------------------------------------------------------
// Render
// ---------------------------------------------------------------------------

/// Header line then one line per row, `\n`-terminated.
pub fn render(table: &Table, options: &DelimitedOptions) -> Result<String, IoError> {
    match options.quoting {
        Quoting::None => {
            let sep = options.delimiter.to_string();
            let mut out = String::new();
            let lines =
                std::iter::once(table.columns()).chain(table.rows().iter().map(Vec::as_slice));
            for line in lines {
                out.push_str(&line.join(sep.as_str()));
                out.push('\n');
            }
            Ok(out)
        }
        Quoting::Rfc4180 => {
            let mut writer = csv::WriterBuilder::new()
                .delimiter(options.delimiter_byte()?)
                .flexible(true)
                .terminator(csv::Terminator::Any(b'\n'))
                .from_writer(Vec::new());

            let write_err = |e: csv::Error| IoError::Unsupported(format!("csv write error: {e}"));
            writer.write_record(table.columns()).map_err(write_err)?;
            for row in table.rows() {
                writer.write_record(row).map_err(write_err)?;
            }
            let bytes = writer
                .into_inner()
                .map_err(|e| IoError::Unsupported(format!("csv write error: {e}")))?;
            String::from_utf8(bytes)
                .map_err(|e| IoError::Unsupported(format!("csv write produced invalid UTF-8: {e}")))
        }
    }
}
