use std::fmt;
use std::path::{Path, PathBuf};

#[derive(Debug)]
pub enum IoError {
    /// Source path does not exist.
    NotFound(PathBuf),
    /// Source exists but could not be read.
    Read { path: PathBuf, source: std::io::Error },
    /// Destination directory could not be created.
    CreateDir { path: PathBuf, source: std::io::Error },
    /// Destination file could not be written.
    Write { path: PathBuf, source: std::io::Error },
    /// Malformed delimited input (quoted mode only).
    Parse { path: Option<PathBuf>, message: String },
    /// Excel read/write failure.
    Excel { path: PathBuf, message: String },
    /// Option combination the chosen format cannot honor.
    Unsupported(String),
}

impl IoError {
    /// Attach a path to a path-less parse error.
    pub(crate) fn at(self, p: &Path) -> Self {
        match self {
            Self::Parse { path: None, message } => {
                Self::Parse { path: Some(p.to_path_buf()), message }
            }
            other => other,
        }
    }
}

impl fmt::Display for IoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound(path) => write!(f, "file not found: {}", path.display()),
            Self::Read { path, source } => write!(f, "cannot read {}: {source}", path.display()),
            Self::CreateDir { path, source } => {
                write!(f, "cannot create directory {}: {source}", path.display())
            }
            Self::Write { path, source } => write!(f, "cannot write {}: {source}", path.display()),
            Self::Parse { path: Some(path), message } => {
                write!(f, "cannot parse {}: {message}", path.display())
            }
            Self::Parse { path: None, message } => write!(f, "parse error: {message}"),
            Self::Excel { path, message } => write!(f, "{}: {message}", path.display()),
            Self::Unsupported(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for IoError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Read { source, .. }
            | Self::CreateDir { source, .. }
            | Self::Write { source, .. } => Some(source),
            _ => None,
        }
    }
}
