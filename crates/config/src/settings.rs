// Matcher settings
// Loaded from ~/.config/keymatch/config.toml, or an explicit --config path

use serde::Deserialize;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

/// Field quoting mode for delimited files
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuotingSetting {
    /// Plain split on the delimiter (default)
    #[default]
    None,
    /// RFC 4180 quoted fields
    Rfc4180,
}

/// Defaults applied when the matching CLI flag is absent.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Field delimiter for delimited files
    pub delimiter: char,

    pub quoting: QuotingSetting,

    /// Trim spaces and tabs around every field
    pub trim: bool,

    /// Key columns used when --keys is not given
    pub keys: Vec<String>,

    /// Worksheet name for Excel inputs (first sheet when unset)
    pub sheet: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            delimiter: ',',
            quoting: QuotingSetting::None,
            trim: true,
            keys: Vec::new(),
            sheet: None,
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    /// An explicitly requested config file does not exist.
    NotFound(PathBuf),
    Read { path: PathBuf, source: std::io::Error },
    Parse { path: Option<PathBuf>, message: String },
    /// Parsed but semantically unusable.
    Invalid(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound(path) => write!(f, "config file not found: {}", path.display()),
            Self::Read { path, source } => {
                write!(f, "cannot read config {}: {source}", path.display())
            }
            Self::Parse { path: Some(path), message } => {
                write!(f, "config parse error in {}: {message}", path.display())
            }
            Self::Parse { path: None, message } => write!(f, "config parse error: {message}"),
            Self::Invalid(msg) => write!(f, "invalid config: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl Settings {
    /// Get the default settings file path
    pub fn default_path() -> PathBuf {
        let config_dir = dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("keymatch");
        config_dir.join("config.toml")
    }

    pub fn from_toml(s: &str) -> Result<Self, ConfigError> {
        let mut settings: Self = toml::from_str(s)
            .map_err(|e| ConfigError::Parse { path: None, message: e.to_string() })?;
        // Same normalization as the --keys flag
        for key in &mut settings.keys {
            *key = key.trim().to_string();
        }
        settings.validate()?;
        Ok(settings)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)
            .map_err(|source| ConfigError::Read { path: path.to_path_buf(), source })?;
        Self::from_toml(&contents).map_err(|e| match e {
            ConfigError::Parse { path: None, message } => {
                ConfigError::Parse { path: Some(path.to_path_buf()), message }
            }
            other => other,
        })
    }

    /// An explicit path must exist. Without one, the default path is used
    /// when present, otherwise built-in defaults.
    pub fn discover(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        match explicit {
            Some(path) => {
                if !path.exists() {
                    return Err(ConfigError::NotFound(path.to_path_buf()));
                }
                log::debug!("loading config from {}", path.display());
                Self::load(path)
            }
            None => {
                let path = Self::default_path();
                if path.exists() {
                    log::debug!("loading config from {}", path.display());
                    Self::load(&path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if matches!(self.delimiter, '\n' | '\r') {
            return Err(ConfigError::Invalid("delimiter cannot be a line break".into()));
        }
        if self.keys.iter().any(String::is_empty) {
            return Err(ConfigError::Invalid("keys cannot contain empty names".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        assert_eq!(Settings::from_toml("").unwrap(), Settings::default());
    }

    #[test]
    fn full_file() {
        let s = Settings::from_toml(
            r#"
delimiter = ";"
quoting = "rfc4180"
trim = false
keys = ["customer_id", "email"]
sheet = "Export"
"#,
        )
        .unwrap();
        assert_eq!(s.delimiter, ';');
        assert_eq!(s.quoting, QuotingSetting::Rfc4180);
        assert!(!s.trim);
        assert_eq!(s.keys, vec!["customer_id", "email"]);
        assert_eq!(s.sheet.as_deref(), Some("Export"));
    }

    #[test]
    fn unknown_field_rejected() {
        let err = Settings::from_toml("delimter = \";\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }), "{err}");
    }

    #[test]
    fn multi_char_delimiter_rejected() {
        assert!(Settings::from_toml("delimiter = \"::\"").is_err());
    }

    #[test]
    fn newline_delimiter_rejected() {
        let err = Settings::from_toml("delimiter = \"\\n\"").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn blank_key_rejected() {
        let err = Settings::from_toml("keys = [\"id\", \" \"]").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn keys_are_trimmed() {
        let s = Settings::from_toml("keys = [\" id\", \"email\\t\"]").unwrap();
        assert_eq!(s.keys, vec!["id", "email"]);
    }

    #[test]
    fn explicit_missing_path_is_error() {
        let err = Settings::discover(Some(Path::new("/no/such/keymatch.toml"))).unwrap_err();
        assert!(matches!(err, ConfigError::NotFound(_)));
    }

    #[test]
    fn load_reports_path_on_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "trim = \"yes\"").unwrap();

        let err = Settings::load(&path).unwrap_err();
        assert!(err.to_string().contains("config.toml"), "{err}");
    }
}
