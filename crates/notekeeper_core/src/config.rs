//! Runtime configuration for hosts embedding the notes core.
//!
//! Every field has a default, so an empty TOML document is a valid config.

use crate::access::guard::DEFAULT_LOGIN_URL;
use crate::logging::default_log_level;
use serde::Deserialize;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

const DEFAULT_DB_FILE_NAME: &str = "notekeeper.sqlite3";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NotekeeperConfig {
    /// SQLite database file.
    pub db_path: PathBuf,
    /// One of `trace|debug|info|warn|error`.
    pub log_level: String,
    /// Absolute directory for rolling log files; file logging is off when unset.
    pub log_dir: Option<PathBuf>,
    /// Where anonymous users are sent, with `?next=` appended.
    pub login_url: String,
}

impl Default for NotekeeperConfig {
    fn default() -> Self {
        Self {
            db_path: PathBuf::from(DEFAULT_DB_FILE_NAME),
            log_level: default_log_level().to_string(),
            log_dir: None,
            login_url: DEFAULT_LOGIN_URL.to_string(),
        }
    }
}

impl NotekeeperConfig {
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        toml::from_str(source).map_err(ConfigError::Parse)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|err| ConfigError::Read {
            path: path.to_path_buf(),
            source: err,
        })?;
        Self::from_toml_str(&source)
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    Parse(toml::de::Error),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Read { path, source } => {
                write!(f, "failed to read config `{}`: {source}", path.display())
            }
            Self::Parse(err) => write!(f, "invalid config: {err}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Read { source, .. } => Some(source),
            Self::Parse(err) => Some(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{ConfigError, NotekeeperConfig};
    use std::io::Write;
    use std::path::PathBuf;

    #[test]
    fn empty_document_uses_defaults() {
        let config = NotekeeperConfig::from_toml_str("").expect("empty config parses");
        assert_eq!(config, NotekeeperConfig::default());
        assert_eq!(config.login_url, "/auth/login/");
    }

    #[test]
    fn overrides_are_applied() {
        let config = NotekeeperConfig::from_toml_str(
            r#"
            db_path = "/var/lib/notes.db"
            log_level = "warn"
            log_dir = "/var/log/notekeeper"
            login_url = "/login/"
            "#,
        )
        .expect("config parses");
        assert_eq!(config.db_path, PathBuf::from("/var/lib/notes.db"));
        assert_eq!(config.log_level, "warn");
        assert_eq!(config.log_dir, Some(PathBuf::from("/var/log/notekeeper")));
        assert_eq!(config.login_url, "/login/");
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let err = NotekeeperConfig::from_toml_str("colour = 1").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn load_reads_file_and_reports_missing_one() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        writeln!(file, "log_level = \"error\"").expect("write config");
        let config = NotekeeperConfig::load(file.path()).expect("config loads");
        assert_eq!(config.log_level, "error");

        let err = NotekeeperConfig::load("/definitely/missing/notekeeper.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }
}
