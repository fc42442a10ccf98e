// SPDX-FileCopyrightText: 2025 databased contributors
// SPDX-License-Identifier: MIT

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{CliError, IoContext};

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Database used when `--db` is not given
    pub database: Option<PathBuf>,

    /// Log filter used when `RUST_LOG` is unset
    pub log_level: String,

    /// Fixed cell width for grid output; derived from the terminal width
    /// when unset
    pub max_col_width: Option<usize>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: None,
            log_level: "info".to_string(),
            max_col_width: None,
        }
    }
}

impl Config {
    pub fn from_file(path: &Path) -> Result<Self, CliError> {
        let contents = std::fs::read_to_string(path)
            .io_context(|| format!("Failed to read config file at {}", path.display()))?;
        let config: Config = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Load the config file if one was given, defaults otherwise.
    pub fn load(path: Option<&Path>) -> Result<Self, CliError> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_partial_config_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "database = \"furniture.db\"").unwrap();
        let config = Config::from_file(file.path()).unwrap();
        assert_eq!(config.database, Some(PathBuf::from("furniture.db")));
        assert_eq!(config.log_level, "info");
        assert_eq!(config.max_col_width, None);
    }

    #[test]
    fn test_missing_config_file() {
        let err = Config::from_file(Path::new("/nonexistent/databased.toml")).unwrap_err();
        assert!(matches!(err, CliError::Io { .. }));
    }

    #[test]
    fn test_invalid_toml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "max_col_width = \"wide\"").unwrap();
        assert!(matches!(
            Config::from_file(file.path()),
            Err(CliError::Toml(_))
        ));
    }

    #[test]
    fn test_no_path_uses_defaults() {
        assert_eq!(Config::load(None).unwrap(), Config::default());
    }
}
