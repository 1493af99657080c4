//! Configuration loading and database path resolution

use crate::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

const APP_DIR: &str = "tungsten";

/// Contents of `config.toml`
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub database: Option<PathBuf>,
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: None,
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    /// Loads the config file; a missing file yields the defaults.
    ///
    /// Runs before logging is set up, so reporting a missing file is left
    /// to the caller.
    pub fn load(path: &Path) -> Result<Self> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => return Err(e.into()),
        };

        Self::parse(&content)
            .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))
    }

    pub fn parse(content: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Database path, in priority order:
    /// 1. Command-line argument (or its TUNGSTEN_DATABASE env fallback)
    /// 2. `database` key of the config file
    /// 3. OS-dependent default
    pub fn resolve_database_path(&self, cli_arg: Option<&Path>) -> PathBuf {
        if let Some(path) = cli_arg.filter(|p| !p.as_os_str().is_empty()) {
            return path.to_path_buf();
        }
        if let Some(path) = &self.database {
            return path.clone();
        }
        default_database_path()
    }
}

/// `<config dir>/tungsten/config.toml`
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .map(|d| d.join(APP_DIR))
        .unwrap_or_else(|| PathBuf::from("."))
        .join("config.toml")
}

/// `<local data dir>/tungsten/tungsten.db`
pub fn default_database_path() -> PathBuf {
    dirs::data_local_dir()
        .map(|d| d.join(APP_DIR))
        .unwrap_or_else(|| PathBuf::from("./tungsten_data"))
        .join("tungsten.db")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_gives_defaults() {
        // the caller reports the missing file once logging is up
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_load_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "database = \"/tmp/cards.db\"\nlog_level = \"debug\"\n").unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.database, Some(PathBuf::from("/tmp/cards.db")));
        assert_eq!(config.log_level, "debug");
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config = Config::parse("database = \"cards.db\"").unwrap();
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_malformed_file_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "database = [unterminated").unwrap();

        assert!(matches!(Config::load(&path), Err(Error::Config(_))));
    }

    #[test]
    fn test_database_path_priority() {
        let config = Config {
            database: Some(PathBuf::from("from_config.db")),
            ..Config::default()
        };

        let cli = PathBuf::from("from_cli.db");
        assert_eq!(config.resolve_database_path(Some(&cli)), cli);
        assert_eq!(
            config.resolve_database_path(None),
            PathBuf::from("from_config.db")
        );
        assert_eq!(
            Config::default().resolve_database_path(Some(Path::new(""))),
            default_database_path()
        );
    }

    #[test]
    fn test_default_paths() {
        assert!(default_database_path().ends_with("tungsten/tungsten.db"));
        assert!(default_config_path().ends_with("config.toml"));
    }
}
