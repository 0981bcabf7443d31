use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::error::HibikiError;

const DEFAULT_CONFIG: &str = include_str!("../../../config/default.toml");

/// Top-level application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub output: OutputConfig,
    pub poll: PollConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// File the current "song - artist" line is written to.
    /// Relative paths resolve against the working directory.
    pub file: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PollConfig {
    /// Seconds between scans while looking for a player window.
    pub search_interval: u64,
    /// Seconds between title checks once a window is being watched.
    pub watch_interval: u64,
}

impl AppConfig {
    /// Load config: user file (if it exists), otherwise built-in defaults.
    pub fn load() -> Result<Self, HibikiError> {
        Self::load_from(&Self::config_path())
    }

    /// Load config from a specific path. A missing file yields the
    /// built-in defaults; a present but unreadable or invalid file is an
    /// error so the caller can decide to fall back.
    pub fn load_from(path: &Path) -> Result<Self, HibikiError> {
        if path.exists() {
            let user_str =
                std::fs::read_to_string(path).map_err(|e| HibikiError::Config(e.to_string()))?;
            let user: AppConfig =
                toml::from_str(&user_str).map_err(|e| HibikiError::Config(e.to_string()))?;
            Ok(user)
        } else {
            toml::from_str(DEFAULT_CONFIG).map_err(|e| HibikiError::Config(e.to_string()))
        }
    }

    /// Path to the user config file (XDG on Linux, AppData on Windows).
    pub fn config_path() -> PathBuf {
        Self::project_dirs()
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from("config.toml"))
    }

    /// Path to the optional user player-database override.
    pub fn players_path() -> PathBuf {
        Self::project_dirs()
            .map(|d| d.config_dir().join("players.toml"))
            .unwrap_or_else(|| PathBuf::from("players.toml"))
    }

    fn project_dirs() -> Option<ProjectDirs> {
        ProjectDirs::from("", "", "hibiki")
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        toml::from_str(DEFAULT_CONFIG).expect("built-in default config is valid TOML")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_parses() {
        let config = AppConfig::default();
        assert_eq!(config.output.file, PathBuf::from("music.txt"));
        assert_eq!(config.poll.search_interval, 2);
        assert_eq!(config.poll.watch_interval, 1);
    }

    #[test]
    fn test_load_from_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig::load_from(&dir.path().join("config.toml")).unwrap();
        assert_eq!(config.poll.search_interval, 2);
        assert_eq!(config.output.file, PathBuf::from("music.txt"));
    }

    #[test]
    fn test_load_from_valid_user_file_overrides_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "[output]\nfile = \"now_playing.txt\"\n\n[poll]\nsearch_interval = 5\nwatch_interval = 3\n",
        )
        .unwrap();

        let config = AppConfig::load_from(&path).unwrap();
        assert_eq!(config.output.file, PathBuf::from("now_playing.txt"));
        assert_eq!(config.poll.search_interval, 5);
        assert_eq!(config.poll.watch_interval, 3);
    }

    #[test]
    fn test_load_from_invalid_user_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[output]\nfile = 3\n").unwrap();

        // The error surfaces so the caller falls back to defaults.
        let err = AppConfig::load_from(&path).unwrap_err();
        assert!(matches!(err, HibikiError::Config(_)));
    }

    #[test]
    fn test_roundtrip() {
        let config = AppConfig::default();
        let serialized = toml::to_string_pretty(&config).unwrap();
        let deserialized: AppConfig = toml::from_str(&serialized).unwrap();
        assert_eq!(deserialized.poll.search_interval, config.poll.search_interval);
        assert_eq!(deserialized.output.file, config.output.file);
    }
}
