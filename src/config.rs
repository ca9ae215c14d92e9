//! Configuration management for Jellyfindarr
//!
//! Config is stored at ~/.config/jellyfindarr/config.toml

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::api::backend::DEFAULT_BASE_URL;
use crate::models::MediaType;

/// Environment override for the backend URL
pub const URL_ENV: &str = "JELLYFINDARR_URL";

/// Log file written in TUI mode, next to the config file
pub const LOG_FILE: &str = "jellyfindarr.log";

/// Application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Backend base URL, e.g. http://localhost:5505
    pub base_url: Option<String>,
    /// Panel focused on startup
    pub default_type: Option<MediaType>,
}

impl Config {
    /// Get config file path (~/.config/jellyfindarr/config.toml)
    pub fn path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("jellyfindarr").join("config.toml"))
    }

    /// Load config from the default path, writing a starter file on first run
    pub fn load_or_init() -> Self {
        Self::path().map(|p| Self::init_at(&p)).unwrap_or_default()
    }

    /// Load `path`, or write a starter config there if it does not exist yet.
    ///
    /// Writing is best effort; an unwritable config dir still yields the defaults.
    pub fn init_at(path: &Path) -> Self {
        if path.exists() {
            return Self::load_from(path);
        }
        let config = Self::starter();
        let _ = config.save_to(path);
        config
    }

    /// Defaults spelled out, so the written file shows what can be set
    fn starter() -> Self {
        Self {
            base_url: Some(DEFAULT_BASE_URL.to_string()),
            default_type: Some(MediaType::default()),
        }
    }

    /// Load config from `path`, or defaults if missing or malformed
    pub fn load_from(path: &Path) -> Self {
        std::fs::read_to_string(path)
            .ok()
            .and_then(|s| toml::from_str(&s).ok())
            .unwrap_or_default()
    }

    /// Save config to `path`, creating parent directories
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let toml = toml::to_string_pretty(self)?;
        std::fs::write(path, toml)?;
        Ok(())
    }

    /// Backend URL with fallback chain:
    /// 1. `--url` flag
    /// 2. Environment variable JELLYFINDARR_URL
    /// 3. `base_url` from the config file
    /// 4. http://localhost:5505
    pub fn resolve_base_url(&self, flag: Option<&str>) -> String {
        Self::pick_base_url(
            flag,
            std::env::var(URL_ENV).ok().as_deref(),
            self.base_url.as_deref(),
        )
    }

    fn pick_base_url(flag: Option<&str>, env: Option<&str>, file: Option<&str>) -> String {
        [flag, env, file]
            .into_iter()
            .flatten()
            .map(str::trim)
            .find(|s| !s.is_empty())
            .unwrap_or(DEFAULT_BASE_URL)
            .to_string()
    }

    /// Where the TUI writes its log
    pub fn log_path(config_path: Option<&Path>) -> Option<PathBuf> {
        match config_path {
            Some(p) => Some(p.parent().unwrap_or(Path::new(".")).join(LOG_FILE)),
            None => Self::path().and_then(|p| p.parent().map(|d| d.join(LOG_FILE))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("jellyfindarr-test-{}-{}", name, std::process::id()))
            .join("nested")
            .join("config.toml")
    }

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert!(config.base_url.is_none());
        assert!(config.default_type.is_none());
    }

    #[test]
    fn test_base_url_precedence() {
        assert_eq!(
            Config::pick_base_url(Some("http://flag"), Some("http://env"), Some("http://file")),
            "http://flag"
        );
        assert_eq!(
            Config::pick_base_url(None, Some("http://env"), Some("http://file")),
            "http://env"
        );
        assert_eq!(Config::pick_base_url(None, None, Some("http://file")), "http://file");
        assert_eq!(Config::pick_base_url(None, None, None), DEFAULT_BASE_URL);
        // Blank values are skipped
        assert_eq!(Config::pick_base_url(Some("  "), None, None), DEFAULT_BASE_URL);
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let path = temp_path("roundtrip");
        let config = Config {
            base_url: Some("http://media.lan:5505".into()),
            default_type: Some(MediaType::Tv),
        };
        config.save_to(&path).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains("default_type = \"tv\""));
        assert_eq!(Config::load_from(&path), config);

        let _ = std::fs::remove_dir_all(path.parent().unwrap().parent().unwrap());
    }

    #[test]
    fn test_init_writes_starter_once() {
        let path = temp_path("init");
        let first = Config::init_at(&path);
        assert!(path.exists());
        assert_eq!(first.base_url.as_deref(), Some(DEFAULT_BASE_URL));
        assert_eq!(first.default_type, Some(MediaType::Movie));

        // An edited file is loaded, not overwritten
        let edited = Config {
            base_url: Some("http://media.lan:5505".into()),
            default_type: Some(MediaType::Tv),
        };
        edited.save_to(&path).unwrap();
        assert_eq!(Config::init_at(&path), edited);

        let _ = std::fs::remove_dir_all(path.parent().unwrap().parent().unwrap());
    }

    #[test]
    fn test_load_malformed_falls_back() {
        let path = temp_path("malformed");
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, "base_url = [not toml").unwrap();
        assert_eq!(Config::load_from(&path), Config::default());

        let _ = std::fs::remove_dir_all(path.parent().unwrap().parent().unwrap());
    }

    #[test]
    fn test_load_missing_falls_back() {
        let path = temp_path("missing");
        assert_eq!(Config::load_from(&path), Config::default());
    }

    #[test]
    fn test_log_path_next_to_config() {
        let log = Config::log_path(Some(Path::new("/tmp/jf/config.toml"))).unwrap();
        assert_eq!(log, PathBuf::from("/tmp/jf/jellyfindarr.log"));
    }
}
