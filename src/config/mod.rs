// SPDX-License-Identifier: MPL-2.0
//! This module handles the client configuration, including loading and saving
//! user preferences to a `settings.toml` file.
//!
//! # Examples
//!
//! ```no_run
//! use cafe_client::config::{self, Config};
//!
//! let mut config = config::load().unwrap_or_default();
//! config.base_url = Some("http://cafe.local:5000".to_string());
//! config::save(&config).expect("Failed to save config");
//! ```

pub mod defaults;

use crate::app::paths;
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

pub use defaults::*;

const CONFIG_FILE: &str = "settings.toml";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub language: Option<String>,
    #[serde(default)]
    pub base_url: Option<String>,
    #[serde(default)]
    pub notification_ttl_ms: Option<u64>,
    #[serde(default)]
    pub max_notifications: Option<usize>,
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
    #[serde(default)]
    pub refresh_interval_secs: Option<u64>,
}

impl Config {
    /// Base URL of the café server, without a trailing slash.
    #[must_use]
    pub fn base_url(&self) -> &str {
        self.base_url
            .as_deref()
            .map(|url| url.trim_end_matches('/'))
            .filter(|url| !url.is_empty())
            .unwrap_or(DEFAULT_BASE_URL)
    }

    /// Default banner lifetime, clamped to the supported range.
    #[must_use]
    pub fn notification_ttl(&self) -> Duration {
        let ms = self
            .notification_ttl_ms
            .unwrap_or(DEFAULT_NOTIFICATION_TTL_MS)
            .clamp(MIN_NOTIFICATION_TTL_MS, MAX_NOTIFICATION_TTL_MS);
        Duration::from_millis(ms)
    }

    /// Number of banners visible at once, clamped to the supported range.
    #[must_use]
    pub fn max_notifications(&self) -> usize {
        self.max_notifications
            .unwrap_or(DEFAULT_MAX_NOTIFICATIONS)
            .clamp(MIN_MAX_NOTIFICATIONS, MAX_MAX_NOTIFICATIONS)
    }

    /// Optional request timeout. Zero means "no timeout".
    #[must_use]
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs
            .filter(|secs| *secs > 0)
            .map(|secs| Duration::from_secs(secs.min(MAX_REQUEST_TIMEOUT_SECS)))
    }

    /// Admin dashboard refresh period.
    #[must_use]
    pub fn refresh_interval(&self) -> Duration {
        let secs = self
            .refresh_interval_secs
            .unwrap_or(DEFAULT_REFRESH_INTERVAL_SECS)
            .max(MIN_REFRESH_INTERVAL_SECS);
        Duration::from_secs(secs)
    }
}

pub fn load() -> Result<Config> {
    if let Some(dir) = paths::get_app_config_dir() {
        let path = dir.join(CONFIG_FILE);
        if path.exists() {
            return load_from_path(&path);
        }
    }
    Ok(Config::default())
}

pub fn save(config: &Config) -> Result<()> {
    if let Some(dir) = paths::get_app_config_dir() {
        return save_to_path(config, &dir.join(CONFIG_FILE));
    }
    Ok(())
}

/// Loads a config file, falling back to defaults when the TOML is invalid.
pub fn load_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)?;
    match toml::from_str(&content) {
        Ok(config) => Ok(config),
        Err(err) => {
            tracing::warn!(path = %path.display(), error = %err, "invalid settings file, using defaults");
            Ok(Config::default())
        }
    }
}

pub fn save_to_path(config: &Config, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config)?;
    fs::write(path, content)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn save_and_load_round_trip_preserves_fields() {
        let config = Config {
            language: Some("ko".to_string()),
            base_url: Some("http://cafe.local:8080".to_string()),
            notification_ttl_ms: Some(3000),
            max_notifications: Some(3),
            request_timeout_secs: Some(10),
            refresh_interval_secs: Some(60),
        };
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("nested").join("settings.toml");

        save_to_path(&config, &config_path).expect("failed to save config");
        let loaded = load_from_path(&config_path).expect("failed to load config");

        assert_eq!(loaded, config);
    }

    #[test]
    fn load_from_path_returns_default_on_invalid_toml() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("settings.toml");
        fs::write(&config_path, "not = valid = toml").expect("failed to write invalid toml");

        let loaded = load_from_path(&config_path).expect("load should not error");
        assert_eq!(loaded, Config::default());
    }

    #[test]
    fn load_from_missing_path_is_an_io_error() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let result = load_from_path(&temp_dir.path().join("absent.toml"));
        assert!(matches!(result, Err(crate::error::Error::Io(_))));
    }

    #[test]
    fn defaults_apply_when_unset() {
        let config = Config::default();
        assert_eq!(config.base_url(), DEFAULT_BASE_URL);
        assert_eq!(config.notification_ttl(), Duration::from_millis(5000));
        assert_eq!(config.max_notifications(), DEFAULT_MAX_NOTIFICATIONS);
        assert_eq!(config.request_timeout(), None);
        assert_eq!(config.refresh_interval(), Duration::from_secs(30));
    }

    #[test]
    fn out_of_range_values_are_clamped() {
        let config = Config {
            notification_ttl_ms: Some(1),
            max_notifications: Some(1000),
            request_timeout_secs: Some(0),
            refresh_interval_secs: Some(1),
            ..Config::default()
        };
        assert_eq!(
            config.notification_ttl(),
            Duration::from_millis(MIN_NOTIFICATION_TTL_MS)
        );
        assert_eq!(config.max_notifications(), MAX_MAX_NOTIFICATIONS);
        assert_eq!(config.request_timeout(), None);
        assert_eq!(
            config.refresh_interval(),
            Duration::from_secs(MIN_REFRESH_INTERVAL_SECS)
        );
    }

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let config = Config {
            base_url: Some("http://cafe.local/".to_string()),
            ..Config::default()
        };
        assert_eq!(config.base_url(), "http://cafe.local");
    }
}
