//! Configuration for the booking store and notification delivery.
//!
//! Configuration is merged from multiple sources with the following
//! precedence (highest to lowest):
//!
//! 1. Programmatic overrides (via [`ConfigBuilder::with_config`])
//! 2. Environment variables (`INNKEEP_*`)
//! 3. A YAML configuration file (`config.yaml` in the data directory, or
//!    an explicit path)
//! 4. Built-in defaults
//!
//! # Examples
//!
//! Basic usage with defaults:
//!
//! ```
//! use innkeep::config::ConfigBuilder;
//!
//! let config = ConfigBuilder::new()
//!     .skip_files()
//!     .skip_env()
//!     .build()
//!     .unwrap();
//! assert!(config.data_dir.is_none());
//! ```
//!
//! Programmatic configuration:
//!
//! ```
//! use innkeep::config::{Config, ConfigBuilder};
//!
//! let custom = Config {
//!     busy_timeout_seconds: Some(10),
//!     ..Config::default()
//! };
//!
//! let config = ConfigBuilder::new()
//!     .skip_files()
//!     .skip_env()
//!     .with_config(custom)
//!     .build()
//!     .unwrap();
//! assert_eq!(config.busy_timeout_seconds, Some(10));
//! ```

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::database::default_data_dir;
use crate::error::{Error, Result};
use crate::notify::RetryPolicy;

/// Top-level configuration.
///
/// All fields are optional; absent fields fall back to built-in
/// defaults at the point of use.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Directory holding the database and configuration file.
    pub data_dir: Option<PathBuf>,

    /// Seconds to wait on another writer's admission transaction.
    pub busy_timeout_seconds: Option<u64>,

    /// Notification delivery settings.
    pub notification: Option<NotificationConfig>,
}

/// Notification delivery settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NotificationConfig {
    /// Maximum delivery attempts per job (at least 1).
    pub max_attempts: Option<u32>,

    /// Fixed delay between attempts, in milliseconds.
    pub retry_delay_ms: Option<u64>,
}

impl Config {
    /// Returns the retry policy for notification delivery, with defaults
    /// filled in for unset fields.
    ///
    /// # Examples
    ///
    /// ```
    /// use innkeep::config::Config;
    ///
    /// let policy = Config::default().retry_policy();
    /// assert_eq!(policy.max_attempts, 3);
    /// ```
    #[must_use]
    pub fn retry_policy(&self) -> RetryPolicy {
        let defaults = RetryPolicy::default();
        match &self.notification {
            Some(notification) => RetryPolicy {
                max_attempts: notification.max_attempts.unwrap_or(defaults.max_attempts),
                retry_delay: notification
                    .retry_delay_ms
                    .map_or(defaults.retry_delay, Duration::from_millis),
            },
            None => defaults,
        }
    }

    /// Returns the busy timeout, defaulting to 5 seconds.
    #[must_use]
    pub fn busy_timeout(&self) -> Duration {
        Duration::from_secs(self.busy_timeout_seconds.unwrap_or(5))
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns a validation error if `max_attempts` is zero or the busy
    /// timeout is zero.
    pub fn validate(&self) -> Result<()> {
        if self.busy_timeout_seconds == Some(0) {
            return Err(Error::Validation {
                field: "busy_timeout_seconds".into(),
                message: "must be at least 1".into(),
            });
        }
        if let Some(notification) = &self.notification {
            if notification.max_attempts == Some(0) {
                return Err(Error::Validation {
                    field: "notification.max_attempts".into(),
                    message: "must be at least 1".into(),
                });
            }
        }
        Ok(())
    }

    /// Merges another configuration over this one; set fields in `other`
    /// win.
    fn merge(mut self, other: Self) -> Self {
        if other.data_dir.is_some() {
            self.data_dir = other.data_dir;
        }
        if other.busy_timeout_seconds.is_some() {
            self.busy_timeout_seconds = other.busy_timeout_seconds;
        }
        if let Some(other_notification) = other.notification {
            let mut notification = self.notification.unwrap_or_default();
            if other_notification.max_attempts.is_some() {
                notification.max_attempts = other_notification.max_attempts;
            }
            if other_notification.retry_delay_ms.is_some() {
                notification.retry_delay_ms = other_notification.retry_delay_ms;
            }
            self.notification = Some(notification);
        }
        self
    }
}

/// Builder assembling a [`Config`] from files, the environment, and
/// programmatic overrides.
#[derive(Debug, Default)]
pub struct ConfigBuilder {
    config_file: Option<PathBuf>,
    skip_files: bool,
    skip_env: bool,
    overrides: Option<Config>,
}

impl ConfigBuilder {
    /// Creates a builder with default settings (files and environment
    /// both consulted).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads configuration from an explicit file instead of the default
    /// location.
    #[must_use]
    pub fn with_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.config_file = Some(path.into());
        self
    }

    /// Skips reading configuration files.
    #[must_use]
    pub const fn skip_files(mut self) -> Self {
        self.skip_files = true;
        self
    }

    /// Skips reading `INNKEEP_*` environment variables.
    #[must_use]
    pub const fn skip_env(mut self) -> Self {
        self.skip_env = true;
        self
    }

    /// Applies programmatic overrides on top of every other source.
    #[must_use]
    pub fn with_config(mut self, config: Config) -> Self {
        self.overrides = Some(config);
        self
    }

    /// Builds the merged, validated configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if a configuration file cannot be read or parsed,
    /// an environment variable cannot be parsed, or validation fails.
    pub fn build(self) -> Result<Config> {
        let mut config = Config::default();

        if !self.skip_files {
            if let Some(file_config) = self.load_file()? {
                config = config.merge(file_config);
            }
        }

        if !self.skip_env {
            config = config.merge(Self::load_env()?);
        }

        if let Some(overrides) = self.overrides {
            config = config.merge(overrides);
        }

        config.validate()?;
        Ok(config)
    }

    fn load_file(&self) -> Result<Option<Config>> {
        let path = match &self.config_file {
            Some(path) => path.clone(),
            None => {
                let Ok(data_dir) = default_data_dir() else {
                    return Ok(None);
                };
                let path = data_dir.join("config.yaml");
                if !path.exists() {
                    return Ok(None);
                }
                path
            }
        };

        let raw = std::fs::read_to_string(&path)?;
        let config: Config = serde_yaml::from_str(&raw)?;
        Ok(Some(config))
    }

    fn load_env() -> Result<Config> {
        let mut config = Config::default();

        if let Ok(value) = std::env::var("INNKEEP_DATA_DIR") {
            config.data_dir = Some(PathBuf::from(value));
        }
        if let Ok(value) = std::env::var("INNKEEP_BUSY_TIMEOUT") {
            config.busy_timeout_seconds = Some(parse_env("INNKEEP_BUSY_TIMEOUT", &value)?);
        }

        let mut notification = NotificationConfig::default();
        if let Ok(value) = std::env::var("INNKEEP_MAIL_ATTEMPTS") {
            notification.max_attempts = Some(parse_env("INNKEEP_MAIL_ATTEMPTS", &value)?);
        }
        if let Ok(value) = std::env::var("INNKEEP_MAIL_RETRY_DELAY_MS") {
            notification.retry_delay_ms = Some(parse_env("INNKEEP_MAIL_RETRY_DELAY_MS", &value)?);
        }
        if notification != NotificationConfig::default() {
            config.notification = Some(notification);
        }

        Ok(config)
    }
}

fn parse_env<T: std::str::FromStr>(name: &str, value: &str) -> Result<T> {
    value.parse().map_err(|_| Error::Validation {
        field: name.into(),
        message: format!("cannot parse '{value}'"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn clear_env() {
        for name in [
            "INNKEEP_DATA_DIR",
            "INNKEEP_BUSY_TIMEOUT",
            "INNKEEP_MAIL_ATTEMPTS",
            "INNKEEP_MAIL_RETRY_DELAY_MS",
        ] {
            std::env::remove_var(name);
        }
    }

    #[test]
    fn test_defaults() {
        let config = ConfigBuilder::new().skip_files().skip_env().build().unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.busy_timeout(), Duration::from_secs(5));
        assert_eq!(config.retry_policy(), RetryPolicy::default());
    }

    #[test]
    fn test_file_loading() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(
            &path,
            "busy_timeout_seconds: 12\nnotification:\n  max_attempts: 5\n",
        )
        .unwrap();

        let config = ConfigBuilder::new()
            .with_file(&path)
            .skip_env()
            .build()
            .unwrap();

        assert_eq!(config.busy_timeout_seconds, Some(12));
        assert_eq!(config.retry_policy().max_attempts, 5);
    }

    #[test]
    fn test_file_with_unknown_field_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(&path, "surprise: true\n").unwrap();

        let err = ConfigBuilder::new()
            .with_file(&path)
            .skip_env()
            .build()
            .unwrap_err();
        assert!(matches!(err, Error::Configuration(_)));
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let err = ConfigBuilder::new()
            .with_file("/nonexistent/config.yaml")
            .skip_env()
            .build()
            .unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_overrides_win_over_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(&path, "busy_timeout_seconds: 12\n").unwrap();

        let config = ConfigBuilder::new()
            .with_file(&path)
            .skip_env()
            .with_config(Config {
                busy_timeout_seconds: Some(3),
                ..Config::default()
            })
            .build()
            .unwrap();

        assert_eq!(config.busy_timeout_seconds, Some(3));
    }

    #[test]
    #[serial]
    fn test_env_overrides() {
        clear_env();
        std::env::set_var("INNKEEP_BUSY_TIMEOUT", "9");
        std::env::set_var("INNKEEP_MAIL_ATTEMPTS", "7");

        let config = ConfigBuilder::new().skip_files().build().unwrap();
        assert_eq!(config.busy_timeout_seconds, Some(9));
        assert_eq!(config.retry_policy().max_attempts, 7);

        clear_env();
    }

    #[test]
    #[serial]
    fn test_env_parse_failure() {
        clear_env();
        std::env::set_var("INNKEEP_BUSY_TIMEOUT", "soon");

        let err = ConfigBuilder::new().skip_files().build().unwrap_err();
        assert!(matches!(err, Error::Validation { .. }));

        clear_env();
    }

    #[test]
    fn test_validation_rejects_zero_attempts() {
        let config = Config {
            notification: Some(NotificationConfig {
                max_attempts: Some(0),
                retry_delay_ms: None,
            }),
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_zero_timeout() {
        let config = Config {
            busy_timeout_seconds: Some(0),
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_merge_is_field_wise() {
        let base = Config {
            data_dir: Some(PathBuf::from("/base")),
            busy_timeout_seconds: Some(5),
            notification: Some(NotificationConfig {
                max_attempts: Some(3),
                retry_delay_ms: Some(100),
            }),
        };
        let overlay = Config {
            busy_timeout_seconds: Some(9),
            notification: Some(NotificationConfig {
                max_attempts: None,
                retry_delay_ms: Some(250),
            }),
            ..Config::default()
        };

        let merged = base.merge(overlay);
        assert_eq!(merged.data_dir, Some(PathBuf::from("/base")));
        assert_eq!(merged.busy_timeout_seconds, Some(9));
        let notification = merged.notification.unwrap();
        assert_eq!(notification.max_attempts, Some(3));
        assert_eq!(notification.retry_delay_ms, Some(250));
    }

    #[test]
    fn test_retry_policy_conversion() {
        let config = Config {
            notification: Some(NotificationConfig {
                max_attempts: Some(2),
                retry_delay_ms: Some(50),
            }),
            ..Config::default()
        };
        let policy = config.retry_policy();
        assert_eq!(policy.max_attempts, 2);
        assert_eq!(policy.retry_delay, Duration::from_millis(50));
    }
}
