//! Database configuration and connection parameters.
//!
//! This module provides configuration types for database connections,
//! including path resolution and connection parameters.

use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{Error, Result};

/// Configuration for database connections.
///
/// This struct contains all parameters needed to open and configure a
/// booking database, including the file path, lock-wait timeout, and
/// access modes.
///
/// # Examples
///
/// ```
/// use innkeep::database::DatabaseConfig;
/// use std::time::Duration;
///
/// let config = DatabaseConfig::new("/tmp/innkeep.db")
///     .with_busy_timeout(Duration::from_millis(10000));
/// assert_eq!(config.busy_timeout, Duration::from_millis(10000));
/// ```
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// Path to the database file.
    pub path: PathBuf,
    /// Busy timeout for database lock contention.
    pub busy_timeout: Duration,
    /// Whether to automatically create the database if it doesn't exist.
    pub auto_create: bool,
    /// Whether to open the database in read-only mode.
    pub read_only: bool,
}

impl DatabaseConfig {
    /// Creates a new database configuration with default settings.
    ///
    /// Default settings:
    /// - `busy_timeout`: 5000ms
    /// - `auto_create`: true
    /// - `read_only`: false
    ///
    /// # Examples
    ///
    /// ```
    /// use innkeep::database::DatabaseConfig;
    ///
    /// let config = DatabaseConfig::new("/tmp/innkeep.db");
    /// assert!(config.auto_create);
    /// ```
    #[must_use]
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            busy_timeout: Duration::from_millis(5000),
            auto_create: true,
            read_only: false,
        }
    }

    /// Sets the busy timeout duration.
    ///
    /// The busy timeout determines how long a connection waits on another
    /// writer's admission transaction before giving up with a lock error.
    #[must_use]
    pub fn with_busy_timeout(mut self, timeout: Duration) -> Self {
        self.busy_timeout = timeout;
        self
    }

    /// Configures the database to be opened in read-only mode.
    ///
    /// When read-only is enabled, `auto_create` is automatically disabled.
    ///
    /// # Examples
    ///
    /// ```
    /// use innkeep::database::DatabaseConfig;
    ///
    /// let config = DatabaseConfig::new("/tmp/innkeep.db").read_only();
    /// assert!(config.read_only);
    /// assert!(!config.auto_create);
    /// ```
    #[must_use]
    pub fn read_only(mut self) -> Self {
        self.read_only = true;
        self.auto_create = false;
        self
    }
}

/// Returns the default data directory for innkeep.
///
/// The default directory is `~/.innkeep`.
///
/// # Errors
///
/// Returns an error if the home directory cannot be determined.
///
/// # Examples
///
/// ```no_run
/// use innkeep::database::default_data_dir;
///
/// let data_dir = default_data_dir().unwrap();
/// println!("Data directory: {}", data_dir.display());
/// ```
pub fn default_data_dir() -> Result<PathBuf> {
    let home = home::home_dir().ok_or_else(|| Error::Validation {
        field: "home_directory".into(),
        message: "cannot determine home directory".into(),
    })?;
    Ok(home.join(".innkeep"))
}

/// Resolves the database path using environment variables or defaults.
///
/// The resolution order is:
/// 1. `$INNKEEP_DATA_DIR/innkeep.db` if the `INNKEEP_DATA_DIR` environment
///    variable is set
/// 2. `~/.innkeep/innkeep.db` otherwise
///
/// # Errors
///
/// Returns an error if the home directory cannot be determined and
/// `INNKEEP_DATA_DIR` is not set.
///
/// # Examples
///
/// ```no_run
/// use innkeep::database::resolve_database_path;
///
/// let db_path = resolve_database_path().unwrap();
/// println!("Database path: {}", db_path.display());
/// ```
pub fn resolve_database_path() -> Result<PathBuf> {
    if let Ok(data_dir) = std::env::var("INNKEEP_DATA_DIR") {
        Ok(PathBuf::from(data_dir).join("innkeep.db"))
    } else {
        Ok(default_data_dir()?.join("innkeep.db"))
    }
}
