//! Utility functions for CLI operations.
//!
//! This module provides the glue shared across CLI commands:
//! configuration loading, database opening, and the notification spool
//! wiring.

use std::path::PathBuf;
use std::time::Duration;

use innkeep::notify::{LogMailer, MailSpool};
use innkeep::{Config, ConfigBuilder, Database, DatabaseConfig};

use crate::error::CliError;

/// Global CLI options shared across all commands.
#[derive(Debug, Clone)]
#[allow(dead_code)] // Not every command reads every field
pub struct GlobalOptions {
    /// Enable verbose output.
    pub verbose: bool,

    /// Suppress non-essential output.
    pub quiet: bool,

    /// Override the data directory location.
    pub data_dir: Option<PathBuf>,

    /// Override the default busy timeout (in seconds).
    pub busy_timeout: Option<u64>,

    /// Disable automatic database initialization.
    pub disable_autoinit: bool,
}

/// Load configuration from files and environment.
pub fn load_configuration(_global: &GlobalOptions) -> Result<Config, CliError> {
    ConfigBuilder::new()
        .build()
        .map_err(|e| CliError::Config(e.to_string()))
}

/// Resolve the data directory from global options, configuration, or the
/// default location.
pub fn resolve_data_dir(global: &GlobalOptions, config: &Config) -> Result<PathBuf, CliError> {
    if let Some(data_dir) = &global.data_dir {
        return Ok(data_dir.clone());
    }
    if let Some(data_dir) = &config.data_dir {
        return Ok(data_dir.clone());
    }
    let home = home::home_dir()
        .ok_or_else(|| CliError::Config("could not determine home directory".to_string()))?;
    Ok(home.join(".innkeep"))
}

/// Open the booking database.
///
/// # Errors
///
/// Returns `NoDataDirectory` if the database doesn't exist and auto-init
/// is disabled.
pub fn open_database(global: &GlobalOptions, config: &Config) -> Result<Database, CliError> {
    let db_path = resolve_data_dir(global, config)?.join("innkeep.db");

    if !db_path.exists() && global.disable_autoinit {
        return Err(CliError::NoDataDirectory);
    }

    let mut db_config = DatabaseConfig::new(db_path);
    if let Some(timeout_seconds) = global.busy_timeout {
        db_config = db_config.with_busy_timeout(Duration::from_secs(timeout_seconds));
    } else {
        db_config = db_config.with_busy_timeout(config.busy_timeout());
    }

    Database::open(db_config).map_err(CliError::from)
}

/// Build the notification spool used by booking commands.
///
/// The bundled transport logs messages; real delivery is a deployment
/// concern wired in behind the same trait.
pub fn make_spool(config: &Config) -> MailSpool {
    MailSpool::with_policy(LogMailer, config.retry_policy())
}
