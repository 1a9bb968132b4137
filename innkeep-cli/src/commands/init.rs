//! Init command implementation.
//!
//! This module implements the `init` command for explicitly initializing
//! the innkeep data directory and database.

use std::path::PathBuf;

use clap::Args;
use innkeep::database::default_data_dir;
use innkeep::{Database, DatabaseConfig};

use crate::error::CliError;
use crate::utils::GlobalOptions;

const DEFAULT_CONFIG: &str = "\
# innkeep configuration
#
# busy_timeout_seconds: 5
# notification:
#   max_attempts: 3
#   retry_delay_ms: 500
";

/// Initialize the innkeep data directory and database.
#[derive(Args)]
pub struct InitCommand {
    /// Data directory to initialize
    #[arg(long, value_name = "PATH")]
    data_dir: Option<PathBuf>,

    /// Create a commented default configuration file
    #[arg(long)]
    with_config: bool,
}

impl InitCommand {
    /// Execute the init command.
    ///
    /// Note: this command ignores `--disable-autoinit` (initializing is
    /// the point). The data directory priority is: command flag > global
    /// flag > default.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let data_dir = self
            .data_dir
            .or_else(|| global.data_dir.clone())
            .or_else(|| default_data_dir().ok())
            .ok_or_else(|| {
                CliError::Config(
                    "could not determine data directory (home directory not found)".to_string(),
                )
            })?;

        std::fs::create_dir_all(&data_dir)?;

        let db_path = data_dir.join("innkeep.db");
        Database::open(DatabaseConfig::new(&db_path))?;

        if self.with_config {
            let config_path = data_dir.join("config.yaml");
            if !config_path.exists() {
                std::fs::write(&config_path, DEFAULT_CONFIG)?;
            }
        }

        if !global.quiet {
            println!("Initialized innkeep in {}", data_dir.display());
        }

        Ok(())
    }
}
