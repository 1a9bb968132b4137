//! Show command implementation.

use clap::Args;
use innkeep::ReservationCode;

use crate::error::CliError;
use crate::utils::{load_configuration, open_database, GlobalOptions};

/// Show a reservation by code.
#[derive(Args)]
pub struct ShowCommand {
    /// Reservation code
    #[arg(value_name = "CODE")]
    code: ReservationCode,

    /// Emit the reservation as JSON
    #[arg(long)]
    json: bool,
}

impl ShowCommand {
    /// Execute the show command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let db = open_database(global, &config)?;

        let reservation = db
            .reservation_by_code(&self.code)?
            .ok_or_else(|| innkeep::Error::NotFound {
                resource: format!("reservation {}", self.code),
            })?;

        if self.json {
            let rendered = serde_json::to_string_pretty(&reservation)
                .map_err(|e| CliError::Config(e.to_string()))?;
            println!("{rendered}");
            return Ok(());
        }

        println!("Code:      {}", reservation.code());
        println!("Room:      {}", reservation.room());
        println!("Customer:  {}", reservation.customer());
        println!("Check-in:  {}", reservation.stay().check_in());
        println!("Check-out: {}", reservation.stay().check_out());
        println!("Status:    {}", reservation.status());
        Ok(())
    }
}
