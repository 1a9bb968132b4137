//! Confirm command implementation.

use clap::Args;
use innkeep::{BookingEngine, ReservationCode};

use crate::error::CliError;
use crate::utils::{load_configuration, make_spool, open_database, GlobalOptions};

/// Confirm a pending reservation.
#[derive(Args)]
pub struct ConfirmCommand {
    /// Reservation code
    #[arg(value_name = "CODE")]
    code: ReservationCode,
}

impl ConfirmCommand {
    /// Execute the confirm command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let mut db = open_database(global, &config)?;

        let reservation = db
            .reservation_by_code(&self.code)?
            .ok_or_else(|| innkeep::Error::NotFound {
                resource: format!("reservation {}", self.code),
            })?;

        let spool = make_spool(&config);
        let confirmed = BookingEngine::new(&mut db, &spool).confirm(reservation.id())?;

        if !global.quiet {
            println!("Reservation {} is now {}", confirmed.code(), confirmed.status());
        }

        spool.shutdown();
        Ok(())
    }
}
