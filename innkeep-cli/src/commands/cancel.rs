//! Cancel command implementation.

use clap::Args;
use innkeep::{BookingEngine, ReservationCode};

use crate::error::CliError;
use crate::utils::{load_configuration, make_spool, open_database, GlobalOptions};

/// Cancel a reservation.
#[derive(Args)]
pub struct CancelCommand {
    /// Reservation code
    #[arg(value_name = "CODE")]
    code: ReservationCode,
}

impl CancelCommand {
    /// Execute the cancel command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let mut db = open_database(global, &config)?;

        let reservation = db
            .reservation_by_code(&self.code)?
            .ok_or_else(|| innkeep::Error::NotFound {
                resource: format!("reservation {}", self.code),
            })?;

        let spool = make_spool(&config);
        let cancelled = BookingEngine::new(&mut db, &spool).cancel(reservation.id())?;

        if !global.quiet {
            println!("Reservation {} is now {}", cancelled.code(), cancelled.status());
        }

        spool.shutdown();
        Ok(())
    }
}
