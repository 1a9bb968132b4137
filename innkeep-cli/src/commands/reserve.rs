//! Reserve command implementation.
//!
//! This module implements the `reserve` command, which books a room for
//! a customer over a date range through the library's admission engine.

use chrono::NaiveDate;
use clap::Args;
use innkeep::{BookingEngine, BookingRequest, BookingStatus, CustomerId, RoomId, StayRange};

use crate::error::CliError;
use crate::utils::{load_configuration, make_spool, open_database, GlobalOptions};

/// Book a room for a customer.
#[derive(Args)]
pub struct ReserveCommand {
    /// Room id to book
    #[arg(long, value_name = "ROOM_ID")]
    room: i64,

    /// Customer id the booking is for
    #[arg(long, value_name = "CUSTOMER_ID")]
    customer: i64,

    /// Check-in date (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    check_in: NaiveDate,

    /// Check-out date (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    check_out: NaiveDate,

    /// Booking status to create with (pending or confirmed)
    #[arg(long, value_name = "STATUS")]
    status: Option<BookingStatus>,
}

impl ReserveCommand {
    /// Execute the reserve command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        // Date ordering is validated here, before anything is opened.
        let stay = StayRange::new(self.check_in, self.check_out)
            .map_err(innkeep::Error::from)
            .map_err(CliError::from)?;

        let mut request =
            BookingRequest::new(RoomId::new(self.room), CustomerId::new(self.customer), stay);
        if let Some(status) = self.status {
            request = request.with_status(status);
        }

        let config = load_configuration(global)?;
        let mut db = open_database(global, &config)?;
        let spool = make_spool(&config);

        let reservation = BookingEngine::new(&mut db, &spool).book(&request)?;

        // Output just the reservation code (shell-friendly) to stdout.
        println!("{}", reservation.code());
        if !global.quiet {
            eprintln!(
                "Booked room {} for customer {} ({}), status {}",
                reservation.room(),
                reservation.customer(),
                reservation.stay(),
                reservation.status()
            );
        }

        // Dropping the spool flushes queued notifications before exit.
        spool.shutdown();
        Ok(())
    }
}
