//! List command implementation.

use clap::Args;
use innkeep::{CustomerId, Reservation, RoomId};

use crate::error::CliError;
use crate::utils::{load_configuration, open_database, GlobalOptions};

/// List reservations.
#[derive(Args)]
pub struct ListCommand {
    /// Only reservations for this room id
    #[arg(long, value_name = "ROOM_ID", conflicts_with = "customer")]
    room: Option<i64>,

    /// Only reservations held by this customer id
    #[arg(long, value_name = "CUSTOMER_ID")]
    customer: Option<i64>,

    /// Emit the reservations as JSON
    #[arg(long)]
    json: bool,
}

impl ListCommand {
    /// Execute the list command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let db = open_database(global, &config)?;

        let reservations: Vec<Reservation> = if let Some(room) = self.room {
            db.list_reservations_for_room(RoomId::new(room))?
        } else if let Some(customer) = self.customer {
            db.list_reservations_for_customer(CustomerId::new(customer))?
        } else {
            db.list_all_reservations()?
        };

        if self.json {
            let rendered = serde_json::to_string_pretty(&reservations)
                .map_err(|e| CliError::Config(e.to_string()))?;
            println!("{rendered}");
            return Ok(());
        }

        for reservation in &reservations {
            println!(
                "{}  room {}  customer {}  {}  {}",
                reservation.code(),
                reservation.room(),
                reservation.customer(),
                reservation.stay(),
                reservation.status()
            );
        }
        if reservations.is_empty() && !global.quiet {
            eprintln!("No reservations found");
        }
        Ok(())
    }
}
