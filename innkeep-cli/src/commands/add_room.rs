//! Add-room command implementation.

use clap::Args;
use innkeep::HotelId;

use crate::error::CliError;
use crate::utils::{load_configuration, open_database, GlobalOptions};

/// Register a room in a hotel.
#[derive(Args)]
pub struct AddRoomCommand {
    /// Hotel id the room belongs to
    #[arg(long, value_name = "HOTEL_ID")]
    hotel: i64,

    /// Room number
    #[arg(long, value_name = "NUMBER")]
    number: u32,

    /// Complement (wing, floor, suite name)
    #[arg(long, value_name = "TEXT")]
    complement: Option<String>,
}

impl AddRoomCommand {
    /// Execute the add-room command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let mut db = open_database(global, &config)?;

        let room = db.add_room(
            HotelId::new(self.hotel),
            self.number,
            self.complement.as_deref(),
        )?;

        println!("{}", room.id());
        Ok(())
    }
}
