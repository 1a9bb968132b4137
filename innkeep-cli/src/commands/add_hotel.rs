//! Add-hotel command implementation.

use clap::Args;

use crate::error::CliError;
use crate::utils::{load_configuration, open_database, GlobalOptions};

/// Register a hotel.
#[derive(Args)]
pub struct AddHotelCommand {
    /// Hotel name
    #[arg(long, value_name = "NAME")]
    name: String,

    /// Hotel contact email
    #[arg(long, value_name = "EMAIL")]
    email: String,

    /// Hotel phone number
    #[arg(long, value_name = "PHONE")]
    phone: Option<String>,

    /// Hotel street address
    #[arg(long, value_name = "ADDRESS")]
    address: Option<String>,
}

impl AddHotelCommand {
    /// Execute the add-hotel command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let mut db = open_database(global, &config)?;

        let hotel = db.add_hotel(
            &self.name,
            &self.email,
            self.phone.as_deref(),
            self.address.as_deref(),
        )?;

        // Output just the id (shell-friendly) to stdout.
        println!("{}", hotel.id());
        Ok(())
    }
}
