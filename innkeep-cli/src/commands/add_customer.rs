//! Add-customer command implementation.

use clap::Args;

use crate::error::CliError;
use crate::utils::{load_configuration, open_database, GlobalOptions};

/// Register a customer.
#[derive(Args)]
pub struct AddCustomerCommand {
    /// Customer display name
    #[arg(long, value_name = "NAME")]
    name: String,

    /// Customer contact email
    #[arg(long, value_name = "EMAIL")]
    email: String,

    /// Customer phone number
    #[arg(long, value_name = "PHONE")]
    phone: Option<String>,

    /// Free-form preferences as a JSON object
    #[arg(long, value_name = "JSON")]
    preferences: Option<String>,
}

impl AddCustomerCommand {
    /// Execute the add-customer command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let preferences = self
            .preferences
            .as_deref()
            .map(serde_json::from_str)
            .transpose()
            .map_err(|e| CliError::InvalidArguments(format!("--preferences: {e}")))?;

        let config = load_configuration(global)?;
        let mut db = open_database(global, &config)?;

        let customer = db.add_customer(
            &self.name,
            &self.email,
            self.phone.as_deref(),
            preferences.as_ref(),
        )?;

        println!("{}", customer.id());
        Ok(())
    }
}
