//! Main entry point for the innkeep CLI.
//!
//! This is the command-line booking desk for the innkeep reservation
//! system. It provides commands for managing the catalog and bookings:
//! - `init`: initialize the data directory and database
//! - `add-hotel` / `add-room` / `add-customer`: maintain the catalog
//! - `reserve`: book a room for a customer over a date range
//! - `confirm` / `cancel`: administer a reservation's status
//! - `show` / `list`: inspect reservations

mod cli;
mod commands;
mod error;
mod utils;

use clap::Parser;
use cli::Cli;
use utils::GlobalOptions;

fn main() {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    let _logger = innkeep::init_logger(cli.verbose, cli.quiet);

    // Convert CLI args to GlobalOptions
    let global = GlobalOptions {
        verbose: cli.verbose,
        quiet: cli.quiet,
        data_dir: cli.data_dir,
        busy_timeout: cli.busy_timeout,
        disable_autoinit: cli.disable_autoinit,
    };

    // Execute the command
    let result = match cli.command {
        cli::Command::Init(cmd) => cmd.execute(&global),
        cli::Command::AddHotel(cmd) => cmd.execute(&global),
        cli::Command::AddRoom(cmd) => cmd.execute(&global),
        cli::Command::AddCustomer(cmd) => cmd.execute(&global),
        cli::Command::Reserve(cmd) => cmd.execute(&global),
        cli::Command::Confirm(cmd) => cmd.execute(&global),
        cli::Command::Cancel(cmd) => cmd.execute(&global),
        cli::Command::Show(cmd) => cmd.execute(&global),
        cli::Command::List(cmd) => cmd.execute(&global),
    };

    // Handle errors and set exit code
    match result {
        Ok(()) => std::process::exit(0),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(e.exit_code());
        }
    }
}
