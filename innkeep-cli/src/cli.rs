//! CLI structure and command definitions.
//!
//! This module defines the main CLI structure using clap's derive
//! macros, including global options and subcommands.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::commands::{
    AddCustomerCommand, AddHotelCommand, AddRoomCommand, CancelCommand, ConfirmCommand,
    InitCommand, ListCommand, ReserveCommand, ShowCommand,
};

/// Command-line booking desk for hotels, rooms, and reservations.
#[derive(Parser)]
#[command(name = "innkeep")]
#[command(version, about = "Manage hotel room reservations", long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Override the data directory location
    #[arg(long, value_name = "PATH", global = true, env = "INNKEEP_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Override the default busy timeout (in seconds)
    #[arg(long, value_name = "SECONDS", global = true, env = "INNKEEP_BUSY_TIMEOUT")]
    pub busy_timeout: Option<u64>,

    /// Disable automatic database initialization
    #[arg(long, global = true, env = "INNKEEP_DISABLE_AUTOINIT")]
    pub disable_autoinit: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand)]
pub enum Command {
    /// Initialize the innkeep data directory and database
    Init(InitCommand),

    /// Register a hotel
    AddHotel(AddHotelCommand),

    /// Register a room in a hotel
    AddRoom(AddRoomCommand),

    /// Register a customer
    AddCustomer(AddCustomerCommand),

    /// Book a room for a customer
    Reserve(ReserveCommand),

    /// Confirm a pending reservation
    Confirm(ConfirmCommand),

    /// Cancel a reservation
    Cancel(CancelCommand),

    /// Show a reservation by code
    Show(ShowCommand),

    /// List reservations
    List(ListCommand),
}
