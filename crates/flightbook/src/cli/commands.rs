//! CLI command definitions.

use std::path::PathBuf;

use clap::{Args, Subcommand};

/// Book command arguments.
#[derive(Debug, Args)]
pub struct BookCommand {
    /// Passenger name
    pub name: String,

    /// Flight code (e.g. LA123)
    pub code: String,
}

/// Arguments for commands that only take a passenger name.
#[derive(Debug, Args)]
pub struct PassengerCommand {
    /// Passenger name
    pub name: String,
}

/// Admin credentials shared by all admin commands.
#[derive(Debug, Args)]
pub struct AdminArgs {
    /// Admin password
    #[arg(short, long)]
    pub password: String,
}

/// Flight catalog commands.
#[derive(Debug, Subcommand)]
pub enum FlightsCommand {
    /// List all flights
    List,

    /// Add a flight (admin)
    Add {
        /// Flight code
        code: String,

        /// Destination
        destination: String,

        /// Departure, as "YYYY-MM-DD HH:MM"
        date_time: String,

        #[command(flatten)]
        admin: AdminArgs,
    },

    /// Delete a flight nobody is booked on (admin)
    Delete {
        /// Flight code
        code: String,

        #[command(flatten)]
        admin: AdminArgs,
    },
}

/// Admin report commands.
#[derive(Debug, Subcommand)]
pub enum ReportCommand {
    /// List every booking with its flight
    Bookings {
        #[command(flatten)]
        admin: AdminArgs,
    },

    /// Count bookings per flight
    Flights {
        #[command(flatten)]
        admin: AdminArgs,
    },
}

/// Configuration commands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration
    Show {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Show the configuration file path
    Path,

    /// Validate configuration
    Validate {
        /// Path to configuration file to validate
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
}
