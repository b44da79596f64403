//! Command-line interface for flightbook.
//!
//! This module provides the CLI structure for the `flightbook` binary, a thin
//! front end over [`crate::ReservationService`].

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use commands::{
    AdminArgs, BookCommand, ConfigCommand, FlightsCommand, PassengerCommand, ReportCommand,
};

use crate::logging::Verbosity;

/// flightbook - Book, view and cancel flight reservations
///
/// Bookings and the flight catalog are kept in local files and survive
/// between runs. Catalog changes and reports require the admin password.
#[derive(Debug, Parser)]
#[command(name = "flightbook")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to custom configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Increase verbosity (-v for info, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// The command to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Book a passenger on a flight (replaces any earlier booking)
    Book(BookCommand),

    /// Show the flight a passenger is booked on
    View(PassengerCommand),

    /// Cancel a passenger's booking
    Cancel(PassengerCommand),

    /// List or manage flights
    #[command(subcommand)]
    Flights(FlightsCommand),

    /// Admin reports
    #[command(subcommand)]
    Report(ReportCommand),

    /// View or validate configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

impl Cli {
    /// Get the verbosity level based on flags.
    #[must_use]
    pub fn verbosity(&self) -> Verbosity {
        if self.quiet {
            Verbosity::Quiet
        } else {
            match self.verbose {
                0 => Verbosity::Normal,
                1 => Verbosity::Verbose,
                _ => Verbosity::Trace,
            }
        }
    }
}
