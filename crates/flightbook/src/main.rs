//! `flightbook` - CLI for the flight reservation ledger
//!
//! A thin presentation layer: every command opens the reservation service,
//! performs one operation and prints the outcome.

#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

use std::process::ExitCode;

use clap::Parser;

use flightbook::cli::{Cli, Command, ConfigCommand, FlightsCommand, ReportCommand};
use flightbook::report::NO_FLIGHTS;
use flightbook::{init_logging, AdminGate, Config, Flight, ReservationService};

type CliResult = Result<ExitCode, Box<dyn std::error::Error>>;

fn main() -> CliResult {
    let cli = Cli::parse();

    init_logging(cli.verbosity());

    let config = Config::load_from(cli.config.clone())?;

    match cli.command {
        Command::Book(cmd) => {
            let mut service = ReservationService::open(&config)?;
            let name = cmd.name.trim();
            match service.book(name, cmd.code.trim())? {
                Some(flight) => {
                    println!("{name} booked on {flight}");
                    Ok(ExitCode::SUCCESS)
                }
                None => not_applied("Invalid name or flight code."),
            }
        }
        Command::View(cmd) => {
            let service = ReservationService::open(&config)?;
            match service.view(&cmd.name) {
                Some(flight) => {
                    println!("{} is booked on {flight}", cmd.name);
                    Ok(ExitCode::SUCCESS)
                }
                None => not_applied("No booking found."),
            }
        }
        Command::Cancel(cmd) => {
            let mut service = ReservationService::open(&config)?;
            if service.cancel(&cmd.name)? {
                println!("Booking for {} has been cancelled.", cmd.name);
                Ok(ExitCode::SUCCESS)
            } else {
                not_applied("No booking found to cancel.")
            }
        }
        Command::Flights(cmd) => handle_flights(&config, cmd),
        Command::Report(cmd) => handle_report(&config, &cmd),
        Command::Config(cmd) => handle_config(&config, cmd),
    }
}

fn not_applied(message: &str) -> CliResult {
    eprintln!("{message}");
    Ok(ExitCode::FAILURE)
}

fn handle_flights(config: &Config, cmd: FlightsCommand) -> CliResult {
    let gate = AdminGate::from_config(&config.admin);
    match cmd {
        FlightsCommand::List => {
            let service = ReservationService::open(config)?;
            if service.flights().is_empty() {
                println!("{NO_FLIGHTS}");
            }
            for flight in service.flights() {
                println!("{flight}");
            }
            Ok(ExitCode::SUCCESS)
        }
        FlightsCommand::Add {
            code,
            destination,
            date_time,
            admin,
        } => {
            gate.verify(&admin.password)?;
            let mut service = ReservationService::open(config)?;
            let flight = Flight::new(code.trim(), destination.trim(), date_time.trim());
            let code = flight.code.clone();
            if service.add_flight(flight)? {
                println!("Flight {code} added successfully!");
                Ok(ExitCode::SUCCESS)
            } else {
                not_applied("Please fill in all fields with an unused flight code.")
            }
        }
        FlightsCommand::Delete { code, admin } => {
            gate.verify(&admin.password)?;
            let mut service = ReservationService::open(config)?;
            let code = code.trim();
            if service.remove_flight(code)? {
                println!("Flight {code} deleted.");
                Ok(ExitCode::SUCCESS)
            } else {
                not_applied("Flight not found or has bookings.")
            }
        }
    }
}

fn handle_report(config: &Config, cmd: &ReportCommand) -> CliResult {
    let gate = AdminGate::from_config(&config.admin);
    match cmd {
        ReportCommand::Bookings { admin } => {
            gate.verify(&admin.password)?;
            let service = ReservationService::open(config)?;
            println!("{}", service.bookings_report());
        }
        ReportCommand::Flights { admin } => {
            gate.verify(&admin.password)?;
            let service = ReservationService::open(config)?;
            println!("{}", service.flights_summary_report());
        }
    }
    Ok(ExitCode::SUCCESS)
}

fn handle_config(config: &Config, cmd: ConfigCommand) -> CliResult {
    match cmd {
        ConfigCommand::Show { json } => {
            if json {
                let mut shown = config.clone();
                shown.admin.password = "<set>".to_string();
                println!("{}", serde_json::to_string_pretty(&shown)?);
            } else {
                println!("Current Configuration");
                println!("=====================");
                println!();
                println!("[Storage]");
                println!("  Backend:            {}", config.storage.backend);
                println!("  Data directory:     {}", config.data_dir().display());
                println!("  Flights file:       {}", config.flights_path().display());
                println!("  Bookings file:      {}", config.bookings_path().display());
                println!("  Database file:      {}", config.database_path().display());
                println!();
                println!("[Admin]");
                println!("  Password:           <set>");
            }
        }
        ConfigCommand::Path => {
            println!("{}", Config::default_config_path().display());
        }
        ConfigCommand::Validate { file } => {
            let path = file.unwrap_or_else(Config::default_config_path);
            println!("Validating configuration: {}", path.display());
            match Config::load_from(Some(path)) {
                Ok(_) => println!("Configuration is valid."),
                Err(e) => {
                    println!("Configuration error: {e}");
                    return Ok(ExitCode::FAILURE);
                }
            }
        }
    }
    Ok(ExitCode::SUCCESS)
}
