//! `flightbook` - A flight reservation ledger with file-backed persistence
//!
//! This library holds the flight catalog and the passenger booking ledger,
//! persists both to local storage, and exposes them through
//! [`ReservationService`] to whatever front end drives it.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

pub mod admin;
pub mod catalog;
pub mod cli;
pub mod config;
pub mod error;
pub mod flight;
pub mod ledger;
pub mod logging;
pub mod report;
pub mod service;
pub mod storage;

pub use admin::AdminGate;
pub use catalog::FlightCatalog;
pub use config::{Backend, Config};
pub use error::{Error, Result};
pub use flight::Flight;
pub use ledger::BookingLedger;
pub use logging::init_logging;
pub use report::{BookingsReport, FlightsSummaryReport};
pub use service::ReservationService;
pub use storage::{BookingStore, Bookings, FlightStore, Stores};
