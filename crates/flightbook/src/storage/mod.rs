//! Persistence for the flight catalog and the booking ledger.
//!
//! The two stores are independent: each one is read in full at startup and
//! rewritten in full after every mutation. Two backends are provided, a pair of
//! JSON files (the default) and a single `SQLite` database.

pub mod json;
pub mod migrations;
pub mod schema;
pub mod sqlite;

use std::collections::BTreeMap;

use tracing::debug;

use crate::config::{Backend, Config};
use crate::error::Result;
use crate::flight::Flight;

pub use json::{JsonBookingStore, JsonFile, JsonFlightStore};
pub use sqlite::SqliteStore;

/// Passenger name to flight code.
pub type Bookings = BTreeMap<String, String>;

/// Durable home of the flight catalog.
pub trait FlightStore: std::fmt::Debug {
    /// Read the persisted catalog.
    ///
    /// Returns `None` if no catalog has ever been saved, which tells the caller
    /// to seed the defaults. A saved empty catalog is `Some(vec![])`.
    ///
    /// # Errors
    ///
    /// Returns an error if the store exists but cannot be read or parsed.
    fn load_flights(&self) -> Result<Option<Vec<Flight>>>;

    /// Replace the persisted catalog with `flights`, preserving order.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be written.
    fn save_flights(&self, flights: &[Flight]) -> Result<()>;
}

/// Durable home of the booking ledger.
pub trait BookingStore: std::fmt::Debug {
    /// Read the persisted ledger. A store that does not exist yet is empty.
    ///
    /// # Errors
    ///
    /// Returns an error if the store exists but cannot be read or parsed.
    fn load_bookings(&self) -> Result<Bookings>;

    /// Replace the persisted ledger with `bookings`.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be written.
    fn save_bookings(&self, bookings: &Bookings) -> Result<()>;
}

/// The catalog and ledger stores for one reservation service.
#[derive(Debug)]
pub struct Stores {
    /// Where the catalog lives.
    pub flights: Box<dyn FlightStore>,
    /// Where the ledger lives.
    pub bookings: Box<dyn BookingStore>,
}

impl Stores {
    /// Open the stores selected by `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if the `SQLite` database cannot be opened. The JSON
    /// backend touches nothing until the first load.
    pub fn open(config: &Config) -> Result<Self> {
        debug!("Opening {} stores", config.storage.backend);
        match config.storage.backend {
            Backend::Json => Ok(Self {
                flights: Box::new(JsonFlightStore::new(config.flights_path())),
                bookings: Box::new(JsonBookingStore::new(config.bookings_path())),
            }),
            Backend::Sqlite => {
                let store = SqliteStore::open(config.database_path())?;
                Ok(Self::sqlite(store))
            }
        }
    }

    /// Use one `SQLite` database for both stores.
    #[must_use]
    pub fn sqlite(store: SqliteStore) -> Self {
        Self {
            flights: Box::new(store.clone()),
            bookings: Box::new(store),
        }
    }
}
