//! The flight catalog.
//!
//! An ordered list of bookable flights, loaded once and rewritten in full on
//! every change.

use tracing::{debug, info, warn};

use crate::error::Result;
use crate::flight::{default_flights, Flight};
use crate::ledger::BookingLedger;
use crate::storage::FlightStore;

/// All known flights, in insertion order.
#[derive(Debug)]
pub struct FlightCatalog {
    flights: Vec<Flight>,
    store: Box<dyn FlightStore>,
}

impl FlightCatalog {
    /// Load the catalog from `store`.
    ///
    /// If nothing has been persisted yet the default flights are used and
    /// saved immediately. A persisted catalog is taken as is, even when empty.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read, or if seeding the
    /// defaults cannot be written.
    pub fn initialize(store: Box<dyn FlightStore>) -> Result<Self> {
        let flights = if let Some(flights) = store.load_flights()? {
            flights
        } else {
            let flights = default_flights();
            info!("No saved catalog, seeding {} default flights", flights.len());
            store.save_flights(&flights)?;
            flights
        };

        Ok(Self { flights, store })
    }

    /// Look up a flight by exact code.
    ///
    /// When several flights share a code the first one wins.
    #[must_use]
    pub fn find(&self, code: &str) -> Option<&Flight> {
        let found = self.flights.iter().find(|flight| flight.code == code);
        if found.is_none() {
            debug!("No flight with code {code:?}");
        }
        found
    }

    /// Check whether any flight has `code`.
    #[must_use]
    pub fn contains(&self, code: &str) -> bool {
        self.flights.iter().any(|flight| flight.code == code)
    }

    /// Append a flight and persist the catalog.
    ///
    /// No checks are made here: a second flight with an existing code is
    /// appended and shadowed by the first in [`FlightCatalog::find`].
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog cannot be written; the flight is not
    /// kept in that case.
    pub fn add(&mut self, flight: Flight) -> Result<()> {
        let code = flight.code.clone();
        self.flights.push(flight);

        if let Err(err) = self.store.save_flights(&self.flights) {
            self.flights.pop();
            return Err(err);
        }

        info!("Added flight {code}");
        Ok(())
    }

    /// Remove the flight with `code` and persist the catalog.
    ///
    /// Returns `false` without changing anything if no flight has that code
    /// or if any booking in `ledger` still references it. Every flight
    /// carrying the code is removed.
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog cannot be written; the flight is kept
    /// in that case.
    pub fn remove(&mut self, code: &str, ledger: &BookingLedger) -> Result<bool> {
        if !self.contains(code) {
            debug!("Cannot remove unknown flight {code:?}");
            return Ok(false);
        }
        if ledger.references(code) {
            warn!("Refusing to remove flight {code}: it still has bookings");
            return Ok(false);
        }

        let previous = self.flights.clone();
        self.flights.retain(|flight| flight.code != code);

        if let Err(err) = self.store.save_flights(&self.flights) {
            self.flights = previous;
            return Err(err);
        }

        info!("Removed flight {code}");
        Ok(true)
    }

    /// All flights in catalog order.
    #[must_use]
    pub fn flights(&self) -> &[Flight] {
        &self.flights
    }

    /// Number of flights in the catalog.
    #[must_use]
    pub fn len(&self) -> usize {
        self.flights.len()
    }

    /// Check if the catalog has no flights.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.flights.is_empty()
    }
}
