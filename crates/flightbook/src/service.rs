//! The reservation service.
//!
//! Owns the catalog and the ledger and is the single entry point for any
//! presentation layer. Every call is synchronous and either completes, reports
//! that it did not apply (`None` / `false`), or returns a storage error.

use tracing::{debug, warn};

use crate::catalog::FlightCatalog;
use crate::config::Config;
use crate::error::Result;
use crate::flight::{Flight, DEPARTURE_FORMAT};
use crate::ledger::BookingLedger;
use crate::report::{BookingsReport, FlightsSummaryReport};
use crate::storage::{Bookings, Stores};

/// Catalog plus ledger, wired together.
#[derive(Debug)]
pub struct ReservationService {
    catalog: FlightCatalog,
    ledger: BookingLedger,
}

impl ReservationService {
    /// Open the stores named by `config` and load both.
    ///
    /// # Errors
    ///
    /// Returns an error if either store cannot be opened, read or seeded.
    pub fn open(config: &Config) -> Result<Self> {
        Self::with_stores(Stores::open(config)?)
    }

    /// Load the catalog and ledger from the given stores.
    ///
    /// # Errors
    ///
    /// Returns an error if either store cannot be read, or if seeding the
    /// default catalog cannot be written.
    pub fn with_stores(stores: Stores) -> Result<Self> {
        let catalog = FlightCatalog::initialize(stores.flights)?;
        let ledger = BookingLedger::load(stores.bookings)?;
        debug!(
            "Reservation service ready: {} flights, {} bookings",
            catalog.len(),
            ledger.len()
        );
        Ok(Self { catalog, ledger })
    }

    /// Book `name` on `code`. See [`BookingLedger::book`].
    ///
    /// # Errors
    ///
    /// Returns an error if the ledger cannot be written.
    pub fn book(&mut self, name: &str, code: &str) -> Result<Option<&Flight>> {
        self.ledger.book(name, code, &self.catalog)
    }

    /// The flight booked under `name`, if it is still listed.
    #[must_use]
    pub fn view(&self, name: &str) -> Option<&Flight> {
        self.ledger.view(name, &self.catalog)
    }

    /// Cancel the booking for `name`. See [`BookingLedger::cancel`].
    ///
    /// # Errors
    ///
    /// Returns an error if the ledger cannot be written.
    pub fn cancel(&mut self, name: &str) -> Result<bool> {
        self.ledger.cancel(name)
    }

    /// Look up a flight by code.
    #[must_use]
    pub fn find_flight(&self, code: &str) -> Option<&Flight> {
        self.catalog.find(code)
    }

    /// Add a flight to the catalog.
    ///
    /// Returns `false` without changing anything if a field is blank or the
    /// code is already listed. A departure time that does not follow
    /// [`DEPARTURE_FORMAT`] is accepted as an opaque string.
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog cannot be written.
    pub fn add_flight(&mut self, flight: Flight) -> Result<bool> {
        if !flight.is_complete() {
            debug!("Rejecting incomplete flight {flight:?}");
            return Ok(false);
        }
        if self.catalog.contains(&flight.code) {
            warn!("Rejecting flight {}: code already listed", flight.code);
            return Ok(false);
        }
        if flight.departure().is_none() {
            warn!(
                "Departure {:?} for {} is not in {DEPARTURE_FORMAT} format; storing as given",
                flight.date_time, flight.code
            );
        }

        self.catalog.add(flight)?;
        Ok(true)
    }

    /// Delete a flight that nobody is booked on. See [`FlightCatalog::remove`].
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog cannot be written.
    pub fn remove_flight(&mut self, code: &str) -> Result<bool> {
        self.catalog.remove(code, &self.ledger)
    }

    /// All flights in catalog order.
    #[must_use]
    pub fn flights(&self) -> &[Flight] {
        self.catalog.flights()
    }

    /// All bookings, passenger name to flight code.
    #[must_use]
    pub fn bookings(&self) -> &Bookings {
        self.ledger.bookings()
    }

    /// The underlying catalog.
    #[must_use]
    pub fn catalog(&self) -> &FlightCatalog {
        &self.catalog
    }

    /// The underlying ledger.
    #[must_use]
    pub fn ledger(&self) -> &BookingLedger {
        &self.ledger
    }

    /// Every booking whose flight still resolves.
    #[must_use]
    pub fn bookings_report(&self) -> BookingsReport<'_> {
        BookingsReport::new(&self.catalog, &self.ledger)
    }

    /// Booking counts per flight.
    #[must_use]
    pub fn flights_summary_report(&self) -> FlightsSummaryReport<'_> {
        FlightsSummaryReport::new(&self.catalog, &self.ledger)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::init_test_logging;
    use crate::report::NO_BOOKINGS;
    use crate::storage::SqliteStore;

    fn create_test_service() -> ReservationService {
        init_test_logging();
        let stores = Stores::sqlite(SqliteStore::open_in_memory().unwrap());
        ReservationService::with_stores(stores).unwrap()
    }

    #[test]
    fn test_book_then_view() {
        let mut service = create_test_service();

        let booked = service.book("Amir", "LA123").unwrap().cloned();
        assert_eq!(booked.as_ref().map(|f| f.code.as_str()), Some("LA123"));
        assert_eq!(service.view("Amir"), booked.as_ref());
        assert_eq!(service.bookings().get("Amir").map(String::as_str), Some("LA123"));
    }

    #[test]
    fn test_book_invalid_code() {
        let mut service = create_test_service();
        assert!(service.book("Jeff", "INVALID").unwrap().is_none());
        assert!(service.bookings().is_empty());
    }

    #[test]
    fn test_cancel() {
        let mut service = create_test_service();
        service.book("Amir", "LA123").unwrap();

        assert!(service.cancel("Amir").unwrap());
        assert!(service.view("Amir").is_none());
        assert!(!service.cancel("Charlie").unwrap());
    }

    #[test]
    fn test_add_flight() {
        let mut service = create_test_service();
        let flight = Flight::new("SF001", "San Francisco", "2025-07-04 07:15");

        assert!(service.add_flight(flight.clone()).unwrap());
        assert_eq!(service.find_flight("SF001"), Some(&flight));
        assert!(service.book("Amir", "SF001").unwrap().is_some());
    }

    #[test]
    fn test_add_flight_rejects_duplicate_code() {
        let mut service = create_test_service();
        let duplicate = Flight::new("LA123", "Long Beach", "2025-05-01 11:00");

        assert!(!service.add_flight(duplicate).unwrap());
        assert_eq!(service.flights().len(), 3);
    }

    #[test]
    fn test_add_flight_rejects_blank_fields() {
        let mut service = create_test_service();
        assert!(!service
            .add_flight(Flight::new("SF001", "", "2025-07-04 07:15"))
            .unwrap());
        assert!(service.find_flight("SF001").is_none());
    }

    #[test]
    fn test_add_flight_accepts_opaque_departure() {
        let mut service = create_test_service();
        assert!(service
            .add_flight(Flight::new("RD1", "Red-eye", "tonight"))
            .unwrap());
        assert_eq!(service.find_flight("RD1").unwrap().date_time, "tonight");
    }

    #[test]
    fn test_remove_flight() {
        let mut service = create_test_service();
        service.book("Amir", "LA123").unwrap();

        assert!(!service.remove_flight("LA123").unwrap());
        assert!(service.remove_flight("TX456").unwrap());
        assert!(!service.remove_flight("TX456").unwrap());
        assert!(service.find_flight("TX456").is_none());
    }

    #[test]
    fn test_reports() {
        let mut service = create_test_service();
        assert_eq!(service.bookings_report().to_string(), NO_BOOKINGS);

        service.book("Amir", "LA123").unwrap();
        assert_eq!(
            service.bookings_report().to_string(),
            "Amir -> LA123: Los Angeles at 2025-05-01 10:00"
        );
        assert!(service
            .flights_summary_report()
            .to_string()
            .contains("LA123: Los Angeles at 2025-05-01 10:00 - bookings: 1"));
    }
}
