//! The booking ledger.
//!
//! Maps each passenger name to at most one flight code. A later booking under
//! the same name replaces the earlier one.

use tracing::{debug, info};

use crate::catalog::FlightCatalog;
use crate::error::Result;
use crate::flight::Flight;
use crate::storage::{BookingStore, Bookings};

/// Active bookings keyed by passenger name.
#[derive(Debug)]
pub struct BookingLedger {
    bookings: Bookings,
    store: Box<dyn BookingStore>,
}

impl BookingLedger {
    /// Load the ledger from `store`. A store with nothing saved yields an empty ledger.
    ///
    /// # Errors
    ///
    /// Returns an error if the store exists but cannot be read.
    pub fn load(store: Box<dyn BookingStore>) -> Result<Self> {
        let bookings = store.load_bookings()?;
        Ok(Self { bookings, store })
    }

    /// Book `name` on the flight with `code` and persist the ledger.
    ///
    /// Returns the booked flight, or `None` without touching the ledger if
    /// the name is blank or the code is not in `catalog`.
    ///
    /// # Errors
    ///
    /// Returns an error if the ledger cannot be written; the previous booking
    /// for `name` (if any) is restored in that case.
    pub fn book<'c>(
        &mut self,
        name: &str,
        code: &str,
        catalog: &'c FlightCatalog,
    ) -> Result<Option<&'c Flight>> {
        if name.trim().is_empty() {
            debug!("Rejecting booking with blank passenger name");
            return Ok(None);
        }
        let Some(flight) = catalog.find(code) else {
            return Ok(None);
        };

        let previous = self.bookings.insert(name.to_string(), code.to_string());
        if let Err(err) = self.store.save_bookings(&self.bookings) {
            match previous {
                Some(previous) => self.bookings.insert(name.to_string(), previous),
                None => self.bookings.remove(name),
            };
            return Err(err);
        }

        match previous {
            Some(previous) if previous != code => {
                info!("Moved booking for {name} from {previous} to {code}");
            }
            _ => info!("Booked {name} on {code}"),
        }
        Ok(Some(flight))
    }

    /// Resolve the booking for `name` through `catalog`.
    ///
    /// Returns `None` if there is no booking or its flight is no longer listed.
    #[must_use]
    pub fn view<'c>(&self, name: &str, catalog: &'c FlightCatalog) -> Option<&'c Flight> {
        self.flight_code(name).and_then(|code| catalog.find(code))
    }

    /// Cancel the booking for `name` and persist the ledger.
    ///
    /// Returns `false` if there was nothing to cancel.
    ///
    /// # Errors
    ///
    /// Returns an error if the ledger cannot be written; the booking is kept
    /// in that case.
    pub fn cancel(&mut self, name: &str) -> Result<bool> {
        let Some(code) = self.bookings.remove(name) else {
            debug!("No booking to cancel for {name:?}");
            return Ok(false);
        };

        if let Err(err) = self.store.save_bookings(&self.bookings) {
            self.bookings.insert(name.to_string(), code);
            return Err(err);
        }

        info!("Cancelled booking for {name} on {code}");
        Ok(true)
    }

    /// The flight code booked under `name`, resolved or not.
    #[must_use]
    pub fn flight_code(&self, name: &str) -> Option<&str> {
        self.bookings.get(name).map(String::as_str)
    }

    /// Check whether any booking points at `code`.
    #[must_use]
    pub fn references(&self, code: &str) -> bool {
        self.bookings.values().any(|booked| booked == code)
    }

    /// Number of bookings on `code`.
    #[must_use]
    pub fn count_for(&self, code: &str) -> usize {
        self.bookings.values().filter(|booked| *booked == code).count()
    }

    /// Iterate over `(name, code)` pairs, ordered by name.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.bookings
            .iter()
            .map(|(name, code)| (name.as_str(), code.as_str()))
    }

    /// The raw name to code mapping.
    #[must_use]
    pub fn bookings(&self) -> &Bookings {
        &self.bookings
    }

    /// Number of bookings.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bookings.len()
    }

    /// Check if there are no bookings.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bookings.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::storage::{JsonBookingStore, SqliteStore, Stores};

    fn create_test_pair() -> (FlightCatalog, BookingLedger) {
        let stores = Stores::sqlite(SqliteStore::open_in_memory().unwrap());
        let catalog = FlightCatalog::initialize(stores.flights).unwrap();
        let ledger = BookingLedger::load(stores.bookings).unwrap();
        (catalog, ledger)
    }

    #[test]
    fn test_book_valid_flight() {
        let (catalog, mut ledger) = create_test_pair();

        let flight = ledger.book("Amir", "LA123", &catalog).unwrap().unwrap();
        assert_eq!(flight.code, "LA123");
        assert_eq!(ledger.flight_code("Amir"), Some("LA123"));
    }

    #[test]
    fn test_book_invalid_code_leaves_ledger_alone() {
        let (catalog, mut ledger) = create_test_pair();

        assert!(ledger.book("Jeff", "INVALID", &catalog).unwrap().is_none());
        assert!(ledger.is_empty());
    }

    #[test]
    fn test_book_blank_name() {
        let (catalog, mut ledger) = create_test_pair();

        assert!(ledger.book("", "LA123", &catalog).unwrap().is_none());
        assert!(ledger.book("   ", "LA123", &catalog).unwrap().is_none());
        assert!(ledger.is_empty());
    }

    #[test]
    fn test_book_overwrites_previous_booking() {
        let (catalog, mut ledger) = create_test_pair();

        ledger.book("Amir", "LA123", &catalog).unwrap();
        ledger.book("Amir", "NY789", &catalog).unwrap();

        assert_eq!(ledger.len(), 1);
        assert_eq!(ledger.view("Amir", &catalog).unwrap().code, "NY789");
    }

    #[test]
    fn test_view_unknown_name() {
        let (catalog, ledger) = create_test_pair();
        assert!(ledger.view("Charlie", &catalog).is_none());
    }

    #[test]
    fn test_view_orphaned_booking() {
        let store = SqliteStore::open_in_memory().unwrap();
        let mut bookings = Bookings::new();
        bookings.insert("Dana".to_string(), "GONE1".to_string());
        store.save_bookings(&bookings).unwrap();

        let stores = Stores::sqlite(store);
        let catalog = FlightCatalog::initialize(stores.flights).unwrap();
        let ledger = BookingLedger::load(stores.bookings).unwrap();

        assert_eq!(ledger.flight_code("Dana"), Some("GONE1"));
        assert!(ledger.view("Dana", &catalog).is_none());
    }

    #[test]
    fn test_cancel() {
        let (catalog, mut ledger) = create_test_pair();
        ledger.book("Amir", "LA123", &catalog).unwrap();

        assert!(ledger.cancel("Amir").unwrap());
        assert!(ledger.view("Amir", &catalog).is_none());
        assert!(!ledger.cancel("Amir").unwrap());
    }

    #[test]
    fn test_cancel_never_booked() {
        let (_, mut ledger) = create_test_pair();
        assert!(!ledger.cancel("Charlie").unwrap());
    }

    #[test]
    fn test_references_and_counts() {
        let (catalog, mut ledger) = create_test_pair();
        ledger.book("Amir", "LA123", &catalog).unwrap();
        ledger.book("Jeff", "LA123", &catalog).unwrap();
        ledger.book("Dana", "TX456", &catalog).unwrap();

        assert!(ledger.references("LA123"));
        assert!(!ledger.references("NY789"));
        assert_eq!(ledger.count_for("LA123"), 2);
        assert_eq!(ledger.count_for("NY789"), 0);

        let names: Vec<&str> = ledger.iter().map(|(name, _)| name).collect();
        assert_eq!(names, ["Amir", "Dana", "Jeff"]);
    }

    #[test]
    fn test_mutations_are_persisted() {
        let store = SqliteStore::open_in_memory().unwrap();
        let stores = Stores::sqlite(store.clone());
        let catalog = FlightCatalog::initialize(stores.flights).unwrap();
        let mut ledger = BookingLedger::load(stores.bookings).unwrap();

        ledger.book("Amir", "LA123", &catalog).unwrap();
        ledger.book("Jeff", "TX456", &catalog).unwrap();
        ledger.cancel("Jeff").unwrap();

        assert_eq!(&store.load_bookings().unwrap(), ledger.bookings());
    }

    #[test]
    fn test_write_failure_restores_previous_booking() {
        let dir = tempfile::TempDir::new().unwrap();
        let catalog =
            FlightCatalog::initialize(Box::new(SqliteStore::open_in_memory().unwrap())).unwrap();
        let path = dir.path().join("bookings.json");
        let mut ledger = BookingLedger::load(Box::new(JsonBookingStore::new(&path))).unwrap();
        ledger.book("Amir", "LA123", &catalog).unwrap();

        std::fs::remove_file(&path).unwrap();
        std::fs::create_dir(&path).unwrap();
        std::fs::write(path.join("occupant"), "x").unwrap();

        let err = ledger.book("Amir", "TX456", &catalog).unwrap_err();
        assert!(matches!(err, Error::FileWrite { .. }));
        assert_eq!(ledger.flight_code("Amir"), Some("LA123"));

        let err = ledger.cancel("Amir").unwrap_err();
        assert!(err.is_storage_error());
        assert_eq!(ledger.flight_code("Amir"), Some("LA123"));

        assert!(ledger.book("Jeff", "NY789", &catalog).is_err());
        assert!(ledger.flight_code("Jeff").is_none());
    }
}
