//! Read-only admin reports.
//!
//! Both reports borrow the catalog and ledger and do no work until they are
//! iterated or formatted.

use std::fmt;

use crate::catalog::FlightCatalog;
use crate::flight::Flight;
use crate::ledger::BookingLedger;

/// Rendered by [`BookingsReport`] when the ledger is empty.
pub const NO_BOOKINGS: &str = "No bookings found.";

/// Rendered by [`FlightsSummaryReport`] when the catalog is empty.
pub const NO_FLIGHTS: &str = "No flights available.";

/// One line per booking whose flight is still listed.
#[derive(Debug, Clone, Copy)]
pub struct BookingsReport<'a> {
    catalog: &'a FlightCatalog,
    ledger: &'a BookingLedger,
}

impl<'a> BookingsReport<'a> {
    /// Build the report over the current state.
    #[must_use]
    pub fn new(catalog: &'a FlightCatalog, ledger: &'a BookingLedger) -> Self {
        Self { catalog, ledger }
    }

    /// Passenger and resolved flight for each booking, ordered by name.
    /// Bookings whose flight is gone are skipped.
    pub fn rows(&self) -> impl Iterator<Item = (&'a str, &'a Flight)> + 'a {
        let catalog = self.catalog;
        let ledger = self.ledger;
        ledger
            .iter()
            .filter_map(move |(name, code)| catalog.find(code).map(|flight| (name, flight)))
    }
}

impl fmt::Display for BookingsReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.ledger.is_empty() {
            return f.write_str(NO_BOOKINGS);
        }
        for (index, (name, flight)) in self.rows().enumerate() {
            if index > 0 {
                f.write_str("\n")?;
            }
            write!(f, "{name} -> {flight}")?;
        }
        Ok(())
    }
}

/// Booking count for every flight, in catalog order.
#[derive(Debug, Clone, Copy)]
pub struct FlightsSummaryReport<'a> {
    catalog: &'a FlightCatalog,
    ledger: &'a BookingLedger,
}

impl<'a> FlightsSummaryReport<'a> {
    /// Build the report over the current state.
    #[must_use]
    pub fn new(catalog: &'a FlightCatalog, ledger: &'a BookingLedger) -> Self {
        Self { catalog, ledger }
    }

    /// Each flight with the number of bookings on its code.
    pub fn rows(&self) -> impl Iterator<Item = (&'a Flight, usize)> + 'a {
        let catalog = self.catalog;
        let ledger = self.ledger;
        catalog
            .flights()
            .iter()
            .map(move |flight| (flight, ledger.count_for(&flight.code)))
    }
}

impl fmt::Display for FlightsSummaryReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.catalog.is_empty() {
            return f.write_str(NO_FLIGHTS);
        }
        for (index, (flight, count)) in self.rows().enumerate() {
            if index > 0 {
                f.write_str("\n")?;
            }
            write!(f, "{flight} - bookings: {count}")?;
        }
        Ok(())
    }
}
