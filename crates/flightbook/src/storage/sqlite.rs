//! `SQLite` store for both the catalog and the ledger.
//!
//! One connection serves both stores; clones of [`SqliteStore`] share it
//! behind a mutex so table rewrites never interleave.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};

use rusqlite::{params, Connection};
use tracing::{debug, info};

use super::migrations::{self, get_metadata, set_metadata};
use super::{BookingStore, Bookings, FlightStore};
use crate::error::{Error, Result};
use crate::flight::Flight;

/// Metadata flag set once a catalog has been saved, even an empty one.
const FLIGHTS_SEEDED_KEY: &str = "flights_seeded";

/// Catalog and ledger tables in one `SQLite` database.
#[derive(Debug, Clone)]
pub struct SqliteStore {
    /// Path to the database file.
    path: PathBuf,
    /// Shared database connection.
    conn: Arc<Mutex<Connection>>,
}

impl SqliteStore {
    /// Open or create a database at the given path.
    ///
    /// Creates the parent directories and database file if they don't exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or schema initialization fails.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent).map_err(|source| Error::DirectoryCreate {
                    path: parent.to_path_buf(),
                    source,
                })?;
            }
        }

        debug!("Opening database at {}", path.display());
        let conn = Connection::open(&path).map_err(|source| Error::DatabaseOpen {
            path: path.clone(),
            source,
        })?;

        migrations::initialize_schema(&conn)?;

        info!("Database opened at {}", path.display());
        Ok(Self {
            path,
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Create an in-memory store for testing.
    ///
    /// # Errors
    ///
    /// Returns an error if the in-memory database cannot be created.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().map_err(|source| Error::DatabaseOpen {
            path: PathBuf::from(":memory:"),
            source,
        })?;

        migrations::initialize_schema(&conn)?;

        Ok(Self {
            path: PathBuf::from(":memory:"),
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Get the path to the database file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| Error::internal("database connection lock poisoned"))
    }

    fn row_to_flight(row: &rusqlite::Row) -> rusqlite::Result<Flight> {
        Ok(Flight {
            code: row.get(0)?,
            destination: row.get(1)?,
            date_time: row.get(2)?,
        })
    }
}

impl FlightStore for SqliteStore {
    fn load_flights(&self) -> Result<Option<Vec<Flight>>> {
        let conn = self.lock()?;
        if get_metadata(&conn, FLIGHTS_SEEDED_KEY)?.is_none() {
            return Ok(None);
        }

        let mut stmt = conn.prepare(
            "SELECT code, destination, date_time FROM flights ORDER BY position ASC",
        )?;
        let flights = stmt
            .query_map([], Self::row_to_flight)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        info!("Loaded {} flights from {}", flights.len(), self.path.display());
        Ok(Some(flights))
    }

    fn save_flights(&self, flights: &[Flight]) -> Result<()> {
        let mut conn = self.lock()?;
        let tx = conn.transaction()?;

        tx.execute("DELETE FROM flights", [])?;
        {
            let mut stmt = tx.prepare(
                "INSERT INTO flights (position, code, destination, date_time) VALUES (?1, ?2, ?3, ?4)",
            )?;
            for (position, flight) in flights.iter().enumerate() {
                let position = i64::try_from(position).unwrap_or(i64::MAX);
                stmt.execute(params![
                    position,
                    flight.code,
                    flight.destination,
                    flight.date_time
                ])?;
            }
        }
        set_metadata(&tx, FLIGHTS_SEEDED_KEY, "1")?;
        tx.commit()?;

        debug!("Rewrote flights table with {} rows", flights.len());
        Ok(())
    }
}

impl BookingStore for SqliteStore {
    fn load_bookings(&self) -> Result<Bookings> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare("SELECT name, flight_code FROM bookings")?;
        let bookings = stmt
            .query_map([], |row| {
                Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
            })?
            .collect::<std::result::Result<Bookings, _>>()?;

        info!(
            "Loaded {} bookings from {}",
            bookings.len(),
            self.path.display()
        );
        Ok(bookings)
    }

    fn save_bookings(&self, bookings: &Bookings) -> Result<()> {
        let mut conn = self.lock()?;
        let tx = conn.transaction()?;

        tx.execute("DELETE FROM bookings", [])?;
        {
            let mut stmt = tx.prepare("INSERT INTO bookings (name, flight_code) VALUES (?1, ?2)")?;
            for (name, code) in bookings {
                stmt.execute(params![name, code])?;
            }
        }
        tx.commit()?;

        debug!("Rewrote bookings table with {} rows", bookings.len());
        Ok(())
    }
}
