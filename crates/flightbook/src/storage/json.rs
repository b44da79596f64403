//! JSON file stores.
//!
//! The catalog file holds an array of `{code, destination, date_time}` objects
//! and the ledger file holds an object mapping passenger name to flight code.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, info};

use super::{BookingStore, Bookings, FlightStore};
use crate::error::{Error, Result};
use crate::flight::Flight;

/// A JSON document that is always read and written whole.
#[derive(Debug, Clone)]
pub struct JsonFile {
    path: PathBuf,
}

impl JsonFile {
    /// Wrap the document at `path`. Nothing is touched until the first read or write.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Get the path to the document.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read and parse the document, or `None` if the file does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or does not parse as `T`.
    pub fn read<T: DeserializeOwned>(&self) -> Result<Option<T>> {
        let contents = match std::fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                debug!("No store file at {}", self.path.display());
                return Ok(None);
            }
            Err(source) => {
                return Err(Error::FileRead {
                    path: self.path.clone(),
                    source,
                })
            }
        };

        let value = serde_json::from_str(&contents).map_err(|source| Error::Json {
            path: self.path.clone(),
            source,
        })?;
        Ok(Some(value))
    }

    /// Serialize `value` and replace the document with it.
    ///
    /// The new contents go to a sibling `.tmp` file that is then renamed over
    /// the target, so readers never see a half-written document.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory, the temp file or the rename fails.
    pub fn write<T: Serialize + ?Sized>(&self, value: &T) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent).map_err(|source| Error::DirectoryCreate {
                    path: parent.to_path_buf(),
                    source,
                })?;
            }
        }

        let bytes = serde_json::to_vec(value).map_err(|source| Error::Json {
            path: self.path.clone(),
            source,
        })?;

        let tmp = self.tmp_path();
        std::fs::write(&tmp, bytes).map_err(|source| Error::FileWrite {
            path: tmp.clone(),
            source,
        })?;
        std::fs::rename(&tmp, &self.path).map_err(|source| Error::FileWrite {
            path: self.path.clone(),
            source,
        })?;

        debug!("Rewrote {}", self.path.display());
        Ok(())
    }

    fn tmp_path(&self) -> PathBuf {
        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        PathBuf::from(tmp)
    }
}

/// Flight catalog kept in a JSON file.
#[derive(Debug, Clone)]
pub struct JsonFlightStore {
    file: JsonFile,
}

impl JsonFlightStore {
    /// Create a store backed by the file at `path`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            file: JsonFile::new(path),
        }
    }

    /// Get the path to the catalog file.
    #[must_use]
    pub fn path(&self) -> &Path {
        self.file.path()
    }
}

impl FlightStore for JsonFlightStore {
    fn load_flights(&self) -> Result<Option<Vec<Flight>>> {
        let flights: Option<Vec<Flight>> = self.file.read()?;
        if let Some(flights) = &flights {
            info!(
                "Loaded {} flights from {}",
                flights.len(),
                self.path().display()
            );
        }
        Ok(flights)
    }

    fn save_flights(&self, flights: &[Flight]) -> Result<()> {
        self.file.write(flights)
    }
}

/// Booking ledger kept in a JSON file.
#[derive(Debug, Clone)]
pub struct JsonBookingStore {
    file: JsonFile,
}

impl JsonBookingStore {
    /// Create a store backed by the file at `path`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            file: JsonFile::new(path),
        }
    }

    /// Get the path to the ledger file.
    #[must_use]
    pub fn path(&self) -> &Path {
        self.file.path()
    }
}

impl BookingStore for JsonBookingStore {
    fn load_bookings(&self) -> Result<Bookings> {
        let bookings: Bookings = self.file.read()?.unwrap_or_default();
        info!(
            "Loaded {} bookings from {}",
            bookings.len(),
            self.path().display()
        );
        Ok(bookings)
    }

    fn save_bookings(&self, bookings: &Bookings) -> Result<()> {
        self.file.write(bookings)
    }
}
