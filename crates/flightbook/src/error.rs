//! Error types for flightbook.
//!
//! Booking outcomes such as an unknown flight code or a missing reservation are
//! not errors; they are reported as `None` or `false` by the operations
//! themselves. This module covers the faults a caller cannot recover from by
//! changing its input: unreadable or unwritable stores, broken configuration and
//! failed admin authentication.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for flightbook operations.
#[derive(Error, Debug)]
pub enum Error {
    // === File Store Errors ===
    /// A store file exists but could not be read.
    #[error("failed to read {path}: {source}")]
    FileRead {
        /// Path to the store file.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    /// A store file could not be rewritten.
    #[error("failed to write {path}: {source}")]
    FileWrite {
        /// Path to the store file.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    /// A store file does not contain the expected JSON document.
    #[error("malformed store file {path}: {source}")]
    Json {
        /// Path to the store file.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: serde_json::Error,
    },

    /// Failed to create a required directory.
    #[error("failed to create directory {path}: {source}")]
    DirectoryCreate {
        /// Path that couldn't be created.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    /// File system operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    // === Database Errors ===
    /// Failed to open or create the database.
    #[error("failed to open database at {path}: {source}")]
    DatabaseOpen {
        /// Path to the database file.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: rusqlite::Error,
    },

    /// A database query failed.
    #[error("database query failed: {0}")]
    DatabaseQuery(#[from] rusqlite::Error),

    /// Failed to run database migrations.
    #[error("database migration failed: {message}")]
    DatabaseMigration {
        /// Description of what went wrong.
        message: String,
    },

    // === Configuration Errors ===
    /// Failed to load configuration.
    #[error("failed to load configuration: {0}")]
    ConfigLoad(Box<figment::Error>),

    /// Configuration validation failed.
    #[error("invalid configuration: {message}")]
    ConfigValidation {
        /// Description of the validation failure.
        message: String,
    },

    // === Admin Errors ===
    /// The admin password did not match.
    #[error("incorrect admin password")]
    Unauthorized,

    /// An internal error occurred (bug).
    #[error("internal error: {0}")]
    Internal(String),
}

/// A specialized Result type for flightbook operations.
pub type Result<T> = std::result::Result<T, Error>;

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Self::ConfigLoad(Box::new(err))
    }
}

impl Error {
    /// Create a new internal error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Create a configuration validation error.
    #[must_use]
    pub fn config_validation(message: impl Into<String>) -> Self {
        Self::ConfigValidation {
            message: message.into(),
        }
    }

    /// Check if this error is an admin authentication failure.
    #[must_use]
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized)
    }

    /// Check if this error came from the persistence layer.
    #[must_use]
    pub fn is_storage_error(&self) -> bool {
        matches!(
            self,
            Self::FileRead { .. }
                | Self::FileWrite { .. }
                | Self::Json { .. }
                | Self::DirectoryCreate { .. }
                | Self::Io(_)
                | Self::DatabaseOpen { .. }
                | Self::DatabaseQuery(_)
                | Self::DatabaseMigration { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unauthorized_display() {
        let err = Error::Unauthorized;
        assert_eq!(err.to_string(), "incorrect admin password");
        assert!(err.is_unauthorized());
        assert!(!err.is_storage_error());
    }

    #[test]
    fn test_internal_error() {
        let err = Error::internal("lock poisoned");
        assert_eq!(err.to_string(), "internal error: lock poisoned");
    }

    #[test]
    fn test_config_validation_error_display() {
        let err = Error::config_validation("bookings_file must not be empty");
        assert!(err.to_string().contains("bookings_file"));
        assert!(!err.is_storage_error());
    }

    #[test]
    fn test_file_write_error_display() {
        let err = Error::FileWrite {
            path: PathBuf::from("/readonly/bookings.json"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        let msg = err.to_string();
        assert!(msg.contains("/readonly/bookings.json"));
        assert!(msg.contains("denied"));
        assert!(err.is_storage_error());
    }

    #[test]
    fn test_json_error_display() {
        let source = serde_json::from_str::<i32>("not json").unwrap_err();
        let err = Error::Json {
            path: PathBuf::from("flights.json"),
            source,
        };
        assert!(err.to_string().contains("flights.json"));
        assert!(err.is_storage_error());
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(err.to_string().contains("file not found"));
    }

    #[test]
    fn test_from_rusqlite_error() {
        let result = rusqlite::Connection::open_with_flags(
            "/nonexistent/path/db.sqlite",
            rusqlite::OpenFlags::SQLITE_OPEN_READ_ONLY,
        );
        if let Err(sqlite_err) = result {
            let err: Error = sqlite_err.into();
            assert!(matches!(err, Error::DatabaseQuery(_)));
        }
    }

    #[test]
    fn test_database_migration_error_display() {
        let err = Error::DatabaseMigration {
            message: "version mismatch".to_string(),
        };
        assert!(err.to_string().contains("version mismatch"));
    }
}
