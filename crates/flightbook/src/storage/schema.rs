//! `SQLite` schema definitions for flightbook.

/// SQL statement to create the flights table.
///
/// `position` preserves catalog order. Codes are deliberately not unique here;
/// the catalog decides whether duplicates are allowed.
pub const CREATE_FLIGHTS_TABLE: &str = r"
CREATE TABLE IF NOT EXISTS flights (
    position INTEGER PRIMARY KEY,
    code TEXT NOT NULL,
    destination TEXT NOT NULL,
    date_time TEXT NOT NULL
)
";

/// SQL statement to create the bookings table, one row per passenger.
pub const CREATE_BOOKINGS_TABLE: &str = r"
CREATE TABLE IF NOT EXISTS bookings (
    name TEXT PRIMARY KEY,
    flight_code TEXT NOT NULL
)
";

/// SQL statement to create an index on `flight_code` for reference checks.
pub const CREATE_FLIGHT_CODE_INDEX: &str = r"
CREATE INDEX IF NOT EXISTS idx_bookings_flight_code ON bookings(flight_code)
";

/// SQL statement to create the metadata table for storing key-value pairs.
pub const CREATE_METADATA_TABLE: &str = r"
CREATE TABLE IF NOT EXISTS metadata (
    key TEXT PRIMARY KEY,
    value TEXT NOT NULL
)
";

/// All schema creation statements in order.
pub const SCHEMA_STATEMENTS: &[&str] = &[
    CREATE_FLIGHTS_TABLE,
    CREATE_BOOKINGS_TABLE,
    CREATE_FLIGHT_CODE_INDEX,
    CREATE_METADATA_TABLE,
];
