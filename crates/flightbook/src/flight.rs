//! Core flight record type.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Format used for departure times entered through the admin tools.
pub const DEPARTURE_FORMAT: &str = "%Y-%m-%d %H:%M";

/// A bookable flight.
///
/// The departure time is kept exactly as entered; [`Flight::departure`]
/// interprets it when it follows [`DEPARTURE_FORMAT`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Flight {
    /// Flight code, e.g. `LA123`.
    pub code: String,

    /// Where the flight is going.
    pub destination: String,

    /// When the flight leaves.
    pub date_time: String,
}

impl Flight {
    /// Create a new flight record.
    #[must_use]
    pub fn new(
        code: impl Into<String>,
        destination: impl Into<String>,
        date_time: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            destination: destination.into(),
            date_time: date_time.into(),
        }
    }

    /// Parse the departure time, if it is in [`DEPARTURE_FORMAT`].
    #[must_use]
    pub fn departure(&self) -> Option<NaiveDateTime> {
        NaiveDateTime::parse_from_str(self.date_time.trim(), DEPARTURE_FORMAT).ok()
    }

    /// Check that code, destination and departure are all filled in.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        [&self.code, &self.destination, &self.date_time]
            .iter()
            .all(|field| !field.trim().is_empty())
    }
}

impl std::fmt::Display for Flight {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {} at {}", self.code, self.destination, self.date_time)
    }
}

/// The catalog used when nothing has been persisted yet.
#[must_use]
pub fn default_flights() -> Vec<Flight> {
    vec![
        Flight::new("LA123", "Los Angeles", "2025-05-01 10:00"),
        Flight::new("TX456", "Texas", "2025-05-02 14:30"),
        Flight::new("NY789", "New York", "2025-05-03 18:00"),
    ]
}
