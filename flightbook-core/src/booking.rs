use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Separator between airport codes when an itinerary is written out.
pub const ITINERARY_SEPARATOR: &str = "->";

/// A single flight booking.
///
/// Bookings are plain values: the catalog validates them on insertion and
/// never mutates them afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Booking {
    pub passenger_name: String,
    /// Always UTC
    pub departure: DateTime<Utc>,
    /// Ordered IATA codes, origin first
    pub itinerary: Vec<String>,
}

impl Booking {
    pub fn new(
        passenger_name: impl Into<String>,
        departure: DateTime<Utc>,
        itinerary: Vec<String>,
    ) -> Self {
        Self {
            passenger_name: passenger_name.into(),
            departure,
            itinerary,
        }
    }

    /// Adjacent airport pairs of the itinerary, one per flight leg.
    pub fn legs(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.itinerary
            .windows(2)
            .map(|pair| (pair[0].as_str(), pair[1].as_str()))
    }

    /// Linear check for `from` immediately followed by `to` in the itinerary.
    pub fn has_leg(&self, from: &str, to: &str) -> bool {
        self.legs().any(|leg| leg == (from, to))
    }
}

impl fmt::Display for Booking {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Passenger name: {}, departure: {}, itinerary: \"{}\"",
            self.passenger_name,
            self.departure.format("%Y-%m-%d %H:%M:%S"),
            self.itinerary.join(ITINERARY_SEPARATOR)
        )
    }
}
