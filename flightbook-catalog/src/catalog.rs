use std::collections::HashSet;

use chrono::{DateTime, Utc};
use flightbook_core::Booking;

use crate::index::LegIndex;

/// Longest itinerary accepted, in airports.
pub const MAX_ITINERARY_STOPS: usize = 9;

/// Most bookings a catalog will hold.
pub const MAX_BOOKINGS: usize = 1000;

/// A collection of bookings with the two lookups the schedule needs.
///
/// Bookings are kept in insertion order. Alongside them the catalog keeps a
/// [`LegIndex`] from every adjacent airport pair to the bookings flying it,
/// updated on each [`add`](Self::add). Indexing costs one bucket append per
/// leg at insertion time; in exchange a pair query is proportional to the
/// number of matches instead of rescanning every itinerary
/// (`O(n * itinerary length)`, see [`Booking::has_leg`]).
///
/// Departure queries are a plain scan. At the sizes this catalog accepts
/// that is cheaper than keeping a second, time-ordered structure.
#[derive(Debug, Default)]
pub struct BookingCatalog {
    bookings: Vec<Booking>,
    legs: LegIndex,
}

impl BookingCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a single booking to the catalog.
    ///
    /// Chainable: `catalog.add(a)?.add(b)?`. A rejected booking leaves the
    /// catalog untouched.
    pub fn add(&mut self, booking: Booking) -> Result<&mut Self, CatalogError> {
        if let Err(err) = self.check(&booking) {
            tracing::warn!("Rejected booking for {}: {}", booking.passenger_name, err);
            return Err(err);
        }

        let position = self.bookings.len();
        for (from, to) in booking.legs() {
            self.legs.insert(from, to, position);
        }
        tracing::debug!(
            "Indexed booking #{} for {} ({} legs)",
            position,
            booking.passenger_name,
            booking.itinerary.len().saturating_sub(1)
        );
        self.bookings.push(booking);

        Ok(self)
    }

    /// Bookings departing strictly before `before`, in insertion order.
    pub fn select_by_latest_departure(
        &self,
        before: DateTime<Utc>,
    ) -> impl Iterator<Item = &Booking> + '_ {
        self.bookings
            .iter()
            .filter(move |booking| booking.departure < before)
    }

    /// Bookings whose itinerary flies `from` directly to `to`, in insertion
    /// order. Unknown airports or legs yield nothing.
    pub fn select_by_sequential_airport_pair<'a>(
        &'a self,
        from: &str,
        to: &str,
    ) -> impl Iterator<Item = &'a Booking> + 'a {
        self.legs
            .positions(from, to)
            .iter()
            .map(move |&position| &self.bookings[position])
    }

    /// All bookings in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Booking> + '_ {
        self.bookings.iter()
    }

    pub fn len(&self) -> usize {
        self.bookings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bookings.is_empty()
    }

    /// Number of distinct legs flown by at least one booking.
    pub fn leg_count(&self) -> usize {
        self.legs.leg_count()
    }

    /// Validate `booking` against capacity limits and its own legs without
    /// touching any state.
    fn check(&self, booking: &Booking) -> Result<(), CatalogError> {
        if booking.itinerary.len() > MAX_ITINERARY_STOPS {
            return Err(CatalogError::ItineraryTooLong {
                stops: booking.itinerary.len(),
                limit: MAX_ITINERARY_STOPS,
            });
        }

        if self.bookings.len() >= MAX_BOOKINGS {
            return Err(CatalogError::CapacityExceeded {
                held: self.bookings.len(),
                limit: MAX_BOOKINGS,
            });
        }

        // An itinerary never flies the same directed leg twice.
        let mut seen = HashSet::new();
        for (from, to) in booking.legs() {
            if !seen.insert((from, to)) {
                return Err(CatalogError::DuplicateAdjacentPair {
                    from: from.to_string(),
                    to: to.to_string(),
                });
            }
        }

        Ok(())
    }
}

impl<'a> IntoIterator for &'a BookingCatalog {
    type Item = &'a Booking;
    type IntoIter = std::slice::Iter<'a, Booking>;

    fn into_iter(self) -> Self::IntoIter {
        self.bookings.iter()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CatalogError {
    #[error("Itinerary too long: {stops} stops, limit is {limit}")]
    ItineraryTooLong {
        stops: usize,
        limit: usize,
    },

    #[error("Catalog is full: already holds {held} bookings, limit is {limit}")]
    CapacityExceeded {
        held: usize,
        limit: usize,
    },

    #[error("Itinerary repeats the leg {from}->{to}")]
    DuplicateAdjacentPair {
        from: String,
        to: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn booking(name: &str, day: u32, itinerary: &[&str]) -> Booking {
        Booking::new(
            name,
            Utc.with_ymd_and_hms(2020, 6, day, 12, 0, 0).unwrap(),
            itinerary.iter().map(|code| code.to_string()).collect(),
        )
    }

    fn names<'a>(bookings: impl Iterator<Item = &'a Booking>) -> Vec<&'a str> {
        bookings.map(|b| b.passenger_name.as_str()).collect()
    }

    #[test]
    fn test_add_is_chainable() {
        let mut catalog = BookingCatalog::new();
        catalog
            .add(booking("Alice", 1, &["LHR", "AMS"]))
            .unwrap()
            .add(booking("Bruce", 2, &["GVA", "AMS", "LHR"]))
            .unwrap();

        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.leg_count(), 3);
    }

    #[test]
    fn test_every_leg_is_indexed() {
        let mut catalog = BookingCatalog::new();
        catalog.add(booking("Cindy", 6, &["AAL", "AMS", "LHR", "JFK", "SFO"])).unwrap();

        let cindy = catalog.iter().next().unwrap().clone();
        for (from, to) in cindy.legs() {
            assert_eq!(names(catalog.select_by_sequential_airport_pair(from, to)), vec!["Cindy"]);
        }
        // Non-adjacent and reversed pairs are not legs
        assert_eq!(catalog.select_by_sequential_airport_pair("AAL", "LHR").count(), 0);
        assert_eq!(catalog.select_by_sequential_airport_pair("SFO", "JFK").count(), 0);
    }

    #[test]
    fn test_single_stop_and_empty_itineraries_are_stored_unindexed() {
        let mut catalog = BookingCatalog::new();
        catalog.add(booking("Solo", 1, &["AMS"])).unwrap();
        catalog.add(booking("Nobody", 2, &[])).unwrap();

        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.leg_count(), 0);
    }

    #[test]
    fn test_departure_filter_is_strict() {
        let mut catalog = BookingCatalog::new();
        catalog.add(booking("Alice", 1, &["LHR", "AMS"])).unwrap();
        catalog.add(booking("Bruce", 2, &["GVA", "AMS"])).unwrap();

        let cutoff = Utc.with_ymd_and_hms(2020, 6, 2, 12, 0, 0).unwrap();
        assert_eq!(names(catalog.select_by_latest_departure(cutoff)), vec!["Alice"]);
    }

    #[test]
    fn test_queries_are_restartable() {
        let mut catalog = BookingCatalog::new();
        catalog.add(booking("Alice", 1, &["LHR", "AMS"])).unwrap();
        catalog.add(booking("Derek", 2, &["LHR", "AMS"])).unwrap();

        let first = names(catalog.select_by_sequential_airport_pair("LHR", "AMS"));
        let second = names(catalog.select_by_sequential_airport_pair("LHR", "AMS"));
        assert_eq!(first, second);
        assert_eq!(first, vec!["Alice", "Derek"]);
    }

    #[test]
    fn test_duplicate_leg_is_rejected_without_side_effects() {
        let mut catalog = BookingCatalog::new();
        catalog.add(booking("Alice", 1, &["LHR", "AMS"])).unwrap();

        let err = catalog
            .add(booking("Loop", 2, &["AMS", "LHR", "AMS", "LHR"]))
            .unwrap_err();
        assert_eq!(
            err,
            CatalogError::DuplicateAdjacentPair {
                from: "AMS".to_string(),
                to: "LHR".to_string(),
            }
        );

        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.leg_count(), 1);
        assert_eq!(catalog.select_by_sequential_airport_pair("AMS", "LHR").count(), 0);
        assert_eq!(names(catalog.select_by_sequential_airport_pair("LHR", "AMS")), vec!["Alice"]);
    }

    #[test]
    fn test_round_trip_visiting_an_airport_twice_is_allowed() {
        // Same airport twice, but never the same directed leg
        let mut catalog = BookingCatalog::new();
        catalog.add(booking("Round", 1, &["AMS", "LHR", "AMS"])).unwrap();

        assert_eq!(catalog.select_by_sequential_airport_pair("AMS", "LHR").count(), 1);
        assert_eq!(catalog.select_by_sequential_airport_pair("LHR", "AMS").count(), 1);
    }

    #[test]
    fn test_itinerary_length_boundary() {
        let codes = ["AAA", "BBB", "CCC", "DDD", "EEE", "FFF", "GGG", "HHH", "III", "JJJ"];
        let mut catalog = BookingCatalog::new();

        catalog.add(booking("Nine", 1, &codes[..9])).unwrap();
        let err = catalog.add(booking("Ten", 2, &codes)).unwrap_err();

        assert_eq!(err, CatalogError::ItineraryTooLong { stops: 10, limit: 9 });
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.leg_count(), 8);
    }

    #[test]
    fn test_booking_count_boundary() {
        let mut catalog = BookingCatalog::new();
        for i in 0..MAX_BOOKINGS {
            catalog
                .add(booking(&format!("Pax{}", i), 1, &["LHR", "AMS"]))
                .unwrap();
        }
        assert_eq!(catalog.len(), 1000);

        let err = catalog.add(booking("Late", 2, &["LHR", "AMS"])).unwrap_err();
        assert_eq!(err, CatalogError::CapacityExceeded { held: 1000, limit: 1000 });
        assert_eq!(catalog.len(), 1000);
        assert_eq!(catalog.select_by_sequential_airport_pair("LHR", "AMS").count(), 1000);
    }
}
