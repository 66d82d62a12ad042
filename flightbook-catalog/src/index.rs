use std::collections::HashMap;

/// Inverted index from a flight leg (origin, destination) to the positions
/// of the bookings that fly it, in insertion order.
///
/// Keyed origin-first so that lookups can borrow `&str` keys instead of
/// building an owned tuple per query.
#[derive(Debug, Default)]
pub struct LegIndex {
    by_origin: HashMap<String, HashMap<String, Vec<usize>>>,
    leg_count: usize,
}

impl LegIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `position` under the leg `from -> to`.
    pub fn insert(&mut self, from: &str, to: &str, position: usize) {
        let destinations = self.by_origin.entry(from.to_string()).or_default();
        let bucket = destinations.entry(to.to_string()).or_insert_with(|| {
            self.leg_count += 1;
            Vec::new()
        });
        bucket.push(position);
    }

    /// Positions registered under `from -> to`; empty when the leg is unknown.
    pub fn positions(&self, from: &str, to: &str) -> &[usize] {
        self.by_origin
            .get(from)
            .and_then(|destinations| destinations.get(to))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Number of distinct legs with at least one booking.
    pub fn leg_count(&self) -> usize {
        self.leg_count
    }
}
