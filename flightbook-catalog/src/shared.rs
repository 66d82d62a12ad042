use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::{DateTime, Utc};
use flightbook_core::Booking;

use crate::catalog::{BookingCatalog, CatalogError};

/// Cloneable handle to a [`BookingCatalog`] shared between threads.
///
/// One `add` holds the write lock for the collection append and every bucket
/// append, so readers never observe a booking that is only half indexed.
/// Queries share the read lock and hand back owned snapshots.
#[derive(Debug, Clone, Default)]
pub struct SharedCatalog {
    inner: Arc<RwLock<BookingCatalog>>,
}

impl SharedCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&self, booking: Booking) -> Result<(), CatalogError> {
        self.write().add(booking).map(|_| ())
    }

    /// Run `f` against the catalog under the read lock.
    pub fn read<R>(&self, f: impl FnOnce(&BookingCatalog) -> R) -> R {
        let guard = self.lock_read();
        f(&*guard)
    }

    pub fn departed_before(&self, before: DateTime<Utc>) -> Vec<Booking> {
        self.read(|catalog| catalog.select_by_latest_departure(before).cloned().collect())
    }

    pub fn with_leg(&self, from: &str, to: &str) -> Vec<Booking> {
        self.read(|catalog| {
            catalog
                .select_by_sequential_airport_pair(from, to)
                .cloned()
                .collect()
        })
    }

    pub fn len(&self) -> usize {
        self.read(BookingCatalog::len)
    }

    pub fn is_empty(&self) -> bool {
        self.read(BookingCatalog::is_empty)
    }

    // `add` validates before it mutates, so a poisoned lock still guards a
    // consistent catalog.
    fn lock_read(&self) -> RwLockReadGuard<'_, BookingCatalog> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, BookingCatalog> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl From<BookingCatalog> for SharedCatalog {
    fn from(catalog: BookingCatalog) -> Self {
        Self {
            inner: Arc::new(RwLock::new(catalog)),
        }
    }
}
