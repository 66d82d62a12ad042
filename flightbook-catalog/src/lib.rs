pub mod catalog;
pub mod index;
pub mod shared;

pub use catalog::{BookingCatalog, CatalogError, MAX_BOOKINGS, MAX_ITINERARY_STOPS};
pub use index::LegIndex;
pub use shared::SharedCatalog;
