pub mod booking;
pub mod iata;

pub use booking::Booking;
pub use iata::validate_airport_code;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Validation failed: {0}")]
    ValidationError(String),
}

pub type CoreResult<T> = Result<T, CoreError>;
