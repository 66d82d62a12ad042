use std::fs;
use std::path::Path;

use chrono::{DateTime, NaiveDateTime, Utc};
use flightbook_catalog::{BookingCatalog, CatalogError};
use flightbook_core::booking::ITINERARY_SEPARATOR;
use flightbook_core::{validate_airport_code, Booking, CoreError};

/// Departure format of the booking files, e.g. `Jun-04 11:04 2020`.
pub const DEFAULT_DATE_FORMAT: &str = "%b-%d %H:%M %Y";

const FIELD_SEPARATOR: char = ',';
const COMMENT_PREFIX: char = '#';

/// Reads bookings written one per line as
/// `name, departure, AAA->BBB->CCC` and feeds them into a catalog.
///
/// Departures are read with `date_format` and taken to be UTC.
#[derive(Debug, Clone)]
pub struct BookingLoader {
    date_format: String,
}

impl BookingLoader {
    pub fn new(date_format: impl Into<String>) -> Self {
        Self {
            date_format: date_format.into(),
        }
    }

    /// Load every booking in `path` into `catalog`, returning how many were added.
    pub fn load_file(&self, path: &Path, catalog: &mut BookingCatalog) -> Result<usize, LoadError> {
        let contents = fs::read_to_string(path).map_err(|source| LoadError::Io {
            path: path.display().to_string(),
            source,
        })?;
        self.load_str(&contents, catalog)
    }

    /// Load bookings from text. Blank lines and `#` comments are skipped.
    ///
    /// Stops at the first bad line; bookings before it stay in the catalog.
    pub fn load_str(&self, contents: &str, catalog: &mut BookingCatalog) -> Result<usize, LoadError> {
        let mut added = 0;

        for (idx, raw) in contents.lines().enumerate() {
            let line = idx + 1;
            let trimmed = raw.trim();
            if trimmed.is_empty() || trimmed.starts_with(COMMENT_PREFIX) {
                continue;
            }

            let booking = self.parse_line(line, trimmed)?;
            catalog
                .add(booking)
                .map_err(|source| LoadError::Catalog { line, source })?;
            added += 1;
        }

        tracing::info!("Loaded {} bookings", added);
        Ok(added)
    }

    /// Parse a single booking line. `line` is only used for error reporting.
    pub fn parse_line(&self, line: usize, text: &str) -> Result<Booking, LoadError> {
        let fields: Vec<&str> = text.split(FIELD_SEPARATOR).map(str::trim).collect();
        let [name, departure, itinerary] = fields.as_slice() else {
            return Err(LoadError::MalformedLine {
                line,
                reason: format!("expected 3 comma-separated fields, found {}", fields.len()),
            });
        };

        if name.is_empty() {
            return Err(LoadError::MalformedLine {
                line,
                reason: "passenger name is empty".to_string(),
            });
        }

        let departure = self
            .parse_departure(departure)
            .map_err(|source| LoadError::InvalidDeparture {
                line,
                value: departure.to_string(),
                source,
            })?;

        let itinerary = itinerary
            .split(ITINERARY_SEPARATOR)
            .map(|code| {
                let code = code.trim();
                validate_airport_code(code)
                    .map(|_| code.to_string())
                    .map_err(|source| LoadError::InvalidAirport { line, source })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Booking::new(*name, departure, itinerary))
    }

    pub fn parse_departure(&self, value: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
        NaiveDateTime::parse_from_str(value, &self.date_format).map(|naive| naive.and_utc())
    }
}

impl Default for BookingLoader {
    fn default() -> Self {
        Self::new(DEFAULT_DATE_FORMAT)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("Line {line}: {reason}")]
    MalformedLine {
        line: usize,
        reason: String,
    },

    #[error("Line {line}: invalid departure '{value}': {source}")]
    InvalidDeparture {
        line: usize,
        value: String,
        source: chrono::ParseError,
    },

    #[error("Line {line}: {source}")]
    InvalidAirport {
        line: usize,
        source: CoreError,
    },

    #[error("Line {line}: {source}")]
    Catalog {
        line: usize,
        source: CatalogError,
    },
}
