use flightbook_catalog::BookingCatalog;
use flightbook_core::Booking;
use serde::Serialize;

use crate::app_config::{OutputFormat, QueryConfig};

/// The bookings returned by one query.
#[derive(Debug, Serialize)]
pub struct QueryReport<'a> {
    pub query: String,
    pub bookings: Vec<&'a Booking>,
}

/// Run each query in order against the catalog.
pub fn run_queries<'a>(catalog: &'a BookingCatalog, queries: &[QueryConfig]) -> Vec<QueryReport<'a>> {
    queries
        .iter()
        .map(|query| {
            let bookings: Vec<&Booking> = match query {
                QueryConfig::DepartsBefore { before } => {
                    catalog.select_by_latest_departure(*before).collect()
                }
                QueryConfig::SequentialPair { from, to } => {
                    catalog.select_by_sequential_airport_pair(from, to).collect()
                }
            };
            tracing::info!("{}: {} matches", query, bookings.len());

            QueryReport {
                query: query.to_string(),
                bookings,
            }
        })
        .collect()
}

pub fn render(reports: &[QueryReport<'_>], format: OutputFormat) -> Result<String, serde_json::Error> {
    match format {
        OutputFormat::Json => serde_json::to_string_pretty(reports),
        OutputFormat::Text => Ok(render_text(reports)),
    }
}

fn render_text(reports: &[QueryReport<'_>]) -> String {
    let mut out = String::new();
    for (n, report) in reports.iter().enumerate() {
        out.push_str(&format!("{}. {}\n", n + 1, report.query));
        for booking in &report.bookings {
            out.push_str(&format!("{}\n", booking));
        }
    }
    out
}
