pub mod app_config;
pub mod loader;
pub mod report;

pub use app_config::{Config, OutputFormat, QueryConfig};
pub use loader::{BookingLoader, LoadError};
pub use report::{render, run_queries, QueryReport};
