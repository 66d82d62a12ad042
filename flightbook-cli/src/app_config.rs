use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::env;
use std::fmt;
use std::path::PathBuf;

/// Built-in defaults, layered under any config files and the environment.
pub const DEFAULT_CONFIG: &str = include_str!("../config/default.toml");

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub input: InputConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub queries: Vec<QueryConfig>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct InputConfig {
    pub path: PathBuf,
    #[serde(default = "default_date_format")]
    pub date_format: String,
}

fn default_date_format() -> String {
    crate::loader::DEFAULT_DATE_FORMAT.to_string()
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct OutputConfig {
    #[serde(default)]
    pub format: OutputFormat,
}

#[derive(Debug, Deserialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// One query to run against the loaded catalog.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum QueryConfig {
    /// RFC 3339 timestamp, exclusive
    DepartsBefore { before: DateTime<Utc> },
    SequentialPair { from: String, to: String },
}

impl fmt::Display for QueryConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryConfig::DepartsBefore { before } => {
                write!(f, "bookings departing before {}", before.format("%Y-%m-%d %H:%M:%S"))
            }
            QueryConfig::SequentialPair { from, to } => {
                write!(f, "bookings flying {}->{}", from, to)
            }
        }
    }
}

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let s = config::Config::builder()
            // Start off with the compiled-in defaults
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            // Optional per-environment file, 'development' unless RUN_MODE says otherwise
            .add_source(config::File::with_name(&format!("config/{}", run_mode)).required(false))
            // Local overrides, not checked in
            .add_source(config::File::with_name("config/local").required(false))
            // Eg.. `FLIGHTBOOK__OUTPUT__FORMAT=json`
            .add_source(config::Environment::with_prefix("FLIGHTBOOK").separator("__"))
            .build()?;

        s.try_deserialize()
    }

    /// Parse a complete configuration from TOML, without defaults or environment.
    pub fn from_toml(contents: &str) -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(config::File::from_str(contents, config::FileFormat::Toml))
            .build()?
            .try_deserialize()
    }
}
