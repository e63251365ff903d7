use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use video_desk_core::VIDEO_COLLECTION;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Server host to bind to.
    pub host: String,
    /// Server port to bind to.
    pub port: u16,
    /// Document collection holding the video records.
    pub collection: String,
    /// Event bus channel capacity.
    pub event_bus_capacity: usize,
    /// Largest accepted request body, in bytes.
    pub max_body_bytes: usize,
    /// Log level (e.g., "info", "debug", "trace").
    pub log_level: String,
    /// Optional JSON array of documents loaded into the store at startup.
    pub seed_file: Option<PathBuf>,
}

#[derive(Debug, thiserror::Error)]
#[error("{name} must be a valid {expected}, got {value:?}")]
pub struct ConfigError {
    name: &'static str,
    expected: &'static str,
    value: String,
}

impl AppConfig {
    /// Load configuration from environment variables with sensible defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        Ok(Self {
            host: lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port: parse_var(&lookup, "PORT", 3030, "u16")?,
            collection: lookup("VIDEO_COLLECTION").unwrap_or_else(|| VIDEO_COLLECTION.to_string()),
            event_bus_capacity: parse_var(&lookup, "EVENT_BUS_CAPACITY", 1024, "usize")?,
            max_body_bytes: parse_var(&lookup, "MAX_BODY_BYTES", 64 * 1024, "usize")?,
            log_level: lookup("LOG_LEVEL").unwrap_or_else(|| "info".to_string()),
            seed_file: lookup("SEED_FILE")
                .filter(|path| !path.is_empty())
                .map(PathBuf::from),
        })
    }

    /// Build the socket address string.
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_var<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &'static str,
    default: T,
    expected: &'static str,
) -> Result<T, ConfigError> {
    match lookup(name) {
        None => Ok(default),
        Some(value) => value.trim().parse().map_err(|_| ConfigError {
            name,
            expected,
            value,
        }),
    }
}
