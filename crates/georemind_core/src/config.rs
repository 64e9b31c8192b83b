//! Environment-driven core configuration.
//!
//! # Invariants
//! - Blank variables fall back to defaults.
//! - Invalid values are reported, never silently replaced.

use crate::geofence::request::DEFAULT_GEOFENCE_RADIUS_METERS;
use crate::logging::{default_log_level, LogLevel};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

pub const ENV_DB_PATH: &str = "GEOREMIND_DB_PATH";
pub const ENV_LOG_LEVEL: &str = "GEOREMIND_LOG_LEVEL";
pub const ENV_LOG_DIR: &str = "GEOREMIND_LOG_DIR";
pub const ENV_GEOFENCE_RADIUS_M: &str = "GEOREMIND_GEOFENCE_RADIUS_M";

const DEFAULT_DB_FILE_NAME: &str = "georemind.sqlite3";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    InvalidValue {
        key: &'static str,
        value: String,
        reason: String,
    },
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidValue { key, value, reason } => {
                write!(f, "invalid {key} value `{value}`: {reason}")
            }
        }
    }
}

impl Error for ConfigError {}

/// Settings shared by the FFI surface and the CLI.
#[derive(Debug, Clone, PartialEq)]
pub struct CoreConfig {
    pub db_path: PathBuf,
    pub log_level: LogLevel,
    /// Logging stays off when unset.
    pub log_dir: Option<PathBuf>,
    pub geofence_radius_meters: f32,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            db_path: std::env::temp_dir().join(DEFAULT_DB_FILE_NAME),
            log_level: default_log_level(),
            log_dir: None,
            geofence_radius_meters: DEFAULT_GEOFENCE_RADIUS_METERS,
        }
    }
}

impl CoreConfig {
    /// Reads configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads configuration through `lookup`, which maps variable names to
    /// raw values.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let read = |key: &str| {
            lookup(key)
                .map(|raw| raw.trim().to_string())
                .filter(|value| !value.is_empty())
        };
        let mut config = Self::default();

        if let Some(path) = read(ENV_DB_PATH) {
            config.db_path = PathBuf::from(path);
        }

        if let Some(level) = read(ENV_LOG_LEVEL) {
            config.log_level =
                LogLevel::parse(&level).map_err(|reason| ConfigError::InvalidValue {
                    key: ENV_LOG_LEVEL,
                    value: level.clone(),
                    reason,
                })?;
        }

        config.log_dir = read(ENV_LOG_DIR).map(PathBuf::from);

        if let Some(radius) = read(ENV_GEOFENCE_RADIUS_M) {
            config.geofence_radius_meters = parse_radius(&radius)?;
        }

        Ok(config)
    }
}

fn parse_radius(raw: &str) -> Result<f32, ConfigError> {
    let invalid = |reason: &str| ConfigError::InvalidValue {
        key: ENV_GEOFENCE_RADIUS_M,
        value: raw.to_string(),
        reason: reason.to_string(),
    };
    let radius = raw
        .parse::<f32>()
        .map_err(|err| invalid(&err.to_string()))?;
    if !radius.is_finite() || radius <= 0.0 {
        return Err(invalid("radius must be a positive number of meters"));
    }
    Ok(radius)
}
