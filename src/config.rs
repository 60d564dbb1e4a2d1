//! Configuration management for segroute
//!
//! Parses TOML configuration files and provides typed access to settings.

use crate::error::{AppError, AppResult};
use crate::metrics::channel::DEFAULT_CHANNEL_CAPACITY;
use crate::metrics::pool::DEFAULT_MAX_IDLE;
use serde::{Deserialize, Serialize};
use std::net::IpAddr;
use std::path::Path;
use std::str::FromStr;

/// Upper bound for both metrics sizing knobs
const MAX_METRICS_SLOTS: usize = 1_000_000;

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Root configuration structure
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub server: ServerConfig,
    #[serde(default)]
    pub metrics: MetricsConfig,
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

/// Server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// Metrics pipeline sizing
///
/// Fields are private and checked by [`MetricsConfig::new`], which also
/// runs at parse time, so an out-of-range value never survives
/// deserialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(try_from = "RawMetricsConfig")]
pub struct MetricsConfig {
    /// Bounded capacity of the timing channel
    channel_capacity: usize,
    /// Idle records kept in the pool for reuse
    pool_max_idle: usize,
}

#[derive(Deserialize)]
struct RawMetricsConfig {
    #[serde(default = "default_channel_capacity")]
    channel_capacity: usize,
    #[serde(default = "default_pool_max_idle")]
    pool_max_idle: usize,
}

impl TryFrom<RawMetricsConfig> for MetricsConfig {
    type Error = AppError;

    fn try_from(raw: RawMetricsConfig) -> Result<Self, Self::Error> {
        Self::new(raw.channel_capacity, raw.pool_max_idle)
    }
}

fn default_channel_capacity() -> usize {
    DEFAULT_CHANNEL_CAPACITY
}

fn default_pool_max_idle() -> usize {
    DEFAULT_MAX_IDLE
}

impl MetricsConfig {
    /// Create a validated metrics configuration
    ///
    /// # Errors
    ///
    /// Returns an error if `channel_capacity` is zero, or if either value
    /// exceeds 1,000,000.
    pub fn new(channel_capacity: usize, pool_max_idle: usize) -> AppResult<Self> {
        if channel_capacity == 0 {
            return Err(AppError::Config(
                "metrics.channel_capacity must be greater than 0".to_string(),
            ));
        }
        if channel_capacity > MAX_METRICS_SLOTS {
            return Err(AppError::Config(format!(
                "metrics.channel_capacity cannot exceed {}, got {}",
                MAX_METRICS_SLOTS, channel_capacity
            )));
        }
        if pool_max_idle > MAX_METRICS_SLOTS {
            return Err(AppError::Config(format!(
                "metrics.pool_max_idle cannot exceed {}, got {}",
                MAX_METRICS_SLOTS, pool_max_idle
            )));
        }
        Ok(Self {
            channel_capacity,
            pool_max_idle,
        })
    }

    /// Bounded capacity of the timing channel
    pub fn channel_capacity(&self) -> usize {
        self.channel_capacity
    }

    /// Idle records kept in the pool for reuse
    pub fn pool_max_idle(&self) -> usize {
        self.pool_max_idle
    }
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            channel_capacity: DEFAULT_CHANNEL_CAPACITY,
            pool_max_idle: DEFAULT_MAX_IDLE,
        }
    }
}

/// Observability configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ObservabilityConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> AppResult<Self> {
        let path_display = path.as_ref().display().to_string();

        let content = std::fs::read_to_string(path.as_ref()).map_err(|source| {
            AppError::ConfigFileRead {
                path: path_display.clone(),
                source,
            }
        })?;

        let config: Self =
            toml::from_str(&content).map_err(|source| AppError::ConfigParseFailed {
                path: path_display.clone(),
                source,
            })?;

        config
            .validate()
            .map_err(|e| AppError::ConfigValidationFailed {
                path: path_display,
                reason: e.to_string(),
            })?;

        Ok(config)
    }

    /// Validate configuration after parsing
    ///
    /// This is called automatically by `from_file()` and `from_str()`, but can
    /// also be called explicitly when constructing Config by hand.
    pub fn validate(&self) -> AppResult<()> {
        if self.server.host.parse::<IpAddr>().is_err() {
            return Err(AppError::Config(format!(
                "server.host must be an IP address, got '{}'",
                self.server.host
            )));
        }

        if !LOG_LEVELS.contains(&self.observability.log_level.as_str()) {
            return Err(AppError::Config(format!(
                "observability.log_level must be one of {:?}, got '{}'",
                LOG_LEVELS, self.observability.log_level
            )));
        }

        Ok(())
    }

    /// Parsed bind address for the server
    pub fn host_addr(&self) -> AppResult<IpAddr> {
        self.server.host.parse().map_err(|_| {
            AppError::Config(format!("invalid server.host '{}'", self.server.host))
        })
    }
}

impl FromStr for Config {
    type Err = AppError;

    fn from_str(toml_str: &str) -> Result<Self, Self::Err> {
        let config: Config =
            toml::from_str(toml_str).map_err(|source| AppError::ConfigParseFailed {
                path: "<string>".to_string(),
                source,
            })?;

        config.validate()?;
        Ok(config)
    }
}
