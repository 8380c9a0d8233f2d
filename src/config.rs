//! ==============================================================================
//! config.rs - Runtime Configuration Loader
//! ==============================================================================
//!
//! purpose:
//!     defines the schema for `dashboard.toml`.
//!     loads configuration from file or falls back to defaults.
//!
//! structure:
//!     - SimulationConfig: tick interval, temperature range, autostart.
//!     - ServerConfig: where the dashboard is served.
//!     - LoggingConfig: log level and per-reading output.
//!
//! every section is optional in the file; missing sections take defaults.
//!
//! ==============================================================================

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;
use tracing::{info, warn};

use crate::source::{DEFAULT_MAX_TEMPERATURE, DEFAULT_MIN_TEMPERATURE};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("simulation.interval_seconds must be greater than zero")]
    ZeroInterval,

    #[error("simulation.min_temperature ({min}) must be below max_temperature ({max})")]
    InvalidRange { min: f64, max: f64 },

    #[error("simulation temperature range {min}..={max} must be finite")]
    NonFiniteRange { min: f64, max: f64 },
}

/// environment variable naming an explicit config file
pub const CONFIG_ENV: &str = "SENSOR_DASHBOARD_CONFIG";

/// where the active configuration came from
#[derive(Debug)]
pub enum ConfigOrigin {
    File(PathBuf),
    Invalid { path: PathBuf, error: ConfigError },
    Defaults,
}

impl ConfigOrigin {
    pub fn log(&self) {
        match self {
            Self::File(path) => info!("[CONFIG] Loaded from {}", path.display()),
            Self::Invalid { path, error } => {
                warn!("[CONFIG] Failed to load {}: {} - using defaults", path.display(), error)
            }
            Self::Defaults => warn!("[CONFIG] No config file found - using defaults"),
        }
    }
}

/// Root configuration structure
#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
pub struct DashboardConfig {
    #[serde(default)]
    pub simulation: SimulationConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct SimulationConfig {
    pub interval_seconds: u64,
    pub min_temperature: f64,
    pub max_temperature: f64,
    /// start generating as soon as the process is up
    pub autostart: bool,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            interval_seconds: 2,
            min_temperature: DEFAULT_MIN_TEMPERATURE,
            max_temperature: DEFAULT_MAX_TEMPERATURE,
            autostart: false,
        }
    }
}

impl SimulationConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_seconds)
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct ServerConfig {
    pub bind: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "0.0.0.0:3000".to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub show_readings: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            show_readings: true,
        }
    }
}

impl DashboardConfig {
    /// Load configuration from file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&content)
    }

    /// Parse and validate a TOML document
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let config: DashboardConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.simulation.interval_seconds == 0 {
            return Err(ConfigError::ZeroInterval);
        }
        let (min, max) = (self.simulation.min_temperature, self.simulation.max_temperature);
        if !min.is_finite() || !max.is_finite() || !(max - min).is_finite() {
            return Err(ConfigError::NonFiniteRange { min, max });
        }
        if min >= max {
            return Err(ConfigError::InvalidRange { min, max });
        }
        Ok(())
    }

    /// Locate and load the config file without logging
    ///
    /// see [`DashboardConfig::search_paths`] for the order. the first existing
    /// file wins; if it fails to load, defaults are used and the failure is
    /// reported in the origin.
    pub fn discover() -> (Self, ConfigOrigin) {
        Self::discover_in(Self::search_paths())
    }

    /// `SENSOR_DASHBOARD_CONFIG` (when set), `config/dashboard.toml`,
    /// `../config/dashboard.toml`
    pub fn search_paths() -> Vec<PathBuf> {
        let mut paths = Vec::with_capacity(3);
        if let Some(path) = std::env::var_os(CONFIG_ENV) {
            paths.push(PathBuf::from(path));
        }
        paths.push(PathBuf::from("config").join("dashboard.toml"));
        paths.push(PathBuf::from("..").join("config").join("dashboard.toml"));
        paths
    }

    fn discover_in(paths: Vec<PathBuf>) -> (Self, ConfigOrigin) {
        match paths.into_iter().find(|p| p.exists()) {
            Some(path) => match Self::load(&path) {
                Ok(config) => (config, ConfigOrigin::File(path)),
                Err(error) => (Self::default(), ConfigOrigin::Invalid { path, error }),
            },
            None => (Self::default(), ConfigOrigin::Defaults),
        }
    }

    /// Log configuration summary
    pub fn log_summary(&self) {
        info!(
            interval_s = self.simulation.interval_seconds,
            min = self.simulation.min_temperature,
            max = self.simulation.max_temperature,
            autostart = self.simulation.autostart,
            bind = %self.server.bind,
            log_level = %self.logging.level,
            "[CONFIG] active configuration"
        );
    }
}
