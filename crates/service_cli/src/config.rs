//! Pipeline configuration management
//!
//! Handles loading configuration from TOML files, `EEP_*` environment
//! variables, and CLI arguments.

use std::path::{Path, PathBuf};
use std::str::FromStr;

use pricer_core::types::time::ISO_DATE_FORMAT;
use pricer_pricing::{EepConfig, FdConfig};
use pricer_risk::batch::{BatchConfig, SpotBasis};
use pricer_risk::parallel::{ParallelConfig, DEFAULT_BATCH_SIZE, DEFAULT_PARALLEL_THRESHOLD};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Config file picked up from the working directory when `--config` is not
/// given.
pub const DEFAULT_CONFIG_FILE: &str = "eep.toml";

/// Prefix of every environment override.
pub const ENV_PREFIX: &str = "EEP_";

/// Configuration error types
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    #[error("Invalid value for {name}: {value}")]
    InvalidValue { name: String, value: String },

    #[error("Configuration file error: {0}")]
    FileError(String),
}

/// Log levels supported by the CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl FromStr for LogLevel {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            _ => Err(ConfigError::InvalidLogLevel(s.to_string())),
        }
    }
}

impl LogLevel {
    /// Convert log level to tracing filter string
    pub fn as_filter_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_filter_str())
    }
}

/// Pipeline configuration structure
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Log level used when `RUST_LOG` is unset
    pub log_level: LogLevel,
    /// Worker threads (omit for one per logical CPU)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub workers: Option<usize>,
    /// Rows per parallel chunk
    pub batch_size: usize,
    /// Row count from which the worker pool is used
    pub parallel_threshold: usize,
    /// Spot steps `M` of the EEP grid
    pub space_steps: usize,
    /// Time steps `N` of the EEP grid
    pub time_steps: usize,
    /// PSOR over-relaxation factor
    pub omega: f64,
    /// PSOR stopping tolerance
    pub tolerance: f64,
    /// PSOR sweep cap per time step
    pub max_sweeps: usize,
    /// Rate file quotes percentages rather than decimals
    pub rates_in_percent: bool,
    /// chrono format of the observation `date` column
    pub date_format: String,
    /// chrono format of the rate file `Date` column
    pub rate_date_format: String,
    /// Spot fed to the implied-vol inversion
    pub spot_basis: SpotBasis,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        let eep = EepConfig::default();
        Self {
            log_level: LogLevel::Info,
            workers: None,
            batch_size: DEFAULT_BATCH_SIZE,
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
            space_steps: eep.space_steps,
            time_steps: eep.time_steps,
            omega: eep.fd.omega,
            tolerance: eep.fd.tolerance,
            max_sweeps: eep.fd.max_sweeps,
            rates_in_percent: true,
            date_format: ISO_DATE_FORMAT.to_string(),
            rate_date_format: ISO_DATE_FORMAT.to_string(),
            spot_basis: SpotBasis::Adjusted,
        }
    }
}

impl PipelineConfig {
    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileError(format!("Failed to read config file: {}", e)))?;

        let config: PipelineConfig = toml::from_str(&content)
            .map_err(|e| ConfigError::FileError(format!("Failed to parse TOML: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Apply `EEP_*` overrides read through `lookup`
    ///
    /// Only keys present in the lookup are touched.
    pub fn apply_env_with<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(&format!("{}{}", ENV_PREFIX, name));

        if let Some(level) = var("LOG_LEVEL") {
            self.log_level = LogLevel::from_str(&level)?;
        }
        if let Some(workers) = var("WORKERS") {
            self.workers = Some(parse_value("EEP_WORKERS", &workers)?);
        }
        if let Some(size) = var("BATCH_SIZE") {
            self.batch_size = parse_value("EEP_BATCH_SIZE", &size)?;
        }
        if let Some(threshold) = var("PARALLEL_THRESHOLD") {
            self.parallel_threshold = parse_value("EEP_PARALLEL_THRESHOLD", &threshold)?;
        }
        if let Some(steps) = var("SPACE_STEPS") {
            self.space_steps = parse_value("EEP_SPACE_STEPS", &steps)?;
        }
        if let Some(steps) = var("TIME_STEPS") {
            self.time_steps = parse_value("EEP_TIME_STEPS", &steps)?;
        }
        if let Some(omega) = var("OMEGA") {
            self.omega = parse_value("EEP_OMEGA", &omega)?;
        }
        if let Some(tolerance) = var("TOLERANCE") {
            self.tolerance = parse_value("EEP_TOLERANCE", &tolerance)?;
        }
        if let Some(sweeps) = var("MAX_SWEEPS") {
            self.max_sweeps = parse_value("EEP_MAX_SWEEPS", &sweeps)?;
        }
        if let Some(percent) = var("RATES_IN_PERCENT") {
            self.rates_in_percent = percent.to_lowercase() == "true";
        }
        if let Some(format) = var("DATE_FORMAT") {
            self.date_format = format;
        }
        if let Some(format) = var("RATE_DATE_FORMAT") {
            self.rate_date_format = format;
        }
        if let Some(basis) = var("SPOT_BASIS") {
            self.spot_basis = parse_spot_basis(&basis)?;
        }
        Ok(())
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.batch_size == 0 {
            return Err(ConfigError::InvalidValue {
                name: "batch_size".to_string(),
                value: "must be at least 1".to_string(),
            });
        }
        self.eep_config()
            .validate()
            .map_err(|e| ConfigError::InvalidValue {
                name: "grid".to_string(),
                value: e.to_string(),
            })
    }

    /// Merge with CLI arguments (CLI takes precedence)
    pub fn merge_with_cli(&mut self, cli: &CliArgs) -> Result<(), ConfigError> {
        if let Some(log_level) = &cli.log_level {
            self.log_level = LogLevel::from_str(log_level)?;
        }
        if let Some(workers) = cli.workers {
            self.workers = Some(workers);
        }
        if let Some(steps) = cli.space_steps {
            self.space_steps = steps;
        }
        if let Some(steps) = cli.time_steps {
            self.time_steps = steps;
        }
        if let Some(percent) = cli.rates_in_percent {
            self.rates_in_percent = percent;
        }
        Ok(())
    }

    /// Grid and PSOR settings
    pub fn eep_config(&self) -> EepConfig {
        EepConfig::default()
            .with_grid(self.space_steps, self.time_steps)
            .with_fd(
                FdConfig::default()
                    .with_omega(self.omega)
                    .with_tolerance(self.tolerance)
                    .with_max_sweeps(self.max_sweeps),
            )
    }

    /// Worker pool settings
    pub fn parallel_config(&self) -> ParallelConfig {
        let config = ParallelConfig::new(self.batch_size, self.parallel_threshold);
        match self.workers {
            Some(n) => config.with_num_threads(n),
            None => config,
        }
    }

    /// Full batch configuration
    pub fn batch_config(&self) -> BatchConfig {
        BatchConfig::default()
            .with_eep(self.eep_config())
            .with_parallel(self.parallel_config())
            .with_spot_basis(self.spot_basis)
    }
}

fn parse_value<T: FromStr>(name: &str, raw: &str) -> Result<T, ConfigError> {
    raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
        name: name.to_string(),
        value: raw.to_string(),
    })
}

fn parse_spot_basis(raw: &str) -> Result<SpotBasis, ConfigError> {
    match raw.trim().to_lowercase().as_str() {
        "adjusted" => Ok(SpotBasis::Adjusted),
        "raw" => Ok(SpotBasis::Raw),
        _ => Err(ConfigError::InvalidValue {
            name: "spot_basis".to_string(),
            value: format!("{} (expected adjusted or raw)", raw),
        }),
    }
}

/// CLI arguments structure
#[derive(Debug, Clone, Default)]
pub struct CliArgs {
    /// Config file path
    pub config_file: Option<PathBuf>,
    /// Log level override
    pub log_level: Option<String>,
    /// Worker count override
    pub workers: Option<usize>,
    /// Spot steps override
    pub space_steps: Option<usize>,
    /// Time steps override
    pub time_steps: Option<usize>,
    /// Percent quoting override for the rate file
    pub rates_in_percent: Option<bool>,
}

/// Build configuration from all sources
///
/// Priority (highest to lowest):
/// 1. CLI arguments
/// 2. Environment variables
/// 3. Config file (explicit, or `eep.toml` in the working directory)
/// 4. Default values
pub fn build_config(cli: &CliArgs) -> Result<PipelineConfig, ConfigError> {
    build_config_with(cli, |key| std::env::var(key).ok())
}

/// [`build_config`] with an injectable environment lookup
pub fn build_config_with<F>(cli: &CliArgs, env: F) -> Result<PipelineConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let default_file = Path::new(DEFAULT_CONFIG_FILE);
    let mut config = match &cli.config_file {
        Some(path) => PipelineConfig::from_file(path)?,
        None if default_file.exists() => PipelineConfig::from_file(default_file)?,
        None => PipelineConfig::default(),
    };

    config.apply_env_with(env)?;
    config.merge_with_cli(cli)?;
    config.validate()?;

    Ok(config)
}
