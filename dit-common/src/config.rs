//! Configuration loading and settings resolution
//!
//! Every setting resolves in this priority order:
//! 1. Command-line argument (highest priority)
//! 2. Environment variable
//! 3. TOML config file
//! 4. Compiled default (fallback)
//!
//! A missing TOML file is never fatal: the remaining tiers apply and the
//! caller logs a warning through [`ConfigSource::log`]. A TOML file that exists but cannot be parsed is an error.

use crate::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// File name of the merged organization dataset inside the data directory
pub const COMBINED_DATA_FILE: &str = "nccs-combined-data.json";

/// File name of the combined dataset summary inside the data directory
pub const SUMMARY_FILE: &str = "nccs-data-summary.json";

pub const ENV_DATA_DIR: &str = "DIT_DATA_DIR";
pub const ENV_OUTPUT_DIR: &str = "DIT_OUTPUT_DIR";
pub const ENV_SEED: &str = "DIT_SEED";
pub const ENV_API_PORT: &str = "DIT_API_PORT";

/// Bootstrap configuration loaded from TOML file
///
/// All fields are optional; anything left out falls through to the
/// compiled defaults.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct TomlConfig {
    /// Directory holding raw CSV tables and the combined dataset
    #[serde(default)]
    pub data_dir: Option<PathBuf>,

    /// Directory receiving the transformed JSON exports
    #[serde(default)]
    pub output_dir: Option<PathBuf>,

    /// Remote object store prefix for the CSV tables
    #[serde(default)]
    pub base_url: Option<String>,

    /// Tax years to fetch and merge, most recent first
    #[serde(default)]
    pub years: Option<Vec<i32>>,

    /// Cap on data rows read per CSV table
    #[serde(default)]
    pub max_records: Option<usize>,

    /// Cap on organizations handed to the transformer
    #[serde(default)]
    pub max_organizations: Option<usize>,

    /// Minimum delay between two downloads
    #[serde(default)]
    pub request_delay_ms: Option<u64>,

    /// Seed for the synthetic data generator
    #[serde(default)]
    pub seed: Option<u64>,

    /// HTTP API settings
    #[serde(default)]
    pub api: ApiConfig,

    /// Logging configuration (optional)
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// HTTP API section of the TOML file
#[derive(Debug, Clone, Deserialize, Default)]
pub struct ApiConfig {
    #[serde(default)]
    pub port: Option<u16>,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Compiled default values
#[derive(Debug, Clone)]
pub struct CompiledDefaults {
    pub data_dir: PathBuf,
    pub output_dir: PathBuf,
    pub base_url: String,
    pub years: Vec<i32>,
    pub max_records: usize,
    pub max_organizations: usize,
    pub request_delay_ms: u64,
    pub api_port: u16,
    pub log_level: String,
}

impl Default for CompiledDefaults {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data").join("nccs"),
            output_dir: PathBuf::from("data").join("transformed"),
            base_url: "https://nccs-efile.s3.us-east-1.amazonaws.com/public/v2025".to_string(),
            years: vec![2023, 2022, 2021],
            max_records: 10_000,
            max_organizations: 1_000,
            request_delay_ms: 1_000,
            api_port: 7071,
            log_level: default_log_level(),
        }
    }
}

/// Values supplied on the command line
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub data_dir: Option<PathBuf>,
    pub output_dir: Option<PathBuf>,
    pub seed: Option<u64>,
    pub max_records: Option<usize>,
    pub max_organizations: Option<usize>,
    pub api_port: Option<u16>,
}

/// Fully resolved settings used by the binaries
#[derive(Debug, Clone)]
pub struct Settings {
    pub data_dir: PathBuf,
    pub output_dir: PathBuf,
    pub base_url: String,
    pub years: Vec<i32>,
    pub max_records: usize,
    pub max_organizations: usize,
    pub request_delay_ms: u64,
    pub seed: Option<u64>,
    pub api_port: u16,
    pub log_level: String,
}

impl Settings {
    /// Resolve settings from CLI overrides, environment, TOML and defaults
    pub fn resolve(overrides: &ConfigOverrides, toml_config: &TomlConfig) -> Result<Self> {
        let defaults = CompiledDefaults::default();

        let data_dir = overrides
            .data_dir
            .clone()
            .or_else(|| env_path(ENV_DATA_DIR))
            .or_else(|| toml_config.data_dir.clone())
            .unwrap_or(defaults.data_dir);

        let output_dir = overrides
            .output_dir
            .clone()
            .or_else(|| env_path(ENV_OUTPUT_DIR))
            .or_else(|| toml_config.output_dir.clone())
            .unwrap_or(defaults.output_dir);

        let seed = match overrides.seed {
            Some(seed) => Some(seed),
            None => env_parse::<u64>(ENV_SEED)?.or(toml_config.seed),
        };

        let api_port = match overrides.api_port {
            Some(port) => port,
            None => env_parse::<u16>(ENV_API_PORT)?
                .or(toml_config.api.port)
                .unwrap_or(defaults.api_port),
        };

        let years = toml_config.years.clone().unwrap_or(defaults.years);
        if years.is_empty() {
            return Err(Error::Config("years must list at least one tax year".to_string()));
        }

        Ok(Self {
            data_dir,
            output_dir,
            base_url: toml_config
                .base_url
                .clone()
                .unwrap_or(defaults.base_url)
                .trim_end_matches('/')
                .to_string(),
            years,
            max_records: overrides
                .max_records
                .or(toml_config.max_records)
                .unwrap_or(defaults.max_records),
            max_organizations: overrides
                .max_organizations
                .or(toml_config.max_organizations)
                .unwrap_or(defaults.max_organizations),
            request_delay_ms: toml_config
                .request_delay_ms
                .unwrap_or(defaults.request_delay_ms),
            seed,
            api_port,
            log_level: toml_config.logging.level.clone(),
        })
    }

    /// Path of the merged organization dataset
    pub fn combined_data_path(&self) -> PathBuf {
        self.data_dir.join(COMBINED_DATA_FILE)
    }

    /// Path of the combined dataset summary
    pub fn summary_path(&self) -> PathBuf {
        self.data_dir.join(SUMMARY_FILE)
    }
}

fn env_path(name: &str) -> Option<PathBuf> {
    std::env::var(name)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .map(PathBuf::from)
}

fn env_parse<T: std::str::FromStr>(name: &str) -> Result<Option<T>> {
    match std::env::var(name) {
        Ok(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|_| Error::Config(format!("{} has an invalid value: {}", name, raw))),
        _ => Ok(None),
    }
}

/// Locate the default configuration file for the platform
///
/// Tries `<config dir>/dit/config.toml` first, then `/etc/dit/config.toml`
/// on Linux. Returns `None` when neither exists.
pub fn default_config_path() -> Option<PathBuf> {
    let user_config = dirs::config_dir().map(|d| d.join("dit").join("config.toml"));
    if let Some(path) = user_config {
        if path.exists() {
            return Some(path);
        }
    }

    if cfg!(target_os = "linux") {
        let system_config = PathBuf::from("/etc/dit/config.toml");
        if system_config.exists() {
            return Some(system_config);
        }
    }

    None
}

/// Where the TOML configuration came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Parsed from this file
    File(PathBuf),
    /// Explicit path that does not exist; defaults apply
    Missing(PathBuf),
    /// No explicit path and no default file; defaults apply
    Defaults,
}

impl ConfigSource {
    /// Report the outcome; call once the subscriber is installed
    pub fn log(&self) {
        match self {
            ConfigSource::File(path) => info!(path = %path.display(), "Loaded config file"),
            ConfigSource::Missing(path) => {
                warn!(path = %path.display(), "Config file not found, using defaults")
            }
            ConfigSource::Defaults => debug!("No config file found, using defaults"),
        }
    }
}

/// Load the TOML configuration
///
/// With an explicit path, a missing file yields defaults and
/// [`ConfigSource::Missing`]. Without one, the platform default location is
/// tried. Loading happens before logging is configured, so the outcome is
/// returned rather than logged here.
pub fn load_toml_config(explicit: Option<&Path>) -> Result<(TomlConfig, ConfigSource)> {
    let path = match explicit {
        Some(path) if path.exists() => path.to_path_buf(),
        Some(path) => return Ok((TomlConfig::default(), ConfigSource::Missing(path.to_path_buf()))),
        None => match default_config_path() {
            Some(path) => path,
            None => return Ok((TomlConfig::default(), ConfigSource::Defaults)),
        },
    };

    let content = std::fs::read_to_string(&path)
        .map_err(|e| Error::Config(format!("Read {} failed: {}", path.display(), e)))?;
    let config: TomlConfig = toml::from_str(&content)
        .map_err(|e| Error::Config(format!("Parse {} failed: {}", path.display(), e)))?;

    Ok((config, ConfigSource::File(path)))
}
