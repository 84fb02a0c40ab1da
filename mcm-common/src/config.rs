//! Configuration loading
//!
//! Every value is resolved with the same priority order:
//! 1. Command-line argument (highest priority)
//! 2. Environment variable
//! 3. TOML config file
//! 4. Compiled default (fallback)
//!
//! A missing TOML file is not an error. A missing OMDb API key is not an
//! error either: it only disables metadata enrichment.

use crate::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Environment variable overriding the database file path
pub const ENV_DATABASE: &str = "MCM_DATABASE";

/// Environment variable overriding the TOML config file path
pub const ENV_CONFIG: &str = "MCM_CONFIG";

/// Environment variable holding the OMDb API key
pub const ENV_OMDB_API_KEY: &str = "OMDB_API_KEY";

/// Environment variable overriding the OMDb endpoint
pub const ENV_OMDB_URL: &str = "MCM_OMDB_URL";

/// Default OMDb endpoint
pub const DEFAULT_OMDB_URL: &str = "http://www.omdbapi.com/";

/// Contents of `config.toml`
///
/// Every field is optional; absent fields fall through to the compiled
/// defaults.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TomlConfig {
    /// Path to the SQLite database file
    #[serde(default)]
    pub database_path: Option<PathBuf>,

    /// OMDb API key
    #[serde(default)]
    pub omdb_api_key: Option<String>,

    /// OMDb endpoint (tests and self-hosted mirrors)
    #[serde(default)]
    pub omdb_url: Option<String>,

    #[serde(default)]
    pub logging: LoggingConfig,
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
    // Interactive tool: keep stderr quiet unless asked
    "warn".to_string()
}

impl TomlConfig {
    /// Load a TOML config file, returning defaults when it does not exist.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!("No config file at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("Read {} failed: {}", path.display(), e)))?;
        let config = toml::from_str(&content)
            .map_err(|e| Error::Config(format!("Parse {} failed: {}", path.display(), e)))?;

        info!("Loaded config file: {}", path.display());
        Ok(config)
    }
}

/// Fully resolved runtime configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub database_path: PathBuf,
    pub omdb_api_key: Option<String>,
    pub omdb_url: String,
    pub log_level: String,
    /// TOML file that was consulted, if any
    pub config_file: Option<PathBuf>,
}

impl Config {
    /// Resolve configuration from CLI arguments, environment and TOML.
    pub fn resolve(cli_database: Option<&Path>, cli_config: Option<&Path>) -> Result<Self> {
        let config_file = cli_config
            .map(Path::to_path_buf)
            .or_else(|| env_value(ENV_CONFIG).map(PathBuf::from))
            .or_else(default_config_path);

        let toml_config = match &config_file {
            Some(path) => TomlConfig::load(path)?,
            None => TomlConfig::default(),
        };

        Ok(Self::from_sources(cli_database, toml_config, config_file))
    }

    /// Merge already-loaded sources without touching the filesystem.
    pub fn from_sources(
        cli_database: Option<&Path>,
        toml_config: TomlConfig,
        config_file: Option<PathBuf>,
    ) -> Self {
        let database_path = cli_database
            .map(Path::to_path_buf)
            .or_else(|| env_value(ENV_DATABASE).map(PathBuf::from))
            .or(toml_config.database_path)
            .unwrap_or_else(default_database_path);

        let omdb_api_key = env_value(ENV_OMDB_API_KEY)
            .filter(|key| is_valid_key(key))
            .or_else(|| toml_config.omdb_api_key.filter(|key| is_valid_key(key)));

        let omdb_url = env_value(ENV_OMDB_URL)
            .or(toml_config.omdb_url)
            .unwrap_or_else(|| DEFAULT_OMDB_URL.to_string());

        Self {
            database_path,
            omdb_api_key,
            omdb_url,
            log_level: toml_config.logging.level,
            config_file,
        }
    }
}

/// Validate API key (non-empty, non-whitespace)
pub fn is_valid_key(key: &str) -> bool {
    !key.trim().is_empty()
}

fn env_value(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

/// Default config file location: `<config_dir>/mcm/config.toml`
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("mcm").join("config.toml"))
}

/// Default database location: `<data_local_dir>/mcm/movies.db`
pub fn default_database_path() -> PathBuf {
    dirs::data_local_dir()
        .map(|d| d.join("mcm"))
        .unwrap_or_else(|| PathBuf::from("."))
        .join("movies.db")
}
