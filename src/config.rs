//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use crate::data::Metric;
use crate::index::RangeWidth;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub source: SourceConfig,

    #[serde(default)]
    pub view: ViewConfig,

    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Where the dashboard documents are fetched from
#[derive(Debug, Clone, Deserialize)]
pub struct SourceConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_status_path")]
    pub status_path: String,

    #[serde(default = "default_dimensions_path")]
    pub dimensions_path: String,

    #[serde(default = "default_facts_path")]
    pub facts_path: String,

    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

fn default_base_url() -> String {
    "http://localhost:5000".to_string()
}

fn default_status_path() -> String {
    "/api/status".to_string()
}

fn default_dimensions_path() -> String {
    "/static/data/dimensions.json".to_string()
}

fn default_facts_path() -> String {
    "/static/data/shab_monthly.json".to_string()
}

fn default_request_timeout() -> u64 {
    30
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            status_path: default_status_path(),
            dimensions_path: default_dimensions_path(),
            facts_path: default_facts_path(),
            request_timeout_secs: default_request_timeout(),
        }
    }
}

/// Initial view and control options
#[derive(Debug, Clone, Deserialize)]
pub struct ViewConfig {
    #[serde(default = "default_metric")]
    pub default_metric: Metric,

    #[serde(default)]
    pub default_range: RangeWidth,

    /// Month counts offered by the range control; `all` is always appended
    #[serde(default = "default_range_options")]
    pub range_options: Vec<u32>,
}

fn default_metric() -> Metric {
    Metric::Net
}

fn default_range_options() -> Vec<u32> {
    vec![6, 12, 24, 36]
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            default_metric: default_metric(),
            default_range: RangeWidth::default(),
            range_options: default_range_options(),
        }
    }
}

impl ViewConfig {
    /// Range control choices in display order
    pub fn range_choices(&self) -> Vec<RangeWidth> {
        self.range_options
            .iter()
            .map(|&n| RangeWidth::Months(n))
            .chain(std::iter::once(RangeWidth::All))
            .collect()
    }
}

/// Static data server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_static_dir")]
    pub static_dir: String,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5000
}

fn default_static_dir() -> String {
    "./static".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            static_dir: default_static_dir(),
        }
    }
}

impl ServerConfig {
    /// Get the socket address string
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl LoggingConfig {
    pub fn is_json(&self) -> bool {
        self.format.eq_ignore_ascii_case("json")
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: Some(path.to_path_buf()),
            error: e.to_string(),
        })
    }

    /// Parse configuration from TOML text
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse {
            path: None,
            error: e.to_string(),
        })
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Self {
        let mut config = Config::default();
        config.apply_env_overrides();
        config
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load from default locations or environment
    pub fn load_default() -> Self {
        let config_paths = [
            dirs::config_dir().map(|p| p.join("hrstat").join("config.toml")),
            Some(PathBuf::from("/etc/hrstat/config.toml")),
            Some(PathBuf::from("./config.toml")),
        ];

        for path in config_paths.iter().flatten() {
            if path.exists() {
                match Self::load_with_env(path) {
                    Ok(config) => {
                        tracing::info!("Loaded config from {:?}", path);
                        return config;
                    }
                    Err(e) => {
                        tracing::warn!("Failed to load config from {:?}: {}", path, e);
                    }
                }
            }
        }

        tracing::info!("Using default config with environment overrides");
        Self::from_env()
    }

    /// Apply environment variable overrides to an existing config
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        // Source overrides
        if let Some(url) = lookup("HRSTAT_BASE_URL") {
            self.source.base_url = url;
        }

        // Server overrides
        if let Some(dir) = lookup("HRSTAT_STATIC_DIR") {
            self.server.static_dir = dir;
        }
        if let Some(host) = lookup("HRSTAT_HOST") {
            self.server.host = host;
        }
        if let Some(port) = lookup("HRSTAT_PORT") {
            if let Ok(p) = port.parse() {
                self.server.port = p;
            }
        }

        // Logging overrides
        if let Some(level) = lookup("HRSTAT_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(format) = lookup("HRSTAT_LOG_FORMAT") {
            self.logging.format = format;
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config{}: {error}", describe_path(.path))]
    Parse {
        path: Option<PathBuf>,
        error: String,
    },
}

fn describe_path(path: &Option<PathBuf>) -> String {
    match path {
        Some(path) => format!(" file {:?}", path),
        None => String::new(),
    }
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r#"# hrstat Configuration
#
# Environment variables override these settings:
# - HRSTAT_BASE_URL
# - HRSTAT_STATIC_DIR
# - HRSTAT_HOST
# - HRSTAT_PORT
# - HRSTAT_LOG_LEVEL
# - HRSTAT_LOG_FORMAT

[source]
# Server hosting the dashboard documents
base_url = "http://localhost:5000"

# Optional status document (data_version, data_updated_at)
status_path = "/api/status"

# Month axis and canton set
dimensions_path = "/static/data/dimensions.json"

# Long-form monthly facts
facts_path = "/static/data/shab_monthly.json"

# Request timeout in seconds
request_timeout_secs = 30

[view]
# Initial metric: HR01, HR03 or NET
default_metric = "NET"

# Initial window: a month count or "all"
default_range = 12

# Month counts offered by the range control ("all" is always offered)
range_options = [6, 12, 24, 36]

[server]
# Static data server host
host = "0.0.0.0"

# Static data server port
port = 5000

# Folder holding status.json and data/*.json
static_dir = "./static"

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log format: pretty (for development) or json (for production)
format = "pretty"
"#
    .to_string()
}
