use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    ReadError(String),

    #[error("Failed to parse config: {0}")]
    ParseError(String),

    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

/// Main configuration for CardioGraph
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct CardiographConfig {
    /// HTTP server settings
    #[serde(default)]
    pub server: ServerConfig,

    /// Upload handling
    #[serde(default)]
    pub upload: UploadConfig,

    /// Narrative report generation
    #[serde(default)]
    pub report: ReportConfig,

    /// Decorative circuit simulation parameters
    #[serde(default)]
    pub quantum: QuantumConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadConfig {
    /// Directory uploaded spreadsheets are staged in before processing
    #[serde(default = "default_upload_dir")]
    pub dir: PathBuf,

    /// Reject multipart bodies larger than this
    #[serde(default = "default_max_upload_bytes")]
    pub max_bytes: usize,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            dir: default_upload_dir(),
            max_bytes: default_max_upload_bytes(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Provider: "gemini", "template", or "auto"
    #[serde(default = "default_report_provider")]
    pub provider: String,

    /// Hosted model identifier
    #[serde(default = "default_report_model")]
    pub model: String,

    /// Base URL of the generative-text API
    #[serde(default = "default_api_base")]
    pub api_base: String,

    /// API key; falls back to GOOGLE_API_KEY / GEMINI_API_KEY env
    #[serde(default)]
    pub api_key: Option<String>,

    /// Request timeout in seconds
    #[serde(default = "default_report_timeout")]
    pub timeout_secs: u64,

    /// Retries after a failed request
    #[serde(default = "default_report_retries")]
    pub max_retries: u32,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            provider: default_report_provider(),
            model: default_report_model(),
            api_base: default_api_base(),
            api_key: None,
            timeout_secs: default_report_timeout(),
            max_retries: default_report_retries(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuantumConfig {
    /// Measurement repetitions per request
    #[serde(default = "default_shots")]
    pub shots: u32,
}

impl Default for QuantumConfig {
    fn default() -> Self {
        Self {
            shots: default_shots(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
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

fn default_host() -> String {
    "0.0.0.0".to_string()
}
fn default_port() -> u16 {
    5000
}
fn default_upload_dir() -> PathBuf {
    PathBuf::from("uploads")
}
fn default_max_upload_bytes() -> usize {
    5 * 1024 * 1024
}
fn default_report_provider() -> String {
    "auto".to_string()
}
fn default_report_model() -> String {
    "gemini-2.0-flash".to_string()
}
fn default_api_base() -> String {
    "https://generativelanguage.googleapis.com/v1beta".to_string()
}
fn default_report_timeout() -> u64 {
    30
}
fn default_report_retries() -> u32 {
    2
}
fn default_shots() -> u32 {
    100
}
fn default_log_level() -> String {
    "info".to_string()
}

/// Configuration manager with file discovery, env overrides, and defaults
pub struct ConfigManager {
    config: CardiographConfig,
    config_path: Option<PathBuf>,
}

impl ConfigManager {
    /// Load configuration with the following precedence:
    /// 1. Environment variables
    /// 2. Config file (./.cardiograph/config.toml, then ~/.cardiograph/config.toml)
    /// 3. Defaults
    pub fn load() -> Result<Self, ConfigError> {
        let (config, config_path) = Self::load_config_file()?;
        let config = Self::apply_env_overrides(config);
        Self::validate_config(&config)?;

        match config_path {
            Some(ref path) => info!("Configuration loaded from {}", path.display()),
            None => info!("No config file found, using defaults"),
        }

        Ok(Self {
            config,
            config_path,
        })
    }

    /// Build a manager around an explicit config, bypassing file discovery.
    pub fn with_config(config: CardiographConfig) -> Result<Self, ConfigError> {
        Self::validate_config(&config)?;
        Ok(Self {
            config,
            config_path: None,
        })
    }

    pub fn config(&self) -> &CardiographConfig {
        &self.config
    }

    pub fn config_path(&self) -> Option<&Path> {
        self.config_path.as_deref()
    }

    fn load_config_file() -> Result<(CardiographConfig, Option<PathBuf>), ConfigError> {
        let local_config = Path::new(".cardiograph").join("config.toml");
        if local_config.exists() {
            let config = Self::read_toml_file(&local_config)?;
            return Ok((config, Some(local_config)));
        }

        if let Some(home) = dirs::home_dir() {
            let user_config = home.join(".cardiograph").join("config.toml");
            if user_config.exists() {
                let config = Self::read_toml_file(&user_config)?;
                return Ok((config, Some(user_config)));
            }
        }

        Ok((CardiographConfig::default(), None))
    }

    fn read_toml_file(path: &Path) -> Result<CardiographConfig, ConfigError> {
        let content =
            std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError(e.to_string()))?;

        let config: CardiographConfig =
            toml::from_str(&content).map_err(|e| ConfigError::ParseError(e.to_string()))?;

        Ok(config)
    }

    fn apply_env_overrides(mut config: CardiographConfig) -> CardiographConfig {
        if let Ok(host) = std::env::var("CARDIOGRAPH_HOST") {
            config.server.host = host;
        }
        // PORT matches the deployment convention of the original server
        if let Ok(port) = std::env::var("PORT").or_else(|_| std::env::var("CARDIOGRAPH_PORT")) {
            if let Ok(p) = port.parse() {
                config.server.port = p;
            }
        }
        if let Ok(dir) = std::env::var("CARDIOGRAPH_UPLOAD_DIR") {
            config.upload.dir = PathBuf::from(dir);
        }
        if let Ok(provider) = std::env::var("CARDIOGRAPH_REPORT_PROVIDER") {
            config.report.provider = provider;
        }
        if let Ok(model) = std::env::var("CARDIOGRAPH_REPORT_MODEL") {
            config.report.model = model;
        }
        if let Ok(base) = std::env::var("CARDIOGRAPH_API_BASE") {
            config.report.api_base = base;
        }
        if let Ok(key) =
            std::env::var("GOOGLE_API_KEY").or_else(|_| std::env::var("GEMINI_API_KEY"))
        {
            config.report.api_key = Some(key);
        }
        if let Ok(shots) = std::env::var("CARDIOGRAPH_QUANTUM_SHOTS") {
            if let Ok(n) = shots.parse() {
                config.quantum.shots = n;
            }
        }
        if let Ok(level) = std::env::var("RUST_LOG") {
            config.logging.level = level;
        }
        config
    }

    fn validate_config(config: &CardiographConfig) -> Result<(), ConfigError> {
        if config.quantum.shots == 0 {
            return Err(ConfigError::ValidationError(
                "quantum.shots must be at least 1".to_string(),
            ));
        }
        if config.report.max_retries > 10 {
            return Err(ConfigError::ValidationError(
                "report.max_retries must be 10 or fewer".to_string(),
            ));
        }
        match config.report.provider.as_str() {
            "auto" | "gemini" | "template" => Ok(()),
            other => Err(ConfigError::ValidationError(format!(
                "unknown report provider: {other}"
            ))),
        }
    }
}
