use crate::dispatch::DispatchConfig;
use crate::dispatch::dispatcher::{
    DEFAULT_DISPATCH_TIMEOUT, DEFAULT_DRAIN_TIMEOUT, DEFAULT_QUEUE_CAPACITY, DEFAULT_WORKERS,
};
use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("File error: {0}")]
    FileError(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("Environment error: {0}")]
    EnvError(String),
}

/// Level of the bridge's own tracing subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

impl std::str::FromStr for LogLevel {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "error" => Ok(LogLevel::Error),
            "warn" | "warning" => Ok(LogLevel::Warn),
            "info" => Ok(LogLevel::Info),
            "debug" => Ok(LogLevel::Debug),
            "trace" => Ok(LogLevel::Trace),
            _ => Err(ConfigError::EnvError(format!("Invalid LOG_LEVEL: {s}"))),
        }
    }
}

impl From<LogLevel> for tracing::Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => tracing::Level::ERROR,
            LogLevel::Warn => tracing::Level::WARN,
            LogLevel::Info => tracing::Level::INFO,
            LogLevel::Debug => tracing::Level::DEBUG,
            LogLevel::Trace => tracing::Level::TRACE,
        }
    }
}

/// Output format of the tracing subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Single-line human readable output
    #[default]
    Compact,
    /// One JSON object per line
    Json,
}

impl std::str::FromStr for LogFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "compact" => Ok(LogFormat::Compact),
            "json" => Ok(LogFormat::Json),
            _ => Err(ConfigError::EnvError(format!(
                "Invalid LOG_FORMAT: {s}. Valid values: compact, json"
            ))),
        }
    }
}

#[derive(Parser, Debug, Clone, Serialize, Deserialize)]
#[command(author, version, about, long_about = None)]
#[serde(default)]
pub struct BridgeConfig {
    /// Maximum number of events waiting for delivery
    #[arg(long, env = "BRIDGE_QUEUE_CAPACITY", default_value = "10000")]
    pub queue_capacity: usize,

    /// Number of dispatch workers writing to the sink
    #[arg(long, env = "BRIDGE_WORKERS", default_value = "4")]
    pub workers: usize,

    /// Upper bound on a single sink write, in seconds
    #[arg(long, env = "BRIDGE_DISPATCH_TIMEOUT_SECS", default_value = "30")]
    pub dispatch_timeout_secs: u64,

    /// Upper bound on draining the queue at shutdown, in milliseconds
    #[arg(long, env = "BRIDGE_DRAIN_TIMEOUT_MS", default_value = "4000")]
    pub drain_timeout_ms: u64,

    /// Log level
    #[arg(long, env = "LOG_LEVEL", default_value = "info")]
    pub log_level: LogLevel,

    /// Log output format (compact or json)
    #[arg(long, env = "LOG_FORMAT", default_value = "compact")]
    pub log_format: LogFormat,

    /// Extra `target=level` filter directives for the bridge's own logging
    #[arg(
        long = "log-directive",
        env = "BRIDGE_LOG_DIRECTIVES",
        value_delimiter = ','
    )]
    pub log_directives: Vec<String>,

    /// Configuration file path (optional)
    #[arg(long, env = "BRIDGE_CONFIG_FILE")]
    pub config_file: Option<PathBuf>,

    /// Derived fields (not CLI arguments)
    #[serde(skip)]
    #[arg(skip)]
    pub dispatch_timeout: Duration,

    #[serde(skip)]
    #[arg(skip)]
    pub drain_timeout: Duration,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            queue_capacity: DEFAULT_QUEUE_CAPACITY,
            workers: DEFAULT_WORKERS,
            dispatch_timeout_secs: DEFAULT_DISPATCH_TIMEOUT.as_secs(),
            drain_timeout_ms: DEFAULT_DRAIN_TIMEOUT.as_millis() as u64,
            log_level: LogLevel::Info,
            log_format: LogFormat::Compact,
            log_directives: Vec::new(),
            config_file: None,
            dispatch_timeout: DEFAULT_DISPATCH_TIMEOUT,
            drain_timeout: DEFAULT_DRAIN_TIMEOUT,
        }
    }
}

impl BridgeConfig {
    pub fn from_args<I, T>(args: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        let config = BridgeConfig::try_parse_from(args)
            .map_err(|e| ConfigError::InvalidConfig(e.to_string()))?;
        config.finalize()
    }

    /// Resolve a parsed config: load `config_file` if given, derive, validate.
    pub fn finalize(mut self) -> Result<Self, ConfigError> {
        // A config file replaces the parsed values; flags are not merged into it
        if let Some(path) = self.config_file.clone() {
            self = Self::from_file(&path)?;
            self.config_file = Some(path);
        }

        self.post_process()?;
        self.validate()?;
        Ok(self)
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = BridgeConfig::default();

        load_env_var("BRIDGE_QUEUE_CAPACITY", &mut config.queue_capacity)?;
        load_env_var("BRIDGE_WORKERS", &mut config.workers)?;
        load_env_var(
            "BRIDGE_DISPATCH_TIMEOUT_SECS",
            &mut config.dispatch_timeout_secs,
        )?;
        load_env_var("BRIDGE_DRAIN_TIMEOUT_MS", &mut config.drain_timeout_ms)?;
        load_env_var("LOG_LEVEL", &mut config.log_level)?;
        load_env_var("LOG_FORMAT", &mut config.log_format)?;
        load_env_list("BRIDGE_LOG_DIRECTIVES", &mut config.log_directives);
        load_env_path_opt("BRIDGE_CONFIG_FILE", &mut config.config_file);

        config.post_process()?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: BridgeConfig = toml::from_str(&content)?;
        config.post_process()?;
        config.validate()?;
        Ok(config)
    }

    pub fn post_process(&mut self) -> Result<(), ConfigError> {
        self.dispatch_timeout = Duration::from_secs(self.dispatch_timeout_secs);
        self.drain_timeout = Duration::from_millis(self.drain_timeout_ms);
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.queue_capacity == 0 {
            return Err(ConfigError::InvalidConfig(
                "Queue capacity must be greater than 0".to_string(),
            ));
        }

        if self.workers == 0 {
            return Err(ConfigError::InvalidConfig(
                "Worker count must be greater than 0".to_string(),
            ));
        }

        if self.workers > self.queue_capacity {
            return Err(ConfigError::InvalidConfig(format!(
                "Worker count ({}) must not exceed queue capacity ({})",
                self.workers, self.queue_capacity
            )));
        }

        if self.dispatch_timeout_secs == 0 {
            return Err(ConfigError::InvalidConfig(
                "Dispatch timeout must be greater than 0".to_string(),
            ));
        }

        if self.drain_timeout_ms == 0 {
            return Err(ConfigError::InvalidConfig(
                "Drain timeout must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }

    pub fn dispatch_config(&self) -> DispatchConfig {
        DispatchConfig {
            queue_capacity: self.queue_capacity,
            workers: self.workers,
            dispatch_timeout: Duration::from_secs(self.dispatch_timeout_secs),
            drain_timeout: Duration::from_millis(self.drain_timeout_ms),
        }
    }
}

/// Helper function to load and parse an environment variable.
/// Returns Ok(()) if the variable doesn't exist (keeps default).
fn load_env_var<T>(name: &str, target: &mut T) -> Result<(), ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    if let Ok(value) = std::env::var(name) {
        *target = value
            .parse()
            .map_err(|e| ConfigError::EnvError(format!("Invalid {name}: {e}")))?;
    }
    Ok(())
}

/// Helper function to load a comma-separated list environment variable.
fn load_env_list(name: &str, target: &mut Vec<String>) {
    if let Ok(value) = std::env::var(name) {
        *target = value
            .split(',')
            .map(str::trim)
            .filter(|item| !item.is_empty())
            .map(String::from)
            .collect();
    }
}

/// Helper function to load an optional PathBuf environment variable.
fn load_env_path_opt(name: &str, target: &mut Option<PathBuf>) {
    if let Ok(value) = std::env::var(name) {
        *target = Some(PathBuf::from(value));
    }
}
