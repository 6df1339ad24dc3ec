use config::{Config as ConfigBuilder, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

use crate::simulator::ReplyAttribution;

const MAX_REPLY_DELAY_MS: u64 = 60_000;

#[derive(Debug, Error)]
pub enum ConfigLoadError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Invalid configuration value for {key}: {message}")]
    InvalidValue { key: String, message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ChatdeckConfig {
    #[serde(default)]
    pub simulator: SimulatorConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub tui: TuiConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulatorConfig {
    #[serde(default = "default_reply_delay")]
    pub reply_delay_ms: u64,

    #[serde(default = "default_fallback_name")]
    pub fallback_name: String,

    #[serde(default)]
    pub attribution: ReplyAttribution,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default)]
    pub file_path: Option<PathBuf>,

    /// Write JSON lines instead of plain text.
    #[serde(default)]
    pub json: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TuiConfig {
    #[serde(default = "default_tick_rate")]
    pub tick_rate_ms: u64,

    #[serde(default)]
    pub theme: Option<String>,
}

fn default_reply_delay() -> u64 {
    1000
}

fn default_fallback_name() -> String {
    "the bot".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_tick_rate() -> u64 {
    250
}

impl SimulatorConfig {
    pub fn reply_delay(&self) -> Duration {
        Duration::from_millis(self.reply_delay_ms)
    }
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            reply_delay_ms: default_reply_delay(),
            fallback_name: default_fallback_name(),
            attribution: ReplyAttribution::default(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file_path: None,
            json: false,
        }
    }
}

impl Default for TuiConfig {
    fn default() -> Self {
        Self {
            tick_rate_ms: default_tick_rate(),
            theme: None,
        }
    }
}

impl ChatdeckConfig {
    /// Loads from the standard locations plus an optional explicit file, then
    /// applies `CHATDECK_LOG_LEVEL`. `RUST_LOG` is left to the subscriber.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigLoadError> {
        load_dotenv_files();

        let mut paths = get_config_paths();
        if let Some(path) = explicit {
            if !path.exists() {
                return Err(ConfigLoadError::Io(std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    format!("config file not found: {}", path.display()),
                )));
            }
            paths.push(path.to_path_buf());
        }

        let mut chatdeck_config = Self::load_from_paths(paths)?;

        if let Ok(level) = std::env::var("CHATDECK_LOG_LEVEL") {
            chatdeck_config.logging.level = level;
        }

        chatdeck_config.validate()?;

        Ok(chatdeck_config)
    }

    /// Later paths override earlier ones; `CHATDECK_*` variables override
    /// all files (`CHATDECK_SIMULATOR__REPLY_DELAY_MS=500`).
    pub fn load_from_paths(paths: Vec<PathBuf>) -> Result<Self, ConfigLoadError> {
        let mut builder = ConfigBuilder::builder();

        for path in paths {
            if path.exists() {
                builder = builder.add_source(File::from(path).required(false));
            }
        }

        builder = builder.add_source(
            Environment::with_prefix("CHATDECK")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let chatdeck_config: ChatdeckConfig = builder.build()?.try_deserialize()?;
        chatdeck_config.validate()?;

        Ok(chatdeck_config)
    }

    pub fn validate(&self) -> Result<(), ConfigLoadError> {
        if self.simulator.reply_delay_ms > MAX_REPLY_DELAY_MS {
            return Err(ConfigLoadError::InvalidValue {
                key: "simulator.reply_delay_ms".to_string(),
                message: format!("Must not exceed {MAX_REPLY_DELAY_MS}"),
            });
        }

        if self.simulator.fallback_name.trim().is_empty() {
            return Err(ConfigLoadError::InvalidValue {
                key: "simulator.fallback_name".to_string(),
                message: "Must not be empty".to_string(),
            });
        }

        if self.tui.tick_rate_ms == 0 {
            return Err(ConfigLoadError::InvalidValue {
                key: "tui.tick_rate_ms".to_string(),
                message: "Must be greater than 0".to_string(),
            });
        }

        let valid_levels = ["trace", "debug", "info", "warn", "error", "off"];
        let level_lower = self.logging.level.to_lowercase();
        if !valid_levels.contains(&level_lower.as_str())
            && !level_lower.contains('=')
            && !level_lower.contains(',')
        {
            return Err(ConfigLoadError::InvalidValue {
                key: "logging.level".to_string(),
                message: format!(
                    "Invalid log level '{}'. Must be one of: {:?}",
                    self.logging.level, valid_levels
                ),
            });
        }

        Ok(())
    }

    pub fn tick_rate(&self) -> Duration {
        Duration::from_millis(self.tui.tick_rate_ms)
    }

    pub fn log_level(&self) -> &str {
        &self.logging.level
    }

    pub fn log_file_path(&self) -> PathBuf {
        self.logging.file_path.clone().unwrap_or_else(|| {
            get_data_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("chatdeck.log")
        })
    }
}

fn get_config_paths() -> Vec<PathBuf> {
    let mut paths = Vec::new();

    if let Ok(cwd) = std::env::current_dir() {
        paths.push(cwd.join("config").join("default.toml"));
        paths.push(cwd.join("config").join("local.toml"));
        paths.push(cwd.join("chatdeck.toml"));
    }

    if let Some(config_dir) = get_config_dir() {
        paths.push(config_dir.join("config.toml"));
    }

    if let Some(home) = dirs::home_dir() {
        paths.push(home.join(".chatdeck").join("config.toml"));
    }

    paths
}

fn load_dotenv_files() {
    let mut paths = Vec::new();

    if let Ok(cwd) = std::env::current_dir() {
        paths.push(cwd.join(".env"));
    }

    if let Some(config_dir) = get_config_dir() {
        paths.push(config_dir.join(".env"));
    }

    for path in paths {
        if path.exists() {
            let _ = dotenvy::from_path(&path);
        }
    }
}

pub fn get_config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("chatdeck"))
}

pub fn get_data_dir() -> Option<PathBuf> {
    dirs::data_dir().map(|d| d.join("chatdeck"))
}
