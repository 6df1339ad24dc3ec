use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use super::ThemeManager;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThemeConfig {
    #[serde(default = "default_theme_name")]
    pub theme: String,
}

fn default_theme_name() -> String {
    "Slate Light".to_string()
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            theme: default_theme_name(),
        }
    }
}

/// Persists the chosen theme in `<config_dir>/chatdeck/theme.toml`.
pub struct ThemeLoader {
    config_path: PathBuf,
}

impl ThemeLoader {
    pub fn new() -> Self {
        Self {
            config_path: Self::default_config_path(),
        }
    }

    pub fn with_path(config_path: PathBuf) -> Self {
        Self { config_path }
    }

    fn default_config_path() -> PathBuf {
        chatdeck_core::config::get_config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("theme.toml")
    }

    pub fn load(&self) -> Result<ThemeConfig> {
        if !self.config_path.exists() {
            return Ok(ThemeConfig::default());
        }

        let contents = fs::read_to_string(&self.config_path)
            .with_context(|| format!("Failed to read theme config from {:?}", self.config_path))?;

        toml::from_str(&contents)
            .with_context(|| format!("Failed to parse theme config from {:?}", self.config_path))
    }

    pub fn save_theme_name(&self, theme_name: &str) -> Result<()> {
        if let Some(parent) = self.config_path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory {:?}", parent))?;
        }

        let config = ThemeConfig {
            theme: theme_name.to_string(),
        };
        let contents =
            toml::to_string_pretty(&config).context("Failed to serialize theme config")?;

        fs::write(&self.config_path, contents)
            .with_context(|| format!("Failed to write theme config to {:?}", self.config_path))
    }

    /// Builds a manager from the saved choice; `preferred` (command line or
    /// config file) wins over the saved one.
    pub fn initialize_theme_manager(&self, preferred: Option<&str>) -> ThemeManager {
        let mut manager = ThemeManager::new();
        let saved = match self.load() {
            Ok(config) => config.theme,
            Err(e) => {
                tracing::warn!("Ignoring theme config: {:#}", e);
                default_theme_name()
            }
        };
        let theme_name = preferred.map(str::to_string).unwrap_or(saved);

        if !manager.set_theme_by_name(&theme_name) {
            tracing::warn!(
                "Theme '{}' not found, using default '{}'",
                theme_name,
                manager.current_theme_name()
            );
        }

        manager
    }
}

impl Default for ThemeLoader {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_load_nonexistent_returns_default() {
        let temp_dir = TempDir::new().unwrap();
        let loader = ThemeLoader::with_path(temp_dir.path().join("nonexistent.toml"));

        assert_eq!(loader.load().unwrap().theme, "Slate Light");
    }

    #[test]
    fn test_save_and_restore() {
        let temp_dir = TempDir::new().unwrap();
        let loader = ThemeLoader::with_path(temp_dir.path().join("nested").join("theme.toml"));

        loader.save_theme_name("Slate Dark").unwrap();
        let manager = loader.initialize_theme_manager(None);

        assert_eq!(manager.current_theme_name(), "Slate Dark");
    }

    #[test]
    fn test_preferred_theme_wins() {
        let temp_dir = TempDir::new().unwrap();
        let loader = ThemeLoader::with_path(temp_dir.path().join("theme.toml"));

        loader.save_theme_name("Slate Dark").unwrap();
        let manager = loader.initialize_theme_manager(Some("Midnight"));

        assert_eq!(manager.current_theme_name(), "Midnight");
    }

    #[test]
    fn test_unknown_or_corrupt_theme_falls_back() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("theme.toml");
        std::fs::write(&path, "theme = [not toml").unwrap();
        let loader = ThemeLoader::with_path(path);

        assert!(loader.load().is_err());
        let manager = loader.initialize_theme_manager(Some("Nope"));
        assert_eq!(manager.current_theme_name(), "Slate Light");
    }
}
