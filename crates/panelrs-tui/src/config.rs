//! Configuration file handling.
//!
//! Reads from `~/.config/panelrs/panelrs.toml`

use anyhow::{Context, Result};
use panelrs_core::PageSize;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Base URL of the admin API, e.g. `http://localhost:8080/api`.
    #[serde(default = "default_api_url")]
    pub api_url: String,
    /// Page size the list screens start with (5, 10, 20 or 50).
    #[serde(default = "default_page_size")]
    pub page_size: u32,
    /// How long toast notifications stay on screen.
    #[serde(default = "default_toast_ttl_secs")]
    pub toast_ttl_secs: u64,
}

fn default_api_url() -> String {
    "http://localhost:8080/api".to_string()
}

fn default_page_size() -> u32 {
    10
}

fn default_toast_ttl_secs() -> u64 {
    4
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            page_size: default_page_size(),
            toast_ttl_secs: default_toast_ttl_secs(),
        }
    }
}

impl Config {
    /// Load configuration from the config file.
    ///
    /// If `custom_path` is provided, load from that path.
    /// Otherwise, load from the default XDG config location.
    /// Creates a default config file if it doesn't exist (only for default path).
    pub fn load(custom_path: Option<PathBuf>) -> Result<Self> {
        let is_custom = custom_path.is_some();
        let config_path = match custom_path {
            Some(path) => path,
            None => Self::config_path()?,
        };

        if !config_path.exists() {
            // Only create default config for the default path
            if !is_custom {
                let config = Config::default();
                config.save()?;
                tracing::info!("Created default config: {:?}", config);
                return Ok(config);
            } else {
                anyhow::bail!("Config file not found: {}", config_path.display());
            }
        }

        let contents = std::fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read config file: {}", config_path.display()))?;

        let config: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", config_path.display()))?;

        tracing::info!("Loaded config from {}: {:?}", config_path.display(), config);
        Ok(config)
    }

    /// Save configuration to the config file.
    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;

        // Ensure config directory exists
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory: {}", parent.display()))?;
        }

        let contents = toml::to_string_pretty(self).context("Failed to serialize config")?;

        std::fs::write(&config_path, contents)
            .with_context(|| format!("Failed to write config file: {}", config_path.display()))
    }

    /// Configured page size, falling back to the default when the file
    /// holds a value outside the selectable set.
    pub fn initial_page_size(&self) -> PageSize {
        PageSize::from_u32(self.page_size).unwrap_or_else(|| {
            tracing::warn!(
                "page_size {} is not one of 5/10/20/50, using default",
                self.page_size
            );
            PageSize::default()
        })
    }

    /// Get the path to the config file.
    fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir().context("Could not determine config directory")?;

        Ok(config_dir.join("panelrs").join("panelrs.toml"))
    }
}
