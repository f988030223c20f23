use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::Deserialize;
use std::{fs, path::PathBuf};

/// Connection settings for the remote weather service.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: String,
    pub username: String,
    pub password: String,
    /// Session lifetime granted by the authorize endpoint, in minutes.
    /// Kept as `i64` because that is what [`chrono::Duration::minutes`]
    /// consumes.
    pub session_expires_min: i64,
    pub authorize_route: String,
    pub cities_route: String,
    /// Per-city route prefix; the city name is appended verbatim.
    pub weathers_route: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "https://weather-api.isun.ch".to_string(),
            username: "isun".to_string(),
            password: "password".to_string(),
            session_expires_min: 5,
            authorize_route: "/api/authorize".to_string(),
            cities_route: "/api/cities".to_string(),
            weathers_route: "/api/weathers/".to_string(),
        }
    }
}

/// Where formatted reports are appended on disk.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SaverConfig {
    /// Directory for the report file. Empty means the current working
    /// directory. The directory must already exist.
    pub working_directory: String,
    pub filename: String,
}

impl Default for SaverConfig {
    fn default() -> Self {
        Self {
            working_directory: String::new(),
            filename: "weatherReports.txt".to_string(),
        }
    }
}

/// Top-level configuration stored on disk.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub api: ApiConfig,
    pub saver: SaverConfig,
}

impl Config {
    /// Load config from disk, or return the built-in defaults if the file
    /// doesn't exist yet.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "weatherlog", "weatherlog")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }
}
