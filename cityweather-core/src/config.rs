use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};

/// Identifies a weather data source implementation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceId {
    OpenMeteo,
    Mock,
}

impl SourceId {
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceId::OpenMeteo => "open-meteo",
            SourceId::Mock => "mock",
        }
    }

    pub const fn all() -> &'static [SourceId] {
        &[SourceId::OpenMeteo, SourceId::Mock]
    }
}

impl std::fmt::Display for SourceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for SourceId {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let lower = value.to_lowercase();

        match lower.as_str() {
            "open-meteo" | "openmeteo" => Ok(SourceId::OpenMeteo),
            "mock" => Ok(SourceId::Mock),
            _ => Err(anyhow!(
                "Unknown source '{value}'. Supported sources: open-meteo, mock."
            )),
        }
    }
}

/// Top-level configuration stored on disk.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Optional default data source id, e.g. "open-meteo" or "mock".
    pub source: Option<String>,

    /// Optional path to a city dataset file overriding the bundled one.
    pub dataset_path: Option<PathBuf>,
}

impl Config {
    /// Return the configured data source as a strongly-typed SourceId.
    /// Unset means the live Open-Meteo source.
    pub fn source_id(&self) -> Result<SourceId> {
        match self.source.as_deref() {
            Some(s) => SourceId::try_from(s),
            None => Ok(SourceId::OpenMeteo),
        }
    }

    /// Store the default data source as string.
    pub fn set_source(&mut self, id: SourceId) {
        self.source = Some(id.as_str().to_string());
    }

    /// Load config from disk, or return an empty default if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        if !path.exists() {
            // First run: no config file, return empty.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_file_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(&path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "cityweather", "cityweather")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }
}
