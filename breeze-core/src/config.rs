use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};

use crate::{geo::Coordinates, provider::wttr::DEFAULT_ENDPOINT};

/// Cities shown in the top-cities panel when none are configured.
pub const DEFAULT_TOP_CITIES: [&str; 12] = [
    "Delhi",
    "Mumbai",
    "Bangalore",
    "Hyderabad",
    "Chennai",
    "Kolkata",
    "Pune",
    "Ahmedabad",
    "Jaipur",
    "Lucknow",
    "Surat",
    "Nagpur",
];

/// Top-level configuration stored on disk.
///
/// Example TOML:
/// ```toml
/// endpoint = "https://wttr.in"
/// home = "28.61,77.20"
/// top_cities = ["Delhi", "Mumbai"]
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Config {
    /// Base URL of the text weather endpoint.
    pub endpoint: Option<String>,

    /// Coordinates looked up when a session starts, as `"lat,lon"`.
    pub home: Option<String>,

    pub top_cities: Option<Vec<String>>,
}

impl Config {
    pub fn endpoint(&self) -> &str {
        self.endpoint.as_deref().unwrap_or(DEFAULT_ENDPOINT)
    }

    pub fn top_cities(&self) -> Vec<String> {
        match &self.top_cities {
            Some(cities) => cities.clone(),
            None => DEFAULT_TOP_CITIES.iter().map(|c| c.to_string()).collect(),
        }
    }

    /// Parsed home coordinates, if configured.
    pub fn home_coordinates(&self) -> Result<Option<Coordinates>> {
        self.home
            .as_deref()
            .map(|raw| {
                raw.parse::<Coordinates>().with_context(|| {
                    format!(
                        "Invalid `home` coordinates '{raw}' in config.\n\
                         Hint: run `breeze configure` and enter them as `lat,lon`."
                    )
                })
            })
            .transpose()
    }

    pub fn set_home(&mut self, home: Option<Coordinates>) {
        self.home = home.map(|c| c.to_string());
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
        let dirs = ProjectDirs::from("dev", "breeze", "breeze")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }
}
