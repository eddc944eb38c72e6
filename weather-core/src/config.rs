use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

pub const DEFAULT_GEOCODING_URL: &str = "https://nominatim.openstreetmap.org/search";
pub const DEFAULT_WEATHER_URL: &str = "https://api.open-meteo.com/v1/forecast";
pub const DEFAULT_USER_AGENT: &str = concat!("weather-cli/", env!("CARGO_PKG_VERSION"));
pub const DEFAULT_COUNTRY_CODES: [&str; 3] = ["at", "de", "ch"];

/// Top-level configuration stored on disk.
///
/// Example TOML:
/// ```toml
/// geocoding_url = "https://nominatim.openstreetmap.org/search"
/// weather_url = "https://api.open-meteo.com/v1/forecast"
/// country_codes = ["at", "de", "ch"]
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Nominatim-compatible search endpoint.
    pub geocoding_url: String,

    /// Open-Meteo-compatible forecast endpoint.
    pub weather_url: String,

    /// ISO 3166-1 alpha-2 codes the location search is restricted to.
    pub country_codes: Vec<String>,

    /// Sent with every request; Nominatim rejects anonymous clients.
    pub user_agent: String,

    /// Request timeout. Unset means the HTTP client's default.
    pub timeout_secs: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            geocoding_url: DEFAULT_GEOCODING_URL.to_string(),
            weather_url: DEFAULT_WEATHER_URL.to_string(),
            country_codes: DEFAULT_COUNTRY_CODES.map(String::from).to_vec(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout_secs: None,
        }
    }
}

impl Config {
    /// Load config from disk, or return defaults if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        Self::load_from(&path)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            // First run: no config file, use defaults.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        tracing::debug!(path = %path.display(), "loaded config");
        Ok(cfg)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_file_path()?;
        self.save_to(&path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "weather-task", "weather-cli")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }

    /// Parse a comma separated list such as `"at, de,CH"` into lowercase codes.
    /// An empty list is rejected and the current codes are kept.
    pub fn set_country_codes(&mut self, list: &str) -> Result<()> {
        let codes: Vec<String> = list
            .split(',')
            .map(|c| c.trim().to_lowercase())
            .filter(|c| !c.is_empty())
            .collect();

        if codes.is_empty() {
            return Err(anyhow!(
                "At least one country code is required, e.g. \"{}\".",
                DEFAULT_COUNTRY_CODES.join(",")
            ));
        }

        self.country_codes = codes;
        Ok(())
    }

    /// `countrycodes` query value, e.g. `at,de,ch`. Never empty: an empty list
    /// would lift the restriction altogether.
    pub fn country_filter(&self) -> String {
        let codes: Vec<&str> = self
            .country_codes
            .iter()
            .map(|c| c.trim())
            .filter(|c| !c.is_empty())
            .collect();

        if codes.is_empty() {
            DEFAULT_COUNTRY_CODES.join(",")
        } else {
            codes.join(",")
        }
    }
}
