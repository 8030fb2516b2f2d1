use std::path::{Path, PathBuf};
use std::{env, fs};

use serde::{Deserialize, Serialize};
use shabbat_core::{DEFAULT_DELTA_T, Location, ShabbatWindowCalculator, SpaSunsetProvider};

use crate::error::{ConfigError, Result};

pub const CONFIG_FILE: &str = "config.toml";

/// Default base directory for the config file.
pub fn default_base_dir() -> PathBuf {
    dirs_home().join(".shabbat-window")
}

fn dirs_home() -> PathBuf {
    env::var("HOME")
        .or_else(|_| env::var("USERPROFILE"))
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("."))
}

/// Application configuration.
///
/// Layout:
/// ```text
/// ~/.shabbat-window/
/// └── config.toml
/// ```
///
/// Every section and field is optional; anything missing falls back to the
/// built-in default location (Tel Aviv).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub location: LocationConfig,
    pub astronomy: AstronomyConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocationConfig {
    pub name: String,
    pub country_code: String,
    pub latitude: f64,
    pub longitude: f64,
    /// Meters above sea level.
    pub elevation: f64,
    /// IANA zone, e.g. "Asia/Jerusalem".
    pub timezone: String,
}

impl Default for LocationConfig {
    fn default() -> Self {
        Self {
            name: "Tel Aviv".to_string(),
            country_code: "IL".to_string(),
            latitude: 32.0853,
            longitude: 34.7818,
            elevation: 0.0,
            timezone: "Asia/Jerusalem".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AstronomyConfig {
    /// ΔT (TT − UT) in seconds.
    pub delta_t: f64,
}

impl Default for AstronomyConfig {
    fn default() -> Self {
        Self {
            delta_t: DEFAULT_DELTA_T,
        }
    }
}

impl Config {
    /// Load `config.toml` from `base_dir` (or the default base directory).
    pub fn load(base_dir: Option<&Path>) -> Result<Self> {
        let base = base_dir.map(PathBuf::from).unwrap_or_else(default_base_dir);
        Self::load_file(&base.join(CONFIG_FILE))
    }

    /// Load from an explicit file path. A missing file yields the defaults.
    pub fn load_file(path: &Path) -> Result<Self> {
        match fs::read_to_string(path) {
            Ok(content) => {
                let config = Self::from_toml_str(&content)?;
                tracing::debug!(
                    "loaded config from {} (location '{}')",
                    path.display(),
                    config.location.name
                );
                Ok(config)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!("no config at {}, using defaults", path.display());
                Ok(Self::default())
            }
            Err(e) => Err(ConfigError::Io(e)),
        }
    }

    /// Parse and validate.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        config.location()?;
        if !config.astronomy.delta_t.is_finite() {
            return Err(ConfigError::Invalid(format!(
                "astronomy.delta_t must be finite, got {}",
                config.astronomy.delta_t
            )));
        }
        Ok(config)
    }

    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Write this config to `<base>/config.toml`, refusing to overwrite an
    /// existing file unless `force` is set. Returns the written path.
    pub fn save(&self, base_dir: Option<&Path>, force: bool) -> Result<PathBuf> {
        let base = base_dir.map(PathBuf::from).unwrap_or_else(default_base_dir);
        fs::create_dir_all(&base)?;

        let path = base.join(CONFIG_FILE);
        if path.exists() && !force {
            return Err(ConfigError::Io(std::io::Error::new(
                std::io::ErrorKind::AlreadyExists,
                format!("{} already exists (use --force to overwrite)", path.display()),
            )));
        }

        fs::write(&path, self.to_toml_string()?)?;
        tracing::info!("wrote config: {}", path.display());
        Ok(path)
    }

    /// The configured location, validated.
    pub fn location(&self) -> Result<Location> {
        let l = &self.location;
        Ok(Location::new(
            &l.name,
            &l.country_code,
            l.latitude,
            l.longitude,
            l.elevation,
            &l.timezone,
        )?)
    }

    /// Calculator backed by the astronomical provider with the configured ΔT.
    pub fn calculator(&self) -> ShabbatWindowCalculator<SpaSunsetProvider> {
        ShabbatWindowCalculator::new(SpaSunsetProvider::new(self.astronomy.delta_t))
    }
}
