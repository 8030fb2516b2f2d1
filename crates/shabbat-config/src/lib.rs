pub mod config;
pub mod error;

pub use config::{AstronomyConfig, CONFIG_FILE, Config, LocationConfig, default_base_dir};
pub use error::{ConfigError, Result};
