use crate::core::{Result, UniError};
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Top-level configuration structure parsed from a TOML file.
#[derive(Debug, Deserialize)]
pub struct Config {
    pub connection: ConnectionConfig,
    pub format: Option<FormatConfig>,
}

/// Parameters used to open a UniData session.
#[derive(Debug, Clone, Deserialize)]
pub struct ConnectionConfig {
    pub host: String,
    pub account: String,
    pub username: String,
    pub password: String,
}

/// Response format defaults applied to field definitions.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FormatConfig {
    pub field_separator: Option<String>,
    pub row_separator: Option<String>,
    pub select_only: Option<bool>,
}

impl Config {
    /// Parses configuration from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Config> {
        toml::from_str(content).map_err(|e| UniError::Config(e.to_string()))
    }
}

/// Loads configuration from a TOML file at the given path.
///
/// # Example
///
/// ```no_run
/// let config = uniobjects::config::load_config("uniobjects.toml")?;
/// println!("{}", config.connection.host);
/// # Ok::<(), uniobjects::core::UniError>(())
/// ```
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config> {
    let content = fs::read_to_string(path)?;
    Config::from_toml_str(&content)
}
