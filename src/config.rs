use serde::{Deserialize, Serialize};

use crate::LayoutMode;

/// Settings a calendar session starts from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CalendarConfig {
    /// Layout of the year view
    pub layout:       LayoutMode,
    /// Year to open on; the current year when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub initial_year: Option<i32>,
}

/// Error type for loading a configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Malformed TOML or unexpected keys.
    #[error("Invalid calendar config: {0}")]
    Toml(#[from] toml::de::Error),
}

impl CalendarConfig {
    /// Parses a configuration from TOML
    ///
    /// # Errors
    /// Returns `ConfigError::Toml` if the document is not valid TOML or has unknown keys.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        log::debug!("loaded calendar config: {config:?}");
        Ok(config)
    }
}
