use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Config directory not found")]
    NoConfigDir,
}

/// Application-level settings, separate from the persisted dashboard
/// snapshot itself.
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct AppConfig {
    /// Directory holding the durable storage documents. Defaults to the
    /// platform config directory.
    #[serde(default)]
    pub storage_dir: Option<PathBuf>,
    /// Section to activate at startup when the snapshot carries no active
    /// pointer.
    #[serde(default)]
    pub start_section: Option<String>,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        // Priority: ./lifeos.toml -> ~/.config/lifeos/lifeos.toml -> default
        let paths = [
            std::env::current_dir()?.join("lifeos.toml"),
            dirs::config_dir()
                .ok_or(ConfigError::NoConfigDir)?
                .join("lifeos/lifeos.toml"),
        ];

        for path in paths {
            if path.exists() {
                let content = std::fs::read_to_string(path)?;
                return toml::from_str(&content).map_err(ConfigError::Parse);
            }
        }

        Ok(Self::default())
    }

    /// Resolved storage directory, honouring the config override.
    pub fn storage_dir(&self) -> Result<PathBuf, ConfigError> {
        if let Some(dir) = &self.storage_dir {
            return Ok(dir.clone());
        }
        dirs::config_dir()
            .map(|d| d.join("lifeos"))
            .ok_or(ConfigError::NoConfigDir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_overrides() {
        let config: AppConfig =
            toml::from_str("storage_dir = \"/tmp/lifeos\"\nstart_section = \"home\"").unwrap();
        assert_eq!(config.storage_dir, Some(PathBuf::from("/tmp/lifeos")));
        assert_eq!(config.start_section.as_deref(), Some("home"));
    }

    #[test]
    fn empty_file_is_all_defaults() {
        let config: AppConfig = toml::from_str("").unwrap();
        assert!(config.storage_dir.is_none());
        assert!(config.start_section.is_none());
    }
}
