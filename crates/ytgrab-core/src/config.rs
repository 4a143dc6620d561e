//! Configuration management for ytgrab

use std::path::{Path, PathBuf};

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::quality::Quality;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub paths: PathsConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathsConfig {
    /// Path to yt-dlp binary (auto-detected if not set)
    pub yt_dlp: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Default download directory
    pub default_directory: PathBuf,
    /// Default quality: "best" or "lowest"
    pub default_quality: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            paths: PathsConfig { yt_dlp: None },
            output: OutputConfig {
                default_directory: PathBuf::from("."),
                default_quality: "best".to_string(),
            },
        }
    }
}

impl Config {
    /// Load configuration from file and environment
    pub fn load(config_file: Option<&Path>) -> Result<Self, ConfigError> {
        let mut figment = Figment::new().merge(Serialized::defaults(Config::default()));

        // Load from default config directory
        if let Some(config_dir) = dirs::config_dir() {
            let default_config = config_dir.join("ytgrab/config.toml");
            if default_config.exists() {
                figment = figment.merge(Toml::file(&default_config));
            }
        }

        // Load from specified config file
        if let Some(path) = config_file {
            figment = figment.merge(Toml::file(path));
        }

        // Load from environment
        figment = figment.merge(Env::prefixed("YTGRAB_").split("_"));

        let config: Config = figment
            .extract()
            .map_err(|e| ConfigError::LoadError(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if Quality::from_str(&self.output.default_quality).is_none() {
            return Err(ConfigError::InvalidValue(format!(
                "unknown default_quality {:?} (expected \"best\" or \"lowest\")",
                self.output.default_quality
            )));
        }
        Ok(())
    }

    /// Get yt-dlp path, auto-detecting if not configured
    pub fn yt_dlp_path(&self) -> Result<PathBuf, ConfigError> {
        if let Some(ref path) = self.paths.yt_dlp {
            Ok(path.clone())
        } else {
            which::which("yt-dlp")
                .map_err(|_| ConfigError::InvalidValue("yt-dlp not found in PATH".to_string()))
        }
    }

    /// Default quality, parsed; `validate` guarantees this succeeds
    /// for a loaded config.
    pub fn default_quality(&self) -> Quality {
        Quality::from_str(&self.output.default_quality).unwrap_or(Quality::Best)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.output.default_directory, PathBuf::from("."));
        assert_eq!(config.default_quality(), Quality::Best);
        assert!(config.paths.yt_dlp.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_unknown_quality() {
        let mut config = Config::default();
        config.output.default_quality = "4k".to_string();
        assert!(matches!(config.validate(), Err(ConfigError::InvalidValue(_))));
    }

    #[test]
    fn test_explicit_yt_dlp_path_wins() {
        let mut config = Config::default();
        config.paths.yt_dlp = Some(PathBuf::from("/opt/yt-dlp"));
        assert_eq!(config.yt_dlp_path().unwrap(), PathBuf::from("/opt/yt-dlp"));
    }
}
