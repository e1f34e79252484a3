//! Showcase configuration.

use serde::{Deserialize, Serialize};
use showcase_core::color::{ColorParseError, ShapeColor};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid config JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Invalid background color: {0}")]
    Color(#[from] ColorParseError),
    #[error("{name} must be a positive number, got {value}")]
    InvalidScale { name: &'static str, value: f64 },
}

/// Showcase configuration. Every field has a default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShowcaseConfig {
    /// Width of the container the example canvases are laid out in.
    pub container_width: f64,
    /// Canvas background as a CSS color string.
    pub background: String,
    /// Export multiplier of the preview download.
    pub preview_scale: f64,
    /// Export multiplier of the print download.
    pub print_scale: f64,
    /// Directory downloads and snapshots are written to.
    pub output_dir: PathBuf,
}

impl Default for ShowcaseConfig {
    fn default() -> Self {
        Self {
            container_width: 1280.0,
            background: "#ffffff".to_string(),
            preview_scale: 1.0,
            print_scale: 3.0,
            output_dir: PathBuf::from("out"),
        }
    }
}

impl ShowcaseConfig {
    /// Load a config file. `None` or a missing file yields the defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        if !path.exists() {
            log::warn!("Config file {} not found, using defaults", path.display());
            return Ok(Self::default());
        }
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Parse and validate a JSON config.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        self.background_color()?;
        for (name, value) in [
            ("preview_scale", self.preview_scale),
            ("print_scale", self.print_scale),
            ("container_width", self.container_width),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::InvalidScale { name, value });
            }
        }
        Ok(())
    }

    pub fn background_color(&self) -> Result<ShapeColor, ConfigError> {
        Ok(ShapeColor::parse(&self.background)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = ShowcaseConfig::from_json(r#"{ "print_scale": 4.0 }"#).unwrap();
        assert!((config.print_scale - 4.0).abs() < f64::EPSILON);
        assert!((config.preview_scale - 1.0).abs() < f64::EPSILON);
        assert_eq!(config.background_color().unwrap(), ShapeColor::white());
    }

    #[test]
    fn test_invalid_values_rejected() {
        assert!(matches!(
            ShowcaseConfig::from_json(r#"{ "background": "chartreuse-ish" }"#),
            Err(ConfigError::Color(_))
        ));
        assert!(matches!(
            ShowcaseConfig::from_json(r#"{ "print_scale": 0 }"#),
            Err(ConfigError::InvalidScale { name: "print_scale", .. })
        ));
        assert!(matches!(ShowcaseConfig::from_json("{"), Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_load_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = ShowcaseConfig::load(Some(&dir.path().join("nope.json"))).unwrap();
        assert_eq!(config, ShowcaseConfig::default());
    }

    #[test]
    fn test_load_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r##"{{ "background": "#f7fafc", "container_width": 400 }}"##).unwrap();
        let config = ShowcaseConfig::load(Some(file.path())).unwrap();
        assert_eq!(config.background_color().unwrap(), ShapeColor::rgb(0xf7, 0xfa, 0xfc));
        assert!((config.container_width - 400.0).abs() < f64::EPSILON);
    }
}
