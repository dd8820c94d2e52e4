// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Generator configuration files
//!
//! Configuration is JSON. Every field is optional:
//!
//! ```json
//! {
//!     "sizes": [16, 48, 128],
//!     "output_dir": "icons",
//!     "file_name": "icon{size}.png",
//!     "fonts": {
//!         "regular": [{ "path": { "path": "fonts/Inter-Regular.ttf" } }],
//!         "bold": [{ "family": { "name": "Inter", "weight": 700 } }]
//!     },
//!     "preset": "wg-pair"
//! }
//! ```
//!
//! An explicit `"icon"` specification takes precedence over `"preset"`.

use crate::fonts::FontSet;
use crate::generate::GeneratorConfig;
use crate::icon::IconSpec;
use crate::presets::Preset;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Configuration loading errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file")]
    Io(#[from] std::io::Error),
    #[error("invalid config")]
    Json(#[from] serde_json::Error),
}

/// The on-disk form of a [`GeneratorConfig`]
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigFile {
    pub sizes: Vec<u32>,
    pub output_dir: PathBuf,
    pub file_name: String,
    pub fonts: FontSet,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preset: Option<Preset>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<IconSpec>,
}

impl Default for ConfigFile {
    fn default() -> Self {
        let config = GeneratorConfig::default();
        ConfigFile {
            sizes: config.sizes,
            output_dir: config.output_dir,
            file_name: config.file_name,
            fonts: config.fonts,
            preset: None,
            icon: None,
        }
    }
}

impl From<ConfigFile> for GeneratorConfig {
    fn from(file: ConfigFile) -> Self {
        let icon = match (file.icon, file.preset) {
            (Some(icon), preset) => {
                if let Some(preset) = preset {
                    log::warn!("config: explicit icon overrides preset {preset}");
                }
                icon
            }
            (None, Some(preset)) => preset.spec(),
            (None, None) => IconSpec::default(),
        };

        GeneratorConfig {
            sizes: file.sizes,
            output_dir: file.output_dir,
            file_name: file.file_name,
            fonts: file.fonts,
            icon,
        }
    }
}

impl GeneratorConfig {
    /// Parse configuration from a JSON string
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let file: ConfigFile = serde_json::from_str(json)?;
        Ok(file.into())
    }

    /// Load configuration from a JSON file
    ///
    /// A relative `output_dir` is kept relative to the working directory.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        log::debug!("loading config from {}", path.display());
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::fonts::{FontResource, FontSource, WEIGHT_BOLD};

    #[test]
    fn empty_is_default() {
        let config = GeneratorConfig::from_json("{}").unwrap();
        assert_eq!(config, GeneratorConfig::default());
    }

    #[test]
    fn preset_and_fields() {
        let json = r#"{
            "sizes": [32],
            "output_dir": "out",
            "file_name": "logo.png",
            "fonts": {
                "bold": [{ "family": { "name": "Inter", "weight": 700 } }]
            },
            "preset": "g-badge"
        }"#;
        let config = GeneratorConfig::from_json(json).unwrap();
        assert_eq!(config.sizes, [32]);
        assert_eq!(config.path_for(32), PathBuf::from("out/logo.png"));
        assert_eq!(config.icon, Preset::GBadge.spec());
        assert_eq!(
            config.fonts.bold,
            FontResource::from_candidates([FontSource::family("Inter", WEIGHT_BOLD)])
        );
        // unspecified roles keep their defaults
        assert_eq!(config.fonts.regular, FontSet::default().regular);
    }

    #[test]
    fn unknown_field() {
        let err = GeneratorConfig::from_json(r#"{ "size": [16] }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Json(_)));
    }

    #[test]
    fn missing_file() {
        let err = GeneratorConfig::load("/nonexistent/glyph-icons.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
