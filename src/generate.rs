// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Icon generation entry point

use crate::fonts::{library, FontLibrary, FontSet};
use crate::icon::{IconSpec, Renderer};
use image::ImageFormat;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Placeholder in [`GeneratorConfig::file_name`] replaced by the icon size
pub const SIZE_PLACEHOLDER: &str = "{size}";

/// Icon generation errors
#[derive(Error, Debug)]
pub enum Error {
    #[error("icon sizes must be non-zero")]
    ZeroSize,
    #[error("file name {0:?} must contain \"{{size}}\" when generating several sizes")]
    Pattern(String),
    #[error("failed to create output directory {}", .0.display())]
    CreateDir(PathBuf, #[source] std::io::Error),
    #[error("failed to write {}", .0.display())]
    Write(PathBuf, #[source] image::ImageError),
}

/// What to generate and where
#[derive(Clone, Debug, PartialEq)]
pub struct GeneratorConfig {
    /// Icon sizes (square), in pixels
    pub sizes: Vec<u32>,
    /// Directory to write to; created if missing
    pub output_dir: PathBuf,
    /// File name pattern; see [`SIZE_PLACEHOLDER`]
    pub file_name: String,
    pub fonts: FontSet,
    pub icon: IconSpec,
}

impl Default for GeneratorConfig {
    /// The standard browser-extension set: `icon16.png`, `icon48.png` and
    /// `icon128.png` in the working directory
    fn default() -> Self {
        GeneratorConfig {
            sizes: vec![16, 48, 128],
            output_dir: PathBuf::from("."),
            file_name: format!("icon{SIZE_PLACEHOLDER}.png"),
            fonts: FontSet::default(),
            icon: IconSpec::default(),
        }
    }
}

impl GeneratorConfig {
    /// Output path for an icon of `size`
    pub fn path_for(&self, size: u32) -> PathBuf {
        let name = self.file_name.replace(SIZE_PLACEHOLDER, &size.to_string());
        self.output_dir.join(name)
    }

    /// Check sizes and file name
    pub fn validate(&self) -> Result<(), Error> {
        if self.sizes.contains(&0) {
            return Err(Error::ZeroSize);
        }
        if self.sizes.len() > 1 && !self.file_name.contains(SIZE_PLACEHOLDER) {
            return Err(Error::Pattern(self.file_name.clone()));
        }
        Ok(())
    }
}

fn write_png(image: &image::RgbaImage, path: &Path) -> Result<(), Error> {
    image
        .save_with_format(path, ImageFormat::Png)
        .map_err(|err| Error::Write(path.to_path_buf(), err))
}

/// Render and write one PNG per configured size
///
/// Returns the written paths in the order of [`GeneratorConfig::sizes`].
pub fn generate(config: &GeneratorConfig) -> Result<Vec<PathBuf>, Error> {
    generate_with(library(), config)
}

/// As [`generate`], using the given font library
pub fn generate_with(library: &FontLibrary, config: &GeneratorConfig) -> Result<Vec<PathBuf>, Error> {
    config.validate()?;

    let dir = &config.output_dir;
    if !dir.as_os_str().is_empty() && !dir.is_dir() {
        std::fs::create_dir_all(dir).map_err(|err| Error::CreateDir(dir.clone(), err))?;
    }

    let renderer = Renderer {
        library,
        fonts: &config.fonts,
    };

    let mut written = Vec::with_capacity(config.sizes.len());
    for &size in &config.sizes {
        let image = renderer.render(&config.icon, size);
        let path = config.path_for(size);
        write_png(&image, &path)?;
        log::info!("Created {} ({size}x{size})", path.display());
        written.push(path);
    }
    Ok(written)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn default_paths() {
        let config = GeneratorConfig::default();
        assert_eq!(config.path_for(48), PathBuf::from("./icon48.png"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn validation() {
        let mut config = GeneratorConfig {
            sizes: vec![16, 0],
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(Error::ZeroSize)));

        config.sizes = vec![16, 32];
        config.file_name = "icon.png".to_string();
        assert!(matches!(config.validate(), Err(Error::Pattern(_))));

        config.sizes = vec![16];
        assert!(config.validate().is_ok());
    }
}
