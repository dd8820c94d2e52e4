// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! `glyph-icons [CONFIG]`: write the configured icons as PNG files
//!
//! Without a config file, the default design is written as `icon16.png`,
//! `icon48.png` and `icon128.png` in the working directory.

use anyhow::Context;
use glyph_icons::{generate, GeneratorConfig};
use log::info;

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut args = std::env::args_os().skip(1);
    let config = match args.next() {
        Some(path) => GeneratorConfig::load(&path)
            .with_context(|| format!("failed to load config {}", path.to_string_lossy()))?,
        None => {
            info!("No config file given; using defaults");
            GeneratorConfig::default()
        }
    };
    if args.next().is_some() {
        anyhow::bail!("usage: glyph-icons [CONFIG]");
    }

    let written = generate(&config).context("icon generation failed")?;
    info!("All {} icons created successfully!", written.len());
    Ok(())
}
