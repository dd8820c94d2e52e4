// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Letter-glyph icon generation
//!
//! This crate renders small square icons made of letter glyphs, such as the
//! 16, 48 and 128 pixel icons of a browser extension.
//!
//! -   [`fonts`]: font resources with fallback, a font library and a built-in
//!     bitmap font
//! -   [`fit`]: best-fit sizing, choosing the largest font size at which text
//!     fits a padded square
//! -   [`raster`]: drawing text and shapes onto an RGBA canvas
//! -   [`icon`] and [`presets`]: a parameterised icon description
//! -   [`generate()`]: render and write PNGs for a list of sizes
//!
//! ```no_run
//! use glyph_icons::{generate, GeneratorConfig};
//!
//! let config = GeneratorConfig::default();
//! for path in generate(&config)? {
//!     println!("{}", path.display());
//! }
//! # Ok::<(), glyph_icons::Error>(())
//! ```

pub mod conv;
pub mod fit;
pub mod fonts;
pub mod icon;
pub mod measure;
pub mod presets;
pub mod raster;

mod generate;
pub use generate::{generate, generate_with, Error, GeneratorConfig, SIZE_PLACEHOLDER};

#[cfg(feature = "serde")]
pub mod config;
