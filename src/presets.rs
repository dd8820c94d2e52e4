// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Shipped icon designs

use crate::fonts::FontRole;
use crate::icon::{Connector, GlyphSpec, Grid, IconSpec, Layer, Lift, Padding, Shape, Sizing};
use crate::raster::Embolden;
use image::Rgba;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);
const TRANSPARENT: Rgba<u8> = Rgba([0, 0, 0, 0]);
const GREEN: Rgba<u8> = Rgba([52, 168, 83, 255]);
const LIGHT_GREY: Rgba<u8> = Rgba([220, 220, 220, 150]);
const DARK: Rgba<u8> = Rgba([32, 33, 36, 255]);

/// A named icon design
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum Preset {
    /// A large green bold "g" over a faint grid of small "w"s
    #[default]
    GOnW,
    /// "w" and "g" side by side on a dark rounded square, joined by a bar
    WgPair,
    /// A white bold "g" filling a green disc
    GBadge,
}

impl Preset {
    /// All presets
    pub const ALL: [Preset; 3] = [Preset::GOnW, Preset::WgPair, Preset::GBadge];

    /// Preset name as used in configuration
    pub fn name(self) -> &'static str {
        match self {
            Preset::GOnW => "g-on-w",
            Preset::WgPair => "wg-pair",
            Preset::GBadge => "g-badge",
        }
    }

    /// Get the icon specification
    pub fn spec(self) -> IconSpec {
        match self {
            Preset::GOnW => g_on_w(),
            Preset::WgPair => wg_pair(),
            Preset::GBadge => g_badge(),
        }
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Unknown preset name
#[derive(Error, Debug, PartialEq, Eq)]
#[error("unknown preset {0:?}")]
pub struct UnknownPreset(pub String);

impl FromStr for Preset {
    type Err = UnknownPreset;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Preset::ALL
            .into_iter()
            .find(|p| p.name() == s)
            .ok_or_else(|| UnknownPreset(s.to_string()))
    }
}

fn g_on_w() -> IconSpec {
    let w = GlyphSpec::new("w", LIGHT_GREY, Sizing::Fraction { ratio: 0.25, min: 4 });
    let g = GlyphSpec::new("g", GREEN, Sizing::Fraction { ratio: 0.65, min: 8 })
        .role(FontRole::Bold);

    IconSpec {
        background: WHITE,
        layers: vec![
            Layer::Tile {
                glyph: w,
                grid: Grid {
                    small: 2,
                    large: 3,
                    threshold: 48,
                },
            },
            // Raised a little: the descender of "g" makes it look low
            Layer::Centered {
                glyph: g,
                lift: Lift { divisor: 32, min: 1 },
            },
        ],
    }
}

fn wg_pair() -> IconSpec {
    let sizing = Sizing::BestFit {
        padding: Padding::Ratio(0.12),
    };

    IconSpec {
        background: TRANSPARENT,
        layers: vec![
            Layer::Shape {
                shape: Shape::RoundedRect {
                    inset: 0.0,
                    radius: 0.2,
                },
                color: DARK,
            },
            Layer::SideBySide {
                left: GlyphSpec::new("w", WHITE, sizing),
                right: GlyphSpec::new("g", GREEN, sizing).role(FontRole::Bold),
                gap: 0.0,
                connector: Some(Connector {
                    color: Rgba([52, 168, 83, 160]),
                    thickness: 0.06,
                }),
            },
        ],
    }
}

fn g_badge() -> IconSpec {
    let g = GlyphSpec::new("g", WHITE, Sizing::BestFit {
        padding: Padding::Ratio(0.18),
    })
    .role(FontRole::Bold)
    .embolden(Embolden::Synthesize(1));

    IconSpec {
        background: TRANSPARENT,
        layers: vec![
            Layer::Shape {
                shape: Shape::Circle { inset: 0.0 },
                color: GREEN,
            },
            Layer::Centered {
                glyph: g,
                lift: Lift::NONE,
            },
        ],
    }
}
