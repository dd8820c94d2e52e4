// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Icon specification and rendering
//!
//! An [`IconSpec`] is a background colour plus a stack of [`Layer`]s, drawn
//! in order. All lengths are given relative to the icon size so that one
//! specification renders at any size.

use crate::fit::{fit_with, LibraryFonts};
use crate::fonts::{library, Font, FontLibrary, FontRole, FontSet, MAX_DPEM};
use crate::raster::{Anchor, Canvas, Color, Embolden, TextStyle};
use easy_cast::{Cast, Conv, ConvFloat};
use image::{Rgba, RgbaImage};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Padding around a best-fit glyph
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Padding {
    /// Fixed pixels
    Pixels(u32),
    /// Fraction of the cell size, rounded down
    ///
    /// The ratio is clamped to `0..=1`.
    Ratio(f32),
}

impl Padding {
    /// Padding in pixels for a cell of `cell` pixels
    pub fn pixels(self, cell: u32) -> u32 {
        match self {
            Padding::Pixels(px) => px,
            Padding::Ratio(r) => u32::conv_floor(f32::conv(cell) * r.max(0.0).min(1.0)),
        }
    }
}

/// How a glyph's font size is chosen
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Sizing {
    /// The largest size at which the glyph's ink fits its padded cell
    BestFit { padding: Padding },
    /// `max(⌊cell × ratio⌋, min)`
    ///
    /// Sizes are limited to [`MAX_DPEM`].
    Fraction { ratio: f32, min: u32 },
}

impl Sizing {
    /// Font size of a [`Sizing::Fraction`] in a cell of `cell` pixels
    ///
    /// Returns `None` for [`Sizing::BestFit`].
    pub fn fraction_size(self, cell: u32) -> Option<u32> {
        match self {
            Sizing::BestFit { .. } => None,
            Sizing::Fraction { ratio, min } => {
                let size = (f32::conv(cell) * ratio.max(0.0)).min(f32::conv(MAX_DPEM));
                Some(u32::conv_floor(size).max(min))
            }
        }
    }
}

/// A glyph (or short text) with its colour and font
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GlyphSpec {
    pub text: String,
    #[cfg_attr(feature = "serde", serde(with = "rgba"))]
    pub color: Color,
    #[cfg_attr(feature = "serde", serde(default))]
    pub role: FontRole,
    pub sizing: Sizing,
    #[cfg_attr(feature = "serde", serde(default))]
    pub embolden: Embolden,
}

impl GlyphSpec {
    /// Construct with regular role and no emboldening
    pub fn new(text: impl ToString, color: Color, sizing: Sizing) -> Self {
        GlyphSpec {
            text: text.to_string(),
            color,
            role: FontRole::Regular,
            sizing,
            embolden: Embolden::Never,
        }
    }

    /// Set the font role
    #[must_use]
    pub fn role(mut self, role: FontRole) -> Self {
        self.role = role;
        self
    }

    /// Set emboldening
    #[must_use]
    pub fn embolden(mut self, embolden: Embolden) -> Self {
        self.embolden = embolden;
        self
    }

    /// Resolve a font for a square cell of `cell` pixels
    pub fn font(&self, cell: u32, ctx: &Renderer) -> Font {
        let resource = ctx.fonts.get(self.role);
        if let Sizing::BestFit { padding } = self.sizing {
            let fonts = LibraryFonts {
                library: ctx.library,
                resource,
            };
            return fit_with(&self.text, cell, padding.pixels(cell), &fonts);
        }

        let size = self.sizing.fraction_size(cell).unwrap_or(cell);
        ctx.library.resolve_or_default(resource, size)
    }

    /// Draw style: best-fit glyphs are centred on their ink, others on the
    /// `mm` anchor
    pub fn style(&self) -> TextStyle {
        let style = TextStyle::new(self.color).embolden(self.embolden);
        match self.sizing {
            Sizing::BestFit { .. } => style.ink_centered(),
            Sizing::Fraction { .. } => style.anchored(Anchor::MIDDLE),
        }
    }

    fn draw(&self, canvas: &mut Canvas, font: &Font, pos: (f32, f32)) {
        canvas.draw_text(font, &self.text, pos, &self.style());
    }
}

/// Grid dimension rule for tiled glyphs
///
/// Icons of at least `threshold` pixels use a `large × large` grid,
/// smaller icons `small × small`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Grid {
    pub small: u32,
    pub large: u32,
    pub threshold: u32,
}

impl Grid {
    /// Grid dimension at `size`
    pub fn dim(&self, size: u32) -> u32 {
        if size >= self.threshold {
            self.large
        } else {
            self.small
        }
    }

    /// Centres of grid cells at `size`, row-major
    ///
    /// The grid dimension is limited to `size`.
    pub fn points(&self, size: u32) -> Vec<(u32, u32)> {
        let n = self.dim(size).min(size);
        let spacing = size / n.saturating_add(1);
        (0..n)
            .flat_map(|row| (0..n).map(move |col| (spacing * (col + 1), spacing * (row + 1))))
            .collect()
    }
}

/// Upward nudge: `max(min, size / divisor)` pixels
///
/// A `divisor` of zero disables the proportional part.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Lift {
    pub divisor: u32,
    pub min: u32,
}

impl Lift {
    /// No lift
    pub const NONE: Lift = Lift { divisor: 0, min: 0 };

    /// Lift in pixels at `size`
    pub fn pixels(self, size: u32) -> u32 {
        size.checked_div(self.divisor).unwrap_or(0).max(self.min)
    }
}

/// A background shape; lengths are fractions of the icon size
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Shape {
    /// The whole canvas
    Fill,
    /// A square inset from each edge
    Rect { inset: f32 },
    /// A square with rounded corners
    RoundedRect { inset: f32, radius: f32 },
    /// A centred circle
    Circle { inset: f32 },
}

impl Shape {
    fn draw(self, canvas: &mut Canvas, size: u32, color: Color) {
        let s = f32::conv(size);
        let square = |inset: f32| {
            let i = s * inset;
            (i, i, s - i, s - i)
        };
        match self {
            Shape::Fill => canvas.fill_rect((0.0, 0.0, s, s), color),
            Shape::Rect { inset } => canvas.fill_rect(square(inset), color),
            Shape::RoundedRect { inset, radius } => {
                canvas.fill_rounded_rect(square(inset), s * radius, color)
            }
            Shape::Circle { inset } => {
                let r = 0.5 * s - s * inset;
                canvas.fill_ellipse((0.5 * s, 0.5 * s), (r, r), color)
            }
        }
    }
}

/// A horizontal bar joining two side-by-side glyphs
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Connector {
    #[cfg_attr(feature = "serde", serde(with = "rgba"))]
    pub color: Color,
    /// Bar thickness as a fraction of the icon size (at least one pixel)
    pub thickness: f32,
}

/// One drawing step of an icon
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "snake_case"))]
pub enum Layer {
    /// A filled shape
    Shape {
        shape: Shape,
        #[cfg_attr(feature = "serde", serde(with = "rgba"))]
        color: Color,
    },
    /// A glyph repeated over a grid; sized against the full icon
    Tile { glyph: GlyphSpec, grid: Grid },
    /// A single glyph at the centre, raised by `lift`
    Centered {
        glyph: GlyphSpec,
        #[cfg_attr(feature = "serde", serde(default))]
        lift: Lift,
    },
    /// Two glyphs side by side, each sized against a half-width cell
    SideBySide {
        left: GlyphSpec,
        right: GlyphSpec,
        /// Gap between the cells as a fraction of the icon size
        #[cfg_attr(feature = "serde", serde(default))]
        gap: f32,
        #[cfg_attr(feature = "serde", serde(default))]
        connector: Option<Connector>,
    },
}

impl Layer {
    fn draw(&self, canvas: &mut Canvas, size: u32, ctx: &Renderer) {
        match self {
            Layer::Shape { shape, color } => shape.draw(canvas, size, *color),
            Layer::Tile { glyph, grid } => {
                let font = glyph.font(size, ctx);
                for (x, y) in grid.points(size) {
                    glyph.draw(canvas, &font, (x.cast(), y.cast()));
                }
            }
            Layer::Centered { glyph, lift } => {
                let font = glyph.font(size, ctx);
                let half = size / 2;
                let y = i32::conv(half) - i32::conv(lift.pixels(size));
                glyph.draw(canvas, &font, (half.cast(), y.cast()));
            }
            Layer::SideBySide {
                left,
                right,
                gap,
                connector,
            } => {
                let gap = u32::conv_floor(f32::conv(size) * gap.max(0.0).min(1.0)).min(size);
                let cell = (size - gap) / 2;
                let s = f32::conv(size);
                let c = f32::conv(cell);
                let y = 0.5 * s;

                if let Some(connector) = connector {
                    let t = (s * connector.thickness).max(1.0).min(s);
                    let bar = (0.75 * c, y - 0.5 * t, s - 0.75 * c, y + 0.5 * t);
                    canvas.fill_rect(bar, connector.color);
                }

                if cell == 0 {
                    log::warn!("side-by-side: no room for glyphs at size {size}");
                    return;
                }
                let font = left.font(cell, ctx);
                left.draw(canvas, &font, (0.5 * c, y));
                let font = right.font(cell, ctx);
                right.draw(canvas, &font, (s - 0.5 * c, y));
            }
        }
    }
}

/// Font context for rendering
#[derive(Clone, Copy)]
pub struct Renderer<'a> {
    pub library: &'a FontLibrary,
    pub fonts: &'a FontSet,
}

impl<'a> Renderer<'a> {
    /// Construct over the global [`FontLibrary`]
    pub fn new(fonts: &'a FontSet) -> Self {
        Renderer {
            library: library(),
            fonts,
        }
    }

    /// Render `spec` as a `size × size` image
    ///
    /// A size of zero (or too large to allocate) yields an empty image.
    pub fn render(&self, spec: &IconSpec, size: u32) -> RgbaImage {
        let Some(mut canvas) = Canvas::new(size, size, spec.background) else {
            log::warn!("cannot render an icon of size {size}");
            return RgbaImage::new(0, 0);
        };
        for layer in &spec.layers {
            layer.draw(&mut canvas, size, self);
        }
        canvas.into_image()
    }
}

/// A complete icon design
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct IconSpec {
    #[cfg_attr(feature = "serde", serde(with = "rgba"))]
    pub background: Color,
    pub layers: Vec<Layer>,
}

impl IconSpec {
    /// Transparent background and no layers
    pub fn new() -> Self {
        IconSpec {
            background: Rgba([0, 0, 0, 0]),
            layers: vec![],
        }
    }

    /// Append a layer
    #[must_use]
    pub fn layer(mut self, layer: Layer) -> Self {
        self.layers.push(layer);
        self
    }

    /// Render at `size` using `fonts` from the global library
    pub fn render(&self, size: u32, fonts: &FontSet) -> RgbaImage {
        Renderer::new(fonts).render(self, size)
    }
}

impl Default for IconSpec {
    fn default() -> Self {
        crate::presets::Preset::default().spec()
    }
}

// Colours are (de)serialized as `[r, g, b, a]`.
#[cfg(feature = "serde")]
mod rgba {
    use image::Rgba;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S: Serializer>(color: &Rgba<u8>, s: S) -> Result<S::Ok, S::Error> {
        color.0.serialize(s)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Rgba<u8>, D::Error> {
        <[u8; 4]>::deserialize(d).map(Rgba)
    }
}
