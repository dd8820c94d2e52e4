// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Drawing text and shapes onto an RGBA canvas
//!
//! A [`Canvas`] wraps a [`tiny_skia::Pixmap`]. Shapes are filled as
//! anti-aliased paths; text coverage from `ab_glyph` (or the built-in font)
//! is gathered into a [`tiny_skia::Mask`] and filled through it. All drawing
//! uses "source over" blending.
//!
//! # Example
//!
//! ```
//! use glyph_icons::fonts::Font;
//! use glyph_icons::raster::{Anchor, Canvas, TextStyle};
//! use image::Rgba;
//!
//! let white = Rgba([255, 255, 255, 255]);
//! let mut canvas = Canvas::new(16, 16, white).unwrap();
//! let style = TextStyle::new(Rgba([52, 168, 83, 255])).anchored(Anchor::MIDDLE);
//! canvas.draw_text(&Font::default(), "g", (8.0, 8.0), &style);
//! let image = canvas.into_image();
//! assert!(image.pixels().any(|p| p != &white));
//! ```

use crate::conv::floor_px;
use crate::fonts::{BuiltinFont, Font, ScaledFace};
use crate::measure::Measure;
use ab_glyph::Font as _;
use easy_cast::{Conv, ConvFloat};
use image::{Rgba, RgbaImage};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;
use tiny_skia::{BlendMode, FillRule, Mask, Paint, Path, PathBuilder, Pixmap, Rect, Transform};

/// Colour type: non-premultiplied RGBA
pub type Color = Rgba<u8>;

/// Horizontal anchor: position on the text's advance
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum HAnchor {
    #[default]
    Left,
    Middle,
    Right,
}

/// Vertical anchor: position on the font's line metrics
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum VAnchor {
    #[default]
    Ascender,
    /// Half way between ascender and descender
    Middle,
    Baseline,
    Descender,
}

/// Text anchor
///
/// Anchors parse from (and display as) two-letter codes: horizontal `l`,
/// `m` or `r` followed by vertical `a`, `m`, `s` (baseline) or `d`. The
/// default is `la`: the given position is the top-left of the line.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "String", into = "String"))]
pub struct Anchor {
    pub h: HAnchor,
    pub v: VAnchor,
}

impl Anchor {
    /// `la`
    pub const TOP_LEFT: Anchor = Anchor {
        h: HAnchor::Left,
        v: VAnchor::Ascender,
    };
    /// `mm`
    pub const MIDDLE: Anchor = Anchor {
        h: HAnchor::Middle,
        v: VAnchor::Middle,
    };

    /// Layout origin (ascender line at pen start) for text anchored at `pos`
    pub fn origin(self, font: &impl Measure, text: &str, pos: (f32, f32)) -> (f32, f32) {
        let advance = font.advance(text);
        let x = match self.h {
            HAnchor::Left => pos.0,
            HAnchor::Middle => pos.0 - 0.5 * advance,
            HAnchor::Right => pos.0 - advance,
        };
        let (ascent, descent) = (font.ascent(), font.descent());
        let y = match self.v {
            VAnchor::Ascender => pos.1,
            VAnchor::Middle => pos.1 - 0.5 * (ascent - descent),
            VAnchor::Baseline => pos.1 - ascent,
            VAnchor::Descender => pos.1 - (ascent - descent),
        };
        (x, y)
    }
}

/// Failed to parse an [`Anchor`]
#[derive(Error, Debug, PartialEq, Eq)]
#[error("invalid anchor {0:?}: expected one of l/m/r followed by one of a/m/s/d")]
pub struct InvalidAnchor(pub String);

impl FromStr for Anchor {
    type Err = InvalidAnchor;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        let h = match chars.next() {
            Some('l') => HAnchor::Left,
            Some('m') => HAnchor::Middle,
            Some('r') => HAnchor::Right,
            _ => return Err(InvalidAnchor(s.to_string())),
        };
        let v = match chars.next() {
            Some('a') => VAnchor::Ascender,
            Some('m') => VAnchor::Middle,
            Some('s') => VAnchor::Baseline,
            Some('d') => VAnchor::Descender,
            _ => return Err(InvalidAnchor(s.to_string())),
        };
        if chars.next().is_some() {
            return Err(InvalidAnchor(s.to_string()));
        }
        Ok(Anchor { h, v })
    }
}

impl std::fmt::Display for Anchor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let h = match self.h {
            HAnchor::Left => 'l',
            HAnchor::Middle => 'm',
            HAnchor::Right => 'r',
        };
        let v = match self.v {
            VAnchor::Ascender => 'a',
            VAnchor::Middle => 'm',
            VAnchor::Baseline => 's',
            VAnchor::Descender => 'd',
        };
        write!(f, "{h}{v}")
    }
}

impl TryFrom<String> for Anchor {
    type Error = InvalidAnchor;
    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Anchor> for String {
    fn from(anchor: Anchor) -> Self {
        anchor.to_string()
    }
}

/// Where text is placed relative to the given position
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Placement {
    /// Position an anchor on the line metrics
    Anchor(Anchor),
    /// Centre the measured ink box on the position
    InkCenter,
}

impl Default for Placement {
    fn default() -> Self {
        Placement::Anchor(Anchor::TOP_LEFT)
    }
}

/// Bold simulation by offset stamping
///
/// A stamped glyph is drawn at every offset `(dx, dy)` with `0 ≤ dx, dy ≤
/// radius`, then shifted back by half the radius.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Embolden {
    #[default]
    Never,
    /// Always stamp with the given radius
    Always(u32),
    /// Stamp only when the font is not itself bold
    Synthesize(u32),
}

impl Embolden {
    /// Stamp radius to use with `font`
    pub fn radius(self, font: &Font) -> u32 {
        match self {
            Embolden::Never => 0,
            Embolden::Always(r) => r,
            Embolden::Synthesize(r) if !font.is_bold() => r,
            Embolden::Synthesize(_) => 0,
        }
    }
}

/// Text drawing style
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TextStyle {
    pub color: Color,
    pub placement: Placement,
    pub embolden: Embolden,
}

impl TextStyle {
    /// Top-left placement, no emboldening
    pub fn new(color: Color) -> Self {
        TextStyle {
            color,
            placement: Placement::default(),
            embolden: Embolden::Never,
        }
    }

    /// Use `anchor` for placement
    #[must_use]
    pub fn anchored(mut self, anchor: Anchor) -> Self {
        self.placement = Placement::Anchor(anchor);
        self
    }

    /// Centre the ink box on the position
    #[must_use]
    pub fn ink_centered(mut self) -> Self {
        self.placement = Placement::InkCenter;
        self
    }

    /// Set emboldening
    #[must_use]
    pub fn embolden(mut self, embolden: Embolden) -> Self {
        self.embolden = embolden;
        self
    }
}

// Cubic Bézier approximation of a quarter circle: 4/3 × tan(π/8)
const KAPPA: f32 = 0.552_284_8;

fn skia_color(color: Color) -> tiny_skia::Color {
    tiny_skia::Color::from_rgba8(color[0], color[1], color[2], color[3])
}

fn paint(color: Color) -> Paint<'static> {
    let mut paint = Paint::default();
    paint.set_color(skia_color(color));
    paint.anti_alias = true;
    paint.blend_mode = BlendMode::SourceOver;
    paint
}

fn rounded_rect_path(rect: (f32, f32, f32, f32), radius: f32) -> Option<Path> {
    let (x0, y0, x1, y1) = rect;
    let r = radius.max(0.0).min(0.5 * (x1 - x0)).min(0.5 * (y1 - y0));
    if r <= 0.0 {
        return Rect::from_ltrb(x0, y0, x1, y1).map(PathBuilder::from_rect);
    }

    // Distance from a corner's straight edge to its control point
    let k = r * (1.0 - KAPPA);
    let mut pb = PathBuilder::new();
    pb.move_to(x0 + r, y0);
    pb.line_to(x1 - r, y0);
    pb.cubic_to(x1 - k, y0, x1, y0 + k, x1, y0 + r);
    pb.line_to(x1, y1 - r);
    pb.cubic_to(x1, y1 - k, x1 - k, y1, x1 - r, y1);
    pb.line_to(x0 + r, y1);
    pb.cubic_to(x0 + k, y1, x0, y1 - k, x0, y1 - r);
    pb.line_to(x0, y0 + r);
    pb.cubic_to(x0, y0 + k, x0 + k, y0, x0 + r, y0);
    pb.close();
    pb.finish()
}

// Raise the coverage at `(x, y)` to at least `coverage`
fn cover(mask: &mut Mask, x: i32, y: i32, coverage: f32) {
    let (Ok(x), Ok(y)) = (u32::try_from(x), u32::try_from(y)) else {
        return;
    };
    let width = mask.width();
    if x >= width || y >= mask.height() {
        return;
    }
    let value = u8::conv_nearest(coverage.clamp(0.0, 1.0) * 255.0);
    let index = usize::conv(y) * usize::conv(width) + usize::conv(x);
    let px = &mut mask.data_mut()[index];
    *px = (*px).max(value);
}

fn cover_face(mask: &mut Mask, face: &ScaledFace, text: &str, origin: (f32, f32)) {
    let font = face.store().ab_glyph();
    let (glyphs, _) = face.layout(text);
    for glyph in &glyphs {
        let Some(outline) = font.outline_glyph(face.glyph_at(glyph, origin)) else {
            continue;
        };
        let bounds = outline.px_bounds();
        let (x0, y0) = (floor_px(bounds.min.x), floor_px(bounds.min.y));
        outline.draw(|x, y, c| {
            cover(mask, x0.saturating_add_unsigned(x), y0.saturating_add_unsigned(y), c);
        });
    }
}

fn cover_builtin(mask: &mut Mask, text: &str, origin: (f32, f32)) {
    let (x0, y0) = (floor_px(origin.0 + 0.5), floor_px(origin.1 + 0.5));
    for (x, y) in BuiltinFont::pixels(text) {
        cover(mask, x0.saturating_add(x), y0.saturating_add(y), 1.0);
    }
}

/// An RGBA drawing surface
///
/// Pixels are stored premultiplied; [`Canvas::pixel`] and
/// [`Canvas::into_image`] return straight alpha.
#[derive(Clone, Debug)]
pub struct Canvas {
    pixmap: Pixmap,
}

impl Canvas {
    /// Construct a `width × height` canvas filled with `background`
    ///
    /// Returns `None` if either dimension is zero or the canvas is too large.
    pub fn new(width: u32, height: u32, background: Color) -> Option<Self> {
        let mut pixmap = Pixmap::new(width, height)?;
        pixmap.fill(skia_color(background));
        Some(Canvas { pixmap })
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    /// Get pixel `(x, y)`, or `None` if out of range
    pub fn pixel(&self, x: u32, y: u32) -> Option<Color> {
        let c = self.pixmap.pixel(x, y)?.demultiply();
        Some(Rgba([c.red(), c.green(), c.blue(), c.alpha()]))
    }

    /// Convert to an image
    pub fn into_image(self) -> RgbaImage {
        RgbaImage::from_fn(self.width(), self.height(), |x, y| {
            self.pixel(x, y).unwrap_or(Rgba([0, 0, 0, 0]))
        })
    }

    fn fill_path(&mut self, path: &Path, color: Color) {
        self.pixmap.fill_path(
            path,
            &paint(color),
            FillRule::Winding,
            Transform::identity(),
            None,
        );
    }

    /// Fill the axis-aligned rectangle `(x0, y0, x1, y1)`
    pub fn fill_rect(&mut self, rect: (f32, f32, f32, f32), color: Color) {
        if let Some(rect) = Rect::from_ltrb(rect.0, rect.1, rect.2, rect.3) {
            self.fill_path(&PathBuilder::from_rect(rect), color);
        }
    }

    /// Fill a rectangle with rounded corners
    ///
    /// The radius is limited to half the shorter side.
    pub fn fill_rounded_rect(&mut self, rect: (f32, f32, f32, f32), radius: f32, color: Color) {
        if let Some(path) = rounded_rect_path(rect, radius) {
            self.fill_path(&path, color);
        }
    }

    /// Fill an axis-aligned ellipse
    pub fn fill_ellipse(&mut self, center: (f32, f32), radii: (f32, f32), color: Color) {
        let (cx, cy) = center;
        let (rx, ry) = radii;
        let path = Rect::from_ltrb(cx - rx, cy - ry, cx + rx, cy + ry).and_then(PathBuilder::from_oval);
        if let Some(path) = path {
            self.fill_path(&path, color);
        }
    }

    /// Draw `text` on a single line
    pub fn draw_text(&mut self, font: &Font, text: &str, pos: (f32, f32), style: &TextStyle) {
        let (mut x, mut y) = match style.placement {
            Placement::Anchor(anchor) => anchor.origin(font, text, pos),
            Placement::InkCenter => {
                let (cx, cy) = font.text_box(text).center();
                (pos.0 - cx, pos.1 - cy)
            }
        };

        let radius = style.embolden.radius(font);
        let half = (0.5 * f32::conv(radius)).floor();
        x -= half;
        y -= half;

        let Some(mut mask) = Mask::new(self.width(), self.height()) else {
            return;
        };
        for dy in 0..=radius {
            for dx in 0..=radius {
                let origin = (x + f32::conv(dx), y + f32::conv(dy));
                match font {
                    Font::Face(face) => cover_face(&mut mask, face, text, origin),
                    Font::Builtin(_) => cover_builtin(&mut mask, text, origin),
                }
            }
        }

        if let Some(rect) = Rect::from_xywh(
            0.0,
            0.0,
            self.pixmap.width() as f32,
            self.pixmap.height() as f32,
        ) {
            self.pixmap
                .fill_rect(rect, &paint(style.color), Transform::identity(), Some(&mask));
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    const WHITE: Color = Rgba([255, 255, 255, 255]);
    const BLACK: Color = Rgba([0, 0, 0, 255]);

    fn white(size: u32) -> Canvas {
        Canvas::new(size, size, WHITE).unwrap()
    }

    fn ink(canvas: &Canvas) -> Vec<(u32, u32)> {
        let mut pixels = vec![];
        for y in 0..canvas.height() {
            for x in 0..canvas.width() {
                if canvas.pixel(x, y) != Some(WHITE) {
                    pixels.push((x, y));
                }
            }
        }
        pixels
    }

    #[test]
    fn anchor_codes() {
        assert_eq!("mm".parse::<Anchor>(), Ok(Anchor::MIDDLE));
        assert_eq!("la".parse::<Anchor>(), Ok(Anchor::TOP_LEFT));
        assert_eq!(
            "rs".parse::<Anchor>().map(|a| a.to_string()),
            Ok("rs".to_string())
        );
        assert!("xm".parse::<Anchor>().is_err());
        assert!("mmm".parse::<Anchor>().is_err());
        assert!("m".parse::<Anchor>().is_err());
    }

    #[test]
    fn anchor_origin_builtin() {
        let font = BuiltinFont;
        // advance 6, ascent 7, descent -1
        assert_eq!(Anchor::MIDDLE.origin(&font, "w", (8.0, 8.0)), (5.0, 4.0));
        assert_eq!(Anchor::TOP_LEFT.origin(&font, "w", (1.0, 2.0)), (1.0, 2.0));
        let baseline: Anchor = "rs".parse().unwrap();
        assert_eq!(baseline.origin(&font, "ww", (20.0, 10.0)), (8.0, 3.0));
    }

    #[test]
    fn canvas_size() {
        assert!(Canvas::new(0, 16, WHITE).is_none());
        let image = Canvas::new(3, 2, Rgba([10, 20, 30, 255])).unwrap().into_image();
        assert_eq!(image.dimensions(), (3, 2));
        assert!(image.pixels().all(|p| *p == Rgba([10, 20, 30, 255])));
    }

    #[test]
    fn builtin_text_lands_where_measured() {
        let mut canvas = white(16);
        canvas.draw_text(&Font::default(), "w", (3.0, 4.0), &TextStyle::new(BLACK));
        let bounds = BuiltinFont.text_box("w");
        for (x, y) in ink(&canvas) {
            let (x, y) = (i32::conv(x) - 3, i32::conv(y) - 4);
            assert!(bounds.x0 <= x && x < bounds.x1 && bounds.y0 <= y && y < bounds.y1);
        }
        assert_eq!(canvas.pixel(3, 6), Some(BLACK));
    }

    #[test]
    fn ink_center() {
        let mut canvas = white(16);
        let style = TextStyle::new(BLACK).ink_centered();
        canvas.draw_text(&Font::default(), "w", (8.0, 8.0), &style);
        let pixels = ink(&canvas);
        let (min_x, max_x) = (
            pixels.iter().map(|p| p.0).min().unwrap(),
            pixels.iter().map(|p| p.0).max().unwrap(),
        );
        let (min_y, max_y) = (
            pixels.iter().map(|p| p.1).min().unwrap(),
            pixels.iter().map(|p| p.1).max().unwrap(),
        );
        // 5 × 5 box centred on 8: pixels 6..=10 (rounded)
        assert_eq!((min_x, max_x), (6, 10));
        assert_eq!((min_y, max_y), (6, 10));
    }

    #[test]
    fn stamping_thickens() {
        let mut plain = white(16);
        let mut bold = plain.clone();
        plain.draw_text(&Font::default(), "l", (4.0, 4.0), &TextStyle::new(BLACK));
        let style = TextStyle::new(BLACK).embolden(Embolden::Synthesize(1));
        bold.draw_text(&Font::default(), "l", (4.0, 4.0), &style);
        assert!(ink(&bold).len() > ink(&plain).len());
        assert_eq!(Embolden::Never.radius(&Font::default()), 0);
        assert_eq!(Embolden::Always(2).radius(&Font::default()), 2);
    }

    #[test]
    fn stamped_translucent_text_is_uniform() {
        let mut canvas = white(16);
        let grey = Rgba([0, 0, 0, 128]);
        let style = TextStyle::new(grey).embolden(Embolden::Always(2));
        canvas.draw_text(&Font::default(), "l", (4.0, 4.0), &style);
        let shades: Vec<_> = ink(&canvas)
            .into_iter()
            .filter_map(|(x, y)| canvas.pixel(x, y))
            .collect();
        assert!(!shades.is_empty());
        assert!(shades.iter().all(|p| *p == shades[0]));
    }

    #[test]
    fn translucent_fill() {
        let mut canvas = white(2);
        canvas.fill_rect((0.0, 0.0, 1.0, 1.0), Rgba([0, 0, 0, 128]));
        let p = canvas.pixel(0, 0).unwrap();
        assert!(p[0] > 100 && p[0] < 160, "{p:?}");
        assert!(p[3] >= 254);
        assert_eq!(canvas.pixel(1, 0), Some(WHITE));
        assert_eq!(canvas.pixel(2, 0), None);
    }

    #[test]
    fn text_outside_canvas() {
        let mut canvas = white(8);
        canvas.draw_text(&Font::default(), "wg", (-100.0, 1e9), &TextStyle::new(BLACK));
        assert!(ink(&canvas).is_empty());
    }

    #[test]
    fn shapes() {
        let mut canvas = white(16);
        canvas.fill_rect((2.0, 2.0, 6.0, 6.0), BLACK);
        assert_eq!(canvas.pixel(2, 2), Some(BLACK));
        assert_eq!(canvas.pixel(5, 5), Some(BLACK));
        assert_eq!(canvas.pixel(6, 6), Some(WHITE));

        let mut canvas = white(16);
        canvas.fill_ellipse((8.0, 8.0), (8.0, 8.0), BLACK);
        assert_eq!(canvas.pixel(8, 8), Some(BLACK));
        assert_eq!(canvas.pixel(0, 0), Some(WHITE));

        let mut canvas = white(16);
        canvas.fill_rounded_rect((0.0, 0.0, 16.0, 16.0), 6.0, BLACK);
        assert_eq!(canvas.pixel(8, 8), Some(BLACK));
        assert_eq!(canvas.pixel(8, 0), Some(BLACK));
        assert_eq!(canvas.pixel(0, 0), Some(WHITE));

        // Degenerate shapes draw nothing
        let mut canvas = white(16);
        canvas.fill_rect((6.0, 6.0, 2.0, 2.0), BLACK);
        canvas.fill_ellipse((8.0, 8.0), (0.0, 0.0), BLACK);
        canvas.fill_rounded_rect((f32::NAN, 0.0, 4.0, 4.0), 1.0, BLACK);
        assert!(ink(&canvas).is_empty());
    }
}
