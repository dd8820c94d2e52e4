// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Font face types

use super::FontError;
use crate::conv::{ceil_px, floor_px, DPU};
use crate::measure::{Measure, TextBox};
use ab_glyph::{Font as _, FontVec, GlyphId, PxScale, ScaleFont as _};
use easy_cast::Conv;
use smallvec::SmallVec;
use std::fmt;
use std::sync::Arc;
use ttf_parser::Face;

/// A loaded font face
///
/// Metadata is read with `ttf-parser` at load time; outlines and advances
/// come from `ab_glyph`.
pub struct FaceStore {
    family: Option<String>,
    bold: bool,
    units_per_em: u16,
    ascender: i16,
    descender: i16,
    font: FontVec,
}

impl FaceStore {
    /// Parse face `index` of `data`
    pub fn parse(data: Vec<u8>, index: u32) -> Result<Self, FontError> {
        let face = Face::parse(&data, index)?;
        let family = face
            .names()
            .into_iter()
            .filter(|name| name.name_id == ttf_parser::name_id::FAMILY)
            .find_map(|name| name.to_string());
        let bold = face.is_bold() || face.weight().to_number() >= 600;
        let units_per_em = face.units_per_em();
        let ascender = face.ascender();
        let descender = face.descender();

        let font = FontVec::try_from_vec_and_index(data, index)?;
        Ok(FaceStore {
            family,
            bold,
            units_per_em,
            ascender,
            descender,
            font,
        })
    }

    /// Family name, if the face names one
    pub fn family(&self) -> Option<&str> {
        self.family.as_deref()
    }

    /// True if the face is flagged bold (or has weight ≥ 600)
    pub fn is_bold(&self) -> bool {
        self.bold
    }

    /// Units per Em
    pub fn units_per_em(&self) -> u16 {
        self.units_per_em
    }

    /// Access the [`ab_glyph`] object
    pub fn ab_glyph(&self) -> &FontVec {
        &self.font
    }
}

impl fmt::Debug for FaceStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FaceStore")
            .field("family", &self.family)
            .field("bold", &self.bold)
            .field("units_per_em", &self.units_per_em)
            .finish_non_exhaustive()
    }
}

/// A glyph positioned relative to the layout origin
#[derive(Clone, Debug)]
pub(crate) struct LaidGlyph {
    pub id: GlyphId,
    pub x: f32,
}

/// Largest supported font size, in pixels per Em
pub const MAX_DPEM: u32 = 1 << 16;

/// A face at a fixed size
///
/// The size is in pixels per Em (dpem), matching the usual meaning of a
/// "font size" in raster tools.
#[derive(Clone)]
pub struct ScaledFace {
    store: Arc<FaceStore>,
    dpem: u32,
}

impl ScaledFace {
    /// Construct
    ///
    /// `dpem` is clamped to `1..=MAX_DPEM`.
    pub fn new(store: Arc<FaceStore>, dpem: u32) -> Self {
        let dpem = dpem.clamp(1, MAX_DPEM);
        ScaledFace { store, dpem }
    }

    /// Size in pixels per Em
    #[inline]
    pub fn dpem(&self) -> u32 {
        self.dpem
    }

    /// Access the face
    #[inline]
    pub fn store(&self) -> &FaceStore {
        &self.store
    }

    fn dpu(&self) -> DPU {
        DPU::from_dpem(f32::conv(self.dpem), self.store.units_per_em)
    }

    /// The `ab_glyph` scale for this size
    ///
    /// `ab_glyph` scales by line height rather than by Em.
    pub(crate) fn px_scale(&self) -> PxScale {
        let font = &self.store.font;
        let upem = font.units_per_em().unwrap_or(f32::from(self.store.units_per_em));
        (f32::conv(self.dpem) * font.height_unscaled() / upem).into()
    }

    /// Lay out `text` on a single line from pen position 0
    pub(crate) fn layout(&self, text: &str) -> (SmallVec<[LaidGlyph; 4]>, f32) {
        let scaled = self.store.font.as_scaled(self.px_scale());
        let mut glyphs = SmallVec::new();
        let mut x = 0.0;
        let mut prev: Option<GlyphId> = None;
        for c in text.chars() {
            let id = scaled.glyph_id(c);
            if let Some(prev) = prev {
                x += scaled.kern(prev, id);
            }
            glyphs.push(LaidGlyph { id, x });
            x += scaled.h_advance(id);
            prev = Some(id);
        }
        (glyphs, x)
    }

    /// Build an `ab_glyph` glyph with the layout origin at `origin`
    ///
    /// The origin is the top-left of the line (the ascender line at the pen
    /// start), matching [`TextBox`] coordinates.
    pub(crate) fn glyph_at(&self, glyph: &LaidGlyph, origin: (f32, f32)) -> ab_glyph::Glyph {
        glyph.id.with_scale_and_position(
            self.px_scale(),
            ab_glyph::point(origin.0 + glyph.x, origin.1 + self.ascent()),
        )
    }
}

impl Measure for ScaledFace {
    fn text_box(&self, text: &str) -> TextBox {
        let (glyphs, _) = self.layout(text);
        let mut bounds = TextBox::EMPTY;
        for glyph in &glyphs {
            if let Some(outline) = self.store.font.outline_glyph(self.glyph_at(glyph, (0.0, 0.0))) {
                let rect = outline.px_bounds();
                bounds = bounds.union(TextBox {
                    x0: floor_px(rect.min.x),
                    y0: floor_px(rect.min.y),
                    x1: ceil_px(rect.max.x),
                    y1: ceil_px(rect.max.y),
                });
            }
        }
        bounds
    }

    fn advance(&self, text: &str) -> f32 {
        self.layout(text).1
    }

    fn ascent(&self) -> f32 {
        self.dpu().i16_to_px(self.store.ascender)
    }

    fn descent(&self) -> f32 {
        self.dpu().i16_to_px(self.store.descender)
    }
}

impl fmt::Debug for ScaledFace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScaledFace")
            .field("family", &self.store.family)
            .field("dpem", &self.dpem)
            .finish()
    }
}
