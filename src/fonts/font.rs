// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Font handles

use super::{BuiltinFont, ScaledFace};
use crate::measure::{Measure, TextBox};

/// A usable font at a concrete size
#[derive(Clone, Debug)]
pub enum Font {
    /// A scalable face at some size
    Face(ScaledFace),
    /// The built-in bitmap font (fixed size)
    Builtin(BuiltinFont),
}

impl Default for Font {
    fn default() -> Self {
        Font::Builtin(BuiltinFont)
    }
}

impl Font {
    /// Size in pixels per Em, or `None` for the built-in font
    pub fn size(&self) -> Option<u32> {
        match self {
            Font::Face(face) => Some(face.dpem()),
            Font::Builtin(_) => None,
        }
    }

    /// True if this is the built-in font
    pub fn is_builtin(&self) -> bool {
        matches!(self, Font::Builtin(_))
    }

    /// True if the face is bold
    ///
    /// The built-in font is never bold.
    pub fn is_bold(&self) -> bool {
        match self {
            Font::Face(face) => face.store().is_bold(),
            Font::Builtin(_) => false,
        }
    }
}

impl From<ScaledFace> for Font {
    fn from(face: ScaledFace) -> Self {
        Font::Face(face)
    }
}

impl Measure for Font {
    fn text_box(&self, text: &str) -> TextBox {
        match self {
            Font::Face(face) => face.text_box(text),
            Font::Builtin(font) => font.text_box(text),
        }
    }

    fn advance(&self, text: &str) -> f32 {
        match self {
            Font::Face(face) => face.advance(text),
            Font::Builtin(font) => font.advance(text),
        }
    }

    fn ascent(&self) -> f32 {
        match self {
            Font::Face(face) => face.ascent(),
            Font::Builtin(font) => font.ascent(),
        }
    }

    fn descent(&self) -> f32 {
        match self {
            Font::Face(face) => face.descent(),
            Font::Builtin(font) => font.descent(),
        }
    }
}
