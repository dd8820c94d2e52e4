// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! The built-in bitmap font
//!
//! A classic 5×7 font covering printable ASCII, used whenever no scalable
//! font can be loaded. It has exactly one size.

use crate::conv::to_u32;
use crate::measure::{Measure, TextBox};
use easy_cast::{Cast, Conv};

/// Width of a glyph bitmap
pub const GLYPH_WIDTH: u32 = 5;
/// Horizontal advance per character
pub const ADVANCE: u32 = GLYPH_WIDTH + 1;
/// Rows above the baseline
pub const ASCENT: u32 = 7;
/// Rows below the baseline (descenders)
pub const DESCENT: u32 = 1;

const FIRST: char = ' ';

// Column-major; bit 0 is the top row. Index: `c as usize - 0x20`.
#[rustfmt::skip]
static GLYPHS: [[u8; 5]; 95] = [
    [0x00, 0x00, 0x00, 0x00, 0x00], // ' '
    [0x00, 0x00, 0x5F, 0x00, 0x00], // !
    [0x00, 0x07, 0x00, 0x07, 0x00], // "
    [0x14, 0x7F, 0x14, 0x7F, 0x14], // #
    [0x24, 0x2A, 0x7F, 0x2A, 0x12], // $
    [0x23, 0x13, 0x08, 0x64, 0x62], // %
    [0x36, 0x49, 0x55, 0x22, 0x50], // &
    [0x00, 0x05, 0x03, 0x00, 0x00], // '
    [0x00, 0x1C, 0x22, 0x41, 0x00], // (
    [0x00, 0x41, 0x22, 0x1C, 0x00], // )
    [0x14, 0x08, 0x3E, 0x08, 0x14], // *
    [0x08, 0x08, 0x3E, 0x08, 0x08], // +
    [0x00, 0x50, 0x30, 0x00, 0x00], // ,
    [0x08, 0x08, 0x08, 0x08, 0x08], // -
    [0x00, 0x60, 0x60, 0x00, 0x00], // .
    [0x20, 0x10, 0x08, 0x04, 0x02], // /
    [0x3E, 0x51, 0x49, 0x45, 0x3E], // 0
    [0x00, 0x42, 0x7F, 0x40, 0x00], // 1
    [0x42, 0x61, 0x51, 0x49, 0x46], // 2
    [0x21, 0x41, 0x45, 0x4B, 0x31], // 3
    [0x18, 0x14, 0x12, 0x7F, 0x10], // 4
    [0x27, 0x45, 0x45, 0x45, 0x39], // 5
    [0x3C, 0x4A, 0x49, 0x49, 0x30], // 6
    [0x01, 0x71, 0x09, 0x05, 0x03], // 7
    [0x36, 0x49, 0x49, 0x49, 0x36], // 8
    [0x06, 0x49, 0x49, 0x29, 0x1E], // 9
    [0x00, 0x36, 0x36, 0x00, 0x00], // :
    [0x00, 0x56, 0x36, 0x00, 0x00], // ;
    [0x08, 0x14, 0x22, 0x41, 0x00], // <
    [0x14, 0x14, 0x14, 0x14, 0x14], // =
    [0x00, 0x41, 0x22, 0x14, 0x08], // >
    [0x02, 0x01, 0x51, 0x09, 0x06], // ?
    [0x32, 0x49, 0x79, 0x41, 0x3E], // @
    [0x7E, 0x11, 0x11, 0x11, 0x7E], // A
    [0x7F, 0x49, 0x49, 0x49, 0x36], // B
    [0x3E, 0x41, 0x41, 0x41, 0x22], // C
    [0x7F, 0x41, 0x41, 0x22, 0x1C], // D
    [0x7F, 0x49, 0x49, 0x49, 0x41], // E
    [0x7F, 0x09, 0x09, 0x09, 0x01], // F
    [0x3E, 0x41, 0x49, 0x49, 0x7A], // G
    [0x7F, 0x08, 0x08, 0x08, 0x7F], // H
    [0x00, 0x41, 0x7F, 0x41, 0x00], // I
    [0x20, 0x40, 0x41, 0x3F, 0x01], // J
    [0x7F, 0x08, 0x14, 0x22, 0x41], // K
    [0x7F, 0x40, 0x40, 0x40, 0x40], // L
    [0x7F, 0x02, 0x0C, 0x02, 0x7F], // M
    [0x7F, 0x04, 0x08, 0x10, 0x7F], // N
    [0x3E, 0x41, 0x41, 0x41, 0x3E], // O
    [0x7F, 0x09, 0x09, 0x09, 0x06], // P
    [0x3E, 0x41, 0x51, 0x21, 0x5E], // Q
    [0x7F, 0x09, 0x19, 0x29, 0x46], // R
    [0x46, 0x49, 0x49, 0x49, 0x31], // S
    [0x01, 0x01, 0x7F, 0x01, 0x01], // T
    [0x3F, 0x40, 0x40, 0x40, 0x3F], // U
    [0x1F, 0x20, 0x40, 0x20, 0x1F], // V
    [0x3F, 0x40, 0x38, 0x40, 0x3F], // W
    [0x63, 0x14, 0x08, 0x14, 0x63], // X
    [0x07, 0x08, 0x70, 0x08, 0x07], // Y
    [0x61, 0x51, 0x49, 0x45, 0x43], // Z
    [0x00, 0x7F, 0x41, 0x41, 0x00], // [
    [0x02, 0x04, 0x08, 0x10, 0x20], // backslash
    [0x00, 0x41, 0x41, 0x7F, 0x00], // ]
    [0x04, 0x02, 0x01, 0x02, 0x04], // ^
    [0x40, 0x40, 0x40, 0x40, 0x40], // _
    [0x00, 0x01, 0x02, 0x04, 0x00], // `
    [0x20, 0x54, 0x54, 0x54, 0x78], // a
    [0x7F, 0x48, 0x44, 0x44, 0x38], // b
    [0x38, 0x44, 0x44, 0x44, 0x20], // c
    [0x38, 0x44, 0x44, 0x48, 0x7F], // d
    [0x38, 0x54, 0x54, 0x54, 0x18], // e
    [0x08, 0x7E, 0x09, 0x01, 0x02], // f
    [0x18, 0xA4, 0xA4, 0xA4, 0x7C], // g
    [0x7F, 0x08, 0x04, 0x04, 0x78], // h
    [0x00, 0x44, 0x7D, 0x40, 0x00], // i
    [0x40, 0x80, 0x84, 0x7D, 0x00], // j
    [0x7F, 0x10, 0x28, 0x44, 0x00], // k
    [0x00, 0x41, 0x7F, 0x40, 0x00], // l
    [0x7C, 0x04, 0x18, 0x04, 0x78], // m
    [0x7C, 0x08, 0x04, 0x04, 0x78], // n
    [0x38, 0x44, 0x44, 0x44, 0x38], // o
    [0xFC, 0x24, 0x24, 0x24, 0x18], // p
    [0x18, 0x24, 0x24, 0x18, 0xFC], // q
    [0x7C, 0x08, 0x04, 0x04, 0x08], // r
    [0x48, 0x54, 0x54, 0x54, 0x20], // s
    [0x04, 0x3F, 0x44, 0x40, 0x20], // t
    [0x3C, 0x40, 0x40, 0x20, 0x7C], // u
    [0x1C, 0x20, 0x40, 0x20, 0x1C], // v
    [0x3C, 0x40, 0x30, 0x40, 0x3C], // w
    [0x44, 0x28, 0x10, 0x28, 0x44], // x
    [0x1C, 0xA0, 0xA0, 0xA0, 0x7C], // y
    [0x44, 0x64, 0x54, 0x4C, 0x44], // z
    [0x00, 0x08, 0x36, 0x41, 0x00], // {
    [0x00, 0x00, 0x7F, 0x00, 0x00], // |
    [0x00, 0x41, 0x36, 0x08, 0x00], // }
    [0x08, 0x04, 0x08, 0x10, 0x08], // ~
];

// Drawn for characters outside the table
const MISSING: [u8; 5] = [0x7F, 0x41, 0x41, 0x41, 0x7F];

/// The built-in fixed-size bitmap font
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct BuiltinFont;

impl BuiltinFont {
    /// Get the column bitmap for a char
    ///
    /// Bit `r` of column `c` is set if pixel `(c, r)` is lit, where row 0 is
    /// the ascender line and row [`ASCENT`] is the first row below the
    /// baseline.
    pub fn columns(c: char) -> &'static [u8; 5] {
        let code = u32::from(c);
        let first = u32::from(FIRST);
        if (first..first + to_u32(GLYPHS.len())).contains(&code) {
            &GLYPHS[usize::conv(code - first)]
        } else {
            &MISSING
        }
    }

    /// Iterate over the lit pixels of `text`, relative to the layout origin
    pub fn pixels(text: &str) -> impl Iterator<Item = (i32, i32)> + '_ {
        text.chars().enumerate().flat_map(|(i, c)| {
            let x0 = i32::conv(to_u32(i) * ADVANCE);
            Self::columns(c).iter().enumerate().flat_map(move |(col, bits)| {
                let bits = *bits;
                (0..8i32)
                    .filter(move |row| bits & (1 << row) != 0)
                    .map(move |row| (x0 + i32::conv(col), row))
            })
        })
    }
}

impl Measure for BuiltinFont {
    fn text_box(&self, text: &str) -> TextBox {
        Self::pixels(text).fold(TextBox::EMPTY, |bounds, (x, y)| {
            bounds.union(TextBox {
                x0: x,
                y0: y,
                x1: x + 1,
                y1: y + 1,
            })
        })
    }

    fn advance(&self, text: &str) -> f32 {
        (to_u32(text.chars().count()) * ADVANCE).cast()
    }

    fn ascent(&self) -> f32 {
        ASCENT.cast()
    }

    fn descent(&self) -> f32 {
        -f32::conv(DESCENT)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn space_is_empty() {
        let b = BuiltinFont.text_box("  ");
        assert!(b.is_empty());
        assert_eq!(BuiltinFont.advance("  "), 12.0);
    }

    #[test]
    fn w_box() {
        let b = BuiltinFont.text_box("w");
        assert_eq!((b.x0, b.y0, b.x1, b.y1), (0, 2, 5, 7));
    }

    #[test]
    fn g_has_descender() {
        let b = BuiltinFont.text_box("g");
        assert_eq!(b.y1, 8);
        assert_eq!(b.height(), 6);
    }

    #[test]
    fn pair_spacing() {
        let b = BuiltinFont.text_box("ww");
        assert_eq!(b.x0, 0);
        assert_eq!(b.x1, 11);
    }

    #[test]
    fn missing_glyph() {
        assert_eq!(BuiltinFont::columns('é'), &MISSING);
        assert_eq!(BuiltinFont.text_box("é").width(), 5);
    }
}
