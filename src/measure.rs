// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Text measurement
//!
//! All measurements use a top-left origin: `(0, 0)` is the pen start on the
//! ascender line of a single line of text, with `y` increasing downwards.

use easy_cast::Cast;

/// Ink bounds of rendered text, in whole pixels
///
/// The box is half-open: pixel `(x, y)` is inside if `x0 <= x < x1` and
/// `y0 <= y < y1`. Text without ink (empty or whitespace) has an empty box.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct TextBox {
    pub x0: i32,
    pub y0: i32,
    pub x1: i32,
    pub y1: i32,
}

impl TextBox {
    /// The empty box
    pub const EMPTY: TextBox = TextBox {
        x0: 0,
        y0: 0,
        x1: 0,
        y1: 0,
    };

    /// True if the box contains no pixels
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.x1 <= self.x0 || self.y1 <= self.y0
    }

    /// Width in pixels
    #[inline]
    pub fn width(&self) -> u32 {
        self.x1.saturating_sub(self.x0).max(0).cast()
    }

    /// Height in pixels
    #[inline]
    pub fn height(&self) -> u32 {
        self.y1.saturating_sub(self.y0).max(0).cast()
    }

    /// Smallest box containing both `self` and `other`
    ///
    /// Empty boxes are ignored.
    #[must_use]
    pub fn union(self, other: TextBox) -> TextBox {
        if self.is_empty() {
            other
        } else if other.is_empty() {
            self
        } else {
            TextBox {
                x0: self.x0.min(other.x0),
                y0: self.y0.min(other.y0),
                x1: self.x1.max(other.x1),
                y1: self.y1.max(other.y1),
            }
        }
    }

    /// Centre of the box
    pub fn center(&self) -> (f32, f32) {
        let x: f32 = (self.x0 + self.x1).cast();
        let y: f32 = (self.y0 + self.y1).cast();
        (0.5 * x, 0.5 * y)
    }

    /// Box area in pixels
    pub fn area(&self) -> u64 {
        u64::from(self.width()) * u64::from(self.height())
    }

    /// True if the box fits within a `limit × limit` square
    #[inline]
    pub fn fits(&self, limit: u32) -> bool {
        self.width() <= limit && self.height() <= limit
    }
}

/// A text measurement capability
///
/// Implementations are pure: results depend only on the font, its size and
/// the text.
pub trait Measure {
    /// Ink bounds of `text` laid out on a single line
    fn text_box(&self, text: &str) -> TextBox;

    /// Pen advance of `text`, including kerning
    fn advance(&self, text: &str) -> f32;

    /// Distance from the ascender line to the baseline
    fn ascent(&self) -> f32;

    /// Descender position relative to the baseline (usually negative)
    fn descent(&self) -> f32;
}
