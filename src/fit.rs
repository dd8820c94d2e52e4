// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Best-fit font sizing
//!
//! Finds the largest integer font size at which some text fits inside a
//! padded square. The search assumes that the measured box grows with font
//! size, which holds for practically all fonts.
//!
//! ```no_run
//! use glyph_icons::fit::fit;
//! use glyph_icons::fonts::FontResource;
//! use glyph_icons::measure::Measure;
//!
//! let resource = FontResource::from_candidates(["C:/Windows/Fonts/arialbd.ttf"]);
//! let font = fit("g", 48, &resource, 3);
//! let bounds = font.text_box("g");
//! assert!(bounds.width() <= 42 && bounds.height() <= 42);
//! ```

use crate::fonts::{library, Font, FontLibrary, FontResource};
use crate::measure::Measure;

/// A source of measurable fonts at integer sizes
pub trait SizedFonts {
    /// The font handle type
    type Font: Measure;

    /// Get a font at `size`, or `None` if no font can be made at this size
    fn at_size(&self, size: u32) -> Option<Self::Font>;

    /// The size-less fallback font
    fn fallback(&self) -> Self::Font;
}

/// A [`FontResource`] resolved through a [`FontLibrary`]
#[derive(Clone, Copy)]
pub struct LibraryFonts<'a> {
    pub library: &'a FontLibrary,
    pub resource: &'a FontResource,
}

impl<'a> LibraryFonts<'a> {
    /// Construct over the global library
    pub fn new(resource: &'a FontResource) -> Self {
        LibraryFonts {
            library: library(),
            resource,
        }
    }
}

impl<'a> SizedFonts for LibraryFonts<'a> {
    type Font = Font;

    fn at_size(&self, size: u32) -> Option<Font> {
        self.library.resolve(self.resource, size)
    }

    fn fallback(&self) -> Font {
        Font::default()
    }
}

/// Find the largest font such that `text` fits in `max_dimension − 2 × padding`
///
/// Sizes `1..=max_dimension` are binary-searched. A size fits if the text's
/// measured box is no wider and no taller than the padded limit. A size at
/// which no font can be resolved counts as not fitting.
///
/// Returns the fallback font if no size fits, including whenever
/// `max_dimension <= 2 × padding`. This never fails.
pub fn fit_with<F: SizedFonts>(text: &str, max_dimension: u32, padding: u32, fonts: &F) -> F::Font {
    let limit = match padding
        .checked_mul(2)
        .and_then(|p| max_dimension.checked_sub(p))
    {
        Some(limit) if limit > 0 => limit,
        _ => {
            log::debug!("fit: no room for {text:?} in {max_dimension}px with padding {padding}");
            return fonts.fallback();
        }
    };

    let mut best = None;
    let (mut lo, mut hi) = (1, max_dimension);
    while lo <= hi {
        let mid = lo + (hi - lo) / 2;
        match fonts.at_size(mid) {
            Some(font) if font.text_box(text).fits(limit) => {
                best = Some((mid, font));
                match mid.checked_add(1) {
                    Some(next) => lo = next,
                    None => break,
                }
            }
            _ => hi = mid - 1,
        }
    }

    match best {
        Some((size, font)) => {
            log::trace!("fit: {text:?} at size {size} in {limit}px");
            font
        }
        None => {
            log::debug!("fit: no size fits {text:?} in {limit}px");
            fonts.fallback()
        }
    }
}

/// Find the largest font from `resource` such that `text` fits
///
/// This is [`fit_with`] over the global [`FontLibrary`], falling back to the
/// built-in font.
pub fn fit(text: &str, max_dimension: u32, resource: &FontResource, padding: u32) -> Font {
    fit_with(text, max_dimension, padding, &LibraryFonts::new(resource))
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::measure::TextBox;
    use std::cell::Cell;

    // A font whose glyphs are `0.6 × size` wide and `0.7 × size` tall.
    #[derive(Debug, PartialEq)]
    struct Linear(Option<u32>);

    impl Measure for Linear {
        fn text_box(&self, text: &str) -> TextBox {
            let size = self.0.unwrap_or(6);
            let n = text.chars().filter(|c| !c.is_whitespace()).count() as u32;
            if n == 0 {
                return TextBox::EMPTY;
            }
            let w = (size * 6 * n).div_ceil(10) as i32;
            let h = (size * 7).div_ceil(10) as i32;
            TextBox {
                x0: 0,
                y0: 0,
                x1: w,
                y1: h,
            }
        }
        fn advance(&self, text: &str) -> f32 {
            self.text_box(text).width() as f32
        }
        fn ascent(&self) -> f32 {
            0.0
        }
        fn descent(&self) -> f32 {
            0.0
        }
    }

    struct LinearFonts {
        // sizes above this do not resolve
        max_loadable: u32,
        calls: Cell<u32>,
    }

    impl LinearFonts {
        fn new() -> Self {
            LinearFonts {
                max_loadable: u32::MAX,
                calls: Cell::new(0),
            }
        }
    }

    impl SizedFonts for LinearFonts {
        type Font = Linear;
        fn at_size(&self, size: u32) -> Option<Linear> {
            self.calls.set(self.calls.get() + 1);
            (size <= self.max_loadable).then_some(Linear(Some(size)))
        }
        fn fallback(&self) -> Linear {
            Linear(None)
        }
    }

    fn fits(text: &str, size: u32, limit: u32) -> bool {
        Linear(Some(size)).text_box(text).fits(limit)
    }

    #[test]
    fn fitted_box_within_limit() {
        let fonts = LinearFonts::new();
        for max in 4u32..=160 {
            for padding in 0..max.div_ceil(2) {
                let limit = max - 2 * padding;
                for text in ["w", "g", "wg"] {
                    let font = fit_with(text, max, padding, &fonts);
                    if let Some(size) = font.0 {
                        assert!(fits(text, size, limit));
                    }
                }
            }
        }
    }

    #[test]
    fn maximal() {
        let fonts = LinearFonts::new();
        // Height 0.7 × 48 fits in 42, so the whole range fits
        let font = fit_with("w", 48, 3, &fonts);
        assert_eq!(font.0, Some(48));

        let font = fit_with("wg", 48, 3, &fonts);
        let size = font.0.unwrap();
        assert!(fits("wg", size, 42));
        assert!(!fits("wg", size + 1, 42));
        assert_eq!(size, 35);
    }

    #[test]
    fn monotonic_in_dimension() {
        let fonts = LinearFonts::new();
        let (mut last_size, mut last_area) = (0, 0);
        for max in 6..200 {
            let font = fit_with("wg", max, 2, &fonts);
            let size = font.0.unwrap();
            let area = font.text_box("wg").area();
            assert!(size >= last_size, "size decreased at {max}");
            assert!(area >= last_area, "area decreased at {max}");
            (last_size, last_area) = (size, area);
        }
    }

    #[test]
    fn degenerate_padding() {
        let fonts = LinearFonts::new();
        assert_eq!(fit_with("g", 16, 8, &fonts), Linear(None));
        assert_eq!(fit_with("g", 16, 100, &fonts), Linear(None));
        assert_eq!(fit_with("g", 0, 0, &fonts), Linear(None));
        assert_eq!(fit_with("g", 10, u32::MAX, &fonts), Linear(None));
        assert_eq!(fonts.calls.get(), 0);
    }

    #[test]
    fn unresolvable_sizes_do_not_fit() {
        let fonts = LinearFonts {
            max_loadable: 10,
            calls: Cell::new(0),
        };
        assert_eq!(fit_with("w", 128, 8, &fonts), Linear(Some(10)));

        let fonts = LinearFonts {
            max_loadable: 0,
            calls: Cell::new(0),
        };
        assert_eq!(fit_with("g", 128, 8, &fonts), Linear(None));
    }

    // Every size fits: the search must stop at the top of the range
    struct Unbounded;

    impl SizedFonts for Unbounded {
        type Font = Linear;
        fn at_size(&self, size: u32) -> Option<Linear> {
            Some(Linear(Some(size)))
        }
        fn fallback(&self) -> Linear {
            Linear(None)
        }
    }

    #[test]
    fn full_range() {
        assert_eq!(fit_with(" ", u32::MAX, 0, &Unbounded), Linear(Some(u32::MAX)));
        assert_eq!(fit_with("", u32::MAX, 1, &Unbounded), Linear(Some(u32::MAX)));
    }

    #[test]
    fn logarithmic_search() {
        let fonts = LinearFonts::new();
        let _ = fit_with("g", 128, 8, &fonts);
        assert!(fonts.calls.get() <= 8);
    }

    #[test]
    fn idempotent() {
        let fonts = LinearFonts::new();
        let a = fit_with("wg", 77, 5, &fonts);
        let b = fit_with("wg", 77, 5, &fonts);
        assert_eq!(a, b);
    }

    #[test]
    fn nonexistent_font_gives_builtin() {
        let resource = FontResource::from_candidates(["nonexistent.ttf"]);
        let font = fit("g", 128, &resource, 8);
        assert!(font.is_builtin());
        assert_eq!(font.size(), None);
    }
}
