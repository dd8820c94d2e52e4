// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Font selection and loading
//!
//! Fonts are managed by the [`FontLibrary`], of which a static singleton
//! exists and can be accessed via [`library()`].
//!
//! A [`FontResource`] is an ordered list of [`FontSource`] candidates for one
//! logical role (see [`FontRole`]). Resolving a resource at some size yields
//! a [`Font`] from the first candidate which loads. If none load, callers may
//! fall back to the [`BuiltinFont`], a bitmap font with exactly one size.
//!
//! ### Font sizes
//!
//! The *size* of a scalable font is given in pixels per Em (dpem): a 12 pixel
//! font has Em-square 12 pixels tall. The rendered height of a given glyph is
//! usually less than this (a lower-case "w" covers roughly half the Em) while
//! a full line, ascender to descender, is usually a little more.
//!
//! Font files have an internally defined unit known as the *font unit*;
//! [`crate::conv::DPU`] converts from font units to pixels.
//!
//! Sizes above [`MAX_DPEM`] do not resolve.

mod builtin;
mod face;
mod font;
mod library;
mod source;

pub use builtin::BuiltinFont;
pub use face::{FaceStore, ScaledFace, MAX_DPEM};
pub use font::Font;
pub use library::{library, FontError, FontLibrary};
pub use source::{FontResource, FontRole, FontSet, FontSource, WEIGHT_BOLD, WEIGHT_REGULAR};
