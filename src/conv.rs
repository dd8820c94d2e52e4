// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Type conversion utilities
//!
//! Icon and font sizes are small non-negative integers represented as `u32`;
//! pixel coordinates on a canvas may be negative (glyph ink can start left of
//! the pen) and are represented as `i32`.

use easy_cast::{Cast, CastFloat};

/// Convert `usize` → `u32`
///
/// This is a "safer" wrapper around `as` ensuring (on debug builds) that the
/// input value may be represented correctly by `u32`.
#[inline]
pub fn to_u32(x: usize) -> u32 {
    x.cast()
}

/// Round a pixel coordinate down to the containing pixel
///
/// Saturates outside the range of `i32`.
#[inline]
pub fn floor_px(x: f32) -> i32 {
    x.try_cast_floor().unwrap_or_else(|_| saturate(x))
}

/// Round a pixel coordinate up to the next pixel boundary
///
/// Saturates outside the range of `i32`.
#[inline]
pub fn ceil_px(x: f32) -> i32 {
    x.try_cast_ceil().unwrap_or_else(|_| saturate(x))
}

fn saturate(x: f32) -> i32 {
    if x < 0.0 {
        i32::MIN
    } else if x > 0.0 {
        i32::MAX
    } else {
        0
    }
}

/// Scale factor: pixels per font unit
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct DPU(pub f32);

impl DPU {
    /// Scale factor for a face with `units_per_em` rendered at `dpem`
    #[inline]
    pub fn from_dpem(dpem: f32, units_per_em: u16) -> Self {
        DPU(dpem / f32::from(units_per_em.max(1)))
    }

    #[inline]
    pub(crate) fn i16_to_px(self, x: i16) -> f32 {
        f32::from(x) * self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounding() {
        assert_eq!(floor_px(-0.5), -1);
        assert_eq!(floor_px(2.9), 2);
        assert_eq!(ceil_px(2.1), 3);
        assert_eq!(ceil_px(-0.5), 0);
    }

    #[test]
    fn saturating() {
        assert_eq!(floor_px(1e12), i32::MAX);
        assert_eq!(ceil_px(-1e12), i32::MIN);
        assert_eq!(floor_px(f32::NAN), 0);
    }

    #[test]
    fn dpu_scale() {
        let dpu = DPU::from_dpem(16.0, 2048);
        assert_eq!(dpu.i16_to_px(2048), 16.0);
        assert_eq!(dpu.i16_to_px(-1024), -8.0);
    }
}
