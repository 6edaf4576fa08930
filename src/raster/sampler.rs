//! Bilinear (area-weighted) resampling.
//!
//! A fractional source coordinate overlaps up to four source pixels. Each
//! channel of the result is the average of those four neighbours, weighted
//! by how much of the sample's unit square falls on each one:
//!
//! ```text
//! UL ──── UR        value = (1−rx)(1−ry)·UL + rx(1−ry)·UR
//!  │  ·    │              + (1−rx)ry·LL     + rx·ry·LR
//! LL ──── LR
//! ```
//!
//! Rounding is half away from zero ([`f64::round`]). Weights sum to one and
//! inputs are in `[0, 255]`, so results never need clamping.
//!
//! When any neighbour lies outside the source the sample is replaced by
//! [`SENTINEL`]. This is the normal case for the corners of any rotation that
//! is not a quarter turn, not an error.

use image::{Rgb, RgbImage};

/// Color written where the inverse mapping leaves the source raster.
pub const SENTINEL: Rgb<u8> = Rgb([0, 0, 0]);

/// Sample `source` at `(x, y)`, or `None` if a neighbour is out of bounds.
pub fn try_sample(x: f64, y: f64, source: &RgbImage) -> Option<Rgb<u8>> {
    if !x.is_finite() || !y.is_finite() {
        return None;
    }

    let (floor_x, ceil_x) = (x.floor(), x.ceil());
    let (floor_y, ceil_y) = (y.floor(), y.ceil());
    let (width, height) = source.dimensions();
    if floor_x < 0.0 || floor_y < 0.0 || ceil_x >= width as f64 || ceil_y >= height as f64 {
        return None;
    }

    let (left, right) = (floor_x as u32, ceil_x as u32);
    let (top, bottom) = (floor_y as u32, ceil_y as u32);
    let upper_left = source.get_pixel(left, top).0;
    let upper_right = source.get_pixel(right, top).0;
    let lower_left = source.get_pixel(left, bottom).0;
    let lower_right = source.get_pixel(right, bottom).0;

    // Zero when the coordinate is integral, so coinciding neighbours drop out
    let rel_x = x - floor_x;
    let rel_y = y - floor_y;
    let weights = [
        (1.0 - rel_x) * (1.0 - rel_y),
        rel_x * (1.0 - rel_y),
        (1.0 - rel_x) * rel_y,
        rel_x * rel_y,
    ];

    let channel = |c: usize| -> u8 {
        let value = weights[0] * upper_left[c] as f64
            + weights[1] * upper_right[c] as f64
            + weights[2] * lower_left[c] as f64
            + weights[3] * lower_right[c] as f64;
        value.round() as u8
    };

    Some(Rgb([channel(0), channel(1), channel(2)]))
}

/// Sample `source` at `(x, y)`, falling back to [`SENTINEL`].
#[inline]
pub fn sample(x: f64, y: f64, source: &RgbImage) -> Rgb<u8> {
    try_sample(x, y, source).unwrap_or(SENTINEL)
}
