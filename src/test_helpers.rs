//! Shared test utilities for the raster-rotate test suite.
//!
//! Provides small synthetic rasters with known content and comparison
//! helpers that report *where* two rasters disagree.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let source = gradient(16, 9);
//! let rotated = rotate(&source, 360.0);
//! assert_images_within(&rotated, &source, 1);
//! ```

use image::{Rgb, RgbImage};

// =========================================================================
// Fixture rasters
// =========================================================================

/// 2×2 raster with red, green, blue, white at (0,0), (1,0), (0,1), (1,1).
pub fn corners_2x2() -> RgbImage {
    let mut image = RgbImage::new(2, 2);
    image.put_pixel(0, 0, Rgb([255, 0, 0]));
    image.put_pixel(1, 0, Rgb([0, 255, 0]));
    image.put_pixel(0, 1, Rgb([0, 0, 255]));
    image.put_pixel(1, 1, Rgb([255, 255, 255]));
    image
}

fn ramp(value: u32, len: u32) -> u8 {
    if len <= 1 {
        0
    } else {
        (value * 255 / (len - 1)) as u8
    }
}

/// Red ramps left→right, green top→bottom, blue along the diagonal.
///
/// Every pixel is distinct enough that misplaced samples show up.
pub fn gradient(width: u32, height: u32) -> RgbImage {
    RgbImage::from_fn(width, height, |x, y| {
        Rgb([
            ramp(x, width),
            ramp(y, height),
            ramp(x + y, width + height - 1),
        ])
    })
}

/// Black raster with one pixel set to `color`.
pub fn single_pixel(width: u32, height: u32, at: (u32, u32), color: Rgb<u8>) -> RgbImage {
    let mut image = RgbImage::new(width, height);
    image.put_pixel(at.0, at.1, color);
    image
}

// =========================================================================
// Comparisons: panic with the first offending pixel
// =========================================================================

/// Largest per-channel absolute difference between two pixels.
pub fn max_channel_diff(a: &Rgb<u8>, b: &Rgb<u8>) -> u8 {
    a.0.iter()
        .zip(b.0.iter())
        .map(|(x, y)| x.abs_diff(*y))
        .max()
        .unwrap_or(0)
}

/// Assert two rasters have equal dimensions and every channel within `tolerance`.
pub fn assert_images_within(actual: &RgbImage, expected: &RgbImage, tolerance: u8) {
    assert_eq!(
        actual.dimensions(),
        expected.dimensions(),
        "raster dimensions mismatch"
    );
    for (x, y, pixel) in actual.enumerate_pixels() {
        let want = expected.get_pixel(x, y);
        let diff = max_channel_diff(pixel, want);
        assert!(
            diff <= tolerance,
            "pixel ({x}, {y}) is {pixel:?}, expected {want:?} (±{tolerance})"
        );
    }
}
