//! Rotation driver: inverse-map every output pixel and resample.
//!
//! The output raster always has the source's dimensions. Content rotated out
//! of frame is lost and uncovered regions are filled with
//! [`SENTINEL`](super::sampler::SENTINEL).
//!
//! Every output pixel depends only on the read-only source, so rows are
//! rendered independently. [`Execution::Parallel`] hands each row slice to a
//! rayon worker (disjoint `&mut [u8]`, no locking). [`Execution::Sequential`]
//! runs the same row kernel on the calling thread and is bit-identical.

use super::geometry::Rotation;
use super::sampler::{SENTINEL, try_sample};
use image::RgbImage;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

const CHANNELS: usize = 3;

/// How the driver schedules rows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Execution {
    /// Rows rendered on the current rayon pool.
    #[default]
    Parallel,
    /// Rows rendered in order on the calling thread.
    Sequential,
}

/// Output of a rotation together with how much of it fell outside the source.
#[derive(Debug, Clone)]
pub struct Rotated {
    pub image: RgbImage,
    /// Number of output pixels filled with the sentinel color.
    pub clipped: u64,
}

/// Rotate `source` counter-clockwise by `angle_degrees` about its center.
pub fn rotate(source: &RgbImage, angle_degrees: f64) -> RgbImage {
    rotate_with_stats(source, angle_degrees, Execution::Parallel).image
}

/// Single-threaded [`rotate`].
pub fn rotate_sequential(source: &RgbImage, angle_degrees: f64) -> RgbImage {
    rotate_with_stats(source, angle_degrees, Execution::Sequential).image
}

/// Rotate and count sentinel pixels.
pub fn rotate_with_stats(source: &RgbImage, angle_degrees: f64, execution: Execution) -> Rotated {
    let (width, height) = source.dimensions();
    let rotation = Rotation::new(width, height, angle_degrees);
    let mut image = RgbImage::new(width, height);

    let row_len = width as usize * CHANNELS;
    if row_len == 0 || height == 0 {
        return Rotated { image, clipped: 0 };
    }

    let rows: &mut [u8] = &mut image;
    let clipped: u64 = match execution {
        Execution::Parallel => rows
            .par_chunks_mut(row_len)
            .enumerate()
            .map(|(j, row)| render_row(source, &rotation, j as u32, row))
            .sum(),
        Execution::Sequential => rows
            .chunks_mut(row_len)
            .enumerate()
            .map(|(j, row)| render_row(source, &rotation, j as u32, row))
            .sum(),
    };

    Rotated { image, clipped }
}

/// Fill output row `j`; returns the number of sentinel pixels written.
fn render_row(source: &RgbImage, rotation: &Rotation, j: u32, row: &mut [u8]) -> u64 {
    let mut clipped = 0;
    for (i, pixel) in row.chunks_exact_mut(CHANNELS).enumerate() {
        let point = rotation.source_point(i as u32, j);
        let color = try_sample(point.x, point.y, source).unwrap_or_else(|| {
            clipped += 1;
            SENTINEL
        });
        pixel.copy_from_slice(&color.0);
    }
    clipped
}
