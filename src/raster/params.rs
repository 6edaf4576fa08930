//! Parameter types for rotation jobs.
//!
//! These structs describe *what* to do, not *how*. [`operations`](super::operations)
//! consumes them and drives the [`codec`](super::codec) and the rotation core,
//! so a mock codec can stand in for the real one in tests.
//!
//! - [`Quality`]: lossy encoding quality (1–100, default 90). Clamped on construction.
//! - [`RotateParams`]: full job: input, output, angle, quality, row scheduling.
//! - [`EncodeParams`]: what the codec needs to write a finished raster.

use super::rotate::Execution;
use std::path::PathBuf;

/// Quality setting for lossy encoding (1-100). Only JPEG honours it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quality(u32);

impl Quality {
    pub fn new(value: u32) -> Self {
        Self(value.clamp(1, 100))
    }

    pub fn value(self) -> u32 {
        self.0
    }
}

impl Default for Quality {
    fn default() -> Self {
        Self(90)
    }
}

/// A single rotate-a-file job.
#[derive(Debug, Clone, PartialEq)]
pub struct RotateParams {
    pub input: PathBuf,
    pub output: PathBuf,
    /// Counter-clockwise, in degrees. Any finite value.
    pub angle_degrees: f64,
    pub quality: Quality,
    pub execution: Execution,
}

/// Parameters handed to [`RasterCodec::encode`](super::codec::RasterCodec::encode).
#[derive(Debug, Clone, PartialEq)]
pub struct EncodeParams {
    pub output: PathBuf,
    pub quality: Quality,
}

impl From<&RotateParams> for EncodeParams {
    fn from(params: &RotateParams) -> Self {
        Self {
            output: params.output.clone(),
            quality: params.quality,
        }
    }
}
