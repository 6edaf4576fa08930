//! High-level rotation jobs.
//!
//! Combines a [`RasterCodec`] with the rotation core: decode, rotate, encode,
//! and report what happened.

use super::codec::{CodecError, RasterCodec, format_name, output_format};
use super::params::{EncodeParams, RotateParams};
use super::rotate::{Execution, rotate_with_stats};
use serde::Serialize;
use std::path::PathBuf;
use std::time::Instant;
use tracing::{debug, info_span};

/// Result type for rotation jobs.
pub type Result<T> = std::result::Result<T, CodecError>;

/// Summary of a finished rotation job.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RotationReport {
    pub input: PathBuf,
    pub output: PathBuf,
    pub angle_degrees: f64,
    pub width: u32,
    pub height: u32,
    /// Output pixels whose source neighbourhood fell outside the input.
    pub clipped_pixels: u64,
    pub format: &'static str,
    pub execution: Execution,
    pub elapsed_ms: u64,
}

impl RotationReport {
    /// Share of the output that was filled with the sentinel color, in percent.
    pub fn clipped_percent(&self) -> f64 {
        let total = self.width as u64 * self.height as u64;
        if total == 0 {
            0.0
        } else {
            self.clipped_pixels as f64 * 100.0 / total as f64
        }
    }
}

/// Decode `params.input`, rotate it, and encode the result to `params.output`.
///
/// The output format is resolved before any pixel work so a bad extension
/// fails fast.
pub fn rotate_file(codec: &impl RasterCodec, params: &RotateParams) -> Result<RotationReport> {
    let span = info_span!(
        "rotate_file",
        input = %params.input.display(),
        angle = params.angle_degrees
    );
    let _guard = span.enter();
    let started = Instant::now();

    let format = output_format(&params.output)?;
    let source = codec.decode(&params.input)?;
    let (width, height) = source.dimensions();
    debug!(width, height, "decoded");

    let rotated = rotate_with_stats(&source, params.angle_degrees, params.execution);
    debug!(clipped = rotated.clipped, execution = ?params.execution, "rotated");

    codec.encode(&rotated.image, &EncodeParams::from(params))?;

    Ok(RotationReport {
        input: params.input.clone(),
        output: params.output.clone(),
        angle_degrees: params.angle_degrees,
        width,
        height,
        clipped_pixels: rotated.clipped,
        format: format_name(format),
        execution: params.execution,
        elapsed_ms: started.elapsed().as_millis() as u64,
    })
}

/// A job with default quality and parallel execution.
pub fn plan_rotation(input: PathBuf, output: PathBuf, angle_degrees: f64) -> RotateParams {
    RotateParams {
        input,
        output,
        angle_degrees,
        quality: Default::default(),
        execution: Execution::default(),
    }
}
