//! Raster rotation: pure Rust, no system dependencies.
//!
//! | Stage | Module | Work |
//! |---|---|---|
//! | **Decode** | [`codec`] | `image` crate, format sniffed from content, alpha dropped |
//! | **Transform** | [`geometry`] | output pixel → source coordinate about the center |
//! | **Sample** | [`sampler`] | bilinear blend of four neighbours, black off-grid |
//! | **Drive** | [`rotate`] | row-parallel map over the output raster (rayon) |
//! | **Encode** | [`codec`] | format inferred from the output extension |
//!
//! The module is split into:
//! - **Core**: [`geometry`], [`sampler`], [`rotate`]: pure functions over `RgbImage`
//! - **Parameters**: data describing a job
//! - **Codec**: [`RasterCodec`] trait + [`ImageCodec`]
//! - **Operations**: high-level functions combining codec and core

pub mod codec;
pub mod geometry;
pub mod operations;
mod params;
pub mod rotate;
pub mod sampler;

pub use codec::{CodecError, ImageCodec, RasterCodec};
pub use geometry::{Point2D, Rotation, transform};
pub use operations::{RotationReport, plan_rotation, rotate_file};
pub use params::{EncodeParams, Quality, RotateParams};
pub use rotate::{Execution, Rotated, rotate, rotate_sequential, rotate_with_stats};
pub use sampler::{SENTINEL, sample, try_sample};
