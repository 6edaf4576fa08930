//! # raster-rotate
//!
//! Rotate a raster image by an arbitrary angle about its center. The output
//! has the same dimensions as the input; every output pixel is found by
//! mapping it back into the source and blending the four nearest source
//! pixels (bilinear, area-weighted).
//!
//! # Architecture: Decode → Rotate → Encode
//!
//! ```text
//! input file ──decode──▶ RgbImage ──rotate──▶ RgbImage ──encode──▶ output file
//!               codec               core                codec
//! ```
//!
//! The core is three pure pieces applied per output pixel, in order:
//!
//! 1. **Geometry**: translate to the center, rotate, translate back.
//! 2. **Sampler**: bilinear blend of the four neighbours, or black when any
//!    neighbour is off the grid.
//! 3. **Driver**: map over every output pixel, row-parallel on rayon.
//!
//! Decode and encode sit outside the core behind the [`raster::RasterCodec`]
//! trait so the pipeline can be exercised without touching the filesystem.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`raster`] | Geometry, sampler, driver, codec and high-level jobs |
//! | [`config`] | TOML config loading, CLI overlay, validation |
//! | [`output`] | CLI output formatting: text summary and JSON report |
//!
//! # Design Decisions
//!
//! ## Inverse Mapping
//!
//! Walking the *output* grid and asking "where did this pixel come from"
//! guarantees every output pixel is written exactly once. Forward-mapping
//! source pixels would leave holes wherever the rotation spreads them apart.
//!
//! ## Same-Size Canvas
//!
//! The output keeps the input's dimensions. Corners rotated out of frame are
//! dropped and regions with no source are black. There is no alpha channel;
//! alpha in the input is discarded on decode.
//!
//! ## Rounding
//!
//! Channel blends round half away from zero. A sample exactly between a 0 and
//! a 255 neighbour is 128.
//!
//! ## Quarter Turns Are Exact
//!
//! `sin`/`cos` are evaluated once per rotation, after reducing the angle
//! modulo 360. Multiples of 90° use exact `{-1, 0, 1}` values, so rotating by
//! 0°, 360° or −720° gives bit-identical results.

pub mod config;
pub mod output;
pub mod raster;

#[cfg(test)]
pub(crate) mod test_helpers;
