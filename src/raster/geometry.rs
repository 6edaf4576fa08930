//! Inverse mapping from output pixels to source coordinates.
//!
//! Every output pixel `(i, j)` is translated so the image center sits at the
//! origin, rotated, and translated back:
//!
//! ```text
//! x' = x·cos θ − y·sin θ
//! y' = y·cos θ + x·sin θ
//! ```
//!
//! Because this maps *output* pixels back to *source* pixels in a y-down
//! raster, the visible result is the content turning counter-clockwise by the
//! requested angle. The center is the exact half-dimension `(W/2, H/2)`, not
//! the center of the middle pixel.

/// A transient pair of floating-point coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point2D {
    pub x: f64,
    pub y: f64,
}

impl Point2D {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn translate(self, dx: f64, dy: f64) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }

    /// Rotate about the origin with precomputed `sin θ` and `cos θ`.
    pub fn rotate(self, sin: f64, cos: f64) -> Self {
        Self::new(self.x * cos - self.y * sin, self.y * cos + self.x * sin)
    }
}

/// `sin` and `cos` of an angle in degrees.
///
/// The angle is reduced into `[0, 360)` first. Exact quarter turns return
/// exact values from `{-1, 0, 1}`, so 90°, 180°, 270° and 360° rotations
/// carry no trigonometric round-off into the sampler.
pub fn sin_cos_degrees(angle_degrees: f64) -> (f64, f64) {
    let reduced = angle_degrees.rem_euclid(360.0);
    if reduced % 90.0 == 0.0 {
        // rem_euclid can round up to exactly 360.0 for tiny negative inputs
        return match (reduced / 90.0) as u32 % 4 {
            0 => (0.0, 1.0),
            1 => (1.0, 0.0),
            2 => (0.0, -1.0),
            _ => (-1.0, 0.0),
        };
    }
    reduced.to_radians().sin_cos()
}

/// A rotation about a fixed center with its trigonometry evaluated once.
///
/// Built once per rotation call and shared read-only by every worker.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rotation {
    center: Point2D,
    sin: f64,
    cos: f64,
}

impl Rotation {
    /// Rotation about the center of a `width` × `height` raster.
    pub fn new(width: u32, height: u32, angle_degrees: f64) -> Self {
        let center = Point2D::new(width as f64 / 2.0, height as f64 / 2.0);
        Self::about(center, angle_degrees)
    }

    /// Rotation about an arbitrary center.
    pub fn about(center: Point2D, angle_degrees: f64) -> Self {
        let (sin, cos) = sin_cos_degrees(angle_degrees);
        Self { center, sin, cos }
    }

    pub fn center(&self) -> Point2D {
        self.center
    }

    /// Source-space coordinate that output pixel `(i, j)` samples from.
    ///
    /// May fall outside the source raster; the sampler decides what to do
    /// with it.
    #[inline]
    pub fn source_point(&self, i: u32, j: u32) -> Point2D {
        Point2D::new(i as f64, j as f64)
            .translate(-self.center.x, -self.center.y)
            .rotate(self.sin, self.cos)
            .translate(self.center.x, self.center.y)
    }
}

/// Map output pixel `(i, j)` to source space for a rotation of
/// `angle_degrees` about `(center_x, center_y)`.
///
/// Convenience form of [`Rotation::source_point`] for one-off lookups; the
/// driver builds a [`Rotation`] once instead.
pub fn transform(i: u32, j: u32, center_x: f64, center_y: f64, angle_degrees: f64) -> Point2D {
    Rotation::about(Point2D::new(center_x, center_y), angle_degrees).source_point(i, j)
}
