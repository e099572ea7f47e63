//! Geometry kernel: points, sizes, image frames, and the conversions between
//! image space and display space.
//!
//! Vertices are always stored in image space. Display space is derived on
//! demand from the current [`ImageFrame`] and display [`Size`], so a resize
//! or a late image load never touches stored coordinates.

#[cfg(test)]
#[path = "geom_test.rs"]
mod geom_test;

use serde::{Deserialize, Serialize};

/// A point in either image or display space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to `other`.
    #[must_use]
    pub fn distance(self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// Width and height of a display surface in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Whether either axis is zero, negative, or not finite.
    #[must_use]
    pub fn is_degenerate(self) -> bool {
        !(self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0)
    }
}

/// Pixel dimensions of the loaded raster. `{0, 0}` means no image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ImageFrame {
    pub width: u32,
    pub height: u32,
}

impl ImageFrame {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// The unset frame.
    #[must_use]
    pub fn unset() -> Self {
        Self::default()
    }

    /// Whether the frame has zero area and cannot serve as a divisor.
    #[must_use]
    pub fn is_degenerate(self) -> bool {
        self.width == 0 || self.height == 0
    }

    #[must_use]
    pub fn size(self) -> Size {
        Size::new(f64::from(self.width), f64::from(self.height))
    }

    /// Width over height, or `None` for a degenerate frame.
    #[must_use]
    pub fn aspect(self) -> Option<f64> {
        if self.is_degenerate() {
            return None;
        }
        Some(f64::from(self.width) / f64::from(self.height))
    }
}

/// Map an image-space point onto the display.
///
/// Returns the origin when either the frame or the display is degenerate.
#[must_use]
pub fn image_to_display(p: Point, frame: ImageFrame, display: Size) -> Point {
    if frame.is_degenerate() || display.is_degenerate() {
        return Point::default();
    }
    let image = frame.size();
    Point {
        x: p.x / image.width * display.width,
        y: p.y / image.height * display.height,
    }
}

/// Map a display-space point back into image space.
///
/// Returns the origin when either the frame or the display is degenerate.
#[must_use]
pub fn display_to_image(p: Point, frame: ImageFrame, display: Size) -> Point {
    if frame.is_degenerate() || display.is_degenerate() {
        return Point::default();
    }
    let image = frame.size();
    Point {
        x: p.x / display.width * image.width,
        y: p.y / display.height * image.height,
    }
}

/// Distance from `p` to the closest point of segment `a`–`b`.
///
/// A zero-length segment degrades to the distance to `a`.
#[must_use]
pub fn point_segment_distance(p: Point, a: Point, b: Point) -> f64 {
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    let length_sq = dx * dx + dy * dy;
    if length_sq == 0.0 {
        return p.distance(a);
    }

    let t = (((p.x - a.x) * dx + (p.y - a.y) * dy) / length_sq).clamp(0.0, 1.0);
    let closest = Point::new(a.x + t * dx, a.y + t * dy);
    p.distance(closest)
}

/// Whether `p` lies within `radius` of `center`, boundary included.
#[must_use]
pub fn within_radius(p: Point, center: Point, radius: f64) -> bool {
    p.distance(center) <= radius
}

/// Clamp each axis of an image-space point into `[0, frame dimension]`.
#[must_use]
pub fn clamp_to_frame(p: Point, frame: ImageFrame) -> Point {
    let image = frame.size();
    Point {
        x: p.x.clamp(0.0, image.width),
        y: p.y.clamp(0.0, image.height),
    }
}
