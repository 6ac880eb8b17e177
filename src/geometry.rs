//! Geometry types shared by the command stream and the rasterizer

use serde::{Deserialize, Serialize};

/// Integer point in surface pixel coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Point2I {
    pub x: i32,
    pub y: i32,
}

impl Point2I {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl From<(i32, i32)> for Point2I {
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}

/// Float rectangle, used where sub-pixel positions matter (glyph placement,
/// source regions of an atlas)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }
}

/// Vertical extent (min_y, max_y) of a point list
pub fn vertical_extent(points: &[Point2I]) -> Option<(i32, i32)> {
    let first = points.first()?;
    Some(
        points
            .iter()
            .fold((first.y, first.y), |(lo, hi), p| (lo.min(p.y), hi.max(p.y))),
    )
}

/// Evaluate a cubic Bezier at parameter `t` using the Bernstein weights
pub fn cubic_bezier(p0: Point2I, c0: Point2I, c1: Point2I, p1: Point2I, t: f32) -> (f32, f32) {
    let u = 1.0 - t;
    let w0 = u * u * u;
    let w1 = 3.0 * u * u * t;
    let w2 = 3.0 * u * t * t;
    let w3 = t * t * t;
    (
        w0 * p0.x as f32 + w1 * c0.x as f32 + w2 * c1.x as f32 + w3 * p1.x as f32,
        w0 * p0.y as f32 + w1 * c0.y as f32 + w2 * c1.y as f32 + w3 * p1.y as f32,
    )
}
