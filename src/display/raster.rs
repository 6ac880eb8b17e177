//! Vector primitives: lines, rectangles, ellipses, polygons, gradients, curves.
//!
//! Everything here writes through `Canvas::set_pixel` / `Canvas::fill_span`
//! (the gradient through `blend_pixel`), so the scissor is honoured per pixel
//! and nothing can land outside the surface.

use serde::{Deserialize, Serialize};

use super::canvas::Canvas;
use crate::color::{lerp_color, Color};
use crate::geometry::{cubic_bezier, vertical_extent, Point2I};

/// One 90 degree sector of an ellipse, used for rounded-rectangle corners
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Quadrant {
    TopRight,
    TopLeft,
    BottomLeft,
    BottomRight,
}

impl Quadrant {
    /// Mirror signs applied to first-quadrant offsets (screen y grows down)
    #[inline]
    fn signs(self) -> (i32, i32) {
        match self {
            Quadrant::TopRight => (1, -1),
            Quadrant::TopLeft => (-1, -1),
            Quadrant::BottomLeft => (-1, 1),
            Quadrant::BottomRight => (1, 1),
        }
    }
}

/// Walk the midpoint ellipse inscribed in a `w x h` box at `(x, y)`.
///
/// Calls `visit(cx, cy, dx, dy)` with the center and one first-quadrant
/// offset per step: first the flat half stepping x, then the steep half
/// stepping y. Callers mirror the offsets. Boxes thinner than 2px yield
/// nothing; see `Canvas::degenerate_ellipse` for those.
fn walk_ellipse(x: i32, y: i32, w: i32, h: i32, mut visit: impl FnMut(i32, i32, i32, i32)) {
    // A zero axis term never flips sigma, so neither half would terminate
    if w < 2 || h < 2 {
        return;
    }
    let a2 = (w as i64 * w as i64) / 4;
    let b2 = (h as i64 * h as i64) / 4;
    let fa2 = 4 * a2;
    let fb2 = 4 * b2;

    // Upper left corner to center
    let rx = (w + 1) / 2;
    let ry = (h + 1) / 2;
    let cx = x.saturating_add(rx);
    let cy = y.saturating_add(ry);

    let (mut px, mut py) = (0i64, ry as i64);
    let mut sigma = 2 * b2 + a2 * (1 - 2 * ry as i64);
    while b2 * px <= a2 * py {
        visit(cx, cy, px as i32, py as i32);
        if sigma >= 0 {
            sigma += fa2 * (1 - py);
            py -= 1;
        }
        sigma += b2 * (4 * px + 6);
        px += 1;
    }

    let (mut px, mut py) = (rx as i64, 0i64);
    let mut sigma = 2 * a2 + b2 * (1 - 2 * rx as i64);
    while a2 * py <= b2 * px {
        visit(cx, cy, px as i32, py as i32);
        if sigma >= 0 {
            sigma += fb2 * (1 - px);
            px -= 1;
        }
        sigma += a2 * (4 * py + 6);
        py += 1;
    }
}

impl<B: AsRef<[u8]> + AsMut<[u8]>> Canvas<B> {
    // ========================================================================
    // Lines
    // ========================================================================

    /// Draw a line segment, both endpoints included.
    ///
    /// Horizontal segments become one clipped span; everything else is
    /// Bresenham. `thickness` is only honoured when thick lines are enabled
    /// on the canvas, otherwise the line is 1px wide.
    pub fn line(&mut self, p0: Point2I, p1: Point2I, thickness: u16, color: Color) {
        if self.thick_lines() && thickness > 1 {
            self.line_thick(p0, p1, thickness, color);
        } else {
            self.line_1px(p0, p1, color);
        }
    }

    fn line_1px(&mut self, p0: Point2I, p1: Point2I, color: Color) {
        if p0.y == p1.y {
            self.fill_span(p0.x, p0.y, p1.x, color);
            return;
        }

        // Nothing to step through if the bounding box misses the clip
        let s = self.scissor();
        if p0.x.max(p1.x) < s.left
            || p0.x.min(p1.x) >= s.right
            || p0.y.max(p1.y) < s.top
            || p0.y.min(p1.y) >= s.bottom
        {
            return;
        }

        let (x1, y1) = (p1.x as i64, p1.y as i64);
        let (mut x, mut y) = (p0.x as i64, p0.y as i64);
        let dx = (x1 - x).abs();
        let dy = -(y1 - y).abs();
        let sx = if x < x1 { 1 } else { -1 };
        let sy = if y < y1 { 1 } else { -1 };
        let mut err = dx + dy;

        loop {
            self.set_pixel(x as i32, y as i32, color);
            if x == x1 && y == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x += sx;
            }
            if e2 <= dx {
                err += dx;
                y += sy;
            }
        }
    }

    /// Thick line as parallel 1px lines offset along the normal.
    ///
    /// For steep angles with large thickness integer rounding can leave
    /// small gaps; use `fill_polygon` for exact coverage.
    pub fn line_thick(&mut self, p0: Point2I, p1: Point2I, thickness: u16, color: Color) {
        if thickness <= 1 {
            self.line_1px(p0, p1, color);
            return;
        }

        let dx = (p1.x as i64 - p0.x as i64) as f32;
        let dy = (p1.y as i64 - p0.y as i64) as f32;
        let len = (dx * dx + dy * dy).sqrt();

        if len < 0.001 {
            // Degenerate line (single point) - draw a dot
            let r = (thickness / 2) as i32;
            self.fill_ellipse(p0.x.saturating_sub(r), p0.y.saturating_sub(r), 2 * r, 2 * r, color);
            return;
        }

        // Perpendicular unit vector
        let nx = -dy / len;
        let ny = dx / len;

        let half = (thickness - 1) as f32 / 2.0;
        for i in 0..thickness {
            let offset = i as f32 - half;
            let ox = (nx * offset).round() as i32;
            let oy = (ny * offset).round() as i32;
            self.line_1px(
                Point2I::new(p0.x.saturating_add(ox), p0.y.saturating_add(oy)),
                Point2I::new(p1.x.saturating_add(ox), p1.y.saturating_add(oy)),
                color,
            );
        }
    }

    // ========================================================================
    // Rectangles
    // ========================================================================

    /// Rectangle outline. With a radius the straight edges are shortened and
    /// the corners drawn as quarter arcs. Radius is clamped to half the
    /// shorter side.
    ///
    /// The outline runs through both `x` and `x + w` (and `y`, `y + h`), so
    /// it is one pixel wider and taller than `fill_rect` of the same box.
    pub fn stroke_rect(
        &mut self,
        x: i32,
        y: i32,
        w: i32,
        h: i32,
        radius: i32,
        thickness: u16,
        color: Color,
    ) {
        let r = clamp_radius(w, h, radius);
        let p = Point2I::new;
        let x1 = x.saturating_add(w);
        let y1 = y.saturating_add(h);
        if r == 0 {
            self.line(p(x, y), p(x1, y), thickness, color);
            self.line(p(x, y1), p(x1, y1), thickness, color);
            self.line(p(x, y), p(x, y1), thickness, color);
            self.line(p(x1, y), p(x1, y1), thickness, color);
            return;
        }

        // Arc centers
        let (xc, xe) = (x.saturating_add(r), x1.saturating_sub(r));
        let (yc, ye) = (y.saturating_add(r), y1.saturating_sub(r));

        self.line(p(xc, y), p(xe, y), thickness, color);
        self.line(p(x1, yc), p(x1, ye), thickness, color);
        self.line(p(xc, y1), p(xe, y1), thickness, color);
        self.line(p(x, yc), p(x, ye), thickness, color);

        let d = 2 * r;
        let (xr, yb) = (xe.saturating_sub(r), ye.saturating_sub(r));
        self.stroke_arc(xr, y, d, d, Quadrant::TopRight, color);
        self.stroke_arc(x, y, d, d, Quadrant::TopLeft, color);
        self.stroke_arc(x, yb, d, d, Quadrant::BottomLeft, color);
        self.stroke_arc(xr, yb, d, d, Quadrant::BottomRight, color);
    }

    /// Filled rectangle covering `[x, x+w) x [y, y+h)`.
    ///
    /// With a radius it is a 12-point cross-shaped polygon plus four quarter
    /// discs inside the same box; the radius is clamped to half the shorter
    /// side of the covered pixels.
    pub fn fill_rect(&mut self, x: i32, y: i32, w: i32, h: i32, radius: i32, color: Color) {
        if w <= 0 || h <= 0 {
            return;
        }
        // Last covered column and row
        let x1 = x.saturating_add(w - 1);
        let y1 = y.saturating_add(h - 1);

        let r = clamp_radius(w - 1, h - 1, radius);
        if r == 0 {
            let s = self.scissor();
            for row in y.max(s.top)..=y1.min(s.bottom - 1) {
                self.fill_span(x, row, x1, color);
            }
            return;
        }

        let (xc, xe) = (x.saturating_add(r), x1.saturating_sub(r));
        let (yc, ye) = (y.saturating_add(r), y1.saturating_sub(r));
        let p = Point2I::new;

        let cross = [
            p(x, yc),
            p(xc, yc),
            p(xc, y),
            p(xe, y),
            p(xe, yc),
            p(x1, yc),
            p(x1, ye),
            p(xe, ye),
            p(xe, y1),
            p(xc, y1),
            p(xc, ye),
            p(x, ye),
        ];
        self.fill_polygon(&cross, color);

        let d = 2 * r;
        let (xr, yb) = (xe.saturating_sub(r), ye.saturating_sub(r));
        self.fill_arc(xr, y, d, d, Quadrant::TopRight, color);
        self.fill_arc(x, y, d, d, Quadrant::TopLeft, color);
        self.fill_arc(x, yb, d, d, Quadrant::BottomLeft, color);
        self.fill_arc(xr, yb, d, d, Quadrant::BottomRight, color);
    }

    /// Rectangle with a color per corner, bilinearly interpolated and
    /// alpha-blended over what is already there
    pub fn fill_rect_multi_color(
        &mut self,
        x: i32,
        y: i32,
        w: i32,
        h: i32,
        top_left: Color,
        top_right: Color,
        bottom_right: Color,
        bottom_left: Color,
    ) {
        if w <= 0 || h <= 0 {
            return;
        }

        // Fractions along each axis; a 1px side sits at the start color
        let fx = |i: i32| if w > 1 { i as f32 / (w - 1) as f32 } else { 0.0 };
        let fy = |i: i32| if h > 1 { i as f32 / (h - 1) as f32 } else { 0.0 };

        // Only the part of the box the scissor lets through
        let s = self.scissor();
        let rows = s.top.saturating_sub(y).max(0)..s.bottom.saturating_sub(y).min(h);
        let cols = s.left.saturating_sub(x).max(0)..s.right.saturating_sub(x).min(w);
        for i in rows {
            let left = lerp_color(top_left, bottom_left, fy(i));
            let right = lerp_color(top_right, bottom_right, fy(i));
            for j in cols.clone() {
                let pixel = if i == 0 {
                    lerp_color(top_left, top_right, fx(j))
                } else if i == h - 1 {
                    lerp_color(bottom_left, bottom_right, fx(j))
                } else if j == 0 {
                    left
                } else if j == w - 1 {
                    right
                } else {
                    lerp_color(left, right, fx(j))
                };
                self.blend_pixel(x + j, y + i, pixel);
            }
        }
    }

    // ========================================================================
    // Ellipses
    // ========================================================================

    /// Ellipse outline inscribed in the `w x h` box at `(x, y)`
    pub fn stroke_ellipse(&mut self, x: i32, y: i32, w: i32, h: i32, color: Color) {
        if self.degenerate_ellipse(x, y, w, h, color) {
            return;
        }
        walk_ellipse(x, y, w, h, |cx, cy, dx, dy| {
            let (l, r) = (cx.saturating_sub(dx), cx.saturating_add(dx));
            let (t, b) = (cy.saturating_sub(dy), cy.saturating_add(dy));
            self.set_pixel(r, b, color);
            self.set_pixel(l, b, color);
            self.set_pixel(r, t, color);
            self.set_pixel(l, t, color);
        });
    }

    /// Filled ellipse as mirrored horizontal spans
    pub fn fill_ellipse(&mut self, x: i32, y: i32, w: i32, h: i32, color: Color) {
        if self.degenerate_ellipse(x, y, w, h, color) {
            return;
        }
        walk_ellipse(x, y, w, h, |cx, cy, dx, dy| {
            let (l, r) = (cx.saturating_sub(dx), cx.saturating_add(dx));
            self.fill_span(l, cy.saturating_add(dy), r, color);
            self.fill_span(l, cy.saturating_sub(dy), r, color);
        });
    }

    /// One quarter of an ellipse outline
    pub fn stroke_arc(&mut self, x: i32, y: i32, w: i32, h: i32, quadrant: Quadrant, color: Color) {
        if self.degenerate_ellipse(x, y, w, h, color) {
            return;
        }
        let (sx, sy) = quadrant.signs();
        walk_ellipse(x, y, w, h, |cx, cy, dx, dy| {
            self.set_pixel(cx.saturating_add(sx * dx), cy.saturating_add(sy * dy), color);
        });
    }

    /// One quarter disc, filled as a fan of triangles from the center
    pub fn fill_arc(&mut self, x: i32, y: i32, w: i32, h: i32, quadrant: Quadrant, color: Color) {
        if self.degenerate_ellipse(x, y, w, h, color) {
            return;
        }
        let (sx, sy) = quadrant.signs();
        let mut previous: Option<Point2I> = None;
        walk_ellipse(x, y, w, h, |cx, cy, dx, dy| {
            let center = Point2I::new(cx, cy);
            let edge = Point2I::new(cx.saturating_add(sx * dx), cy.saturating_add(sy * dy));
            self.fill_polygon(&[center, edge, previous.unwrap_or(center)], color);
            previous = Some(edge);
        });
    }

    /// A box only one pixel wide or tall collapses to its own pixels, for
    /// outlines, discs and every quadrant alike. Returns whether the box was
    /// handled here (empty boxes count and draw nothing).
    fn degenerate_ellipse(&mut self, x: i32, y: i32, w: i32, h: i32, color: Color) -> bool {
        if w < 1 || h < 1 {
            return true;
        }
        if w > 1 && h > 1 {
            return false;
        }
        self.fill_rect(x, y, w, h, 0, color);
        true
    }

    // ========================================================================
    // Triangles & polygons
    // ========================================================================

    pub fn stroke_triangle(
        &mut self,
        a: Point2I,
        b: Point2I,
        c: Point2I,
        thickness: u16,
        color: Color,
    ) {
        self.line(a, b, thickness, color);
        self.line(b, c, thickness, color);
        self.line(c, a, thickness, color);
    }

    pub fn fill_triangle(&mut self, a: Point2I, b: Point2I, c: Point2I, color: Color) {
        self.fill_polygon(&[a, b, c], color);
    }

    /// Closed outline through all points
    pub fn stroke_polygon(&mut self, points: &[Point2I], thickness: u16, color: Color) {
        let (Some(&first), Some(&last)) = (points.first(), points.last()) else {
            return;
        };
        self.stroke_polyline(points, thickness, color);
        self.line(last, first, thickness, color);
    }

    /// Open path through all points
    pub fn stroke_polyline(&mut self, points: &[Point2I], thickness: u16, color: Color) {
        for pair in points.windows(2) {
            self.line(pair[0], pair[1], thickness, color);
        }
    }

    /// Scanline polygon fill.
    ///
    /// Each row is sampled twice, just above and just below the pixel
    /// center line, with the half-open crossing rule; the union of both span
    /// sets is drawn. That keeps the even/odd pairing exact at vertices while
    /// still covering horizontal top/bottom edges and apex vertices.
    /// Self-intersecting input fills with the even-odd rule.
    pub fn fill_polygon(&mut self, points: &[Point2I], color: Color) {
        if points.len() < 3 {
            return;
        }
        let Some((min_y, max_y)) = vertical_extent(points) else {
            return;
        };
        let s = self.scissor();
        let top = min_y.max(s.top);
        let bottom = max_y.min(s.bottom - 1);

        // Preallocate intersection buffer (reused per scanline)
        let mut nodes: Vec<i32> = Vec::with_capacity(points.len());

        for y in top..=bottom {
            for below in [true, false] {
                nodes.clear();
                let mut j = points.len() - 1;
                for i in 0..points.len() {
                    let (pi, pj) = (points[i], points[j]);
                    let crosses = if below {
                        (pi.y < y && pj.y >= y) || (pj.y < y && pi.y >= y)
                    } else {
                        (pi.y <= y && pj.y > y) || (pj.y <= y && pi.y > y)
                    };
                    if crosses {
                        // i64 deltas, vertices may sit anywhere in i32
                        let (dy, dx) = (pj.y as i64 - pi.y as i64, pj.x as i64 - pi.x as i64);
                        let t = (y as i64 - pi.y as i64) as f32 / dy as f32;
                        let x = pi.x as f32 + t * dx as f32;
                        nodes.push(x.round() as i32);
                    }
                    j = i;
                }

                nodes.sort_unstable();
                for pair in nodes.chunks_exact(2) {
                    self.fill_span(pair[0], y, pair[1], color);
                }
            }
        }
    }

    // ========================================================================
    // Curves
    // ========================================================================

    /// Cubic Bezier flattened into `segments` chords (at least one)
    pub fn stroke_curve(
        &mut self,
        p0: Point2I,
        ctrl0: Point2I,
        ctrl1: Point2I,
        p1: Point2I,
        segments: u32,
        thickness: u16,
        color: Color,
    ) {
        let segments = segments.max(1);
        let t_step = 1.0 / segments as f32;
        let mut last = p0;
        for step in 1..=segments {
            let (x, y) = cubic_bezier(p0, ctrl0, ctrl1, p1, t_step * step as f32);
            let next = Point2I::new(x as i32, y as i32);
            self.line(last, next, thickness, color);
            last = next;
        }
    }
}

/// Corner radius limited to half the shorter side
#[inline]
fn clamp_radius(w: i32, h: i32, radius: i32) -> i32 {
    radius.clamp(0, (w.min(h) / 2).max(0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::PixelLayout;
    use crate::display::surface::PixelSurface;
    use std::collections::BTreeSet;

    const INK: Color = Color::rgb(255, 255, 255);

    fn canvas(w: u32, h: u32) -> Canvas {
        let mut c = Canvas::new(PixelSurface::with_size(w, h, PixelLayout::Xrgb8888));
        c.clear(Color::BLACK);
        c
    }

    fn lit(c: &Canvas) -> BTreeSet<(i32, i32)> {
        let (w, h) = (c.surface().width() as i32, c.surface().height() as i32);
        let mut set = BTreeSet::new();
        for y in 0..h {
            for x in 0..w {
                if c.get_pixel(x, y) != Some(Color::BLACK) {
                    set.insert((x, y));
                }
            }
        }
        set
    }

    fn row_span(c: &Canvas, y: i32) -> Option<(i32, i32)> {
        let xs: Vec<i32> = lit(c).into_iter().filter(|p| p.1 == y).map(|p| p.0).collect();
        Some((*xs.first()?, *xs.last()?))
    }

    #[test]
    fn test_horizontal_line_inclusive() {
        let mut c = canvas(20, 10);
        c.line(Point2I::new(0, 5), Point2I::new(10, 5), 1, INK);
        let expected: BTreeSet<_> = (0..=10).map(|x| (x, 5)).collect();
        assert_eq!(lit(&c), expected);
    }

    #[test]
    fn test_diagonal_line_visits_endpoints() {
        let mut c = canvas(20, 20);
        c.line(Point2I::new(2, 3), Point2I::new(15, 9), 1, INK);
        let set = lit(&c);
        assert!(set.contains(&(2, 3)));
        assert!(set.contains(&(15, 9)));
        // one pixel per column along the major axis
        assert_eq!(set.len(), 14);
    }

    #[test]
    fn test_vertical_line() {
        let mut c = canvas(10, 10);
        c.line(Point2I::new(4, 8), Point2I::new(4, 1), 1, INK);
        let expected: BTreeSet<_> = (1..=8).map(|y| (4, y)).collect();
        assert_eq!(lit(&c), expected);
    }

    #[test]
    fn test_line_far_outside_is_dropped() {
        let mut c = canvas(10, 10);
        c.line(Point2I::new(-5000, -20), Point2I::new(-10, 3000), 1, INK);
        assert!(lit(&c).is_empty());
    }

    #[test]
    fn test_thick_line_only_when_enabled() {
        let mut thin = canvas(20, 20);
        thin.line(Point2I::new(2, 2), Point2I::new(2, 15), 5, INK);
        assert_eq!(lit(&thin).len(), 14);

        let mut thick = canvas(20, 20);
        thick.set_thick_lines(true);
        thick.line(Point2I::new(4, 2), Point2I::new(4, 15), 5, INK);
        assert_eq!(lit(&thick).len(), 14 * 5);
    }

    #[test]
    fn test_fill_rect_exact() {
        let mut c = canvas(40, 40);
        c.fill_rect(10, 10, 20, 20, 0, INK);
        let expected: BTreeSet<_> = (10..30)
            .flat_map(|y| (10..30).map(move |x| (x, y)))
            .collect();
        assert_eq!(lit(&c), expected);
    }

    #[test]
    fn test_stroke_rect_square_corners() {
        let mut c = canvas(20, 20);
        c.stroke_rect(2, 2, 10, 6, 0, 1, INK);
        let set = lit(&c);
        for corner in [(2, 2), (12, 2), (2, 8), (12, 8)] {
            assert!(set.contains(&corner), "{:?}", corner);
        }
        assert!(!set.contains(&(5, 5)));
        assert_eq!(set.len(), 2 * 11 + 2 * 5);
    }

    #[test]
    fn test_rounded_rect_cuts_corners() {
        let mut c = canvas(40, 40);
        c.fill_rect(5, 5, 20, 20, 6, INK);
        let set = lit(&c);
        assert!(!set.contains(&(5, 5)));
        assert!(!set.contains(&(25, 25)));
        assert!(set.contains(&(15, 15)));
        assert!(set.contains(&(5, 15)));
        assert!(set.contains(&(15, 5)));
        // corners are filled in towards the arc
        assert!(set.contains(&(8, 8)));
    }

    #[test]
    fn test_rounded_stroke_symmetric() {
        let mut c = canvas(40, 40);
        c.stroke_rect(5, 5, 20, 20, 6, 1, INK);
        let set = lit(&c);
        for &(x, y) in &set {
            assert!(set.contains(&(30 - x, y)), "({}, {})", x, y);
            assert!(set.contains(&(x, 30 - y)), "({}, {})", x, y);
        }
    }

    #[test]
    fn test_oversized_radius_is_clamped() {
        let mut a = canvas(30, 30);
        let mut b = canvas(30, 30);
        a.fill_rect(2, 2, 20, 10, 500, INK);
        b.fill_rect(2, 2, 20, 10, 5, INK);
        assert_eq!(lit(&a), lit(&b));
    }

    #[test]
    fn test_triangle_fill_rows() {
        let mut c = canvas(20, 20);
        c.fill_triangle(Point2I::new(0, 0), Point2I::new(10, 0), Point2I::new(5, 10), INK);
        assert_eq!(row_span(&c, 0), Some((0, 10)));
        assert_eq!(row_span(&c, 10), Some((5, 5)));
        assert_eq!(row_span(&c, 11), None);
    }

    #[test]
    fn test_polygon_fill_idempotent() {
        let pts = [
            Point2I::new(3, 1),
            Point2I::new(17, 4),
            Point2I::new(14, 16),
            Point2I::new(2, 12),
        ];
        let mut once = canvas(20, 20);
        once.fill_polygon(&pts, INK);
        let mut twice = canvas(20, 20);
        twice.fill_polygon(&pts, INK);
        twice.fill_polygon(&pts, INK);
        assert_eq!(once.surface().as_bytes(), twice.surface().as_bytes());
    }

    #[test]
    fn test_concave_polygon_leaves_notch() {
        // U shape: notch between x=4..6 above y=6
        let pts = [
            Point2I::new(0, 0),
            Point2I::new(3, 0),
            Point2I::new(3, 6),
            Point2I::new(7, 6),
            Point2I::new(7, 0),
            Point2I::new(10, 0),
            Point2I::new(10, 10),
            Point2I::new(0, 10),
        ];
        let mut c = canvas(12, 12);
        c.fill_polygon(&pts, INK);
        let set = lit(&c);
        assert!(!set.contains(&(5, 2)));
        assert!(set.contains(&(1, 2)));
        assert!(set.contains(&(5, 8)));
        assert_eq!(row_span(&c, 6), Some((0, 10)));
    }

    #[test]
    fn test_polygon_needs_three_points() {
        let mut c = canvas(10, 10);
        c.fill_polygon(&[Point2I::new(1, 1), Point2I::new(8, 8)], INK);
        assert!(lit(&c).is_empty());
    }

    #[test]
    fn test_fill_ellipse_symmetric() {
        let mut c = canvas(40, 40);
        c.fill_ellipse(5, 8, 24, 14, INK);
        let set = lit(&c);
        assert!(!set.is_empty());
        let (cx, cy) = (5 + 12, 8 + 7);
        for &(x, y) in &set {
            let (dx, dy) = (x - cx, y - cy);
            assert!(set.contains(&(cx - dx, cy + dy)));
            assert!(set.contains(&(cx + dx, cy - dy)));
            assert!(set.contains(&(cx - dx, cy - dy)));
        }
    }

    #[test]
    fn test_stroke_ellipse_symmetric_and_hollow() {
        let mut c = canvas(40, 40);
        c.stroke_ellipse(4, 4, 20, 20, INK);
        let set = lit(&c);
        let (cx, cy) = (14, 14);
        assert!(!set.contains(&(cx, cy)));
        assert!(set.contains(&(cx, cy - 10)));
        assert!(set.contains(&(cx + 10, cy)));
        for &(x, y) in &set {
            let (dx, dy) = (x - cx, y - cy);
            assert!(set.contains(&(cx - dx, cy + dy)));
            assert!(set.contains(&(cx + dx, cy - dy)));
        }
    }

    #[test]
    fn test_degenerate_ellipse_draws_nothing() {
        let mut c = canvas(10, 10);
        c.fill_ellipse(2, 2, 0, 5, INK);
        c.stroke_ellipse(2, 2, 5, 0, INK);
        assert!(lit(&c).is_empty());
    }

    #[test]
    fn test_arc_stays_in_quadrant() {
        let mut c = canvas(40, 40);
        c.fill_arc(10, 10, 20, 20, Quadrant::BottomLeft, INK);
        let set = lit(&c);
        assert!(!set.is_empty());
        // center is (20, 20): nothing right of or above it
        assert!(set.iter().all(|&(x, y)| x <= 20 && y >= 20));
    }

    #[test]
    fn test_thin_ellipse_boxes_collapse_to_pixels() {
        for (w, h) in [(1, 10), (10, 1), (1, 1)] {
            let expected: BTreeSet<_> = (4..4 + h)
                .flat_map(|y| (4..4 + w).map(move |x| (x, y)))
                .collect();
            let draws: [fn(&mut Canvas, i32, i32); 6] = [
                |c, w, h| c.stroke_ellipse(4, 4, w, h, INK),
                |c, w, h| c.fill_ellipse(4, 4, w, h, INK),
                |c, w, h| c.stroke_arc(4, 4, w, h, Quadrant::TopLeft, INK),
                |c, w, h| c.stroke_arc(4, 4, w, h, Quadrant::BottomRight, INK),
                |c, w, h| c.fill_arc(4, 4, w, h, Quadrant::TopRight, INK),
                |c, w, h| c.fill_arc(4, 4, w, h, Quadrant::BottomLeft, INK),
            ];
            for (i, draw) in draws.iter().enumerate() {
                let mut c = canvas(20, 20);
                draw(&mut c, w, h);
                assert_eq!(lit(&c), expected, "{}x{} draw #{}", w, h, i);
            }
        }
    }

    #[test]
    fn test_extreme_coordinates_are_clipped() {
        let mut c = canvas(16, 16);
        c.set_thick_lines(true);
        let far = i32::MAX - 2;

        c.fill_rect(far, 0, 10, 10, 0, INK);
        c.fill_rect(far, far, 10, 10, 3, INK);
        c.fill_rect(i32::MIN, i32::MIN, 10, 10, 2, INK);
        c.stroke_rect(far, 0, 10, 10, 0, 1, INK);
        c.stroke_rect(far, far, 10, 10, 2, 3, INK);
        c.fill_ellipse(far, far, 20, 20, INK);
        c.stroke_ellipse(i32::MIN, i32::MIN, 20, 20, INK);
        c.fill_arc(far, 0, 12, 12, Quadrant::BottomRight, INK);
        c.line(Point2I::new(far, far), Point2I::new(i32::MAX, i32::MIN + 1), 3, INK);
        c.line(Point2I::new(i32::MIN, 3), Point2I::new(i32::MIN, 3), 4, INK);
        c.fill_rect_multi_color(i32::MIN, i32::MIN, 10, 10, INK, INK, INK, INK);
        assert!(lit(&c).is_empty());

        // Spans the whole surface from far outside on both ends
        c.fill_polygon(
            &[
                Point2I::new(0, i32::MIN),
                Point2I::new(15, i32::MIN),
                Point2I::new(15, i32::MAX),
                Point2I::new(0, i32::MAX),
            ],
            INK,
        );
        assert_eq!(lit(&c).len(), 16 * 16);

        let mut whole = canvas(8, 8);
        whole.fill_rect(0, 0, i32::MAX, i32::MAX, 0, INK);
        assert_eq!(lit(&whole).len(), 64);
    }

    #[test]
    fn test_rounded_fill_stays_in_square_bounds() {
        let mut square = canvas(40, 40);
        square.fill_rect(5, 5, 20, 20, 0, INK);
        let square = lit(&square);
        for radius in [1, 2, 6, 100] {
            let mut rounded = canvas(40, 40);
            rounded.fill_rect(5, 5, 20, 20, radius, INK);
            let rounded = lit(&rounded);
            assert!(rounded.is_subset(&square), "radius {}", radius);
            // edge midpoints are still reached
            for p in [(15, 5), (24, 15), (15, 24), (5, 15)] {
                assert!(rounded.contains(&p), "radius {} {:?}", radius, p);
            }
        }
    }

    #[test]
    fn test_gradient_corners() {
        let mut c = canvas(10, 10);
        let tl = Color::rgb(255, 0, 0);
        let tr = Color::rgb(0, 255, 0);
        let br = Color::rgb(0, 0, 255);
        let bl = Color::rgb(255, 255, 255);
        c.fill_rect_multi_color(0, 0, 10, 10, tl, tr, br, bl);
        assert_eq!(c.get_pixel(0, 0), Some(tl));
        assert_eq!(c.get_pixel(9, 0), Some(tr));
        assert_eq!(c.get_pixel(9, 9), Some(br));
        assert_eq!(c.get_pixel(0, 9), Some(bl));
    }

    #[test]
    fn test_gradient_single_column() {
        let mut c = canvas(4, 4);
        c.fill_rect_multi_color(1, 0, 1, 4, INK, INK, INK, INK);
        assert_eq!(lit(&c).len(), 4);
    }

    #[test]
    fn test_curve_reaches_end() {
        let mut c = canvas(50, 50);
        c.stroke_curve(
            Point2I::new(2, 40),
            Point2I::new(10, 0),
            Point2I::new(30, 0),
            Point2I::new(45, 40),
            22,
            1,
            INK,
        );
        let set = lit(&c);
        assert!(set.contains(&(2, 40)));
        assert!(set.contains(&(45, 40)));
    }

    #[test]
    fn test_polyline_open_polygon_closed() {
        let pts = [Point2I::new(1, 1), Point2I::new(8, 1), Point2I::new(8, 8)];
        let mut open = canvas(10, 10);
        open.stroke_polyline(&pts, 1, INK);
        let mut closed = canvas(10, 10);
        closed.stroke_polygon(&pts, 1, INK);
        assert!(!lit(&open).contains(&(4, 4)));
        assert!(lit(&closed).contains(&(4, 4)));
    }

    #[test]
    fn test_primitives_respect_scissor() {
        let mut c = canvas(30, 30);
        c.set_scissor(10, 10, 5, 5);
        c.fill_rect(0, 0, 30, 30, 4, INK);
        c.fill_ellipse(0, 0, 30, 30, INK);
        c.stroke_curve(
            Point2I::new(0, 0),
            Point2I::new(30, 0),
            Point2I::new(0, 30),
            Point2I::new(30, 30),
            22,
            1,
            INK,
        );
        c.fill_rect_multi_color(0, 0, 30, 30, INK, INK, INK, INK);
        assert!(lit(&c)
            .iter()
            .all(|&(x, y)| (10..15).contains(&x) && (10..15).contains(&y)));
    }
}
