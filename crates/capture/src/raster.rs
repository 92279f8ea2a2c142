//! Segment rasterization for signature strokes
//!
//! Each segment is stamped as a capsule (or a rectangle for butt/square
//! caps) with anti-aliased edges: per pixel centre, coverage is
//! `clamp(r + 0.5 - distance, 0, 1)` and is blended with the surface's
//! alpha compositing.

use inspecta_config::{LineCap, LineJoin, StrokeStyle};
use tracing::debug;

use crate::constants::MIN_SEGMENT_LENGTH;
use crate::surface::CpuSurface;
use crate::types::Point;

/// Affected region as (x, y, width, height)
pub type Region = (u32, u32, u32, u32);

/// Render one segment of a stroke.
///
/// Returns the bounding box of the affected region, or None if the segment
/// lies completely outside the surface.
pub fn draw_segment(
    surface: &mut CpuSurface,
    from: Point,
    to: Point,
    style: &StrokeStyle,
) -> Option<Region> {
    let radius = style.radius();
    if radius <= 0.0 {
        return None;
    }

    let dx = to.x - from.x;
    let dy = to.y - from.y;
    let length = (dx * dx + dy * dy).sqrt();
    let degenerate = length < MIN_SEGMENT_LENGTH;

    if degenerate && style.cap == LineCap::Butt {
        // A zero-length butt-capped segment has no area
        return None;
    }

    // Square caps reach sqrt(2) * r past the endpoints along a diagonal
    let pad = radius * std::f32::consts::SQRT_2 + 1.0;
    let region = clip_bounds(
        surface,
        from.x.min(to.x) - pad,
        from.y.min(to.y) - pad,
        from.x.max(to.x) + pad,
        from.y.max(to.y) + pad,
    )?;

    let (x_min, y_min, x_max, y_max) = region;
    for py in y_min..y_max {
        for px in x_min..x_max {
            let cx = px as f32 + 0.5;
            let cy = py as f32 + 0.5;

            let coverage = if degenerate {
                match style.cap {
                    LineCap::Round => edge_coverage(radius, from.distance(Point::new(cx, cy))),
                    LineCap::Square => {
                        let d = (cx - from.x).abs().max((cy - from.y).abs());
                        edge_coverage(radius, d)
                    }
                    LineCap::Butt => 0.0,
                }
            } else {
                // Position along the segment and distance from its axis
                let along = ((cx - from.x) * dx + (cy - from.y) * dy) / length;
                let across = ((cx - from.x) * dy - (cy - from.y) * dx).abs() / length;
                match style.cap {
                    LineCap::Round => {
                        let t = along.clamp(0.0, length);
                        let nearest = Point::new(from.x + dx * t / length, from.y + dy * t / length);
                        edge_coverage(radius, nearest.distance(Point::new(cx, cy)))
                    }
                    LineCap::Butt => {
                        let inside_along = (along.min(length - along) + 0.5).clamp(0.0, 1.0);
                        inside_along.min(edge_coverage(radius, across))
                    }
                    LineCap::Square => {
                        let extent = along.min(length - along) + radius;
                        let inside_along = (extent + 0.5).clamp(0.0, 1.0);
                        inside_along.min(edge_coverage(radius, across))
                    }
                }
            };

            if coverage > 0.0 {
                surface.blend_pixel(px, py, style.color, coverage);
            }
        }
    }

    surface.mark_drawn();
    debug!(
        "draw_segment: ({:.1}, {:.1}) -> ({:.1}, {:.1}), width={:.1}, cap={:?}",
        from.x, from.y, to.x, to.y, style.width, style.cap
    );
    Some((x_min, y_min, x_max - x_min, y_max - y_min))
}

/// Render the join at `vertex` between segments `prev -> vertex` and
/// `vertex -> next`.
///
/// Round caps already cover the join, so only non-round caps draw here.
pub fn draw_join(
    surface: &mut CpuSurface,
    prev: Point,
    vertex: Point,
    next: Point,
    style: &StrokeStyle,
) -> Option<Region> {
    if style.cap == LineCap::Round {
        return None;
    }
    match style.join {
        LineJoin::Round => {
            let dot = StrokeStyle {
                cap: LineCap::Round,
                ..*style
            };
            draw_segment(surface, vertex, vertex, &dot)
        }
        LineJoin::Bevel => draw_bevel(surface, prev, vertex, next, style),
    }
}

/// Fill the triangle between the vertex and the two outer corners
fn draw_bevel(
    surface: &mut CpuSurface,
    prev: Point,
    vertex: Point,
    next: Point,
    style: &StrokeStyle,
) -> Option<Region> {
    let (ax, ay) = (vertex.x - prev.x, vertex.y - prev.y);
    let (bx, by) = (next.x - vertex.x, next.y - vertex.y);
    let len_a = (ax * ax + ay * ay).sqrt();
    let len_b = (bx * bx + by * by).sqrt();
    if len_a < MIN_SEGMENT_LENGTH || len_b < MIN_SEGMENT_LENGTH {
        return None;
    }

    let cross = ax * by - ay * bx;
    if cross.abs() < f32::EPSILON {
        // Collinear segments leave no gap
        return None;
    }

    // Normals on the outside of the turn
    let side = if cross > 0.0 { -1.0 } else { 1.0 };
    let r = style.radius();
    let corner_a = Point::new(vertex.x - side * ay / len_a * r, vertex.y + side * ax / len_a * r);
    let corner_b = Point::new(vertex.x - side * by / len_b * r, vertex.y + side * bx / len_b * r);

    let (x_min, y_min, x_max, y_max) = clip_bounds(
        surface,
        vertex.x.min(corner_a.x).min(corner_b.x).floor(),
        vertex.y.min(corner_a.y).min(corner_b.y).floor(),
        vertex.x.max(corner_a.x).max(corner_b.x).ceil(),
        vertex.y.max(corner_a.y).max(corner_b.y).ceil(),
    )?;

    for py in y_min..y_max {
        for px in x_min..x_max {
            let p = Point::new(px as f32 + 0.5, py as f32 + 0.5);
            if in_triangle(p, vertex, corner_a, corner_b) {
                surface.blend_pixel(px, py, style.color, 1.0);
            }
        }
    }

    surface.mark_drawn();
    Some((x_min, y_min, x_max - x_min, y_max - y_min))
}

#[inline]
fn edge_coverage(radius: f32, distance: f32) -> f32 {
    (radius + 0.5 - distance).clamp(0.0, 1.0)
}

/// Clamp a float bounding box to the surface.
/// Returns (x_min, y_min, x_max, y_max) with exclusive max, or None if empty.
fn clip_bounds(
    surface: &CpuSurface,
    x_min: f32,
    y_min: f32,
    x_max: f32,
    y_max: f32,
) -> Option<(u32, u32, u32, u32)> {
    if !(x_min.is_finite() && y_min.is_finite() && x_max.is_finite() && y_max.is_finite()) {
        return None;
    }
    let x0 = (x_min.floor().max(0.0) as u32).min(surface.width);
    let y0 = (y_min.floor().max(0.0) as u32).min(surface.height);
    let x1 = (x_max.ceil().max(0.0) as u32).min(surface.width);
    let y1 = (y_max.ceil().max(0.0) as u32).min(surface.height);

    if x0 >= x1 || y0 >= y1 {
        return None;
    }
    Some((x0, y0, x1, y1))
}

fn in_triangle(p: Point, a: Point, b: Point, c: Point) -> bool {
    let sign = |p1: Point, p2: Point, p3: Point| {
        (p1.x - p3.x) * (p2.y - p3.y) - (p2.x - p3.x) * (p1.y - p3.y)
    };
    let d1 = sign(p, a, b);
    let d2 = sign(p, b, c);
    let d3 = sign(p, c, a);
    let has_neg = d1 < 0.0 || d2 < 0.0 || d3 < 0.0;
    let has_pos = d1 > 0.0 || d2 > 0.0 || d3 > 0.0;
    !(has_neg && has_pos)
}

#[cfg(test)]
mod tests {
    use super::*;
    use inspecta_config::BACKGROUND;

    fn style(width: f32, cap: LineCap, join: LineJoin) -> StrokeStyle {
        StrokeStyle {
            color: [0.0, 0.0, 0.0, 1.0],
            width,
            cap,
            join,
        }
    }

    #[test]
    fn test_round_segment_inks_axis() {
        let mut surface = CpuSurface::new(100, 40);
        let region = draw_segment(
            &mut surface,
            Point::new(10.0, 20.0),
            Point::new(90.0, 20.0),
            &style(4.0, LineCap::Round, LineJoin::Round),
        );
        assert!(region.is_some());
        assert!(!surface.is_blank());

        // Pixel on the axis is fully inked
        assert_eq!(surface.get_pixel(50, 19), Some([0.0, 0.0, 0.0, 1.0]));
        // Pixel well off the axis is untouched
        assert_eq!(surface.get_pixel(50, 30), Some(BACKGROUND));
        // Round cap reaches past the start point
        assert_ne!(surface.get_pixel(8, 19), Some(BACKGROUND));
    }

    #[test]
    fn test_butt_cap_stops_at_endpoint() {
        let mut surface = CpuSurface::new(100, 40);
        draw_segment(
            &mut surface,
            Point::new(10.0, 20.0),
            Point::new(90.0, 20.0),
            &style(6.0, LineCap::Butt, LineJoin::Round),
        );
        assert_eq!(surface.get_pixel(7, 19), Some(BACKGROUND));
        assert_eq!(surface.get_pixel(50, 19), Some([0.0, 0.0, 0.0, 1.0]));
    }

    #[test]
    fn test_square_cap_extends_past_endpoint() {
        let mut surface = CpuSurface::new(100, 40);
        draw_segment(
            &mut surface,
            Point::new(10.0, 20.0),
            Point::new(90.0, 20.0),
            &style(6.0, LineCap::Square, LineJoin::Round),
        );
        assert_eq!(surface.get_pixel(8, 19), Some([0.0, 0.0, 0.0, 1.0]));
        assert_eq!(surface.get_pixel(4, 19), Some(BACKGROUND));
    }

    #[test]
    fn test_segment_outside_surface() {
        let mut surface = CpuSurface::new(50, 50);
        let region = draw_segment(
            &mut surface,
            Point::new(-100.0, -100.0),
            Point::new(-60.0, -80.0),
            &StrokeStyle::default(),
        );
        assert!(region.is_none());
        assert!(surface.is_blank());
    }

    #[test]
    fn test_partially_outside_segment_is_clipped() {
        let mut surface = CpuSurface::new(50, 50);
        let region = draw_segment(
            &mut surface,
            Point::new(-20.0, 25.0),
            Point::new(20.0, 25.0),
            &StrokeStyle::default(),
        );
        let (x, _, w, _) = region.unwrap();
        assert_eq!(x, 0);
        assert!(w <= 50);
        assert_ne!(surface.get_pixel(0, 24), Some(BACKGROUND));
    }

    #[test]
    fn test_degenerate_butt_draws_nothing() {
        let mut surface = CpuSurface::new(20, 20);
        let p = Point::new(10.0, 10.0);
        assert!(draw_segment(&mut surface, p, p, &style(4.0, LineCap::Butt, LineJoin::Round)).is_none());
        assert!(surface.is_blank());
    }

    #[test]
    fn test_bevel_join_fills_outer_corner() {
        let mut surface = CpuSurface::new(60, 60);
        let s = style(10.0, LineCap::Butt, LineJoin::Bevel);
        let prev = Point::new(10.0, 30.0);
        let vertex = Point::new(30.0, 30.0);
        let next = Point::new(30.0, 10.0);

        draw_segment(&mut surface, prev, vertex, &s);
        draw_segment(&mut surface, vertex, next, &s);
        // Outer corner of the turn is a gap before the join
        assert_eq!(surface.get_pixel(33, 31), Some(BACKGROUND));

        assert!(draw_join(&mut surface, prev, vertex, next, &s).is_some());
        assert_ne!(surface.get_pixel(31, 31), Some(BACKGROUND));
    }

    #[test]
    fn test_round_cap_needs_no_join() {
        let mut surface = CpuSurface::new(60, 60);
        let s = style(4.0, LineCap::Round, LineJoin::Bevel);
        let region = draw_join(
            &mut surface,
            Point::new(10.0, 30.0),
            Point::new(30.0, 30.0),
            Point::new(30.0, 10.0),
            &s,
        );
        assert!(region.is_none());
    }
}
