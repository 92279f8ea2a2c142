//! Viewport to logical surface coordinate mapping

use inspecta_ipc::InputPosition;

use crate::types::Point;

/// On-screen bounding box of the rendered surface, in viewport pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl BoundingBox {
    pub fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }
}

/// Maps viewport positions onto the surface's logical resolution,
/// compensating for CSS scaling of the displayed element.
#[derive(Debug, Clone, Copy)]
pub struct CoordinateMapper {
    logical_width: f32,
    logical_height: f32,
}

impl CoordinateMapper {
    pub fn new(logical_width: u32, logical_height: u32) -> Self {
        Self {
            logical_width: logical_width as f32,
            logical_height: logical_height as f32,
        }
    }

    /// Logical pixels per displayed pixel on each axis.
    /// None when the element has no usable on-screen size.
    pub fn scale(&self, bounds: &BoundingBox) -> Option<(f32, f32)> {
        let usable = |v: f32| v.is_finite() && v > 0.0;
        if !usable(bounds.width) || !usable(bounds.height) {
            return None;
        }
        Some((
            self.logical_width / bounds.width,
            self.logical_height / bounds.height,
        ))
    }

    /// Map an event position to a logical point.
    ///
    /// Positions outside the element go through the same transform and are
    /// not clamped. Without bounds (no surface attached) nothing is mapped.
    pub fn map(&self, position: InputPosition, bounds: Option<&BoundingBox>) -> Option<Point> {
        let bounds = bounds?;
        let (scale_x, scale_y) = self.scale(bounds)?;
        let (client_x, client_y) = position.client();
        Some(Point::new(
            (client_x - bounds.left) * scale_x,
            (client_y - bounds.top) * scale_y,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: Point, b: Point) -> bool {
        (a.x - b.x).abs() < 0.01 && (a.y - b.y).abs() < 0.01
    }

    #[test]
    fn test_identity_when_displayed_at_logical_size() {
        let mapper = CoordinateMapper::new(400, 150);
        let bounds = BoundingBox::new(0.0, 0.0, 400.0, 150.0);
        let point = mapper
            .map(InputPosition::Pointer { x: 12.0, y: 34.0 }, Some(&bounds))
            .unwrap();
        assert!(approx(point, Point::new(12.0, 34.0)));
    }

    #[test]
    fn test_double_size_center_maps_to_logical_center() {
        let mapper = CoordinateMapper::new(400, 150);
        let bounds = BoundingBox::new(10.0, 20.0, 800.0, 300.0);
        let point = mapper
            .map(InputPosition::Pointer { x: 410.0, y: 170.0 }, Some(&bounds))
            .unwrap();
        assert!(approx(point, Point::new(200.0, 75.0)));
    }

    #[test]
    fn test_touch_and_pointer_map_identically() {
        let mapper = CoordinateMapper::new(400, 150);
        let bounds = BoundingBox::new(5.0, 5.0, 200.0, 75.0);
        let pointer = mapper.map(InputPosition::Pointer { x: 55.0, y: 30.0 }, Some(&bounds));
        let touch = mapper.map(InputPosition::Touch { x: 55.0, y: 30.0 }, Some(&bounds));
        assert_eq!(pointer, touch);
        assert!(approx(pointer.unwrap(), Point::new(100.0, 50.0)));
    }

    #[test]
    fn test_outside_positions_are_not_clamped() {
        let mapper = CoordinateMapper::new(400, 150);
        let bounds = BoundingBox::new(100.0, 100.0, 400.0, 150.0);
        let point = mapper
            .map(InputPosition::Pointer { x: 50.0, y: 300.0 }, Some(&bounds))
            .unwrap();
        assert!(approx(point, Point::new(-50.0, 200.0)));
    }

    #[test]
    fn test_missing_or_collapsed_surface_maps_nothing() {
        let mapper = CoordinateMapper::new(400, 150);
        let pos = InputPosition::Pointer { x: 1.0, y: 1.0 };
        assert_eq!(mapper.map(pos, None), None);

        let collapsed = BoundingBox::new(0.0, 0.0, 0.0, 150.0);
        assert_eq!(mapper.map(pos, Some(&collapsed)), None);
    }
}
