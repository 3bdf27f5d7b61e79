//! Circle shape.

use super::{SerializableColor, ShapeId, ShapeStyle, ShapeTrait};
use crate::geometry::rect_contains;
use kurbo::{BezPath, Circle as KurboCircle, Point, Rect, Shape as KurboShape, Vec2};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A circle defined by center and radius.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Circle {
    pub(crate) id: ShapeId,
    pub center: Point,
    pub radius: f64,
    #[serde(default)]
    pub filled: bool,
    /// Style properties.
    pub style: ShapeStyle,
}

impl Circle {
    pub fn new(center: Point, radius: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            center,
            radius,
            filled: false,
            style: ShapeStyle::default(),
        }
    }

    pub fn with_style(mut self, style: ShapeStyle) -> Self {
        self.style = style;
        self
    }
}

impl ShapeTrait for Circle {
    fn id(&self) -> ShapeId {
        self.id
    }

    fn bounds(&self) -> Rect {
        Rect::new(
            self.center.x - self.radius,
            self.center.y - self.radius,
            self.center.x + self.radius,
            self.center.y + self.radius,
        )
    }

    // Ring test: only the outline is hit, filled or not.
    fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        ((point - self.center).hypot() - self.radius).abs() <= tolerance
    }

    fn intersects_rect(&self, rect: Rect) -> bool {
        rect_contains(rect.inflate(self.radius, self.radius), self.center)
    }

    fn to_path(&self) -> BezPath {
        KurboCircle::new(self.center, self.radius).to_path(0.1)
    }

    fn translate(&mut self, delta: Vec2) {
        self.center += delta;
    }

    fn color(&self) -> SerializableColor {
        self.style.color
    }

    fn set_color(&mut self, color: SerializableColor) {
        self.style.color = color;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds() {
        let circle = Circle::new(Point::new(100.0, 100.0), 20.0);
        assert_eq!(circle.bounds(), Rect::new(80.0, 80.0, 120.0, 120.0));
    }

    #[test]
    fn test_ring_hit_test() {
        let circle = Circle::new(Point::new(100.0, 100.0), 20.0);
        assert!(circle.hit_test(Point::new(100.0, 80.0), 0.5));
        assert!(circle.hit_test(Point::new(100.0, 75.0), 5.0));
        // The centre is far from the ring.
        assert!(!circle.hit_test(Point::new(100.0, 100.0), 10.0));
    }

    #[test]
    fn test_intersects_rect_uses_inflated_center_test() {
        let circle = Circle::new(Point::new(100.0, 100.0), 20.0);
        assert!(circle.intersects_rect(Rect::new(110.0, 110.0, 200.0, 200.0)));
        assert!(!circle.intersects_rect(Rect::new(121.0, 0.0, 200.0, 200.0)));
    }
}
