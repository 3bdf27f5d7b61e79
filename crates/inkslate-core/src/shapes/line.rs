//! Line shape.

use super::{SerializableColor, ShapeId, ShapeStyle, ShapeTrait};
use crate::geometry::{bounds_of_points, point_to_segment_dist, rect_contains};
use kurbo::{BezPath, Point, Rect, Vec2};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A straight line segment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Line {
    pub(crate) id: ShapeId,
    pub start: Point,
    pub end: Point,
    /// Style properties.
    pub style: ShapeStyle,
}

impl Line {
    pub fn new(start: Point, end: Point) -> Self {
        Self {
            id: Uuid::new_v4(),
            start,
            end,
            style: ShapeStyle::default(),
        }
    }

    pub fn with_style(mut self, style: ShapeStyle) -> Self {
        self.style = style;
        self
    }
}

pub(super) fn segment_bounds(start: Point, end: Point) -> Rect {
    bounds_of_points([start, end]).unwrap_or(Rect::ZERO)
}

pub(super) fn segment_hit(start: Point, end: Point, point: Point, tolerance: f64) -> bool {
    point_to_segment_dist(point, start, end) <= tolerance
}

pub(super) fn segment_in_rect(start: Point, end: Point, rect: Rect) -> bool {
    rect_contains(rect, start) || rect_contains(rect, end)
}

impl ShapeTrait for Line {
    fn id(&self) -> ShapeId {
        self.id
    }

    fn bounds(&self) -> Rect {
        segment_bounds(self.start, self.end)
    }

    fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        segment_hit(self.start, self.end, point, tolerance)
    }

    fn intersects_rect(&self, rect: Rect) -> bool {
        segment_in_rect(self.start, self.end, rect)
    }

    fn to_path(&self) -> BezPath {
        let mut path = BezPath::new();
        path.move_to(self.start);
        path.line_to(self.end);
        path
    }

    fn translate(&mut self, delta: Vec2) {
        self.start += delta;
        self.end += delta;
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
    fn test_line_bounds() {
        let line = Line::new(Point::new(30.0, 5.0), Point::new(10.0, 25.0));
        assert_eq!(line.bounds(), Rect::new(10.0, 5.0, 30.0, 25.0));
    }

    #[test]
    fn test_line_hit_test() {
        let line = Line::new(Point::new(0.0, 0.0), Point::new(100.0, 100.0));
        assert!(line.hit_test(Point::new(50.0, 50.0), 1.0));
        assert!(line.hit_test(Point::new(52.0, 48.0), 5.0));
        assert!(!line.hit_test(Point::new(0.0, 100.0), 5.0));
    }

    #[test]
    fn test_intersects_rect_requires_endpoint() {
        let line = Line::new(Point::new(0.0, 0.0), Point::new(100.0, 0.0));
        assert!(line.intersects_rect(Rect::new(90.0, -5.0, 110.0, 5.0)));
        // Crosses the rectangle without an endpoint inside.
        assert!(!line.intersects_rect(Rect::new(40.0, -5.0, 60.0, 5.0)));
    }

    #[test]
    fn test_translate_moves_both_endpoints() {
        let mut line = Line::new(Point::new(0.0, 0.0), Point::new(10.0, 0.0));
        line.translate(Vec2::new(1.0, 2.0));
        assert_eq!(line.start, Point::new(1.0, 2.0));
        assert_eq!(line.end, Point::new(11.0, 2.0));
    }
}
