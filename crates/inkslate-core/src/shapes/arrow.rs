//! Arrow shape.

use super::line::{segment_bounds, segment_hit, segment_in_rect};
use super::{SerializableColor, ShapeId, ShapeStyle, ShapeTrait};
use kurbo::{BezPath, Point, Rect, Vec2};
use serde::{Deserialize, Serialize};
use std::f64::consts::FRAC_PI_6;
use uuid::Uuid;

/// Half-angle between the shaft and each head stroke.
pub const ARROW_HEAD_ANGLE: f64 = FRAC_PI_6;
/// Minimum head length in world units.
pub const ARROW_HEAD_MIN_LENGTH: f64 = 15.0;

/// A line with an arrowhead at its end point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Arrow {
    pub(crate) id: ShapeId,
    pub start: Point,
    pub end: Point,
    /// Style properties.
    pub style: ShapeStyle,
}

impl Arrow {
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

    /// Head length, scaled with the stroke width.
    pub fn head_length(&self) -> f64 {
        ARROW_HEAD_MIN_LENGTH.max(self.style.stroke_width * 3.0)
    }

    /// The two outer points of the arrowhead.
    pub fn head_points(&self) -> (Point, Point) {
        let dir = self.end - self.start;
        let angle = dir.y.atan2(dir.x);
        let len = self.head_length();
        let wing = |a: f64| Point::new(self.end.x - len * a.cos(), self.end.y - len * a.sin());
        (wing(angle - ARROW_HEAD_ANGLE), wing(angle + ARROW_HEAD_ANGLE))
    }
}

impl ShapeTrait for Arrow {
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

        let (left, right) = self.head_points();
        path.move_to(self.end);
        path.line_to(left);
        path.move_to(self.end);
        path.line_to(right);
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
