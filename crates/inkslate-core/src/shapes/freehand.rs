//! Freehand drawing shape.

use super::{SerializableColor, ShapeId, ShapeStyle, ShapeTrait};
use crate::geometry::{bounds_of_points, rect_contains};
use kurbo::{BezPath, Point, Rect, Vec2};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Pressure recorded when the input device reports none.
pub const DEFAULT_PRESSURE: f64 = 0.5;

/// One recorded pointer sample.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PathSample {
    pub x: f64,
    pub y: f64,
    pub pressure: f64,
}

impl PathSample {
    pub fn new(point: Point, pressure: f64) -> Self {
        Self {
            x: point.x,
            y: point.y,
            pressure,
        }
    }

    pub fn point(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// A freehand drawing (series of samples).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Freehand {
    pub(crate) id: ShapeId,
    /// Samples in drawing order.
    pub points: Vec<PathSample>,
    /// Render as quadratic curves through sample midpoints.
    pub smooth: bool,
    /// Style properties.
    pub style: ShapeStyle,
}

impl Freehand {
    /// Create from recorded samples.
    pub fn new(points: Vec<PathSample>) -> Self {
        Self {
            id: Uuid::new_v4(),
            points,
            smooth: true,
            style: ShapeStyle::default(),
        }
    }

    /// Create from bare points with default pressure.
    pub fn from_points(points: Vec<Point>) -> Self {
        Self::new(
            points
                .into_iter()
                .map(|p| PathSample::new(p, DEFAULT_PRESSURE))
                .collect(),
        )
    }

    pub fn with_style(mut self, style: ShapeStyle) -> Self {
        self.style = style;
        self
    }

    /// Get the number of samples.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Check if the path is empty.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

impl ShapeTrait for Freehand {
    fn id(&self) -> ShapeId {
        self.id
    }

    fn bounds(&self) -> Rect {
        bounds_of_points(self.points.iter().map(PathSample::point)).unwrap_or(Rect::ZERO)
    }

    // Samples only; segments between them are not tested.
    fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        self.points
            .iter()
            .any(|s| (point.x - s.x).abs() <= tolerance && (point.y - s.y).abs() <= tolerance)
    }

    fn intersects_rect(&self, rect: Rect) -> bool {
        self.points.iter().any(|s| rect_contains(rect, s.point()))
    }

    fn to_path(&self) -> BezPath {
        let mut path = BezPath::new();
        let Some(first) = self.points.first() else {
            return path;
        };
        path.move_to(first.point());

        if self.smooth && self.points.len() > 2 {
            for pair in self.points[1..].windows(2) {
                let ctrl = pair[0].point();
                let next = pair[1].point();
                path.quad_to(ctrl, ctrl.midpoint(next));
            }
            if let [.., second_last, last] = self.points.as_slice() {
                path.quad_to(second_last.point(), last.point());
            }
        } else {
            for sample in &self.points[1..] {
                path.line_to(sample.point());
            }
        }

        path
    }

    fn translate(&mut self, delta: Vec2) {
        for sample in &mut self.points {
            sample.x += delta.x;
            sample.y += delta.y;
        }
    }

    fn color(&self) -> SerializableColor {
        self.style.color
    }

    fn set_color(&mut self, color: SerializableColor) {
        self.style.color = color;
    }
}
