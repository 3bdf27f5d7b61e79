//! Text shape.

use super::{SerializableColor, ShapeId, ShapeTrait};
use crate::geometry::rect_contains;
use kurbo::{BezPath, Point, Rect, Shape as KurboShape, Vec2};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Average glyph advance as a fraction of the font size.
pub const ESTIMATED_CHAR_WIDTH: f64 = 0.6;
/// Width assumed for text with no characters.
const EMPTY_TEXT_WIDTH: f64 = 100.0;
/// Extent below the anchor included in the bounds.
const DESCENT_ALLOWANCE: f64 = 5.0;

pub const DEFAULT_FONT_SIZE: f64 = 16.0;
pub const DEFAULT_FONT_FAMILY: &str = "Arial";

/// A single-line text label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Text {
    pub(crate) id: ShapeId,
    /// Anchor position (top-left of the em box when rendered).
    pub position: Point,
    pub content: String,
    pub font_size: f64,
    pub font_family: String,
    pub color: SerializableColor,
}

impl Text {
    pub fn new(position: Point, content: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            position,
            content,
            font_size: DEFAULT_FONT_SIZE,
            font_family: DEFAULT_FONT_FAMILY.to_string(),
            color: SerializableColor::black(),
        }
    }

    pub fn with_font(mut self, family: impl Into<String>, size: f64) -> Self {
        self.font_family = family.into();
        self.font_size = size;
        self
    }

    pub fn with_color(mut self, color: SerializableColor) -> Self {
        self.color = color;
        self
    }

    /// Estimated rendered width; no font metrics are consulted.
    pub fn estimated_width(&self) -> f64 {
        let chars = self.content.chars().count();
        if chars == 0 {
            EMPTY_TEXT_WIDTH
        } else {
            chars as f64 * self.font_size * ESTIMATED_CHAR_WIDTH
        }
    }
}

impl ShapeTrait for Text {
    fn id(&self) -> ShapeId {
        self.id
    }

    fn bounds(&self) -> Rect {
        Rect::new(
            self.position.x,
            self.position.y - self.font_size,
            self.position.x + self.estimated_width(),
            self.position.y + DESCENT_ALLOWANCE,
        )
    }

    fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        rect_contains(self.bounds().inflate(tolerance, tolerance), point)
    }

    fn intersects_rect(&self, rect: Rect) -> bool {
        rect_contains(rect, self.position)
    }

    /// Placeholder box; glyph outlines are produced by the renderer.
    fn to_path(&self) -> BezPath {
        Rect::from_origin_size(
            self.position,
            (self.estimated_width(), self.font_size),
        )
        .to_path(0.1)
    }

    fn translate(&mut self, delta: Vec2) {
        self.position += delta;
    }

    fn color(&self) -> SerializableColor {
        self.color
    }

    fn set_color(&mut self, color: SerializableColor) {
        self.color = color;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_estimated_bounds() {
        let text = Text::new(Point::new(10.0, 40.0), "hello".into()).with_font("Arial", 20.0);
        assert_eq!(text.bounds(), Rect::new(10.0, 20.0, 70.0, 45.0));
    }

    #[test]
    fn test_width_counts_chars_not_bytes() {
        let text = Text::new(Point::ZERO, "héé".into());
        assert!((text.estimated_width() - 3.0 * 16.0 * 0.6).abs() < 1e-9);
    }

    #[test]
    fn test_hit_test_inflated_bounds() {
        let text = Text::new(Point::new(0.0, 16.0), "ab".into());
        assert!(text.hit_test(Point::new(5.0, 10.0), 0.0));
        assert!(text.hit_test(Point::new(-3.0, 10.0), 5.0));
        assert!(!text.hit_test(Point::new(-6.0, 10.0), 5.0));
    }

    #[test]
    fn test_intersects_rect_uses_anchor() {
        let text = Text::new(Point::new(50.0, 50.0), "abc".into());
        assert!(text.intersects_rect(Rect::new(40.0, 40.0, 60.0, 60.0)));
        assert!(!text.intersects_rect(Rect::new(55.0, 0.0, 200.0, 200.0)));
    }
}
