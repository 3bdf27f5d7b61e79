//! Shape definitions for the whiteboard.

mod arrow;
mod circle;
mod freehand;
mod line;
mod rectangle;
mod text;

pub use arrow::{ARROW_HEAD_ANGLE, ARROW_HEAD_MIN_LENGTH, Arrow};
pub use circle::Circle;
pub use freehand::{DEFAULT_PRESSURE, Freehand, PathSample};
pub use line::Line;
pub use rectangle::Rectangle;
pub use text::{DEFAULT_FONT_FAMILY, DEFAULT_FONT_SIZE, ESTIMATED_CHAR_WIDTH, Text};

use kurbo::{BezPath, Point, Rect, Vec2};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use uuid::Uuid;

/// Error returned when a color string can't be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid color `{0}`: expected #rgb, #rrggbb or #rrggbbaa")]
pub struct ParseColorError(pub String);

/// Serializable color representation (RGBA8).
///
/// Serialized as a hex string so session files stay readable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SerializableColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl SerializableColor {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    pub const fn black() -> Self {
        Self::rgb(0, 0, 0)
    }

    pub const fn white() -> Self {
        Self::rgb(255, 255, 255)
    }

    /// Same color with a different alpha.
    pub const fn with_alpha(self, a: u8) -> Self {
        Self::new(self.r, self.g, self.b, a)
    }

    /// Perceived brightness in `0..=255` (`(r*299 + g*587 + b*114) / 1000`).
    pub fn brightness(&self) -> u8 {
        let sum = self.r as u32 * 299 + self.g as u32 * 587 + self.b as u32 * 114;
        (sum / 1000) as u8
    }

    /// Whether light foreground content reads better on this color.
    pub fn is_dark(&self) -> bool {
        self.brightness() < 128
    }

    /// Format as `#rrggbb`, or `#rrggbbaa` when not fully opaque.
    pub fn to_hex(&self) -> String {
        if self.a == 255 {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!("#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }
}

impl Default for SerializableColor {
    fn default() -> Self {
        Self::black()
    }
}

impl FromStr for SerializableColor {
    type Err = ParseColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseColorError(s.to_string());
        let hex = s.trim().strip_prefix('#').ok_or_else(err)?;
        if !hex.is_ascii() {
            return Err(err());
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| err());
        let nibble = |i: usize| {
            u8::from_str_radix(&hex[i..i + 1], 16)
                .map(|v| v * 17)
                .map_err(|_| err())
        };
        match hex.len() {
            3 => Ok(Self::rgb(nibble(0)?, nibble(1)?, nibble(2)?)),
            6 => Ok(Self::rgb(channel(0)?, channel(2)?, channel(4)?)),
            8 => Ok(Self::new(channel(0)?, channel(2)?, channel(4)?, channel(6)?)),
            _ => Err(err()),
        }
    }
}

impl TryFrom<String> for SerializableColor {
    type Error = ParseColorError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<SerializableColor> for String {
    fn from(color: SerializableColor) -> Self {
        color.to_hex()
    }
}

impl fmt::Display for SerializableColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// Stroke properties shared by outlined shapes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShapeStyle {
    pub color: SerializableColor,
    pub stroke_width: f64,
}

impl ShapeStyle {
    pub fn new(color: SerializableColor, stroke_width: f64) -> Self {
        Self {
            color,
            stroke_width,
        }
    }
}

impl Default for ShapeStyle {
    fn default() -> Self {
        Self::new(SerializableColor::black(), 2.0)
    }
}

/// Unique identifier for shapes.
pub type ShapeId = Uuid;

/// Common trait for all shapes.
pub trait ShapeTrait {
    /// Get the unique identifier.
    fn id(&self) -> ShapeId;

    /// Get the bounding box in world coordinates.
    fn bounds(&self) -> Rect;

    /// Check if a point (in world coordinates) hits this shape.
    fn hit_test(&self, point: Point, tolerance: f64) -> bool;

    /// Check if this shape counts as inside a selection rectangle.
    fn intersects_rect(&self, rect: Rect) -> bool;

    /// Get the path representation for rendering.
    fn to_path(&self) -> BezPath;

    /// Translate by a world-space delta.
    fn translate(&mut self, delta: Vec2);

    fn color(&self) -> SerializableColor;

    fn set_color(&mut self, color: SerializableColor);
}

/// Enum wrapper for all shape types.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Shape {
    #[serde(rename = "path")]
    Freehand(Freehand),
    Rectangle(Rectangle),
    Circle(Circle),
    Line(Line),
    Arrow(Arrow),
    Text(Text),
}

impl Shape {
    pub fn id(&self) -> ShapeId {
        match self {
            Shape::Freehand(s) => s.id(),
            Shape::Rectangle(s) => s.id(),
            Shape::Circle(s) => s.id(),
            Shape::Line(s) => s.id(),
            Shape::Arrow(s) => s.id(),
            Shape::Text(s) => s.id(),
        }
    }

    pub fn bounds(&self) -> Rect {
        match self {
            Shape::Freehand(s) => s.bounds(),
            Shape::Rectangle(s) => s.bounds(),
            Shape::Circle(s) => s.bounds(),
            Shape::Line(s) => s.bounds(),
            Shape::Arrow(s) => s.bounds(),
            Shape::Text(s) => s.bounds(),
        }
    }

    pub fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        match self {
            Shape::Freehand(s) => s.hit_test(point, tolerance),
            Shape::Rectangle(s) => s.hit_test(point, tolerance),
            Shape::Circle(s) => s.hit_test(point, tolerance),
            Shape::Line(s) => s.hit_test(point, tolerance),
            Shape::Arrow(s) => s.hit_test(point, tolerance),
            Shape::Text(s) => s.hit_test(point, tolerance),
        }
    }

    pub fn intersects_rect(&self, rect: Rect) -> bool {
        match self {
            Shape::Freehand(s) => s.intersects_rect(rect),
            Shape::Rectangle(s) => s.intersects_rect(rect),
            Shape::Circle(s) => s.intersects_rect(rect),
            Shape::Line(s) => s.intersects_rect(rect),
            Shape::Arrow(s) => s.intersects_rect(rect),
            Shape::Text(s) => s.intersects_rect(rect),
        }
    }

    pub fn to_path(&self) -> BezPath {
        match self {
            Shape::Freehand(s) => s.to_path(),
            Shape::Rectangle(s) => s.to_path(),
            Shape::Circle(s) => s.to_path(),
            Shape::Line(s) => s.to_path(),
            Shape::Arrow(s) => s.to_path(),
            Shape::Text(s) => s.to_path(),
        }
    }

    pub fn translate(&mut self, delta: Vec2) {
        match self {
            Shape::Freehand(s) => s.translate(delta),
            Shape::Rectangle(s) => s.translate(delta),
            Shape::Circle(s) => s.translate(delta),
            Shape::Line(s) => s.translate(delta),
            Shape::Arrow(s) => s.translate(delta),
            Shape::Text(s) => s.translate(delta),
        }
    }

    pub fn color(&self) -> SerializableColor {
        match self {
            Shape::Freehand(s) => s.color(),
            Shape::Rectangle(s) => s.color(),
            Shape::Circle(s) => s.color(),
            Shape::Line(s) => s.color(),
            Shape::Arrow(s) => s.color(),
            Shape::Text(s) => s.color(),
        }
    }

    pub fn set_color(&mut self, color: SerializableColor) {
        match self {
            Shape::Freehand(s) => s.set_color(color),
            Shape::Rectangle(s) => s.set_color(color),
            Shape::Circle(s) => s.set_color(color),
            Shape::Line(s) => s.set_color(color),
            Shape::Arrow(s) => s.set_color(color),
            Shape::Text(s) => s.set_color(color),
        }
    }

    /// Stroke width, or `None` for text.
    pub fn stroke_width(&self) -> Option<f64> {
        match self {
            Shape::Freehand(s) => Some(s.style.stroke_width),
            Shape::Rectangle(s) => Some(s.style.stroke_width),
            Shape::Circle(s) => Some(s.style.stroke_width),
            Shape::Line(s) => Some(s.style.stroke_width),
            Shape::Arrow(s) => Some(s.style.stroke_width),
            Shape::Text(_) => None,
        }
    }

    /// Set the stroke width. Text has none and is left unchanged.
    pub fn set_stroke_width(&mut self, width: f64) {
        match self {
            Shape::Freehand(s) => s.style.stroke_width = width,
            Shape::Rectangle(s) => s.style.stroke_width = width,
            Shape::Circle(s) => s.style.stroke_width = width,
            Shape::Line(s) => s.style.stroke_width = width,
            Shape::Arrow(s) => s.style.stroke_width = width,
            Shape::Text(_) => {}
        }
    }

    /// Whether the shape can be resized through selection handles.
    pub fn is_resizable(&self) -> bool {
        matches!(
            self,
            Shape::Rectangle(_) | Shape::Circle(_) | Shape::Line(_) | Shape::Arrow(_)
        )
    }

    /// Whether the shape is painted with a fill instead of a stroke.
    pub fn is_filled(&self) -> bool {
        match self {
            Shape::Rectangle(s) => s.filled,
            Shape::Circle(s) => s.filled,
            Shape::Text(_) => true,
            _ => false,
        }
    }

    /// Assign a fresh id, used when duplicating.
    pub fn regenerate_id(&mut self) {
        let id = Uuid::new_v4();
        match self {
            Shape::Freehand(s) => s.id = id,
            Shape::Rectangle(s) => s.id = id,
            Shape::Circle(s) => s.id = id,
            Shape::Line(s) => s.id = id,
            Shape::Arrow(s) => s.id = id,
            Shape::Text(s) => s.id = id,
        }
    }

    /// Lowercase variant name, matching the serialized tag.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Shape::Freehand(_) => "path",
            Shape::Rectangle(_) => "rectangle",
            Shape::Circle(_) => "circle",
            Shape::Line(_) => "line",
            Shape::Arrow(_) => "arrow",
            Shape::Text(_) => "text",
        }
    }
}
