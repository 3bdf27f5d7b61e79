//! Tool system for the whiteboard.

use crate::geometry::lerp;
use crate::selection::MIN_SHAPE_EXTENT;
use crate::shapes::{
    Arrow, Circle, DEFAULT_PRESSURE, Freehand, Line, PathSample, Rectangle, SerializableColor,
    Shape, ShapeStyle,
};
use crate::shapes::{DEFAULT_FONT_FAMILY, DEFAULT_FONT_SIZE};
use kurbo::Point;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Minimum time between accepted pen samples, in milliseconds.
pub const SAMPLE_INTERVAL_MS: f64 = 16.0;
/// Pen moves of this many world units or less are dropped.
pub const MIN_SAMPLE_DISTANCE: f64 = 1.0;
/// Steps longer than this are subdivided when smoothing is on.
pub const SMOOTHING_THRESHOLD: f64 = 3.0;

/// Available tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ToolKind {
    #[default]
    Pen,
    Eraser,
    Select,
    Rectangle,
    Circle,
    Line,
    Arrow,
    Text,
}

impl ToolKind {
    pub const ALL: [ToolKind; 8] = [
        ToolKind::Pen,
        ToolKind::Eraser,
        ToolKind::Select,
        ToolKind::Rectangle,
        ToolKind::Circle,
        ToolKind::Line,
        ToolKind::Arrow,
        ToolKind::Text,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ToolKind::Pen => "pen",
            ToolKind::Eraser => "eraser",
            ToolKind::Select => "select",
            ToolKind::Rectangle => "rectangle",
            ToolKind::Circle => "circle",
            ToolKind::Line => "line",
            ToolKind::Arrow => "arrow",
            ToolKind::Text => "text",
        }
    }

    /// Single-letter keyboard shortcut.
    pub fn shortcut(self) -> char {
        match self {
            ToolKind::Pen => 'p',
            ToolKind::Eraser => 'e',
            ToolKind::Select => 'v',
            ToolKind::Rectangle => 'r',
            ToolKind::Circle => 'c',
            ToolKind::Line => 'l',
            ToolKind::Arrow => 'a',
            ToolKind::Text => 't',
        }
    }

    pub fn from_shortcut(key: char) -> Option<Self> {
        let key = key.to_ascii_lowercase();
        Self::ALL.into_iter().find(|t| t.shortcut() == key)
    }

    /// Tools that create a shape from a press-drag-release gesture.
    pub fn is_shape_tool(self) -> bool {
        matches!(
            self,
            ToolKind::Rectangle | ToolKind::Circle | ToolKind::Line | ToolKind::Arrow
        )
    }
}

/// Error returned for an unknown tool name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown tool `{0}`")]
pub struct ParseToolError(pub String);

impl FromStr for ToolKind {
    type Err = ParseToolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|t| t.name() == name)
            .ok_or_else(|| ParseToolError(s.to_string()))
    }
}

impl fmt::Display for ToolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Color theme of the surrounding chrome; picks the grid shade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

/// Toolbar state the editor reads when creating shapes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolSettings {
    pub tool: ToolKind,
    pub stroke_color: SerializableColor,
    pub background_color: SerializableColor,
    pub stroke_width: f64,
    pub font_family: String,
    pub font_size: f64,
    /// Interpolate extra samples on fast pen strokes.
    pub smoothing: bool,
    pub theme: Theme,
}

impl Default for ToolSettings {
    fn default() -> Self {
        Self {
            tool: ToolKind::default(),
            stroke_color: SerializableColor::black(),
            background_color: SerializableColor::white(),
            stroke_width: 2.0,
            font_family: DEFAULT_FONT_FAMILY.to_string(),
            font_size: DEFAULT_FONT_SIZE,
            smoothing: true,
            theme: Theme::default(),
        }
    }
}

impl ToolSettings {
    pub fn style(&self) -> ShapeStyle {
        ShapeStyle::new(self.stroke_color, self.stroke_width)
    }

    /// Eraser hit radius in world units.
    pub fn eraser_radius(&self) -> f64 {
        self.stroke_width * 3.0
    }
}

/// Accumulates pen samples for one stroke.
#[derive(Debug, Clone, PartialEq)]
pub struct PathBuilder {
    samples: Vec<PathSample>,
    last_point: Point,
    last_time: f64,
    smoothing: bool,
}

impl PathBuilder {
    /// Start a stroke at `point`. `time_ms` is the event timestamp.
    pub fn begin(point: Point, pressure: Option<f64>, time_ms: f64, smoothing: bool) -> Self {
        Self {
            samples: vec![PathSample::new(point, normalize_pressure(pressure))],
            last_point: point,
            last_time: time_ms,
            smoothing,
        }
    }

    /// Feed a pointer move. Returns true when samples were added.
    pub fn push(&mut self, point: Point, pressure: Option<f64>, time_ms: f64) -> bool {
        if time_ms - self.last_time <= SAMPLE_INTERVAL_MS {
            return false;
        }
        self.last_time = time_ms;

        let distance = (point - self.last_point).hypot();
        if distance <= MIN_SAMPLE_DISTANCE {
            return false;
        }

        let pressure = normalize_pressure(pressure);
        if self.smoothing && distance > SMOOTHING_THRESHOLD {
            let steps = (distance / 2.0).ceil() as usize;
            let from = self.last_point;
            for i in 1..=steps {
                let t = i as f64 / steps as f64;
                self.samples.push(PathSample::new(lerp(from, point, t), pressure));
            }
        } else {
            self.samples.push(PathSample::new(point, pressure));
        }
        self.last_point = point;
        true
    }

    pub fn samples(&self) -> &[PathSample] {
        &self.samples
    }

    /// Current stroke as a smoothed path for preview.
    pub fn preview(&self, style: ShapeStyle) -> Shape {
        Shape::Freehand(Freehand::new(self.samples.clone()).with_style(style))
    }

    /// Finish the stroke. Single-sample strokes produce nothing.
    pub fn finish(self, style: ShapeStyle) -> Option<Shape> {
        if self.samples.len() > 1 {
            Some(Shape::Freehand(Freehand::new(self.samples).with_style(style)))
        } else {
            None
        }
    }
}

fn normalize_pressure(pressure: Option<f64>) -> f64 {
    match pressure {
        Some(p) if p > 0.0 && p.is_finite() => p,
        _ => DEFAULT_PRESSURE,
    }
}

/// Shape for a completed drag with a shape tool, or `None` below the size
/// threshold.
pub fn shape_from_drag(
    tool: ToolKind,
    anchor: Point,
    end: Point,
    settings: &ToolSettings,
) -> Option<Shape> {
    let dx = end.x - anchor.x;
    let dy = end.y - anchor.y;
    let big_enough = match tool {
        ToolKind::Rectangle => dx.abs() > MIN_SHAPE_EXTENT && dy.abs() > MIN_SHAPE_EXTENT,
        ToolKind::Circle => dx.hypot(dy) > MIN_SHAPE_EXTENT,
        ToolKind::Line | ToolKind::Arrow => {
            dx.abs() > MIN_SHAPE_EXTENT || dy.abs() > MIN_SHAPE_EXTENT
        }
        _ => false,
    };
    if big_enough {
        preview_from_drag(tool, anchor, end, settings)
    } else {
        None
    }
}

/// In-progress shape for a drag with a shape tool, without size thresholds.
pub fn preview_from_drag(
    tool: ToolKind,
    anchor: Point,
    current: Point,
    settings: &ToolSettings,
) -> Option<Shape> {
    let style = settings.style();
    let shape = match tool {
        ToolKind::Rectangle => {
            Shape::Rectangle(Rectangle::from_corners(anchor, current).with_style(style))
        }
        ToolKind::Circle => {
            Shape::Circle(Circle::new(anchor, (current - anchor).hypot()).with_style(style))
        }
        ToolKind::Line => Shape::Line(Line::new(anchor, current).with_style(style)),
        ToolKind::Arrow => Shape::Arrow(Arrow::new(anchor, current).with_style(style)),
        _ => return None,
    };
    Some(shape)
}
