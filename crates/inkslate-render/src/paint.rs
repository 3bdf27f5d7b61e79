//! Conversion from kurbo geometry to tiny-skia draw calls.

use crate::fonts::FontBook;
use inkslate_core::shapes::{SerializableColor, Shape, ShapeTrait, Text};
use kurbo::{Affine, BezPath, PathEl, Rect};
use tiny_skia::{FillRule, LineCap, LineJoin, Paint, Pixmap, Stroke, StrokeDash, Transform};

/// Dash pattern for in-progress shapes, in world units.
pub const PREVIEW_DASH: [f32; 2] = [5.0, 5.0];
/// Alpha of the box drawn for text without a usable font.
const TEXT_PLACEHOLDER_ALPHA: u8 = 64;

pub fn skia_transform(affine: Affine) -> Transform {
    let [a, b, c, d, e, f] = affine.as_coeffs();
    Transform::from_row(a as f32, b as f32, c as f32, d as f32, e as f32, f as f32)
}

/// Returns `None` for empty or degenerate paths.
pub fn skia_path(path: &BezPath) -> Option<tiny_skia::Path> {
    let mut builder = tiny_skia::PathBuilder::new();
    for el in path.elements() {
        match *el {
            PathEl::MoveTo(p) => builder.move_to(p.x as f32, p.y as f32),
            PathEl::LineTo(p) => builder.line_to(p.x as f32, p.y as f32),
            PathEl::QuadTo(c, p) => builder.quad_to(c.x as f32, c.y as f32, p.x as f32, p.y as f32),
            PathEl::CurveTo(c1, c2, p) => builder.cubic_to(
                c1.x as f32,
                c1.y as f32,
                c2.x as f32,
                c2.y as f32,
                p.x as f32,
                p.y as f32,
            ),
            PathEl::ClosePath => builder.close(),
        }
    }
    builder.finish()
}

pub fn solid_paint(color: SerializableColor) -> Paint<'static> {
    let mut paint = Paint::default();
    paint.set_color_rgba8(color.r, color.g, color.b, color.a);
    paint.anti_alias = true;
    paint
}

/// Round-capped stroke, optionally dashed.
pub fn round_stroke(width: f64, dash: Option<[f32; 2]>) -> Stroke {
    Stroke {
        width: width as f32,
        line_cap: LineCap::Round,
        line_join: LineJoin::Round,
        dash: dash.and_then(|d| StrokeDash::new(d.to_vec(), 0.0)),
        ..Stroke::default()
    }
}

/// Draws shapes onto a pixmap under a world-to-pixel transform.
pub struct ShapePainter<'a> {
    pixmap: &'a mut Pixmap,
    transform: Transform,
    fonts: &'a FontBook,
}

impl<'a> ShapePainter<'a> {
    pub fn new(pixmap: &'a mut Pixmap, transform: Affine, fonts: &'a FontBook) -> Self {
        Self {
            pixmap,
            transform: skia_transform(transform),
            fonts,
        }
    }

    pub fn stroke(&mut self, path: &BezPath, color: SerializableColor, stroke: &Stroke) {
        if let Some(path) = skia_path(path) {
            self.pixmap
                .stroke_path(&path, &solid_paint(color), stroke, self.transform, None);
        }
    }

    pub fn fill(&mut self, path: &BezPath, color: SerializableColor) {
        if let Some(path) = skia_path(path) {
            self.pixmap.fill_path(
                &path,
                &solid_paint(color),
                FillRule::Winding,
                self.transform,
                None,
            );
        }
    }

    pub fn fill_rect(&mut self, rect: Rect, color: SerializableColor) {
        if let Some(rect) =
            tiny_skia::Rect::from_ltrb(rect.x0 as f32, rect.y0 as f32, rect.x1 as f32, rect.y1 as f32)
        {
            self.pixmap
                .fill_rect(rect, &solid_paint(color), self.transform, None);
        }
    }

    /// Draw a committed shape.
    pub fn shape(&mut self, shape: &Shape) {
        self.paint(shape, None);
    }

    /// Draw an in-progress shape. Outlines are dashed; pen strokes are not.
    pub fn preview(&mut self, shape: &Shape) {
        let dash = match shape {
            Shape::Freehand(_) => None,
            _ => Some(PREVIEW_DASH),
        };
        self.paint(shape, dash);
    }

    fn paint(&mut self, shape: &Shape, dash: Option<[f32; 2]>) {
        match shape {
            Shape::Text(text) => self.text(text),
            Shape::Freehand(path) if path.len() < 2 => {}
            _ => {
                let path = shape.to_path();
                let color = shape.color();
                if shape.is_filled() {
                    self.fill(&path, color);
                } else {
                    let width = shape.stroke_width().unwrap_or(1.0);
                    self.stroke(&path, color, &round_stroke(width, dash));
                }
            }
        }
    }

    fn text(&mut self, text: &Text) {
        match self.fonts.text_path(text) {
            Some(path) => self.fill(&path, text.color),
            None => {
                let placeholder = text.color.with_alpha(TEXT_PLACEHOLDER_ALPHA);
                self.fill(&text.to_path(), placeholder);
            }
        }
    }
}
