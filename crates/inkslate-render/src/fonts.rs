//! Font loading and glyph outlining for text shapes.

use crate::renderer::{RenderResult, RendererError};
use ab_glyph::{Font, FontArc, GlyphId, OutlineCurve};
use inkslate_core::shapes::Text;
use kurbo::{BezPath, Point};
use std::collections::HashMap;
use std::path::Path;

/// Fonts available to the renderer, keyed by lowercase family name.
#[derive(Clone, Default)]
pub struct FontBook {
    families: HashMap<String, FontArc>,
    fallback: Option<FontArc>,
}

impl std::fmt::Debug for FontBook {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontBook")
            .field("families", &self.families.keys().collect::<Vec<_>>())
            .field("fallback", &self.fallback.is_some())
            .finish()
    }
}

impl FontBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a font from raw TrueType/OpenType bytes. The first font
    /// registered also becomes the fallback for unknown families.
    pub fn insert(&mut self, family: &str, data: Vec<u8>) -> RenderResult<()> {
        let font = FontArc::try_from_vec(data)
            .map_err(|e| RendererError::Font(format!("{family}: {e}")))?;
        if self.fallback.is_none() {
            self.fallback = Some(font.clone());
        }
        self.families.insert(family.to_lowercase(), font);
        log::debug!("registered font family {family}");
        Ok(())
    }

    /// Load a font file and register it under `family`.
    pub fn load_file(&mut self, family: &str, path: &Path) -> RenderResult<()> {
        let data = std::fs::read(path)
            .map_err(|e| RendererError::Font(format!("{}: {e}", path.display())))?;
        self.insert(family, data)
    }

    pub fn is_empty(&self) -> bool {
        self.fallback.is_none()
    }

    /// Font for a family, or the fallback.
    pub fn resolve(&self, family: &str) -> Option<&FontArc> {
        self.families
            .get(&family.to_lowercase())
            .or(self.fallback.as_ref())
    }

    /// Glyph outlines of `text` in world coordinates. The anchor is the top
    /// of the em box; the baseline sits one ascent below it.
    pub fn text_path(&self, text: &Text) -> Option<BezPath> {
        let font = self.resolve(&text.font_family)?;
        let units_per_em = f64::from(font.units_per_em()?);
        let scale = text.font_size / units_per_em;
        let baseline = text.position.y + f64::from(font.ascent_unscaled()) * scale;

        let mut path = BezPath::new();
        let mut pen_x = text.position.x;
        let mut previous: Option<GlyphId> = None;
        for ch in text.content.chars() {
            let glyph = font.glyph_id(ch);
            if let Some(prev) = previous {
                pen_x += f64::from(font.kern_unscaled(prev, glyph)) * scale;
            }
            if let Some(outline) = font.outline(glyph) {
                let place = |p: ab_glyph::Point| {
                    Point::new(
                        pen_x + f64::from(p.x) * scale,
                        baseline - f64::from(p.y) * scale,
                    )
                };
                append_outline(&mut path, &outline.curves, place);
            }
            pen_x += f64::from(font.h_advance_unscaled(glyph)) * scale;
            previous = Some(glyph);
        }
        Some(path)
    }
}

// Contours are emitted as runs of connected curves; a gap starts a new one.
fn append_outline(path: &mut BezPath, curves: &[OutlineCurve], place: impl Fn(ab_glyph::Point) -> Point) {
    let mut cursor: Option<Point> = None;
    for curve in curves {
        let (start, end) = match *curve {
            OutlineCurve::Line(a, b) => (a, b),
            OutlineCurve::Quad(a, _, b) => (a, b),
            OutlineCurve::Cubic(a, _, _, b) => (a, b),
        };
        let start = place(start);
        if cursor != Some(start) {
            if cursor.is_some() {
                path.close_path();
            }
            path.move_to(start);
        }
        match *curve {
            OutlineCurve::Line(_, _) => path.line_to(place(end)),
            OutlineCurve::Quad(_, c, _) => path.quad_to(place(c), place(end)),
            OutlineCurve::Cubic(_, c1, c2, _) => path.curve_to(place(c1), place(c2), place(end)),
        }
        cursor = Some(place(end));
    }
    if cursor.is_some() {
        path.close_path();
    }
}
