//! Framing for raster exports.

use crate::scene::Scene;
use crate::shapes::SerializableColor;
use crate::viewport::Viewport;
use kurbo::{Affine, Rect};

/// World-unit margin around the exported content.
pub const EXPORT_PADDING: f64 = 50.0;
/// Output pixels per world unit.
pub const EXPORT_SCALE: f64 = 2.0;

/// Region and resolution of an export.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExportFrame {
    /// Content area in world units, padding excluded.
    pub content: Rect,
    pub padding: f64,
    pub scale: f64,
    pub background: SerializableColor,
}

impl ExportFrame {
    /// Frame the whole scene, or the visible viewport when the scene is empty.
    pub fn for_scene(scene: &Scene, viewport: &Viewport, background: SerializableColor) -> Self {
        let content = scene
            .bounds()
            .unwrap_or_else(|| viewport.visible_world_rect());
        Self {
            content,
            padding: EXPORT_PADDING,
            scale: EXPORT_SCALE,
            background,
        }
    }

    /// Exported region in world units, padding included.
    pub fn world_rect(&self) -> Rect {
        self.content.inflate(self.padding, self.padding)
    }

    /// Output image size in pixels.
    pub fn pixel_size(&self) -> (u32, u32) {
        let rect = self.world_rect();
        let w = (rect.width() * self.scale).ceil().max(1.0);
        let h = (rect.height() * self.scale).ceil().max(1.0);
        (w as u32, h as u32)
    }

    /// World to output pixels.
    pub fn transform(&self) -> Affine {
        let rect = self.world_rect();
        Affine::scale(self.scale) * Affine::translate((-rect.x0, -rect.y0))
    }
}
