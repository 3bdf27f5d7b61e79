//! CPU raster backend built on tiny-skia.

use crate::export::{ExportFormat, ExportedImage, encode_pixmap};
use crate::fonts::FontBook;
use crate::paint::{ShapePainter, round_stroke};
use crate::renderer::{RenderContext, RenderResult, Renderer, RendererError};
use inkslate_core::ExportFrame;
use inkslate_core::Scene;
use inkslate_core::selection::{HANDLE_SIZE, SELECTION_PADDING, handles};
use inkslate_core::shapes::SerializableColor;
use inkslate_core::tools::Theme;
use kurbo::{BezPath, Point, Rect, Shape as KurboShape};
use tiny_skia::Pixmap;

/// World-unit spacing of the background grid.
pub const GRID_SIZE: f64 = 20.0;
/// Alpha of grid lines (about 5%).
const GRID_ALPHA: u8 = 13;
pub const SELECTION_COLOR: SerializableColor = SerializableColor::rgb(0x00, 0x7A, 0xFF);

/// Renders frames into an owned pixmap at device resolution.
pub struct SkiaRenderer {
    pixmap: Pixmap,
    fonts: FontBook,
}

impl SkiaRenderer {
    pub fn new(width: u32, height: u32) -> RenderResult<Self> {
        Ok(Self {
            pixmap: new_pixmap(width, height)?,
            fonts: FontBook::new(),
        })
    }

    pub fn with_fonts(mut self, fonts: FontBook) -> Self {
        self.fonts = fonts;
        self
    }

    pub fn fonts(&self) -> &FontBook {
        &self.fonts
    }

    pub fn fonts_mut(&mut self) -> &mut FontBook {
        &mut self.fonts
    }

    /// The last rendered frame.
    pub fn pixmap(&self) -> &Pixmap {
        &self.pixmap
    }

    /// Reallocate the frame buffer if the size changed.
    pub fn resize(&mut self, width: u32, height: u32) -> RenderResult<()> {
        if self.pixmap.width() != width || self.pixmap.height() != height {
            log::debug!("frame resized to {width}x{height}");
            self.pixmap = new_pixmap(width, height)?;
        }
        Ok(())
    }

    /// Encode the last frame as PNG.
    pub fn frame_png(&self) -> RenderResult<Vec<u8>> {
        let image = encode_pixmap(&self.pixmap, ExportFormat::Png, SerializableColor::white())?;
        Ok(image.bytes)
    }

    /// Render every shape of `scene` into a standalone image. No grid,
    /// selection or preview is drawn.
    pub fn export(
        &self,
        scene: &Scene,
        frame: &ExportFrame,
        format: ExportFormat,
    ) -> RenderResult<ExportedImage> {
        let (width, height) = frame.pixel_size();
        let mut pixmap = Pixmap::new(width, height).ok_or_else(|| {
            RendererError::Export(format!("cannot allocate {width}x{height} image"))
        })?;
        pixmap.fill(skia_color(frame.background));

        let mut painter = ShapePainter::new(&mut pixmap, frame.transform(), &self.fonts);
        for shape in scene.iter() {
            painter.shape(shape);
        }
        log::info!("exported {} shapes at {width}x{height}", scene.len());
        encode_pixmap(&pixmap, format, frame.background.with_alpha(255))
    }
}

impl Renderer for SkiaRenderer {
    fn render(&mut self, ctx: &RenderContext) -> RenderResult<()> {
        let viewport = ctx.viewport;
        let (width, height) = viewport.device_size();
        self.resize(width, height)?;
        self.pixmap.fill(skia_color(self.background_color(ctx)));

        let zoom = viewport.zoom;
        let visible = viewport.visible_world_rect();
        let mut painter = ShapePainter::new(&mut self.pixmap, viewport.device_transform(), &self.fonts);

        let grid_color = match ctx.theme {
            Theme::Light => SerializableColor::black(),
            Theme::Dark => SerializableColor::white(),
        }
        .with_alpha(GRID_ALPHA);
        painter.stroke(&grid_path(visible), grid_color, &round_stroke(1.0 / zoom, None));

        for shape in ctx.scene.iter() {
            painter.shape(shape);
        }

        let dash = [(8.0 / zoom) as f32; 2];
        let outline = round_stroke(2.0 / zoom, Some(dash));
        if let Some(rect) = ctx.selection_box {
            painter.stroke(&rect.abs().to_path(0.1), SELECTION_COLOR, &outline);
        }
        if let Some(bounds) = ctx.selection_bounds {
            let pad = SELECTION_PADDING / zoom;
            painter.stroke(&bounds.inflate(pad, pad).to_path(0.1), SELECTION_COLOR, &outline);
            if ctx.show_handles {
                let half = HANDLE_SIZE / 2.0 / zoom;
                let border = round_stroke(2.0 / zoom, None);
                for (_, center) in handles(bounds) {
                    let square = Rect::from_center_size(center, (half * 2.0, half * 2.0));
                    painter.fill_rect(square, SerializableColor::white());
                    painter.stroke(&square.to_path(0.1), SELECTION_COLOR, &border);
                }
            }
        }

        if let Some(preview) = &ctx.preview {
            painter.preview(preview);
        }
        Ok(())
    }
}

fn new_pixmap(width: u32, height: u32) -> RenderResult<Pixmap> {
    Pixmap::new(width, height).ok_or(RendererError::InvalidSurface { width, height })
}

fn skia_color(color: SerializableColor) -> tiny_skia::Color {
    tiny_skia::Color::from_rgba8(color.r, color.g, color.b, color.a)
}

/// Grid lines covering `visible`, snapped to multiples of [`GRID_SIZE`].
fn grid_path(visible: Rect) -> BezPath {
    let x0 = (visible.x0 / GRID_SIZE).floor() * GRID_SIZE;
    let y0 = (visible.y0 / GRID_SIZE).floor() * GRID_SIZE;
    let x1 = visible.x1 + GRID_SIZE;
    let y1 = visible.y1 + GRID_SIZE;

    let mut path = BezPath::new();
    let mut x = x0;
    while x <= x1 {
        path.move_to(Point::new(x, y0));
        path.line_to(Point::new(x, y1));
        x += GRID_SIZE;
    }
    let mut y = y0;
    while y <= y1 {
        path.move_to(Point::new(x0, y));
        path.line_to(Point::new(x1, y));
        y += GRID_SIZE;
    }
    path
}
