//! Renderer trait abstraction.

use inkslate_core::shapes::{SerializableColor, Shape};
use inkslate_core::tools::Theme;
use inkslate_core::{Editor, Scene, Viewport};
use kurbo::Rect;
use thiserror::Error;

/// Renderer errors.
#[derive(Debug, Error)]
pub enum RendererError {
    #[error("Invalid surface size {width}x{height}")]
    InvalidSurface { width: u32, height: u32 },
    #[error("Export failed: {0}")]
    Export(String),
    #[error("Encoding failed: {0}")]
    Encode(#[from] image::ImageError),
    #[error("Font error: {0}")]
    Font(String),
}

/// Result type for renderer operations.
pub type RenderResult<T> = Result<T, RendererError>;

/// Everything needed to draw one frame of the canvas.
#[derive(Debug, Clone)]
pub struct RenderContext<'a> {
    pub scene: &'a Scene,
    pub viewport: &'a Viewport,
    /// Union bounds of the selection, in world coordinates.
    pub selection_bounds: Option<Rect>,
    /// Draw resize handles on `selection_bounds`.
    pub show_handles: bool,
    /// Box-select rectangle in world coordinates.
    pub selection_box: Option<Rect>,
    /// In-progress shape, drawn over the scene.
    pub preview: Option<Shape>,
    pub background: SerializableColor,
    pub theme: Theme,
}

impl<'a> RenderContext<'a> {
    /// Context for a bare scene: no selection, no preview.
    pub fn new(scene: &'a Scene, viewport: &'a Viewport) -> Self {
        Self {
            scene,
            viewport,
            selection_bounds: None,
            show_handles: false,
            selection_box: None,
            preview: None,
            background: SerializableColor::white(),
            theme: Theme::Light,
        }
    }

    /// Snapshot the editor's drawable state.
    pub fn from_editor(editor: &'a Editor) -> Self {
        let settings = editor.settings();
        Self {
            scene: editor.scene(),
            viewport: editor.viewport(),
            selection_bounds: editor.selection_bounds(),
            show_handles: editor.selection().len() == 1,
            selection_box: editor.selection_box(),
            preview: editor.preview_shape(),
            background: settings.background_color,
            theme: settings.theme,
        }
    }

    pub fn with_background(mut self, color: SerializableColor) -> Self {
        self.background = color;
        self
    }

    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }
}

/// Trait for rendering backends.
pub trait Renderer {
    /// Draw a full frame.
    fn render(&mut self, ctx: &RenderContext) -> RenderResult<()>;

    /// Color the frame is cleared to.
    fn background_color(&self, ctx: &RenderContext) -> SerializableColor {
        ctx.background
    }
}
