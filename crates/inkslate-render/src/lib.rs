//! Inkslate Render Library
//!
//! Renderer abstraction and a CPU raster backend for Inkslate canvases
//! and image exports.

mod export;
mod fonts;
mod paint;
mod renderer;
mod skia;

pub use export::{ExportFormat, ExportedImage, JPEG_QUALITY, ParseFormatError, encode_pixmap};
pub use fonts::FontBook;
pub use paint::{PREVIEW_DASH, ShapePainter};
pub use renderer::{RenderContext, RenderResult, Renderer, RendererError};
pub use skia::{GRID_SIZE, SELECTION_COLOR, SkiaRenderer};
