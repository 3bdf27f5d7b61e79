//! Inkslate App Library
//!
//! Headless shell around the editor: replays a session file, renders with
//! the raster backend and writes exports to disk.

pub mod host;
pub mod session;
pub mod sink;

pub use host::ScriptedHost;
pub use session::{CanvasConfig, Session, SessionEvent};
pub use sink::{FileExportSink, export_filename};

use chrono::Utc;
use inkslate_core::{Editor, InputEvent, Viewport};
use inkslate_render::{ExportFormat, FontBook, RenderContext, Renderer, RendererError, SkiaRenderer};
use kurbo::{Point, Size};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid session file {}: {source}", path.display())]
    Session {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error(transparent)]
    Render(#[from] RendererError),
}

pub type AppResult<T> = Result<T, AppError>;

pub(crate) fn io_error(path: &Path) -> impl FnOnce(std::io::Error) -> AppError + use<> {
    let path = path.to_path_buf();
    move |source| AppError::Io { path, source }
}

/// Replay settings.
#[derive(Debug, Clone)]
pub struct Options {
    pub session: PathBuf,
    pub out_dir: PathBuf,
    pub format: ExportFormat,
    /// Font file registered under the session's font family.
    pub font: Option<PathBuf>,
    /// Write the final canvas frame here as PNG.
    pub frame: Option<PathBuf>,
}

/// Outcome of a replay.
#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub shapes: usize,
    pub exports: Vec<PathBuf>,
    pub dirty: bool,
}

/// Drives an editor from scripted events, acting as its host.
pub struct Replay {
    editor: Editor,
    host: ScriptedHost,
    renderer: SkiaRenderer,
    sink: FileExportSink,
    format: ExportFormat,
    exports: Vec<PathBuf>,
}

impl Replay {
    pub fn new(session: &Session, sink: FileExportSink, format: ExportFormat) -> AppResult<Self> {
        let canvas = session.canvas;
        let mut viewport = Viewport::new(Size::new(canvas.width, canvas.height));
        viewport.set_canvas(Point::ZERO, viewport.size, canvas.device_pixel_ratio);
        let (width, height) = viewport.device_size();
        let editor = Editor::with_scene(session.scene.clone(), session.settings.clone())
            .with_viewport(viewport);
        Ok(Self {
            editor,
            host: ScriptedHost::new(),
            renderer: SkiaRenderer::new(width, height)?,
            sink,
            format,
            exports: Vec::new(),
        })
    }

    pub fn with_fonts(mut self, fonts: FontBook) -> Self {
        self.renderer = self.renderer.with_fonts(fonts);
        self
    }

    pub fn editor(&self) -> &Editor {
        &self.editor
    }

    pub fn host(&self) -> &ScriptedHost {
        &self.host
    }

    pub fn renderer(&self) -> &SkiaRenderer {
        &self.renderer
    }

    /// Apply one scripted step, then service any export it requested.
    pub fn apply(&mut self, event: &SessionEvent) -> AppResult<()> {
        let host = &mut self.host;
        let editor = &mut self.editor;
        match event {
            SessionEvent::Input { event } => {
                editor.handle_event(event.clone(), host);
            }
            SessionEvent::TextInput { text } => host.type_text(text),
            SessionEvent::TextCommit { text } => {
                let typed = host.take_entry().unwrap_or_default();
                let text = text.clone().unwrap_or(typed);
                editor.commit_text_entry(&text, host);
            }
            SessionEvent::TextCancel => {
                host.take_entry();
                editor.cancel_text_entry();
            }
            SessionEvent::SetTool { tool } => {
                editor.set_tool(*tool, host);
            }
            SessionEvent::SetColor { color } => {
                editor.set_stroke_color(*color, host);
            }
            SessionEvent::SetBackground { color } => {
                editor.set_background_color(*color);
            }
            SessionEvent::SetStrokeWidth { width } => {
                editor.set_stroke_width(*width, host);
            }
            SessionEvent::SetFontFamily { family } => editor.set_font_family(family.clone()),
            SessionEvent::SetFontSize { size } => editor.set_font_size(*size),
            SessionEvent::SetTheme { theme } => {
                editor.set_theme(*theme);
            }
            SessionEvent::SetSmoothing { enabled } => editor.set_smoothing(*enabled),
            SessionEvent::ZoomIn => {
                editor.zoom_in();
            }
            SessionEvent::ZoomOut => {
                editor.zoom_out();
            }
            SessionEvent::Undo => {
                editor.undo(host);
            }
            SessionEvent::Redo => {
                editor.redo(host);
            }
            SessionEvent::SelectAll => {
                editor.select_all();
            }
            SessionEvent::Delete => {
                editor.delete_selected(host);
            }
            SessionEvent::Duplicate => {
                editor.duplicate_selected(host);
            }
            SessionEvent::Export => editor.request_export(host),
        }
        if self.host.take_export_request() {
            self.export()?;
        }
        Ok(())
    }

    /// Render the scene to an image file and report completion to the editor.
    pub fn export(&mut self) -> AppResult<PathBuf> {
        let frame = self.editor.export_frame();
        let image = self
            .renderer
            .export(self.editor.scene(), &frame, self.format)?;
        let path = self.sink.write(&image, Utc::now())?;
        self.editor.export_completed(&mut self.host);
        self.exports.push(path.clone());
        Ok(path)
    }

    /// Render the current canvas frame and write it as PNG.
    pub fn write_frame(&mut self, path: &Path) -> AppResult<()> {
        self.renderer.render(&RenderContext::from_editor(&self.editor))?;
        let png = self.renderer.frame_png()?;
        std::fs::write(path, png).map_err(io_error(path))?;
        log::info!("wrote frame {}", path.display());
        Ok(())
    }

    /// Close any open text entry and report the result.
    pub fn finish(mut self) -> Summary {
        self.editor.handle_event(InputEvent::Blur, &mut self.host);
        Summary {
            shapes: self.editor.scene().len(),
            exports: self.exports,
            dirty: self.host.is_dirty(),
        }
    }
}

/// Load a session, replay it and write its exports.
pub fn run(options: &Options) -> AppResult<Summary> {
    let session = Session::load(&options.session)?;
    let mut fonts = FontBook::new();
    if let Some(font) = &options.font {
        fonts.load_file(&session.settings.font_family, font)?;
    }

    let sink = FileExportSink::new(&options.out_dir);
    let mut replay = Replay::new(&session, sink, options.format)?.with_fonts(fonts);
    for event in &session.events {
        replay.apply(event)?;
    }
    if let Some(frame) = &options.frame {
        replay.write_frame(frame)?;
    }
    Ok(replay.finish())
}
