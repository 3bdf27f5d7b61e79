//! Session files: initial settings, canvas layout and a scripted event stream.

use crate::{AppError, AppResult, io_error};
use inkslate_core::shapes::SerializableColor;
use inkslate_core::tools::{Theme, ToolKind, ToolSettings};
use inkslate_core::{InputEvent, Scene};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Canvas layout in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasConfig {
    pub width: f64,
    pub height: f64,
    pub device_pixel_ratio: f64,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            width: 1280.0,
            height: 800.0,
            device_pixel_ratio: 1.0,
        }
    }
}

/// One scripted step. Input events go through the editor's event handler;
/// the rest stand in for toolbar buttons and the text widget.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum SessionEvent {
    Input { event: InputEvent },
    /// Type into the open text widget.
    TextInput { text: String },
    /// The text widget commits; uses the typed text when `text` is absent.
    TextCommit {
        #[serde(default)]
        text: Option<String>,
    },
    TextCancel,
    SetTool { tool: ToolKind },
    SetColor { color: SerializableColor },
    SetBackground { color: SerializableColor },
    SetStrokeWidth { width: f64 },
    SetFontFamily { family: String },
    SetFontSize { size: f64 },
    SetTheme { theme: Theme },
    SetSmoothing { enabled: bool },
    ZoomIn,
    ZoomOut,
    Undo,
    Redo,
    SelectAll,
    Delete,
    Duplicate,
    /// Toolbar save button.
    Export,
}

/// A replayable editing session.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Session {
    #[serde(default)]
    pub settings: ToolSettings,
    #[serde(default)]
    pub canvas: CanvasConfig,
    /// Starting scene; becomes the undo baseline.
    #[serde(default)]
    pub scene: Scene,
    #[serde(default)]
    pub events: Vec<SessionEvent>,
}

impl Session {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn load(path: &Path) -> AppResult<Self> {
        let json = std::fs::read_to_string(path).map_err(io_error(path))?;
        let session = Self::from_json(&json).map_err(|source| AppError::Session {
            path: path.to_path_buf(),
            source,
        })?;
        log::debug!(
            "loaded session {} ({} events, {} shapes)",
            path.display(),
            session.events.len(),
            session.scene.len()
        );
        Ok(session)
    }
}
