//! Capabilities the editor needs from its host (widgets, chrome, file sinks).

use crate::selection::Handle;
use crate::shapes::SerializableColor;
use crate::tools::ToolKind;
use kurbo::Point;

/// Parameters for opening a text entry widget.
#[derive(Debug, Clone, PartialEq)]
pub struct TextEntryRequest {
    /// Where the committed text will be anchored.
    pub world_anchor: Point,
    /// The same anchor in client coordinates, for placing the widget.
    pub screen_anchor: Point,
    pub font_family: String,
    /// Font size in world units.
    pub font_size: f64,
    /// Font size scaled by the current zoom.
    pub screen_font_size: f64,
    pub color: SerializableColor,
}

/// Pointer cursor the host should display over the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cursor {
    Default,
    Crosshair,
    Text,
    Grab,
    Grabbing,
    Move,
    Resize(Handle),
}

impl Cursor {
    /// Resting cursor for a tool.
    pub fn for_tool(tool: ToolKind) -> Self {
        match tool {
            ToolKind::Select => Cursor::Default,
            ToolKind::Text => Cursor::Text,
            _ => Cursor::Crosshair,
        }
    }

    /// CSS cursor name.
    pub fn css_name(self) -> &'static str {
        match self {
            Cursor::Default => "default",
            Cursor::Crosshair => "crosshair",
            Cursor::Text => "text",
            Cursor::Grab => "grab",
            Cursor::Grabbing => "grabbing",
            Cursor::Move => "move",
            Cursor::Resize(handle) => handle.cursor_name(),
        }
    }
}

/// Host-side collaborators of the editor.
///
/// Calls are fire-and-forget; the host reports back through
/// [`Editor::commit_text_entry`](crate::Editor::commit_text_entry),
/// [`Editor::cancel_text_entry`](crate::Editor::cancel_text_entry) and
/// [`Editor::export_completed`](crate::Editor::export_completed).
pub trait EditorHost {
    /// Show a text input. At most one is open at a time.
    fn open_text_entry(&mut self, request: &TextEntryRequest);

    /// Close the open text input and return what was typed so far.
    fn close_text_entry(&mut self) -> Option<String>;

    /// Show or hide the unsaved-changes indicator.
    fn set_dirty(&mut self, dirty: bool);

    /// Render and deliver an export of the current scene.
    fn request_export(&mut self);

    fn set_cursor(&mut self, _cursor: Cursor) {}
}

/// Host that ignores every request.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullHost;

impl EditorHost for NullHost {
    fn open_text_entry(&mut self, _request: &TextEntryRequest) {}

    fn close_text_entry(&mut self) -> Option<String> {
        None
    }

    fn set_dirty(&mut self, _dirty: bool) {}

    fn request_export(&mut self) {}
}
