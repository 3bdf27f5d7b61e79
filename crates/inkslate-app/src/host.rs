//! Headless host: a simulated text widget plus flags the replay loop polls.

use inkslate_core::{Cursor, EditorHost, TextEntryRequest};

#[derive(Debug, Default)]
pub struct ScriptedHost {
    entry: Option<TextEntryRequest>,
    typed: String,
    dirty: bool,
    export_pending: bool,
    cursor: Option<Cursor>,
}

impl ScriptedHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// The open text widget, if any.
    pub fn text_entry(&self) -> Option<&TextEntryRequest> {
        self.entry.as_ref()
    }

    /// Append to the open widget. Ignored when no widget is open.
    pub fn type_text(&mut self, text: &str) {
        if self.entry.is_some() {
            self.typed.push_str(text);
        } else {
            log::warn!("text typed with no open entry: {text:?}");
        }
    }

    /// Close the widget from its own side (Enter or dismiss) and return its
    /// contents.
    pub fn take_entry(&mut self) -> Option<String> {
        self.entry.take()?;
        Some(std::mem::take(&mut self.typed))
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn cursor(&self) -> Option<Cursor> {
        self.cursor
    }

    /// Returns true once per export request.
    pub fn take_export_request(&mut self) -> bool {
        std::mem::take(&mut self.export_pending)
    }
}

impl EditorHost for ScriptedHost {
    fn open_text_entry(&mut self, request: &TextEntryRequest) {
        log::debug!(
            "text entry at ({:.1}, {:.1}), {}px {}",
            request.screen_anchor.x,
            request.screen_anchor.y,
            request.screen_font_size,
            request.font_family
        );
        self.entry = Some(request.clone());
        self.typed.clear();
    }

    fn close_text_entry(&mut self) -> Option<String> {
        self.take_entry()
    }

    fn set_dirty(&mut self, dirty: bool) {
        self.dirty = dirty;
    }

    fn request_export(&mut self) {
        self.export_pending = true;
    }

    fn set_cursor(&mut self, cursor: Cursor) {
        self.cursor = Some(cursor);
    }
}
