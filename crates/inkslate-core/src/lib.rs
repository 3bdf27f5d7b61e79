//! Inkslate Core Library
//!
//! Platform-agnostic scene model and interaction engine for the Inkslate
//! whiteboard. Rendering and platform glue live in other crates.

pub mod editor;
pub mod export;
pub mod geometry;
pub mod history;
pub mod host;
pub mod input;
pub mod scene;
pub mod selection;
pub mod shapes;
pub mod tools;
pub mod viewport;

pub use editor::{Editor, Gesture, HIT_TOLERANCE, Mode, PanTrigger};
pub use export::{EXPORT_PADDING, EXPORT_SCALE, ExportFrame};
pub use history::{History, MAX_UNDO_HISTORY, Snapshot};
pub use host::{Cursor, EditorHost, NullHost, TextEntryRequest};
pub use input::{InputEvent, Key, KeyInput, Modifiers, PointerButton, PointerInput};
pub use scene::Scene;
pub use selection::{Handle, Selection};
pub use shapes::{SerializableColor, Shape, ShapeId, ShapeStyle, ShapeTrait};
pub use tools::{Theme, ToolKind, ToolSettings};
pub use viewport::Viewport;
