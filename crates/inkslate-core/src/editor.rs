//! Interactive editor: owns the scene and turns input events into edits.

use crate::export::ExportFrame;
use crate::history::History;
use crate::host::{Cursor, EditorHost, TextEntryRequest};
use crate::input::{InputEvent, Key, KeyInput, PointerButton, PointerInput};
use crate::scene::Scene;
use crate::selection::{HANDLE_SIZE, Handle, Selection, handle_at};
use crate::shapes::{SerializableColor, Shape, Text};
use crate::tools::{PathBuilder, Theme, ToolKind, ToolSettings, preview_from_drag, shape_from_drag};
use crate::viewport::{Viewport, WHEEL_ZOOM_IN, WHEEL_ZOOM_OUT};
use kurbo::{Point, Rect, Vec2};

/// Hit-test tolerance in screen pixels.
pub const HIT_TOLERANCE: f64 = 10.0;

/// What started a pan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanTrigger {
    /// Space held while pressing the pointer.
    Space,
    /// Middle button or Ctrl+primary.
    Pointer,
}

/// Drawing gestures.
#[derive(Debug, Clone, PartialEq)]
pub enum Gesture {
    Path(PathBuilder),
    Shape {
        tool: ToolKind,
        anchor: Point,
        current: Point,
    },
    /// Eraser stroke; `erased` counts shapes removed so far and `was_dirty`
    /// holds the dirty flag from before the stroke.
    Erase { erased: usize, was_dirty: bool },
}

/// An active handle drag.
#[derive(Debug, Clone, PartialEq)]
pub struct ResizeState {
    pub handle: Handle,
    /// World point where the drag started.
    pub start: Point,
    /// The shape as it was before the drag.
    pub original: Shape,
}

/// An open text entry.
#[derive(Debug, Clone, PartialEq)]
pub struct TextSession {
    pub anchor: Point,
    pub font_family: String,
    pub font_size: f64,
    pub color: SerializableColor,
}

/// Interaction mode. Exactly one is active at a time.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Mode {
    #[default]
    Idle,
    Panning {
        /// Last pointer position in client coordinates.
        last: Point,
        trigger: PanTrigger,
    },
    Drawing(Gesture),
    DraggingSelection {
        /// Last pointer position in world coordinates.
        last: Point,
        moved: bool,
    },
    BoxSelecting {
        start: Point,
        current: Point,
    },
    Resizing(ResizeState),
    TextEditing(TextSession),
}

impl Mode {
    pub fn name(&self) -> &'static str {
        match self {
            Mode::Idle => "idle",
            Mode::Panning { .. } => "panning",
            Mode::Drawing(_) => "drawing",
            Mode::DraggingSelection { .. } => "dragging",
            Mode::BoxSelecting { .. } => "box-selecting",
            Mode::Resizing(_) => "resizing",
            Mode::TextEditing(_) => "text-editing",
        }
    }

    /// A pointer gesture is in progress.
    pub fn is_gesture(&self) -> bool {
        !matches!(self, Mode::Idle | Mode::TextEditing(_))
    }
}

/// The whiteboard editor.
///
/// Event handlers return `true` when the canvas needs a redraw.
#[derive(Debug, Clone)]
pub struct Editor {
    scene: Scene,
    selection: Selection,
    history: History,
    viewport: Viewport,
    settings: ToolSettings,
    mode: Mode,
    /// Space is held; the next pointer press pans.
    pan_armed: bool,
    dirty: bool,
    cursor: Cursor,
}

impl Default for Editor {
    fn default() -> Self {
        Self::new(ToolSettings::default())
    }
}

impl Editor {
    /// Create an editor with an empty scene.
    pub fn new(settings: ToolSettings) -> Self {
        Self::with_scene(Scene::new(), settings)
    }

    /// Create an editor for an existing scene, which becomes the undo baseline.
    pub fn with_scene(scene: Scene, settings: ToolSettings) -> Self {
        let history = History::new(&scene);
        let cursor = Cursor::for_tool(settings.tool);
        Self {
            scene,
            selection: Selection::new(),
            history,
            viewport: Viewport::default(),
            settings,
            mode: Mode::Idle,
            pan_armed: false,
            dirty: false,
            cursor,
        }
    }

    pub fn with_viewport(mut self, viewport: Viewport) -> Self {
        self.viewport = viewport;
        self
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn settings(&self) -> &ToolSettings {
        &self.settings
    }

    pub fn mode(&self) -> &Mode {
        &self.mode
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn is_pan_armed(&self) -> bool {
        self.pan_armed
    }

    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    /// Hit-test tolerance in world units at the current zoom.
    pub fn hit_tolerance(&self) -> f64 {
        self.viewport.world_tolerance(HIT_TOLERANCE)
    }

    /// Dispatch an input event.
    pub fn handle_event(&mut self, event: InputEvent, host: &mut dyn EditorHost) -> bool {
        match event {
            InputEvent::PointerDown(input) => self.pointer_down(input, host),
            InputEvent::PointerMove(input) => self.pointer_move(input, host),
            InputEvent::PointerUp(input) => self.pointer_up(input, host),
            InputEvent::PointerCancel => self.cancel_gesture(host),
            InputEvent::DoubleClick { position } => self.double_click(position, host),
            InputEvent::Wheel { position, delta_y } => self.wheel(position, delta_y),
            InputEvent::KeyDown(key) => self.key_down(key, host),
            InputEvent::KeyUp(key) => self.key_up(key, host),
            InputEvent::Blur => self.blur(host),
            InputEvent::Resize {
                origin,
                size,
                device_pixel_ratio,
            } => {
                self.viewport.set_canvas(origin, size, device_pixel_ratio);
                true
            }
        }
    }

    pub fn pointer_down(&mut self, input: PointerInput, host: &mut dyn EditorHost) -> bool {
        let mut redraw = false;
        if matches!(self.mode, Mode::TextEditing(_)) {
            redraw |= self.finalize_text_entry(host);
        }
        if self.mode.is_gesture() {
            return redraw;
        }

        let world = self.viewport.screen_to_world(input.position);

        if input.button == PointerButton::Primary {
            if let Some(state) = self.resize_target(world) {
                self.update_cursor(Cursor::Resize(state.handle), host);
                self.set_mode(Mode::Resizing(state));
                return true;
            }
        }

        let ctrl_pan = input.button == PointerButton::Primary && input.modifiers.ctrl;
        if self.pan_armed || input.button == PointerButton::Middle || ctrl_pan {
            let trigger = if self.pan_armed {
                PanTrigger::Space
            } else {
                PanTrigger::Pointer
            };
            self.set_mode(Mode::Panning {
                last: input.position,
                trigger,
            });
            self.update_cursor(Cursor::Grabbing, host);
            return redraw;
        }

        if input.button != PointerButton::Primary {
            return redraw;
        }

        match self.settings.tool {
            ToolKind::Pen => {
                let builder = PathBuilder::begin(
                    world,
                    input.pressure,
                    input.time_ms,
                    self.settings.smoothing,
                );
                self.set_mode(Mode::Drawing(Gesture::Path(builder)));
                true
            }
            ToolKind::Eraser => {
                let was_dirty = self.dirty;
                let erased = self.erase_at(world, host);
                self.set_mode(Mode::Drawing(Gesture::Erase { erased, was_dirty }));
                redraw || erased > 0
            }
            ToolKind::Select => {
                self.select_at(world, input.modifiers.shift);
                true
            }
            tool if tool.is_shape_tool() => {
                self.set_mode(Mode::Drawing(Gesture::Shape {
                    tool,
                    anchor: world,
                    current: world,
                }));
                true
            }
            _ => redraw,
        }
    }

    pub fn pointer_move(&mut self, input: PointerInput, host: &mut dyn EditorHost) -> bool {
        if !self.mode.is_gesture() {
            self.update_hover_cursor(input.position, host);
            return false;
        }

        let screen = self.viewport.clamp_to_canvas(input.position);
        let world = self.viewport.screen_to_world(screen);

        let (mode, redraw) = match std::mem::take(&mut self.mode) {
            Mode::Panning { last, trigger } => {
                self.viewport.pan_by_screen(screen - last);
                (Mode::Panning { last: screen, trigger }, true)
            }
            Mode::Drawing(Gesture::Path(mut builder)) => {
                let added = builder.push(world, input.pressure, input.time_ms);
                (Mode::Drawing(Gesture::Path(builder)), added)
            }
            Mode::Drawing(Gesture::Erase { erased, was_dirty }) => {
                let removed = self.erase_at(world, host);
                let mode = Mode::Drawing(Gesture::Erase {
                    erased: erased + removed,
                    was_dirty,
                });
                (mode, removed > 0)
            }
            Mode::Drawing(Gesture::Shape { tool, anchor, .. }) => {
                let mode = Mode::Drawing(Gesture::Shape {
                    tool,
                    anchor,
                    current: world,
                });
                (mode, true)
            }
            Mode::DraggingSelection { last, moved } => {
                let step = self.drag_selection(last, world);
                let mode = Mode::DraggingSelection {
                    last: world,
                    moved: moved || step,
                };
                (mode, step)
            }
            Mode::BoxSelecting { start, .. } => {
                let mode = Mode::BoxSelecting {
                    start,
                    current: world,
                };
                (mode, true)
            }
            Mode::Resizing(state) => {
                self.scene
                    .resize_shape(&state.original, state.handle, world - state.start);
                (Mode::Resizing(state), true)
            }
            other => (other, false),
        };
        self.mode = mode;
        redraw
    }

    pub fn pointer_up(&mut self, input: PointerInput, host: &mut dyn EditorHost) -> bool {
        if !self.mode.is_gesture() {
            return false;
        }

        let screen = self.viewport.clamp_to_canvas(input.position);
        let world = self.viewport.screen_to_world(screen);

        let redraw = match std::mem::take(&mut self.mode) {
            Mode::Panning { .. } => false,
            Mode::Drawing(Gesture::Path(builder)) => {
                if let Some(shape) = builder.finish(self.settings.style()) {
                    self.commit_new_shape(shape, host);
                }
                true
            }
            Mode::Drawing(Gesture::Shape { tool, anchor, .. }) => {
                if let Some(shape) = shape_from_drag(tool, anchor, world, &self.settings) {
                    self.commit_new_shape(shape, host);
                }
                true
            }
            Mode::Drawing(Gesture::Erase { erased, .. }) => {
                if erased > 0 {
                    self.commit("erase", host);
                }
                false
            }
            Mode::DraggingSelection { last, moved } => {
                let step = self.drag_selection(last, world);
                if moved || step {
                    self.commit("move", host);
                }
                step
            }
            Mode::BoxSelecting { start, .. } => {
                let ids = self.scene.shapes_in_rect(Rect::from_points(start, world));
                self.selection.set(ids);
                true
            }
            Mode::Resizing(state) => {
                let id = state.original.id();
                self.scene
                    .resize_shape(&state.original, state.handle, world - state.start);
                if self.scene.get(id) != Some(&state.original) {
                    self.commit("resize", host);
                }
                true
            }
            Mode::Idle | Mode::TextEditing(_) => false,
        };
        self.update_hover_cursor(input.position, host);
        redraw
    }

    /// Abort the active pointer gesture without committing it. Edits applied
    /// live (drag, resize, erase) are rolled back to the last checkpoint.
    pub fn cancel_gesture(&mut self, host: &mut dyn EditorHost) -> bool {
        if !self.mode.is_gesture() {
            return false;
        }
        let revert = matches!(
            self.mode,
            Mode::DraggingSelection { moved: true, .. }
                | Mode::Resizing(_)
                | Mode::Drawing(Gesture::Erase { erased: 1.., .. })
        );
        let restore_dirty = match self.mode {
            Mode::Drawing(Gesture::Erase { erased: 1.., was_dirty }) => Some(was_dirty),
            _ => None,
        };
        log::debug!("cancelling {} gesture", self.mode.name());
        self.set_mode(Mode::Idle);
        if revert {
            self.revert_to_checkpoint();
        }
        if let Some(dirty) = restore_dirty {
            self.set_dirty(dirty, host);
        }
        self.update_cursor(self.resting_cursor(), host);
        true
    }

    /// Window lost focus: forget held keys, drop the gesture, close text entry.
    pub fn blur(&mut self, host: &mut dyn EditorHost) -> bool {
        self.pan_armed = false;
        let mut redraw = self.cancel_gesture(host);
        redraw |= self.finalize_text_entry(host);
        self.update_cursor(self.resting_cursor(), host);
        redraw
    }

    /// Open a text entry at `position` (client coordinates).
    pub fn double_click(&mut self, position: Point, host: &mut dyn EditorHost) -> bool {
        if !matches!(self.settings.tool, ToolKind::Text | ToolKind::Select) {
            return false;
        }
        let redraw = self.finalize_text_entry(host);
        if self.mode.is_gesture() {
            return redraw;
        }

        let world = self.viewport.screen_to_world(position);
        let session = TextSession {
            anchor: world,
            font_family: self.settings.font_family.clone(),
            font_size: self.settings.font_size,
            color: self.settings.stroke_color,
        };
        let request = TextEntryRequest {
            world_anchor: world,
            screen_anchor: self.viewport.world_to_screen(world),
            font_family: session.font_family.clone(),
            font_size: session.font_size,
            screen_font_size: session.font_size * self.viewport.zoom,
            color: session.color,
        };
        host.open_text_entry(&request);
        self.set_mode(Mode::TextEditing(session));
        redraw
    }

    /// The text widget finished with `text`. Blank text creates nothing.
    pub fn commit_text_entry(&mut self, text: &str, host: &mut dyn EditorHost) -> bool {
        match std::mem::take(&mut self.mode) {
            Mode::TextEditing(session) => self.create_text(session, text, host),
            other => {
                self.mode = other;
                false
            }
        }
    }

    /// The text widget was dismissed without committing.
    pub fn cancel_text_entry(&mut self) -> bool {
        if matches!(self.mode, Mode::TextEditing(_)) {
            self.set_mode(Mode::Idle);
            true
        } else {
            false
        }
    }

    /// Close an open text entry, committing its current contents.
    pub fn finalize_text_entry(&mut self, host: &mut dyn EditorHost) -> bool {
        if !matches!(self.mode, Mode::TextEditing(_)) {
            return false;
        }
        let text = host.close_text_entry().unwrap_or_default();
        self.commit_text_entry(&text, host)
    }

    pub fn wheel(&mut self, position: Point, delta_y: f64) -> bool {
        if delta_y == 0.0 || !delta_y.is_finite() {
            return false;
        }
        let factor = if delta_y > 0.0 {
            WHEEL_ZOOM_OUT
        } else {
            WHEEL_ZOOM_IN
        };
        self.viewport.zoom_at(position, factor)
    }

    pub fn key_down(&mut self, input: KeyInput, host: &mut dyn EditorHost) -> bool {
        let text_open = matches!(self.mode, Mode::TextEditing(_));
        let mods = input.modifiers;

        if input.key == Key::Space && !mods.command() {
            if !self.pan_armed && !text_open {
                self.pan_armed = true;
                self.update_cursor(Cursor::Grab, host);
            }
            return false;
        }

        if mods.command() {
            let Key::Character(ch) = input.key else {
                return false;
            };
            return match ch.to_ascii_lowercase() {
                'z' if mods.shift => self.redo(host),
                'z' => self.undo(host),
                'y' => self.redo(host),
                's' => {
                    self.request_export(host);
                    false
                }
                'a' => self.select_all(),
                'd' => self.duplicate_selected(host),
                _ => false,
            };
        }

        match input.key {
            Key::Escape if text_open => {
                host.close_text_entry();
                self.cancel_text_entry()
            }
            Key::Escape => self.cancel_gesture(host),
            Key::Delete | Key::Backspace if !text_open => self.delete_selected(host),
            Key::Character(ch) if !text_open && !mods.any() => match ToolKind::from_shortcut(ch) {
                Some(tool) => self.set_tool(tool, host),
                None => false,
            },
            _ => false,
        }
    }

    pub fn key_up(&mut self, input: KeyInput, host: &mut dyn EditorHost) -> bool {
        if input.key != Key::Space {
            return false;
        }
        self.pan_armed = false;
        if matches!(
            self.mode,
            Mode::Panning {
                trigger: PanTrigger::Space,
                ..
            }
        ) {
            self.set_mode(Mode::Idle);
        }
        if !self.mode.is_gesture() {
            self.update_cursor(self.resting_cursor(), host);
        }
        false
    }

    /// Switch tools. Clears the selection.
    pub fn set_tool(&mut self, tool: ToolKind, host: &mut dyn EditorHost) -> bool {
        if tool != ToolKind::Text {
            self.finalize_text_entry(host);
        }
        if self.mode.is_gesture() {
            self.cancel_gesture(host);
        }
        log::debug!("tool: {} -> {}", self.settings.tool, tool);
        self.settings.tool = tool;
        self.selection.clear();
        self.update_cursor(self.resting_cursor(), host);
        true
    }

    /// Toolbar color change. Recolors the selection when there is one.
    pub fn set_stroke_color(&mut self, color: SerializableColor, host: &mut dyn EditorHost) -> bool {
        self.settings.stroke_color = color;
        if self.selection.is_empty() {
            return false;
        }
        if self.scene.set_color(self.selection.ids(), color) > 0 {
            self.commit("recolor", host);
            return true;
        }
        false
    }

    /// Toolbar stroke width change. Restyles the selection when there is one.
    pub fn set_stroke_width(&mut self, width: f64, host: &mut dyn EditorHost) -> bool {
        if !width.is_finite() || width <= 0.0 {
            return false;
        }
        self.settings.stroke_width = width;
        if self.selection.is_empty() {
            return false;
        }
        if self.scene.set_stroke_width(self.selection.ids(), width) > 0 {
            self.commit("restyle", host);
            return true;
        }
        false
    }

    pub fn set_background_color(&mut self, color: SerializableColor) -> bool {
        self.settings.background_color = color;
        true
    }

    pub fn set_theme(&mut self, theme: Theme) -> bool {
        self.settings.theme = theme;
        true
    }

    pub fn set_font_family(&mut self, family: impl Into<String>) {
        self.settings.font_family = family.into();
    }

    pub fn set_font_size(&mut self, size: f64) {
        if size.is_finite() && size > 0.0 {
            self.settings.font_size = size;
        }
    }

    pub fn set_smoothing(&mut self, smoothing: bool) {
        self.settings.smoothing = smoothing;
    }

    pub fn zoom_in(&mut self) -> bool {
        self.viewport.zoom_in()
    }

    pub fn zoom_out(&mut self) -> bool {
        self.viewport.zoom_out()
    }

    pub fn undo(&mut self, host: &mut dyn EditorHost) -> bool {
        self.abort_gesture();
        let Some(snapshot) = self.history.undo() else {
            return false;
        };
        self.scene.restore(snapshot);
        self.selection.clear();
        log::debug!("undo: {} shapes", self.scene.len());
        if self.scene.is_empty() {
            self.set_dirty(false, host);
        }
        true
    }

    pub fn redo(&mut self, host: &mut dyn EditorHost) -> bool {
        self.abort_gesture();
        let Some(snapshot) = self.history.redo() else {
            return false;
        };
        self.scene.restore(snapshot);
        self.selection.clear();
        log::debug!("redo: {} shapes", self.scene.len());
        self.set_dirty(true, host);
        true
    }

    pub fn select_all(&mut self) -> bool {
        self.selection.set(self.scene.ids());
        true
    }

    pub fn clear_selection(&mut self) -> bool {
        let had = !self.selection.is_empty();
        self.selection.clear();
        had
    }

    pub fn delete_selected(&mut self, host: &mut dyn EditorHost) -> bool {
        if self.selection.is_empty() {
            return false;
        }
        let ids = self.selection.ids().to_vec();
        self.scene.remove_shapes(&ids);
        self.selection.clear();
        self.commit("delete", host);
        true
    }

    /// Copy the selection 20 units down-right; the copies become the selection.
    pub fn duplicate_selected(&mut self, host: &mut dyn EditorHost) -> bool {
        if self.selection.is_empty() {
            return false;
        }
        let copies = self.scene.duplicate(self.selection.ids());
        self.selection.set(copies);
        self.commit("duplicate", host);
        true
    }

    /// Ask the host to export the scene.
    pub fn request_export(&self, host: &mut dyn EditorHost) {
        log::debug!("export requested ({} shapes)", self.scene.len());
        host.request_export();
    }

    /// Region and resolution the host should export.
    pub fn export_frame(&self) -> ExportFrame {
        ExportFrame::for_scene(&self.scene, &self.viewport, self.settings.background_color)
    }

    /// The host finished delivering an export.
    pub fn export_completed(&mut self, host: &mut dyn EditorHost) {
        self.set_dirty(false, host);
    }

    /// In-progress shape to draw over the scene.
    pub fn preview_shape(&self) -> Option<Shape> {
        match &self.mode {
            Mode::Drawing(Gesture::Path(builder)) => Some(builder.preview(self.settings.style())),
            Mode::Drawing(Gesture::Shape {
                tool,
                anchor,
                current,
            }) => preview_from_drag(*tool, *anchor, *current, &self.settings),
            _ => None,
        }
    }

    /// Rubber-band rectangle while box selecting.
    pub fn selection_box(&self) -> Option<Rect> {
        match &self.mode {
            Mode::BoxSelecting { start, current } => Some(Rect::from_points(*start, *current)),
            _ => None,
        }
    }

    /// Union of the selected shapes' bounds.
    pub fn selection_bounds(&self) -> Option<Rect> {
        self.scene.bounds_of(self.selection.ids())
    }

    fn set_mode(&mut self, mode: Mode) {
        log::trace!("mode: {} -> {}", self.mode.name(), mode.name());
        self.mode = mode;
    }

    // Drops a pointer gesture without touching the scene.
    fn abort_gesture(&mut self) {
        if self.mode.is_gesture() {
            self.set_mode(Mode::Idle);
        }
    }

    fn resize_target(&self, world: Point) -> Option<ResizeState> {
        if self.settings.tool != ToolKind::Select {
            return None;
        }
        let shape = self.scene.get(self.selection.single()?)?;
        if !shape.is_resizable() {
            return None;
        }
        let half = self.viewport.world_tolerance(HANDLE_SIZE / 2.0);
        let handle = handle_at(shape.bounds(), world, half)?;
        Some(ResizeState {
            handle,
            start: world,
            original: shape.clone(),
        })
    }

    fn select_at(&mut self, world: Point, shift: bool) {
        match self.scene.shape_at(world, self.hit_tolerance()) {
            Some(id) if shift => self.selection.toggle(id),
            Some(id) => {
                if !self.selection.contains(id) {
                    self.selection.select(id);
                }
                self.set_mode(Mode::DraggingSelection {
                    last: world,
                    moved: false,
                });
            }
            None => {
                self.selection.clear();
                self.set_mode(Mode::BoxSelecting {
                    start: world,
                    current: world,
                });
            }
        }
    }

    // Returns true when the selection actually moved.
    fn drag_selection(&mut self, last: Point, world: Point) -> bool {
        let delta = world - last;
        if delta == Vec2::ZERO || self.selection.is_empty() {
            return false;
        }
        self.scene.move_shapes(self.selection.ids(), delta);
        true
    }

    fn erase_at(&mut self, world: Point, host: &mut dyn EditorHost) -> usize {
        let removed = self.scene.erase_at(world, self.settings.eraser_radius());
        if removed.is_empty() {
            return 0;
        }
        self.selection.retain(|id| !removed.contains(&id));
        self.set_dirty(true, host);
        removed.len()
    }

    fn create_text(&mut self, session: TextSession, text: &str, host: &mut dyn EditorHost) -> bool {
        self.set_mode(Mode::Idle);
        let text = text.trim();
        if text.is_empty() {
            return false;
        }
        let shape = Text::new(session.anchor, text.to_string())
            .with_font(session.font_family, session.font_size)
            .with_color(session.color);
        self.commit_new_shape(Shape::Text(shape), host);
        true
    }

    fn commit_new_shape(&mut self, shape: Shape, host: &mut dyn EditorHost) {
        let kind = shape.kind_name();
        self.scene.add_shape(shape);
        self.commit(kind, host);
    }

    fn commit(&mut self, what: &str, host: &mut dyn EditorHost) {
        self.history.checkpoint(&self.scene);
        log::debug!("checkpoint after {what}: {} shapes", self.scene.len());
        self.set_dirty(true, host);
    }

    fn revert_to_checkpoint(&mut self) {
        if let Some(snapshot) = self.history.current() {
            self.scene.restore(snapshot);
        }
        let scene = &self.scene;
        self.selection.retain(|id| scene.contains(id));
    }

    fn set_dirty(&mut self, dirty: bool, host: &mut dyn EditorHost) {
        if self.dirty != dirty {
            self.dirty = dirty;
            host.set_dirty(dirty);
        }
    }

    fn resting_cursor(&self) -> Cursor {
        if self.pan_armed {
            Cursor::Grab
        } else {
            Cursor::for_tool(self.settings.tool)
        }
    }

    fn update_hover_cursor(&mut self, screen: Point, host: &mut dyn EditorHost) {
        let world = self.viewport.screen_to_world(screen);
        let cursor = if let Some(state) = self.resize_target(world) {
            Cursor::Resize(state.handle)
        } else if self.pan_armed || self.settings.tool != ToolKind::Select {
            self.resting_cursor()
        } else if self.scene.shape_at(world, self.hit_tolerance()).is_some() {
            Cursor::Move
        } else {
            Cursor::Default
        };
        self.update_cursor(cursor, host);
    }

    fn update_cursor(&mut self, cursor: Cursor, host: &mut dyn EditorHost) {
        if self.cursor != cursor {
            self.cursor = cursor;
            host.set_cursor(cursor);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::Modifiers;
    use crate::shapes::{Circle, Line, Rectangle};
    use kurbo::Size;

    #[derive(Default)]
    struct RecordingHost {
        opened: Vec<TextEntryRequest>,
        typed: Option<String>,
        closes: usize,
        dirty: Vec<bool>,
        exports: usize,
        cursors: Vec<Cursor>,
    }

    impl EditorHost for RecordingHost {
        fn open_text_entry(&mut self, request: &TextEntryRequest) {
            self.opened.push(request.clone());
        }

        fn close_text_entry(&mut self) -> Option<String> {
            self.closes += 1;
            self.typed.take()
        }

        fn set_dirty(&mut self, dirty: bool) {
            self.dirty.push(dirty);
        }

        fn request_export(&mut self) {
            self.exports += 1;
        }

        fn set_cursor(&mut self, cursor: Cursor) {
            self.cursors.push(cursor);
        }
    }

    struct Harness {
        editor: Editor,
        host: RecordingHost,
        clock: f64,
    }

    impl Harness {
        fn new(tool: ToolKind) -> Self {
            let settings = ToolSettings {
                tool,
                ..ToolSettings::default()
            };
            Self {
                editor: Editor::new(settings),
                host: RecordingHost::default(),
                clock: 0.0,
            }
        }

        fn input(&mut self, x: f64, y: f64) -> PointerInput {
            self.clock += 20.0;
            PointerInput::at(Point::new(x, y)).at_time(self.clock)
        }

        fn down(&mut self, x: f64, y: f64) -> bool {
            let input = self.input(x, y);
            self.editor.pointer_down(input, &mut self.host)
        }

        fn down_with(&mut self, input: PointerInput) -> bool {
            self.editor.pointer_down(input, &mut self.host)
        }

        fn move_to(&mut self, x: f64, y: f64) -> bool {
            let input = self.input(x, y);
            self.editor.pointer_move(input, &mut self.host)
        }

        fn up(&mut self, x: f64, y: f64) -> bool {
            let input = self.input(x, y);
            self.editor.pointer_up(input, &mut self.host)
        }

        fn drag(&mut self, from: (f64, f64), to: (f64, f64)) {
            self.down(from.0, from.1);
            self.move_to((from.0 + to.0) / 2.0, (from.1 + to.1) / 2.0);
            self.move_to(to.0, to.1);
            self.up(to.0, to.1);
        }

        fn key(&mut self, input: KeyInput) -> bool {
            self.editor.key_down(input, &mut self.host)
        }

        fn tool(&mut self, tool: ToolKind) {
            self.editor.set_tool(tool, &mut self.host);
        }

        fn add(&mut self, shape: Shape) -> crate::shapes::ShapeId {
            let id = self.editor.scene.add_shape(shape);
            self.editor.commit("test", &mut self.host);
            id
        }
    }

    fn rect(x: f64, y: f64, w: f64, h: f64) -> Shape {
        Shape::Rectangle(Rectangle::new(Point::new(x, y), w, h))
    }

    #[test]
    fn test_drag_creates_rectangle() {
        let mut h = Harness::new(ToolKind::Rectangle);
        h.drag((10.0, 10.0), (110.0, 60.0));

        let shapes = h.editor.scene().shapes();
        assert_eq!(shapes.len(), 1);
        let Shape::Rectangle(r) = &shapes[0] else {
            panic!("expected rectangle");
        };
        assert_eq!(r.position, Point::new(10.0, 10.0));
        assert!((r.width - 100.0).abs() < f64::EPSILON);
        assert!((r.height - 50.0).abs() < f64::EPSILON);
        assert_eq!(h.editor.history().undo_len(), 2);
        assert!(h.editor.is_dirty());
        assert_eq!(h.host.dirty, vec![true]);
    }

    #[test]
    fn test_small_drag_creates_nothing() {
        let mut h = Harness::new(ToolKind::Rectangle);
        h.drag((10.0, 10.0), (12.0, 12.0));
        assert!(h.editor.scene().is_empty());
        assert_eq!(h.editor.history().undo_len(), 1);
        assert!(!h.editor.is_dirty());
    }

    #[test]
    fn test_preview_during_shape_drag() {
        let mut h = Harness::new(ToolKind::Circle);
        h.down(50.0, 50.0);
        h.move_to(53.0, 54.0);
        let Some(Shape::Circle(preview)) = h.editor.preview_shape() else {
            panic!("expected circle preview");
        };
        assert!((preview.radius - 5.0).abs() < 1e-9);
        h.up(53.0, 54.0);
        assert!(h.editor.preview_shape().is_none());
        assert!(h.editor.scene().is_empty());
    }

    #[test]
    fn test_undo_redo_sequence() {
        let mut h = Harness::new(ToolKind::Line);
        h.drag((0.0, 0.0), (100.0, 0.0));
        h.drag((0.0, 50.0), (100.0, 50.0));
        let both = h.editor.scene().clone();
        let first = both.shapes()[0].clone();

        assert!(h.editor.undo(&mut h.host));
        assert_eq!(h.editor.scene().shapes(), &[first]);
        assert!(h.editor.redo(&mut h.host));
        assert_eq!(h.editor.scene(), &both);
        assert!(!h.editor.redo(&mut h.host));
    }

    #[test]
    fn test_undo_to_empty_clears_dirty() {
        let mut h = Harness::new(ToolKind::Rectangle);
        h.drag((0.0, 0.0), (50.0, 50.0));
        assert!(h.editor.is_dirty());
        assert!(h.editor.undo(&mut h.host));
        assert!(!h.editor.is_dirty());
        assert!(!h.editor.undo(&mut h.host));
        assert!(h.editor.redo(&mut h.host));
        assert!(h.editor.is_dirty());
        assert_eq!(h.host.dirty, vec![true, false, true]);
    }

    #[test]
    fn test_select_all_and_delete() {
        let mut h = Harness::new(ToolKind::Select);
        h.add(rect(0.0, 0.0, 10.0, 10.0));
        h.add(rect(20.0, 0.0, 10.0, 10.0));
        h.add(rect(40.0, 0.0, 10.0, 10.0));

        assert!(h.key(KeyInput::command('a')));
        assert_eq!(h.editor.selection().len(), 3);
        assert!(h.key(KeyInput::new(Key::Delete)));
        assert!(h.editor.scene().is_empty());
        assert!(h.editor.selection().is_empty());

        assert!(h.editor.undo(&mut h.host));
        assert_eq!(h.editor.scene().len(), 3);
    }

    #[test]
    fn test_delete_without_selection_is_noop() {
        let mut h = Harness::new(ToolKind::Select);
        h.add(rect(0.0, 0.0, 10.0, 10.0));
        let before = h.editor.history().undo_len();
        assert!(!h.key(KeyInput::new(Key::Backspace)));
        assert_eq!(h.editor.history().undo_len(), before);
    }

    #[test]
    fn test_duplicate_selection() {
        let mut h = Harness::new(ToolKind::Select);
        let original = h.add(rect(0.0, 0.0, 50.0, 50.0));
        h.down(25.0, 25.0);
        h.up(25.0, 25.0);
        assert_eq!(h.editor.selection().ids(), &[original]);

        assert!(h.key(KeyInput::command('d')));
        let copy = h.editor.selection().single().unwrap();
        assert_ne!(copy, original);
        let rect = h.editor.scene().get(copy).unwrap();
        assert_eq!(rect.bounds(), Rect::new(20.0, 20.0, 70.0, 70.0));
        assert_eq!(h.editor.scene().len(), 2);
    }

    #[test]
    fn test_eraser_removes_circle_with_single_checkpoint() {
        let mut h = Harness::new(ToolKind::Eraser);
        h.editor.set_stroke_width(5.0, &mut h.host);
        h.add(Shape::Circle(Circle::new(Point::new(100.0, 100.0), 20.0)));
        h.add(rect(300.0, 300.0, 10.0, 10.0));
        let before = h.editor.history().undo_len();

        assert!(h.down(100.0, 80.0));
        h.move_to(310.0, 305.0);
        h.up(310.0, 305.0);

        assert!(h.editor.scene().is_empty());
        assert_eq!(h.editor.history().undo_len(), before + 1);
    }

    #[test]
    fn test_erase_miss_leaves_history_alone() {
        let mut h = Harness::new(ToolKind::Eraser);
        h.add(rect(0.0, 0.0, 10.0, 10.0));
        let before = h.editor.history().undo_len();
        h.drag((200.0, 200.0), (250.0, 250.0));
        assert_eq!(h.editor.scene().len(), 1);
        assert_eq!(h.editor.history().undo_len(), before);
    }

    #[test]
    fn test_pen_stroke() {
        let mut h = Harness::new(ToolKind::Pen);
        h.down_with(PointerInput::at(Point::new(0.0, 0.0)).with_pressure(0.7));
        h.move_to(10.0, 0.0);
        assert!(h.editor.preview_shape().is_some());
        h.up(10.0, 0.0);

        let Shape::Freehand(path) = &h.editor.scene().shapes()[0] else {
            panic!("expected path");
        };
        assert!(path.smooth);
        assert!(path.points.len() > 2);
        assert!((path.points[0].pressure - 0.7).abs() < f64::EPSILON);
    }

    #[test]
    fn test_pen_click_without_motion_creates_nothing() {
        let mut h = Harness::new(ToolKind::Pen);
        h.down(5.0, 5.0);
        h.up(5.0, 5.0);
        assert!(h.editor.scene().is_empty());
    }

    #[test]
    fn test_hit_tolerance_scales_with_zoom() {
        for zoom in [0.5, 1.0, 2.0] {
            let viewport = Viewport {
                zoom,
                ..Viewport::default()
            };
            let mut editor = Editor::default().with_viewport(viewport);
            editor
                .scene
                .add_shape(Shape::Line(Line::new(Point::ZERO, Point::new(100.0, 0.0))));
            let tol = editor.hit_tolerance();
            assert!((tol - 10.0 / zoom).abs() < f64::EPSILON);
            assert!(editor.scene().shape_at(Point::new(50.0, tol), tol).is_some());
            assert!(
                editor
                    .scene()
                    .shape_at(Point::new(50.0, tol + 1e-6), tol)
                    .is_none()
            );
        }
    }

    #[test]
    fn test_click_selects_and_shift_toggles() {
        let mut h = Harness::new(ToolKind::Select);
        let a = h.add(rect(0.0, 0.0, 50.0, 50.0));
        let b = h.add(rect(100.0, 0.0, 50.0, 50.0));
        h.down(25.0, 25.0);
        h.up(25.0, 25.0);
        assert_eq!(h.editor.selection().ids(), &[a]);

        let shift = Modifiers {
            shift: true,
            ..Modifiers::NONE
        };
        let input = PointerInput::at(Point::new(125.0, 25.0)).with_modifiers(shift);
        h.down_with(input);
        h.editor.pointer_up(input, &mut h.host);
        assert_eq!(h.editor.selection().ids(), &[a, b]);

        h.down_with(PointerInput::at(Point::new(25.0, 25.0)).with_modifiers(shift));
        assert_eq!(h.editor.selection().ids(), &[b]);
        assert_eq!(h.editor.mode(), &Mode::Idle);

        // Empty space clears the selection.
        h.down(500.0, 500.0);
        h.up(500.0, 500.0);
        assert!(h.editor.selection().is_empty());
    }

    #[test]
    fn test_box_select() {
        let mut h = Harness::new(ToolKind::Select);
        let a = h.add(rect(10.0, 10.0, 20.0, 20.0));
        let _far = h.add(rect(400.0, 400.0, 20.0, 20.0));
        let c = h.add(Shape::Circle(Circle::new(Point::new(100.0, 60.0), 30.0)));
        h.down(200.0, 200.0);
        h.move_to(100.0, 100.0);
        assert!(h.editor.selection_box().is_some());
        h.up(0.0, 0.0);
        assert_eq!(h.editor.selection().ids(), &[a, c]);
        assert!(h.editor.selection_box().is_none());
    }

    #[test]
    fn test_drag_moves_selection_and_commits() {
        let mut h = Harness::new(ToolKind::Select);
        let a = h.add(rect(0.0, 0.0, 50.0, 50.0));
        let b = h.add(rect(100.0, 0.0, 50.0, 50.0));
        h.editor.select_all();
        let before = h.editor.history().undo_len();

        // Clicking a member of a multi-selection keeps the whole selection.
        h.down(25.0, 25.0);
        h.move_to(35.0, 45.0);
        h.move_to(35.0, 45.0);
        h.up(35.0, 45.0);

        assert_eq!(h.editor.selection().len(), 2);
        assert_eq!(h.editor.scene().get(a).unwrap().bounds(), Rect::new(10.0, 20.0, 60.0, 70.0));
        assert_eq!(h.editor.scene().get(b).unwrap().bounds(), Rect::new(110.0, 20.0, 160.0, 70.0));
        assert_eq!(h.editor.history().undo_len(), before + 1);
    }

    #[test]
    fn test_click_without_motion_does_not_checkpoint() {
        let mut h = Harness::new(ToolKind::Select);
        h.add(rect(0.0, 0.0, 50.0, 50.0));
        let before = h.editor.history().undo_len();
        h.down(25.0, 25.0);
        h.up(25.0, 25.0);
        assert_eq!(h.editor.history().undo_len(), before);
    }

    #[test]
    fn test_resize_through_handle() {
        let mut h = Harness::new(ToolKind::Select);
        let id = h.add(rect(0.0, 0.0, 100.0, 50.0));
        h.down(50.0, 25.0);
        h.up(50.0, 25.0);
        let before = h.editor.history().undo_len();

        assert!(h.down(104.0, 54.0));
        assert!(matches!(h.editor.mode(), Mode::Resizing(state) if state.handle == Handle::Se));
        h.move_to(124.0, 64.0);
        h.move_to(124.0, 64.0);
        assert_eq!(h.editor.scene().get(id).unwrap().bounds(), Rect::new(0.0, 0.0, 120.0, 60.0));
        h.up(124.0, 64.0);
        assert_eq!(h.editor.history().undo_len(), before + 1);
        assert_eq!(h.editor.selection().ids(), &[id]);
    }

    #[test]
    fn test_text_selection_has_no_resize() {
        let mut h = Harness::new(ToolKind::Select);
        let id = h.add(Shape::Text(Text::new(Point::new(0.0, 20.0), "hello".into())));
        h.editor.selection.select(id);
        // South-east corner of the text bounds.
        h.down(48.0, 25.0);
        assert!(matches!(h.editor.mode(), Mode::DraggingSelection { .. }));
    }

    #[test]
    fn test_space_pan() {
        let mut h = Harness::new(ToolKind::Pen);
        h.key(KeyInput::new(Key::Space));
        assert!(h.editor.is_pan_armed());
        assert_eq!(h.editor.cursor(), Cursor::Grab);

        h.down(100.0, 100.0);
        assert!(matches!(h.editor.mode(), Mode::Panning { .. }));
        h.move_to(130.0, 80.0);
        assert_eq!(h.editor.viewport().pan, Vec2::new(30.0, -20.0));

        h.editor.key_up(KeyInput::new(Key::Space), &mut h.host);
        assert_eq!(h.editor.mode(), &Mode::Idle);
        assert!(!h.editor.is_pan_armed());
        assert!(h.editor.scene().is_empty());
    }

    #[test]
    fn test_middle_button_pan_divides_by_zoom() {
        let mut h = Harness::new(ToolKind::Rectangle);
        h.editor.viewport.zoom = 2.0;
        h.down_with(PointerInput::at(Point::new(10.0, 10.0)).with_button(PointerButton::Middle));
        h.move_to(30.0, 50.0);
        h.up(30.0, 50.0);
        assert_eq!(h.editor.viewport().pan, Vec2::new(10.0, 20.0));
        assert!(h.editor.scene().is_empty());
    }

    #[test]
    fn test_resize_handle_wins_over_ctrl_pan() {
        let mut h = Harness::new(ToolKind::Select);
        let id = h.add(rect(0.0, 0.0, 100.0, 50.0));
        h.editor.selection.select(id);
        let ctrl = Modifiers {
            ctrl: true,
            ..Modifiers::NONE
        };
        h.down_with(PointerInput::at(Point::new(100.0, 50.0)).with_modifiers(ctrl));
        assert!(matches!(h.editor.mode(), Mode::Resizing(_)));
    }

    #[test]
    fn test_resize_handle_wins_over_space_pan() {
        let mut h = Harness::new(ToolKind::Select);
        let id = h.add(rect(0.0, 0.0, 100.0, 50.0));
        h.editor.selection.select(id);
        h.key(KeyInput::new(Key::Space));
        assert!(h.editor.is_pan_armed());

        h.down(100.0, 50.0);
        assert!(matches!(h.editor.mode(), Mode::Resizing(_)));
        h.move_to(120.0, 60.0);
        h.up(120.0, 60.0);
        assert_eq!(
            h.editor.scene().get(id).unwrap().bounds(),
            Rect::new(0.0, 0.0, 120.0, 60.0)
        );

        h.down(300.0, 300.0);
        assert!(matches!(h.editor.mode(), Mode::Panning { .. }));
    }

    #[test]
    fn test_wheel_zoom_keeps_cursor_point() {
        let mut editor = Editor::default();
        let cursor = Point::new(200.0, 150.0);
        let before = editor.viewport().screen_to_world(cursor);
        assert!(editor.wheel(cursor, -120.0));
        assert!((editor.viewport().zoom - 1.1).abs() < 1e-9);
        let after = editor.viewport().screen_to_world(cursor);
        assert!((after - before).hypot() < 1e-9);
        assert!(editor.wheel(cursor, 120.0));
        assert!(editor.viewport().zoom < 1.0);
    }

    #[test]
    fn test_text_entry_commit() {
        let mut h = Harness::new(ToolKind::Text);
        h.editor
            .double_click(Point::new(40.0, 60.0), &mut h.host);
        assert_eq!(h.host.opened.len(), 1);
        assert_eq!(h.host.opened[0].world_anchor, Point::new(40.0, 60.0));
        assert!(matches!(h.editor.mode(), Mode::TextEditing(_)));

        assert!(h.editor.commit_text_entry("  hello  ", &mut h.host));
        let Shape::Text(text) = &h.editor.scene().shapes()[0] else {
            panic!("expected text");
        };
        assert_eq!(text.content, "hello");
        assert_eq!(text.position, Point::new(40.0, 60.0));
        assert_eq!(text.font_family, "Arial");
        assert!((text.font_size - 16.0).abs() < f64::EPSILON);
        assert_eq!(h.editor.mode(), &Mode::Idle);
    }

    #[test]
    fn test_blank_text_creates_nothing() {
        let mut h = Harness::new(ToolKind::Text);
        h.editor.double_click(Point::new(0.0, 0.0), &mut h.host);
        assert!(!h.editor.commit_text_entry("   ", &mut h.host));
        assert!(h.editor.scene().is_empty());
        assert_eq!(h.editor.history().undo_len(), 1);
    }

    #[test]
    fn test_new_entry_finalizes_previous() {
        let mut h = Harness::new(ToolKind::Text);
        h.editor.double_click(Point::new(0.0, 20.0), &mut h.host);
        h.host.typed = Some("first".into());
        h.editor.double_click(Point::new(200.0, 20.0), &mut h.host);
        assert_eq!(h.host.closes, 1);
        assert_eq!(h.host.opened.len(), 2);
        assert_eq!(h.editor.scene().len(), 1);
        assert!(matches!(h.editor.mode(), Mode::TextEditing(s) if s.anchor == Point::new(200.0, 20.0)));
    }

    #[test]
    fn test_pointer_down_finalizes_text_entry() {
        let mut h = Harness::new(ToolKind::Text);
        h.editor.double_click(Point::new(0.0, 20.0), &mut h.host);
        h.host.typed = Some("note".into());
        h.down(300.0, 300.0);
        assert_eq!(h.editor.scene().len(), 1);
        assert_eq!(h.editor.mode(), &Mode::Idle);
    }

    #[test]
    fn test_double_click_ignored_for_drawing_tools() {
        let mut h = Harness::new(ToolKind::Pen);
        assert!(!h.editor.double_click(Point::new(0.0, 0.0), &mut h.host));
        assert!(h.host.opened.is_empty());
    }

    #[test]
    fn test_tool_keys_and_text_entry() {
        let mut h = Harness::new(ToolKind::Select);
        let id = h.add(rect(0.0, 0.0, 10.0, 10.0));
        h.editor.selection.select(id);

        assert!(h.key(KeyInput::new(Key::Character('r'))));
        assert_eq!(h.editor.settings().tool, ToolKind::Rectangle);
        assert!(h.editor.selection().is_empty());

        h.key(KeyInput::new(Key::Character('t')));
        h.editor.double_click(Point::new(5.0, 5.0), &mut h.host);
        assert!(!h.key(KeyInput::new(Key::Character('p'))));
        assert_eq!(h.editor.settings().tool, ToolKind::Text);

        // Modified letters are not tool shortcuts.
        h.editor.cancel_text_entry();
        let alt = Modifiers {
            alt: true,
            ..Modifiers::NONE
        };
        assert!(!h.key(KeyInput::new(Key::Character('p')).with_modifiers(alt)));
        assert_eq!(h.editor.settings().tool, ToolKind::Text);
    }

    #[test]
    fn test_switching_away_from_text_finalizes_entry() {
        let mut h = Harness::new(ToolKind::Text);
        h.editor.double_click(Point::new(0.0, 20.0), &mut h.host);
        h.host.typed = Some("kept".into());
        h.tool(ToolKind::Pen);
        assert_eq!(h.editor.scene().len(), 1);
        assert_eq!(h.editor.mode(), &Mode::Idle);
    }

    #[test]
    fn test_undo_redo_shortcuts() {
        let mut h = Harness::new(ToolKind::Rectangle);
        h.drag((0.0, 0.0), (50.0, 50.0));
        assert!(h.key(KeyInput::command('z')));
        assert!(h.editor.scene().is_empty());
        let redo = KeyInput::command('z').with_modifiers(Modifiers {
            ctrl: true,
            shift: true,
            ..Modifiers::NONE
        });
        assert!(h.key(redo));
        assert_eq!(h.editor.scene().len(), 1);
        assert!(h.key(KeyInput::command('z')));
        assert!(h.key(KeyInput::command('y')));
        assert_eq!(h.editor.scene().len(), 1);
    }

    #[test]
    fn test_export_flow() {
        let mut h = Harness::new(ToolKind::Rectangle);
        h.drag((0.0, 0.0), (50.0, 50.0));
        h.key(KeyInput::command('s'));
        assert_eq!(h.host.exports, 1);
        let frame = h.editor.export_frame();
        assert_eq!(frame.world_rect(), Rect::new(-50.0, -50.0, 100.0, 100.0));
        h.editor.export_completed(&mut h.host);
        assert!(!h.editor.is_dirty());
    }

    #[test]
    fn test_blur_reverts_live_drag() {
        let mut h = Harness::new(ToolKind::Select);
        let id = h.add(rect(0.0, 0.0, 50.0, 50.0));
        h.down(25.0, 25.0);
        h.move_to(75.0, 75.0);
        assert_eq!(h.editor.scene().get(id).unwrap().bounds().origin(), Point::new(50.0, 50.0));

        h.editor.blur(&mut h.host);
        assert_eq!(h.editor.mode(), &Mode::Idle);
        assert_eq!(h.editor.scene().get(id).unwrap().bounds().origin(), Point::ZERO);
        assert_eq!(h.editor.selection().ids(), &[id]);
    }

    #[test]
    fn test_cancel_discards_partial_shape() {
        let mut h = Harness::new(ToolKind::Line);
        h.down(0.0, 0.0);
        h.move_to(100.0, 0.0);
        h.editor.handle_event(InputEvent::PointerCancel, &mut h.host);
        h.up(100.0, 0.0);
        assert!(h.editor.scene().is_empty());
    }

    #[test]
    fn test_cancelled_erase_restores_clean_state() {
        let mut scene = Scene::new();
        scene.add_shape(Shape::Circle(Circle::new(Point::new(100.0, 100.0), 20.0)));
        let mut h = Harness::new(ToolKind::Eraser);
        h.editor = Editor::with_scene(scene, h.editor.settings().clone());
        assert!(!h.editor.is_dirty());

        h.down(100.0, 80.0);
        assert!(h.editor.scene().is_empty());
        assert!(h.editor.is_dirty());

        h.editor.handle_event(InputEvent::PointerCancel, &mut h.host);
        assert_eq!(h.editor.scene().len(), 1);
        assert!(!h.editor.is_dirty());
        assert_eq!(h.host.dirty.last(), Some(&false));
    }

    #[test]
    fn test_blur_resets_space_pan() {
        let mut h = Harness::new(ToolKind::Pen);
        h.key(KeyInput::new(Key::Space));
        h.down(0.0, 0.0);
        h.editor.handle_event(InputEvent::Blur, &mut h.host);
        assert!(!h.editor.is_pan_armed());
        assert_eq!(h.editor.mode(), &Mode::Idle);
    }

    #[test]
    fn test_color_change_applies_to_selection() {
        let mut h = Harness::new(ToolKind::Select);
        let id = h.add(rect(0.0, 0.0, 10.0, 10.0));
        let red = SerializableColor::rgb(255, 0, 0);

        assert!(!h.editor.set_stroke_color(red, &mut h.host));
        assert_eq!(h.editor.settings().stroke_color, red);

        h.editor.select_all();
        let before = h.editor.history().undo_len();
        let blue = SerializableColor::rgb(0, 0, 255);
        assert!(h.editor.set_stroke_color(blue, &mut h.host));
        assert_eq!(h.editor.scene().get(id).unwrap().color(), blue);
        assert!(h.editor.set_stroke_width(8.0, &mut h.host));
        assert_eq!(h.editor.scene().get(id).unwrap().stroke_width(), Some(8.0));
        assert_eq!(h.editor.history().undo_len(), before + 2);
    }

    #[test]
    fn test_moves_are_clamped_to_canvas() {
        let mut h = Harness::new(ToolKind::Line);
        h.editor.handle_event(
            InputEvent::Resize {
                origin: Point::ZERO,
                size: Size::new(200.0, 100.0),
                device_pixel_ratio: 2.0,
            },
            &mut h.host,
        );
        assert!((h.editor.viewport().device_pixel_ratio - 2.0).abs() < f64::EPSILON);
        h.down(50.0, 50.0);
        h.move_to(900.0, -300.0);
        h.up(900.0, -300.0);
        let Shape::Line(line) = &h.editor.scene().shapes()[0] else {
            panic!("expected line");
        };
        assert_eq!(line.end, Point::new(200.0, 0.0));
    }

    #[test]
    fn test_hover_cursor_over_handle() {
        let mut h = Harness::new(ToolKind::Select);
        let id = h.add(rect(0.0, 0.0, 100.0, 50.0));
        h.editor.selection.select(id);
        h.move_to(100.0, 25.0);
        assert_eq!(h.editor.cursor(), Cursor::Resize(Handle::E));
        h.move_to(50.0, 20.0);
        assert_eq!(h.editor.cursor(), Cursor::Move);
        h.move_to(300.0, 300.0);
        assert_eq!(h.editor.cursor(), Cursor::Default);
    }
}
