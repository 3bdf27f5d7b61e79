//! Selection set and resize handle system.

use crate::shapes::{Shape, ShapeId};
use kurbo::{Point, Rect, Vec2};
use serde::{Deserialize, Serialize};

/// Handle size in screen pixels.
pub const HANDLE_SIZE: f64 = 16.0;
/// Padding between the selection bounds and the dashed outline, in screen pixels.
pub const SELECTION_PADDING: f64 = 8.0;
/// Smallest width, height or radius a resize may produce.
pub const MIN_SHAPE_EXTENT: f64 = 5.0;

/// One of the eight resize handles around a selection's bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Handle {
    Nw,
    Ne,
    Sw,
    Se,
    N,
    S,
    W,
    E,
}

impl Handle {
    /// Handles in hit-test order.
    pub const ALL: [Handle; 8] = [
        Handle::Nw,
        Handle::Ne,
        Handle::Sw,
        Handle::Se,
        Handle::N,
        Handle::S,
        Handle::W,
        Handle::E,
    ];

    pub fn is_north(self) -> bool {
        matches!(self, Handle::Nw | Handle::Ne | Handle::N)
    }

    pub fn is_south(self) -> bool {
        matches!(self, Handle::Sw | Handle::Se | Handle::S)
    }

    pub fn is_west(self) -> bool {
        matches!(self, Handle::Nw | Handle::Sw | Handle::W)
    }

    pub fn is_east(self) -> bool {
        matches!(self, Handle::Ne | Handle::Se | Handle::E)
    }

    /// Handles on the north or west side shrink circles and move line starts.
    pub fn moves_start(self) -> bool {
        self.is_north() || self.is_west()
    }

    /// Handle position on the given bounds.
    pub fn position(self, bounds: Rect) -> Point {
        let cx = (bounds.x0 + bounds.x1) / 2.0;
        let cy = (bounds.y0 + bounds.y1) / 2.0;
        match self {
            Handle::Nw => Point::new(bounds.x0, bounds.y0),
            Handle::Ne => Point::new(bounds.x1, bounds.y0),
            Handle::Sw => Point::new(bounds.x0, bounds.y1),
            Handle::Se => Point::new(bounds.x1, bounds.y1),
            Handle::N => Point::new(cx, bounds.y0),
            Handle::S => Point::new(cx, bounds.y1),
            Handle::W => Point::new(bounds.x0, cy),
            Handle::E => Point::new(bounds.x1, cy),
        }
    }

    /// CSS-style cursor name for hovering this handle.
    pub fn cursor_name(self) -> &'static str {
        match self {
            Handle::Nw | Handle::Se => "nwse-resize",
            Handle::Ne | Handle::Sw => "nesw-resize",
            Handle::N | Handle::S => "ns-resize",
            Handle::W | Handle::E => "ew-resize",
        }
    }
}

/// All eight handles with their world positions.
pub fn handles(bounds: Rect) -> [(Handle, Point); 8] {
    Handle::ALL.map(|h| (h, h.position(bounds)))
}

/// Handle under `point`, tested as squares of `half_size` around each handle.
pub fn handle_at(bounds: Rect, point: Point, half_size: f64) -> Option<Handle> {
    Handle::ALL.into_iter().find(|h| {
        let pos = h.position(bounds);
        (point.x - pos.x).abs() <= half_size && (point.y - pos.y).abs() <= half_size
    })
}

/// Compute the shape produced by dragging `handle` of `original` by the
/// cumulative `delta`. Returns `None` for shapes without resize handles.
pub fn resized_shape(original: &Shape, handle: Handle, delta: Vec2) -> Option<Shape> {
    let mut shape = original.clone();
    match &mut shape {
        Shape::Rectangle(rect) => {
            let b = rect.as_rect();
            let mut out = b;
            if handle.is_west() {
                out.x0 = (b.x0 + delta.x).min(b.x1 - MIN_SHAPE_EXTENT);
            }
            if handle.is_east() {
                out.x1 = (b.x1 + delta.x).max(b.x0 + MIN_SHAPE_EXTENT);
            }
            if handle.is_north() {
                out.y0 = (b.y0 + delta.y).min(b.y1 - MIN_SHAPE_EXTENT);
            }
            if handle.is_south() {
                out.y1 = (b.y1 + delta.y).max(b.y0 + MIN_SHAPE_EXTENT);
            }
            rect.set_rect(out);
        }
        Shape::Circle(circle) => {
            let sign = if handle.moves_start() { -1.0 } else { 1.0 };
            circle.radius = (circle.radius + sign * delta.hypot()).max(MIN_SHAPE_EXTENT);
        }
        Shape::Line(line) => {
            if handle.moves_start() {
                line.start += delta;
            } else {
                line.end += delta;
            }
        }
        Shape::Arrow(arrow) => {
            if handle.moves_start() {
                arrow.start += delta;
            } else {
                arrow.end += delta;
            }
        }
        Shape::Freehand(_) | Shape::Text(_) => return None,
    }
    Some(shape)
}

/// Ordered set of selected shape ids.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    ids: Vec<ShapeId>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ids(&self) -> &[ShapeId] {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn contains(&self, id: ShapeId) -> bool {
        self.ids.contains(&id)
    }

    /// The selected id, when exactly one shape is selected.
    pub fn single(&self) -> Option<ShapeId> {
        match self.ids.as_slice() {
            [id] => Some(*id),
            _ => None,
        }
    }

    /// Replace the selection with a single shape.
    pub fn select(&mut self, id: ShapeId) {
        self.ids.clear();
        self.ids.push(id);
    }

    /// Replace the selection, dropping repeated ids.
    pub fn set(&mut self, ids: impl IntoIterator<Item = ShapeId>) {
        self.ids.clear();
        for id in ids {
            if !self.ids.contains(&id) {
                self.ids.push(id);
            }
        }
    }

    /// Add the shape if absent, remove it if present.
    pub fn toggle(&mut self, id: ShapeId) {
        if let Some(index) = self.ids.iter().position(|s| *s == id) {
            self.ids.remove(index);
        } else {
            self.ids.push(id);
        }
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    /// Drop ids for which `keep` returns false.
    pub fn retain(&mut self, keep: impl Fn(ShapeId) -> bool) {
        self.ids.retain(|id| keep(*id));
    }
}
