//! Scene: the ordered list of shapes on the board.

use crate::geometry::union_bounds;
use crate::history::Snapshot;
use crate::selection::{Handle, resized_shape};
use crate::shapes::{SerializableColor, Shape, ShapeId};
use kurbo::{Point, Rect, Vec2};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Offset applied to duplicated shapes.
pub const DUPLICATE_OFFSET: Vec2 = Vec2::new(20.0, 20.0);

/// Ordered shape list. Insertion order is z-order; later shapes draw on top.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "SceneData")]
pub struct Scene {
    shapes: Vec<Shape>,
}

/// Wire form of a scene, before ids are checked.
#[derive(Deserialize)]
struct SceneData {
    #[serde(default)]
    shapes: Vec<Shape>,
}

impl From<SceneData> for Scene {
    /// Repeated ids are replaced with fresh ones.
    fn from(data: SceneData) -> Self {
        let mut shapes = data.shapes;
        let mut seen = HashSet::new();
        for shape in &mut shapes {
            if !seen.insert(shape.id()) {
                shape.regenerate_id();
                seen.insert(shape.id());
            }
        }
        Self { shapes }
    }
}

impl Scene {
    /// Create a new empty scene.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    pub fn iter(&self) -> impl Iterator<Item = &Shape> {
        self.shapes.iter()
    }

    pub fn ids(&self) -> Vec<ShapeId> {
        self.shapes.iter().map(Shape::id).collect()
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    pub fn get(&self, id: ShapeId) -> Option<&Shape> {
        self.shapes.iter().find(|s| s.id() == id)
    }

    pub fn get_mut(&mut self, id: ShapeId) -> Option<&mut Shape> {
        self.shapes.iter_mut().find(|s| s.id() == id)
    }

    pub fn contains(&self, id: ShapeId) -> bool {
        self.get(id).is_some()
    }

    /// Append a shape on top of the stack.
    pub fn add_shape(&mut self, shape: Shape) -> ShapeId {
        let id = shape.id();
        self.shapes.push(shape);
        id
    }

    /// Remove the given shapes. Returns how many were removed.
    pub fn remove_shapes(&mut self, ids: &[ShapeId]) -> usize {
        let before = self.shapes.len();
        self.shapes.retain(|s| !ids.contains(&s.id()));
        before - self.shapes.len()
    }

    /// Translate the given shapes by a world-space delta.
    pub fn move_shapes(&mut self, ids: &[ShapeId], delta: Vec2) {
        for shape in self.shapes.iter_mut().filter(|s| ids.contains(&s.id())) {
            shape.translate(delta);
        }
    }

    /// Replace the shape with the same id. Returns false if it isn't present.
    pub fn replace_shape(&mut self, shape: Shape) -> bool {
        match self.get_mut(shape.id()) {
            Some(slot) => {
                *slot = shape;
                true
            }
            None => false,
        }
    }

    /// Recompute a shape from its pre-gesture state `original` dragged by
    /// the cumulative `delta` on `handle`. Returns false for shapes that
    /// can't be resized or are no longer present.
    pub fn resize_shape(&mut self, original: &Shape, handle: Handle, delta: Vec2) -> bool {
        match resized_shape(original, handle, delta) {
            Some(shape) => self.replace_shape(shape),
            None => false,
        }
    }

    pub fn set_color(&mut self, ids: &[ShapeId], color: SerializableColor) -> usize {
        let mut changed = 0;
        for shape in self.shapes.iter_mut().filter(|s| ids.contains(&s.id())) {
            shape.set_color(color);
            changed += 1;
        }
        changed
    }

    pub fn set_stroke_width(&mut self, ids: &[ShapeId], width: f64) -> usize {
        let mut changed = 0;
        for shape in self.shapes.iter_mut().filter(|s| ids.contains(&s.id())) {
            if shape.stroke_width().is_some() {
                shape.set_stroke_width(width);
                changed += 1;
            }
        }
        changed
    }

    /// Deep-copy the given shapes with fresh ids, offset by `DUPLICATE_OFFSET`.
    /// Copies are appended in the order of `ids`; returns the new ids.
    pub fn duplicate(&mut self, ids: &[ShapeId]) -> Vec<ShapeId> {
        let copies: Vec<Shape> = ids
            .iter()
            .filter_map(|id| self.get(*id))
            .map(|shape| {
                let mut copy = shape.clone();
                copy.regenerate_id();
                copy.translate(DUPLICATE_OFFSET);
                copy
            })
            .collect();
        copies.into_iter().map(|c| self.add_shape(c)).collect()
    }

    /// Topmost shape containing the point.
    pub fn shape_at(&self, point: Point, tolerance: f64) -> Option<ShapeId> {
        self.shapes
            .iter()
            .rev()
            .find(|s| s.hit_test(point, tolerance))
            .map(Shape::id)
    }

    /// Shapes counted as inside a selection rectangle, in z-order.
    pub fn shapes_in_rect(&self, rect: Rect) -> Vec<ShapeId> {
        let rect = rect.abs();
        self.shapes
            .iter()
            .filter(|s| s.intersects_rect(rect))
            .map(Shape::id)
            .collect()
    }

    /// Remove every shape within `radius` of the point. Returns the removed ids.
    pub fn erase_at(&mut self, point: Point, radius: f64) -> Vec<ShapeId> {
        let hits: Vec<ShapeId> = self
            .shapes
            .iter()
            .filter(|s| s.hit_test(point, radius))
            .map(Shape::id)
            .collect();
        if !hits.is_empty() {
            self.remove_shapes(&hits);
        }
        hits
    }

    /// Union of all shape bounds.
    pub fn bounds(&self) -> Option<Rect> {
        union_bounds(self.shapes.iter().map(Shape::bounds))
    }

    /// Union of the bounds of the given shapes.
    pub fn bounds_of(&self, ids: &[ShapeId]) -> Option<Rect> {
        union_bounds(
            self.shapes
                .iter()
                .filter(|s| ids.contains(&s.id()))
                .map(Shape::bounds),
        )
    }

    /// Replace the contents with a history snapshot.
    pub fn restore(&mut self, snapshot: &Snapshot) {
        self.shapes = snapshot.shapes().to_vec();
    }

    /// Serialize the scene to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Deserialize a scene from JSON. Repeated ids are replaced with fresh ones.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::{Circle, Freehand, Line, Rectangle, Text};

    fn rect(x: f64, y: f64, w: f64, h: f64) -> Shape {
        Shape::Rectangle(Rectangle::new(Point::new(x, y), w, h))
    }

    #[test]
    fn test_add_and_remove() {
        let mut scene = Scene::new();
        let a = scene.add_shape(rect(0.0, 0.0, 10.0, 10.0));
        let b = scene.add_shape(rect(20.0, 0.0, 10.0, 10.0));
        assert_eq!(scene.ids(), vec![a, b]);
        assert_eq!(scene.remove_shapes(&[a]), 1);
        assert_eq!(scene.ids(), vec![b]);
        assert_eq!(scene.remove_shapes(&[a]), 0);
    }

    #[test]
    fn test_shape_at_prefers_topmost() {
        let mut scene = Scene::new();
        let _bottom = scene.add_shape(rect(0.0, 0.0, 100.0, 100.0));
        let top = scene.add_shape(rect(50.0, 50.0, 100.0, 100.0));
        assert_eq!(scene.shape_at(Point::new(75.0, 75.0), 0.0), Some(top));
        assert_eq!(scene.shape_at(Point::new(500.0, 500.0), 10.0), None);
    }

    #[test]
    fn test_move_shapes_per_variant() {
        let mut scene = Scene::new();
        let path = scene.add_shape(Shape::Freehand(Freehand::from_points(vec![
            Point::new(0.0, 0.0),
            Point::new(5.0, 5.0),
        ])));
        let line = scene.add_shape(Shape::Line(Line::new(Point::ZERO, Point::new(10.0, 0.0))));
        let text = scene.add_shape(Shape::Text(Text::new(Point::new(1.0, 1.0), "t".into())));
        scene.move_shapes(&[path, line, text], Vec2::new(3.0, 4.0));

        let Some(Shape::Freehand(p)) = scene.get(path) else {
            panic!("path missing");
        };
        assert_eq!(p.points[1].point(), Point::new(8.0, 9.0));
        let Some(Shape::Line(l)) = scene.get(line) else {
            panic!("line missing");
        };
        assert_eq!((l.start, l.end), (Point::new(3.0, 4.0), Point::new(13.0, 4.0)));
        let Some(Shape::Text(t)) = scene.get(text) else {
            panic!("text missing");
        };
        assert_eq!(t.position, Point::new(4.0, 5.0));
    }

    #[test]
    fn test_duplicate_offsets_and_assigns_new_ids() {
        let mut scene = Scene::new();
        let original = scene.add_shape(rect(0.0, 0.0, 50.0, 50.0));
        let copies = scene.duplicate(&[original]);
        assert_eq!(copies.len(), 1);
        assert_ne!(copies[0], original);
        assert_eq!(scene.len(), 2);
        let copy = scene.get(copies[0]).unwrap();
        assert_eq!(copy.bounds(), Rect::new(20.0, 20.0, 70.0, 70.0));
        assert_eq!(scene.get(original).unwrap().bounds(), Rect::new(0.0, 0.0, 50.0, 50.0));
    }

    #[test]
    fn test_shapes_in_rect() {
        let mut scene = Scene::new();
        let inside = scene.add_shape(rect(10.0, 10.0, 10.0, 10.0));
        let _outside = scene.add_shape(rect(500.0, 500.0, 10.0, 10.0));
        let circle = scene.add_shape(Shape::Circle(Circle::new(Point::new(120.0, 50.0), 25.0)));
        // Drag direction doesn't matter.
        let ids = scene.shapes_in_rect(Rect::new(100.0, 100.0, 0.0, 0.0));
        assert_eq!(ids, vec![inside, circle]);
    }

    #[test]
    fn test_erase_ring_of_circle() {
        let mut scene = Scene::new();
        scene.add_shape(Shape::Circle(Circle::new(Point::new(100.0, 100.0), 20.0)));
        let keep = scene.add_shape(rect(300.0, 300.0, 10.0, 10.0));
        let erased = scene.erase_at(Point::new(100.0, 80.0), 15.0);
        assert_eq!(erased.len(), 1);
        assert_eq!(scene.ids(), vec![keep]);
    }

    #[test]
    fn test_set_stroke_width_skips_text() {
        let mut scene = Scene::new();
        let r = scene.add_shape(rect(0.0, 0.0, 10.0, 10.0));
        let t = scene.add_shape(Shape::Text(Text::new(Point::ZERO, "t".into())));
        assert_eq!(scene.set_stroke_width(&[r, t], 7.0), 1);
        assert_eq!(scene.get(r).unwrap().stroke_width(), Some(7.0));
        assert_eq!(scene.set_color(&[r, t], SerializableColor::white()), 2);
        assert_eq!(scene.get(t).unwrap().color(), SerializableColor::white());
    }

    #[test]
    fn test_bounds_union() {
        let mut scene = Scene::new();
        assert!(scene.bounds().is_none());
        let a = scene.add_shape(rect(0.0, 0.0, 10.0, 10.0));
        scene.add_shape(rect(50.0, -10.0, 10.0, 10.0));
        assert_eq!(scene.bounds(), Some(Rect::new(0.0, -10.0, 60.0, 10.0)));
        assert_eq!(scene.bounds_of(&[a]), Some(Rect::new(0.0, 0.0, 10.0, 10.0)));
    }

    #[test]
    fn test_json_roundtrip_and_id_repair() {
        let mut scene = Scene::new();
        scene.add_shape(rect(0.0, 0.0, 10.0, 10.0));
        scene.add_shape(Shape::Text(Text::new(Point::new(5.0, 5.0), "hello".into())));
        let json = scene.to_json().unwrap();
        assert_eq!(Scene::from_json(&json).unwrap(), scene);

        let shape = rect(1.0, 1.0, 2.0, 2.0);
        let duplicated = Scene {
            shapes: vec![shape.clone(), shape],
        };
        let repaired = Scene::from_json(&duplicated.to_json().unwrap()).unwrap();
        assert_ne!(repaired.shapes()[0].id(), repaired.shapes()[1].id());
    }
}
