//! Geometry helpers shared by shapes, selection and the editor.

use kurbo::{Point, Rect, Vec2};

/// Distance from a point to a line segment.
pub fn point_to_segment_dist(point: Point, a: Point, b: Point) -> f64 {
    let seg = Vec2::new(b.x - a.x, b.y - a.y);
    let pv = Vec2::new(point.x - a.x, point.y - a.y);
    let len_sq = seg.hypot2();
    if len_sq < f64::EPSILON {
        return pv.hypot();
    }
    let t = (pv.dot(seg) / len_sq).clamp(0.0, 1.0);
    let proj = Point::new(a.x + t * seg.x, a.y + t * seg.y);
    ((point.x - proj.x).powi(2) + (point.y - proj.y).powi(2)).sqrt()
}

/// Inclusive containment test (kurbo's `Rect::contains` excludes the far edges).
pub fn rect_contains(rect: Rect, point: Point) -> bool {
    point.x >= rect.x0 && point.x <= rect.x1 && point.y >= rect.y0 && point.y <= rect.y1
}

/// Whether two axis-aligned rectangles overlap (touching edges count).
pub fn rects_overlap(a: Rect, b: Rect) -> bool {
    a.x0 <= b.x1 && a.x1 >= b.x0 && a.y0 <= b.y1 && a.y1 >= b.y0
}

/// Axis-aligned rectangle spanning two arbitrary corners.
pub fn rect_from_corners(a: Point, b: Point) -> Rect {
    Rect::from_points(a, b).abs()
}

/// Tight bounds of a point set, or `None` when empty.
pub fn bounds_of_points(points: impl IntoIterator<Item = Point>) -> Option<Rect> {
    let mut iter = points.into_iter();
    let first = iter.next()?;
    Some(iter.fold(Rect::from_points(first, first), |acc, p| {
        Rect::new(
            acc.x0.min(p.x),
            acc.y0.min(p.y),
            acc.x1.max(p.x),
            acc.y1.max(p.y),
        )
    }))
}

/// Union of rectangles, or `None` when empty.
pub fn union_bounds(rects: impl IntoIterator<Item = Rect>) -> Option<Rect> {
    rects.into_iter().reduce(|acc, r| acc.union(r))
}

/// Linear interpolation between two points.
pub fn lerp(a: Point, b: Point, t: f64) -> Point {
    Point::new(a.x + (b.x - a.x) * t, a.y + (b.y - a.y) * t)
}
