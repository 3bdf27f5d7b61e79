//! Viewport module for pan/zoom transforms.

use kurbo::{Affine, Point, Rect, Size, Vec2};
use serde::{Deserialize, Serialize};

pub const MIN_ZOOM: f64 = 0.1;
pub const MAX_ZOOM: f64 = 5.0;
/// Zoom factor applied per wheel notch towards the user.
pub const WHEEL_ZOOM_IN: f64 = 1.1;
/// Zoom factor applied per wheel notch away from the user.
pub const WHEEL_ZOOM_OUT: f64 = 0.9;
/// Zoom step used by the toolbar zoom buttons.
pub const BUTTON_ZOOM_STEP: f64 = 1.2;

/// Viewport maps world coordinates onto the canvas element.
///
/// `screen = (world + pan) * zoom + origin`, where `origin` is the canvas'
/// top-left corner in client coordinates. Pan is stored in world units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    /// Current zoom level, clamped to `[MIN_ZOOM, MAX_ZOOM]`.
    pub zoom: f64,
    /// Translation in world units.
    pub pan: Vec2,
    /// Canvas top-left corner in client coordinates.
    pub origin: Point,
    /// Canvas size in logical pixels.
    pub size: Size,
    /// Physical pixels per logical pixel.
    pub device_pixel_ratio: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            zoom: 1.0,
            pan: Vec2::ZERO,
            origin: Point::ZERO,
            size: Size::new(800.0, 600.0),
            device_pixel_ratio: 1.0,
        }
    }
}

impl Viewport {
    /// Create a viewport for a canvas of the given logical size.
    pub fn new(size: Size) -> Self {
        Self {
            size,
            ..Self::default()
        }
    }

    /// World to canvas-local logical pixels.
    pub fn view_transform(&self) -> Affine {
        Affine::scale(self.zoom) * Affine::translate(self.pan)
    }

    /// World to physical pixels of the backing surface.
    pub fn device_transform(&self) -> Affine {
        Affine::scale(self.device_pixel_ratio) * self.view_transform()
    }

    /// Backing surface size in physical pixels.
    pub fn device_size(&self) -> (u32, u32) {
        let w = (self.size.width * self.device_pixel_ratio).round().max(1.0);
        let h = (self.size.height * self.device_pixel_ratio).round().max(1.0);
        (w as u32, h as u32)
    }

    /// Convert a client-space point to world coordinates.
    pub fn screen_to_world(&self, screen_point: Point) -> Point {
        let local = screen_point - self.origin;
        Point::new(local.x / self.zoom, local.y / self.zoom) - self.pan
    }

    /// Convert a world point to client-space coordinates.
    pub fn world_to_screen(&self, world_point: Point) -> Point {
        let shifted = world_point + self.pan;
        Point::new(shifted.x * self.zoom, shifted.y * self.zoom) + self.origin.to_vec2()
    }

    /// A distance in screen pixels expressed in world units.
    pub fn world_tolerance(&self, screen_pixels: f64) -> f64 {
        screen_pixels / self.zoom
    }

    /// Pan by a delta in screen coordinates.
    pub fn pan_by_screen(&mut self, delta: Vec2) {
        self.pan += delta / self.zoom;
    }

    /// Zoom by `factor`, keeping the world point under `screen_point` fixed.
    /// Returns false when the zoom was already at the clamp limit.
    pub fn zoom_at(&mut self, screen_point: Point, factor: f64) -> bool {
        let new_zoom = (self.zoom * factor).clamp(MIN_ZOOM, MAX_ZOOM);
        if (new_zoom - self.zoom).abs() < f64::EPSILON {
            return false;
        }

        let before = self.screen_to_world(screen_point);
        self.zoom = new_zoom;
        let after = self.screen_to_world(screen_point);
        self.pan += after - before;
        true
    }

    /// Toolbar zoom in, about the canvas centre.
    pub fn zoom_in(&mut self) -> bool {
        self.zoom_at(self.center(), BUTTON_ZOOM_STEP)
    }

    /// Toolbar zoom out, about the canvas centre.
    pub fn zoom_out(&mut self) -> bool {
        self.zoom_at(self.center(), 1.0 / BUTTON_ZOOM_STEP)
    }

    /// Canvas centre in client coordinates.
    pub fn center(&self) -> Point {
        self.origin + Vec2::new(self.size.width / 2.0, self.size.height / 2.0)
    }

    /// Clamp a client-space point to the canvas rectangle.
    pub fn clamp_to_canvas(&self, screen_point: Point) -> Point {
        Point::new(
            screen_point
                .x
                .clamp(self.origin.x, self.origin.x + self.size.width),
            screen_point
                .y
                .clamp(self.origin.y, self.origin.y + self.size.height),
        )
    }

    /// World-space rectangle currently visible on the canvas.
    pub fn visible_world_rect(&self) -> Rect {
        let top_left = self.screen_to_world(self.origin);
        let bottom_right = self.screen_to_world(self.origin + self.size.to_vec2());
        Rect::from_points(top_left, bottom_right)
    }

    /// Update the canvas placement after a layout or DPI change.
    pub fn set_canvas(&mut self, origin: Point, size: Size, device_pixel_ratio: f64) {
        self.origin = origin;
        self.size = size;
        if device_pixel_ratio.is_finite() && device_pixel_ratio > 0.0 {
            self.device_pixel_ratio = device_pixel_ratio;
        }
    }
}
