//! Camera module for pan/zoom transforms between device and drawing space.

use kurbo::{Affine, Point, Vec2};
use serde::{Deserialize, Serialize};

/// Camera manages the view transform for the drawing.
///
/// Drawing space is y-up, device space is y-down with its origin at the
/// top-left corner of the viewport. `offset` is the device position of the
/// drawing origin and `zoom` is device pixels per drawing unit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Camera {
    /// Device position of the drawing origin (pan)
    pub offset: Vec2,
    /// Device pixels per drawing unit
    pub zoom: f64,
    /// Minimum allowed zoom level
    pub min_zoom: f64,
    /// Maximum allowed zoom level
    pub max_zoom: f64,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            offset: Vec2::ZERO,
            zoom: 1.0,
            min_zoom: 1e-3,
            max_zoom: 1e4,
        }
    }
}

impl Camera {
    /// Create a new camera with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Drawing to device transform.
    pub fn transform(&self) -> Affine {
        Affine::translate(self.offset) * Affine::scale_non_uniform(self.zoom, -self.zoom)
    }

    /// Device to drawing transform.
    pub fn inverse_transform(&self) -> Affine {
        Affine::scale_non_uniform(1.0 / self.zoom, -1.0 / self.zoom) * Affine::translate(-self.offset)
    }

    /// Convert a device point to drawing coordinates.
    pub fn to_graph(&self, device: Point) -> Point {
        self.inverse_transform() * device
    }

    /// Convert a drawing point to device coordinates.
    pub fn to_gui(&self, graph: Point) -> Point {
        self.transform() * graph
    }

    /// Scale factor per axis (device pixels per drawing unit, always positive).
    pub fn factor(&self) -> Vec2 {
        Vec2::new(self.zoom, self.zoom)
    }

    /// Pan the camera by a delta in device coordinates.
    pub fn pan(&mut self, delta: Vec2) {
        self.offset += delta;
    }

    /// Zoom the camera, keeping the given device point fixed.
    pub fn zoom_at(&mut self, device: Point, factor: f64) {
        let new_zoom = (self.zoom * factor).clamp(self.min_zoom, self.max_zoom);
        if (new_zoom - self.zoom).abs() < f64::EPSILON {
            return;
        }
        let graph = self.to_graph(device);
        self.zoom = new_zoom;
        let moved = self.to_gui(graph);
        self.offset += device - moved;
    }
}
