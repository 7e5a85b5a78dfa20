//! Circle entity.

use super::{GEOMETRY_EPSILON, SnapGeometry};
use kurbo::{Point, Vec2};
use serde::{Deserialize, Serialize};

/// A full circle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Circle {
    pub center: Point,
    pub radius: f64,
}

impl Circle {
    /// Create a new circle.
    pub fn new(center: Point, radius: f64) -> Self {
        Self { center, radius }
    }
}

impl SnapGeometry for Circle {
    fn endpoints(&self) -> Vec<Point> {
        Vec::new()
    }

    fn center(&self) -> Option<Point> {
        Some(self.center)
    }

    fn middle_points(&self, _middle_points: usize) -> Vec<Point> {
        Vec::new()
    }

    fn points_at_distance(&self, _distance: f64) -> Vec<Point> {
        Vec::new()
    }

    fn nearest_point_on(&self, coord: Point, _on_entity: bool) -> Point {
        let d = coord - self.center;
        let len = d.hypot();
        if len < GEOMETRY_EPSILON {
            // Every point on the circle is equally near; pick angle 0.
            return self.center + Vec2::new(self.radius, 0.0);
        }
        self.center + d * (self.radius / len)
    }

    fn distance_to_point(&self, coord: Point) -> f64 {
        (coord.distance(self.center) - self.radius).abs()
    }
}
