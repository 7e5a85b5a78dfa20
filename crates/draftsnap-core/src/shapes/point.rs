//! Point entity.

use super::SnapGeometry;
use kurbo::Point;
use serde::{Deserialize, Serialize};

/// A single drawn point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointEntity {
    pub position: Point,
}

impl PointEntity {
    pub fn new(position: Point) -> Self {
        Self { position }
    }
}

impl SnapGeometry for PointEntity {
    fn endpoints(&self) -> Vec<Point> {
        vec![self.position]
    }

    fn center(&self) -> Option<Point> {
        None
    }

    fn middle_points(&self, _middle_points: usize) -> Vec<Point> {
        Vec::new()
    }

    fn points_at_distance(&self, _distance: f64) -> Vec<Point> {
        Vec::new()
    }

    fn nearest_point_on(&self, _coord: Point, _on_entity: bool) -> Point {
        self.position
    }
}
