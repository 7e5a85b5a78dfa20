//! Line segment entity.

use super::{GEOMETRY_EPSILON, SnapGeometry, project_on_segment};
use kurbo::{Point, Vec2};
use serde::{Deserialize, Serialize};

/// A straight line segment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Line {
    /// Start point.
    pub start: Point,
    /// End point.
    pub end: Point,
}

impl Line {
    /// Create a new line.
    pub fn new(start: Point, end: Point) -> Self {
        Self { start, end }
    }

    /// Get the length of the line.
    pub fn length(&self) -> f64 {
        self.start.distance(self.end)
    }

    /// Get the midpoint of the line.
    pub fn midpoint(&self) -> Point {
        self.start.midpoint(self.end)
    }

    /// Unit direction from start to end, `None` for a zero-length line.
    pub fn direction(&self) -> Option<Vec2> {
        let d = self.end - self.start;
        let len = d.hypot();
        (len > GEOMETRY_EPSILON).then(|| d / len)
    }
}

impl SnapGeometry for Line {
    fn endpoints(&self) -> Vec<Point> {
        vec![self.start, self.end]
    }

    // Lines report their midpoint as center.
    fn center(&self) -> Option<Point> {
        Some(self.midpoint())
    }

    fn middle_points(&self, middle_points: usize) -> Vec<Point> {
        let parts = (middle_points + 1) as f64;
        (1..=middle_points)
            .map(|i| self.start.lerp(self.end, i as f64 / parts))
            .collect()
    }

    fn points_at_distance(&self, distance: f64) -> Vec<Point> {
        let Some(dir) = self.direction() else {
            return Vec::new();
        };
        if distance < 0.0 || distance > self.length() {
            return Vec::new();
        }
        vec![self.start + dir * distance, self.end - dir * distance]
    }

    fn nearest_point_on(&self, coord: Point, on_entity: bool) -> Point {
        project_on_segment(coord, self.start, self.end, on_entity)
    }
}
