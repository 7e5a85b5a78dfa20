//! Circular arc entity.

use super::{GEOMETRY_EPSILON, SnapGeometry, closest_point};
use kurbo::{Point, Vec2};
use serde::{Deserialize, Serialize};
use std::f64::consts::TAU;

/// Angular slack when testing whether an angle lies on the arc.
const ANGLE_EPSILON: f64 = 1e-9;

/// A circular arc running counter-clockwise from `start_angle` to `end_angle`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Arc {
    pub center: Point,
    pub radius: f64,
    /// Start angle in radians.
    pub start_angle: f64,
    /// End angle in radians.
    pub end_angle: f64,
}

impl Arc {
    /// Create a new arc.
    pub fn new(center: Point, radius: f64, start_angle: f64, end_angle: f64) -> Self {
        Self {
            center,
            radius,
            start_angle,
            end_angle,
        }
    }

    /// Swept angle in (0, 2π].
    pub fn sweep(&self) -> f64 {
        let sweep = (self.end_angle - self.start_angle).rem_euclid(TAU);
        if sweep <= ANGLE_EPSILON { TAU } else { sweep }
    }

    /// Arc length.
    pub fn length(&self) -> f64 {
        self.radius * self.sweep()
    }

    /// Point on the underlying circle at `angle`.
    pub fn point_at(&self, angle: f64) -> Point {
        self.center + Vec2::from_angle(angle) * self.radius
    }

    pub fn start_point(&self) -> Point {
        self.point_at(self.start_angle)
    }

    pub fn end_point(&self) -> Point {
        self.point_at(self.end_angle)
    }

    /// Check whether `angle` lies within the swept range.
    pub fn contains_angle(&self, angle: f64) -> bool {
        (angle - self.start_angle).rem_euclid(TAU) <= self.sweep() + ANGLE_EPSILON
            || (self.start_angle - angle).rem_euclid(TAU) <= ANGLE_EPSILON
    }
}

impl SnapGeometry for Arc {
    fn endpoints(&self) -> Vec<Point> {
        vec![self.start_point(), self.end_point()]
    }

    fn center(&self) -> Option<Point> {
        Some(self.center)
    }

    fn middle_points(&self, middle_points: usize) -> Vec<Point> {
        let step = self.sweep() / (middle_points + 1) as f64;
        (1..=middle_points)
            .map(|i| self.point_at(self.start_angle + step * i as f64))
            .collect()
    }

    fn points_at_distance(&self, distance: f64) -> Vec<Point> {
        if self.radius < GEOMETRY_EPSILON || distance < 0.0 {
            return Vec::new();
        }
        let delta = distance / self.radius;
        if delta > self.sweep() {
            return Vec::new();
        }
        vec![
            self.point_at(self.start_angle + delta),
            self.point_at(self.start_angle + self.sweep() - delta),
        ]
    }

    fn nearest_point_on(&self, coord: Point, on_entity: bool) -> Point {
        let d = coord - self.center;
        if d.hypot() < GEOMETRY_EPSILON {
            return self.start_point();
        }
        let angle = d.atan2();
        if !on_entity || self.contains_angle(angle) {
            return self.point_at(angle);
        }
        closest_point(coord, self.endpoints()).unwrap_or_else(|| self.start_point())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::{FRAC_PI_2, PI};

    fn quarter() -> Arc {
        Arc::new(Point::new(0.0, 0.0), 10.0, 0.0, FRAC_PI_2)
    }

    #[test]
    fn test_sweep_wraps() {
        let arc = Arc::new(Point::ZERO, 1.0, 3.0 * FRAC_PI_2, FRAC_PI_2);
        assert!((arc.sweep() - PI).abs() < 1e-9);
        let full = Arc::new(Point::ZERO, 1.0, 1.0, 1.0);
        assert!((full.sweep() - TAU).abs() < 1e-9);
    }

    #[test]
    fn test_endpoints() {
        let pts = quarter().endpoints();
        assert!((pts[0].x - 10.0).abs() < 1e-9 && pts[0].y.abs() < 1e-9);
        assert!(pts[1].x.abs() < 1e-9 && (pts[1].y - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_nearest_point_outside_sweep_clamps_to_end() {
        let arc = quarter();
        let p = arc.nearest_point_on(Point::new(-5.0, -1.0), true);
        assert!((p.x - 10.0).abs() < 1e-9 || (p.y - 10.0).abs() < 1e-9);

        let free = arc.nearest_point_on(Point::new(-20.0, 0.0), false);
        assert!((free.x + 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_middle_of_quarter_arc() {
        let mids = quarter().middle_points(1);
        let expected = 10.0 * (PI / 4.0).cos();
        assert_eq!(mids.len(), 1);
        assert!((mids[0].x - expected).abs() < 1e-9);
        assert!((mids[0].y - expected).abs() < 1e-9);
    }

    #[test]
    fn test_points_at_distance_along_arc() {
        let arc = quarter();
        let pts = arc.points_at_distance(arc.length() / 2.0);
        assert_eq!(pts.len(), 2);
        assert!(pts[0].distance(pts[1]) < 1e-9);
        assert!(arc.points_at_distance(arc.length() + 1.0).is_empty());
    }
}
