//! Intersections between leaf entities.

use super::{Arc, GEOMETRY_EPSILON, Shape};
use kurbo::{Point, Vec2};

/// Parametric slack when testing whether a point lies within a segment.
const PARAM_EPSILON: f64 = 1e-9;

/// Reduced form of a leaf used for intersection math.
#[derive(Debug, Clone, Copy)]
enum Curve {
    Segment(Point, Point),
    /// Circle, optionally bounded to an arc.
    Round {
        center: Point,
        radius: f64,
        arc: Option<Arc>,
    },
}

impl Curve {
    fn from_shape(shape: &Shape) -> Option<Self> {
        match shape {
            Shape::Line(l) => Some(Curve::Segment(l.start, l.end)),
            Shape::Circle(c) => Some(Curve::Round {
                center: c.center,
                radius: c.radius,
                arc: None,
            }),
            Shape::Arc(a) => Some(Curve::Round {
                center: a.center,
                radius: a.radius,
                arc: Some(*a),
            }),
            _ => None,
        }
    }

    /// Whether `p`, known to lie on the underlying line or circle, is on the bounded curve.
    fn bounds_contain(&self, p: Point) -> bool {
        match *self {
            Curve::Segment(a, b) => {
                let seg = b - a;
                let len_sq = seg.hypot2();
                if len_sq < GEOMETRY_EPSILON {
                    return p.distance(a) < GEOMETRY_EPSILON;
                }
                let t = (p - a).dot(seg) / len_sq;
                (-PARAM_EPSILON..=1.0 + PARAM_EPSILON).contains(&t)
            }
            Curve::Round { center, arc, .. } => {
                arc.is_none_or(|arc| arc.contains_angle((p - center).atan2()))
            }
        }
    }
}

/// All intersection points of two leaf shapes.
///
/// Containers and point entities never intersect anything.
pub fn intersections(a: &Shape, b: &Shape) -> Vec<Point> {
    let (Some(ca), Some(cb)) = (Curve::from_shape(a), Curve::from_shape(b)) else {
        return Vec::new();
    };
    let candidates = match (ca, cb) {
        (Curve::Segment(p0, p1), Curve::Segment(q0, q1)) => {
            line_line(p0, p1, q0, q1).into_iter().collect()
        }
        (Curve::Segment(p0, p1), Curve::Round { center, radius, .. })
        | (Curve::Round { center, radius, .. }, Curve::Segment(p0, p1)) => {
            line_circle(p0, p1, center, radius)
        }
        (
            Curve::Round {
                center: c0,
                radius: r0,
                ..
            },
            Curve::Round {
                center: c1,
                radius: r1,
                ..
            },
        ) => circle_circle(c0, r0, c1, r1),
    };
    candidates
        .into_iter()
        .filter(|p| ca.bounds_contain(*p) && cb.bounds_contain(*p))
        .collect()
}

/// Intersection of the infinite lines p0-p1 and q0-q1; parallel lines give none.
fn line_line(p0: Point, p1: Point, q0: Point, q1: Point) -> Option<Point> {
    let r = p1 - p0;
    let s = q1 - q0;
    let denom = r.cross(s);
    if denom.abs() < GEOMETRY_EPSILON {
        return None;
    }
    let t = (q0 - p0).cross(s) / denom;
    Some(p0 + r * t)
}

fn line_circle(p0: Point, p1: Point, center: Point, radius: f64) -> Vec<Point> {
    let d = p1 - p0;
    let a = d.hypot2();
    if a < GEOMETRY_EPSILON {
        return Vec::new();
    }
    let f = p0 - center;
    let b = 2.0 * f.dot(d);
    let c = f.hypot2() - radius * radius;
    let disc = b * b - 4.0 * a * c;
    if disc < -GEOMETRY_EPSILON {
        return Vec::new();
    }
    if disc.abs() <= GEOMETRY_EPSILON {
        // Tangent
        return vec![p0 + d * (-b / (2.0 * a))];
    }
    let sq = disc.sqrt();
    vec![
        p0 + d * ((-b - sq) / (2.0 * a)),
        p0 + d * ((-b + sq) / (2.0 * a)),
    ]
}

fn circle_circle(c0: Point, r0: f64, c1: Point, r1: f64) -> Vec<Point> {
    let delta = c1 - c0;
    let dist = delta.hypot();
    if dist < GEOMETRY_EPSILON || dist > r0 + r1 + GEOMETRY_EPSILON || dist < (r0 - r1).abs() - GEOMETRY_EPSILON {
        return Vec::new();
    }
    let along = (r0 * r0 - r1 * r1 + dist * dist) / (2.0 * dist);
    let h_sq = r0 * r0 - along * along;
    let unit = delta / dist;
    let base = c0 + unit * along;
    if h_sq <= GEOMETRY_EPSILON {
        return vec![base];
    }
    let h = h_sq.sqrt();
    let perp = Vec2::new(-unit.y, unit.x) * h;
    vec![base + perp, base - perp]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::{Circle, Line, PointEntity};
    use std::f64::consts::PI;

    fn line(x0: f64, y0: f64, x1: f64, y1: f64) -> Shape {
        Shape::Line(Line::new(Point::new(x0, y0), Point::new(x1, y1)))
    }

    #[test]
    fn test_crossing_segments() {
        let pts = intersections(&line(0.0, 0.0, 10.0, 10.0), &line(0.0, 10.0, 10.0, 0.0));
        assert_eq!(pts.len(), 1);
        assert!(pts[0].distance(Point::new(5.0, 5.0)) < 1e-9);
    }

    #[test]
    fn test_segments_that_miss() {
        assert!(intersections(&line(0.0, 0.0, 1.0, 0.0), &line(5.0, -1.0, 5.0, 1.0)).is_empty());
        assert!(intersections(&line(0.0, 0.0, 1.0, 0.0), &line(0.0, 1.0, 1.0, 1.0)).is_empty());
    }

    #[test]
    fn test_segment_through_circle() {
        let circle = Shape::Circle(Circle::new(Point::ZERO, 5.0));
        let pts = intersections(&line(-10.0, 0.0, 10.0, 0.0), &circle);
        assert_eq!(pts.len(), 2);
        assert!(pts.iter().any(|p| p.distance(Point::new(-5.0, 0.0)) < 1e-9));
        assert!(pts.iter().any(|p| p.distance(Point::new(5.0, 0.0)) < 1e-9));
    }

    #[test]
    fn test_arc_bounds_filter() {
        // Upper half arc only
        let arc = Shape::Arc(Arc::new(Point::ZERO, 5.0, 0.0, PI));
        let pts = intersections(&line(0.0, -10.0, 0.0, 10.0), &arc);
        assert_eq!(pts.len(), 1);
        assert!(pts[0].distance(Point::new(0.0, 5.0)) < 1e-9);
    }

    #[test]
    fn test_two_circles() {
        let a = Shape::Circle(Circle::new(Point::new(0.0, 0.0), 5.0));
        let b = Shape::Circle(Circle::new(Point::new(8.0, 0.0), 5.0));
        let pts = intersections(&a, &b);
        assert_eq!(pts.len(), 2);
        assert!(pts.iter().all(|p| (p.x - 4.0).abs() < 1e-9));
    }

    #[test]
    fn test_points_do_not_intersect() {
        let p = Shape::Point(PointEntity::new(Point::ZERO));
        assert!(intersections(&p, &line(-1.0, 0.0, 1.0, 0.0)).is_empty());
    }
}
