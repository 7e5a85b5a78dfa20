//! Spline entity approximated by line segments.

use super::{EntityId, Line};
use kurbo::{ParamCurve, Point, QuadBez};
use serde::{Deserialize, Serialize};

/// Number of line segments generated per quadratic span.
pub const SEGMENTS_PER_SPAN: usize = 8;

/// A uniform quadratic B-spline through its control polygon.
///
/// The curve itself is represented by child `Line` entities sampled from it,
/// so snapping and catching work on the approximation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Spline {
    pub control_points: Vec<Point>,
    pub children: Vec<EntityId>,
}

impl Spline {
    /// Create a spline from control points; children are attached by the scene.
    pub fn new(control_points: Vec<Point>) -> Self {
        Self {
            control_points,
            children: Vec::new(),
        }
    }

    /// Quadratic spans of the curve, clamped to the first and last control point.
    pub fn spans(control_points: &[Point]) -> Vec<QuadBez> {
        let n = control_points.len();
        if n < 3 {
            return Vec::new();
        }
        let mut spans = Vec::with_capacity(n - 2);
        let mut start = control_points[0];
        for i in 1..n - 1 {
            let end = if i == n - 2 {
                control_points[n - 1]
            } else {
                control_points[i].midpoint(control_points[i + 1])
            };
            spans.push(QuadBez::new(start, control_points[i], end));
            start = end;
        }
        spans
    }

    /// Line segments approximating the curve.
    pub fn segments(control_points: &[Point]) -> Vec<Line> {
        if control_points.len() == 2 {
            return vec![Line::new(control_points[0], control_points[1])];
        }
        let mut segments = Vec::new();
        for span in Self::spans(control_points) {
            let mut prev = span.p0;
            for step in 1..=SEGMENTS_PER_SPAN {
                let next = span.eval(step as f64 / SEGMENTS_PER_SPAN as f64);
                segments.push(Line::new(prev, next));
                prev = next;
            }
        }
        segments
    }
}
