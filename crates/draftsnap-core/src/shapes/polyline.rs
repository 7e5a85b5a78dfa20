//! Polyline entity.

use super::{EntityId, Line};
use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Connected line segments, stored as child `Line` entities.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Polyline {
    /// Child segment ids, in vertex order.
    pub children: Vec<EntityId>,
    /// Whether the last vertex connects back to the first.
    pub closed: bool,
}

impl Polyline {
    /// Build the segments connecting `vertices`.
    pub fn segments(vertices: &[Point], closed: bool) -> Vec<Line> {
        let mut segments: Vec<Line> = vertices
            .windows(2)
            .map(|w| Line::new(w[0], w[1]))
            .collect();
        if closed && vertices.len() > 2 {
            if let (Some(&first), Some(&last)) = (vertices.first(), vertices.last()) {
                segments.push(Line::new(last, first));
            }
        }
        segments
    }
}
