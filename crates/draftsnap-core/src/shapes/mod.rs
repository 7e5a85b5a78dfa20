//! Entity definitions for the drawing scene.

mod arc;
mod circle;
mod group;
pub mod intersection;
mod line;
mod point;
mod polyline;
mod spline;

pub use arc::Arc;
pub use circle::Circle;
pub use group::Container;
pub use line::Line;
pub use point::PointEntity;
pub use polyline::Polyline;
pub use spline::Spline;

use kurbo::Point;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for entities.
///
/// Parent links and caught entities are stored as ids, never as shared
/// pointers, so they carry no ownership of the scene.
pub type EntityId = Uuid;

/// Tolerance used for degenerate geometry checks.
pub const GEOMETRY_EPSILON: f64 = 1e-9;

/// Type tag of an entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    Point,
    Line,
    Circle,
    Arc,
    /// Generic container of arbitrary entities.
    Container,
    /// Connected line segments.
    Polyline,
    /// Line segments approximating a B-spline.
    Spline,
}

impl EntityKind {
    /// Whether entities of this kind own child entities.
    pub fn is_container(self) -> bool {
        matches!(
            self,
            EntityKind::Container | EntityKind::Polyline | EntityKind::Spline
        )
    }

    /// Display name of this kind.
    pub fn name(self) -> &'static str {
        match self {
            EntityKind::Point => "Point",
            EntityKind::Line => "Line",
            EntityKind::Circle => "Circle",
            EntityKind::Arc => "Arc",
            EntityKind::Container => "Container",
            EntityKind::Polyline => "Polyline",
            EntityKind::Spline => "Spline",
        }
    }
}

/// Snap-relevant geometry of a leaf entity.
pub trait SnapGeometry {
    /// End points (for a point entity, the point itself).
    fn endpoints(&self) -> Vec<Point>;

    /// Center point, if the entity has one.
    fn center(&self) -> Option<Point>;

    /// Points dividing the entity into `middle_points + 1` equal parts.
    fn middle_points(&self, middle_points: usize) -> Vec<Point>;

    /// Points at `distance` from each end, measured along the entity.
    fn points_at_distance(&self, distance: f64) -> Vec<Point>;

    /// Nearest point on the entity.
    ///
    /// With `on_entity` the result is restricted to the bounded entity,
    /// otherwise the underlying infinite line or full circle is used.
    fn nearest_point_on(&self, coord: Point, on_entity: bool) -> Point;

    /// Distance from `coord` to the bounded entity.
    fn distance_to_point(&self, coord: Point) -> f64 {
        coord.distance(self.nearest_point_on(coord, true))
    }
}

/// Enum wrapper for all entity shapes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Shape {
    Point(PointEntity),
    Line(Line),
    Circle(Circle),
    Arc(Arc),
    Container(Container),
    Polyline(Polyline),
    Spline(Spline),
}

impl Shape {
    pub fn kind(&self) -> EntityKind {
        match self {
            Shape::Point(_) => EntityKind::Point,
            Shape::Line(_) => EntityKind::Line,
            Shape::Circle(_) => EntityKind::Circle,
            Shape::Arc(_) => EntityKind::Arc,
            Shape::Container(_) => EntityKind::Container,
            Shape::Polyline(_) => EntityKind::Polyline,
            Shape::Spline(_) => EntityKind::Spline,
        }
    }

    /// Get the leaf geometry, `None` for containers.
    pub fn as_geometry(&self) -> Option<&dyn SnapGeometry> {
        match self {
            Shape::Point(s) => Some(s),
            Shape::Line(s) => Some(s),
            Shape::Circle(s) => Some(s),
            Shape::Arc(s) => Some(s),
            Shape::Container(_) | Shape::Polyline(_) | Shape::Spline(_) => None,
        }
    }

    /// Get the child ids, `None` for leaves.
    pub fn children(&self) -> Option<&[EntityId]> {
        match self {
            Shape::Container(c) => Some(&c.children),
            Shape::Polyline(p) => Some(&p.children),
            Shape::Spline(s) => Some(&s.children),
            _ => None,
        }
    }

    pub(crate) fn children_mut(&mut self) -> Option<&mut Vec<EntityId>> {
        match self {
            Shape::Container(c) => Some(&mut c.children),
            Shape::Polyline(p) => Some(&mut p.children),
            Shape::Spline(s) => Some(&mut s.children),
            _ => None,
        }
    }

    /// Check if this shape owns children.
    pub fn is_container(&self) -> bool {
        self.kind().is_container()
    }
}

/// A node of the scene graph.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Entity {
    pub id: EntityId,
    /// Owning container, if any (non-owning back reference).
    pub parent: Option<EntityId>,
    /// Visibility flag of this node alone.
    pub visible: bool,
    pub shape: Shape,
}

impl Entity {
    /// Create a new top-level, visible entity.
    pub fn new(shape: Shape) -> Self {
        Self {
            id: Uuid::new_v4(),
            parent: None,
            visible: true,
            shape,
        }
    }

    pub fn kind(&self) -> EntityKind {
        self.shape.kind()
    }
}

/// Project `point` onto the line through `a` and `b`.
///
/// With `clamp` the projection is restricted to the segment a→b.
pub fn project_on_segment(point: Point, a: Point, b: Point, clamp: bool) -> Point {
    let seg = b - a;
    let len_sq = seg.hypot2();
    if len_sq < GEOMETRY_EPSILON * GEOMETRY_EPSILON {
        return a;
    }
    let mut t = (point - a).dot(seg) / len_sq;
    if clamp {
        t = t.clamp(0.0, 1.0);
    }
    a + seg * t
}

/// Closest of `candidates` to `coord`; on equal distances the first one wins.
pub fn closest_point(coord: Point, candidates: impl IntoIterator<Item = Point>) -> Option<Point> {
    let mut best: Option<(Point, f64)> = None;
    for p in candidates {
        let d2 = coord.distance_squared(p);
        if best.is_none_or(|(_, best_d2)| d2 < best_d2) {
            best = Some((p, d2));
        }
    }
    best.map(|(p, _)| p)
}
