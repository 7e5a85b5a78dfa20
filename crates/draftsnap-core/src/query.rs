//! Geometric queries the snapper issues against a scene.

use crate::shapes::{EntityId, EntityKind};
use kurbo::Point;
use serde::{Deserialize, Serialize};

/// How deeply queries descend into nested containers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ResolveLevel {
    /// Containers are treated as single entities.
    #[default]
    None,
    /// Containers are resolved down to their leaf entities.
    All,
}

/// Read-only geometric queries over a set of entities.
///
/// Point queries consider the geometry of every visible leaf below the
/// entities at `level`; the level only changes which entity is reported
/// as the owner of a result.
pub trait GeometricQueryProvider {
    /// Nearest endpoint of any entity.
    fn nearest_endpoint(&self, coord: Point, level: ResolveLevel) -> Option<Point>;

    /// Nearest center of any entity.
    fn nearest_center(&self, coord: Point, level: ResolveLevel) -> Option<Point>;

    /// Nearest of the `middle_points` interior division points of any entity.
    fn nearest_middle(&self, coord: Point, middle_points: usize, level: ResolveLevel) -> Option<Point>;

    /// Nearest point lying `distance` along an entity from one of its ends.
    fn nearest_dist(&self, distance: f64, coord: Point, level: ResolveLevel) -> Option<Point>;

    /// Nearest intersection of the entity closest to `coord` with any other entity.
    fn nearest_intersection(&self, coord: Point, level: ResolveLevel) -> Option<Point>;

    /// Nearest point on any entity, with the entity it lies on.
    fn nearest_point_on_entity(
        &self,
        coord: Point,
        on_entity: bool,
        level: ResolveLevel,
    ) -> Option<(Point, EntityId)>;

    /// Nearest visible entity at `level` and its distance to `coord`.
    fn nearest_entity(&self, coord: Point, level: ResolveLevel) -> Option<(EntityId, f64)>;

    /// Same search as [`nearest_entity`](Self::nearest_entity), reporting
    /// `f64::MAX` as the distance when nothing is found.
    fn distance_to_nearest(&self, coord: Point, level: ResolveLevel) -> (Option<EntityId>, f64) {
        match self.nearest_entity(coord, level) {
            Some((id, dist)) => (Some(id), dist),
            None => (None, f64::MAX),
        }
    }

    /// Ids of all entities at `level`, visible or not, in drawing order.
    fn entity_ids(&self, level: ResolveLevel) -> Vec<EntityId>;

    /// Type tag of an entity.
    fn entity_kind(&self, id: EntityId) -> Option<EntityKind>;

    /// Owning container of an entity.
    fn parent_of(&self, id: EntityId) -> Option<EntityId>;

    /// Whether the entity and all of its ancestors are visible.
    fn is_visible(&self, id: EntityId) -> bool;

    /// Distance from `coord` to a single entity (containers use their nearest child).
    fn distance_to_entity(&self, id: EntityId, coord: Point) -> Option<f64>;
}
