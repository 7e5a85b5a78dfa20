//! In-memory scene graph and its geometric queries.

use crate::query::{GeometricQueryProvider, ResolveLevel};
use crate::shapes::{
    Container, Entity, EntityId, EntityKind, Polyline, Shape, SnapGeometry, Spline,
    closest_point, intersection,
};
use kurbo::Point;
use std::collections::HashMap;

/// A drawing: entities keyed by id plus the order of top-level entities.
///
/// Containers own their children through id lists; every child points back
/// at its container through `Entity::parent`.
#[derive(Debug, Clone, Default)]
pub struct Scene {
    entities: HashMap<EntityId, Entity>,
    /// Top-level entities, back to front.
    order: Vec<EntityId>,
}

impl Scene {
    /// Create a new empty scene.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a top-level entity and return its id.
    pub fn add_shape(&mut self, shape: Shape) -> EntityId {
        let entity = Entity::new(shape);
        let id = entity.id;
        self.order.push(id);
        self.entities.insert(id, entity);
        id
    }

    /// Add a polyline through `vertices`; each segment becomes a child `Line`.
    pub fn add_polyline(&mut self, vertices: &[Point], closed: bool) -> EntityId {
        let id = self.add_shape(Shape::Polyline(Polyline {
            children: Vec::new(),
            closed,
        }));
        let segments = Polyline::segments(vertices, closed)
            .into_iter()
            .map(Shape::Line)
            .collect();
        self.attach_children(id, segments);
        id
    }

    /// Add a spline through `control_points`; its approximation becomes child `Line`s.
    pub fn add_spline(&mut self, control_points: Vec<Point>) -> EntityId {
        let segments = Spline::segments(&control_points)
            .into_iter()
            .map(Shape::Line)
            .collect();
        let id = self.add_shape(Shape::Spline(Spline::new(control_points)));
        self.attach_children(id, segments);
        id
    }

    /// Move top-level entities into a new container placed at the end of the order.
    ///
    /// Returns `None` if any id is unknown or not top-level.
    pub fn group(&mut self, ids: &[EntityId]) -> Option<EntityId> {
        if ids.is_empty() || !ids.iter().all(|id| self.order.contains(id)) {
            return None;
        }
        let group_id = self.add_shape(Shape::Container(Container::with_children(ids.to_vec())));
        self.order.retain(|id| !ids.contains(id));
        for id in ids {
            if let Some(entity) = self.entities.get_mut(id) {
                entity.parent = Some(group_id);
            }
        }
        Some(group_id)
    }

    fn attach_children(&mut self, parent: EntityId, shapes: Vec<Shape>) {
        let mut child_ids = Vec::with_capacity(shapes.len());
        for shape in shapes {
            let mut child = Entity::new(shape);
            child.parent = Some(parent);
            child_ids.push(child.id);
            self.entities.insert(child.id, child);
        }
        if let Some(children) = self
            .entities
            .get_mut(&parent)
            .and_then(|e| e.shape.children_mut())
        {
            children.extend(child_ids);
        }
    }

    /// Remove an entity and everything below it.
    pub fn remove(&mut self, id: EntityId) -> Option<Entity> {
        let entity = self.entities.remove(&id)?;
        match entity.parent {
            Some(parent) => {
                if let Some(children) = self
                    .entities
                    .get_mut(&parent)
                    .and_then(|e| e.shape.children_mut())
                {
                    children.retain(|&child| child != id);
                }
            }
            None => self.order.retain(|&top| top != id),
        }
        if let Some(children) = entity.shape.children() {
            for &child in children {
                self.remove_subtree(child);
            }
        }
        Some(entity)
    }

    fn remove_subtree(&mut self, id: EntityId) {
        if let Some(entity) = self.entities.remove(&id) {
            if let Some(children) = entity.shape.children() {
                for &child in children {
                    self.remove_subtree(child);
                }
            }
        }
    }

    /// Clear all entities.
    pub fn clear(&mut self) {
        self.entities.clear();
        self.order.clear();
    }

    /// Get an entity by id.
    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.entities.get(&id)
    }

    /// Set the visibility flag of a single entity. Returns false if unknown.
    pub fn set_visible(&mut self, id: EntityId, visible: bool) -> bool {
        match self.entities.get_mut(&id) {
            Some(entity) => {
                entity.visible = visible;
                true
            }
            None => false,
        }
    }

    /// Child ids of a container (empty for leaves).
    pub fn children(&self, id: EntityId) -> &[EntityId] {
        self.entities
            .get(&id)
            .and_then(|e| e.shape.children())
            .unwrap_or(&[])
    }

    /// Top-level entities in drawing order.
    pub fn top_level(&self) -> impl Iterator<Item = &Entity> {
        self.order.iter().filter_map(|id| self.entities.get(id))
    }

    /// Check if the scene is empty.
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Total number of entities, containers and children included.
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// Leaf ids below `id` (or `id` itself), skipping hidden nodes when `visible_only`.
    fn collect_leaves(&self, id: EntityId, visible_only: bool, out: &mut Vec<EntityId>) {
        let Some(entity) = self.entities.get(&id) else {
            return;
        };
        if visible_only && !entity.visible {
            return;
        }
        match entity.shape.children() {
            Some(children) => {
                for &child in children {
                    self.collect_leaves(child, visible_only, out);
                }
            }
            None => out.push(id),
        }
    }

    fn visible_leaves_of(&self, id: EntityId) -> Vec<(EntityId, &Shape)> {
        let mut ids = Vec::new();
        self.collect_leaves(id, true, &mut ids);
        ids.into_iter()
            .filter_map(|leaf| self.entities.get(&leaf).map(|e| (leaf, &e.shape)))
            .collect()
    }

    /// Visible entities at `level` paired with their visible leaves.
    fn visible_roots(&self, level: ResolveLevel) -> Vec<(EntityId, Vec<(EntityId, &Shape)>)> {
        self.entity_ids(level)
            .into_iter()
            .filter(|&id| self.is_visible(id))
            .map(|id| (id, self.visible_leaves_of(id)))
            .collect()
    }

    /// Geometry of every visible leaf in drawing order.
    fn visible_geometry(&self) -> Vec<&dyn SnapGeometry> {
        self.visible_roots(ResolveLevel::None)
            .into_iter()
            .flat_map(|(_, leaves)| leaves)
            .filter_map(|(_, shape)| shape.as_geometry())
            .collect()
    }

    fn nearest_of<F>(&self, coord: Point, points: F) -> Option<Point>
    where
        F: Fn(&dyn SnapGeometry) -> Vec<Point>,
    {
        closest_point(coord, self.visible_geometry().into_iter().flat_map(points))
    }
}

impl GeometricQueryProvider for Scene {
    fn nearest_endpoint(&self, coord: Point, _level: ResolveLevel) -> Option<Point> {
        self.nearest_of(coord, |g| g.endpoints())
    }

    fn nearest_center(&self, coord: Point, _level: ResolveLevel) -> Option<Point> {
        self.nearest_of(coord, |g| g.center().into_iter().collect())
    }

    fn nearest_middle(&self, coord: Point, middle_points: usize, _level: ResolveLevel) -> Option<Point> {
        self.nearest_of(coord, |g| g.middle_points(middle_points))
    }

    fn nearest_dist(&self, distance: f64, coord: Point, _level: ResolveLevel) -> Option<Point> {
        self.nearest_of(coord, |g| g.points_at_distance(distance))
    }

    fn nearest_intersection(&self, coord: Point, level: ResolveLevel) -> Option<Point> {
        let (closest, _) = self.nearest_entity(coord, level)?;
        let closest_leaves = self.visible_leaves_of(closest);
        let mut candidates = Vec::new();
        for (root, leaves) in self.visible_roots(level) {
            if root == closest {
                continue;
            }
            for (_, other) in &leaves {
                for (_, mine) in &closest_leaves {
                    candidates.extend(intersection::intersections(mine, other));
                }
            }
        }
        closest_point(coord, candidates)
    }

    fn nearest_point_on_entity(
        &self,
        coord: Point,
        on_entity: bool,
        level: ResolveLevel,
    ) -> Option<(Point, EntityId)> {
        let mut best: Option<(Point, EntityId, f64)> = None;
        for (root, leaves) in self.visible_roots(level) {
            for (_, shape) in leaves {
                let Some(geometry) = shape.as_geometry() else {
                    continue;
                };
                let p = geometry.nearest_point_on(coord, on_entity);
                let d2 = coord.distance_squared(p);
                if best.is_none_or(|(_, _, best_d2)| d2 < best_d2) {
                    best = Some((p, root, d2));
                }
            }
        }
        best.map(|(p, id, _)| (p, id))
    }

    fn nearest_entity(&self, coord: Point, level: ResolveLevel) -> Option<(EntityId, f64)> {
        let mut best: Option<(EntityId, f64)> = None;
        for id in self.entity_ids(level) {
            if !self.is_visible(id) {
                continue;
            }
            let Some(dist) = self.distance_to_entity(id, coord) else {
                continue;
            };
            if best.is_none_or(|(_, best_dist)| dist < best_dist) {
                best = Some((id, dist));
            }
        }
        best
    }

    fn entity_ids(&self, level: ResolveLevel) -> Vec<EntityId> {
        match level {
            ResolveLevel::None => self.order.clone(),
            ResolveLevel::All => {
                let mut ids = Vec::new();
                for &id in &self.order {
                    self.collect_leaves(id, false, &mut ids);
                }
                ids
            }
        }
    }

    fn entity_kind(&self, id: EntityId) -> Option<EntityKind> {
        self.entities.get(&id).map(Entity::kind)
    }

    fn parent_of(&self, id: EntityId) -> Option<EntityId> {
        self.entities.get(&id).and_then(|e| e.parent)
    }

    fn is_visible(&self, id: EntityId) -> bool {
        let mut current = Some(id);
        while let Some(cur) = current {
            match self.entities.get(&cur) {
                Some(entity) if entity.visible => current = entity.parent,
                _ => return false,
            }
        }
        true
    }

    fn distance_to_entity(&self, id: EntityId, coord: Point) -> Option<f64> {
        self.visible_leaves_of(id)
            .into_iter()
            .filter_map(|(_, shape)| shape.as_geometry())
            .map(|g| g.distance_to_point(coord))
            .reduce(f64::min)
    }
}
