//! Entity catching: the nearest visible entity to a point, optionally
//! filtered by kind, within a snap range.

use crate::query::{GeometricQueryProvider, ResolveLevel};
use crate::shapes::{EntityId, EntityKind};
use kurbo::Point;
use log::debug;

/// Scratch collection of catch candidates.
#[derive(Debug, Clone, Default)]
pub struct CatchSet {
    ids: Vec<EntityId>,
}

impl CatchSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an entity; duplicates are ignored.
    pub fn insert(&mut self, id: EntityId) {
        if !self.ids.contains(&id) {
            self.ids.push(id);
        }
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.ids.contains(&id)
    }

    pub fn ids(&self) -> &[EntityId] {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Nearest member to `coord`, each member measured as a whole.
    ///
    /// On equal distances the member inserted first wins.
    pub fn nearest(&self, coord: Point, provider: &dyn GeometricQueryProvider) -> Option<(EntityId, f64)> {
        let mut best: Option<(EntityId, f64)> = None;
        for &id in &self.ids {
            let Some(dist) = provider.distance_to_entity(id, coord) else {
                continue;
            };
            if best.is_none_or(|(_, best_dist)| dist < best_dist) {
                best = Some((id, dist));
            }
        }
        best
    }
}

/// Finds the entity under the pointer.
#[derive(Debug, Clone, Default)]
pub struct EntityCatcher {
    scratch: CatchSet,
}

impl EntityCatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Catch the nearest entity, optionally restricted to one kind.
    pub fn catch(
        &mut self,
        coord: Point,
        filter: Option<EntityKind>,
        level: ResolveLevel,
        range: f64,
        provider: &dyn GeometricQueryProvider,
    ) -> Option<EntityId> {
        match filter {
            None => self.catch_any(coord, level, range, provider),
            Some(kind) => self.catch_kind(coord, kind, level, range, provider),
        }
    }

    /// Catch the nearest visible entity of any kind.
    pub fn catch_any(
        &self,
        coord: Point,
        level: ResolveLevel,
        range: f64,
        provider: &dyn GeometricQueryProvider,
    ) -> Option<EntityId> {
        let (id, dist) = provider.distance_to_nearest(coord, level);
        within_range(id, dist, range)
    }

    /// Catch the nearest visible entity of `kind`.
    ///
    /// For container kinds an entity also matches when one of its
    /// ancestors has that kind, so a polyline filter catches polyline
    /// segments at [`ResolveLevel::All`].
    pub fn catch_kind(
        &mut self,
        coord: Point,
        kind: EntityKind,
        level: ResolveLevel,
        range: f64,
        provider: &dyn GeometricQueryProvider,
    ) -> Option<EntityId> {
        self.scratch.clear();
        for id in provider.entity_ids(level) {
            if !provider.is_visible(id) {
                continue;
            }
            if matches_kind(id, kind, provider) {
                self.scratch.insert(id);
            }
        }
        if self.scratch.is_empty() {
            debug!("No {} entity to catch", kind.name());
            return None;
        }
        match self.scratch.nearest(coord, provider) {
            Some((id, dist)) => within_range(Some(id), dist, range),
            None => within_range(None, f64::MAX, range),
        }
    }

    /// Catch the nearest visible entity of any of `kinds`.
    ///
    /// An empty list catches entities of every kind.
    pub fn catch_kinds(
        &mut self,
        coord: Point,
        kinds: &[EntityKind],
        level: ResolveLevel,
        range: f64,
        provider: &dyn GeometricQueryProvider,
    ) -> Option<EntityId> {
        if kinds.is_empty() {
            return self.catch_any(coord, level, range, provider);
        }
        let mut best: Option<(EntityId, f64)> = None;
        for &kind in kinds {
            let Some(id) = self.catch_kind(coord, kind, level, range, provider) else {
                continue;
            };
            let Some(dist) = provider.distance_to_entity(id, coord) else {
                continue;
            };
            if best.is_none_or(|(_, best_dist)| dist < best_dist) {
                best = Some((id, dist));
            }
        }
        best.map(|(id, _)| id)
    }
}

fn matches_kind(id: EntityId, kind: EntityKind, provider: &dyn GeometricQueryProvider) -> bool {
    if provider.entity_kind(id) == Some(kind) {
        return true;
    }
    if !kind.is_container() {
        return false;
    }
    let mut ancestor = provider.parent_of(id);
    while let Some(parent) = ancestor {
        if provider.entity_kind(parent) == Some(kind) {
            return true;
        }
        ancestor = provider.parent_of(parent);
    }
    false
}

fn within_range(id: Option<EntityId>, dist: f64, range: f64) -> Option<EntityId> {
    match id {
        Some(id) if dist <= range => {
            debug!("Caught entity {id} at distance {dist:.3}");
            Some(id)
        }
        Some(id) => {
            debug!("Nearest entity {id} at {dist:.3} is outside snap range {range:.3}");
            None
        }
        None => {
            debug!("No entity to catch");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::Scene;
    use crate::shapes::{Circle, Line, Shape};

    fn line(x0: f64, y0: f64, x1: f64, y1: f64) -> Shape {
        Shape::Line(Line::new(Point::new(x0, y0), Point::new(x1, y1)))
    }

    #[test]
    fn test_catch_set_deduplicates() {
        let mut set = CatchSet::new();
        let id = EntityId::new_v4();
        set.insert(id);
        set.insert(id);
        assert_eq!(set.len(), 1);
        assert!(set.contains(id));
        set.clear();
        assert!(set.is_empty());
    }

    #[test]
    fn test_catch_unfiltered() {
        let mut scene = Scene::new();
        let near = scene.add_shape(line(0.0, 0.0, 10.0, 0.0));
        scene.add_shape(line(0.0, 50.0, 10.0, 50.0));

        let mut catcher = EntityCatcher::new();
        let caught = catcher.catch(Point::new(5.0, 2.0), None, ResolveLevel::None, 20.0, &scene);
        assert_eq!(caught, Some(near));
    }

    #[test]
    fn test_catch_range_is_inclusive() {
        let mut scene = Scene::new();
        let id = scene.add_shape(line(0.0, 0.0, 10.0, 0.0));
        let catcher = EntityCatcher::new();

        assert_eq!(catcher.catch_any(Point::new(5.0, 4.0), ResolveLevel::None, 4.0, &scene), Some(id));
        assert_eq!(catcher.catch_any(Point::new(5.0, 4.5), ResolveLevel::None, 4.0, &scene), None);
    }

    #[test]
    fn test_catch_kind_skips_other_kinds() {
        let mut scene = Scene::new();
        scene.add_shape(line(0.0, 0.0, 10.0, 0.0));
        let circle = scene.add_shape(Shape::Circle(Circle::new(Point::new(5.0, 10.0), 5.0)));

        let mut catcher = EntityCatcher::new();
        let caught = catcher.catch_kind(Point::new(5.0, 1.0), EntityKind::Circle, ResolveLevel::All, 20.0, &scene);
        assert_eq!(caught, Some(circle));
    }

    #[test]
    fn test_catch_kind_with_no_candidates() {
        let mut scene = Scene::new();
        scene.add_shape(line(0.0, 0.0, 10.0, 0.0));
        let mut catcher = EntityCatcher::new();
        let caught = catcher.catch_kind(Point::new(5.0, 0.0), EntityKind::Arc, ResolveLevel::All, 20.0, &scene);
        assert_eq!(caught, None);
    }

    #[test]
    fn test_polyline_filter_matches_nested_segment() {
        let mut scene = Scene::new();
        let stray = scene.add_shape(line(0.0, 3.0, 10.0, 3.0));
        let polyline = scene.add_polyline(
            &[Point::new(0.0, 0.0), Point::new(10.0, 0.0), Point::new(10.0, 10.0)],
            false,
        );
        let group = scene.group(&[polyline]).unwrap();
        let first_segment = scene.children(polyline)[0];

        let mut catcher = EntityCatcher::new();
        let caught = catcher
            .catch_kind(Point::new(5.0, 2.0), EntityKind::Polyline, ResolveLevel::All, 20.0, &scene)
            .unwrap();
        assert_ne!(caught, stray);
        assert_eq!(caught, first_segment);
        assert_eq!(scene.parent_of(caught), Some(polyline));
        assert_eq!(scene.parent_of(polyline), Some(group));
    }

    #[test]
    fn test_leaf_filter_ignores_ancestry() {
        let mut scene = Scene::new();
        scene.add_polyline(&[Point::new(0.0, 0.0), Point::new(10.0, 0.0)], false);
        let lone = scene.add_shape(line(0.0, 30.0, 10.0, 30.0));

        let mut catcher = EntityCatcher::new();
        // Polyline segments are lines too
        let caught = catcher.catch_kind(Point::new(5.0, 1.0), EntityKind::Line, ResolveLevel::All, 50.0, &scene);
        assert_ne!(caught, Some(lone));
        assert!(caught.is_some());
    }

    #[test]
    fn test_hidden_entities_are_skipped() {
        let mut scene = Scene::new();
        let hidden = scene.add_shape(line(0.0, 0.0, 10.0, 0.0));
        let visible = scene.add_shape(line(0.0, 8.0, 10.0, 8.0));
        scene.set_visible(hidden, false);

        let mut catcher = EntityCatcher::new();
        let caught = catcher.catch_kind(Point::new(5.0, 1.0), EntityKind::Line, ResolveLevel::None, 20.0, &scene);
        assert_eq!(caught, Some(visible));
    }

    #[test]
    fn test_catch_kinds_picks_nearest_across_kinds() {
        let mut scene = Scene::new();
        let line_id = scene.add_shape(line(0.0, 0.0, 10.0, 0.0));
        let circle = scene.add_shape(Shape::Circle(Circle::new(Point::new(5.0, 10.0), 3.0)));

        let mut catcher = EntityCatcher::new();
        let kinds = [EntityKind::Line, EntityKind::Circle];
        assert_eq!(
            catcher.catch_kinds(Point::new(5.0, 6.0), &kinds, ResolveLevel::None, 20.0, &scene),
            Some(circle)
        );
        assert_eq!(
            catcher.catch_kinds(Point::new(5.0, 1.0), &kinds, ResolveLevel::None, 20.0, &scene),
            Some(line_id)
        );
    }

    #[test]
    fn test_empty_kind_list_catches_anything() {
        let mut scene = Scene::new();
        let id = scene.add_shape(Shape::Circle(Circle::new(Point::ZERO, 5.0)));
        let mut catcher = EntityCatcher::new();
        assert_eq!(
            catcher.catch_kinds(Point::new(6.0, 0.0), &[], ResolveLevel::None, 20.0, &scene),
            Some(id)
        );
    }
}
