//! The snapping engine.
//!
//! A [`Snapper`] lives for one tool session. Each pointer event runs the
//! enabled strategies against the scene, keeps the nearest candidate,
//! applies the axis restriction and replans the overlay feedback.

use super::catcher::EntityCatcher;
use super::{Restriction, SnapMode};
use crate::config::SnapperSettings;
use crate::overlay::{OverlayPlanner, OverlayPrimitive};
use crate::query::{GeometricQueryProvider, ResolveLevel};
use crate::shapes::{EntityId, EntityKind};
use crate::view::CoordinateSpace;
use kurbo::{Point, Vec2};
use log::{debug, trace, warn};

/// Catch range used when the view has no grid.
pub const DEFAULT_SNAP_RANGE: f64 = 20.0;

/// Level at which the snapper queries entities.
const QUERY_LEVEL: ResolveLevel = ResolveLevel::All;

/// Collaborators borrowed for the duration of one event.
#[derive(Clone, Copy)]
pub struct SnapContext<'a> {
    pub provider: &'a dyn GeometricQueryProvider,
    pub view: &'a dyn CoordinateSpace,
}

impl<'a> SnapContext<'a> {
    pub fn new(provider: &'a dyn GeometricQueryProvider, view: &'a dyn CoordinateSpace) -> Self {
        Self { provider, view }
    }
}

/// Receives snapper output.
pub trait SnapListener {
    /// A new coordinate was reported, absolute and relative to the relative zero.
    fn coordinate_changed(&mut self, _abs: Point, _rel: Vec2) {}

    /// The overlay plan was replaced.
    fn overlay_changed(&mut self, _overlay: &[OverlayPrimitive]) {}
}

/// Per-session snap results.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SnapState {
    /// Last winning candidate before restriction.
    pub snap_spot: Option<Point>,
    /// Last reported coordinate after restriction.
    pub snap_coord: Option<Point>,
    /// Entity the on-entity strategy last snapped onto.
    pub key_entity: Option<EntityId>,
    /// Set once the session ends; no overlay is produced afterwards.
    pub finished: bool,
}

/// Running minimum over snap candidates.
struct Nearest {
    mouse: Point,
    best: Option<(Point, f64)>,
}

impl Nearest {
    fn new(mouse: Point) -> Self {
        Self { mouse, best: None }
    }

    /// Fold a candidate in, replacing the best only when strictly closer.
    fn offer(&mut self, strategy: &str, candidate: Option<Point>) {
        let Some(point) = candidate else {
            trace!("{strategy}: no candidate");
            return;
        };
        let d2 = self.mouse.distance_squared(point);
        trace!("{strategy}: candidate ({:.3}, {:.3}) at {:.3}", point.x, point.y, d2.sqrt());
        if self.best.is_none_or(|(_, best_d2)| d2 < best_d2) {
            self.best = Some((point, d2));
        }
    }

    fn distance(&self) -> Option<f64> {
        self.best.map(|(_, d2)| d2.sqrt())
    }

    fn point(&self) -> Option<Point> {
        self.best.map(|(p, _)| p)
    }
}

/// Snaps pointer events to drawing geometry.
pub struct Snapper {
    mode: SnapMode,
    state: SnapState,
    middle_points: usize,
    planner: OverlayPlanner,
    overlay: Vec<OverlayPrimitive>,
    catcher: EntityCatcher,
    listener: Option<Box<dyn SnapListener>>,
}

impl Snapper {
    /// Create a snapper configured from `settings`.
    pub fn new(settings: &SnapperSettings) -> Self {
        Self {
            mode: settings.initial_mode(),
            state: SnapState::default(),
            middle_points: settings.middle_points,
            planner: OverlayPlanner::new(settings.show_crosshairs),
            overlay: Vec::new(),
            catcher: EntityCatcher::new(),
            listener: None,
        }
    }

    /// Builder: attach a listener.
    pub fn with_listener(mut self, listener: Box<dyn SnapListener>) -> Self {
        self.listener = Some(listener);
        self
    }

    pub fn set_listener(&mut self, listener: Option<Box<dyn SnapListener>>) {
        self.listener = listener;
    }

    pub fn snap_mode(&self) -> &SnapMode {
        &self.mode
    }

    pub fn snap_mode_mut(&mut self) -> &mut SnapMode {
        &mut self.mode
    }

    pub fn set_snap_mode(&mut self, mode: SnapMode) {
        debug!("Snap mode set to {:#012b}", mode.to_bits());
        self.mode = mode;
    }

    pub fn state(&self) -> &SnapState {
        &self.state
    }

    pub fn key_entity(&self) -> Option<EntityId> {
        self.state.key_entity
    }

    /// Current overlay plan.
    pub fn overlay(&self) -> &[OverlayPrimitive] {
        &self.overlay
    }

    pub fn middle_points(&self) -> usize {
        self.middle_points
    }

    /// Snap a device-space pointer position.
    ///
    /// `None` is an invalid event: the spot is cleared and nothing is reported.
    pub fn snap_point(&mut self, event: Option<Point>, ctx: &SnapContext<'_>) -> Option<Point> {
        let Some(device) = event else {
            warn!("snap_point called without a valid event");
            self.state.snap_spot = None;
            return None;
        };
        let mouse = ctx.view.to_graph(device);
        let provider = ctx.provider;
        let mode = self.mode;

        let mut nearest = Nearest::new(mouse);
        if mode.endpoint {
            nearest.offer("endpoint", provider.nearest_endpoint(mouse, QUERY_LEVEL));
        }
        if mode.center {
            nearest.offer("center", provider.nearest_center(mouse, QUERY_LEVEL));
        }
        if mode.middle {
            nearest.offer(
                "middle",
                provider.nearest_middle(mouse, self.middle_points, QUERY_LEVEL),
            );
        }
        if mode.distance {
            nearest.offer(
                "distance",
                provider.nearest_dist(mode.distance_value, mouse, QUERY_LEVEL),
            );
        }
        if mode.intersection {
            nearest.offer("intersection", provider.nearest_intersection(mouse, QUERY_LEVEL));
        }

        if mode.on_entity && nearest.distance().is_none_or(|d| d > mode.distance_value) {
            let hit = provider.nearest_point_on_entity(mouse, true, QUERY_LEVEL);
            self.state.key_entity = hit.map(|(_, id)| id);
            nearest.offer("on_entity", hit.map(|(p, _)| p));
        }

        if mode.grid {
            nearest.offer("grid", ctx.view.snap_grid(mouse));
        }

        let mut spot = nearest.point().unwrap_or(mouse);

        if mode.free {
            if let Some(cell) = ctx.view.grid_cell() {
                let ds = spot - mouse;
                if ds.x.abs() > (cell.x * 0.5).abs() || ds.y.abs() > (cell.y * 0.5).abs() {
                    trace!("Snap beyond half a grid cell, keeping the free coordinate");
                    spot = mouse;
                }
            }
        }

        let coord = Self::restrict(mode.restriction, spot, mouse, ctx.view);
        self.state.snap_spot = Some(spot);
        self.state.snap_coord = Some(coord);
        self.notify_coordinate(coord, ctx.view);
        self.refresh_overlay(ctx.view);
        Some(coord)
    }

    /// Report the converted pointer position without running any strategy.
    pub fn snap_free(&mut self, event: Option<Point>, ctx: &SnapContext<'_>) -> Option<Point> {
        let Some(device) = event else {
            warn!("snap_free called without a valid event");
            self.state.snap_spot = None;
            return None;
        };
        let mouse = ctx.view.to_graph(device);
        self.state.snap_spot = Some(mouse);
        self.state.snap_coord = Some(mouse);
        self.notify_coordinate(mouse, ctx.view);
        self.refresh_overlay(ctx.view);
        Some(mouse)
    }

    /// Set the snap spot (and the reported coordinate when `update_final`) directly.
    pub fn set_point(
        &mut self,
        point: Option<Point>,
        update_final: bool,
        view: &dyn CoordinateSpace,
    ) -> Option<Point> {
        let p = point?;
        self.state.snap_spot = Some(p);
        if update_final {
            self.state.snap_coord = Some(p);
            self.notify_coordinate(p, view);
        }
        self.refresh_overlay(view);
        Some(p)
    }

    /// Drop the current spot and coordinate, hiding the feedback.
    pub fn suspend(&mut self) {
        self.state.snap_spot = None;
        self.state.snap_coord = None;
        self.clear_overlay();
    }

    /// End the session; no feedback is produced afterwards.
    pub fn finish(&mut self) {
        self.state.finished = true;
        self.clear_overlay();
    }

    /// Catch range: half a grid cell, or [`DEFAULT_SNAP_RANGE`] without a grid.
    pub fn snap_range(view: &dyn CoordinateSpace) -> f64 {
        view.grid_cell()
            .map(|cell| (cell * 0.5).hypot())
            .unwrap_or(DEFAULT_SNAP_RANGE)
    }

    /// Apply `restriction` to `coord`, relative to the view's relative zero.
    pub fn restrict(restriction: Restriction, coord: Point, mouse: Point, view: &dyn CoordinateSpace) -> Point {
        match restriction {
            Restriction::None => coord,
            Restriction::Horizontal => Self::restrict_horizontal(coord, view),
            Restriction::Vertical => Self::restrict_vertical(coord, view),
            Restriction::Orthogonal => Self::restrict_orthogonal(coord, mouse, view),
        }
    }

    /// Keep the x of `coord`, take the y of the relative zero.
    pub fn restrict_horizontal(coord: Point, view: &dyn CoordinateSpace) -> Point {
        Point::new(coord.x, view.relative_zero().y)
    }

    /// Keep the y of `coord`, take the x of the relative zero.
    pub fn restrict_vertical(coord: Point, view: &dyn CoordinateSpace) -> Point {
        Point::new(view.relative_zero().x, coord.y)
    }

    /// The vertical restriction if it lies strictly closer to `mouse`,
    /// otherwise the horizontal one.
    pub fn restrict_orthogonal(coord: Point, mouse: Point, view: &dyn CoordinateSpace) -> Point {
        let vertical = Self::restrict_vertical(coord, view);
        let horizontal = Self::restrict_horizontal(coord, view);
        if mouse.distance(vertical) < mouse.distance(horizontal) {
            vertical
        } else {
            horizontal
        }
    }

    /// Catch the nearest entity to a drawing coordinate within the snap range.
    pub fn catch_entity(&mut self, coord: Point, level: ResolveLevel, ctx: &SnapContext<'_>) -> Option<EntityId> {
        let range = Self::snap_range(ctx.view);
        self.catcher.catch(coord, None, level, range, ctx.provider)
    }

    /// Catch the nearest entity of `kind` within the snap range.
    pub fn catch_entity_of_kind(
        &mut self,
        coord: Point,
        kind: EntityKind,
        level: ResolveLevel,
        ctx: &SnapContext<'_>,
    ) -> Option<EntityId> {
        let range = Self::snap_range(ctx.view);
        self.catcher.catch(coord, Some(kind), level, range, ctx.provider)
    }

    /// Catch the nearest entity of any of `kinds` within the snap range.
    pub fn catch_entity_of_kinds(
        &mut self,
        coord: Point,
        kinds: &[EntityKind],
        level: ResolveLevel,
        ctx: &SnapContext<'_>,
    ) -> Option<EntityId> {
        let range = Self::snap_range(ctx.view);
        self.catcher.catch_kinds(coord, kinds, level, range, ctx.provider)
    }

    /// Catch at a device-space pointer position; an empty `kinds` catches any kind.
    pub fn catch_entity_at(
        &mut self,
        event: Option<Point>,
        kinds: &[EntityKind],
        level: ResolveLevel,
        ctx: &SnapContext<'_>,
    ) -> Option<EntityId> {
        let Some(device) = event else {
            warn!("catch_entity_at called without a valid event");
            return None;
        };
        let coord = ctx.view.to_graph(device);
        self.catch_entity_of_kinds(coord, kinds, level, ctx)
    }

    fn notify_coordinate(&mut self, abs: Point, view: &dyn CoordinateSpace) {
        if let Some(listener) = self.listener.as_mut() {
            listener.coordinate_changed(abs, abs - view.relative_zero());
        }
    }

    fn refresh_overlay(&mut self, view: &dyn CoordinateSpace) {
        self.overlay = self.planner.plan(&self.state, view);
        if let Some(listener) = self.listener.as_mut() {
            listener.overlay_changed(&self.overlay);
        }
    }

    fn clear_overlay(&mut self) {
        self.overlay.clear();
        if let Some(listener) = self.listener.as_mut() {
            listener.overlay_changed(&[]);
        }
    }
}
