//! DraftSnap Core Library
//!
//! Snapping of pointer positions to 2D drafting geometry: snap strategies,
//! axis restrictions, entity catching and snap feedback planning.

pub mod camera;
pub mod config;
pub mod grid;
pub mod overlay;
pub mod query;
pub mod scene;
pub mod shapes;
pub mod snap;
pub mod view;

pub use camera::Camera;
pub use config::{SettingsError, SettingsFile, SettingsResult, SnapperSettings};
pub use grid::{CrosshairType, Grid, GRID_SIZE};
pub use overlay::{CoordSpace, OverlayPen, OverlayPlanner, OverlayPrimitive};
pub use query::{GeometricQueryProvider, ResolveLevel};
pub use scene::Scene;
pub use shapes::{Entity, EntityId, EntityKind, Shape, SnapGeometry};
pub use snap::{
    CatchSet, EntityCatcher, Restriction, SnapContext, SnapListener, SnapMode, SnapState, Snapper,
    DEFAULT_SNAP_RANGE,
};
pub use view::{CoordinateSpace, View};
