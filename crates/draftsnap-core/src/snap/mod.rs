//! Snap modes, the snapping engine and entity catching.

pub mod catcher;
pub mod codec;
pub mod engine;

pub use catcher::{CatchSet, EntityCatcher};
pub use engine::{SnapContext, SnapListener, SnapState, Snapper, DEFAULT_SNAP_RANGE};

use serde::{Deserialize, Serialize};

/// Default distance for the distance strategy and the on-entity threshold.
pub const DEFAULT_SNAP_DISTANCE: f64 = 1.0;

/// Axis restriction applied after a snap point is found.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Restriction {
    #[default]
    None,
    /// Keep the snapped x, use the y of the relative zero.
    Horizontal,
    /// Keep the snapped y, use the x of the relative zero.
    Vertical,
    /// Whichever of horizontal and vertical lies closer to the pointer.
    Orthogonal,
}

impl Restriction {
    /// Cycle to the next restriction.
    pub fn next(self) -> Self {
        match self {
            Restriction::None => Restriction::Horizontal,
            Restriction::Horizontal => Restriction::Vertical,
            Restriction::Vertical => Restriction::Orthogonal,
            Restriction::Orthogonal => Restriction::None,
        }
    }
}

/// Which snap strategies are enabled, plus the axis restriction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SnapMode {
    /// Retreat to the raw pointer when the snap lands more than half a grid cell away.
    pub free: bool,
    pub grid: bool,
    pub endpoint: bool,
    pub middle: bool,
    pub distance: bool,
    pub center: bool,
    pub on_entity: bool,
    pub intersection: bool,
    pub restriction: Restriction,
    /// Distance along entities for the distance strategy, also the
    /// threshold beyond which the on-entity strategy is tried.
    #[serde(rename = "snap_distance")]
    pub distance_value: f64,
}

impl Default for SnapMode {
    fn default() -> Self {
        Self {
            free: false,
            grid: false,
            endpoint: false,
            middle: false,
            distance: false,
            center: false,
            on_entity: false,
            intersection: false,
            restriction: Restriction::None,
            distance_value: DEFAULT_SNAP_DISTANCE,
        }
    }
}

impl SnapMode {
    /// Turn off every strategy and the restriction.
    pub fn clear(&mut self) -> &mut Self {
        let distance_value = self.distance_value;
        *self = Self {
            distance_value,
            ..Self::default()
        };
        self
    }

    /// Check if no strategy other than `free` is enabled.
    pub fn is_free_only(&self) -> bool {
        !(self.grid
            || self.endpoint
            || self.middle
            || self.distance
            || self.center
            || self.on_entity
            || self.intersection)
    }

    /// Check if any strategy that queries entities is enabled.
    pub fn snaps_to_entities(&self) -> bool {
        self.endpoint || self.middle || self.distance || self.center || self.on_entity || self.intersection
    }
}
