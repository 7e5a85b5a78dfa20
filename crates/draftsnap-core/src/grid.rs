//! Drawing grid: spacing, isometric mode and grid-point snapping.

use kurbo::{Point, Vec2};
use serde::{Deserialize, Serialize};

/// Default grid spacing in drawing units.
pub const GRID_SIZE: f64 = 10.0;

/// Orientation of the crosshair drawn on an isometric grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CrosshairType {
    /// 30° axis plus vertical.
    Left,
    /// 30° and 150° axes.
    #[default]
    Top,
    /// 150° axis plus vertical.
    Right,
}

impl CrosshairType {
    /// Cycle to the next orientation.
    pub fn next(self) -> Self {
        match self {
            CrosshairType::Left => CrosshairType::Top,
            CrosshairType::Top => CrosshairType::Right,
            CrosshairType::Right => CrosshairType::Left,
        }
    }
}

/// Grid settings of a view.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Grid {
    /// Distance between grid lines (orthogonal) or along an isometric axis.
    pub spacing: f64,
    /// Whether the grid is isometric.
    pub isometric: bool,
    /// Crosshair orientation used in isometric mode.
    pub crosshair: CrosshairType,
}

impl Default for Grid {
    fn default() -> Self {
        Self {
            spacing: GRID_SIZE,
            isometric: false,
            crosshair: CrosshairType::default(),
        }
    }
}

impl Grid {
    /// Create an orthogonal grid.
    pub fn orthogonal(spacing: f64) -> Self {
        Self {
            spacing,
            ..Self::default()
        }
    }

    /// Create an isometric grid.
    pub fn isometric(spacing: f64, crosshair: CrosshairType) -> Self {
        Self {
            spacing,
            isometric: true,
            crosshair,
        }
    }

    /// Size of one grid cell.
    pub fn cell_vector(&self) -> Vec2 {
        if self.isometric {
            Vec2::new(self.spacing * 3f64.sqrt(), self.spacing)
        } else {
            Vec2::new(self.spacing, self.spacing)
        }
    }

    /// Nearest grid point to `coord`.
    pub fn snap(&self, coord: Point) -> Point {
        if self.isometric {
            self.snap_isometric(coord)
        } else {
            Point::new(
                (coord.x / self.spacing).round() * self.spacing,
                (coord.y / self.spacing).round() * self.spacing,
            )
        }
    }

    /// Isometric lattice: columns every `spacing·√3/2`, rows every
    /// `spacing/2`, with row parity matching column parity.
    fn snap_isometric(&self, coord: Point) -> Point {
        let dx = self.spacing * 3f64.sqrt() / 2.0;
        let dy = self.spacing / 2.0;
        let k0 = (coord.x / dx).round();
        let mut best = Point::new(k0 * dx, (coord.y / dy).round() * dy);
        let mut best_d2 = f64::MAX;
        for k in [k0 - 1.0, k0, k0 + 1.0] {
            let n = 2.0 * ((coord.y / dy - k) / 2.0).round() + k;
            let candidate = Point::new(k * dx, n * dy);
            let d2 = coord.distance_squared(candidate);
            if d2 < best_d2 {
                best_d2 = d2;
                best = candidate;
            }
        }
        best
    }
}
