//! Coordinate conversions and grid queries between the snapper and a view.

use crate::camera::Camera;
use crate::grid::{CrosshairType, Grid};
use kurbo::{Point, Size, Vec2};

/// Device/drawing conversions and grid information of a view.
pub trait CoordinateSpace {
    /// Device coordinate to drawing coordinate.
    fn to_graph(&self, device: Point) -> Point;

    /// Drawing coordinate to device coordinate.
    fn to_gui(&self, graph: Point) -> Point;

    /// Origin for relative coordinates and axis restrictions.
    fn relative_zero(&self) -> Point;

    /// Size of one grid cell in drawing units, `None` without a grid.
    fn grid_cell(&self) -> Option<Vec2>;

    /// Nearest grid point, `None` without a grid.
    fn snap_grid(&self, coord: Point) -> Option<Point>;

    /// Viewport width in device units.
    fn width(&self) -> f64;

    /// Viewport height in device units.
    fn height(&self) -> f64;

    fn is_grid_isometric(&self) -> bool;

    fn crosshair_type(&self) -> CrosshairType;

    /// Device units per drawing unit on each axis.
    fn factor(&self) -> Vec2;
}

/// A viewport onto the drawing.
#[derive(Debug, Clone)]
pub struct View {
    pub camera: Camera,
    /// Viewport size in device units.
    pub size: Size,
    pub relative_zero: Point,
    pub grid: Option<Grid>,
}

impl Default for View {
    fn default() -> Self {
        Self {
            camera: Camera::default(),
            size: Size::new(800.0, 600.0),
            relative_zero: Point::ZERO,
            grid: Some(Grid::default()),
        }
    }
}

impl View {
    /// Create a view of the given device size with the default grid.
    pub fn new(size: Size) -> Self {
        Self {
            size,
            ..Self::default()
        }
    }

    /// Builder: set the grid.
    pub fn with_grid(mut self, grid: Option<Grid>) -> Self {
        self.grid = grid;
        self
    }

    /// Builder: set the camera.
    pub fn with_camera(mut self, camera: Camera) -> Self {
        self.camera = camera;
        self
    }

    pub fn set_relative_zero(&mut self, point: Point) {
        self.relative_zero = point;
    }

    pub fn resize(&mut self, size: Size) {
        self.size = size;
    }
}

impl CoordinateSpace for View {
    fn to_graph(&self, device: Point) -> Point {
        self.camera.to_graph(device)
    }

    fn to_gui(&self, graph: Point) -> Point {
        self.camera.to_gui(graph)
    }

    fn relative_zero(&self) -> Point {
        self.relative_zero
    }

    fn grid_cell(&self) -> Option<Vec2> {
        self.grid.map(|g| g.cell_vector())
    }

    fn snap_grid(&self, coord: Point) -> Option<Point> {
        self.grid.map(|g| g.snap(coord))
    }

    fn width(&self) -> f64 {
        self.size.width
    }

    fn height(&self) -> f64 {
        self.size.height
    }

    fn is_grid_isometric(&self) -> bool {
        self.grid.is_some_and(|g| g.isometric)
    }

    fn crosshair_type(&self) -> CrosshairType {
        self.grid.map(|g| g.crosshair).unwrap_or_default()
    }

    fn factor(&self) -> Vec2 {
        self.camera.factor()
    }
}
