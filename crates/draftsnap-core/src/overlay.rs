//! Transient snap feedback: marker circle, crosshair and offset ticks.

use crate::grid::CrosshairType;
use crate::snap::SnapState;
use crate::view::CoordinateSpace;
use kurbo::{Point, Vec2};
use peniko::Color;

/// Marker circle radius in device units.
pub const MARKER_RADIUS: f64 = 4.0;

/// Accent color of all snap feedback.
pub fn accent_color() -> Color {
    Color::from_rgba8(255, 194, 0, 255)
}

/// Coordinate space a primitive's geometry is expressed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoordSpace {
    /// Drawing units; the renderer maps through the view.
    Drawing,
    /// Device units, used as is.
    Device,
}

/// Stroke style of an overlay primitive.
#[derive(Debug, Clone, Copy)]
pub struct OverlayPen {
    pub color: Color,
    pub width: f64,
    pub dashed: bool,
}

impl OverlayPen {
    /// Solid accent pen.
    pub fn solid() -> Self {
        Self {
            color: accent_color(),
            width: 1.0,
            dashed: false,
        }
    }

    /// Dashed accent pen.
    pub fn dashed() -> Self {
        Self {
            dashed: true,
            ..Self::solid()
        }
    }
}

/// A single feedback primitive.
#[derive(Debug, Clone, Copy)]
pub enum OverlayPrimitive {
    /// Circle in drawing space.
    Circle {
        center: Point,
        radius: f64,
        pen: OverlayPen,
    },
    /// Line in device space.
    Line {
        from: Point,
        to: Point,
        pen: OverlayPen,
    },
}

impl OverlayPrimitive {
    pub fn space(&self) -> CoordSpace {
        match self {
            OverlayPrimitive::Circle { .. } => CoordSpace::Drawing,
            OverlayPrimitive::Line { .. } => CoordSpace::Device,
        }
    }

    pub fn pen(&self) -> &OverlayPen {
        match self {
            OverlayPrimitive::Circle { pen, .. } | OverlayPrimitive::Line { pen, .. } => pen,
        }
    }
}

/// Turns a snap state into overlay primitives.
#[derive(Debug, Clone, Copy)]
pub struct OverlayPlanner {
    pub show_crosshairs: bool,
    pub circle_pen: OverlayPen,
    pub crosshair_pen: OverlayPen,
}

impl Default for OverlayPlanner {
    fn default() -> Self {
        Self::new(true)
    }
}

impl OverlayPlanner {
    pub fn new(show_crosshairs: bool) -> Self {
        Self {
            show_crosshairs,
            circle_pen: OverlayPen::solid(),
            crosshair_pen: OverlayPen::dashed(),
        }
    }

    /// Plan the feedback for `state`.
    ///
    /// Each plan replaces the previous one entirely. A finished state or
    /// one without a snap spot yields nothing.
    pub fn plan(&self, state: &SnapState, view: &dyn CoordinateSpace) -> Vec<OverlayPrimitive> {
        let mut primitives = Vec::new();
        if state.finished {
            return primitives;
        }
        let Some(spot) = state.snap_spot else {
            return primitives;
        };
        let Some(coord) = state.snap_coord else {
            return primitives;
        };

        primitives.push(OverlayPrimitive::Circle {
            center: coord,
            radius: MARKER_RADIUS / view.factor().x,
            pen: self.circle_pen,
        });

        if self.show_crosshairs {
            let center = view.to_gui(coord);
            if view.is_grid_isometric() {
                self.isometric_crosshair(center, view, &mut primitives);
            } else {
                self.orthogonal_crosshair(center, view, &mut primitives);
            }
        }

        if coord != spot {
            self.restriction_ticks(view.to_gui(spot), &mut primitives);
        }
        primitives
    }

    fn line(&self, from: Point, to: Point) -> OverlayPrimitive {
        OverlayPrimitive::Line {
            from,
            to,
            pen: self.crosshair_pen,
        }
    }

    fn isometric_crosshair(&self, center: Point, view: &dyn CoordinateSpace, out: &mut Vec<OverlayPrimitive>) {
        let length = view.width() + view.height();
        let axis_30 = Vec2::from_angle(30f64.to_radians()) * length;
        let axis_150 = Vec2::from_angle(150f64.to_radians()) * length;
        let vertical = Vec2::new(0.0, 1.0) * length;
        let (d1, d2) = match view.crosshair_type() {
            CrosshairType::Right => (axis_150, vertical),
            CrosshairType::Left => (axis_30, vertical),
            CrosshairType::Top => (axis_30, axis_150),
        };
        out.push(self.line(center - d1, center + d1));
        out.push(self.line(center - d2, center + d2));
    }

    fn orthogonal_crosshair(&self, center: Point, view: &dyn CoordinateSpace, out: &mut Vec<OverlayPrimitive>) {
        out.push(self.line(Point::new(0.0, center.y), Point::new(view.width(), center.y)));
        out.push(self.line(Point::new(center.x, 0.0), Point::new(center.x, view.height())));
    }

    /// Four short ticks around the unrestricted spot.
    fn restriction_ticks(&self, spot: Point, out: &mut Vec<OverlayPrimitive>) {
        const TICKS: [((f64, f64), (f64, f64)); 4] = [
            ((-5.0, 0.0), (-1.0, 4.0)),
            ((0.0, 5.0), (4.0, 1.0)),
            ((5.0, 0.0), (1.0, -4.0)),
            ((0.0, -5.0), (-4.0, -1.0)),
        ];
        for ((x0, y0), (x1, y1)) in TICKS {
            out.push(self.line(spot + Vec2::new(x0, y0), spot + Vec2::new(x1, y1)));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Grid;
    use crate::view::View;
    use kurbo::Size;

    const EPS: f64 = 1e-9;

    fn state(spot: Point, coord: Point) -> SnapState {
        SnapState {
            snap_spot: Some(spot),
            snap_coord: Some(coord),
            ..SnapState::default()
        }
    }

    fn ortho_view() -> View {
        View::new(Size::new(200.0, 100.0)).with_grid(Some(Grid::orthogonal(10.0)))
    }

    fn line_endpoints(p: &OverlayPrimitive) -> (Point, Point) {
        match *p {
            OverlayPrimitive::Line { from, to, .. } => (from, to),
            OverlayPrimitive::Circle { .. } => panic!("expected a line"),
        }
    }

    #[test]
    fn test_no_spot_plans_nothing() {
        let planner = OverlayPlanner::default();
        assert!(planner.plan(&SnapState::default(), &ortho_view()).is_empty());
    }

    #[test]
    fn test_finished_plans_nothing() {
        let planner = OverlayPlanner::default();
        let mut s = state(Point::new(1.0, 1.0), Point::new(1.0, 1.0));
        s.finished = true;
        assert!(planner.plan(&s, &ortho_view()).is_empty());
    }

    #[test]
    fn test_circle_and_orthogonal_crosshair() {
        let mut view = ortho_view();
        view.camera.zoom = 2.0;
        let coord = Point::new(10.0, -20.0);
        let plan = OverlayPlanner::default().plan(&state(coord, coord), &view);
        assert_eq!(plan.len(), 3);

        match plan[0] {
            OverlayPrimitive::Circle { center, radius, pen } => {
                assert_eq!(center, coord);
                assert!((radius - 2.0).abs() < EPS);
                assert!(!pen.dashed);
            }
            OverlayPrimitive::Line { .. } => panic!("expected the marker circle first"),
        }
        assert_eq!(plan[0].space(), CoordSpace::Drawing);

        let gui = view.to_gui(coord);
        let (from, to) = line_endpoints(&plan[1]);
        assert_eq!(from, Point::new(0.0, gui.y));
        assert_eq!(to, Point::new(200.0, gui.y));
        let (from, to) = line_endpoints(&plan[2]);
        assert_eq!(from, Point::new(gui.x, 0.0));
        assert_eq!(to, Point::new(gui.x, 100.0));
        assert!(plan[1].pen().dashed);
        assert_eq!(plan[2].space(), CoordSpace::Device);
    }

    #[test]
    fn test_crosshair_can_be_hidden() {
        let coord = Point::new(3.0, 3.0);
        let plan = OverlayPlanner::new(false).plan(&state(coord, coord), &ortho_view());
        assert_eq!(plan.len(), 1);
    }

    #[test]
    fn test_isometric_top_crosshair() {
        let view = View::new(Size::new(300.0, 100.0)).with_grid(Some(Grid::isometric(10.0, CrosshairType::Top)));
        let coord = Point::ZERO;
        let plan = OverlayPlanner::default().plan(&state(coord, coord), &view);
        assert_eq!(plan.len(), 3);

        let c = view.to_gui(coord);
        let (from, to) = line_endpoints(&plan[1]);
        let half = to - c;
        assert!((half.hypot() - 400.0).abs() < EPS);
        assert!((half.atan2() - 30f64.to_radians()).abs() < EPS);
        assert!(((from - c) + half).hypot() < EPS);

        let (_, to) = line_endpoints(&plan[2]);
        assert!(((to - c).atan2() - 150f64.to_radians()).abs() < EPS);
    }

    #[test]
    fn test_isometric_left_and_right_use_vertical_axis() {
        for (crosshair, first_angle) in [(CrosshairType::Left, 30.0), (CrosshairType::Right, 150.0)] {
            let view = View::new(Size::new(100.0, 100.0)).with_grid(Some(Grid::isometric(10.0, crosshair)));
            let plan = OverlayPlanner::default().plan(&state(Point::ZERO, Point::ZERO), &view);
            let c = view.to_gui(Point::ZERO);
            let (_, to) = line_endpoints(&plan[1]);
            assert!(((to - c).atan2() - f64::to_radians(first_angle)).abs() < EPS);
            let (_, to) = line_endpoints(&plan[2]);
            assert!((to - c - Vec2::new(0.0, 200.0)).hypot() < EPS);
        }
    }

    #[test]
    fn test_ticks_when_restricted() {
        let view = ortho_view();
        let spot = Point::new(5.0, 5.0);
        let plan = OverlayPlanner::default().plan(&state(spot, Point::new(5.0, 0.0)), &view);
        assert_eq!(plan.len(), 7);

        let s = view.to_gui(spot);
        let (from, to) = line_endpoints(&plan[3]);
        assert_eq!(from, s + Vec2::new(-5.0, 0.0));
        assert_eq!(to, s + Vec2::new(-1.0, 4.0));
        let (from, to) = line_endpoints(&plan[6]);
        assert_eq!(from, s + Vec2::new(0.0, -5.0));
        assert_eq!(to, s + Vec2::new(-4.0, -1.0));
    }
}
