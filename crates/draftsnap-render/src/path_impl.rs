//! Renderer that turns overlay primitives into stroked device-space paths.

use crate::renderer::{OverlayRenderContext, OverlayRenderer, RenderResult, RendererError};
use draftsnap_core::overlay::{OverlayPen, OverlayPrimitive};
use kurbo::{Affine, BezPath, Circle, Point, Shape as KurboShape, Stroke};
use log::debug;
use peniko::Color;

/// Default dash length in device pixels.
pub const DEFAULT_DASH_LENGTH: f64 = 4.0;

/// Flattening tolerance for circles.
const CIRCLE_TOLERANCE: f64 = 0.1;

/// A stroked path ready to hand to a 2D backend.
#[derive(Debug, Clone)]
pub struct DrawCommand {
    /// Path in physical device pixels.
    pub path: BezPath,
    pub stroke: Stroke,
    pub color: Color,
}

/// Collects overlay primitives as draw commands.
#[derive(Debug, Clone)]
pub struct PathRenderer {
    commands: Vec<DrawCommand>,
    dash_length: f64,
}

impl Default for PathRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl PathRenderer {
    pub fn new() -> Self {
        Self {
            commands: Vec::new(),
            dash_length: DEFAULT_DASH_LENGTH,
        }
    }

    /// Builder: set the dash length used for dashed pens.
    pub fn with_dash_length(mut self, dash_length: f64) -> Self {
        self.dash_length = dash_length;
        self
    }

    /// Draw commands from the last render.
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    fn stroke(&self, pen: &OverlayPen, scale_factor: f64) -> Stroke {
        let stroke = Stroke::new(pen.width * scale_factor);
        if pen.dashed {
            let dash = self.dash_length * scale_factor;
            stroke.with_dashes(0.0, [dash, dash])
        } else {
            stroke
        }
    }

    fn build_command(&self, primitive: &OverlayPrimitive, ctx: &OverlayRenderContext) -> RenderResult<DrawCommand> {
        let scale = Affine::scale(ctx.scale_factor);
        let path = match *primitive {
            OverlayPrimitive::Circle { center, radius, .. } => {
                if !is_finite(center) || !radius.is_finite() || radius < 0.0 {
                    return Err(RendererError::InvalidPrimitive(format!(
                        "circle at {center:?} with radius {radius}"
                    )));
                }
                let device_center = ctx.view.to_gui(center);
                let device_radius = radius * ctx.view.factor().x;
                Circle::new(device_center, device_radius).to_path(CIRCLE_TOLERANCE)
            }
            OverlayPrimitive::Line { from, to, .. } => {
                if !is_finite(from) || !is_finite(to) {
                    return Err(RendererError::InvalidPrimitive(format!(
                        "line from {from:?} to {to:?}"
                    )));
                }
                let mut path = BezPath::new();
                path.move_to(from);
                path.line_to(to);
                path
            }
        };
        let pen = primitive.pen();
        Ok(DrawCommand {
            path: scale * path,
            stroke: self.stroke(pen, ctx.scale_factor),
            color: pen.color,
        })
    }
}

impl OverlayRenderer for PathRenderer {
    fn render_overlay(&mut self, ctx: &OverlayRenderContext) -> RenderResult<()> {
        let commands = ctx
            .primitives
            .iter()
            .map(|p| self.build_command(p, ctx))
            .collect::<RenderResult<Vec<_>>>()?;
        debug!("Overlay rendered as {} draw commands", commands.len());
        self.commands = commands;
        Ok(())
    }

    fn clear(&mut self) {
        self.commands.clear();
    }
}

fn is_finite(p: Point) -> bool {
    p.x.is_finite() && p.y.is_finite()
}

#[cfg(test)]
mod tests {
    use super::*;
    use draftsnap_core::overlay::OverlayPlanner;
    use draftsnap_core::snap::SnapState;
    use draftsnap_core::view::{CoordinateSpace, View};
    use kurbo::{PathEl, Size};

    fn plan_for(view: &View, spot: Point, coord: Point) -> Vec<OverlayPrimitive> {
        let state = SnapState {
            snap_spot: Some(spot),
            snap_coord: Some(coord),
            ..SnapState::default()
        };
        OverlayPlanner::default().plan(&state, view)
    }

    #[test]
    fn test_renderer_creation() {
        let renderer = PathRenderer::new();
        assert!(renderer.commands().is_empty());
    }

    #[test]
    fn test_render_plan() {
        let mut view = View::new(Size::new(200.0, 100.0));
        view.camera.zoom = 2.0;
        let primitives = plan_for(&view, Point::new(5.0, -5.0), Point::new(5.0, -5.0));

        let mut renderer = PathRenderer::new();
        renderer
            .render_overlay(&OverlayRenderContext::new(&primitives, &view))
            .unwrap();
        let commands = renderer.commands();
        assert_eq!(commands.len(), 3);

        // Marker circle keeps a fixed device radius
        let bounds = commands[0].path.bounding_box();
        let center = view.to_gui(Point::new(5.0, -5.0));
        assert!((bounds.width() - 8.0).abs() < 0.2);
        assert!((bounds.center().x - center.x).abs() < 0.2);
        assert!(commands[0].stroke.dash_pattern.is_empty());

        // Crosshair lines are dashed device-space lines
        assert!(!commands[1].stroke.dash_pattern.is_empty());
        let elements: Vec<PathEl> = commands[1].path.elements().to_vec();
        assert_eq!(elements[0], PathEl::MoveTo(Point::new(0.0, center.y)));
        assert_eq!(elements[1], PathEl::LineTo(Point::new(200.0, center.y)));
    }

    #[test]
    fn test_scale_factor_applies_to_paths_and_strokes() {
        let view = View::new(Size::new(100.0, 100.0));
        let primitives = [OverlayPrimitive::Line {
            from: Point::new(1.0, 2.0),
            to: Point::new(3.0, 4.0),
            pen: OverlayPen::solid(),
        }];

        let mut renderer = PathRenderer::new();
        renderer
            .render_overlay(&OverlayRenderContext::new(&primitives, &view).with_scale_factor(2.0))
            .unwrap();
        let command = &renderer.commands()[0];
        assert!((command.stroke.width - 2.0).abs() < f64::EPSILON);
        assert_eq!(command.path.elements()[1], PathEl::LineTo(Point::new(6.0, 8.0)));
    }

    #[test]
    fn test_invalid_primitive() {
        let view = View::default();
        let primitives = [OverlayPrimitive::Line {
            from: Point::new(f64::NAN, 0.0),
            to: Point::ZERO,
            pen: OverlayPen::dashed(),
        }];
        let mut renderer = PathRenderer::new();
        let result = renderer.render_overlay(&OverlayRenderContext::new(&primitives, &view));
        assert!(matches!(result, Err(RendererError::InvalidPrimitive(_))));
    }

    #[test]
    fn test_clear() {
        let view = View::default();
        let primitives = plan_for(&view, Point::ZERO, Point::new(0.0, 1.0));
        let mut renderer = PathRenderer::new().with_dash_length(6.0);
        renderer
            .render_overlay(&OverlayRenderContext::new(&primitives, &view))
            .unwrap();
        assert_eq!(renderer.commands().len(), 7);
        assert_eq!(renderer.commands()[1].stroke.dash_pattern.as_slice(), &[6.0, 6.0]);

        renderer.clear();
        assert!(renderer.commands().is_empty());
    }
}
