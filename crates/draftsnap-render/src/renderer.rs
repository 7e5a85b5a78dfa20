//! Renderer trait abstraction for snap feedback.

use draftsnap_core::overlay::OverlayPrimitive;
use draftsnap_core::view::CoordinateSpace;
use thiserror::Error;

/// Renderer errors.
#[derive(Debug, Error)]
pub enum RendererError {
    #[error("Invalid primitive: {0}")]
    InvalidPrimitive(String),
    #[error("Render failed: {0}")]
    RenderFailed(String),
}

/// Result type for renderer operations.
pub type RenderResult<T> = Result<T, RendererError>;

/// Context for rendering one overlay plan.
pub struct OverlayRenderContext<'a> {
    /// Primitives to draw, in order.
    pub primitives: &'a [OverlayPrimitive],
    /// View used to map drawing-space primitives to device space.
    pub view: &'a dyn CoordinateSpace,
    /// Device pixel ratio (for HiDPI).
    pub scale_factor: f64,
}

impl<'a> OverlayRenderContext<'a> {
    /// Create a new render context.
    pub fn new(primitives: &'a [OverlayPrimitive], view: &'a dyn CoordinateSpace) -> Self {
        Self {
            primitives,
            view,
            scale_factor: 1.0,
        }
    }

    /// Set the scale factor for HiDPI.
    pub fn with_scale_factor(mut self, scale_factor: f64) -> Self {
        self.scale_factor = scale_factor;
        self
    }
}

/// Trait for overlay rendering backends.
///
/// Each call replaces whatever the previous call drew.
pub trait OverlayRenderer: Send + Sync {
    /// Render the overlay primitives of `ctx`.
    fn render_overlay(&mut self, ctx: &OverlayRenderContext) -> RenderResult<()>;

    /// Remove all feedback.
    fn clear(&mut self);
}
