//! DraftSnap Render Library
//!
//! Renderer abstraction for snap feedback. The bundled implementation turns
//! overlay primitives into stroked `kurbo` paths for any 2D backend.

mod path_impl;
mod renderer;

pub use path_impl::{DrawCommand, PathRenderer, DEFAULT_DASH_LENGTH};
pub use renderer::{OverlayRenderContext, OverlayRenderer, RenderResult, RendererError};
