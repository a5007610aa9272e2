//! Core renderer trait for scene output
//!
//! Renderers turn a retained [`Scene`] into an output format (SVG markup,
//! a terminal preview, ...). They never change the scene.

use anyhow::Result;

use super::scene::Scene;

/// Core trait for scene renderers
///
/// # Example
/// ```
/// use scentwheel::prelude::*;
/// use scentwheel::render::SvgRenderer;
///
/// let catalog = Catalog::new();
/// let scene = Scene::build(&catalog, Category::Spring, Viewport::new(800.0, 600.0));
/// let svg = SvgRenderer::new().render(&scene).unwrap();
/// assert!(svg.starts_with("<svg"));
/// ```
pub trait Renderer: Send + Sync {
    /// The output type of this renderer
    type Output;

    /// Render the scene into the output format
    fn render(&self, scene: &Scene) -> Result<Self::Output>;

    /// Get the name of this renderer
    fn name(&self) -> &'static str;

    /// Get the version of this renderer
    fn version(&self) -> &'static str;

    /// Get the supported output format
    fn format(&self) -> &'static str;
}
