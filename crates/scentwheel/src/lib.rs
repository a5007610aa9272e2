//! Scentwheel - radial relationship wheels for perfume notes
//!
//! Items are grouped by category (SP, SU, AU, WI) around a circle and the
//! relations of the active category are drawn as bundled curves through the
//! category hierarchy.
//!
//! # Quick Start
//!
//! ```rust
//! let json = r#"{
//!     "items": [
//!         { "id": "Rose", "name": "Rose Absolute", "category": "SP" },
//!         { "id": "Oud", "name": "Agarwood", "category": "WI" }
//!     ],
//!     "relations": [
//!         { "ids": ["Rose", "Oud"], "category": "SP" }
//!     ]
//! }"#;
//!
//! let svg = scentwheel::render_svg(json, "SP", 1200.0, 900.0, Some("Rose")).unwrap();
//! assert!(svg.contains(r#"class="link active""#));
//! ```
//!
//! # Interactive Usage
//!
//! ```rust
//! use std::rc::Rc;
//! use scentwheel::prelude::*;
//!
//! let catalog = Rc::new(Catalog::from_parts(
//!     vec![
//!         Item::new("Rose", "Rose", Category::Spring),
//!         Item::new("Oud", "Oud", Category::Winter),
//!     ],
//!     vec![Relation::new("Rose", "Oud", Category::Spring)],
//! ).unwrap());
//!
//! let container = Rc::new(FixedContainer::new(1200.0, 900.0));
//! let hub = ResizeHub::new();
//! let log = InteractionLog::new();
//! let mut diagram = RelationshipDiagram::mount(
//!     container.clone(),
//!     &hub,
//!     DiagramProps::new(catalog, Category::Spring),
//!     log.clone(),
//! );
//!
//! // only items of the active category report interactions
//! assert!(diagram.click("Rose"));
//! assert!(!diagram.click("Oud"));
//! assert_eq!(log.len(), 1);
//!
//! // selection changes patch the existing curves
//! diagram.set_selection(Some("Oud".to_string()));
//! assert_eq!(diagram.redraw_count(), 1);
//!
//! // resizes redraw
//! container.set_size(600.0, 600.0);
//! hub.dispatch();
//! assert_eq!(diagram.redraw_count(), 2);
//! ```

pub mod core;
pub mod render;

#[cfg(target_arch = "wasm32")]
pub mod wasm;

pub use crate::core::*;

use anyhow::Result;
use std::str::FromStr;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::core::{
        Catalog, Category, Container, Database, DiagramProps, FixedContainer, InteractionListener,
        InteractionLog, Item, LayoutAlgorithm, NoopListener, RadialClusterLayout, Relation,
        RelationshipDiagram, Renderer, ResizeHub, ResizeSubscription, Scene, Viewport,
    };
    pub use crate::render::{AsciiRenderer, SvgRenderer};
}

/// Parse a catalog and build the scene for one category and container size
///
/// `category` is a symbol (`SP`, `SU`, `AU`, `WI`). The selection, when
/// given, is applied as emphasis.
pub fn build_scene(
    catalog_json: &str,
    category: &str,
    width: f64,
    height: f64,
    selection: Option<&str>,
) -> Result<Scene> {
    let catalog = Catalog::from_json(catalog_json)?;
    let category = Category::from_str(category)?;
    let viewport = Viewport::new(width, height);
    if !viewport.is_measurable() {
        return Err(DiagramError::layout_error(format!(
            "container size {}x{} cannot be measured",
            width, height
        ))
        .into());
    }
    let mut scene = Scene::build(&catalog, category, viewport);
    scene.apply_selection(selection);
    Ok(scene)
}

/// Render a catalog as SVG markup
///
/// # Example
/// ```rust
/// let json = r#"{ "items": [], "relations": [] }"#;
/// let svg = scentwheel::render_svg(json, "AU", 800.0, 600.0, None).unwrap();
/// assert!(svg.starts_with("<svg"));
/// ```
pub fn render_svg(
    catalog_json: &str,
    category: &str,
    width: f64,
    height: f64,
    selection: Option<&str>,
) -> Result<String> {
    let scene = build_scene(catalog_json, category, width, height, selection)?;
    render::SvgRenderer::new().render(&scene)
}

/// Render a catalog as a plain-text terminal preview
pub fn render_ascii(
    catalog_json: &str,
    category: &str,
    width: f64,
    height: f64,
    selection: Option<&str>,
) -> Result<String> {
    let scene = build_scene(catalog_json, category, width, height, selection)?;
    Ok(render::AsciiRenderer::new().render(&scene)?.to_string())
}
