//! WebAssembly bindings
//!
//! [`WasmChart`] wraps a mounted [`RelationshipDiagram`] for a browser host.
//! The host forwards `window.resize` to [`WasmChart::resize`], pointer
//! events to `hover`/`click`, and reads the markup back with `svg()`.

use std::rc::Rc;
use std::str::FromStr;

use wasm_bindgen::prelude::*;

use crate::core::{
    Catalog, Category, DiagramProps, FixedContainer, InteractionLog, Interaction,
    RelationshipDiagram, Renderer, ResizeHub,
};
use crate::render::SvgRenderer;

/// Initialize WASM module
///
/// Sets up panic hooks and logging for better error messages in the browser.
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();

    use crate::core::logging::init_logging;
    let _ = init_logging(Some("info"), None);
}

fn js_error(error: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&error.to_string())
}

/// A wheel mounted into a browser-sized container
#[wasm_bindgen]
pub struct WasmChart {
    container: Rc<FixedContainer>,
    hub: ResizeHub,
    log: InteractionLog,
    diagram: RelationshipDiagram,
}

#[wasm_bindgen]
impl WasmChart {
    /// Parse the catalog JSON and draw it for `category`
    #[wasm_bindgen(constructor)]
    pub fn new(catalog_json: &str, category: &str, width: f64, height: f64) -> Result<WasmChart, JsValue> {
        let catalog = Catalog::from_json(catalog_json).map_err(js_error)?;
        let category = Category::from_str(category).map_err(js_error)?;
        let container = Rc::new(FixedContainer::new(width, height));
        let hub = ResizeHub::new();
        let log = InteractionLog::new();
        let diagram = RelationshipDiagram::mount(
            container.clone(),
            &hub,
            DiagramProps::new(Rc::new(catalog), category),
            log.clone(),
        );
        Ok(WasmChart {
            container,
            hub,
            log,
            diagram,
        })
    }

    /// Returns true if the change triggered a full redraw
    pub fn set_category(&mut self, category: &str) -> Result<bool, JsValue> {
        let category = Category::from_str(category).map_err(js_error)?;
        Ok(self.diagram.set_category(category))
    }

    /// Replace the catalog and redraw
    pub fn set_catalog(&mut self, catalog_json: &str) -> Result<bool, JsValue> {
        let catalog = Catalog::from_json(catalog_json).map_err(js_error)?;
        Ok(self.diagram.set_catalog(Rc::new(catalog)))
    }

    /// Select an item id, or clear with `undefined`
    pub fn set_selection(&mut self, selection: Option<String>) {
        self.diagram.set_selection(selection);
    }

    /// New container size, dispatched like a window resize event
    pub fn resize(&mut self, width: f64, height: f64) -> usize {
        self.container.set_size(width, height);
        self.hub.dispatch()
    }

    pub fn svg(&self) -> Result<String, JsValue> {
        match self.diagram.scene() {
            Some(scene) => SvgRenderer::new().render(&scene).map_err(js_error),
            None => Err(JsValue::from_str("chart has not been drawn")),
        }
    }

    pub fn hover(&mut self, id: &str) -> bool {
        self.diagram.hover(id)
    }

    pub fn click(&mut self, id: &str) -> bool {
        self.diagram.click(id)
    }

    /// Hover whatever label sits under the pointer
    pub fn pointer_move(&mut self, x: f64, y: f64) -> bool {
        self.diagram.pointer_move(x, y)
    }

    pub fn pointer_click(&mut self, x: f64, y: f64) -> bool {
        self.diagram.pointer_click(x, y)
    }

    pub fn redraw_count(&self) -> usize {
        self.diagram.redraw_count()
    }

    /// Interactions since the last call, as JSON `[{"kind","id"}]`
    pub fn take_interactions(&self) -> String {
        let events: Vec<serde_json::Value> = self
            .log
            .drain()
            .into_iter()
            .map(|event| match event {
                Interaction::Hover(id) => serde_json::json!({ "kind": "hover", "id": id }),
                Interaction::Click(id) => serde_json::json!({ "kind": "click", "id": id }),
            })
            .collect();
        serde_json::Value::Array(events).to_string()
    }
}
