//! The relationship wheel component
//!
//! [`RelationshipDiagram`] owns the retained [`Scene`] for one container and
//! decides how much work each input change costs:
//!
//! - catalog, category or container size changes run a full redraw
//!   (measure, lay out, filter, bundle, rebuild every primitive);
//! - selection changes only patch the emphasis flags of the drawn curves.
//!
//! The component subscribes to a [`ResizeHub`] when mounted and releases the
//! subscription when unmounted or dropped.

use std::cell::{Cell, Ref, RefCell};
use std::rc::{Rc, Weak};
use tracing::{debug, info, span, trace, Level};

use super::listener::InteractionListener;
use super::resize::{ResizeHub, ResizeSubscription};
use super::scene::Scene;
use super::viewport::Viewport;
use super::{Catalog, Category};

/// Something with a measurable pixel size that hosts the wheel
pub trait Container {
    /// Current size, or `None` while not attached
    fn measure(&self) -> Option<Viewport>;
}

/// Container whose size is set by the host
#[derive(Debug, Default)]
pub struct FixedContainer {
    size: Cell<Option<Viewport>>,
}

impl FixedContainer {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            size: Cell::new(Some(Viewport::new(width, height))),
        }
    }

    /// A container that is not attached yet
    pub fn detached() -> Self {
        Self::default()
    }

    pub fn set_size(&self, width: f64, height: f64) {
        self.size.set(Some(Viewport::new(width, height)));
    }

    pub fn detach(&self) {
        self.size.set(None);
    }
}

impl Container for FixedContainer {
    fn measure(&self) -> Option<Viewport> {
        self.size.get()
    }
}

/// Inputs owned by the parent
#[derive(Debug, Clone)]
pub struct DiagramProps {
    pub catalog: Rc<Catalog>,
    pub category: Category,
    pub selection: Option<String>,
}

impl DiagramProps {
    pub fn new(catalog: Rc<Catalog>, category: Category) -> Self {
        Self {
            catalog,
            category,
            selection: None,
        }
    }

    pub fn with_selection(mut self, selection: impl Into<String>) -> Self {
        self.selection = Some(selection.into());
        self
    }
}

struct DiagramState {
    container: Rc<dyn Container>,
    props: DiagramProps,
    scene: Option<Scene>,
    redraws: usize,
}

impl DiagramState {
    /// Full redraw; a no-op when the container cannot be measured
    fn redraw(&mut self) -> bool {
        let redraw_span = span!(
            Level::DEBUG,
            "redraw",
            category = %self.props.category,
            pass = self.redraws + 1
        );
        let _enter = redraw_span.enter();

        let viewport = match self.container.measure() {
            Some(viewport) if viewport.is_measurable() => viewport,
            other => {
                debug!(?other, "Container not measurable, skipping redraw");
                return false;
            }
        };

        let mut scene = Scene::build(&self.props.catalog, self.props.category, viewport);
        scene.apply_selection(self.props.selection.as_deref());
        self.scene = Some(scene);
        self.redraws += 1;
        true
    }

    /// Emphasis-only update of the retained curves
    fn patch(&mut self) {
        let selection = self.props.selection.as_deref();
        match self.scene.as_mut() {
            Some(scene) => {
                let emphasized = scene.apply_selection(selection);
                debug!(?selection, emphasized, "Patched selection");
            }
            None => trace!("No scene to patch"),
        }
    }

    /// Returns true if `id` is an active label of the current scene
    fn interactive(&self, id: &str) -> bool {
        self.scene
            .as_ref()
            .and_then(|scene| scene.label(id))
            .is_some_and(|label| label.active)
    }
}

/// Radial relationship diagram bound to one container
pub struct RelationshipDiagram {
    state: Rc<RefCell<DiagramState>>,
    listener: Box<dyn InteractionListener>,
    subscription: Option<ResizeSubscription>,
}

impl RelationshipDiagram {
    /// Mount into `container`: draw once and start listening for resizes
    ///
    /// ```rust
    /// use std::rc::Rc;
    /// use scentwheel::prelude::*;
    ///
    /// let catalog = Rc::new(Catalog::from_parts(
    ///     vec![Item::new("Rose", "Rose", Category::Spring)],
    ///     vec![],
    /// ).unwrap());
    /// let container = Rc::new(FixedContainer::new(1024.0, 768.0));
    /// let hub = ResizeHub::new();
    ///
    /// let diagram = RelationshipDiagram::mount(
    ///     container,
    ///     &hub,
    ///     DiagramProps::new(catalog, Category::Spring),
    ///     NoopListener,
    /// );
    /// assert_eq!(diagram.redraw_count(), 1);
    /// assert_eq!(hub.listener_count(), 1);
    ///
    /// diagram.unmount();
    /// assert_eq!(hub.listener_count(), 0);
    /// ```
    pub fn mount(
        container: Rc<dyn Container>,
        hub: &ResizeHub,
        props: DiagramProps,
        listener: impl InteractionListener + 'static,
    ) -> Self {
        let state = Rc::new(RefCell::new(DiagramState {
            container,
            props,
            scene: None,
            redraws: 0,
        }));
        state.borrow_mut().redraw();

        let weak: Weak<RefCell<DiagramState>> = Rc::downgrade(&state);
        let subscription = hub.subscribe(move || {
            if let Some(state) = weak.upgrade() {
                trace!("Resize event received");
                state.borrow_mut().redraw();
            }
        });

        info!(
            category = %state.borrow().props.category,
            drawn = state.borrow().scene.is_some(),
            "Diagram mounted"
        );

        Self {
            state,
            listener: Box::new(listener),
            subscription: Some(subscription),
        }
    }

    /// Stop listening for resizes and drop the retained scene
    pub fn unmount(mut self) {
        self.release();
    }

    fn release(&mut self) {
        if self.subscription.take().is_some() {
            self.state.borrow_mut().scene = None;
            info!("Diagram unmounted");
        }
    }

    pub fn is_mounted(&self) -> bool {
        self.subscription.is_some()
    }

    /// Replace the catalog; redraws unless it is the same catalog
    pub fn set_catalog(&mut self, catalog: Rc<Catalog>) -> bool {
        let mut state = self.state.borrow_mut();
        if Rc::ptr_eq(&state.props.catalog, &catalog) {
            return false;
        }
        state.props.catalog = catalog;
        state.redraw()
    }

    /// Change the active category; redraws unless unchanged
    pub fn set_category(&mut self, category: Category) -> bool {
        let mut state = self.state.borrow_mut();
        if state.props.category == category {
            return false;
        }
        state.props.category = category;
        state.redraw()
    }

    /// Change the selection; patches emphasis, never redraws
    pub fn set_selection(&mut self, selection: Option<String>) {
        let mut state = self.state.borrow_mut();
        if state.props.selection == selection {
            return;
        }
        state.props.selection = selection;
        state.patch();
    }

    /// Force a full redraw
    pub fn redraw(&mut self) -> bool {
        self.state.borrow_mut().redraw()
    }

    /// Number of completed full redraws since mount
    pub fn redraw_count(&self) -> usize {
        self.state.borrow().redraws
    }

    pub fn category(&self) -> Category {
        self.state.borrow().props.category
    }

    pub fn selection(&self) -> Option<String> {
        self.state.borrow().props.selection.clone()
    }

    /// The retained scene of the last full redraw
    pub fn scene(&self) -> Option<Ref<'_, Scene>> {
        Ref::filter_map(self.state.borrow(), |state| state.scene.as_ref()).ok()
    }

    /// Report a hover over item `id`; ignored unless the item is active
    pub fn hover(&mut self, id: &str) -> bool {
        if !self.state.borrow().interactive(id) {
            trace!(item_id = id, "Hover ignored");
            return false;
        }
        self.listener.on_item_hover(id);
        true
    }

    /// Report a click on item `id`; ignored unless the item is active
    pub fn click(&mut self, id: &str) -> bool {
        if !self.state.borrow().interactive(id) {
            trace!(item_id = id, "Click ignored");
            return false;
        }
        self.listener.on_item_click(id);
        true
    }

    /// Item label under a container pixel position
    pub fn item_at(&self, x: f64, y: f64) -> Option<String> {
        self.scene()
            .and_then(|scene| scene.hit_test(x, y).map(|label| label.id.clone()))
    }

    /// Pointer moved to `(x, y)`; hovers the label under it
    pub fn pointer_move(&mut self, x: f64, y: f64) -> bool {
        match self.item_at(x, y) {
            Some(id) => self.hover(&id),
            None => false,
        }
    }

    /// Pointer clicked at `(x, y)`; clicks the label under it
    pub fn pointer_click(&mut self, x: f64, y: f64) -> bool {
        match self.item_at(x, y) {
            Some(id) => self.click(&id),
            None => false,
        }
    }
}

impl Drop for RelationshipDiagram {
    fn drop(&mut self) {
        self.release();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::listener::{Interaction, InteractionLog, NoopListener};
    use crate::core::{Item, Relation};

    fn catalog() -> Rc<Catalog> {
        Rc::new(
            Catalog::from_parts(
                vec![
                    Item::new("Rose", "Rose", Category::Spring),
                    Item::new("Neroli", "Neroli", Category::Spring),
                    Item::new("Oud", "Oud", Category::Winter),
                ],
                vec![
                    Relation::new("Rose", "Neroli", Category::Spring),
                    Relation::new("Rose", "Oud", Category::Winter),
                ],
            )
            .unwrap(),
        )
    }

    fn mount(container: Rc<FixedContainer>, hub: &ResizeHub) -> RelationshipDiagram {
        RelationshipDiagram::mount(
            container,
            hub,
            DiagramProps::new(catalog(), Category::Spring),
            NoopListener,
        )
    }

    #[test]
    fn test_mount_draws_once() {
        let hub = ResizeHub::new();
        let diagram = mount(Rc::new(FixedContainer::new(1024.0, 768.0)), &hub);
        assert_eq!(diagram.redraw_count(), 1);
        assert_eq!(diagram.scene().unwrap().curves().len(), 1);
        assert!(diagram.is_mounted());
    }

    #[test]
    fn test_detached_container_is_noop() {
        let hub = ResizeHub::new();
        let container = Rc::new(FixedContainer::detached());
        let diagram = mount(container.clone(), &hub);
        assert_eq!(diagram.redraw_count(), 0);
        assert!(diagram.scene().is_none());

        container.set_size(800.0, 600.0);
        hub.dispatch();
        assert_eq!(diagram.redraw_count(), 1);
    }

    #[test]
    fn test_zero_size_keeps_previous_scene() {
        let hub = ResizeHub::new();
        let container = Rc::new(FixedContainer::new(800.0, 600.0));
        let diagram = mount(container.clone(), &hub);
        container.set_size(0.0, 0.0);
        hub.dispatch();
        assert_eq!(diagram.redraw_count(), 1);
        assert!(diagram.scene().is_some());
    }

    #[test]
    fn test_unchanged_inputs_do_not_redraw() {
        let hub = ResizeHub::new();
        let mut diagram = mount(Rc::new(FixedContainer::new(1024.0, 768.0)), &hub);
        assert!(!diagram.set_category(Category::Spring));
        assert_eq!(diagram.redraw_count(), 1);
        assert!(diagram.set_category(Category::Winter));
        assert_eq!(diagram.redraw_count(), 2);
    }

    #[test]
    fn test_selection_patch_does_not_redraw() {
        let hub = ResizeHub::new();
        let mut diagram = mount(Rc::new(FixedContainer::new(1024.0, 768.0)), &hub);
        diagram.set_selection(Some("Rose".into()));
        assert_eq!(diagram.redraw_count(), 1);
        assert_eq!(diagram.scene().unwrap().emphasized().count(), 1);
        diagram.set_selection(None);
        assert_eq!(diagram.scene().unwrap().emphasized().count(), 0);
    }

    #[test]
    fn test_selection_survives_full_redraw() {
        let hub = ResizeHub::new();
        let mut diagram = mount(Rc::new(FixedContainer::new(1024.0, 768.0)), &hub);
        diagram.set_selection(Some("Rose".into()));
        diagram.set_category(Category::Winter);
        let scene = diagram.scene().unwrap();
        assert_eq!(scene.curves().len(), 1);
        assert!(scene.curves()[0].emphasized);
    }

    #[test]
    fn test_events_only_for_active_items() {
        let hub = ResizeHub::new();
        let log = InteractionLog::new();
        let mut diagram = RelationshipDiagram::mount(
            Rc::new(FixedContainer::new(1024.0, 768.0)),
            &hub,
            DiagramProps::new(catalog(), Category::Spring),
            log.clone(),
        );

        assert!(diagram.hover("Rose"));
        assert!(diagram.click("Neroli"));
        assert!(!diagram.hover("Oud"));
        assert!(!diagram.click("Oud"));
        assert!(!diagram.click("Unknown"));

        assert_eq!(
            log.events(),
            vec![
                Interaction::Hover("Rose".into()),
                Interaction::Click("Neroli".into())
            ]
        );
    }

    #[test]
    fn test_drop_releases_listener() {
        let hub = ResizeHub::new();
        let diagram = mount(Rc::new(FixedContainer::new(1024.0, 768.0)), &hub);
        assert_eq!(hub.listener_count(), 1);
        drop(diagram);
        assert_eq!(hub.listener_count(), 0);
    }
}
