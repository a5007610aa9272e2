//! Callbacks the wheel invokes on its host

use std::cell::RefCell;
use std::rc::Rc;

/// Capability the host hands to the diagram to learn about pointer activity
///
/// Only items of the active category are ever reported.
pub trait InteractionListener {
    /// The pointer entered an item label
    fn on_item_hover(&mut self, id: &str);

    /// An item label was clicked
    fn on_item_click(&mut self, id: &str);
}

/// A reported pointer interaction
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Interaction {
    Hover(String),
    Click(String),
}

/// Listener that ignores everything
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopListener;

impl InteractionListener for NoopListener {
    fn on_item_hover(&mut self, _id: &str) {}

    fn on_item_click(&mut self, _id: &str) {}
}

/// Listener that appends every interaction to a shared log
///
/// Clones share the same log, so the host keeps one handle and gives the
/// other to the diagram.
#[derive(Debug, Default, Clone)]
pub struct InteractionLog {
    events: Rc<RefCell<Vec<Interaction>>>,
}

impl InteractionLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the recorded interactions
    pub fn events(&self) -> Vec<Interaction> {
        self.events.borrow().clone()
    }

    /// Remove and return the recorded interactions
    pub fn drain(&self) -> Vec<Interaction> {
        std::mem::take(&mut *self.events.borrow_mut())
    }

    pub fn len(&self) -> usize {
        self.events.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.borrow().is_empty()
    }
}

impl InteractionListener for InteractionLog {
    fn on_item_hover(&mut self, id: &str) {
        self.events
            .borrow_mut()
            .push(Interaction::Hover(id.to_string()));
    }

    fn on_item_click(&mut self, id: &str) {
        self.events
            .borrow_mut()
            .push(Interaction::Click(id.to_string()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_clones_share_events() {
        let log = InteractionLog::new();
        let mut handle = log.clone();
        handle.on_item_hover("Rose");
        handle.on_item_click("Oud");
        assert_eq!(
            log.events(),
            vec![
                Interaction::Hover("Rose".into()),
                Interaction::Click("Oud".into())
            ]
        );
        assert_eq!(log.drain().len(), 2);
        assert!(log.is_empty());
    }
}
