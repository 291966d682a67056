//! UUID keyed registry of live panes
//!
//! Drop targets resolve the dragged pane through the registry instead of
//! walking the widget tree.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::{Rc, Weak};

use uuid::Uuid;

pub struct PaneRegistry<P> {
    panes: RefCell<HashMap<Uuid, Weak<P>>>,
}

impl<P> Default for PaneRegistry<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P> PaneRegistry<P> {
    pub fn new() -> Self {
        Self { panes: RefCell::new(HashMap::new()) }
    }

    pub fn register(&self, id: Uuid, pane: &Rc<P>) {
        self.panes.borrow_mut().insert(id, Rc::downgrade(pane));
    }

    pub fn unregister(&self, id: &Uuid) -> bool {
        self.panes.borrow_mut().remove(id).is_some()
    }

    /// Look a pane up; entries whose pane is gone are pruned.
    pub fn lookup(&self, id: &Uuid) -> Option<Rc<P>> {
        let found = self.panes.borrow().get(id).and_then(Weak::upgrade);
        if found.is_none() {
            self.panes.borrow_mut().remove(id);
        }
        found
    }

    pub fn ids(&self) -> Vec<Uuid> {
        self.prune();
        self.panes.borrow().keys().copied().collect()
    }

    pub fn panes(&self) -> Vec<Rc<P>> {
        self.panes.borrow().values().filter_map(Weak::upgrade).collect()
    }

    pub fn len(&self) -> usize {
        self.prune();
        self.panes.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn prune(&self) {
        self.panes.borrow_mut().retain(|_, w| w.strong_count() > 0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_and_lookup() {
        let registry: PaneRegistry<String> = PaneRegistry::new();
        let id = Uuid::new_v4();
        let pane = Rc::new("pane".to_string());
        registry.register(id, &pane);
        assert_eq!(registry.lookup(&id).as_deref(), Some(&"pane".to_string()));
        assert!(registry.unregister(&id));
        assert!(registry.lookup(&id).is_none());
    }

    #[test]
    fn test_dropped_panes_are_pruned() {
        let registry: PaneRegistry<u32> = PaneRegistry::new();
        let id = Uuid::new_v4();
        {
            let pane = Rc::new(1);
            registry.register(id, &pane);
            assert_eq!(registry.len(), 1);
        }
        assert!(registry.lookup(&id).is_none());
        assert!(registry.is_empty());
    }
}
