//! Ordered multi-subscriber observer lists
//!
//! A [`Delegate`] is confined to the thread that created it; handlers are
//! invoked in registration order and cannot cancel one another.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// Handle returned by [`Delegate::subscribe`], used to unsubscribe later
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Handler<A> = Rc<dyn Fn(&A)>;

pub struct Delegate<A> {
    next_id: Cell<u64>,
    handlers: RefCell<Vec<(SubscriptionId, Handler<A>)>>,
}

impl<A> Default for Delegate<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A> Delegate<A> {
    pub fn new() -> Self {
        Self {
            next_id: Cell::new(0),
            handlers: RefCell::new(Vec::new()),
        }
    }

    pub fn subscribe<F>(&self, handler: F) -> SubscriptionId
    where
        F: Fn(&A) + 'static,
    {
        let id = SubscriptionId(self.next_id.get());
        self.next_id.set(self.next_id.get() + 1);
        self.handlers.borrow_mut().push((id, Rc::new(handler)));
        id
    }

    /// Returns `false` if `id` was not subscribed (or already removed)
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut handlers = self.handlers.borrow_mut();
        let before = handlers.len();
        handlers.retain(|(sid, _)| *sid != id);
        handlers.len() != before
    }

    /// Invoke every subscriber in registration order.
    ///
    /// The subscriber list is snapshotted first, so handlers may subscribe or
    /// unsubscribe while being called; such changes take effect on the next emit.
    pub fn emit(&self, args: &A) {
        let snapshot: Vec<Handler<A>> = self
            .handlers
            .borrow()
            .iter()
            .map(|(_, h)| Rc::clone(h))
            .collect();
        for handler in snapshot {
            handler(args);
        }
    }

    pub fn len(&self) -> usize {
        self.handlers.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.borrow().is_empty()
    }

    pub fn clear(&self) {
        self.handlers.borrow_mut().clear();
    }
}
