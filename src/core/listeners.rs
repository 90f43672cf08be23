//! Per-property listener dispatch.
//!
//! Callback order: FIFO (first-registered, first-called) within one property.
//! No replacement, no dedup: registering the same callback twice calls it twice.
//!
//! Single-threaded: callbacks are `Rc` and the map lives in a `RefCell`.
//! `dispatch` snapshots the list before calling out, so a listener may register
//! more listeners or trigger another dispatch.

use indexmap::IndexMap;
use std::cell::RefCell;
use std::rc::Rc;

use crate::entities::PropValue;

/// Property change callback.
pub type Listener = Rc<dyn Fn(&PropValue)>;

#[derive(Default)]
pub struct Listeners {
    map: RefCell<IndexMap<String, Vec<Listener>>>,
}

impl Listeners {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `listener` to the list of `name`.
    pub fn listen<F>(&self, name: &str, listener: F)
    where
        F: Fn(&PropValue) + 'static,
    {
        self.map
            .borrow_mut()
            .entry(name.to_string())
            .or_default()
            .push(Rc::new(listener));
    }

    /// Snapshot of the listeners of `name`.
    pub fn get(&self, name: &str) -> Vec<Listener> {
        self.map.borrow().get(name).cloned().unwrap_or_default()
    }

    /// Call every listener of `name` with `value`.
    pub fn dispatch(&self, name: &str, value: &PropValue) {
        let listeners = self.get(name);
        if !listeners.is_empty() {
            log::trace!("Dispatching '{}' = {} to {} listener(s)", name, value, listeners.len());
        }
        for listener in listeners {
            listener(value);
        }
    }

    pub fn has_listeners(&self, name: &str) -> bool {
        self.map.borrow().get(name).map(|v| !v.is_empty()).unwrap_or(false)
    }

    /// Drop every listener of `name`.
    pub fn clear(&self, name: &str) {
        self.map.borrow_mut().shift_remove(name);
    }
}

impl std::fmt::Debug for Listeners {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let map = self.map.borrow();
        f.debug_map()
            .entries(map.iter().map(|(k, v)| (k, v.len())))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_fifo_order() {
        let listeners = Listeners::new();
        let log = Rc::new(RefCell::new(Vec::new()));

        let l1 = Rc::clone(&log);
        listeners.listen("p", move |v| l1.borrow_mut().push(format!("L1:{}", v)));
        let l2 = Rc::clone(&log);
        listeners.listen("p", move |v| l2.borrow_mut().push(format!("L2:{}", v)));

        listeners.dispatch("p", &PropValue::Int(5));
        assert_eq!(*log.borrow(), vec!["L1:5", "L2:5"]);
    }

    #[test]
    fn test_listener_may_register_during_dispatch() {
        let listeners = Rc::new(Listeners::new());
        let hits = Rc::new(Cell::new(0));

        let inner = Rc::clone(&listeners);
        let h = Rc::clone(&hits);
        listeners.listen("p", move |_| {
            let h2 = Rc::clone(&h);
            inner.listen("p", move |_| h2.set(h2.get() + 1));
        });

        listeners.dispatch("p", &PropValue::None);
        // The listener added mid-dispatch runs from the next dispatch on.
        assert_eq!(hits.get(), 0);
        listeners.dispatch("p", &PropValue::None);
        assert_eq!(hits.get(), 1);
    }

    #[test]
    fn test_clear() {
        let listeners = Listeners::new();
        listeners.listen("p", |_| {});
        assert!(listeners.has_listeners("p"));
        listeners.clear("p");
        assert!(!listeners.has_listeners("p"));
    }
}
