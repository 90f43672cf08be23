//! Ordered, non-owning registry of linked widgets.
//!
//! Holds `Weak` handles so a dropped widget unlinks itself; dead entries are
//! pruned lazily. Identity is the node's `WidgetId`.

use std::rc::{Rc, Weak};

use super::node::{WidgetId, WidgetNode, WidgetRef};

#[derive(Debug, Default)]
pub struct WidgetRegistry {
    entries: Vec<(WidgetId, Weak<WidgetNode>)>,
}

impl WidgetRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `widget` is tracked (and alive).
    pub fn contains(&self, widget: &WidgetNode) -> bool {
        let id = widget.id();
        self.entries
            .iter()
            .any(|(eid, weak)| *eid == id && weak.strong_count() > 0)
    }

    /// Track `widget`. Returns false if it already is.
    pub fn insert(&mut self, widget: &WidgetRef) -> bool {
        self.prune();
        if self.contains(widget) {
            return false;
        }
        self.entries.push((widget.id(), Rc::downgrade(widget)));
        true
    }

    /// Live widgets in insertion order.
    pub fn widgets(&self) -> Vec<WidgetRef> {
        self.entries.iter().filter_map(|(_, weak)| weak.upgrade()).collect()
    }

    /// Live widgets whose `prop` tag equals `name`.
    pub fn linked_to(&self, name: &str) -> Vec<WidgetRef> {
        self.entries
            .iter()
            .filter_map(|(_, weak)| weak.upgrade())
            .filter(|w| w.prop().as_deref() == Some(name))
            .collect()
    }

    /// Drop entries whose widget no longer exists. Returns how many were removed.
    pub fn prune(&mut self) -> usize {
        let before = self.entries.len();
        self.entries.retain(|(_, weak)| weak.strong_count() > 0);
        let removed = before - self.entries.len();
        if removed > 0 {
            log::debug!("Pruned {} dropped widget(s) from registry", removed);
        }
        removed
    }

    /// Number of live widgets.
    pub fn len(&self) -> usize {
        self.entries.iter().filter(|(_, weak)| weak.strong_count() > 0).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::widgets::kit::{CheckBox, LineEdit};

    #[test]
    fn test_insert_dedups_by_identity() {
        let mut reg = WidgetRegistry::new();
        let a = WidgetNode::new("a", LineEdit::new());
        let b = WidgetNode::new("b", LineEdit::new());
        assert!(reg.insert(&a));
        assert!(!reg.insert(&a));
        assert!(reg.insert(&b));
        assert_eq!(reg.len(), 2);
    }

    #[test]
    fn test_dropped_widget_disappears() {
        let mut reg = WidgetRegistry::new();
        let keep = WidgetNode::new("keep", CheckBox::new("x"));
        keep.set_prop("flag");
        reg.insert(&keep);
        {
            let gone = WidgetNode::new("gone", CheckBox::new("y"));
            gone.set_prop("flag");
            reg.insert(&gone);
        }

        let linked = reg.linked_to("flag");
        assert_eq!(linked.len(), 1);
        assert_eq!(linked[0].object_name(), "keep");
        assert_eq!(reg.prune(), 1);
        assert_eq!(reg.widgets().len(), 1);
    }
}
