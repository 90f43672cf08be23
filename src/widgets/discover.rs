//! Lazy discovery of bindable widgets in a widget tree.

use std::collections::VecDeque;
use std::rc::Rc;

use super::capability::CapabilityTable;
use super::node::WidgetRef;

/// Pre-order walk yielding `(attribute name, widget)` for every declared
/// attribute whose exact type is in the capability table.
///
/// Each visited node yields its own attributes, then its children are visited
/// depth-first. A supported node whose contract sets `skip_children` (or whose
/// `skip_children` tag is set) is opaque: neither its attributes nor its
/// children are walked.
/// Nothing is linked or cached; call again for a fresh walk.
pub struct Discover {
    table: Rc<CapabilityTable>,
    pending: VecDeque<(String, WidgetRef)>,
    stack: Vec<WidgetRef>,
}

impl Discover {
    pub fn new(table: Rc<CapabilityTable>, root: &WidgetRef) -> Self {
        Self {
            table,
            pending: VecDeque::new(),
            stack: vec![Rc::clone(root)],
        }
    }

    fn skips_children(&self, node: &WidgetRef) -> bool {
        if let Some(skip) = node.skip_children() {
            return skip;
        }
        self.table.lookup(node).map(|u| u.skip_children).unwrap_or(false)
    }
}

impl Iterator for Discover {
    type Item = (String, WidgetRef);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(item) = self.pending.pop_front() {
                return Some(item);
            }
            let node = self.stack.pop()?;
            if self.skips_children(&node) {
                continue;
            }
            let table = &self.table;
            self.pending.extend(
                node.attributes()
                    .into_iter()
                    .filter(|(_, widget)| table.supports(widget)),
            );
            // Reverse so the first child is visited first.
            self.stack.extend(node.children().into_iter().rev());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::widgets::kit::{CheckBox, LineEdit, Panel, RadioButtonGroup, Slider};
    use crate::widgets::node::WidgetNode;

    fn names(d: Discover) -> Vec<String> {
        d.map(|(name, _)| name).collect()
    }

    #[test]
    fn test_preorder_attributes() {
        let root = WidgetNode::new("root", Panel::new("root"));
        let left = WidgetNode::new("left", Panel::new("left"));
        let right = WidgetNode::new("right", Panel::new("right"));
        let deep = WidgetNode::new("deep", Panel::new("deep"));

        root.declare("title_edit", WidgetNode::new("title_edit", LineEdit::new()));
        root.declare("left", Rc::clone(&left));
        left.declare("volume", WidgetNode::new("volume", Slider::new(0, 10)));
        deep.declare("mute", WidgetNode::new("mute", CheckBox::new("Mute")));
        right.declare("name", WidgetNode::new("name", LineEdit::new()));

        root.add_child(Rc::clone(&left));
        root.add_child(Rc::clone(&right));
        left.add_child(Rc::clone(&deep));

        let table = Rc::new(CapabilityTable::standard());
        // Panel attribute "left" is unsupported and never yielded.
        assert_eq!(
            names(Discover::new(Rc::clone(&table), &root)),
            vec!["title_edit", "volume", "mute", "name"]
        );
        // Restartable.
        assert_eq!(names(Discover::new(table, &root)).len(), 4);
    }

    #[test]
    fn test_skip_children_prunes_composites() {
        let root = WidgetNode::new("root", Panel::new("root"));
        let group = WidgetNode::new("mode", RadioButtonGroup::new(["a", "b"]));
        group.declare("inner_edit", WidgetNode::new("inner", LineEdit::new()));
        root.declare("mode", Rc::clone(&group));
        root.add_child(Rc::clone(&group));

        let table = Rc::new(CapabilityTable::standard());
        assert_eq!(names(Discover::new(Rc::clone(&table), &root)), vec!["mode"]);

        group.set_skip_children(false);
        assert_eq!(names(Discover::new(table, &root)), vec!["mode", "inner_edit"]);
    }
}
