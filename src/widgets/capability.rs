//! Static widget capability table.
//!
//! Maps a concrete widget type to the accessors the model uses to read and
//! write it, and to the signal that announces a user edit.
//! Lookup is by exact `TypeId`: a type wrapping a supported widget is itself
//! unsupported until it is registered.

use indexmap::IndexMap;
use std::any::TypeId;
use std::sync::LazyLock;

use crate::entities::VALUE_FACET;

use super::kit::{
    CheckBox, ComboBox, FloatLineEdit, IntLineEdit, LineEdit, RadioButtonGroup, SearchLineEdit,
    Slider,
};
use super::node::{Widget, WidgetNode};

/// One read/write accessor pair for one facet of a widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UiPropertyGetSet {
    pub getter: &'static str,
    pub setter: &'static str,
}

impl UiPropertyGetSet {
    pub const fn new(getter: &'static str, setter: &'static str) -> Self {
        Self { getter, setter }
    }
}

/// How to keep one widget type in sync with a property.
///
/// The first getset carries the canonical `value`; later ones map to
/// auxiliary property fields named after their getter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UiPropertyWidgetUpdate {
    pub save_signal: &'static str,
    pub getsets: &'static [UiPropertyGetSet],
    pub skip_children: bool,
}

impl UiPropertyWidgetUpdate {
    pub const fn new(save_signal: &'static str, getsets: &'static [UiPropertyGetSet]) -> Self {
        Self {
            save_signal,
            getsets,
            skip_children: true,
        }
    }

    /// Let discovery descend into this widget's children.
    pub const fn keep_children(mut self) -> Self {
        self.skip_children = false;
        self
    }

    /// `(facet name, accessor pair)` in table order.
    pub fn facets(&self) -> impl Iterator<Item = (&'static str, &'static UiPropertyGetSet)> {
        self.getsets
            .iter()
            .enumerate()
            .map(|(i, gs)| (if i == 0 { VALUE_FACET } else { gs.getter }, gs))
    }
}

// ============================================================================
// Standard kit
// ============================================================================

const TEXT: &[UiPropertyGetSet] = &[UiPropertyGetSet::new("text", "set_text")];
const VALUE: &[UiPropertyGetSet] = &[UiPropertyGetSet::new("value", "set_value")];
const CHECKED: &[UiPropertyGetSet] = &[UiPropertyGetSet::new("is_checked", "set_checked")];
const COMBO: &[UiPropertyGetSet] = &[
    UiPropertyGetSet::new("current_index", "set_index"),
    UiPropertyGetSet::new("items", "set_items"),
];
const RADIO: &[UiPropertyGetSet] = &[UiPropertyGetSet::new("checked_index", "set_checked")];

static STANDARD: LazyLock<CapabilityTable> = LazyLock::new(|| {
    CapabilityTable::new()
        .register::<LineEdit>(UiPropertyWidgetUpdate::new("text_changed", TEXT))
        .register::<SearchLineEdit>(UiPropertyWidgetUpdate::new("text_changed", TEXT))
        .register::<IntLineEdit>(UiPropertyWidgetUpdate::new("text_changed", VALUE))
        .register::<FloatLineEdit>(UiPropertyWidgetUpdate::new("text_changed", VALUE))
        .register::<CheckBox>(UiPropertyWidgetUpdate::new("toggled", CHECKED))
        .register::<ComboBox>(UiPropertyWidgetUpdate::new("item_changed", COMBO))
        .register::<RadioButtonGroup>(UiPropertyWidgetUpdate::new("toggled", RADIO))
        .register::<Slider>(UiPropertyWidgetUpdate::new("value_changed", VALUE))
});

#[derive(Debug, Clone)]
struct Capability {
    type_name: &'static str,
    update: UiPropertyWidgetUpdate,
}

/// Exact-type map from widget type to its binding contract.
#[derive(Debug, Clone, Default)]
pub struct CapabilityTable {
    entries: IndexMap<TypeId, Capability>,
}

impl CapabilityTable {
    /// Empty table: every widget is unsupported.
    pub fn new() -> Self {
        Self::default()
    }

    /// Table covering the bundled kit widgets.
    pub fn standard() -> Self {
        STANDARD.clone()
    }

    /// Add or replace the entry for `W`.
    pub fn register<W: Widget>(mut self, update: UiPropertyWidgetUpdate) -> Self {
        self.entries.insert(
            TypeId::of::<W>(),
            Capability {
                type_name: std::any::type_name::<W>(),
                update,
            },
        );
        self
    }

    pub fn get(&self, widget_type: TypeId) -> Option<&UiPropertyWidgetUpdate> {
        self.entries.get(&widget_type).map(|c| &c.update)
    }

    pub fn lookup(&self, widget: &WidgetNode) -> Option<&UiPropertyWidgetUpdate> {
        self.get(widget.widget_type())
    }

    pub fn supports(&self, widget: &WidgetNode) -> bool {
        self.entries.contains_key(&widget.widget_type())
    }

    /// Registered type names, in registration order.
    pub fn type_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.values().map(|c| c.type_name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::SetterError;
    use crate::entities::PropValue;
    use crate::widgets::kit::Panel;

    /// Wraps a supported widget without being one.
    struct FancyLineEdit(LineEdit);

    impl Widget for FancyLineEdit {
        fn call_getter(&self, getter: &str) -> Option<PropValue> {
            self.0.call_getter(getter)
        }
        fn call_setter(
            &mut self,
            setter: &str,
            value: &PropValue,
        ) -> Result<Option<&'static str>, SetterError> {
            self.0.call_setter(setter, value)
        }
    }

    #[test]
    fn test_standard_table_exact_match() {
        let table = CapabilityTable::standard();
        assert_eq!(table.len(), 8);
        assert!(table.type_names().any(|name| name.ends_with("::ComboBox")));
        assert!(table.supports(&WidgetNode::new("a", LineEdit::new())));
        assert!(!table.supports(&WidgetNode::new("b", Panel::new("p"))));
        assert!(!table.supports(&WidgetNode::new("c", FancyLineEdit(LineEdit::new()))));
    }

    #[test]
    fn test_register_extends_table() {
        let table = CapabilityTable::standard()
            .register::<FancyLineEdit>(UiPropertyWidgetUpdate::new("text_changed", TEXT));
        assert!(table.supports(&WidgetNode::new("c", FancyLineEdit(LineEdit::new()))));
        assert_eq!(table.len(), 9);
    }

    #[test]
    fn test_facet_names() {
        let table = CapabilityTable::standard();
        let combo = table.get(TypeId::of::<ComboBox>()).unwrap();
        let facets: Vec<_> = combo.facets().map(|(name, gs)| (name, gs.setter)).collect();
        assert_eq!(
            facets,
            vec![("value", "set_index"), ("items", "set_items")]
        );
        assert!(combo.skip_children);
        assert!(!combo.keep_children().skip_children);
    }
}
