//! UI property records and the name-keyed property registry.
//!
//! A `UiProperty` owns its canonical `value` plus any auxiliary facet fields
//! written by composite widgets (e.g. a combo box's item list next to its
//! index). `default` is captured once at registration.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::value::{PropType, PropValue};

/// Facet name of the canonical value field.
pub const VALUE_FACET: &str = "value";

/// Name-keyed properties in registration order.
pub type Properties = IndexMap<String, UiProperty>;

/// A named value owned by the binding model, independent of any widget.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UiProperty {
    pub name: String,
    #[serde(default)]
    pub value: PropValue,
    #[serde(default)]
    pub default: Option<PropValue>,
    #[serde(default, rename = "type")]
    pub ty: Option<PropType>,
    /// Auxiliary facets keyed by getter name.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub extra: IndexMap<String, PropValue>,
}

impl UiProperty {
    pub fn new(name: impl Into<String>, value: impl Into<PropValue>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            default: None,
            ty: None,
            extra: IndexMap::new(),
        }
    }

    /// Property with neither value nor default.
    pub fn unset(name: impl Into<String>) -> Self {
        Self::new(name, PropValue::None)
    }

    pub fn with_default(mut self, default: impl Into<PropValue>) -> Self {
        self.default = Some(default.into());
        self
    }

    pub fn with_type(mut self, ty: PropType) -> Self {
        self.ty = Some(ty);
        self
    }

    /// Read a facet: `"value"` or an auxiliary field (missing -> `None`).
    pub fn field(&self, facet: &str) -> PropValue {
        if facet == VALUE_FACET {
            return self.value.clone();
        }
        self.extra.get(facet).cloned().unwrap_or_default()
    }

    /// Whether the facet was ever recorded. `"value"` always exists.
    pub fn has_field(&self, facet: &str) -> bool {
        facet == VALUE_FACET || self.extra.contains_key(facet)
    }

    /// Write a facet: `"value"` or an auxiliary field.
    pub fn set_field(&mut self, facet: &str, value: PropValue) {
        if facet == VALUE_FACET {
            self.value = value;
        } else {
            self.extra.insert(facet.to_string(), value);
        }
    }

    /// Recorded default, `None` when neither default nor value were ever set.
    pub fn default_value(&self) -> PropValue {
        self.default.clone().unwrap_or_default()
    }

    /// Restore `value` from `default`.
    pub fn reset(&mut self) {
        self.value = self.default_value();
    }
}

/// Build the registry from an ordered list.
///
/// Unset defaults are copied from `value`. Duplicate names overwrite the
/// earlier record (last write wins) but keep the first position.
pub fn setup_properties(properties: Vec<UiProperty>) -> Properties {
    let mut map = Properties::with_capacity(properties.len());
    for mut prop in properties {
        if prop.default.is_none() {
            prop.default = Some(prop.value.clone());
        }
        if map.contains_key(&prop.name) {
            log::debug!("Property '{}' registered twice, keeping the last definition", prop.name);
        }
        map.insert(prop.name.clone(), prop);
    }
    map
}

/// Types that provide the initial property list of a model.
///
/// The default hook registers nothing.
pub trait PropertySetup {
    fn initialize_properties(&self) -> Vec<UiProperty> {
        Vec::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_setup_copies_default_from_value() {
        let props = setup_properties(vec![
            UiProperty::new("volume", 0),
            UiProperty::new("name", "main").with_default("fallback"),
            UiProperty::unset("empty"),
        ]);
        assert_eq!(props["volume"].default, Some(PropValue::Int(0)));
        assert_eq!(props["name"].default, Some(PropValue::Str("fallback".into())));
        assert_eq!(props["empty"].default, Some(PropValue::None));
    }

    #[test]
    fn test_setup_duplicate_last_wins() {
        let props = setup_properties(vec![
            UiProperty::new("a", 1),
            UiProperty::new("b", 2),
            UiProperty::new("a", 3),
        ]);
        assert_eq!(props.len(), 2);
        assert_eq!(props["a"].value, PropValue::Int(3));
        assert_eq!(props.get_index(0).map(|(k, _)| k.as_str()), Some("a"));
    }

    #[test]
    fn test_fields_and_reset() {
        let mut prop = UiProperty::new("device", 1);
        prop.set_field("current_text", "Speakers".into());
        assert_eq!(prop.field("current_text"), PropValue::Str("Speakers".into()));
        assert_eq!(prop.field("missing"), PropValue::None);
        assert!(prop.has_field("value"));
        assert!(!prop.has_field("missing"));

        let mut props = setup_properties(vec![prop]);
        let device = props.get_mut("device").unwrap();
        device.set_field(VALUE_FACET, PropValue::Int(4));
        device.reset();
        assert_eq!(device.value, PropValue::Int(1));
    }

    #[test]
    fn test_default_hook_is_empty() {
        struct Nothing;
        impl PropertySetup for Nothing {}
        assert!(Nothing.initialize_properties().is_empty());
    }
}
