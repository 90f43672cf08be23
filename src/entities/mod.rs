//! Data entities: property values and UI property records.

pub mod property;
pub mod value;

pub use property::{setup_properties, Properties, PropertySetup, UiProperty, VALUE_FACET};
pub use value::{PropType, PropValue};
