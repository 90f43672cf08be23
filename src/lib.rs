//! PROPBIND - property binding between a data model and a widget tree
//!
//! Re-exports all modules for use by binary targets.

// Binding engine (model, listeners, errors)
pub mod core;

// Data and widget layers
pub mod entities;
pub mod widgets;

// App modules
pub mod cli;
pub mod config;
pub mod demo;

pub use config::ModelConfig;
pub use core::{BindError, Model, SetterError};
pub use entities::{setup_properties, PropType, PropValue, PropertySetup, UiProperty};
pub use widgets::{CapabilityTable, Widget, WidgetNode, WidgetRef};
