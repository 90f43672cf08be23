//! Widget layer - the toolkit surface the binding model talks to
//!
//! The model only sees `WidgetNode`s; concrete widgets come from the kit or
//! from application code implementing `Widget`.

pub mod capability;
pub mod discover;
pub mod kit;
pub mod node;
pub mod registry;

pub use capability::{CapabilityTable, UiPropertyGetSet, UiPropertyWidgetUpdate};
pub use discover::Discover;
pub use node::{Slot, Widget, WidgetId, WidgetNode, WidgetRef, WidgetTags};
pub use registry::WidgetRegistry;
