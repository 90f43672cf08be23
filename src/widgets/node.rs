//! Widget abstraction consumed by the binding model.
//!
//! A toolkit widget implements [`Widget`] (named getters and setters). The
//! model never touches it directly: it goes through [`WidgetNode`], which adds
//! what the binding layer needs around it:
//! - identity (`WidgetId`) and exact-type introspection (`TypeId`)
//! - side-channel tags: `prop`, `extra_properties`, `skip_children`
//! - named signals with a suppression toggle
//! - declared child attributes and the child-widget tree
//!
//! Signals fire after the widget borrow is released, so a slot may read the
//! widget that emitted it.

use indexmap::IndexMap;
use std::any::{Any, TypeId};
use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;
use uuid::Uuid;

use crate::core::error::SetterError;
use crate::entities::PropValue;

/// Stable widget identity.
pub type WidgetId = Uuid;

/// Shared handle to a widget node. The model only keeps `Weak` copies.
pub type WidgetRef = Rc<WidgetNode>;

/// Signal handler.
pub type Slot = Rc<dyn Fn()>;

/// Upcast helper so `dyn Widget` can be downcast to its concrete type.
pub trait AsAny: Any {
    fn as_any(&self) -> &dyn Any;
}

impl<T: Any> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// A toolkit widget reachable through named accessors.
pub trait Widget: AsAny {
    /// Read accessor `getter`. `None` if the widget has no such getter.
    fn call_getter(&self, getter: &str) -> Option<PropValue>;

    /// Invoke setter `setter`.
    ///
    /// Returns the signal the widget emits because its state changed, if any.
    fn call_setter(
        &mut self,
        setter: &str,
        value: &PropValue,
    ) -> Result<Option<&'static str>, SetterError>;
}

/// Side-channel tags attached to a node by the binding layer.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WidgetTags {
    /// Name of the linked property.
    pub prop: Option<String>,
    /// Ad hoc facets: facet name -> getter name.
    pub extra_properties: Option<IndexMap<String, String>>,
    /// Discovery does not descend below this node when set.
    pub skip_children: Option<bool>,
}

/// Wrapper around a toolkit widget.
pub struct WidgetNode {
    id: WidgetId,
    object_name: String,
    type_id: TypeId,
    type_name: &'static str,
    widget: RefCell<Box<dyn Widget>>,
    tags: RefCell<WidgetTags>,
    signals: RefCell<IndexMap<String, Vec<Slot>>>,
    signals_blocked: Cell<bool>,
    attributes: RefCell<IndexMap<String, WidgetRef>>,
    children: RefCell<Vec<WidgetRef>>,
}

impl WidgetNode {
    pub fn new<W: Widget>(object_name: impl Into<String>, widget: W) -> WidgetRef {
        Rc::new(Self {
            id: Uuid::new_v4(),
            object_name: object_name.into(),
            type_id: TypeId::of::<W>(),
            type_name: short_type_name(std::any::type_name::<W>()),
            widget: RefCell::new(Box::new(widget)),
            tags: RefCell::new(WidgetTags::default()),
            signals: RefCell::new(IndexMap::new()),
            signals_blocked: Cell::new(false),
            attributes: RefCell::new(IndexMap::new()),
            children: RefCell::new(Vec::new()),
        })
    }

    pub fn id(&self) -> WidgetId {
        self.id
    }

    pub fn object_name(&self) -> &str {
        &self.object_name
    }

    /// Exact runtime type of the wrapped widget.
    pub fn widget_type(&self) -> TypeId {
        self.type_id
    }

    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    pub fn is<W: Widget>(&self) -> bool {
        self.type_id == TypeId::of::<W>()
    }

    /// Borrow the concrete widget.
    pub fn with<W: Widget, R>(&self, f: impl FnOnce(&W) -> R) -> Option<R> {
        let widget = self.widget.borrow();
        // Deref to `dyn Widget` first so the vtable `as_any` is used, not the
        // blanket impl on `Box<dyn Widget>`.
        (**widget).as_any().downcast_ref::<W>().map(f)
    }

    // ========== Accessors ==========

    pub fn get(&self, getter: &str) -> Option<PropValue> {
        self.widget.borrow().call_getter(getter)
    }

    /// Invoke a setter, then emit the resulting change signal.
    ///
    /// This is also how a user edit reaches the model: the toolkit writes the
    /// new state and the widget announces it.
    pub fn set(&self, setter: &str, value: &PropValue) -> Result<(), SetterError> {
        let signal = self.widget.borrow_mut().call_setter(setter, value)?;
        if let Some(signal) = signal {
            self.emit(signal);
        }
        Ok(())
    }

    // ========== Signals ==========

    pub fn connect(&self, signal: &str, slot: Slot) {
        self.signals
            .borrow_mut()
            .entry(signal.to_string())
            .or_default()
            .push(slot);
    }

    /// Run every slot of `signal` in connection order, unless signals are blocked.
    pub fn emit(&self, signal: &str) {
        if self.signals_blocked.get() {
            log::trace!("{}: '{}' suppressed", self, signal);
            return;
        }
        let slots: Vec<Slot> = match self.signals.borrow().get(signal) {
            Some(slots) => slots.clone(),
            None => return,
        };
        for slot in slots {
            slot();
        }
    }

    /// Number of slots connected to `signal`.
    pub fn receivers(&self, signal: &str) -> usize {
        self.signals.borrow().get(signal).map(|s| s.len()).unwrap_or(0)
    }

    /// Toggle signal suppression. Returns the previous state.
    pub fn block_signals(&self, blocked: bool) -> bool {
        self.signals_blocked.replace(blocked)
    }

    pub fn signals_blocked(&self) -> bool {
        self.signals_blocked.get()
    }

    // ========== Tags ==========

    pub fn prop(&self) -> Option<String> {
        self.tags.borrow().prop.clone()
    }

    pub fn set_prop(&self, name: impl Into<String>) {
        self.tags.borrow_mut().prop = Some(name.into());
    }

    pub fn extra_properties(&self) -> Option<IndexMap<String, String>> {
        self.tags.borrow().extra_properties.clone()
    }

    pub fn set_extra_properties(&self, facets: IndexMap<String, String>) {
        self.tags.borrow_mut().extra_properties = Some(facets);
    }

    pub fn skip_children(&self) -> Option<bool> {
        self.tags.borrow().skip_children
    }

    pub fn set_skip_children(&self, skip: bool) {
        self.tags.borrow_mut().skip_children = Some(skip);
    }

    // ========== Hierarchy ==========

    /// Declare a named child attribute (the widget's field named `name`).
    pub fn declare(&self, name: impl Into<String>, widget: WidgetRef) {
        self.attributes.borrow_mut().insert(name.into(), widget);
    }

    pub fn attributes(&self) -> Vec<(String, WidgetRef)> {
        self.attributes
            .borrow()
            .iter()
            .map(|(k, v)| (k.clone(), Rc::clone(v)))
            .collect()
    }

    pub fn add_child(&self, child: WidgetRef) {
        self.children.borrow_mut().push(child);
    }

    pub fn children(&self) -> Vec<WidgetRef> {
        self.children.borrow().clone()
    }
}

impl fmt::Display for WidgetNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}('{}')", self.type_name, self.object_name)
    }
}

impl fmt::Debug for WidgetNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WidgetNode")
            .field("id", &self.id)
            .field("object_name", &self.object_name)
            .field("type", &self.type_name)
            .field("tags", &*self.tags.borrow())
            .field("signals_blocked", &self.signals_blocked.get())
            .finish()
    }
}

/// `propbind::widgets::kit::Slider` -> `Slider`
fn short_type_name(full: &'static str) -> &'static str {
    let base = full.split('<').next().unwrap_or(full);
    base.rsplit("::").next().unwrap_or(base)
}
