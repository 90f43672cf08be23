//! Binding model: keeps UI properties and linked widgets in sync.
//!
//! Architecture:
//! - Properties live in a name-keyed registry (`Properties`).
//! - Widgets are linked to one property each through their `prop` tag and kept
//!   in a `Weak` registry; the capability table says how to read/write them.
//! - Widget -> model: a linked widget's save signal runs `save_properties`,
//!   which copies every widget's facets into the registry and notifies
//!   listeners.
//! - Model -> widgets: `update_property` / `update_widgets_from_properties`
//!   write property facets through widget setters.
//!
//! Feedback loop: a programmatic setter emits the same signal a user edit
//! does. Every model -> widgets pass runs with `block_save` raised (RAII
//! guard, restored on every exit path), so those signals never save back.
//!
//! Single-threaded. `Model` is a cheap handle over `Rc` state; no borrow is
//! held while a slot or listener runs, so both may call back into the model.

use indexmap::IndexMap;
use log::{debug, trace, warn};
use std::cell::{Cell, Ref, RefCell};
use std::rc::{Rc, Weak};

use crate::config::ModelConfig;
use crate::entities::{
    setup_properties, Properties, PropValue, PropertySetup, UiProperty, VALUE_FACET,
};
use crate::widgets::{CapabilityTable, Discover, WidgetNode, WidgetRef, WidgetRegistry};

use super::error::BindError;
use super::listeners::Listeners;

struct ModelInner {
    properties: RefCell<Properties>,
    widgets: RefCell<WidgetRegistry>,
    listeners: Listeners,
    capabilities: Rc<CapabilityTable>,
    show_warnings: Cell<bool>,
    auto_link: bool,
    block_save: Cell<bool>,
}

/// Raises `block_save` for its lifetime and restores the previous state on drop.
struct SaveBlock<'a> {
    flag: &'a Cell<bool>,
    previous: bool,
}

impl<'a> SaveBlock<'a> {
    fn engage(flag: &'a Cell<bool>) -> Self {
        let previous = flag.replace(true);
        Self { flag, previous }
    }
}

impl Drop for SaveBlock<'_> {
    fn drop(&mut self) {
        self.flag.set(self.previous);
    }
}

/// Property model bound to a widget tree.
#[derive(Clone)]
pub struct Model {
    inner: Rc<ModelInner>,
}

impl Model {
    /// Model with no properties and the standard capability table.
    pub fn new(config: ModelConfig) -> Self {
        Self::with_capabilities(config, CapabilityTable::standard(), Vec::new())
    }

    pub fn with_properties(config: ModelConfig, properties: Vec<UiProperty>) -> Self {
        Self::with_capabilities(config, CapabilityTable::standard(), properties)
    }

    /// Model initialized from a setup hook.
    pub fn from_setup(config: ModelConfig, setup: &impl PropertySetup) -> Self {
        Self::with_properties(config, setup.initialize_properties())
    }

    pub fn with_capabilities(
        config: ModelConfig,
        capabilities: CapabilityTable,
        properties: Vec<UiProperty>,
    ) -> Self {
        let properties = setup_properties(properties);
        debug!(
            "Model created: {} properties, widget types: {:?}",
            properties.len(),
            capabilities.type_names().collect::<Vec<_>>()
        );
        Self {
            inner: Rc::new(ModelInner {
                properties: RefCell::new(properties),
                widgets: RefCell::new(WidgetRegistry::new()),
                listeners: Listeners::new(),
                capabilities: Rc::new(capabilities),
                show_warnings: Cell::new(config.show_warnings),
                auto_link: config.auto_link_properties,
                block_save: Cell::new(false),
            }),
        }
    }

    // ========== Configuration ==========

    pub fn config(&self) -> ModelConfig {
        ModelConfig {
            show_warnings: self.inner.show_warnings.get(),
            auto_link_properties: self.inner.auto_link,
        }
    }

    pub fn show_warnings(&self) -> bool {
        self.inner.show_warnings.get()
    }

    pub fn set_show_warnings(&self, show: bool) {
        self.inner.show_warnings.set(show);
    }

    pub fn capabilities(&self) -> &CapabilityTable {
        &self.inner.capabilities
    }

    /// True while a model -> widgets pass is running.
    pub fn is_save_blocked(&self) -> bool {
        self.inner.block_save.get()
    }

    // ========== Properties ==========

    /// Borrow the registry. Do not hold across calls into the model.
    pub fn properties(&self) -> Ref<'_, Properties> {
        self.inner.properties.borrow()
    }

    pub fn property(&self, name: &str) -> Option<UiProperty> {
        self.inner.properties.borrow().get(name).cloned()
    }

    pub fn value(&self, name: &str) -> Option<PropValue> {
        self.inner.properties.borrow().get(name).map(|p| p.value.clone())
    }

    pub fn has_property(&self, name: &str) -> bool {
        self.inner.properties.borrow().contains_key(name)
    }

    /// Set up `properties` and merge them into the registry (last write wins).
    pub fn register_properties(&self, properties: Vec<UiProperty>) -> Vec<String> {
        let new_props = setup_properties(properties);
        let names: Vec<String> = new_props.keys().cloned().collect();
        self.inner.properties.borrow_mut().extend(new_props);
        names
    }

    /// Restore every property to its default, optionally refreshing widgets.
    pub fn reset(&self, update_widgets: bool) -> Result<(), BindError> {
        for prop in self.inner.properties.borrow_mut().values_mut() {
            prop.reset();
        }
        debug!("Properties reset to defaults");
        if update_widgets {
            self.update_widgets_from_properties()?;
        }
        Ok(())
    }

    /// Set `name` and push it to linked widgets, then notify listeners.
    ///
    /// Unregistered names are ignored.
    pub fn update_property(&self, name: &str, value: impl Into<PropValue>) -> Result<(), BindError> {
        let value = value.into();
        {
            let mut props = self.inner.properties.borrow_mut();
            let Some(prop) = props.get_mut(name) else {
                debug!("update_property: '{}' is not registered", name);
                return Ok(());
            };
            if let Some(ty) = prop.ty.filter(|ty| !ty.accepts(&value)) {
                debug!("update_property: '{}' is typed {} but got {}", name, ty, value);
            }
            prop.value = value.clone();
        }
        self.update_widget_from_property(name)?;
        self.inner.listeners.dispatch(name, &value);
        Ok(())
    }

    /// Register a change listener for `name`. Listeners run in registration order.
    pub fn listen<F>(&self, name: &str, listener: F)
    where
        F: Fn(&PropValue) + 'static,
    {
        self.inner.listeners.listen(name, listener);
    }

    // ========== Linking ==========

    /// Name of the property `widget` is linked to.
    pub fn widget_property_name(widget: &WidgetNode) -> Option<String> {
        widget.prop()
    }

    /// Link `widget` to property `name`.
    ///
    /// Returns false (without side effects) when the widget is already
    /// tracked or its type is unsupported.
    pub fn link(&self, widget: &WidgetRef, name: &str) -> bool {
        if self.inner.widgets.borrow().contains(widget) {
            trace!("{} already linked", widget);
            return false;
        }
        let Some(update) = self.inner.capabilities.lookup(widget) else {
            if self.show_warnings() {
                warn!("Unsupported widget: {}. Property: {}", widget, name);
            }
            return false;
        };

        let model = Rc::downgrade(&self.inner);
        widget.connect(update.save_signal, Rc::new(move || save_from_signal(&model)));
        widget.set_prop(name);
        self.inner.widgets.borrow_mut().insert(widget);
        debug!("Linked {} -> '{}' on '{}'", widget, name, update.save_signal);
        true
    }

    /// Lazily walk `root` for bindable attributes. Does not link.
    pub fn discover(&self, root: &WidgetRef) -> Discover {
        Discover::new(Rc::clone(&self.inner.capabilities), root)
    }

    /// Link every discovered widget to a property named after its attribute.
    ///
    /// Properties that do not exist yet are created from the widget's current
    /// facet values and announced to listeners. Existing properties are kept.
    /// No-op unless auto-linking is enabled. Returns the created names.
    pub fn auto_link_properties(&self, root: &WidgetRef) -> Vec<String> {
        if !self.inner.auto_link {
            trace!("Auto-linking disabled");
            return Vec::new();
        }

        let mut new_props: Vec<UiProperty> = Vec::new();
        for (name, widget) in self.discover(root) {
            if let Some(update) = self.inner.capabilities.lookup(&widget) {
                widget.set_skip_children(update.skip_children);
            }
            if !self.link(&widget, &name) {
                continue;
            }
            if self.has_property(&name) || new_props.iter().any(|p| p.name == name) {
                continue;
            }
            let mut prop = UiProperty::unset(name);
            for (facet, value) in self.widget_values(&widget) {
                prop.set_field(&facet, value);
            }
            new_props.push(prop);
        }

        let announce: Vec<(String, PropValue)> = new_props
            .iter()
            .map(|p| (p.name.clone(), p.value.clone()))
            .collect();
        let names = self.register_properties(new_props);
        debug!("Auto-linked {} new properties: {:?}", names.len(), names);

        for (name, value) in announce {
            self.inner.listeners.dispatch(&name, &value);
        }
        names
    }

    /// Bind a widget tree: auto-link (if enabled), push properties into
    /// widgets, then read widgets back so the model reflects any value the
    /// widgets normalized.
    pub fn attach(&self, root: &WidgetRef) -> Result<Vec<String>, BindError> {
        let names = self.auto_link_properties(root);
        self.update_widgets_from_properties()?;
        self.save_properties();
        Ok(names)
    }

    /// Live linked widgets in link order.
    pub fn property_widgets(&self) -> Vec<WidgetRef> {
        self.inner.widgets.borrow().widgets()
    }

    /// Live widgets linked to `name`.
    pub fn widgets_for(&self, name: &str) -> Vec<WidgetRef> {
        self.inner.widgets.borrow().linked_to(name)
    }

    // ========== Model -> widgets ==========

    /// Write the linked property's facets into `widget`.
    pub fn update_widget(&self, widget: &WidgetNode) -> Result<(), BindError> {
        let Some(update) = self.inner.capabilities.lookup(widget).copied() else {
            self.warn_unsupported(widget);
            return Ok(());
        };
        let Some(name) = widget.prop() else {
            if self.show_warnings() {
                warn!("Widget {} is not linked to a property", widget);
            }
            return Ok(());
        };

        let writes: Vec<(&'static str, PropValue)> = {
            let props = self.inner.properties.borrow();
            let Some(prop) = props.get(&name) else {
                if self.show_warnings() {
                    warn!("Widget {} linked to unknown property '{}'", widget, name);
                }
                return Ok(());
            };
            // Auxiliary facets go first so the value lands on their state (a
            // combo box selects from the item list it was just given). Facets
            // the property never recorded have nothing to push.
            update
                .facets()
                .skip(1)
                .chain(update.facets().take(1))
                .filter(|(facet, _)| prop.has_field(facet))
                .map(|(facet, getset)| (getset.setter, prop.field(facet)))
                .collect()
        };

        for (setter, value) in writes {
            widget
                .set(setter, &value)
                .map_err(|source| BindError::CannotSetWidgetAttribute {
                    widget: widget.to_string(),
                    setter: setter.to_string(),
                    value: value.clone(),
                    source,
                })?;
        }
        Ok(())
    }

    /// Push every property to every linked widget.
    pub fn update_widgets_from_properties(&self) -> Result<(), BindError> {
        let widgets = self.property_widgets();
        self.update_widgets(&widgets)
    }

    /// Push property `name` to the widgets linked to it.
    pub fn update_widget_from_property(&self, name: &str) -> Result<(), BindError> {
        let widgets = self.widgets_for(name);
        self.update_widgets(&widgets)
    }

    /// Two passes under the save block: write every widget, then re-enable
    /// signals on all of them.
    fn update_widgets(&self, widgets: &[WidgetRef]) -> Result<(), BindError> {
        let _block = SaveBlock::engage(&self.inner.block_save);
        trace!("Updating {} widget(s), saving blocked", widgets.len());

        let result = widgets.iter().try_for_each(|w| self.update_widget(w));
        for widget in widgets {
            widget.block_signals(false);
        }
        result
    }

    // ========== Widgets -> model ==========

    /// Current facet values of `widget`: table facets plus its
    /// `extra_properties` tag. Empty for unsupported widgets.
    pub fn widget_values(&self, widget: &WidgetNode) -> IndexMap<String, PropValue> {
        let Some(update) = self.inner.capabilities.lookup(widget) else {
            self.warn_unsupported(widget);
            return IndexMap::new();
        };

        let mut result = IndexMap::new();
        for (facet, getset) in update.facets() {
            self.read_facet(widget, facet, getset.getter, &mut result);
        }
        if let Some(extra) = widget.extra_properties() {
            for (facet, getter) in &extra {
                self.read_facet(widget, facet, getter, &mut result);
            }
        }
        result
    }

    fn read_facet(
        &self,
        widget: &WidgetNode,
        facet: &str,
        getter: &str,
        out: &mut IndexMap<String, PropValue>,
    ) {
        match widget.get(getter) {
            Some(value) => {
                out.insert(facet.to_string(), value);
            }
            None => {
                if self.show_warnings() {
                    warn!("Widget {} has no getter '{}' for facet '{}'", widget, getter, facet);
                }
            }
        }
    }

    /// Copy every linked widget's facets into its property and notify
    /// listeners of the new `value`. No-op while saving is blocked.
    pub fn save_properties(&self) {
        if self.inner.block_save.get() {
            trace!("save_properties skipped: saving blocked");
            return;
        }

        for widget in self.property_widgets() {
            let Some(name) = widget.prop() else {
                continue;
            };
            let values = self.widget_values(&widget);
            {
                let mut props = self.inner.properties.borrow_mut();
                let Some(prop) = props.get_mut(&name) else {
                    if self.show_warnings() {
                        warn!("Widget {} linked to unknown property '{}'", widget, name);
                    }
                    continue;
                };
                for (facet, value) in &values {
                    prop.set_field(facet, value.clone());
                }
            }
            if let Some(value) = values.get(VALUE_FACET) {
                self.inner.listeners.dispatch(&name, value);
            }
        }
    }

    fn warn_unsupported(&self, widget: &WidgetNode) {
        if self.show_warnings() {
            warn!(
                "Unsupported widget: {}. Property: {}",
                widget,
                widget.prop().unwrap_or_default()
            );
        }
    }
}

/// Save slot body: the slot only holds a weak handle to the model.
fn save_from_signal(model: &Weak<ModelInner>) {
    if let Some(inner) = model.upgrade() {
        Model { inner }.save_properties();
    }
}

impl std::fmt::Debug for Model {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Model")
            .field("properties", &self.inner.properties.borrow().len())
            .field("widgets", &self.inner.widgets.borrow().len())
            .field("listeners", &self.inner.listeners)
            .field("show_warnings", &self.inner.show_warnings.get())
            .field("block_save", &self.inner.block_save.get())
            .finish()
    }
}
