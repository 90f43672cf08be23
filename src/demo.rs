//! Sample mixer panel used by the `propbind` binary.
//!
//! Layout:
//! ```text
//! mixer (Panel)
//!   label   LineEdit
//!   output (Panel)
//!     volume  Slider 0..=100
//!     muted   CheckBox
//!     device  ComboBox
//!     meter   Panel (not bindable)
//! ```

use anyhow::{Context, Result, bail};
use log::{debug, info};

use crate::core::Model;
use crate::entities::{PropType, PropValue, PropertySetup, UiProperty};
use crate::widgets::kit::{CheckBox, ComboBox, LineEdit, Panel, Slider};
use crate::widgets::{WidgetNode, WidgetRef};

/// Properties the mixer declares up front. `device` is left to auto-linking.
#[derive(Debug, Default, Clone, Copy)]
pub struct MixerSetup;

impl PropertySetup for MixerSetup {
    fn initialize_properties(&self) -> Vec<UiProperty> {
        vec![
            UiProperty::new("label", "Main").with_type(PropType::Str),
            UiProperty::new("volume", 50).with_type(PropType::Int),
            UiProperty::new("muted", false).with_type(PropType::Bool),
        ]
    }
}

pub fn mixer_panel() -> WidgetRef {
    let root = WidgetNode::new("mixer", Panel::new("Mixer"));
    let label = WidgetNode::new("label", LineEdit::new());
    root.declare("label", label.clone());
    root.add_child(label);

    let output = WidgetNode::new("output", Panel::new("Output"));
    let children = [
        ("volume", WidgetNode::new("volume", Slider::new(0, 100))),
        ("muted", WidgetNode::new("muted", CheckBox::new("Mute"))),
        (
            "device",
            WidgetNode::new("device", ComboBox::new(["Speakers", "Headphones", "HDMI"])),
        ),
        ("meter", WidgetNode::new("meter", Panel::new("Level"))),
    ];
    for (name, widget) in children {
        output.declare(name, widget.clone());
        output.add_child(widget);
    }
    root.add_child(output);
    root
}

/// Link discovered widgets whose attribute names an existing property.
///
/// With auto-linking enabled every bindable widget is linked and missing
/// properties are created from widget state instead.
pub fn bind(model: &Model, root: &WidgetRef) -> Result<Vec<String>> {
    if !model.config().auto_link_properties {
        for (name, widget) in model.discover(root) {
            if model.has_property(&name) {
                model.link(&widget, &name);
            } else {
                debug!("No property for discovered widget '{}'", name);
            }
        }
    }
    let created = model.attach(root).context("Failed to bind mixer panel")?;
    let names: Vec<String> = model.properties().keys().cloned().collect();
    for name in names {
        let key = name.clone();
        model.listen(&name, move |value| info!("{} -> {}", key, value));
    }
    Ok(created)
}

/// Simulate a user edit: write `value` through the primary setter of the
/// first widget linked to `name`, letting its change signal save it.
pub fn edit(model: &Model, name: &str, value: &PropValue) -> Result<()> {
    let Some(widget) = model.widgets_for(name).into_iter().next() else {
        bail!("No widget linked to property '{}'", name);
    };
    let Some(getset) = model
        .capabilities()
        .lookup(&widget)
        .and_then(|update| update.getsets.first())
    else {
        bail!("Widget {} has no accessors", widget);
    };
    widget
        .set(getset.setter, value)
        .with_context(|| format!("Cannot edit {} with {}", widget, value))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ModelConfig;

    #[test]
    fn test_bind_declared_properties() {
        let model = Model::from_setup(ModelConfig::default(), &MixerSetup);
        let root = mixer_panel();
        let created = bind(&model, &root).unwrap();
        assert!(created.is_empty());
        assert_eq!(model.property_widgets().len(), 3);
        assert!(model.widgets_for("device").is_empty());
        assert_eq!(
            model.widgets_for("volume")[0].get("value"),
            Some(PropValue::Int(50))
        );
    }

    #[test]
    fn test_bind_auto_link_creates_device() {
        let config = ModelConfig {
            auto_link_properties: true,
            ..ModelConfig::default()
        };
        let model = Model::from_setup(config, &MixerSetup);
        let root = mixer_panel();
        let created = bind(&model, &root).unwrap();
        assert_eq!(created, vec!["device".to_string()]);
        assert_eq!(model.value("device"), Some(PropValue::Int(0)));
        assert_eq!(model.value("label"), Some(PropValue::Str("Main".into())));
    }

    #[test]
    fn test_edit_saves_into_model() {
        let model = Model::from_setup(ModelConfig::default(), &MixerSetup);
        let root = mixer_panel();
        bind(&model, &root).unwrap();

        edit(&model, "volume", &PropValue::Int(80)).unwrap();
        assert_eq!(model.value("volume"), Some(PropValue::Int(80)));

        // Slider clamps.
        edit(&model, "volume", &PropValue::Int(500)).unwrap();
        assert_eq!(model.value("volume"), Some(PropValue::Int(100)));

        assert!(edit(&model, "device", &PropValue::Int(1)).is_err());
        assert!(edit(&model, "muted", &PropValue::Str("yes".into())).is_err());
    }
}
