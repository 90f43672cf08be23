//! Bundled widget kit.
//!
//! Minimal headless widgets with the accessor and signal surface a desktop
//! toolkit exposes. Setters only report a change signal when the stored state
//! actually changes.

use crate::core::error::SetterError;
use crate::entities::{PropType, PropValue};

use super::node::Widget;

fn mismatch(expected: PropType, found: &PropValue) -> SetterError {
    SetterError::TypeMismatch {
        expected,
        found: found.clone(),
    }
}

fn unknown(name: &str) -> SetterError {
    SetterError::UnknownAccessor(name.to_string())
}

fn changed(signal: &'static str, did_change: bool) -> Option<&'static str> {
    did_change.then_some(signal)
}

// ============================================================================
// Line edits
// ============================================================================

/// Single-line text input.
#[derive(Debug, Clone, Default)]
pub struct LineEdit {
    text: String,
}

impl LineEdit {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_text(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    fn set_text(&mut self, value: &PropValue) -> Result<Option<&'static str>, SetterError> {
        let text = value.as_str().ok_or_else(|| mismatch(PropType::Str, value))?;
        let did_change = self.text != text;
        self.text = text.to_string();
        Ok(changed("text_changed", did_change))
    }
}

impl Widget for LineEdit {
    fn call_getter(&self, getter: &str) -> Option<PropValue> {
        match getter {
            "text" => Some(PropValue::Str(self.text.clone())),
            _ => None,
        }
    }

    fn call_setter(
        &mut self,
        setter: &str,
        value: &PropValue,
    ) -> Result<Option<&'static str>, SetterError> {
        match setter {
            "set_text" => self.set_text(value),
            _ => Err(unknown(setter)),
        }
    }
}

/// Line edit with a search affordance; same text contract as [`LineEdit`].
#[derive(Debug, Clone, Default)]
pub struct SearchLineEdit {
    inner: LineEdit,
    placeholder: String,
}

impl SearchLineEdit {
    pub fn new(placeholder: impl Into<String>) -> Self {
        Self {
            inner: LineEdit::new(),
            placeholder: placeholder.into(),
        }
    }

    pub fn text(&self) -> &str {
        self.inner.text()
    }
}

impl Widget for SearchLineEdit {
    fn call_getter(&self, getter: &str) -> Option<PropValue> {
        match getter {
            "placeholder_text" => Some(PropValue::Str(self.placeholder.clone())),
            _ => self.inner.call_getter(getter),
        }
    }

    fn call_setter(
        &mut self,
        setter: &str,
        value: &PropValue,
    ) -> Result<Option<&'static str>, SetterError> {
        self.inner.call_setter(setter, value)
    }
}

/// Integer input.
#[derive(Debug, Clone, Default)]
pub struct IntLineEdit {
    value: i64,
}

impl IntLineEdit {
    pub fn new(value: i64) -> Self {
        Self { value }
    }

    pub fn value(&self) -> i64 {
        self.value
    }
}

impl Widget for IntLineEdit {
    fn call_getter(&self, getter: &str) -> Option<PropValue> {
        match getter {
            "value" => Some(PropValue::Int(self.value)),
            "text" => Some(PropValue::Str(self.value.to_string())),
            _ => None,
        }
    }

    fn call_setter(
        &mut self,
        setter: &str,
        value: &PropValue,
    ) -> Result<Option<&'static str>, SetterError> {
        match setter {
            "set_value" => {
                let v = value.as_int().ok_or_else(|| mismatch(PropType::Int, value))?;
                let did_change = self.value != v;
                self.value = v;
                Ok(changed("text_changed", did_change))
            }
            _ => Err(unknown(setter)),
        }
    }
}

/// Float input. Accepts integers on write.
#[derive(Debug, Clone, Default)]
pub struct FloatLineEdit {
    value: f64,
}

impl FloatLineEdit {
    pub fn new(value: f64) -> Self {
        Self { value }
    }

    pub fn value(&self) -> f64 {
        self.value
    }
}

impl Widget for FloatLineEdit {
    fn call_getter(&self, getter: &str) -> Option<PropValue> {
        match getter {
            "value" => Some(PropValue::Float(self.value)),
            "text" => Some(PropValue::Str(self.value.to_string())),
            _ => None,
        }
    }

    fn call_setter(
        &mut self,
        setter: &str,
        value: &PropValue,
    ) -> Result<Option<&'static str>, SetterError> {
        match setter {
            "set_value" => {
                let v = value.as_float().ok_or_else(|| mismatch(PropType::Float, value))?;
                let did_change = self.value.to_bits() != v.to_bits();
                self.value = v;
                Ok(changed("text_changed", did_change))
            }
            _ => Err(unknown(setter)),
        }
    }
}

// ============================================================================
// Toggles and choices
// ============================================================================

/// Two-state check box.
#[derive(Debug, Clone, Default)]
pub struct CheckBox {
    label: String,
    checked: bool,
}

impl CheckBox {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            checked: false,
        }
    }

    pub fn is_checked(&self) -> bool {
        self.checked
    }
}

impl Widget for CheckBox {
    fn call_getter(&self, getter: &str) -> Option<PropValue> {
        match getter {
            "is_checked" => Some(PropValue::Bool(self.checked)),
            "text" => Some(PropValue::Str(self.label.clone())),
            _ => None,
        }
    }

    fn call_setter(
        &mut self,
        setter: &str,
        value: &PropValue,
    ) -> Result<Option<&'static str>, SetterError> {
        match setter {
            "set_checked" => {
                let v = value.as_bool().ok_or_else(|| mismatch(PropType::Bool, value))?;
                let did_change = self.checked != v;
                self.checked = v;
                Ok(changed("toggled", did_change))
            }
            _ => Err(unknown(setter)),
        }
    }
}

/// Drop-down list exposing two facets: the current index and its label.
///
/// An index outside the item list selects nothing (`-1`).
#[derive(Debug, Clone)]
pub struct ComboBox {
    items: Vec<String>,
    index: i64,
}

impl ComboBox {
    pub fn new<S: Into<String>>(items: impl IntoIterator<Item = S>) -> Self {
        let items: Vec<String> = items.into_iter().map(Into::into).collect();
        let index = if items.is_empty() { -1 } else { 0 };
        Self { items, index }
    }

    pub fn current_index(&self) -> i64 {
        self.index
    }

    pub fn current_text(&self) -> &str {
        usize::try_from(self.index)
            .ok()
            .and_then(|i| self.items.get(i))
            .map(String::as_str)
            .unwrap_or("")
    }

    pub fn items(&self) -> &[String] {
        &self.items
    }

    fn select(&mut self, index: i64) -> Option<&'static str> {
        let index = if index >= 0 && (index as usize) < self.items.len() {
            index
        } else {
            -1
        };
        let did_change = self.index != index;
        self.index = index;
        changed("item_changed", did_change)
    }
}

impl Widget for ComboBox {
    fn call_getter(&self, getter: &str) -> Option<PropValue> {
        match getter {
            "current_index" => Some(PropValue::Int(self.index)),
            "current_text" => Some(PropValue::Str(self.current_text().to_string())),
            "items" => Some(PropValue::StrList(self.items.clone())),
            _ => None,
        }
    }

    fn call_setter(
        &mut self,
        setter: &str,
        value: &PropValue,
    ) -> Result<Option<&'static str>, SetterError> {
        match setter {
            "set_index" => {
                let v = value.as_int().ok_or_else(|| mismatch(PropType::Int, value))?;
                Ok(self.select(v))
            }
            "set_current_text" => {
                let text = value.as_str().ok_or_else(|| mismatch(PropType::Str, value))?;
                // Unknown labels leave the selection alone.
                match self.items.iter().position(|item| item == text) {
                    Some(pos) => Ok(self.select(pos as i64)),
                    None => Ok(None),
                }
            }
            "set_items" => {
                let items = value
                    .as_str_list()
                    .ok_or_else(|| mismatch(PropType::StrList, value))?;
                let items_changed = self.items.as_slice() != items;
                self.items = items.to_vec();
                let keep = self.index;
                Ok(self.select(keep).or(changed("item_changed", items_changed)))
            }
            _ => Err(unknown(setter)),
        }
    }
}

/// Exclusive group of radio buttons.
#[derive(Debug, Clone)]
pub struct RadioButtonGroup {
    labels: Vec<String>,
    checked: i64,
}

impl RadioButtonGroup {
    pub fn new<S: Into<String>>(labels: impl IntoIterator<Item = S>) -> Self {
        Self {
            labels: labels.into_iter().map(Into::into).collect(),
            checked: 0,
        }
    }

    pub fn checked_index(&self) -> i64 {
        self.checked
    }
}

impl Widget for RadioButtonGroup {
    fn call_getter(&self, getter: &str) -> Option<PropValue> {
        match getter {
            "checked_index" => Some(PropValue::Int(self.checked)),
            "labels" => Some(PropValue::StrList(self.labels.clone())),
            _ => None,
        }
    }

    fn call_setter(
        &mut self,
        setter: &str,
        value: &PropValue,
    ) -> Result<Option<&'static str>, SetterError> {
        match setter {
            "set_checked" => {
                let v = value.as_int().ok_or_else(|| mismatch(PropType::Int, value))?;
                let v = v.clamp(0, (self.labels.len() as i64 - 1).max(0));
                let did_change = self.checked != v;
                self.checked = v;
                Ok(changed("toggled", did_change))
            }
            _ => Err(unknown(setter)),
        }
    }
}

/// Integer slider clamped to `[min, max]`.
#[derive(Debug, Clone)]
pub struct Slider {
    min: i64,
    max: i64,
    value: i64,
}

impl Slider {
    pub fn new(min: i64, max: i64) -> Self {
        let (min, max) = if min <= max { (min, max) } else { (max, min) };
        Self { min, max, value: min }
    }

    pub fn value(&self) -> i64 {
        self.value
    }

    pub fn range(&self) -> (i64, i64) {
        (self.min, self.max)
    }
}

impl Widget for Slider {
    fn call_getter(&self, getter: &str) -> Option<PropValue> {
        match getter {
            "value" => Some(PropValue::Int(self.value)),
            "minimum" => Some(PropValue::Int(self.min)),
            "maximum" => Some(PropValue::Int(self.max)),
            _ => None,
        }
    }

    fn call_setter(
        &mut self,
        setter: &str,
        value: &PropValue,
    ) -> Result<Option<&'static str>, SetterError> {
        match setter {
            "set_value" => {
                let v = value.as_int().ok_or_else(|| mismatch(PropType::Int, value))?;
                let v = v.clamp(self.min, self.max);
                let did_change = self.value != v;
                self.value = v;
                Ok(changed("value_changed", did_change))
            }
            _ => Err(unknown(setter)),
        }
    }
}

// ============================================================================
// Containers
// ============================================================================

/// Plain container. Holds no value of its own and is never bindable.
#[derive(Debug, Clone, Default)]
pub struct Panel {
    title: String,
}

impl Panel {
    pub fn new(title: impl Into<String>) -> Self {
        Self { title: title.into() }
    }
}

impl Widget for Panel {
    fn call_getter(&self, getter: &str) -> Option<PropValue> {
        match getter {
            "title" => Some(PropValue::Str(self.title.clone())),
            _ => None,
        }
    }

    fn call_setter(
        &mut self,
        setter: &str,
        _value: &PropValue,
    ) -> Result<Option<&'static str>, SetterError> {
        Err(unknown(setter))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_combo_facets() {
        let mut combo = ComboBox::new(["Speakers", "Headphones"]);
        assert_eq!(combo.call_getter("current_text"), Some("Speakers".into()));

        let signal = combo.call_setter("set_index", &PropValue::Int(1)).unwrap();
        assert_eq!(signal, Some("item_changed"));
        assert_eq!(combo.current_text(), "Headphones");

        combo.call_setter("set_current_text", &"Speakers".into()).unwrap();
        assert_eq!(combo.current_index(), 0);

        combo.call_setter("set_index", &PropValue::Int(9)).unwrap();
        assert_eq!(combo.current_index(), -1);
        assert_eq!(combo.current_text(), "");
    }

    #[test]
    fn test_combo_items_signal_only_on_change() {
        let mut combo = ComboBox::new(["A", "B"]);
        let same = PropValue::StrList(vec!["A".into(), "B".into()]);
        assert_eq!(combo.call_setter("set_items", &same).unwrap(), None);

        let more = PropValue::StrList(vec!["A".into(), "B".into(), "C".into()]);
        assert_eq!(combo.call_setter("set_items", &more).unwrap(), Some("item_changed"));
        assert_eq!(combo.items().len(), 3);
        assert_eq!(combo.current_index(), 0);

        // Shrinking past the selection drops it.
        combo.call_setter("set_index", &PropValue::Int(2)).unwrap();
        assert_eq!(combo.call_setter("set_items", &same).unwrap(), Some("item_changed"));
        assert_eq!(combo.current_index(), -1);
    }

    #[test]
    fn test_slider_clamps_and_rejects_text() {
        let mut slider = Slider::new(0, 10);
        slider.call_setter("set_value", &PropValue::Int(42)).unwrap();
        assert_eq!(slider.value(), 10);

        let err = slider.call_setter("set_value", &"loud".into()).unwrap_err();
        assert_eq!(
            err,
            SetterError::TypeMismatch {
                expected: PropType::Int,
                found: PropValue::Str("loud".into()),
            }
        );
    }

    #[test]
    fn test_float_edit_takes_ints() {
        let mut edit = FloatLineEdit::new(0.0);
        assert_eq!(edit.call_setter("set_value", &PropValue::Int(2)).unwrap(), Some("text_changed"));
        assert_eq!(edit.value(), 2.0);
    }

    #[test]
    fn test_unchanged_state_emits_nothing() {
        let mut check = CheckBox::new("Mute");
        assert_eq!(check.call_setter("set_checked", &false.into()).unwrap(), None);
        assert_eq!(check.call_setter("set_checked", &true.into()).unwrap(), Some("toggled"));
    }

    #[test]
    fn test_panel_has_no_setters() {
        let mut panel = Panel::new("Mixer");
        assert!(panel.call_setter("set_title", &"x".into()).is_err());
        assert_eq!(panel.call_getter("title"), Some("Mixer".into()));
    }
}
