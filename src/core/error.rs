//! Error types of the binding layer.
//!
//! Only setter failures are hard errors. Unsupported widgets, stale property
//! names and duplicate links are reported through `log` and skipped.

use crate::entities::{PropType, PropValue};

/// Failure raised by a widget accessor.
#[derive(Debug, Clone, PartialEq)]
pub enum SetterError {
    /// The setter exists but cannot take a value of this type.
    TypeMismatch { expected: PropType, found: PropValue },
    /// The widget exposes no accessor with this name.
    UnknownAccessor(String),
}

impl std::fmt::Display for SetterError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SetterError::TypeMismatch { expected, found } => {
                write!(f, "expected {}, got {}", expected, found)
            }
            SetterError::UnknownAccessor(name) => write!(f, "no accessor named '{}'", name),
        }
    }
}

impl std::error::Error for SetterError {}

/// Binding engine errors surfaced to the caller.
#[derive(Debug, Clone, PartialEq)]
pub enum BindError {
    /// Pushing a property value into a widget failed.
    CannotSetWidgetAttribute {
        widget: String,
        setter: String,
        value: PropValue,
        source: SetterError,
    },
}

impl std::fmt::Display for BindError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BindError::CannotSetWidgetAttribute {
                widget,
                setter,
                value,
                source,
            } => write!(
                f,
                "Cannot set widget attribute: widget: {}; setter: {}; value: {}: {}",
                widget, setter, value, source
            ),
        }
    }
}

impl std::error::Error for BindError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            BindError::CannotSetWidgetAttribute { source, .. } => Some(source),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bind_error_message_names_everything() {
        let err = BindError::CannotSetWidgetAttribute {
            widget: "volume_slider".into(),
            setter: "set_value".into(),
            value: PropValue::Str("loud".into()),
            source: SetterError::TypeMismatch {
                expected: PropType::Int,
                found: PropValue::Str("loud".into()),
            },
        };
        let msg = err.to_string();
        assert!(msg.contains("volume_slider"));
        assert!(msg.contains("set_value"));
        assert!(msg.contains("\"loud\""));
        assert!(msg.contains("expected int"));
    }
}
