//! Dynamic property values and their type hints.
//!
//! Notes:
//! - `PropValue` is serialized untagged, so a property table reads as plain JSON
//!   (`{"volume": 7, "muted": false}`).
//! - `PropType` is a hint only. The engine never rejects a value because of it;
//!   widgets decide what their setters accept.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Generic property value.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropValue {
    #[default]
    None,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    StrList(Vec<String>),
}

impl PropValue {
    pub fn is_none(&self) -> bool {
        matches!(self, PropValue::None)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            PropValue::Bool(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            PropValue::Int(v) => Some(*v),
            _ => None,
        }
    }

    /// Float view; integers widen losslessly enough for UI values.
    pub fn as_float(&self) -> Option<f64> {
        match self {
            PropValue::Float(v) => Some(*v),
            PropValue::Int(v) => Some(*v as f64),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            PropValue::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_str_list(&self) -> Option<&[String]> {
        match self {
            PropValue::StrList(v) => Some(v),
            _ => None,
        }
    }

    /// Type of the held value, `None` when unset.
    pub fn prop_type(&self) -> Option<PropType> {
        match self {
            PropValue::None => None,
            PropValue::Bool(_) => Some(PropType::Bool),
            PropValue::Int(_) => Some(PropType::Int),
            PropValue::Float(_) => Some(PropType::Float),
            PropValue::Str(_) => Some(PropType::Str),
            PropValue::StrList(_) => Some(PropType::StrList),
        }
    }

    /// Parse a command-line literal: JSON scalars/arrays first, bare text otherwise.
    ///
    /// `7` -> Int, `0.5` -> Float, `true` -> Bool, `["a","b"]` -> StrList,
    /// `hello` -> Str.
    pub fn parse_literal(text: &str) -> PropValue {
        serde_json::from_str::<PropValue>(text).unwrap_or_else(|_| PropValue::Str(text.to_string()))
    }
}

impl fmt::Display for PropValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropValue::None => write!(f, "None"),
            PropValue::Bool(v) => write!(f, "{}", v),
            PropValue::Int(v) => write!(f, "{}", v),
            PropValue::Float(v) => write!(f, "{}", v),
            PropValue::Str(v) => write!(f, "{:?}", v),
            PropValue::StrList(v) => write!(f, "{:?}", v),
        }
    }
}

impl From<bool> for PropValue {
    fn from(v: bool) -> Self {
        PropValue::Bool(v)
    }
}

impl From<i64> for PropValue {
    fn from(v: i64) -> Self {
        PropValue::Int(v)
    }
}

impl From<i32> for PropValue {
    fn from(v: i32) -> Self {
        PropValue::Int(v as i64)
    }
}

impl From<f64> for PropValue {
    fn from(v: f64) -> Self {
        PropValue::Float(v)
    }
}

impl From<&str> for PropValue {
    fn from(v: &str) -> Self {
        PropValue::Str(v.to_string())
    }
}

impl From<String> for PropValue {
    fn from(v: String) -> Self {
        PropValue::Str(v)
    }
}

impl From<Vec<String>> for PropValue {
    fn from(v: Vec<String>) -> Self {
        PropValue::StrList(v)
    }
}

/// Property type hint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PropType {
    Bool,
    Int,
    Float,
    Str,
    StrList,
    Any,
}

impl PropType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PropType::Bool => "bool",
            PropType::Int => "int",
            PropType::Float => "float",
            PropType::Str => "str",
            PropType::StrList => "list[str]",
            PropType::Any => "any",
        }
    }

    /// Whether `value` matches this hint. `Float` also takes integers.
    pub fn accepts(&self, value: &PropValue) -> bool {
        match (self, value) {
            (PropType::Any, _) => true,
            (PropType::Float, PropValue::Int(_)) => true,
            (ty, v) => v.prop_type() == Some(*ty),
        }
    }
}

impl fmt::Display for PropType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_literal() {
        assert_eq!(PropValue::parse_literal("7"), PropValue::Int(7));
        assert_eq!(PropValue::parse_literal("0.5"), PropValue::Float(0.5));
        assert_eq!(PropValue::parse_literal("true"), PropValue::Bool(true));
        assert_eq!(PropValue::parse_literal("null"), PropValue::None);
        assert_eq!(
            PropValue::parse_literal(r#"["a", "b"]"#),
            PropValue::StrList(vec!["a".into(), "b".into()])
        );
        assert_eq!(PropValue::parse_literal("hello"), PropValue::Str("hello".into()));
    }

    #[test]
    fn test_untagged_json() {
        let json = serde_json::to_string(&PropValue::Int(3)).unwrap();
        assert_eq!(json, "3");
        assert_eq!(serde_json::to_string(&PropValue::None).unwrap(), "null");
    }

    #[test]
    fn test_type_hint_accepts() {
        assert!(PropType::Float.accepts(&PropValue::Int(1)));
        assert!(!PropType::Int.accepts(&PropValue::Float(1.0)));
        assert!(PropType::Any.accepts(&PropValue::Str("x".into())));
        assert!(!PropType::Bool.accepts(&PropValue::None));
    }
}
