//! Runtime values evaluated against a rule tree
//!
//! Both the caller-supplied value mapping and the comparison operands inside
//! rules use the same tagged [`Value`] representation. Numbers of every
//! width are widened to `f64` at this boundary so the evaluator only ever
//! compares one numeric representation.

use crate::error::{Result, RuleError};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashMap;
use std::fmt;

/// A runtime value: one of the four kinds the evaluator understands
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Bool(bool),
    Number(f64),
    String(String),
    StringSeq(Vec<String>),
}

/// Classification tag for a [`Value`], used for operator dispatch and in
/// error payloads
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Bool,
    Number,
    String,
    StringSeq,
}

/// The caller-supplied mapping of property names to runtime values
pub type ValueMap = HashMap<String, Value>;

impl Value {
    /// Classify this value for operator dispatch
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Bool(_) => ValueKind::Bool,
            Value::Number(_) => ValueKind::Number,
            Value::String(_) => ValueKind::String,
            Value::StringSeq(_) => ValueKind::StringSeq,
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ValueKind::Bool => "bool",
            ValueKind::Number => "number",
            ValueKind::String => "string",
            ValueKind::StringSeq => "string sequence",
        };
        f.write_str(name)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Value {
        Value::Bool(b)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Value {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Value {
        Value::String(s)
    }
}

impl From<Vec<String>> for Value {
    fn from(seq: Vec<String>) -> Value {
        Value::StringSeq(seq)
    }
}

impl From<Vec<&str>> for Value {
    fn from(seq: Vec<&str>) -> Value {
        Value::StringSeq(seq.into_iter().map(str::to_string).collect())
    }
}

macro_rules! impl_from_number {
    ($($ty:ty),* $(,)?) => {$(
        impl From<$ty> for Value {
            fn from(n: $ty) -> Value {
                Value::Number(n as f64)
            }
        }
    )*};
}

impl_from_number!(i8, i16, i32, i64, u8, u16, u32, u64, f32, f64);

/// Name of a raw JSON value's type, for error messages
fn json_type_name(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}

impl TryFrom<serde_json::Value> for Value {
    type Error = RuleError;

    /// Classify a raw JSON value into one of the four supported kinds
    ///
    /// `null`, objects, and arrays with non-string elements have no place in
    /// the evaluator and are rejected here, at the boundary.
    fn try_from(raw: serde_json::Value) -> Result<Value> {
        match raw {
            serde_json::Value::Bool(b) => Ok(Value::Bool(b)),
            serde_json::Value::Number(n) => n
                .as_f64()
                .map(Value::Number)
                .ok_or_else(|| RuleError::UnsupportedValueType(format!("number {}", n))),
            serde_json::Value::String(s) => Ok(Value::String(s)),
            serde_json::Value::Array(items) => items
                .into_iter()
                .map(|item| match item {
                    serde_json::Value::String(s) => Ok(s),
                    other => Err(RuleError::UnsupportedValueType(format!(
                        "array containing {}",
                        json_type_name(&other)
                    ))),
                })
                .collect::<Result<Vec<String>>>()
                .map(Value::StringSeq),
            other => Err(RuleError::UnsupportedValueType(
                json_type_name(&other).to_string(),
            )),
        }
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Value, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = serde_json::Value::deserialize(deserializer)?;
        Value::try_from(raw).map_err(serde::de::Error::custom)
    }
}

/// Deserialize a value mapping from a JSON object
///
/// Expected format: `{"name": <bool|number|string|[string, ...]>, ...}`
pub fn values_from_json(json: &str) -> Result<ValueMap> {
    Ok(serde_json::from_str(json)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_kind_classification() {
        assert_eq!(Value::from(true).kind(), ValueKind::Bool);
        assert_eq!(Value::from(10).kind(), ValueKind::Number);
        assert_eq!(Value::from("hi").kind(), ValueKind::String);
        assert_eq!(Value::from(vec!["a", "b"]).kind(), ValueKind::StringSeq);
    }

    #[test]
    fn test_numeric_widening() {
        let tens: Vec<Value> = vec![
            Value::from(10i8),
            Value::from(10i16),
            Value::from(10i32),
            Value::from(10i64),
            Value::from(10u8),
            Value::from(10u16),
            Value::from(10u32),
            Value::from(10u64),
            Value::from(10.0f32),
            Value::from(10.0f64),
        ];
        for ten in tens {
            assert_eq!(ten, Value::Number(10.0));
        }
    }

    #[test]
    fn test_try_from_json_scalars() {
        assert_eq!(Value::try_from(json!(true)).unwrap(), Value::Bool(true));
        assert_eq!(Value::try_from(json!(7.5)).unwrap(), Value::Number(7.5));
        assert_eq!(
            Value::try_from(json!("hello")).unwrap(),
            Value::String("hello".to_string())
        );
        assert_eq!(
            Value::try_from(json!(["a", "b"])).unwrap(),
            Value::StringSeq(vec!["a".to_string(), "b".to_string()])
        );
    }

    #[test]
    fn test_try_from_json_rejects_unsupported() {
        assert!(matches!(
            Value::try_from(json!(null)),
            Err(RuleError::UnsupportedValueType(t)) if t == "null"
        ));
        assert!(matches!(
            Value::try_from(json!({"a": 1})),
            Err(RuleError::UnsupportedValueType(t)) if t == "object"
        ));
        assert!(matches!(
            Value::try_from(json!(["a", 1])),
            Err(RuleError::UnsupportedValueType(t)) if t == "array containing number"
        ));
    }

    #[test]
    fn test_values_from_json() {
        let values = values_from_json(
            r#"{"name": "ada", "age": 36, "admin": false, "tags": ["x", "y"]}"#,
        )
        .unwrap();
        assert_eq!(values.get("name"), Some(&Value::from("ada")));
        assert_eq!(values.get("age"), Some(&Value::Number(36.0)));
        assert_eq!(values.get("admin"), Some(&Value::Bool(false)));
        assert_eq!(values.get("tags"), Some(&Value::from(vec!["x", "y"])));
    }

    #[test]
    fn test_values_from_json_rejects_nested_object() {
        let err = values_from_json(r#"{"profile": {"age": 36}}"#).unwrap_err();
        assert!(err.to_string().contains("object"));
    }

    #[test]
    fn test_value_serializes_untagged() {
        assert_eq!(serde_json::to_string(&Value::from(10)).unwrap(), "10.0");
        assert_eq!(
            serde_json::to_string(&Value::from("hi")).unwrap(),
            "\"hi\""
        );
        assert_eq!(
            serde_json::to_string(&Value::from(vec!["a"])).unwrap(),
            "[\"a\"]"
        );
    }
}
