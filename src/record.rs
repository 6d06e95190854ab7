//! Records handed to the dispatcher and the keys read from them.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt::{self, Display};

/// An externally owned entity that can be rendered through a partial.
///
/// Implementors expose an explicit type tag instead of relying on runtime
/// reflection: the tag selects the per-type view directory under the
/// partials root.
pub trait Record {
    /// Short type name used as the view directory (e.g. `"Course"`).
    ///
    /// An empty tag means the record cannot be rendered by type.
    fn type_name(&self) -> &str;

    /// Reads a named field, or `None` if the record has no such field.
    fn field(&self, name: &str) -> Option<Value>;

    /// The record as a template context value, exposed to views as `model`.
    fn to_value(&self) -> Value;
}

impl<T: Record + ?Sized> Record for &T {
    fn type_name(&self) -> &str {
        (**self).type_name()
    }

    fn field(&self, name: &str) -> Option<Value> {
        (**self).field(name)
    }

    fn to_value(&self) -> Value {
        (**self).to_value()
    }
}

impl<T: Record + ?Sized> Record for Box<T> {
    fn type_name(&self) -> &str {
        (**self).type_name()
    }

    fn field(&self, name: &str) -> Option<Value> {
        (**self).field(name)
    }

    fn to_value(&self) -> Value {
        (**self).to_value()
    }
}

/// A record backed by a JSON object, used by fixtures and the in-memory store.
#[derive(Debug, Clone, PartialEq)]
pub struct DynamicRecord {
    type_name: String,
    fields: Map<String, Value>,
}

impl DynamicRecord {
    pub fn new(type_name: impl Into<String>, fields: Map<String, Value>) -> Self {
        Self { type_name: type_name.into(), fields }
    }

    /// Builds a record from a JSON value, which must be an object.
    pub fn from_value(type_name: impl Into<String>, value: Value) -> Result<Self> {
        let type_name = type_name.into();
        match value {
            Value::Object(fields) => Ok(Self { type_name, fields }),
            other => Err(Error::InvalidFixture(format!(
                "record of type '{type_name}' must be an object, got {other}"
            ))),
        }
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }
}

impl Record for DynamicRecord {
    fn type_name(&self) -> &str {
        &self.type_name
    }

    fn field(&self, name: &str) -> Option<Value> {
        self.fields.get(name).cloned()
    }

    fn to_value(&self) -> Value {
        Value::Object(self.fields.clone())
    }
}

/// Key of a rendered pair.
///
/// Mirrors how selection widgets key their options: integral values collapse
/// to integers (so `5` and `"5"` are the same option), everything else scalar
/// is kept as its exact text. Distinct values never share a key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PairKey {
    Int(i64),
    /// Integers above `i64::MAX`.
    UInt(u64),
    Str(String),
}

impl PairKey {
    /// Converts a field value into a key; `None` for arrays and objects.
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Null => Some(PairKey::Str(String::new())),
            Value::Bool(b) => Some(PairKey::Int(i64::from(*b))),
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Some(PairKey::Int(i))
                } else if let Some(u) = n.as_u64() {
                    Some(PairKey::UInt(u))
                } else {
                    Some(float_key(n))
                }
            }
            Value::String(s) => Some(PairKey::from(s.as_str())),
            Value::Array(_) | Value::Object(_) => None,
        }
    }

    /// Reads `field` from `record` and converts it into a key.
    pub fn read<R: Record + ?Sized>(record: &R, field: &str) -> Result<Self> {
        let value = record.field(field).ok_or_else(|| Error::KeyFieldNotFound {
            field: field.to_string(),
            type_name: record.type_name().to_string(),
        })?;
        Self::from_value(&value).ok_or_else(|| Error::InvalidPairKey {
            field: field.to_string(),
            type_name: record.type_name().to_string(),
        })
    }
}

/// Whole floats inside `i64` collapse to integers; the rest keep their text.
fn float_key(n: &serde_json::Number) -> PairKey {
    match n.as_f64() {
        // i64::MAX as f64 rounds up to 2^63, hence the strict upper bound.
        Some(f) if f.fract() == 0.0 && f >= i64::MIN as f64 && f < i64::MAX as f64 => {
            PairKey::Int(f as i64)
        }
        _ => PairKey::Str(n.to_string()),
    }
}

impl From<&str> for PairKey {
    fn from(s: &str) -> Self {
        // Only canonical decimal integers collapse; "05" and "+5" stay strings.
        if let Ok(i) = s.parse::<i64>() {
            if i.to_string() == s {
                return PairKey::Int(i);
            }
        } else if let Ok(u) = s.parse::<u64>() {
            if u.to_string() == s {
                return PairKey::UInt(u);
            }
        }
        PairKey::Str(s.to_string())
    }
}

impl From<i64> for PairKey {
    fn from(i: i64) -> Self {
        PairKey::Int(i)
    }
}

impl Display for PairKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PairKey::Int(i) => write!(f, "{i}"),
            PairKey::UInt(u) => write!(f, "{u}"),
            PairKey::Str(s) => write!(f, "{s}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn course(fields: Value) -> DynamicRecord {
        DynamicRecord::from_value("Course", fields).unwrap()
    }

    #[test]
    fn reads_fields_and_type_tag() {
        let record = course(json!({"id": 5, "title": "Rust"}));
        assert_eq!(record.type_name(), "Course");
        assert_eq!(record.field("title"), Some(json!("Rust")));
        assert_eq!(record.field("missing"), None);
        assert_eq!(record.to_value(), json!({"id": 5, "title": "Rust"}));
    }

    #[test]
    fn rejects_non_object_records() {
        let err = DynamicRecord::from_value("Course", json!([1, 2])).unwrap_err();
        assert!(matches!(err, Error::InvalidFixture(_)));
    }

    #[test]
    fn converts_scalar_values_to_keys() {
        assert_eq!(PairKey::from_value(&json!(7)), Some(PairKey::Int(7)));
        assert_eq!(PairKey::from_value(&json!("7")), Some(PairKey::Int(7)));
        assert_eq!(PairKey::from_value(&json!("07")), Some(PairKey::Str("07".into())));
        assert_eq!(PairKey::from_value(&json!(2.0)), Some(PairKey::Int(2)));
        assert_eq!(PairKey::from_value(&json!(2.9)), Some(PairKey::Str("2.9".into())));
        assert_eq!(PairKey::from_value(&json!(true)), Some(PairKey::Int(1)));
        assert_eq!(PairKey::from_value(&json!(null)), Some(PairKey::Str(String::new())));
        assert_eq!(PairKey::from_value(&json!("abc")), Some(PairKey::Str("abc".into())));
        assert_eq!(PairKey::from_value(&json!([1])), None);
        assert_eq!(PairKey::from_value(&json!({"a": 1})), None);
    }

    #[test]
    fn large_integers_keep_distinct_keys() {
        let max = PairKey::from_value(&json!(u64::MAX)).unwrap();
        let below = PairKey::from_value(&json!(u64::MAX - 1)).unwrap();
        assert_eq!(max, PairKey::UInt(u64::MAX));
        assert_ne!(max, below);
        assert_eq!(PairKey::from(u64::MAX.to_string().as_str()), max);
        assert_eq!(max.to_string(), u64::MAX.to_string());

        let huge = PairKey::from_value(&json!(1e20)).unwrap();
        let larger = PairKey::from_value(&json!(2e20)).unwrap();
        assert_ne!(huge, larger);
        assert!(matches!(huge, PairKey::Str(_)));
    }

    #[test]
    fn read_reports_missing_and_non_scalar_fields() {
        let record = course(json!({"id": 1, "tags": ["a"]}));
        assert_eq!(PairKey::read(&record, "id").unwrap(), PairKey::Int(1));
        assert!(matches!(
            PairKey::read(&record, "code"),
            Err(Error::KeyFieldNotFound { field, type_name }) if field == "code" && type_name == "Course"
        ));
        assert!(matches!(
            PairKey::read(&record, "tags"),
            Err(Error::InvalidPairKey { .. })
        ));
    }

    #[test]
    fn keys_serialize_untagged() {
        assert_eq!(serde_json::to_value(PairKey::Int(3)).unwrap(), json!(3));
        assert_eq!(serde_json::to_value(PairKey::Str("x".into())).unwrap(), json!("x"));
    }
}
