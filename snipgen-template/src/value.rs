//! Values visible to templates.

use std::borrow::Cow;

use indexmap::IndexMap;
use serde::Serialize;

/// A dynamically typed template value.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    List(Vec<Value>),
    Object(IndexMap<String, Value>),
}

pub(crate) static NULL: Value = Value::Null;

impl Value {
    /// Convert any serializable value, keeping its serialized field names.
    pub fn from_serialize<T: Serialize + ?Sized>(value: &T) -> Result<Self, serde_json::Error> {
        serde_json::to_value(value).map(Value::from)
    }

    /// Type name used in diagnostics.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "integer",
            Value::Float(_) => "float",
            Value::Str(_) => "string",
            Value::List(_) => "list",
            Value::Object(_) => "object",
        }
    }

    /// Null, `false`, zero, the empty string and the empty list are false.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Null => false,
            Value::Bool(b) => *b,
            Value::Int(i) => *i != 0,
            Value::Float(f) => *f != 0.0,
            Value::Str(s) => !s.is_empty(),
            Value::List(items) => !items.is_empty(),
            Value::Object(_) => true,
        }
    }

    /// Look up an object member.
    pub fn get(&self, key: &str) -> Option<&Value> {
        match self {
            Value::Object(map) => map.get(key),
            _ => None,
        }
    }

    /// Look up a list element or an object member by a computed key.
    pub(crate) fn index(&self, key: &Value) -> Option<&Value> {
        match (self, key) {
            (Value::List(items), Value::Int(i)) => usize::try_from(*i).ok().and_then(|i| items.get(i)),
            (Value::Object(map), Value::Str(k)) => map.get(k),
            _ => None,
        }
    }

    /// Text form of a scalar value. Lists and objects have none.
    pub fn as_text(&self) -> Option<Cow<'_, str>> {
        match self {
            Value::Null => Some(Cow::Borrowed("")),
            Value::Bool(b) => Some(Cow::Borrowed(if *b { "true" } else { "false" })),
            Value::Int(i) => Some(Cow::Owned(i.to_string())),
            Value::Float(f) => Some(Cow::Owned(f.to_string())),
            Value::Str(s) => Some(Cow::Borrowed(s)),
            Value::List(_) | Value::Object(_) => None,
        }
    }

    fn as_number(&self) -> Option<f64> {
        match self {
            Value::Int(i) => Some(*i as f64),
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Equality used by `==`: integers and floats compare numerically,
    /// values of different types are never equal.
    pub(crate) fn loose_eq(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Int(_), Value::Float(_)) | (Value::Float(_), Value::Int(_)) => {
                self.as_number() == other.as_number()
            }
            _ => self == other,
        }
    }

    /// Ordering used by `<`, `<=`, `>` and `>=`.
    ///
    /// Returns `None` when the operands cannot be ordered.
    pub(crate) fn partial_order(&self, other: &Value) -> Option<std::cmp::Ordering> {
        match (self, other) {
            (Value::Int(a), Value::Int(b)) => Some(a.cmp(b)),
            (Value::Str(a), Value::Str(b)) => Some(a.cmp(b)),
            _ => self.as_number()?.partial_cmp(&other.as_number()?),
        }
    }
}

impl From<serde_json::Value> for Value {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => Value::Int(i),
                None => Value::Float(n.as_f64().unwrap_or_default()),
            },
            serde_json::Value::String(s) => Value::Str(s),
            serde_json::Value::Array(items) => {
                Value::List(items.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(map) => {
                Value::Object(map.into_iter().map(|(k, v)| (k, Value::from(v))).collect())
            }
        }
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Str(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Str(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Int(value)
    }
}

impl From<usize> for Value {
    fn from(value: usize) -> Self {
        Value::Int(i64::try_from(value).unwrap_or(i64::MAX))
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(values: Vec<T>) -> Self {
        Value::List(values.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Null, Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Serialize)]
    #[serde(rename_all = "PascalCase")]
    struct Column {
        column_name: String,
        is_nullable: bool,
    }

    #[test]
    fn test_from_serialize_keeps_names() {
        let value = Value::from_serialize(&Column {
            column_name: "id".to_string(),
            is_nullable: false,
        })
        .unwrap();

        assert_eq!(value.get("ColumnName"), Some(&Value::from("id")));
        assert_eq!(value.get("IsNullable"), Some(&Value::Bool(false)));
        assert_eq!(value.get("column_name"), None);
    }

    #[test]
    fn test_truthiness() {
        assert!(!Value::Null.is_truthy());
        assert!(!Value::from("").is_truthy());
        assert!(!Value::Int(0).is_truthy());
        assert!(!Value::List(Vec::new()).is_truthy());
        assert!(Value::from("x").is_truthy());
        assert!(Value::Object(IndexMap::new()).is_truthy());
    }

    #[test]
    fn test_as_text() {
        assert_eq!(Value::Null.as_text().as_deref(), Some(""));
        assert_eq!(Value::Int(42).as_text().as_deref(), Some("42"));
        assert_eq!(Value::Bool(true).as_text().as_deref(), Some("true"));
        assert!(Value::from(vec!["a"]).as_text().is_none());
    }

    #[test]
    fn test_loose_eq() {
        assert!(Value::Int(2).loose_eq(&Value::Float(2.0)));
        assert!(!Value::Int(2).loose_eq(&Value::from("2")));
        assert!(Value::Null.loose_eq(&Value::Null));
        assert!(!Value::Null.loose_eq(&Value::from("")));
    }

    #[test]
    fn test_index() {
        let list = Value::from(vec!["a", "b"]);
        assert_eq!(list.index(&Value::Int(1)), Some(&Value::from("b")));
        assert_eq!(list.index(&Value::Int(2)), None);
        assert_eq!(list.index(&Value::Int(-1)), None);
    }
}
