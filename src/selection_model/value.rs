//! Scalar database values
//!
//! One value type flows through the whole engine: selection sets, query
//! results, and classified field states all carry [`ScalarValue`]. Equality
//! and hashing go through a canonical string key so that logically-equal
//! temporal values collapse to one map entry regardless of how the driver
//! materialized them.

use std::fmt;
use std::hash::{Hash, Hasher};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A scalar as reported by the query-execution capability.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ScalarValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    Timestamp(DateTime<Utc>),
}

impl ScalarValue {
    /// Variant-prefixed canonical key. Timestamps normalize to UTC RFC 3339,
    /// so equal instants produce equal keys; `Int(1)` and `Float(1.0)` stay
    /// distinct.
    pub fn canonical_key(&self) -> String {
        match self {
            ScalarValue::Null => "null".to_string(),
            ScalarValue::Bool(b) => format!("b:{b}"),
            ScalarValue::Int(i) => format!("i:{i}"),
            ScalarValue::Float(f) => format!("f:{f}"),
            ScalarValue::Text(s) => format!("s:{s}"),
            ScalarValue::Timestamp(t) => format!("t:{}", t.to_rfc3339()),
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, ScalarValue::Null)
    }
}

impl PartialEq for ScalarValue {
    fn eq(&self, other: &Self) -> bool {
        self.canonical_key() == other.canonical_key()
    }
}

impl Eq for ScalarValue {}

impl Hash for ScalarValue {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.canonical_key().hash(state);
    }
}

impl fmt::Display for ScalarValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScalarValue::Null => write!(f, ""),
            ScalarValue::Bool(b) => write!(f, "{b}"),
            ScalarValue::Int(i) => write!(f, "{i}"),
            ScalarValue::Float(v) => write!(f, "{v}"),
            ScalarValue::Text(s) => write!(f, "{s}"),
            ScalarValue::Timestamp(t) => write!(f, "{}", t.to_rfc3339()),
        }
    }
}

impl From<bool> for ScalarValue {
    fn from(v: bool) -> Self {
        ScalarValue::Bool(v)
    }
}

impl From<i64> for ScalarValue {
    fn from(v: i64) -> Self {
        ScalarValue::Int(v)
    }
}

impl From<i32> for ScalarValue {
    fn from(v: i32) -> Self {
        ScalarValue::Int(v as i64)
    }
}

impl From<f64> for ScalarValue {
    fn from(v: f64) -> Self {
        ScalarValue::Float(v)
    }
}

impl From<&str> for ScalarValue {
    fn from(v: &str) -> Self {
        ScalarValue::Text(v.to_string())
    }
}

impl From<String> for ScalarValue {
    fn from(v: String) -> Self {
        ScalarValue::Text(v)
    }
}

impl From<DateTime<Utc>> for ScalarValue {
    fn from(v: DateTime<Utc>) -> Self {
        ScalarValue::Timestamp(v)
    }
}

/// Bridge for JSON-speaking database shells. Numbers become `Int` when they
/// fit `i64`, otherwise `Float`; arrays and objects degrade to their JSON
/// text (they are not scalars, but the engine must not lose them silently).
impl From<serde_json::Value> for ScalarValue {
    fn from(v: serde_json::Value) -> Self {
        match v {
            serde_json::Value::Null => ScalarValue::Null,
            serde_json::Value::Bool(b) => ScalarValue::Bool(b),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    ScalarValue::Int(i)
                } else {
                    ScalarValue::Float(n.as_f64().unwrap_or(f64::NAN))
                }
            }
            serde_json::Value::String(s) => ScalarValue::Text(s),
            other => ScalarValue::Text(other.to_string()),
        }
    }
}
