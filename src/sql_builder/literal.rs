//! SQL literal rendering
//!
//! One place turns scalar values into literal text: strings single-quoted
//! with doubled quotes, booleans as TRUE/FALSE, timestamps as ISO-8601
//! string literals, NULL as NULL, numbers as their textual form.

use crate::selection_model::ScalarValue;

pub fn render_literal(value: &ScalarValue) -> String {
    match value {
        ScalarValue::Null => "NULL".to_string(),
        ScalarValue::Bool(true) => "TRUE".to_string(),
        ScalarValue::Bool(false) => "FALSE".to_string(),
        ScalarValue::Int(i) => i.to_string(),
        ScalarValue::Float(f) => f.to_string(),
        ScalarValue::Text(s) => format!("'{}'", s.replace('\'', "''")),
        ScalarValue::Timestamp(t) => format!("'{}'", t.to_rfc3339()),
    }
}
