//! Lenient numeric parsing for raw source values.

use serde_json::Value;

/// Markers sources use for "no observation".
const MISSING_MARKERS: &[&str] = &["", ".", "NaN", "nan", "null", "None"];

/// Parse a textual cell/field into a number.
///
/// Missing markers, unparsable text and non-finite results yield `None`.
pub fn parse_number(raw: &str) -> Option<f64> {
    let s = raw.trim();
    if MISSING_MARKERS.contains(&s) {
        return None;
    }
    s.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Parse a JSON field that may carry a number or a numeric string.
pub fn parse_json_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64().filter(|v| v.is_finite()),
        Value::String(s) => parse_number(s),
        _ => None,
    }
}
