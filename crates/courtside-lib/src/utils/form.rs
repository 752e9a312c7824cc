// Boolean-like field coercion
// Browsers, form encoders, and older backup files disagree on how a flag is
// spelled. The accepted truthy inputs are fixed: bool true, string "true",
// string "1", numeric 1. Everything else is false. Nothing stringly-typed
// passes beyond this boundary.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Parse a flag arriving as a form text field
pub fn parse_flag(value: &str) -> bool {
    matches!(value, "true" | "1")
}

/// Interpret a JSON value as a flag
pub fn flag_from_value(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_i64() == Some(1),
        Value::String(s) => parse_flag(s),
        _ => false,
    }
}

/// serde deserializer for flag fields: `#[serde(deserialize_with = "boolish")]`
pub fn boolish<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(flag_from_value(&value))
}
