//! Defaults-safe lookups into the loosely shaped search payload.
//!
//! Every helper resolves a missing hop (absent key, wrong type, short array)
//! to `None` or an empty slice instead of failing.

use serde_json::Value;

/// Value at a JSON pointer such as `/title/runs/0/text`.
pub fn json_path<'a>(value: &'a Value, pointer: &str) -> Option<&'a Value> {
    value.pointer(pointer)
}

/// String at `pointer`, if present and actually a string.
pub fn str_at(value: &Value, pointer: &str) -> Option<String> {
    json_path(value, pointer)
        .and_then(Value::as_str)
        .map(str::to_owned)
}

/// Array at `pointer`, or an empty slice.
pub fn array_at<'a>(value: &'a Value, pointer: &str) -> &'a [Value] {
    json_path(value, pointer)
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or(&[])
}

/// Text of the first run in a `{"runs": [{"text": ...}]}` block under `key`.
pub fn first_run_text(value: &Value, key: &str) -> Option<String> {
    str_at(value, &format!("/{key}/runs/0/text"))
}

/// Text of a `{"simpleText": ...}` block under `key`.
pub fn simple_text(value: &Value, key: &str) -> Option<String> {
    str_at(value, &format!("/{key}/simpleText"))
}
