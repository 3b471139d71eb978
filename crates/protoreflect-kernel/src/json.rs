//! JSON discrimination protocol for reflected nodes.
//!
//! A schema loader walks raw JSON descriptors and asks each node kind in
//! turn whether it recognizes a descriptor (`test_json`), then builds the
//! first match (`from_json`). Both halves are total: recognition answers
//! `false` for anything unexpected and construction falls back to defaults.

use serde_json::Value;

/// A node kind that can be recognized in and built from raw schema JSON.
pub trait NodeJson: Sized {
    /// Whether `json` describes a node of this kind.
    fn test_json(json: &Value) -> bool;

    /// Build a node of this kind named `name` from `json`.
    fn from_json(name: &str, json: &Value) -> Self;

    /// Recognize and build in one step.
    fn try_from_json(name: &str, json: &Value) -> Option<Self> {
        Self::test_json(json).then(|| Self::from_json(name, json))
    }
}

/// Whether `value` counts as set in a schema descriptor.
///
/// Containers count as set even when empty; `null`, `false`, zero, and the
/// empty string do not.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Whether `json` is an object carrying a truthy `key` member.
pub fn has_truthy_member(json: &Value, key: &str) -> bool {
    json.as_object()
        .and_then(|object| object.get(key))
        .is_some_and(is_truthy)
}
