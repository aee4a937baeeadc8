//! Core types and schema-shape helpers for union resolution.

use serde_json::{Map, Value};

/// Keys under which a schema node may carry its definitions table.
pub const DEFINITION_KEYS: &[&str] = &["definitions", "$defs"];

/// Returns the JSON type name for error messages.
pub fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Which union keyword a schema node carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnionKind {
    AnyOf,
    OneOf,
}

impl UnionKind {
    /// Returns the schema keyword for this union kind.
    pub fn keyword(&self) -> &'static str {
        match self {
            UnionKind::AnyOf => "anyOf",
            UnionKind::OneOf => "oneOf",
        }
    }
}

/// Extract the ordered branch list from a union node.
///
/// Checks `anyOf` first, then `oneOf`. Returns `None` if the node carries
/// neither keyword or the keyword's value is not an array.
pub fn union_branches(schema: &Value) -> Option<(UnionKind, Vec<Value>)> {
    for kind in [UnionKind::AnyOf, UnionKind::OneOf] {
        if let Some(arr) = schema.get(kind.keyword()).and_then(|v| v.as_array()) {
            return Some((kind, arr.clone()));
        }
    }
    None
}

/// Extract the definitions table from a schema node.
///
/// Accepts both draft-06/07 `definitions` and the newer `$defs`.
/// Returns an empty table if neither is present.
pub fn schema_definitions(schema: &Value) -> Map<String, Value> {
    for key in DEFINITION_KEYS {
        if let Some(defs) = schema.get(*key).and_then(|v| v.as_object()) {
            return defs.clone();
        }
    }
    Map::new()
}

/// True if a schema describes an object: declares `"type": "object"` or
/// carries a `properties` map.
pub fn is_object_schema(schema: &Value) -> bool {
    let declares_object = schema
        .get("type")
        .and_then(|t| t.as_str())
        .map(|t| t == "object")
        .unwrap_or(false);
    declares_object || schema.get("properties").is_some()
}

/// True if a schema node is a pure reference: carries a string `$ref`.
pub fn is_ref(schema: &Value) -> bool {
    schema.get("$ref").and_then(|v| v.as_str()).is_some()
}
