//! Recursive default synthesis for schema nodes.
//!
//! Fills in declared `default` values for object, array, and primitive
//! schemas. Object schemas always synthesize an object (possibly empty)
//! so a freshly selected branch has a well-formed base value; schemas
//! with no reachable default synthesize nothing.

use serde_json::{Map, Value};

use crate::error::ResolveError;
use crate::resolver::resolve_ref;

/// Compute the default value for a schema, merged under any current data.
///
/// Defaults are synthesized recursively: a declared `default` wins for its
/// node, object properties contribute their own defaults, and `minItems`
/// arrays are filled from the item default. When `current` is provided it
/// is merged over the synthesized defaults, recursively for objects, with
/// the current value winning at every leaf.
///
/// Returns `None` when the schema declares no default anywhere and is not
/// object-typed.
///
/// # Errors
///
/// Returns a reference error for an absent `$ref` target, or
/// `ResolveError::CircularRef` when a definition recursively contains
/// itself (there is no finite default for such a schema).
pub fn compute_defaults(
    schema: &Value,
    current: Option<&Value>,
    definitions: &Map<String, Value>,
) -> Result<Option<Value>, ResolveError> {
    let mut in_flight = Vec::new();
    let defaults = synthesize(schema, None, definitions, &mut in_flight)?;
    Ok(merge_over(defaults, current))
}

fn synthesize(
    schema: &Value,
    parent_default: Option<&Value>,
    definitions: &Map<String, Value>,
    in_flight: &mut Vec<String>,
) -> Result<Option<Value>, ResolveError> {
    if let Some(reference) = schema.get("$ref").and_then(|v| v.as_str()) {
        // A definition reached again while its own default is still being
        // synthesized has no finite default.
        if in_flight.iter().any(|r| r == reference) {
            return Err(ResolveError::CircularRef {
                reference: reference.to_string(),
            });
        }
        in_flight.push(reference.to_string());
        let resolved = resolve_ref(reference, definitions)?;
        let result = synthesize(&resolved, parent_default, definitions, in_flight);
        in_flight.pop();
        return result;
    }

    // Node-level base: a declared default wins; an object-typed declared
    // default merges over the default inherited from the parent.
    let base: Option<Value> = match (schema.get("default"), parent_default) {
        (Some(Value::Object(declared)), Some(Value::Object(inherited))) => {
            Some(merge_objects(inherited.clone(), declared))
        }
        (Some(declared), _) => Some(declared.clone()),
        (None, inherited) => inherited.cloned(),
    };

    match schema.get("type").and_then(|t| t.as_str()) {
        Some("object") => {
            let mut result = Map::new();
            if let Some(props) = schema.get("properties").and_then(|p| p.as_object()) {
                for (name, prop_schema) in props {
                    let inherited = base.as_ref().and_then(|b| b.get(name));
                    if let Some(child) =
                        synthesize(prop_schema, inherited, definitions, in_flight)?
                    {
                        result.insert(name.clone(), child);
                    }
                }
            }
            Ok(Some(Value::Object(result)))
        }
        Some("array") => {
            if base.is_some() {
                return Ok(base);
            }
            let min_items = schema
                .get("minItems")
                .and_then(|v| v.as_u64())
                .unwrap_or(0) as usize;
            if min_items == 0 {
                return Ok(None);
            }
            let Some(items) = schema.get("items") else {
                return Ok(None);
            };
            match synthesize(items, None, definitions, in_flight)? {
                Some(item_default) => Ok(Some(Value::Array(vec![item_default; min_items]))),
                None => Ok(None),
            }
        }
        _ => Ok(base),
    }
}

/// Merge current data over synthesized defaults; current wins at leaves.
fn merge_over(defaults: Option<Value>, current: Option<&Value>) -> Option<Value> {
    match (defaults, current) {
        (defaults, None) => defaults,
        (Some(Value::Object(defaults)), Some(Value::Object(current))) => {
            Some(merge_objects(defaults, current))
        }
        (_, Some(current)) => Some(current.clone()),
    }
}

fn merge_objects(mut base: Map<String, Value>, over: &Map<String, Value>) -> Value {
    for (key, value) in over {
        let merged = match (base.get(key), value) {
            (Some(Value::Object(existing)), Value::Object(incoming)) => {
                merge_objects(existing.clone(), incoming)
            }
            _ => value.clone(),
        };
        base.insert(key.clone(), merged);
    }
    Value::Object(base)
}
