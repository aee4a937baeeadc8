//! `$ref` resolution against an in-memory definitions table.

use std::collections::HashSet;

use serde_json::{Map, Value};

use crate::error::ResolveError;
use crate::types::{is_ref, DEFINITION_KEYS};

/// Resolve a `$ref` string through the definitions table.
///
/// Accepts JSON Pointer fragments rooted at a definitions key
/// (`#/definitions/Name`, `#/$defs/Name`, including nested segments with
/// `~1`/`~0` unescaping) as well as a bare definition name looked up by
/// exact key. If the referenced node itself carries a `$ref`, resolution
/// continues through the chain; revisiting a reference fails fast.
///
/// # Errors
///
/// Returns `ResolveError::UnresolvedRef` if the target is absent, or
/// `ResolveError::CircularRef` if the chain revisits a reference.
pub fn resolve_ref(
    reference: &str,
    definitions: &Map<String, Value>,
) -> Result<Value, ResolveError> {
    let mut visited = HashSet::new();
    let mut current = reference.to_string();

    loop {
        if !visited.insert(current.clone()) {
            return Err(ResolveError::CircularRef {
                reference: reference.to_string(),
            });
        }

        let target = lookup(&current, definitions)?;
        match target.get("$ref").and_then(|v| v.as_str()) {
            Some(next) => current = next.to_string(),
            None => return Ok(target),
        }
    }
}

/// Return a copy of a schema with a top-level `$ref` (if any) resolved.
///
/// Non-reference schemas pass through cloned. Nested references inside
/// `properties`, `items`, etc. are left for the validator.
///
/// # Errors
///
/// Propagates reference errors from [`resolve_ref`].
pub fn resolve_schema(
    schema: &Value,
    definitions: &Map<String, Value>,
) -> Result<Value, ResolveError> {
    if is_ref(schema) {
        // is_ref guarantees a string $ref
        let reference = schema.get("$ref").and_then(|v| v.as_str()).unwrap_or("");
        resolve_ref(reference, definitions)
    } else {
        Ok(schema.clone())
    }
}

/// Look up a single reference in the definitions table, without following
/// chains.
fn lookup(reference: &str, definitions: &Map<String, Value>) -> Result<Value, ResolveError> {
    let unresolved = || ResolveError::UnresolvedRef {
        reference: reference.to_string(),
    };

    // Pointer form: "#/definitions/..." or "#/$defs/..."
    for key in DEFINITION_KEYS {
        let prefix = format!("#/{}/", key);
        if let Some(path) = reference.strip_prefix(&prefix) {
            let mut parts = path.split('/');
            let first = unescape_pointer(parts.next().unwrap_or_default());
            let mut current = definitions.get(&first).ok_or_else(unresolved)?;
            for part in parts {
                let segment = unescape_pointer(part);
                current = current.get(&segment).ok_or_else(unresolved)?;
            }
            return Ok(current.clone());
        }
    }

    // Bare name: exact key in the table
    definitions.get(reference).cloned().ok_or_else(unresolved)
}

/// Unescape JSON Pointer encoding (`~1` = `/`, `~0` = `~`).
fn unescape_pointer(part: &str) -> String {
    part.replace("~1", "/").replace("~0", "~")
}
