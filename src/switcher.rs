//! User-driven branch switching.

use serde_json::{Map, Value};

use crate::defaults::compute_defaults;
use crate::error::ResolveError;
use crate::resolver::resolve_schema;
use crate::types::is_object_schema;

/// Compute the new form data after an explicit switch to another branch.
///
/// When the current data is an object and the newly selected branch is
/// object-typed, the new value is that branch's synthesized defaults
/// (computed against an empty base, not merged with the old object), with
/// every property name directly declared by any *other* branch removed:
/// a default that coincides with a sibling's key must not carry stale
/// sibling semantics into the fresh branch. In every other combination of
/// shapes the value is discarded (`None`): there is no principled
/// conversion between, say, a string and an object.
///
/// # Errors
///
/// Returns `ResolveError::OptionOutOfRange` if `new_index` is not a valid
/// branch index, or a reference error if the new branch's `$ref` target is
/// absent or cyclic.
pub fn switch_option(
    new_index: usize,
    data: Option<&Value>,
    branches: &[Value],
    definitions: &Map<String, Value>,
) -> Result<Option<Value>, ResolveError> {
    let branch = branches
        .get(new_index)
        .ok_or(ResolveError::OptionOutOfRange {
            index: new_index,
            count: branches.len(),
        })?;
    let branch = resolve_schema(branch, definitions)?;

    let data_is_object = matches!(data, Some(Value::Object(_)));
    if !(data_is_object && is_object_schema(&branch)) {
        return Ok(None);
    }

    let mut new_data = match compute_defaults(&branch, None, definitions)? {
        Some(Value::Object(map)) => map,
        _ => Map::new(),
    };

    // Discard any key a sibling branch declares, even when it coincides
    // with one of the fresh defaults.
    for (index, other) in branches.iter().enumerate() {
        if index == new_index {
            continue;
        }
        if let Some(props) = other.get("properties").and_then(|p| p.as_object()) {
            for key in props.keys() {
                new_data.remove(key);
            }
        }
    }

    Ok(Some(Value::Object(new_data)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn no_defs() -> Map<String, Value> {
        Map::new()
    }

    fn object_branches() -> Vec<Value> {
        vec![
            json!({
                "type": "object",
                "properties": { "a": { "type": "string" } }
            }),
            json!({
                "type": "object",
                "properties": { "b": { "type": "number" } }
            }),
        ]
    }

    #[test]
    fn switching_strips_previous_branch_keys() {
        let branches = object_branches();
        let data = json!({ "a": "x" });
        let new_data = switch_option(1, Some(&data), &branches, &no_defs()).unwrap();
        assert_eq!(new_data, Some(json!({})));
    }

    #[test]
    fn switching_fills_new_branch_defaults() {
        let branches = vec![
            json!({
                "type": "object",
                "properties": { "a": { "type": "string" } }
            }),
            json!({
                "type": "object",
                "properties": { "b": { "type": "number", "default": 7 } }
            }),
        ];
        let data = json!({ "a": "x" });
        let new_data = switch_option(1, Some(&data), &branches, &no_defs()).unwrap();
        assert_eq!(new_data, Some(json!({ "b": 7 })));
    }

    #[test]
    fn sibling_declared_key_is_stripped_even_from_fresh_defaults() {
        let branches = vec![
            json!({
                "type": "object",
                "properties": { "shared": { "type": "string" } }
            }),
            json!({
                "type": "object",
                "properties": {
                    "shared": { "type": "string", "default": "kept?" },
                    "own": { "type": "string", "default": "yes" }
                }
            }),
        ];
        let data = json!({ "shared": "old" });
        let new_data = switch_option(1, Some(&data), &branches, &no_defs()).unwrap();
        assert_eq!(new_data, Some(json!({ "own": "yes" })));
    }

    #[test]
    fn switching_to_non_object_branch_discards_data() {
        let branches = vec![
            json!({
                "type": "object",
                "properties": { "a": { "type": "string" } }
            }),
            json!({ "type": "string" }),
        ];
        let data = json!({ "a": "x" });
        let new_data = switch_option(1, Some(&data), &branches, &no_defs()).unwrap();
        assert_eq!(new_data, None);
    }

    #[test]
    fn switching_from_non_object_data_discards_data() {
        let branches = object_branches();
        let data = json!("just a string");
        let new_data = switch_option(1, Some(&data), &branches, &no_defs()).unwrap();
        assert_eq!(new_data, None);

        let new_data = switch_option(1, None, &branches, &no_defs()).unwrap();
        assert_eq!(new_data, None);
    }

    #[test]
    fn ref_branch_is_resolved_before_switching() {
        let defs = json!({
            "Numbered": {
                "type": "object",
                "properties": { "n": { "type": "number", "default": 1 } }
            }
        })
        .as_object()
        .unwrap()
        .clone();
        let branches = vec![
            json!({
                "type": "object",
                "properties": { "a": { "type": "string" } }
            }),
            json!({ "$ref": "#/definitions/Numbered" }),
        ];
        let data = json!({ "a": "x" });
        let new_data = switch_option(1, Some(&data), &branches, &defs).unwrap();
        assert_eq!(new_data, Some(json!({ "n": 1 })));
    }

    #[test]
    fn missing_ref_target_errors() {
        let branches = vec![
            json!({ "type": "object", "properties": { "a": {} } }),
            json!({ "$ref": "#/definitions/Missing" }),
        ];
        let data = json!({ "a": "x" });
        let result = switch_option(1, Some(&data), &branches, &no_defs());
        assert!(matches!(result, Err(ResolveError::UnresolvedRef { .. })));
    }

    #[test]
    fn out_of_range_index_errors() {
        let branches = object_branches();
        let data = json!({ "a": "x" });
        let result = switch_option(5, Some(&data), &branches, &no_defs());
        assert!(matches!(
            result,
            Err(ResolveError::OptionOutOfRange { index: 5, count: 2 })
        ));
    }
}
