//! Validation of form data against branch schemas.
//!
//! Thin wrapper over the `jsonschema` crate. Branch schemas are validated
//! together with the definitions table so that nested `$ref` pointers
//! resolve during compilation.

use serde_json::{Map, Value};

use crate::error::{ResolveError, SchemaError, ValidateError};

/// Attach a definitions table to a schema for validation.
///
/// Returns a new schema value with the table available under both
/// `definitions` and `$defs`, so internal refs resolve regardless of which
/// pointer style the schema uses. Existing keys on the schema win.
/// Non-object schemas and empty tables pass through cloned.
pub fn with_definitions(schema: &Value, definitions: &Map<String, Value>) -> Value {
    let Some(obj) = schema.as_object() else {
        return schema.clone();
    };
    if definitions.is_empty() {
        return schema.clone();
    }

    let mut combined = obj.clone();
    for key in crate::types::DEFINITION_KEYS {
        combined
            .entry(key.to_string())
            .or_insert_with(|| Value::Object(definitions.clone()));
    }
    Value::Object(combined)
}

/// Boolean validation verdict for a schema plus definitions.
///
/// A branch failing to validate is expected control flow and returns
/// `Ok(false)`. A schema that cannot be compiled (for example a nested
/// `$ref` to an absent definition) is a real error, not a mismatch.
///
/// # Errors
///
/// Returns `ResolveError::InvalidSchema` if the schema fails to compile.
pub fn is_valid(
    schema: &Value,
    data: &Value,
    definitions: &Map<String, Value>,
) -> Result<bool, ResolveError> {
    let combined = with_definitions(schema, definitions);
    let validator =
        jsonschema::validator_for(&combined).map_err(|e| ResolveError::InvalidSchema {
            message: e.to_string(),
        })?;
    Ok(validator.is_valid(data))
}

/// Validate data against a schema plus definitions, collecting all errors.
///
/// # Errors
///
/// Returns `ValidateError::Resolve` if the schema fails to compile, or
/// `ValidateError::Invalid` with the full error list if the data doesn't
/// match.
pub fn validate(
    schema: &Value,
    data: &Value,
    definitions: &Map<String, Value>,
) -> Result<(), ValidateError> {
    let combined = with_definitions(schema, definitions);
    let validator =
        jsonschema::validator_for(&combined).map_err(|e| ResolveError::InvalidSchema {
            message: e.to_string(),
        })?;

    let errors: Vec<SchemaError> = validator
        .iter_errors(data)
        .map(|e| SchemaError {
            path: e.instance_path.to_string(),
            message: e.to_string(),
        })
        .collect();

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ValidateError::Invalid { errors })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn no_defs() -> Map<String, Value> {
        Map::new()
    }

    #[test]
    fn is_valid_accepts_matching_data() {
        let schema = json!({
            "type": "object",
            "properties": {
                "name": { "type": "string" }
            },
            "required": ["name"]
        });
        assert!(is_valid(&schema, &json!({ "name": "test" }), &no_defs()).unwrap());
    }

    #[test]
    fn is_valid_rejects_wrong_type() {
        let schema = json!({
            "type": "object",
            "properties": {
                "name": { "type": "string" }
            }
        });
        assert!(!is_valid(&schema, &json!({ "name": 123 }), &no_defs()).unwrap());
    }

    #[test]
    fn is_valid_resolves_nested_refs_through_definitions() {
        let schema = json!({
            "type": "object",
            "properties": {
                "home": { "$ref": "#/definitions/Address" }
            }
        });
        let defs = json!({
            "Address": {
                "type": "object",
                "properties": { "street": { "type": "string" } }
            }
        })
        .as_object()
        .unwrap()
        .clone();

        assert!(is_valid(&schema, &json!({ "home": { "street": "Main" } }), &defs).unwrap());
        assert!(!is_valid(&schema, &json!({ "home": { "street": 5 } }), &defs).unwrap());
    }

    #[test]
    fn is_valid_broken_nested_ref_is_an_error() {
        let schema = json!({
            "type": "object",
            "properties": {
                "home": { "$ref": "#/definitions/Missing" }
            }
        });
        let result = is_valid(&schema, &json!({}), &no_defs());
        assert!(matches!(result, Err(ResolveError::InvalidSchema { .. })));
    }

    #[test]
    fn validate_collects_multiple_errors() {
        let schema = json!({
            "type": "object",
            "properties": {
                "name": { "type": "string" },
                "age": { "type": "number" }
            },
            "required": ["name", "age"]
        });
        let result = validate(&schema, &json!({}), &no_defs());
        match result {
            Err(ValidateError::Invalid { errors }) => {
                assert_eq!(errors.len(), 2);
            }
            _ => panic!("expected validation error with 2 errors"),
        }
    }

    #[test]
    fn with_definitions_keeps_existing_keys() {
        let schema = json!({
            "type": "object",
            "definitions": { "Own": { "type": "string" } }
        });
        let defs = json!({ "Other": { "type": "number" } })
            .as_object()
            .unwrap()
            .clone();
        let combined = with_definitions(&schema, &defs);
        assert!(combined["definitions"].get("Own").is_some());
        assert!(combined["$defs"].get("Other").is_some());
    }
}
