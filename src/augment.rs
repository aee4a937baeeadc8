//! Match-time branch augmentation.
//!
//! A loosely-specified object branch (no `required`) validates almost any
//! object, so a raw validator verdict carries no signal about which union
//! branch the data belongs to. Augmentation derives a stricter schema used
//! only for matching: the data must possess at least one of the branch's
//! own keys, and whatever it possesses must validate. The original branch
//! is never mutated; the augmented schema is a freshly built value.

use serde_json::{json, Map, Value};

/// Build the stricter matching schema for a union branch.
///
/// Branches without a `properties` map (primitives, enums, arrays) are
/// returned unchanged; their standard type/enum semantics already
/// discriminate. For object branches:
///
/// 1. An auxiliary `anyOf` of single-element `required` arrays is built
///    over the branch's own property names, in declaration order.
/// 2. If the branch declares its own `anyOf`, the auxiliary constraint is
///    appended under `allOf` so both disjunctions must hold; otherwise the
///    auxiliary `anyOf` is merged directly alongside the branch's keys.
/// 3. Any top-level `required` is stripped: mid-edit data legitimately
///    lacks required fields.
pub fn augment_branch(branch: &Value) -> Value {
    let Some(obj) = branch.as_object() else {
        return branch.clone();
    };
    let Some(props) = obj.get("properties").and_then(|p| p.as_object()) else {
        return branch.clone();
    };
    // A branch declaring no keys has nothing to anchor on; leave the
    // validator's standard semantics in charge.
    if props.is_empty() {
        return branch.clone();
    }

    let any_of_required: Vec<Value> = props.keys().map(|key| json!({ "required": [key] })).collect();

    let mut augmented: Map<String, Value> = obj.clone();

    if augmented.contains_key("anyOf") {
        // The branch's own disjunction stays in place; the auxiliary
        // constraint joins it under allOf.
        let mut all_of = match augmented.get("allOf").and_then(|v| v.as_array()) {
            Some(existing) => existing.clone(),
            None => Vec::new(),
        };
        all_of.push(json!({ "anyOf": any_of_required }));
        augmented.insert("allOf".to_string(), Value::Array(all_of));
    } else {
        augmented.insert("anyOf".to_string(), Value::Array(any_of_required));
    }

    augmented.remove("required");

    Value::Object(augmented)
}
