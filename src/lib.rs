//! Union Schema Resolver
//!
//! Runtime resolution of JSON Schema `anyOf`/`oneOf` unions against
//! partial form data.
//!
//! Given a union node and a candidate value, this library determines which
//! branch the value currently satisfies, and computes the replacement
//! value when a caller explicitly switches branches. A plain validator
//! verdict is not enough for matching: an object branch with no `required`
//! accepts almost any object, so branches are augmented at match time to
//! demand at least one of their own keys.
//!
//! # Example
//!
//! ```
//! use union_schema::UnionSession;
//! use serde_json::json;
//!
//! let schema = json!({
//!     "anyOf": [
//!         { "type": "object", "properties": { "a": { "type": "string" } } },
//!         { "type": "object", "properties": { "b": { "type": "number" } } }
//!     ]
//! });
//! let data = json!({ "a": "x" });
//!
//! let mut session = UnionSession::for_schema(&schema, Some(&data)).unwrap();
//! assert_eq!(session.selection(), 0);
//!
//! // The user switches to the second branch: the "a" key belonged to the
//! // first branch and is discarded.
//! let new_data = session.on_user_select(1, Some(&data)).unwrap();
//! assert_eq!(new_data, Some(json!({})));
//! assert_eq!(session.selection(), 1);
//! ```
//!
//! # Matching semantics
//!
//! | Branch shape | Match signal |
//! |--------------|--------------|
//! | has `properties` | at least one own key present, and present keys validate |
//! | primitive / enum / array | standard validator semantics |
//! | pure `$ref` | resolved through the definitions table first |
//!
//! Branches are tried in declaration order; the first that validates wins.
//! When nothing matches, the match is reported as `None`; the index-0
//! fallback is applied only at presentation boundaries and never overrides
//! a previously confirmed selection.

mod augment;
mod defaults;
mod error;
mod loader;
mod matcher;
mod resolver;
mod session;
mod switcher;
mod types;
mod validator;

pub use augment::augment_branch;
pub use defaults::compute_defaults;
pub use error::{ResolveError, SchemaError, ValidateError};
pub use loader::{load_json, load_json_str};
pub use matcher::{matching_option, selection_or_default};
pub use resolver::{resolve_ref, resolve_schema};
pub use session::{ChangeCallback, UnionSession};
pub use switcher::switch_option;
pub use types::{
    is_object_schema, is_ref, json_type_name, schema_definitions, union_branches, UnionKind,
};
pub use validator::{is_valid, validate, with_definitions};
