//! First-match-wins branch selection.

use serde_json::{Map, Value};

use crate::augment::augment_branch;
use crate::error::ResolveError;
use crate::resolver::resolve_schema;
use crate::validator;

/// Find the first branch the data currently satisfies.
///
/// Branches are tried in declaration order; each is `$ref`-resolved if it
/// is a pure reference, augmented for matching, and validated together
/// with the definitions table. Returns `Some(index)` of the first branch
/// that validates, or `None` when nothing matches, including when the
/// data itself is absent. The index-0 presentation fallback is the
/// caller's concern (see [`selection_or_default`]).
///
/// Deterministic and side-effect-free: identical inputs yield identical
/// results.
///
/// # Errors
///
/// Returns a reference error if a branch's `$ref` target is absent or
/// cyclic, or `ResolveError::InvalidSchema` if an augmented branch fails
/// to compile.
pub fn matching_option(
    data: Option<&Value>,
    branches: &[Value],
    definitions: &Map<String, Value>,
) -> Result<Option<usize>, ResolveError> {
    let Some(data) = data else {
        return Ok(None);
    };

    for (index, branch) in branches.iter().enumerate() {
        let branch = resolve_schema(branch, definitions)?;
        let augmented = augment_branch(&branch);
        if validator::is_valid(&augmented, data, definitions)? {
            return Ok(Some(index));
        }
    }

    Ok(None)
}

/// Present a match result as a renderable branch index.
///
/// `None` (nothing matched) falls back to branch 0 so there is always a
/// renderable default. Callers tracking a prior selection should consume
/// the `Option` directly instead; the fallback deliberately conflates
/// "matched branch 0" with "matched nothing".
pub fn selection_or_default(matched: Option<usize>) -> usize {
    matched.unwrap_or(0)
}
