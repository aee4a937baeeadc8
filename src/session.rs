//! Stateful union session: owns the selected-option state and the two
//! entry points that may change it.

use serde_json::{Map, Value};

use crate::error::ResolveError;
use crate::matcher::{matching_option, selection_or_default};
use crate::resolver::resolve_schema;
use crate::switcher::switch_option;
use crate::types::{schema_definitions, union_branches};

/// Callback invoked with the emitted form data after a user-driven switch.
pub type ChangeCallback = Box<dyn FnMut(Option<&Value>)>;

/// One instance of the matching engine bound to a union node.
///
/// The session owns the branch list, the definitions table, and the
/// selected-option index, the only mutable state in this crate. The
/// selection is initialized by matching at creation and changes only
/// through [`on_external_data_change`](UnionSession::on_external_data_change)
/// and [`on_user_select`](UnionSession::on_user_select).
///
/// Internally a no-match is distinct from "matched branch 0": the index-0
/// fallback is applied once, at creation, and an inbound update that
/// matches nothing leaves the current selection in place.
pub struct UnionSession {
    branches: Vec<Value>,
    definitions: Map<String, Value>,
    selected: usize,
    on_change: Option<ChangeCallback>,
}

impl std::fmt::Debug for UnionSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UnionSession")
            .field("branches", &self.branches.len())
            .field("selected", &self.selected)
            .finish()
    }
}

impl UnionSession {
    /// Create a session from an explicit branch list and definitions table.
    ///
    /// The initial selection is the first branch the data matches, falling
    /// back to branch 0 when nothing does (including absent data).
    ///
    /// # Errors
    ///
    /// Returns `ResolveError::InvalidSchema` for an empty branch list, or
    /// any error the initial match surfaces.
    pub fn new(
        branches: Vec<Value>,
        definitions: Map<String, Value>,
        initial_data: Option<&Value>,
    ) -> Result<Self, ResolveError> {
        if branches.is_empty() {
            return Err(ResolveError::InvalidSchema {
                message: "union has no branches".to_string(),
            });
        }
        let matched = matching_option(initial_data, &branches, &definitions)?;
        Ok(Self {
            selected: selection_or_default(matched),
            branches,
            definitions,
            on_change: None,
        })
    }

    /// Create a session from a schema node carrying `anyOf`/`oneOf`,
    /// extracting its `definitions`/`$defs` table.
    ///
    /// # Errors
    ///
    /// Returns `ResolveError::InvalidSchema` if the node carries neither
    /// union keyword.
    pub fn for_schema(schema: &Value, initial_data: Option<&Value>) -> Result<Self, ResolveError> {
        let Some((_, branches)) = union_branches(schema) else {
            return Err(ResolveError::InvalidSchema {
                message: "schema carries neither anyOf nor oneOf".to_string(),
            });
        };
        let definitions = schema_definitions(schema);
        Self::new(branches, definitions, initial_data)
    }

    /// Register the callback fired by [`on_user_select`](Self::on_user_select)
    /// with the emitted data.
    pub fn set_change_callback(&mut self, callback: impl FnMut(Option<&Value>) + 'static) {
        self.on_change = Some(Box::new(callback));
    }

    /// The currently selected branch index.
    pub fn selection(&self) -> usize {
        self.selected
    }

    /// The ordered branch list.
    pub fn branches(&self) -> &[Value] {
        &self.branches
    }

    /// The definitions table.
    pub fn definitions(&self) -> &Map<String, Value> {
        &self.definitions
    }

    /// The selected branch's schema, `$ref`-resolved, for the renderer.
    ///
    /// # Errors
    ///
    /// Propagates reference errors from resolution.
    pub fn active_schema(&self) -> Result<Value, ResolveError> {
        resolve_schema(&self.branches[self.selected], &self.definitions)
    }

    /// React to an externally supplied data change.
    ///
    /// Re-matches the data against the branch list. A concrete match is
    /// adopted as the new selection; a no-match leaves the current
    /// selection untouched; it never knocks a previously confirmed
    /// selection back to branch 0. Returns the (possibly unchanged)
    /// selection.
    ///
    /// # Errors
    ///
    /// Propagates reference and schema errors from matching.
    pub fn on_external_data_change(&mut self, data: Option<&Value>) -> Result<usize, ResolveError> {
        if let Some(index) = matching_option(data, &self.branches, &self.definitions)? {
            self.selected = index;
        }
        Ok(self.selected)
    }

    /// React to an explicit user branch choice.
    ///
    /// Computes the new form data via [`switch_option`], adopts the new
    /// selection, fires the change callback with the emitted data, and
    /// returns it. On error the selection is left unchanged.
    ///
    /// # Errors
    ///
    /// Returns `ResolveError::OptionOutOfRange` for an invalid index, or a
    /// reference error from resolving the new branch.
    pub fn on_user_select(
        &mut self,
        new_index: usize,
        data: Option<&Value>,
    ) -> Result<Option<Value>, ResolveError> {
        let new_data = switch_option(new_index, data, &self.branches, &self.definitions)?;
        self.selected = new_index;
        if let Some(callback) = self.on_change.as_mut() {
            callback(new_data.as_ref());
        }
        Ok(new_data)
    }
}
