//! Selection model
//!
//! The user-facing state of the associative view: which values are picked on
//! which fields, which columns a projection shows, and how every observed
//! value classifies against the active selection set. All of it is owned by
//! the calling layer; the engine reads selections and returns fresh state,
//! holding nothing between calls.

pub mod value;

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

pub use value::ScalarValue;

/// Classification of one observed value relative to the active selections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SelectionState {
    /// Picked by the user on this field.
    Selected,
    /// Reachable under the other active filters.
    Possible,
    /// Same field as an active selection, but not itself picked.
    Alternative,
    /// Not reachable under the current filters.
    Excluded,
}

/// The user's current filter on one field.
///
/// At most one per (table, column) pair; an empty value set is removed by
/// the owning layer rather than persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSelection {
    pub table: String,
    pub column: String,
    pub values: Vec<ScalarValue>,
}

impl FieldSelection {
    pub fn new(
        table: impl Into<String>,
        column: impl Into<String>,
        values: Vec<ScalarValue>,
    ) -> Self {
        Self {
            table: table.into(),
            column: column.into(),
            values,
        }
    }

    pub fn is_on(&self, table: &str, column: &str) -> bool {
        self.table == table && self.column == column
    }

    /// Canonical-key view of the value set for membership tests.
    pub fn value_keys(&self) -> HashSet<String> {
        self.values.iter().map(ScalarValue::canonical_key).collect()
    }
}

/// One output column of a (possibly multi-table) projection.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ColumnSelection {
    pub table: String,
    pub column: String,
}

impl ColumnSelection {
    pub fn new(table: impl Into<String>, column: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            column: column.into(),
        }
    }
}

/// The classification of every observed value of one field.
///
/// Recomputed wholesale whenever the global selection set changes; never
/// partially patched. Values are canonical-key deduplicated, so each value
/// carries exactly one state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldState {
    pub table: String,
    pub column: String,
    pub value_states: Vec<(ScalarValue, SelectionState)>,
}

impl FieldState {
    pub fn new(table: impl Into<String>, column: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            column: column.into(),
            value_states: Vec::new(),
        }
    }

    pub fn state_of(&self, value: &ScalarValue) -> Option<SelectionState> {
        self.value_states
            .iter()
            .find(|(v, _)| v == value)
            .map(|(_, s)| *s)
    }
}
