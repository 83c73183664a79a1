//! Selection-state computation
//!
//! For every field the calculator answers one question: how does each
//! observed value stand relative to the active selections? Values on a
//! selected field are `Selected` or `Alternative`; values elsewhere are
//! `Possible` when some join path still reaches them under the other
//! filters, `Excluded` when none does. A field whose queries fail is left
//! unclassified; the presentation layer defaults unclassified values to
//! `Possible`, so an engine failure can never hide data.

use std::collections::HashSet;

use thiserror::Error;

use crate::engine::executor::{column_values, QueryExecutionError, QueryExecutor};
use crate::schema_catalog::relationship_discovery::Relationship;
use crate::schema_catalog::TableSchema;
use crate::selection_model::{ColumnSelection, FieldSelection, FieldState, SelectionState};
use crate::sql_builder::build_possible_values_query;

#[derive(Debug, Clone, Error)]
pub enum StateError {
    #[error(transparent)]
    Execution(#[from] QueryExecutionError),
}

/// Classify every observed value of one field.
///
/// With no selections anywhere the result is empty: everything defaults to
/// `Possible` at the presentation boundary and no query is worth running.
pub async fn calculate_field_state(
    table: &str,
    column: &str,
    selections: &[FieldSelection],
    relationships: &[Relationship],
    executor: &dyn QueryExecutor,
) -> Result<FieldState, StateError> {
    let mut state = FieldState::new(table, column);
    if selections.is_empty() {
        return Ok(state);
    }

    let observed_sql = build_possible_values_query(table, column, &[], relationships);
    let observed = column_values(&executor.execute(&observed_sql).await?, column);

    if let Some(own) = selections.iter().find(|s| s.is_on(table, column)) {
        let selected_keys = own.value_keys();
        let mut emitted: HashSet<String> = HashSet::new();
        for value in observed {
            let classification = if selected_keys.contains(&value.canonical_key()) {
                SelectionState::Selected
            } else {
                SelectionState::Alternative
            };
            emitted.insert(value.canonical_key());
            state.value_states.push((value, classification));
        }
        // A selected value the unfiltered scan no longer returns stays
        // selected; the selection is the user's, not the data's.
        for value in &own.values {
            if emitted.insert(value.canonical_key()) {
                state
                    .value_states
                    .push((value.clone(), SelectionState::Selected));
            }
        }
    } else {
        let possible_sql = build_possible_values_query(table, column, selections, relationships);
        let possible = column_values(&executor.execute(&possible_sql).await?, column);
        let possible_keys: HashSet<String> =
            possible.iter().map(|v| v.canonical_key()).collect();
        for value in observed {
            let classification = if possible_keys.contains(&value.canonical_key()) {
                SelectionState::Possible
            } else {
                SelectionState::Excluded
            };
            state.value_states.push((value, classification));
        }
    }
    Ok(state)
}

/// Classify a set of fields: the whole schema by default, or the given
/// allow-list. Fields carrying a selection are always included regardless of
/// the allow-list. A field whose computation fails is logged and omitted;
/// its siblings are unaffected.
pub async fn calculate_field_states(
    tables: &[TableSchema],
    selections: &[FieldSelection],
    relationships: &[Relationship],
    executor: &dyn QueryExecutor,
    target_fields: Option<&[ColumnSelection]>,
) -> Vec<FieldState> {
    if selections.is_empty() {
        return Vec::new();
    }

    let mut seen: HashSet<(String, String)> = HashSet::new();
    let mut fields: Vec<ColumnSelection> = Vec::new();
    let mut add = |fields: &mut Vec<ColumnSelection>, table: &str, column: &str| {
        if seen.insert((table.to_string(), column.to_string())) {
            fields.push(ColumnSelection::new(table, column));
        }
    };

    match target_fields {
        Some(targets) => {
            for target in targets {
                add(&mut fields, &target.table, &target.column);
            }
        }
        None => {
            for table in tables {
                for column in &table.columns {
                    add(&mut fields, &table.name, &column.name);
                }
            }
        }
    }
    for selection in selections {
        add(&mut fields, &selection.table, &selection.column);
    }

    let mut states = Vec::new();
    for field in fields {
        match calculate_field_state(
            &field.table,
            &field.column,
            selections,
            relationships,
            executor,
        )
        .await
        {
            Ok(state) => states.push(state),
            Err(err) => log::warn!(
                "field {}.{} left unclassified: {err}",
                field.table,
                field.column
            ),
        }
    }
    states
}
