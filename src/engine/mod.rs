//! Engine facade
//!
//! The four operations the surrounding application consumes: filtered rows
//! for one table, the distinct values of one field, selection-state
//! propagation across the schema, and summary statistics. The engine is
//! stateless: every operation is a pure function of the schema snapshot,
//! the selection set, and the execution capability passed to it.

pub mod executor;

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::schema_catalog::relationship_discovery::Relationship;
use crate::schema_catalog::TableSchema;
use crate::selection_model::{ColumnSelection, FieldSelection, FieldState, ScalarValue};
use crate::sql_builder::{
    build_table_query, FromTable, SelectExpr, SelectItem, SelectQuery, ToSql, MAX_DISTINCT_VALUES,
};
use crate::state_calculator;

use executor::{column_values, QueryExecutionError, QueryExecutor, QueryRows};

/// Row counts reported by [`get_selection_stats`] are capped here; the probe
/// requests one row more so a capped table is distinguishable from an exact
/// hit.
const STATS_ROW_CAP: usize = MAX_DISTINCT_VALUES;

/// Rows of `table` that survive the active selections, joined along inferred
/// relationship paths.
pub async fn get_filtered_table_data(
    table: &str,
    selections: &[FieldSelection],
    relationships: &[Relationship],
    executor: &dyn QueryExecutor,
    limit: usize,
) -> Result<QueryRows, QueryExecutionError> {
    let sql = build_table_query(table, selections, relationships, limit);
    log::debug!("filtered rows for {table}: {sql}");
    executor.execute(&sql).await
}

/// Distinct values of one field, ordered, capped at 10,000.
pub async fn get_field_values(
    table: &str,
    column: &str,
    executor: &dyn QueryExecutor,
) -> Result<Vec<ScalarValue>, QueryExecutionError> {
    let query = SelectQuery {
        select: vec![SelectItem::bare(SelectExpr::Column {
            table_alias: None,
            column: column.to_string(),
        })],
        distinct: true,
        from: Some(FromTable {
            table: table.to_string(),
            alias: None,
        }),
        joins: Vec::new(),
        predicates: Vec::new(),
        order_by: Some(SelectExpr::Column {
            table_alias: None,
            column: column.to_string(),
        }),
        limit: Some(MAX_DISTINCT_VALUES),
    };
    let rows = executor.execute(&query.to_sql()).await?;
    Ok(column_values(&rows, column))
}

/// Recompute field states for the current selection set. Empty selections
/// short-circuit to an empty result; everything is `Possible` by
/// convention and no query needs to run.
pub async fn propagate_selection(
    tables: &[TableSchema],
    selections: &[FieldSelection],
    relationships: &[Relationship],
    executor: &dyn QueryExecutor,
    target_fields: Option<&[ColumnSelection]>,
) -> Vec<FieldState> {
    if selections.is_empty() {
        return Vec::new();
    }
    state_calculator::calculate_field_states(
        tables,
        selections,
        relationships,
        executor,
        target_fields,
    )
    .await
}

/// Summary of the current selection set and its reach.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionStats {
    pub total_tables: usize,
    /// Tables directly carrying at least one selection.
    pub affected_tables: usize,
    /// Total selected values across all fields.
    pub selected_values: usize,
    /// Per table, the row count reachable under the current filters,
    /// capped at 10,000.
    pub table_row_counts: HashMap<String, u64>,
}

/// Count reachable rows per table under the active selections. A table
/// whose probe fails is recorded as 0; the pass never aborts.
pub async fn get_selection_stats(
    tables: &[TableSchema],
    selections: &[FieldSelection],
    relationships: &[Relationship],
    executor: &dyn QueryExecutor,
) -> SelectionStats {
    let affected: HashSet<&str> = selections.iter().map(|s| s.table.as_str()).collect();
    let selected_values = selections.iter().map(|s| s.value_keys().len()).sum();

    let mut table_row_counts = HashMap::new();
    for table in tables {
        let sql = build_table_query(&table.name, selections, relationships, STATS_ROW_CAP + 1);
        let count = match executor.execute(&sql).await {
            Ok(rows) => rows.len().min(STATS_ROW_CAP) as u64,
            Err(err) => {
                log::warn!("row count for {} recorded as 0: {err}", table.name);
                0
            }
        };
        table_row_counts.insert(table.name.clone(), count);
    }

    SelectionStats {
        total_tables: tables.len(),
        affected_tables: affected.len(),
        selected_values,
        table_row_counts,
    }
}
