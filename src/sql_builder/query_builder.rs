//! Selection-driven query building
//!
//! Turns a target table (or a multi-table column set) plus the active
//! selections into a single SELECT along inferred relationship paths.
//! Aliases are assigned sequentially (`t`, `t1`, `t2`, …) in join order and
//! a table is never joined twice. Path search runs over a prioritized edge
//! list so equal-length alternatives resolve toward tables already joined
//! and toward bare table names, keeping composite queries on one consistent
//! join tree.

use std::collections::HashMap;
use std::collections::HashSet;

use crate::schema_catalog::relationship_discovery::Relationship;
use crate::schema_catalog::traversal::{find_path, prioritize_relationships};
use crate::selection_model::{ColumnSelection, FieldSelection};

use super::render_query::{
    FromTable, Join, JoinCondition, JoinKind, Predicate, SelectExpr, SelectItem, SelectQuery, ToSql,
};

/// Cap applied to every distinct-value query.
pub const MAX_DISTINCT_VALUES: usize = 10_000;

/// A compiled multi-table projection: the SQL plus the mapping from each
/// output column name back to the (table, column) it projects. Columns whose
/// table could not be reached are absent from the mapping.
#[derive(Debug, Clone, PartialEq)]
pub struct CompositeQuery {
    pub sql: String,
    pub column_mapping: HashMap<String, ColumnSelection>,
}

/// Incrementally grows one join tree rooted at the base table.
struct JoinPlanner<'a> {
    base_table: &'a str,
    relationships: &'a [Relationship],
    /// Maps table name to its assigned alias; the base table is always `t`.
    aliases: HashMap<String, String>,
    joins: Vec<Join>,
    next_alias: usize,
}

impl<'a> JoinPlanner<'a> {
    fn new(base_table: &'a str, relationships: &'a [Relationship]) -> Self {
        let mut aliases = HashMap::new();
        aliases.insert(base_table.to_string(), "t".to_string());
        Self {
            base_table,
            relationships,
            aliases,
            joins: Vec::new(),
            next_alias: 1,
        }
    }

    fn alias_of(&self, table: &str) -> Option<String> {
        self.aliases.get(table).cloned()
    }

    /// Join `table` into the tree (walking a relationship path from the base
    /// table) and return its alias. Tables already in the tree keep their
    /// alias and join kind. Returns `None` when no path exists.
    fn ensure_joined(&mut self, table: &str, kind: JoinKind) -> Option<String> {
        if let Some(alias) = self.aliases.get(table) {
            return Some(alias.clone());
        }

        let joined: HashSet<String> = self.aliases.keys().cloned().collect();
        let ordered = prioritize_relationships(self.relationships, &joined);
        let path = find_path(self.base_table, table, &ordered)?;

        let mut current = self.base_table.to_string();
        for edge in &path {
            let (far_table, far_column) = edge.other_end(&current)?;
            let (far_table, far_column) = (far_table.to_string(), far_column.to_string());
            if !self.aliases.contains_key(&far_table) {
                let near_alias = self.aliases.get(&current)?.clone();
                let near_column = edge.column_on(&current)?.to_string();
                let far_alias = format!("t{}", self.next_alias);
                self.next_alias += 1;
                self.joins.push(Join {
                    table: far_table.clone(),
                    alias: far_alias.clone(),
                    kind,
                    on: JoinCondition {
                        left_alias: near_alias,
                        left_column: near_column,
                        right_alias: far_alias.clone(),
                        right_column: far_column,
                    },
                });
                self.aliases.insert(far_table.clone(), far_alias);
            }
            current = far_table;
        }
        self.aliases.get(table).cloned()
    }
}

/// Compile the row query for one table under the active selections.
///
/// With no selections this is a plain `SELECT * FROM <table> LIMIT <n>`.
/// Selections on other tables pull in one JOIN per path edge; the target is
/// then aliased `t` and the result de-duplicated with DISTINCT. A selection
/// whose table cannot be reached is skipped with a diagnostic.
pub fn build_table_query(
    target_table: &str,
    selections: &[FieldSelection],
    relationships: &[Relationship],
    limit: usize,
) -> String {
    if selections.is_empty() {
        let query = SelectQuery {
            select: vec![SelectItem::bare(SelectExpr::Star { table_alias: None })],
            distinct: false,
            from: Some(FromTable {
                table: target_table.to_string(),
                alias: None,
            }),
            joins: Vec::new(),
            predicates: Vec::new(),
            order_by: None,
            limit: Some(limit),
        };
        return query.to_sql();
    }

    if selections.iter().all(|s| s.table == target_table) {
        let predicates = selections
            .iter()
            .map(|s| Predicate::InList {
                table_alias: None,
                column: s.column.clone(),
                values: s.values.clone(),
            })
            .collect();
        let query = SelectQuery {
            select: vec![SelectItem::bare(SelectExpr::Star { table_alias: None })],
            distinct: false,
            from: Some(FromTable {
                table: target_table.to_string(),
                alias: None,
            }),
            joins: Vec::new(),
            predicates,
            order_by: None,
            limit: Some(limit),
        };
        return query.to_sql();
    }

    let mut planner = JoinPlanner::new(target_table, relationships);
    let mut predicates = Vec::new();
    for selection in selections {
        let alias = if selection.table == target_table {
            planner.alias_of(target_table)
        } else {
            planner.ensure_joined(&selection.table, JoinKind::Join)
        };
        let Some(alias) = alias else {
            log::warn!(
                "selection on {}.{} skipped: no relationship path from {}",
                selection.table,
                selection.column,
                target_table
            );
            continue;
        };
        predicates.push(Predicate::InList {
            table_alias: Some(alias),
            column: selection.column.clone(),
            values: selection.values.clone(),
        });
    }

    let distinct = !planner.joins.is_empty();
    let query = SelectQuery {
        select: vec![SelectItem::bare(SelectExpr::Star {
            table_alias: Some("t".to_string()),
        })],
        distinct,
        from: Some(FromTable {
            table: target_table.to_string(),
            alias: Some("t".to_string()),
        }),
        joins: planner.joins,
        predicates,
        order_by: None,
        limit: Some(limit),
    };
    query.to_sql()
}

/// Compile the distinct-values query for one field under every *other*
/// active filter. A selection on the queried field itself never filters it;
/// with no other filters this degenerates to the plain unfiltered distinct
/// query.
pub fn build_possible_values_query(
    target_table: &str,
    target_column: &str,
    selections: &[FieldSelection],
    relationships: &[Relationship],
) -> String {
    let effective: Vec<&FieldSelection> = selections
        .iter()
        .filter(|s| !s.is_on(target_table, target_column))
        .collect();

    if effective.is_empty() {
        let query = SelectQuery {
            select: vec![SelectItem::bare(SelectExpr::Column {
                table_alias: None,
                column: target_column.to_string(),
            })],
            distinct: true,
            from: Some(FromTable {
                table: target_table.to_string(),
                alias: None,
            }),
            joins: Vec::new(),
            predicates: Vec::new(),
            order_by: None,
            limit: Some(MAX_DISTINCT_VALUES),
        };
        return query.to_sql();
    }

    let mut planner = JoinPlanner::new(target_table, relationships);
    let mut predicates = Vec::new();
    for selection in effective {
        let alias = if selection.table == target_table {
            planner.alias_of(target_table)
        } else {
            planner.ensure_joined(&selection.table, JoinKind::Join)
        };
        let Some(alias) = alias else {
            log::warn!(
                "filter on {}.{} skipped for possible values of {}.{}: no relationship path",
                selection.table,
                selection.column,
                target_table,
                target_column
            );
            continue;
        };
        predicates.push(Predicate::InList {
            table_alias: Some(alias),
            column: selection.column.clone(),
            values: selection.values.clone(),
        });
    }

    let query = SelectQuery {
        select: vec![SelectItem::bare(SelectExpr::Column {
            table_alias: Some("t".to_string()),
            column: target_column.to_string(),
        })],
        distinct: true,
        from: Some(FromTable {
            table: target_table.to_string(),
            alias: Some("t".to_string()),
        }),
        joins: planner.joins,
        predicates,
        order_by: None,
        limit: Some(MAX_DISTINCT_VALUES),
    };
    query.to_sql()
}

/// Compile a projection whose columns are drawn from more than one table.
///
/// The first column's table anchors the join tree. Display tables join with
/// `LEFT JOIN` so base rows missing a related record still appear (with
/// NULLs); tables that only contribute filters join with `JOIN`. Columns on
/// unreachable tables are dropped from both the select list and the
/// returned mapping. An empty or fully-unreachable column set compiles to
/// the explicit empty query.
pub fn build_composite_table_query(
    columns: &[ColumnSelection],
    selections: &[FieldSelection],
    relationships: &[Relationship],
    limit: usize,
) -> CompositeQuery {
    let Some(base) = columns.first() else {
        return CompositeQuery {
            sql: SelectQuery::empty().to_sql(),
            column_mapping: HashMap::new(),
        };
    };

    let mut planner = JoinPlanner::new(&base.table, relationships);

    // Resolve display tables first, in first-appearance order, so their
    // aliases win over filter-only paths.
    let mut included: Vec<(&ColumnSelection, String)> = Vec::new();
    for column in columns {
        match planner.ensure_joined(&column.table, JoinKind::Left) {
            Some(alias) => included.push((column, alias)),
            None => log::warn!(
                "column {}.{} dropped from composite query: no relationship path from {}",
                column.table,
                column.column,
                base.table
            ),
        }
    }
    if included.is_empty() {
        return CompositeQuery {
            sql: SelectQuery::empty().to_sql(),
            column_mapping: HashMap::new(),
        };
    }

    let mut predicates = Vec::new();
    for selection in selections {
        let Some(alias) = planner.ensure_joined(&selection.table, JoinKind::Join) else {
            log::warn!(
                "selection on {}.{} skipped in composite query: no relationship path from {}",
                selection.table,
                selection.column,
                base.table
            );
            continue;
        };
        predicates.push(Predicate::InList {
            table_alias: Some(alias),
            column: selection.column.clone(),
            values: selection.values.clone(),
        });
    }

    // Output names: the bare column name when unique across the projection,
    // `<table>_<column>` on collision, numeric suffix if even that repeats.
    let mut name_counts: HashMap<&str, usize> = HashMap::new();
    for (column, _) in &included {
        *name_counts.entry(column.column.as_str()).or_insert(0) += 1;
    }
    let mut used_names: HashSet<String> = HashSet::new();
    let mut select = Vec::new();
    let mut column_mapping = HashMap::new();
    for (column, alias) in &included {
        let base_name = if name_counts[column.column.as_str()] > 1 {
            format!("{}_{}", sanitize_table_part(&column.table), column.column)
        } else {
            column.column.clone()
        };
        let mut output_name = base_name.clone();
        let mut suffix = 2;
        while !used_names.insert(output_name.clone()) {
            output_name = format!("{base_name}_{suffix}");
            suffix += 1;
        }

        let output_alias = (output_name != column.column).then(|| output_name.clone());
        select.push(SelectItem {
            expression: SelectExpr::Column {
                table_alias: Some(alias.clone()),
                column: column.column.clone(),
            },
            output_alias,
        });
        column_mapping.insert(output_name, (*column).clone());
    }

    let distinct = !planner.joins.is_empty();
    let query = SelectQuery {
        select,
        distinct,
        from: Some(FromTable {
            table: base.table.clone(),
            alias: Some("t".to_string()),
        }),
        joins: planner.joins,
        predicates,
        order_by: None,
        limit: Some(limit),
    };
    CompositeQuery {
        sql: query.to_sql(),
        column_mapping,
    }
}

/// The unqualified table name with non-alphanumerics folded to `_`, used as
/// an output-column prefix.
fn sanitize_table_part(table: &str) -> String {
    let bare = table.rsplit('.').next().unwrap_or(table);
    bare.chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect()
}
