//! Relationship inference from column-naming conventions
//!
//! Nothing here reads real foreign-key constraints: relationships are
//! inferred from how columns are named, scored by type compatibility, and
//! deduplicated so each unordered endpoint pair appears once. Detection is a
//! pure function over a schema snapshot and never fails; a name that fits no
//! pattern simply contributes no edge.

use serde::{Deserialize, Serialize};

use super::{families_compatible, normalize_name, ColumnInfo, TableSchema};

/// How much the naming and typing evidence supports an inferred edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    High,
    Medium,
    Low,
}

/// An inferred foreign-key-like edge between two columns.
///
/// The edge is stored directed (FK side to id side) but every traversal in
/// [`super::traversal`] walks it in both directions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Relationship {
    /// Deterministic key derived from the four endpoints.
    pub id: String,
    pub from_table: String,
    pub from_column: String,
    pub to_table: String,
    pub to_column: String,
    pub confidence: Confidence,
}

impl Relationship {
    pub fn new(
        from_table: impl Into<String>,
        from_column: impl Into<String>,
        to_table: impl Into<String>,
        to_column: impl Into<String>,
        confidence: Confidence,
    ) -> Self {
        let (from_table, from_column) = (from_table.into(), from_column.into());
        let (to_table, to_column) = (to_table.into(), to_column.into());
        let id = format!("{from_table}.{from_column}->{to_table}.{to_column}");
        Self {
            id,
            from_table,
            from_column,
            to_table,
            to_column,
            confidence,
        }
    }

    /// Whether this edge has `table` at either end.
    pub fn touches(&self, table: &str) -> bool {
        self.from_table == table || self.to_table == table
    }

    /// The table at the opposite end from `table`, with its join column.
    /// Returns `None` when `table` is at neither end.
    pub fn other_end(&self, table: &str) -> Option<(&str, &str)> {
        if self.from_table == table {
            Some((&self.to_table, &self.to_column))
        } else if self.to_table == table {
            Some((&self.from_table, &self.from_column))
        } else {
            None
        }
    }

    /// The join column on the `table` side of this edge.
    pub fn column_on(&self, table: &str) -> Option<&str> {
        if self.from_table == table {
            Some(&self.from_column)
        } else if self.to_table == table {
            Some(&self.to_column)
        } else {
            None
        }
    }

    /// Same unordered pair of (table, column) endpoints, in either direction.
    fn same_endpoints(&self, other: &Relationship) -> bool {
        let straight = self.from_table == other.from_table
            && self.from_column == other.from_column
            && self.to_table == other.to_table
            && self.to_column == other.to_column;
        let crossed = self.from_table == other.to_table
            && self.from_column == other.to_column
            && self.to_table == other.from_table
            && self.to_column == other.from_column;
        straight || crossed
    }
}

/// Infer the relationship graph for a schema snapshot.
///
/// Two naming patterns are tested for every column:
///
/// 1. **FK suffix**: a non-`id` column ending in `id` (`CustomerID`,
///    `customer_id`) names its referenced table by stem; the referenced
///    table must expose an `id` (or `<table>id`) column.
/// 2. **Id reflection**: a column literally named `id` on one table is
///    matched against `<table>id` / `<table>_id` columns everywhere else,
///    which catches referencing tables the stem match missed.
pub fn detect_relationships(tables: &[TableSchema]) -> Vec<Relationship> {
    let mut relationships: Vec<Relationship> = Vec::new();

    for table in tables {
        for column in &table.columns {
            let lower = column.name.to_lowercase();
            if lower == "id" || !lower.ends_with("id") {
                continue;
            }
            let stem = lower[..lower.len() - 2]
                .trim_end_matches('_')
                .replace('_', "");
            if stem.is_empty() {
                continue;
            }

            for other in tables.iter().filter(|t| t.name != table.name) {
                let table_norm = normalize_name(&other.name);
                if !stem_matches_table(&stem, &table_norm) {
                    continue;
                }
                let Some(target) = referenced_id_column(other, &table_norm) else {
                    continue;
                };
                let confidence = score(column, target);
                push_unique(
                    &mut relationships,
                    Relationship::new(&table.name, &column.name, &other.name, &target.name, confidence),
                );
            }
        }
    }

    for table in tables {
        let Some(id_column) = table.columns.iter().find(|c| c.name.to_lowercase() == "id") else {
            continue;
        };
        let table_norm = normalize_name(&table.name);
        let singular = table_norm.strip_suffix('s');

        for other in tables.iter().filter(|t| t.name != table.name) {
            for column in &other.columns {
                let column_norm = normalize_name(&column.name);
                let reflects = column_norm == format!("{table_norm}id")
                    || singular.is_some_and(|s| column_norm == format!("{s}id"));
                if !reflects {
                    continue;
                }
                let confidence = score(column, id_column);
                push_unique(
                    &mut relationships,
                    Relationship::new(
                        &other.name,
                        &column.name,
                        &table.name,
                        &id_column.name,
                        confidence,
                    ),
                );
            }
        }
    }

    relationships
}

/// FK stem vs normalized table name, tolerating one trailing `s` on either.
fn stem_matches_table(stem: &str, table_norm: &str) -> bool {
    table_norm == stem
        || table_norm.strip_suffix('s').is_some_and(|t| t == stem)
        || stem.strip_suffix('s').is_some_and(|s| s == table_norm)
}

/// The id column an FK may point at: literally `id`, or `<table>id`.
fn referenced_id_column<'a>(table: &'a TableSchema, table_norm: &str) -> Option<&'a ColumnInfo> {
    table.columns.iter().find(|c| {
        let norm = normalize_name(&c.name);
        norm == "id" || norm == format!("{table_norm}id")
    })
}

fn score(from: &ColumnInfo, to: &ColumnInfo) -> Confidence {
    let compatible = families_compatible(&from.data_type, &to.data_type);
    let target_is_id = to.name.to_lowercase() == "id";
    match (compatible, target_is_id) {
        (true, true) => Confidence::High,
        (true, false) => Confidence::Medium,
        _ => Confidence::Low,
    }
}

/// Append unless an edge over the same unordered endpoints already exists.
/// Linear scan; schemas here are tens of tables, not thousands.
fn push_unique(relationships: &mut Vec<Relationship>, candidate: Relationship) {
    if relationships.iter().any(|r| r.same_endpoints(&candidate)) {
        return;
    }
    log::debug!(
        "inferred relationship {} (confidence {:?})",
        candidate.id,
        candidate.confidence
    );
    relationships.push(candidate);
}
