//! Typed SELECT representation and its text rendering
//!
//! The query builder assembles [`SelectQuery`] values; [`ToSql`] turns them
//! into dialect text (double-quoted identifiers, `JOIN`/`LEFT JOIN`,
//! `IN (...)` predicates, trailing `LIMIT`). Generated table aliases
//! (`t`, `t1`, …) are rendered bare; real identifiers are always quoted.

use serde::{Deserialize, Serialize};

use crate::schema_catalog::{quote_ident, quote_table};
use crate::selection_model::ScalarValue;

use super::literal::render_literal;

pub trait ToSql {
    fn to_sql(&self) -> String;
}

/// A single expression in a select list or ORDER BY.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SelectExpr {
    /// `*` or `alias.*`
    Star { table_alias: Option<String> },
    /// `"col"` or `alias."col"`
    Column {
        table_alias: Option<String>,
        column: String,
    },
    /// Literal NULL, the placeholder projection of the empty query.
    Null,
}

impl ToSql for SelectExpr {
    fn to_sql(&self) -> String {
        match self {
            SelectExpr::Star { table_alias: None } => "*".to_string(),
            SelectExpr::Star {
                table_alias: Some(alias),
            } => format!("{alias}.*"),
            SelectExpr::Column {
                table_alias: None,
                column,
            } => quote_ident(column),
            SelectExpr::Column {
                table_alias: Some(alias),
                column,
            } => format!("{alias}.{}", quote_ident(column)),
            SelectExpr::Null => "NULL".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectItem {
    pub expression: SelectExpr,
    pub output_alias: Option<String>,
}

impl SelectItem {
    pub fn bare(expression: SelectExpr) -> Self {
        Self {
            expression,
            output_alias: None,
        }
    }
}

impl ToSql for SelectItem {
    fn to_sql(&self) -> String {
        match &self.output_alias {
            Some(alias) => format!("{} AS {}", self.expression.to_sql(), quote_ident(alias)),
            None => self.expression.to_sql(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FromTable {
    pub table: String,
    pub alias: Option<String>,
}

impl ToSql for FromTable {
    fn to_sql(&self) -> String {
        match &self.alias {
            Some(alias) => format!("{} AS {alias}", quote_table(&self.table)),
            None => quote_table(&self.table),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum JoinKind {
    /// Inner join, used for tables that only contribute filters.
    Join,
    /// Preserves base rows with no related record; used for display columns.
    Left,
}

/// One equality between the already-joined side and the newly-joined table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JoinCondition {
    pub left_alias: String,
    pub left_column: String,
    pub right_alias: String,
    pub right_column: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Join {
    pub table: String,
    pub alias: String,
    pub kind: JoinKind,
    pub on: JoinCondition,
}

impl ToSql for Join {
    fn to_sql(&self) -> String {
        let keyword = match self.kind {
            JoinKind::Join => "JOIN",
            JoinKind::Left => "LEFT JOIN",
        };
        format!(
            "{keyword} {} AS {} ON {}.{} = {}.{}",
            quote_table(&self.table),
            self.alias,
            self.on.left_alias,
            quote_ident(&self.on.left_column),
            self.on.right_alias,
            quote_ident(&self.on.right_column),
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Predicate {
    /// `alias."col" IN (v1, v2, …)`; an empty value list renders FALSE.
    InList {
        table_alias: Option<String>,
        column: String,
        values: Vec<ScalarValue>,
    },
    /// Constant FALSE, the predicate of the empty query.
    False,
}

impl ToSql for Predicate {
    fn to_sql(&self) -> String {
        match self {
            Predicate::InList {
                table_alias,
                column,
                values,
            } => {
                if values.is_empty() {
                    return "FALSE".to_string();
                }
                let column_ref = match table_alias {
                    Some(alias) => format!("{alias}.{}", quote_ident(column)),
                    None => quote_ident(column),
                };
                let rendered: Vec<String> = values.iter().map(render_literal).collect();
                format!("{column_ref} IN ({})", rendered.join(", "))
            }
            Predicate::False => "FALSE".to_string(),
        }
    }
}

/// The whole statement. `from` is absent only in the empty query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectQuery {
    pub select: Vec<SelectItem>,
    pub distinct: bool,
    pub from: Option<FromTable>,
    pub joins: Vec<Join>,
    /// ANDed together in order.
    pub predicates: Vec<Predicate>,
    pub order_by: Option<SelectExpr>,
    pub limit: Option<usize>,
}

impl SelectQuery {
    /// The explicit "nothing to select" statement: `SELECT NULL WHERE FALSE
    /// LIMIT 0`.
    pub fn empty() -> Self {
        Self {
            select: vec![SelectItem::bare(SelectExpr::Null)],
            distinct: false,
            from: None,
            joins: Vec::new(),
            predicates: vec![Predicate::False],
            order_by: None,
            limit: Some(0),
        }
    }
}

impl ToSql for SelectQuery {
    fn to_sql(&self) -> String {
        let mut sql = String::from("SELECT ");
        if self.distinct {
            sql.push_str("DISTINCT ");
        }
        let items: Vec<String> = self.select.iter().map(|i| i.to_sql()).collect();
        sql.push_str(&items.join(", "));

        if let Some(ref from) = self.from {
            sql.push_str(" FROM ");
            sql.push_str(&from.to_sql());
        }
        for join in &self.joins {
            sql.push(' ');
            sql.push_str(&join.to_sql());
        }
        if !self.predicates.is_empty() {
            let rendered: Vec<String> = self.predicates.iter().map(|p| p.to_sql()).collect();
            sql.push_str(" WHERE ");
            sql.push_str(&rendered.join(" AND "));
        }
        if let Some(ref order_by) = self.order_by {
            sql.push_str(" ORDER BY ");
            sql.push_str(&order_by.to_sql());
        }
        if let Some(limit) = self.limit {
            sql.push_str(&format!(" LIMIT {limit}"));
        }
        sql
    }
}
