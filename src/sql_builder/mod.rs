//! SQL synthesis
//!
//! Queries are built as a small typed AST ([`render_query::SelectQuery`])
//! and rendered to text only at the boundary, which keeps alias assignment
//! and join-path choice testable without string matching. Building never
//! fails: unreachable filter tables are skipped with a diagnostic and a
//! projection with no usable columns degrades to an explicit empty query.

pub mod literal;
pub mod query_builder;
pub mod render_query;

pub use query_builder::{
    build_composite_table_query, build_possible_values_query, build_table_query, CompositeQuery,
    MAX_DISTINCT_VALUES,
};
pub use render_query::{
    FromTable, Join, JoinCondition, JoinKind, Predicate, SelectExpr, SelectItem, SelectQuery, ToSql,
};
