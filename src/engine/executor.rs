//! Query-execution capability
//!
//! The engine never owns a connection: callers hand in something that can
//! run one SQL statement and return rows. One call is in flight per engine
//! invocation and there are no implicit retries; timeouts and cancellation
//! belong to the implementation behind the trait.

use std::collections::HashMap;

use async_trait::async_trait;
use thiserror::Error;

use crate::selection_model::ScalarValue;

/// One result row, keyed by column name.
pub type QueryRow = HashMap<String, ScalarValue>;

/// An ordered result set.
pub type QueryRows = Vec<QueryRow>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("query execution failed: {message}")]
pub struct QueryExecutionError {
    pub message: String,
}

impl QueryExecutionError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait QueryExecutor: Send + Sync {
    async fn execute(&self, sql: &str) -> Result<QueryRows, QueryExecutionError>;
}

/// Pull one column out of a result set, deduplicated by canonical key in
/// first-observed order. Falls back to the row's single value when the
/// column name does not match (drivers differ on how they label projected
/// columns).
pub fn column_values(rows: &[QueryRow], column: &str) -> Vec<ScalarValue> {
    let mut seen = std::collections::HashSet::new();
    let mut values = Vec::new();
    for row in rows {
        let value = match row.get(column) {
            Some(v) => v.clone(),
            None if row.len() == 1 => row.values().next().cloned().unwrap_or(ScalarValue::Null),
            None => continue,
        };
        if seen.insert(value.canonical_key()) {
            values.push(value);
        }
    }
    values
}
