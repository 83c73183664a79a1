//! Test support
//!
//! A hand-written scripted executor for suite-level tests: responses are
//! registered against SQL fragments, every executed statement is recorded,
//! and an unmatched statement fails loudly instead of returning something
//! plausible. Unit tests inside the crate use the generated mock instead;
//! this type exists for the integration suite, which cannot see it.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::engine::executor::{QueryExecutionError, QueryExecutor, QueryRow, QueryRows};
use crate::selection_model::ScalarValue;

/// Canned-response executor. The first registered fragment contained in the
/// incoming SQL wins.
#[derive(Default)]
pub struct ScriptedExecutor {
    responses: Vec<(String, QueryRows)>,
    executed: Mutex<Vec<String>>,
}

impl ScriptedExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `rows` for any statement containing `fragment`.
    pub fn on(mut self, fragment: impl Into<String>, rows: QueryRows) -> Self {
        self.responses.push((fragment.into(), rows));
        self
    }

    /// Every statement executed so far, in order.
    pub fn executed(&self) -> Vec<String> {
        self.executed.lock().unwrap().clone()
    }
}

#[async_trait]
impl QueryExecutor for ScriptedExecutor {
    async fn execute(&self, sql: &str) -> Result<QueryRows, QueryExecutionError> {
        self.executed.lock().unwrap().push(sql.to_string());
        for (fragment, rows) in &self.responses {
            if sql.contains(fragment.as_str()) {
                return Ok(rows.clone());
            }
        }
        Err(QueryExecutionError::new(format!(
            "no scripted response matches: {sql}"
        )))
    }
}

/// Build single-column rows, the shape every distinct-values query returns.
pub fn value_rows(column: &str, values: &[ScalarValue]) -> QueryRows {
    values
        .iter()
        .map(|v| HashMap::from([(column.to_string(), v.clone())]))
        .collect()
}

/// Build one row from (column, value) pairs.
pub fn row(pairs: &[(&str, ScalarValue)]) -> QueryRow {
    pairs
        .iter()
        .map(|(c, v)| (c.to_string(), v.clone()))
        .collect()
}
