//! Haddock associative selection engine over a relational schema
//!
//! This crate provides the associative core of Haddock:
//! - Relationship inference from column-naming conventions
//! - Graph traversal (connectivity, shortest path) over inferred edges
//! - Compilation of selections into join queries along relationship paths
//! - Selection-state propagation (selected / possible / alternative /
//!   excluded) for every observed value of every field
//!
//! The engine is stateless and owns no database connection: every operation
//! takes the schema snapshot, the current selection set, and an
//! [`engine::executor::QueryExecutor`] capability, and returns a fresh
//! result. Coordination concerns (debouncing, superseded-request
//! discarding) belong to the calling layer.

pub mod engine;
pub mod schema_catalog;
pub mod selection_model;
pub mod sql_builder;
pub mod state_calculator;
pub mod testing;

pub use engine::executor::{QueryExecutionError, QueryExecutor, QueryRow, QueryRows};
pub use engine::{
    get_field_values, get_filtered_table_data, get_selection_stats, propagate_selection,
    SelectionStats,
};
pub use schema_catalog::relationship_discovery::{detect_relationships, Confidence, Relationship};
pub use schema_catalog::traversal::{find_connected_tables, find_path, prioritize_relationships};
pub use schema_catalog::{ColumnInfo, TableSchema};
pub use selection_model::{
    ColumnSelection, FieldSelection, FieldState, ScalarValue, SelectionState,
};
pub use sql_builder::{
    build_composite_table_query, build_possible_values_query, build_table_query, CompositeQuery,
};
pub use state_calculator::{calculate_field_state, calculate_field_states, StateError};
