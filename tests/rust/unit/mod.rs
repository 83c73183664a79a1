//! Unit tests - pure functions only, no query execution involved
//!
//! Covers relationship inference, graph traversal, and SQL compilation
//! through the public API.

mod query_compilation_tests;
mod relationship_pattern_tests;
mod traversal_property_tests;
