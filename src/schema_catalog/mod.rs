//! Relational schema catalog
//!
//! Data model for introspected schemas: tables, columns, and the inferred
//! relationship graph layered on top of them. Schema snapshots are produced
//! by the loading layer and passed into the engine by reference; nothing in
//! this module mutates them.

pub mod relationship_discovery;
pub mod traversal;

use serde::{Deserialize, Serialize};

/// One column of an introspected table.
///
/// `data_type` is the dialect-reported type string (e.g. `INTEGER`,
/// `VARCHAR`), kept verbatim for display and classified into families only
/// when relationships are scored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnInfo {
    pub name: String,
    #[serde(rename = "type")]
    pub data_type: String,
    pub nullable: bool,
}

impl ColumnInfo {
    pub fn new(name: impl Into<String>, data_type: impl Into<String>, nullable: bool) -> Self {
        Self {
            name: name.into(),
            data_type: data_type.into(),
            nullable,
        }
    }
}

/// One table discovered at schema load time.
///
/// `name` may be schema-qualified with a `.` separator (`staging.customers`);
/// the qualifier is part of the identifier everywhere names are compared.
/// Replaced wholesale on reload, never patched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableSchema {
    pub name: String,
    pub columns: Vec<ColumnInfo>,
    pub row_count: u64,
}

impl TableSchema {
    pub fn new(name: impl Into<String>, columns: Vec<ColumnInfo>, row_count: u64) -> Self {
        Self {
            name: name.into(),
            columns,
            row_count,
        }
    }

    /// Look up a column by exact name.
    pub fn column(&self, name: &str) -> Option<&ColumnInfo> {
        self.columns.iter().find(|c| c.name == name)
    }
}

/// Coarse type families used for relationship confidence scoring.
///
/// Matching is family-based rather than exact: an `INTEGER` foreign key
/// pointing at a `BIGINT` id is compatible.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeFamily {
    Integer,
    Text,
    Other,
}

const INTEGER_FRAGMENTS: [&str; 6] = ["integer", "bigint", "smallint", "int2", "int4", "int8"];
const TEXT_FRAGMENTS: [&str; 4] = ["varchar", "text", "char", "string"];

/// Classify a dialect-reported type string into a family.
pub fn type_family(data_type: &str) -> TypeFamily {
    let lower = data_type.to_lowercase();
    if INTEGER_FRAGMENTS.iter().any(|f| lower.contains(f)) || lower == "int" {
        TypeFamily::Integer
    } else if TEXT_FRAGMENTS.iter().any(|f| lower.contains(f)) {
        TypeFamily::Text
    } else {
        TypeFamily::Other
    }
}

/// Whether two reported types belong to the same known family.
pub fn families_compatible(a: &str, b: &str) -> bool {
    let fa = type_family(a);
    fa != TypeFamily::Other && fa == type_family(b)
}

/// Lowercase a name and strip underscores, the normal form used for all
/// naming-convention matching (`Customer_ID` and `customerid` compare equal).
pub fn normalize_name(name: &str) -> String {
    name.to_lowercase().replace('_', "")
}

/// Quote a single identifier part, doubling embedded double quotes.
pub fn quote_ident(part: &str) -> String {
    format!("\"{}\"", part.replace('"', "\"\""))
}

/// Render a possibly schema-qualified table identifier.
///
/// `staging.customers` becomes `"staging"."customers"`; an unqualified name
/// becomes a single quoted part.
pub fn quote_table(name: &str) -> String {
    name.split('.')
        .map(quote_ident)
        .collect::<Vec<_>>()
        .join(".")
}

/// A bare table name carries no schema qualifier. Bare names are preferred
/// when equally short join paths compete.
pub fn is_bare_name(name: &str) -> bool {
    !name.contains('.')
}
