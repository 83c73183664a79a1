//! SQL compilation: shape, determinism, graceful degradation

use haddock::{
    build_composite_table_query, build_possible_values_query, build_table_query, ColumnSelection,
    Confidence, FieldSelection, Relationship, ScalarValue,
};

fn rels() -> Vec<Relationship> {
    vec![
        Relationship::new("sales", "CustomerID", "customers", "ID", Confidence::High),
        Relationship::new("sales", "ProductID", "products", "ID", Confidence::High),
        Relationship::new("customers", "RegionID", "regions", "ID", Confidence::High),
    ]
}

#[test]
fn no_selections_round_trips_to_plain_select() {
    let sql = build_table_query("sales", &[], &rels(), 1000);
    assert_eq!(sql, "SELECT * FROM \"sales\" LIMIT 1000");
    assert!(!sql.contains("JOIN"));
    assert!(!sql.contains("WHERE"));
}

#[test]
fn foreign_selection_produces_join_and_literal() {
    let selections = vec![FieldSelection::new("customers", "Name", vec!["Alice".into()])];
    let sql = build_table_query("sales", &selections, &rels(), 1000);
    assert!(sql.contains("JOIN"));
    assert!(sql.contains("\"customers\""));
    assert!(sql.contains("'Alice'"));
    assert!(sql.starts_with("SELECT DISTINCT"));
}

#[test]
fn compiling_twice_is_textually_identical() {
    let selections = vec![
        FieldSelection::new("regions", "Country", vec!["Sweden".into(), "Norway".into()]),
        FieldSelection::new("products", "Category", vec!["Bikes".into()]),
        FieldSelection::new("sales", "Quantity", vec![ScalarValue::Int(1)]),
    ];
    assert_eq!(
        build_table_query("sales", &selections, &rels(), 500),
        build_table_query("sales", &selections, &rels(), 500)
    );
}

#[test]
fn own_selection_does_not_filter_possible_values() {
    let selections = vec![FieldSelection::new(
        "sales",
        "Quantity",
        vec![ScalarValue::Int(1)],
    )];
    let sql = build_possible_values_query("sales", "Quantity", &selections, &rels());
    assert_eq!(sql, "SELECT DISTINCT \"Quantity\" FROM \"sales\" LIMIT 10000");
}

#[test]
fn schema_qualified_target_renders_multi_part() {
    let sql = build_table_query("staging.orders", &[], &rels(), 100);
    assert_eq!(sql, "SELECT * FROM \"staging\".\"orders\" LIMIT 100");
}

#[test]
fn string_values_are_escaped() {
    let selections = vec![FieldSelection::new(
        "customers",
        "Name",
        vec!["O'Brien".into()],
    )];
    let sql = build_table_query("customers", &selections, &rels(), 100);
    assert!(sql.contains("'O''Brien'"));
}

#[test]
fn boolean_and_null_literals() {
    let selections = vec![FieldSelection::new(
        "customers",
        "Active",
        vec![ScalarValue::Bool(true), ScalarValue::Null],
    )];
    let sql = build_table_query("customers", &selections, &rels(), 100);
    assert!(sql.contains("IN (TRUE, NULL)"));
}

#[test]
fn composite_mapping_round_trips_each_output_column() {
    let columns = vec![
        ColumnSelection::new("sales", "Quantity"),
        ColumnSelection::new("customers", "Name"),
        ColumnSelection::new("regions", "Name"),
    ];
    let query = build_composite_table_query(&columns, &[], &rels(), 300);
    assert_eq!(query.column_mapping.len(), 3);
    for (output, source) in &query.column_mapping {
        assert!(query.sql.contains(&format!("\"{}\"", source.column)));
        assert!(columns.contains(source), "unknown source for {output}");
    }
    // Name collides across customers and regions; both get table prefixes.
    assert!(query.column_mapping.contains_key("customers_Name"));
    assert!(query.column_mapping.contains_key("regions_Name"));
    assert!(query.column_mapping.contains_key("Quantity"));
}

#[test]
fn composite_display_tables_left_join_filter_tables_inner_join() {
    let columns = vec![
        ColumnSelection::new("sales", "ID"),
        ColumnSelection::new("customers", "Name"),
    ];
    let selections = vec![FieldSelection::new("products", "Category", vec!["Bikes".into()])];
    let query = build_composite_table_query(&columns, &selections, &rels(), 300);
    assert!(query.sql.contains("LEFT JOIN \"customers\""));
    assert!(!query.sql.contains("LEFT JOIN \"products\""));
    assert!(query.sql.contains("JOIN \"products\""));
}

#[test]
fn unreachable_filter_degrades_by_omission() {
    let selections = vec![FieldSelection::new("warehouses", "City", vec!["Oslo".into()])];
    let sql = build_table_query("sales", &selections, &rels(), 100);
    assert!(!sql.contains("warehouses"));
    assert!(!sql.contains("WHERE"));
}

#[test]
fn every_generated_query_is_limited() {
    let selections = vec![FieldSelection::new("customers", "Name", vec!["Alice".into()])];
    for sql in [
        build_table_query("sales", &[], &rels(), 250),
        build_table_query("sales", &selections, &rels(), 250),
        build_possible_values_query("sales", "Quantity", &selections, &rels()),
        build_composite_table_query(
            &[ColumnSelection::new("sales", "ID")],
            &selections,
            &rels(),
            250,
        )
        .sql,
    ] {
        assert!(sql.contains("LIMIT"), "missing LIMIT in: {sql}");
    }
}
