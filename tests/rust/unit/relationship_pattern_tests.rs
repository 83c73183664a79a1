//! Relationship inference over naming conventions

use haddock::{detect_relationships, ColumnInfo, Confidence, TableSchema};

fn table(name: &str, cols: &[(&str, &str)]) -> TableSchema {
    TableSchema::new(
        name,
        cols.iter()
            .map(|(n, t)| ColumnInfo::new(*n, *t, true))
            .collect(),
        0,
    )
}

#[test]
fn orders_customers_scenario_emits_exactly_one_high_edge() {
    let tables = vec![
        table("Orders", &[("ID", "INTEGER"), ("CustomerID", "INTEGER")]),
        table("Customers", &[("ID", "INTEGER"), ("Name", "VARCHAR")]),
    ];
    let rels = detect_relationships(&tables);
    assert_eq!(rels.len(), 1);
    assert_eq!(rels[0].from_table, "Orders");
    assert_eq!(rels[0].from_column, "CustomerID");
    assert_eq!(rels[0].to_table, "Customers");
    assert_eq!(rels[0].to_column, "ID");
    assert_eq!(rels[0].confidence, Confidence::High);
}

#[test]
fn no_unordered_endpoint_pair_appears_twice() {
    // Both naming patterns fire for this pair; the output set must still
    // hold each unordered endpoint pair once.
    let tables = vec![
        table("region", &[("id", "INTEGER"), ("name", "VARCHAR")]),
        table("customers", &[("id", "INTEGER"), ("region_id", "INTEGER")]),
        table("sales", &[("id", "INTEGER"), ("customer_id", "INTEGER")]),
    ];
    let rels = detect_relationships(&tables);
    for (i, a) in rels.iter().enumerate() {
        for b in rels.iter().skip(i + 1) {
            let straight = a.from_table == b.from_table && a.from_column == b.from_column
                && a.to_table == b.to_table
                && a.to_column == b.to_column;
            let crossed = a.from_table == b.to_table
                && a.from_column == b.to_column
                && a.to_table == b.from_table
                && a.to_column == b.from_column;
            assert!(!straight && !crossed, "duplicate edge: {} vs {}", a.id, b.id);
        }
    }
    assert_eq!(rels.len(), 2);
}

#[test]
fn relationship_ids_are_deterministic() {
    let tables = vec![
        table("sales", &[("ID", "INTEGER"), ("CustomerID", "INTEGER")]),
        table("customers", &[("ID", "INTEGER")]),
    ];
    let first = detect_relationships(&tables);
    let second = detect_relationships(&tables);
    assert_eq!(first, second);
    assert_eq!(first[0].id, "sales.CustomerID->customers.ID");
}

#[test]
fn type_mismatch_lowers_confidence() {
    let tables = vec![
        table("sales", &[("customer_id", "VARCHAR")]),
        table("customers", &[("id", "BIGINT")]),
    ];
    let rels = detect_relationships(&tables);
    assert_eq!(rels.len(), 1);
    assert_eq!(rels[0].confidence, Confidence::Low);
}

#[test]
fn detection_on_unrelated_tables_is_empty() {
    let tables = vec![
        table("products", &[("ID", "INTEGER"), ("Name", "VARCHAR")]),
        table("regions", &[("ID", "INTEGER"), ("Country", "VARCHAR")]),
    ];
    assert!(detect_relationships(&tables).is_empty());
}

#[test]
fn haddock_schema_yields_three_edges() {
    let tables = vec![
        table("regions", &[("ID", "INTEGER"), ("Name", "VARCHAR"), ("Country", "VARCHAR")]),
        table(
            "customers",
            &[
                ("ID", "INTEGER"),
                ("Name", "VARCHAR"),
                ("Email", "VARCHAR"),
                ("RegionID", "INTEGER"),
            ],
        ),
        table(
            "products",
            &[("ID", "INTEGER"), ("Name", "VARCHAR"), ("Category", "VARCHAR"), ("Price", "DECIMAL(10,2)")],
        ),
        table(
            "sales",
            &[
                ("ID", "INTEGER"),
                ("CustomerID", "INTEGER"),
                ("ProductID", "INTEGER"),
                ("Quantity", "INTEGER"),
                ("SaleDate", "DATE"),
            ],
        ),
    ];
    let mut ids: Vec<String> = detect_relationships(&tables).into_iter().map(|r| r.id).collect();
    ids.sort();
    assert_eq!(
        ids,
        vec![
            "customers.RegionID->regions.ID",
            "sales.CustomerID->customers.ID",
            "sales.ProductID->products.ID",
        ]
    );
}
