//! Shared schema fixture: the Haddock demo database
//!
//! regions(ID, Name, Country)
//! customers(ID, Name, Email, RegionID)  RegionID -> regions.ID
//! products(ID, Name, Category, Price)
//! sales(ID, CustomerID, ProductID, Quantity, SaleDate)
//!     CustomerID -> customers.ID, ProductID -> products.ID

use haddock::{detect_relationships, ColumnInfo, Relationship, TableSchema};

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn table(name: &str, cols: &[(&str, &str)], row_count: u64) -> TableSchema {
    TableSchema::new(
        name,
        cols.iter()
            .map(|(n, t)| ColumnInfo::new(*n, *t, true))
            .collect(),
        row_count,
    )
}

pub fn haddock_tables() -> Vec<TableSchema> {
    vec![
        table(
            "regions",
            &[("ID", "INTEGER"), ("Name", "VARCHAR"), ("Country", "VARCHAR")],
            5,
        ),
        table(
            "customers",
            &[
                ("ID", "INTEGER"),
                ("Name", "VARCHAR"),
                ("Email", "VARCHAR"),
                ("RegionID", "INTEGER"),
            ],
            8,
        ),
        table(
            "products",
            &[
                ("ID", "INTEGER"),
                ("Name", "VARCHAR"),
                ("Category", "VARCHAR"),
                ("Price", "DECIMAL(10,2)"),
            ],
            8,
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
            18,
        ),
    ]
}

pub fn haddock_relationships() -> Vec<Relationship> {
    detect_relationships(&haddock_tables())
}
