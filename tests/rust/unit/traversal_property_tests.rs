//! Traversal invariants over the inferred graph

use std::collections::HashSet;

use haddock::{find_connected_tables, find_path, prioritize_relationships, Confidence, Relationship};

fn rel(from: &str, to: &str) -> Relationship {
    Relationship::new(from, format!("{to}_id"), to, "id", Confidence::High)
}

fn chain() -> Vec<Relationship> {
    vec![
        rel("sales", "customers"),
        rel("customers", "regions"),
        rel("sales", "products"),
    ]
}

#[test]
fn path_to_self_is_empty() {
    assert_eq!(find_path("sales", "sales", &chain()), Some(Vec::new()));
}

#[test]
fn path_is_none_exactly_when_unreachable() {
    let rels = chain();
    let reachable = find_connected_tables("sales", &rels);
    for target in ["customers", "regions", "products", "warehouses"] {
        let path = find_path("sales", target, &rels);
        assert_eq!(path.is_none(), !reachable.contains(target));
    }
}

#[test]
fn connected_set_is_symmetric_for_a_connected_graph() {
    let rels = chain();
    let from_sales = find_connected_tables("sales", &rels);
    let from_regions = find_connected_tables("regions", &rels);
    assert_eq!(from_sales, from_regions);
    assert_eq!(from_sales.len(), 4);
}

#[test]
fn shortest_path_wins_over_longer_alternative() {
    // sales -> regions directly and via customers; one edge must win.
    let mut rels = chain();
    rels.push(rel("sales", "regions"));
    let path = find_path("sales", "regions", &rels).unwrap();
    assert_eq!(path.len(), 1);
}

#[test]
fn prioritization_is_stable_and_total() {
    let rels = chain();
    let joined: HashSet<String> = HashSet::from(["customers".to_string()]);
    let first = prioritize_relationships(&rels, &joined);
    let second = prioritize_relationships(&rels, &joined);
    assert_eq!(first, second);
    assert_eq!(first.len(), rels.len());
    // Edges touching the joined table come first.
    assert!(first[0].touches("customers"));
    assert!(first[1].touches("customers"));
}
