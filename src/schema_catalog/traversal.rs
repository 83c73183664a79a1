//! Graph traversal over the inferred relationship set
//!
//! Relationships are directed edges but every walk here treats them as
//! undirected: a foreign key can be followed from either side. Path search
//! is breadth-first by edge count; among equal-length paths the edge-list
//! order decides, which is what [`prioritize_relationships`] exploits to
//! steer the query builder toward a consistent join tree.

use std::collections::{HashMap, HashSet, VecDeque};

use super::is_bare_name;
use super::relationship_discovery::Relationship;

/// Every table reachable from `start` through the relationship graph,
/// including `start` itself.
pub fn find_connected_tables(start: &str, relationships: &[Relationship]) -> HashSet<String> {
    let mut visited: HashSet<String> = HashSet::from([start.to_string()]);
    let mut queue: VecDeque<String> = VecDeque::from([start.to_string()]);

    while let Some(current) = queue.pop_front() {
        for rel in relationships {
            if let Some((other, _)) = rel.other_end(&current) {
                if visited.insert(other.to_string()) {
                    queue.push_back(other.to_string());
                }
            }
        }
    }
    visited
}

/// Shortest path between two tables, as the ordered list of edges walked.
///
/// `from == to` yields an empty path; an unreachable target yields `None`.
/// Equal-length alternatives resolve to whichever edge appears first in
/// `relationships`, so callers wanting a particular tie-break pass a
/// prioritized list.
pub fn find_path(
    from: &str,
    to: &str,
    relationships: &[Relationship],
) -> Option<Vec<Relationship>> {
    if from == to {
        return Some(Vec::new());
    }

    let mut visited: HashSet<&str> = HashSet::from([from]);
    let mut parent: HashMap<&str, (&str, &Relationship)> = HashMap::new();
    let mut queue: VecDeque<&str> = VecDeque::from([from]);

    while let Some(current) = queue.pop_front() {
        for rel in relationships {
            let Some((other, _)) = rel.other_end(current) else {
                continue;
            };
            if !visited.insert(other) {
                continue;
            }
            parent.insert(other, (current, rel));
            if other == to {
                let mut path = Vec::new();
                let mut node = to;
                while node != from {
                    let (prev, edge) = parent[node];
                    path.push(edge.clone());
                    node = prev;
                }
                path.reverse();
                return Some(path);
            }
            queue.push_back(other);
        }
    }
    None
}

/// Reorder edges so breadth-first search prefers, in order: edges touching a
/// table already joined into the current query, edges whose endpoints are
/// both bare (unqualified) names, then deterministic id order. The sort is
/// stable, so two calls over the same input always agree.
pub fn prioritize_relationships(
    relationships: &[Relationship],
    joined_tables: &HashSet<String>,
) -> Vec<Relationship> {
    let mut ordered: Vec<Relationship> = relationships.to_vec();
    ordered.sort_by(|a, b| edge_rank(a, joined_tables)
        .cmp(&edge_rank(b, joined_tables))
        .then_with(|| a.id.cmp(&b.id)));
    ordered
}

fn edge_rank(rel: &Relationship, joined_tables: &HashSet<String>) -> (u8, u8) {
    let unjoined = if joined_tables.contains(&rel.from_table)
        || joined_tables.contains(&rel.to_table)
    {
        0
    } else {
        1
    };
    let compound = [rel.from_table.as_str(), rel.to_table.as_str()]
        .iter()
        .filter(|t| !is_bare_name(t))
        .count() as u8;
    (unjoined, compound)
}
