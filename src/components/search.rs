//! Breadth-first component search.
//!
//! Quadratic in the worst case once adjacency is built, and kept as the
//! reference partition the union-find result is checked against.

use crate::core::{Edge, ElementIndex};
use std::collections::VecDeque;

/// Components of the graph on `0..n`, each sorted ascending, ordered by
/// smallest member.
pub fn components_by_search(n: usize, edges: &[Edge]) -> Vec<Vec<ElementIndex>> {
    let mut adjacency: Vec<Vec<ElementIndex>> = vec![Vec::new(); n];
    for &Edge(a, b) in edges {
        adjacency[a].push(b);
        adjacency[b].push(a);
    }

    let mut visited = vec![false; n];
    let mut components = Vec::new();

    for start in 0..n {
        if visited[start] {
            continue;
        }
        visited[start] = true;
        let mut queue = VecDeque::from([start]);
        let mut members = Vec::new();

        while let Some(node) = queue.pop_front() {
            members.push(node);
            for &next in &adjacency[node] {
                if !visited[next] {
                    visited[next] = true;
                    queue.push_back(next);
                }
            }
        }

        members.sort_unstable();
        components.push(members);
    }
    components
}
