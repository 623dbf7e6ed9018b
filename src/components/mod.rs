//! Connected components of the connectivity graph.

pub mod search;
pub mod union_find;

pub use search::components_by_search;
pub use union_find::UnionFind;

use crate::core::{Edge, ElementIndex};
use std::collections::HashMap;

/// Element indices of one connected component, ascending.
pub type Component = Vec<ElementIndex>;

/// Partition `nodes` into the components induced by `edges`.
///
/// Components come back in canonical order: members ascending, components
/// ordered by their smallest member. Edges touching an index outside
/// `nodes` are ignored.
pub fn extract_components(nodes: &[ElementIndex], edges: &[Edge]) -> Vec<Component> {
    let position: HashMap<ElementIndex, usize> =
        nodes.iter().enumerate().map(|(pos, &index)| (index, pos)).collect();

    let mut uf = UnionFind::new(nodes.len());
    let mut merges = 0usize;
    for &Edge(a, b) in edges {
        if let (Some(&pa), Some(&pb)) = (position.get(&a), position.get(&b)) {
            if uf.union(pa, pb) {
                merges += 1;
            }
        }
    }

    let mut components: Vec<Component> = uf
        .components()
        .into_values()
        .map(|members| {
            let mut component: Component = members.into_iter().map(|pos| nodes[pos]).collect();
            component.sort_unstable();
            component
        })
        .collect();
    components.sort_unstable_by_key(|c| c[0]);

    log::debug!(
        "Extracted {} components from {} nodes and {} edges ({} merges)",
        components.len(),
        nodes.len(),
        edges.len(),
        merges
    );
    components
}
