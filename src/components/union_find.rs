//! Disjoint-set union over element indices.
//!
//! Path compression is iterative so long chains of segments cannot exhaust
//! the stack; union by rank keeps the trees shallow.

use crate::core::ElementIndex;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default)]
pub struct UnionFind {
    /// Parent pointers (self-loop = root)
    parent: Vec<usize>,
    /// Upper bound on tree height, only meaningful for roots
    rank: Vec<u8>,
    /// Set size, only meaningful for roots
    size: Vec<usize>,
    set_count: usize,
}

impl UnionFind {
    /// `n` singleton sets `0..n`.
    pub fn new(n: usize) -> Self {
        Self {
            parent: (0..n).collect(),
            rank: vec![0; n],
            size: vec![1; n],
            set_count: n,
        }
    }

    /// Representative of the set containing `x`.
    pub fn find(&mut self, x: ElementIndex) -> ElementIndex {
        let mut root = x;
        while self.parent[root] != root {
            root = self.parent[root];
        }

        let mut current = x;
        while self.parent[current] != root {
            let next = self.parent[current];
            self.parent[current] = root;
            current = next;
        }
        root
    }

    /// Merge the sets of `x` and `y`; `false` if they were already one set.
    pub fn union(&mut self, x: ElementIndex, y: ElementIndex) -> bool {
        let (root_x, root_y) = (self.find(x), self.find(y));
        if root_x == root_y {
            return false;
        }

        let (parent, child) = match self.rank[root_x].cmp(&self.rank[root_y]) {
            std::cmp::Ordering::Less => (root_y, root_x),
            std::cmp::Ordering::Greater => (root_x, root_y),
            std::cmp::Ordering::Equal => {
                self.rank[root_x] += 1;
                (root_x, root_y)
            }
        };
        self.parent[child] = parent;
        self.size[parent] += self.size[child];
        self.set_count -= 1;
        true
    }

    pub fn connected(&mut self, x: ElementIndex, y: ElementIndex) -> bool {
        self.find(x) == self.find(y)
    }

    pub fn set_size(&mut self, x: ElementIndex) -> usize {
        let root = self.find(x);
        self.size[root]
    }

    /// Number of disjoint sets.
    pub fn count(&self) -> usize {
        self.set_count
    }

    pub fn len(&self) -> usize {
        self.parent.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parent.is_empty()
    }

    /// Every set keyed by its root; members ascending.
    pub fn components(&mut self) -> BTreeMap<ElementIndex, Vec<ElementIndex>> {
        let mut sets: BTreeMap<ElementIndex, Vec<ElementIndex>> = BTreeMap::new();
        for x in 0..self.parent.len() {
            let root = self.find(x);
            sets.entry(root).or_default().push(x);
        }
        sets
    }
}
