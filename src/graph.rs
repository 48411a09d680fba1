//! Undirected adjacency graph over arena-allocated triangles.
//!
//! Nodes live in a slotmap arena; the generational key is the triangle's
//! graph identity, so removed slots can be reused without ever resurrecting a
//! stale handle. Edges mean "shares a facet" and are maintained by the
//! triangulation engine; this container only stores them.

use slotmap::{new_key_type, SecondaryMap, SlotMap};
use smallvec::SmallVec;

use crate::triangle::Triangle;

new_key_type! {
    /// Stable handle to a live triangle.
    pub struct TriangleKey;
}

// A triangle has at most one neighbor per facet.
type NeighborList = SmallVec<[TriangleKey; 3]>;

#[derive(Debug, Default)]
pub struct AdjacencyGraph {
    nodes: SlotMap<TriangleKey, Triangle>,
    neighbors: SecondaryMap<TriangleKey, NeighborList>,
}

impl AdjacencyGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node with no edges.
    pub fn insert(&mut self, triangle: Triangle) -> TriangleKey {
        let key = self.nodes.insert(triangle);
        self.neighbors.insert(key, NeighborList::new());
        key
    }

    /// Remove a node and unlink it from every neighbor. Returns the removed
    /// triangle, or `None` if the key was already dead.
    pub fn remove(&mut self, key: TriangleKey) -> Option<Triangle> {
        let triangle = self.nodes.remove(key)?;
        if let Some(list) = self.neighbors.remove(key) {
            for other in list {
                if let Some(back) = self.neighbors.get_mut(other) {
                    back.retain(|k| *k != key);
                }
            }
        }
        Some(triangle)
    }

    /// Add an undirected edge. Idempotent; connecting a key to itself is a
    /// no-op.
    pub fn connect(&mut self, a: TriangleKey, b: TriangleKey) {
        if a == b || !self.nodes.contains_key(a) || !self.nodes.contains_key(b) {
            return;
        }
        let forward = &mut self.neighbors[a];
        if !forward.contains(&b) {
            forward.push(b);
            self.neighbors[b].push(a);
        }
    }

    pub fn contains(&self, key: TriangleKey) -> bool {
        self.nodes.contains_key(key)
    }

    pub fn get(&self, key: TriangleKey) -> Option<&Triangle> {
        self.nodes.get(key)
    }

    /// Neighbor handles of `key`; empty for a dead key.
    pub fn neighbors(&self, key: TriangleKey) -> &[TriangleKey] {
        self.neighbors.get(key).map_or(&[], |list| list.as_slice())
    }

    pub fn iter(&self) -> impl Iterator<Item = (TriangleKey, &Triangle)> {
        self.nodes.iter()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

impl std::ops::Index<TriangleKey> for AdjacencyGraph {
    type Output = Triangle;

    fn index(&self, key: TriangleKey) -> &Triangle {
        &self.nodes[key]
    }
}

// =============================================================================
