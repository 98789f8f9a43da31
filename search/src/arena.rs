//! Node arena for a single search run.
//!
//! Nodes are stored in a contiguous `Vec` and referenced by [`NodeId`]
//! indices. Parent links are indices, so the search tree needs no shared
//! ownership and path reconstruction is a walk over the arena.

use crate::node::{NodeId, SearchNode};

/// Arena-backed storage for the nodes created during one run.
#[derive(Debug)]
pub struct NodeArena<S> {
    nodes: Vec<SearchNode<S>>,
}

impl<S> NodeArena<S> {
    #[must_use]
    pub fn new() -> Self {
        Self { nodes: Vec::new() }
    }

    /// Store a node, assigning its id from the arena length.
    ///
    /// The `id` field of `node` is overwritten.
    ///
    /// # Panics
    ///
    /// Panics if the arena already holds `u32::MAX` nodes.
    pub fn allocate(&mut self, mut node: SearchNode<S>) -> NodeId {
        let id = NodeId(u32::try_from(self.nodes.len()).expect("node arena exhausted u32 ids"));
        node.id = id;
        self.nodes.push(node);
        id
    }

    #[inline]
    #[must_use]
    pub fn get(&self, id: NodeId) -> &SearchNode<S> {
        &self.nodes[id.index()]
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Node ids from the root to `id`, inclusive.
    #[must_use]
    pub fn path_ids(&self, id: NodeId) -> Vec<NodeId> {
        let mut path = Vec::new();
        let mut current = Some(id);
        while let Some(node_id) = current {
            path.push(node_id);
            current = self.get(node_id).parent;
        }
        path.reverse();
        path
    }

    /// Iterate over the ancestors of `id` (excluding `id` itself), nearest first.
    pub fn ancestors(&self, id: NodeId) -> impl Iterator<Item = &SearchNode<S>> {
        let mut current = self.get(id).parent;
        std::iter::from_fn(move || {
            let node = self.get(current?);
            current = node.parent;
            Some(node)
        })
    }
}

impl<S: Clone> NodeArena<S> {
    /// Reconstruct the state sequence from the root to `id`.
    #[must_use]
    pub fn reconstruct_path(&self, id: NodeId) -> Vec<S> {
        self.path_ids(id)
            .into_iter()
            .map(|node_id| self.get(node_id).state.clone())
            .collect()
    }
}

impl<S> Default for NodeArena<S> {
    fn default() -> Self {
        Self::new()
    }
}
