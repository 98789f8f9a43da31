//! Core search node and frontier key types.

use std::cmp::Ordering;

/// Index of a node in a run's [`crate::arena::NodeArena`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u32);

impl NodeId {
    /// Root node index (always 0 in a fresh arena).
    pub const ROOT: NodeId = NodeId(0);

    #[inline]
    #[must_use]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// An immutable search node.
///
/// Ordering for frontier extraction uses `(f, creation_order)`: lower `f`
/// first, ties broken by older creation order so that equal keys pop FIFO.
#[derive(Debug, Clone)]
pub struct SearchNode<S> {
    /// Arena index of this node.
    pub id: NodeId,
    /// Parent node index (`None` for root).
    pub parent: Option<NodeId>,
    /// Immutable state at this node.
    pub state: S,
    /// Cumulative path cost from the root.
    pub g: f64,
    /// Heuristic estimate of the remaining cost.
    pub h: f64,
    /// Priority computed by the run's priority function.
    pub f: f64,
    /// Tree depth (root = 0).
    pub depth: u32,
    /// Global counter for deterministic tie-breaking.
    pub creation_order: u64,
}

impl<S> SearchNode<S> {
    /// Unweighted cost estimate `g + h`, the solution metric under
    /// [`crate::bound::BoundPolicy::Estimate`].
    #[must_use]
    pub fn estimate(&self) -> f64 {
        self.g + self.h
    }

    #[must_use]
    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }
}

/// The frontier ordering key: `(f, creation_order)`.
///
/// `f` is compared with [`f64::total_cmp`], so infinities sort last and a
/// NaN produced by a misbehaving priority function still yields a total order.
#[derive(Debug, Clone, Copy)]
pub struct FrontierKey {
    pub f: f64,
    pub creation_order: u64,
}

impl PartialEq for FrontierKey {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for FrontierKey {}

impl PartialOrd for FrontierKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FrontierKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.f
            .total_cmp(&other.f)
            .then(self.creation_order.cmp(&other.creation_order))
    }
}

impl<S> From<&SearchNode<S>> for FrontierKey {
    fn from(node: &SearchNode<S>) -> Self {
        Self {
            f: node.f,
            creation_order: node.creation_order,
        }
    }
}
