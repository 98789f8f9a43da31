//! Per-dimension cost bounds used to restrict re-exploration.

use serde::Deserialize;

use crate::node::SearchNode;

/// Pruning thresholds on `(g, h, g + h)`.
///
/// A successor is pruned if it exceeds the bound on any dimension.
/// `f64::INFINITY` leaves a dimension unbounded.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CostBound {
    pub g_bound: f64,
    pub h_bound: f64,
    /// Bound on the unweighted estimate `g + h`.
    pub f_bound: f64,
}

impl CostBound {
    /// No pruning on any dimension.
    #[must_use]
    pub const fn unbounded() -> Self {
        Self {
            g_bound: f64::INFINITY,
            h_bound: f64::INFINITY,
            f_bound: f64::INFINITY,
        }
    }

    /// Whether a node with path cost `g` and heuristic `h` is within bounds.
    #[must_use]
    pub fn admits(&self, g: f64, h: f64) -> bool {
        g <= self.g_bound && h <= self.h_bound && g + h <= self.f_bound
    }

    #[must_use]
    pub fn is_unbounded(&self) -> bool {
        self.g_bound == f64::INFINITY
            && self.h_bound == f64::INFINITY
            && self.f_bound == f64::INFINITY
    }

    /// Bound admitting only solutions strictly better than `incumbent` on the
    /// dimension selected by `policy`.
    ///
    /// Returns `None` when no strictly smaller non-negative value exists
    /// (the incumbent already costs 0).
    #[must_use]
    pub fn strictly_below(policy: BoundPolicy, incumbent: f64) -> Option<Self> {
        let limit = next_below(incumbent)?;
        let mut bound = Self::unbounded();
        match policy {
            BoundPolicy::Cost => bound.g_bound = limit,
            BoundPolicy::Estimate => bound.f_bound = limit,
        }
        Some(bound)
    }
}

impl Default for CostBound {
    fn default() -> Self {
        Self::unbounded()
    }
}

/// Which dimension the anytime driver tightens after each solution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BoundPolicy {
    /// Bound `g` by the incumbent's path cost (anytime greedy).
    Cost,
    /// Bound `g + h` by the incumbent's `g + h` (anytime weighted A*).
    #[default]
    Estimate,
}

impl BoundPolicy {
    /// The metric of a solution node that this policy compares and bounds.
    #[must_use]
    pub fn metric<S>(self, node: &SearchNode<S>) -> f64 {
        match self {
            Self::Cost => node.g,
            Self::Estimate => node.estimate(),
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Cost => "cost",
            Self::Estimate => "estimate",
        }
    }
}

/// Largest non-negative `f64` strictly less than `x`.
///
/// `None` for `x <= 0` or NaN. `+∞` maps to `f64::MAX`.
fn next_below(x: f64) -> Option<f64> {
    if x.is_nan() || x <= 0.0 {
        return None;
    }
    if x == f64::INFINITY {
        return Some(f64::MAX);
    }
    // Positive finite: the bit pattern is ordered like the value.
    Some(f64::from_bits(x.to_bits() - 1))
}
