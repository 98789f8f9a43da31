//! `WeightedGraph`: an explicit directed graph with a per-node heuristic
//! table.
//!
//! Edges keep their insertion order, so successor enumeration is
//! deterministic. Nodes missing from the heuristic table estimate 0.

use std::collections::{BTreeSet, HashMap};

use waypoint_search::SearchWorld;

/// Directed graph over string-named nodes.
#[derive(Debug, Clone)]
pub struct WeightedGraph {
    id: String,
    edges: HashMap<String, Vec<(String, f64)>>,
    estimates: HashMap<String, f64>,
    goals: BTreeSet<String>,
}

impl WeightedGraph {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            edges: HashMap::new(),
            estimates: HashMap::new(),
            goals: BTreeSet::new(),
        }
    }

    /// Add a directed edge `from → to` with a non-negative cost.
    #[must_use]
    pub fn edge(mut self, from: &str, to: &str, cost: f64) -> Self {
        debug_assert!(cost >= 0.0, "negative edge cost {cost}");
        self.edges
            .entry(from.to_string())
            .or_default()
            .push((to.to_string(), cost));
        self
    }

    /// Set the heuristic estimate of `node`; `f64::INFINITY` marks it as a
    /// dead end.
    #[must_use]
    pub fn estimate(mut self, node: &str, h: f64) -> Self {
        self.estimates.insert(node.to_string(), h);
        self
    }

    /// Mark `node` as a goal.
    #[must_use]
    pub fn goal(mut self, node: &str) -> Self {
        self.goals.insert(node.to_string());
        self
    }

    /// Sum of edge costs along `path`, `None` if some hop is not an edge.
    /// Parallel edges count at their cheapest.
    #[must_use]
    pub fn path_cost(&self, path: &[String]) -> Option<f64> {
        path.windows(2)
            .map(|hop| {
                self.edges
                    .get(&hop[0])?
                    .iter()
                    .filter(|(to, _)| *to == hop[1])
                    .map(|&(_, cost)| cost)
                    .min_by(f64::total_cmp)
            })
            .sum()
    }
}

impl SearchWorld for WeightedGraph {
    type State = String;

    fn world_id(&self) -> &str {
        &self.id
    }

    fn successors(&self, state: &String) -> Vec<(String, f64)> {
        self.edges.get(state).cloned().unwrap_or_default()
    }

    fn is_goal(&self, state: &String) -> bool {
        self.goals.contains(state)
    }

    fn heuristic(&self, state: &String) -> f64 {
        self.estimates.get(state).copied().unwrap_or(0.0)
    }
}
