//! Waypoint Search: anytime, bounded-time best-first search.
//!
//! A caller describes a problem as a [`SearchWorld`] (successors with step
//! costs, a goal test, a heuristic) and picks a [`SearchPolicy`]. The engine
//! runs best-first search under a wall-clock budget; the anytime driver then
//! reruns it under a cost bound tightened strictly below each solution, so
//! every accepted solution is cheaper than the last.
//!
//! # Crate dependency graph
//!
//! ```text
//! waypoint_search  ←  waypoint_harness
//! (engine, policy)     (config, worlds, reports)
//! ```
//!
//! # Key types
//!
//! - [`SearchWorld`] — trait for problems that support search
//! - [`SearchPolicy`] — strategy, duplicate checking, weight and budget
//! - [`Priority`] — `(g, h, weight) → f`; built-ins and closures
//! - [`SearchNode`] — one node of the search tree, stored in a [`NodeArena`]
//! - [`CostBound`] — pruning thresholds on `g`, `h` and `g + h`
//! - [`AnytimeSearch`] / [`anytime_search`] — the iterative improvement driver

#![forbid(unsafe_code)]

pub mod anytime;
pub mod arena;
pub mod bound;
pub mod cache;
pub mod closed;
pub mod contract;
pub mod error;
pub mod frontier;
pub mod node;
pub mod policy;
pub mod priority;
pub mod search;

pub use anytime::{anytime_search, AnytimeResult, AnytimeSearch, IterationRecord, StopReason};
pub use arena::NodeArena;
pub use bound::{BoundPolicy, CostBound};
pub use cache::HeuristicCache;
pub use contract::{FnWorld, SearchWorld};
pub use error::SearchError;
pub use node::{FrontierKey, NodeId, SearchNode};
pub use policy::{timebound_from_secs, CheckingLevel, SearchPolicy};
pub use priority::{GreedyBestFirst, Priority, StrategyKind, UniformCost, WeightedAStar, Xdp, Xup};
pub use search::{
    expand, run_bounded, search, OutcomeKind, RunConfig, RunStats, SearchOutcome, SearchResult,
    Solution, Successor,
};
