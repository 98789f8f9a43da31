//! Search world contract trait.

use std::fmt::Debug;
use std::hash::Hash;

/// Trait for problem domains the engine can search.
///
/// The engine treats states as immutable values: it clones them into its node
/// arena and compares them by `Eq`/`Hash` for duplicate detection, but never
/// mutates them.
///
/// # Contract
///
/// - `successors` must be a pure function of the state: same state → same
///   `(next_state, step_cost)` pairs in the same order.
/// - Step costs must be non-negative.
/// - `heuristic` must be non-negative; `f64::INFINITY` signals that no goal is
///   reachable from the state and the engine prunes it.
/// - Goal states should have a heuristic of 0.
pub trait SearchWorld {
    /// Problem state snapshot.
    type State: Clone + Eq + Hash + Debug;

    /// Stable world identifier, used in logs and reports.
    fn world_id(&self) -> &str;

    /// Enumerate every `(next_state, step_cost)` pair reachable in one transition.
    fn successors(&self, state: &Self::State) -> Vec<(Self::State, f64)>;

    /// Test whether the given state satisfies the goal.
    fn is_goal(&self, state: &Self::State) -> bool;

    /// Estimate the remaining cost from `state` to a goal.
    fn heuristic(&self, state: &Self::State) -> f64;
}

/// A [`SearchWorld`] assembled from closures.
///
/// Useful when the caller already has a successor generator, a goal predicate
/// and a heuristic as plain functions and does not want to define a type.
///
/// ```
/// use waypoint_search::contract::{FnWorld, SearchWorld};
///
/// let world = FnWorld::new(
///     "count_to_three",
///     |n: &u32| vec![(n + 1, 1.0)],
///     |n: &u32| *n == 3,
///     |n: &u32| f64::from(3u32.saturating_sub(*n)),
/// );
/// assert_eq!(world.successors(&0), vec![(1, 1.0)]);
/// assert!(world.is_goal(&3));
/// ```
pub struct FnWorld<S, Succ, Goal, Heur> {
    world_id: String,
    successors: Succ,
    is_goal: Goal,
    heuristic: Heur,
    _state: std::marker::PhantomData<fn() -> S>,
}

impl<S, Succ, Goal, Heur> FnWorld<S, Succ, Goal, Heur>
where
    Succ: Fn(&S) -> Vec<(S, f64)>,
    Goal: Fn(&S) -> bool,
    Heur: Fn(&S) -> f64,
{
    /// Build a world from a successor generator, a goal predicate and a heuristic.
    pub fn new(
        world_id: impl Into<String>,
        successors: Succ,
        is_goal: Goal,
        heuristic: Heur,
    ) -> Self {
        Self {
            world_id: world_id.into(),
            successors,
            is_goal,
            heuristic,
            _state: std::marker::PhantomData,
        }
    }
}

impl<S, Succ, Goal, Heur> SearchWorld for FnWorld<S, Succ, Goal, Heur>
where
    S: Clone + Eq + Hash + Debug,
    Succ: Fn(&S) -> Vec<(S, f64)>,
    Goal: Fn(&S) -> bool,
    Heur: Fn(&S) -> f64,
{
    type State = S;

    fn world_id(&self) -> &str {
        &self.world_id
    }

    fn successors(&self, state: &S) -> Vec<(S, f64)> {
        (self.successors)(state)
    }

    fn is_goal(&self, state: &S) -> bool {
        (self.is_goal)(state)
    }

    fn heuristic(&self, state: &S) -> f64 {
        (self.heuristic)(state)
    }
}
