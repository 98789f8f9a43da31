//! Single bounded-time search run: expansion and the best-first loop.

use std::time::{Duration, Instant};

use tracing::{debug, trace};

use crate::arena::NodeArena;
use crate::bound::CostBound;
use crate::cache::HeuristicCache;
use crate::closed::ClosedSet;
use crate::contract::SearchWorld;
use crate::error::SearchError;
use crate::frontier::BestFirstFrontier;
use crate::node::{FrontierKey, NodeId, SearchNode};
use crate::policy::{CheckingLevel, SearchPolicy};
use crate::priority::Priority;

/// A goal node together with the state path that reaches it.
#[derive(Debug, Clone)]
pub struct Solution<S> {
    /// The terminal node (its `g` is the solution cost).
    pub node: SearchNode<S>,
    /// States from the start state to the goal state, inclusive.
    pub path: Vec<S>,
}

impl<S> Solution<S> {
    /// Path cost of the solution.
    #[must_use]
    pub fn cost(&self) -> f64 {
        self.node.g
    }

    /// Number of transitions on the path.
    #[must_use]
    pub fn steps(&self) -> usize {
        self.path.len().saturating_sub(1)
    }

    #[must_use]
    pub fn goal_state(&self) -> &S {
        &self.node.state
    }
}

/// How a single run terminated.
#[derive(Debug, Clone)]
pub enum SearchOutcome<S> {
    /// A goal node was popped from the frontier.
    Solved(Solution<S>),
    /// The frontier emptied without reaching a goal.
    Exhausted,
    /// The time budget ran out before success or exhaustion.
    TimedOut,
}

impl<S> SearchOutcome<S> {
    #[must_use]
    pub fn solution(&self) -> Option<&Solution<S>> {
        match self {
            Self::Solved(solution) => Some(solution),
            Self::Exhausted | Self::TimedOut => None,
        }
    }

    #[must_use]
    pub fn into_solution(self) -> Option<Solution<S>> {
        match self {
            Self::Solved(solution) => Some(solution),
            Self::Exhausted | Self::TimedOut => None,
        }
    }

    #[must_use]
    pub fn is_solved(&self) -> bool {
        matches!(self, Self::Solved(_))
    }

    #[must_use]
    pub fn kind(&self) -> OutcomeKind {
        match self {
            Self::Solved(_) => OutcomeKind::Solved,
            Self::Exhausted => OutcomeKind::Exhausted,
            Self::TimedOut => OutcomeKind::TimedOut,
        }
    }
}

/// Payload-free view of a [`SearchOutcome`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutcomeKind {
    Solved,
    Exhausted,
    TimedOut,
}

impl OutcomeKind {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Solved => "solved",
            Self::Exhausted => "exhausted",
            Self::TimedOut => "timed_out",
        }
    }
}

/// Counters for one run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunStats {
    /// Nodes popped and expanded.
    pub expansions: u64,
    /// Successors produced by expansion (before any pruning).
    pub generated: u64,
    /// Successors discarded by the cost bound.
    pub pruned_by_bound: u64,
    /// Successors discarded because their heuristic was infinite.
    pub pruned_unreachable: u64,
    /// Successors discarded by path checking or the closed set.
    pub pruned_by_cycle_check: u64,
    /// Popped nodes skipped because a cheaper path to their state was known.
    pub dominated_skips: u64,
    /// Largest frontier size reached.
    pub frontier_high_water: u64,
    /// Nodes stored in the arena, root included.
    pub nodes_allocated: u64,
    /// Wall-clock time spent in the run.
    pub elapsed: Duration,
}

/// Result of a single run.
#[derive(Debug, Clone)]
pub struct SearchResult<S> {
    pub outcome: SearchOutcome<S>,
    pub stats: RunStats,
}

/// Parameters of one bounded run.
///
/// The anytime driver builds one of these per iteration; each run owns a
/// fresh frontier, arena and closed set.
#[derive(Clone, Copy)]
pub struct RunConfig<'a> {
    pub priority: &'a dyn Priority,
    pub weight: f64,
    pub checking: CheckingLevel,
    pub bound: CostBound,
    /// Wall-clock budget for this run alone.
    pub budget: Duration,
}

impl std::fmt::Debug for RunConfig<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RunConfig")
            .field("weight", &self.weight)
            .field("checking", &self.checking)
            .field("bound", &self.bound)
            .field("budget", &self.budget)
            .finish_non_exhaustive()
    }
}

/// A successor produced by [`expand`], not yet stored in an arena.
#[derive(Debug, Clone, PartialEq)]
pub struct Successor<S> {
    pub state: S,
    pub step_cost: f64,
    pub g: f64,
    pub h: f64,
    pub f: f64,
    pub depth: u32,
}

/// Expand `node`: one [`Successor`] per transition the world reports, in the
/// world's order, with `g`, `h` and `f` computed.
///
/// No pruning happens here. Expansion is a pure function of the node's state
/// and costs, so expanding the same node twice yields identical successors.
pub fn expand<W: SearchWorld>(
    world: &W,
    priority: &dyn Priority,
    weight: f64,
    node: &SearchNode<W::State>,
) -> Vec<Successor<W::State>> {
    expand_with(world, priority, weight, node, &mut None)
}

fn expand_with<W: SearchWorld>(
    world: &W,
    priority: &dyn Priority,
    weight: f64,
    node: &SearchNode<W::State>,
    cache: &mut Option<&mut HeuristicCache<W::State>>,
) -> Vec<Successor<W::State>> {
    world
        .successors(&node.state)
        .into_iter()
        .map(|(state, step_cost)| {
            debug_assert!(step_cost >= 0.0, "negative step cost {step_cost}");
            let g = node.g + step_cost;
            let h = evaluate(world, cache, &state);
            Successor {
                f: priority.fval(g, h, weight),
                state,
                step_cost,
                g,
                h,
                depth: node.depth + 1,
            }
        })
        .collect()
}

fn evaluate<W: SearchWorld>(
    world: &W,
    cache: &mut Option<&mut HeuristicCache<W::State>>,
    state: &W::State,
) -> f64 {
    match cache {
        Some(cache) => cache.get_or_compute(state, |s| world.heuristic(s)),
        None => world.heuristic(state),
    }
}

/// Whether `state` is the state of `id` or of one of its ancestors.
fn on_path<S: PartialEq>(arena: &NodeArena<S>, id: NodeId, state: &S) -> bool {
    arena.get(id).state == *state || arena.ancestors(id).any(|n| n.state == *state)
}

/// Run best-first search from `start` under `config`.
///
/// Never fails: exhaustion and timeout are ordinary outcomes. The time
/// check precedes every pop, so a zero budget returns
/// [`SearchOutcome::TimedOut`] without goal-testing or expanding the root.
/// The root is held to the cost bound like any successor; a root outside
/// it leaves the frontier empty and the run exhausts.
pub fn run_bounded<W: SearchWorld>(
    world: &W,
    start: W::State,
    config: &RunConfig<'_>,
    mut cache: Option<&mut HeuristicCache<W::State>>,
) -> SearchResult<W::State> {
    let started = Instant::now();
    let mut arena: NodeArena<W::State> = NodeArena::new();
    let mut frontier = BestFirstFrontier::new();
    let mut closed: ClosedSet<W::State> = ClosedSet::new();
    let mut stats = RunStats::default();
    let mut next_creation_order: u64 = 0;

    debug!(
        world = world.world_id(),
        weight = config.weight,
        checking = config.checking.as_str(),
        g_bound = config.bound.g_bound,
        f_bound = config.bound.f_bound,
        budget_ms = u64::try_from(config.budget.as_millis()).unwrap_or(u64::MAX),
        "search run started"
    );

    // Root node
    let root_h = evaluate(world, &mut cache, &start);
    if config.checking == CheckingLevel::Full {
        closed.offer(start.clone(), 0.0);
    }
    let root = SearchNode {
        id: NodeId::ROOT,
        parent: None,
        state: start,
        g: 0.0,
        h: root_h,
        f: config.priority.fval(0.0, root_h, config.weight),
        depth: 0,
        creation_order: next_creation_order,
    };
    next_creation_order += 1;
    let root_key = FrontierKey::from(&root);
    let root_admitted = config.bound.admits(root.g, root.h);
    let root_id = arena.allocate(root);
    if root_admitted {
        frontier.push(root_key, root_id);
    } else {
        stats.pruned_by_bound += 1;
    }

    let outcome = loop {
        if frontier.is_empty() {
            break SearchOutcome::Exhausted;
        }
        if started.elapsed() >= config.budget {
            break SearchOutcome::TimedOut;
        }
        let Some((_, current_id)) = frontier.pop() else {
            break SearchOutcome::Exhausted;
        };
        let current = arena.get(current_id);

        if world.is_goal(&current.state) {
            break SearchOutcome::Solved(Solution {
                node: current.clone(),
                path: arena.reconstruct_path(current_id),
            });
        }

        if config.checking == CheckingLevel::Full && closed.is_dominated(&current.state, current.g)
        {
            trace!(g = current.g, "skipping dominated node");
            stats.dominated_skips += 1;
            continue;
        }

        stats.expansions += 1;
        let successors = expand_with(world, config.priority, config.weight, current, &mut cache);
        stats.generated += successors.len() as u64;

        for succ in successors {
            if succ.h.is_infinite() {
                stats.pruned_unreachable += 1;
                continue;
            }
            if !config.bound.admits(succ.g, succ.h) {
                stats.pruned_by_bound += 1;
                continue;
            }
            let admitted = match config.checking {
                CheckingLevel::Default => !on_path(&arena, current_id, &succ.state),
                CheckingLevel::Full => closed.offer(succ.state.clone(), succ.g),
            };
            if !admitted {
                stats.pruned_by_cycle_check += 1;
                continue;
            }

            let child = SearchNode {
                id: NodeId::ROOT, // assigned by the arena
                parent: Some(current_id),
                state: succ.state,
                g: succ.g,
                h: succ.h,
                f: succ.f,
                depth: succ.depth,
                creation_order: next_creation_order,
            };
            next_creation_order += 1;
            let key = FrontierKey::from(&child);
            let child_id = arena.allocate(child);
            frontier.push(key, child_id);
        }
    };

    stats.frontier_high_water = frontier.high_water();
    stats.nodes_allocated = arena.len() as u64;
    stats.elapsed = started.elapsed();

    debug!(
        world = world.world_id(),
        outcome = outcome.kind().as_str(),
        expansions = stats.expansions,
        generated = stats.generated,
        cost = outcome.solution().map(Solution::cost),
        "search run finished"
    );

    SearchResult { outcome, stats }
}

/// Run a single unbounded best-first search under `policy`, using the
/// built-in priority function its strategy names and the full timebound.
///
/// # Errors
///
/// Returns a [`SearchError`] if the policy fails validation, or
/// [`SearchError::MissingCustomPriority`] for the `custom` strategy (use
/// [`run_bounded`] with a caller-supplied priority instead). No node is
/// expanded in either case.
pub fn search<W: SearchWorld>(
    world: &W,
    start: W::State,
    policy: &SearchPolicy,
) -> Result<SearchResult<W::State>, SearchError> {
    policy.validate()?;
    let priority = policy
        .strategy
        .builtin()
        .ok_or(SearchError::MissingCustomPriority)?;
    let config = RunConfig {
        priority,
        weight: policy.weight,
        checking: policy.checking,
        bound: CostBound::unbounded(),
        budget: policy.timebound,
    };
    Ok(run_bounded(world, start, &config, None))
}
