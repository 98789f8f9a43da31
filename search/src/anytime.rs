//! Anytime driver: repeated bounded runs with a tightening cost bound.
//!
//! # Algorithm
//!
//! ```text
//! bound ← unbounded
//! loop:
//!     run best-first search under bound with the remaining time
//!     Solved(n) strictly better than best → best ← n, bound ← strictly below n
//!     otherwise                            → stop
//! ```
//!
//! Every run builds a fresh frontier, arena and closed set, so runs are
//! independent and reproducible. Only the optional caller-owned
//! [`HeuristicCache`] carries over.

use std::time::{Duration, Instant};

use tracing::{debug, info};

use crate::bound::{BoundPolicy, CostBound};
use crate::cache::HeuristicCache;
use crate::contract::SearchWorld;
use crate::error::SearchError;
use crate::priority::{Priority, StrategyKind};
use crate::policy::SearchPolicy;
use crate::search::{run_bounded, OutcomeKind, RunConfig, RunStats, SearchOutcome, Solution};

/// Why the anytime driver stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// The last run emptied its frontier: no (better) solution exists within
    /// the bound.
    Exhausted,
    /// The time budget ran out.
    TimedOut,
    /// The incumbent cannot be improved upon: a run returned a solution that
    /// is not strictly better, or no smaller bound exists.
    Converged,
    /// `max_iterations` runs were performed.
    IterationLimit,
}

impl StopReason {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Exhausted => "exhausted",
            Self::TimedOut => "timed_out",
            Self::Converged => "converged",
            Self::IterationLimit => "iteration_limit",
        }
    }
}

/// Summary of one inner run.
#[derive(Debug, Clone)]
pub struct IterationRecord {
    /// 1-based run number.
    pub iteration: u32,
    /// Weight the run used.
    pub weight: f64,
    /// Bound the run was pruned against.
    pub bound: CostBound,
    pub outcome: OutcomeKind,
    /// Solution cost, if the run solved.
    pub cost: Option<f64>,
    /// Solution metric under the bound policy, if the run solved.
    pub metric: Option<f64>,
    /// Number of states on the solution path, if the run solved.
    pub path_len: Option<usize>,
    /// Whether the solution replaced the incumbent.
    pub improved: bool,
    pub stats: RunStats,
}

/// Result of an anytime search.
#[derive(Debug, Clone)]
pub struct AnytimeResult<S> {
    /// Best solution found, `None` if no run succeeded.
    pub best: Option<Solution<S>>,
    /// One record per inner run, in order.
    pub iterations: Vec<IterationRecord>,
    pub stop_reason: StopReason,
    /// Bound policy the improvements were measured with.
    pub bound_policy: BoundPolicy,
    /// Wall-clock time spent across all runs.
    pub elapsed: Duration,
}

impl<S> AnytimeResult<S> {
    #[must_use]
    pub fn is_solved(&self) -> bool {
        self.best.is_some()
    }

    /// Cost of the best solution.
    #[must_use]
    pub fn best_cost(&self) -> Option<f64> {
        self.best.as_ref().map(Solution::cost)
    }

    /// Records of the runs whose solution became the incumbent, in order.
    pub fn improvements(&self) -> impl Iterator<Item = &IterationRecord> {
        self.iterations.iter().filter(|record| record.improved)
    }

    /// Whether the caller got no solution because time ran out, as opposed
    /// to the problem having none.
    #[must_use]
    pub fn timed_out_without_solution(&self) -> bool {
        self.best.is_none() && self.stop_reason == StopReason::TimedOut
    }
}

/// Builder for an anytime search over a world.
///
/// ```
/// use std::time::Duration;
/// use waypoint_search::anytime::AnytimeSearch;
/// use waypoint_search::contract::FnWorld;
/// use waypoint_search::policy::SearchPolicy;
///
/// let world = FnWorld::new(
///     "line",
///     |n: &u32| vec![(n + 1, 1.0)],
///     |n: &u32| *n == 5,
///     |n: &u32| f64::from(5u32.saturating_sub(*n)),
/// );
/// let policy = SearchPolicy::weighted_astar(2.0).with_timebound(Duration::from_secs(1));
/// let result = AnytimeSearch::new(&world, policy).run(0).unwrap();
/// assert_eq!(result.best_cost(), Some(5.0));
/// ```
pub struct AnytimeSearch<'a, W: SearchWorld> {
    world: &'a W,
    policy: SearchPolicy,
    priority: Option<&'a dyn Priority>,
    cache: Option<&'a mut HeuristicCache<W::State>>,
}

impl<'a, W: SearchWorld> AnytimeSearch<'a, W> {
    #[must_use]
    pub fn new(world: &'a W, policy: SearchPolicy) -> Self {
        Self {
            world,
            policy,
            priority: None,
            cache: None,
        }
    }

    /// Order the frontier with a caller-supplied priority function.
    ///
    /// Takes precedence over the built-in function of the policy's strategy;
    /// required when the strategy is [`StrategyKind::Custom`].
    #[must_use]
    pub fn with_priority(mut self, priority: &'a dyn Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Memoize heuristic values in a caller-owned cache shared by all runs.
    #[must_use]
    pub fn with_cache(mut self, cache: &'a mut HeuristicCache<W::State>) -> Self {
        self.cache = Some(cache);
        self
    }

    /// Run the anytime search from `start`.
    ///
    /// # Errors
    ///
    /// Returns a [`SearchError`] if the policy fails validation or the
    /// `custom` strategy has no priority function. Timeouts and exhaustion
    /// are reported through [`AnytimeResult::stop_reason`], never as errors.
    pub fn run(self, start: W::State) -> Result<AnytimeResult<W::State>, SearchError> {
        let Self {
            world,
            policy,
            priority,
            mut cache,
        } = self;

        policy.validate()?;
        let priority = match priority {
            Some(priority) => priority,
            None if policy.strategy == StrategyKind::Custom => {
                return Err(SearchError::MissingCustomPriority)
            }
            None => policy
                .strategy
                .builtin()
                .ok_or(SearchError::MissingCustomPriority)?,
        };

        let started = Instant::now();
        let bound_policy = policy.bound_policy;
        let mut weight = policy.weight;
        let mut bound = CostBound::unbounded();
        let mut best: Option<Solution<W::State>> = None;
        let mut best_metric = f64::INFINITY;
        let mut iterations: Vec<IterationRecord> = Vec::new();

        info!(
            world = world.world_id(),
            strategy = policy.strategy.as_str(),
            checking = policy.checking.as_str(),
            bound_policy = bound_policy.as_str(),
            weight,
            "anytime search started"
        );

        let stop_reason = loop {
            let remaining = policy.timebound.saturating_sub(started.elapsed());
            // The first run always starts, so a zero budget is reported by
            // the run itself as a timeout.
            if !iterations.is_empty() && remaining.is_zero() {
                break StopReason::TimedOut;
            }

            let config = RunConfig {
                priority,
                weight,
                checking: policy.checking,
                bound,
                budget: remaining,
            };
            let result = run_bounded(world, start.clone(), &config, cache.as_deref_mut());
            let iteration = u32::try_from(iterations.len() + 1).unwrap_or(u32::MAX);
            let mut record = IterationRecord {
                iteration,
                weight,
                bound,
                outcome: result.outcome.kind(),
                cost: None,
                metric: None,
                path_len: None,
                improved: false,
                stats: result.stats,
            };

            let solution = match result.outcome {
                SearchOutcome::Solved(solution) => solution,
                SearchOutcome::Exhausted => {
                    iterations.push(record);
                    break StopReason::Exhausted;
                }
                SearchOutcome::TimedOut => {
                    iterations.push(record);
                    break StopReason::TimedOut;
                }
            };

            let metric = bound_policy.metric(&solution.node);
            record.cost = Some(solution.cost());
            record.metric = Some(metric);
            record.path_len = Some(solution.path.len());

            if metric >= best_metric {
                debug!(iteration, metric, best_metric, "run did not improve incumbent");
                iterations.push(record);
                break StopReason::Converged;
            }

            record.improved = true;
            iterations.push(record);
            info!(
                iteration,
                cost = solution.cost(),
                metric,
                steps = solution.steps(),
                weight,
                "improved solution"
            );
            best_metric = metric;
            best = Some(solution);

            if policy
                .max_iterations
                .is_some_and(|max| iterations.len() >= max as usize)
            {
                break StopReason::IterationLimit;
            }
            match CostBound::strictly_below(bound_policy, metric) {
                Some(tightened) => bound = tightened,
                None => break StopReason::Converged,
            }
            weight = policy.next_weight(weight);
        };

        let elapsed = started.elapsed();
        info!(
            world = world.world_id(),
            stop_reason = stop_reason.as_str(),
            iterations = iterations.len(),
            best_cost = best.as_ref().map(Solution::cost),
            elapsed_ms = u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX),
            "anytime search finished"
        );

        Ok(AnytimeResult {
            best,
            iterations,
            stop_reason,
            bound_policy,
            elapsed,
        })
    }
}

/// Run an anytime search with the built-in priority function of
/// `policy.strategy`.
///
/// # Errors
///
/// See [`AnytimeSearch::run`].
pub fn anytime_search<W: SearchWorld>(
    world: &W,
    start: W::State,
    policy: &SearchPolicy,
) -> Result<AnytimeResult<W::State>, SearchError> {
    AnytimeSearch::new(world, policy.clone()).run(start)
}
