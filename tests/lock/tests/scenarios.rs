//! Named scenarios: cheaper indirect path, zero time budget, infinite
//! estimates off the solution path, and the fixture worlds end to end.

use std::time::Duration;

use lock_tests::fixtures;
use waypoint_harness::runner::run_world;
use waypoint_harness::worlds::{Cell, SlidingTile};
use waypoint_search::{
    anytime_search, run_bounded, search, AnytimeSearch, CheckingLevel, CostBound, HeuristicCache,
    OutcomeKind, RunConfig, SearchOutcome, SearchPolicy, StopReason, UniformCost,
};

// ---------------------------------------------------------------------------
// Direct edge cost 3 vs. indirect path cost 2
// ---------------------------------------------------------------------------

#[test]
fn uniform_cost_takes_cheaper_indirect_path() {
    let policy = SearchPolicy::uniform_cost().with_checking(CheckingLevel::Full);
    let result = search(&fixtures::detour_graph(), "S".to_string(), &policy).unwrap();
    let solution = result.outcome.into_solution().expect("detour is solvable");
    assert_eq!(solution.cost(), 2.0);
    assert_eq!(solution.path, vec!["S", "A", "G"]);
}

#[test]
fn anytime_uniform_cost_stops_after_proving_detour_optimal() {
    let policy = SearchPolicy::uniform_cost().with_timebound(Duration::from_secs(10));
    let result = anytime_search(&fixtures::detour_graph(), "S".to_string(), &policy).unwrap();
    assert_eq!(result.best_cost(), Some(2.0));
    assert_eq!(result.stop_reason, StopReason::Exhausted);
    assert_eq!(result.iterations.len(), 2);
    assert_eq!(result.iterations[1].outcome, OutcomeKind::Exhausted);
}

// ---------------------------------------------------------------------------
// Zero time budget
// ---------------------------------------------------------------------------

#[test]
fn zero_timebound_times_out_without_expanding_root() {
    let policy = SearchPolicy::default().with_timebound(Duration::ZERO);
    let maze = fixtures::maze();
    let result = anytime_search(&maze, maze.start(), &policy).unwrap();
    assert!(result.best.is_none());
    assert_eq!(result.stop_reason, StopReason::TimedOut);
    assert!(result.timed_out_without_solution());
    assert_eq!(result.iterations.len(), 1);
    assert_eq!(result.iterations[0].stats.expansions, 0);
    assert_eq!(result.iterations[0].stats.nodes_allocated, 1);
}

#[test]
fn zero_timebound_skips_goal_test_of_goal_root() {
    let config = RunConfig {
        priority: &UniformCost,
        weight: 1.0,
        checking: CheckingLevel::Full,
        bound: CostBound::unbounded(),
        budget: Duration::ZERO,
    };
    let result = run_bounded(&fixtures::detour_graph(), "G".to_string(), &config, None);
    assert!(matches!(result.outcome, SearchOutcome::TimedOut));
}

// ---------------------------------------------------------------------------
// Infinite estimates everywhere off the single solution path
// ---------------------------------------------------------------------------

#[test]
fn astar_follows_single_finite_path() {
    let policy = SearchPolicy::weighted_astar(1.0).with_timebound(Duration::from_secs(10));
    let result = anytime_search(&fixtures::single_path_graph(), "S".to_string(), &policy).unwrap();
    let best = result.best.as_ref().expect("single path is solvable");
    assert_eq!(best.path, vec!["S", "A", "B", "G"]);
    assert_eq!(best.cost(), 3.0);
    // X, Y and Z are each dropped once in the first run.
    assert_eq!(result.iterations[0].stats.pruned_unreachable, 3);
    assert_eq!(result.stop_reason, StopReason::Exhausted);
}

// ---------------------------------------------------------------------------
// Fixture worlds end to end
// ---------------------------------------------------------------------------

#[test]
fn maze_path_is_walkable_and_optimal() {
    let maze = fixtures::maze();
    let policy = SearchPolicy::weighted_astar(2.0).with_timebound(Duration::from_secs(30));
    let outcome = run_world(&maze, maze.start(), &policy).unwrap();
    let best = outcome.result.best.as_ref().expect("maze is solvable");

    assert_eq!(best.path.first(), Some(&maze.start()));
    assert_eq!(best.path.last(), Some(&maze.goal()));
    for hop in best.path.windows(2) {
        assert_eq!(hop[0].manhattan(hop[1]), 1, "path must move one cell at a time");
    }
    assert_eq!(maze.path_cost(&best.path), Some(best.cost()));
    assert_eq!(best.cost(), fixtures::MAZE_OPTIMAL);
    assert_eq!(best.goal_state(), &Cell::new(6, 9));
}

#[test]
fn sliding_puzzle_anytime_reaches_optimum() {
    let start = fixtures::board(fixtures::BOARD_22);
    let policy = SearchPolicy::weighted_astar(5.0)
        .with_weight_decay(0.5)
        .with_timebound(Duration::from_secs(30));
    let outcome = run_world(&SlidingTile, start, &policy).unwrap();
    assert_eq!(outcome.result.best_cost(), Some(22.0));
    assert_eq!(outcome.result.stop_reason, StopReason::Exhausted);
    let weights: Vec<f64> = outcome.result.iterations.iter().map(|r| r.weight).collect();
    assert_eq!(weights.first(), Some(&5.0));
    assert!(weights.iter().all(|w| *w >= 1.0));
}

#[test]
fn iteration_cap_keeps_first_solution() {
    let policy = SearchPolicy::greedy()
        .with_max_iterations(1)
        .with_timebound(Duration::from_secs(10));
    let result = anytime_search(&fixtures::lure_graph(), "S".to_string(), &policy).unwrap();
    assert_eq!(result.stop_reason, StopReason::IterationLimit);
    assert_eq!(result.best_cost(), Some(10.0));
}

#[test]
fn shared_cache_serves_later_searches() {
    let maze = fixtures::maze();
    let policy = SearchPolicy::weighted_astar(1.5).with_timebound(Duration::from_secs(30));
    let mut cache = HeuristicCache::new();

    let first = AnytimeSearch::new(&maze, policy.clone())
        .with_cache(&mut cache)
        .run(maze.start())
        .unwrap();
    let misses = cache.misses();
    assert!(misses > 0);

    let second = AnytimeSearch::new(&maze, policy)
        .with_cache(&mut cache)
        .run(maze.start())
        .unwrap();
    assert_eq!(cache.misses(), misses, "second search must hit the cache only");
    assert_eq!(first.best_cost(), second.best_cost());
}
