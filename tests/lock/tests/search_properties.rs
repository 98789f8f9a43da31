//! Engine properties checked across every fixture world and strategy:
//! admissibility preservation, monotonic improvement, no-worse-than-first,
//! bound respecting, expansion idempotence, and optimality on exhaustion.

use std::time::Duration;

use lock_tests::fixtures;
use waypoint_harness::worlds::SlidingTile;
use waypoint_search::{
    anytime_search, expand, search, AnytimeResult, BoundPolicy, CheckingLevel, NodeId,
    OutcomeKind, SearchNode, SearchPolicy, SearchWorld, StopReason, StrategyKind, WeightedAStar,
};

const BUDGET: Duration = Duration::from_secs(60);

/// A world, its start state, and its optimal cost.
struct Case<W: SearchWorld> {
    world: W,
    start: W::State,
    optimal: f64,
}

fn graph_cases() -> Vec<Case<waypoint_harness::worlds::WeightedGraph>> {
    vec![
        Case {
            world: fixtures::detour_graph(),
            start: "S".to_string(),
            optimal: 2.0,
        },
        Case {
            world: fixtures::lure_graph(),
            start: "S".to_string(),
            optimal: 3.0,
        },
        Case {
            world: fixtures::single_path_graph(),
            start: "S".to_string(),
            optimal: 3.0,
        },
        Case {
            world: fixtures::lattice_graph(6),
            start: "S".to_string(),
            optimal: 7.0,
        },
    ]
}

fn anytime_policies() -> Vec<SearchPolicy> {
    let mut policies = vec![
        SearchPolicy::uniform_cost(),
        SearchPolicy::greedy(),
        SearchPolicy::weighted_astar(1.0),
        SearchPolicy::weighted_astar(3.0),
        SearchPolicy::weighted_astar(5.0).with_weight_decay(0.5),
        SearchPolicy::weighted_astar(2.0).with_strategy(StrategyKind::Xup),
        SearchPolicy::weighted_astar(2.0).with_strategy(StrategyKind::Xdp),
        SearchPolicy::greedy().with_bound_policy(BoundPolicy::Estimate),
    ];
    for policy in &mut policies {
        policy.timebound = BUDGET;
    }
    policies
}

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

/// Check the invariants every anytime result must satisfy.
fn check_anytime<S>(label: &str, policy: &SearchPolicy, result: &AnytimeResult<S>, optimal: f64) {
    assert!(
        result.stop_reason != StopReason::TimedOut,
        "{label}: fixture run must finish inside the budget"
    );
    let best = result.best_cost().unwrap_or_else(|| panic!("{label}: no solution"));

    // Monotonic improvement: accepted metrics strictly decrease.
    let metrics: Vec<f64> = result.improvements().filter_map(|r| r.metric).collect();
    assert!(!metrics.is_empty(), "{label}: no improvement recorded");
    for pair in metrics.windows(2) {
        assert!(pair[1] < pair[0], "{label}: metrics not decreasing: {metrics:?}");
    }

    // No-worse-than-first.
    let first = result
        .improvements()
        .next()
        .and_then(|r| r.cost)
        .unwrap_or(f64::INFINITY);
    assert!(best <= first, "{label}: best {best} worse than first {first}");

    // Bound respecting.
    for record in &result.iterations {
        if record.outcome != OutcomeKind::Solved {
            continue;
        }
        let cost = record.cost.unwrap_or(f64::NAN);
        let metric = record.metric.unwrap_or(f64::NAN);
        assert!(cost <= record.bound.g_bound, "{label}: cost {cost} above g bound");
        if policy.bound_policy == BoundPolicy::Estimate {
            assert!(metric <= record.bound.f_bound, "{label}: metric above f bound");
        }
    }

    // No accepted solution beats the optimum; exhaustion proves optimality.
    assert!(best >= optimal - 1e-9, "{label}: best {best} below optimum {optimal}");
    if result.stop_reason == StopReason::Exhausted {
        assert!(close(best, optimal), "{label}: exhausted at {best}, optimum {optimal}");
    }
}

// ---------------------------------------------------------------------------
// Admissibility preservation
// ---------------------------------------------------------------------------

#[test]
fn first_solution_is_optimal_under_admissible_heuristics() {
    let optimal_policies = [
        SearchPolicy::uniform_cost().with_timebound(BUDGET),
        SearchPolicy::weighted_astar(1.0).with_timebound(BUDGET),
    ];
    for policy in &optimal_policies {
        assert_eq!(policy.checking, CheckingLevel::Full);
        for case in graph_cases() {
            let result = search(&case.world, case.start.clone(), policy).expect("valid policy");
            let solution = result.outcome.into_solution().expect("solvable");
            assert!(
                close(solution.cost(), case.optimal),
                "{} under {}: got {}",
                case.world.world_id(),
                policy.strategy.as_str(),
                solution.cost()
            );
        }

        let maze = fixtures::maze();
        let result = search(&maze, maze.start(), policy).expect("valid policy");
        let cost = result.outcome.into_solution().expect("solvable").cost();
        assert!(close(cost, fixtures::MAZE_OPTIMAL));
    }
}

#[test]
fn astar_solves_sliding_puzzles_optimally() {
    let policy = SearchPolicy::weighted_astar(1.0).with_timebound(BUDGET);
    for (text, optimal) in [(fixtures::BOARD_14, 14.0), (fixtures::BOARD_22, 22.0)] {
        let result = search(&SlidingTile, fixtures::board(text), &policy).expect("valid policy");
        let solution = result.outcome.into_solution().expect("solvable");
        assert!(close(solution.cost(), optimal), "{text}: got {}", solution.cost());
        assert_eq!(solution.steps(), solution.cost() as usize);
    }
}

// ---------------------------------------------------------------------------
// Anytime invariants across strategies
// ---------------------------------------------------------------------------

#[test]
fn anytime_invariants_on_graphs() {
    for case in graph_cases() {
        for policy in anytime_policies() {
            for checking in [CheckingLevel::Full, CheckingLevel::Default] {
                let policy = policy.clone().with_checking(checking);
                let label = format!(
                    "{}/{}/w{}/{}",
                    case.world.world_id(),
                    policy.strategy.as_str(),
                    policy.weight,
                    checking.as_str()
                );
                let result =
                    anytime_search(&case.world, case.start.clone(), &policy).expect("valid policy");
                check_anytime(&label, &policy, &result, case.optimal);
            }
        }
    }
}

#[test]
fn goal_root_respects_tightened_bound() {
    let graph = fixtures::goal_root_graph();
    for policy in anytime_policies() {
        for checking in [CheckingLevel::Full, CheckingLevel::Default] {
            let policy = policy.clone().with_checking(checking);
            let label = format!(
                "goal_root/{}/{}/{}",
                policy.strategy.as_str(),
                policy.bound_policy.as_str(),
                checking.as_str()
            );
            let result = anytime_search(&graph, "G".to_string(), &policy).expect("valid policy");
            check_anytime(&label, &policy, &result, 0.0);
            assert_eq!(result.improvements().count(), 1, "{label}");
            let best = result.best.as_ref().expect("root is a goal");
            assert_eq!(best.path, vec!["G"], "{label}");
        }
    }
}

#[test]
fn anytime_invariants_on_maze() {
    let maze = fixtures::maze();
    for policy in anytime_policies() {
        let label = format!("maze/{}/w{}", policy.strategy.as_str(), policy.weight);
        let result = anytime_search(&maze, maze.start(), &policy).expect("valid policy");
        check_anytime(&label, &policy, &result, fixtures::MAZE_OPTIMAL);
    }
}

#[test]
fn anytime_invariants_on_sliding_puzzle() {
    let start = fixtures::board(fixtures::BOARD_14);
    for policy in anytime_policies() {
        let label = format!("tile/{}/w{}", policy.strategy.as_str(), policy.weight);
        let result = anytime_search(&SlidingTile, start, &policy).expect("valid policy");
        check_anytime(&label, &policy, &result, 14.0);
    }
}

#[test]
fn greedy_anytime_walks_down_the_lure() {
    let policy = SearchPolicy::greedy().with_timebound(BUDGET);
    let result = anytime_search(&fixtures::lure_graph(), "S".to_string(), &policy).unwrap();
    let costs: Vec<f64> = result.improvements().filter_map(|r| r.cost).collect();
    assert_eq!(costs, vec![10.0, 6.0, 3.0]);
    assert_eq!(result.stop_reason, StopReason::Exhausted);
}

// ---------------------------------------------------------------------------
// Idempotence of expansion
// ---------------------------------------------------------------------------

fn node_at<S>(state: S, g: f64) -> SearchNode<S> {
    SearchNode {
        id: NodeId::ROOT,
        parent: None,
        state,
        g,
        h: 0.0,
        f: g,
        depth: 3,
        creation_order: 0,
    }
}

#[test]
fn expansion_is_idempotent() {
    let maze = fixtures::maze();
    let node = node_at(maze.start(), 4.0);
    assert_eq!(
        expand(&maze, &WeightedAStar, 2.0, &node),
        expand(&maze, &WeightedAStar, 2.0, &node)
    );

    let board = node_at(fixtures::board(fixtures::BOARD_22), 0.0);
    let first = expand(&SlidingTile, &WeightedAStar, 1.0, &board);
    let second = expand(&SlidingTile, &WeightedAStar, 1.0, &board);
    assert_eq!(first, second);
    assert!(first.iter().all(|s| s.depth == 4 && close(s.g, 1.0)));

    let graph = fixtures::lure_graph();
    let node = node_at("S".to_string(), 0.0);
    let succ = expand(&graph, &WeightedAStar, 1.0, &node);
    assert_eq!(succ, expand(&graph, &WeightedAStar, 1.0, &node));
    let states: Vec<&str> = succ.iter().map(|s| s.state.as_str()).collect();
    assert_eq!(states, vec!["A", "B", "C"]);
}

#[test]
fn repeated_anytime_runs_agree() {
    let policy = SearchPolicy::weighted_astar(3.0)
        .with_weight_decay(0.6)
        .with_timebound(BUDGET);
    let start = fixtures::board(fixtures::BOARD_22);
    let first = anytime_search(&SlidingTile, start, &policy).unwrap();
    for _ in 0..3 {
        let again = anytime_search(&SlidingTile, start, &policy).unwrap();
        assert_eq!(again.best.as_ref().map(|s| &s.path), first.best.as_ref().map(|s| &s.path));
        assert_eq!(again.iterations.len(), first.iterations.len());
        for (a, b) in again.iterations.iter().zip(&first.iterations) {
            assert_eq!(a.stats.expansions, b.stats.expansions);
            assert_eq!(a.cost, b.cost);
        }
    }
}
