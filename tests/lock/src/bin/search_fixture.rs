//! Binary that runs one fixture world through the harness runner and prints
//! deterministic output lines for cross-process verification.
//!
//! Usage: `search_fixture [maze|tile|graph]` (default `maze`)
//!
//! The policy comes from `load_config()`: `WAYPOINT_CONFIG` and
//! `WAYPOINT_SEARCH_*` apply. Logs go to stderr.
//!
//! Output: key=value lines (see source for format).

use lock_tests::fixtures;
use waypoint_harness::config::load_config;
use waypoint_harness::report::RunReportV1;
use waypoint_harness::runner::{run_world, RunOutcome};
use waypoint_harness::worlds::SlidingTile;

fn print_outcome<S>(world: &str, outcome: &RunOutcome<S>) {
    let report: &RunReportV1 = &outcome.report;
    let digest = report.digest().expect("report digest");
    println!("world={world}");
    println!("stop_reason={}", report.stop_reason);
    println!("iterations={}", report.iterations.len());
    println!("improvements={}", outcome.result.improvements().count());
    println!(
        "best_cost={}",
        report.best_cost.as_deref().unwrap_or("none")
    );
    println!(
        "best_steps={}",
        report
            .best_steps
            .map_or_else(|| "none".to_string(), |s| s.to_string())
    );
    println!(
        "best_path_digest={}",
        report
            .best_path_digest
            .as_ref()
            .map_or("none", |h| h.as_str())
    );
    println!("report_digest={}", digest.as_str());
}

fn main() {
    lock_tests::init_tracing();

    let world = std::env::args().nth(1).unwrap_or_else(|| "maze".to_string());
    let config = load_config().expect("config must load");
    let policy = config.to_policy().expect("config must convert to a policy");
    tracing::info!(
        world = %world,
        strategy = policy.strategy.as_str(),
        timebound = ?policy.timebound,
        "search_fixture starting"
    );

    match world.as_str() {
        "maze" => {
            let maze = fixtures::maze();
            let outcome = run_world(&maze, maze.start(), &policy).expect("maze run");
            print_outcome(&world, &outcome);
        }
        "tile" => {
            let start = fixtures::board(fixtures::BOARD_22);
            let outcome = run_world(&SlidingTile, start, &policy).expect("tile run");
            print_outcome(&world, &outcome);
        }
        "graph" => {
            let graph = fixtures::lure_graph();
            let outcome = run_world(&graph, "S".to_string(), &policy).expect("graph run");
            print_outcome(&world, &outcome);
        }
        other => {
            eprintln!("unknown world {other:?}; expected maze, tile or graph");
            std::process::exit(2);
        }
    }
}
