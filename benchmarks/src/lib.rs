//! Shared inputs for waypoint benchmark suites.

use std::time::Duration;

use waypoint_harness::worlds::Board;
use waypoint_search::{SearchPolicy, StrategyKind};

/// Generous budget: benchmarks measure complete anytime runs, never timeouts.
pub const BENCH_TIMEBOUND: Duration = Duration::from_secs(120);

/// Named 8-puzzle instances with their optimal move counts.
pub const BOARDS: &[(&str, &str, u32)] = &[
    ("d14", "8 1 3 4 _ 2 7 6 5", 14),
    ("d22", "5 2 8 4 1 7 _ 3 6", 22),
    ("d31", "8 6 7 2 5 4 3 _ 1", 31),
];

/// Parse a board from [`BOARDS`].
///
/// # Panics
///
/// Panics if `text` is not a valid board; the constants above all are.
#[must_use]
pub fn board(text: &str) -> Board {
    Board::parse(text).expect("benchmark board constants are valid")
}

/// Policies compared by the anytime suite.
#[must_use]
pub fn anytime_policies() -> Vec<(&'static str, SearchPolicy)> {
    vec![
        ("astar", SearchPolicy::weighted_astar(1.0)),
        ("wastar_w3", SearchPolicy::weighted_astar(3.0)),
        (
            "wastar_w5_decay",
            SearchPolicy::weighted_astar(5.0).with_weight_decay(0.5),
        ),
        (
            "xdp_w2",
            SearchPolicy::weighted_astar(2.0).with_strategy(StrategyKind::Xdp),
        ),
        ("greedy", SearchPolicy::greedy()),
    ]
    .into_iter()
    .map(|(name, policy)| (name, policy.with_timebound(BENCH_TIMEBOUND)))
    .collect()
}
