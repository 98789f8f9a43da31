//! Configuration files on disk: TOML loading, conversion to a policy, and a
//! configured run.
//!
//! Files are read with `read_config_file`, and overrides go through an
//! explicit lookup, so `WAYPOINT_SEARCH_*` in the test process has no effect.

use std::io::Write;
use std::time::Duration;

use lock_tests::fixtures;
use waypoint_harness::config::{apply_overrides, read_config_file, ConfigError, HarnessConfig};
use waypoint_harness::runner::{run_configured, RunError};
use waypoint_search::{BoundPolicy, CheckingLevel, StopReason, StrategyKind};

fn write_config(text: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().expect("create temp config");
    file.write_all(text.as_bytes()).expect("write temp config");
    file.flush().expect("flush temp config");
    file
}

#[test]
fn file_round_trips_into_policy() {
    let file = write_config(
        r#"
        [search]
        strategy = "xup"
        checking = "default"
        timebound_secs = 2.5
        weight = 1.75
        bound_policy = "cost"
        max_iterations = 3
        "#,
    );
    let policy = read_config_file(file.path())
        .expect("config loads")
        .to_policy()
        .expect("config converts");
    assert_eq!(policy.strategy, StrategyKind::Xup);
    assert_eq!(policy.checking, CheckingLevel::Default);
    assert_eq!(policy.timebound, Duration::from_millis(2500));
    assert_eq!(policy.bound_policy, BoundPolicy::Cost);
    assert_eq!(policy.max_iterations, Some(3));
    assert!((policy.weight - 1.75).abs() < f64::EPSILON);
}

#[test]
fn partial_file_keeps_defaults() {
    let file = write_config("[search]\nweight = 3.0\n");
    let config = read_config_file(file.path()).expect("config loads");
    let defaults = HarnessConfig::default();
    assert_eq!(config.search.strategy, defaults.search.strategy);
    assert_eq!(config.search.checking, defaults.search.checking);
    assert!((config.search.weight - 3.0).abs() < f64::EPSILON);
}

#[test]
fn overrides_apply_on_top_of_file() {
    let file = write_config("[search]\nstrategy = \"greedy\"\nweight = 3.0\n");
    let config = read_config_file(file.path()).expect("config loads");
    let config = apply_overrides(config, |key| {
        (key == "WAYPOINT_SEARCH_WEIGHT").then(|| "4.5".to_string())
    })
    .expect("override parses");
    assert_eq!(config.search.strategy, StrategyKind::Greedy);
    assert!((config.search.weight - 4.5).abs() < f64::EPSILON);

    let unchanged = apply_overrides(config.clone(), |_| None).expect("no overrides");
    assert_eq!(unchanged, config);
}

#[test]
fn malformed_file_is_parse_error() {
    let file = write_config("[search\nweight = ");
    let err = read_config_file(file.path()).expect_err("malformed TOML");
    assert!(matches!(err, ConfigError::Parse { .. }), "got {err:?}");
    assert!(err.to_string().contains(&file.path().display().to_string()));
}

#[test]
fn configured_greedy_run_improves_three_times() {
    let file = write_config(
        r#"
        [search]
        strategy = "greedy"
        bound_policy = "cost"
        timebound_secs = 10.0
        "#,
    );
    let config = read_config_file(file.path()).expect("config loads");
    let outcome =
        run_configured(&fixtures::lure_graph(), "S".to_string(), &config).expect("run succeeds");
    assert_eq!(outcome.result.improvements().count(), 3);
    assert_eq!(outcome.result.best_cost(), Some(3.0));
    assert_eq!(outcome.result.stop_reason, StopReason::Exhausted);
}

#[test]
fn invalid_values_fail_before_search() {
    let file = write_config("[search]\nweight_decay = 1.5\n");
    let config = read_config_file(file.path()).expect("config loads");
    let err = run_configured(&fixtures::lure_graph(), "S".to_string(), &config)
        .expect_err("decay above 1");
    assert!(matches!(err, RunError::Config(ConfigError::Policy(_))));
}
