//! Harness runner: drives an anytime search over a world and packages the
//! result with its canonical report.
//!
//! # Pipeline
//!
//! ```text
//! HarnessConfig → to_policy() → anytime_search() → RunReportV1::from_result()
//! ```

use tracing::{info, info_span};

use waypoint_search::{anytime_search, AnytimeResult, SearchError, SearchPolicy, SearchWorld};

use crate::config::{ConfigError, HarnessConfig};
use crate::report::{ReportError, RunReportV1};

/// Error during a harness run.
#[derive(Debug, thiserror::Error)]
pub enum RunError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("search rejected policy: {0}")]
    Search(#[from] SearchError),
    #[error("report failed: {0}")]
    Report(#[from] ReportError),
}

/// Result of a harness run.
#[derive(Debug, Clone)]
pub struct RunOutcome<S> {
    pub result: AnytimeResult<S>,
    pub report: RunReportV1,
}

/// Run an anytime search over `world` from `start` under `policy`.
///
/// # Errors
///
/// Returns [`RunError::Search`] if the policy is rejected before search and
/// [`RunError::Report`] if the report cannot be built. Timeouts and
/// exhaustion are reported in the outcome.
pub fn run_world<W: SearchWorld>(
    world: &W,
    start: W::State,
    policy: &SearchPolicy,
) -> Result<RunOutcome<W::State>, RunError> {
    let span = info_span!("run_world", world = world.world_id());
    let _guard = span.enter();

    let result = anytime_search(world, start, policy)?;
    let report = RunReportV1::from_result(world.world_id(), policy, &result)?;
    info!(
        stop_reason = result.stop_reason.as_str(),
        iterations = result.iterations.len(),
        best_cost = result.best_cost(),
        "run complete"
    );
    Ok(RunOutcome { result, report })
}

/// Run with a policy built from a [`HarnessConfig`].
///
/// # Errors
///
/// Returns [`RunError::Config`] if the configuration does not convert to a
/// valid policy, otherwise as [`run_world`].
pub fn run_configured<W: SearchWorld>(
    world: &W,
    start: W::State,
    config: &HarnessConfig,
) -> Result<RunOutcome<W::State>, RunError> {
    let policy = config.to_policy()?;
    run_world(world, start, &policy)
}
