//! `RunReportV1`: canonical summary of one anytime run.
//!
//! The report echoes the policy, one record per inner run, the stop reason
//! and the best solution's cost, length and path digest. Floats are rendered
//! with [`float_string`]; wall-clock times are left out so that two runs
//! that did the same work produce identical bytes.

use std::fmt::Debug;

use serde_json::{json, Value};

use waypoint_search::{AnytimeResult, CostBound, IterationRecord, SearchPolicy};

use crate::canon::{canonical_json_bytes, float_string, CanonError};
use crate::hash::{canonical_hash, ContentHash, DOMAIN_RUN_REPORT, DOMAIN_SOLUTION_PATH};

/// Schema version tag embedded in every report.
pub const REPORT_SCHEMA: &str = "waypoint.run_report.v1";

/// Error building or hashing a report.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ReportError {
    #[error("canonical JSON failed: {0}")]
    Canon(#[from] CanonError),
}

/// Canonical run report.
#[derive(Debug, Clone, PartialEq)]
pub struct RunReportV1 {
    pub world_id: String,
    pub policy: Value,
    pub iterations: Vec<Value>,
    pub stop_reason: String,
    pub best_cost: Option<String>,
    /// Number of transitions on the best path.
    pub best_steps: Option<usize>,
    /// Digest of the best path's states (their `Debug` renderings).
    pub best_path_digest: Option<ContentHash>,
}

impl RunReportV1 {
    /// Summarize an anytime run.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::Canon`] if the path digest cannot be computed.
    pub fn from_result<S: Debug>(
        world_id: &str,
        policy: &SearchPolicy,
        result: &AnytimeResult<S>,
    ) -> Result<Self, ReportError> {
        let best_path_digest = match &result.best {
            Some(solution) => Some(path_digest(&solution.path)?),
            None => None,
        };
        Ok(Self {
            world_id: world_id.to_string(),
            policy: policy_json(policy),
            iterations: result.iterations.iter().map(iteration_json).collect(),
            stop_reason: result.stop_reason.as_str().to_string(),
            best_cost: result.best_cost().map(float_string),
            best_steps: result.best.as_ref().map(waypoint_search::Solution::steps),
            best_path_digest,
        })
    }

    #[must_use]
    pub fn to_json(&self) -> Value {
        json!({
            "schema": REPORT_SCHEMA,
            "world_id": self.world_id,
            "policy": self.policy,
            "iterations": self.iterations,
            "stop_reason": self.stop_reason,
            "best": {
                "cost": self.best_cost,
                "steps": self.best_steps,
                "path_digest": self.best_path_digest.as_ref().map(ContentHash::as_str),
            },
        })
    }

    /// Canonical JSON bytes of the report.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::Canon`] if a float slipped into the document.
    pub fn canonical_bytes(&self) -> Result<Vec<u8>, ReportError> {
        Ok(canonical_json_bytes(&self.to_json())?)
    }

    /// `sha256` digest of the canonical bytes under the run-report domain.
    ///
    /// # Errors
    ///
    /// See [`RunReportV1::canonical_bytes`].
    pub fn digest(&self) -> Result<ContentHash, ReportError> {
        Ok(canonical_hash(DOMAIN_RUN_REPORT, &self.canonical_bytes()?))
    }
}

/// Digest of a state path.
///
/// # Errors
///
/// Returns [`ReportError::Canon`] if canonicalization fails.
pub fn path_digest<S: Debug>(path: &[S]) -> Result<ContentHash, ReportError> {
    let states: Vec<Value> = path.iter().map(|s| Value::String(format!("{s:?}"))).collect();
    let bytes = canonical_json_bytes(&Value::Array(states))?;
    Ok(canonical_hash(DOMAIN_SOLUTION_PATH, &bytes))
}

fn policy_json(policy: &SearchPolicy) -> Value {
    json!({
        "strategy": policy.strategy.as_str(),
        "checking": policy.checking.as_str(),
        "bound_policy": policy.bound_policy.as_str(),
        "weight": float_string(policy.weight),
        "weight_decay": policy.weight_decay.map(float_string),
        "max_iterations": policy.max_iterations,
        "timebound_ms": u64::try_from(policy.timebound.as_millis()).unwrap_or(u64::MAX),
    })
}

fn bound_json(bound: &CostBound) -> Value {
    json!({
        "g": float_string(bound.g_bound),
        "h": float_string(bound.h_bound),
        "f": float_string(bound.f_bound),
    })
}

fn iteration_json(record: &IterationRecord) -> Value {
    let stats = &record.stats;
    json!({
        "iteration": record.iteration,
        "weight": float_string(record.weight),
        "bound": bound_json(&record.bound),
        "outcome": record.outcome.as_str(),
        "cost": record.cost.map(float_string),
        "metric": record.metric.map(float_string),
        "path_len": record.path_len,
        "improved": record.improved,
        "stats": {
            "expansions": stats.expansions,
            "generated": stats.generated,
            "pruned_by_bound": stats.pruned_by_bound,
            "pruned_unreachable": stats.pruned_unreachable,
            "pruned_by_cycle_check": stats.pruned_by_cycle_check,
            "dominated_skips": stats.dominated_skips,
            "frontier_high_water": stats.frontier_high_water,
            "nodes_allocated": stats.nodes_allocated,
        },
    })
}
