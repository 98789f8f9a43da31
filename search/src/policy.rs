//! Search policy types.

use std::time::Duration;

use serde::Deserialize;

use crate::bound::BoundPolicy;
use crate::error::SearchError;
use crate::priority::StrategyKind;

/// Strategy, duplicate checking, and budget configuration for a search.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchPolicy {
    /// Priority function used to order the frontier.
    pub strategy: StrategyKind,
    /// Duplicate-detection level.
    pub checking: CheckingLevel,
    /// Wall-clock budget for the whole anytime search.
    pub timebound: Duration,
    /// Heuristic weight (>= 1) passed to the priority function.
    pub weight: f64,
    /// Dimension tightened after each solution.
    pub bound_policy: BoundPolicy,
    /// Optional factor in `(0, 1]` applied to the weight after each
    /// improvement, floored at 1.
    pub weight_decay: Option<f64>,
    /// Optional cap on the number of inner search runs.
    pub max_iterations: Option<u32>,
}

impl SearchPolicy {
    /// Uniform-cost search (`f = g`), bounded on path cost.
    #[must_use]
    pub fn uniform_cost() -> Self {
        Self {
            strategy: StrategyKind::UniformCost,
            bound_policy: BoundPolicy::Cost,
            ..Self::default()
        }
    }

    /// Anytime greedy best-first search (`f = h`), bounded on path cost.
    #[must_use]
    pub fn greedy() -> Self {
        Self {
            strategy: StrategyKind::Greedy,
            bound_policy: BoundPolicy::Cost,
            ..Self::default()
        }
    }

    /// Anytime weighted A* (`f = g + w * h`), bounded on `g + h`.
    #[must_use]
    pub fn weighted_astar(weight: f64) -> Self {
        Self {
            strategy: StrategyKind::WeightedAstar,
            weight,
            bound_policy: BoundPolicy::Estimate,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_strategy(mut self, strategy: StrategyKind) -> Self {
        self.strategy = strategy;
        self
    }

    #[must_use]
    pub fn with_checking(mut self, checking: CheckingLevel) -> Self {
        self.checking = checking;
        self
    }

    #[must_use]
    pub fn with_timebound(mut self, timebound: Duration) -> Self {
        self.timebound = timebound;
        self
    }

    #[must_use]
    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = weight;
        self
    }

    #[must_use]
    pub fn with_bound_policy(mut self, bound_policy: BoundPolicy) -> Self {
        self.bound_policy = bound_policy;
        self
    }

    #[must_use]
    pub fn with_weight_decay(mut self, decay: f64) -> Self {
        self.weight_decay = Some(decay);
        self
    }

    #[must_use]
    pub fn with_max_iterations(mut self, max_iterations: u32) -> Self {
        self.max_iterations = Some(max_iterations);
        self
    }

    /// Validate numeric parameters.
    ///
    /// A zero `timebound` is valid: the search times out before expanding
    /// anything.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::InvalidWeight`] for a weight below 1 or not
    /// finite, [`SearchError::InvalidWeightDecay`] for a decay outside
    /// `(0, 1]`, and [`SearchError::ZeroIterationCap`] for `max_iterations == 0`.
    pub fn validate(&self) -> Result<(), SearchError> {
        if !self.weight.is_finite() || self.weight < 1.0 {
            return Err(SearchError::InvalidWeight {
                weight: self.weight,
            });
        }
        if let Some(decay) = self.weight_decay {
            if !(decay > 0.0 && decay <= 1.0) {
                return Err(SearchError::InvalidWeightDecay { decay });
            }
        }
        if self.max_iterations == Some(0) {
            return Err(SearchError::ZeroIterationCap);
        }
        Ok(())
    }

    /// Weight for the run following an improvement.
    #[must_use]
    pub fn next_weight(&self, weight: f64) -> f64 {
        match self.weight_decay {
            Some(decay) => (weight * decay).max(1.0),
            None => weight,
        }
    }
}

impl Default for SearchPolicy {
    fn default() -> Self {
        Self {
            strategy: StrategyKind::WeightedAstar,
            checking: CheckingLevel::Full,
            timebound: Duration::from_secs(1),
            weight: 1.0,
            bound_policy: BoundPolicy::Estimate,
            weight_decay: None,
            max_iterations: None,
        }
    }
}

/// Convert a budget in seconds into a [`Duration`].
///
/// # Errors
///
/// Returns [`SearchError::InvalidTimebound`] for negative, NaN, or infinite
/// values.
pub fn timebound_from_secs(seconds: f64) -> Result<Duration, SearchError> {
    Duration::try_from_secs_f64(seconds).map_err(|_| SearchError::InvalidTimebound { seconds })
}

/// Duplicate-detection level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CheckingLevel {
    /// Path checking only: a successor is dropped if its state already lies on
    /// its own path to the root. States reached by different paths may be
    /// expanded repeatedly.
    Default,
    /// Full dominance pruning: a closed set maps each state to its best known
    /// `g`; dominated paths are neither queued nor expanded.
    #[default]
    Full,
}

impl CheckingLevel {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Full => "full",
        }
    }
}
