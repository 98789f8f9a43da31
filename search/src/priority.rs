//! Priority functions: how `(g, h, weight)` maps to a frontier key.
//!
//! The engine only needs a totally ordered scalar, so any pure function of
//! `(g, h, weight)` works. Closures implement [`Priority`] directly.

use serde::Deserialize;

/// Trait for frontier priority functions.
///
/// Implementations must be pure: the same `(g, h, weight)` always yields the
/// same value.
pub trait Priority {
    /// Compute the priority of a node with path cost `g` and heuristic `h`.
    fn fval(&self, g: f64, h: f64, weight: f64) -> f64;
}

impl<F> Priority for F
where
    F: Fn(f64, f64, f64) -> f64,
{
    fn fval(&self, g: f64, h: f64, weight: f64) -> f64 {
        self(g, h, weight)
    }
}

/// `f = g`.
#[derive(Debug, Clone, Copy, Default)]
pub struct UniformCost;

impl Priority for UniformCost {
    fn fval(&self, g: f64, _h: f64, _weight: f64) -> f64 {
        g
    }
}

/// `f = h`.
#[derive(Debug, Clone, Copy, Default)]
pub struct GreedyBestFirst;

impl Priority for GreedyBestFirst {
    fn fval(&self, _g: f64, h: f64, _weight: f64) -> f64 {
        h
    }
}

/// `f = g + weight * h`; `weight = 1` is plain A*.
#[derive(Debug, Clone, Copy, Default)]
pub struct WeightedAStar;

impl Priority for WeightedAStar {
    fn fval(&self, g: f64, h: f64, weight: f64) -> f64 {
        g + weight * h
    }
}

/// Parabolic priority "XUP":
/// `f = (g + h + sqrt((g + h)^2 + 4w(w - 1)h^2)) / 2w`.
///
/// Equals `g + h` at `w = 1`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Xup;

impl Priority for Xup {
    fn fval(&self, g: f64, h: f64, weight: f64) -> f64 {
        if h.is_infinite() {
            return f64::INFINITY;
        }
        let sum = g + h;
        (sum + (sum * sum + 4.0 * weight * (weight - 1.0) * h * h).sqrt()) / (2.0 * weight)
    }
}

/// Parabolic priority "XDP":
/// `f = (g + (2w - 1)h + sqrt((g - h)^2 + 4wgh)) / 2w`.
///
/// Equals `g + h` at `w = 1`. Ranks mid-path nodes above XUP for the same
/// `(g, h, w)`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Xdp;

impl Priority for Xdp {
    fn fval(&self, g: f64, h: f64, weight: f64) -> f64 {
        if h.is_infinite() {
            return f64::INFINITY;
        }
        let diff = g - h;
        (g + (2.0 * weight - 1.0) * h + (diff * diff + 4.0 * weight * g * h).sqrt())
            / (2.0 * weight)
    }
}

/// Named priority strategies selectable from configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StrategyKind {
    UniformCost,
    Greedy,
    #[default]
    WeightedAstar,
    Xup,
    Xdp,
    /// Caller supplies the priority function through
    /// [`crate::anytime::AnytimeSearch::with_priority`].
    Custom,
}

impl StrategyKind {
    /// Built-in priority function for this strategy, `None` for `Custom`.
    #[must_use]
    pub fn builtin(self) -> Option<&'static dyn Priority> {
        match self {
            Self::UniformCost => Some(&UniformCost),
            Self::Greedy => Some(&GreedyBestFirst),
            Self::WeightedAstar => Some(&WeightedAStar),
            Self::Xup => Some(&Xup),
            Self::Xdp => Some(&Xdp),
            Self::Custom => None,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::UniformCost => "uniform-cost",
            Self::Greedy => "greedy",
            Self::WeightedAstar => "weighted-astar",
            Self::Xup => "xup",
            Self::Xdp => "xdp",
            Self::Custom => "custom",
        }
    }
}
