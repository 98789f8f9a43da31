//! Typed search errors.
//!
//! `SearchError` represents pre-flight failures only. Runtime terminations
//! (goal reached, frontier exhausted, time budget spent) are expressed via
//! [`crate::search::SearchOutcome`] and [`crate::anytime::StopReason`] and are
//! never errors.

/// Typed failure for pre-flight policy validation.
///
/// These errors are returned before search execution begins. No node is
/// expanded when one of them is produced.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SearchError {
    /// Heuristic weight is below 1 or not a finite number.
    #[error("invalid weight {weight}: must be finite and >= 1")]
    InvalidWeight { weight: f64 },

    /// Weight decay factor is outside `(0, 1]`.
    #[error("invalid weight decay {decay}: must lie in (0, 1]")]
    InvalidWeightDecay { decay: f64 },

    /// Time budget given in seconds is negative or not finite.
    #[error("invalid timebound {seconds}s: must be finite and >= 0")]
    InvalidTimebound { seconds: f64 },

    /// An iteration cap of zero would never run a search.
    #[error("max_iterations must be at least 1")]
    ZeroIterationCap,

    /// The `custom` strategy was selected but no priority function was supplied.
    #[error("strategy `custom` requires a caller-supplied priority function")]
    MissingCustomPriority,
}
