//! Harness configuration: a TOML `[search]` table plus environment overrides.
//!
//! ```toml
//! [search]
//! strategy = "weighted-astar"   # uniform-cost | greedy | weighted-astar | xup | xdp
//! checking = "full"             # default | full
//! timebound_secs = 1.0
//! weight = 2.5
//! bound_policy = "estimate"     # cost | estimate
//! weight_decay = 0.8
//! max_iterations = 10
//! ```
//!
//! Every key is optional. After the file is read, `WAYPOINT_SEARCH_<KEY>`
//! environment variables (e.g. `WAYPOINT_SEARCH_WEIGHT=3`) override single
//! fields.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::{debug, info, warn};

use waypoint_search::{
    timebound_from_secs, BoundPolicy, CheckingLevel, SearchError, SearchPolicy, StrategyKind,
};

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV: &str = "WAYPOINT_CONFIG";

/// Prefix of per-field override variables.
pub const ENV_PREFIX: &str = "WAYPOINT_SEARCH_";

/// Error while loading or converting a configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config {origin}: {detail}")]
    Parse { origin: String, detail: String },
    #[error("invalid override {key}={value}: {detail}")]
    InvalidOverride {
        key: String,
        value: String,
        detail: String,
    },
    #[error("invalid search policy: {0}")]
    Policy(#[from] SearchError),
}

/// Top-level configuration document.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HarnessConfig {
    pub search: SearchSection,
}

/// The `[search]` table.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SearchSection {
    pub strategy: StrategyKind,
    pub checking: CheckingLevel,
    pub timebound_secs: f64,
    pub weight: f64,
    pub bound_policy: BoundPolicy,
    pub weight_decay: Option<f64>,
    pub max_iterations: Option<u32>,
}

impl Default for SearchSection {
    fn default() -> Self {
        let policy = SearchPolicy::default();
        Self {
            strategy: policy.strategy,
            checking: policy.checking,
            timebound_secs: policy.timebound.as_secs_f64(),
            weight: policy.weight,
            bound_policy: policy.bound_policy,
            weight_decay: policy.weight_decay,
            max_iterations: policy.max_iterations,
        }
    }
}

impl HarnessConfig {
    /// Parse a TOML document. `origin` names the source in error messages.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed TOML, unknown keys, or
    /// unknown enum values.
    pub fn from_toml_str(text: &str, origin: &str) -> Result<Self, ConfigError> {
        toml::from_str(text).map_err(|e| ConfigError::Parse {
            origin: origin.to_string(),
            detail: e.to_string(),
        })
    }

    /// Convert into a validated [`SearchPolicy`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Policy`] if the timebound, weight, decay or
    /// iteration cap is out of range.
    pub fn to_policy(&self) -> Result<SearchPolicy, ConfigError> {
        let s = &self.search;
        let policy = SearchPolicy {
            strategy: s.strategy,
            checking: s.checking,
            timebound: timebound_from_secs(s.timebound_secs)?,
            weight: s.weight,
            bound_policy: s.bound_policy,
            weight_decay: s.weight_decay,
            max_iterations: s.max_iterations,
        };
        policy.validate()?;
        Ok(policy)
    }
}

/// Load configuration.
///
/// Uses the file named by `WAYPOINT_CONFIG` when set and present, otherwise
/// built-in defaults; environment overrides are applied either way.
///
/// # Errors
///
/// Returns a [`ConfigError`] if the named file cannot be read or parsed, or
/// an override does not parse.
pub fn load_config() -> Result<HarnessConfig, ConfigError> {
    if let Ok(path) = std::env::var(CONFIG_ENV) {
        let path = PathBuf::from(path);
        if path.exists() {
            info!(path = %path.display(), "loading config from {CONFIG_ENV}");
            return load_from_path(&path);
        }
        warn!(path = %path.display(), "{CONFIG_ENV} not found, using defaults");
    } else {
        debug!("no config file given, using defaults");
    }
    apply_env_overrides(HarnessConfig::default())
}

/// Load configuration from `path`, then apply environment overrides.
///
/// # Errors
///
/// See [`load_config`].
pub fn load_from_path(path: &Path) -> Result<HarnessConfig, ConfigError> {
    apply_env_overrides(read_config_file(path)?)
}

/// Read and parse the TOML file at `path`. No overrides are applied.
///
/// # Errors
///
/// Returns [`ConfigError::Read`] or [`ConfigError::Parse`].
pub fn read_config_file(path: &Path) -> Result<HarnessConfig, ConfigError> {
    let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    HarnessConfig::from_toml_str(&text, &path.display().to_string())
}

/// Apply `WAYPOINT_SEARCH_<KEY>` overrides from the process environment.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidOverride`] for a value that does not parse.
pub fn apply_env_overrides(config: HarnessConfig) -> Result<HarnessConfig, ConfigError> {
    apply_overrides(config, |key| std::env::var(key).ok())
}

/// Parse a scalar override with [`std::str::FromStr`].
fn parse_scalar<T>(key: &str, raw: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    raw.trim().parse().map_err(|e: T::Err| ConfigError::InvalidOverride {
        key: key.to_string(),
        value: raw.to_string(),
        detail: e.to_string(),
    })
}

/// Parse an enum override using its serde name (e.g. `weighted-astar`).
fn parse_named<T>(key: &str, raw: &str) -> Result<T, ConfigError>
where
    T: for<'de> Deserialize<'de>,
{
    toml::Value::String(raw.trim().to_string())
        .try_into()
        .map_err(|e: toml::de::Error| ConfigError::InvalidOverride {
            key: key.to_string(),
            value: raw.to_string(),
            detail: e.to_string(),
        })
}

macro_rules! override_field {
    ($lookup:expr, $config:expr, $field:ident, $key:expr, $parse:ident) => {
        let key = format!("{ENV_PREFIX}{}", $key);
        if let Some(raw) = $lookup(key.as_str()) {
            debug!(key = %key, value = %raw, "applying config override");
            $config.search.$field = $parse(&key, &raw)?;
        }
    };
    ($lookup:expr, $config:expr, $field:ident, $key:expr, $parse:ident, optional) => {
        let key = format!("{ENV_PREFIX}{}", $key);
        if let Some(raw) = $lookup(key.as_str()) {
            debug!(key = %key, value = %raw, "applying config override");
            $config.search.$field = Some($parse(&key, &raw)?);
        }
    };
}

/// Apply overrides read through `lookup` (the environment, or a map in
/// tests).
///
/// # Errors
///
/// Returns [`ConfigError::InvalidOverride`] for a value that does not parse.
pub fn apply_overrides(
    mut config: HarnessConfig,
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<HarnessConfig, ConfigError> {
    override_field!(lookup, config, strategy, "STRATEGY", parse_named);
    override_field!(lookup, config, checking, "CHECKING", parse_named);
    override_field!(lookup, config, bound_policy, "BOUND_POLICY", parse_named);
    override_field!(lookup, config, timebound_secs, "TIMEBOUND_SECS", parse_scalar);
    override_field!(lookup, config, weight, "WEIGHT", parse_scalar);
    override_field!(lookup, config, weight_decay, "WEIGHT_DECAY", parse_scalar, optional);
    override_field!(lookup, config, max_iterations, "MAX_ITERATIONS", parse_scalar, optional);
    Ok(config)
}
