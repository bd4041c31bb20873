//! Run configuration loaded from TOML.
//!
//! ```toml
//! strategy = "a_star"
//!
//! [policy]
//! max_expansions = 10000
//! max_depth = 20
//!
//! [local]
//! step_limit = 100
//! top_k = 5
//! restarts = 10
//! seed = 42
//! avoid_repeats = true
//! ```
//!
//! `depth_limited` and `iterative_deepening` take their limit from
//! `policy.max_depth`, which is then required.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use wayfinder_search::{LocalStrategy, SearchPolicy, Strategy};

/// Configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Flat strategy names accepted in config files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StrategyName {
    BreadthFirstTree,
    BreadthFirstGraph,
    DepthFirstTree,
    DepthFirstGraph,
    DepthLimited,
    IterativeDeepening,
    UniformCost,
    GreedyBestFirst,
    AStar,
    LocalMaximize,
    LocalRandomizedMaximize,
    LocalRandomWalk,
}

impl StrategyName {
    pub const ALL: [StrategyName; 12] = [
        Self::BreadthFirstTree,
        Self::BreadthFirstGraph,
        Self::DepthFirstTree,
        Self::DepthFirstGraph,
        Self::DepthLimited,
        Self::IterativeDeepening,
        Self::UniformCost,
        Self::GreedyBestFirst,
        Self::AStar,
        Self::LocalMaximize,
        Self::LocalRandomizedMaximize,
        Self::LocalRandomWalk,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::BreadthFirstTree => "breadth_first_tree",
            Self::BreadthFirstGraph => "breadth_first_graph",
            Self::DepthFirstTree => "depth_first_tree",
            Self::DepthFirstGraph => "depth_first_graph",
            Self::DepthLimited => "depth_limited",
            Self::IterativeDeepening => "iterative_deepening",
            Self::UniformCost => "uniform_cost",
            Self::GreedyBestFirst => "greedy_best_first",
            Self::AStar => "a_star",
            Self::LocalMaximize => "local_maximize",
            Self::LocalRandomizedMaximize => "local_randomized_maximize",
            Self::LocalRandomWalk => "local_random_walk",
        }
    }

    #[must_use]
    pub fn is_local(self) -> bool {
        matches!(
            self,
            Self::LocalMaximize | Self::LocalRandomizedMaximize | Self::LocalRandomWalk
        )
    }
}

impl std::fmt::Display for StrategyName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Local search parameters (`[local]` table).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct LocalConfig {
    /// Successor-generation rounds per run.
    pub step_limit: u64,
    /// Candidate pool for `local_randomized_maximize`.
    pub top_k: usize,
    /// Total runs (1 = no restarts).
    pub restarts: u32,
    /// Seed for the run's `ChaCha8Rng`.
    pub seed: u64,
    /// Track generated configurations and steer away from them.
    pub avoid_repeats: bool,
}

impl Default for LocalConfig {
    fn default() -> Self {
        Self {
            step_limit: 100,
            top_k: LocalStrategy::DEFAULT_TOP_K,
            restarts: 1,
            seed: 0,
            avoid_repeats: false,
        }
    }
}

/// A complete run description.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct RunConfig {
    pub strategy: StrategyName,
    #[serde(default)]
    pub policy: SearchPolicy,
    #[serde(default)]
    pub local: LocalConfig,
}

impl RunConfig {
    /// A config with default policy and local parameters.
    #[must_use]
    pub fn new(strategy: StrategyName) -> Self {
        Self {
            strategy,
            policy: SearchPolicy::default(),
            local: LocalConfig::default(),
        }
    }

    #[must_use]
    pub fn with_policy(mut self, policy: SearchPolicy) -> Self {
        self.policy = policy;
        self
    }

    #[must_use]
    pub fn with_local(mut self, local: LocalConfig) -> Self {
        self.local = local;
        self
    }

    /// Loads and validates configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns error if the file can't be read, isn't valid TOML, or fails
    /// [`RunConfig::validate`].
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parses and validates configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns error for invalid TOML or an invalid combination of values.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// # Errors
    ///
    /// Returns the `toml` serializer error if a value cannot be represented.
    pub fn to_toml_string(&self) -> Result<String, toml::ser::Error> {
        toml::to_string(self)
    }

    /// Check cross-field constraints.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] describing the first violation.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.policy
            .validate()
            .map_err(|e| ConfigError::Invalid(e.to_string()))?;
        let needs_depth = matches!(
            self.strategy,
            StrategyName::DepthLimited | StrategyName::IterativeDeepening
        );
        if needs_depth && self.policy.max_depth.is_none() {
            return Err(ConfigError::Invalid(format!(
                "{} requires policy.max_depth",
                self.strategy
            )));
        }
        if self.strategy.is_local() {
            if self.local.restarts == 0 {
                return Err(ConfigError::Invalid(
                    "local.restarts must be at least 1".into(),
                ));
            }
            if self.strategy == StrategyName::LocalRandomizedMaximize && self.local.top_k == 0 {
                return Err(ConfigError::Invalid("local.top_k must be at least 1".into()));
            }
        }
        Ok(())
    }

    /// The engine strategy for systematic names, `None` for local ones.
    #[must_use]
    pub fn systematic_strategy(&self) -> Option<Strategy> {
        let depth = self.policy.max_depth.unwrap_or(0);
        Some(match self.strategy {
            StrategyName::BreadthFirstTree => Strategy::BreadthFirstTree,
            StrategyName::BreadthFirstGraph => Strategy::BreadthFirstGraph,
            StrategyName::DepthFirstTree => Strategy::DepthFirstTree,
            StrategyName::DepthFirstGraph => Strategy::DepthFirstGraph,
            StrategyName::DepthLimited => Strategy::DepthLimited { limit: depth },
            StrategyName::IterativeDeepening => Strategy::IterativeDeepening { max_depth: depth },
            StrategyName::UniformCost => Strategy::UniformCost,
            StrategyName::GreedyBestFirst => Strategy::GreedyBestFirst,
            StrategyName::AStar => Strategy::AStar,
            StrategyName::LocalMaximize
            | StrategyName::LocalRandomizedMaximize
            | StrategyName::LocalRandomWalk => return None,
        })
    }

    /// The local strategy for local names, `None` for systematic ones.
    #[must_use]
    pub fn local_strategy(&self) -> Option<LocalStrategy> {
        match self.strategy {
            StrategyName::LocalMaximize => Some(LocalStrategy::Maximize),
            StrategyName::LocalRandomizedMaximize => Some(LocalStrategy::RandomizedMaximize {
                top_k: self.local.top_k,
            }),
            StrategyName::LocalRandomWalk => Some(LocalStrategy::RandomWalk),
            _ => None,
        }
    }
}
