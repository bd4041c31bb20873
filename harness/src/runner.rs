//! Harness runner: drives the engine from a [`RunConfig`] and packages the
//! outcome as a digested report.
//!
//! The runner implements no search logic itself. It resolves the configured
//! strategy name, calls [`wayfinder_search::search`] or
//! [`wayfinder_search::LocalSearch`], renders the solution, and hashes the
//! report so two runs can be compared by digest alone.
//!
//! # Pipeline
//!
//! ```text
//! RunConfig::validate() → resolve strategy (family check)
//!   → search / LocalSearch::run (seeded ChaCha8)
//!   → SearchReport + rendered actions → canonical_hash(DOMAIN_*_REPORT)
//! ```

use std::fmt::Display;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::Serialize;
use thiserror::Error;
use tracing::info;
use wayfinder_kernel::hash::{canonical_hash, ContentHash, DOMAIN_LOCAL_REPORT, DOMAIN_RUN_REPORT};
use wayfinder_kernel::{LocalProblem, Problem};
use wayfinder_search::{
    search, LocalSearch, LocalTermination, SearchError, SearchReport, UsedConfigurations,
};

use crate::config::{ConfigError, RunConfig, StrategyName};

/// Error during a harness run.
#[derive(Debug, Error)]
pub enum RunError {
    #[error("invalid run configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("search failed: {0}")]
    Search(#[from] SearchError),

    #[error("strategy {strategy} is not a {expected} strategy")]
    StrategyMismatch {
        strategy: StrategyName,
        expected: &'static str,
    },

    #[error("report serialization failed: {0}")]
    Report(#[from] serde_json::Error),
}

/// Outcome of a systematic run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunReport {
    pub strategy: StrategyName,
    pub search: SearchReport,
    /// Rendered actions from the root to the goal; `None` without a goal.
    pub actions: Option<Vec<String>>,
    /// `canonical_hash(DOMAIN_RUN_REPORT, <the fields above as JSON>)`.
    #[serde(skip)]
    pub digest: ContentHash,
}

/// Outcome of a local run (the winning run when restarting).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LocalRunReport {
    pub strategy: StrategyName,
    pub seed: u64,
    pub best_value: i64,
    pub best_step: u64,
    pub last_value: i64,
    pub steps_taken: u64,
    pub total_steps: u64,
    pub runs: u32,
    pub termination: LocalTermination,
    /// `canonical_hash(DOMAIN_LOCAL_REPORT, <the fields above as JSON>)`.
    #[serde(skip)]
    pub digest: ContentHash,
}

/// Sorted-key JSON digest of a report body.
fn digest_of<T: Serialize>(domain: &[u8], body: &T) -> Result<ContentHash, serde_json::Error> {
    let value = serde_json::to_value(body)?;
    Ok(canonical_hash(domain, &serde_json::to_vec(&value)?))
}

/// Run a systematic search as configured.
///
/// # Errors
///
/// - [`RunError::Config`] if the config fails validation.
/// - [`RunError::StrategyMismatch`] if the strategy is a local one.
/// - [`RunError::Search`] if the engine rejects the policy or the domain
///   fails mid-run.
/// - [`RunError::Report`] if the report cannot be serialized.
pub fn run_search<P>(problem: &P, config: &RunConfig) -> Result<RunReport, RunError>
where
    P: Problem,
    P::Action: Display,
{
    config.validate()?;
    let strategy = config
        .systematic_strategy()
        .ok_or(RunError::StrategyMismatch {
            strategy: config.strategy,
            expected: "systematic",
        })?;

    info!(event = "run_start", strategy = %config.strategy);
    let result = search(problem, strategy, &config.policy)?;

    let actions = result
        .solution()
        .map(|s| s.actions.iter().map(ToString::to_string).collect());
    let mut report = RunReport {
        strategy: config.strategy,
        search: SearchReport::from_result(&result),
        actions,
        digest: canonical_hash(DOMAIN_RUN_REPORT, b""),
    };
    report.digest = digest_of(DOMAIN_RUN_REPORT, &report)?;

    info!(
        event = "run_end",
        strategy = %config.strategy,
        termination = ?report.search.termination,
        nodes_expanded = report.search.stats.nodes_expanded,
        digest = %report.digest,
    );
    Ok(report)
}

/// Run a local search as configured, seeding `ChaCha8Rng` from `local.seed`.
///
/// # Errors
///
/// - [`RunError::Config`] if the config fails validation.
/// - [`RunError::StrategyMismatch`] if the strategy is a systematic one.
/// - [`RunError::Search`] if the engine rejects the local parameters.
/// - [`RunError::Report`] if the report cannot be serialized.
pub fn run_local<P: LocalProblem>(
    problem: &P,
    config: &RunConfig,
) -> Result<LocalRunReport, RunError> {
    config.validate()?;
    let strategy = config.local_strategy().ok_or(RunError::StrategyMismatch {
        strategy: config.strategy,
        expected: "local",
    })?;
    let local = config.local;

    info!(
        event = "run_start",
        strategy = %config.strategy,
        seed = local.seed,
        restarts = local.restarts,
    );
    let mut rng = ChaCha8Rng::seed_from_u64(local.seed);
    let mut used = UsedConfigurations::new();
    let mut driver = LocalSearch::new(problem, strategy, local.step_limit).restarts(local.restarts);
    if local.avoid_repeats {
        driver = driver.used_configurations(&mut used);
    }
    let result = driver.run(&mut rng)?;

    let mut report = LocalRunReport {
        strategy: config.strategy,
        seed: local.seed,
        best_value: result.best.value,
        best_step: result.best.step,
        last_value: result.last.value,
        steps_taken: result.steps_taken,
        total_steps: result.total_steps,
        runs: result.runs,
        termination: result.termination,
        digest: canonical_hash(DOMAIN_LOCAL_REPORT, b""),
    };
    report.digest = digest_of(DOMAIN_LOCAL_REPORT, &report)?;

    info!(
        event = "run_end",
        strategy = %config.strategy,
        best_value = report.best_value,
        total_steps = report.total_steps,
        digest = %report.digest,
    );
    Ok(report)
}
