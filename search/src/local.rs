//! Local search: hill climbing over a domain neighbourhood.
//!
//! The driver keeps a single current node and the best node seen so far.
//! There is no frontier; each step generates the successors of the current
//! state and moves to one of them. Randomness comes from a caller-owned
//! [`rand::Rng`], so a seeded generator reproduces a run exactly.

use std::collections::BTreeSet;

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};
use wayfinder_kernel::{Fingerprint, LocalProblem};

use crate::error::SearchError;

/// Successor-selection rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LocalStrategy {
    /// Always move to the best-valued successor (first wins on ties).
    Maximize,
    /// Move to a uniformly chosen successor among the `top_k` best.
    RandomizedMaximize { top_k: usize },
    /// Move to a uniformly chosen successor.
    RandomWalk,
}

impl LocalStrategy {
    pub const DEFAULT_TOP_K: usize = 5;

    /// `RandomizedMaximize` with the default `top_k` of 5.
    #[must_use]
    pub fn randomized() -> Self {
        Self::RandomizedMaximize {
            top_k: Self::DEFAULT_TOP_K,
        }
    }

    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Maximize => "maximize",
            Self::RandomizedMaximize { .. } => "randomized_maximize",
            Self::RandomWalk => "random_walk",
        }
    }

    fn validate(self) -> Result<(), SearchError> {
        if let Self::RandomizedMaximize { top_k: 0 } = self {
            return Err(SearchError::InvalidPolicy {
                detail: "randomized_maximize top_k must be at least 1".into(),
            });
        }
        Ok(())
    }
}

/// A point visited by local search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalNode<S> {
    pub state: S,
    pub value: i64,
    /// Number of moves from the start of its run.
    pub step: u64,
}

/// Why a local search run stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LocalTermination {
    /// `step_limit` rounds were performed.
    BudgetExceeded,
    /// The current state had no successors.
    NoSuccessors,
}

/// Fingerprints of configurations already generated (and of each run's
/// start state).
///
/// Owned by the caller and passed to [`LocalSearch::used_configurations`];
/// it outlives a single run if the caller wants it to. Restarts within one
/// [`LocalSearch::run`] clear it between runs.
#[derive(Debug, Clone, Default)]
pub struct UsedConfigurations {
    seen: BTreeSet<Fingerprint>,
}

impl UsedConfigurations {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn contains<S: std::hash::Hash>(&self, state: &S) -> bool {
        self.seen.contains(&Fingerprint::of(state))
    }

    /// Returns `true` if the state was not recorded before.
    pub fn record<S: std::hash::Hash>(&mut self, state: &S) -> bool {
        self.seen.insert(Fingerprint::of(state))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.seen.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }

    pub fn clear(&mut self) {
        self.seen.clear();
    }
}

/// Outcome of a local search (the winning run when restarting).
#[derive(Debug, Clone)]
pub struct LocalSearchResult<S> {
    /// Best node of the winning run. Never worse than that run's start.
    pub best: LocalNode<S>,
    /// Node the winning run ended on.
    pub last: LocalNode<S>,
    /// Rounds performed by the winning run.
    pub steps_taken: u64,
    pub termination: LocalTermination,
    /// Number of runs performed (1 without restarts).
    pub runs: u32,
    /// Rounds performed across all runs.
    pub total_steps: u64,
}

type Observer<'a, S> = Box<dyn FnMut(&LocalNode<S>) + 'a>;

/// Builder for a local search run.
///
/// ```ignore
/// let mut used = UsedConfigurations::new();
/// let result = LocalSearch::new(&problem, LocalStrategy::randomized(), 100)
///     .used_configurations(&mut used)
///     .restarts(10)
///     .run(&mut rng)?;
/// ```
pub struct LocalSearch<'a, P: LocalProblem> {
    problem: &'a P,
    strategy: LocalStrategy,
    step_limit: u64,
    restarts: u32,
    used: Option<&'a mut UsedConfigurations>,
    observer: Option<Observer<'a, P::State>>,
}

impl<'a, P: LocalProblem> LocalSearch<'a, P> {
    #[must_use]
    pub fn new(problem: &'a P, strategy: LocalStrategy, step_limit: u64) -> Self {
        Self {
            problem,
            strategy,
            step_limit,
            restarts: 1,
            used: None,
            observer: None,
        }
    }

    /// Filter out successors already generated, and record new ones.
    #[must_use]
    pub fn used_configurations(mut self, used: &'a mut UsedConfigurations) -> Self {
        self.used = Some(used);
        self
    }

    /// Called with the current node at the start of every step.
    #[must_use]
    pub fn observer(mut self, observer: impl FnMut(&LocalNode<P::State>) + 'a) -> Self {
        self.observer = Some(Box::new(observer));
        self
    }

    /// Total number of runs. The first starts from `initial_state`, later
    /// ones from `restart_state`.
    #[must_use]
    pub fn restarts(mut self, runs: u32) -> Self {
        self.restarts = runs;
        self
    }

    /// Execute the search.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::InvalidPolicy`] if `top_k` is zero or fewer
    /// than one run is requested.
    pub fn run<R: Rng + ?Sized>(
        mut self,
        rng: &mut R,
    ) -> Result<LocalSearchResult<P::State>, SearchError> {
        self.strategy.validate()?;
        if self.restarts == 0 {
            return Err(SearchError::InvalidPolicy {
                detail: "local search needs at least one run".into(),
            });
        }
        debug!(
            event = "local_search_start",
            strategy = self.strategy.name(),
            step_limit = self.step_limit,
            runs = self.restarts,
        );

        let mut winner: Option<LocalSearchResult<P::State>> = None;
        let mut total_steps = 0;
        for run in 0..self.restarts {
            if run > 0 {
                if let Some(used) = self.used.as_deref_mut() {
                    used.clear();
                }
            }
            let start = if run == 0 {
                self.problem.initial_state()
            } else {
                self.problem.restart_state(rng)
            };
            let outcome = self.single_run(start, rng);
            total_steps += outcome.steps_taken;
            debug!(
                event = "local_run_end",
                run,
                best = outcome.best.value,
                steps = outcome.steps_taken,
                termination = ?outcome.termination,
            );
            if winner
                .as_ref()
                .is_none_or(|w| outcome.best.value > w.best.value)
            {
                winner = Some(outcome);
            }
        }

        let mut result = winner.ok_or_else(|| SearchError::InvalidPolicy {
            detail: "local search needs at least one run".into(),
        })?;
        result.runs = self.restarts;
        result.total_steps = total_steps;
        debug!(
            event = "local_search_end",
            best = result.best.value,
            total_steps,
        );
        Ok(result)
    }

    fn single_run<R: Rng + ?Sized>(
        &mut self,
        start: P::State,
        rng: &mut R,
    ) -> LocalSearchResult<P::State> {
        let value = self.problem.value(&start);
        let mut current = LocalNode {
            state: start,
            value,
            step: 0,
        };
        if let Some(used) = self.used.as_deref_mut() {
            used.record(&current.state);
        }
        let mut best = current.clone();
        let mut steps = 0;

        let termination = loop {
            if steps >= self.step_limit {
                break LocalTermination::BudgetExceeded;
            }
            if let Some(observer) = self.observer.as_mut() {
                observer(&current);
            }
            let successors = self.problem.successors(&current.state);
            steps += 1;
            if successors.is_empty() {
                break LocalTermination::NoSuccessors;
            }

            let candidates = self.filter_used(successors);
            let mut scored: Vec<(P::State, i64)> = candidates
                .into_iter()
                .map(|s| {
                    let v = self.problem.value(&s);
                    (s, v)
                })
                .collect();
            let pick = select(self.strategy, &mut scored, rng);
            let (state, value) = scored.swap_remove(pick);
            trace!(step = steps, value, candidates = scored.len() + 1, "move");

            current = LocalNode {
                state,
                value,
                step: current.step + 1,
            };
            if current.value > best.value {
                best = current.clone();
            }
        };

        LocalSearchResult {
            best,
            last: current,
            steps_taken: steps,
            termination,
            runs: 1,
            total_steps: steps,
        }
    }

    /// Drop successors already generated, unless that would drop them all.
    fn filter_used(&mut self, successors: Vec<P::State>) -> Vec<P::State> {
        let Some(used) = self.used.as_deref_mut() else {
            return successors;
        };
        let fresh: Vec<bool> = successors.iter().map(|s| !used.contains(s)).collect();
        for s in &successors {
            used.record(s);
        }
        if fresh.iter().any(|&f| f) {
            successors
                .into_iter()
                .zip(fresh)
                .filter_map(|(s, f)| f.then_some(s))
                .collect()
        } else {
            successors
        }
    }
}

/// Index of the chosen candidate. `scored` is non-empty and may be reordered.
fn select<S, R: Rng + ?Sized>(
    strategy: LocalStrategy,
    scored: &mut [(S, i64)],
    rng: &mut R,
) -> usize {
    match strategy {
        LocalStrategy::Maximize => {
            let mut best = 0;
            for (i, (_, v)) in scored.iter().enumerate() {
                if *v > scored[best].1 {
                    best = i;
                }
            }
            best
        }
        LocalStrategy::RandomizedMaximize { top_k } => {
            // Stable: equal values keep successor order.
            scored.sort_by_key(|(_, v)| std::cmp::Reverse(*v));
            let k = top_k.min(scored.len());
            rng.random_range(0..k)
        }
        LocalStrategy::RandomWalk => rng.random_range(0..scored.len()),
    }
}
