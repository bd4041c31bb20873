//! Search policy: budgets shared by every systematic strategy.

use serde::{Deserialize, Serialize};

use crate::error::SearchError;

/// Budget configuration for a systematic search run.
///
/// Both limits default to `None` (unlimited). Hitting `max_expansions` ends
/// the run with `ExpansionBudgetExceeded`; `max_depth` stops children from
/// being generated below that depth and is reported as a cutoff.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SearchPolicy {
    /// Hard cap on node expansions.
    pub max_expansions: Option<u64>,
    /// Depth cutoff: nodes at this depth are goal-tested but not expanded.
    pub max_depth: Option<u32>,
}

impl SearchPolicy {
    #[must_use]
    pub fn unlimited() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_max_expansions(mut self, max_expansions: u64) -> Self {
        self.max_expansions = Some(max_expansions);
        self
    }

    #[must_use]
    pub fn with_max_depth(mut self, max_depth: u32) -> Self {
        self.max_depth = Some(max_depth);
        self
    }

    /// Validate the policy before a run starts.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::InvalidPolicy`] if `max_expansions` is zero,
    /// which could never expand the root.
    pub fn validate(&self) -> Result<(), SearchError> {
        if self.max_expansions == Some(0) {
            return Err(SearchError::InvalidPolicy {
                detail: "max_expansions must be at least 1".into(),
            });
        }
        Ok(())
    }

    pub(crate) fn expansion_budget_reached(&self, expanded: u64) -> bool {
        self.max_expansions.is_some_and(|max| expanded >= max)
    }

    /// The tighter of the policy depth and a strategy-specific limit.
    pub(crate) fn effective_depth_limit(&self, strategy_limit: Option<u32>) -> Option<u32> {
        match (self.max_depth, strategy_limit) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }
}
