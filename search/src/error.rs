//! Typed search errors.
//!
//! `SearchError` covers pre-flight failures and domain contract violations
//! only. Normal terminations (goal reached, frontier exhausted, budgets hit)
//! are expressed via [`crate::report::TerminationReason`] and
//! [`crate::local::LocalTermination`], never as errors.

use thiserror::Error;
use wayfinder_kernel::ProblemError;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError {
    /// The policy or strategy parameters cannot drive a search.
    #[error("invalid search policy: {detail}")]
    InvalidPolicy { detail: String },

    /// The domain's `result` rejected an action it had itself offered.
    /// The run is aborted; no partial result is returned.
    #[error("problem contract violation: {0}")]
    Problem(#[from] ProblemError),
}
