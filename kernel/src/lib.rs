//! Wayfinder Kernel: the contract between puzzle domains and the search engine.
//!
//! # API Surface
//!
//! - [`problem::Problem`] -- systematic search contract (actions, result, goal test, costs)
//! - [`problem::LocalProblem`] -- value-maximizing neighbourhood contract for local search
//! - [`fingerprint::Fingerprint`] -- deterministic state digest used for deduplication
//! - [`hash::canonical_hash`] -- domain-separated content hashing for reports
//!
//! # Module Dependency Direction
//!
//! `hash` ← `fingerprint` ← `problem`
//!
//! One-way only. The kernel knows nothing about frontiers or strategies.

#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]

pub mod fingerprint;
pub mod hash;
pub mod problem;

pub use fingerprint::Fingerprint;
pub use problem::{Cost, LocalProblem, Problem, ProblemError};
