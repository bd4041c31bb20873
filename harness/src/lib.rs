//! Wayfinder Harness: worlds, run configuration and the runner.
//!
//! The harness runs a world through the search engine as described by a
//! [`config::RunConfig`] and packages the outcome as a digested report.
//!
//! The harness does NOT implement search logic; it delegates to
//! `wayfinder_search`. Worlds provide domain data only; the harness owns
//! orchestration.

#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]

pub mod config;
pub mod runner;
pub mod worlds;
