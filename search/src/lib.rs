//! Wayfinder Search: generic state-space search over a [`Problem`].
//!
//! This crate provides the search layer. It depends only on
//! `wayfinder_kernel`; it does NOT depend on `wayfinder_harness`.
//!
//! # Crate dependency graph
//!
//! ```text
//! wayfinder_kernel  ←  wayfinder_search  ←  wayfinder_harness
//! (problem contract,   (drivers, frontier,   (worlds, config,
//!  fingerprints)        explored set)         runner)
//! ```
//!
//! # Key types
//!
//! - [`Strategy`] / [`search`]: systematic search (BFS, DFS, DLS, IDS, UCS,
//!   greedy, A*), goal-tested at expansion time
//! - [`SearchResult`]: termination reason, node arena, [`SearchStats`]
//! - [`NodeArena`]: owner of every node; parents are [`NodeId`] handles
//! - [`ExploredSet`]: fingerprint buckets confirmed by state equality
//! - [`LocalSearch`]: hill climbing with top-k randomization and restarts
//! - [`SearchReport`]: serializable, digestible run summary
//!
//! [`Problem`]: wayfinder_kernel::Problem

#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]

pub mod error;
pub mod explored;
pub mod frontier;
pub mod informed;
pub mod local;
pub mod node;
pub mod policy;
pub mod report;
pub mod search;
pub mod uninformed;

pub use error::SearchError;
pub use explored::{ExploredEntry, ExploredSet};
pub use frontier::{BestFirstFrontier, FifoFrontier, Frontier, LifoFrontier};
pub use informed::PriorityRule;
pub use local::{
    LocalNode, LocalSearch, LocalSearchResult, LocalStrategy, LocalTermination,
    UsedConfigurations,
};
pub use node::{FrontierKey, NodeArena, NodeId, SearchNode};
pub use policy::SearchPolicy;
pub use report::{SearchReport, SearchStats, SolutionSummary, TerminationReason};
pub use search::{search, SearchResult, Solution, Strategy};
