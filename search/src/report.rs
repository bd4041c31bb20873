//! Termination reasons, run counters and the serializable search report.
//!
//! The report is the audit surface of a run: it is serialized through
//! `serde_json::Value` (whose maps are sorted) so that two identical runs
//! produce byte-identical JSON and therefore identical digests.

use serde::Serialize;
use wayfinder_kernel::hash::{canonical_hash, ContentHash, DOMAIN_SEARCH_REPORT};
use wayfinder_kernel::Cost;

use crate::node::NodeId;
use crate::search::{SearchResult, Strategy};

/// Why a systematic search stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TerminationReason {
    /// A goal node was popped and passed `goal_test`.
    GoalReached { node: NodeId },
    /// Frontier emptied without finding a goal (`NoSolution`).
    FrontierExhausted,
    /// Frontier emptied, but some nodes were not expanded because of a depth
    /// limit; a deeper search might still succeed.
    DepthCutoff,
    /// `max_expansions` budget was hit.
    ExpansionBudgetExceeded,
}

/// Diagnostic counters. Not correctness-relevant, but deterministic.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SearchStats {
    /// Nodes whose successors were generated. The goal node is not counted.
    pub nodes_expanded: u64,
    /// Successor states computed via `result`.
    pub nodes_generated: u64,
    /// Children dropped because an equal state was already recorded.
    pub duplicates_suppressed: u64,
    /// Best-first pops discarded because a cheaper path had superseded them.
    pub stale_entries_skipped: u64,
    /// Nodes left unexpanded because of a depth limit.
    pub depth_cutoffs: u64,
    pub frontier_size_at_termination: u64,
    pub frontier_high_water: u64,
    /// Distinct states recorded in the explored set (0 for tree search).
    pub distinct_states: u64,
}

impl SearchStats {
    /// Fold the counters of a later iteration into these (iterative deepening).
    pub(crate) fn absorb(&mut self, later: &SearchStats) {
        self.nodes_expanded += later.nodes_expanded;
        self.nodes_generated += later.nodes_generated;
        self.duplicates_suppressed += later.duplicates_suppressed;
        self.stale_entries_skipped += later.stale_entries_skipped;
        self.depth_cutoffs += later.depth_cutoffs;
        self.frontier_size_at_termination = later.frontier_size_at_termination;
        self.frontier_high_water = self.frontier_high_water.max(later.frontier_high_water);
        self.distinct_states = self.distinct_states.max(later.distinct_states);
    }
}

/// Solution summary carried by the report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SolutionSummary {
    pub node: NodeId,
    pub depth: u32,
    pub path_cost: Cost,
}

/// Serializable summary of a systematic search run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchReport {
    pub strategy: Strategy,
    pub termination: TerminationReason,
    /// Hex fingerprint of the initial state.
    pub root_fingerprint: String,
    pub solution: Option<SolutionSummary>,
    pub stats: SearchStats,
    /// Total nodes created (arena size).
    pub nodes_created: u64,
}

impl SearchReport {
    #[must_use]
    pub fn from_result<S, A>(result: &SearchResult<S, A>) -> Self {
        let solution = result.goal_node().map(|node| SolutionSummary {
            node: node.id,
            depth: node.depth,
            path_cost: node.path_cost,
        });
        Self {
            strategy: result.strategy,
            termination: result.termination,
            root_fingerprint: result
                .root()
                .map(|root| root.fingerprint.to_hex())
                .unwrap_or_default(),
            solution,
            stats: result.stats,
            nodes_created: result.arena.len() as u64,
        }
    }

    /// Canonical JSON bytes (sorted keys, compact).
    ///
    /// # Errors
    ///
    /// Returns the underlying `serde_json` error if serialization fails.
    pub fn to_json_bytes(&self) -> Result<Vec<u8>, serde_json::Error> {
        let value = serde_json::to_value(self)?;
        serde_json::to_vec(&value)
    }

    /// `canonical_hash(DOMAIN_SEARCH_REPORT, to_json_bytes())`.
    ///
    /// # Errors
    ///
    /// Returns the underlying `serde_json` error if serialization fails.
    pub fn digest(&self) -> Result<ContentHash, serde_json::Error> {
        Ok(canonical_hash(DOMAIN_SEARCH_REPORT, &self.to_json_bytes()?))
    }
}
