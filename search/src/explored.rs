//! Explored set: fingerprint-keyed deduplication with equality confirmation.
//!
//! Uses a `BTreeMap` (not `HashMap`) for deterministic iteration order.
//! Each fingerprint maps to a bucket of entries; a lookup only hits when the
//! arena state behind an entry is `==` to the probe. Two distinct states that
//! share a digest therefore stay distinct.

use std::collections::BTreeMap;

use tracing::warn;
use wayfinder_kernel::{Cost, Fingerprint};

use crate::node::{NodeArena, NodeId};

/// What the explored set knows about one state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExploredEntry {
    /// Node currently holding the best known path to the state.
    pub node: NodeId,
    /// Cheapest `g` recorded for the state.
    pub best_cost: Cost,
    /// Shallowest depth at which the state has been enqueued.
    pub best_depth: u32,
    /// The state has been popped and expanded (A* closed list).
    pub finalized: bool,
    /// Depth of the node that finalized the state; meaningless until `finalized`.
    pub finalized_depth: u32,
}

#[derive(Debug, Default)]
pub struct ExploredSet {
    buckets: BTreeMap<Fingerprint, Vec<ExploredEntry>>,
    distinct: usize,
    collisions: u64,
}

impl ExploredSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Find the entry for `state`, if an equal state was recorded.
    #[must_use]
    pub fn find<S: Eq, A>(
        &self,
        fingerprint: Fingerprint,
        state: &S,
        arena: &NodeArena<S, A>,
    ) -> Option<&ExploredEntry> {
        self.buckets
            .get(&fingerprint)?
            .iter()
            .find(|e| arena.get(e.node).state == *state)
    }

    pub fn find_mut<S: Eq, A>(
        &mut self,
        fingerprint: Fingerprint,
        state: &S,
        arena: &NodeArena<S, A>,
    ) -> Option<&mut ExploredEntry> {
        self.buckets
            .get_mut(&fingerprint)?
            .iter_mut()
            .find(|e| arena.get(e.node).state == *state)
    }

    #[must_use]
    pub fn contains<S: Eq, A>(
        &self,
        fingerprint: Fingerprint,
        state: &S,
        arena: &NodeArena<S, A>,
    ) -> bool {
        self.find(fingerprint, state, arena).is_some()
    }

    /// Record arena node `id` as the first path to its state.
    ///
    /// Returns `false` (and records nothing) if an equal state is already
    /// present.
    pub fn insert<S: Eq, A>(&mut self, id: NodeId, arena: &NodeArena<S, A>) -> bool {
        let node = arena.get(id);
        let bucket = self.buckets.entry(node.fingerprint).or_default();
        if bucket.iter().any(|e| arena.get(e.node).state == node.state) {
            return false;
        }
        if !bucket.is_empty() {
            self.collisions += 1;
            warn!(
                fingerprint = %node.fingerprint,
                bucket_len = bucket.len(),
                "fingerprint collision between unequal states"
            );
        }
        bucket.push(ExploredEntry {
            node: id,
            best_cost: node.path_cost,
            best_depth: node.depth,
            finalized: false,
            finalized_depth: node.depth,
        });
        self.distinct += 1;
        true
    }

    /// Number of distinct states recorded.
    #[must_use]
    pub fn len(&self) -> usize {
        self.distinct
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.distinct == 0
    }

    /// Number of inserts that landed in an occupied bucket with unequal states.
    #[must_use]
    pub fn collisions(&self) -> u64 {
        self.collisions
    }
}
