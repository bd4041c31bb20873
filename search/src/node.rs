//! Search nodes and the arena that owns them.
//!
//! Nodes never hold references to each other. A child records its parent's
//! [`NodeId`], and path reconstruction walks those handles back through the
//! [`NodeArena`]. Every node created during one run lives in the arena until
//! the run's result is dropped.

use serde::Serialize;
use wayfinder_kernel::{Cost, Fingerprint};

/// Handle of a node inside a [`NodeArena`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct NodeId(usize);

impl NodeId {
    /// Position of the node in its arena.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "n{}", self.0)
    }
}

/// An immutable search-tree node.
///
/// Ordering for best-first extraction uses [`FrontierKey`]; uninformed
/// frontiers ignore it.
#[derive(Debug, Clone)]
pub struct SearchNode<S, A> {
    pub id: NodeId,
    /// Parent handle (`None` for root).
    pub parent: Option<NodeId>,
    pub state: S,
    pub fingerprint: Fingerprint,
    /// The action that produced this node from its parent.
    pub action: Option<A>,
    /// Cumulative path cost `g`.
    pub path_cost: Cost,
    /// Heuristic estimate `h` captured at creation.
    pub h_cost: Cost,
    /// Tree depth (root = 0).
    pub depth: u32,
    /// Global counter for deterministic tie-breaking.
    pub creation_order: u64,
}

impl<S, A> SearchNode<S, A> {
    /// `f = g + h` (saturating).
    #[must_use]
    pub fn f_cost(&self) -> Cost {
        self.path_cost.saturating_add(self.h_cost)
    }

    #[must_use]
    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }
}

/// The best-first ordering key: `(f_cost, creation_order)`.
///
/// Lower `f_cost` first; equal `f_cost` leaves in insertion (FIFO) order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct FrontierKey {
    pub f_cost: Cost,
    pub creation_order: u64,
}

/// Owner of every node created during one search run.
#[derive(Debug, Clone)]
pub struct NodeArena<S, A> {
    nodes: Vec<SearchNode<S, A>>,
}

impl<S, A> NodeArena<S, A> {
    #[must_use]
    pub fn new() -> Self {
        Self { nodes: Vec::new() }
    }

    /// Insert the root node. The arena must be empty.
    pub fn insert_root(&mut self, state: S, fingerprint: Fingerprint, h_cost: Cost) -> NodeId {
        debug_assert!(self.nodes.is_empty(), "root inserted into non-empty arena");
        self.push(SearchNode {
            id: NodeId(self.nodes.len()),
            parent: None,
            state,
            fingerprint,
            action: None,
            path_cost: 0,
            h_cost,
            depth: 0,
            creation_order: 0,
        })
    }

    /// Insert a child of `parent` reached via `action`.
    ///
    /// `path_cost` is the full `g` of the child, not the step cost.
    pub fn insert_child(
        &mut self,
        parent: NodeId,
        state: S,
        fingerprint: Fingerprint,
        action: A,
        path_cost: Cost,
        h_cost: Cost,
    ) -> NodeId {
        let depth = self.nodes[parent.0].depth + 1;
        let id = NodeId(self.nodes.len());
        self.push(SearchNode {
            id,
            parent: Some(parent),
            state,
            fingerprint,
            action: Some(action),
            path_cost,
            h_cost,
            depth,
            creation_order: id.0 as u64,
        })
    }

    fn push(&mut self, node: SearchNode<S, A>) -> NodeId {
        let id = node.id;
        self.nodes.push(node);
        id
    }

    /// Look up a node. Ids handed out by this arena are always valid.
    #[must_use]
    pub fn get(&self, id: NodeId) -> &SearchNode<S, A> {
        &self.nodes[id.0]
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &SearchNode<S, A>> {
        self.nodes.iter()
    }

    /// Node ids from the root to `id`, inclusive.
    #[must_use]
    pub fn path(&self, id: NodeId) -> Vec<NodeId> {
        let mut path = Vec::with_capacity(self.get(id).depth as usize + 1);
        let mut current = Some(id);
        while let Some(node_id) = current {
            path.push(node_id);
            current = self.get(node_id).parent;
        }
        path.reverse();
        path
    }

    /// The states along the path from the root to `id`.
    #[must_use]
    pub fn path_states(&self, id: NodeId) -> Vec<&S> {
        self.path(id).into_iter().map(|n| &self.get(n).state).collect()
    }
}

impl<S, A: Clone> NodeArena<S, A> {
    /// The actions taken from the root to reach `id`, in order.
    #[must_use]
    pub fn actions(&self, id: NodeId) -> Vec<A> {
        self.path(id)
            .into_iter()
            .filter_map(|n| self.get(n).action.clone())
            .collect()
    }
}

impl<S, A> Default for NodeArena<S, A> {
    fn default() -> Self {
        Self::new()
    }
}
