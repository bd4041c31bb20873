//! Frontiers: the not-yet-expanded boundary of a search.
//!
//! Frontiers hold [`NodeId`] handles only; node data stays in the arena.
//! Deduplication is not a frontier concern here: the explored set decides
//! what gets pushed.

use std::cmp::Reverse;
use std::collections::{BinaryHeap, VecDeque};

use crate::node::{FrontierKey, NodeId};

/// Common interface over FIFO, LIFO and best-first frontiers.
pub trait Frontier {
    fn push(&mut self, id: NodeId, key: FrontierKey);

    fn pop(&mut self) -> Option<NodeId>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Largest size the frontier has reached.
    fn high_water(&self) -> usize;

    /// Push the children of one expansion, given in `actions` order.
    ///
    /// Implementations must make the first child the first of the batch to
    /// be popped among its siblings.
    fn push_children(&mut self, children: Vec<(NodeId, FrontierKey)>) {
        for (id, key) in children {
            self.push(id, key);
        }
    }
}

/// First-in first-out queue (breadth-first).
#[derive(Debug, Default)]
pub struct FifoFrontier {
    queue: VecDeque<NodeId>,
    high_water: usize,
}

impl FifoFrontier {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl Frontier for FifoFrontier {
    fn push(&mut self, id: NodeId, _key: FrontierKey) {
        self.queue.push_back(id);
        self.high_water = self.high_water.max(self.queue.len());
    }

    fn pop(&mut self) -> Option<NodeId> {
        self.queue.pop_front()
    }

    fn len(&self) -> usize {
        self.queue.len()
    }

    fn high_water(&self) -> usize {
        self.high_water
    }
}

/// Last-in first-out stack (depth-first).
#[derive(Debug, Default)]
pub struct LifoFrontier {
    stack: Vec<NodeId>,
    high_water: usize,
}

impl LifoFrontier {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl Frontier for LifoFrontier {
    fn push(&mut self, id: NodeId, _key: FrontierKey) {
        self.stack.push(id);
        self.high_water = self.high_water.max(self.stack.len());
    }

    fn pop(&mut self) -> Option<NodeId> {
        self.stack.pop()
    }

    fn len(&self) -> usize {
        self.stack.len()
    }

    fn high_water(&self) -> usize {
        self.high_water
    }

    // Reversed so the first action ends up on top of the stack.
    fn push_children(&mut self, children: Vec<(NodeId, FrontierKey)>) {
        for (id, key) in children.into_iter().rev() {
            self.push(id, key);
        }
    }
}

/// A frontier entry wrapping a node handle with its ordering key.
///
/// `BinaryHeap` is a max-heap, so we use `Reverse<FrontierKey>` to get
/// min-heap behavior (lowest `f_cost` first).
#[derive(Debug, PartialEq, Eq)]
struct FrontierEntry {
    key: Reverse<FrontierKey>,
    node: NodeId,
}

impl PartialOrd for FrontierEntry {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FrontierEntry {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.key.cmp(&other.key)
    }
}

/// Priority frontier ordered by [`FrontierKey`] (A*, uniform-cost, greedy).
///
/// The same node id may be pushed more than once when a cheaper path is
/// found; the driver discards the stale copies on pop.
#[derive(Debug, Default)]
pub struct BestFirstFrontier {
    heap: BinaryHeap<FrontierEntry>,
    high_water: usize,
}

impl BestFirstFrontier {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Key of the entry that would be popped next.
    #[must_use]
    pub fn peek_key(&self) -> Option<FrontierKey> {
        self.heap.peek().map(|e| e.key.0)
    }
}

impl Frontier for BestFirstFrontier {
    fn push(&mut self, id: NodeId, key: FrontierKey) {
        self.heap.push(FrontierEntry {
            key: Reverse(key),
            node: id,
        });
        self.high_water = self.high_water.max(self.heap.len());
    }

    fn pop(&mut self) -> Option<NodeId> {
        self.heap.pop().map(|e| e.node)
    }

    fn len(&self) -> usize {
        self.heap.len()
    }

    fn high_water(&self) -> usize {
        self.high_water
    }
}
