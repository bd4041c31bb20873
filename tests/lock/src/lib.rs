//! Shared fixtures for the lock tests.
//!
//! [`AdjacencyGraph`] is an explicit finite graph `Problem` whose shortest
//! depths and costs are cheap to compute independently, so search results can
//! be checked against an oracle instead of against hard-coded numbers.

use std::cmp::Reverse;
use std::collections::btree_map::Entry;
use std::collections::{BTreeMap, BTreeSet, BinaryHeap, VecDeque};

use wayfinder_kernel::{Cost, Problem, ProblemError};

/// An edge-weighted digraph over nodes `0..n`, starting at node 0.
///
/// Actions are target node ids in edge-insertion order. The heuristic is a
/// per-node table (all zeros unless set).
#[derive(Debug, Clone)]
pub struct AdjacencyGraph {
    edges: Vec<Vec<(u32, Cost)>>,
    goals: BTreeSet<u32>,
    heuristic: Vec<Cost>,
}

impl AdjacencyGraph {
    /// `node_count` nodes and no edges.
    ///
    /// # Panics
    ///
    /// Panics if `node_count` is zero.
    #[must_use]
    pub fn new(node_count: usize) -> Self {
        assert!(node_count > 0, "graph needs at least the start node");
        Self {
            edges: vec![Vec::new(); node_count],
            goals: BTreeSet::new(),
            heuristic: vec![0; node_count],
        }
    }

    /// Build from `(from, to)` unit-cost edges.
    #[must_use]
    pub fn from_edges(node_count: usize, edges: &[(u32, u32)], goals: &[u32]) -> Self {
        let mut graph = Self::new(node_count);
        for &(from, to) in edges {
            graph.add_edge(from, to, 1);
        }
        graph.goals = goals.iter().copied().collect();
        graph
    }

    /// Add an edge; out-of-range endpoints are ignored.
    pub fn add_edge(&mut self, from: u32, to: u32, cost: Cost) {
        let n = self.edges.len();
        if (from as usize) < n && (to as usize) < n {
            self.edges[from as usize].push((to, cost));
        }
    }

    pub fn set_goals(&mut self, goals: &[u32]) {
        self.goals = goals.iter().copied().collect();
    }

    /// # Panics
    ///
    /// Panics unless the table has one entry per node.
    pub fn set_heuristic(&mut self, heuristic: Vec<Cost>) {
        assert_eq!(heuristic.len(), self.edges.len());
        self.heuristic = heuristic;
    }

    #[must_use]
    pub fn node_count(&self) -> usize {
        self.edges.len()
    }

    /// Minimum number of edges from node 0 to any goal.
    #[must_use]
    pub fn shortest_depth(&self) -> Option<u32> {
        let mut depth = BTreeMap::from([(0u32, 0u32)]);
        let mut queue = VecDeque::from([0u32]);
        while let Some(node) = queue.pop_front() {
            let d = depth[&node];
            if self.goals.contains(&node) {
                return Some(d);
            }
            for &(to, _) in &self.edges[node as usize] {
                if let Entry::Vacant(e) = depth.entry(to) {
                    e.insert(d + 1);
                    queue.push_back(to);
                }
            }
        }
        None
    }

    /// Minimum total edge cost from node 0 to any goal (Dijkstra).
    #[must_use]
    pub fn shortest_cost(&self) -> Option<Cost> {
        let mut best: BTreeMap<u32, Cost> = BTreeMap::from([(0, 0)]);
        let mut heap: BinaryHeap<Reverse<(Cost, u32)>> = BinaryHeap::from([Reverse((0, 0))]);
        while let Some(Reverse((cost, node))) = heap.pop() {
            if best.get(&node).is_some_and(|&b| cost > b) {
                continue;
            }
            if self.goals.contains(&node) {
                return Some(cost);
            }
            for &(to, step) in &self.edges[node as usize] {
                let next = cost + step;
                if best.get(&to).is_none_or(|&b| next < b) {
                    best.insert(to, next);
                    heap.push(Reverse((next, to)));
                }
            }
        }
        None
    }

    /// Number of nodes reachable from node 0 (including it).
    #[must_use]
    pub fn reachable_count(&self) -> usize {
        let mut seen = BTreeSet::from([0u32]);
        let mut stack = vec![0u32];
        while let Some(node) = stack.pop() {
            for &(to, _) in &self.edges[node as usize] {
                if seen.insert(to) {
                    stack.push(to);
                }
            }
        }
        seen.len()
    }
}

impl Problem for AdjacencyGraph {
    type State = u32;
    type Action = u32;

    fn initial_state(&self) -> u32 {
        0
    }

    fn actions(&self, state: &u32) -> Vec<u32> {
        self.edges[*state as usize].iter().map(|&(to, _)| to).collect()
    }

    fn result(&self, state: &u32, action: &u32) -> Result<u32, ProblemError> {
        if self.edges[*state as usize].iter().any(|&(to, _)| to == *action) {
            Ok(*action)
        } else {
            Err(ProblemError::InvalidAction {
                action: format!("{state}->{action}"),
            })
        }
    }

    fn goal_test(&self, state: &u32) -> bool {
        self.goals.contains(state)
    }

    /// Cheapest parallel edge between the two nodes.
    fn step_cost(&self, state: &u32, _action: &u32, next: &u32) -> Cost {
        self.edges[*state as usize]
            .iter()
            .filter(|&&(to, _)| to == *next)
            .map(|&(_, c)| c)
            .min()
            .unwrap_or(1)
    }

    fn heuristic(&self, state: &u32) -> Cost {
        self.heuristic[*state as usize]
    }
}

/// Apply `actions` from the initial state through `result`.
///
/// # Errors
///
/// Returns the first error `result` reports.
pub fn replay<P: Problem>(problem: &P, actions: &[P::Action]) -> Result<P::State, ProblemError> {
    let mut state = problem.initial_state();
    for action in actions {
        state = problem.result(&state, action)?;
    }
    Ok(state)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn oracles_agree_on_a_small_graph() {
        let mut g = AdjacencyGraph::new(4);
        g.add_edge(0, 1, 5);
        g.add_edge(0, 2, 1);
        g.add_edge(2, 1, 1);
        g.add_edge(1, 3, 1);
        g.set_goals(&[3]);
        assert_eq!(g.shortest_depth(), Some(2));
        assert_eq!(g.shortest_cost(), Some(3));
        assert_eq!(g.reachable_count(), 4);
    }

    #[test]
    fn replay_rejects_missing_edge() {
        let g = AdjacencyGraph::from_edges(3, &[(0, 1)], &[2]);
        assert!(replay(&g, &[1]).is_ok());
        assert!(replay(&g, &[2]).is_err());
    }
}
