//! Best-first search: A*, uniform-cost and greedy best-first.
//!
//! All three share one driver and differ only in how the frontier priority is
//! computed from `g` and `h`. The explored set doubles as the open/closed
//! bookkeeping: each distinct state carries its best known `g`, the node that
//! achieved it, and whether it has been finalized (popped and expanded).
//!
//! When a cheaper path to an open state is found, a new node is created and
//! pushed; the superseded frontier entry is left in place and skipped as stale
//! when it is eventually popped.
//!
//! Under a depth cap a state can also be reached again at a shallower depth.
//! That path is pushed even if it costs more or the state is finalized, and
//! it stays live until the state is expanded at that depth, so a goal within
//! the cap is never lost to a deeper copy that was cut off. Cost optimality
//! then only holds among the paths the cap leaves intact.

use tracing::trace;
use wayfinder_kernel::{Cost, Fingerprint, Problem};

use crate::error::SearchError;
use crate::explored::ExploredSet;
use crate::frontier::{BestFirstFrontier, Frontier};
use crate::node::{FrontierKey, NodeArena};
use crate::policy::SearchPolicy;
use crate::report::{SearchStats, TerminationReason};
use crate::search::{SearchResult, Strategy};
use crate::uninformed::successors;

/// How a node's frontier priority is derived from `g` and `h`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriorityRule {
    /// `f = g + h`
    AStar,
    /// `f = g`
    UniformCost,
    /// `f = h`
    Greedy,
}

impl PriorityRule {
    #[must_use]
    pub fn priority(self, g: Cost, h: Cost) -> Cost {
        match self {
            Self::AStar => g.saturating_add(h),
            Self::UniformCost => g,
            Self::Greedy => h,
        }
    }

    /// Whether the rule consults the problem's heuristic at all.
    fn uses_heuristic(self) -> bool {
        !matches!(self, Self::UniformCost)
    }
}

pub(crate) fn run<P: Problem>(
    problem: &P,
    strategy: Strategy,
    rule: PriorityRule,
    policy: &SearchPolicy,
) -> Result<SearchResult<P::State, P::Action>, SearchError> {
    let depth_limit = policy.effective_depth_limit(None);
    let heuristic = |state: &P::State| {
        if rule.uses_heuristic() {
            problem.heuristic(state)
        } else {
            0
        }
    };

    let mut arena = NodeArena::new();
    let mut explored = ExploredSet::new();
    let mut frontier = BestFirstFrontier::new();
    let mut stats = SearchStats::default();

    let initial = problem.initial_state();
    let root_fp = Fingerprint::of(&initial);
    let root_h = heuristic(&initial);
    let root = arena.insert_root(initial, root_fp, root_h);
    explored.insert(root, &arena);
    frontier.push(
        root,
        FrontierKey {
            f_cost: rule.priority(0, root_h),
            creation_order: 0,
        },
    );

    let termination = loop {
        if frontier.is_empty() {
            break if stats.depth_cutoffs > 0 {
                TerminationReason::DepthCutoff
            } else {
                TerminationReason::FrontierExhausted
            };
        }
        if policy.expansion_budget_reached(stats.nodes_expanded) {
            break TerminationReason::ExpansionBudgetExceeded;
        }
        let Some(current) = frontier.pop() else {
            continue;
        };

        let node = arena.get(current);
        let Some(entry) = explored.find_mut(node.fingerprint, &node.state, &arena) else {
            stats.stale_entries_skipped += 1;
            continue;
        };
        let open_holder = entry.node == current && !entry.finalized;
        let shallowest = depth_limit.is_some()
            && node.depth == entry.best_depth
            && (!entry.finalized || node.depth < entry.finalized_depth);
        if !open_holder && !shallowest {
            stats.stale_entries_skipped += 1;
            continue;
        }
        entry.finalized = true;
        entry.finalized_depth = node.depth;

        if problem.goal_test(&node.state) {
            break TerminationReason::GoalReached { node: current };
        }

        let actions = problem.actions(&node.state);
        if !actions.is_empty() && depth_limit.is_some_and(|limit| node.depth >= limit) {
            stats.depth_cutoffs += 1;
            continue;
        }

        stats.nodes_expanded += 1;
        trace!(
            node = %current,
            g = node.path_cost,
            f = rule.priority(node.path_cost, node.h_cost),
            frontier = frontier.len(),
            "expand"
        );

        let child_depth = node.depth + 1;
        for (state, fingerprint, action, g) in successors(problem, &arena, current, actions)? {
            stats.nodes_generated += 1;
            let existing = explored.find(fingerprint, &state, &arena).copied();
            let cheaper = existing.is_some_and(|e| !e.finalized && g < e.best_cost);
            let shallower =
                depth_limit.is_some() && existing.is_some_and(|e| child_depth < e.best_depth);
            if existing.is_some() && !cheaper && !shallower {
                stats.duplicates_suppressed += 1;
                continue;
            }

            let h = heuristic(&state);
            let child = arena.insert_child(current, state, fingerprint, action, g, h);
            let child_node = arena.get(child);
            if existing.is_some() {
                if let Some(entry) = explored.find_mut(fingerprint, &child_node.state, &arena) {
                    if cheaper {
                        entry.best_cost = g;
                        entry.node = child;
                    }
                    if shallower {
                        entry.best_depth = child_depth;
                    }
                }
            } else {
                explored.insert(child, &arena);
            }
            frontier.push(
                child,
                FrontierKey {
                    f_cost: rule.priority(g, h),
                    creation_order: child_node.creation_order,
                },
            );
        }
    };

    stats.frontier_size_at_termination = frontier.len() as u64;
    stats.frontier_high_water = frontier.high_water() as u64;
    stats.distinct_states = explored.len() as u64;

    Ok(SearchResult {
        strategy,
        termination,
        arena,
        stats,
    })
}
