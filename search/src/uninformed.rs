//! Breadth-first and depth-first drivers (tree and graph variants), plus
//! depth-limited and iterative-deepening search built on the same loop.

use tracing::{debug, trace, warn};
use wayfinder_kernel::{Cost, Fingerprint, Problem};

use crate::error::SearchError;
use crate::explored::ExploredSet;
use crate::frontier::{Frontier, LifoFrontier};
use crate::node::{FrontierKey, NodeArena, NodeId};
use crate::policy::SearchPolicy;
use crate::report::{SearchStats, TerminationReason};
use crate::search::{SearchResult, Strategy};

/// Budgets for one pass of the loop, already resolved from policy and strategy.
#[derive(Debug, Clone, Copy)]
struct Limits {
    max_expansions: Option<u64>,
    depth_limit: Option<u32>,
}

impl Limits {
    fn budget_reached(&self, expanded: u64) -> bool {
        self.max_expansions.is_some_and(|max| expanded >= max)
    }
}

/// Run one uninformed search with the given frontier discipline.
///
/// `graph` enables the explored set; `depth_limit` is the strategy's own
/// limit (combined with the policy's `max_depth`).
pub(crate) fn run<P, F>(
    problem: &P,
    strategy: Strategy,
    frontier: F,
    graph: bool,
    depth_limit: Option<u32>,
    policy: &SearchPolicy,
) -> Result<SearchResult<P::State, P::Action>, SearchError>
where
    P: Problem,
    F: Frontier,
{
    let limits = Limits {
        max_expansions: policy.max_expansions,
        depth_limit: policy.effective_depth_limit(depth_limit),
    };
    drive(problem, strategy, frontier, graph, limits)
}

/// Depth-limited passes with limits `0..=max_depth`.
///
/// The expansion budget is shared across passes, so a budget of `n` means at
/// most `n` expansions over the whole run.
pub(crate) fn iterative_deepening<P: Problem>(
    problem: &P,
    max_depth: u32,
    policy: &SearchPolicy,
) -> Result<SearchResult<P::State, P::Action>, SearchError> {
    let strategy = Strategy::IterativeDeepening { max_depth };
    // Passes beyond the policy's own cap would repeat the same capped search.
    let last = policy
        .effective_depth_limit(Some(max_depth))
        .unwrap_or(max_depth);
    let mut total = SearchStats::default();
    let mut limit = 0;
    loop {
        let remaining = policy
            .max_expansions
            .map(|max| max.saturating_sub(total.nodes_expanded));
        let limits = Limits {
            max_expansions: remaining,
            depth_limit: Some(limit),
        };
        let mut pass = drive(problem, strategy, LifoFrontier::new(), false, limits)?;
        total.absorb(&pass.stats);
        debug!(
            event = "iterative_deepening_pass",
            limit,
            termination = ?pass.termination,
            nodes_expanded = pass.stats.nodes_expanded,
        );

        if pass.termination != TerminationReason::DepthCutoff || limit >= last {
            pass.stats = total;
            return Ok(pass);
        }
        limit += 1;
    }
}

fn drive<P, F>(
    problem: &P,
    strategy: Strategy,
    mut frontier: F,
    graph: bool,
    limits: Limits,
) -> Result<SearchResult<P::State, P::Action>, SearchError>
where
    P: Problem,
    F: Frontier,
{
    let mut arena = NodeArena::new();
    let mut explored = ExploredSet::new();
    let mut stats = SearchStats::default();
    // Under a depth cap, a shallower path to a recorded state replaces the
    // recorded one; otherwise the deeper copy could be cut off first.
    let reopen = graph && limits.depth_limit.is_some();

    let initial = problem.initial_state();
    let root_fp = Fingerprint::of(&initial);
    let root = arena.insert_root(initial, root_fp, 0);
    if graph {
        explored.insert(root, &arena);
    }
    frontier.push(root, key_for(&arena, root));

    let termination = loop {
        if frontier.is_empty() {
            break if stats.depth_cutoffs > 0 {
                TerminationReason::DepthCutoff
            } else {
                TerminationReason::FrontierExhausted
            };
        }
        if limits.budget_reached(stats.nodes_expanded) {
            break TerminationReason::ExpansionBudgetExceeded;
        }
        let Some(current) = frontier.pop() else {
            continue;
        };

        let node = arena.get(current);
        let superseded = reopen
            && explored
                .find(node.fingerprint, &node.state, &arena)
                .is_some_and(|entry| entry.node != current);
        if superseded {
            stats.stale_entries_skipped += 1;
            continue;
        }
        if problem.goal_test(&node.state) {
            break TerminationReason::GoalReached { node: current };
        }

        let actions = problem.actions(&node.state);
        if !actions.is_empty() && limits.depth_limit.is_some_and(|limit| node.depth >= limit) {
            stats.depth_cutoffs += 1;
            continue;
        }

        stats.nodes_expanded += 1;
        trace!(
            node = %current,
            depth = node.depth,
            frontier = frontier.len(),
            "expand"
        );

        let child_depth = node.depth + 1;
        let children = successors(problem, &arena, current, actions)?;
        let mut batch = Vec::with_capacity(children.len());
        for (state, fingerprint, action, path_cost) in children {
            stats.nodes_generated += 1;
            let shallower = if graph {
                match explored.find(fingerprint, &state, &arena) {
                    Some(entry) if reopen && child_depth < entry.best_depth => true,
                    Some(_) => {
                        stats.duplicates_suppressed += 1;
                        continue;
                    }
                    None => false,
                }
            } else {
                false
            };
            let child = arena.insert_child(current, state, fingerprint, action, path_cost, 0);
            if shallower {
                let child_node = arena.get(child);
                if let Some(entry) = explored.find_mut(fingerprint, &child_node.state, &arena) {
                    entry.node = child;
                    entry.best_depth = child_depth;
                }
            } else if graph {
                explored.insert(child, &arena);
            }
            batch.push((child, key_for(&arena, child)));
        }
        frontier.push_children(batch);
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

fn key_for<S, A>(arena: &NodeArena<S, A>, id: NodeId) -> FrontierKey {
    let node = arena.get(id);
    FrontierKey {
        f_cost: node.path_cost,
        creation_order: node.creation_order,
    }
}

/// Child tuple: state, fingerprint, action, full path cost `g`.
pub(crate) type Child<S, A> = (S, Fingerprint, A, Cost);

/// Apply every action of `parent` in order.
///
/// # Errors
///
/// Propagates the first [`ProblemError`](wayfinder_kernel::ProblemError)
/// returned by `result`.
pub(crate) fn successors<P: Problem>(
    problem: &P,
    arena: &NodeArena<P::State, P::Action>,
    parent: NodeId,
    actions: Vec<P::Action>,
) -> Result<Vec<Child<P::State, P::Action>>, SearchError> {
    let node = arena.get(parent);
    let mut out = Vec::with_capacity(actions.len());
    for action in actions {
        let state = problem.result(&node.state, &action).map_err(|err| {
            warn!(node = %parent, error = %err, "domain rejected one of its own actions");
            SearchError::from(err)
        })?;
        let path_cost = node
            .path_cost
            .saturating_add(problem.step_cost(&node.state, &action, &state));
        let fingerprint = Fingerprint::of(&state);
        out.push((state, fingerprint, action, path_cost));
    }
    Ok(out)
}
