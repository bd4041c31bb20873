//! Search entry point: strategy selection and result types.

use serde::{Deserialize, Serialize};
use tracing::debug;
use wayfinder_kernel::{Cost, Problem};

use crate::error::SearchError;
use crate::frontier::{FifoFrontier, LifoFrontier};
use crate::informed::{self, PriorityRule};
use crate::node::{NodeArena, NodeId, SearchNode};
use crate::policy::SearchPolicy;
use crate::report::{SearchStats, TerminationReason};
use crate::uninformed;

/// Systematic search strategies.
///
/// Every strategy goal-tests a node when it is popped from the frontier,
/// never when it is generated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Strategy {
    BreadthFirstTree,
    BreadthFirstGraph,
    DepthFirstTree,
    DepthFirstGraph,
    /// Depth-first tree search that never expands nodes at `limit`.
    DepthLimited { limit: u32 },
    /// Depth-limited search with limits `0..=max_depth`.
    IterativeDeepening { max_depth: u32 },
    /// Best-first on `g` alone.
    UniformCost,
    /// Best-first on `h` alone. Not optimal.
    GreedyBestFirst,
    /// Best-first on `g + h`.
    AStar,
}

impl Strategy {
    /// Stable snake-case name (matches the serde tag).
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::BreadthFirstTree => "breadth_first_tree",
            Self::BreadthFirstGraph => "breadth_first_graph",
            Self::DepthFirstTree => "depth_first_tree",
            Self::DepthFirstGraph => "depth_first_graph",
            Self::DepthLimited { .. } => "depth_limited",
            Self::IterativeDeepening { .. } => "iterative_deepening",
            Self::UniformCost => "uniform_cost",
            Self::GreedyBestFirst => "greedy_best_first",
            Self::AStar => "a_star",
        }
    }

    /// Whether the strategy deduplicates through an explored set.
    #[must_use]
    pub fn is_graph_search(&self) -> bool {
        matches!(
            self,
            Self::BreadthFirstGraph
                | Self::DepthFirstGraph
                | Self::UniformCost
                | Self::GreedyBestFirst
                | Self::AStar
        )
    }
}

impl std::fmt::Display for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DepthLimited { limit } => write!(f, "depth_limited(limit={limit})"),
            Self::IterativeDeepening { max_depth } => {
                write!(f, "iterative_deepening(max_depth={max_depth})")
            }
            other => f.write_str(other.name()),
        }
    }
}

/// Result of a systematic search run.
///
/// The arena holds every node created during the run, so the goal path can
/// be walked after the fact. Check [`SearchResult::is_goal_reached`] or
/// inspect `termination` to determine the outcome.
#[derive(Debug)]
pub struct SearchResult<S, A> {
    pub strategy: Strategy,
    pub termination: TerminationReason,
    pub arena: NodeArena<S, A>,
    pub stats: SearchStats,
}

/// A reconstructed solution path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Solution<A> {
    /// The goal node.
    pub node: NodeId,
    /// Actions from the root to the goal, in order.
    pub actions: Vec<A>,
    pub path_cost: Cost,
    pub depth: u32,
}

impl<S, A> SearchResult<S, A> {
    /// Returns `true` if the search terminated because a goal was reached.
    #[must_use]
    pub fn is_goal_reached(&self) -> bool {
        matches!(self.termination, TerminationReason::GoalReached { .. })
    }

    /// Returns `true` if the frontier was exhausted without a goal.
    #[must_use]
    pub fn is_no_solution(&self) -> bool {
        self.termination == TerminationReason::FrontierExhausted
    }

    #[must_use]
    pub fn goal(&self) -> Option<NodeId> {
        match self.termination {
            TerminationReason::GoalReached { node } => Some(node),
            _ => None,
        }
    }

    #[must_use]
    pub fn goal_node(&self) -> Option<&SearchNode<S, A>> {
        self.goal().map(|id| self.arena.get(id))
    }

    /// The root node; `None` only for an arena nothing was inserted into.
    #[must_use]
    pub fn root(&self) -> Option<&SearchNode<S, A>> {
        self.arena.iter().next()
    }

    /// States from the root to the goal, if one was reached.
    #[must_use]
    pub fn path_states(&self) -> Option<Vec<&S>> {
        self.goal().map(|id| self.arena.path_states(id))
    }
}

impl<S, A: Clone> SearchResult<S, A> {
    /// Reconstruct the action path to the goal, if one was reached.
    #[must_use]
    pub fn solution(&self) -> Option<Solution<A>> {
        let node = self.goal_node()?;
        Some(Solution {
            node: node.id,
            actions: self.arena.actions(node.id),
            path_cost: node.path_cost,
            depth: node.depth,
        })
    }
}

/// Run a systematic search over `problem`.
///
/// Normal terminations (including `NoSolution` and budget exhaustion) return
/// `Ok(SearchResult)`; see [`SearchResult::termination`].
///
/// # Errors
///
/// Returns [`SearchError::InvalidPolicy`] for pre-flight policy failures and
/// [`SearchError::Problem`] if the domain's `result` rejects an action it
/// offered itself. No partial result is produced in either case.
pub fn search<P: Problem>(
    problem: &P,
    strategy: Strategy,
    policy: &SearchPolicy,
) -> Result<SearchResult<P::State, P::Action>, SearchError> {
    policy.validate()?;
    debug!(event = "search_start", %strategy);

    let result = match strategy {
        Strategy::BreadthFirstTree => {
            uninformed::run(problem, strategy, FifoFrontier::new(), false, None, policy)
        }
        Strategy::BreadthFirstGraph => {
            uninformed::run(problem, strategy, FifoFrontier::new(), true, None, policy)
        }
        Strategy::DepthFirstTree => {
            uninformed::run(problem, strategy, LifoFrontier::new(), false, None, policy)
        }
        Strategy::DepthFirstGraph => {
            uninformed::run(problem, strategy, LifoFrontier::new(), true, None, policy)
        }
        Strategy::DepthLimited { limit } => {
            uninformed::run(problem, strategy, LifoFrontier::new(), false, Some(limit), policy)
        }
        Strategy::IterativeDeepening { max_depth } => {
            uninformed::iterative_deepening(problem, max_depth, policy)
        }
        Strategy::UniformCost => informed::run(problem, strategy, PriorityRule::UniformCost, policy),
        Strategy::GreedyBestFirst => informed::run(problem, strategy, PriorityRule::Greedy, policy),
        Strategy::AStar => informed::run(problem, strategy, PriorityRule::AStar, policy),
    }?;

    debug!(
        event = "search_end",
        %strategy,
        termination = ?result.termination,
        nodes_expanded = result.stats.nodes_expanded,
        frontier_size = result.stats.frontier_size_at_termination,
    );
    Ok(result)
}
