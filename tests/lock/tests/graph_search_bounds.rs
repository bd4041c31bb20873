//! Graph-search bound and frontier-order lock tests.
//!
//! Proves:
//! 1. Graph variants expand each reachable state at most once
//! 2. The expansion budget is an exact cap
//! 3. LIFO expansion follows the first action first
//! 4. Depth limits end in a cutoff, not in "no solution"
//! 5. Informed strategies honor the policy depth
//! 6. Under a policy depth, graph variants still find every goal within it,
//!    even when a state is first reached along a deeper path

use lock_tests::AdjacencyGraph;
use proptest::prelude::*;
use wayfinder_kernel::Cost;
use wayfinder_search::Strategy as SearchStrategy;
use wayfinder_search::{search, SearchError, SearchPolicy, TerminationReason};

fn arb_digraph() -> impl Strategy<Value = AdjacencyGraph> {
    (1u32..12)
        .prop_flat_map(|n| {
            (
                Just(n),
                prop::collection::vec((0..n, 0..n), 0..40),
                prop::collection::vec(0..n, 0..2),
            )
        })
        .prop_map(|(n, edges, goals)| AdjacencyGraph::from_edges(n as usize, &edges, &goals))
}

fn arb_weighted_digraph() -> impl Strategy<Value = AdjacencyGraph> {
    (2u32..12)
        .prop_flat_map(|n| {
            (
                Just(n),
                prop::collection::vec((0..n, 0..n, 1 as Cost..20), 0..40),
                prop::collection::vec(0..n, 0..2),
            )
        })
        .prop_map(|(n, edges, goals)| {
            let mut graph = AdjacencyGraph::new(n as usize);
            for (from, to, cost) in edges {
                graph.add_edge(from, to, cost);
            }
            graph.set_goals(&goals);
            graph
        })
}

const GRAPH_STRATEGIES: [SearchStrategy; 5] = [
    SearchStrategy::BreadthFirstGraph,
    SearchStrategy::DepthFirstGraph,
    SearchStrategy::UniformCost,
    SearchStrategy::GreedyBestFirst,
    SearchStrategy::AStar,
];

/// 0 -> 1 -> 2 -> 3, goal at 3.
fn chain() -> AdjacencyGraph {
    AdjacencyGraph::from_edges(4, &[(0, 1), (1, 2), (2, 3)], &[3])
}

// ---------------------------------------------------------------------------
// ACCEPTANCE: GRAPH-SEARCH-BOUND
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn graph_search_expands_each_state_at_most_once(graph in arb_digraph()) {
        let reachable = graph.reachable_count() as u64;
        for strategy in GRAPH_STRATEGIES {
            let result = search(&graph, strategy, &SearchPolicy::unlimited())
                .expect("search runs");
            prop_assert!(
                result.stats.nodes_expanded <= reachable,
                "{} expanded {} of {} reachable states",
                strategy,
                result.stats.nodes_expanded,
                reachable
            );
            prop_assert!(result.stats.distinct_states <= reachable);
            prop_assert!(
                result.is_goal_reached() || result.is_no_solution(),
                "{} ended with {:?}",
                strategy,
                result.termination
            );
        }
    }

    #[test]
    fn expansion_budget_is_exact(budget in 1u64..50) {
        // A self-loop with no goal: tree search never runs out of work.
        let graph = AdjacencyGraph::from_edges(2, &[(0, 0), (0, 1), (1, 0)], &[]);
        let policy = SearchPolicy::unlimited().with_max_expansions(budget);
        for strategy in [SearchStrategy::BreadthFirstTree, SearchStrategy::DepthFirstTree] {
            let result = search(&graph, strategy, &policy).expect("search runs");
            prop_assert_eq!(result.termination, TerminationReason::ExpansionBudgetExceeded);
            prop_assert_eq!(result.stats.nodes_expanded, budget);
        }
    }
}

#[test]
fn zero_budget_is_rejected_before_searching() {
    let policy = SearchPolicy::unlimited().with_max_expansions(0);
    let err = search(&chain(), SearchStrategy::BreadthFirstTree, &policy).unwrap_err();
    assert!(matches!(err, SearchError::InvalidPolicy { .. }));
}

// ---------------------------------------------------------------------------
// ACCEPTANCE: FRONTIER-ORDER
// ---------------------------------------------------------------------------

#[test]
fn depth_first_follows_first_action() {
    // 0 -> {1, 2}, 1 -> 3; goals at 2 (shallow) and 3 (under the first action).
    let graph = AdjacencyGraph::from_edges(4, &[(0, 1), (0, 2), (1, 3)], &[2, 3]);
    for strategy in [SearchStrategy::DepthFirstTree, SearchStrategy::DepthFirstGraph] {
        let result = search(&graph, strategy, &SearchPolicy::unlimited()).unwrap();
        assert_eq!(result.solution().unwrap().actions, vec![1, 3], "{strategy}");
    }
    let result = search(&graph, SearchStrategy::BreadthFirstTree, &SearchPolicy::unlimited())
        .unwrap();
    assert_eq!(result.solution().unwrap().actions, vec![2]);
}

#[test]
fn breadth_first_breaks_ties_by_action_order() {
    let graph = AdjacencyGraph::from_edges(3, &[(0, 2), (0, 1)], &[1, 2]);
    let result = search(&graph, SearchStrategy::BreadthFirstGraph, &SearchPolicy::unlimited())
        .unwrap();
    assert_eq!(result.solution().unwrap().actions, vec![2]);
}

// ---------------------------------------------------------------------------
// ACCEPTANCE: DEPTH-LIMIT
// ---------------------------------------------------------------------------

#[test]
fn depth_limit_short_of_goal_is_a_cutoff() {
    let result = search(
        &chain(),
        SearchStrategy::DepthLimited { limit: 2 },
        &SearchPolicy::unlimited(),
    )
    .unwrap();
    assert_eq!(result.termination, TerminationReason::DepthCutoff);
    assert!(!result.is_no_solution());
    assert_eq!(result.stats.depth_cutoffs, 1);
}

#[test]
fn depth_limit_at_goal_depth_finds_it() {
    let result = search(
        &chain(),
        SearchStrategy::DepthLimited { limit: 3 },
        &SearchPolicy::unlimited(),
    )
    .unwrap();
    assert_eq!(result.solution().unwrap().depth, 3);
}

#[test]
fn iterative_deepening_stops_at_max_depth() {
    let result = search(
        &chain(),
        SearchStrategy::IterativeDeepening { max_depth: 2 },
        &SearchPolicy::unlimited(),
    )
    .unwrap();
    assert_eq!(result.termination, TerminationReason::DepthCutoff);
}

#[test]
fn dead_end_without_cutoff_is_no_solution() {
    let graph = AdjacencyGraph::from_edges(3, &[(0, 1)], &[2]);
    let result = search(
        &graph,
        SearchStrategy::DepthLimited { limit: 5 },
        &SearchPolicy::unlimited(),
    )
    .unwrap();
    assert!(result.is_no_solution());
}

#[test]
fn policy_depth_applies_to_informed_search() {
    let policy = SearchPolicy::unlimited().with_max_depth(2);
    for strategy in [
        SearchStrategy::UniformCost,
        SearchStrategy::GreedyBestFirst,
        SearchStrategy::AStar,
    ] {
        let result = search(&chain(), strategy, &policy).unwrap();
        assert_eq!(result.termination, TerminationReason::DepthCutoff, "{strategy}");
    }
}

// ---------------------------------------------------------------------------
// ACCEPTANCE: DEPTH-CAP-COMPLETENESS
// ---------------------------------------------------------------------------

/// `0 -1-> 1 -1-> 2 -1-> 3`, `0 -10-> 3`, `3 -1-> 4`; goal 4.
/// The cheap route reaches 3 at depth 3, the dear one at depth 1.
fn cheap_deep_dear_shallow() -> AdjacencyGraph {
    let mut graph = AdjacencyGraph::new(5);
    for (from, to, cost) in [(0, 1, 1), (1, 2, 1), (2, 3, 1), (0, 3, 10), (3, 4, 1)] {
        graph.add_edge(from, to, cost);
    }
    graph.set_goals(&[4]);
    graph
}

#[test]
fn informed_search_under_cap_keeps_shallower_path() {
    let graph = cheap_deep_dear_shallow();
    let policy = SearchPolicy::unlimited().with_max_depth(3);
    for strategy in [
        SearchStrategy::UniformCost,
        SearchStrategy::GreedyBestFirst,
        SearchStrategy::AStar,
    ] {
        let result = search(&graph, strategy, &policy).unwrap();
        let solution = result
            .solution()
            .unwrap_or_else(|| panic!("{strategy} ended with {:?}", result.termination));
        assert_eq!(solution.actions, vec![3, 4], "{strategy}");
        assert_eq!(solution.path_cost, 11, "{strategy}");
    }

    // Uncapped, the cheap deep route wins.
    let result = search(&graph, SearchStrategy::AStar, &SearchPolicy::unlimited()).unwrap();
    assert_eq!(result.solution().unwrap().actions, vec![1, 2, 3, 4]);
}

#[test]
fn depth_first_graph_under_cap_reopens_shallower_path() {
    let graph =
        AdjacencyGraph::from_edges(6, &[(0, 1), (0, 5), (1, 2), (2, 3), (5, 3), (3, 4)], &[4]);
    let policy = SearchPolicy::unlimited().with_max_depth(3);
    let result = search(&graph, SearchStrategy::DepthFirstGraph, &policy).unwrap();
    assert_eq!(result.solution().unwrap().actions, vec![5, 3, 4]);
    assert_eq!(result.stats.depth_cutoffs, 1);
}

proptest! {
    #[test]
    fn capped_graph_search_finds_goal_iff_within_cap(
        graph in arb_weighted_digraph(),
        cap in 0u32..6,
    ) {
        let within = graph.shortest_depth().is_some_and(|d| d <= cap);
        let policy = SearchPolicy::unlimited().with_max_depth(cap);
        for strategy in GRAPH_STRATEGIES {
            let result = search(&graph, strategy, &policy).expect("search runs");
            prop_assert_eq!(
                result.is_goal_reached(),
                within,
                "{} with cap {} ended with {:?}",
                strategy,
                cap,
                result.termination
            );
            if let Some(solution) = result.solution() {
                prop_assert!(solution.depth <= cap);
            }
        }
    }
}
