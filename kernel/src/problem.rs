//! The problem contracts every domain implements.
//!
//! Domains supply states, actions and transitions; the engine supplies
//! traversal. All methods take `&self`: a problem is immutable for the
//! duration of a run, and the engine relies on referential transparency to
//! deduplicate safely.

use std::hash::Hash;

use rand::Rng;
use thiserror::Error;

/// Path cost unit. Unsigned, so `path_cost >= 0` holds by construction.
pub type Cost = u64;

/// Domain contract violations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProblemError {
    /// `result` was asked to apply an action that `actions` would not return.
    #[error("invalid action `{action}` for the current state")]
    InvalidAction { action: String },
}

/// Contract for systematic (tree/graph, uninformed/informed) search.
///
/// # Contract
///
/// - `actions` must be finite and deterministic; its order is the
///   child-expansion order and decides ties between equal-depth paths.
/// - `result` must be deterministic and must return a *new* state.
/// - No method may have side effects.
pub trait Problem {
    /// Immutable configuration of the domain.
    type State: Clone + Eq + Hash;
    /// A move between states.
    type Action: Clone;

    /// The state every run starts from.
    fn initial_state(&self) -> Self::State;

    /// Legal actions from `state`, in expansion order.
    fn actions(&self, state: &Self::State) -> Vec<Self::Action>;

    /// Apply `action` to `state`.
    ///
    /// # Errors
    ///
    /// Returns [`ProblemError::InvalidAction`] if `action` is not legal in
    /// `state`. The engine never triggers this itself.
    fn result(&self, state: &Self::State, action: &Self::Action)
        -> Result<Self::State, ProblemError>;

    fn goal_test(&self, state: &Self::State) -> bool;

    /// Cost of one transition. Defaults to 1.
    fn step_cost(&self, _state: &Self::State, _action: &Self::Action, _next: &Self::State) -> Cost {
        1
    }

    /// Estimated remaining cost to a goal. Defaults to 0, which reduces A*
    /// to uniform-cost search. Must never overestimate if optimality matters.
    fn heuristic(&self, _state: &Self::State) -> Cost {
        0
    }
}

/// Contract for value-maximizing local search.
pub trait LocalProblem {
    type State: Clone + Eq + Hash;

    fn initial_state(&self) -> Self::State;

    /// Neighbourhood of `state`. May be empty.
    fn successors(&self, state: &Self::State) -> Vec<Self::State>;

    /// Objective to maximize.
    fn value(&self, state: &Self::State) -> i64;

    /// Starting point for a random restart. Defaults to the initial state.
    fn restart_state<R: Rng + ?Sized>(&self, _rng: &mut R) -> Self::State {
        self.initial_state()
    }
}
