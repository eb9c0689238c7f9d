//! Unified error type for automaton configuration and stepping.
//!
//! Configuration mistakes (unknown states, duplicate triggers) are
//! reported eagerly at wiring time. Stepping only fails when an epsilon
//! cascade refuses to settle; everything else is a silent no-op.

use core::fmt;

use crate::trigger::Trigger;

/// Crate-wide error enum, generic over the state and event alphabets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error<S, E> {
    /// `add_state` was given a name that is already registered.
    DuplicateState(S),
    /// A transition endpoint was never registered as a state.
    UnknownState(S),
    /// The source state already has an edge keyed by an equal trigger.
    DuplicateTrigger { from: S, trigger: Trigger<E> },
    /// An epsilon cascade ran past the configured step limit without
    /// settling. Transitions applied before the limit stay applied.
    CascadeLimitExceeded { state: S, limit: usize },
}

impl<S: fmt::Debug, E: fmt::Debug> fmt::Display for Error<S, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateState(state) => {
                write!(f, "state {state:?} is already registered")
            }
            Self::UnknownState(state) => {
                write!(f, "state {state:?} is not registered")
            }
            Self::DuplicateTrigger { from, trigger } => {
                write!(f, "state {from:?} already has a transition on {trigger:?}")
            }
            Self::CascadeLimitExceeded { state, limit } => {
                write!(f, "epsilon cascade exceeded {limit} steps, stopped at {state:?}")
            }
        }
    }
}

impl<S: fmt::Debug, E: fmt::Debug> std::error::Error for Error<S, E> {}
