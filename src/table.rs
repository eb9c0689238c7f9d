//! Transition table: the automaton's static wiring.
//!
//! States and edges are kept in registration order, which is load-bearing
//! in two places: equal-duration timed triggers tie-break on it, and the
//! DOT export emits nodes and edges in it. Lookups are linear scans; the
//! tables this crate targets stay in the tens of states.

use core::time::Duration;

use crate::error::Error;
use crate::trigger::Trigger;

/// One outgoing edge of a state.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Edge<S, E> {
    trigger: Trigger<E>,
    to: S,
}

#[derive(Debug, Clone)]
struct StateEntry<S, E> {
    name: S,
    edges: Vec<Edge<S, E>>,
}

/// Registered states plus their per-trigger destinations.
#[derive(Debug, Clone)]
pub struct TransitionTable<S, E> {
    states: Vec<StateEntry<S, E>>,
}

impl<S, E> TransitionTable<S, E> {
    #[must_use]
    pub fn new() -> Self {
        Self { states: Vec::new() }
    }

    #[must_use]
    pub fn state_count(&self) -> usize {
        self.states.len()
    }

    /// Registered state names, in registration order.
    pub fn states(&self) -> impl Iterator<Item = &S> {
        self.states.iter().map(|entry| &entry.name)
    }
}

impl<S: Eq, E: Eq> TransitionTable<S, E> {
    #[must_use]
    pub fn contains(&self, state: &S) -> bool {
        self.index_of(state).is_some()
    }

    /// Register a new state name.
    pub fn add_state(&mut self, state: S) -> Result<(), Error<S, E>> {
        if self.contains(&state) {
            return Err(Error::DuplicateState(state));
        }
        self.states.push(StateEntry { name: state, edges: Vec::new() });
        Ok(())
    }

    /// Register an edge `from -> to` keyed by `trigger`.
    ///
    /// Both endpoints must already be registered, and `from` must not yet
    /// have an edge keyed by an equal trigger. Distinct triggers of any
    /// kind may share a source state.
    pub fn add_transition(
        &mut self,
        from: S,
        to: S,
        trigger: Trigger<E>,
    ) -> Result<(), Error<S, E>> {
        let Some(index) = self.index_of(&from) else {
            return Err(Error::UnknownState(from));
        };
        if !self.contains(&to) {
            return Err(Error::UnknownState(to));
        }
        let entry = &mut self.states[index];
        if entry.edges.iter().any(|edge| edge.trigger == trigger) {
            return Err(Error::DuplicateTrigger { from, trigger });
        }
        entry.edges.push(Edge { trigger, to });
        Ok(())
    }

    /// Outgoing edges of `state` in registration order, empty for states
    /// that were never registered.
    pub fn transitions_from(&self, state: &S) -> impl Iterator<Item = (&Trigger<E>, &S)> {
        self.index_of(state)
            .into_iter()
            .flat_map(|index| self.states[index].edges.iter())
            .map(|edge| (&edge.trigger, &edge.to))
    }

    /// Destination of the edge keyed by event `event`, if any.
    pub(crate) fn event_target(&self, from: &S, event: &E) -> Option<&S> {
        self.edges_of(from)?.iter().find_map(|edge| match &edge.trigger {
            Trigger::Event(label) if label == event => Some(&edge.to),
            _ => None,
        })
    }

    /// Destination of the epsilon edge of `from`, if any.
    pub(crate) fn epsilon_target(&self, from: &S) -> Option<&S> {
        self.edges_of(from)?
            .iter()
            .find_map(|edge| matches!(edge.trigger, Trigger::Epsilon).then_some(&edge.to))
    }

    /// Smallest timed threshold of `from` already reached after `dwell`
    /// time in the state, together with its destination.
    ///
    /// Ties on equal thresholds go to the earliest-registered edge; the
    /// strict `<` in the fold keeps the first match.
    pub(crate) fn timed_target(&self, from: &S, dwell: Duration) -> Option<(Duration, &S)> {
        let mut best: Option<(Duration, &S)> = None;
        for edge in self.edges_of(from)? {
            if let Trigger::After(threshold) = edge.trigger {
                if threshold <= dwell && best.is_none_or(|(held, _)| threshold < held) {
                    best = Some((threshold, &edge.to));
                }
            }
        }
        best
    }

    fn index_of(&self, state: &S) -> Option<usize> {
        self.states.iter().position(|entry| entry.name == *state)
    }

    fn edges_of(&self, state: &S) -> Option<&[Edge<S, E>]> {
        self.index_of(state).map(|index| self.states[index].edges.as_slice())
    }
}

impl<S, E> Default for TransitionTable<S, E> {
    fn default() -> Self {
        Self::new()
    }
}
