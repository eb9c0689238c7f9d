//! The timed finite-state automaton core.
//!
//! ```text
//!   feed(event) ──────┐                  ┌──▶ log target "timedfa"
//!                     ▼                  │
//!              ┌──────────────┐   apply  │
//!              │  Automaton   │──────────┼──▶ listeners, in
//!              └──────────────┘          │    registration order
//!                     ▲                  │
//!   tick(elapsed) ────┘◀─ poll()         └──▶ bounded ε-cascade
//! ```
//!
//! Stepping is synchronous and single-threaded: `feed` and `tick` apply at
//! most one triggered transition, then resolve any epsilon chain before
//! returning. Listeners run on the calling thread, inside the stepping
//! call.
//!
//! ## Clocks
//!
//! The automaton never reads the wall clock on its own. `tick(elapsed)`
//! accumulates caller-provided time into a virtual clock; `poll()` is the
//! convenience that measures real elapsed time since the previous `poll`
//! and forwards it to `tick`. Mixing `tick` and `poll` on one automaton
//! works but makes the virtual clock a blend of both sources.

use core::fmt::{Debug, Display};
use core::mem;
use core::time::Duration;
use std::time::Instant;

use log::{info, warn};

use crate::error::Error;
use crate::graph;
use crate::listener::{ListenerRegistry, StateChangeListener};
use crate::table::TransitionTable;
use crate::trigger::Trigger;

/// Epsilon steps allowed after one triggered transition before
/// [`Error::CascadeLimitExceeded`] is reported.
pub const DEFAULT_CASCADE_LIMIT: usize = 32;

/// A finite-state automaton whose transitions fire on discrete events or
/// on time spent in a state.
pub struct Automaton<S, E> {
    table: TransitionTable<S, E>,
    current: S,
    start: S,
    /// Virtual clock, total time fed through `tick`.
    clock: Duration,
    /// `clock` value when the last transition was applied. Never exceeds
    /// `clock`.
    entered_at: Duration,
    /// Wall-clock anchor for `poll` deltas.
    last_poll: Instant,
    listeners: ListenerRegistry<S, E>,
    cascade_limit: usize,
}

impl<S, E> Automaton<S, E>
where
    S: Clone + Eq + Debug,
    E: Clone + Eq + Debug,
{
    /// Create an automaton sitting in `start`, which is registered
    /// implicitly.
    #[must_use]
    pub fn new(start: S) -> Self {
        let mut table = TransitionTable::new();
        table
            .add_state(start.clone())
            .expect("a fresh table accepts the start state");
        Self {
            table,
            current: start.clone(),
            start,
            clock: Duration::ZERO,
            entered_at: Duration::ZERO,
            last_poll: Instant::now(),
            listeners: ListenerRegistry::new(),
            cascade_limit: DEFAULT_CASCADE_LIMIT,
        }
    }

    // ── Wiring ───────────────────────────────────────────────────────

    /// Register a state name. Fails on duplicates.
    pub fn add_state(&mut self, state: S) -> Result<(), Error<S, E>> {
        self.table.add_state(state)
    }

    /// Register a transition between two known states. At most one edge
    /// per (source, trigger) pair.
    pub fn add_transition(
        &mut self,
        from: S,
        to: S,
        trigger: Trigger<E>,
    ) -> Result<(), Error<S, E>> {
        self.table.add_transition(from, to, trigger)
    }

    /// Register a transition observer. Listeners are notified in
    /// registration order, synchronously, once per applied transition.
    pub fn add_listener<L>(&mut self, listener: L)
    where
        L: StateChangeListener<S, E> + 'static,
    {
        self.listeners.add(listener);
    }

    /// Cap the number of epsilon steps resolved per stepping call.
    pub fn set_cascade_limit(&mut self, limit: usize) {
        self.cascade_limit = limit;
    }

    // ── Stepping ─────────────────────────────────────────────────────

    /// Deliver a discrete event. If the current state has an edge keyed
    /// by `event` the transition applies and any epsilon chain resolves;
    /// otherwise the event is ignored without side effects.
    pub fn feed(&mut self, event: E) -> Result<(), Error<S, E>> {
        let Some(to) = self.table.event_target(&self.current, &event) else {
            return Ok(());
        };
        let to = to.clone();
        self.apply(to, Trigger::Event(event));
        self.cascade()
    }

    /// Resolve pending epsilon edges without delivering an event. Useful
    /// when the start state itself carries an epsilon edge.
    pub fn feed_epsilon(&mut self) -> Result<(), Error<S, E>> {
        self.cascade()
    }

    /// Advance the virtual clock by `elapsed` and fire at most one timed
    /// transition: the one with the smallest threshold already covered by
    /// the time spent in the current state. Larger thresholds that were
    /// also covered do not fire; they restart in the destination state.
    pub fn tick(&mut self, elapsed: Duration) -> Result<(), Error<S, E>> {
        self.clock = self.clock.saturating_add(elapsed);
        let dwell = self.clock - self.entered_at;
        let Some((threshold, to)) = self.table.timed_target(&self.current, dwell) else {
            return Ok(());
        };
        let to = to.clone();
        self.apply(to, Trigger::After(threshold));
        self.cascade()
    }

    /// `tick` with wall-clock time measured since the previous `poll`
    /// (or since construction, for the first call).
    pub fn poll(&mut self) -> Result<(), Error<S, E>> {
        let now = Instant::now();
        let elapsed = now.duration_since(self.last_poll);
        self.last_poll = now;
        self.tick(elapsed)
    }

    // ── Observation ──────────────────────────────────────────────────

    #[must_use]
    pub fn current_state(&self) -> &S {
        &self.current
    }

    #[must_use]
    pub fn start_state(&self) -> &S {
        &self.start
    }

    /// Total time accumulated through `tick` and `poll`.
    #[must_use]
    pub fn clock(&self) -> Duration {
        self.clock
    }

    /// Virtual time spent in the current state so far.
    #[must_use]
    pub fn time_in_state(&self) -> Duration {
        self.clock - self.entered_at
    }

    #[must_use]
    pub fn cascade_limit(&self) -> usize {
        self.cascade_limit
    }

    #[must_use]
    pub fn table(&self) -> &TransitionTable<S, E> {
        &self.table
    }

    /// Graphviz DOT rendering of the whole machine, with the start state
    /// double-circled and the current state filled.
    #[must_use]
    pub fn dot(&self) -> String
    where
        S: Display,
        E: Display,
    {
        graph::render(&self.table, &self.start, &self.current)
    }

    // ── Internals ────────────────────────────────────────────────────

    /// Commit one transition: move the state pointer, stamp the clock,
    /// notify every listener.
    fn apply(&mut self, to: S, trigger: Trigger<E>) {
        let from = mem::replace(&mut self.current, to);
        self.entered_at = self.clock;
        info!("transition {:?} -> {:?} on {:?}", from, self.current, trigger);
        self.listeners.notify_all(&from, &self.current, &trigger);
    }

    /// Follow epsilon edges until a state without one is reached, up to
    /// `cascade_limit` steps. On overrun the already-applied steps stay
    /// applied and the automaton rests wherever the limit caught it.
    fn cascade(&mut self) -> Result<(), Error<S, E>> {
        let mut depth = 0usize;
        while let Some(to) = self.table.epsilon_target(&self.current).cloned() {
            if depth >= self.cascade_limit {
                warn!(
                    "epsilon cascade stopped after {} steps at {:?}",
                    depth, self.current
                );
                return Err(Error::CascadeLimitExceeded {
                    state: self.current.clone(),
                    limit: self.cascade_limit,
                });
            }
            depth += 1;
            self.apply(to, Trigger::Epsilon);
        }
        Ok(())
    }
}
