//! Trigger kinds for automaton transitions.
//!
//! Every edge in the transition table is keyed by exactly one [`Trigger`].
//! The three kinds live in disjoint namespaces: an event label can never
//! collide with a time threshold, and epsilon is its own thing entirely.

use core::fmt;
use core::time::Duration;

/// What causes a transition to fire.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Trigger<E> {
    /// A discrete event label, matched by [`feed`](crate::Automaton::feed).
    Event(E),
    /// An elapsed-time threshold, matched by [`tick`](crate::Automaton::tick)
    /// once the time spent in the source state reaches the threshold.
    After(Duration),
    /// Matches spontaneously, as soon as the source state is entered.
    Epsilon,
}

impl<E> Trigger<E> {
    /// Convenience constructor for sub-second thresholds written as seconds.
    ///
    /// # Panics
    ///
    /// Panics if `secs` is negative or not finite, per
    /// [`Duration::from_secs_f64`].
    #[must_use]
    pub fn after_secs(secs: f64) -> Self {
        Self::After(Duration::from_secs_f64(secs))
    }

    /// `true` for the [`Trigger::After`] kind.
    #[must_use]
    pub fn is_timed(&self) -> bool {
        matches!(self, Self::After(_))
    }
}

impl<E: fmt::Display> fmt::Display for Trigger<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Event(label) => write!(f, "{label}"),
            Self::After(threshold) => write!(f, "{:.2}s", threshold.as_secs_f64()),
            Self::Epsilon => write!(f, "\u{03b5}"),
        }
    }
}
