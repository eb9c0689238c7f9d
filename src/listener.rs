//! Transition observers.
//!
//! Listeners are the only outward-facing seam of the core: every applied
//! transition is reported synchronously, on the caller's thread, in
//! listener registration order. A listener that needs to react by feeding
//! the automaton again must queue the event externally; the `&mut` borrow
//! held during notification rules out reentrant stepping.

use crate::trigger::Trigger;

/// Observer called once per applied transition.
pub trait StateChangeListener<S, E> {
    /// `from` and `to` are the states around the transition; `trigger` is
    /// what fired it. Self-loop transitions report `from == to`.
    fn on_transition(&mut self, from: &S, to: &S, trigger: &Trigger<E>);
}

/// Ordered collection of boxed listeners.
pub struct ListenerRegistry<S, E> {
    listeners: Vec<Box<dyn StateChangeListener<S, E>>>,
}

impl<S, E> ListenerRegistry<S, E> {
    #[must_use]
    pub fn new() -> Self {
        Self { listeners: Vec::new() }
    }

    pub fn add<L>(&mut self, listener: L)
    where
        L: StateChangeListener<S, E> + 'static,
    {
        self.listeners.push(Box::new(listener));
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    /// Deliver one transition to every listener, oldest registration first.
    pub(crate) fn notify_all(&mut self, from: &S, to: &S, trigger: &Trigger<E>) {
        for listener in &mut self.listeners {
            listener.on_transition(from, to, trigger);
        }
    }
}

impl<S, E> Default for ListenerRegistry<S, E> {
    fn default() -> Self {
        Self::new()
    }
}
