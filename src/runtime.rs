//! The owning control loop: one thread drains an event channel into the
//! automaton.
//!
//! ```text
//!  producer threads ──send──▶ channel ──recv_timeout──▶ ControlLoop
//!                                                          │
//!                                            event ──▶ feed │ timeout ──▶ poll
//! ```
//!
//! The loop blocks on the channel with a timeout of `poll_interval`; a
//! received event is fed immediately, a timeout turns into a wall-clock
//! `poll`. Timed transitions therefore fire up to one poll interval late
//! (soft real-time). The loop exits cleanly once every sender is dropped.

use core::fmt::Debug;
use core::time::Duration;

use crossbeam::channel::{Receiver, RecvTimeoutError};
use log::{debug, info};

use crate::automaton::Automaton;
use crate::config::RuntimeConfig;
use crate::error::Error;

pub struct ControlLoop<S, E> {
    automaton: Automaton<S, E>,
    events: Receiver<E>,
    poll_interval: Duration,
}

impl<S, E> ControlLoop<S, E>
where
    S: Clone + Eq + Debug,
    E: Clone + Eq + Debug,
{
    /// Take ownership of a wired automaton and the receiving half of an
    /// event channel. The config's cascade limit is applied here.
    pub fn new(mut automaton: Automaton<S, E>, events: Receiver<E>, config: &RuntimeConfig) -> Self {
        automaton.set_cascade_limit(config.cascade_limit);
        Self {
            automaton,
            events,
            poll_interval: config.poll_interval(),
        }
    }

    #[must_use]
    pub fn automaton(&self) -> &Automaton<S, E> {
        &self.automaton
    }

    /// Run until every sender is gone or stepping fails.
    pub fn run(&mut self) -> Result<(), Error<S, E>> {
        info!("control loop running, poll interval {:?}", self.poll_interval);
        loop {
            match self.events.recv_timeout(self.poll_interval) {
                Ok(event) => {
                    debug!("event: {:?}", event);
                    self.automaton.feed(event)?;
                }
                Err(RecvTimeoutError::Timeout) => {
                    self.automaton.poll()?;
                }
                Err(RecvTimeoutError::Disconnected) => {
                    info!("event channel closed, control loop exiting");
                    return Ok(());
                }
            }
        }
    }

    /// Hand the automaton back for inspection after the loop ends.
    #[must_use]
    pub fn into_automaton(self) -> Automaton<S, E> {
        self.automaton
    }
}
