//! Timed finite-state automaton engine.
//!
//! Transitions fire from two sources: discrete events delivered through
//! [`Automaton::feed`], and time spent in a state, delivered through
//! [`Automaton::tick`] (or its wall-clock wrapper [`Automaton::poll`]).
//! Epsilon edges resolve spontaneously, in a bounded cascade, inside the
//! stepping call that exposed them. Listeners observe every applied
//! transition synchronously and in registration order.
//!
//! # Example
//!
//! ```rust
//! use std::time::Duration;
//! use timedfa::{Automaton, Trigger};
//!
//! let mut tfa = Automaton::new("idle");
//! tfa.add_state("armed")?;
//! tfa.add_transition("idle", "armed", Trigger::Event("arm"))?;
//! tfa.add_transition("armed", "idle", Trigger::After(Duration::from_millis(500)))?;
//!
//! tfa.feed("arm")?;
//! assert_eq!(*tfa.current_state(), "armed");
//!
//! tfa.tick(Duration::from_secs(1))?;
//! assert_eq!(*tfa.current_state(), "idle");
//! # Ok::<(), timedfa::Error<&'static str, &'static str>>(())
//! ```
//!
//! For event sources living on other threads, [`ControlLoop`] owns the
//! automaton and drains a crossbeam channel, polling for timed
//! transitions whenever the channel goes quiet.

#![deny(unused_must_use)]

pub mod automaton;
pub mod config;
pub mod error;
pub mod listener;
pub mod runtime;
pub mod table;
pub mod trigger;

mod graph;

// Re-export the working set, module paths stay available for the rest.
pub use automaton::{Automaton, DEFAULT_CASCADE_LIMIT};
pub use config::RuntimeConfig;
pub use error::Error;
pub use listener::{ListenerRegistry, StateChangeListener};
pub use runtime::ControlLoop;
pub use table::TransitionTable;
pub use trigger::Trigger;
