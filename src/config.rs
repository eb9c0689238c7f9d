//! Runtime tuning knobs, serde-loadable.
//!
//! Only the control loop and the cascade guard are configurable; the
//! state graph itself is wired in code.

use core::time::Duration;

use serde::{Deserialize, Serialize};

use crate::automaton::DEFAULT_CASCADE_LIMIT;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
    /// Blocking-receive timeout of the control loop, in milliseconds.
    /// Timed transitions fire on this cadence, so it bounds their latency.
    pub poll_interval_ms: u64,
    /// Epsilon steps allowed per stepping call before the cascade is
    /// declared runaway.
    pub cascade_limit: usize,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: 100,
            cascade_limit: DEFAULT_CASCADE_LIMIT,
        }
    }
}

impl RuntimeConfig {
    #[must_use]
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}
