//! Integration test driver for `tests/integration/` submodule.
//!
//! Each `mod` below maps to a file that exercises the engine through its
//! public API, the way the demo binary uses it. All tests run on the
//! host with no external services required.

mod automaton_tests;
