//! Graphviz DOT export of the transition table.
//!
//! The output is plain `dot` source, one node line per state and one edge
//! line per transition, in registration order:
//!
//! ```text
//! digraph {
//!     "idle" [shape = doublecircle, style = filled];
//!     "armed";
//!     "idle" -> "armed" [label = "arm"];
//!     "armed" -> "idle" [label = "0.50s"];
//! }
//! ```
//!
//! The start state is drawn as a double circle, the current state filled.
//! Epsilon edges are labelled with the epsilon glyph.

use core::fmt::Display;

use crate::table::TransitionTable;

pub(crate) fn render<S, E>(table: &TransitionTable<S, E>, start: &S, current: &S) -> String
where
    S: Display + Eq,
    E: Display + Eq,
{
    let mut out = String::from("digraph {\n");
    for state in table.states() {
        let mut attrs: Vec<&str> = Vec::new();
        if state == start {
            attrs.push("shape = doublecircle");
        }
        if state == current {
            attrs.push("style = filled");
        }
        if attrs.is_empty() {
            out.push_str(&format!("    {};\n", quoted(state)));
        } else {
            out.push_str(&format!("    {} [{}];\n", quoted(state), attrs.join(", ")));
        }
    }
    for from in table.states() {
        for (trigger, to) in table.transitions_from(from) {
            out.push_str(&format!(
                "    {} -> {} [label = {}];\n",
                quoted(from),
                quoted(to),
                quoted(trigger)
            ));
        }
    }
    out.push('}');
    out.push('\n');
    out
}

/// Render `value` as a double-quoted DOT identifier, escaping quotes and
/// backslashes.
fn quoted<T: Display + ?Sized>(value: &T) -> String {
    let raw = value.to_string();
    let mut escaped = String::with_capacity(raw.len() + 2);
    escaped.push('"');
    for c in raw.chars() {
        if c == '"' || c == '\\' {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped.push('"');
    escaped
}
