//! The one error kind visible at the core boundary: malformed DIMACS input.
//! Mirrors the teacher's habit of hand-written `Display`/`Error` impls
//! rather than a derive-macro crate (no `thiserror`/`anyhow` anywhere in
//! the retrieved corpus — see `SPEC_FULL.md`).

use std::fmt;

/// Raised by `dimacs::parse` when the header is absent or ill-formed, a
/// token cannot be converted to a literal, or the input ends before the
/// declared number of clauses has been read. Never raised by the engine.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MalformedInput {
    pub line: usize,
    pub reason: String,
}

impl MalformedInput {
    pub fn new(line: usize, reason: impl Into<String>) -> MalformedInput {
        MalformedInput { line, reason: reason.into() }
    }
}

impl fmt::Display for MalformedInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: {}", self.line, self.reason)
    }
}

impl std::error::Error for MalformedInput {}
