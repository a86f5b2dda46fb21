//! Line diff data model.
//!
//! A [`DiffResult`] is the edit script produced by the engine in
//! [`myers`]: every line of both inputs classified as [`Op::Equal`],
//! [`Op::Added`] or [`Op::Deleted`], in display order.

pub mod myers;

use std::fmt;

pub use myers::{diff_lines, diff_named};

/// Label used for the left side when no name has been given.
pub const DEFAULT_LEFT_NAME: &str = "l.txt";

/// Label used for the right side when no name has been given.
pub const DEFAULT_RIGHT_NAME: &str = "r.txt";

/// Classification of a single line in an edit script.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Op {
    /// Line is present on both sides
    Equal,
    /// Line exists only on the right side
    Added,
    /// Line exists only on the left side
    Deleted,
}

impl Op {
    /// Display marker for this op (`=`, `<` or `>`).
    #[must_use]
    pub fn marker(self) -> char {
        match self {
            Op::Equal => '=',
            Op::Added => '<',
            Op::Deleted => '>',
        }
    }

    /// Whether a line with this op is taken from the left side.
    #[must_use]
    pub fn on_left(self) -> bool {
        matches!(self, Op::Equal | Op::Deleted)
    }

    /// Whether a line with this op is taken from the right side.
    #[must_use]
    pub fn on_right(self) -> bool {
        matches!(self, Op::Equal | Op::Added)
    }
}

impl fmt::Display for Op {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.marker())
    }
}

/// One entry of an edit script.
///
/// `line` keeps the terminator it had in the source, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineDiff {
    pub op: Op,
    pub line: String,
}

impl LineDiff {
    pub fn new(op: Op, line: impl Into<String>) -> Self {
        Self {
            op,
            line: line.into(),
        }
    }
}

impl fmt::Display for LineDiff {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.op, self.line)
    }
}

/// The outcome of a single diff run.
///
/// Replaying `diffs` (left cursor on `Equal`/`Deleted`, right cursor on
/// `Equal`/`Added`) yields exactly the two compared sequences. The names
/// are display labels only and may be rewritten before formatting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffResult {
    pub left_name: String,
    pub right_name: String,
    pub diffs: Vec<LineDiff>,
}

impl DiffResult {
    /// Lines of the left side, in order.
    pub fn left_lines(&self) -> impl Iterator<Item = &str> + '_ {
        self.diffs
            .iter()
            .filter(|diff| diff.op.on_left())
            .map(|diff| diff.line.as_str())
    }

    /// Lines of the right side, in order.
    pub fn right_lines(&self) -> impl Iterator<Item = &str> + '_ {
        self.diffs
            .iter()
            .filter(|diff| diff.op.on_right())
            .map(|diff| diff.line.as_str())
    }

    /// Number of added plus deleted lines.
    #[must_use]
    pub fn distance(&self) -> usize {
        self.diffs.iter().filter(|diff| diff.op != Op::Equal).count()
    }

    /// True when both sides hold the same lines.
    #[must_use]
    pub fn is_identical(&self) -> bool {
        self.diffs.iter().all(|diff| diff.op == Op::Equal)
    }
}

/// Flat rendering, one entry per line and no color.
impl fmt::Display for DiffResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for diff in &self.diffs {
            write!(f, "{diff}")?;
        }
        Ok(())
    }
}
