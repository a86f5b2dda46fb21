//! Unified diff output: changes grouped into hunks with surrounding context.
//!
//! ```text
//! --- l.txt	1970-01-01 00:00:00.000000000 +0000
//! +++ r.txt	1970-01-01 00:00:00.000000000 +0000
//! @@ -1,3 +1,4 @@
//! = a
//! < b
//! = c
//! = d
//! ```

use super::{Formatter, Role, Sink};
use crate::diff::{DiffResult, LineDiff, Op};
use chrono::{DateTime, Utc};
use std::fmt;
use std::io;
use std::ops::Range;

/// Context lines shown around each change unless configured otherwise.
pub const DEFAULT_UNIFIED_CONTEXT: usize = 3;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.9f %z";

/// A contiguous block of the edit script with its line ranges.
///
/// Starts are zero-based; lengths count the lines shown from each side,
/// context included.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hunk {
    pub left_start: usize,
    pub left_len: usize,
    pub right_start: usize,
    pub right_len: usize,
    /// Indices of the edit script entries shown in this hunk
    pub entries: Range<usize>,
}

impl fmt::Display for Hunk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "@@ -{},{} +{},{} @@",
            self.left_start + 1,
            self.left_len,
            self.right_start + 1,
            self.right_len
        )
    }
}

/// Group an edit script into hunks with up to `context` unchanged lines
/// before and after every change.
///
/// Changes separated by at most `2 * context` unchanged lines share a hunk.
#[must_use]
pub fn hunks(diffs: &[LineDiff], context: usize) -> Vec<Hunk> {
    let mut scan = HunkScan::new(context);
    let mut hunks = Vec::new();

    for (index, diff) in diffs.iter().enumerate() {
        if scan.in_hunk {
            scan.advance_inside(diff.op);
            if !scan.in_hunk {
                hunks.push(scan.close(diffs, true));
            }
        } else {
            scan.advance_outside(diff.op);
            if scan.in_hunk {
                scan.hunk_index = index.saturating_sub(context);
            }
        }
    }

    if scan.in_hunk {
        hunks.push(scan.close(diffs, false));
    }

    hunks
}

/// Scratch state of a single grouping pass.
struct HunkScan {
    context: usize,
    left_line: usize,
    right_line: usize,
    in_hunk: bool,
    hunk_index: usize,
    eql_run: usize,
    start_left: usize,
    start_right: usize,
}

impl HunkScan {
    fn new(context: usize) -> Self {
        Self {
            context,
            left_line: 0,
            right_line: 0,
            in_hunk: false,
            hunk_index: 0,
            eql_run: 0,
            start_left: 0,
            start_right: 0,
        }
    }

    fn advance(&mut self, op: Op) {
        if op.on_left() {
            self.left_line += 1;
        }
        if op.on_right() {
            self.right_line += 1;
        }
    }

    fn advance_outside(&mut self, op: Op) {
        if op != Op::Equal {
            self.in_hunk = true;
            self.eql_run = 0;
            self.start_left = self.left_line.saturating_sub(self.context);
            self.start_right = self.right_line.saturating_sub(self.context);
        }
        self.advance(op);
    }

    fn advance_inside(&mut self, op: Op) {
        if op == Op::Equal {
            self.eql_run += 1;
            self.in_hunk = self.eql_run <= 2 * self.context;
        } else {
            self.eql_run = 0;
        }
        self.advance(op);
    }

    /// Build the hunk ending at the current position.
    ///
    /// A hunk closed by a long run of unchanged lines has consumed
    /// `context + 1` lines past its trailing context; those are trimmed.
    fn close(&self, diffs: &[LineDiff], trim: bool) -> Hunk {
        let overshoot = if trim { self.context + 1 } else { 0 };
        let left_len = self.left_line - self.start_left - overshoot;
        let right_len = self.right_line - self.start_right - overshoot;

        let mut remaining_left = left_len;
        let mut remaining_right = right_len;
        let mut end = self.hunk_index;
        for diff in &diffs[self.hunk_index..] {
            if remaining_left == 0 && remaining_right == 0 {
                break;
            }
            if diff.op.on_left() {
                remaining_left = remaining_left.saturating_sub(1);
            }
            if diff.op.on_right() {
                remaining_right = remaining_right.saturating_sub(1);
            }
            end += 1;
        }

        let hunk = Hunk {
            left_start: self.start_left,
            left_len,
            right_start: self.start_right,
            right_len,
            entries: self.hunk_index..end,
        };
        tracing::trace!(%hunk, entries = ?hunk.entries, "closed hunk");
        hunk
    }
}

/// Formatter producing unified diff hunks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnifiedFormatter {
    context: usize,
}

impl UnifiedFormatter {
    #[must_use]
    pub fn new(context: usize) -> Self {
        Self { context }
    }

    /// Like [`UnifiedFormatter::new`], falling back to
    /// [`DEFAULT_UNIFIED_CONTEXT`] for negative values.
    #[must_use]
    pub fn from_signed(context: i64) -> Self {
        Self::new(usize::try_from(context).unwrap_or(DEFAULT_UNIFIED_CONTEXT))
    }

    #[must_use]
    pub fn context(&self) -> usize {
        self.context
    }

    fn format_header(&self, sink: &mut Sink<'_>, result: &DiffResult) -> io::Result<()> {
        let left_time = modification_time(sink, &result.left_name);
        let right_time = modification_time(sink, &result.right_name);
        sink.write_styled(
            Role::Header,
            format_args!("--- {}\t{}", result.left_name, left_time),
        )?;
        sink.write_styled(
            Role::Header,
            format_args!("+++ {}\t{}", result.right_name, right_time),
        )
    }
}

impl Default for UnifiedFormatter {
    fn default() -> Self {
        Self::new(DEFAULT_UNIFIED_CONTEXT)
    }
}

impl Formatter for UnifiedFormatter {
    fn format(&self, sink: &mut Sink<'_>, result: &DiffResult) -> io::Result<()> {
        self.format_header(sink, result)?;
        for hunk in hunks(&result.diffs, self.context) {
            sink.write_styled(Role::Label, format_args!("{hunk}"))?;
            for diff in &result.diffs[hunk.entries] {
                sink.write_op(diff)?;
            }
        }
        Ok(())
    }
}

/// Formatted modification time, or the Unix epoch if there is none.
fn modification_time(sink: &Sink<'_>, name: &str) -> String {
    sink.env()
        .modified_at(name)
        .unwrap_or_else(|| DateTime::<Utc>::UNIX_EPOCH.fixed_offset())
        .format(TIMESTAMP_FORMAT)
        .to_string()
}
