//! Shortest edit script search (Myers, "An O(ND) Difference Algorithm").
//!
//! The search walks the edit graph one edit distance `d` at a time and
//! records the furthest reaching point of every diagonal `k = x - y` in a
//! [`Trace`]. Once the bottom-right corner is reached the trace is walked
//! backwards to rebuild the script.
//!
//! Ties between equally short scripts are broken the same way on the way
//! forward and backward: a downward move (addition) from diagonal `k + 1`
//! wins unless diagonal `k - 1` reaches strictly further.

use super::{DEFAULT_LEFT_NAME, DEFAULT_RIGHT_NAME, DiffResult, LineDiff, Op};

/// Diff two line sequences using the default side labels.
///
/// # Examples
/// ```
/// use line_diff::diff::{Op, diff_lines};
///
/// let result = diff_lines(&["a\n", "b\n"], &["b\n", "c\n"]);
/// let ops: Vec<Op> = result.diffs.iter().map(|d| d.op).collect();
/// assert_eq!(ops, vec![Op::Deleted, Op::Equal, Op::Added]);
/// ```
pub fn diff_lines<L, R>(left: &[L], right: &[R]) -> DiffResult
where
    L: AsRef<str>,
    R: AsRef<str>,
{
    diff_named(left, DEFAULT_LEFT_NAME, right, DEFAULT_RIGHT_NAME)
}

/// Diff two line sequences, labelling the sides with the given names.
pub fn diff_named<L, R>(left: &[L], left_name: &str, right: &[R], right_name: &str) -> DiffResult
where
    L: AsRef<str>,
    R: AsRef<str>,
{
    let mut script = Script::with_capacity(left.len() + right.len());

    if !script.fast_path(left, right) {
        script.search(left, right);
    }

    DiffResult {
        left_name: left_name.to_string(),
        right_name: right_name.to_string(),
        diffs: script.diffs,
    }
}

/// Furthest reaching x per diagonal, one row per edit distance.
///
/// Rows have a fixed width of `2 * max + 1`; diagonal `k` lives at column
/// `offset + k` with `offset == max`.
struct Trace {
    offset: isize,
    width: usize,
    cells: Vec<isize>,
}

impl Trace {
    fn new(max: usize) -> Self {
        Self {
            offset: max as isize,
            width: 2 * max + 1,
            cells: Vec::new(),
        }
    }

    fn push(&mut self, row: &[isize]) {
        debug_assert_eq!(row.len(), self.width);
        self.cells.extend_from_slice(row);
    }

    fn depth(&self) -> usize {
        self.cells.len() / self.width
    }

    fn row(&self, d: usize) -> &[isize] {
        &self.cells[d * self.width..(d + 1) * self.width]
    }

    fn column(&self, k: isize) -> usize {
        (self.offset + k) as usize
    }
}

/// Whether the path onto diagonal `k` at distance `d` comes down from `k + 1`.
fn moves_down(v: &[isize], column: usize, k: isize, d: isize) -> bool {
    k == -d || (k != d && v[column - 1] < v[column + 1])
}

/// Edit script under construction.
struct Script {
    diffs: Vec<LineDiff>,
}

impl Script {
    fn with_capacity(capacity: usize) -> Self {
        Self {
            diffs: Vec::with_capacity(capacity),
        }
    }

    fn push(&mut self, op: Op, line: &str) {
        self.diffs.push(LineDiff::new(op, line));
    }

    /// Handle inputs where one side is empty. Returns `true` when done.
    fn fast_path<L, R>(&mut self, left: &[L], right: &[R]) -> bool
    where
        L: AsRef<str>,
        R: AsRef<str>,
    {
        if left.is_empty() {
            tracing::trace!(added = right.len(), "left side empty");
            for line in right {
                self.push(Op::Added, line.as_ref());
            }
            return true;
        }
        if right.is_empty() {
            tracing::trace!(deleted = left.len(), "right side empty");
            for line in left {
                self.push(Op::Deleted, line.as_ref());
            }
            return true;
        }
        false
    }

    fn search<L, R>(&mut self, left: &[L], right: &[R])
    where
        L: AsRef<str>,
        R: AsRef<str>,
    {
        let l = left.len() as isize;
        let r = right.len() as isize;
        let max = left.len() + right.len();
        let mut trace = Trace::new(max);
        let mut v = vec![0isize; trace.width];

        for d in 0..=max as isize {
            trace.push(&v);
            for k in (-d..=d).step_by(2) {
                let column = trace.column(k);
                let mut x = if moves_down(&v, column, k, d) {
                    v[column + 1]
                } else {
                    v[column - 1] + 1
                };
                let mut y = x - k;
                while x < l && y < r && left[x as usize].as_ref() == right[y as usize].as_ref() {
                    x += 1;
                    y += 1;
                }
                v[column] = x;
                if x >= l && y >= r {
                    tracing::debug!(
                        left = left.len(),
                        right = right.len(),
                        distance = d,
                        "found shortest edit script"
                    );
                    self.backtrack(left, right, &trace);
                    return;
                }
            }
        }

        unreachable!("edit graph search ended without reaching ({l}, {r})");
    }

    fn backtrack<L, R>(&mut self, left: &[L], right: &[R], trace: &Trace)
    where
        L: AsRef<str>,
        R: AsRef<str>,
    {
        let mut x = left.len() as isize;
        let mut y = right.len() as isize;

        for d in (0..trace.depth()).rev() {
            let v = trace.row(d);
            let d = d as isize;
            let k = x - y;
            let column = trace.column(k);
            let prev_k = if moves_down(v, column, k, d) {
                k + 1
            } else {
                k - 1
            };
            let prev_x = v[trace.column(prev_k)];
            let prev_y = prev_x - prev_k;

            while x > prev_x && y > prev_y {
                x -= 1;
                y -= 1;
                self.push(Op::Equal, left[x as usize].as_ref());
            }

            if d > 0 {
                if prev_x < x {
                    x -= 1;
                    self.push(Op::Deleted, left[x as usize].as_ref());
                } else {
                    y -= 1;
                    self.push(Op::Added, right[y as usize].as_ref());
                }
            }
        }

        self.diffs.reverse();
    }
}
