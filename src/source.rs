//! Reading diff inputs from readers and files.
//!
//! Lines keep their `\n` terminator so that an edit script replays to the
//! exact input. A final line without terminator is kept as-is.

use crate::diff::{DEFAULT_LEFT_NAME, DEFAULT_RIGHT_NAME, DiffResult, diff_named};
use error_set::error_set;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

/// Name that selects standard input instead of a file.
pub const STDIN_NAME: &str = "-";

error_set! {
    /// Errors from acquiring the lines to compare
    SourceError := {
        /// Source could not be opened
        #[display("Failed to open {name}: {message}")]
        Open { name: String, message: String },
        /// Source could not be read (I/O fault or invalid UTF-8)
        #[display("Failed to read {name}: {message}")]
        Read { name: String, message: String },
        /// Both sides asked for standard input
        #[display("Standard input can only be used for one side")]
        StdinTwice,
    }
}

/// Split a reader into lines, keeping terminators.
///
/// # Errors
///
/// Returns the underlying I/O error, including `InvalidData` for input that
/// is not valid UTF-8.
pub fn read_lines<R: BufRead>(mut reader: R) -> io::Result<Vec<String>> {
    let mut lines = Vec::new();
    loop {
        let mut line = String::new();
        if reader.read_line(&mut line)? == 0 {
            break;
        }
        lines.push(line);
    }
    Ok(lines)
}

fn read_named<R: BufRead>(reader: R, name: &str) -> Result<Vec<String>, SourceError> {
    let lines = read_lines(reader).map_err(|e| SourceError::Read {
        name: name.to_string(),
        message: e.to_string(),
    })?;
    tracing::debug!(name, lines = lines.len(), "read source");
    Ok(lines)
}

/// Diff the contents of two readers using the default side labels.
///
/// # Errors
///
/// Returns [`SourceError::Read`] if either reader fails.
pub fn diff_readers<L, R>(left: L, right: R) -> Result<DiffResult, SourceError>
where
    L: BufRead,
    R: BufRead,
{
    diff_readers_named(left, DEFAULT_LEFT_NAME, right, DEFAULT_RIGHT_NAME)
}

/// Diff the contents of two readers, labelling the sides with the given names.
///
/// # Errors
///
/// Returns [`SourceError::Read`] if either reader fails.
pub fn diff_readers_named<L, R>(
    left: L,
    left_name: &str,
    right: R,
    right_name: &str,
) -> Result<DiffResult, SourceError>
where
    L: BufRead,
    R: BufRead,
{
    let left_lines = read_named(left, left_name)?;
    let right_lines = read_named(right, right_name)?;
    Ok(diff_named(&left_lines, left_name, &right_lines, right_name))
}

/// Diff two files. The paths as given become the side labels.
///
/// Either path may be `-` to read standard input.
///
/// # Errors
///
/// Returns [`SourceError`] if a file cannot be opened or read, or if both
/// paths are `-`.
pub fn diff_files(left: &Path, right: &Path) -> Result<DiffResult, SourceError> {
    if is_stdin(left) && is_stdin(right) {
        return Err(SourceError::StdinTwice);
    }

    let left_name = left.display().to_string();
    let right_name = right.display().to_string();
    let left_lines = load(left, &left_name)?;
    let right_lines = load(right, &right_name)?;
    Ok(diff_named(&left_lines, &left_name, &right_lines, &right_name))
}

fn is_stdin(path: &Path) -> bool {
    path.as_os_str() == STDIN_NAME
}

fn load(path: &Path, name: &str) -> Result<Vec<String>, SourceError> {
    if is_stdin(path) {
        return read_named(io::stdin().lock(), name);
    }
    let file = File::open(path).map_err(|e| SourceError::Open {
        name: name.to_string(),
        message: e.to_string(),
    })?;
    read_named(BufReader::new(file), name)
}
