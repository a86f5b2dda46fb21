//! Minimal line-based diffs.
//!
//! [`diff`] computes a shortest edit script between two line sequences,
//! [`source`] reads those sequences from readers or files, and [`print`]
//! renders results either flat or as unified diff hunks.
//!
//! # Examples
//! ```
//! use line_diff::{Printer, diff_lines};
//!
//! let result = diff_lines(
//!     &["removed line\n", "unchanged line\n"],
//!     &["unchanged line\n", "added line\n"],
//! );
//! let mut printer = Printer::new(Vec::new());
//! printer.print(&result).unwrap();
//! assert_eq!(
//!     String::from_utf8(printer.into_inner()).unwrap(),
//!     "> removed line\n= unchanged line\n< added line\n"
//! );
//! ```

use error_set::error_set;

pub mod diff;
pub mod parse;
pub mod print;
pub mod source;

pub use diff::{DiffResult, LineDiff, Op, diff_lines, diff_named};
pub use parse::{ParseError, parse_colors};
pub use print::{Colors, Formatter, PlainFormatter, Printer, UnifiedFormatter};
pub use source::{SourceError, diff_files, diff_readers, diff_readers_named, read_lines};

error_set! {
    /// Top-level error for line-diff operations
    LineDiffError := {
        SourceError(SourceError),
        ParseError(ParseError),
    } || OutputError

    /// Errors from writing rendered output
    OutputError := {
        #[display("Failed to write diff output: {message}")]
        Write { message: String },
    }
}

impl From<std::io::Error> for OutputError {
    fn from(e: std::io::Error) -> Self {
        OutputError::Write {
            message: e.to_string(),
        }
    }
}
