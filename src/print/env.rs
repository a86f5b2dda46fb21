//! Environment lookups kept out of the formatters.

use crate::diff::{DEFAULT_LEFT_NAME, DEFAULT_RIGHT_NAME};
use crate::source::STDIN_NAME;
use chrono::{DateTime, FixedOffset, Local};
use std::fs;

/// Terminal and filesystem capabilities a printer depends on.
pub trait Environment {
    /// Whether color output should be used on a stream.
    fn supports_color(&self, stream_is_terminal: bool) -> bool;

    /// Modification time of the named source, if it has one.
    fn modified_at(&self, name: &str) -> Option<DateTime<FixedOffset>>;
}

/// The process environment and local filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemEnvironment;

impl Environment for SystemEnvironment {
    fn supports_color(&self, stream_is_terminal: bool) -> bool {
        if !stream_is_terminal {
            return false;
        }
        if std::env::var_os("NO_COLOR").is_some_and(|v| !v.is_empty()) {
            return false;
        }
        std::env::var("TERM").map_or(true, |term| term != "dumb")
    }

    fn modified_at(&self, name: &str) -> Option<DateTime<FixedOffset>> {
        if name == DEFAULT_LEFT_NAME || name == DEFAULT_RIGHT_NAME || name == STDIN_NAME {
            return None;
        }
        match fs::metadata(name).and_then(|meta| meta.modified()) {
            Ok(time) => Some(DateTime::<Local>::from(time).fixed_offset()),
            Err(e) => {
                tracing::debug!(name, error = %e, "no modification time");
                None
            }
        }
    }
}
