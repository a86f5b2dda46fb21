//! Rendering diff results.
//!
//! A [`Printer`] owns the output stream and its configuration (color
//! switch, color table, environment) and hands a [`Sink`] view of it to a
//! pluggable [`Formatter`]. [`PlainFormatter`] prints one line per edit
//! script entry; [`UnifiedFormatter`] groups entries into context hunks.

mod colors;
mod env;
pub mod unified;

pub use colors::{Colors, Role};
pub use env::{Environment, SystemEnvironment};
pub use unified::{DEFAULT_UNIFIED_CONTEXT, Hunk, UnifiedFormatter};

use crate::diff::{DiffResult, LineDiff};
use std::fmt;
use std::io::{self, IsTerminal, Write};

/// Rendering strategy for a [`DiffResult`].
pub trait Formatter {
    /// Write `result` to `sink`.
    ///
    /// # Errors
    ///
    /// Returns any error raised by the underlying writer.
    fn format(&self, sink: &mut Sink<'_>, result: &DiffResult) -> io::Result<()>;
}

/// Output view handed to a [`Formatter`].
pub struct Sink<'a> {
    out: &'a mut dyn Write,
    ansi: bool,
    colors: &'a Colors,
    env: &'a dyn Environment,
}

impl<'a> Sink<'a> {
    /// Environment used to look up source metadata.
    #[must_use]
    pub fn env(&self) -> &dyn Environment {
        self.env
    }

    /// Color and reset sequences for `role`, empty when color is off.
    #[must_use]
    pub fn paint(&self, role: Role) -> (&'a str, &'a str) {
        let colors = self.colors;
        if self.ansi {
            (colors.get(role), &colors.reset)
        } else {
            ("", "")
        }
    }

    /// Write a single edit script entry. The entry brings its own terminator.
    ///
    /// # Errors
    ///
    /// Returns any error raised by the underlying writer.
    pub fn write_op(&mut self, diff: &LineDiff) -> io::Result<()> {
        let (set, reset) = self.paint(diff.op.into());
        write!(self.out, "{set}{diff}{reset}")
    }

    /// Write one colored line and terminate it.
    ///
    /// # Errors
    ///
    /// Returns any error raised by the underlying writer.
    pub fn write_styled(&mut self, role: Role, text: fmt::Arguments<'_>) -> io::Result<()> {
        let (set, reset) = self.paint(role);
        writeln!(self.out, "{set}{text}{reset}")
    }
}

/// Default strategy: one `<marker> <line>` entry per line.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainFormatter;

impl Formatter for PlainFormatter {
    fn format(&self, sink: &mut Sink<'_>, result: &DiffResult) -> io::Result<()> {
        for diff in &result.diffs {
            sink.write_op(diff)?;
        }
        Ok(())
    }
}

/// Configurable printer for diff results.
///
/// # Examples
/// ```
/// use line_diff::diff::diff_lines;
/// use line_diff::print::Printer;
///
/// let result = diff_lines(&["a\n"], &["b\n"]);
/// let mut printer = Printer::new(Vec::new());
/// printer.print(&result).unwrap();
/// assert_eq!(printer.into_inner(), b"> a\n< b\n");
/// ```
pub struct Printer<W> {
    out: W,
    ansi: bool,
    colors: Colors,
    formatter: Box<dyn Formatter>,
    env: Box<dyn Environment>,
}

impl<W: Write> Printer<W> {
    /// Printer with color off, default colors and the plain formatter.
    pub fn new(out: W) -> Self {
        Self {
            out,
            ansi: false,
            colors: Colors::default(),
            formatter: Box::new(PlainFormatter),
            env: Box::new(SystemEnvironment),
        }
    }

    /// Force color output on or off.
    #[must_use]
    pub fn with_ansi(mut self, ansi: bool) -> Self {
        self.ansi = ansi;
        self
    }

    /// Replace the color table. Unused while color output is off.
    #[must_use]
    pub fn with_colors(mut self, colors: Colors) -> Self {
        self.colors = colors;
        self
    }

    /// Replace the rendering strategy.
    #[must_use]
    pub fn with_formatter(mut self, formatter: impl Formatter + 'static) -> Self {
        self.formatter = Box::new(formatter);
        self
    }

    /// Use the unified formatter with `context` lines around each change.
    #[must_use]
    pub fn with_unified(self, context: usize) -> Self {
        self.with_formatter(UnifiedFormatter::new(context))
    }

    /// Replace the environment consulted for modification times.
    #[must_use]
    pub fn with_environment(mut self, env: impl Environment + 'static) -> Self {
        self.env = Box::new(env);
        self
    }

    /// Whether color output is on.
    #[must_use]
    pub fn ansi(&self) -> bool {
        self.ansi
    }

    /// Print `result` with the configured formatter.
    ///
    /// # Errors
    ///
    /// Returns any error raised while writing to the output.
    pub fn print(&mut self, result: &DiffResult) -> io::Result<()> {
        let mut sink = Sink {
            out: &mut self.out,
            ansi: self.ansi,
            colors: &self.colors,
            env: &*self.env,
        };
        self.formatter.format(&mut sink, result)?;
        self.out.flush()
    }

    /// Consume the printer and return the output stream.
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write + IsTerminal> Printer<W> {
    /// Printer that enables color when `out` is a color capable terminal.
    pub fn detect(out: W) -> Self {
        Self::detect_with(out, SystemEnvironment)
    }

    /// Like [`Printer::detect`], but `env` decides whether color is
    /// supported and serves modification times afterwards.
    pub fn detect_with(out: W, env: impl Environment + 'static) -> Self {
        let ansi = env.supports_color(out.is_terminal());
        Self::new(out).with_ansi(ansi).with_environment(env)
    }
}
