//! Parsing for color specifications into a [`Colors`] table.
//!
//! # Syntax
//!
//! The expected format is a colon separated list of `ROLE=SGR` entries
//! where:
//! - `ROLE` is one of `eql`/`equal`, `add`/`added`, `del`/`deleted`,
//!   `hdr`/`header`, `lbl`/`label` or `rst`/`reset`
//! - `SGR` is a semicolon separated list of ANSI SGR parameters, e.g. `1;32`
//!
//! An empty `SGR` turns the role's color off. Roles that are not listed keep
//! their default color.
//!
//! # Examples
//!
//! ```
//! use line_diff::parse::parse_colors;
//!
//! let colors = parse_colors("add=1;32:del=31:lbl=").unwrap();
//! assert_eq!(colors.added, "\x1b[1;32m");
//! assert_eq!(colors.deleted, "\x1b[31m");
//! assert_eq!(colors.label, "");
//! ```

use crate::print::{Colors, Role};
use error_set::error_set;
use nom::{
    IResult, Parser,
    character::complete::{alpha1, char, digit1},
    combinator::{all_consuming, opt, recognize},
    multi::separated_list1,
    sequence::separated_pair,
};

error_set! {
    /// Errors from parsing color specifications
    ParseError := {
        /// Input does not follow the `role=sgr[:role=sgr...]` syntax
        #[display("Invalid color specification '{input}': expected 'role=sgr[:role=sgr...]'")]
        InvalidSpec { input: String },
        /// Role name is not one of the known roles
        #[display("Unknown color role '{role}'")]
        UnknownRole { role: String },
    }
}

/// Which color table slot an entry sets.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Target {
    Role(Role),
    Reset,
}

/// Parse a color specification, starting from the default colors.
///
/// # Errors
///
/// Returns [`ParseError`] if:
/// - The input does not follow the entry syntax
/// - A role name is unknown
pub fn parse_colors(input: &str) -> Result<Colors, ParseError> {
    let spec = input.trim();
    let mut colors = Colors::default();
    if spec.is_empty() {
        return Ok(colors);
    }

    let (_, entries) = all_consuming(separated_list1(char(':'), entry))
        .parse(spec)
        .map_err(|_| ParseError::InvalidSpec {
            input: input.to_string(),
        })?;

    for (name, sgr) in entries {
        let sequence = sgr.map(|params| format!("\x1b[{params}m")).unwrap_or_default();
        match target(name)? {
            Target::Role(role) => *colors.get_mut(role) = sequence,
            Target::Reset => colors.reset = sequence,
        }
    }

    Ok(colors)
}

/// `role=sgr` with an optional sgr
fn entry(input: &str) -> IResult<&str, (&str, Option<&str>)> {
    separated_pair(alpha1, char('='), opt(sgr)).parse(input)
}

/// `1;32`
fn sgr(input: &str) -> IResult<&str, &str> {
    recognize(separated_list1(char(';'), digit1)).parse(input)
}

fn target(name: &str) -> Result<Target, ParseError> {
    match name {
        "eql" | "equal" => Ok(Target::Role(Role::Equal)),
        "add" | "added" => Ok(Target::Role(Role::Added)),
        "del" | "deleted" => Ok(Target::Role(Role::Deleted)),
        "hdr" | "header" => Ok(Target::Role(Role::Header)),
        "lbl" | "label" => Ok(Target::Role(Role::Label)),
        "rst" | "reset" => Ok(Target::Reset),
        _ => Err(ParseError::UnknownRole {
            role: name.to_string(),
        }),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use similar_asserts::assert_eq;

    #[test]
    fn parse_single_role() {
        let colors = parse_colors("add=34").unwrap();
        assert_eq!(
            colors,
            Colors {
                added: "\x1b[34m".to_string(),
                ..Colors::default()
            }
        );
    }

    #[test]
    fn parse_long_role_names() {
        let colors = parse_colors("equal=37:added=32:deleted=31:header=1:label=36:reset=0").unwrap();
        assert_eq!(colors.equal, "\x1b[37m");
        assert_eq!(colors.added, "\x1b[32m");
        assert_eq!(colors.deleted, "\x1b[31m");
        assert_eq!(colors.header, "\x1b[1m");
        assert_eq!(colors.label, "\x1b[36m");
        assert_eq!(colors.reset, "\x1b[0m");
    }

    #[test]
    fn parse_compound_sgr() {
        let colors = parse_colors("del=1;4;31").unwrap();
        assert_eq!(colors.deleted, "\x1b[1;4;31m");
    }

    #[test]
    fn parse_empty_sgr_disables_role() {
        let colors = parse_colors("eql=").unwrap();
        assert_eq!(colors.equal, "");
        assert_eq!(colors.added, Colors::default().added);
    }

    #[test]
    fn parse_empty_spec_keeps_defaults() {
        assert_eq!(parse_colors("").unwrap(), Colors::default());
        assert_eq!(parse_colors("   ").unwrap(), Colors::default());
    }

    #[test]
    fn parse_later_entry_wins() {
        let colors = parse_colors("add=32:add=92").unwrap();
        assert_eq!(colors.added, "\x1b[92m");
    }

    #[test]
    fn parse_unknown_role() {
        let result = parse_colors("add=32:moved=35");
        assert!(matches!(
            result,
            Err(ParseError::UnknownRole { ref role }) if role == "moved"
        ));
    }

    #[test]
    fn parse_missing_equals() {
        let result = parse_colors("add");
        assert!(matches!(result, Err(ParseError::InvalidSpec { .. })));
    }

    #[test]
    fn parse_non_numeric_sgr() {
        let result = parse_colors("add=green");
        assert!(matches!(result, Err(ParseError::InvalidSpec { .. })));
    }

    #[test]
    fn parse_trailing_separator() {
        let result = parse_colors("add=32:");
        assert!(matches!(result, Err(ParseError::InvalidSpec { .. })));
    }

    #[test]
    fn parse_dangling_semicolon() {
        let result = parse_colors("add=32;");
        assert!(matches!(result, Err(ParseError::InvalidSpec { .. })));
    }
}
