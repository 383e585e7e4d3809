//! Interactive fallback for missing identifiers and access tokens.
//!
//! Only the binary talks to the terminal. Everything here is generic over
//! the reader and writer so the questions can be scripted in tests.

use segcomp_routes::{parse_identifier_list, RouteIdentifier};
use std::io::{self, BufRead, Write};

pub const IDENTIFIERS_PROMPT: &str =
    "Please enter the segment IDs e.g. 638886, 7506566, 1982925 or GPX files: ";
pub const SINGLE_IDENTIFIER_PROMPT: &str = "Please enter the segment ID or GPX file: ";
pub const TOKEN_PROMPT: &str = "Please enter access token: ";

/// Print `question` and read one trimmed line.
pub fn ask<R: BufRead, W: Write>(input: &mut R, output: &mut W, question: &str) -> io::Result<String> {
    write!(output, "{}", question)?;
    output.flush()?;
    let mut line = String::new();
    input.read_line(&mut line)?;
    Ok(line.trim().to_string())
}

/// Identifiers given on the command line. Each argument may itself hold a
/// comma-separated list.
pub fn identifiers_from_args(args: &[String]) -> Vec<RouteIdentifier> {
    args.iter()
        .flat_map(|arg| arg.split(','))
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(RouteIdentifier::parse)
        .collect()
}

/// Identifiers from `args`, or from the user when there are none.
pub fn collect_identifiers<R: BufRead, W: Write>(
    args: &[String],
    input: &mut R,
    output: &mut W,
) -> io::Result<Vec<RouteIdentifier>> {
    let ids = identifiers_from_args(args);
    if !ids.is_empty() {
        return Ok(ids);
    }
    let line = ask(input, output, IDENTIFIERS_PROMPT)?;
    Ok(parse_identifier_list(&line))
}

/// A single identifier from `arg`, or from the user.
pub fn collect_identifier<R: BufRead, W: Write>(
    arg: Option<&str>,
    input: &mut R,
    output: &mut W,
) -> io::Result<Option<RouteIdentifier>> {
    let text = match arg {
        Some(arg) => arg.trim().to_string(),
        None => ask(input, output, SINGLE_IDENTIFIER_PROMPT)?,
    };
    Ok((!text.is_empty()).then(|| RouteIdentifier::parse(&text)))
}

/// The access token to use. The user is asked only when a remote
/// identifier is present and no token was supplied.
pub fn resolve_token<R: BufRead, W: Write>(
    identifiers: &[RouteIdentifier],
    token: Option<String>,
    input: &mut R,
    output: &mut W,
) -> io::Result<Option<String>> {
    if token.is_some() || !identifiers.iter().any(RouteIdentifier::is_remote) {
        return Ok(token);
    }
    let answer = ask(input, output, TOKEN_PROMPT)?;
    Ok((!answer.is_empty()).then_some(answer))
}
