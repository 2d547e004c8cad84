//! Flagfile expansion.
//!
//! A flagfile holds one argv token per line. Blank lines and lines starting
//! with `#` or `//` are ignored, and `--flagfile=PATH` lines include further
//! files depth-first. Expanded tokens are spliced directly after the program
//! name so that anything already on the command line takes precedence.

mod loader;
mod path;

use std::path::PathBuf;

use camino::Utf8PathBuf;

use crate::error::{FlagsError, FlagsResult};
use loader::Loader;

const LONG: &str = "--flagfile";
const SHORT: &str = "-flagfile";

/// Result of expanding every flagfile directive in an argv.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Expansion {
    /// Argv with directives replaced by file contents.
    pub tokens: Vec<String>,
    /// Canonical paths of the files read, in read order.
    pub files: Vec<Utf8PathBuf>,
    /// Canonical paths skipped because they were already being expanded.
    pub skipped: Vec<Utf8PathBuf>,
}

pub(crate) enum Directive<'a> {
    /// `--flagfile=PATH`.
    Inline(&'a str),
    /// `--flagfile` with the path in the next token.
    Detached,
}

pub(crate) fn classify(token: &str) -> Option<Directive<'_>> {
    if token == LONG || token == SHORT {
        return Some(Directive::Detached);
    }
    token
        .strip_prefix(LONG)
        .or_else(|| token.strip_prefix(SHORT))
        .and_then(|rest| rest.strip_prefix('='))
        .map(Directive::Inline)
}

/// Returns the path named by a `--flagfile=PATH` or `-flagfile=PATH` token,
/// with `~` expanded, or `None` for any other token.
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use ortho_flags::flagfile::extract_filename;
///
/// assert_eq!(
///     extract_filename("--flagfile=conf/app.flags").as_deref(),
///     Some(Path::new("conf/app.flags"))
/// );
/// assert_eq!(extract_filename("--verbose"), None);
/// ```
#[must_use]
pub fn extract_filename(token: &str) -> Option<PathBuf> {
    match classify(token)? {
        Directive::Inline(raw) => Some(path::expand_home(raw)),
        Directive::Detached => None,
    }
}

/// Replaces every flagfile directive in `argv` with the file's tokens.
///
/// Expansion stops at `--` and, unless `interspersed` is set, at the first
/// positional token; later tokens are copied verbatim.
///
/// # Errors
///
/// Returns [`FlagsError::Flagfile`] when a file cannot be read and
/// [`FlagsError::MissingArgument`] for a trailing `--flagfile`.
pub fn expand<S: AsRef<str>>(argv: &[S], interspersed: bool) -> FlagsResult<Expansion> {
    let mut report = Expansion::default();
    let mut tokens = Vec::with_capacity(argv.len());
    {
        let mut loader = Loader::new(&mut report);
        let mut rest = argv.iter().map(AsRef::as_ref);
        if let Some(program) = rest.next() {
            tokens.push(program.to_owned());
        }
        while let Some(token) = rest.next() {
            let target = match classify(token) {
                Some(Directive::Inline(raw)) => raw,
                Some(Directive::Detached) => rest
                    .next()
                    .ok_or_else(|| FlagsError::missing_argument(token))?,
                None => {
                    tokens.push(token.to_owned());
                    let positional = !token.starts_with('-') || token == "-";
                    if token == "--" || (positional && !interspersed) {
                        break;
                    }
                    continue;
                }
            };
            let lines = loader.read(target)?;
            let at = tokens.len().min(1);
            tokens.splice(at..at, lines);
        }
        tokens.extend(rest.map(str::to_owned));
    }
    report.tokens = tokens;
    Ok(report)
}

/// Tokens of flagfile-format `text`, nested directives expanded.
pub(crate) fn expand_text(text: &str) -> FlagsResult<Expansion> {
    let mut report = Expansion::default();
    let tokens = Loader::new(&mut report).tokens(text)?;
    report.tokens = tokens;
    Ok(report)
}
