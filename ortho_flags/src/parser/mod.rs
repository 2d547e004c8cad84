//! Argv parsing.
//!
//! Tokens are matched against the registry in this order: exact canonical or
//! short name, `no<name>` for booleans, `-xVALUE` for single-character
//! non-boolean flags, then unique prefixes of long names and negated boolean
//! names.

mod env;
mod options;

use std::collections::HashSet;

pub use options::{DEFAULT_ENV_PREFIX, ParseOptions};

use crate::error::{CoerceError, FlagsError, FlagsResult};
use crate::flagfile;
use crate::prefix;
use crate::registry::FlagValues;

const FROMENV: &str = "fromenv";
const TRYFROMENV: &str = "tryfromenv";
const UNDEFOK: &str = "undefok";
const FLAGFILE: &str = "flagfile";

impl FlagValues {
    /// Parses `argv`, assigning every flag occurrence, and returns the
    /// residue: the program name followed by every unconsumed argument.
    ///
    /// Flagfile directives are expanded first. Parsing stops at the first
    /// error; occurrences applied before it remain applied.
    ///
    /// # Errors
    ///
    /// - [`FlagsError::UnknownFlag`] or [`FlagsError::AmbiguousPrefix`] when
    ///   a name does not resolve.
    /// - [`FlagsError::IllegalValue`] when a value is rejected.
    /// - [`FlagsError::MissingArgument`] when argv ends before a value.
    /// - [`FlagsError::MissingEnv`] from `--fromenv`.
    /// - [`FlagsError::Flagfile`] when a flagfile cannot be read.
    ///
    /// # Examples
    ///
    /// ```
    /// use ortho_flags::{Flag, FlagValues};
    ///
    /// # fn main() -> ortho_flags::FlagsResult<()> {
    /// let mut flags = FlagValues::new();
    /// flags.define(Flag::boolean("debug", "debug output").default(false))?;
    /// flags.define(Flag::string("name", "who").default("world"))?;
    /// let rest = flags.parse(["prog", "--nodebug", "--na", "bob", "--", "--debug"])?;
    /// assert_eq!(rest, ["prog", "--debug"]);
    /// assert_eq!(flags.typed::<String>("name")?.as_deref(), Some("bob"));
    /// # Ok(())
    /// # }
    /// ```
    pub fn parse<I, S>(&mut self, argv: I) -> FlagsResult<Vec<String>>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let raw: Vec<String> = argv.into_iter().map(Into::into).collect();
        let expansion = flagfile::expand(&raw, self.options().is_interspersed())?;
        self.parse_expanded(expansion.tokens)
    }

    /// Parses tokens whose flagfile directives were already expanded.
    pub(crate) fn parse_expanded(&mut self, tokens: Vec<String>) -> FlagsResult<Vec<String>> {
        let options = self.options().clone();
        let undefok = scan_undefok(&tokens);
        Parser {
            flags: self,
            options,
            undefok,
            touched: HashSet::new(),
        }
        .run(tokens)
    }
}

/// State of one parse call.
struct Parser<'a> {
    flags: &'a mut FlagValues,
    options: ParseOptions,
    undefok: HashSet<String>,
    /// Canonical names assigned during this call.
    touched: HashSet<String>,
}

/// What a flag token resolved to.
enum Target {
    /// `--name` or `--name=value`.
    Plain(String),
    /// `--noname` for a boolean.
    Negated(String),
    /// `-xVALUE`.
    Attached(String, String),
}

impl Parser<'_> {
    fn run(mut self, tokens: Vec<String>) -> FlagsResult<Vec<String>> {
        let mut rest = tokens.into_iter();
        let mut residue: Vec<String> = rest.next().into_iter().collect();
        while let Some(token) = rest.next() {
            if token == "--" {
                residue.extend(rest.by_ref());
                break;
            }
            if is_positional(&token) {
                residue.push(token);
                if self.options.is_interspersed() {
                    continue;
                }
                residue.extend(rest.by_ref());
                break;
            }
            self.handle(&token, &mut rest)?;
        }
        tracing::debug!(residue = residue.len(), "argv parsed");
        Ok(residue)
    }

    fn handle(
        &mut self,
        token: &str,
        rest: &mut impl Iterator<Item = String>,
    ) -> FlagsResult<()> {
        let single_dash = !token.starts_with("--");
        let body = match token.strip_prefix("--") {
            Some(body) => body,
            None => token.strip_prefix('-').unwrap_or(token),
        };
        let (name, inline) = match body.split_once('=') {
            Some((name, value)) => (name, Some(value)),
            None => (body, None),
        };

        match name {
            FROMENV | TRYFROMENV => {
                let list = directive_value(token, inline, rest)?;
                return self.apply_env(&list, name == FROMENV);
            }
            UNDEFOK => {
                directive_value(token, inline, rest)?;
                return Ok(());
            }
            FLAGFILE => return Err(FlagsError::missing_argument(token)),
            _ => {}
        }

        let target = match self.resolve(name, single_dash && inline.is_none()) {
            Ok(target) => target,
            Err(FlagsError::UnknownFlag { .. }) if self.tolerated(name) => {
                tracing::warn!(flag = name, "ignoring unknown flag listed in --undefok");
                return Ok(());
            }
            Err(err) => return Err(err),
        };

        match target {
            Target::Attached(canonical, value) => self.assign(&canonical, &value),
            Target::Negated(canonical) => match inline {
                Some(value) => Err(FlagsError::illegal_value(
                    &canonical,
                    value,
                    &CoerceError::new("negated boolean flags take no value"),
                )),
                None => self.assign(&canonical, "false"),
            },
            Target::Plain(canonical) => {
                let boolean = self
                    .flags
                    .lookup(&canonical)
                    .is_some_and(crate::flag::Flag::is_boolean);
                let value = match (inline, boolean) {
                    (Some(value), _) => value.to_owned(),
                    (None, true) => "true".to_owned(),
                    (None, false) => rest
                        .next()
                        .ok_or_else(|| FlagsError::missing_argument(token))?,
                };
                self.assign(&canonical, &value)
            }
        }
    }

    fn resolve(&self, name: &str, may_attach: bool) -> FlagsResult<Target> {
        if name.is_empty() {
            return Err(FlagsError::unknown(name));
        }
        if let Some(target) = self.exact(name) {
            return Ok(target);
        }
        if may_attach && let Some(target) = self.attached(name) {
            return Ok(target);
        }
        if self.options.allows_abbreviations() {
            let names = self.flags.abbreviation_targets();
            let found = prefix::candidates(name, names.iter().map(String::as_str));
            match found.as_slice() {
                [] => {}
                [only] => return self.exact(only).ok_or_else(|| FlagsError::unknown(name)),
                many => {
                    let candidates = many.iter().map(|&candidate| candidate.to_owned()).collect();
                    return Err(FlagsError::ambiguous(name, candidates));
                }
            }
        }
        Err(FlagsError::unknown(name))
    }

    fn exact(&self, name: &str) -> Option<Target> {
        if let Some(canonical) = self.flags.canonical(name) {
            return Some(Target::Plain(canonical.to_owned()));
        }
        let positive = name.strip_prefix("no")?;
        let flag = self.flags.lookup(positive)?;
        flag.is_boolean()
            .then(|| Target::Negated(flag.name().to_owned()))
    }

    /// `-x8` for a single-character, non-boolean flag `x`.
    fn attached(&self, name: &str) -> Option<Target> {
        let mut chars = name.chars();
        let first = chars.next()?;
        let value = chars.as_str();
        if value.is_empty() {
            return None;
        }
        let flag = self.flags.lookup(first.encode_utf8(&mut [0; 4]))?;
        (!flag.is_boolean()).then(|| Target::Attached(flag.name().to_owned(), value.to_owned()))
    }

    fn tolerated(&self, name: &str) -> bool {
        self.undefok.contains(name)
            || name
                .strip_prefix("no")
                .is_some_and(|positive| self.undefok.contains(positive))
    }

    /// Applies one occurrence to the flag with canonical name `canonical`.
    fn assign(&mut self, canonical: &str, value: &str) -> FlagsResult<()> {
        let continuing = !self.touched.insert(canonical.to_owned());
        let flag = self
            .flags
            .flag_mut(canonical)
            .ok_or_else(|| FlagsError::unknown(canonical))?;
        flag.apply(value, continuing)
    }
}

fn is_positional(token: &str) -> bool {
    !token.starts_with('-') || token == "-"
}

fn directive_value(
    token: &str,
    inline: Option<&str>,
    rest: &mut impl Iterator<Item = String>,
) -> FlagsResult<String> {
    match inline {
        Some(value) => Ok(value.to_owned()),
        None => rest.next().ok_or_else(|| FlagsError::missing_argument(token)),
    }
}

/// Collects every name listed by `--undefok` anywhere in argv.
fn scan_undefok(tokens: &[String]) -> HashSet<String> {
    let mut names = HashSet::new();
    let mut iter = tokens.iter().skip(1);
    while let Some(token) = iter.next() {
        if token == "--" {
            break;
        }
        let body = token.trim_start_matches('-');
        if body.len() == token.len() {
            continue;
        }
        let list = match body.strip_prefix(UNDEFOK) {
            Some(rest) if rest.is_empty() => iter.next().map(String::as_str),
            Some(rest) => rest.strip_prefix('='),
            None => None,
        };
        if let Some(list) = list {
            names.extend(
                list.split(',')
                    .map(str::trim)
                    .filter(|name| !name.is_empty())
                    .map(str::to_owned),
            );
        }
    }
    names
}
