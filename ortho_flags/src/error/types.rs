//! Primary error enum for flag registry and parser flows.

use std::borrow::Cow;
use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while defining, parsing or persisting flags.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum FlagsError {
    /// A canonical or short name is already claimed by another flag.
    #[error("flag '{name}' is already defined")]
    DuplicateFlag {
        /// Name that collided.
        name: String,
    },

    /// A value failed type coercion, a bounds check or a choice check.
    #[error("illegal value '{value}' for flag '{flag}': {reason}")]
    IllegalValue {
        /// Canonical name of the flag receiving the value.
        flag: String,
        /// Raw value as supplied.
        value: String,
        /// Human-readable explanation of the rejection.
        reason: String,
    },

    /// No flag matches the name exactly or by unique prefix.
    #[error("unknown command line flag '{name}'")]
    UnknownFlag {
        /// Name as written on the command line, without dashes.
        name: String,
    },

    /// A flag requiring a value appeared as the last token.
    #[error("flag '{flag}' is missing its argument")]
    MissingArgument {
        /// Token that required the value.
        flag: String,
    },

    /// Flag text held a token that is not a flag.
    #[error("unexpected argument '{token}' in flag text")]
    UnexpectedArgument {
        /// Offending token.
        token: String,
    },

    /// An abbreviated name matches more than one flag.
    #[error("flag prefix '{prefix}' is ambiguous; candidates: {}", .candidates.join(", "))]
    AmbiguousPrefix {
        /// Prefix as written on the command line.
        prefix: String,
        /// Every name sharing the prefix, sorted.
        candidates: Vec<String>,
    },

    /// A definition used a name that can never be parsed back.
    #[error("invalid flag name '{name}': {reason}")]
    InvalidName {
        /// Offending name.
        name: String,
        /// Why the name was rejected.
        reason: Cow<'static, str>,
    },

    /// `--fromenv` referenced a variable that is not set.
    #[error("environment variable {var} not found (requested via --fromenv)")]
    MissingEnv {
        /// Fully qualified variable name, prefix included.
        var: String,
    },

    /// A flagfile could not be read.
    #[error("flagfile error in '{}': {source}", .path.display())]
    Flagfile {
        /// Path of the flagfile as resolved by the loader.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// Serialised flags could not be written.
    #[error("failed to write flags to '{}': {source}", .path.display())]
    Write {
        /// Destination path.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },
}

/// Reason a raw string could not be coerced into a typed value.
///
/// Coercers do not know which flag they serve; [`FlagsError::illegal_value`]
/// attaches that context.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{reason}")]
pub struct CoerceError {
    reason: Cow<'static, str>,
}

impl CoerceError {
    /// Creates a coercion failure with the given explanation.
    #[must_use]
    pub fn new(reason: impl Into<Cow<'static, str>>) -> Self {
        Self {
            reason: reason.into(),
        }
    }

    /// Returns the explanation.
    #[must_use]
    pub fn reason(&self) -> &str {
        &self.reason
    }
}
