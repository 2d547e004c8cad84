//! Constructors for `FlagsError`.

use std::borrow::Cow;
use std::path::Path;

use super::{CoerceError, FlagsError};

impl FlagsError {
    /// Construct a [`FlagsError::DuplicateFlag`].
    ///
    /// # Examples
    ///
    /// ```
    /// use ortho_flags::FlagsError;
    /// let err = FlagsError::duplicate("verbose");
    /// assert_eq!(err.to_string(), "flag 'verbose' is already defined");
    /// ```
    #[must_use]
    pub fn duplicate(name: impl Into<String>) -> Self {
        Self::DuplicateFlag { name: name.into() }
    }

    /// Construct a [`FlagsError::IllegalValue`] from a coercion failure.
    #[must_use]
    pub fn illegal_value(flag: &str, value: &str, err: &CoerceError) -> Self {
        Self::IllegalValue {
            flag: flag.to_owned(),
            value: value.to_owned(),
            reason: err.reason().to_owned(),
        }
    }

    /// Construct a [`FlagsError::UnknownFlag`].
    #[must_use]
    pub fn unknown(name: impl Into<String>) -> Self {
        Self::UnknownFlag { name: name.into() }
    }

    /// Construct a [`FlagsError::MissingArgument`].
    #[must_use]
    pub fn missing_argument(flag: impl Into<String>) -> Self {
        Self::MissingArgument { flag: flag.into() }
    }

    /// Construct a [`FlagsError::UnexpectedArgument`].
    #[must_use]
    pub fn unexpected_argument(token: impl Into<String>) -> Self {
        Self::UnexpectedArgument {
            token: token.into(),
        }
    }

    /// Construct a [`FlagsError::AmbiguousPrefix`]; candidates are sorted.
    #[must_use]
    pub fn ambiguous(prefix: impl Into<String>, mut candidates: Vec<String>) -> Self {
        candidates.sort();
        candidates.dedup();
        Self::AmbiguousPrefix {
            prefix: prefix.into(),
            candidates,
        }
    }

    /// Construct a [`FlagsError::Flagfile`] for `path`.
    #[must_use]
    pub fn flagfile(path: &Path, source: std::io::Error) -> Self {
        Self::Flagfile {
            path: path.to_path_buf(),
            source,
        }
    }

    /// Construct a [`FlagsError::InvalidName`].
    #[must_use]
    pub fn invalid_name(name: impl Into<String>, reason: impl Into<Cow<'static, str>>) -> Self {
        Self::InvalidName {
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// Construct a [`FlagsError::MissingEnv`].
    #[must_use]
    pub fn missing_env(var: impl Into<String>) -> Self {
        Self::MissingEnv { var: var.into() }
    }

    /// Construct a [`FlagsError::Write`] for `path`.
    #[must_use]
    pub fn write(path: &Path, source: std::io::Error) -> Self {
        Self::Write {
            path: path.to_path_buf(),
            source,
        }
    }

    /// Returns `true` for failures raised while interpreting argv tokens.
    ///
    /// I/O and definition errors return `false`.
    #[must_use]
    pub const fn is_parse_error(&self) -> bool {
        matches!(
            self,
            Self::IllegalValue { .. }
                | Self::UnknownFlag { .. }
                | Self::MissingArgument { .. }
                | Self::UnexpectedArgument { .. }
                | Self::AmbiguousPrefix { .. }
                | Self::MissingEnv { .. }
        )
    }
}
