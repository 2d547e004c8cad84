//! Conversion of raw argument strings into typed flag values.
//!
//! Every flag owns a [`Coercer`]. The same coercer validates argv input,
//! programmatic assignments and defaults, and renders values back into the
//! canonical string form that argv parsing accepts.

mod boolean;
mod list;
mod numeric;

use std::fmt;

use num_bigint::BigInt;
use serde::Serialize;

use crate::error::CoerceError;
use crate::value::FlagValue;

pub use list::ListSeparator;
pub use numeric::Bounds;

/// Declared type of a flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FlagKind {
    /// `true`/`false` switch supporting `--no<name>`.
    Boolean,
    /// Arbitrary-precision integer.
    Integer,
    /// Floating point number.
    Float,
    /// Unmodified string.
    String,
    /// One of a fixed set of strings.
    Enum,
    /// Separator-delimited list of strings.
    List,
}

impl FlagKind {
    /// Stable lowercase name used in help output and documentation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Boolean => "bool",
            Self::Integer => "int",
            Self::Float => "float",
            Self::String => "string",
            Self::Enum => "enum",
            Self::List => "list",
        }
    }
}

impl fmt::Display for FlagKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parsing and rendering rules for one flag kind.
#[derive(Debug, Clone, PartialEq)]
pub enum Coercer {
    /// See [`FlagKind::Boolean`].
    Boolean,
    /// See [`FlagKind::Integer`].
    Integer(Bounds<BigInt>),
    /// See [`FlagKind::Float`].
    Float(Bounds<f64>),
    /// See [`FlagKind::String`].
    String,
    /// See [`FlagKind::Enum`]; holds the accepted choices.
    Enum(Vec<String>),
    /// See [`FlagKind::List`].
    List(ListSeparator),
}

impl Coercer {
    /// Kind tag of this coercer.
    #[must_use]
    pub const fn kind(&self) -> FlagKind {
        match self {
            Self::Boolean => FlagKind::Boolean,
            Self::Integer(_) => FlagKind::Integer,
            Self::Float(_) => FlagKind::Float,
            Self::String => FlagKind::String,
            Self::Enum(_) => FlagKind::Enum,
            Self::List(_) => FlagKind::List,
        }
    }

    /// Converts `raw` into a typed value.
    ///
    /// # Errors
    ///
    /// Returns a [`CoerceError`] when `raw` is malformed for this kind or
    /// violates the declared bounds or choices.
    ///
    /// # Examples
    ///
    /// ```
    /// use ortho_flags::{Bounds, Coercer, FlagValue};
    ///
    /// let ints = Coercer::Integer(Bounds::default());
    /// assert_eq!(ints.coerce("012345").ok(), Some(FlagValue::from(12345)));
    /// assert_eq!(ints.coerce("0x1A").ok(), Some(FlagValue::from(26)));
    /// assert!(ints.coerce("0x1G").is_err());
    /// ```
    pub fn coerce(&self, raw: &str) -> Result<FlagValue, CoerceError> {
        match self {
            Self::Boolean => boolean::parse(raw).map(FlagValue::Bool),
            Self::Integer(bounds) => {
                let value = numeric::parse_integer(raw)?;
                bounds.check(&value)?;
                Ok(FlagValue::Int(value))
            }
            Self::Float(bounds) => {
                let value = numeric::parse_float(raw)?;
                bounds.check(&value)?;
                Ok(FlagValue::Float(value))
            }
            Self::String => Ok(FlagValue::Str(raw.to_owned())),
            Self::Enum(choices) => {
                if choices.iter().any(|choice| choice == raw) {
                    Ok(FlagValue::Str(raw.to_owned()))
                } else {
                    Err(CoerceError::new(format!(
                        "value should be one of <{}>",
                        choices.join("|")
                    )))
                }
            }
            Self::List(separator) => Ok(FlagValue::List(separator.split(raw))),
        }
    }

    /// Checks that an already typed value could have come from [`Self::coerce`].
    ///
    /// # Errors
    ///
    /// Returns a [`CoerceError`] when the value has the wrong kind or falls
    /// outside the declared bounds or choices.
    pub fn validate(&self, value: &FlagValue) -> Result<(), CoerceError> {
        match (self, value) {
            (Self::Boolean, FlagValue::Bool(_))
            | (Self::String, FlagValue::Str(_))
            | (Self::List(_), FlagValue::List(_)) => Ok(()),
            (Self::Integer(bounds), FlagValue::Int(number)) => bounds.check(number),
            (Self::Float(bounds), FlagValue::Float(number)) => {
                if number.is_nan() {
                    return Err(CoerceError::new("NaN is not a valid number"));
                }
                bounds.check(number)
            }
            (Self::Enum(_), FlagValue::Str(choice)) => self.coerce(choice).map(|_| ()),
            _ => Err(CoerceError::new(format!(
                "expected {} value",
                self.kind().as_str()
            ))),
        }
    }

    /// Renders `value` in the canonical form accepted by [`Self::coerce`].
    #[must_use]
    pub fn render(&self, value: &FlagValue) -> String {
        match (self, value) {
            (Self::Boolean, FlagValue::Bool(flag)) => boolean::render(*flag).to_owned(),
            (Self::List(separator), FlagValue::List(items)) => separator.join(items),
            _ => value.to_string(),
        }
    }

    /// Short description of the accepted syntax, for help output.
    ///
    /// Empty for kinds whose syntax needs no explanation.
    #[must_use]
    pub fn syntactic_help(&self) -> String {
        match self {
            Self::Boolean | Self::String => String::new(),
            Self::Integer(bounds) => numeric::integer_help(bounds),
            Self::Float(bounds) => numeric::float_help(bounds),
            Self::Enum(choices) => format!("<{}>", choices.join("|")),
            Self::List(separator) => separator.help().to_owned(),
        }
    }
}
