//! Typed flag values and conversions out of them.

use std::fmt;

use num_bigint::BigInt;
use num_traits::ToPrimitive;

/// Current or default value held by a flag.
///
/// Enum flags store their selected choice as [`FlagValue::Str`]. Multi-valued
/// flags hold a [`FlagValue::Multi`] whose elements all share the flag's
/// scalar kind.
#[derive(Debug, Clone, PartialEq)]
pub enum FlagValue {
    /// Boolean flag value.
    Bool(bool),
    /// Arbitrary-precision integer.
    Int(BigInt),
    /// Floating point number.
    Float(f64),
    /// String or enum choice.
    Str(String),
    /// Separator-delimited list.
    List(Vec<String>),
    /// Values accumulated across repeated occurrences.
    Multi(Vec<FlagValue>),
}

impl FlagValue {
    /// Returns the boolean payload, if any.
    #[must_use]
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(value) => Some(*value),
            _ => None,
        }
    }

    /// Returns the integer payload, if any.
    #[must_use]
    pub const fn as_int(&self) -> Option<&BigInt> {
        match self {
            Self::Int(value) => Some(value),
            _ => None,
        }
    }

    /// Returns the string payload, if any.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(value) => Some(value.as_str()),
            _ => None,
        }
    }

    /// Returns the list payload, if any.
    #[must_use]
    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            Self::List(items) => Some(items.as_slice()),
            _ => None,
        }
    }

    /// Returns the accumulated elements of a multi-valued flag, if any.
    #[must_use]
    pub fn as_multi(&self) -> Option<&[Self]> {
        match self {
            Self::Multi(items) => Some(items.as_slice()),
            _ => None,
        }
    }
}

impl fmt::Display for FlagValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(value) => write!(f, "{value}"),
            Self::Int(value) => write!(f, "{value}"),
            Self::Float(value) => write!(f, "{value}"),
            Self::Str(value) => f.write_str(value),
            Self::List(items) => f.write_str(&items.join(",")),
            Self::Multi(items) => {
                for (idx, item) in items.iter().enumerate() {
                    if idx > 0 {
                        f.write_str(",")?;
                    }
                    write!(f, "{item}")?;
                }
                Ok(())
            }
        }
    }
}

impl From<bool> for FlagValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<BigInt> for FlagValue {
    fn from(value: BigInt) -> Self {
        Self::Int(value)
    }
}

impl From<f64> for FlagValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<&str> for FlagValue {
    fn from(value: &str) -> Self {
        Self::Str(value.to_owned())
    }
}

impl From<String> for FlagValue {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<Vec<String>> for FlagValue {
    fn from(items: Vec<String>) -> Self {
        Self::List(items)
    }
}

impl From<Vec<&str>> for FlagValue {
    fn from(items: Vec<&str>) -> Self {
        Self::List(items.into_iter().map(str::to_owned).collect())
    }
}

impl From<Vec<Self>> for FlagValue {
    fn from(items: Vec<Self>) -> Self {
        Self::Multi(items)
    }
}

macro_rules! int_from {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for FlagValue {
                fn from(value: $ty) -> Self {
                    Self::Int(BigInt::from(value))
                }
            }
        )*
    };
}

int_from!(i32, i64, u32, u64, usize);

/// Extraction of a concrete Rust type from a [`FlagValue`].
///
/// Used by [`crate::FlagValues::typed`]. Returns `None` when the value has a
/// different kind or does not fit the target type.
pub trait FromFlagValue: Sized {
    /// Converts `value` into `Self`.
    fn from_flag_value(value: &FlagValue) -> Option<Self>;
}

impl FromFlagValue for bool {
    fn from_flag_value(value: &FlagValue) -> Option<Self> {
        value.as_bool()
    }
}

impl FromFlagValue for BigInt {
    fn from_flag_value(value: &FlagValue) -> Option<Self> {
        value.as_int().cloned()
    }
}

impl FromFlagValue for f64 {
    fn from_flag_value(value: &FlagValue) -> Option<Self> {
        match value {
            FlagValue::Float(number) => Some(*number),
            FlagValue::Int(number) => number.to_f64(),
            _ => None,
        }
    }
}

impl FromFlagValue for String {
    fn from_flag_value(value: &FlagValue) -> Option<Self> {
        value.as_str().map(str::to_owned)
    }
}

impl FromFlagValue for Vec<String> {
    fn from_flag_value(value: &FlagValue) -> Option<Self> {
        match value {
            FlagValue::List(items) => Some(items.clone()),
            FlagValue::Multi(items) => items
                .iter()
                .map(|item| item.as_str().map(str::to_owned))
                .collect(),
            _ => None,
        }
    }
}

macro_rules! int_extract {
    ($($ty:ty => $conv:ident),*) => {
        $(
            impl FromFlagValue for $ty {
                fn from_flag_value(value: &FlagValue) -> Option<Self> {
                    value.as_int()?.$conv()
                }
            }
        )*
    };
}

int_extract!(i32 => to_i32, i64 => to_i64, u32 => to_u32, u64 => to_u64, usize => to_usize);

macro_rules! multi_extract {
    ($($ty:ty),*) => {
        $(
            impl FromFlagValue for Vec<$ty> {
                fn from_flag_value(value: &FlagValue) -> Option<Self> {
                    value
                        .as_multi()?
                        .iter()
                        .map(<$ty>::from_flag_value)
                        .collect()
                }
            }
        )*
    };
}

multi_extract!(bool, BigInt, f64, i32, i64, u32, u64, usize);
