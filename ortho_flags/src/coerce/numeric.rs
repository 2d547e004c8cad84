//! Integer and float parsing with bounds.
//!
//! Integers accept an optional sign and a `0x`/`0X` hexadecimal prefix. Any
//! other literal is decimal, including ones with leading zeros.

use std::fmt::Display;

use num_bigint::BigInt;

use crate::error::CoerceError;

/// Optional inclusive bounds for numeric flags.
#[derive(Debug, Clone, PartialEq)]
pub struct Bounds<T> {
    /// Smallest accepted value.
    pub lower: Option<T>,
    /// Largest accepted value.
    pub upper: Option<T>,
}

impl<T> Default for Bounds<T> {
    fn default() -> Self {
        Self {
            lower: None,
            upper: None,
        }
    }
}

impl<T: PartialOrd + Display> Bounds<T> {
    /// Creates bounds from optional limits.
    #[must_use]
    pub const fn new(lower: Option<T>, upper: Option<T>) -> Self {
        Self { lower, upper }
    }

    /// Rejects `value` when it lies outside the bounds.
    ///
    /// # Errors
    ///
    /// Returns a [`CoerceError`] naming the violated limit.
    pub fn check(&self, value: &T) -> Result<(), CoerceError> {
        if let Some(lower) = &self.lower
            && value < lower
        {
            return Err(CoerceError::new(format!("value must be >= {lower}")));
        }
        if let Some(upper) = &self.upper
            && value > upper
        {
            return Err(CoerceError::new(format!("value must be <= {upper}")));
        }
        Ok(())
    }
}

pub(super) fn parse_integer(raw: &str) -> Result<BigInt, CoerceError> {
    let trimmed = raw.trim();
    let (negative, unsigned) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };
    let (radix, digits) = match unsigned
        .strip_prefix("0x")
        .or_else(|| unsigned.strip_prefix("0X"))
    {
        Some(hex) => (16, hex),
        None => (10, unsigned),
    };
    if digits.is_empty() || !digits.chars().all(|ch| ch.is_digit(radix)) {
        return Err(CoerceError::new(if radix == 16 {
            "invalid hexadecimal integer"
        } else {
            "invalid integer"
        }));
    }
    let magnitude = BigInt::parse_bytes(digits.as_bytes(), radix)
        .ok_or_else(|| CoerceError::new("invalid integer"))?;
    Ok(if negative { -magnitude } else { magnitude })
}

pub(super) fn parse_float(raw: &str) -> Result<f64, CoerceError> {
    let value: f64 = raw
        .trim()
        .parse()
        .map_err(|_| CoerceError::new("invalid number"))?;
    if value.is_nan() {
        return Err(CoerceError::new("NaN is not a valid number"));
    }
    Ok(value)
}

pub(super) fn integer_help(bounds: &Bounds<BigInt>) -> String {
    let one = BigInt::from(1);
    let zero = BigInt::from(0);
    let minus_one = BigInt::from(-1);
    match (&bounds.lower, &bounds.upper) {
        (Some(lower), Some(upper)) => format!("an integer in the range [{lower}, {upper}]"),
        (Some(lower), None) if *lower == one => "a positive integer".to_owned(),
        (None, Some(upper)) if *upper == minus_one => "a negative integer".to_owned(),
        (Some(lower), None) if *lower == zero => "a non-negative integer".to_owned(),
        (None, Some(upper)) if *upper == zero => "a non-positive integer".to_owned(),
        (Some(lower), None) => format!("an integer >= {lower}"),
        (None, Some(upper)) => format!("an integer <= {upper}"),
        (None, None) => "an integer".to_owned(),
    }
}

pub(super) fn float_help(bounds: &Bounds<f64>) -> String {
    match (bounds.lower, bounds.upper) {
        (Some(lower), Some(upper)) => format!("a number in the range [{lower}, {upper}]"),
        (Some(lower), None) => format!("a number >= {lower}"),
        (None, Some(upper)) => format!("a number <= {upper}"),
        (None, None) => "a number".to_owned(),
    }
}
