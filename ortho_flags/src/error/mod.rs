//! Error types produced while defining, parsing and persisting flags.

mod constructors;
mod types;

pub use types::{CoerceError, FlagsError};

/// Result alias used throughout the crate.
pub type FlagsResult<T> = Result<T, FlagsError>;

#[cfg(test)]
mod tests;
