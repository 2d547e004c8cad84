//! Typed command-line flags.
//!
//! A [`FlagValues`] registry holds named, typed [`Flag`]s. Parsing argv
//! assigns them, expanding flagfiles, `--fromenv` directives and unique
//! prefixes along the way, and returns the arguments it did not consume.
//! Flags serialise back to argv tokens, so a registry can be written to a
//! flagfile and read again later.
//!
//! ```
//! use ortho_flags::{Flag, FlagValues};
//!
//! # fn main() -> ortho_flags::FlagsResult<()> {
//! let mut flags = FlagValues::new().with_main_module("demo");
//! flags.define(Flag::boolean("verbose", "chatty output").default(false).short_name('v'))?;
//! flags.define(Flag::multi_string("tag", "labels to attach"))?;
//!
//! let rest = flags.parse(["demo", "-v", "--tag=a", "--tag", "b", "input.txt"])?;
//! assert_eq!(rest, ["demo", "input.txt"]);
//! assert_eq!(flags.typed::<Vec<String>>("tag")?, Some(vec!["a".into(), "b".into()]));
//! assert_eq!(flags.flags_into_string(), "--verbose\n--tag=a\n--tag=b\n");
//! # Ok(())
//! # }
//! ```

pub mod coerce;
pub mod docs;
mod error;
mod flag;
pub mod flagfile;
mod parser;
pub mod prefix;
mod registry;
mod shared;
mod value;

pub use coerce::{Bounds, Coercer, FlagKind, ListSeparator};
pub use error::{CoerceError, FlagsError, FlagsResult};
pub use flag::Flag;
pub use parser::{DEFAULT_ENV_PREFIX, ParseOptions};
pub use registry::{FlagSaver, FlagValues, RESERVED_NAMES, SavedFlags};
pub use shared::{SharedFlagValues, global};
pub use value::{FlagValue, FromFlagValue};

/// Arbitrary-precision integer type held by [`FlagValue::Int`].
pub use num_bigint::BigInt;
