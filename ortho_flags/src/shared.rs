//! Thread-safe registry wrapper and the process-wide default instance.

use std::sync::LazyLock;

use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::error::FlagsResult;
use crate::flag::Flag;
use crate::registry::FlagValues;
use crate::value::{FlagValue, FromFlagValue};

static GLOBAL: LazyLock<SharedFlagValues> = LazyLock::new(SharedFlagValues::default);

/// Process-wide registry for programs that prefer a single global set of
/// flags.
///
/// # Examples
///
/// ```
/// use ortho_flags::{Flag, global};
///
/// # fn main() -> ortho_flags::FlagsResult<()> {
/// global().define(Flag::boolean("global_demo", "demo switch").default(false))?;
/// global().parse(["prog", "--global_demo"])?;
/// assert_eq!(global().typed::<bool>("global_demo")?, Some(true));
/// # Ok(())
/// # }
/// ```
#[must_use]
pub fn global() -> &'static SharedFlagValues {
    &GLOBAL
}

/// A [`FlagValues`] behind a read-write lock.
///
/// Mutating calls take the write lock for their whole duration, so a parse
/// is never observed half-applied.
#[derive(Debug, Default)]
pub struct SharedFlagValues {
    inner: RwLock<FlagValues>,
}

impl SharedFlagValues {
    /// Wraps an existing registry.
    #[must_use]
    pub const fn new(flags: FlagValues) -> Self {
        Self {
            inner: RwLock::new(flags),
        }
    }

    /// Shared read access for anything not covered by the helpers below.
    pub fn read(&self) -> RwLockReadGuard<'_, FlagValues> {
        self.inner.read()
    }

    /// Exclusive access for anything not covered by the helpers below.
    pub fn write(&self) -> RwLockWriteGuard<'_, FlagValues> {
        self.inner.write()
    }

    /// See [`FlagValues::define`].
    ///
    /// # Errors
    ///
    /// Propagates definition errors.
    pub fn define(&self, flag: Flag) -> FlagsResult<()> {
        self.inner.write().define(flag)
    }

    /// See [`FlagValues::delete`].
    ///
    /// # Errors
    ///
    /// Propagates lookup errors.
    pub fn delete(&self, name: &str) -> FlagsResult<Flag> {
        self.inner.write().delete(name)
    }

    /// See [`FlagValues::parse`].
    ///
    /// # Errors
    ///
    /// Propagates parse and flagfile errors.
    pub fn parse<I, S>(&self, argv: I) -> FlagsResult<Vec<String>>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.inner.write().parse(argv)
    }

    /// See [`FlagValues::reset`].
    pub fn reset(&self) {
        self.inner.write().reset();
    }

    /// See [`FlagValues::set_default`].
    ///
    /// # Errors
    ///
    /// Propagates lookup and validation errors.
    pub fn set_default(&self, name: &str, value: Option<FlagValue>) -> FlagsResult<()> {
        self.inner.write().set_default(name, value)
    }

    /// See [`FlagValues::set_value`].
    ///
    /// # Errors
    ///
    /// Propagates lookup and validation errors.
    pub fn set_value(&self, name: &str, value: Option<FlagValue>) -> FlagsResult<()> {
        self.inner.write().set_value(name, value)
    }

    /// See [`FlagValues::contains`].
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.inner.read().contains(name)
    }

    /// See [`FlagValues::get`].
    ///
    /// # Errors
    ///
    /// Propagates lookup errors.
    pub fn get(&self, name: &str, fallback: impl Into<FlagValue>) -> FlagsResult<FlagValue> {
        self.inner.read().get(name, fallback)
    }

    /// See [`FlagValues::typed`].
    ///
    /// # Errors
    ///
    /// Propagates lookup and conversion errors.
    pub fn typed<T: FromFlagValue>(&self, name: &str) -> FlagsResult<Option<T>> {
        self.inner.read().typed(name)
    }

    /// See [`FlagValues::is_present`].
    ///
    /// # Errors
    ///
    /// Propagates lookup errors.
    pub fn is_present(&self, name: &str) -> FlagsResult<bool> {
        self.inner.read().is_present(name)
    }

    /// Help listing of the wrapped registry.
    #[must_use]
    pub fn help(&self) -> String {
        self.inner.read().to_string()
    }
}

impl From<FlagValues> for SharedFlagValues {
    fn from(flags: FlagValues) -> Self {
        Self::new(flags)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::thread;

    use rstest::rstest;

    use super::SharedFlagValues;
    use crate::flag::Flag;

    #[rstest]
    fn concurrent_parses_accumulate_multi_values() {
        let shared = Arc::new(SharedFlagValues::default());
        shared
            .define(Flag::multi_integer("n", "numbers"))
            .expect("valid definition");
        let handles: Vec<_> = (0..4)
            .map(|idx| {
                let flags = Arc::clone(&shared);
                thread::spawn(move || {
                    flags
                        .parse(["prog".to_owned(), format!("--n={idx}")])
                        .expect("valid argv");
                })
            })
            .collect();
        for handle in handles {
            handle.join().expect("parser thread panicked");
        }
        let mut values = shared
            .typed::<Vec<i64>>("n")
            .expect("flag exists")
            .expect("flag was set");
        values.sort_unstable();
        assert_eq!(values, [0, 1, 2, 3]);
    }

    #[rstest]
    fn guards_expose_the_registry() {
        let shared = SharedFlagValues::default();
        shared
            .define(Flag::string("name", "who").default("x"))
            .expect("valid definition");
        shared.write().set_from_str("name", "y").expect("string value");
        assert!(shared.read().is_present("name").expect("flag exists"));
        shared.reset();
        assert!(shared.help().contains("--name:"));
        assert!(!shared.is_present("name").expect("flag exists"));
    }
}
