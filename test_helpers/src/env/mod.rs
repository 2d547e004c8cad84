//! Guards for environment variables read by `--fromenv`.
//!
//! Every mutation takes a global re-entrant mutex and returns a guard that
//! puts the previous value back (or removes the variable) when dropped.
//! Guards for the same key restore in LIFO order. Hold [`lock`] when a test
//! needs several variables to change together.
//!
//! # Examples
//!
//! ```
//! use test_helpers::env;
//!
//! let _verbose = env::set_flag("verbose", "true");
//! assert_eq!(std::env::var("FLAGS_verbose").as_deref(), Ok("true"));
//! ```

use parking_lot::{ReentrantMutex, ReentrantMutexGuard};
use std::env;
use std::ffi::{OsStr, OsString};
use std::fmt;
use std::sync::LazyLock;

/// Prefix the flag parser uses unless configured otherwise.
pub const FLAG_PREFIX: &str = "FLAGS_";

static ENV_MUTEX: LazyLock<ReentrantMutex<()>> = LazyLock::new(ReentrantMutex::default);

/// Restores one variable on drop.
#[must_use = "dropping restores the prior value"]
pub struct EnvVarGuard {
    key: String,
    original: Option<OsString>,
}

impl EnvVarGuard {
    /// Variable this guard restores.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }
}

impl fmt::Debug for EnvVarGuard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EnvVarGuard")
            .field("key", &self.key)
            .field("had_original", &self.original.is_some())
            .finish_non_exhaustive()
    }
}

impl Drop for EnvVarGuard {
    fn drop(&mut self) {
        let _held = ENV_MUTEX.lock();
        match self.original.take() {
            // SAFETY: `ENV_MUTEX` is held.
            Some(value) => unsafe { env::set_var(&self.key, value) },
            // SAFETY: `ENV_MUTEX` is held.
            None => unsafe { env::remove_var(&self.key) },
        }
    }
}

/// Holds the environment mutex; variables changed through it stay
/// consistent with each other until it is dropped.
#[must_use = "dropping releases the environment lock"]
pub struct EnvLock {
    _held: ReentrantMutexGuard<'static, ()>,
}

impl EnvLock {
    /// Sets `key` while the lock is held.
    pub fn set_var(&self, key: impl Into<String>, value: impl AsRef<OsStr>) -> EnvVarGuard {
        replace(key.into(), Some(value.as_ref()))
    }

    /// Removes `key` while the lock is held.
    pub fn remove_var(&self, key: impl Into<String>) -> EnvVarGuard {
        replace(key.into(), None)
    }
}

/// Several guards restored under the lock.
#[must_use = "dropping releases the environment lock and restores guards"]
pub struct EnvScope {
    guards: Vec<EnvVarGuard>,
    _lock: EnvLock,
}

impl Drop for EnvScope {
    fn drop(&mut self) {
        // Restore while `_lock` is still held.
        self.guards.clear();
    }
}

fn replace(key: String, value: Option<&OsStr>) -> EnvVarGuard {
    let _held = ENV_MUTEX.lock();
    let original = env::var_os(&key);
    match value {
        // SAFETY: `ENV_MUTEX` is held.
        Some(new) => unsafe { env::set_var(&key, new) },
        // SAFETY: `ENV_MUTEX` is held.
        None => unsafe { env::remove_var(&key) },
    }
    EnvVarGuard { key, original }
}

/// Name of the variable `--fromenv=name` reads.
#[must_use]
pub fn flag_var(name: &str) -> String {
    format!("{FLAG_PREFIX}{name}")
}

/// Sets an arbitrary variable.
pub fn set_var(key: impl Into<String>, value: impl AsRef<OsStr>) -> EnvVarGuard {
    replace(key.into(), Some(value.as_ref()))
}

/// Removes an arbitrary variable.
pub fn remove_var(key: impl Into<String>) -> EnvVarGuard {
    replace(key.into(), None)
}

/// Sets `FLAGS_<name>`.
pub fn set_flag(name: &str, value: impl AsRef<OsStr>) -> EnvVarGuard {
    set_var(flag_var(name), value)
}

/// Removes `FLAGS_<name>`.
pub fn remove_flag(name: &str) -> EnvVarGuard {
    remove_var(flag_var(name))
}

/// Acquires the environment lock until the returned value is dropped.
pub fn lock() -> EnvLock {
    EnvLock {
        _held: ENV_MUTEX.lock(),
    }
}

/// Builds guards under the lock and keeps the lock until the scope drops.
///
/// # Examples
///
/// ```
/// use test_helpers::env;
///
/// let _scope = env::scope_with(|lock| {
///     vec![lock.set_var("FLAGS_a", "1"), lock.remove_var("FLAGS_b")]
/// });
/// assert_eq!(std::env::var("FLAGS_a").as_deref(), Ok("1"));
/// ```
pub fn scope_with<F>(builder: F) -> EnvScope
where
    F: FnOnce(&EnvLock) -> Vec<EnvVarGuard>,
{
    let held = lock();
    let guards = builder(&held);
    EnvScope {
        guards,
        _lock: held,
    }
}

#[cfg(test)]
mod tests;
