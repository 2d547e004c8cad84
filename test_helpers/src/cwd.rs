//! A guard for the process working directory.
//!
//! Relative flagfile paths resolve against the working directory, so tests
//! exercising them move into a temporary directory. The guard holds a global
//! mutex for its lifetime and moves back on drop.
//!
//! # Examples
//!
//! ```no_run
//! use test_helpers::cwd;
//!
//! let guard = cwd::enter("/tmp").expect("enter directory");
//! assert!(guard.previous().is_absolute());
//! ```

use anyhow::{Context, Result, anyhow};
use camino::{Utf8Path, Utf8PathBuf};
use parking_lot::{Mutex, MutexGuard};
use std::path::Path;
use std::sync::LazyLock;

static CWD_MUTEX: LazyLock<Mutex<()>> = LazyLock::new(Mutex::default);

/// Moves back to the previous working directory on drop.
#[must_use = "dropping restores the prior working directory"]
pub struct CwdGuard {
    previous: Utf8PathBuf,
    _lock: MutexGuard<'static, ()>,
}

impl CwdGuard {
    /// Directory that will be restored.
    #[must_use]
    pub fn previous(&self) -> &Utf8Path {
        &self.previous
    }

    /// Restores the previous directory, reporting failure.
    ///
    /// # Errors
    ///
    /// Returns the I/O error from `set_current_dir`.
    pub fn restore(&self) -> std::io::Result<()> {
        std::env::set_current_dir(&self.previous)
    }
}

impl Drop for CwdGuard {
    fn drop(&mut self) {
        // Call `restore` first to observe failures.
        let _unused = std::env::set_current_dir(&self.previous);
    }
}

/// Makes `path` the working directory until the guard drops.
///
/// The previous directory is captured as UTF-8 before moving, so a
/// conversion failure leaves the process where it was.
///
/// # Errors
///
/// Returns an error when the current directory cannot be read or is not
/// UTF-8, or when `path` cannot be entered.
pub fn enter(path: impl AsRef<Path>) -> Result<CwdGuard> {
    let lock = CWD_MUTEX.lock();
    let current = std::env::current_dir().context("read current dir")?;
    let previous = Utf8PathBuf::from_path_buf(current)
        .map_err(|raw| anyhow!("cwd is not valid UTF-8: {}", raw.display()))?;
    std::env::set_current_dir(path.as_ref())
        .with_context(|| format!("enter {}", path.as_ref().display()))?;
    Ok(CwdGuard {
        previous,
        _lock: lock,
    })
}
