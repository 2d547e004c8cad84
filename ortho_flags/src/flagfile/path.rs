//! Path helpers for flagfile resolution and cycle detection.

use std::path::{Path, PathBuf};

use camino::Utf8PathBuf;

use crate::error::{FlagsError, FlagsResult};

/// Expands a leading `~` to the current user's home directory.
///
/// Paths without the prefix, or environments without a home directory, are
/// returned unchanged.
pub(crate) fn expand_home(raw: &str) -> PathBuf {
    let rest = match raw.strip_prefix('~') {
        Some("") => Some(""),
        Some(tail) => tail.strip_prefix('/').or_else(|| tail.strip_prefix('\\')),
        None => None,
    };
    match (rest, dirs::home_dir()) {
        (Some(""), Some(home)) => home,
        (Some(tail), Some(home)) => home.join(tail),
        _ => PathBuf::from(raw),
    }
}

/// Canonicalise `path` using platform-specific rules.
///
/// On Windows [`dunce`] avoids UNC prefixes leaking into diagnostics.
pub(crate) fn canonicalise(path: &Path) -> FlagsResult<PathBuf> {
    #[cfg(windows)]
    {
        dunce::canonicalize(path).map_err(|err| FlagsError::flagfile(path, err))
    }
    #[cfg(not(windows))]
    {
        std::fs::canonicalize(path).map_err(|err| FlagsError::flagfile(path, err))
    }
}

/// Normalise a canonical path so case-insensitive filesystems cannot hide a
/// cycle behind different spellings.
pub(crate) fn normalise_cycle_key(path: &Path) -> PathBuf {
    #[cfg(windows)]
    {
        use std::ffi::OsString;
        use std::os::windows::ffi::{OsStrExt, OsStringExt};

        // ASCII-only folding, matching how Windows compares paths.
        let lowered: Vec<u16> = path
            .as_os_str()
            .encode_wide()
            .map(|unit| {
                if (u16::from(b'A')..=u16::from(b'Z')).contains(&unit) {
                    unit + 32
                } else {
                    unit
                }
            })
            .collect();
        PathBuf::from(OsString::from_wide(&lowered))
    }

    #[cfg(target_os = "macos")]
    {
        match path.to_str() {
            Some(text) => PathBuf::from(text.to_lowercase()),
            None => path.to_path_buf(),
        }
    }

    #[cfg(not(any(windows, target_os = "macos")))]
    {
        path.to_path_buf()
    }
}

/// Converts a canonical path to UTF-8, falling back to lossy conversion.
pub(crate) fn to_utf8_path(path: &Path) -> Utf8PathBuf {
    Utf8PathBuf::from_path_buf(path.to_path_buf())
        .unwrap_or_else(|raw| Utf8PathBuf::from(raw.to_string_lossy().into_owned()))
}
