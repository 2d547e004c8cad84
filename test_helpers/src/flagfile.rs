//! Temporary flagfiles.
//!
//! # Examples
//!
//! ```
//! use test_helpers::flagfile::FlagfileDir;
//!
//! # fn main() -> anyhow::Result<()> {
//! let dir = FlagfileDir::new()?;
//! let path = dir.write("base.flags", &["# comment", "--verbose"])?;
//! assert!(path.as_str().ends_with("base.flags"));
//! assert_eq!(dir.directive("base.flags"), format!("--flagfile={path}"));
//! # Ok(())
//! # }
//! ```

use anyhow::{Context, Result, anyhow};
use camino::{Utf8Path, Utf8PathBuf};
use tempfile::TempDir;

/// A temporary directory of flagfiles, removed on drop.
#[derive(Debug)]
pub struct FlagfileDir {
    dir: TempDir,
    root: Utf8PathBuf,
}

impl FlagfileDir {
    /// Creates an empty directory.
    ///
    /// # Errors
    ///
    /// Returns an error when the directory cannot be created or its path is
    /// not UTF-8.
    pub fn new() -> Result<Self> {
        let dir = TempDir::new().context("create flagfile directory")?;
        let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf())
            .map_err(|raw| anyhow!("temporary path is not UTF-8: {}", raw.display()))?;
        Ok(Self { dir, root })
    }

    /// Directory holding the files.
    #[must_use]
    pub fn root(&self) -> &Utf8Path {
        &self.root
    }

    /// Absolute path of `name` inside the directory.
    #[must_use]
    pub fn path(&self, name: &str) -> Utf8PathBuf {
        self.root.join(name)
    }

    /// `--flagfile=<absolute path of name>`.
    #[must_use]
    pub fn directive(&self, name: &str) -> String {
        format!("--flagfile={}", self.path(name))
    }

    /// Writes `lines` to `name`, one per line, and returns the path.
    ///
    /// # Errors
    ///
    /// Returns an error when the file cannot be written.
    pub fn write(&self, name: &str, lines: &[&str]) -> Result<Utf8PathBuf> {
        let path = self.path(name);
        let mut body = lines.join("\n");
        body.push('\n');
        std::fs::write(self.dir.path().join(name), body)
            .with_context(|| format!("write flagfile {path}"))?;
        Ok(path)
    }
}
