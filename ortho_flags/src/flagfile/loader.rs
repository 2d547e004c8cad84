//! Reads flagfiles, expanding nested directives depth-first.

use std::collections::HashSet;
use std::path::PathBuf;

use super::{Directive, Expansion, classify};
use super::path::{canonicalise, expand_home, normalise_cycle_key, to_utf8_path};
use crate::error::{FlagsError, FlagsResult};

/// Tracks the inclusion path while files are expanded.
pub(super) struct Loader<'a> {
    report: &'a mut Expansion,
    visited: HashSet<PathBuf>,
    stack: Vec<PathBuf>,
}

impl<'a> Loader<'a> {
    pub(super) fn new(report: &'a mut Expansion) -> Self {
        Self {
            report,
            visited: HashSet::new(),
            stack: Vec::new(),
        }
    }

    /// Returns the tokens of the flagfile at `raw`, nested files included.
    ///
    /// A file already open on the current inclusion path yields no tokens.
    pub(super) fn read(&mut self, raw: &str) -> FlagsResult<Vec<String>> {
        let path = expand_home(raw);
        let canonical = canonicalise(&path)?;
        let key = normalise_cycle_key(&canonical);
        if !self.visited.insert(key.clone()) {
            let mut chain: Vec<String> = self
                .stack
                .iter()
                .map(|entry| entry.display().to_string())
                .collect();
            chain.push(canonical.display().to_string());
            tracing::warn!(
                path = %canonical.display(),
                chain = %chain.join(" -> "),
                "skipping circular flagfile reference"
            );
            self.report.skipped.push(to_utf8_path(&canonical));
            return Ok(Vec::new());
        }
        let contents =
            std::fs::read_to_string(&canonical).map_err(|err| FlagsError::flagfile(&path, err))?;
        tracing::debug!(path = %canonical.display(), "reading flagfile");
        self.report.files.push(to_utf8_path(&canonical));
        self.stack.push(canonical);
        let result = self.tokens(&contents);
        self.visited.remove(&key);
        self.stack.pop();
        result
    }

    /// Splits flagfile text into tokens, dropping comments and blank lines.
    ///
    /// A `--flagfile` line takes its path from the next remaining line.
    pub(super) fn tokens(&mut self, text: &str) -> FlagsResult<Vec<String>> {
        let mut tokens = Vec::new();
        let mut lines = text.lines().map(str::trim).filter(|line| {
            !(line.is_empty() || line.starts_with('#') || line.starts_with("//"))
        });
        while let Some(line) = lines.next() {
            match classify(line) {
                Some(Directive::Inline(nested)) => tokens.extend(self.read(nested)?),
                Some(Directive::Detached) => {
                    let nested = lines
                        .next()
                        .ok_or_else(|| FlagsError::missing_argument(line))?;
                    tokens.extend(self.read(nested)?);
                }
                None => tokens.push(line.to_owned()),
            }
        }
        Ok(tokens)
    }
}
