//! Writing flags out as flagfile text and reading them back.

use std::fs::OpenOptions;
use std::io::Write as _;
use std::path::Path;

use super::FlagValues;
use crate::error::{FlagsError, FlagsResult};
use crate::flagfile;

const SYNTHETIC_PROGRAM: &str = "<flags>";

impl FlagValues {
    /// Serialises every flag holding a value, one token per line, in
    /// declaration order. The output is valid flagfile text.
    #[must_use]
    pub fn flags_into_string(&self) -> String {
        let mut text = String::new();
        for token in self.flags.values().flat_map(crate::flag::Flag::serialize) {
            text.push_str(&token);
            text.push('\n');
        }
        text
    }

    /// Appends [`Self::flags_into_string`] to the file at `path`, creating it
    /// when missing.
    ///
    /// # Errors
    ///
    /// Returns [`FlagsError::Write`] when the file cannot be opened or
    /// written.
    pub fn append_flags_into_file(&self, path: impl AsRef<Path>) -> FlagsResult<()> {
        let target = path.as_ref();
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(target)
            .map_err(|err| FlagsError::write(target, err))?;
        file.write_all(self.flags_into_string().as_bytes())
            .map_err(|err| FlagsError::write(target, err))?;
        tracing::debug!(path = %target.display(), "flags appended to file");
        Ok(())
    }

    /// Applies flagfile-format `text` as if its tokens followed the program
    /// name on the command line.
    ///
    /// The registry is left untouched when any token fails.
    ///
    /// # Errors
    ///
    /// Propagates flagfile and parse errors, and returns
    /// [`FlagsError::UnexpectedArgument`] for a token that is not a flag.
    pub fn read_flags_from_string(&mut self, text: &str) -> FlagsResult<()> {
        let expansion = flagfile::expand_text(text)?;
        self.apply_all_or_nothing(expansion.tokens)
    }

    /// Like [`Self::read_flags_from_string`] for the file at `path`.
    ///
    /// # Errors
    ///
    /// Propagates flagfile and parse errors, and returns
    /// [`FlagsError::UnexpectedArgument`] for a token that is not a flag.
    pub fn read_from_flags_file(&mut self, path: impl AsRef<Path>) -> FlagsResult<()> {
        let directive = format!("--flagfile={}", path.as_ref().display());
        let expansion = flagfile::expand(&[SYNTHETIC_PROGRAM, directive.as_str()], false)?;
        self.apply_all_or_nothing(expansion.tokens.into_iter().skip(1).collect())
    }

    fn apply_all_or_nothing(&mut self, tokens: Vec<String>) -> FlagsResult<()> {
        let mut argv = Vec::with_capacity(tokens.len() + 1);
        argv.push(SYNTHETIC_PROGRAM.to_owned());
        argv.extend(tokens);
        let snapshot = self.save();
        let outcome = self.parse_expanded(argv).and_then(|residue| {
            residue
                .into_iter()
                .nth(1)
                .map_or(Ok(()), |token| Err(FlagsError::unexpected_argument(token)))
        });
        if outcome.is_err() {
            self.restore(&snapshot);
        }
        outcome
    }
}
