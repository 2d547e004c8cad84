//! Rendering a flag back into argv tokens.

use super::Flag;
use crate::value::FlagValue;

impl Flag {
    /// Renders the current value as argv tokens that re-parse to it.
    ///
    /// Unset flags yield no tokens. Booleans render as `--name` or
    /// `--noname`, multi-valued flags as one `--name=element` token per
    /// element, everything else as a single `--name=value` token.
    ///
    /// # Examples
    ///
    /// ```
    /// use ortho_flags::Flag;
    ///
    /// let verbose = Flag::boolean("verbose", "chatty output").default(false);
    /// assert_eq!(verbose.serialize(), ["--noverbose"]);
    ///
    /// let tags = Flag::multi_string("tag", "labels").default(vec!["a", "b"]);
    /// assert_eq!(tags.serialize(), ["--tag=a", "--tag=b"]);
    /// ```
    #[must_use]
    pub fn serialize(&self) -> Vec<String> {
        let Some(value) = &self.value else {
            return Vec::new();
        };
        match value {
            FlagValue::Bool(true) if self.is_boolean() => vec![format!("--{}", self.name)],
            FlagValue::Bool(false) if self.is_boolean() => vec![format!("--no{}", self.name)],
            FlagValue::Multi(items) => items
                .iter()
                .map(|item| format!("--{}={}", self.name, self.coercer.render(item)))
                .collect(),
            scalar => vec![format!("--{}={}", self.name, self.coercer.render(scalar))],
        }
    }
}
