//! `--fromenv` and `--tryfromenv`.

use std::env::{self, VarError};

use super::Parser;
use crate::error::{CoerceError, FlagsError, FlagsResult};

const RECURSIVE: [&str; 2] = ["fromenv", "tryfromenv"];

impl Parser<'_> {
    /// Sets every flag named in the comma separated `list` from the
    /// environment. With `required` unset, missing variables are skipped.
    pub(super) fn apply_env(&mut self, list: &str, required: bool) -> FlagsResult<()> {
        for name in list.split(',').map(str::trim).filter(|name| !name.is_empty()) {
            let canonical = self
                .flags
                .canonical(name)
                .ok_or_else(|| FlagsError::unknown(name))?
                .to_owned();
            let var = format!("{}{name}", self.options.env_prefix_str());
            let value = match env::var(&var) {
                Ok(value) => value,
                Err(VarError::NotPresent) if !required => {
                    tracing::debug!(var = %var, "optional environment flag not set");
                    continue;
                }
                Err(VarError::NotPresent) => return Err(FlagsError::missing_env(var)),
                Err(VarError::NotUnicode(_)) => {
                    return Err(FlagsError::illegal_value(
                        &canonical,
                        &var,
                        &CoerceError::new("environment value is not valid UTF-8"),
                    ));
                }
            };
            if RECURSIVE.contains(&value.as_str()) {
                return Err(FlagsError::illegal_value(
                    &canonical,
                    &value,
                    &CoerceError::new("environment value would recurse into --fromenv"),
                ));
            }
            tracing::debug!(flag = %canonical, var = %var, "flag read from environment");
            self.assign(&canonical, &value)?;
        }
        Ok(())
    }
}
