//! Boolean literal parsing.

use crate::error::CoerceError;

const TRUE_FORMS: [&str; 5] = ["true", "1", "t", "yes", "y"];
const FALSE_FORMS: [&str; 5] = ["false", "0", "f", "no", "n"];

/// Parses the case-insensitive boolean spellings.
pub(super) fn parse(raw: &str) -> Result<bool, CoerceError> {
    let matches = |forms: &[&str]| forms.iter().any(|form| form.eq_ignore_ascii_case(raw));
    if matches(&TRUE_FORMS) {
        Ok(true)
    } else if matches(&FALSE_FORMS) {
        Ok(false)
    } else {
        Err(CoerceError::new("value should be one of true/false/1/0/yes/no/t/f/y/n"))
    }
}

pub(super) const fn render(value: bool) -> &'static str {
    if value { "true" } else { "false" }
}
