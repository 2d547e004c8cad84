//! Separator-delimited list flags.

use serde::Serialize;

/// How a list flag splits its argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ListSeparator {
    /// Split on `,` and trim each element.
    #[default]
    Comma,
    /// Split on runs of whitespace, newlines included.
    Whitespace,
}

impl ListSeparator {
    /// Splits `raw` into elements. Empty input yields an empty list.
    #[must_use]
    pub fn split(self, raw: &str) -> Vec<String> {
        match self {
            Self::Comma => {
                if raw.trim().is_empty() {
                    return Vec::new();
                }
                raw.split(',').map(|item| item.trim().to_owned()).collect()
            }
            Self::Whitespace => raw.split_whitespace().map(str::to_owned).collect(),
        }
    }

    /// Joins `items` so that [`Self::split`] returns them unchanged.
    #[must_use]
    pub fn join(self, items: &[String]) -> String {
        match self {
            Self::Comma => items.join(","),
            Self::Whitespace => items.join(" "),
        }
    }

    pub(super) const fn help(self) -> &'static str {
        match self {
            Self::Comma => "a comma separated list",
            Self::Whitespace => "a whitespace separated list",
        }
    }
}
