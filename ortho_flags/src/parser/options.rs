//! Parser configuration.

/// Default prefix prepended to flag names by `--fromenv`.
pub const DEFAULT_ENV_PREFIX: &str = "FLAGS_";

/// Knobs controlling [`crate::FlagValues::parse`].
///
/// # Examples
///
/// ```
/// use ortho_flags::ParseOptions;
///
/// let options = ParseOptions::default()
///     .interspersed(true)
///     .env_prefix("MYAPP_");
/// assert!(options.is_interspersed());
/// assert!(options.allows_abbreviations());
/// assert_eq!(options.env_prefix_str(), "MYAPP_");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseOptions {
    interspersed: bool,
    allow_abbreviations: bool,
    env_prefix: String,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            interspersed: false,
            allow_abbreviations: true,
            env_prefix: DEFAULT_ENV_PREFIX.to_owned(),
        }
    }
}

impl ParseOptions {
    /// Keep parsing flags after positional arguments, collecting the
    /// positionals into the residue.
    #[must_use]
    pub const fn interspersed(mut self, enabled: bool) -> Self {
        self.interspersed = enabled;
        self
    }

    /// Accept unique prefixes of long flag names.
    #[must_use]
    pub const fn allow_abbreviations(mut self, enabled: bool) -> Self {
        self.allow_abbreviations = enabled;
        self
    }

    /// Prefix for variables read by `--fromenv` and `--tryfromenv`.
    #[must_use]
    pub fn env_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.env_prefix = prefix.into();
        self
    }

    /// Whether positional arguments may be interleaved with flags.
    #[must_use]
    pub const fn is_interspersed(&self) -> bool {
        self.interspersed
    }

    /// Whether unique prefixes resolve to flags.
    #[must_use]
    pub const fn allows_abbreviations(&self) -> bool {
        self.allow_abbreviations
    }

    /// Prefix for environment lookups.
    #[must_use]
    pub fn env_prefix_str(&self) -> &str {
        &self.env_prefix
    }
}
