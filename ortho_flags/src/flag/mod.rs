//! A single flag: definition, current value and presence.

mod builder;
mod serialize;

use num_traits::ToPrimitive;

use crate::coerce::{Coercer, FlagKind};
use crate::error::{CoerceError, FlagsError, FlagsResult};
use crate::value::FlagValue;

const REPEAT_TIP: &str = "repeat this option to specify a list of values";

/// A named, typed configurable parameter.
///
/// Flags are built with the constructors in this module (for example
/// [`Flag::integer`]) and handed to [`crate::FlagValues::define`], which
/// validates the definition and takes ownership.
///
/// # Examples
///
/// ```
/// use ortho_flags::{Flag, FlagValues};
///
/// # fn main() -> ortho_flags::FlagsResult<()> {
/// let mut flags = FlagValues::new();
/// flags.define(
///     Flag::integer("repeat", "how many times to repeat")
///         .default(4)
///         .lower_bound(0)
///         .short_name('r'),
/// )?;
/// let rest = flags.parse(["prog", "-r", "7", "input.txt"])?;
/// assert_eq!(rest, ["prog", "input.txt"]);
/// assert_eq!(flags.typed::<i64>("repeat")?, Some(7));
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Flag {
    name: String,
    short_name: Option<char>,
    help: String,
    module: Option<String>,
    coercer: Coercer,
    multiple: bool,
    allow_override: bool,
    default: Option<FlagValue>,
    value: Option<FlagValue>,
    present: u32,
    definition_error: Option<(String, CoerceError)>,
}

impl Flag {
    /// Canonical name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Single-character alias, if declared.
    #[must_use]
    pub const fn short(&self) -> Option<char> {
        self.short_name
    }

    /// Help text shown in listings.
    #[must_use]
    pub fn help(&self) -> &str {
        &self.help
    }

    /// Module or section label the flag was declared under.
    #[must_use]
    pub fn module_label(&self) -> Option<&str> {
        self.module.as_deref()
    }

    /// Declared kind of the flag (the element kind for multi-valued flags).
    #[must_use]
    pub const fn kind(&self) -> FlagKind {
        self.coercer.kind()
    }

    /// Coercion rules applied to every value of this flag.
    #[must_use]
    pub const fn coercer(&self) -> &Coercer {
        &self.coercer
    }

    /// Whether occurrences accumulate instead of overwriting.
    #[must_use]
    pub const fn is_multiple(&self) -> bool {
        self.multiple
    }

    /// Whether the flag is a boolean switch supporting `--no<name>`.
    #[must_use]
    pub const fn is_boolean(&self) -> bool {
        matches!(self.coercer, Coercer::Boolean) && !self.multiple
    }

    /// Whether a later definition may replace this one.
    #[must_use]
    pub const fn overridable(&self) -> bool {
        self.allow_override
    }

    /// Default value; `None` is the unset sentinel.
    #[must_use]
    pub const fn default_value(&self) -> Option<&FlagValue> {
        self.default.as_ref()
    }

    /// Current value; `None` when unset.
    #[must_use]
    pub const fn value(&self) -> Option<&FlagValue> {
        self.value.as_ref()
    }

    /// Number of occurrences applied since the last reset.
    #[must_use]
    pub const fn present(&self) -> u32 {
        self.present
    }

    /// Whether any occurrence has been applied since the last reset.
    #[must_use]
    pub const fn is_present(&self) -> bool {
        self.present > 0
    }

    /// Canonical string form of the default, or `None` when unset.
    #[must_use]
    pub fn default_as_str(&self) -> Option<String> {
        self.default.as_ref().map(|value| self.render(value))
    }

    /// Canonical string form of the current value, or `None` when unset.
    #[must_use]
    pub fn value_as_str(&self) -> Option<String> {
        self.value.as_ref().map(|value| self.render(value))
    }

    /// Syntax tip for help output; empty when the kind needs none.
    #[must_use]
    pub fn tip(&self) -> String {
        let base = self.coercer.syntactic_help();
        match (self.multiple, base.is_empty()) {
            (false, _) => base,
            (true, true) => REPEAT_TIP.to_owned(),
            (true, false) => format!("{base}; {REPEAT_TIP}"),
        }
    }

    /// Coerces `raw` and applies it as one occurrence.
    ///
    /// Scalar flags are overwritten. Multi-valued flags whose value still
    /// equals the default start a fresh sequence; otherwise `raw` is appended.
    ///
    /// # Errors
    ///
    /// Returns [`FlagsError::IllegalValue`] when `raw` fails coercion.
    pub fn parse(&mut self, raw: &str) -> FlagsResult<()> {
        self.apply(raw, false)
    }

    /// Applies one occurrence. `continuing` is set when the current parse
    /// already applied an occurrence of this flag, so multi-valued flags
    /// always append.
    pub(crate) fn apply(&mut self, raw: &str, continuing: bool) -> FlagsResult<()> {
        let parsed = self
            .coercer
            .coerce(raw)
            .map_err(|err| FlagsError::illegal_value(&self.name, raw, &err))?;
        if self.multiple {
            let fresh = !continuing && self.value == self.default;
            match (&mut self.value, fresh) {
                (Some(FlagValue::Multi(items)), false) => items.push(parsed),
                _ => self.value = Some(FlagValue::Multi(vec![parsed])),
            }
        } else {
            self.value = Some(parsed);
        }
        self.present = self.present.saturating_add(1);
        tracing::debug!(flag = %self.name, value = raw, "flag set");
        Ok(())
    }

    /// Replaces the current value without marking the flag present.
    ///
    /// Multi-valued flags accept a single element, which becomes a
    /// one-element sequence.
    ///
    /// # Errors
    ///
    /// Returns [`FlagsError::IllegalValue`] when the value does not satisfy
    /// the flag's kind, bounds or choices.
    pub fn set_value(&mut self, value: Option<FlagValue>) -> FlagsResult<()> {
        self.value = self.checked(value)?;
        Ok(())
    }

    /// Changes the default, and the current value unless the flag is present.
    ///
    /// # Errors
    ///
    /// Returns [`FlagsError::IllegalValue`] when the value does not satisfy
    /// the flag's kind, bounds or choices.
    pub fn set_default(&mut self, value: Option<FlagValue>) -> FlagsResult<()> {
        let checked = self.checked(value)?;
        if !self.is_present() {
            self.value.clone_from(&checked);
        }
        self.default = checked;
        Ok(())
    }

    /// Like [`Self::set_default`], coercing `raw` first.
    ///
    /// # Errors
    ///
    /// Returns [`FlagsError::IllegalValue`] when `raw` fails coercion.
    pub fn set_default_str(&mut self, raw: Option<&str>) -> FlagsResult<()> {
        let value = raw
            .map(|text| {
                self.coercer
                    .coerce(text)
                    .map_err(|err| FlagsError::illegal_value(&self.name, text, &err))
            })
            .transpose()?;
        self.set_default(value)
    }

    /// Restores the default and clears presence.
    pub fn reset(&mut self) {
        self.value.clone_from(&self.default);
        self.present = 0;
    }

    pub(crate) const fn clear_short_name(&mut self) {
        self.short_name = None;
    }

    pub(crate) fn restore_state(
        &mut self,
        value: Option<FlagValue>,
        default: Option<FlagValue>,
        present: u32,
    ) {
        self.value = value;
        self.default = default;
        self.present = present;
    }

    /// Validates a definition before registration.
    pub(crate) fn check_definition(&self) -> FlagsResult<()> {
        if let Some((raw, err)) = &self.definition_error {
            return Err(FlagsError::illegal_value(&self.name, raw, err));
        }
        if let Some(default) = &self.default {
            self.validate(default)?;
        }
        Ok(())
    }

    fn checked(&self, value: Option<FlagValue>) -> FlagsResult<Option<FlagValue>> {
        let Some(given) = value.map(|raw| self.widen(raw)) else {
            return Ok(None);
        };
        let normalised = match given {
            FlagValue::Multi(_) => given,
            scalar if self.multiple => FlagValue::Multi(vec![scalar]),
            scalar => scalar,
        };
        self.validate(&normalised)?;
        Ok(Some(normalised))
    }

    /// Integers given to float flags become floats.
    fn widen(&self, value: FlagValue) -> FlagValue {
        match (&self.coercer, value) {
            (Coercer::Float(_), FlagValue::Int(number)) => number
                .to_f64()
                .map_or_else(|| FlagValue::Int(number), FlagValue::Float),
            (_, FlagValue::Multi(items)) => {
                FlagValue::Multi(items.into_iter().map(|item| self.widen(item)).collect())
            }
            (_, other) => other,
        }
    }

    fn validate(&self, value: &FlagValue) -> FlagsResult<()> {
        let result = match value {
            FlagValue::Multi(items) if self.multiple => items
                .iter()
                .try_for_each(|item| self.coercer.validate(item)),
            FlagValue::Multi(_) => Err(CoerceError::new("flag does not accept multiple values")),
            _ if self.multiple => Err(CoerceError::new("expected a sequence of values")),
            scalar => self.coercer.validate(scalar),
        };
        result.map_err(|err| FlagsError::illegal_value(&self.name, &self.render(value), &err))
    }

    fn render(&self, value: &FlagValue) -> String {
        match value {
            FlagValue::Multi(items) => items
                .iter()
                .map(|item| self.coercer.render(item))
                .collect::<Vec<_>>()
                .join(","),
            scalar => self.coercer.render(scalar),
        }
    }
}
