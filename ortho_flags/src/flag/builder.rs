//! Constructors and builder-style modifiers for [`Flag`].

use num_traits::ToPrimitive;

use super::Flag;
use crate::coerce::{Bounds, Coercer, ListSeparator};
use crate::error::CoerceError;
use crate::value::FlagValue;

impl Flag {
    /// Creates a scalar flag with the given coercer and no default.
    #[must_use]
    pub fn new(name: impl Into<String>, coercer: Coercer, help: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            short_name: None,
            help: help.into(),
            module: None,
            coercer,
            multiple: false,
            allow_override: false,
            default: None,
            value: None,
            present: 0,
            definition_error: None,
        }
    }

    /// Boolean switch; also settable with `--no<name>`.
    #[must_use]
    pub fn boolean(name: impl Into<String>, help: impl Into<String>) -> Self {
        Self::new(name, Coercer::Boolean, help)
    }

    /// Unbounded integer flag; see [`Self::lower_bound`].
    #[must_use]
    pub fn integer(name: impl Into<String>, help: impl Into<String>) -> Self {
        Self::new(name, Coercer::Integer(Bounds::default()), help)
    }

    /// Floating point flag.
    #[must_use]
    pub fn float(name: impl Into<String>, help: impl Into<String>) -> Self {
        Self::new(name, Coercer::Float(Bounds::default()), help)
    }

    /// Free-form string flag.
    #[must_use]
    pub fn string(name: impl Into<String>, help: impl Into<String>) -> Self {
        Self::new(name, Coercer::String, help)
    }

    /// Flag restricted to one of `choices`, matched case-sensitively.
    #[must_use]
    pub fn enumeration<I, S>(name: impl Into<String>, choices: I, help: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let allowed = choices.into_iter().map(Into::into).collect();
        Self::new(name, Coercer::Enum(allowed), help)
    }

    /// Comma separated list flag.
    #[must_use]
    pub fn list(name: impl Into<String>, help: impl Into<String>) -> Self {
        Self::new(name, Coercer::List(ListSeparator::Comma), help)
    }

    /// Whitespace separated list flag.
    #[must_use]
    pub fn spaceseplist(name: impl Into<String>, help: impl Into<String>) -> Self {
        Self::new(name, Coercer::List(ListSeparator::Whitespace), help)
    }

    /// Repeatable string flag; every occurrence adds one element.
    #[must_use]
    pub fn multi_string(name: impl Into<String>, help: impl Into<String>) -> Self {
        Self::string(name, help).multiple()
    }

    /// Repeatable integer flag.
    #[must_use]
    pub fn multi_integer(name: impl Into<String>, help: impl Into<String>) -> Self {
        Self::integer(name, help).multiple()
    }

    /// Repeatable float flag.
    #[must_use]
    pub fn multi_float(name: impl Into<String>, help: impl Into<String>) -> Self {
        Self::float(name, help).multiple()
    }

    /// Makes occurrences accumulate. Existing defaults are wrapped into a
    /// sequence.
    #[must_use]
    pub fn multiple(mut self) -> Self {
        self.multiple = true;
        if let Some(default) = self.default.take() {
            self.default = Some(self.as_sequence(default));
            self.value.clone_from(&self.default);
        }
        self
    }

    /// Declares a single-character alias, used as `-c`.
    #[must_use]
    pub const fn short_name(mut self, short: char) -> Self {
        self.short_name = Some(short);
        self
    }

    /// Files the flag under a module or section label for help output.
    #[must_use]
    pub fn module(mut self, label: impl Into<String>) -> Self {
        self.module = Some(label.into());
        self
    }

    /// Permits a later definition with the same name to replace this one.
    #[must_use]
    pub const fn allow_override(mut self, allow: bool) -> Self {
        self.allow_override = allow;
        self
    }

    /// Sets a typed default, checked when the flag is defined.
    ///
    /// For multi-valued flags a scalar becomes a one-element sequence and a
    /// list is coerced element by element.
    #[must_use]
    pub fn default(mut self, value: impl Into<FlagValue>) -> Self {
        let typed = self.widen(value.into());
        let normalised = if self.multiple {
            self.as_sequence(typed)
        } else {
            typed
        };
        self.default = Some(normalised);
        self.value.clone_from(&self.default);
        self
    }

    /// Sets the default from its string form, coerced like an argv value.
    #[must_use]
    pub fn default_str(self, raw: &str) -> Self {
        match self.coercer.coerce(raw) {
            Ok(value) => self.default(value),
            Err(err) => self.with_definition_error(raw, err),
        }
    }

    /// Inclusive lower bound for integer and float flags.
    #[must_use]
    pub fn lower_bound(self, bound: impl Into<FlagValue>) -> Self {
        self.bound(bound.into(), true)
    }

    /// Inclusive upper bound for integer and float flags.
    #[must_use]
    pub fn upper_bound(self, bound: impl Into<FlagValue>) -> Self {
        self.bound(bound.into(), false)
    }

    fn bound(mut self, bound: FlagValue, lower: bool) -> Self {
        let applied = match (&mut self.coercer, &bound) {
            (Coercer::Integer(bounds), FlagValue::Int(limit)) => {
                set_limit(bounds, limit.clone(), lower);
                true
            }
            (Coercer::Float(bounds), FlagValue::Float(limit)) => {
                set_limit(bounds, *limit, lower);
                true
            }
            (Coercer::Float(bounds), FlagValue::Int(limit)) => limit
                .to_f64()
                .map(|converted| set_limit(bounds, converted, lower))
                .is_some(),
            _ => false,
        };
        if applied {
            self
        } else {
            let raw = bound.to_string();
            self.with_definition_error(&raw, CoerceError::new("bound does not match flag kind"))
        }
    }

    fn as_sequence(&mut self, value: FlagValue) -> FlagValue {
        match value {
            FlagValue::Multi(_) => value,
            FlagValue::List(items) => {
                let mut elements = Vec::with_capacity(items.len());
                for item in items {
                    match self.coercer.coerce(&item) {
                        Ok(element) => elements.push(element),
                        Err(err) => {
                            self.definition_error.get_or_insert((item, err));
                        }
                    }
                }
                FlagValue::Multi(elements)
            }
            scalar => FlagValue::Multi(vec![scalar]),
        }
    }

    fn with_definition_error(mut self, raw: &str, err: CoerceError) -> Self {
        self.definition_error.get_or_insert((raw.to_owned(), err));
        self
    }
}

fn set_limit<T>(bounds: &mut Bounds<T>, limit: T, lower: bool) {
    if lower {
        bounds.lower = Some(limit);
    } else {
        bounds.upper = Some(limit);
    }
}
