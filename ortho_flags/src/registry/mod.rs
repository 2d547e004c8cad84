//! The flag registry: definitions, lookups and typed access.

mod help;
mod persist;
mod saver;

use std::collections::BTreeMap;

use indexmap::IndexMap;

pub use saver::{FlagSaver, SavedFlags};

use crate::error::{CoerceError, FlagsError, FlagsResult};
use crate::flag::Flag;
use crate::parser::ParseOptions;
use crate::prefix;
use crate::value::{FlagValue, FromFlagValue};

/// Names consumed by the parser itself.
pub const RESERVED_NAMES: [&str; 4] = ["flagfile", "fromenv", "tryfromenv", "undefok"];

const DEFAULT_MODULE: &str = "main";

/// Registry of defined flags.
///
/// Flags are stored in declaration order under their canonical name; short
/// names are aliases resolving to the same flag.
///
/// # Examples
///
/// ```
/// use ortho_flags::{Flag, FlagValue, FlagValues};
///
/// # fn main() -> ortho_flags::FlagsResult<()> {
/// let mut flags = FlagValues::new();
/// flags.define(Flag::string("name", "who to greet").default("world").short_name('n'))?;
/// assert!(flags.contains("n"));
/// assert_eq!(flags.get("name", "nobody")?, FlagValue::from("world"));
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct FlagValues {
    flags: IndexMap<String, Flag>,
    aliases: BTreeMap<char, String>,
    main_module: String,
    options: ParseOptions,
}

impl Default for FlagValues {
    fn default() -> Self {
        Self::new()
    }
}

impl FlagValues {
    /// Creates an empty registry with default parse options.
    #[must_use]
    pub fn new() -> Self {
        Self {
            flags: IndexMap::new(),
            aliases: BTreeMap::new(),
            main_module: DEFAULT_MODULE.to_owned(),
            options: ParseOptions::default(),
        }
    }

    /// Sets the label used in help output for flags declared without a
    /// module, typically the program name.
    #[must_use]
    pub fn with_main_module(mut self, label: impl Into<String>) -> Self {
        self.main_module = label.into();
        self
    }

    /// Replaces the options used by [`Self::parse`].
    #[must_use]
    pub fn with_options(mut self, options: ParseOptions) -> Self {
        self.options = options;
        self
    }

    /// Label for flags declared without a module.
    #[must_use]
    pub fn main_module(&self) -> &str {
        &self.main_module
    }

    /// Options used by [`Self::parse`].
    #[must_use]
    pub const fn options(&self) -> &ParseOptions {
        &self.options
    }

    /// Mutable access to the parse options.
    pub const fn options_mut(&mut self) -> &mut ParseOptions {
        &mut self.options
    }

    /// Registers `flag` under its canonical and short names.
    ///
    /// A taken name may only be claimed again when either definition allows
    /// overriding and neither default is unset. The replacement keeps the
    /// original's position; a short name claimed from another flag moves to
    /// the new one.
    ///
    /// # Errors
    ///
    /// - [`FlagsError::InvalidName`] for empty, reserved or unparsable names.
    /// - [`FlagsError::IllegalValue`] when the default or bounds are invalid.
    /// - [`FlagsError::DuplicateFlag`] when a name is taken and overriding is
    ///   not permitted.
    pub fn define(&mut self, flag: Flag) -> FlagsResult<()> {
        validate_name(flag.name())?;
        if let Some(short) = flag.short() {
            validate_short(short)?;
        }
        flag.check_definition()?;

        let claims = self.claims(&flag);
        for (claimed, owner) in &claims {
            let Some(existing) = self.flags.get(owner) else {
                continue;
            };
            if !may_override(existing, &flag) {
                return Err(FlagsError::duplicate(claimed.as_str()));
            }
        }
        for (claimed, owner) in claims {
            if owner == flag.name() {
                continue;
            }
            if claimed == owner {
                tracing::debug!(flag = %owner, by = flag.name(), "flag shadowed by short name");
                self.remove(&owner);
            } else if let Some(existing) = self.flags.get_mut(&owner) {
                existing.clear_short_name();
                self.aliases.retain(|_, target| *target != owner);
            }
        }

        let name = flag.name().to_owned();
        self.aliases.retain(|_, target| *target != name);
        if let Some(short) = flag.short() {
            self.aliases.insert(short, name.clone());
        }
        let replaced = self.flags.insert(name.clone(), flag).is_some();
        if replaced {
            tracing::debug!(flag = %name, "flag overridden");
        } else {
            tracing::debug!(flag = %name, "flag defined");
        }
        Ok(())
    }

    /// Names `flag` would claim paired with the canonical name of the flag
    /// currently holding each of them.
    fn claims(&self, flag: &Flag) -> Vec<(String, String)> {
        let mut claims = Vec::new();
        if self.flags.contains_key(flag.name()) {
            claims.push((flag.name().to_owned(), flag.name().to_owned()));
        } else if let Some(owner) = single_char(flag.name()).and_then(|c| self.aliases.get(&c)) {
            claims.push((flag.name().to_owned(), owner.clone()));
        }
        if let Some(short) = flag.short() {
            let claimed = short.to_string();
            if let Some(owner) = self.aliases.get(&short) {
                claims.push((claimed.clone(), owner.clone()));
            }
            if claimed != flag.name() && self.flags.contains_key(&claimed) {
                claims.push((claimed.clone(), claimed));
            }
        }
        claims
    }

    /// Resolves a canonical or short name to the canonical name.
    #[must_use]
    pub fn canonical(&self, name: &str) -> Option<&str> {
        if let Some((key, _)) = self.flags.get_key_value(name) {
            return Some(key.as_str());
        }
        let owner = self.aliases.get(&single_char(name)?)?;
        self.flags.get_key_value(owner).map(|(key, _)| key.as_str())
    }

    /// Looks a flag up by canonical or short name.
    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<&Flag> {
        self.canonical(name).and_then(|key| self.flags.get(key))
    }

    /// Mutable variant of [`Self::lookup`].
    pub fn lookup_mut(&mut self, name: &str) -> Option<&mut Flag> {
        let key = self.canonical(name)?.to_owned();
        self.flags.get_mut(&key)
    }

    /// Whether `name` is a registered canonical or short name.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.canonical(name).is_some()
    }

    /// Removes the flag known as `name`, along with its short alias.
    ///
    /// # Errors
    ///
    /// Returns [`FlagsError::UnknownFlag`] when no flag is registered as
    /// `name`.
    pub fn delete(&mut self, name: &str) -> FlagsResult<Flag> {
        let key = self
            .canonical(name)
            .ok_or_else(|| FlagsError::unknown(name))?
            .to_owned();
        self.remove(&key).ok_or_else(|| FlagsError::unknown(name))
    }

    fn remove(&mut self, canonical: &str) -> Option<Flag> {
        let flag = self.flags.shift_remove(canonical)?;
        self.aliases.retain(|_, target| target != canonical);
        tracing::debug!(flag = canonical, "flag deleted");
        Some(flag)
    }

    fn require(&self, name: &str) -> FlagsResult<&Flag> {
        self.lookup(name).ok_or_else(|| FlagsError::unknown(name))
    }

    fn require_mut(&mut self, name: &str) -> FlagsResult<&mut Flag> {
        match self.canonical(name).map(str::to_owned) {
            Some(key) => self
                .flags
                .get_mut(&key)
                .ok_or_else(|| FlagsError::unknown(name)),
            None => Err(FlagsError::unknown(name)),
        }
    }

    /// Current value of `name`, or `None` when unset.
    ///
    /// # Errors
    ///
    /// Returns [`FlagsError::UnknownFlag`] for unregistered names.
    pub fn value(&self, name: &str) -> FlagsResult<Option<&FlagValue>> {
        Ok(self.require(name)?.value())
    }

    /// The flag's value when it holds one, otherwise `fallback`.
    ///
    /// # Errors
    ///
    /// Returns [`FlagsError::UnknownFlag`] for unregistered names.
    pub fn get(&self, name: &str, fallback: impl Into<FlagValue>) -> FlagsResult<FlagValue> {
        Ok(self
            .require(name)?
            .value()
            .cloned()
            .unwrap_or_else(|| fallback.into()))
    }

    /// Current value of `name` converted to `T`, or `None` when unset.
    ///
    /// # Errors
    ///
    /// - [`FlagsError::UnknownFlag`] for unregistered names.
    /// - [`FlagsError::IllegalValue`] when the value does not convert to `T`.
    pub fn typed<T: FromFlagValue>(&self, name: &str) -> FlagsResult<Option<T>> {
        let flag = self.require(name)?;
        flag.value()
            .map(|value| {
                T::from_flag_value(value).ok_or_else(|| {
                    let reason =
                        format!("value does not convert to {}", std::any::type_name::<T>());
                    FlagsError::illegal_value(
                        flag.name(),
                        &value.to_string(),
                        &CoerceError::new(reason),
                    )
                })
            })
            .transpose()
    }

    /// Whether `name` received an occurrence since the last reset.
    ///
    /// # Errors
    ///
    /// Returns [`FlagsError::UnknownFlag`] for unregistered names.
    pub fn is_present(&self, name: &str) -> FlagsResult<bool> {
        Ok(self.require(name)?.is_present())
    }

    /// Replaces the value of `name` without marking it present.
    ///
    /// # Errors
    ///
    /// - [`FlagsError::UnknownFlag`] for unregistered names.
    /// - [`FlagsError::IllegalValue`] when the value is rejected.
    pub fn set_value(&mut self, name: &str, value: Option<FlagValue>) -> FlagsResult<()> {
        self.require_mut(name)?.set_value(value)
    }

    /// Applies `raw` to `name` exactly like one argv occurrence.
    ///
    /// # Errors
    ///
    /// - [`FlagsError::UnknownFlag`] for unregistered names.
    /// - [`FlagsError::IllegalValue`] when `raw` fails coercion.
    pub fn set_from_str(&mut self, name: &str, raw: &str) -> FlagsResult<()> {
        self.require_mut(name)?.parse(raw)
    }

    /// Changes the default of `name`, and its value unless it is present.
    ///
    /// # Errors
    ///
    /// - [`FlagsError::UnknownFlag`] for unregistered names.
    /// - [`FlagsError::IllegalValue`] when the value is rejected.
    pub fn set_default(&mut self, name: &str, value: Option<FlagValue>) -> FlagsResult<()> {
        self.require_mut(name)?.set_default(value)
    }

    /// Restores every flag to its default and clears presence.
    pub fn reset(&mut self) {
        for flag in self.flags.values_mut() {
            flag.reset();
        }
    }

    /// Canonical names in declaration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.flags.keys().map(String::as_str)
    }

    /// Flags in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &Flag> {
        self.flags.values()
    }

    /// Every registered name: canonical names in declaration order, each
    /// followed by its short alias.
    #[must_use]
    pub fn registered_names(&self) -> Vec<String> {
        self.flags.values().flat_map(Self::names_of).collect()
    }

    /// Number of defined flags.
    #[must_use]
    pub fn len(&self) -> usize {
        self.flags.len()
    }

    /// Whether no flags are defined.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.flags.is_empty()
    }

    /// Shortest unique prefix of every registered name and of the negated
    /// form of every boolean name.
    #[must_use]
    pub fn shortest_unique_prefixes(&self) -> BTreeMap<String, String> {
        let mut names = Vec::new();
        for flag in self.flags.values() {
            let negate = flag.is_boolean();
            for name in Self::names_of(flag) {
                if negate {
                    names.push(format!("no{name}"));
                }
                names.push(name);
            }
        }
        prefix::shortest_unique_prefixes(names)
    }

    fn names_of(flag: &Flag) -> Vec<String> {
        let mut names = vec![flag.name().to_owned()];
        if let Some(short) = flag.short().map(String::from)
            && short != flag.name()
        {
            names.push(short);
        }
        names
    }

    /// Every name a long option can be abbreviated from: canonical names and
    /// the negated form of booleans.
    pub(crate) fn abbreviation_targets(&self) -> Vec<String> {
        let mut targets = Vec::with_capacity(self.flags.len());
        for flag in self.flags.values() {
            targets.push(flag.name().to_owned());
            if flag.is_boolean() {
                targets.push(format!("no{}", flag.name()));
            }
        }
        targets
    }

    pub(crate) fn position(&self, canonical: &str) -> Option<usize> {
        self.flags.get_index_of(canonical)
    }

    pub(crate) fn flag_mut(&mut self, canonical: &str) -> Option<&mut Flag> {
        self.flags.get_mut(canonical)
    }
}

impl<'a> IntoIterator for &'a FlagValues {
    type Item = &'a Flag;
    type IntoIter = indexmap::map::Values<'a, String, Flag>;

    fn into_iter(self) -> Self::IntoIter {
        self.flags.values()
    }
}

fn may_override(existing: &Flag, incoming: &Flag) -> bool {
    (existing.overridable() || incoming.overridable())
        && existing.default_value().is_some()
        && incoming.default_value().is_some()
}

fn single_char(name: &str) -> Option<char> {
    let mut chars = name.chars();
    match (chars.next(), chars.next()) {
        (Some(only), None) => Some(only),
        _ => None,
    }
}

fn validate_name(name: &str) -> FlagsResult<()> {
    let reason = if name.is_empty() {
        "name is empty"
    } else if name.contains('=') {
        "name contains '='"
    } else if name.starts_with('-') {
        "name starts with '-'"
    } else if name.chars().any(char::is_whitespace) {
        "name contains whitespace"
    } else if RESERVED_NAMES.contains(&name) {
        "name is reserved for a parser directive"
    } else {
        return Ok(());
    };
    Err(FlagsError::invalid_name(name, reason))
}

fn validate_short(short: char) -> FlagsResult<()> {
    if short == '-' || short == '=' || short.is_whitespace() {
        return Err(FlagsError::invalid_name(
            short.to_string(),
            "short name cannot be parsed",
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests;
