//! Snapshots of flag state and the RAII guard restoring them.

use std::ops::{Deref, DerefMut};

use super::FlagValues;
use crate::value::FlagValue;

#[derive(Debug, Clone, PartialEq)]
struct SavedFlag {
    name: String,
    value: Option<FlagValue>,
    default: Option<FlagValue>,
    present: u32,
}

/// Value, default and presence of every flag at the time of
/// [`FlagValues::save`].
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SavedFlags {
    entries: Vec<SavedFlag>,
}

impl SavedFlags {
    /// Number of flags captured.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the snapshot captured no flags.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FlagValues {
    /// Captures the mutable state of every flag.
    #[must_use]
    pub fn save(&self) -> SavedFlags {
        let entries = self
            .flags
            .values()
            .map(|flag| SavedFlag {
                name: flag.name().to_owned(),
                value: flag.value().cloned(),
                default: flag.default_value().cloned(),
                present: flag.present(),
            })
            .collect();
        SavedFlags { entries }
    }

    /// Writes a snapshot back. Flags deleted since the snapshot are skipped;
    /// flags defined since keep their state.
    pub fn restore(&mut self, saved: &SavedFlags) {
        for entry in &saved.entries {
            if let Some(flag) = self.flags.get_mut(&entry.name) {
                flag.restore_state(entry.value.clone(), entry.default.clone(), entry.present);
            }
        }
    }

    /// Returns a guard that restores the current state when dropped.
    ///
    /// # Examples
    ///
    /// ```
    /// use ortho_flags::{Flag, FlagValue, FlagValues};
    ///
    /// # fn main() -> ortho_flags::FlagsResult<()> {
    /// let mut flags = FlagValues::new();
    /// flags.define(Flag::integer("retries", "attempts").default(3))?;
    /// {
    ///     let mut scoped = flags.saver();
    ///     scoped.set_from_str("retries", "9")?;
    ///     assert_eq!(scoped.typed::<i64>("retries")?, Some(9));
    /// }
    /// assert_eq!(flags.value("retries")?, Some(&FlagValue::from(3)));
    /// # Ok(())
    /// # }
    /// ```
    pub fn saver(&mut self) -> FlagSaver<'_> {
        FlagSaver {
            saved: self.save(),
            flags: self,
        }
    }
}

/// Scoped mutable access to a registry; restores the saved state on drop.
#[derive(Debug)]
pub struct FlagSaver<'a> {
    flags: &'a mut FlagValues,
    saved: SavedFlags,
}

impl FlagSaver<'_> {
    /// The state that will be restored.
    #[must_use]
    pub const fn saved(&self) -> &SavedFlags {
        &self.saved
    }
}

impl Deref for FlagSaver<'_> {
    type Target = FlagValues;

    fn deref(&self) -> &Self::Target {
        self.flags
    }
}

impl DerefMut for FlagSaver<'_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.flags
    }
}

impl Drop for FlagSaver<'_> {
    fn drop(&mut self) {
        self.flags.restore(&self.saved);
    }
}
