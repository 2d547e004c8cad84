//! Plain-text help listing.

use std::fmt;

use super::FlagValues;
use crate::flag::Flag;

impl FlagValues {
    /// Flags grouped by module label; modules and flags both appear in
    /// declaration order.
    pub(crate) fn module_groups(&self) -> Vec<(&str, Vec<&Flag>)> {
        let mut groups: Vec<(&str, Vec<&Flag>)> = Vec::new();
        for flag in self.flags.values() {
            let label = flag.module_label().unwrap_or(&self.main_module);
            match groups.iter_mut().find(|(name, _)| *name == label) {
                Some((_, members)) => members.push(flag),
                None => groups.push((label, vec![flag])),
            }
        }
        groups
    }
}

/// Renders the help listing.
///
/// ```text
/// main:
///   -r,--repeat:  how many times to repeat
///     (default: '4')
///     (a non-negative integer)
/// ```
impl fmt::Display for FlagValues {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, (module, members)) in self.module_groups().into_iter().enumerate() {
            if idx > 0 {
                writeln!(f)?;
            }
            writeln!(f, "{module}:")?;
            for flag in members {
                write_flag(f, flag)?;
            }
        }
        Ok(())
    }
}

fn write_flag(f: &mut fmt::Formatter<'_>, flag: &Flag) -> fmt::Result {
    f.write_str("  ")?;
    if let Some(short) = flag.short() {
        write!(f, "-{short},")?;
    }
    let negation = if flag.is_boolean() { "[no]" } else { "" };
    write!(f, "--{negation}{}:", flag.name())?;
    if !flag.help().is_empty() {
        write!(f, "  {}", flag.help())?;
    }
    writeln!(f)?;
    if let Some(default) = flag.default_as_str() {
        writeln!(f, "    (default: '{default}')")?;
    }
    let tip = flag.tip();
    if !tip.is_empty() {
        writeln!(f, "    ({tip})")?;
    }
    Ok(())
}
