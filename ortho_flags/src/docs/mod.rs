//! Documentation metadata for flag registries.

mod ir;

pub use ir::{FlagDoc, FlagsDoc, ModuleDoc};

use crate::registry::FlagValues;

/// Current IR schema version.
pub const FLAGS_DOCS_IR_VERSION: &str = "1.0";

impl FlagsDoc {
    /// Renders the IR as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns the serialiser error; the IR contains only strings, booleans
    /// and integers so this does not happen in practice.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

impl FlagValues {
    /// Describes every flag for documentation tooling.
    ///
    /// # Examples
    ///
    /// ```
    /// use ortho_flags::{Flag, FlagValues};
    ///
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let mut flags = FlagValues::new().with_main_module("demo");
    /// flags.define(Flag::integer("port", "listen port").default(8080).short_name('p'))?;
    /// let doc = flags.doc_metadata("demo");
    /// assert_eq!(doc.modules[0].name, "demo");
    /// assert!(doc.to_json()?.contains("\"long\": \"port\""));
    /// # Ok(())
    /// # }
    /// ```
    #[must_use]
    pub fn doc_metadata(&self, program: &str) -> FlagsDoc {
        let modules = self
            .module_groups()
            .into_iter()
            .map(|(name, members)| ModuleDoc {
                name: name.to_owned(),
                flags: members
                    .into_iter()
                    .map(|flag| FlagDoc {
                        long: flag.name().to_owned(),
                        short: flag.short(),
                        kind: flag.kind(),
                        help: flag.help().to_owned(),
                        tip: flag.tip(),
                        default: flag.default_as_str(),
                        current: flag.value_as_str(),
                        multiple: flag.is_multiple(),
                        negatable: flag.is_boolean(),
                        is_default: flag.value() == flag.default_value(),
                        order: self.position(flag.name()).unwrap_or_default(),
                    })
                    .collect(),
            })
            .collect();
        FlagsDoc {
            ir_version: FLAGS_DOCS_IR_VERSION.to_owned(),
            program: program.to_owned(),
            modules,
        }
    }
}
