//! Intermediate representation (IR) types for flag documentation.
//!
//! These structures are produced by [`crate::FlagValues::doc_metadata`] and
//! consumed by external tooling such as man-page generators.

use serde::Serialize;

use crate::coerce::FlagKind;

/// Documentation for every flag of one program.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct FlagsDoc {
    /// Schema version, see [`super::FLAGS_DOCS_IR_VERSION`].
    pub ir_version: String,
    /// Program the flags belong to.
    pub program: String,
    /// Modules in declaration order.
    pub modules: Vec<ModuleDoc>,
}

/// Flags declared under one module label.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ModuleDoc {
    /// Module label.
    pub name: String,
    /// Flags in declaration order.
    pub flags: Vec<FlagDoc>,
}

/// Metadata describing a single flag.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct FlagDoc {
    /// Canonical name.
    pub long: String,
    /// Single-character alias.
    pub short: Option<char>,
    /// Declared kind; the element kind for multi-valued flags.
    pub kind: FlagKind,
    /// Help text.
    pub help: String,
    /// Syntax tip, empty when the kind needs none.
    pub tip: String,
    /// Default in canonical string form.
    pub default: Option<String>,
    /// Current value in canonical string form.
    pub current: Option<String>,
    /// Whether occurrences accumulate.
    pub multiple: bool,
    /// Whether `--no<name>` is accepted.
    pub negatable: bool,
    /// Whether the current value equals the default.
    pub is_default: bool,
    /// Position in declaration order across the whole registry.
    pub order: usize,
}
