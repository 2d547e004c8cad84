//! Test helpers shared across crates in the workspace.
//!
//! - [`env`]: guards for `FLAGS_*` and other environment variables.
//! - [`cwd`]: a guard for the process working directory.
//! - [`flagfile`]: temporary flagfiles and the directives naming them.

pub mod cwd;
pub mod env;
pub mod flagfile;
