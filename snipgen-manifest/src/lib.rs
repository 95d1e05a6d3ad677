//! `snipgen.toml` project manifest.
//!
//! The manifest names the project (bound into templates as `NameSpace` and
//! `ProgramName`), points at the snippet files and declares snippet sets.

// Miette's derive macro generates code that triggers these warnings
#![allow(unused_assignments)]

mod error;
mod file;
mod manifest;
mod parse;
mod validate;

pub use error::{Error, Result, SourceContext};
pub use file::ProjectToml;
pub use manifest::{Manifest, ProjectConfig, SetConfig, SnippetsConfig};
pub use parse::{MANIFEST_FILE_NAME, parse_manifest};
pub use validate::{MAX_DESCRIPTION_LEN, MAX_NAME_LEN, MAX_NAMESPACE_LEN, ParseContext};
