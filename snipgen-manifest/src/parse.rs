//! Manifest parsing from files and strings.

use std::{path::Path, str::FromStr};

use crate::{Error, Manifest, Result, error::SourceContext, validate::ParseContext};

/// Conventional manifest file name.
pub const MANIFEST_FILE_NAME: &str = "snipgen.toml";

impl FromStr for Manifest {
    type Err = Box<Error>;

    fn from_str(s: &str) -> Result<Self> {
        parse_manifest(s, MANIFEST_FILE_NAME)
    }
}

impl Manifest {
    /// Parse a snipgen.toml file from the given path.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            Box::new(Error::Io {
                path: path.to_path_buf(),
                source: e,
            })
        })?;
        parse_manifest(&content, &path.display().to_string())
    }

    /// Parse a snipgen.toml from a string with a custom filename for error reporting.
    pub fn from_str_with_filename(content: &str, filename: &str) -> Result<Self> {
        parse_manifest(content, filename)
    }
}

/// Parse and validate a manifest, using `filename` in diagnostics.
pub fn parse_manifest(content: &str, filename: &str) -> Result<Manifest> {
    let source_ctx = SourceContext::new(content, filename);
    let manifest: Manifest = toml::from_str(content).map_err(|e| source_ctx.parse_error(e))?;
    ParseContext::new(content, filename).validate(&manifest)?;
    Ok(manifest)
}
