use std::path::{Path, PathBuf};

use crate::{Error, Manifest, Result, parse::MANIFEST_FILE_NAME};

/// A snipgen.toml file with both raw content and parsed manifest.
#[derive(Debug, Clone)]
pub struct ProjectToml {
    path: PathBuf,
    content: String,
    manifest: Manifest,
}

impl ProjectToml {
    /// Open and parse a snipgen.toml file.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let content = std::fs::read_to_string(&path).map_err(|e| {
            Box::new(Error::Io {
                path: path.clone(),
                source: e,
            })
        })?;
        let filename = path.display().to_string();
        let manifest = Manifest::from_str_with_filename(&content, &filename)?;

        Ok(Self {
            path,
            content,
            manifest,
        })
    }

    /// Open `snipgen.toml` inside `dir`.
    pub fn open_in(dir: impl AsRef<Path>) -> Result<Self> {
        Self::open(dir.as_ref().join(MANIFEST_FILE_NAME))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn manifest(&self) -> &Manifest {
        &self.manifest
    }

    /// Directory containing the manifest; relative paths resolve against it.
    pub fn dir(&self) -> &Path {
        self.path.parent().unwrap_or_else(|| Path::new("."))
    }

    /// Resolve a manifest-relative path.
    pub fn resolve(&self, path: impl AsRef<Path>) -> PathBuf {
        self.dir().join(path)
    }

    pub fn defaults_path(&self) -> PathBuf {
        self.resolve(&self.manifest.snippets.defaults)
    }

    pub fn user_snippets_path(&self) -> Option<PathBuf> {
        self.manifest.snippets.user.as_ref().map(|p| self.resolve(p))
    }

    pub fn output_dir(&self) -> PathBuf {
        self.resolve(&self.manifest.project.output)
    }
}
