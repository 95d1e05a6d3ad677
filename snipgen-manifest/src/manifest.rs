use std::path::PathBuf;

use indexmap::IndexMap;
use serde::Deserialize;
use snipgen_core::SnippetSet;

/// Root manifest for snipgen.toml
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Manifest {
    /// Project metadata
    pub project: ProjectConfig,

    /// Where snippet definitions live
    pub snippets: SnippetsConfig,

    /// Named snippet sets, in declaration order
    #[serde(default)]
    pub sets: IndexMap<String, SetConfig>,
}

/// Project metadata
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProjectConfig {
    pub name: String,

    /// Bound as `NameSpace` in templates
    pub namespace: Option<String>,

    /// Bound as `ProgramName` in templates
    pub program_name: Option<String>,

    pub description: Option<String>,

    /// Output directory, relative to the manifest
    #[serde(default = "default_output")]
    pub output: PathBuf,

    /// Sets generated when none are named on the command line
    #[serde(default)]
    pub sets: Vec<String>,
}

fn default_output() -> PathBuf {
    PathBuf::from("generated")
}

/// Snippet file locations, relative to the manifest
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SnippetsConfig {
    /// Shipped default snippets (JSON array)
    pub defaults: PathBuf,

    /// User-defined snippets overriding defaults by name (JSON array)
    pub user: Option<PathBuf>,
}

/// A `[sets.<name>]` table
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SetConfig {
    pub description: Option<String>,
    pub snippets: Vec<String>,
}

impl Manifest {
    /// Look up a declared set by name.
    pub fn set(&self, name: &str) -> Option<SnippetSet> {
        self.sets.get(name).map(|config| to_snippet_set(name, config))
    }

    /// All declared sets, in declaration order.
    pub fn snippet_sets(&self) -> Vec<SnippetSet> {
        self.sets
            .iter()
            .map(|(name, config)| to_snippet_set(name, config))
            .collect()
    }

    /// The sets selected by `[project] sets`.
    pub fn selected_sets(&self) -> Vec<SnippetSet> {
        self.project
            .sets
            .iter()
            .filter_map(|name| self.set(name))
            .collect()
    }
}

fn to_snippet_set(name: &str, config: &SetConfig) -> SnippetSet {
    SnippetSet {
        name: name.to_string(),
        description: config.description.clone(),
        snippet_names: config.snippets.clone(),
    }
}
