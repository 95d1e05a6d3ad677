//! Merged snapshot of default and user-defined snippets.
//!
//! A catalog is immutable. Every change produces a new snapshot, so a
//! catalog can be shared freely between callers.

use std::path::Path;

use indexmap::IndexMap;
use snipgen_core::Snippet;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read snippet file '{path}'")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid snippet JSON in {origin}: {source}")]
    Json {
        origin: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Default and user snippets merged by name.
///
/// User snippets override defaults with the same name and are flagged
/// `is_user_defined`. Snippets are ordered by name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SnippetCatalog {
    defaults: Vec<Snippet>,
    user: Vec<Snippet>,
    merged: Vec<Snippet>,
}

impl SnippetCatalog {
    pub fn merge(defaults: Vec<Snippet>, user: Vec<Snippet>) -> Self {
        let defaults = keep_named(defaults, false);
        let user = keep_named(user, true);

        let mut by_name: IndexMap<String, Snippet> = IndexMap::new();
        for snippet in defaults.iter().chain(user.iter()) {
            by_name.insert(snippet.name.clone(), snippet.clone());
        }
        let mut merged: Vec<Snippet> = by_name.into_values().collect();
        merged.sort_by(|a, b| a.name.cmp(&b.name));

        log::debug!(
            "snippet catalog: {} defaults, {} user, {} merged",
            defaults.len(),
            user.len(),
            merged.len()
        );
        Self {
            defaults,
            user,
            merged,
        }
    }

    /// Parse default and user snippet JSON.
    pub fn from_json(defaults: &str, user: Option<&str>) -> Result<Self, CatalogError> {
        let defaults = parse_snippets(defaults, "default snippets")?;
        let user = match user {
            Some(text) => parse_snippets(text, "user snippets")?,
            None => Vec::new(),
        };
        Ok(Self::merge(defaults, user))
    }

    /// Load default and user snippet files. A missing user file is empty.
    pub fn load(defaults: &Path, user: Option<&Path>) -> Result<Self, CatalogError> {
        let defaults_text = read(defaults)?;
        let defaults = parse_snippets(&defaults_text, &defaults.display().to_string())?;
        let user = match user {
            Some(path) if path.exists() => {
                parse_snippets(&read(path)?, &path.display().to_string())?
            }
            _ => Vec::new(),
        };
        Ok(Self::merge(defaults, user))
    }

    /// All snippets, ordered by name.
    pub fn snippets(&self) -> &[Snippet] {
        &self.merged
    }

    pub fn user_snippets(&self) -> &[Snippet] {
        &self.user
    }

    pub fn get(&self, name: &str) -> Option<&Snippet> {
        self.merged.iter().find(|s| s.name == name)
    }

    pub fn len(&self) -> usize {
        self.merged.len()
    }

    pub fn is_empty(&self) -> bool {
        self.merged.is_empty()
    }

    /// Add a user snippet, replacing any user snippet with the same name.
    pub fn with_user_snippet(&self, snippet: Snippet) -> Self {
        let name = snippet.name.clone();
        self.replace_user_snippet(&name, snippet)
    }

    /// Replace the user snippet named `original_name`, which may rename it.
    ///
    /// When no such user snippet exists the snippet is added.
    pub fn replace_user_snippet(&self, original_name: &str, snippet: Snippet) -> Self {
        let mut user: Vec<Snippet> = self
            .user
            .iter()
            .filter(|s| s.name != original_name && s.name != snippet.name)
            .cloned()
            .collect();
        user.push(snippet);
        Self::merge(self.defaults.clone(), user)
    }

    /// Remove a user snippet. A default with the same name becomes visible again.
    pub fn without_user_snippet(&self, name: &str) -> Self {
        let user = self.user.iter().filter(|s| s.name != name).cloned().collect();
        Self::merge(self.defaults.clone(), user)
    }

    /// User snippets as pretty-printed JSON.
    pub fn user_snippets_json(&self) -> Result<String, CatalogError> {
        serde_json::to_string_pretty(&self.user).map_err(|source| CatalogError::Json {
            origin: "user snippets".to_string(),
            source,
        })
    }

    /// Replace the user layer from JSON. Blank text clears it.
    ///
    /// On invalid JSON an error is returned and `self` is untouched.
    pub fn load_user_snippets_json(&self, text: &str) -> Result<Self, CatalogError> {
        let user = if text.trim().is_empty() {
            Vec::new()
        } else {
            parse_snippets(text, "user snippets")?
        };
        Ok(Self::merge(self.defaults.clone(), user))
    }
}

fn keep_named(snippets: Vec<Snippet>, is_user_defined: bool) -> Vec<Snippet> {
    snippets
        .into_iter()
        .filter(|s| {
            let named = !s.name.trim().is_empty();
            if !named {
                log::warn!("ignoring snippet with a blank name");
            }
            named
        })
        .map(|mut s| {
            s.is_user_defined = is_user_defined;
            s
        })
        .collect()
}

fn parse_snippets(text: &str, origin: &str) -> Result<Vec<Snippet>, CatalogError> {
    serde_json::from_str(text).map_err(|source| CatalogError::Json {
        origin: origin.to_string(),
        source,
    })
}

fn read(path: &Path) -> Result<String, CatalogError> {
    std::fs::read_to_string(path).map_err(|source| CatalogError::Read {
        path: path.display().to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(catalog: &SnippetCatalog) -> Vec<(&str, bool)> {
        catalog
            .snippets()
            .iter()
            .map(|s| (s.name.as_str(), s.is_user_defined))
            .collect()
    }

    fn catalog() -> SnippetCatalog {
        SnippetCatalog::merge(
            vec![Snippet::new("Model", "default"), Snippet::new("Dto", "dto")],
            vec![Snippet::new("Model", "mine"), Snippet::new("Api", "api")],
        )
    }

    #[test]
    fn test_merge_user_overrides_by_name() {
        let catalog = catalog();
        assert_eq!(
            names(&catalog),
            vec![("Api", true), ("Dto", false), ("Model", true)]
        );
        assert_eq!(catalog.get("Model").unwrap().template, "mine");
    }

    #[test]
    fn test_blank_names_ignored() {
        let catalog = SnippetCatalog::merge(vec![Snippet::new("  ", "x")], Vec::new());
        assert!(catalog.is_empty());
        let catalog = catalog.with_user_snippet(Snippet::new("", "x"));
        assert!(catalog.is_empty());
    }

    #[test]
    fn test_add_update_delete_return_new_snapshots() {
        let original = catalog();

        let added = original.with_user_snippet(Snippet::new("Form", "form"));
        assert_eq!(added.len(), 4);
        assert_eq!(original.len(), 3);

        let renamed = added.replace_user_snippet("Form", Snippet::new("Page", "page"));
        assert!(renamed.get("Form").is_none());
        assert_eq!(renamed.get("Page").unwrap().template, "page");

        let removed = renamed.without_user_snippet("Model");
        assert_eq!(removed.get("Model").unwrap().template, "default");
        assert!(!removed.get("Model").unwrap().is_user_defined);
    }

    #[test]
    fn test_user_json_roundtrip_and_errors() {
        let catalog = catalog();
        let json = catalog.user_snippets_json().unwrap();
        assert!(json.contains("\"Name\": \"Api\""));

        let reloaded = SnippetCatalog::default().load_user_snippets_json(&json).unwrap();
        assert_eq!(names(&reloaded), vec![("Api", true), ("Model", true)]);

        let cleared = catalog.load_user_snippets_json("   ").unwrap();
        assert_eq!(names(&cleared), vec![("Dto", false), ("Model", false)]);

        assert!(matches!(
            catalog.load_user_snippets_json("{ not json"),
            Err(CatalogError::Json { .. })
        ));
        assert_eq!(catalog.len(), 3);
    }
}
